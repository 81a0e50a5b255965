//! `ambit workspaces` command implementation.
//!
//! List workspace packages in the order they would be declared.

use ambit_core::{build_order, detect_workspaces, find_workspace_root};
use miette::Result;
use std::path::Path;

/// Run the workspaces command.
pub fn run(cwd: &Path, json: bool) -> Result<()> {
    let root = find_workspace_root(cwd).unwrap_or_else(|| cwd.to_path_buf());

    let Some(config) = detect_workspaces(&root) else {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "ok": true,
                    "workspaces": false,
                    "packages": []
                })
            );
        } else {
            println!("No workspaces configured.");
            println!("hint: Add a \"workspaces\" field to package.json");
        }
        return Ok(());
    };

    let ordered = build_order(&config);

    if json {
        let pkg_list: Vec<_> = ordered
            .iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "version": p.version,
                    "path": p.path.to_string_lossy()
                })
            })
            .collect();

        println!(
            "{}",
            serde_json::json!({
                "ok": true,
                "workspaces": true,
                "root": root.to_string_lossy(),
                "packages": pkg_list
            })
        );
    } else {
        println!("Workspace root: {}", root.display());
        println!();
        println!("Packages in build order ({}):", ordered.len());
        for pkg in &ordered {
            println!("  {} @ {}", pkg.name, pkg.version);
            println!("    {}", pkg.path.display());
        }
    }

    Ok(())
}
