#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod logging;

use ambit_core::Config;
use clap::Parser;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ambit")]
#[command(author, version, about = "Ambient module declarations for TypeScript workspaces", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Generate ambient declarations for workspace packages
    Declare {
        /// Package to declare (omit to declare the whole workspace in
        /// build order)
        package: Option<String>,

        /// Path of the declaration artifact (default: @types/packages.d.ts
        /// under the workspace root)
        #[arg(long, short = 'o', value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// List workspace packages in build order
    Workspaces,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = Config::new(cwd.clone())
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json);

    // Workspaces handles its own output (JSON to stdout, no logging)
    if matches!(cli.command, Some(Commands::Workspaces)) {
        return commands::workspaces::run(&cwd, cli.json);
    }

    logging::init(config.verbosity, config.json_logs);

    match cli.command {
        Some(Commands::Declare { package, out }) => {
            commands::declare::run(&cwd, package.as_deref(), out.as_deref(), cli.json)
        }
        Some(Commands::Version) | None => commands::version::run(),
        Some(Commands::Workspaces) => unreachable!(), // Handled above
    }
}
