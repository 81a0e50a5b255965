//! Source text normalizer.
//!
//! Flattens a TypeScript source file into one fragment per top-level
//! `export` statement without full parsing. Statements are assumed to be
//! `;`-terminated with no semicolons nested inside braces or strings;
//! anything else is out of scope for this tool.

/// Normalize raw file content into blank-line-separated export fragments.
///
/// Returns `None` when the input is empty or contains no export statements.
///
/// Steps, in order:
/// 1. trim, drop whole-line `//` comments
/// 2. remove all newlines (the file becomes one logical stream)
/// 3. collapse runs of spaces/tabs to a single space
/// 4. rewrite a trailing comma before `}` to ` }`
/// 5. insert a `;` between `}` and an immediately following `export`
/// 6. split on `;`, keep fragments that start with `export`
#[must_use]
pub fn normalize_source(content: &str) -> Option<String> {
    if content.is_empty() {
        return None;
    }

    let mut stream = String::with_capacity(content.len());
    for line in content.trim().lines() {
        if line.starts_with("//") {
            continue;
        }
        stream.push_str(line);
    }

    let stream = collapse_blanks(&stream);
    let stream = stream.replace(", }", " }").replace(",}", " }");
    let stream = stream.replace("}export", "};export");

    let fragments: Vec<&str> = stream
        .split(';')
        .map(str::trim)
        .filter(|frag| frag.starts_with("export"))
        .collect();

    if fragments.is_empty() {
        return None;
    }

    Some(fragments.join("\n\n"))
}

/// Collapse runs of spaces and tabs into a single space.
fn collapse_blanks(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_blank = false;
    for c in s.chars() {
        if c == ' ' || c == '\t' {
            if !in_blank {
                out.push(' ');
            }
            in_blank = true;
        } else {
            in_blank = false;
            out.push(c);
        }
    }
    out
}
