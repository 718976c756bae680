//! Output rendering for lint results.
//!
//! Supports `human` (default) and `json` outputs. Human output shows
//! 1-based lines as the compiler printed them; JSON keeps the 0-based
//! editor ranges.

use crate::models::{LintResult, Severity};
use owo_colors::OwoColorize;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && crate::utils::colors_enabled()
}

/// Print lint results in the requested format.
pub fn print_lint(res: &LintResult, output: &str) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_lint_json(res)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} {}", crate::utils::error_prefix(), e),
        },
        _ => {
            let color = use_colors(output);
            for line in render_human(res, color) {
                println!("{}", line);
            }
        }
    }
}

/// Human lines for `res`, summary last.
pub fn render_human(res: &LintResult, color: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for doc in &res.documents {
        for d in &doc.diagnostics {
            let (icon, tag) = match d.severity {
                Severity::Error => ("✖", "⟦error⟧"),
                Severity::Warning => ("▲", "⟦warn⟧"),
                Severity::Information => ("◆", "⟦info⟧"),
            };
            let location = if d.end_line > d.start_line {
                format!("{}:{}-{}", doc.file, d.start_line + 1, d.end_line + 1)
            } else {
                format!("{}:{}", doc.file, d.start_line + 1)
            };
            let line = if color {
                let (icon, tag) = match d.severity {
                    Severity::Error => (icon.red().to_string(), tag.red().bold().to_string()),
                    Severity::Warning => (
                        icon.yellow().to_string(),
                        tag.yellow().bold().to_string(),
                    ),
                    Severity::Information => {
                        (icon.blue().to_string(), tag.blue().bold().to_string())
                    }
                };
                format!("{} {} {} — {}", icon, tag, location.bold(), d.message)
            } else {
                format!("{} {} {} — {}", icon, tag, location, d.message)
            };
            lines.push(line);
        }
    }
    let summary = format!(
        "— Summary — errors={} warnings={} infos={} documents={}",
        res.summary.errors, res.summary.warnings, res.summary.infos, res.summary.documents
    );
    if color {
        lines.push(summary.bold().to_string());
    } else {
        lines.push(summary);
    }
    lines
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &LintResult) -> JsonVal {
    serde_json::to_value(res).unwrap_or(JsonVal::Null)
}
