//! Run report emitter.
//!
//! Renders a processed template into a plain-text report: metadata header,
//! one line per entry with its recorded outcome, and the run totals.

use crate::core::engine::RunSummary;
use crate::models::template::Template;
use crate::Result;
use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Render a processed template and its run summary as plain text.
pub fn render_report(template: &Template, summary: &RunSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Tweak Run Report");
    let _ = writeln!(out, "================");
    let _ = writeln!(out, "Mode: {}", summary.mode);
    for meta in &template.metadata {
        let _ = writeln!(out, "{}: {}", meta.name, meta.value);
    }
    let _ = writeln!(out);

    for group in &template.groups {
        let enabled = if group.enabled { "" } else { " (disabled)" };
        let _ = writeln!(out, "[{}] {}{}", group.id, group.name, enabled);

        for entry in &group.entries {
            match &entry.history {
                Some(history) => {
                    let status = if history.result { "OK  " } else { "FAIL" };
                    let changed = if history.system_changed {
                        " [changed]"
                    } else {
                        ""
                    };
                    let _ = writeln!(
                        out,
                        "  {} {} - {}{}",
                        status, entry.name, history.detail, changed
                    );
                }
                None => {
                    let _ = writeln!(out, "  ---- {} - not processed", entry.name);
                }
            }
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "Summary: {} succeeded, {} failed, {} skipped",
        summary.success_count, summary.failure_count, summary.skip_count
    );

    out
}

/// Write the report next to the processed template.
pub fn save_report(template: &Template, summary: &RunSummary, path: &Path) -> Result<()> {
    let report = render_report(template, summary);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(path)?;
    file.write_all(report.as_bytes())?;

    tracing::info!("Report saved to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::Engine;
    use crate::core::loader::parse_template;
    use crate::models::template::Mode;
    use crate::plugins::registry::PluginRegistry;

    #[test]
    fn test_report_lists_every_entry() {
        let mut template = parse_template(
            r#"{
                "metadata": [{ "name": "author", "value": "tests" }],
                "groups": [{
                    "id": "g1", "name": "Group One",
                    "entries": [
                        {
                            "name": "disabled entry",
                            "enabled": false,
                            "action": { "plugin": "file" }
                        },
                        {
                            "name": "unmarked entry",
                            "execute": false,
                            "action": { "plugin": "file" }
                        }
                    ]
                }]
            }"#,
        )
        .unwrap();

        let engine = Engine::new(PluginRegistry::new());
        let summary = engine.run(&mut template, Mode::Analyze, &[]).unwrap();
        let report = render_report(&template, &summary);

        assert!(report.contains("Mode: analyze"));
        assert!(report.contains("author: tests"));
        assert!(report.contains("disabled entry"));
        assert!(report.contains("not marked for execution"));
        assert!(report.contains("Summary: 0 succeeded, 0 failed, 2 skipped"));
    }
}
