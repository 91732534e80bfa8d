//! CLI command implementations.

pub mod analyze;
pub mod execute;
pub mod rollback;
pub mod sessions;
pub mod validate;

use crate::core::engine::RunSummary;
use crate::core::{loader, report, session};
use crate::models::config::Config;
use crate::models::template::{Mode, Template};
use crate::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Persist the processed template, its report and a session copy, and print
/// where everything went.
fn persist_run(
    config: &Config,
    template: &Template,
    summary: &RunSummary,
    template_path: &Path,
    output: Option<&Path>,
    mode: Mode,
) -> Result<PathBuf> {
    let output_path = match output {
        Some(p) => p.to_path_buf(),
        None => loader::default_output_path(template_path, mode),
    };

    loader::save_template(template, &output_path)?;
    report::save_report(template, summary, &output_path.with_extension("report.txt"))?;
    let session_dir = session::save_session(config, template, summary)?;

    println!(
        "{} {}",
        "[OK] Processed template saved to:".bold().green(),
        output_path.display()
    );
    println!("  {} {}", "Session:".bold(), session_dir.display());

    Ok(output_path)
}
