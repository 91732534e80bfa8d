//! Run sessions.
//!
//! Every run stores its processed template and report under a per-run
//! directory in the configured sessions dir, so past runs can be listed,
//! inspected and rolled back later.

use crate::core::engine::RunSummary;
use crate::core::{loader, report};
use crate::models::config::Config;
use crate::models::template::Template;
use crate::Result;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// File name of the processed template inside a session directory.
pub const TEMPLATE_FILE: &str = "template.json";
/// File name of the run report inside a session directory.
pub const REPORT_FILE: &str = "report.txt";

/// Get the sessions directory, creating it if needed.
pub fn sessions_dir(config: &Config) -> Result<PathBuf> {
    fs::create_dir_all(&config.sessions_dir)?;
    Ok(config.sessions_dir.clone())
}

/// Save a processed template and its report as a new session.
pub fn save_session(
    config: &Config,
    template: &Template,
    summary: &RunSummary,
) -> Result<PathBuf> {
    let session_id = format!(
        "{}_{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        &Uuid::new_v4().to_string()[..8]
    );

    let session_dir = sessions_dir(config)?.join(&session_id);
    fs::create_dir_all(&session_dir)?;

    loader::save_template(template, &session_dir.join(TEMPLATE_FILE))?;
    report::save_report(template, summary, &session_dir.join(REPORT_FILE))?;

    tracing::info!("Session saved: {}", session_id);
    Ok(session_dir)
}
