//! Sessions command implementation.
//!
//! Manages historical run sessions stored under the configured sessions
//! directory.

use crate::core::{loader, session};
use crate::models::config::load_config;
use crate::Result;
use colored::Colorize;
use std::fs;

/// List all sessions.
pub fn list_sessions() -> Result<()> {
    println!("{}", "[SESSIONS]".bold().cyan());
    println!();

    let config = load_config();
    let sessions_dir = session::sessions_dir(&config)?;

    let mut sessions: Vec<_> = fs::read_dir(&sessions_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .collect();

    if sessions.is_empty() {
        println!("No sessions found.");
        return Ok(());
    }

    // Sort by name (which includes timestamp)
    sessions.sort_by_key(|e| e.file_name());
    sessions.reverse(); // Most recent first

    println!(
        "{:<25} {:<10} {:<10} {:<10}",
        "Session ID".bold(),
        "Entries".bold(),
        "Processed".bold(),
        "Changed".bold()
    );
    println!("{}", "-".repeat(60));

    for entry in sessions {
        let session_id = entry.file_name().to_string_lossy().to_string();
        let template_path = entry.path().join(session::TEMPLATE_FILE);

        if !template_path.exists() {
            continue;
        }
        match loader::load_template(&template_path) {
            Ok(template) => {
                let processed = template.entries().filter(|e| e.history.is_some()).count();
                let changed = template
                    .entries()
                    .filter(|e| {
                        e.history
                            .as_ref()
                            .map(|h| h.system_changed)
                            .unwrap_or(false)
                    })
                    .count();
                println!(
                    "{:<25} {:<10} {:<10} {:<10}",
                    session_id,
                    template.entry_count(),
                    processed,
                    changed
                );
            }
            Err(_) => {
                println!("{:<25} {}", session_id, "(corrupted)".red());
            }
        }
    }

    Ok(())
}

/// Show details of a specific session.
pub fn show_session(session_id: &str) -> Result<()> {
    let config = load_config();
    let session_dir = session::sessions_dir(&config)?.join(session_id);

    if !session_dir.exists() {
        return Err(crate::Error::SessionNotFound(session_id.to_string()));
    }

    let report_path = session_dir.join(session::REPORT_FILE);
    if report_path.exists() {
        println!("{}", fs::read_to_string(&report_path)?);
    } else {
        println!("{}", "No report found for this session.".yellow());
    }

    println!(
        "  {} {}",
        "Template:".bold(),
        session_dir.join(session::TEMPLATE_FILE).display()
    );

    Ok(())
}
