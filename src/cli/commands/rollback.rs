//! Rollback command implementation.
//!
//! Runs a previously executed template in rollback mode, undoing the entries
//! that changed the system using their captured rollback instructions.

use crate::core::engine::Engine;
use crate::core::loader;
use crate::models::config::load_config;
use crate::models::template::Mode;
use crate::plugins::registry::PluginRegistry;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Roll back an executed template.
pub fn rollback(template_path: &Path, output: Option<&Path>, groups: &[String]) -> Result<()> {
    println!("{}", "[ROLLBACK] Rolling back tweaks...".bold().cyan());
    println!();

    println!("[INFO] Loading template: {}", template_path.display());
    // Fails fast when the document carries no rollback instructions at all.
    let mut template = loader::load_for_run(template_path, Mode::Rollback)?;
    super::analyze::print_template_info(&template);

    println!(
        "{}",
        "[WARNING] This will reverse previously applied tweaks!"
            .bold()
            .yellow()
    );
    println!();

    let config = load_config();
    let engine = Engine::new(PluginRegistry::builtin(&config));
    let summary = engine.run(&mut template, Mode::Rollback, groups)?;

    println!();
    summary.print_summary();
    println!();

    super::persist_run(
        &config,
        &template,
        &summary,
        template_path,
        output,
        Mode::Rollback,
    )?;

    if summary.is_success() {
        println!();
        println!("{}", "[OK] Rollback completed successfully!".green());
    } else {
        println!();
        println!("{}", "[WARNING] Rollback completed with errors".yellow());
    }

    Ok(())
}
