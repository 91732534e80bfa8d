//! Analyze command implementation.
//!
//! Runs a template in analyze mode: every enabled entry's plugin inspects
//! the system without changing it, and the findings are recorded as history.

use crate::core::engine::Engine;
use crate::core::loader;
use crate::models::config::load_config;
use crate::models::template::Mode;
use crate::plugins::registry::PluginRegistry;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Analyze the system against a template.
pub fn analyze(template_path: &Path, output: Option<&Path>, groups: &[String]) -> Result<()> {
    println!("{}", "[ANALYZE] Analyzing system state...".bold().cyan());
    println!();

    println!("[INFO] Loading template: {}", template_path.display());
    let mut template = loader::load_for_run(template_path, Mode::Analyze)?;
    print_template_info(&template);

    let config = load_config();
    let engine = Engine::new(PluginRegistry::builtin(&config));
    let summary = engine.run(&mut template, Mode::Analyze, groups)?;

    println!();
    summary.print_summary();
    println!();

    super::persist_run(
        &config,
        &template,
        &summary,
        template_path,
        output,
        Mode::Analyze,
    )?;

    Ok(())
}

pub(super) fn print_template_info(template: &crate::models::template::Template) {
    for meta in &template.metadata {
        println!("  {} {}", format!("{}:", meta.name).bold(), meta.value);
    }
    println!("  {} {}", "Groups:".bold(), template.groups.len());
    println!("  {} {}", "Entries:".bold(), template.entry_count());
    println!();
}
