//! Execute command implementation.
//!
//! Runs a template in execute mode and persists the mutated template, whose
//! captured rollback instructions make it the input for a later rollback.

use crate::core::engine::Engine;
use crate::core::loader;
use crate::models::config::load_config;
use crate::models::template::Mode;
use crate::plugins::registry::PluginRegistry;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Execute a template.
pub fn execute(template_path: &Path, output: Option<&Path>, groups: &[String]) -> Result<()> {
    println!("{}", "[EXEC] Executing template...".bold().cyan());
    println!();

    println!("[INFO] Loading template: {}", template_path.display());
    let mut template = loader::load_for_run(template_path, Mode::Execute)?;
    super::analyze::print_template_info(&template);

    println!(
        "{}",
        "[WARNING] This will modify the system!".bold().yellow()
    );
    println!();

    let config = load_config();
    let engine = Engine::new(PluginRegistry::builtin(&config));
    let summary = engine.run(&mut template, Mode::Execute, groups)?;

    println!();
    summary.print_summary();
    println!();

    let output_path = super::persist_run(
        &config,
        &template,
        &summary,
        template_path,
        output,
        Mode::Execute,
    )?;

    println!();
    println!("{}", "[Next Steps]".bold().yellow());
    println!(
        "  To undo changes: {}",
        format!("tweak-runner rollback {}", output_path.display()).cyan()
    );

    Ok(())
}
