//! Validate command implementation.
//!
//! Loads a template and reports its structure without touching the system:
//! group and entry counts, referenced plugins, and how many entries carry
//! rollback instructions.

use crate::core::{loader, resolver};
use crate::models::config::load_config;
use crate::plugins::registry::PluginRegistry;
use crate::Result;
use colored::Colorize;
use std::collections::BTreeSet;
use std::path::Path;

/// Validate a template file.
pub fn validate(template_path: &Path) -> Result<()> {
    println!("{}", "[VALIDATE] Validating template...".bold().cyan());
    println!();

    let template = loader::load_template(template_path)?;

    let enabled_groups = template.groups.iter().filter(|g| g.enabled).count();
    let disabled_entries = template.entries().filter(|e| !e.enabled).count();
    let unmarked_entries = template
        .entries()
        .filter(|e| e.enabled && !e.execute)
        .count();
    let rollback_capable = template
        .entries()
        .filter(|e| e.action.has_block(resolver::ROLLBACK_BLOCK))
        .count();

    println!("{}", "[Template]".bold());
    for meta in &template.metadata {
        println!("  {} {}", format!("{}:", meta.name).bold(), meta.value);
    }
    println!(
        "  {} {} ({} enabled)",
        "Groups:".bold(),
        template.groups.len(),
        enabled_groups
    );
    println!("  {} {}", "Entries:".bold(), template.entry_count());
    println!("  {} {}", "Disabled entries:".bold(), disabled_entries);
    println!(
        "  {} {}",
        "Not marked for execution:".bold(),
        unmarked_entries
    );
    println!(
        "  {} {}",
        "Rollback-capable entries:".bold(),
        rollback_capable
    );
    println!();

    // Referenced plugins, checked against the built-in registry.
    let config = load_config();
    let registry = PluginRegistry::builtin(&config);
    let referenced: BTreeSet<&str> = template
        .entries()
        .map(|e| e.action.plugin.as_str())
        .collect();

    println!("{}", "[Plugins]".bold());
    let mut unknown = 0;
    for name in referenced {
        if registry.contains(name) {
            println!("  {} {}", "[OK]".green(), name);
        } else {
            println!("  {} {} (not registered)", "[FAIL]".red(), name);
            unknown += 1;
        }
    }
    println!();

    if unknown == 0 {
        println!("{}", "[OK] Template is valid".green());
    } else {
        println!(
            "{}",
            format!("[WARNING] {} unknown plugin(s) referenced", unknown).yellow()
        );
    }

    Ok(())
}
