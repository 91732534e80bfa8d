//! Execution engine.
//!
//! Walks the template's groups and entries in document order, resolves the
//! parameter block for the active mode, dispatches to the action plugin and
//! records the outcome of every processed entry as history. Processing is
//! strictly sequential: one plugin invocation at a time, blocking, with no
//! timeout and no retries. A plugin fault aborts the whole run; everything
//! else is a per-entry outcome.

use crate::core::{recorder, resolver};
use crate::models::template::{Mode, Template};
use crate::plugins::registry::PluginRegistry;
use crate::plugins::PluginOutcome;
use crate::Result;
use chrono::Utc;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

/// Skip detail for a disabled entry.
pub const DETAIL_DISABLED: &str = "disabled";
/// Skip detail for an entry not marked for execution.
pub const DETAIL_NOT_MARKED: &str = "not marked for execution";
/// Skip detail for a rollback of an entry that never changed the system.
pub const DETAIL_NO_PRIOR_CHANGE: &str = "no prior change";
/// Skip detail for a rollback denied for lack of instructions.
pub const DETAIL_NO_ROLLBACK_DATA: &str = "rollback instructions unavailable";

/// Template execution engine.
pub struct Engine {
    registry: PluginRegistry,
}

impl Engine {
    /// Create an engine dispatching to the given plugin registry.
    pub fn new(registry: PluginRegistry) -> Self {
        Self { registry }
    }

    /// Process a template in the given mode, attaching history to every
    /// processed entry.
    ///
    /// A non-empty `group_filter` restricts processing to the groups whose
    /// IDs it names; filtered-out and disabled groups are skipped without
    /// recording any history for their entries.
    pub fn run(
        &self,
        template: &mut Template,
        mode: Mode,
        group_filter: &[String],
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::new(mode);

        let selected = |id: &str, enabled: bool| {
            enabled && (group_filter.is_empty() || group_filter.iter().any(|g| g == id))
        };
        let total: u64 = template
            .groups
            .iter()
            .filter(|g| selected(&g.id, g.enabled))
            .map(|g| g.entries.len() as u64)
            .sum();

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );

        for group in template.groups.iter_mut() {
            if !group_filter.is_empty() && !group_filter.iter().any(|id| id == &group.id) {
                tracing::debug!("Group not in filter, skipping: {}", group.id);
                continue;
            }
            if !group.enabled {
                tracing::debug!("Group disabled, skipping: {}", group.id);
                continue;
            }

            pb.println(format!(
                "{} {} ({})",
                "[GROUP]".bold().cyan(),
                group.name,
                group.id
            ));

            for entry in group.entries.iter_mut() {
                pb.set_message(entry.name.clone());
                pb.inc(1);

                if !entry.enabled {
                    recorder::record_skip(entry, DETAIL_DISABLED);
                    summary.skip_count += 1;
                    pb.println(skip_line(&entry.name, DETAIL_DISABLED));
                    continue;
                }
                if !entry.execute {
                    recorder::record_skip(entry, DETAIL_NOT_MARKED);
                    summary.skip_count += 1;
                    pb.println(skip_line(&entry.name, DETAIL_NOT_MARKED));
                    continue;
                }

                let started_at = Utc::now();
                let params = resolver::resolve(mode, &entry.action).cloned();

                if mode == Mode::Rollback {
                    // Rollback only ever touches entries that actually
                    // changed the system and carry instructions for undoing
                    // it. Absent history counts as unchanged.
                    let prior_changed = entry
                        .history
                        .as_ref()
                        .map(|h| h.system_changed)
                        .unwrap_or(false);

                    if !prior_changed {
                        recorder::record(
                            entry,
                            started_at,
                            false,
                            DETAIL_NO_PRIOR_CHANGE,
                            false,
                            None,
                        );
                        summary.skip_count += 1;
                        pb.println(skip_line(&entry.name, DETAIL_NO_PRIOR_CHANGE));
                        continue;
                    }
                    if params.is_none() {
                        recorder::record(
                            entry,
                            started_at,
                            false,
                            DETAIL_NO_ROLLBACK_DATA,
                            false,
                            None,
                        );
                        summary.skip_count += 1;
                        pb.println(skip_line(&entry.name, DETAIL_NO_ROLLBACK_DATA));
                        continue;
                    }
                }

                let params = params.unwrap_or(Value::Null);
                let plugin_name = entry.action.plugin.clone();
                let plugin = self
                    .registry
                    .get(&plugin_name)
                    .ok_or_else(|| crate::Error::PluginNotFound(plugin_name.clone()))?;

                tracing::info!(
                    "Invoking plugin '{}' for entry '{}' in {} mode",
                    plugin_name,
                    entry.name,
                    mode
                );

                let outcome = match mode {
                    Mode::Analyze => plugin.analyze(&params),
                    Mode::Execute => plugin.execute(&params),
                    Mode::Rollback => plugin.rollback(&params),
                }
                .map_err(|e| crate::Error::PluginFault {
                    plugin: plugin_name.clone(),
                    reason: e.to_string(),
                })?;

                let PluginOutcome {
                    result,
                    detail,
                    system_changed,
                    rollback_data,
                } = outcome;

                // A misbehaving plugin must never leave an ambiguous result.
                let (result, detail) = match result.as_bool() {
                    Some(b) => (b, detail),
                    None => (
                        false,
                        format!(
                            "plugin '{}' returned a non-boolean result for entry '{}' \
                             in group '{}': {}",
                            plugin_name, entry.name, group.name, result
                        ),
                    ),
                };

                if mode == Mode::Execute && system_changed {
                    // Materialize the rollback instructions onto the action
                    // so the persisted document is directly valid rollback
                    // input.
                    if let Some(ref payload) = rollback_data {
                        entry
                            .action
                            .blocks
                            .insert(resolver::ROLLBACK_BLOCK.to_string(), payload.clone());
                    }
                }

                recorder::record(
                    entry,
                    started_at,
                    result,
                    detail.clone(),
                    system_changed,
                    rollback_data,
                );

                if result {
                    summary.success_count += 1;
                    pb.println(format!(
                        "  {} {} - {}",
                        "[OK]".green(),
                        entry.name.bold(),
                        detail
                    ));
                } else {
                    summary.failure_count += 1;
                    pb.println(format!(
                        "  {} {} - {}",
                        "[FAIL]".red(),
                        entry.name.bold(),
                        detail
                    ));
                }
            }
        }

        pb.finish_and_clear();
        Ok(summary)
    }
}

fn skip_line(name: &str, detail: &str) -> String {
    format!("  {} {} - {}", "[SKIP]".yellow(), name.bold(), detail)
}

/// Counts of per-entry outcomes for one run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Mode the run was performed in.
    pub mode: Mode,
    /// Entries whose plugin reported success.
    pub success_count: usize,
    /// Entries whose plugin reported (or was coerced to) failure.
    pub failure_count: usize,
    /// Entries skipped without a plugin invocation.
    pub skip_count: usize,
}

impl RunSummary {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            success_count: 0,
            failure_count: 0,
            skip_count: 0,
        }
    }

    /// Total number of entries that received a history record.
    pub fn processed(&self) -> usize {
        self.success_count + self.failure_count + self.skip_count
    }

    /// Whether the run completed without any failed entry.
    pub fn is_success(&self) -> bool {
        self.failure_count == 0
    }

    /// Print summary.
    pub fn print_summary(&self) {
        println!("{}", "[Run Summary]".bold().green());
        println!("  {} {}", "Mode:".bold(), self.mode);
        println!("  {} {}", "Successful entries:".bold(), self.success_count);
        println!("  {} {}", "Failed entries:".bold(), self.failure_count);
        println!("  {} {}", "Skipped entries:".bold(), self.skip_count);
    }
}
