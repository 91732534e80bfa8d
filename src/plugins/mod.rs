//! Action plugins.
//!
//! A plugin is a named unit of capability that knows how to analyze, execute
//! or roll back one kind of system change. The engine looks plugins up by
//! name in the [`registry::PluginRegistry`] and calls the method matching the
//! active mode. Parameter blocks are opaque JSON, owned by the plugin.

pub mod command;
pub mod file;
pub mod registry;

use crate::Result;
use serde_json::Value;

/// Outcome of one plugin invocation.
///
/// Returned synchronously from the invocation; a fresh value is produced per
/// call so nothing can leak between entries.
#[derive(Debug, Clone)]
pub struct PluginOutcome {
    /// Reported result. The contract says this must be a boolean; the engine
    /// coerces anything else to a failure and surfaces the anomaly.
    pub result: Value,
    /// Free-text detail describing what happened.
    pub detail: String,
    /// Whether the system was actually changed.
    pub system_changed: bool,
    /// Opaque rollback instructions, meaningful when the system was changed
    /// in execute mode.
    pub rollback_data: Option<Value>,
}

impl PluginOutcome {
    /// Successful outcome that did not change the system.
    pub fn success<S: Into<String>>(detail: S) -> Self {
        Self {
            result: Value::Bool(true),
            detail: detail.into(),
            system_changed: false,
            rollback_data: None,
        }
    }

    /// Failed outcome that did not change the system.
    pub fn failure<S: Into<String>>(detail: S) -> Self {
        Self {
            result: Value::Bool(false),
            detail: detail.into(),
            system_changed: false,
            rollback_data: None,
        }
    }

    /// Successful outcome that changed the system, with optional rollback
    /// instructions for undoing it.
    pub fn changed<S: Into<String>>(detail: S, rollback_data: Option<Value>) -> Self {
        Self {
            result: Value::Bool(true),
            detail: detail.into(),
            system_changed: true,
            rollback_data,
        }
    }
}

/// Capability contract implemented by every action plugin.
///
/// Methods are blocking and are called one at a time; an `Err` from any of
/// them aborts the whole run, so plugins should reserve it for faults that
/// make further processing unsafe and report ordinary failures through the
/// returned outcome instead.
pub trait ActionPlugin: Send + Sync {
    /// Stable plugin name used by templates to reference this plugin.
    fn name(&self) -> &'static str;

    /// Inspect the system without changing it.
    fn analyze(&self, params: &Value) -> Result<PluginOutcome>;

    /// Apply the change described by the parameter block.
    fn execute(&self, params: &Value) -> Result<PluginOutcome>;

    /// Undo a previous change; `params` is the rollback instruction block.
    fn rollback(&self, params: &Value) -> Result<PluginOutcome>;
}
