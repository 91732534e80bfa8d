//! History data model.
//!
//! The recorded outcome of processing one entry in one run. A fresh run
//! replaces the entry's prior history; records are never merged across runs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome record attached to an entry after processing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    /// Wall-clock time when processing of the entry began (RFC 3339).
    pub started_at: String,
    /// Wall-clock time when the record was created (RFC 3339).
    pub finished_at: String,
    /// Whether the plugin reported that it changed the system.
    pub system_changed: bool,
    /// Boolean outcome of the entry.
    pub result: bool,
    /// Human-readable detail: plugin report, skip reason or diagnostic.
    pub detail: String,
    /// Opaque rollback instructions captured from the plugin, stored as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollback_data: Option<Value>,
}
