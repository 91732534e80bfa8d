//! Template data model.
//!
//! The in-memory form of a tweak template: ordered groups of entries, each
//! entry bound to exactly one action. The loader normalizes both on-disk
//! schema shapes into this one structure.

use super::history::History;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Template file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Template {
    /// Template version.
    #[serde(default)]
    pub version: String,
    /// Header metadata (name/value pairs, document order).
    #[serde(default)]
    pub metadata: Vec<Metadata>,
    /// Tweak groups, in document order.
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Template {
    /// Iterate over all entries across all groups, in document order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.groups.iter().flat_map(|g| g.entries.iter())
    }

    /// Total number of entries across all groups.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}

/// A single metadata header pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Metadata key.
    pub name: String,
    /// Metadata value.
    pub value: String,
}

/// A named, independently enable-able collection of entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Stable group ID, used by the group filter.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether this group's entries are processed at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Entries, in document order.
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// One tweak instruction, bound to exactly one action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Display name.
    pub name: String,
    /// Disabled entries are skipped before anything else is checked.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Whether the entry is marked for execution. Independent of `enabled`.
    #[serde(default = "default_true")]
    pub execute: bool,
    /// The action this entry performs.
    pub action: Action,
    /// Outcome of the most recent processing pass, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<History>,
}

/// A plugin reference plus its named parameter blocks.
///
/// Every key other than `plugin` is treated as a parameter block: the default
/// block lives under `params`, mode overrides under `analyzeparams`,
/// `executeparams` and `rollbackparams`. Block contents are opaque to the
/// engine and passed to the plugin as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Name of the plugin that handles this action.
    pub plugin: String,
    /// Named parameter blocks, keyed by block name.
    #[serde(flatten)]
    pub blocks: BTreeMap<String, Value>,
}

impl Action {
    /// Create an action with no parameter blocks.
    pub fn new<S: Into<String>>(plugin: S) -> Self {
        Self {
            plugin: plugin.into(),
            blocks: BTreeMap::new(),
        }
    }

    /// Look up a parameter block by name.
    pub fn block(&self, name: &str) -> Option<&Value> {
        self.blocks.get(name)
    }

    /// Whether a parameter block with the given name exists.
    pub fn has_block(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }
}

/// Processing mode, global for one run.
///
/// Determines which parameter block is resolved for each entry and which
/// rollback denial rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Analyze,
    Execute,
    Rollback,
}

impl Mode {
    /// Lowercase prefix used to form the mode-qualified block name.
    pub fn prefix(&self) -> &'static str {
        match self {
            Mode::Analyze => "analyze",
            Mode::Execute => "execute",
            Mode::Rollback => "rollback",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

fn default_true() -> bool {
    true
}
