//! History recorder.
//!
//! Builds the outcome record of one entry's processing and attaches it as the
//! entry's single history child, replacing any existing one. Pure data; the
//! only side effect is the mutation of the entry it is given.

use crate::models::history::History;
use crate::models::template::Entry;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Attach a history record to an entry, replacing any prior one.
pub fn record<S: Into<String>>(
    entry: &mut Entry,
    started_at: DateTime<Utc>,
    result: bool,
    detail: S,
    system_changed: bool,
    rollback_data: Option<Value>,
) {
    entry.history = Some(History {
        started_at: started_at.to_rfc3339(),
        finished_at: Utc::now().to_rfc3339(),
        system_changed,
        result,
        detail: detail.into(),
        rollback_data,
    });
}

/// Attach a synthetic record for an entry that was skipped without invoking
/// its plugin.
pub fn record_skip(entry: &mut Entry, detail: &str) {
    record(entry, Utc::now(), false, detail, false, None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::template::Action;
    use serde_json::json;

    fn entry() -> Entry {
        Entry {
            name: "test entry".to_string(),
            enabled: true,
            execute: true,
            action: Action::new("test"),
            history: None,
        }
    }

    #[test]
    fn test_record_attaches_history() {
        let mut entry = entry();
        record(
            &mut entry,
            Utc::now(),
            true,
            "applied",
            true,
            Some(json!({ "undo": 1 })),
        );

        let history = entry.history.unwrap();
        assert!(history.result);
        assert!(history.system_changed);
        assert_eq!(history.detail, "applied");
        assert_eq!(history.rollback_data, Some(json!({ "undo": 1 })));
        assert!(!history.started_at.is_empty());
        assert!(!history.finished_at.is_empty());
    }

    #[test]
    fn test_record_replaces_prior_history() {
        let mut entry = entry();
        record(&mut entry, Utc::now(), true, "first", true, None);
        record_skip(&mut entry, "second");

        let history = entry.history.unwrap();
        assert!(!history.result);
        assert!(!history.system_changed);
        assert_eq!(history.detail, "second");
    }
}
