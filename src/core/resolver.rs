//! Mode/parameter block resolution.
//!
//! Maps the active mode to the parameter block an entry's action should be
//! invoked with: the mode-qualified override block when the action carries
//! one, otherwise the default block. Rollback mode never falls back to the
//! default block, so destructive instructions cannot be re-applied by
//! accident.

use crate::models::template::{Action, Mode};
use serde_json::Value;

/// Name of the default parameter block.
pub const DEFAULT_BLOCK: &str = "params";

/// Name of the rollback override block.
pub const ROLLBACK_BLOCK: &str = "rollbackparams";

/// Mode-qualified override block name, e.g. `executeparams`.
pub fn override_block(mode: Mode) -> String {
    format!("{}{}", mode.prefix(), DEFAULT_BLOCK)
}

/// Resolve the parameter block to invoke an action with in the given mode.
///
/// Returns `None` when no usable block exists; for rollback mode that means
/// the entry has no rollback instructions.
pub fn resolve(mode: Mode, action: &Action) -> Option<&Value> {
    if let Some(block) = action.block(&override_block(mode)) {
        return Some(block);
    }
    if mode == Mode::Rollback {
        return None;
    }
    action.block(DEFAULT_BLOCK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn action_with(blocks: Value) -> Action {
        let mut value = json!({ "plugin": "test" });
        value
            .as_object_mut()
            .unwrap()
            .extend(blocks.as_object().unwrap().clone());
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_override_block_names() {
        assert_eq!(override_block(Mode::Analyze), "analyzeparams");
        assert_eq!(override_block(Mode::Execute), "executeparams");
        assert_eq!(override_block(Mode::Rollback), ROLLBACK_BLOCK);
    }

    #[test]
    fn test_mode_override_takes_precedence() {
        let action = action_with(json!({
            "params": { "x": 1 },
            "analyzeparams": { "x": 2 }
        }));

        assert_eq!(resolve(Mode::Analyze, &action), Some(&json!({ "x": 2 })));
        assert_eq!(resolve(Mode::Execute, &action), Some(&json!({ "x": 1 })));
    }

    #[test]
    fn test_default_block_is_the_fallback() {
        let action = action_with(json!({ "params": { "x": 1 } }));

        assert_eq!(resolve(Mode::Analyze, &action), Some(&json!({ "x": 1 })));
        assert_eq!(resolve(Mode::Execute, &action), Some(&json!({ "x": 1 })));
    }

    #[test]
    fn test_rollback_never_uses_the_default_block() {
        let action = action_with(json!({ "params": { "x": 1 } }));
        assert_eq!(resolve(Mode::Rollback, &action), None);

        let action = action_with(json!({
            "params": { "x": 1 },
            "rollbackparams": { "y": 2 }
        }));
        assert_eq!(resolve(Mode::Rollback, &action), Some(&json!({ "y": 2 })));
    }

    #[test]
    fn test_no_blocks_at_all() {
        let action = Action::new("test");
        assert_eq!(resolve(Mode::Analyze, &action), None);
        assert_eq!(resolve(Mode::Rollback, &action), None);
    }
}
