//! Template loader.
//!
//! Parses template documents into the in-memory model. Two on-disk schema
//! shapes exist: the current flat layout with a root-level `groups` array,
//! and a legacy layout wrapping everything in a `template` object whose
//! groups live under `groups.group`. Both are normalized here so the rest of
//! the crate only ever sees one shape.

use crate::core::resolver;
use crate::models::template::{Mode, Template};
use crate::Result;
use chrono::Utc;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Load a template from a JSON file.
pub fn load_template(path: &Path) -> Result<Template> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    parse_template(&content)
}

/// Load a template for a run in the given mode.
///
/// In rollback mode this additionally verifies the pre-flight integrity
/// check: a document with no rollback instructions anywhere cannot be rolled
/// back and fails fast, before any entry is processed.
pub fn load_for_run(path: &Path, mode: Mode) -> Result<Template> {
    let template = load_template(path)?;
    if mode == Mode::Rollback {
        ensure_rollback_capable(&template)?;
    }
    Ok(template)
}

/// Parse template content, accepting both schema shapes.
pub fn parse_template(content: &str) -> Result<Template> {
    let root: Value = serde_json::from_str(content)?;
    let normalized = normalize(root)?;
    let template: Template = serde_json::from_value(normalized)?;
    Ok(template)
}

/// Normalize the legacy wrapped-group layout into the flat one.
fn normalize(root: Value) -> Result<Value> {
    let mut doc = match root {
        Value::Object(mut map) => match map.remove("template") {
            // Legacy layout: the whole document lives under `template`.
            Some(Value::Object(inner)) => Value::Object(inner),
            Some(other) => {
                return Err(crate::Error::InvalidTemplate(format!(
                    "`template` node must be an object, got {}",
                    other
                )))
            }
            None => Value::Object(map),
        },
        other => {
            return Err(crate::Error::InvalidTemplate(format!(
                "document root must be an object, got {}",
                other
            )))
        }
    };

    // Legacy layout nests the group list under `groups.group`.
    if let Some(groups) = doc.as_object_mut().and_then(|m| m.get_mut("groups")) {
        if let Some(inner) = groups.as_object().and_then(|m| m.get("group")) {
            let inner = inner.clone();
            if !inner.is_array() {
                return Err(crate::Error::InvalidTemplate(
                    "`groups.group` must be an array".to_string(),
                ));
            }
            *groups = inner;
        }
    }

    Ok(doc)
}

/// Verify that at least one entry carries rollback instructions.
pub fn ensure_rollback_capable(template: &Template) -> Result<()> {
    let capable = template
        .entries()
        .any(|e| e.action.has_block(resolver::ROLLBACK_BLOCK));

    if !capable {
        return Err(crate::Error::NoRollbackData);
    }
    Ok(())
}

/// Save a template to a JSON file.
pub fn save_template(template: &Template, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(template)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(path)?;
    file.write_all(json.as_bytes())?;

    tracing::info!("Template saved to {:?}", path);
    Ok(())
}

/// Default output path for a processed template, next to the input file.
pub fn default_output_path(template_path: &Path, mode: Mode) -> PathBuf {
    let filename = format!("{}_{}.json", mode, Utc::now().format("%Y%m%d_%H%M%S"));
    template_path
        .parent()
        .map(|p| p.join(&filename))
        .unwrap_or_else(|| PathBuf::from(filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_layout() {
        let template = parse_template(
            r#"{
                "version": "1.0",
                "metadata": [{ "name": "os", "value": "any" }],
                "groups": [
                    { "id": "g1", "name": "Group One", "entries": [] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(template.version, "1.0");
        assert_eq!(template.groups.len(), 1);
        assert_eq!(template.groups[0].id, "g1");
    }

    #[test]
    fn test_parse_legacy_wrapped_layout() {
        let template = parse_template(
            r#"{
                "template": {
                    "version": "0.9",
                    "groups": {
                        "group": [
                            { "id": "g1", "name": "Group One", "entries": [] },
                            { "id": "g2", "name": "Group Two", "entries": [] }
                        ]
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(template.version, "0.9");
        assert_eq!(template.groups.len(), 2);
        assert_eq!(template.groups[1].id, "g2");
    }

    #[test]
    fn test_reject_non_object_root() {
        assert!(parse_template("[1, 2, 3]").is_err());
        assert!(parse_template(r#"{ "template": 5 }"#).is_err());
    }

    #[test]
    fn test_rollback_preflight() {
        let without = parse_template(
            r#"{
                "groups": [{
                    "id": "g1", "name": "G",
                    "entries": [{
                        "name": "e1",
                        "action": { "plugin": "file", "params": { "paths": [] } }
                    }]
                }]
            }"#,
        )
        .unwrap();
        assert!(matches!(
            ensure_rollback_capable(&without),
            Err(crate::Error::NoRollbackData)
        ));

        let with = parse_template(
            r#"{
                "groups": [{
                    "id": "g1", "name": "G",
                    "entries": [{
                        "name": "e1",
                        "action": { "plugin": "file", "rollbackparams": { "restores": [] } }
                    }]
                }]
            }"#,
        )
        .unwrap();
        assert!(ensure_rollback_capable(&with).is_ok());
    }
}
