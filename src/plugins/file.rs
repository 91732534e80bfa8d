//! File removal plugin.
//!
//! Removes files listed in its parameter block, backing each one up first so
//! the removal can be rolled back. The rollback instructions record the
//! backup location and a checksum of the original content.

use super::{ActionPlugin, PluginOutcome};
use crate::utils::{fs as fsutil, hash};
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Parameter block for analyze/execute mode.
#[derive(Debug, Deserialize)]
struct FileParams {
    /// Files to remove.
    paths: Vec<PathBuf>,
}

/// Rollback instruction block, produced by execute.
#[derive(Debug, Serialize, Deserialize)]
struct FileRollback {
    restores: Vec<RestoreItem>,
}

/// One backed-up file and where it came from.
#[derive(Debug, Serialize, Deserialize)]
struct RestoreItem {
    original: PathBuf,
    backup: PathBuf,
    checksum: String,
}

/// Plugin that removes files with a reversible backup.
pub struct FilePlugin {
    backup_dir: PathBuf,
}

impl FilePlugin {
    /// Create a file plugin storing backups under the given directory.
    pub fn new(backup_dir: PathBuf) -> Self {
        Self { backup_dir }
    }

    fn parse_params(params: &Value) -> std::result::Result<FileParams, String> {
        serde_json::from_value(params.clone())
            .map_err(|e| format!("invalid file parameters: {}", e))
    }
}

impl ActionPlugin for FilePlugin {
    fn name(&self) -> &'static str {
        "file"
    }

    fn analyze(&self, params: &Value) -> Result<PluginOutcome> {
        let params = match Self::parse_params(params) {
            Ok(p) => p,
            Err(e) => return Ok(PluginOutcome::failure(e)),
        };

        let present = params.paths.iter().filter(|p| p.exists()).count();
        Ok(PluginOutcome::success(format!(
            "{} of {} target files present",
            present,
            params.paths.len()
        )))
    }

    fn execute(&self, params: &Value) -> Result<PluginOutcome> {
        let params = match Self::parse_params(params) {
            Ok(p) => p,
            Err(e) => return Ok(PluginOutcome::failure(e)),
        };

        let mut restores = Vec::new();
        for path in &params.paths {
            if !path.is_file() {
                tracing::debug!("File already absent, skipping: {:?}", path);
                continue;
            }

            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "unnamed".to_string());
            let backup = self
                .backup_dir
                .join(format!("{}_{}", &Uuid::new_v4().to_string()[..8], filename));

            fs::create_dir_all(&self.backup_dir)?;
            let checksum = hash::sha256_file(path)?;
            fsutil::move_file(path, &backup)?;
            tracing::debug!("Backed up {:?} -> {:?}", path, backup);

            restores.push(RestoreItem {
                original: path.clone(),
                backup,
                checksum,
            });
        }

        if restores.is_empty() {
            return Ok(PluginOutcome::success(format!(
                "none of the {} target files were present",
                params.paths.len()
            )));
        }

        let detail = format!(
            "removed {} of {} files (backed up)",
            restores.len(),
            params.paths.len()
        );
        let payload = serde_json::to_value(FileRollback { restores })?;
        Ok(PluginOutcome::changed(detail, Some(payload)))
    }

    fn rollback(&self, params: &Value) -> Result<PluginOutcome> {
        let instructions: FileRollback = match serde_json::from_value(params.clone()) {
            Ok(r) => r,
            Err(e) => {
                return Ok(PluginOutcome::failure(format!(
                    "invalid rollback instructions: {}",
                    e
                )))
            }
        };

        let mut restored = 0;
        let mut problems = Vec::new();
        for item in &instructions.restores {
            if !item.backup.exists() {
                problems.push(format!("backup missing: {}", item.backup.display()));
                continue;
            }

            let checksum = hash::sha256_file(&item.backup)?;
            if checksum != item.checksum {
                problems.push(format!(
                    "backup checksum mismatch: {}",
                    item.backup.display()
                ));
                continue;
            }

            fsutil::move_file(&item.backup, &item.original)?;
            tracing::debug!("Restored {:?} -> {:?}", item.backup, item.original);
            restored += 1;
        }

        let detail = if problems.is_empty() {
            format!("restored {} files", restored)
        } else {
            format!(
                "restored {} of {} files; {}",
                restored,
                instructions.restores.len(),
                problems.join("; ")
            )
        };

        Ok(PluginOutcome {
            result: Value::Bool(problems.is_empty()),
            detail,
            system_changed: false,
            rollback_data: None,
        })
    }
}
