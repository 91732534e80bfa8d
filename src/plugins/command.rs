//! Command plugin.
//!
//! Runs an external program described by its parameter block. Invocations are
//! blocking with no timeout. An optional `undo` sub-block is captured as the
//! rollback instructions when the command changes the system.

use super::{ActionPlugin, PluginOutcome};
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::process::Command;

/// One runnable command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CommandSpec {
    program: String,
    #[serde(default)]
    args: Vec<String>,
}

impl CommandSpec {
    fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Parameter block for analyze/execute mode.
#[derive(Debug, Deserialize)]
struct CommandParams {
    #[serde(flatten)]
    run: CommandSpec,
    /// Optional read-only probe run in analyze mode instead of `run`.
    check: Option<CommandSpec>,
    /// Optional command line that undoes `run`, captured as rollback data.
    undo: Option<CommandSpec>,
}

/// Plugin that applies tweaks by running external commands.
#[derive(Default)]
pub struct CommandPlugin;

impl CommandPlugin {
    pub fn new() -> Self {
        Self
    }

    /// Run a command to completion, reporting the outcome without failing
    /// the whole run on spawn errors.
    fn run_spec(spec: &CommandSpec) -> (bool, String) {
        match Command::new(&spec.program).args(&spec.args).output() {
            Ok(output) => {
                let detail = if output.status.success() {
                    format!("`{}` succeeded", spec.display())
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    format!(
                        "`{}` exited with {}: {}",
                        spec.display(),
                        output.status,
                        stderr.trim()
                    )
                };
                (output.status.success(), detail)
            }
            Err(e) => (false, format!("failed to run `{}`: {}", spec.display(), e)),
        }
    }

    fn parse_params(params: &Value) -> std::result::Result<CommandParams, String> {
        serde_json::from_value(params.clone())
            .map_err(|e| format!("invalid command parameters: {}", e))
    }
}

impl ActionPlugin for CommandPlugin {
    fn name(&self) -> &'static str {
        "command"
    }

    fn analyze(&self, params: &Value) -> Result<PluginOutcome> {
        let params = match Self::parse_params(params) {
            Ok(p) => p,
            Err(e) => return Ok(PluginOutcome::failure(e)),
        };

        match params.check {
            Some(check) => {
                let (ok, detail) = Self::run_spec(&check);
                Ok(PluginOutcome {
                    result: Value::Bool(ok),
                    detail,
                    system_changed: false,
                    rollback_data: None,
                })
            }
            None => Ok(PluginOutcome::success(format!(
                "would run `{}`",
                params.run.display()
            ))),
        }
    }

    fn execute(&self, params: &Value) -> Result<PluginOutcome> {
        let params = match Self::parse_params(params) {
            Ok(p) => p,
            Err(e) => return Ok(PluginOutcome::failure(e)),
        };

        let (ok, detail) = Self::run_spec(&params.run);
        if !ok {
            return Ok(PluginOutcome::failure(detail));
        }

        let payload = match params.undo {
            Some(undo) => Some(serde_json::to_value(undo)?),
            None => None,
        };
        Ok(PluginOutcome::changed(detail, payload))
    }

    fn rollback(&self, params: &Value) -> Result<PluginOutcome> {
        let spec: CommandSpec = match serde_json::from_value(params.clone()) {
            Ok(s) => s,
            Err(e) => {
                return Ok(PluginOutcome::failure(format!(
                    "invalid rollback instructions: {}",
                    e
                )))
            }
        };

        let (ok, detail) = Self::run_spec(&spec);
        Ok(PluginOutcome {
            result: Value::Bool(ok),
            detail,
            system_changed: false,
            rollback_data: None,
        })
    }
}
