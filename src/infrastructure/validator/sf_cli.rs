//! Dry-run validation through the `sf` command-line tool.

use std::process::Command;

use tracing::{debug, info};

use super::response::parse_response;
use crate::domain::entities::ValidationOutcome;
use crate::domain::ports::{ValidationCallError, ValidationRequest, Validator};
use crate::domain::value_objects::CancelToken;
use crate::infrastructure::process::{run_until, Finished};

/// Runs `sf project deploy validate --manifest <file> --target-org <alias> --json`
#[derive(Debug, Clone)]
pub struct SfCliValidator {
    program: String,
}

impl SfCliValidator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn command(&self, request: &ValidationRequest) -> Command {
        // --wait is in minutes; round up so the CLI never gives up before we do
        let wait_minutes = request.timeout.as_secs().div_ceil(60).max(1);

        let mut cmd = Command::new(&self.program);
        cmd.args(["project", "deploy", "validate", "--manifest"])
            .arg(&request.manifest)
            .arg("--target-org")
            .arg(request.target.alias())
            .arg("--json")
            .arg("--wait")
            .arg(wait_minutes.to_string())
            .current_dir(&request.project_root);
        cmd
    }
}

impl Default for SfCliValidator {
    fn default() -> Self {
        Self::new("sf")
    }
}

impl Validator for SfCliValidator {
    fn validate(
        &self,
        request: &ValidationRequest,
        cancel: &CancelToken,
    ) -> Result<ValidationOutcome, ValidationCallError> {
        info!(
            manifest = %request.manifest.display(),
            target = %request.target,
            "requesting dry-run validation"
        );

        let mut cmd = self.command(request);
        let finished =
            run_until(&mut cmd, cancel, request.timeout).map_err(|source| ValidationCallError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        match finished {
            Finished::Cancelled => Ok(ValidationOutcome::Cancelled),
            Finished::TimedOut => Err(ValidationCallError::TimedOut(request.timeout)),
            Finished::Exited(output) => {
                debug!(code = ?output.code, stderr = %output.stderr.trim(), "validator exited");
                if output.stdout.trim().is_empty() {
                    return Err(ValidationCallError::Unparseable {
                        message: "validator produced no output".to_string(),
                        raw: output.stderr,
                    });
                }
                parse_response(&output.stdout)
            }
        }
    }
}
