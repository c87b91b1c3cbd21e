//! Parsing of the validation collaborator's JSON envelope.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::entities::{ValidationOutcome, ValidationSummary};
use crate::domain::ports::ValidationCallError;

#[derive(Debug, Deserialize)]
struct Envelope {
    status: i32,
    #[serde(default)]
    result: Option<DeployResult>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DeployResult {
    success: Option<bool>,
    number_components_deployed: u64,
    number_components_total: u64,
    number_tests_completed: u64,
    number_test_errors: u64,
    details: Option<Details>,
    error_message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Details {
    /// Object for a single failure, array for several
    component_failures: Option<Value>,
    run_test_result: Option<RunTestResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RunTestResult {
    failures: Option<Value>,
}

/// Single-or-many values as a list
fn one_or_many(value: Option<Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other],
    }
}

fn failure_text(failure: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| failure.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Locate the JSON object in `raw`; the CLI may print warnings before it.
fn json_slice(raw: &str) -> &str {
    match raw.find('{') {
        Some(start) => &raw[start..],
        None => raw,
    }
}

/// Turn the collaborator's stdout into a `ValidationOutcome`.
pub fn parse_response(raw: &str) -> Result<ValidationOutcome, ValidationCallError> {
    let envelope: Envelope =
        serde_json::from_str(json_slice(raw)).map_err(|e| ValidationCallError::Unparseable {
            message: e.to_string(),
            raw: raw.to_string(),
        })?;

    let result = envelope.result.unwrap_or_default();
    let summary = ValidationSummary {
        components_deployed: result.number_components_deployed,
        components_total: result.number_components_total,
        tests_completed: result.number_tests_completed,
        test_errors: result.number_test_errors,
    };

    let success = envelope.status == 0 && result.success.unwrap_or(true);
    if success {
        return Ok(ValidationOutcome::Succeeded { summary });
    }

    let details = result.details.unwrap_or_default();
    let mut diagnostics: Vec<String> = one_or_many(details.component_failures)
        .iter()
        .filter_map(|f| failure_text(f, &["problem", "message"]))
        .collect();

    if let Some(tests) = details.run_test_result {
        diagnostics.extend(
            one_or_many(tests.failures)
                .iter()
                .filter_map(|f| failure_text(f, &["message", "stackTrace"])),
        );
    }

    if diagnostics.is_empty() {
        if let Some(message) = result.error_message.or(envelope.message) {
            diagnostics.push(message);
        }
    }

    Ok(ValidationOutcome::Failed {
        status_code: envelope.status,
        diagnostics,
        summary,
    })
}
