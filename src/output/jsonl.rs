#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line in input order:
//! 1. One result record per validated value
//! 2. One status record

use crate::engine::{BatchResult, Failure};
use serde::Serialize;

/// JSONL output formatter
///
/// Formats batch results as JSON Lines (one JSON object per line).
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format the batch results as JSONL
    pub fn format(&self, results: &[BatchResult]) -> String {
        let mut output = String::new();

        for result in results {
            let record = ResultRecord {
                record_type: "result",
                value: &result.value,
                valid: result.is_valid(),
                failures: &result.failures,
            };
            push_record(&mut output, &record);
        }

        let values_invalid = results.iter().filter(|r| !r.is_valid()).count() as u64;
        let status = StatusRecord {
            record_type: "status",
            passed: values_invalid == 0,
            values_checked: results.len() as u64,
            values_invalid,
            total_failures: results.iter().map(|r| r.failures.len() as u64).sum(),
        };
        push_record(&mut output, &status);

        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn push_record<T: Serialize>(output: &mut String, record: &T) {
    match serde_json::to_string(record) {
        Ok(json) => {
            output.push_str(&json);
            output.push('\n');
        }
        Err(e) => tracing::error!(error = %e, "failed to serialize output record"),
    }
}

/// Result record for JSONL output
#[derive(Debug, Serialize)]
struct ResultRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    value: &'a str,
    valid: bool,
    failures: &'a [Failure],
}

/// Status record for JSONL output
#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    passed: bool,
    values_checked: u64,
    values_invalid: u64,
    total_failures: u64,
}
