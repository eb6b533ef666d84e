//! CodeChecker report loading and eager Finding validation.
//!
//! The report is parsed into `serde_json::Value` first so that every
//! missing or ill-typed field can be collected into a single `Load` error,
//! instead of failing on the first bad dereference.

use crate::error::CheckpostError;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;

pub const DEFAULT_MESSAGE: &str = "No message";
pub const DEFAULT_CHECKER: &str = "UnknownChecker";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    High,
    Medium,
    Low,
    /// Any severity string the mapping does not recognize.
    Other(String),
}

impl Severity {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "HIGH" => Severity::High,
            "MEDIUM" => Severity::Medium,
            "LOW" => Severity::Low,
            _ => Severity::Other(raw.to_string()),
        }
    }
}

/// One raw static-analysis result, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub file_path: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
    pub severity: Severity,
    pub checker_name: String,
}

/// Load and validate a report file.
///
/// Fails when the file is unreadable, is not JSON, or lacks the `reports`
/// array. An empty `reports` array is valid and yields an empty sequence.
pub fn load_report(path: &Path) -> Result<Vec<Finding>, CheckpostError> {
    let content = fs::read_to_string(path)?;
    let document: JsonValue = serde_json::from_str(&content)?;
    findings_from_document(&document)
}

pub fn findings_from_document(document: &JsonValue) -> Result<Vec<Finding>, CheckpostError> {
    let reports = document
        .get("reports")
        .ok_or_else(|| CheckpostError::Load(vec!["missing 'reports' array".to_string()]))?;
    let entries = reports
        .as_array()
        .ok_or_else(|| CheckpostError::Load(vec!["'reports' is not an array".to_string()]))?;

    let mut findings = Vec::with_capacity(entries.len());
    let mut problems = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        if let Some(finding) = validate_finding(index, entry, &mut problems) {
            findings.push(finding);
        }
    }
    if !problems.is_empty() {
        return Err(CheckpostError::Load(problems));
    }
    Ok(findings)
}

/// Validate one report entry, pushing every problem found.
///
/// Returns `None` when the entry cannot yield a Finding at all; defaults are
/// applied for absent optional fields, but a present field of the wrong type
/// is a problem, never silently defaulted.
fn validate_finding(index: usize, entry: &JsonValue, problems: &mut Vec<String>) -> Option<Finding> {
    let before = problems.len();

    let file_path = match entry.get("file").and_then(|f| f.get("path")) {
        Some(JsonValue::String(p)) if !p.is_empty() => p.clone(),
        Some(_) => {
            problems.push(format!("reports[{index}].file.path is not a non-empty string"));
            String::new()
        }
        None => {
            problems.push(format!("reports[{index}].file.path is missing"));
            String::new()
        }
    };

    let line = positive_int(entry, index, "line", problems);
    let column = positive_int(entry, index, "column", problems);
    let message = optional_string(entry, index, "message", DEFAULT_MESSAGE, problems);
    let severity = optional_string(entry, index, "severity", "LOW", problems);
    let checker_name = optional_string(entry, index, "checker_name", DEFAULT_CHECKER, problems);

    if problems.len() > before {
        return None;
    }
    Some(Finding {
        file_path,
        line,
        column,
        message,
        severity: Severity::parse(&severity),
        checker_name,
    })
}

fn positive_int(entry: &JsonValue, index: usize, field: &str, problems: &mut Vec<String>) -> u32 {
    match entry.get(field) {
        None => 1,
        Some(value) => match value.as_u64() {
            Some(n) if n >= 1 && n <= u64::from(u32::MAX) => n as u32,
            _ => {
                problems.push(format!("reports[{index}].{field} is not an integer >= 1"));
                1
            }
        },
    }
}

fn optional_string(
    entry: &JsonValue,
    index: usize,
    field: &str,
    default: &str,
    problems: &mut Vec<String>,
) -> String {
    match entry.get(field) {
        None => default.to_string(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(_) => {
            problems.push(format!("reports[{index}].{field} is not a string"));
            default.to_string()
        }
    }
}
