//! Finding → Annotation mapping, including path normalization.

use crate::config::PublishConfig;
use crate::report::{Finding, Severity};
use serde::Serialize;

/// GitHub annotation level. `Notice` is never produced by the severity
/// mapping; the variant exists because the API defines it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Notice,
    Warning,
    Failure,
}

/// One inline annotation anchored to a file location. Field names follow
/// the check-run API wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub start_column: u32,
    pub end_column: u32,
    pub annotation_level: Level,
    pub message: String,
    pub title: String,
}

/// Map one finding to one annotation. Pure; order is preserved by mapping
/// findings in input order.
pub fn map_finding(finding: &Finding, workspace_root: Option<&str>) -> Annotation {
    let level = match finding.severity {
        Severity::High => Level::Failure,
        _ => Level::Warning,
    };
    Annotation {
        path: normalize_path(&finding.file_path, workspace_root),
        start_line: finding.line,
        end_line: finding.line,
        start_column: finding.column,
        end_column: finding.column,
        annotation_level: level,
        message: finding.message.clone(),
        title: finding.checker_name.clone(),
    }
}

pub fn map_findings(findings: &[Finding], config: &PublishConfig) -> Vec<Annotation> {
    findings
        .iter()
        .map(|f| map_finding(f, config.workspace_root.as_deref()))
        .collect()
}

/// Strip the workspace-root prefix to yield a repo-relative path.
///
/// The match must include the following separator: stripping `/repo` from
/// `/repo/a.c` yields `a.c`, while `/repository/a.c` passes through
/// unchanged.
pub fn normalize_path(path: &str, workspace_root: Option<&str>) -> String {
    let Some(root) = workspace_root else {
        return path.to_string();
    };
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        return path.to_string();
    }
    match path.strip_prefix(root) {
        Some(rest) if rest.starts_with('/') => rest[1..].to_string(),
        _ => path.to_string(),
    }
}
