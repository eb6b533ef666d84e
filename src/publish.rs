//! The publish pipeline: map findings, aggregate the verdict, then drive
//! the check run `Absent → Created → Updated* → Completed`.
//!
//! All-or-nothing: a failed update aborts the remaining batches and may
//! leave the check run `in_progress` on the remote side. That is accepted
//! behavior; a compensating "mark failed" update would slot in where the
//! state machine observes the abort.

use crate::annotation;
use crate::batch;
use crate::checkrun::{CheckOutput, CheckRunApi, CheckStatus, CreateCheckRun, UpdateCheckRun};
use crate::config::PublishConfig;
use crate::error::CheckpostError;
use crate::report::Finding;
use crate::verdict::{self, Verdict};

pub const OUTPUT_TITLE: &str = "CodeChecker Results";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Empty report: terminal "no issues" path, zero network calls.
    NoFindings,
    Published {
        check_run_id: u64,
        verdict: Verdict,
        annotations: usize,
        batches: usize,
    },
}

#[derive(Debug)]
enum CheckRunState {
    Absent,
    Created(u64),
    Completed(u64),
}

/// Publish all findings onto the configured commit.
///
/// The verdict is computed over the entire mapped set before the first
/// network call, so the final batch carries the correct conclusion even
/// though batches are transmitted incrementally.
pub fn publish(
    config: &PublishConfig,
    findings: &[Finding],
    api: &mut dyn CheckRunApi,
) -> Result<PublishOutcome, CheckpostError> {
    if findings.is_empty() {
        return Ok(PublishOutcome::NoFindings);
    }

    let annotations = annotation::map_findings(findings, config);
    let verdict = verdict::aggregate(&annotations);
    let total = annotations.len();

    // One invocation owns one check run: only the Absent state may create.
    let mut state = CheckRunState::Absent;
    let check_run_id = match state {
        CheckRunState::Absent => api.create(&CreateCheckRun {
            name: &config.check_name,
            head_sha: &config.head_sha,
            status: CheckStatus::InProgress,
        })?,
        CheckRunState::Created(id) | CheckRunState::Completed(id) => id,
    };
    state = CheckRunState::Created(check_run_id);
    println!("Created check run {} for {}", check_run_id, config.head_sha);

    let batches = batch::schedule(&annotations);
    let batch_count = batches.len();
    for batch in &batches {
        let is_last = batch.is_last();
        let request = UpdateCheckRun {
            name: &config.check_name,
            head_sha: &config.head_sha,
            status: if is_last {
                CheckStatus::Completed
            } else {
                CheckStatus::InProgress
            },
            conclusion: is_last.then_some(verdict),
            output: CheckOutput {
                title: OUTPUT_TITLE,
                summary: format!("Found {total} issue(s)."),
                annotations: batch.annotations,
            },
        };
        api.update(check_run_id, &request)?;
        println!(
            "Posted {} annotation(s) ({}/{}){}",
            batch.annotations.len(),
            batch.cumulative,
            total,
            if is_last { ", final batch" } else { "" }
        );
        if is_last {
            state = CheckRunState::Completed(check_run_id);
        }
    }
    debug_assert!(matches!(state, CheckRunState::Completed(_)));

    Ok(PublishOutcome::Published {
        check_run_id,
        verdict,
        annotations: total,
        batches: batch_count,
    })
}
