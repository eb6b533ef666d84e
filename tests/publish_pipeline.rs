use checkpost::checkrun::{CheckRunApi, CreateCheckRun, UpdateCheckRun};
use checkpost::config::PublishConfig;
use checkpost::error::CheckpostError;
use checkpost::publish::{PublishOutcome, publish};
use checkpost::report::{Finding, Severity};
use checkpost::verdict::Verdict;
use serde_json::Value;

fn config() -> PublishConfig {
    PublishConfig {
        token: "test-token".to_string(),
        owner: "octo".to_string(),
        repo: "widgets".to_string(),
        head_sha: "deadbeef".to_string(),
        workspace_root: Some("/repo".to_string()),
        api_url: "https://api.github.example".to_string(),
        check_name: "CodeChecker Analysis".to_string(),
    }
}

fn finding(i: usize, severity: Severity) -> Finding {
    Finding {
        file_path: format!("/repo/src/file_{i}.c"),
        line: (i + 1) as u32,
        column: 1,
        message: format!("finding {i}"),
        severity,
        checker_name: "core.TestChecker".to_string(),
    }
}

/// In-memory check-run API recording every payload as JSON, optionally
/// failing the Nth update call.
#[derive(Default)]
struct RecordingApi {
    creates: Vec<Value>,
    updates: Vec<(u64, Value)>,
    fail_update_at: Option<usize>,
}

impl CheckRunApi for RecordingApi {
    fn create(&mut self, request: &CreateCheckRun<'_>) -> Result<u64, CheckpostError> {
        self.creates
            .push(serde_json::to_value(request).expect("serializable create"));
        Ok(42)
    }

    fn update(
        &mut self,
        check_run_id: u64,
        request: &UpdateCheckRun<'_>,
    ) -> Result<(), CheckpostError> {
        if self.fail_update_at == Some(self.updates.len()) {
            return Err(CheckpostError::Api {
                status: 502,
                body: "bad gateway".to_string(),
            });
        }
        self.updates.push((
            check_run_id,
            serde_json::to_value(request).expect("serializable update"),
        ));
        Ok(())
    }
}

#[test]
fn empty_report_performs_zero_network_calls() {
    let mut api = RecordingApi::default();
    let outcome = publish(&config(), &[], &mut api).expect("empty publish");
    assert_eq!(outcome, PublishOutcome::NoFindings);
    assert!(api.creates.is_empty());
    assert!(api.updates.is_empty());
}

#[test]
fn hundred_twenty_findings_publish_in_three_batches_with_failure_conclusion() {
    let mut findings: Vec<Finding> =
        (0..119).map(|i| finding(i, Severity::Medium)).collect();
    findings.push(finding(119, Severity::High));

    let mut api = RecordingApi::default();
    let outcome = publish(&config(), &findings, &mut api).expect("publish");
    assert_eq!(
        outcome,
        PublishOutcome::Published {
            check_run_id: 42,
            verdict: Verdict::Failure,
            annotations: 120,
            batches: 3,
        }
    );

    assert_eq!(api.creates.len(), 1);
    let create = &api.creates[0];
    assert_eq!(create["name"], "CodeChecker Analysis");
    assert_eq!(create["head_sha"], "deadbeef");
    assert_eq!(create["status"], "in_progress");

    assert_eq!(api.updates.len(), 3);
    let sizes: Vec<usize> = api
        .updates
        .iter()
        .map(|(_, u)| u["output"]["annotations"].as_array().expect("array").len())
        .collect();
    assert_eq!(sizes, vec![50, 50, 20]);

    for (id, update) in &api.updates[..2] {
        assert_eq!(*id, 42);
        assert_eq!(update["status"], "in_progress");
        assert!(update.get("conclusion").is_none());
        assert_eq!(update["output"]["summary"], "Found 120 issue(s).");
    }
    let (_, last) = &api.updates[2];
    assert_eq!(last["status"], "completed");
    assert_eq!(last["conclusion"], "failure");
}

#[test]
fn annotation_order_and_paths_are_preserved_across_batches() {
    let findings: Vec<Finding> = (0..70).map(|i| finding(i, Severity::Low)).collect();
    let mut api = RecordingApi::default();
    publish(&config(), &findings, &mut api).expect("publish");

    let transmitted: Vec<String> = api
        .updates
        .iter()
        .flat_map(|(_, u)| {
            u["output"]["annotations"]
                .as_array()
                .expect("array")
                .iter()
                .map(|a| a["path"].as_str().expect("path").to_string())
                .collect::<Vec<_>>()
        })
        .collect();
    let expected: Vec<String> = (0..70).map(|i| format!("src/file_{i}.c")).collect();
    // Workspace root "/repo" stripped, input order intact.
    assert_eq!(transmitted, expected);
}

#[test]
fn all_non_high_report_concludes_success() {
    let findings: Vec<Finding> = (0..3).map(|i| finding(i, Severity::Medium)).collect();
    let mut api = RecordingApi::default();
    let outcome = publish(&config(), &findings, &mut api).expect("publish");
    match outcome {
        PublishOutcome::Published { verdict, batches, .. } => {
            assert_eq!(verdict, Verdict::Success);
            assert_eq!(batches, 1);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    let (_, only) = &api.updates[0];
    assert_eq!(only["status"], "completed");
    assert_eq!(only["conclusion"], "success");
}

#[test]
fn failed_second_update_aborts_remaining_batches() {
    let findings: Vec<Finding> = (0..120).map(|i| finding(i, Severity::Medium)).collect();
    let mut api = RecordingApi {
        fail_update_at: Some(1),
        ..RecordingApi::default()
    };
    let error = publish(&config(), &findings, &mut api).expect_err("must abort");
    match error {
        CheckpostError::Api { status, .. } => assert_eq!(status, 502),
        other => panic!("unexpected error: {other}"),
    }
    // Only the first batch went out; the third was never attempted.
    assert_eq!(api.creates.len(), 1);
    assert_eq!(api.updates.len(), 1);
}
