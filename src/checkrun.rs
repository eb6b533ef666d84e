//! Check-run API client: payload shapes, the transport seam, and the
//! blocking GitHub implementation.
//!
//! One network call per lifecycle phase/batch, strictly sequential. Every
//! failed call is fatal to the publish invocation; the retry seam defaults
//! to no retry.

use crate::annotation::Annotation;
use crate::config::PublishConfig;
use crate::error::CheckpostError;
use crate::verdict::Verdict;
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    InProgress,
    Completed,
}

#[derive(Debug, Serialize)]
pub struct CreateCheckRun<'a> {
    pub name: &'a str,
    pub head_sha: &'a str,
    pub status: CheckStatus,
}

#[derive(Debug, Serialize)]
pub struct CheckOutput<'a> {
    pub title: &'a str,
    pub summary: String,
    pub annotations: &'a [Annotation],
}

/// Body of one update call. `conclusion` is serialized only on the final
/// batch; earlier batches must not carry the field at all.
#[derive(Debug, Serialize)]
pub struct UpdateCheckRun<'a> {
    pub name: &'a str,
    pub head_sha: &'a str,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<Verdict>,
    pub output: CheckOutput<'a>,
}

/// Seam between the publish pipeline and the wire, so the pipeline can be
/// exercised against an in-memory double.
pub trait CheckRunApi {
    fn create(&mut self, request: &CreateCheckRun<'_>) -> Result<u64, CheckpostError>;
    fn update(
        &mut self,
        check_run_id: u64,
        request: &UpdateCheckRun<'_>,
    ) -> Result<(), CheckpostError>;
}

/// Decides whether a failed call is attempted again. The default is
/// [`NoRetry`]; a stricter policy can be substituted without touching the
/// publish state machine.
pub trait RetryPolicy {
    fn should_retry(&self, attempt: u32, error: &CheckpostError) -> bool;
}

pub struct NoRetry;

impl RetryPolicy for NoRetry {
    fn should_retry(&self, _attempt: u32, _error: &CheckpostError) -> bool {
        false
    }
}

#[derive(Deserialize)]
struct CreatedCheckRun {
    id: u64,
}

/// Blocking GitHub check-runs client.
pub struct GithubChecks {
    http: Client,
    api_url: String,
    token: String,
    owner: String,
    repo: String,
    retry: Box<dyn RetryPolicy>,
}

impl GithubChecks {
    pub fn new(config: &PublishConfig) -> Result<Self, CheckpostError> {
        let http = Client::builder()
            .user_agent(concat!("checkpost/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(GithubChecks {
            http,
            api_url: config.api_url.clone(),
            token: config.token.clone(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            retry: Box::new(NoRetry),
        })
    }

    pub fn with_retry_policy(mut self, policy: Box<dyn RetryPolicy>) -> Self {
        self.retry = policy;
        self
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
    }

    fn execute(
        &self,
        build: &dyn Fn() -> RequestBuilder,
    ) -> Result<Response, CheckpostError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let result = build()
                .send()
                .map_err(CheckpostError::from)
                .and_then(classify_response);
            match result {
                Ok(response) => return Ok(response),
                Err(error) if self.retry.should_retry(attempt, &error) => continue,
                Err(error) => return Err(error),
            }
        }
    }
}

/// Non-success responses are fatal: credential rejections map to `Auth`,
/// everything else to `Api`.
fn classify_response(response: Response) -> Result<Response, CheckpostError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        Err(CheckpostError::Auth {
            status: status.as_u16(),
            body,
        })
    } else {
        Err(CheckpostError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

impl CheckRunApi for GithubChecks {
    fn create(&mut self, request: &CreateCheckRun<'_>) -> Result<u64, CheckpostError> {
        let url = format!(
            "{}/repos/{}/{}/check-runs",
            self.api_url, self.owner, self.repo
        );
        let response = self.execute(&|| self.request(Method::POST, &url).json(request))?;
        let created: CreatedCheckRun = response.json()?;
        Ok(created.id)
    }

    fn update(
        &mut self,
        check_run_id: u64,
        request: &UpdateCheckRun<'_>,
    ) -> Result<(), CheckpostError> {
        let url = format!(
            "{}/repos/{}/{}/check-runs/{}",
            self.api_url, self.owner, self.repo, check_run_id
        );
        self.execute(&|| self.request(Method::PATCH, &url).json(request))?;
        Ok(())
    }
}
