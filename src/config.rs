//! Publish configuration resolved once at the process boundary.
//!
//! Components never read the environment themselves; everything they need is
//! captured here before any file or network I/O happens.

use crate::error::CheckpostError;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_CHECK_NAME: &str = "CodeChecker Analysis";

#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub head_sha: String,
    /// Path prefix stripped from absolute finding paths (`GITHUB_WORKSPACE`).
    pub workspace_root: Option<String>,
    pub api_url: String,
    pub check_name: String,
}

impl PublishConfig {
    /// Resolve configuration from the standard CI environment variables.
    pub fn from_env() -> Result<Self, CheckpostError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup.
    ///
    /// Every missing required variable is reported in one error rather than
    /// failing on the first.
    pub fn from_lookup(
        get: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CheckpostError> {
        let required = |name: &str, missing: &mut Vec<String>| -> String {
            match get(name) {
                Some(v) if !v.is_empty() => v,
                _ => {
                    missing.push(name.to_string());
                    String::new()
                }
            }
        };

        let mut missing = Vec::new();
        let token = required("GITHUB_TOKEN", &mut missing);
        let repository = required("GITHUB_REPOSITORY", &mut missing);
        let head_sha = required("GITHUB_SHA", &mut missing);
        if !missing.is_empty() {
            return Err(CheckpostError::Config(format!(
                "missing required environment variable(s): {}",
                missing.join(", ")
            )));
        }

        let (owner, repo) = repository.split_once('/').ok_or_else(|| {
            CheckpostError::Config(format!(
                "GITHUB_REPOSITORY must be 'owner/repository', got '{repository}'"
            ))
        })?;
        if owner.is_empty() || repo.is_empty() {
            return Err(CheckpostError::Config(format!(
                "GITHUB_REPOSITORY must be 'owner/repository', got '{repository}'"
            )));
        }

        let workspace_root = get("GITHUB_WORKSPACE").filter(|w| !w.is_empty());
        let api_url = get("GITHUB_API_URL")
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(PublishConfig {
            token,
            owner: owner.to_string(),
            repo: repo.to_string(),
            head_sha,
            workspace_root,
            api_url,
            check_name: DEFAULT_CHECK_NAME.to_string(),
        })
    }
}
