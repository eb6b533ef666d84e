use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckpostError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Report is not valid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid report: {}", .0.join("; "))]
    Load(Vec<String>),
    #[error("Authentication rejected (HTTP {status}): {body}")]
    Auth { status: u16, body: String },
    #[error("Check-run API call failed (HTTP {status}): {body}")]
    Api { status: u16, body: String },
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
