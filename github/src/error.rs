use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Errors raised by the GitHub commit client.
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("GitHub API error {status} on {method} {path}: {body}")]
    Api {
        method: Method,
        path: String,
        status: StatusCode,
        body: String,
    },
}

pub type GitHubResult<T> = Result<T, GitHubError>;
