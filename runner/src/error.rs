use github::GitHubError;
use thiserror::Error;

/// Everything that can make a scheduled invocation fail.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Missing required env vars: {}", .vars.join(", "))]
    MissingConfig { vars: Vec<&'static str> },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to fetch GitHub token from SSM: {message}")]
    Credential { message: String },

    #[error("GitHub error: {0}")]
    Api(#[from] GitHubError),
}

pub type RunnerResult<T> = Result<T, RunnerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_display() {
        let err = RunnerError::MissingConfig {
            vars: vec!["GITHUB_OWNER", "GITHUB_TOKEN_SSM_PARAM"],
        };
        assert_eq!(
            err.to_string(),
            "Missing required env vars: GITHUB_OWNER, GITHUB_TOKEN_SSM_PARAM"
        );
    }

    #[test]
    fn test_api_error_display() {
        let err = RunnerError::from(GitHubError::InvalidConfig {
            message: "GitHub token cannot be empty".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "GitHub error: Invalid configuration: GitHub token cannot be empty"
        );
    }

    #[test]
    fn test_credential_error_display() {
        let err = RunnerError::Credential {
            message: "connection refused".to_string(),
        };
        assert!(err
            .to_string()
            .starts_with("Failed to fetch GitHub token from SSM:"));
    }
}
