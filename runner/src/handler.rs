use crate::error::RunnerResult;
use crate::secrets;
use crate::settings::Settings;
use github::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

/// Outcome of one scheduled invocation, in the shape schedulers expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResult {
    pub status_code: u16,
    pub body: String,
}

impl InvocationResult {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }

    pub fn failure(body: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// Run one scheduled invocation. Never panics and never returns `Err`;
/// every failure is folded into a 500 result with a diagnostic body.
///
/// The event payload is accepted for scheduler compatibility and ignored.
pub async fn handle(event: Value) -> InvocationResult {
    info!("tickover invoked");

    match run(event).await {
        Ok(sha) => InvocationResult::ok(format!("Empty commit created: {}", sha)),
        Err(err) => {
            error!("Invocation failed: {}", err);
            InvocationResult::failure(err.to_string())
        }
    }
}

async fn run(_event: Value) -> RunnerResult<String> {
    let settings = Settings::from_env()?;
    let token = secrets::resolve_token(&settings).await?;

    let config = GitHubConfig::new(&settings.owner, &settings.repo)
        .with_base_url(&settings.api_url)
        .with_branch(&settings.branch)
        .with_commit_message(&settings.commit_message);
    let client = GitHubClient::new(config, token)?;

    let sha = client.create_empty_commit().await?;
    Ok(sha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_serialization() {
        let result = InvocationResult::ok("Empty commit created: ccc333");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({ "statusCode": 200, "body": "Empty commit created: ccc333" })
        );
    }

    #[test]
    fn test_result_constructors() {
        let ok = InvocationResult::ok("done");
        assert!(ok.is_success());

        let failed = InvocationResult::failure("GitHub error: boom");
        assert_eq!(failed.status_code, 500);
        assert!(!failed.is_success());
    }

    #[test]
    fn test_result_roundtrip() {
        let raw = r#"{"statusCode":500,"body":"Missing required env vars: GITHUB_OWNER"}"#;
        let result: InvocationResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.status_code, 500);
        assert!(result.body.contains("GITHUB_OWNER"));
    }
}
