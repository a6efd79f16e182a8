use crate::error::{RunnerError, RunnerResult};
use chrono::{SecondsFormat, Utc};
use github::DEFAULT_API_URL;

const DEFAULT_BRANCH: &str = "main";
const DEFAULT_REGION: &str = "us-west-1";

/// Deployment stage the runner believes it is in.
///
/// Anything other than the three known stages is a configuration error, so a
/// typo in `DEPLOY_ENV` cannot silently loosen the production rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployEnv {
    Development,
    Staging,
    Production,
}

impl DeployEnv {
    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "development" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "Unknown DEPLOY_ENV value: {} (expected development, staging, or production)",
                other
            )),
        }
    }
}

/// Runtime settings resolved from the environment at invocation time.
///
/// `token_override` may hold a credential, so this type deliberately
/// implements neither `Debug` nor `Serialize`.
#[derive(Clone)]
pub struct Settings {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub commit_message: String,
    pub token_param: String,
    pub token_override: Option<String>,
    pub region: String,
    pub localstack_endpoint: Option<String>,
    pub api_url: String,
    pub deploy_env: DeployEnv,
}

impl Settings {
    /// Read every setting from the environment, collecting all missing
    /// required vars into one error instead of failing on the first.
    pub fn from_env() -> RunnerResult<Self> {
        let mut missing = Vec::new();

        let owner = require("GITHUB_OWNER", &mut missing);
        let repo = require("GITHUB_REPO", &mut missing);
        let token_param = require("GITHUB_TOKEN_SSM_PARAM", &mut missing);

        if !missing.is_empty() {
            return Err(RunnerError::MissingConfig { vars: missing });
        }

        let deploy_env = match env_non_empty("DEPLOY_ENV") {
            Some(value) => DeployEnv::parse(&value)
                .map_err(|message| RunnerError::InvalidConfig { message })?,
            None => DeployEnv::Development,
        };

        let token_override = env_non_empty("GITHUB_TOKEN_OVERRIDE");
        if deploy_env == DeployEnv::Production && token_override.is_some() {
            return Err(RunnerError::InvalidConfig {
                message: "GITHUB_TOKEN_OVERRIDE must not be set when DEPLOY_ENV is production"
                    .to_string(),
            });
        }

        Ok(Self {
            owner,
            repo,
            branch: env_non_empty("GITHUB_BRANCH").unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            commit_message: env_non_empty("COMMIT_MESSAGE")
                .unwrap_or_else(default_commit_message),
            token_param,
            token_override,
            region: env_non_empty("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            localstack_endpoint: env_non_empty("LOCALSTACK_ENDPOINT"),
            api_url: env_non_empty("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            deploy_env,
        })
    }

    /// `owner/repo@branch` this invocation will commit to.
    pub fn target(&self) -> String {
        format!("{}/{}@{}", self.owner, self.repo, self.branch)
    }
}

fn require(name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match env_non_empty(name) {
        Some(value) => value,
        None => {
            missing.push(name);
            String::new()
        }
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Each run gets a distinct message unless `COMMIT_MESSAGE` pins one.
fn default_commit_message() -> String {
    format!(
        "activity: {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}
