use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_USER_AGENT: &str = "tickover";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    pub base_url: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub commit_message: String,
    pub user_agent: String,
}

impl GitHubConfig {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            owner: owner.into(),
            repo: repo.into(),
            branch: DEFAULT_BRANCH.to_string(),
            commit_message: "tickover: scheduled empty commit".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_commit_message(mut self, commit_message: impl Into<String>) -> Self {
        self.commit_message = commit_message.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.owner.is_empty() {
            return Err("Repository owner cannot be empty".to_string());
        }

        if self.repo.is_empty() {
            return Err("Repository name cannot be empty".to_string());
        }

        if self.branch.is_empty() {
            return Err("Branch cannot be empty".to_string());
        }

        if self.commit_message.is_empty() {
            return Err("Commit message cannot be empty".to_string());
        }

        if self.user_agent.is_empty() {
            return Err("User agent cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("Base URL must start with http:// or https://".to_string());
        }

        // Request paths begin with '/', so a trailing slash would double up.
        if self.base_url.ends_with('/') {
            return Err("Base URL must not end with '/'".to_string());
        }

        Ok(())
    }
}
