use crate::config::GitHubConfig;
use crate::error::{GitHubError, GitHubResult};
use crate::types::{CommitObject, NewCommit, RefUpdate, Reference};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, info};

const GITHUB_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

/// Read and write access to the git data of one branch.
#[async_trait]
pub trait GitData: Send + Sync {
    /// Commit sha at the tip of the branch.
    async fn branch_head(&self) -> GitHubResult<String>;

    /// Tree sha carried by the given commit.
    async fn commit_tree(&self, commit_sha: &str) -> GitHubResult<String>;

    /// Create a commit pointing at an existing tree. Returns the new sha.
    async fn create_commit(&self, tree_sha: &str, parent_sha: &str) -> GitHubResult<String>;

    /// Move the branch ref to the given commit, without forcing.
    async fn advance_branch(&self, commit_sha: &str) -> GitHubResult<()>;

    /// `owner/repo@branch` this instance operates on.
    fn target(&self) -> String;

    /// Append a commit that reuses the head commit's tree, so no files change.
    ///
    /// Runs four remote calls strictly in order. The first failure aborts the
    /// remaining steps and the branch is left untouched past that point.
    async fn create_empty_commit(&self) -> GitHubResult<String> {
        info!("Creating empty commit on {}", self.target());

        let head_sha = self.branch_head().await?;
        let tree_sha = self.commit_tree(&head_sha).await?;
        let new_sha = self.create_commit(&tree_sha, &head_sha).await?;
        self.advance_branch(&new_sha).await?;

        info!("{} advanced to {}", self.target(), new_sha);
        Ok(new_sha)
    }
}

/// REST client for GitHub's git data endpoints.
///
/// Holds the bearer token, so it deliberately does not implement `Debug`.
pub struct GitHubClient {
    http: reqwest::Client,
    config: GitHubConfig,
    token: String,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig, token: impl Into<String>) -> GitHubResult<Self> {
        config
            .validate()
            .map_err(|message| GitHubError::InvalidConfig { message })?;

        let token = token.into();
        if token.is_empty() {
            return Err(GitHubError::InvalidConfig {
                message: "GitHub token cannot be empty".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(GitHubError::Network)?;

        Ok(Self {
            http,
            config,
            token,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.api_url(path))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", GITHUB_JSON)
            .header(API_VERSION_HEADER, API_VERSION)
            .header("Content-Type", "application/json")
            .header("User-Agent", &self.config.user_agent)
    }

    /// Pass successful responses through, turn everything else into an
    /// `Api` error carrying whatever diagnostic body GitHub sent back.
    async fn check(method: Method, path: &str, response: Response) -> GitHubResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let raw = response.text().await.unwrap_or_default();
        let body = match serde_json::from_str::<Value>(&raw) {
            Ok(value) => value.to_string(),
            Err(_) => raw,
        };

        Err(GitHubError::Api {
            method,
            path: path.to_string(),
            status,
            body,
        })
    }
}

#[async_trait]
impl GitData for GitHubClient {
    async fn branch_head(&self) -> GitHubResult<String> {
        debug!("Resolving head of {}", self.target());

        // Reads use the singular `ref` path, updates the plural `refs` one.
        let path = format!(
            "/repos/{}/{}/git/ref/heads/{}",
            self.config.owner, self.config.repo, self.config.branch
        );

        let response = self.request(Method::GET, &path).send().await?;
        let response = Self::check(Method::GET, &path, response).await?;
        let reference: Reference = response.json().await?;

        Ok(reference.object.sha)
    }

    async fn commit_tree(&self, commit_sha: &str) -> GitHubResult<String> {
        debug!("Fetching tree of commit {}", commit_sha);

        let path = format!(
            "/repos/{}/{}/git/commits/{}",
            self.config.owner, self.config.repo, commit_sha
        );

        let response = self.request(Method::GET, &path).send().await?;
        let response = Self::check(Method::GET, &path, response).await?;
        let commit: CommitObject = response.json().await?;

        Ok(commit.tree.sha)
    }

    async fn create_commit(&self, tree_sha: &str, parent_sha: &str) -> GitHubResult<String> {
        debug!("Creating commit with tree {} on {}", tree_sha, parent_sha);

        let path = format!(
            "/repos/{}/{}/git/commits",
            self.config.owner, self.config.repo
        );
        let body = NewCommit::new(&self.config.commit_message, tree_sha, parent_sha);

        let response = self.request(Method::POST, &path).json(&body).send().await?;
        let response = Self::check(Method::POST, &path, response).await?;
        let commit: CommitObject = response.json().await?;

        Ok(commit.sha)
    }

    async fn advance_branch(&self, commit_sha: &str) -> GitHubResult<()> {
        debug!("Advancing {} to {}", self.target(), commit_sha);

        let path = format!(
            "/repos/{}/{}/git/refs/heads/{}",
            self.config.owner, self.config.repo, self.config.branch
        );
        let body = RefUpdate::non_force(commit_sha);

        let response = self
            .request(Method::PATCH, &path)
            .json(&body)
            .send()
            .await?;
        Self::check(Method::PATCH, &path, response).await?;

        Ok(())
    }

    fn target(&self) -> String {
        format!(
            "{}/{}@{}",
            self.config.owner, self.config.repo, self.config.branch
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    struct MockGitData {
        calls: Mutex<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl MockGitData {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on: None,
            }
        }

        fn failing_on(step: &'static str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on: Some(step),
            }
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn maybe_fail(&self, step: &'static str) -> GitHubResult<()> {
            if self.fail_on == Some(step) {
                return Err(GitHubError::Api {
                    method: Method::GET,
                    path: format!("/mock/{}", step),
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    body: "{\"message\":\"mock failure\"}".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl GitData for MockGitData {
        async fn branch_head(&self) -> GitHubResult<String> {
            self.record("branch_head".to_string());
            self.maybe_fail("branch_head")?;
            Ok("aaa111".to_string())
        }

        async fn commit_tree(&self, commit_sha: &str) -> GitHubResult<String> {
            self.record(format!("commit_tree:{}", commit_sha));
            self.maybe_fail("commit_tree")?;
            Ok("ttt222".to_string())
        }

        async fn create_commit(&self, tree_sha: &str, parent_sha: &str) -> GitHubResult<String> {
            self.record(format!("create_commit:{}:{}", tree_sha, parent_sha));
            self.maybe_fail("create_commit")?;
            Ok("ccc333".to_string())
        }

        async fn advance_branch(&self, commit_sha: &str) -> GitHubResult<()> {
            self.record(format!("advance_branch:{}", commit_sha));
            self.maybe_fail("advance_branch")?;
            Ok(())
        }

        fn target(&self) -> String {
            "acme/site@main".to_string()
        }
    }

    #[tokio::test]
    async fn test_empty_commit_call_order() {
        let mock = MockGitData::new();

        let sha = mock.create_empty_commit().await.unwrap();
        assert_eq!(sha, "ccc333");

        let calls = mock.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                "branch_head".to_string(),
                "commit_tree:aaa111".to_string(),
                "create_commit:ttt222:aaa111".to_string(),
                "advance_branch:ccc333".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_commit_short_circuit() {
        let cases = [
            ("branch_head", 1),
            ("commit_tree", 2),
            ("create_commit", 3),
            ("advance_branch", 4),
        ];

        for (step, expected_calls) in cases {
            let mock = MockGitData::failing_on(step);

            let err = mock.create_empty_commit().await.unwrap_err();
            assert!(
                err.to_string().contains("422"),
                "failure on {} should surface the API status",
                step
            );
            assert_eq!(mock.calls.lock().unwrap().len(), expected_calls);
        }
    }

    #[tokio::test]
    async fn test_api_error_keeps_remote_diagnostic() {
        let mock = MockGitData::failing_on("advance_branch");

        let err = mock.create_empty_commit().await.unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("mock failure"));
        assert!(rendered.contains("/mock/advance_branch"));
    }

    #[test]
    fn test_client_creation_validates_config() {
        let config = GitHubConfig::new("acme", "site");
        assert!(GitHubClient::new(config, "ghp_testtoken").is_ok());

        let empty_owner = GitHubConfig::new("", "site");
        let err = GitHubClient::new(empty_owner, "ghp_testtoken").err().unwrap();
        assert!(matches!(err, GitHubError::InvalidConfig { .. }));
    }

    #[test]
    fn test_client_rejects_empty_token() {
        let config = GitHubConfig::new("acme", "site");
        let err = GitHubClient::new(config, "").err().unwrap();
        assert!(err.to_string().contains("token"));
    }

    #[test]
    fn test_target_format() {
        let config = GitHubConfig::new("acme", "site").with_branch("trunk");
        let client = GitHubClient::new(config, "ghp_testtoken").unwrap();
        assert_eq!(client.target(), "acme/site@trunk");
    }

    #[test]
    fn test_api_url_joining() {
        let config = GitHubConfig::new("acme", "site");
        let client = GitHubClient::new(config, "ghp_testtoken").unwrap();
        assert_eq!(
            client.api_url("/repos/acme/site/git/commits"),
            "https://api.github.com/repos/acme/site/git/commits"
        );
    }
}
