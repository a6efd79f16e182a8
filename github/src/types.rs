use serde::{Deserialize, Serialize};

/// Reply to `GET /repos/{owner}/{repo}/git/ref/heads/{branch}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Reference {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub object: GitObject,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitObject {
    pub sha: String,
    #[serde(rename = "type")]
    pub object_type: String,
}

/// Commit object as returned by the git commits endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitObject {
    pub sha: String,
    pub tree: TreeRef,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeRef {
    pub sha: String,
}

/// Body for `POST /repos/{owner}/{repo}/git/commits`.
#[derive(Debug, Clone, Serialize)]
pub struct NewCommit {
    pub message: String,
    pub tree: String,
    pub parents: Vec<String>,
}

impl NewCommit {
    pub fn new(
        message: impl Into<String>,
        tree: impl Into<String>,
        parent: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            tree: tree.into(),
            parents: vec![parent.into()],
        }
    }
}

/// Body for `PATCH /repos/{owner}/{repo}/git/refs/heads/{branch}`.
#[derive(Debug, Clone, Serialize)]
pub struct RefUpdate {
    pub sha: String,
    pub force: bool,
}

impl RefUpdate {
    /// The update must be rejected remotely if the branch moved since it was
    /// read, so `force` is always off.
    pub fn non_force(sha: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            force: false,
        }
    }
}
