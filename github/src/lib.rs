pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{GitData, GitHubClient};
pub use config::{GitHubConfig, DEFAULT_API_URL};
pub use error::{GitHubError, GitHubResult};
pub use types::{CommitObject, GitObject, NewCommit, RefUpdate, Reference, TreeRef};

pub mod prelude {
    pub use crate::client::*;
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::types::*;
}
