pub mod client;
pub mod memory;

pub use client::GitHubClient;
pub use memory::MemoryService;

use async_trait::async_trait;
use thiserror::Error;

use crate::pr::{ChangedFile, PrTarget};
use crate::summary::LabelSet;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("GitHub API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GitHub API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode GitHub API response: {0}")]
    Decode(String),

    #[error("Refusing to follow page link outside the API base: {0}")]
    ForeignPageLink(String),
}

/// The remote operations the workflow depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListChangedFiles,
    AddLabels,
    CreateComment,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::ListChangedFiles => write!(f, "list changed files"),
            Operation::AddLabels => write!(f, "add labels"),
            Operation::CreateComment => write!(f, "create comment"),
        }
    }
}

/// Read/write access to pull requests on a hosting service.
/// Implementations must be Send + Sync so the workflow can hold them behind `&dyn`.
#[async_trait]
pub trait PullRequestService: Send + Sync {
    /// Every file changed by the pull request. Paging, if the host has any,
    /// is resolved before returning.
    async fn list_changed_files(&self, target: &PrTarget) -> Result<Vec<ChangedFile>, ServiceError>;

    /// Attach the given labels to the pull request.
    async fn add_labels(&self, target: &PrTarget, labels: &LabelSet) -> Result<(), ServiceError>;

    /// Post a comment on the pull request's conversation.
    async fn create_comment(&self, target: &PrTarget, body: &str) -> Result<(), ServiceError>;
}
