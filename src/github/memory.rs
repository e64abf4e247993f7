use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use super::{Operation, PullRequestService, ServiceError};
use crate::pr::{ChangedFile, PrTarget};
use crate::summary::LabelSet;

/// A call received by [`MemoryService`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListChangedFiles,
    AddLabels(Vec<String>),
    CreateComment(String),
}

/// In-memory [`PullRequestService`] backed by a fixed file list.
///
/// Writes are recorded and logged rather than sent anywhere. Used for the
/// `--mock` demo mode and as the test double for the workflow.
pub struct MemoryService {
    files: Vec<ChangedFile>,
    fail_on: Option<Operation>,
    calls: Mutex<Vec<Call>>,
}

impl MemoryService {
    pub fn new(files: Vec<ChangedFile>) -> Self {
        Self {
            files,
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Seed from a GitHub list-files JSON response.
    pub fn from_json(json: &str) -> Result<Self, ServiceError> {
        let files = serde_json::from_str(json).map_err(|e| ServiceError::Decode(e.to_string()))?;
        Ok(Self::new(files))
    }

    /// Make the given operation fail with a 500 instead of succeeding.
    #[cfg(test)]
    pub fn failing(mut self, operation: Operation) -> Self {
        self.fail_on = Some(operation);
        self
    }

    /// Every call received so far.
    #[cfg(test)]
    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, operation: Operation, call: Call) -> Result<(), ServiceError> {
        self.calls.lock().await.push(call);
        if self.fail_on == Some(operation) {
            return Err(ServiceError::Status {
                status: 500,
                body: format!("simulated failure in {}", operation),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PullRequestService for MemoryService {
    async fn list_changed_files(&self, _target: &PrTarget) -> Result<Vec<ChangedFile>, ServiceError> {
        self.record(Operation::ListChangedFiles, Call::ListChangedFiles).await?;
        Ok(self.files.clone())
    }

    async fn add_labels(&self, target: &PrTarget, labels: &LabelSet) -> Result<(), ServiceError> {
        let labels: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        self.record(Operation::AddLabels, Call::AddLabels(labels.clone())).await?;
        info!(pr = %target, ?labels, "mock: labels added");
        Ok(())
    }

    async fn create_comment(&self, target: &PrTarget, body: &str) -> Result<(), ServiceError> {
        self.record(Operation::CreateComment, Call::CreateComment(body.to_string())).await?;
        info!(pr = %target, body_len = body.len(), "mock: comment created");
        Ok(())
    }
}
