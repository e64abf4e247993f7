use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::github::{Operation, PullRequestService, ServiceError};
use crate::pr::{PrError, PrTarget};
use crate::report::{self, RunOutcome};
use crate::summary;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("{operation} failed: {message}")]
    CollaboratorCallFailed {
        operation: Operation,
        message: String,
    },

    #[error("{0}")]
    InputMissing(String),
}

impl RunError {
    fn call_failed(operation: Operation) -> impl FnOnce(ServiceError) -> RunError {
        move |err| RunError::CollaboratorCallFailed {
            operation,
            message: err.to_string(),
        }
    }
}

impl From<PrError> for RunError {
    fn from(err: PrError) -> Self {
        RunError::InputMissing(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Compute everything but skip the label and comment writes
    pub dry_run: bool,
}

/// Summarize and label one pull request.
///
/// Strictly sequential: list files, compute totals and labels, add labels
/// (only when at least one was derived), post the comment. The first failing
/// call aborts everything after it; writes already issued are left in place.
#[instrument(skip(service, options), fields(pr = %target, dry_run = options.dry_run))]
pub async fn run(
    service: &dyn PullRequestService,
    target: &PrTarget,
    options: RunOptions,
) -> Result<RunOutcome, RunError> {
    info!("listing changed files");
    let files = service
        .list_changed_files(target)
        .await
        .map_err(RunError::call_failed(Operation::ListChangedFiles))?;

    let summary = summary::summarize(&files);
    let labels = summary::derive_labels(&files);
    let comment = report::comment_body(target.pr_number, &summary);
    info!(
        files = files.len(),
        additions = summary.additions,
        deletions = summary.deletions,
        changes = summary.changes,
        labels = ?labels,
        "summarized changes"
    );

    if options.dry_run {
        info!("dry run, skipping writes");
    } else {
        if labels.is_empty() {
            debug!("no matching extensions, skipping label call");
        } else {
            info!("adding labels");
            service
                .add_labels(target, &labels)
                .await
                .map_err(RunError::call_failed(Operation::AddLabels))?;
        }

        info!("posting summary comment");
        service
            .create_comment(target, &comment)
            .await
            .map_err(RunError::call_failed(Operation::CreateComment))?;
    }

    Ok(RunOutcome {
        target: target.clone(),
        files_changed: files.len(),
        summary,
        labels,
        comment,
        dry_run: options.dry_run,
    })
}
