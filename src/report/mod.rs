pub mod types;

pub use types::RunOutcome;

use colored::Colorize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::summary::DiffSummary;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report file: {0}")]
    FileWrite(#[from] std::io::Error),
}

/// Render the summary comment posted on the pull request.
pub fn comment_body(pr_number: u64, summary: &DiffSummary) -> String {
    format!(
        "Pull request #{} has been updated with:\n\n\
         - {} changes\n\
         - {} additions\n\
         - {} deletions\n",
        pr_number, summary.changes, summary.additions, summary.deletions
    )
}

/// Print the recap to the terminal, and also write it as markdown when a
/// path is given.
#[instrument(skip(outcome), fields(pr = %outcome.target))]
pub fn output(outcome: &RunOutcome, output_path: Option<&Path>) -> Result<(), ReportError> {
    debug!("writing recap to terminal");
    print_terminal_report(outcome);
    if let Some(path) = output_path {
        debug!(path = %path.display(), "writing recap to file");
        write_markdown_report(outcome, path)?;
    }
    Ok(())
}

fn label_list(outcome: &RunOutcome) -> String {
    if outcome.labels.is_empty() {
        "none".to_string()
    } else {
        outcome.labels.iter().copied().collect::<Vec<_>>().join(", ")
    }
}

/// PR org/repo#42 | Files changed: 5
/// +81 -34 (115 changes)
/// Labels: javascript, markdown, yaml
fn print_terminal_report(outcome: &RunOutcome) {
    println!();
    println!(
        "PR {} | Files changed: {}",
        outcome.target.to_string().bold(),
        outcome.files_changed
    );
    println!(
        "{} {} ({} changes)",
        format!("+{}", outcome.summary.additions).green(),
        format!("-{}", outcome.summary.deletions).red(),
        outcome.summary.changes
    );
    println!("Labels: {}", label_list(outcome).cyan());
    if outcome.dry_run {
        println!("{}", "Dry run: labels and comment were not posted.".yellow());
    } else {
        println!("{}", "Summary comment posted.".green().bold());
    }
    println!();
}

fn write_markdown_report(outcome: &RunOutcome, path: &Path) -> Result<(), ReportError> {
    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", outcome.target));
    md.push_str(&format!(
        "**Files changed:** {} | **Labels:** {}\n\n",
        outcome.files_changed,
        label_list(outcome)
    ));
    md.push_str("## Comment\n\n");
    md.push_str(&outcome.comment);

    std::fs::write(path, md)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pr::PrTarget;
    use crate::summary::LabelSet;

    fn sample_outcome(labels: &[&'static str]) -> RunOutcome {
        let summary = DiffSummary {
            additions: 81,
            deletions: 34,
            changes: 115,
        };
        RunOutcome {
            target: PrTarget {
                owner: "org".to_string(),
                repo: "repo".to_string(),
                pr_number: 42,
            },
            files_changed: 5,
            summary,
            labels: labels.iter().copied().collect::<LabelSet>(),
            comment: comment_body(42, &summary),
            dry_run: false,
        }
    }

    #[test]
    fn test_comment_body_contains_totals() {
        let body = comment_body(
            7,
            &DiffSummary {
                additions: 3,
                deletions: 2,
                changes: 5,
            },
        );
        assert!(body.contains("#7"));
        assert!(body.contains("- 5 changes"));
        assert!(body.contains("- 3 additions"));
        assert!(body.contains("- 2 deletions"));
    }

    #[test]
    fn test_comment_body_zero_totals() {
        let body = comment_body(1, &DiffSummary::default());
        assert_eq!(
            body,
            "Pull request #1 has been updated with:\n\n- 0 changes\n- 0 additions\n- 0 deletions\n"
        );
    }

    #[test]
    fn test_label_list() {
        assert_eq!(label_list(&sample_outcome(&[])), "none");
        assert_eq!(label_list(&sample_outcome(&["yaml", "markdown"])), "markdown, yaml");
    }

    #[test]
    fn test_write_markdown_report() {
        let outcome = sample_outcome(&["markdown"]);
        let path = std::env::temp_dir().join("pr_summarizer_test_report.md");
        write_markdown_report(&outcome, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# org/repo#42"));
        assert!(content.contains("**Labels:** markdown"));
        assert!(content.contains("- 115 changes"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_output_to_terminal() {
        let mut outcome = sample_outcome(&[]);
        outcome.dry_run = true;
        // Should not panic
        output(&outcome, None).unwrap();
    }
}
