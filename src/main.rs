mod config;
mod github;
mod pr;
mod report;
mod summary;
mod workflow;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::EnvFilter;

use github::{GitHubClient, MemoryService, PullRequestService};
use pr::{PrError, PrTarget};
use workflow::{RunError, RunOptions};

/// PR Summarizer — tallies a pull request's diff, labels it by file type,
/// and posts a summary comment.
///
/// Inputs can be given as flags or through the GitHub Actions `INPUT_*`
/// environment variables.
#[derive(Parser, Debug)]
#[command(name = "pr-summarizer", version, about)]
struct Cli {
    /// GitHub Pull Request URL (e.g., https://github.com/org/repo/pull/42).
    /// Alternative to --owner/--repo/--pr-number.
    pr_url: Option<String>,

    /// Repository owner
    #[arg(long, env = "INPUT_OWNER")]
    owner: Option<String>,

    /// Repository name
    #[arg(long, env = "INPUT_REPO")]
    repo: Option<String>,

    /// Pull request number
    #[arg(long, env = "INPUT_PR_NUMBER")]
    pr_number: Option<String>,

    /// GitHub token (falls back to the config file, then GITHUB_TOKEN)
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Also write the recap as markdown to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Read the changed files but do not add labels or post the comment
    #[arg(long)]
    dry_run: bool,

    /// Use a built-in mock PR for demo purposes (no GitHub token needed)
    #[arg(long)]
    r#mock: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "run failed");
            report_failure(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = RunOptions {
        dry_run: cli.dry_run,
    };

    let outcome = if cli.r#mock {
        info!("using mock PR data for demo");
        let service = build_mock_service()?;
        let target = resolve_mock_target(&cli).map_err(RunError::from)?;
        workflow::run(&service, &target, options).await?
    } else {
        let target = resolve_target(&cli).map_err(RunError::from)?;
        let _main_span = info_span!("pr_summarize", pr = %target).entered();
        debug!(owner = %target.owner, repo = %target.repo, pr = target.pr_number, "resolved target");

        info!("loading configuration");
        let config = config::Config::load()?;
        let token = config
            .github_token(cli.token.as_deref())
            .ok_or_else(|| RunError::from(PrError::MissingToken))?;

        let client = GitHubClient::new(config.api_url(), token, config.per_page())?;
        let service: &dyn PullRequestService = &client;
        workflow::run(service, &target, options).await?
    };

    info!(
        files = outcome.files_changed,
        labels = outcome.labels.len(),
        "done"
    );
    report::output(&outcome, cli.output.as_deref())?;
    Ok(())
}

/// A positional URL takes precedence over the individual inputs.
fn resolve_target(cli: &Cli) -> Result<PrTarget, PrError> {
    match cli.pr_url.as_deref() {
        Some(url) => pr::parse_pr_url(url),
        None => pr::target_from_parts(
            cli.owner.as_deref(),
            cli.repo.as_deref(),
            cli.pr_number.as_deref(),
        ),
    }
}

/// Mock runs use the built-in target unless the caller supplied any target
/// input, in which case those inputs must be valid.
fn resolve_mock_target(cli: &Cli) -> Result<PrTarget, PrError> {
    let supplied = [&cli.pr_url, &cli.owner, &cli.repo, &cli.pr_number]
        .iter()
        .any(|input| input.is_some());
    if supplied {
        resolve_target(cli)
    } else {
        Ok(mock_target())
    }
}

/// Build an in-memory service from the embedded list-files fixture.
/// This enables running the full workflow without a GitHub token.
fn build_mock_service() -> Result<MemoryService, github::ServiceError> {
    MemoryService::from_json(include_str!("../tests/fixtures/sample_files.json"))
}

fn mock_target() -> PrTarget {
    PrTarget {
        owner: "octo-org".to_string(),
        repo: "octo-repo".to_string(),
        pr_number: 42,
    }
}

/// Print the failure for humans, and as a workflow command when running
/// inside GitHub Actions so the step is annotated with the message.
fn report_failure(message: &str) {
    eprintln!("Error: {}", message);
    if std::env::var("GITHUB_ACTIONS").as_deref() == Ok("true") {
        println!("::error::{}", escape_workflow_data(message));
    }
}

/// Workflow command data must escape `%`, CR and LF.
fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
