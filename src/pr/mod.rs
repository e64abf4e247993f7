pub mod types;

pub use types::{ChangedFile, PrTarget};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrError {
    #[error("Invalid PR URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid PR number: {0:?} (expected a positive integer)")]
    InvalidNumber(String),

    #[error("Input required and not supplied: {0}")]
    MissingInput(&'static str),

    #[error("GitHub token not found (pass --token, set INPUT_TOKEN or GITHUB_TOKEN)")]
    MissingToken,
}

/// Parse a GitHub PR URL into its component parts.
///
/// Expected format: https://github.com/{owner}/{repo}/pull/{number}
pub fn parse_pr_url(url: &str) -> Result<PrTarget, PrError> {
    let invalid = || PrError::InvalidUrl(url.to_string());

    let parsed = reqwest::Url::parse(url).map_err(|_| invalid())?;
    if parsed.host_str() != Some("github.com") {
        return Err(invalid());
    }

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [owner, repo, "pull", number] => Ok(PrTarget {
            owner: owner.to_string(),
            repo: repo.to_string(),
            pr_number: parse_pr_number(number).map_err(|_| invalid())?,
        }),
        _ => Err(invalid()),
    }
}

/// Validate a PR number supplied as a string input.
///
/// Surrounding whitespace and a leading `#` are tolerated; zero is rejected
/// since GitHub numbers issues and pulls from 1.
pub fn parse_pr_number(raw: &str) -> Result<u64, PrError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    match digits.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(PrError::InvalidNumber(raw.to_string())),
    }
}

/// Build a target from individually supplied inputs, rejecting blanks.
pub fn target_from_parts(
    owner: Option<&str>,
    repo: Option<&str>,
    pr_number: Option<&str>,
) -> Result<PrTarget, PrError> {
    let owner = required(owner, "owner")?;
    let repo = required(repo, "repo")?;
    let pr_number = parse_pr_number(required(pr_number, "pr_number")?)?;

    Ok(PrTarget {
        owner: owner.to_string(),
        repo: repo.to_string(),
        pr_number,
    })
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, PrError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(PrError::MissingInput(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_pr_url() {
        let target = parse_pr_url("https://github.com/org/repo/pull/42").unwrap();
        assert_eq!(target.owner, "org");
        assert_eq!(target.repo, "repo");
        assert_eq!(target.pr_number, 42);

        let trailing = parse_pr_url("https://github.com/org/repo/pull/42/").unwrap();
        assert_eq!(trailing, target);
    }

    #[test]
    fn test_parse_invalid_pr_url() {
        assert!(parse_pr_url("https://example.com").is_err());
        assert!(parse_pr_url("not-a-url").is_err());
        assert!(parse_pr_url("https://github.com/org/repo/pulls/42").is_err());
        assert!(parse_pr_url("https://github.com/org/repo/pull/0").is_err());
        assert!(parse_pr_url("https://github.com/org/repo/pull/42/files").is_err());
        assert!(parse_pr_url("https://gitlab.com/org/repo/pull/42").is_err());
    }

    #[test]
    fn test_parse_pr_number() {
        assert_eq!(parse_pr_number("7").unwrap(), 7);
        assert_eq!(parse_pr_number(" #12 ").unwrap(), 12);
        assert!(matches!(parse_pr_number("0"), Err(PrError::InvalidNumber(_))));
        assert!(matches!(parse_pr_number("-3"), Err(PrError::InvalidNumber(_))));
        assert!(matches!(parse_pr_number("abc"), Err(PrError::InvalidNumber(_))));
    }

    #[test]
    fn test_target_from_parts() {
        let target = target_from_parts(Some("org"), Some("repo"), Some("5")).unwrap();
        assert_eq!(target.to_string(), "org/repo#5");
    }

    #[test]
    fn test_target_from_parts_missing_input() {
        let err = target_from_parts(Some("org"), Some("  "), Some("5")).unwrap_err();
        assert!(matches!(err, PrError::MissingInput("repo")));

        let err = target_from_parts(None, Some("repo"), Some("5")).unwrap_err();
        assert!(matches!(err, PrError::MissingInput("owner")));

        let err = target_from_parts(Some("org"), Some("repo"), None).unwrap_err();
        assert!(matches!(err, PrError::MissingInput("pr_number")));
    }
}
