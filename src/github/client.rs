use async_trait::async_trait;
use reqwest::header::{ACCEPT, LINK};
use reqwest::{RequestBuilder, Response};
use tracing::{debug, instrument};

use super::{PullRequestService, ServiceError};
use crate::pr::{ChangedFile, PrTarget};
use crate::summary::LabelSet;

const USER_AGENT: &str = "pr-summarizer";
const API_VERSION: &str = "2022-11-28";

/// GitHub REST API implementation of [`PullRequestService`].
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
    per_page: u32,
}

impl GitHubClient {
    pub fn new(api_url: &str, token: String, per_page: u32) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            per_page: per_page.clamp(1, 100),
        })
    }

    fn repo_url(&self, target: &PrTarget, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url, target.owner, target.repo, tail
        )
    }

    fn files_url(&self, target: &PrTarget) -> String {
        format!(
            "{}?per_page={}",
            self.repo_url(target, &format!("pulls/{}/files", target.pr_number)),
            self.per_page
        )
    }

    /// Whether `url` points below the configured API base, so the token may
    /// be sent with it.
    fn is_api_url(&self, url: &str) -> bool {
        url.strip_prefix(&self.api_url)
            .is_some_and(|rest| rest.starts_with('/') || rest.starts_with('?'))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }
}

#[async_trait]
impl PullRequestService for GitHubClient {
    #[instrument(skip(self), fields(pr = %target))]
    async fn list_changed_files(&self, target: &PrTarget) -> Result<Vec<ChangedFile>, ServiceError> {
        let mut files = Vec::new();
        let mut next = Some(self.files_url(target));
        let mut page = 0usize;

        while let Some(url) = next {
            page += 1;
            debug!(page, url = %url, "fetching changed files page");
            let response = check(self.authorized(self.http.get(&url)).send().await?).await?;

            next = response
                .headers()
                .get(LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(next_page_url);
            if let Some(link) = next.as_deref() {
                if !self.is_api_url(link) {
                    return Err(ServiceError::ForeignPageLink(link.to_string()));
                }
            }

            let body = response.text().await?;
            let batch: Vec<ChangedFile> =
                serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))?;
            debug!(page, files = batch.len(), "received changed files page");
            files.extend(batch);
        }

        Ok(files)
    }

    #[instrument(skip(self), fields(pr = %target))]
    async fn add_labels(&self, target: &PrTarget, labels: &LabelSet) -> Result<(), ServiceError> {
        let url = self.repo_url(target, &format!("issues/{}/labels", target.pr_number));
        let payload = serde_json::json!({ "labels": labels });
        check(self.authorized(self.http.post(&url)).json(&payload).send().await?).await?;
        Ok(())
    }

    #[instrument(skip(self, body), fields(pr = %target, body_len = body.len()))]
    async fn create_comment(&self, target: &PrTarget, body: &str) -> Result<(), ServiceError> {
        let url = self.repo_url(target, &format!("issues/{}/comments", target.pr_number));
        let payload = serde_json::json!({ "body": body });
        check(self.authorized(self.http.post(&url)).json(&payload).send().await?).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into a [`ServiceError::Status`] carrying the body.
async fn check(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Extract the `rel="next"` target from an RFC 8288 `Link` header.
fn next_page_url(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
