use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::transport::{
    is_retryable_github_status, is_retryable_transport_error, parse_retry_after, retry_delay,
    truncate_for_error,
};
use crate::types::{GithubIssue, GithubReaction};

const PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Deserialize)]
struct GithubCommentCreateResponse {
    id: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct GithubPullRequestCreateResponse {
    number: u64,
}

/// Authenticated GitHub REST v3 client scoped to one repository.
#[derive(Clone)]
pub struct GithubApiClient {
    http: reqwest::Client,
    api_base: String,
    owner: String,
    repo: String,
    retry_max_attempts: usize,
    retry_base_delay_ms: u64,
}

impl GithubApiClient {
    pub fn new(
        api_base: String,
        token: String,
        owner: String,
        repo: String,
        request_timeout_ms: u64,
        retry_max_attempts: usize,
        retry_base_delay_ms: u64,
    ) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("CrowdCode-automation"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            reqwest::header::HeaderValue::from_static("2022-11-28"),
        );
        let auth_header = format!("Bearer {}", token.trim());
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&auth_header)
                .context("invalid github authorization header")?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to create github api client")?;
        Ok(Self {
            http: client,
            api_base: api_base.trim_end_matches('/').to_string(),
            owner,
            repo,
            retry_max_attempts: retry_max_attempts.max(1),
            retry_base_delay_ms: retry_base_delay_ms.max(1),
        })
    }

    fn repo_url(&self, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base, self.owner, self.repo, tail
        )
    }

    /// Lists open issues carrying the given label, excluding pull requests.
    pub async fn list_labeled_issues(&self, label: &str) -> Result<Vec<GithubIssue>> {
        let mut page = 1_u32;
        let mut rows = Vec::new();
        loop {
            let url = self.repo_url("issues");
            let label_value = label.to_string();
            let page_value = page.to_string();
            let chunk: Vec<GithubIssue> = self
                .request_json("list issues", || {
                    self.http.get(&url).query(&[
                        ("labels", label_value.as_str()),
                        ("state", "open"),
                        ("per_page", "100"),
                        ("page", page_value.as_str()),
                    ])
                })
                .await?;
            let chunk_len = chunk.len();
            rows.extend(
                chunk
                    .into_iter()
                    .filter(|issue| issue.pull_request.is_none()),
            );
            if chunk_len < PAGE_SIZE {
                break;
            }
            page = page.saturating_add(1);
        }
        Ok(rows)
    }

    pub async fn get_issue(&self, issue_number: u64) -> Result<GithubIssue> {
        let url = self.repo_url(&format!("issues/{issue_number}"));
        self.request_json("get issue", || self.http.get(&url))
            .await
    }

    pub async fn list_issue_reactions(&self, issue_number: u64) -> Result<Vec<GithubReaction>> {
        let mut page = 1_u32;
        let mut rows: Vec<GithubReaction> = Vec::new();
        loop {
            let url = self.repo_url(&format!("issues/{issue_number}/reactions"));
            let page_value = page.to_string();
            let chunk: Vec<GithubReaction> = self
                .request_json("list issue reactions", || {
                    self.http
                        .get(&url)
                        .query(&[("per_page", "100"), ("page", page_value.as_str())])
                })
                .await?;
            let chunk_len = chunk.len();
            rows.extend(chunk);
            if chunk_len < PAGE_SIZE {
                break;
            }
            page = page.saturating_add(1);
        }
        Ok(rows)
    }

    pub async fn create_issue(
        &self,
        title: &str,
        body: &str,
        labels: &[&str],
    ) -> Result<GithubIssue> {
        let payload = json!({ "title": title, "body": body, "labels": labels });
        let url = self.repo_url("issues");
        self.request_json("create issue", || self.http.post(&url).json(&payload))
            .await
    }

    pub async fn create_issue_comment(&self, issue_number: u64, body: &str) -> Result<u64> {
        let payload = json!({ "body": body });
        let url = self.repo_url(&format!("issues/{issue_number}/comments"));
        let created: GithubCommentCreateResponse = self
            .request_json("create issue comment", || {
                self.http.post(&url).json(&payload)
            })
            .await?;
        Ok(created.id)
    }

    pub async fn create_pull_request(
        &self,
        title: &str,
        head: &str,
        base: &str,
        body: &str,
    ) -> Result<u64> {
        let payload = json!({ "title": title, "head": head, "base": base, "body": body });
        let url = self.repo_url("pulls");
        let created: GithubPullRequestCreateResponse = self
            .request_json("create pull request", || {
                self.http.post(&url).json(&payload)
            })
            .await?;
        Ok(created.number)
    }

    /// Adds labels to an issue; pull requests share the issue number space.
    pub async fn add_labels(&self, issue_number: u64, labels: &[&str]) -> Result<()> {
        let payload = json!({ "labels": labels });
        let url = self.repo_url(&format!("issues/{issue_number}/labels"));
        let _: serde_json::Value = self
            .request_json("add labels", || self.http.post(&url).json(&payload))
            .await?;
        Ok(())
    }

    async fn request_json<T, F>(&self, operation: &str, mut request_builder: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnMut() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0_usize;
        loop {
            attempt = attempt.saturating_add(1);
            let response = request_builder().send().await;
            match response {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed = response
                            .json::<T>()
                            .await
                            .with_context(|| format!("failed to decode github {operation}"))?;
                        return Ok(parsed);
                    }

                    let retry_after = parse_retry_after(response.headers());
                    let body = response.text().await.unwrap_or_default();
                    if attempt < self.retry_max_attempts
                        && is_retryable_github_status(status.as_u16())
                    {
                        tokio::time::sleep(retry_delay(
                            self.retry_base_delay_ms,
                            attempt,
                            retry_after,
                        ))
                        .await;
                        continue;
                    }

                    bail!(
                        "github api {operation} failed with status {}: {}",
                        status.as_u16(),
                        truncate_for_error(&body, 800)
                    );
                }
                Err(error) => {
                    if attempt < self.retry_max_attempts && is_retryable_transport_error(&error) {
                        tokio::time::sleep(retry_delay(self.retry_base_delay_ms, attempt, None))
                            .await;
                        continue;
                    }
                    return Err(error)
                        .with_context(|| format!("github api {operation} request failed"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::GithubApiClient;

    fn test_client(base_url: &str) -> GithubApiClient {
        GithubApiClient::new(
            base_url.to_string(),
            "test-token".to_string(),
            "owner".to_string(),
            "repo".to_string(),
            3_000,
            3,
            5,
        )
        .expect("client builds")
    }

    #[tokio::test]
    async fn functional_list_labeled_issues_filters_out_pull_requests() {
        let server = MockServer::start();
        let listing = server.mock(|when, then| {
            when.method(GET)
                .path("/repos/owner/repo/issues")
                .query_param("labels", "crowdcode")
                .query_param("state", "open");
            then.status(200).json_body(json!([
                {
                    "number": 7,
                    "title": "Real issue",
                    "body": "text",
                    "user": {"login": "alice"},
                    "created_at": "2026-01-01T00:00:00Z"
                },
                {
                    "number": 8,
                    "title": "A PR",
                    "body": null,
                    "user": {"login": "bob"},
                    "created_at": "2026-01-01T00:00:00Z",
                    "pull_request": {"url": "https://example.invalid"}
                }
            ]));
        });

        let issues = test_client(&server.base_url())
            .list_labeled_issues("crowdcode")
            .await
            .expect("listing succeeds");
        listing.assert();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].number, 7);
    }

    #[tokio::test]
    async fn functional_request_json_retries_retryable_statuses() {
        let server = MockServer::start();
        let flaky = server.mock(|when, then| {
            when.method(GET).path("/repos/owner/repo/issues/9");
            then.status(503);
        });

        let error = test_client(&server.base_url())
            .get_issue(9)
            .await
            .expect_err("exhausted retries should fail");
        flaky.assert_calls(3);
        assert!(error.to_string().contains("status 503"));
    }

    #[tokio::test]
    async fn regression_request_json_does_not_retry_client_errors() {
        let server = MockServer::start();
        let missing = server.mock(|when, then| {
            when.method(GET).path("/repos/owner/repo/issues/404");
            then.status(404).body("Not Found");
        });

        let error = test_client(&server.base_url())
            .get_issue(404)
            .await
            .expect_err("missing issue should fail");
        missing.assert_calls(1);
        assert!(error.to_string().contains("status 404"));
    }

    #[tokio::test]
    async fn integration_create_issue_comment_returns_comment_id() {
        let server = MockServer::start();
        let create = server.mock(|when, then| {
            when.method(POST)
                .path("/repos/owner/repo/issues/7/comments")
                .json_body(json!({"body": "hello"}));
            then.status(201).json_body(json!({"id": 4242}));
        });

        let comment_id = test_client(&server.base_url())
            .create_issue_comment(7, "hello")
            .await
            .expect("comment created");
        create.assert();
        assert_eq!(comment_id, 4242);
    }

    #[tokio::test]
    async fn integration_create_pull_request_and_labels_round_trip() {
        let server = MockServer::start();
        let pr = server.mock(|when, then| {
            when.method(POST).path("/repos/owner/repo/pulls").json_body(
                json!({"title": "Implement: x", "head": "crowdcode/issue-7", "base": "main", "body": "Fixes #7"}),
            );
            then.status(201).json_body(json!({"number": 55}));
        });
        let labels = server.mock(|when, then| {
            when.method(POST)
                .path("/repos/owner/repo/issues/55/labels")
                .json_body(json!({"labels": ["crowdcode", "auto-generated"]}));
            then.status(200).json_body(json!([]));
        });

        let client = test_client(&server.base_url());
        let number = client
            .create_pull_request("Implement: x", "crowdcode/issue-7", "main", "Fixes #7")
            .await
            .expect("pr created");
        client
            .add_labels(number, &["crowdcode", "auto-generated"])
            .await
            .expect("labels added");
        pr.assert();
        labels.assert();
        assert_eq!(number, 55);
    }
}
