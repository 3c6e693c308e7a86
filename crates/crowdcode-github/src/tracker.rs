use anyhow::Result;
use async_trait::async_trait;

use crate::client::GithubApiClient;
use crate::types::{GithubIssue, GithubReaction};

/// Issue-tracker operations consumed by the selector, publisher, and
/// orchestrator. Injected explicitly so tests can substitute a double.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    async fn list_labeled_issues(&self, label: &str) -> Result<Vec<GithubIssue>>;
    async fn get_issue(&self, issue_number: u64) -> Result<GithubIssue>;
    async fn list_issue_reactions(&self, issue_number: u64) -> Result<Vec<GithubReaction>>;
    async fn create_issue(&self, title: &str, body: &str, labels: &[&str])
        -> Result<GithubIssue>;
    async fn create_issue_comment(&self, issue_number: u64, body: &str) -> Result<u64>;
    async fn create_pull_request(
        &self,
        title: &str,
        head: &str,
        base: &str,
        body: &str,
    ) -> Result<u64>;
    async fn add_labels(&self, issue_number: u64, labels: &[&str]) -> Result<()>;
}

#[async_trait]
impl IssueTracker for GithubApiClient {
    async fn list_labeled_issues(&self, label: &str) -> Result<Vec<GithubIssue>> {
        GithubApiClient::list_labeled_issues(self, label).await
    }

    async fn get_issue(&self, issue_number: u64) -> Result<GithubIssue> {
        GithubApiClient::get_issue(self, issue_number).await
    }

    async fn list_issue_reactions(&self, issue_number: u64) -> Result<Vec<GithubReaction>> {
        GithubApiClient::list_issue_reactions(self, issue_number).await
    }

    async fn create_issue(
        &self,
        title: &str,
        body: &str,
        labels: &[&str],
    ) -> Result<GithubIssue> {
        GithubApiClient::create_issue(self, title, body, labels).await
    }

    async fn create_issue_comment(&self, issue_number: u64, body: &str) -> Result<u64> {
        GithubApiClient::create_issue_comment(self, issue_number, body).await
    }

    async fn create_pull_request(
        &self,
        title: &str,
        head: &str,
        base: &str,
        body: &str,
    ) -> Result<u64> {
        GithubApiClient::create_pull_request(self, title, head, base, body).await
    }

    async fn add_labels(&self, issue_number: u64, labels: &[&str]) -> Result<()> {
        GithubApiClient::add_labels(self, issue_number, labels).await
    }
}
