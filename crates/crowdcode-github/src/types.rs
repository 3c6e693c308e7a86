use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reaction kind that counts as community approval.
pub const APPROVAL_REACTION: &str = "+1";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubUser {
    pub login: String,
}

/// Issue row as returned by the GitHub issues API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubIssue {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    #[serde(default)]
    pub user: Option<GithubUser>,
    pub created_at: String,
    #[serde(default)]
    pub pull_request: Option<Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubReaction {
    pub content: String,
}

/// Issue enriched with its approval count; the unit of work handed to the
/// orchestrator. Never mutated after selection.
#[derive(Debug, Clone)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub author_login: Option<String>,
    pub created_at: String,
    pub approvals: u32,
}

impl Issue {
    pub fn from_github(issue: GithubIssue, approvals: u32) -> Self {
        Self {
            number: issue.number,
            title: issue.title,
            body: issue.body,
            author_login: issue.user.map(|user| user.login),
            created_at: issue.created_at,
            approvals,
        }
    }
}
