//! GitHub collaborator for the CrowdCode automation.
//!
//! Provides the REST data model, a `reqwest` API client with bounded retry,
//! the `IssueTracker` trait injected into the selector/publisher/orchestrator,
//! and the issue-selection logic (age and approval filtering plus ranking).

pub mod client;
pub mod selector;
pub mod tracker;
pub mod transport;
pub mod types;

pub use client::GithubApiClient;
pub use selector::{select_by_id, select_top_issue, SelectionCriteria};
pub use tracker::IssueTracker;
pub use types::{GithubIssue, GithubReaction, GithubUser, Issue, APPROVAL_REACTION};
