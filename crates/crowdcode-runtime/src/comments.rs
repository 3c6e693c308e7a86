//! Rendering for issue comments, commit messages, pull requests, and the
//! standing no-eligible-issues report.

use chrono::{DateTime, Utc};
use crowdcode_github::{Issue, SelectionCriteria};

/// Base branch pull requests are opened against.
pub const PR_BASE_BRANCH: &str = "main";
/// Labels applied to every generated pull request.
pub const PR_LABELS: [&str; 2] = ["crowdcode", "auto-generated"];
/// Labels applied to the standing no-eligible-issues report.
pub const REPORT_LABELS: [&str; 2] = ["crowdcode", "status-report"];
/// Labels applied to tracking issues created for ad-hoc tasks.
pub const TASK_LABELS: [&str; 2] = ["crowdcode", "custom-task"];

/// Feature branch for an issue. Deliberately derived from the issue number
/// alone: repeat runs against the same issue collide on the remote and fail
/// at push time.
pub fn branch_name(issue_number: u64) -> String {
    format!("crowdcode/issue-{issue_number}")
}

pub fn render_rejection_comment(reason: &str) -> String {
    format!(
        "**Implementation Rejected**\n\n\
         This issue was flagged by our security screening:\n\n\
         > {reason}\n\n\
         Please revise the issue description and remove any potentially dangerous requests."
    )
}

pub fn render_start_comment(timeout_minutes: u64) -> String {
    format!(
        "**Implementation Started**\n\n\
         This issue has been selected for implementation.\n\n\
         Status: starting implementation.\n\n\
         *This may take up to {timeout_minutes} minutes.*"
    )
}

pub fn render_no_changes_comment(workspace: &str) -> String {
    format!(
        "**No Changes Needed**\n\n\
         After analyzing the issue, no code changes were required. The issue \
         may already be resolved or require clarification.\n\n\
         *Workspace preserved for debugging: `{workspace}`*"
    )
}

pub fn render_success_comment(pr_number: u64) -> String {
    format!(
        "**Implementation Complete**\n\n\
         Pull request: #{pr_number}\n\n\
         Please review the changes and merge if everything looks good."
    )
}

pub fn render_failure_comment(error: &str) -> String {
    format!(
        "**Implementation Failed**\n\n\
         An error occurred during implementation:\n\n\
         ```\n{error}\n```\n\n\
         Please check the issue description and try again."
    )
}

/// Commit message embedding the issue coordinates plus the fixed attribution
/// trailers.
pub fn commit_message(issue: &Issue) -> String {
    format!(
        "Implement issue #{number}: {title}\n\n\
         {body}\n\n\
         Generated by CrowdCode\n\
         Issue: #{number}\n\n\
         Co-Authored-By: Claude <noreply@anthropic.com>",
        number = issue.number,
        title = issue.title,
        body = issue.body.as_deref().unwrap_or_default(),
    )
}

pub fn pr_title(issue_title: &str) -> String {
    format!("Implement: {issue_title}")
}

/// The leading `Fixes #<n>` line lets tracker automation close the issue on
/// merge.
pub fn pr_body(issue_number: u64) -> String {
    format!(
        "Fixes #{issue_number}\n\n\
         This PR was automatically generated by CrowdCode.\n\n\
         ## Implementation\n\n\
         Automated implementation of the feature request described in issue #{issue_number}."
    )
}

pub fn no_eligible_issues_title(now: DateTime<Utc>) -> String {
    format!(
        "[CrowdCode] No eligible issues for {}",
        now.format("%Y-%m-%d")
    )
}

pub fn no_eligible_issues_body(criteria: &SelectionCriteria, now: DateTime<Utc>) -> String {
    format!(
        "**CrowdCode Automated Report**\n\n\
         **Date**: {date}\n\n\
         **Status**: No eligible issues found\n\n\
         **Criteria**:\n\
         - Label: `{label}`\n\
         - Minimum reactions: {min_reactions}\n\
         - Minimum age: {min_age} hours\n\n\
         **Action**: No implementation performed today.\n\n\
         ---\n\n\
         To submit an issue for CrowdCode:\n\
         1. Create an issue with clear requirements\n\
         2. Add the `{label}` label\n\
         3. Wait {min_age} hours\n\
         4. Get community votes (+1 reactions)",
        date = now.to_rfc3339(),
        label = criteria.label,
        min_reactions = criteria.min_reactions,
        min_age = criteria.min_issue_age_hours,
    )
}

pub fn task_issue_title(description: &str) -> String {
    let mut summary: String = description.chars().take(50).collect();
    if description.chars().count() > 50 {
        summary.push_str("...");
    }
    format!("[CrowdCode Task] {summary}")
}

pub fn task_issue_body(description: &str) -> String {
    format!(
        "**Custom CrowdCode Task**\n\n\
         {description}\n\n\
         *This issue was automatically created for a custom task execution.*"
    )
}
