use anyhow::Result;
use crowdcode_core::time_utils::{age_hours, parse_rfc3339_to_unix_ms};

use crate::tracker::IssueTracker;
use crate::types::{GithubReaction, Issue, APPROVAL_REACTION};

/// Eligibility thresholds for automatic issue selection.
#[derive(Debug, Clone)]
pub struct SelectionCriteria {
    pub label: String,
    pub min_reactions: u32,
    pub min_issue_age_hours: u64,
}

/// Counts reactions of the approval kind.
pub fn count_approvals(reactions: &[GithubReaction]) -> u32 {
    let count = reactions
        .iter()
        .filter(|reaction| reaction.content == APPROVAL_REACTION)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Returns true when the issue is at least `min_age_hours` old. Issues with
/// unparseable timestamps are treated as too new and excluded.
pub fn meets_min_age(created_at: &str, min_age_hours: u64, now_unix_ms: u64) -> bool {
    match parse_rfc3339_to_unix_ms(created_at) {
        Some(created_ms) => age_hours(created_ms, now_unix_ms) >= min_age_hours,
        None => {
            tracing::warn!(created_at, "unparseable issue timestamp; excluding issue");
            false
        }
    }
}

/// Orders candidates by approval count descending; the sort is stable so ties
/// keep the tracker's listing order.
pub fn rank_by_approvals(mut candidates: Vec<Issue>) -> Vec<Issue> {
    candidates.sort_by(|left, right| right.approvals.cmp(&left.approvals));
    candidates
}

/// Picks the most-approved eligible issue, or `None` when nothing qualifies.
///
/// Tracker failures propagate to the caller; a failed listing is fatal for
/// the run.
pub async fn select_top_issue(
    tracker: &dyn IssueTracker,
    criteria: &SelectionCriteria,
    now_unix_ms: u64,
) -> Result<Option<Issue>> {
    tracing::info!(label = %criteria.label, "fetching labeled open issues");
    let issues = tracker.list_labeled_issues(&criteria.label).await?;
    if issues.is_empty() {
        tracing::info!(label = %criteria.label, "no issues carry the label");
        return Ok(None);
    }
    tracing::info!(count = issues.len(), "found labeled issues");

    let mut candidates = Vec::new();
    for issue in issues {
        if !meets_min_age(&issue.created_at, criteria.min_issue_age_hours, now_unix_ms) {
            tracing::info!(
                issue = issue.number,
                min_age_hours = criteria.min_issue_age_hours,
                "skipping issue: too new"
            );
            continue;
        }
        let reactions = tracker.list_issue_reactions(issue.number).await?;
        let approvals = count_approvals(&reactions);
        if approvals < criteria.min_reactions {
            tracing::info!(
                issue = issue.number,
                approvals,
                min_reactions = criteria.min_reactions,
                "skipping issue: below approval threshold"
            );
            continue;
        }
        candidates.push(Issue::from_github(issue, approvals));
    }

    if candidates.is_empty() {
        tracing::info!(
            min_reactions = criteria.min_reactions,
            min_age_hours = criteria.min_issue_age_hours,
            "no issues meet the selection criteria"
        );
        return Ok(None);
    }

    let ranked = rank_by_approvals(candidates);
    let top = ranked.into_iter().next();
    if let Some(issue) = &top {
        tracing::info!(
            issue = issue.number,
            approvals = issue.approvals,
            title = %issue.title,
            "selected top issue"
        );
    }
    Ok(top)
}

/// Fetches one issue by number with its approval count. Unlike the top-issue
/// path, fetch failures are logged and mapped to `None` rather than
/// propagated.
pub async fn select_by_id(tracker: &dyn IssueTracker, issue_number: u64) -> Option<Issue> {
    let issue = match tracker.get_issue(issue_number).await {
        Ok(issue) => issue,
        Err(error) => {
            tracing::error!(issue = issue_number, "failed to fetch issue: {error:#}");
            return None;
        }
    };
    let reactions = match tracker.list_issue_reactions(issue_number).await {
        Ok(reactions) => reactions,
        Err(error) => {
            tracing::error!(
                issue = issue_number,
                "failed to fetch issue reactions: {error:#}"
            );
            return None;
        }
    };
    Some(Issue::from_github(issue, count_approvals(&reactions)))
}
