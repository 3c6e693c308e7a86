use std::path::Path;

use anyhow::Result;
use crowdcode_github::{Issue, IssueTracker};
use crowdcode_workspace::GitCli;

use crate::comments::{commit_message, pr_body, pr_title, PR_BASE_BRANCH, PR_LABELS};

/// Commits and pushes the workspace changes, opens a pull request, and labels
/// it. No rollback is attempted on partial failure: a pushed branch with a
/// failed PR call is left as-is.
pub async fn publish(
    git: &GitCli,
    tracker: &dyn IssueTracker,
    workspace: &Path,
    branch: &str,
    issue: &Issue,
) -> Result<u64> {
    tracing::info!(branch, "committing changes");
    git.add_all(workspace).await?;
    git.commit(workspace, &commit_message(issue)).await?;

    tracing::info!(branch, "pushing to remote");
    git.push_set_upstream(workspace, "origin", branch).await?;

    tracing::info!("creating pull request");
    let pr_number = tracker
        .create_pull_request(
            &pr_title(&issue.title),
            branch,
            PR_BASE_BRANCH,
            &pr_body(issue.number),
        )
        .await?;
    tracker.add_labels(pr_number, &PR_LABELS).await?;
    tracing::info!(pr = pr_number, "pull request created");
    Ok(pr_number)
}
