use std::path::Path;

use anyhow::Result;
use crowdcode_core::time_utils::current_unix_timestamp_ms;
use crowdcode_github::Issue;
use crowdcode_workspace::prepare_workspace;

use crate::comments::{
    branch_name, render_failure_comment, render_no_changes_comment, render_rejection_comment,
    render_start_comment, render_success_comment,
};
use crate::executor::AgentLauncher;
use crate::prompt::build_implementation_prompt;
use crate::publisher::publish;
use crate::RuntimeConfig;

/// Outcome record for one attempted issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub success: bool,
    pub message: String,
    pub pr_number: Option<u64>,
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn succeeded(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            pr_number: None,
            error: None,
        }
    }

    pub fn succeeded_with_pr(message: &str, pr_number: u64) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            pr_number: Some(pr_number),
            error: None,
        }
    }

    pub fn failed(message: &str, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            pr_number: None,
            error,
        }
    }
}

/// Runs one end-to-end implementation attempt for the issue.
///
/// Stage failures are caught here and reported back to the issue as a single
/// failure comment; the workspace, once created, is preserved on every exit
/// path.
pub async fn run_issue(config: &RuntimeConfig, issue: &Issue) -> ExecutionResult {
    match attempt_issue(config, issue).await {
        Ok(result) => result,
        Err(error) => {
            tracing::error!(issue = issue.number, "implementation failed: {error:#}");
            let comment = render_failure_comment(&error.to_string());
            if let Err(comment_error) = config
                .tracker
                .create_issue_comment(issue.number, &comment)
                .await
            {
                tracing::error!(
                    issue = issue.number,
                    "failed to post failure comment: {comment_error:#}"
                );
            }
            ExecutionResult::failed("Implementation failed", Some(error.to_string()))
        }
    }
}

async fn attempt_issue(config: &RuntimeConfig, issue: &Issue) -> Result<ExecutionResult> {
    tracing::info!(issue = issue.number, "screening issue body");
    let verdict = config
        .screen_policy
        .screen(issue.body.as_deref().unwrap_or_default());
    if verdict.risky {
        let reason = verdict
            .reason
            .unwrap_or_else(|| "unspecified pattern".to_string());
        tracing::warn!(issue = issue.number, %reason, "issue rejected by screening");
        config
            .tracker
            .create_issue_comment(issue.number, &render_rejection_comment(&reason))
            .await?;
        return Ok(ExecutionResult::failed("Abuse detected", Some(reason)));
    }

    config
        .tracker
        .create_issue_comment(issue.number, &render_start_comment(config.timeout_minutes))
        .await?;

    let workspace = prepare_workspace(
        &config.workspace_root,
        issue.number,
        &issue.title,
        current_unix_timestamp_ms(),
    )?;
    let result = run_in_workspace(config, issue, &workspace).await;
    // No automatic teardown on any path; the operator cleans up manually.
    tracing::info!(
        workspace = %workspace.display(),
        "workspace preserved for inspection"
    );
    result
}

async fn run_in_workspace(
    config: &RuntimeConfig,
    issue: &Issue,
    workspace: &Path,
) -> Result<ExecutionResult> {
    tracing::info!(issue = issue.number, "cloning repository");
    config.git.clone_repo(&config.remote_url, workspace).await?;

    let branch = branch_name(issue.number);
    tracing::info!(%branch, "creating feature branch");
    config.git.checkout_new_branch(workspace, &branch).await?;

    let prompt = build_implementation_prompt(&config.owner, &config.repo, issue);
    let launcher = AgentLauncher::from_command(&config.agent_command, config.agent_timeout())?;
    launcher.execute(workspace, &prompt).await?;

    let status = config.git.status(workspace).await?;
    tracing::info!(
        changed = status.changed.len(),
        untracked = status.untracked.len(),
        "audited working tree"
    );
    if !status.has_changes() {
        tracing::info!(issue = issue.number, "agent made no changes");
        config
            .tracker
            .create_issue_comment(
                issue.number,
                &render_no_changes_comment(&workspace.display().to_string()),
            )
            .await?;
        return Ok(ExecutionResult::succeeded("No changes needed"));
    }

    let pr_number = publish(
        &config.git,
        config.tracker.as_ref(),
        workspace,
        &branch,
        issue,
    )
    .await?;
    config
        .tracker
        .create_issue_comment(issue.number, &render_success_comment(pr_number))
        .await?;
    Ok(ExecutionResult::succeeded_with_pr(
        "Implementation completed",
        pr_number,
    ))
}
