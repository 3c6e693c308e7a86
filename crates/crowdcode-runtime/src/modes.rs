//! The four entry modes built on the orchestrator: single-shot, specific
//! issue, ad-hoc task, and the recurring daemon.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use crowdcode_core::time_utils::current_unix_timestamp_ms;
use crowdcode_github::{select_by_id, select_top_issue, Issue};

use crate::comments::{
    no_eligible_issues_body, no_eligible_issues_title, task_issue_body, task_issue_title,
    REPORT_LABELS, TASK_LABELS,
};
use crate::orchestrator::{run_issue, ExecutionResult};
use crate::RuntimeConfig;

/// Selects and processes the top-ranked issue. When nothing qualifies, a
/// standing report issue is created instead and `None` is returned. Selection
/// failures propagate: they are fatal for a single-shot run.
pub async fn run_single_shot(config: &RuntimeConfig) -> Result<Option<ExecutionResult>> {
    let criteria = config.selection_criteria();
    let selected =
        select_top_issue(config.tracker.as_ref(), &criteria, current_unix_timestamp_ms()).await?;
    match selected {
        Some(issue) => Ok(Some(run_issue(config, &issue).await)),
        None => {
            let now = Utc::now();
            config
                .tracker
                .create_issue(
                    &no_eligible_issues_title(now),
                    &no_eligible_issues_body(&criteria, now),
                    &REPORT_LABELS,
                )
                .await
                .context("failed to create no-eligible-issues report")?;
            tracing::info!("no eligible issues; created standing report issue");
            Ok(None)
        }
    }
}

/// Processes one issue by number, skipping the age/approval gates entirely.
/// A missing or inaccessible issue is reported, not treated as an error.
pub async fn run_specific_issue(
    config: &RuntimeConfig,
    issue_number: u64,
) -> Result<Option<ExecutionResult>> {
    match select_by_id(config.tracker.as_ref(), issue_number).await {
        Some(issue) => Ok(Some(run_issue(config, &issue).await)),
        None => {
            tracing::warn!(issue = issue_number, "issue not found or inaccessible");
            Ok(None)
        }
    }
}

/// Creates a tracking issue for a free-text task, then processes it as a
/// synthetic issue carrying the task text as its body.
pub async fn run_task(config: &RuntimeConfig, description: &str) -> Result<ExecutionResult> {
    let created = config
        .tracker
        .create_issue(
            &task_issue_title(description),
            &task_issue_body(description),
            &TASK_LABELS,
        )
        .await
        .context("failed to create tracking issue for task")?;
    tracing::info!(issue = created.number, "created tracking issue for task");

    let issue = Issue {
        number: created.number,
        title: "Custom Task".to_string(),
        body: Some(description.to_string()),
        author_login: None,
        created_at: created.created_at.clone(),
        approvals: 0,
    };
    Ok(run_issue(config, &issue).await)
}

/// Runs the single-shot cycle immediately, then repeats on a fixed interval
/// until interrupted. Cycle failures are logged and never stop the loop.
pub async fn run_daemon(config: &RuntimeConfig, interval: Duration) -> Result<()> {
    tracing::info!(
        interval_minutes = interval.as_secs() / 60,
        "daemon mode started"
    );
    loop {
        tracing::info!("starting scheduled cycle");
        match run_single_shot(config).await {
            Ok(Some(result)) => tracing::info!(
                success = result.success,
                message = %result.message,
                "scheduled cycle completed"
            ),
            Ok(None) => tracing::info!("scheduled cycle completed: no eligible issues"),
            Err(error) => tracing::error!("scheduled cycle failed: {error:#}"),
        }
        tracing::info!(
            interval_minutes = interval.as_secs() / 60,
            "sleeping until next cycle"
        );
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown requested");
                return Ok(());
            }
            _ = tokio::time::sleep(interval) => {}
        }
    }
}
