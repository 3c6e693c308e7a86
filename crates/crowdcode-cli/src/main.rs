//! CrowdCode command-line entry point.

mod args;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crowdcode_github::GithubApiClient;
use crowdcode_runtime::{
    run_daemon, run_single_shot, run_specific_issue, run_task, RuntimeConfig,
};
use crowdcode_safety::ScreenPolicy;
use crowdcode_workspace::{authenticated_remote_url, GitCli};

use crate::args::Cli;

const GITHUB_REQUEST_TIMEOUT_MS: u64 = 30_000;
const GITHUB_RETRY_MAX_ATTEMPTS: usize = 3;
const GITHUB_RETRY_BASE_DELAY_MS: u64 = 500;

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn build_runtime_config(cli: &Cli) -> Result<RuntimeConfig> {
    let token = cli
        .github_token
        .clone()
        .filter(|token| !token.trim().is_empty())
        .context("GITHUB_TOKEN environment variable is required")?;

    let tracker = GithubApiClient::new(
        cli.github_api_base.clone(),
        token.clone(),
        cli.github_owner.clone(),
        cli.github_repo.clone(),
        GITHUB_REQUEST_TIMEOUT_MS,
        GITHUB_RETRY_MAX_ATTEMPTS,
        GITHUB_RETRY_BASE_DELAY_MS,
    )?;
    let screen_policy = ScreenPolicy::default_policy()?;
    let remote_url = authenticated_remote_url(&token, &cli.github_owner, &cli.github_repo);

    Ok(RuntimeConfig {
        tracker: Arc::new(tracker),
        screen_policy,
        git: GitCli::with_redacted_secret(&token),
        owner: cli.github_owner.clone(),
        repo: cli.github_repo.clone(),
        remote_url,
        issue_label: cli.issue_label.clone(),
        min_reactions: cli.min_reactions,
        min_issue_age_hours: cli.min_issue_age_hours,
        workspace_root: cli.workspace_path.clone(),
        agent_command: cli.agent_command.clone(),
        timeout_minutes: cli.timeout_minutes,
        cron_interval_minutes: cli.cron_interval_minutes,
    })
}

async fn run(cli: Cli) -> Result<()> {
    let config = build_runtime_config(&cli)?;

    // Mode priority mirrors the documented CLI surface: daemon, then a
    // specific issue, then an ad-hoc task, otherwise a single-shot run.
    if let Some(interval_override) = cli.cron {
        let interval = match interval_override {
            Some(minutes) => std::time::Duration::from_secs(minutes.saturating_mul(60)),
            None => config.cron_interval(),
        };
        return run_daemon(&config, interval).await;
    }

    if let Some(issue_number) = cli.issue_id {
        tracing::info!(issue = issue_number, "specific-issue mode");
        run_specific_issue(&config, issue_number).await?;
        return Ok(());
    }

    if let Some(task_words) = cli.task {
        let description = task_words.join(" ");
        tracing::info!("ad-hoc task mode");
        run_task(&config, &description).await?;
        return Ok(());
    }

    tracing::info!("single-shot mode");
    run_single_shot(&config).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            // Help and version are successful exits; anything else is an
            // invalid invocation.
            let code = match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = error.print();
            std::process::exit(code);
        }
    };

    init_tracing();
    if let Err(error) = run(cli).await {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
