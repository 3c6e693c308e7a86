use std::path::PathBuf;

use clap::Parser;

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "crowdcode",
    about = "Automated crowdsourced implementation: picks community-approved \
             issues and drives a coding agent to implement them",
    version
)]
pub struct Cli {
    #[arg(
        long,
        value_name = "MINUTES",
        num_args = 0..=1,
        value_parser = parse_positive_u64,
        help = "Daemon mode: check for eligible issues every N minutes. \
                Without a value, the configured default interval is used."
    )]
    pub cron: Option<Option<u64>>,

    #[arg(
        long = "issue-id",
        value_name = "NUMBER",
        help = "Implement one specific issue by number, skipping the age and \
                approval gates"
    )]
    pub issue_id: Option<u64>,

    #[arg(
        long,
        value_name = "TEXT",
        num_args = 1..,
        help = "Implement an ad-hoc task; the remaining arguments are joined \
                into the task description"
    )]
    pub task: Option<Vec<String>>,

    #[arg(
        long = "github-token",
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        help = "GitHub personal access token (required)"
    )]
    pub github_token: Option<String>,

    #[arg(
        long = "github-owner",
        env = "GITHUB_OWNER",
        default_value = "vs4vijay",
        help = "Target repository owner"
    )]
    pub github_owner: String,

    #[arg(
        long = "github-repo",
        env = "GITHUB_REPO",
        default_value = "CrowdCode",
        help = "Target repository name"
    )]
    pub github_repo: String,

    #[arg(
        long = "issue-label",
        env = "ISSUE_LABEL",
        default_value = "crowdcode",
        help = "Label an issue must carry to qualify for selection"
    )]
    pub issue_label: String,

    #[arg(
        long = "min-reactions",
        env = "MIN_REACTIONS",
        default_value_t = 1,
        help = "Minimum +1 reactions an issue needs"
    )]
    pub min_reactions: u32,

    #[arg(
        long = "min-issue-age-hours",
        env = "MIN_ISSUE_AGE_HOURS",
        default_value_t = 24,
        help = "Minimum issue age in hours"
    )]
    pub min_issue_age_hours: u64,

    #[arg(
        long = "workspace-path",
        env = "WORKSPACE_PATH",
        default_value = "./workspace",
        help = "Root directory for per-run workspaces"
    )]
    pub workspace_path: PathBuf,

    #[arg(
        long = "timeout-minutes",
        env = "TIMEOUT_MINUTES",
        default_value_t = 30,
        value_parser = parse_positive_u64,
        help = "Wall-clock timeout for one agent execution"
    )]
    pub timeout_minutes: u64,

    #[arg(
        long = "cron-interval-minutes",
        env = "CRON_INTERVAL_MINUTES",
        default_value_t = 1440,
        value_parser = parse_positive_u64,
        help = "Default daemon interval when --cron is given without a value"
    )]
    pub cron_interval_minutes: u64,

    #[arg(
        long = "agent-command",
        env = "AGENT_COMMAND",
        default_value = "claude --allowedTools Edit,Write --print",
        help = "Coding-agent command line; the task prompt is appended as the \
                final argument"
    )]
    pub agent_command: String,

    #[arg(
        long = "github-api-base",
        env = "GITHUB_API_BASE",
        default_value = "https://api.github.com",
        help = "GitHub API base URL"
    )]
    pub github_api_base: String,
}
