//! CrowdCode run orchestration: prompt synthesis, agent supervision,
//! publishing, issue commentary, and the scheduling front-end.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crowdcode_github::{IssueTracker, SelectionCriteria};
use crowdcode_safety::ScreenPolicy;
use crowdcode_workspace::GitCli;

pub mod comments;
pub mod executor;
pub mod modes;
pub mod orchestrator;
pub mod prompt;
pub mod publisher;

pub use executor::AgentLauncher;
pub use modes::{run_daemon, run_single_shot, run_specific_issue, run_task};
pub use orchestrator::{run_issue, ExecutionResult};

/// Immutable runtime configuration, assembled once by the entry point and
/// threaded into every component. The tracker is an injected collaborator so
/// tests can substitute a double; the remote URL carries the embedded
/// credential for clones and pushes.
pub struct RuntimeConfig {
    pub tracker: Arc<dyn IssueTracker>,
    pub screen_policy: ScreenPolicy,
    pub git: GitCli,
    pub owner: String,
    pub repo: String,
    pub remote_url: String,
    pub issue_label: String,
    pub min_reactions: u32,
    pub min_issue_age_hours: u64,
    pub workspace_root: PathBuf,
    pub agent_command: String,
    pub timeout_minutes: u64,
    pub cron_interval_minutes: u64,
}

impl RuntimeConfig {
    pub fn selection_criteria(&self) -> SelectionCriteria {
        SelectionCriteria {
            label: self.issue_label.clone(),
            min_reactions: self.min_reactions,
            min_issue_age_hours: self.min_issue_age_hours,
        }
    }

    pub fn agent_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_minutes.saturating_mul(60))
    }

    pub fn cron_interval(&self) -> Duration {
        Duration::from_secs(self.cron_interval_minutes.saturating_mul(60))
    }
}
