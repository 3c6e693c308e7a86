use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::process::Command;

/// Launches the external coding agent as a supervised subprocess.
///
/// The agent communicates only through its exit code and inherited standard
/// streams; there is no structured response channel.
#[derive(Debug, Clone)]
pub struct AgentLauncher {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl AgentLauncher {
    /// Splits the configured agent command line into program and arguments.
    /// The task prompt is appended as one final argument at execution time.
    pub fn from_command(command: &str, timeout: Duration) -> Result<Self> {
        let mut parts = shell_words::split(command)
            .with_context(|| format!("invalid agent command '{command}'"))?;
        if parts.is_empty() {
            bail!("agent command must not be empty");
        }
        let program = parts.remove(0);
        Ok(Self {
            program,
            args: parts,
            timeout,
        })
    }

    /// Runs the agent in the workspace, streaming its output to the parent's
    /// stdout/stderr, and races completion against the wall-clock timeout.
    ///
    /// On timeout the child is forcibly terminated (no graceful signal) and
    /// the resulting nonzero exit surfaces as an ordinary stage failure; there
    /// is no distinct timed-out outcome.
    pub async fn execute(&self, workspace: &Path, prompt: &str) -> Result<()> {
        tracing::info!(
            program = %self.program,
            timeout_secs = self.timeout.as_secs(),
            "launching coding agent"
        );
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(prompt)
            .current_dir(workspace)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn agent command '{}'", self.program))?;

        let status = tokio::select! {
            result = child.wait() => result.context("failed to await agent subprocess")?,
            _ = tokio::time::sleep(self.timeout) => {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "agent execution timed out; terminating subprocess"
                );
                child
                    .start_kill()
                    .context("failed to terminate timed-out agent subprocess")?;
                child
                    .wait()
                    .await
                    .context("failed to await terminated agent subprocess")?
            }
        };

        if !status.success() {
            match status.code() {
                Some(code) => bail!("agent command failed with exit code {code}"),
                None => bail!("agent command was terminated before completing"),
            }
        }
        tracing::info!("agent execution completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::AgentLauncher;

    #[test]
    fn unit_from_command_splits_program_and_arguments() {
        let launcher = AgentLauncher::from_command(
            "claude --allowedTools Edit,Write --print",
            Duration::from_secs(60),
        )
        .expect("command parses");
        assert_eq!(launcher.program, "claude");
        assert_eq!(
            launcher.args,
            vec!["--allowedTools", "Edit,Write", "--print"]
        );
    }

    #[test]
    fn unit_from_command_rejects_empty_commands() {
        assert!(AgentLauncher::from_command("", Duration::from_secs(1)).is_err());
        assert!(AgentLauncher::from_command("   ", Duration::from_secs(1)).is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn functional_execute_succeeds_for_zero_exit() {
        let workspace = tempfile::tempdir().expect("tempdir");
        let launcher =
            AgentLauncher::from_command("/bin/sh -c true", Duration::from_secs(5)).expect("parse");
        launcher
            .execute(workspace.path(), "ignored prompt")
            .await
            .expect("zero exit is success");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn functional_execute_reports_nonzero_exit_codes() {
        let workspace = tempfile::tempdir().expect("tempdir");
        let launcher = AgentLauncher::from_command("/bin/sh -c 'exit 3'", Duration::from_secs(5))
            .expect("parse");
        let error = launcher
            .execute(workspace.path(), "ignored prompt")
            .await
            .expect_err("nonzero exit is failure");
        assert!(error.to_string().contains("exit code 3"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn integration_execute_kills_subprocess_on_timeout() {
        let workspace = tempfile::tempdir().expect("tempdir");
        let launcher = AgentLauncher::from_command("/bin/sh -c 'sleep 30'", Duration::from_millis(200))
            .expect("parse");
        let started = Instant::now();
        let error = launcher
            .execute(workspace.path(), "ignored prompt")
            .await
            .expect_err("timed-out run is failure");
        assert!(
            started.elapsed() < Duration::from_secs(10),
            "termination should not wait for the sleep to finish"
        );
        assert!(error.to_string().contains("terminated"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn regression_execute_passes_prompt_as_final_argument() {
        let workspace = tempfile::tempdir().expect("tempdir");
        let marker = workspace.path().join("prompt-capture.txt");
        let script = format!("printf '%s' \"$1\" > {}", marker.display());
        let command = format!("/bin/sh -c {} capture", shell_words::quote(&script));
        let launcher =
            AgentLauncher::from_command(&command, Duration::from_secs(5)).expect("parse");
        launcher
            .execute(workspace.path(), "the task prompt")
            .await
            .expect("capture succeeds");
        let captured = std::fs::read_to_string(&marker).expect("marker written");
        assert_eq!(captured, "the task prompt");
    }
}
