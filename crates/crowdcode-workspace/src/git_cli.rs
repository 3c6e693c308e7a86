use std::path::Path;
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum GitCliError {
    #[error("git executable not found or not runnable: {0}")]
    NotAvailable(String),
    #[error("git {operation} failed: {detail}")]
    CommandFailed { operation: String, detail: String },
}

/// Working-tree audit: tracked changes and untracked files, split so both can
/// be logged separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorktreeStatus {
    pub changed: Vec<String>,
    pub untracked: Vec<String>,
}

impl WorktreeStatus {
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty() || !self.untracked.is_empty()
    }

    pub fn total_files(&self) -> usize {
        self.changed.len() + self.untracked.len()
    }
}

/// Clone URL with the credential embedded, so the git client needs no
/// separate credential configuration.
pub fn authenticated_remote_url(token: &str, owner: &str, repo: &str) -> String {
    format!("https://{token}@github.com/{owner}/{repo}.git")
}

/// Parses `git status --porcelain` output. `??` rows are untracked; all other
/// rows are tracked changes. Rename rows report the new path.
pub fn parse_porcelain_status(raw: &str) -> WorktreeStatus {
    let mut status = WorktreeStatus::default();
    for line in raw.lines() {
        if line.len() < 4 {
            continue;
        }
        let (code, rest) = line.split_at(2);
        let path = match rest.trim_start().split_once(" -> ") {
            Some((_, renamed_to)) => renamed_to,
            None => rest.trim_start(),
        };
        let path = path.trim_matches('"').to_string();
        if code == "??" {
            status.untracked.push(path);
        } else {
            status.changed.push(path);
        }
    }
    status
}

/// Thin wrapper around the `git` binary. Working-tree mutations go through
/// the CLI rather than a library binding so the usual clobber protections
/// apply. Stderr from failed commands is surfaced in the error, with an
/// optional secret scrubbed out first.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    redact: Option<String>,
}

impl GitCli {
    pub fn new() -> Self {
        Self { redact: None }
    }

    /// Scrubs the given secret (e.g. an access token embedded in a remote
    /// URL) from any error detail this client produces.
    pub fn with_redacted_secret(secret: &str) -> Self {
        let trimmed = secret.trim();
        Self {
            redact: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        }
    }

    pub async fn clone_repo(&self, url: &str, dir: &Path) -> Result<(), GitCliError> {
        self.git(None, &["clone", url, &dir.display().to_string()], "clone")
            .await?;
        Ok(())
    }

    pub async fn checkout_new_branch(&self, dir: &Path, branch: &str) -> Result<(), GitCliError> {
        self.git(Some(dir), &["checkout", "-b", branch], "checkout -b")
            .await?;
        Ok(())
    }

    pub async fn add_all(&self, dir: &Path) -> Result<(), GitCliError> {
        self.git(Some(dir), &["add", "."], "add").await?;
        Ok(())
    }

    pub async fn commit(&self, dir: &Path, message: &str) -> Result<(), GitCliError> {
        self.git(Some(dir), &["commit", "-m", message], "commit")
            .await?;
        Ok(())
    }

    pub async fn push_set_upstream(
        &self,
        dir: &Path,
        remote: &str,
        branch: &str,
    ) -> Result<(), GitCliError> {
        self.git(
            Some(dir),
            &["push", "--set-upstream", remote, branch],
            "push",
        )
        .await?;
        Ok(())
    }

    pub async fn status(&self, dir: &Path) -> Result<WorktreeStatus, GitCliError> {
        let raw = self.git(Some(dir), &["status", "--porcelain"], "status").await?;
        Ok(parse_porcelain_status(&raw))
    }

    async fn git(
        &self,
        cwd: Option<&Path>,
        args: &[&str],
        operation: &str,
    ) -> Result<String, GitCliError> {
        let mut command = Command::new("git");
        command.args(args).stdin(Stdio::null());
        if let Some(cwd) = cwd {
            command.current_dir(cwd);
        }
        let output = command
            .output()
            .await
            .map_err(|error| GitCliError::NotAvailable(self.scrub(&error.to_string())))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(GitCliError::CommandFailed {
                operation: operation.to_string(),
                detail: self.scrub(&detail),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn scrub(&self, detail: &str) -> String {
        match &self.redact {
            Some(secret) => detail.replace(secret.as_str(), "***"),
            None => detail.to_string(),
        }
    }
}
