//! Workspace lifecycle and git plumbing for implementation attempts.
//!
//! A workspace is a uniquely named directory holding a fresh clone of the
//! target repository. It is created clean, mutated by the coding agent, and
//! deliberately never deleted by the process; operators clean up manually.

pub mod git_cli;
pub mod manager;

pub use git_cli::{authenticated_remote_url, GitCli, GitCliError, WorktreeStatus};
pub use manager::{prepare_workspace, workspace_dir_name};
