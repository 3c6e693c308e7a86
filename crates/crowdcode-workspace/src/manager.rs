use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crowdcode_core::slug::slugify_title;

/// Composite workspace directory name: issue number, title slug, and a
/// millisecond timestamp so repeated runs for the same issue never collide.
pub fn workspace_dir_name(issue_number: u64, title: &str, now_unix_ms: u64) -> String {
    let slug = slugify_title(title);
    if slug.is_empty() {
        format!("issue-{issue_number}-{now_unix_ms}")
    } else {
        format!("issue-{issue_number}-{slug}-{now_unix_ms}")
    }
}

/// Creates a clean workspace directory under the root, destroying any
/// pre-existing directory at the same path first.
pub fn prepare_workspace(
    root: &Path,
    issue_number: u64,
    title: &str,
    now_unix_ms: u64,
) -> Result<PathBuf> {
    let dir = root.join(workspace_dir_name(issue_number, title, now_unix_ms));
    if dir.exists() {
        std::fs::remove_dir_all(&dir)
            .with_context(|| format!("failed to remove stale workspace {}", dir.display()))?;
    }
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create workspace {}", dir.display()))?;
    tracing::info!(workspace = %dir.display(), "created workspace");
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::{prepare_workspace, workspace_dir_name};

    #[test]
    fn unit_workspace_dir_name_combines_number_slug_and_timestamp() {
        assert_eq!(
            workspace_dir_name(42, "Add Dark Mode!", 1_700_000_000_000),
            "issue-42-add-dark-mode-1700000000000"
        );
    }

    #[test]
    fn unit_workspace_dir_name_omits_empty_slugs() {
        assert_eq!(
            workspace_dir_name(7, "???", 1_700_000_000_000),
            "issue-7-1700000000000"
        );
    }

    #[test]
    fn functional_workspace_names_differ_across_instants() {
        let first = workspace_dir_name(42, "Same title", 1_700_000_000_000);
        let second = workspace_dir_name(42, "Same title", 1_700_000_000_001);
        assert_ne!(first, second);
    }

    #[test]
    fn integration_prepare_workspace_replaces_existing_directory() {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = prepare_workspace(root.path(), 5, "retry me", 123).expect("first prepare");
        std::fs::write(dir.join("stale.txt"), "leftover").expect("write marker");

        let recreated = prepare_workspace(root.path(), 5, "retry me", 123).expect("second prepare");
        assert_eq!(dir, recreated);
        assert!(!recreated.join("stale.txt").exists());
    }
}
