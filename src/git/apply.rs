//! Committing the staged index and pushing the result.

use std::path::Path;
use std::process::Command;

use git2::{ErrorCode, Oid, Repository};
use tracing::debug;

use crate::error::CommitError;

/// Create a commit from the index exactly as staged.
///
/// Nothing is added to the index first. Works for the first commit of a
/// repository (no parent) as well as on an existing branch.
pub fn commit_staged(repo: &Repository, message: &str) -> Result<Oid, CommitError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(CommitError::EmptyMessage);
    }

    let mut index = repo.index().map_err(CommitError::WriteTree)?;
    let tree_id = index.write_tree().map_err(CommitError::WriteTree)?;
    let tree = repo.find_tree(tree_id).map_err(CommitError::CommitFailed)?;

    let sig = repo.signature().map_err(CommitError::ConfigError)?;

    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit().map_err(CommitError::CommitFailed)?),
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => None,
        Err(e) => return Err(CommitError::CommitFailed(e)),
    };
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    let oid = repo
        .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .map_err(CommitError::CommitFailed)?;

    debug!("Created commit {oid}");
    Ok(oid)
}

/// Push the current branch with the system `git`, inheriting the user's
/// remotes, SSH agent, and credential store.
pub fn push(workdir: &Path) -> Result<(), CommitError> {
    run_git(workdir, &["push"], "push")
}

/// Run a git command in `workdir`; a non-zero exit carries git's stderr.
fn run_git(workdir: &Path, args: &[&str], operation: &str) -> Result<(), CommitError> {
    let output = Command::new("git")
        .arg("-C")
        .arg(workdir)
        .args(args)
        .output()
        .map_err(|source| CommitError::SpawnFailed {
            operation: operation.to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CommitError::PushFailed(stderr.trim().to_string()));
    }

    Ok(())
}
