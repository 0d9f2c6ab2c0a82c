//! Branch name and recent commit subjects, used as prompt context.

use git2::{ErrorCode, Repository, Sort};
use tracing::debug;

use crate::error::GitError;

/// Branch name used when HEAD is detached or unreadable.
pub const FALLBACK_BRANCH: &str = "main";

/// Short name of the checked-out branch.
///
/// On an unborn branch the name is read from the symbolic HEAD target.
/// Detached HEAD and other failures fall back to [`FALLBACK_BRANCH`].
pub fn current_branch(repo: &Repository) -> String {
    match repo.head() {
        Ok(head) if head.is_branch() => head
            .shorthand()
            .map(str::to_string)
            .unwrap_or_else(|| FALLBACK_BRANCH.to_string()),
        Ok(_) => FALLBACK_BRANCH.to_string(),
        Err(e) if e.code() == ErrorCode::UnbornBranch => repo
            .find_reference("HEAD")
            .ok()
            .and_then(|r| r.symbolic_target().map(str::to_string))
            .and_then(|target| target.strip_prefix("refs/heads/").map(str::to_string))
            .unwrap_or_else(|| FALLBACK_BRANCH.to_string()),
        Err(e) => {
            debug!("Could not read HEAD for branch name: {e}");
            FALLBACK_BRANCH.to_string()
        }
    }
}

/// Subject lines of the most recent commits reachable from HEAD, newest first.
///
/// Returns an empty list for a repository without commits.
pub fn recent_subjects(repo: &Repository, limit: usize) -> Result<Vec<String>, GitError> {
    let head_oid = match repo.head() {
        Ok(head) => match head.target() {
            Some(oid) => oid,
            None => return Ok(Vec::new()),
        },
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(Vec::new());
        }
        Err(e) => return Err(GitError::RevwalkError(e)),
    };

    let mut revwalk = repo.revwalk().map_err(GitError::RevwalkError)?;
    revwalk
        .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
        .map_err(GitError::RevwalkError)?;
    revwalk.push(head_oid).map_err(GitError::RevwalkError)?;

    let mut subjects = Vec::with_capacity(limit);
    for oid_result in revwalk.take(limit) {
        let oid = oid_result.map_err(GitError::RevwalkError)?;
        let commit = repo.find_commit(oid).map_err(GitError::RevwalkError)?;
        let subject = commit.summary().unwrap_or("").trim().to_string();
        if !subject.is_empty() {
            subjects.push(subject);
        }
    }

    Ok(subjects)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use git2::{Oid, Signature};

    use super::*;

    fn commit(repo: &Repository, repo_dir: &Path, message: &str) -> Oid {
        let file_path = repo_dir.join("test.txt");
        std::fs::write(&file_path, message).expect("failed to write test file");

        let mut index = repo.index().expect("failed to open index");
        index
            .add_path(Path::new("test.txt"))
            .expect("failed to add file");
        index.write().expect("failed to write index");

        let tree_id = index.write_tree().expect("failed to write tree");
        let tree = repo.find_tree(tree_id).expect("failed to find tree");
        let sig = Signature::now("Test User", "test@example.com").expect("failed to create sig");
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("failed to create commit")
    }

    #[test]
    fn test_recent_subjects_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        commit(&repo, dir.path(), "feat: first");
        commit(&repo, dir.path(), "fix: second\n\nWith a body.");
        commit(&repo, dir.path(), "docs: third");

        let subjects = recent_subjects(&repo, 5).unwrap();
        assert_eq!(subjects, vec!["docs: third", "fix: second", "feat: first"]);
    }

    #[test]
    fn test_recent_subjects_respects_limit() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        for i in 0..7 {
            commit(&repo, dir.path(), &format!("chore: commit {i}"));
        }

        let subjects = recent_subjects(&repo, 5).unwrap();
        assert_eq!(subjects.len(), 5);
        assert_eq!(subjects[0], "chore: commit 6");
    }

    #[test]
    fn test_recent_subjects_empty_repo() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        assert!(recent_subjects(&repo, 5).unwrap().is_empty());
    }

    #[test]
    fn test_current_branch_named() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let oid = commit(&repo, dir.path(), "init");
        let head_commit = repo.find_commit(oid).unwrap();
        repo.branch("feature/login", &head_commit, false).unwrap();
        repo.set_head("refs/heads/feature/login").unwrap();

        assert_eq!(current_branch(&repo), "feature/login");
    }

    #[test]
    fn test_current_branch_unborn_reads_symbolic_head() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        repo.set_head("refs/heads/trunk").unwrap();

        assert_eq!(current_branch(&repo), "trunk");
    }

    #[test]
    fn test_current_branch_detached_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let oid = commit(&repo, dir.path(), "init");
        repo.set_head_detached(oid).unwrap();

        assert_eq!(current_branch(&repo), FALLBACK_BRANCH);
    }
}
