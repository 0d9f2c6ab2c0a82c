//! Staged change collection from the index using git2.

use git2::{Delta, Diff, DiffDelta, DiffFindOptions, ErrorCode, Patch, Repository, Tree};
use tracing::{debug, warn};

use crate::commit::record::{ChangeSets, DiffRecord, MAX_RECORD_CHANGES};
use crate::error::GitError;

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found),
/// `Ok(Some(tree))` for repos with a valid HEAD, or `Err(GitError::DiffFailed)`
/// for real errors (corrupt HEAD, permission issues, missing objects).
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, GitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(GitError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(GitError::DiffFailed)?;
    Ok(Some(tree))
}

/// Collect one [`DiffRecord`] per staged file.
///
/// Diffs HEAD (or the empty tree before the first commit) against the index
/// with rename detection. Unstaged and untracked files are ignored.
pub fn collect_staged(repo: &Repository) -> Result<Vec<DiffRecord>, GitError> {
    let head_tree = resolve_head_tree(repo)?;

    let mut diff = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(GitError::DiffFailed)?;

    let mut find_opts = DiffFindOptions::new();
    find_opts.renames(true);
    diff.find_similar(Some(&mut find_opts))
        .map_err(GitError::DiffFailed)?;

    let sets = change_sets(&diff);

    let mut records = Vec::new();
    for (idx, delta) in diff.deltas().enumerate() {
        let Some(path) = delta_path(&delta) else {
            continue;
        };

        let (additions, deletions, changes) = match Patch::from_diff(&diff, idx) {
            Ok(Some(patch)) => patch_lines(&patch),
            // Binary files have no textual patch
            Ok(None) => (0, 0, Vec::new()),
            Err(e) => {
                warn!("Failed to read patch for {path}: {e}");
                (0, 0, Vec::new())
            }
        };

        let status = sets.classify(&path);
        records.push(DiffRecord::new(path, additions, deletions, changes, status));
    }

    if records.is_empty() {
        return Err(GitError::NothingStaged);
    }

    debug!("Collected {} staged files", records.len());
    Ok(records)
}

/// Build the added/deleted/renamed file lists reported by the diff.
fn change_sets(diff: &Diff<'_>) -> ChangeSets {
    let mut sets = ChangeSets::default();
    for delta in diff.deltas() {
        let Some(path) = delta_path(&delta) else {
            continue;
        };
        match delta.status() {
            Delta::Added => {
                sets.added.insert(path);
            }
            Delta::Deleted => {
                sets.deleted.insert(path);
            }
            Delta::Renamed => {
                sets.renamed.insert(path);
            }
            _ => {}
        }
    }
    sets
}

/// The path a delta is reported under: the new path, or the old one for deletions.
fn delta_path(delta: &DiffDelta<'_>) -> Option<String> {
    delta
        .new_file()
        .path()
        .or_else(|| delta.old_file().path())
        .map(|p| p.to_string_lossy().to_string())
        .filter(|p| !p.is_empty())
}

/// Count additions/deletions and keep the first non-blank changed lines.
fn patch_lines(patch: &Patch<'_>) -> (usize, usize, Vec<String>) {
    let (additions, deletions) = match patch.line_stats() {
        Ok((_context, additions, deletions)) => (additions, deletions),
        Err(e) => {
            warn!("Failed to count patch lines: {e}");
            (0, 0)
        }
    };

    let mut changes = Vec::new();
    'hunks: for hunk_idx in 0..patch.num_hunks() {
        let line_count = patch.num_lines_in_hunk(hunk_idx).unwrap_or(0);
        for line_idx in 0..line_count {
            if changes.len() >= MAX_RECORD_CHANGES {
                break 'hunks;
            }
            let Ok(line) = patch.line_in_hunk(hunk_idx, line_idx) else {
                continue;
            };
            let origin = line.origin();
            if origin != '+' && origin != '-' {
                continue;
            }
            let content = String::from_utf8_lossy(line.content());
            let content = content.trim();
            if !content.is_empty() {
                changes.push(format!("{origin}{content}"));
            }
        }
    }

    (additions, deletions, changes)
}
