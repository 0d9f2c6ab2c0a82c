//! Git operations using git2-rs.

pub mod apply;
pub mod history;
pub mod staged;

pub use apply::{commit_staged, push};
pub use history::{FALLBACK_BRANCH, current_branch, recent_subjects};
pub use staged::collect_staged;
