//! Per-file diff records and the generation settings fed to the prompt builder.

use std::collections::HashSet;
use std::fmt;

/// Maximum change lines a single record carries, regardless of diff size.
pub const MAX_RECORD_CHANGES: usize = 10;

/// How a staged file was touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl ChangeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeStatus::Added => "added",
            ChangeStatus::Modified => "modified",
            ChangeStatus::Deleted => "deleted",
            ChangeStatus::Renamed => "renamed",
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One staged file, summarized for the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRecord {
    pub file: String,
    pub additions: usize,
    pub deletions: usize,
    changes: Vec<String>,
    pub status: ChangeStatus,
}

impl DiffRecord {
    /// Build a record, keeping at most [`MAX_RECORD_CHANGES`] change lines.
    pub fn new(
        file: impl Into<String>,
        additions: usize,
        deletions: usize,
        changes: impl IntoIterator<Item = String>,
        status: ChangeStatus,
    ) -> Self {
        Self {
            file: file.into(),
            additions,
            deletions,
            changes: changes.into_iter().take(MAX_RECORD_CHANGES).collect(),
            status,
        }
    }

    pub fn changes(&self) -> &[String] {
        &self.changes
    }
}

/// File lists reported by the diff walk, used to tag each path.
///
/// Lookup order is added, deleted, renamed; anything else is `Modified`.
#[derive(Debug, Default, Clone)]
pub struct ChangeSets {
    pub added: HashSet<String>,
    pub deleted: HashSet<String>,
    pub renamed: HashSet<String>,
}

impl ChangeSets {
    pub fn classify(&self, path: &str) -> ChangeStatus {
        if self.added.contains(path) {
            ChangeStatus::Added
        } else if self.deleted.contains(path) {
            ChangeStatus::Deleted
        } else if self.renamed.contains(path) {
            ChangeStatus::Renamed
        } else {
            ChangeStatus::Modified
        }
    }
}

/// Settings that shape the requirements section of the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub use_conventional_format: bool,
    pub max_message_length: usize,
    pub include_body: bool,
    pub extra_instructions: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            use_conventional_format: true,
            max_message_length: 72,
            include_body: false,
            extra_instructions: None,
        }
    }
}
