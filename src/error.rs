//! Error types for quill modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading repository state.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository (or any parent): {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to collect diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Failed to walk commit history: {0}")]
    RevwalkError(#[source] git2::Error),

    #[error("No staged changes. Stage files with 'git add' first.")]
    NothingStaged,
}

/// Errors from creating or publishing a commit.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Commit message is empty")]
    EmptyMessage,

    #[error("Failed to write tree from index: {0}")]
    WriteTree(#[source] git2::Error),

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("Git config error (missing user.name or user.email): {0}")]
    ConfigError(#[source] git2::Error),

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git push failed: {0}")]
    PushFailed(String),
}

/// Errors from the JSON configuration store.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine a config directory for this platform")]
    NoConfigDir,

    #[error("Failed to read config {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for '{key}': {reason}")]
    Invalid { key: String, reason: String },

    #[error(
        "Unknown config key '{0}'. Known keys: apiKey, model, useConventionalFormat, maxMessageLength, includeBody, extraInstructions, autoPush"
    )]
    UnknownKey(String),

    #[error(
        "No Gemini API key configured. Set GEMINI_API_KEY or run 'quill config set apiKey <key>'"
    )]
    MissingApiKey,
}

/// Errors from the Generative Language API.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Request to Gemini failed: {0}")]
    RequestFailed(#[source] reqwest::Error),

    #[error("Gemini request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Gemini API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Gemini returned an unreadable response: {0}")]
    InvalidResponse(String),

    #[error("Gemini response contained no text")]
    EmptyResponse,
}
