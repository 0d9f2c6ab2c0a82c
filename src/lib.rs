//! quill - A CLI tool that proposes commit messages for staged changes.
//!
//! # Overview
//!
//! quill summarizes the staged diff into a bounded prompt, asks Gemini for
//! three ranked commit messages, recovers them from whatever text comes back,
//! and lets the user pick, edit, or auto-apply one.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod ui;

// Re-export commonly used types
pub use commit::{
    ChangeStatus, DiffRecord, GenerationConfig, Suggestion, build_prompt, parse_suggestions,
};
pub use config::Config;
pub use error::{CommitError, ConfigError, GitError, LlmError};
pub use llm::{GeminiClient, LanguageModel};
