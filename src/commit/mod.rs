//! AI-suggested commit messages: prompt construction and response parsing.

pub mod generate;
pub mod kind;
pub mod prompt;
pub mod record;
pub mod suggestion;

pub use generate::{GenerationInput, generate_suggestions};
pub use kind::{CommitType, ConventionalSubject, parse_conventional};
pub use prompt::build_prompt;
pub use record::{ChangeSets, ChangeStatus, DiffRecord, GenerationConfig, MAX_RECORD_CHANGES};
pub use suggestion::{ParseOutcome, PartialSuggestion, Suggestion, parse_suggestions};
