//! One round trip: records in, ranked suggestions out.

use tracing::debug;

use crate::commit::prompt::build_prompt;
use crate::commit::record::{DiffRecord, GenerationConfig};
use crate::commit::suggestion::{Suggestion, parse_outcome};
use crate::error::LlmError;
use crate::llm::LanguageModel;

/// Context gathered from the repository for a single generation.
pub struct GenerationInput<'a> {
    pub diffs: &'a [DiffRecord],
    pub recent_commits: &'a [String],
    pub branch: &'a str,
}

/// Build the prompt, make exactly one model call, and parse what comes back.
///
/// Only the model call can fail; unusable output yields an empty list.
pub async fn generate_suggestions(
    input: &GenerationInput<'_>,
    config: &GenerationConfig,
    model: &dyn LanguageModel,
) -> Result<Vec<Suggestion>, LlmError> {
    let prompt = build_prompt(input.diffs, config, input.recent_commits, input.branch);
    debug!(
        "Prompt: {} chars, {} files, {} recent commits",
        prompt.len(),
        input.diffs.len(),
        input.recent_commits.len()
    );

    let raw = model.generate(&prompt).await?;
    debug!("Raw response: {}", raw);

    let outcome = parse_outcome(&raw);
    debug!("Structured parse: {}", outcome.is_structured());
    Ok(outcome.into_suggestions())
}
