//! Recovering ranked commit message suggestions from raw model output.
//!
//! Parsing is two-tiered. The structured tier reads the JSON payload the
//! prompt asks for; when that fails, the heuristic tier salvages
//! `type: description`-looking lines from whatever text came back. Neither
//! tier returns an error: the worst case is an empty list.

use serde_json::Value;
use tracing::{debug, warn};

use crate::llm::json_objects;

/// Confidence assigned when the model omits one.
pub const DEFAULT_CONFIDENCE: u8 = 50;

/// Rationale assigned when the model omits one.
pub const DEFAULT_RATIONALE: &str = "No reasoning provided";

/// Confidence assigned to every line salvaged by the heuristic tier.
pub const HEURISTIC_CONFIDENCE: u8 = 70;

/// Rationale assigned to every line salvaged by the heuristic tier.
pub const HEURISTIC_RATIONALE: &str = "Extracted from AI response";

/// Most suggestions the heuristic tier keeps.
pub const MAX_HEURISTIC_SUGGESTIONS: usize = 3;

/// A commit message proposed by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub message: String,
    /// 0 to 100.
    pub confidence: u8,
    pub rationale: String,
}

/// One entry of the `suggestions` array as the model wrote it.
///
/// Every field is optional; [`PartialSuggestion::into_suggestion`] fills gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialSuggestion {
    pub message: Option<String>,
    pub confidence: Option<f64>,
    pub reasoning: Option<String>,
}

impl PartialSuggestion {
    /// Read whatever usable fields an array element carries.
    ///
    /// Non-string messages and reasonings are treated as missing. Confidence
    /// may be a number or a numeric string such as `"90"` or `"90%"`. An
    /// element that is not an object yields no fields at all.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        let confidence = match value.get("confidence") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
            _ => None,
        };

        Self {
            message: text("message"),
            confidence,
            reasoning: text("reasoning"),
        }
    }

    /// Merge with the documented defaults.
    pub fn into_suggestion(self) -> Suggestion {
        Suggestion {
            message: self.message.unwrap_or_default(),
            confidence: self
                .confidence
                .filter(|c| c.is_finite())
                .map(|c| c.round().clamp(0.0, 100.0) as u8)
                .unwrap_or(DEFAULT_CONFIDENCE),
            rationale: self
                .reasoning
                .unwrap_or_else(|| DEFAULT_RATIONALE.to_string()),
        }
    }
}

/// Which tier produced the suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Read from the JSON payload. Not capped.
    Structured(Vec<Suggestion>),
    /// Salvaged line by line. At most [`MAX_HEURISTIC_SUGGESTIONS`].
    Heuristic(Vec<Suggestion>),
}

impl ParseOutcome {
    pub fn into_suggestions(self) -> Vec<Suggestion> {
        match self {
            ParseOutcome::Structured(s) | ParseOutcome::Heuristic(s) => s,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ParseOutcome::Structured(_))
    }
}

/// Parse raw model output into a ranked list of suggestions.
///
/// Order is the model's; nothing is re-sorted or deduplicated.
pub fn parse_suggestions(raw: &str) -> Vec<Suggestion> {
    parse_outcome(raw).into_suggestions()
}

/// Run the structured tier, falling back to the heuristic tier.
pub fn parse_outcome(raw: &str) -> ParseOutcome {
    match parse_structured(raw) {
        Some(suggestions) => {
            debug!("Parsed {} suggestions from JSON payload", suggestions.len());
            ParseOutcome::Structured(suggestions)
        }
        None => {
            let suggestions = parse_heuristic(raw);
            if !raw.trim().is_empty() {
                warn!(
                    "Model response was not a suggestions payload; salvaged {} lines",
                    suggestions.len()
                );
            }
            ParseOutcome::Heuristic(suggestions)
        }
    }
}

/// Structured tier: `None` unless the text holds an object whose
/// `suggestions` field is an array.
///
/// Objects are tried in order of appearance, so an unrelated object ahead of
/// the payload does not hide it. Elements are mapped leniently; one odd entry
/// never discards the rest.
pub fn parse_structured(raw: &str) -> Option<Vec<Suggestion>> {
    let Some(items) = json_objects(raw)
        .into_iter()
        .find_map(|mut object| match object.get_mut("suggestions").map(Value::take) {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        })
    else {
        debug!("No object with a suggestions array in response");
        return None;
    };

    Some(
        items
            .iter()
            .map(|item| PartialSuggestion::from_value(item).into_suggestion())
            .collect(),
    )
}

/// Heuristic tier: keep non-blank lines containing `:` that do not start
/// with a brace, up to [`MAX_HEURISTIC_SUGGESTIONS`].
pub fn parse_heuristic(raw: &str) -> Vec<Suggestion> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| line.contains(':') && !line.starts_with('{') && !line.starts_with('}'))
        .take(MAX_HEURISTIC_SUGGESTIONS)
        .map(|line| Suggestion {
            message: line.to_string(),
            confidence: HEURISTIC_CONFIDENCE,
            rationale: HEURISTIC_RATIONALE.to_string(),
        })
        .collect()
}
