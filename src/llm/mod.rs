//! Language model access and response clean-up.

pub mod gemini;
pub mod json;

pub use gemini::{DEFAULT_BASE_URL, GeminiClient, LanguageModel};
pub use json::{json_objects, strip_code_fences};
