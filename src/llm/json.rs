//! JSON extraction utilities for LLM responses.
//!
//! Models often return JSON wrapped in markdown code blocks or surrounded by
//! conversational text. These helpers recover the payload while handling
//! nested braces and string escaping correctly.

use serde_json::Value;

/// Remove a markdown code fence around a payload.
///
/// Handles ` ```json ` and bare ` ``` ` fences (any info string on the opening
/// line). Text without a complete fence is returned trimmed.
pub fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();

    let Some(start) = trimmed.find("```") else {
        return trimmed;
    };
    let after_open = &trimmed[start + 3..];
    let Some(end) = after_open.find("```") else {
        return trimmed;
    };

    let inner = &after_open[..end];
    // Drop the info string ("json", "JSON", ...) when the fence opens on its own line.
    let inner = match inner.find('\n') {
        Some(nl) if !inner[..nl].contains('{') => &inner[nl + 1..],
        _ => inner.strip_prefix("json").unwrap_or(inner),
    };
    inner.trim()
}

/// Every JSON object embedded in an LLM response, in order of appearance.
///
/// The response is unfenced first. Each `{` is tried as the start of an
/// object; a successful parse resumes scanning after that object, so objects
/// nested inside an earlier match are not reported separately. Trailing prose
/// after an object is tolerated.
pub fn json_objects(response: &str) -> Vec<Value> {
    let text = strip_code_fences(response);

    let mut objects = Vec::new();
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        match parse_object_at(&text[start..]) {
            Some((value, len)) => {
                objects.push(value);
                search_from = start + len;
            }
            None => search_from = start + 1,
        }
    }

    objects
}

/// Parse the object that starts at the beginning of `text`, returning it with
/// the number of bytes it spans.
fn parse_object_at(text: &str) -> Option<(Value, usize)> {
    let mut stream = serde_json::Deserializer::from_str(text).into_iter::<Value>();
    match stream.next() {
        Some(Ok(value)) if value.is_object() => Some((value, stream.byte_offset())),
        _ => None,
    }
}
