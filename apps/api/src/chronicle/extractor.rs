//! Response Extractor: isolates the JSON-looking part of a raw completion.
//!
//! Deliberately permissive: fences are removed by plain string replacement and
//! the payload is sliced between the first opening and the last closing
//! bracket. A literal `]` or `}` inside a string value after the real payload
//! can make the slice too long; the normalizer then fails to parse it and the
//! request falls back.

/// Top-level JSON kind the caller expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Array,
    Object,
}

impl JsonShape {
    fn brackets(self) -> (char, char) {
        match self {
            JsonShape::Array => ('[', ']'),
            JsonShape::Object => ('{', '}'),
        }
    }
}

/// Removes every ```` ```json ```` and ```` ``` ```` marker, then trims.
///
/// Also strips backtick runs that belong to the content itself.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Returns the bracketed substring for `shape`, or `None` when the completion
/// has no matching bracket pair.
pub fn extract_json(raw: &str, shape: JsonShape) -> Option<String> {
    let cleaned = strip_code_fences(raw.trim());
    let (open, close) = shape.brackets();

    let start = cleaned.find(open)?;
    let end = cleaned.rfind(close)?;
    if end <= start {
        return None;
    }

    Some(cleaned[start..=end].to_string())
}
