//! Reasoning trace extraction from method output.

use std::sync::OnceLock;

use regex::Regex;

/// Marker opening an embedded reasoning trace.
pub const REASONING_START: &str = "===REASONING_TRACE_START===";

/// Marker closing an embedded reasoning trace.
pub const REASONING_END: &str = "===REASONING_TRACE_END===";

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new("(?s)===REASONING_TRACE_START===(.*?)===REASONING_TRACE_END===")
            .expect("reasoning marker pattern is valid")
    })
}

/// A reasoning trace split out of a method's string output.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Extraction {
    clean_text: String,
    reasoning: String,
}

impl Extraction {
    /// Returns the output with the reasoning block removed.
    #[must_use]
    pub fn clean_text(&self) -> &str {
        &self.clean_text
    }

    /// Returns the trimmed reasoning trace.
    #[must_use]
    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }
}

/// Splits the first reasoning block out of `text`.
///
/// Returns `None` when no complete marker pair exists or the enclosed
/// reasoning is blank, in which case callers must pass the output through
/// untouched. Only the first block is extracted; later markers stay in the
/// clean text.
#[must_use]
pub fn extract_reasoning(text: &str) -> Option<Extraction> {
    let captures = pattern().captures(text)?;
    let whole = captures.get(0)?;
    let reasoning = captures.get(1)?.as_str().trim();
    if reasoning.is_empty() {
        return None;
    }
    let clean_text = format!("{}{}", &text[..whole.start()], &text[whole.end()..])
        .trim()
        .to_owned();
    Some(Extraction {
        clean_text,
        reasoning: reasoning.to_owned(),
    })
}
