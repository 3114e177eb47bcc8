//! Cleanup of raw generator output.
//!
//! Generators like to announce their answer ("Here's the post:") and wrap
//! it in quotes or markdown emphasis. [`sanitize`] removes those wrappers
//! from the start and ends of the text only; the body is left untouched.

use once_cell::sync::Lazy;
use regex::Regex;

static META_PREFIXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^here'?s? (?:the|a) (?:linkedin )?post:?\s*",
        r"(?i)^here (?:is|are) (?:the|a) (?:linkedin )?post:?\s*",
        r"(?i)^linkedin post:\s*",
        r"(?i)^\*\*linkedin post:?\*\*\s*",
        r"(?i)^post:\s*",
        r"(?i)^\*\*post:?\*\*\s*",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Strip meta preambles, one layer of enclosing quotes and boundary
/// `*`/`_` runs.
pub fn sanitize(raw: &str) -> String {
    let mut text = raw.trim().to_string();
    for pattern in META_PREFIXES.iter() {
        if let Some(m) = pattern.find(&text) {
            text = text[m.end()..].to_string();
        }
    }

    let mut text = text.trim();
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            text = text[1..text.len() - 1].trim();
        }
    }

    text.trim_matches('*').trim_matches('_').trim().to_string()
}
