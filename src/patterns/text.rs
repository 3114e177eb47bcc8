//! Text segmentation helpers shared by the extractor and the template path.

use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());
static OPENING_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"([.!?]+)(?:\s|$)").unwrap());
static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{Alphabetic}\p{N}]+(?:'[\p{Alphabetic}\p{N}]+)*").unwrap());
static BULLET_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*[-•➢→]").unwrap());
static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+").unwrap());

/// Mathematical bold and sans-serif bold (incl. bold italic) letter blocks.
const BOLD_RANGES: &[(u32, u32)] = &[
    (0x1D400, 0x1D433),
    (0x1D468, 0x1D49B),
    (0x1D5D4, 0x1D607),
    (0x1D63C, 0x1D66F),
];

/// Mathematical italic and sans-serif italic letter blocks.
const ITALIC_RANGES: &[(u32, u32)] = &[(0x1D434, 0x1D467), (0x1D608, 0x1D63B)];

/// Split text into sentences on runs of `.`, `!` and `?`.
///
/// Consecutive boundaries coalesce and empty fragments are dropped.
pub fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_BOUNDARY
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// First sentence of a post, never extending past the first non-empty line.
///
/// The terminating punctuation is kept. Text without a sentence boundary
/// yields the whole first line.
pub fn first_sentence(text: &str) -> String {
    let first_line = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();

    match OPENING_END.captures(first_line).and_then(|caps| caps.get(1)) {
        Some(punct) => first_line[..punct.end()].to_string(),
        None => first_line.to_string(),
    }
}

/// Lowercased word tokens: alphanumeric runs, keeping inner apostrophes.
pub fn word_tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase().replace('\u{2019}', "'");
    WORD.find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Strip trailing non-alphanumeric characters.
pub fn strip_trailing_punctuation(s: &str) -> &str {
    s.trim_end_matches(|c: char| !c.is_alphanumeric())
}

/// Number of paragraphs: double line breaks plus one.
pub fn paragraph_count(text: &str) -> usize {
    text.matches("\n\n").count() + 1
}

pub fn line_break_count(text: &str) -> usize {
    text.matches('\n').count()
}

/// Length in Unicode scalar values.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Last non-empty line, trimmed.
pub fn last_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).last()
}

pub fn has_bullet_lines(text: &str) -> bool {
    BULLET_LINE.is_match(text)
}

pub fn has_bold_text(text: &str) -> bool {
    contains_in_ranges(text, BOLD_RANGES)
}

pub fn has_italic_text(text: &str) -> bool {
    contains_in_ranges(text, ITALIC_RANGES)
}

fn contains_in_ranges(text: &str, ranges: &[(u32, u32)]) -> bool {
    text.chars().any(|c| {
        let cp = c as u32;
        ranges.iter().any(|(lo, hi)| (*lo..=*hi).contains(&cp))
    })
}

/// Pictographic characters counted as emoji.
///
/// Skin-tone modifiers are part of the emoji they follow and are not
/// counted on their own.
pub fn is_emoji(c: char) -> bool {
    let cp = c as u32;
    if (0x1F3FB..=0x1F3FF).contains(&cp) {
        return false;
    }
    (0x1F300..=0x1FAFF).contains(&cp) || (0x2600..=0x27BF).contains(&cp)
}

pub fn hashtags(text: &str) -> impl Iterator<Item = &str> {
    HASHTAG.find_iter(text).map(|m| m.as_str())
}
