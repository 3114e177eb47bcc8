//! Corpus → [`StyleProfile`] extraction.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::profile::{FormattingFlag, StructureStats, StyleProfile, ToneIndicators};
use super::ranking::Tally;
use super::text;
use crate::corpus::Post;
use crate::error::{Result, StyleError};

/// Words excluded from the vocabulary ranking.
const STOPWORDS: &[&str] = &[
    "about", "after", "again", "also", "because", "been", "before", "being", "could", "does",
    "doesn't", "don't", "each", "even", "every", "from", "have", "here", "i'm", "i've", "into",
    "it's", "just", "like", "many", "more", "most", "much", "only", "other", "over", "really",
    "should", "some", "such", "than", "that", "that's", "their", "them", "then", "there",
    "these", "they", "this", "those", "through", "very", "want", "were", "what", "when",
    "where", "which", "while", "will", "with", "would", "you're", "your",
];

const DIRECT_ADDRESS: &[&str] = &["you", "your", "you're"];
const FIRST_PERSON: &[&str] = &["i", "my", "we"];
const CTA_KEYWORDS: &[&str] = &["comment", "message", "reach out", "connect"];

static DM_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bdm\b").unwrap());

/// Minimum token count for a sentence to contribute a starter.
const MIN_STARTER_TOKENS: usize = 3;
const STARTER_TOKENS: usize = 4;
const MIN_VOCABULARY_LEN: usize = 4;

/// Sizes of the ranked profile fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionLimits {
    pub sentence_starters: usize,
    pub common_phrases: usize,
    pub vocabulary: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            sentence_starters: 15,
            common_phrases: 20,
            vocabulary: 20,
        }
    }
}

/// Computes style profiles from corpora.
#[derive(Debug, Clone, Default)]
pub struct PatternExtractor {
    limits: ExtractionLimits,
}

/// Running totals for [`StructureStats`].
#[derive(Default)]
struct StructureTotals {
    length: usize,
    sentences: usize,
    paragraphs: usize,
    line_breaks: usize,
    min_length: Option<usize>,
    max_length: usize,
}

impl PatternExtractor {
    pub fn new(limits: ExtractionLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ExtractionLimits {
        &self.limits
    }

    /// Extract a profile from `corpus`.
    ///
    /// Posts that are empty after trimming are skipped. Fails with
    /// [`StyleError::EmptyCorpus`] when no usable post remains.
    pub fn extract(&self, corpus: &[Post]) -> Result<StyleProfile> {
        let usable: Vec<&str> = corpus
            .iter()
            .filter(|post| post.is_usable())
            .map(|post| post.text.as_str())
            .collect();

        if usable.is_empty() {
            return Err(StyleError::EmptyCorpus);
        }

        let mut openings = Vec::with_capacity(usable.len());
        let mut starters = Tally::new();
        let mut phrases = Tally::new();
        let mut vocabulary = Tally::new();
        let mut flags: Vec<FormattingFlag> = Vec::new();
        let mut tone = ToneIndicators::default();
        let mut totals = StructureTotals::default();
        let mut ctas = Vec::new();

        for post_text in &usable {
            openings.push(text::first_sentence(post_text));

            let sentences = text::sentences(post_text);
            for sentence in &sentences {
                if let Some(starter) = sentence_starter(sentence) {
                    starters.add(starter);
                }
            }

            let tokens = text::word_tokens(post_text);
            tally_phrases(&mut phrases, &tokens);
            vocabulary.extend(
                tokens
                    .iter()
                    .filter(|t| t.chars().count() >= MIN_VOCABULARY_LEN)
                    .filter(|t| !STOPWORDS.contains(&t.as_str()))
                    .cloned(),
            );

            for flag in formatting_flags(post_text) {
                if !flags.contains(&flag) {
                    flags.push(flag);
                }
            }

            accumulate_tone(&mut tone, post_text, &tokens);

            let length = text::char_len(post_text);
            totals.length += length;
            totals.sentences += sentences.len();
            totals.paragraphs += text::paragraph_count(post_text);
            totals.line_breaks += text::line_break_count(post_text);
            totals.min_length = Some(totals.min_length.map_or(length, |m| m.min(length)));
            totals.max_length = totals.max_length.max(length);

            if let Some(cta) = call_to_action(post_text) {
                ctas.push(cta.to_string());
            }
        }

        let n = usable.len() as f64;
        let structure = StructureStats {
            avg_length: totals.length as f64 / n,
            avg_sentences: totals.sentences as f64 / n,
            avg_paragraphs: totals.paragraphs as f64 / n,
            avg_line_breaks: totals.line_breaks as f64 / n,
            min_length: totals.min_length.unwrap_or(0),
            max_length: totals.max_length,
        };

        log::debug!(
            "Extracted profile from {} of {} posts: {} starters, {} phrase candidates",
            usable.len(),
            corpus.len(),
            starters.len(),
            phrases.len()
        );

        Ok(StyleProfile {
            opening_patterns: openings,
            sentence_starters: starters.ranked(self.limits.sentence_starters),
            common_phrases: phrases.ranked(self.limits.common_phrases),
            formatting_flags: flags,
            tone_indicators: tone,
            structure,
            vocabulary: vocabulary
                .ranked(self.limits.vocabulary)
                .into_iter()
                .map(|item| item.text)
                .collect(),
            call_to_actions: ctas,
        })
    }
}

/// Extract a profile with the default limits.
pub fn extract(corpus: &[Post]) -> Result<StyleProfile> {
    PatternExtractor::default().extract(corpus)
}

/// Lowercased first four tokens of a sentence with at least three tokens.
fn sentence_starter(sentence: &str) -> Option<String> {
    let words: Vec<&str> = sentence.split_whitespace().collect();
    if words.len() < MIN_STARTER_TOKENS {
        return None;
    }
    let joined = words[..words.len().min(STARTER_TOKENS)].join(" ").to_lowercase();
    let starter = text::strip_trailing_punctuation(&joined);
    (!starter.is_empty()).then(|| starter.to_string())
}

/// Tally every contiguous 2- and 3-token window.
fn tally_phrases(phrases: &mut Tally, tokens: &[String]) {
    for i in 0..tokens.len() {
        for width in [2, 3] {
            if let Some(window) = tokens.get(i..i + width) {
                phrases.add(window.join(" "));
            }
        }
    }
}

fn formatting_flags(post_text: &str) -> Vec<FormattingFlag> {
    let mut flags = Vec::new();
    if post_text.contains("\n\n") {
        flags.push(FormattingFlag::UsesParagraphBreaks);
    }
    if text::has_bullet_lines(post_text) {
        flags.push(FormattingFlag::UsesBulletPoints);
    }
    if text::has_bold_text(post_text) {
        flags.push(FormattingFlag::UsesBoldText);
    }
    if text::has_italic_text(post_text) {
        flags.push(FormattingFlag::UsesItalicText);
    }
    flags
}

fn accumulate_tone(tone: &mut ToneIndicators, post_text: &str, tokens: &[String]) {
    let questions = post_text.matches('?').count();
    let exclamations = post_text.matches('!').count();
    tone.questions += questions;
    tone.exclamations += exclamations;
    if questions >= 2 {
        tone.questioning_posts += 1;
    }
    if exclamations >= 2 {
        tone.excited_posts += 1;
    }
    tone.direct_address += tokens
        .iter()
        .filter(|t| DIRECT_ADDRESS.contains(&t.as_str()))
        .count();
    tone.first_person += tokens
        .iter()
        .filter(|t| FIRST_PERSON.contains(&t.as_str()))
        .count();
}

/// Last non-empty line when it solicits engagement.
fn call_to_action(post_text: &str) -> Option<&str> {
    let line = text::last_line(post_text)?;
    let lowered = line.to_lowercase();
    let solicits = DM_WORD.is_match(line) || CTA_KEYWORDS.iter().any(|k| lowered.contains(k));
    solicits.then_some(line)
}
