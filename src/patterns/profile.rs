//! Style profile value types.
//!
//! A [`StyleProfile`] is derived data: a pure function of a corpus and its
//! ordering. It is never mutated after extraction, which makes it safe to
//! share behind an `Arc` across requests.

use serde::{Deserialize, Serialize};

/// A ranked string with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedItem {
    pub text: String,
    pub count: usize,
}

/// Structural formatting signals observed in the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormattingFlag {
    UsesParagraphBreaks,
    UsesBulletPoints,
    UsesBoldText,
    UsesItalicText,
}

impl FormattingFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UsesParagraphBreaks => "uses_paragraph_breaks",
            Self::UsesBulletPoints => "uses_bullet_points",
            Self::UsesBoldText => "uses_bold_text",
            Self::UsesItalicText => "uses_italic_text",
        }
    }
}

/// Raw tone counts aggregated over the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneIndicators {
    /// Total `?` characters.
    pub questions: usize,
    /// Total `!` characters.
    pub exclamations: usize,
    /// Second-person tokens (`you`, `your`, `you're`).
    pub direct_address: usize,
    /// First-person tokens (`i`, `my`, `we`).
    pub first_person: usize,
    /// Posts containing at least two `?`.
    pub questioning_posts: usize,
    /// Posts containing at least two `!`.
    pub excited_posts: usize,
}

/// Aggregate structural statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureStats {
    pub avg_length: f64,
    pub avg_sentences: f64,
    pub avg_paragraphs: f64,
    pub avg_line_breaks: f64,
    pub min_length: usize,
    pub max_length: usize,
}

/// Quantified style fingerprint of one corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleProfile {
    /// Literal first sentences, one per post, not deduplicated.
    pub opening_patterns: Vec<String>,
    pub sentence_starters: Vec<RankedItem>,
    pub common_phrases: Vec<RankedItem>,
    pub formatting_flags: Vec<FormattingFlag>,
    pub tone_indicators: ToneIndicators,
    pub structure: StructureStats,
    /// Top content words, most frequent first.
    pub vocabulary: Vec<String>,
    /// Verbatim closing lines that solicit engagement.
    pub call_to_actions: Vec<String>,
}

impl StyleProfile {
    /// Phrase strings in rank order.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.common_phrases.iter().map(|p| p.text.as_str())
    }

    pub fn has_flag(&self, flag: FormattingFlag) -> bool {
        self.formatting_flags.contains(&flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_json_keys_are_stable() {
        let profile = StyleProfile {
            opening_patterns: vec!["Hello world.".to_string()],
            formatting_flags: vec![FormattingFlag::UsesBulletPoints],
            ..StyleProfile::default()
        };
        let value = serde_json::to_value(&profile).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for key in [
            "opening_patterns",
            "sentence_starters",
            "common_phrases",
            "formatting_flags",
            "tone_indicators",
            "structure",
            "vocabulary",
            "call_to_actions",
        ] {
            assert!(keys.contains(&key), "missing key {key}");
        }
        assert_eq!(keys.len(), 8);
        assert_eq!(value["formatting_flags"][0], "uses_bullet_points");
    }

    #[test]
    fn test_partial_profile_deserializes() {
        let profile: StyleProfile =
            serde_json::from_str(r#"{"opening_patterns": ["Hi."], "tone_indicators": {"questions": 3}}"#)
                .unwrap();
        assert_eq!(profile.opening_patterns, vec!["Hi."]);
        assert_eq!(profile.tone_indicators.questions, 3);
        assert!(profile.common_phrases.is_empty());
    }

    #[test]
    fn test_phrases_and_flags() {
        let profile = StyleProfile {
            common_phrases: vec![RankedItem {
                text: "the future".to_string(),
                count: 4,
            }],
            formatting_flags: vec![FormattingFlag::UsesParagraphBreaks],
            ..StyleProfile::default()
        };
        assert_eq!(profile.phrases().collect::<Vec<_>>(), vec!["the future"]);
        assert!(profile.has_flag(FormattingFlag::UsesParagraphBreaks));
        assert!(!profile.has_flag(FormattingFlag::UsesBoldText));
    }
}
