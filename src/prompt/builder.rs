//! Generation prompt builder.
//!
//! With a profile the builder emits a full [`Instruction::Directive`]
//! carrying examples, structural targets, sample openings, phrases and tone
//! guidance. Without one it emits a one-line [`Instruction::Minimal`].

use crate::patterns::StyleProfile;
use crate::style::ResolvedStyle;

use super::thresholds::ToneThresholds;

/// Maximum example posts embedded in a directive.
pub const EXAMPLE_LIMIT: usize = 2;

const OPENING_LIMIT: usize = 2;
const OPENING_MAX_CHARS: usize = 100;
const PHRASE_LIMIT: usize = 5;

// ---------------------------------------------------------------------------
// Instruction
// ---------------------------------------------------------------------------

/// A prompt ready to send to a text generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Profile-driven prompt.
    Directive { prompt: String },
    /// Prompt used when no profile is available.
    Minimal { prompt: String },
}

impl Instruction {
    pub fn prompt(&self) -> &str {
        match self {
            Self::Directive { prompt } | Self::Minimal { prompt } => prompt,
        }
    }

    pub fn is_directive(&self) -> bool {
        matches!(self, Self::Directive { .. })
    }
}

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    thresholds: ToneThresholds,
}

impl PromptBuilder {
    pub fn new(thresholds: ToneThresholds) -> Self {
        Self { thresholds }
    }

    /// Build the generation prompt.
    ///
    /// `examples` are used as given, up to [`EXAMPLE_LIMIT`].
    pub fn build(
        &self,
        context: &str,
        style: &ResolvedStyle,
        profile: Option<&StyleProfile>,
        examples: &[String],
    ) -> Instruction {
        let Some(profile) = profile else {
            return Instruction::Minimal {
                prompt: format!(
                    "Write a detailed, flowing LinkedIn post about: {context}. \
                     Use natural paragraphs and full sentences."
                ),
            };
        };

        let mut prompt = format!(
            "You are a LinkedIn content writer. Your task is to write an authentic, engaging LinkedIn post.\n\n\
             CONTEXT/TOPIC: {context}\n\n\
             WRITING STYLE TO MATCH: \"{}\" ({})\n\n",
            style.label,
            style.tag.descriptor()
        );

        if !examples.is_empty() {
            prompt.push_str(
                "Here are REAL examples of posts in this exact style. \
                 Study the voice, tone, and structure:\n\n",
            );
            for (i, example) in examples.iter().take(EXAMPLE_LIMIT).enumerate() {
                prompt.push_str(&format!("EXAMPLE {}:\n{}\n\n", i + 1, example));
            }
        }

        let structure = &profile.structure;
        let sentences = structure.avg_sentences as usize;
        let paragraphs = structure.avg_paragraphs as usize;
        prompt.push_str(&format!(
            "\nYour post should be approximately {} characters with {}-{} sentences across {}-{} paragraphs.\n\n",
            structure.avg_length as usize,
            sentences,
            sentences + 5,
            paragraphs,
            paragraphs + 2
        ));

        if !profile.opening_patterns.is_empty() {
            prompt.push_str("Consider starting with a hook similar to these styles:\n");
            for opening in profile.opening_patterns.iter().take(OPENING_LIMIT) {
                prompt.push_str(&format!("- \"{}\"\n", shorten(opening, OPENING_MAX_CHARS)));
            }
            prompt.push('\n');
        }

        if profile.common_phrases.len() > PHRASE_LIMIT {
            let phrases: Vec<&str> = profile.phrases().take(PHRASE_LIMIT).collect();
            prompt.push_str(&format!(
                "Naturally incorporate phrases like: {}\n\n",
                phrases.join(", ")
            ));
        }

        let notes = self.thresholds.prompt_notes(&profile.tone_indicators);
        if !notes.is_empty() {
            prompt.push_str("Tone guidelines:\n");
            for note in notes {
                prompt.push_str(&format!("- {note}\n"));
            }
            prompt.push('\n');
        }

        prompt.push_str(&format!(
            "IMPORTANT INSTRUCTIONS:\n\
             - Write ONLY the LinkedIn post content itself (no titles, no labels, no \"Here's the post:\")\n\
             - Use full, flowing paragraphs with natural transitions\n\
             - Expand on \"{context}\" with specific details, examples, or personal insights\n\
             - Write like a real person sharing authentic thoughts, not a template or outline\n\
             - NO bullet points or numbered lists in the post body\n\
             - NO hashtags (they'll be added separately)\n\
             - Make it feel genuine and emotionally resonant\n\n\
             Now write the LinkedIn post:"
        ));

        Instruction::Directive { prompt }
    }
}

/// Build a prompt with default thresholds.
pub fn build(
    context: &str,
    style: &ResolvedStyle,
    profile: Option<&StyleProfile>,
    examples: &[String],
) -> Instruction {
    PromptBuilder::default().build(context, style, profile, examples)
}

/// Grammar-only second pass over a generated draft.
pub fn polish_prompt(draft: &str) -> String {
    format!(
        "You are a grammar checker. Fix ONLY grammar, spelling, and punctuation errors in this text.\n\n\
         DO NOT:\n\
         - Add new content\n\
         - Remove content\n\
         - Change the meaning\n\
         - Add explanations\n\
         - Add labels like \"Here's the corrected version:\"\n\n\
         DO:\n\
         - Fix spelling mistakes\n\
         - Fix grammar errors\n\
         - Fix punctuation\n\
         - Keep the exact same tone and style\n\n\
         Text to fix:\n{draft}\n\n\
         Output the corrected text only:"
    )
}

fn shorten(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{RankedItem, StructureStats, ToneIndicators};

    fn ranked(texts: &[&str]) -> Vec<RankedItem> {
        texts
            .iter()
            .map(|t| RankedItem {
                text: t.to_string(),
                count: 1,
            })
            .collect()
    }

    fn profile() -> StyleProfile {
        StyleProfile {
            opening_patterns: vec![
                "Hello world.".to_string(),
                "x".repeat(120),
                "Third opening.".to_string(),
            ],
            common_phrases: ranked(&["p1", "p2", "p3", "p4", "p5", "p6"]),
            tone_indicators: ToneIndicators {
                direct_address: 11,
                exclamations: 2,
                ..ToneIndicators::default()
            },
            structure: StructureStats {
                avg_length: 412.7,
                avg_sentences: 6.6,
                avg_paragraphs: 3.2,
                ..StructureStats::default()
            },
            ..StyleProfile::default()
        }
    }

    #[test]
    fn test_minimal_without_profile() {
        let style = ResolvedStyle::new("boardy");
        let instruction = build("remote work", &style, None, &[]);
        assert!(!instruction.is_directive());
        assert_eq!(
            instruction.prompt(),
            "Write a detailed, flowing LinkedIn post about: remote work. \
             Use natural paragraphs and full sentences."
        );
    }

    #[test]
    fn test_directive_contents() {
        let style = ResolvedStyle::new("serious");
        let examples = vec!["First example".to_string(), "Second".to_string(), "Third".to_string()];
        let instruction = build("quarterly planning", &style, Some(&profile()), &examples);
        let prompt = instruction.prompt();

        assert!(instruction.is_directive());
        assert!(prompt.contains("CONTEXT/TOPIC: quarterly planning"));
        assert!(prompt.contains("\"serious\" (professional, corporate jargon-heavy"));
        assert!(prompt.contains("EXAMPLE 1:\nFirst example"));
        assert!(prompt.contains("EXAMPLE 2:\nSecond"));
        assert!(!prompt.contains("EXAMPLE 3"));
        assert!(prompt.contains("approximately 412 characters with 6-11 sentences across 3-5 paragraphs"));
        assert!(prompt.contains("- \"Hello world.\""));
        assert!(prompt.contains(&format!("- \"{}...\"", "x".repeat(100))));
        assert!(!prompt.contains("Third opening."));
        assert!(prompt.contains("Naturally incorporate phrases like: p1, p2, p3, p4, p5\n"));
        assert!(prompt.contains("- Address the reader directly"));
        assert!(!prompt.contains("exclamation marks"));
        assert!(prompt.ends_with("Now write the LinkedIn post:"));
    }

    #[test]
    fn test_phrases_omitted_when_few() {
        let mut profile = profile();
        profile.common_phrases.truncate(5);
        let instruction = build("x", &ResolvedStyle::new("cluely"), Some(&profile), &[]);
        assert!(!instruction.prompt().contains("Naturally incorporate"));
        assert!(!instruction.prompt().contains("EXAMPLE 1"));
    }

    #[test]
    fn test_custom_thresholds() {
        let builder = PromptBuilder::new(ToneThresholds {
            exclamations: 1,
            ..ToneThresholds::default()
        });
        let instruction = builder.build("x", &ResolvedStyle::new("boardy"), Some(&profile()), &[]);
        assert!(instruction.prompt().contains("Use exclamation marks"));
    }

    #[test]
    fn test_polish_prompt_embeds_draft() {
        let prompt = polish_prompt("Draft text here");
        assert!(prompt.contains("Text to fix:\nDraft text here\n\nOutput the corrected text only:"));
    }
}
