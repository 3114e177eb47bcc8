//! Prompt construction for the external generator.
//!
//! - [`builder`] - turns context, style and profile into an [`Instruction`]
//! - [`thresholds`] - tone thresholds shared with the template fallback

pub mod builder;
pub mod thresholds;

pub use builder::{build, polish_prompt, Instruction, PromptBuilder, EXAMPLE_LIMIT};
pub use thresholds::ToneThresholds;

use crate::style::StyleTag;

/// Supplies literal example posts for a style.
///
/// Implementations return at most `limit` texts, already trimmed to a size
/// suitable for embedding in a prompt. Failures yield an empty list.
pub trait ExampleSource: Send + Sync {
    fn example_posts(&self, style: StyleTag, limit: usize) -> Vec<String>;
}

/// A source with no examples.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExamples;

impl ExampleSource for NoExamples {
    fn example_posts(&self, _style: StyleTag, _limit: usize) -> Vec<String> {
        Vec::new()
    }
}

impl ExampleSource for Vec<String> {
    fn example_posts(&self, _style: StyleTag, limit: usize) -> Vec<String> {
        self.iter().take(limit).cloned().collect()
    }
}
