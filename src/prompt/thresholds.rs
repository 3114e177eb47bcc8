//! Tone thresholds.
//!
//! Tone counts in a profile are raw totals over the corpus, so a threshold
//! is crossed when a signal is frequent in absolute terms. The prompt
//! builder and the template fallback read the same struct.

use serde::{Deserialize, Serialize};

use crate::patterns::ToneIndicators;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneThresholds {
    /// Second-person count above which the reader is addressed directly.
    pub direct_address: usize,
    /// First-person count above which the post is written as "I"/"we".
    pub first_person: usize,
    /// Question count above which questions are encouraged.
    pub questions: usize,
    /// Exclamation count above which exclamations are encouraged.
    pub exclamations: usize,
    /// Template paragraph three switches to direct address above this.
    pub template_direct_address: usize,
    /// Template closing becomes a question above this.
    pub template_question_closing: usize,
}

impl Default for ToneThresholds {
    fn default() -> Self {
        Self {
            direct_address: 10,
            first_person: 10,
            questions: 5,
            exclamations: 5,
            template_direct_address: 20,
            template_question_closing: 10,
        }
    }
}

impl ToneThresholds {
    /// Tone directives for a generation prompt, in fixed order.
    pub fn prompt_notes(&self, tone: &ToneIndicators) -> Vec<&'static str> {
        let mut notes = Vec::new();
        if tone.direct_address > self.direct_address {
            notes.push("Address the reader directly using 'you' and 'your'");
        }
        if tone.first_person > self.first_person {
            notes.push("Write in first person (I, my, we) to make it personal");
        }
        if tone.questions > self.questions {
            notes.push("Include thought-provoking questions");
        }
        if tone.exclamations > self.exclamations {
            notes.push("Use exclamation marks for emphasis and energy");
        }
        notes
    }
}
