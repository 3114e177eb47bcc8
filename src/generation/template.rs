//! Deterministic-shape fallback post composer.
//!
//! Used whenever the external generator is missing, fails or returns too
//! little. Structure is fixed (opening, three short paragraphs, closing);
//! only the opening and the featured phrase are sampled.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::patterns::StyleProfile;
use crate::prompt::ToneThresholds;

/// Openings longer than this are cut to their first two sentences.
const OPENING_MAX_CHARS: usize = 150;
/// Phrase sampling looks at the top entries only.
const PHRASE_POOL: usize = 5;

/// Composes posts from a profile without any external call.
#[derive(Debug, Clone, Default)]
pub struct TemplateComposer {
    thresholds: ToneThresholds,
}

impl TemplateComposer {
    pub fn new(thresholds: ToneThresholds) -> Self {
        Self { thresholds }
    }

    pub fn compose<R: Rng + ?Sized>(
        &self,
        context: &str,
        profile: Option<&StyleProfile>,
        rng: &mut R,
    ) -> String {
        match profile {
            Some(profile) => self.compose_from_profile(context, profile, rng),
            None => default_post(context),
        }
    }

    fn compose_from_profile<R: Rng + ?Sized>(
        &self,
        context: &str,
        profile: &StyleProfile,
        rng: &mut R,
    ) -> String {
        let tone = &profile.tone_indicators;
        let t = &self.thresholds;

        let opening = match profile.opening_patterns.choose(rng) {
            Some(opening) => shorten_opening(opening),
            None => format!("Let's talk about {context}"),
        };

        let mut paragraphs = Vec::with_capacity(3);

        let mut first = format!("{context} has been on my mind recently.");
        if tone.first_person > t.first_person {
            first.push_str(
                " I've realized that the way we approach this can make all the difference in our outcomes.",
            );
        } else {
            first.push_str(" It's something that affects more of us than we might think.");
        }
        paragraphs.push(first);

        if profile.common_phrases.len() > PHRASE_POOL {
            if let Some(phrase) = profile.common_phrases[..PHRASE_POOL].choose(rng) {
                let mut second = format!(
                    "Here's what I've learned: {} isn't just a nice idea - it's essential. ",
                    phrase.text
                );
                if tone.questions > t.questions {
                    second.push_str(
                        "What happens when we ignore this? We miss opportunities that could transform everything.",
                    );
                } else {
                    second.push_str("When we truly understand this, our entire perspective shifts.");
                }
                paragraphs.push(second);
            }
        }

        let third = if tone.direct_address > t.template_direct_address {
            format!(
                "If you're working on {context}, you know how challenging it can be. \
                 But that challenge is exactly what makes the breakthrough so rewarding."
            )
        } else {
            format!(
                "The journey with {context} continues to surprise and teach. \
                 Every step forward reveals new insights worth sharing."
            )
        };
        paragraphs.push(third);

        let closing = if tone.questions > t.template_question_closing {
            format!("What's your experience with this? How has {context} impacted your work?")
        } else {
            "Looking forward to hearing different perspectives on this.".to_string()
        };

        format!("{opening}\n\n{}\n\n{closing}", paragraphs.join("\n\n"))
    }
}

/// Reflective post used when no profile exists for the style.
pub fn default_post(context: &str) -> String {
    format!(
        "I've been reflecting on {context} lately, and it's shifted my perspective in unexpected ways.\n\n\
         It's easy to overlook the impact this has on how we approach our daily work, but the more I dive into it, \
         the more I realize how fundamental it is.\n\n\
         The real breakthrough comes when you stop treating it as just another task and start seeing it as an \
         opportunity to grow.\n\n\
         What's your experience with this? I'd love to hear your thoughts."
    )
}

fn shorten_opening(opening: &str) -> String {
    if opening.chars().count() <= OPENING_MAX_CHARS {
        return opening.to_string();
    }
    let sentences: Vec<&str> = opening.split('.').take(2).map(str::trim).collect();
    format!("{}.", sentences.join(". "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{RankedItem, ToneIndicators};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn phrases(n: usize) -> Vec<RankedItem> {
        (0..n)
            .map(|i| RankedItem {
                text: format!("phrase {i}"),
                count: n - i,
            })
            .collect()
    }

    #[test]
    fn test_single_opening_leads_post() {
        let profile = StyleProfile {
            opening_patterns: vec!["Hello world.".to_string()],
            ..StyleProfile::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        let post = TemplateComposer::default().compose("remote work", Some(&profile), &mut rng);
        assert!(post.starts_with("Hello world.\n\n"));
        assert!(post.contains("remote work has been on my mind recently. It's something"));
        assert!(post.contains("The journey with remote work continues"));
        assert!(post.ends_with("Looking forward to hearing different perspectives on this."));
        assert!(!post.contains("Here's what I've learned"));
    }

    #[test]
    fn test_empty_openings_use_context() {
        let mut rng = StdRng::seed_from_u64(0);
        let post = TemplateComposer::default().compose("AI", Some(&StyleProfile::default()), &mut rng);
        assert!(post.starts_with("Let's talk about AI\n\n"));
    }

    #[test]
    fn test_tone_variants() {
        let profile = StyleProfile {
            opening_patterns: vec!["Start.".to_string()],
            common_phrases: phrases(8),
            tone_indicators: ToneIndicators {
                first_person: 11,
                questions: 11,
                direct_address: 21,
                ..ToneIndicators::default()
            },
            ..StyleProfile::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        let post = TemplateComposer::default().compose("hiring", Some(&profile), &mut rng);

        assert!(post.contains("I've realized that the way we approach this"));
        assert!(post.contains("What happens when we ignore this?"));
        assert!(post.contains("If you're working on hiring, you know"));
        assert!(post.ends_with("How has hiring impacted your work?"));

        let featured = (0..5).any(|i| post.contains(&format!("phrase {i} isn't just a nice idea")));
        assert!(featured);
        assert!(!post.contains("phrase 5 isn't"));
    }

    #[test]
    fn test_long_opening_is_cut_to_two_sentences() {
        let long = format!("First part. Second part. {}", "x".repeat(160));
        assert_eq!(shorten_opening(&long), "First part. Second part.");
        assert_eq!(shorten_opening("Short one."), "Short one.");
    }

    #[test]
    fn test_no_profile_uses_default_post() {
        let mut rng = StdRng::seed_from_u64(0);
        let post = TemplateComposer::default().compose("mentorship", None, &mut rng);
        assert_eq!(post, default_post("mentorship"));
        assert!(post.starts_with("I've been reflecting on mentorship lately"));
        assert!(post.ends_with("I'd love to hear your thoughts."));
    }
}
