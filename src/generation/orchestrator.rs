//! Post synthesis.
//!
//! ```text
//! START -> ATTEMPT_EXTERNAL -> SANITIZE_SUCCESS (-> POLISH) -> INJECT_CTA -> DONE
//!                          \-> FALLBACK_TEMPLATE ------------/
//! ```
//!
//! The external path is abandoned when no generator is configured, when the
//! call fails or times out, or when the sanitized text is shorter than
//! [`MIN_EXTERNAL_CHARS`]. Generator errors are logged and absorbed; the
//! only error a caller sees is an empty context.

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cta::inject_cta;
use super::sanitize::sanitize;
use super::template::TemplateComposer;
use crate::config::SynthConfig;
use crate::corpus::CorpusLoader;
use crate::error::{Result, StyleError};
use crate::llms::{GeminiGenerator, TextGenerator};
use crate::patterns::StyleProfile;
use crate::profiles::{NoProfiles, ProfileCache, ProfileSource, ProfileStore};
use crate::prompt::{
    polish_prompt, ExampleSource, Instruction, NoExamples, PromptBuilder, ToneThresholds,
    EXAMPLE_LIMIT,
};
use crate::style::{ResolvedStyle, StyleTag};

/// Sanitized external output shorter than this is discarded.
pub const MIN_EXTERNAL_CHARS: usize = 50;

pub const PLATFORM: &str = "LinkedIn";

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Which path produced the final text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorUsed {
    External,
    Template,
}

/// A finished post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPost {
    pub full_text: String,
    /// The style label exactly as the caller supplied it (trimmed).
    pub style: String,
    pub generator_used: GeneratorUsed,
    /// Whether a style profile informed the output.
    pub used_profile: bool,
    pub context: String,
    pub platform: String,
}

// ---------------------------------------------------------------------------
// Synthesizer
// ---------------------------------------------------------------------------

/// Coordinates prompt building, the external generator and the template
/// fallback.
#[derive(Clone)]
pub struct Synthesizer {
    generator: Option<Arc<dyn TextGenerator>>,
    profiles: Arc<dyn ProfileSource>,
    examples: Arc<dyn ExampleSource>,
    prompts: PromptBuilder,
    templates: TemplateComposer,
    polish: bool,
}

impl std::fmt::Debug for Synthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synthesizer")
            .field("generator", &self.generator.as_ref().map(|g| g.name()))
            .field("polish", &self.polish)
            .finish_non_exhaustive()
    }
}

impl Synthesizer {
    /// A synthesizer without stored profiles or example posts.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            generator,
            profiles: Arc::new(NoProfiles),
            examples: Arc::new(NoExamples),
            prompts: PromptBuilder::default(),
            templates: TemplateComposer::default(),
            polish: true,
        }
    }

    /// Wire Gemini, the on-disk profile store and the corpus loader from
    /// configuration. Gemini is left out when no API key is available.
    pub fn from_config(config: &SynthConfig) -> Self {
        let profiles = ProfileCache::new(ProfileStore::new(&config.data_dir));
        Self::from_config_with_profiles(config, Arc::new(profiles))
    }

    /// Like [`Synthesizer::from_config`] with a caller-owned profile source.
    pub fn from_config_with_profiles(
        config: &SynthConfig,
        profiles: Arc<dyn ProfileSource>,
    ) -> Self {
        let gemini = GeminiGenerator::from_config(config);
        let generator: Option<Arc<dyn TextGenerator>> = if gemini.is_available() {
            Some(Arc::new(gemini))
        } else {
            log::warn!("No Gemini API key configured; posts will use templates");
            None
        };

        Self::new(generator)
            .with_profiles(profiles)
            .with_examples(Arc::new(CorpusLoader::new(&config.data_dir)))
            .with_thresholds(config.thresholds.clone())
            .with_polish(config.polish_output)
    }

    pub fn with_profiles(mut self, profiles: Arc<dyn ProfileSource>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn with_examples(mut self, examples: Arc<dyn ExampleSource>) -> Self {
        self.examples = examples;
        self
    }

    pub fn with_thresholds(mut self, thresholds: ToneThresholds) -> Self {
        self.prompts = PromptBuilder::new(thresholds.clone());
        self.templates = TemplateComposer::new(thresholds);
        self
    }

    pub fn with_polish(mut self, polish: bool) -> Self {
        self.polish = polish;
        self
    }

    pub fn generator_available(&self) -> bool {
        self.generator.is_some()
    }

    /// Synthesize a post using thread-local randomness.
    pub fn synthesize(
        &self,
        context: &str,
        style: &str,
        profile_override: Option<&StyleProfile>,
    ) -> Result<GeneratedPost> {
        self.synthesize_with_rng(context, style, profile_override, &mut rand::thread_rng())
    }

    /// Synthesize a post drawing every random choice from `rng`.
    ///
    /// `profile_override` takes precedence over the stored profile for the
    /// resolved style.
    pub fn synthesize_with_rng<R: Rng + ?Sized>(
        &self,
        context: &str,
        style: &str,
        profile_override: Option<&StyleProfile>,
        rng: &mut R,
    ) -> Result<GeneratedPost> {
        let context = context.trim();
        if context.is_empty() {
            return Err(StyleError::EmptyContext);
        }

        let style = ResolvedStyle::new(style);
        let stored;
        let profile = match profile_override {
            Some(profile) => Some(profile),
            None => {
                stored = self.profiles.profile_for(style.tag);
                stored.as_deref()
            }
        };

        log::info!(
            "Generating '{}' post (profile: {}) about: {}",
            style.label,
            profile.is_some(),
            preview(context)
        );

        let examples = match profile {
            Some(_) => self.examples.example_posts(style.tag, EXAMPLE_LIMIT),
            None => Vec::new(),
        };
        let instruction = self.prompts.build(context, &style, profile, &examples);

        let (text, generator_used) = match self.attempt_external(&instruction) {
            Some(text) => (text, GeneratorUsed::External),
            None => {
                log::info!("Using template generation for '{}'", style.label);
                (self.templates.compose(context, profile, rng), GeneratorUsed::Template)
            }
        };

        let full_text = inject_cta(&text, style.tag, rng).trim().to_string();

        Ok(GeneratedPost {
            full_text,
            style: style.label,
            generator_used,
            used_profile: profile.is_some(),
            context: context.to_string(),
            platform: PLATFORM.to_string(),
        })
    }

    /// ATTEMPT_EXTERNAL and SANITIZE_SUCCESS. `None` means fall back.
    fn attempt_external(&self, instruction: &Instruction) -> Option<String> {
        let generator = self.generator.as_ref()?;

        let raw = match generator.generate(instruction.prompt()) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("{} generation failed: {}", generator.name(), e);
                return None;
            }
        };

        let draft = sanitize(&raw);
        if draft.chars().count() < MIN_EXTERNAL_CHARS {
            log::warn!(
                "{} returned {} chars after cleanup; discarding",
                generator.name(),
                draft.chars().count()
            );
            return None;
        }

        if !self.polish {
            return Some(draft);
        }
        Some(self.polish_draft(generator.as_ref(), draft))
    }

    /// Grammar-only pass. Any failure keeps the draft.
    fn polish_draft(&self, generator: &dyn TextGenerator, draft: String) -> String {
        match generator.generate(&polish_prompt(&draft)) {
            Ok(raw) => {
                let polished = sanitize(&raw);
                if polished.chars().count() >= MIN_EXTERNAL_CHARS {
                    log::debug!("Polished draft with {}", generator.name());
                    polished
                } else {
                    log::warn!("Polish pass returned too little text; keeping draft");
                    draft
                }
            }
            Err(e) => {
                log::warn!("Polish pass failed: {}; keeping draft", e);
                draft
            }
        }
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Resolve a label and report whether it named a known style.
pub fn resolve_style(label: &str) -> (StyleTag, bool) {
    match StyleTag::parse(label) {
        Some(tag) => (tag, true),
        None => (StyleTag::DEFAULT, false),
    }
}

fn preview(context: &str) -> String {
    let head: String = context.chars().take(50).collect();
    if head.len() < context.len() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::cta::BOARDY_CTAS;
    use crate::generation::template::default_post;
    use crate::llms::generator::testing::ScriptedGenerator;
    use crate::llms::GenerationError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    const LONG: &str = "Remote work taught me that trust scales better than surveillance ever could.";
    const POLISHED: &str = "Remote work taught me that trust scales far better than surveillance ever could.";

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    fn scripted(
        replies: Vec<std::result::Result<String, GenerationError>>,
    ) -> (Arc<ScriptedGenerator>, Synthesizer) {
        let generator = Arc::new(ScriptedGenerator::new(replies));
        let synth = Synthesizer::new(Some(generator.clone() as Arc<dyn TextGenerator>));
        (generator, synth)
    }

    fn hello_profile() -> StyleProfile {
        StyleProfile {
            opening_patterns: vec!["Hello world.".to_string()],
            ..StyleProfile::default()
        }
    }

    #[test]
    fn test_empty_context_is_error() {
        let synth = Synthesizer::default();
        assert!(matches!(
            synth.synthesize("   ", "boardy", None),
            Err(StyleError::EmptyContext)
        ));
    }

    #[test]
    fn test_alias_label_is_echoed() {
        let synth = Synthesizer::default();
        let post = synth
            .synthesize_with_rng("quarterly goals", "serious", None, &mut rng())
            .unwrap();
        assert_eq!(post.style, "serious");
        assert_eq!(post.platform, "LinkedIn");
        assert_eq!(post.context, "quarterly goals");
    }

    #[test]
    fn test_no_generator_uses_template() {
        let synth = Synthesizer::default();
        let post = synth
            .synthesize_with_rng("remote work", "performative", Some(&hello_profile()), &mut rng())
            .unwrap();
        assert_eq!(post.generator_used, GeneratorUsed::Template);
        assert!(post.used_profile);
        assert!(post.full_text.starts_with("Hello world."));
    }

    #[test]
    fn test_generator_error_falls_back() {
        let (_, synth) = scripted(vec![Err(GenerationError::Timeout(Duration::from_secs(30)))]);
        let post = synth
            .synthesize_with_rng("remote work", "cluely", None, &mut rng())
            .unwrap();
        assert_eq!(post.generator_used, GeneratorUsed::Template);
        assert!(!post.used_profile);
        assert_eq!(post.full_text, default_post("remote work"));
    }

    #[test]
    fn test_short_output_falls_back() {
        let (generator, synth) = scripted(vec![Ok("Here's the post: \"Too short.\"".to_string())]);
        let post = synth
            .synthesize_with_rng("remote work", "professional", None, &mut rng())
            .unwrap();
        assert_eq!(post.generator_used, GeneratorUsed::Template);
        assert_eq!(generator.prompts().len(), 1);
    }

    #[test]
    fn test_external_output_is_sanitized_and_polished() {
        let (generator, synth) = scripted(vec![
            Ok(format!("Here's the post:\n\n\"{LONG}\"")),
            Ok(format!("**{POLISHED}**")),
        ]);
        let post = synth
            .synthesize_with_rng("remote work", "professional", Some(&hello_profile()), &mut rng())
            .unwrap();
        assert_eq!(post.generator_used, GeneratorUsed::External);
        assert_eq!(post.full_text, POLISHED);

        let prompts = generator.prompts();
        assert!(prompts[0].contains("CONTEXT/TOPIC: remote work"));
        assert!(prompts[1].contains(&format!("Text to fix:\n{LONG}")));
    }

    #[test]
    fn test_polish_failure_keeps_draft() {
        let (_, synth) = scripted(vec![
            Ok(LONG.to_string()),
            Err(GenerationError::Request("503".into())),
        ]);
        let post = synth
            .synthesize_with_rng("remote work", "professional", None, &mut rng())
            .unwrap();
        assert_eq!(post.generator_used, GeneratorUsed::External);
        assert_eq!(post.full_text, LONG);
    }

    #[test]
    fn test_short_polish_keeps_draft() {
        let (_, synth) = scripted(vec![Ok(LONG.to_string()), Ok("Fixed.".to_string())]);
        let post = synth
            .synthesize_with_rng("remote work", "professional", None, &mut rng())
            .unwrap();
        assert_eq!(post.full_text, LONG);
    }

    #[test]
    fn test_polish_disabled_makes_one_call() {
        let (generator, synth) = scripted(vec![Ok(LONG.to_string())]);
        let synth = synth.with_polish(false);
        let post = synth
            .synthesize_with_rng("remote work", "professional", None, &mut rng())
            .unwrap();
        assert_eq!(post.full_text, LONG);
        assert_eq!(generator.prompts().len(), 1);
    }

    #[test]
    fn test_boardy_gets_cta_once() {
        let synth = Synthesizer::default();
        let post = synth
            .synthesize_with_rng("networking", "boardy", None, &mut rng())
            .unwrap();
        let ctas = BOARDY_CTAS.iter().filter(|cta| post.full_text.ends_with(*cta)).count();
        assert_eq!(ctas, 1);
        assert!(post.full_text.starts_with(&default_post("networking")));
    }

    #[test]
    fn test_boardy_mention_skips_cta() {
        let text = format!("{LONG} I found my people on Boardy.");
        let (_, synth) = scripted(vec![Ok(text.clone())]);
        let post = synth
            .with_polish(false)
            .synthesize_with_rng("networking", "boardy", None, &mut rng())
            .unwrap();
        assert_eq!(post.full_text, text);
    }

    #[test]
    fn test_stored_profile_and_examples_are_used() {
        #[derive(Debug)]
        struct OneProfile;
        impl ProfileSource for OneProfile {
            fn profile_for(&self, style: StyleTag) -> Option<Arc<StyleProfile>> {
                (style == StyleTag::Professional).then(|| {
                    Arc::new(StyleProfile {
                        opening_patterns: vec!["Stored opening.".to_string()],
                        ..StyleProfile::default()
                    })
                })
            }
        }

        let (generator, synth) = scripted(vec![Err(GenerationError::Unavailable("off".into()))]);
        let synth = synth
            .with_profiles(Arc::new(OneProfile))
            .with_examples(Arc::new(vec!["An example post".to_string()]));
        let post = synth
            .synthesize_with_rng("synergy", "serious", None, &mut rng())
            .unwrap();

        assert!(post.used_profile);
        assert!(post.full_text.starts_with("Stored opening."));
        assert!(generator.prompts()[0].contains("EXAMPLE 1:\nAn example post"));
    }

    #[test]
    fn test_override_beats_stored_profile() {
        let synth = Synthesizer::default().with_profiles(Arc::new(NoProfiles));
        let post = synth
            .synthesize_with_rng("x", "boardy", Some(&hello_profile()), &mut rng())
            .unwrap();
        assert!(post.full_text.starts_with("Hello world."));
    }

    #[test]
    fn test_resolve_style() {
        assert_eq!(resolve_style("Serious"), (StyleTag::Professional, true));
        assert_eq!(resolve_style("mystery"), (StyleTag::Professional, false));
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("short"), "short");
        assert_eq!(preview(&"a".repeat(60)), format!("{}...", "a".repeat(50)));
    }
}
