//! Post generation.
//!
//! - [`orchestrator`] - the [`Synthesizer`] state machine
//! - [`sanitize`] - cleanup of external generator output
//! - [`template`] - profile-driven fallback composer
//! - [`cta`] - branded closing line injection

pub mod cta;
pub mod orchestrator;
pub mod sanitize;
pub mod template;

pub use cta::inject_cta;
pub use orchestrator::{GeneratedPost, GeneratorUsed, Synthesizer, MIN_EXTERNAL_CHARS};
pub use sanitize::sanitize;
pub use template::TemplateComposer;
