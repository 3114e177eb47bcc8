//! # stylecraft
//!
//! Extracts quantified style profiles from corpora of short social posts
//! and synthesizes new posts in a target style.
//!
//! The pipeline runs leaves first:
//!
//! 1. [`corpus`] loads post records from flat JSON datasets.
//! 2. [`patterns`] turns a corpus into a [`StyleProfile`].
//! 3. [`profiles`] persists profiles and caches them for reuse.
//! 4. [`prompt`] builds the instruction for an external generator.
//! 5. [`generation`] calls the generator through [`llms`], cleans its
//!    output and falls back to a template when it is unavailable.
//!
//! [`server`] exposes the pipeline over HTTP.

pub mod config;
pub mod corpus;
pub mod error;
pub mod generation;
pub mod llms;
pub mod patterns;
pub mod profiles;
pub mod prompt;
pub mod server;
pub mod style;

pub use config::SynthConfig;
pub use corpus::{CorpusLoader, Post};
pub use error::{Result, StyleError};
pub use generation::{GeneratedPost, GeneratorUsed, Synthesizer};
pub use llms::{GeminiGenerator, GenerationError, TextGenerator};
pub use patterns::{extract, CorpusReport, PatternExtractor, StyleProfile};
pub use profiles::{ProfileCache, ProfileStore};
pub use prompt::{ExampleSource, Instruction};
pub use style::{ResolvedStyle, StyleTag};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
