//! External text generation.
//!
//! - [`generator`] - the [`TextGenerator`] trait and [`GenerationError`]
//! - [`providers`] - concrete backends (Gemini)

pub mod generator;
pub mod providers;

pub use generator::{GenerationError, TextGenerator};
pub use providers::GeminiGenerator;
