//! Text generator implementations.
//!
//! | Provider | Module |
//! |----------|--------|
//! | Gemini | [`gemini`] |

pub mod gemini;

pub use gemini::GeminiGenerator;
