//! Corpus records and the flat-file dataset loader.

pub mod loader;
pub mod post;

pub use loader::CorpusLoader;
pub use post::{Post, PostMetadata, TEXT_KEYS};
