//! Pattern extraction: corpus in, quantified style profile out.
//!
//! - [`extractor`] - the canonical extraction algorithm
//! - [`profile`] - the serializable [`StyleProfile`] value
//! - [`ranking`] - deterministic frequency tallies
//! - [`report`] - emoji and hashtag summary of a corpus
//! - [`text`] - sentence, line and token segmentation

pub mod extractor;
pub mod profile;
pub mod ranking;
pub mod report;
pub mod text;

pub use extractor::{extract, ExtractionLimits, PatternExtractor};
pub use profile::{FormattingFlag, RankedItem, StructureStats, StyleProfile, ToneIndicators};
pub use report::CorpusReport;
