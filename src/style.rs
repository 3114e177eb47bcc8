//! Style tags and alias resolution.
//!
//! Every lookup boundary (corpus, profile, generator selection) resolves the
//! caller's label through [`StyleTag::resolve`] so that aliases such as
//! `serious` land on the same canonical identifier everywhere.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical writing styles backed by a corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleTag {
    /// Humble brags and inspirational self-promotion.
    Performative,
    /// Corporate, jargon-heavy business tone.
    Professional,
    /// Tone-deaf, contrarian hot takes.
    Cluely,
    /// Community and connection driven; carries a branded call to action.
    Boardy,
}

/// Label aliases, resolved before any canonical-name match.
const ALIASES: &[(&str, StyleTag)] = &[("serious", StyleTag::Professional)];

impl StyleTag {
    /// Style used when a label is unknown.
    pub const DEFAULT: StyleTag = StyleTag::Professional;

    /// All canonical styles.
    pub const ALL: [StyleTag; 4] = [
        StyleTag::Performative,
        StyleTag::Professional,
        StyleTag::Cluely,
        StyleTag::Boardy,
    ];

    /// Parse a label or alias, returning `None` for unknown labels.
    pub fn parse(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        if let Some((_, tag)) = ALIASES.iter().find(|(alias, _)| *alias == normalized) {
            return Some(*tag);
        }
        Self::ALL.into_iter().find(|tag| tag.as_str() == normalized)
    }

    /// Resolve a label, falling back to [`StyleTag::DEFAULT`].
    pub fn resolve(label: &str) -> Self {
        Self::parse(label).unwrap_or(Self::DEFAULT)
    }

    /// Canonical identifier, also used as dataset and profile file stem.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Performative => "performative",
            Self::Professional => "professional",
            Self::Cluely => "cluely",
            Self::Boardy => "boardy",
        }
    }

    /// Short description of the voice, embedded in generation directives.
    pub fn descriptor(&self) -> &'static str {
        match self {
            Self::Performative => {
                "humble brags, virtue signaling, and inspirational but self-promotional"
            }
            Self::Professional => {
                "professional, corporate jargon-heavy, and formal business tone"
            }
            Self::Cluely => "out of touch with reality, tone-deaf, and unaware",
            Self::Boardy => "meeting culture, collaboration-focused, and community-driven",
        }
    }

    /// Brand keyword whose absence triggers call-to-action injection.
    ///
    /// Only the community style carries one.
    pub fn brand_keyword(&self) -> Option<&'static str> {
        match self {
            Self::Boardy => Some("boardy"),
            _ => None,
        }
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A caller-supplied label together with the style it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStyle {
    /// The label as the caller wrote it (trimmed), echoed back in results.
    pub label: String,
    /// Canonical style used for every lookup.
    pub tag: StyleTag,
}

impl ResolvedStyle {
    pub fn new(label: &str) -> Self {
        let trimmed = label.trim();
        let label = if trimmed.is_empty() {
            StyleTag::DEFAULT.as_str().to_string()
        } else {
            trimmed.to_string()
        };
        Self {
            tag: StyleTag::resolve(&label),
            label,
        }
    }
}
