//! Corpus records and flexible key normalization.
//!
//! Scraped corpora do not agree on field names, so each semantic field has
//! one ordered list of candidate keys. A record is normalized once, at load
//! time, by taking the first candidate that holds a usable value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Candidate keys for the post body, in priority order.
pub const TEXT_KEYS: &[&str] = &[
    "text",
    "generated_post_text",
    "full_post_text",
    "post_text",
    "content",
];

/// Candidate keys for the style tag attached to a record.
pub const STYLE_KEYS: &[&str] = &["style_tag", "style"];

const HASHTAG_KEYS: &[&str] = &["hashtags", "tags"];
const LIKE_KEYS: &[&str] = &["likes", "num_likes", "reactions"];
const COMMENT_KEYS: &[&str] = &["comments", "num_comments"];
const REPOST_KEYS: &[&str] = &["reposts", "shares", "num_shares"];

/// Optional metadata carried by a corpus record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMetadata {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hashtags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reposts: Option<u64>,
}

/// One corpus record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post body; may be empty, in which case extraction skips the record.
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_tag: Option<String>,
    #[serde(default)]
    pub metadata: PostMetadata,
}

impl Post {
    /// Create a post from its text alone.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Normalize a raw JSON record.
    ///
    /// Objects go through the candidate-key lists; bare strings are treated
    /// as the post text. Any other shape returns `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::new(text.clone())),
            Value::Object(record) => Some(Self::from_record(record)),
            _ => None,
        }
    }

    fn from_record(record: &Map<String, Value>) -> Self {
        let text = first_str(record, TEXT_KEYS).unwrap_or_default().to_string();
        let style_tag = first_str(record, STYLE_KEYS).map(str::to_string);

        let hashtags = first_match(record, HASHTAG_KEYS, |v| {
            let tags: Vec<String> = v
                .as_array()?
                .iter()
                .filter_map(|t| t.as_str().map(str::to_string))
                .collect();
            (!tags.is_empty()).then_some(tags)
        })
        .unwrap_or_default();

        Self {
            text,
            style_tag,
            metadata: PostMetadata {
                hashtags,
                likes: first_u64(record, LIKE_KEYS),
                comments: first_u64(record, COMMENT_KEYS),
                reposts: first_u64(record, REPOST_KEYS),
            },
        }
    }

    /// Whether the post has any text after trimming.
    pub fn is_usable(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Return the first candidate key whose value `extract` accepts.
fn first_match<'a, T>(
    record: &'a Map<String, Value>,
    keys: &[&str],
    extract: impl Fn(&'a Value) -> Option<T>,
) -> Option<T> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find_map(extract)
}

fn first_str<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    first_match(record, keys, |v| v.as_str().filter(|s| !s.trim().is_empty()))
}

fn first_u64(record: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    first_match(record, keys, |v| {
        v.as_u64()
            .or_else(|| v.as_str().and_then(|s| s.replace(',', "").trim().parse().ok()))
    })
}
