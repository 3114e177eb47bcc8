//! Corpus-level summary emitted next to a profile: emoji and hashtag usage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profile::RankedItem;
use super::ranking::Tally;
use super::text;
use crate::corpus::Post;

const TOP_EMOJI: usize = 10;
const TOP_HASHTAGS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiCount {
    pub emoji: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiUsage {
    pub total: usize,
    pub unique: usize,
    pub most_common: Vec<EmojiCount>,
}

/// Summary of a corpus that is not part of the style profile itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusReport {
    /// Dataset name or file path the corpus came from.
    pub source: String,
    /// All records, usable or not.
    pub total_posts: usize,
    pub emoji_usage: EmojiUsage,
    pub hashtags: Vec<RankedItem>,
    pub extracted_at: DateTime<Utc>,
}

impl CorpusReport {
    pub fn build(source: impl Into<String>, corpus: &[Post]) -> Self {
        let mut emoji = Tally::new();
        let mut total_emoji = 0;
        let mut hashtags = Tally::new();

        for post in corpus {
            for c in post.text.chars().filter(|c| text::is_emoji(*c)) {
                total_emoji += 1;
                emoji.add(c.to_string());
            }
            hashtags.extend(text::hashtags(&post.text));
        }

        Self {
            source: source.into(),
            total_posts: corpus.len(),
            emoji_usage: EmojiUsage {
                total: total_emoji,
                unique: emoji.len(),
                most_common: emoji
                    .ranked(TOP_EMOJI)
                    .into_iter()
                    .map(|item| EmojiCount {
                        emoji: item.text,
                        count: item.count,
                    })
                    .collect(),
            },
            hashtags: hashtags.ranked(TOP_HASHTAGS),
            extracted_at: Utc::now(),
        }
    }
}
