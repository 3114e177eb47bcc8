//! Deterministic frequency tallies.
//!
//! Entries are kept in first-seen order and ranked with a stable sort, so
//! ties always resolve to the key that appeared first in the corpus. No
//! output depends on hash iteration order.

use std::collections::HashMap;

use super::profile::RankedItem;

/// Occurrence counter with first-seen tie-breaking.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `key`.
    pub fn add(&mut self, key: impl Into<String>) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn count(&self, key: &str) -> usize {
        self.index.get(key).map(|&slot| self.entries[slot].1).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top `limit` entries by descending count, ties in first-seen order.
    pub fn ranked(&self, limit: usize) -> Vec<RankedItem> {
        let mut sorted: Vec<&(String, usize)> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
            .into_iter()
            .take(limit)
            .map(|(text, count)| RankedItem {
                text: text.clone(),
                count: *count,
            })
            .collect()
    }
}

impl<S: Into<String>> Extend<S> for Tally {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}
