//! In-memory profile cache layered over [`ProfileStore`].
//!
//! Profiles are loaded from disk on first use and shared as
//! `Arc<StyleProfile>`. Saving through the cache writes to disk first and
//! then replaces the cached entry, so readers never observe a profile that
//! was not persisted.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::store::ProfileStore;
use super::ProfileSource;
use crate::corpus::CorpusLoader;
use crate::error::{Result, StyleError};
use crate::patterns::StyleProfile;
use crate::style::StyleTag;

#[derive(Debug, Clone)]
pub struct ProfileCache {
    store: ProfileStore,
    /// Keyed by canonical profile name.
    entries: Arc<RwLock<HashMap<String, Arc<StyleProfile>>>>,
}

impl ProfileCache {
    pub fn new(store: ProfileStore) -> Self {
        Self {
            store,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Cached profile, loading it from disk on a miss.
    pub fn get(&self, name: &str) -> Result<Option<Arc<StyleProfile>>> {
        let key = cache_key(name)?;
        if let Some(profile) = self.entries.read().get(&key) {
            return Ok(Some(Arc::clone(profile)));
        }

        let Some(profile) = self.store.load(&key)? else {
            return Ok(None);
        };
        let profile = Arc::new(profile);
        self.entries.write().insert(key, Arc::clone(&profile));
        Ok(Some(profile))
    }

    /// Persist a profile and make it the cached entry.
    pub fn put(&self, name: &str, profile: StyleProfile) -> Result<Arc<StyleProfile>> {
        let key = cache_key(name)?;
        self.store.save(&key, &profile)?;
        let profile = Arc::new(profile);
        self.entries.write().insert(key, Arc::clone(&profile));
        Ok(profile)
    }

    pub fn invalidate(&self, name: &str) {
        if let Ok(key) = cache_key(name) {
            self.entries.write().remove(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProfileSource for ProfileCache {
    fn profile_for(&self, style: StyleTag) -> Option<Arc<StyleProfile>> {
        match self.get(style.as_str()) {
            Ok(profile) => profile,
            Err(e) => {
                log::warn!("Ignoring unreadable profile for '{}': {}", style, e);
                None
            }
        }
    }
}

fn cache_key(name: &str) -> Result<String> {
    CorpusLoader::canonical_name(name)
        .ok_or_else(|| StyleError::profile_store(name, "invalid profile name"))
}
