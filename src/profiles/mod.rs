//! Style profile persistence.
//!
//! - [`store`] - JSON files under `<data_dir>/processed`, written atomically
//! - [`cache`] - shared in-memory layer used by the server

pub mod cache;
pub mod store;

pub use cache::ProfileCache;
pub use store::ProfileStore;

use std::sync::Arc;

use crate::patterns::StyleProfile;
use crate::style::StyleTag;

/// Looks up the stored profile for a style.
pub trait ProfileSource: Send + Sync {
    fn profile_for(&self, style: StyleTag) -> Option<Arc<StyleProfile>>;
}

/// A source that never has a profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProfiles;

impl ProfileSource for NoProfiles {
    fn profile_for(&self, _style: StyleTag) -> Option<Arc<StyleProfile>> {
        None
    }
}

impl ProfileSource for ProfileStore {
    fn profile_for(&self, style: StyleTag) -> Option<Arc<StyleProfile>> {
        match self.load(style.as_str()) {
            Ok(profile) => profile.map(Arc::new),
            Err(e) => {
                log::warn!("Ignoring unreadable profile for '{}': {}", style, e);
                None
            }
        }
    }
}
