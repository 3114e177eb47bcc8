//! On-disk style profile storage.
//!
//! Profiles live at `<data_dir>/processed/patterns_<name>.json`. Writes go
//! to a temporary file in the same directory and are renamed into place, so
//! a concurrent reader sees either the previous profile or the new one,
//! never a partial file.

use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::corpus::CorpusLoader;
use crate::error::{Result, StyleError};
use crate::patterns::StyleProfile;

/// Reads and atomically writes profile documents.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    /// Create a store rooted at `<data_dir>/processed`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: data_dir.as_ref().join("processed"),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a profile name; aliases resolve like dataset names.
    pub fn path(&self, name: &str) -> Result<PathBuf> {
        let stem = CorpusLoader::canonical_name(name)
            .ok_or_else(|| StyleError::profile_store(name, "invalid profile name"))?;
        Ok(self.dir.join(format!("patterns_{stem}.json")))
    }

    /// Load a stored profile, `None` when it has not been extracted yet.
    pub fn load(&self, name: &str) -> Result<Option<StyleProfile>> {
        let path = self.path(name)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StyleError::profile_store(name, e)),
        };
        let profile = serde_json::from_str(&content).map_err(|e| StyleError::profile_store(name, e))?;
        log::debug!("Loaded profile '{}' from {}", name, path.display());
        Ok(Some(profile))
    }

    /// Persist a profile with write-temp-then-rename.
    pub fn save(&self, name: &str, profile: &StyleProfile) -> Result<PathBuf> {
        let path = self.path(name)?;
        fs::create_dir_all(&self.dir).map_err(|e| StyleError::profile_store(name, e))?;

        let tmp = NamedTempFile::new_in(&self.dir).map_err(|e| StyleError::profile_store(name, e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, profile)
                .map_err(|e| StyleError::profile_store(name, e))?;
            writer.flush().map_err(|e| StyleError::profile_store(name, e))?;
        }
        tmp.as_file()
            .sync_all()
            .map_err(|e| StyleError::profile_store(name, e))?;
        tmp.persist(&path)
            .map_err(|e| StyleError::profile_store(name, e.error))?;

        log::info!("Saved profile '{}' to {}", name, path.display());
        Ok(path)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).map(|p| p.exists()).unwrap_or(false)
    }
}
