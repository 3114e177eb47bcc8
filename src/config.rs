//! Runtime configuration.
//!
//! Defaults, optionally overlaid by a YAML file, then by environment
//! variables:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `STYLECRAFT_DATA_DIR` | `data_dir` |
//! | `STYLECRAFT_MODEL` | `model` |
//! | `GEMINI_API_KEY` / `GOOGLE_API_KEY` | `api_key` |
//! | `STYLECRAFT_TIMEOUT_SECS` | `timeout_secs` |
//! | `STYLECRAFT_POLISH` | `polish_output` |

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StyleError};
use crate::llms::providers::gemini::{API_KEY_VARS, DEFAULT_MODEL};
use crate::patterns::ExtractionLimits;
use crate::prompt::ToneThresholds;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Root holding `raw/` corpora and `processed/` profiles.
    pub data_dir: PathBuf,
    pub model: String,
    /// Never serialized back out.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Per-call deadline for the external generator.
    pub timeout_secs: u64,
    /// Run a grammar-only second pass over external output.
    pub polish_output: bool,
    pub thresholds: ToneThresholds,
    pub limits: ExtractionLimits,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_secs: 30,
            polish_output: true,
            thresholds: ToneThresholds::default(),
            limits: ExtractionLimits::default(),
        }
    }
}

impl SynthConfig {
    /// Defaults with environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// YAML file with environment overrides.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| StyleError::Config(format!("{}: {}", path.display(), e)))?;
        let mut config = Self::from_yaml_str(&content)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| StyleError::Config(e.to_string()))
    }

    /// Overlay values from a variable lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get("STYLECRAFT_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(model) = get("STYLECRAFT_MODEL") {
            self.model = model;
        }
        if let Some(key) = API_KEY_VARS.iter().find_map(|&var| get(var)) {
            self.api_key = Some(key);
        }
        if let Some(secs) = get("STYLECRAFT_TIMEOUT_SECS") {
            self.timeout_secs = secs.trim().parse().map_err(|_| {
                StyleError::Config(format!("STYLECRAFT_TIMEOUT_SECS is not a number: {secs}"))
            })?;
        }
        if let Some(flag) = get("STYLECRAFT_POLISH") {
            self.polish_output = parse_flag(&flag).ok_or_else(|| {
                StyleError::Config(format!("STYLECRAFT_POLISH is not a boolean: {flag}"))
            })?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SynthConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.polish_output);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.thresholds, ToneThresholds::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = SynthConfig::default();
        config
            .apply_env(lookup(&[
                ("STYLECRAFT_DATA_DIR", "/srv/data"),
                ("STYLECRAFT_TIMEOUT_SECS", "5"),
                ("STYLECRAFT_POLISH", "off"),
                ("GOOGLE_API_KEY", "google"),
            ]))
            .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/data"));
        assert_eq!(config.timeout_secs, 5);
        assert!(!config.polish_output);
        assert_eq!(config.api_key.as_deref(), Some("google"));
    }

    #[test]
    fn test_gemini_key_wins() {
        let mut config = SynthConfig::default();
        config
            .apply_env(lookup(&[("GEMINI_API_KEY", "gemini"), ("GOOGLE_API_KEY", "google")]))
            .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("gemini"));
    }

    #[test]
    fn test_invalid_env_values() {
        let mut config = SynthConfig::default();
        assert!(matches!(
            config.apply_env(lookup(&[("STYLECRAFT_TIMEOUT_SECS", "soon")])),
            Err(StyleError::Config(_))
        ));
        assert!(config
            .apply_env(lookup(&[("STYLECRAFT_POLISH", "maybe")]))
            .is_err());
    }

    #[test]
    fn test_yaml_partial() {
        let config = SynthConfig::from_yaml_str(
            "data_dir: ./corpus\npolish_output: false\nthresholds:\n  questions: 1\nlimits:\n  vocabulary: 5\n",
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("./corpus"));
        assert!(!config.polish_output);
        assert_eq!(config.thresholds.questions, 1);
        assert_eq!(config.thresholds.first_person, 10);
        assert_eq!(config.limits.vocabulary, 5);
        assert_eq!(config.limits.common_phrases, 20);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_yaml_file_and_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stylecraft.yaml");
        fs::write(&path, "model: gemini-custom\n").unwrap();
        assert_eq!(SynthConfig::from_yaml_file(&path).unwrap().model, "gemini-custom");

        assert!(SynthConfig::from_yaml_file(dir.path().join("missing.yaml")).is_err());
        assert!(SynthConfig::from_yaml_str("timeout_secs: [1]").is_err());
    }
}
