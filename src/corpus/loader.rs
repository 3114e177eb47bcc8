//! Corpus loading from flat JSON files.
//!
//! Datasets live at `<data_dir>/raw/<name>.json` and hold either a JSON
//! array of post records or an object with a `posts` array.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::post::Post;
use crate::error::{Result, StyleError};
use crate::prompt::ExampleSource;
use crate::style::StyleTag;

static DATASET_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").unwrap());

/// Maximum characters of an example post handed to the prompt builder.
const EXAMPLE_MAX_CHARS: usize = 800;

/// Reads named datasets from a raw-corpus directory.
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    raw_dir: PathBuf,
}

impl CorpusLoader {
    /// Create a loader rooted at `<data_dir>/raw`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            raw_dir: data_dir.as_ref().join("raw"),
        }
    }

    /// Canonical file stem for a dataset name.
    ///
    /// Known style labels and aliases map to their canonical style; other
    /// names are used as given. Names outside `[A-Za-z0-9_-]` are rejected.
    pub fn canonical_name(name: &str) -> Option<String> {
        let trimmed = name.trim();
        if let Some(tag) = StyleTag::parse(trimmed) {
            return Some(tag.as_str().to_string());
        }
        DATASET_NAME
            .is_match(trimmed)
            .then(|| trimmed.to_string())
    }

    /// Path of the corpus file for `name`, if the name is valid.
    pub fn dataset_path(&self, name: &str) -> Option<PathBuf> {
        Self::canonical_name(name).map(|stem| self.raw_dir.join(format!("{stem}.json")))
    }

    /// Load every record of a dataset.
    pub fn load(&self, name: &str) -> Result<Vec<Post>> {
        let path = self
            .dataset_path(name)
            .ok_or_else(|| StyleError::DatasetNotFound {
                name: name.to_string(),
            })?;
        log::debug!("Loading dataset '{}' from {}", name, path.display());
        Self::load_file(name, &path)
    }

    /// Load a corpus file from an explicit path.
    pub fn load_file(name: &str, path: &Path) -> Result<Vec<Post>> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StyleError::DatasetNotFound {
                name: name.to_string(),
            },
            _ => StyleError::DatasetFormat {
                name: name.to_string(),
                message: e.to_string(),
            },
        })?;
        Self::parse(name, &content)
    }

    /// Parse corpus JSON text.
    pub fn parse(name: &str, content: &str) -> Result<Vec<Post>> {
        let format_error = |message: String| StyleError::DatasetFormat {
            name: name.to_string(),
            message,
        };

        let value: Value =
            serde_json::from_str(content).map_err(|e| format_error(e.to_string()))?;

        let records = match &value {
            Value::Array(records) => records,
            Value::Object(obj) => match obj.get("posts") {
                Some(Value::Array(records)) => records,
                _ => return Err(format_error("object has no 'posts' array".to_string())),
            },
            _ => {
                return Err(format_error(
                    "expected an array of posts or an object with 'posts'".to_string(),
                ))
            }
        };

        records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                Post::from_value(record)
                    .ok_or_else(|| format_error(format!("record {i} is not an object or string")))
            })
            .collect()
    }

    /// List dataset stems available in the raw directory, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.raw_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StyleError::DatasetFormat {
                    name: self.raw_dir.display().to_string(),
                    message: e.to_string(),
                })
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().to_string()))
            .collect();
        names.sort();
        Ok(names)
    }
}

impl ExampleSource for CorpusLoader {
    fn example_posts(&self, style: StyleTag, limit: usize) -> Vec<String> {
        let posts = match self.load(style.as_str()) {
            Ok(posts) => posts,
            Err(e) => {
                log::debug!("No example posts for '{}': {}", style, e);
                return Vec::new();
            }
        };

        posts
            .into_iter()
            .filter(Post::is_usable)
            .take(limit)
            .map(|post| truncate_example(&post.text))
            .collect()
    }
}

fn truncate_example(text: &str) -> String {
    if text.chars().count() > EXAMPLE_MAX_CHARS {
        let head: String = text.chars().take(EXAMPLE_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_dataset(dir: &Path, name: &str, content: &str) {
        let raw = dir.join("raw");
        fs::create_dir_all(&raw).unwrap();
        fs::write(raw.join(format!("{name}.json")), content).unwrap();
    }

    #[test]
    fn test_load_array_shape() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), "boardy", r#"[{"text": "one"}, {"full_post_text": "two"}]"#);

        let posts = CorpusLoader::new(dir.path()).load("boardy").unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].text, "two");
    }

    #[test]
    fn test_load_posts_object_shape() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), "cluely", r#"{"posts": [{"text": "hot take"}]}"#);

        let posts = CorpusLoader::new(dir.path()).load("cluely").unwrap();
        assert_eq!(posts, vec![Post::new("hot take")]);
    }

    #[test]
    fn test_alias_maps_to_canonical_file() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), "professional", r#"[{"text": "synergy"}]"#);

        let posts = CorpusLoader::new(dir.path()).load("serious").unwrap();
        assert_eq!(posts[0].text, "synergy");
    }

    #[test]
    fn test_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let err = CorpusLoader::new(dir.path()).load("nope").unwrap_err();
        assert!(matches!(err, StyleError::DatasetNotFound { .. }));
    }

    #[test]
    fn test_invalid_name_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = CorpusLoader::new(dir.path()).load("../secrets").unwrap_err();
        assert!(matches!(err, StyleError::DatasetNotFound { .. }));
    }

    #[test]
    fn test_wrong_shape_is_format_error() {
        for content in [r#"{"items": []}"#, "42", "not json", r#"[1, 2]"#] {
            let err = CorpusLoader::parse("bad", content).unwrap_err();
            assert!(matches!(err, StyleError::DatasetFormat { .. }), "{content}");
        }
    }

    #[test]
    fn test_list_sorted_stems() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), "performative", "[]");
        write_dataset(dir.path(), "boardy", "[]");
        fs::write(dir.path().join("raw").join("notes.txt"), "ignored").unwrap();

        let names = CorpusLoader::new(dir.path()).list().unwrap();
        assert_eq!(names, vec!["boardy", "performative"]);
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CorpusLoader::new(dir.path().join("absent")).list().unwrap().is_empty());
    }

    #[test]
    fn test_example_posts_are_bounded_and_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let long = "x".repeat(900);
        let content = serde_json::json!([
            { "text": long },
            { "text": "second" },
            { "text": "third" },
        ])
        .to_string();
        write_dataset(dir.path(), "boardy", &content);

        let examples = CorpusLoader::new(dir.path()).example_posts(StyleTag::Boardy, 2);
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].chars().count(), EXAMPLE_MAX_CHARS + 3);
        assert!(examples[0].ends_with("..."));
        assert_eq!(examples[1], "second");
    }

    #[test]
    fn test_example_posts_skip_empty_records() {
        let dir = tempfile::tempdir().unwrap();
        let content = r#"[{"text": "  "}, {"likes": 4}, {"text": "first"}, {"text": "second"}, {"text": "third"}]"#;
        write_dataset(dir.path(), "boardy", content);

        let examples = CorpusLoader::new(dir.path()).example_posts(StyleTag::Boardy, 2);
        assert_eq!(examples, vec!["first".to_string(), "second".to_string()]);
    }
}
