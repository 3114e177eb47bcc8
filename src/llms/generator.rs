//! The text generation seam.
//!
//! A [`TextGenerator`] turns a prompt into prose. Implementations block the
//! calling thread for at most their configured timeout; callers treat every
//! [`GenerationError`] as "fall back to the template path".

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Failures of an external generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No credentials or no backend configured.
    #[error("Text generator unavailable: {0}")]
    Unavailable(String),

    /// Transport failure or a non-success HTTP status.
    #[error("Generation request failed: {0}")]
    Request(String),

    /// The call exceeded its deadline.
    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),

    /// The backend answered but the body held no usable text.
    #[error("Malformed generation response: {0}")]
    Response(String),
}

/// Remote text generation capability.
pub trait TextGenerator: Send + Sync + fmt::Debug {
    /// Short backend identifier used in logs.
    fn name(&self) -> &str;

    /// Generate text for `prompt`.
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted generator for orchestrator and server tests.

    use std::collections::VecDeque;

    use parking_lot::Mutex;

    use super::*;

    /// Replies with queued results in order, then `Unavailable`.
    #[derive(Debug, Default)]
    pub struct ScriptedGenerator {
        replies: Mutex<VecDeque<Result<String, GenerationError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        pub fn new(replies: Vec<Result<String, GenerationError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn replying(texts: &[&str]) -> Self {
            Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().clone()
        }
    }

    impl TextGenerator for ScriptedGenerator {
        fn name(&self) -> &str {
            "scripted"
        }

        fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().push(prompt.to_string());
            self.replies
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(GenerationError::Unavailable("script exhausted".into())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedGenerator;
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GenerationError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "Generation timed out after 30s");
        let err = GenerationError::Unavailable("no API key".into());
        assert_eq!(err.to_string(), "Text generator unavailable: no API key");
    }

    #[test]
    fn test_scripted_generator_replays_in_order() {
        let generator = ScriptedGenerator::replying(&["first", "second"]);
        assert_eq!(generator.generate("a").unwrap(), "first");
        assert_eq!(generator.generate("b").unwrap(), "second");
        assert!(matches!(
            generator.generate("c"),
            Err(GenerationError::Unavailable(_))
        ));
        assert_eq!(generator.prompts(), vec!["a", "b", "c"]);
    }
}
