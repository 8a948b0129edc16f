use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// The topic every device in this sample subscribes to and every job publishes to.
pub const DEFAULT_TOPIC: &str = "sample";

const MAX_TOPIC_LEN: usize = 900;

/// A named channel in the push backend.
///
/// Names follow the backend rule `[a-zA-Z0-9-_.~%]{1,900}`; a leading
/// `/topics/` prefix is accepted and stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Topic(String);

impl Topic {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name: String = name.into();
        let name = name
            .strip_prefix("/topics/")
            .map(str::to_string)
            .unwrap_or(name);

        if name.is_empty() || name.len() > MAX_TOPIC_LEN {
            return Err(DomainError::invalid_input(format!(
                "Topic name must be 1-{} characters, got {}",
                MAX_TOPIC_LEN,
                name.len()
            )));
        }

        if let Some(bad) = name.chars().find(|c| !is_topic_char(*c)) {
            return Err(DomainError::invalid_input(format!(
                "Invalid character '{}' in topic name '{}'",
                bad, name
            )));
        }

        Ok(Self(name))
    }

    /// The fixed `"sample"` topic.
    pub fn sample() -> Self {
        Self(DEFAULT_TOPIC.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Condition form used by the subscribe API (`/topics/<name>`).
    pub fn path(&self) -> String {
        format!("/topics/{}", self.0)
    }
}

impl Default for Topic {
    fn default() -> Self {
        Self::sample()
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Topic {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Topic> for String {
    fn from(topic: Topic) -> Self {
        topic.0
    }
}

fn is_topic_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~' | '%')
}
