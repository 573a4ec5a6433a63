//! Validated value objects used across the gateway.

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Maximum accepted message length, in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Identifier of a chat topic (a game id in the source domain).
///
/// Guaranteed non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicId(String);

impl TopicId {
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyTopicId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for TopicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of a chat message. Non-empty, bounded length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::EmptyMessageContent);
        }
        if raw.chars().count() > MAX_MESSAGE_CHARS {
            return Err(DomainError::MessageTooLong {
                max: MAX_MESSAGE_CHARS,
            });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Instant in time as Unix milliseconds (UTC).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_id_accepts_non_empty() {
        // given / when:
        let topic = TopicId::new("440").unwrap();

        // then:
        assert_eq!(topic.as_str(), "440");
    }

    #[test]
    fn test_topic_id_trims_whitespace() {
        // given / when:
        let topic = TopicId::new("  440 ").unwrap();

        // then:
        assert_eq!(topic.as_str(), "440");
    }

    #[test]
    fn test_topic_id_rejects_empty() {
        // given / when:
        let result = TopicId::new("   ");

        // then:
        assert!(matches!(result, Err(DomainError::EmptyTopicId)));
    }

    #[test]
    fn test_message_content_rejects_empty() {
        // given / when:
        let result = MessageContent::new("");

        // then:
        assert!(matches!(result, Err(DomainError::EmptyMessageContent)));
    }

    #[test]
    fn test_message_content_rejects_whitespace_only() {
        // given / when:
        let result = MessageContent::new(" \t\n ");

        // then:
        assert!(matches!(result, Err(DomainError::EmptyMessageContent)));
    }

    #[test]
    fn test_message_content_rejects_over_limit() {
        // given:
        let raw = "a".repeat(MAX_MESSAGE_CHARS + 1);

        // when:
        let result = MessageContent::new(raw);

        // then:
        assert!(matches!(result, Err(DomainError::MessageTooLong { .. })));
    }

    #[test]
    fn test_message_content_keeps_original_text() {
        // given / when:
        let content = MessageContent::new("hello world").unwrap();

        // then:
        assert_eq!(content.as_str(), "hello world");
    }
}
