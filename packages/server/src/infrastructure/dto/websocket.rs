//! WebSocket event protocol.
//!
//! Every frame is a JSON object tagged by a `type` field. Unknown or
//! malformed client frames never terminate the connection; they produce a
//! single `error` event instead.

use serde::{Deserialize, Serialize};

/// Events a client may send.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    JoinRoom { topic_id: String },
    SendMessage { topic_id: String, content: String },
}

/// Events the server emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    MessageHistory {
        topic_id: String,
        messages: Vec<MessageDto>,
    },
    MemberList {
        topic_id: String,
        members: Vec<MemberDto>,
    },
    PresenceCount {
        topic_id: String,
        count: usize,
    },
    NewMessage {
        topic_id: String,
        message: MessageDto,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageDto {
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    pub registered: bool,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberDto {
    pub id: String,
    pub display_name: String,
    pub anonymous: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_join_room_deserializes() {
        // given:
        let raw = r#"{"type":"join_room","topic_id":"440"}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then:
        assert_eq!(
            event,
            ClientEvent::JoinRoom {
                topic_id: "440".to_string()
            }
        );
    }

    #[test]
    fn test_client_send_message_deserializes() {
        // given:
        let raw = r#"{"type":"send_message","topic_id":"440","content":"hello"}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then:
        assert_eq!(
            event,
            ClientEvent::SendMessage {
                topic_id: "440".to_string(),
                content: "hello".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_client_event_is_a_parse_error() {
        // given:
        let raw = r#"{"type":"self_destruct"}"#;

        // when / then:
        assert!(serde_json::from_str::<ClientEvent>(raw).is_err());
    }

    #[test]
    fn test_server_presence_count_serializes_with_tag() {
        // given:
        let event = ServerEvent::PresenceCount {
            topic_id: "440".to_string(),
            count: 2,
        };

        // when:
        let json = serde_json::to_string(&event).unwrap();

        // then:
        assert_eq!(json, r#"{"type":"presence_count","topic_id":"440","count":2}"#);
    }

    #[test]
    fn test_server_error_serializes_with_tag() {
        // given:
        let event = ServerEvent::Error {
            message: "User not found".to_string(),
        };

        // when:
        let json = serde_json::to_string(&event).unwrap();

        // then:
        assert_eq!(json, r#"{"type":"error","message":"User not found"}"#);
    }
}
