//! Private messages and the forward tree hanging off them.
//!
//! Two message shapes exist: [`Message`] is what the dialog/history/by-id
//! methods return, [`ConversationMessage`] is what the conversation-message
//! methods return. Both own a tree of [`ForwardedMessage`]s whose depth is
//! whatever the payload carries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;
use crate::geo::Geo;

/// Offset added to a chat id to address the chat as a peer.
pub const CHAT_PEER_OFFSET: i64 = 2_000_000_000;

/// A message as returned by `messages.getDialogs`, `messages.getHistory`
/// and `messages.getById`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub id: i64,
    pub date: i64,
    /// Whether the current user sent this message.
    #[serde(with = "crate::flag")]
    pub out: bool,
    pub user_id: i64,
    #[serde(with = "crate::flag")]
    pub read_state: bool,
    pub title: String,
    pub body: String,
    pub random_id: i64,
    /// Set when the message belongs to a multi-user chat.
    pub chat_id: Option<i64>,
    /// Ids of the most recent authors in the chat.
    pub chat_active: Vec<i64>,
    pub push_settings: Option<PushSettings>,
    pub users_count: i64,
    pub admin_id: i64,
    pub photo_50: Option<String>,
    pub photo_100: Option<String>,
    pub photo_200: Option<String>,
    pub important: bool,
    pub geo: Option<Geo>,
    pub action: Option<ChatAction>,
    pub fwd_messages: Vec<ForwardedMessage>,
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Returns the send time.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        crate::time::from_unix(self.date)
    }

    /// Returns the peer id addressing the conversation this message is in.
    pub fn peer_id(&self) -> i64 {
        match self.chat_id {
            Some(chat_id) => chat_id + CHAT_PEER_OFFSET,
            None => self.user_id,
        }
    }
}

/// A message as returned by `messages.getByConversationMessageId`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationMessage {
    pub id: i64,
    pub date: i64,
    pub peer_id: i64,
    pub from_id: i64,
    pub text: String,
    pub random_id: i64,
    #[serde(rename = "ref")]
    pub ref_: Option<String>,
    pub ref_source: Option<String>,
    pub attachments: Vec<Attachment>,
    pub important: bool,
    pub geo: Option<Geo>,
    /// Bot payload, an opaque JSON string.
    pub payload: Option<String>,
    pub fwd_messages: Vec<ForwardedMessage>,
    pub reply_message: Option<Box<ForwardedMessage>>,
    pub action: Option<ChatAction>,
    pub admin_author_id: Option<i64>,
    pub conversation_message_id: i64,
    pub is_cropped: bool,
    pub members_count: Option<i64>,
    pub update_time: Option<i64>,
    #[serde(with = "crate::flag")]
    pub was_listened: bool,
    pub pinned_at: Option<i64>,
    pub message_tag: Option<String>,
}

impl ConversationMessage {
    /// Returns the send time.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        crate::time::from_unix(self.date)
    }

    /// Returns true when the message was sent in a multi-user chat.
    pub fn is_chat(&self) -> bool {
        self.peer_id > CHAT_PEER_OFFSET
    }
}

/// A forwarded or replied-to message.
///
/// Forwards and replies share one shape. Older API versions send `user_id`
/// and `body`, newer ones `from_id` and `text`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwardedMessage {
    pub user_id: i64,
    pub from_id: i64,
    pub date: i64,
    pub body: String,
    pub text: String,
    pub attachments: Vec<Attachment>,
    pub fwd_messages: Vec<ForwardedMessage>,
    pub reply_message: Option<Box<ForwardedMessage>>,
}

impl ForwardedMessage {
    /// Returns the author, whichever field the API version populated.
    pub fn author_id(&self) -> i64 {
        if self.from_id != 0 {
            self.from_id
        } else {
            self.user_id
        }
    }

    /// Returns the message text, whichever field the API version populated.
    pub fn content(&self) -> &str {
        if self.text.is_empty() {
            &self.body
        } else {
            &self.text
        }
    }

    /// Returns the nesting depth of this forward, counting itself.
    pub fn depth(&self) -> usize {
        let nested = self
            .fwd_messages
            .iter()
            .map(ForwardedMessage::depth)
            .chain(self.reply_message.iter().map(|reply| reply.depth()))
            .max()
            .unwrap_or(0);
        nested + 1
    }
}

/// Notification settings of a chat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushSettings {
    #[serde(with = "crate::flag")]
    pub sound: bool,
    /// Unix time until which notifications are muted, `0` when not muted.
    pub disabled_until: i64,
}

/// A service action inside a chat (member joined, title changed, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAction {
    #[serde(rename = "type")]
    pub kind: ChatActionKind,
    #[serde(default)]
    pub member_id: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub photo: Option<ChatPhoto>,
}

/// The kind of a [`ChatAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatActionKind {
    ChatPhotoUpdate,
    ChatPhotoRemove,
    ChatCreate,
    ChatTitleUpdate,
    ChatInviteUser,
    ChatKickUser,
    ChatPinMessage,
    ChatUnpinMessage,
    ChatInviteUserByLink,
    ChatScreenshot,
    #[serde(other)]
    Unknown,
}

/// Chat cover in the sizes attached to a photo-update action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatPhoto {
    pub photo_50: String,
    pub photo_100: String,
    pub photo_200: String,
}

/// One entry of `messages.getDialogs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogItem {
    pub message: Message,
    /// Id of the last message read by the current user.
    #[serde(default)]
    pub in_read: i64,
    /// Id of the last outgoing message read by the peer.
    #[serde(default)]
    pub out_read: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_message_with_flags() {
        let json = r#"{
            "id": 100,
            "date": 1710496800,
            "out": 1,
            "user_id": 42,
            "read_state": 0,
            "title": "",
            "body": "hello",
            "important": true,
            "push_settings": {"sound": 0, "disabled_until": 1710500000}
        }"#;

        let message: Message = serde_json::from_str(json).unwrap();
        assert!(message.out);
        assert!(!message.read_state);
        assert!(message.important);
        assert_eq!(message.peer_id(), 42);
        assert_eq!(message.push_settings.unwrap().disabled_until, 1710500000);
        assert!(message.sent_at().is_some());
        assert!(message.geo.is_none());
        assert!(message.action.is_none());
    }

    #[test]
    fn chat_message_peer_uses_offset() {
        let message: Message = serde_json::from_str(r#"{"id":1,"chat_id":7,"user_id":42}"#).unwrap();
        assert_eq!(message.peer_id(), 2_000_000_007);
    }

    #[test]
    fn read_state_as_boolean_is_rejected() {
        let err = serde_json::from_str::<Message>(r#"{"id":1,"read_state":true}"#).unwrap_err();
        assert!(err.to_string().contains("invalid type"));
    }

    #[test]
    fn important_as_integer_is_rejected() {
        assert!(serde_json::from_str::<Message>(r#"{"id":1,"important":1}"#).is_err());
    }

    #[test]
    fn forward_chain_keeps_each_level() {
        let json = r#"{
            "id": 1,
            "body": "root",
            "attachments": [{"type": "link", "link": {"url": "https://root.example"}}],
            "fwd_messages": [{
                "user_id": 10,
                "body": "level 1",
                "attachments": [{"type": "link", "link": {"url": "https://one.example"}}],
                "fwd_messages": [{
                    "user_id": 20,
                    "body": "level 2",
                    "fwd_messages": [{
                        "user_id": 30,
                        "body": "level 3",
                        "attachments": [
                            {"type": "doc", "doc": {"id": 3, "title": "three.txt"}},
                            {"type": "link", "link": {"url": "https://three.example"}}
                        ]
                    }]
                }]
            }]
        }"#;

        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.attachments.len(), 1);
        assert_eq!(message.fwd_messages.len(), 1);

        let first = &message.fwd_messages[0];
        let second = &first.fwd_messages[0];
        let third = &second.fwd_messages[0];
        assert_eq!(first.depth(), 3);
        assert_eq!(
            [first.content(), second.content(), third.content()],
            ["level 1", "level 2", "level 3"]
        );
        assert_eq!(first.attachments.len(), 1);
        assert!(second.attachments.is_empty());
        assert_eq!(third.attachments.len(), 2);
        assert!(third.fwd_messages.is_empty());
    }

    #[test]
    fn reply_message_shares_forward_shape() {
        let json = r#"{
            "id": 5,
            "peer_id": 2000000003,
            "from_id": 42,
            "text": "reply",
            "conversation_message_id": 77,
            "reply_message": {
                "from_id": 43,
                "text": "original",
                "fwd_messages": [{"from_id": 44, "text": "quoted"}]
            }
        }"#;

        let message: ConversationMessage = serde_json::from_str(json).unwrap();
        assert!(message.is_chat());
        let reply = message.reply_message.as_deref().unwrap();
        assert_eq!(reply.author_id(), 43);
        assert_eq!(reply.depth(), 2);
        assert_eq!(reply.fwd_messages[0].content(), "quoted");
    }

    #[test]
    fn chat_action_kinds() {
        let json = r#"{"type": "chat_invite_user", "member_id": 42}"#;
        let action: ChatAction = serde_json::from_str(json).unwrap();
        assert_eq!(action.kind, ChatActionKind::ChatInviteUser);
        assert_eq!(action.member_id, Some(42));

        let json = r#"{"type": "chat_style_update"}"#;
        let action: ChatAction = serde_json::from_str(json).unwrap();
        assert_eq!(action.kind, ChatActionKind::Unknown);
    }

    #[test]
    fn dialog_item_requires_message() {
        assert!(serde_json::from_str::<DialogItem>(r#"{"in_read": 3}"#).is_err());
    }
}
