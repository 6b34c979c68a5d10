//! Entity model for the VK API.
//!
//! Every type here is a decode target for a remote method's payload:
//!
//! - [`Message`], [`ConversationMessage`] and the recursive [`ForwardedMessage`] tree
//! - [`WallPost`] with its recursive copy history, and [`WallComment`]
//! - [`Attachment`], a closed sum type over the supported media kinds
//! - [`Counted`] and [`Extended`] list shapes, with [`User`]/[`Group`] side tables
//!
//! Values are plain owned data: decoded once, handed to the caller, never
//! shared or mutated by the client.

pub mod attachment;
pub mod envelope;
pub mod flag;
pub mod geo;
pub mod keyboard;
pub mod message;
pub mod profile;
pub mod time;
pub mod tracing;
pub mod wall;

pub use attachment::{Attachment, Audio, Document, Link, Photo, PhotoSize, Sticker, Video};
pub use envelope::{Counted, Extended, HistoryAttachmentItem, HistoryAttachments};
pub use geo::{Coordinate, Geo, Place};
pub use keyboard::{Button, ButtonAction, ButtonColor, Keyboard};
pub use message::{
    CHAT_PEER_OFFSET, ChatAction, ChatActionKind, ChatPhoto, ConversationMessage, DialogItem,
    ForwardedMessage, Message, PushSettings,
};
pub use profile::{Group, User};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use wall::{
    CommentThread, CommentsInfo, Donut, LikesInfo, PostSource, RepostsInfo, ViewsInfo, WallComment,
    WallPost,
};
