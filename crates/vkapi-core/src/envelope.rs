//! Result shapes wrapping lists of entities.
//!
//! `count` is the number of matching items on the remote side and may be
//! larger than `items.len()` when results are paged. Iterate `items`, never
//! `0..count`.

use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;
use crate::profile::{Group, User};

/// A counted list: `{"count": N, "items": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counted<T> {
    pub count: i64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Counted<T> {
    /// Splits into `(count, items)`.
    pub fn into_parts(self) -> (i64, Vec<T>) {
        (self.count, self.items)
    }
}

/// An extended list carrying the `profiles`/`groups` side tables.
///
/// Entities reference side-table records by id only; use [`Extended::profile`]
/// and [`Extended::group`] to resolve them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extended<T> {
    pub count: i64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub profiles: Vec<User>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl<T> Extended<T> {
    /// Builds an extended list from a response that carries no count.
    ///
    /// `count` is the number of decoded items.
    pub fn from_items(items: Vec<T>, profiles: Vec<User>, groups: Vec<Group>) -> Self {
        Self {
            count: items.len() as i64,
            items,
            profiles,
            groups,
        }
    }

    /// Looks up a user in the `profiles` side table.
    pub fn profile(&self, user_id: i64) -> Option<&User> {
        self.profiles.iter().find(|user| user.id == user_id)
    }

    /// Looks up a community in the `groups` side table.
    ///
    /// Accepts either the group id or the negative owner id used on walls.
    pub fn group(&self, id: i64) -> Option<&Group> {
        let id = id.unsigned_abs();
        self.groups.iter().find(|group| group.id.unsigned_abs() == id)
    }
}

impl<T> From<Counted<T>> for Extended<T> {
    fn from(counted: Counted<T>) -> Self {
        Self {
            count: counted.count,
            items: counted.items,
            profiles: Vec::new(),
            groups: Vec::new(),
        }
    }
}

/// Result of `messages.getHistoryAttachments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryAttachments {
    #[serde(default)]
    pub items: Vec<HistoryAttachmentItem>,
    /// Cursor for the next page, absent on the last one.
    #[serde(default)]
    pub next_from: Option<String>,
}

/// One attachment found in a conversation's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryAttachmentItem {
    pub message_id: i64,
    #[serde(default)]
    pub from_id: Option<i64>,
    pub attachment: Attachment,
}
