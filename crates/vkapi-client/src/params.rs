//! Flat string-keyed parameter encoding for remote methods.
//!
//! Every operation builds its request through [`Params`], so the encoding
//! rules live in one place:
//!
//! - integers are decimal strings, booleans are `"1"`/`"0"`
//! - id lists are comma-joined in input order, without spaces or dedup
//! - setting a key that already exists overwrites it, so operation-specific
//!   parameters always win over a caller-supplied bag

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use vkapi_core::{CHAT_PEER_OFFSET, Keyboard};

use crate::error::{Error, Result};

/// Parameters of a single remote method call.
///
/// Keys are kept sorted so the encoding is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a string parameter, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Sets an integer parameter.
    pub fn set_int(&mut self, key: impl Into<String>, value: i64) -> &mut Self {
        self.set(key, value.to_string())
    }

    /// Sets a boolean flag as `"1"` or `"0"`.
    pub fn set_flag(&mut self, key: impl Into<String>, value: bool) -> &mut Self {
        self.set(key, if value { "1" } else { "0" })
    }

    /// Sets a comma-joined list of ids.
    pub fn set_ids(&mut self, key: impl Into<String>, ids: &[i64]) -> &mut Self {
        self.set(key, join(ids))
    }

    /// Sets a comma-joined list of strings, e.g. profile `fields`.
    pub fn set_list<S: AsRef<str>>(&mut self, key: impl Into<String>, items: &[S]) -> &mut Self {
        let joined = items
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");
        self.set(key, joined)
    }

    /// Sets a numeric-or-domain target.
    ///
    /// [`Target::Id`] goes into `id_key`, [`Target::Domain`] into `domain`.
    /// Any stale value of the other key is removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty domain.
    pub fn set_target(&mut self, id_key: &str, target: &Target) -> Result<&mut Self> {
        match target {
            Target::Id(id) => {
                self.0.remove("domain");
                Ok(self.set_int(id_key, *id))
            }
            Target::Domain(domain) if domain.trim().is_empty() => Err(Error::InvalidArgument(
                "target domain must not be empty".to_string(),
            )),
            Target::Domain(domain) => {
                self.0.remove(id_key);
                Ok(self.set("domain", domain.as_str()))
            }
        }
    }

    /// Sets a bot keyboard as its JSON encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the keyboard cannot be encoded.
    pub fn set_keyboard(&mut self, keyboard: &Keyboard) -> Result<&mut Self> {
        let json = serde_json::to_string(keyboard)
            .map_err(|e| Error::InvalidArgument(format!("keyboard: {e}")))?;
        Ok(self.set("keyboard", json))
    }

    /// Returns the value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns true if the flag parameter is set to `"1"`.
    pub fn is_flag_set(&self, key: &str) -> bool {
        self.get(key) == Some("1")
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl fmt::Display for Params {
    /// Renders the parameters as `key=value&...` for logs.
    ///
    /// Values are not URL-encoded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// A call target that is either a numeric id or a short name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A user id, a negative community id, or a peer id.
    Id(i64),
    /// A screen name such as `"durov"` or `"apiclub"`.
    Domain(String),
}

impl From<i64> for Target {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for Target {
    fn from(domain: &str) -> Self {
        Self::Domain(domain.to_string())
    }
}

impl From<String> for Target {
    fn from(domain: String) -> Self {
        Self::Domain(domain)
    }
}

/// The kind of attachments `messages.getHistoryAttachments` lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Photo,
    Video,
    Audio,
    Doc,
    Link,
    Market,
    Wall,
    Share,
}

impl MediaType {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Doc => "doc",
            Self::Link => "link",
            Self::Market => "market",
            Self::Wall => "wall",
            Self::Share => "share",
        }
    }
}

/// The activity `messages.setActivity` announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// "is typing..."
    Typing,
    /// "is recording a voice message..."
    AudioMessage,
}

impl Activity {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Typing => "typing",
            Self::AudioMessage => "audiomessage",
        }
    }
}

/// Returns the peer id addressing `chat_id`.
///
/// With `is_dialog` set the id is a chat id and is shifted by
/// [`CHAT_PEER_OFFSET`]; otherwise it is a user id and is returned as is.
pub fn dialog_peer(chat_id: i64, is_dialog: bool) -> i64 {
    if is_dialog {
        chat_id + CHAT_PEER_OFFSET
    } else {
        chat_id
    }
}

fn join(ids: &[i64]) -> String {
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
