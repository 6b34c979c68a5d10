//! Media attachments on messages, wall posts and comments.
//!
//! On the wire an attachment is an object whose `type` tag names the sibling
//! key holding the payload:
//!
//! ```json
//! {"type": "photo", "photo": {"id": 1, "owner_id": 2, "sizes": []}}
//! ```
//!
//! [`Attachment`] decodes the tag first and then only the payload the tag
//! selects, so exactly one variant is ever populated. A known tag whose
//! payload is missing or `null` is a decode error rather than a zero-valued
//! variant. Tags outside the supported set decode to [`Attachment::Other`],
//! which carries no payload at all.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::wall::WallPost;

/// A single attachment.
#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    Audio(Audio),
    Video(Video),
    Photo(Photo),
    Document(Document),
    Link(Link),
    /// A repost of a wall post, which may carry attachments of its own.
    Wall(Box<WallPost>),
    Sticker(Sticker),
    /// A tag this client does not model (e.g. `"poll"`, `"market"`).
    Other {
        /// The raw type tag.
        kind: String,
    },
}

impl Attachment {
    /// Returns the wire type tag.
    pub fn kind(&self) -> &str {
        match self {
            Self::Audio(_) => "audio",
            Self::Video(_) => "video",
            Self::Photo(_) => "photo",
            Self::Document(_) => "doc",
            Self::Link(_) => "link",
            Self::Wall(_) => "wall",
            Self::Sticker(_) => "sticker",
            Self::Other { kind } => kind,
        }
    }

    /// Returns the photo payload if this is a photo.
    pub fn as_photo(&self) -> Option<&Photo> {
        match self {
            Self::Photo(photo) => Some(photo),
            _ => None,
        }
    }

    /// Returns the reposted wall post if this is a wall attachment.
    pub fn as_wall(&self) -> Option<&WallPost> {
        match self {
            Self::Wall(post) => Some(post.as_ref()),
            _ => None,
        }
    }

    /// Returns true for tags this client does not model.
    pub fn is_other(&self) -> bool {
        matches!(self, Self::Other { .. })
    }
}

/// Wire form: the tag plus every sibling key, undecoded.
#[derive(Deserialize)]
struct TaggedAttachment {
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

fn payload<T>(fields: &mut Map<String, Value>, kind: &str) -> Result<T, String>
where
    T: serde::de::DeserializeOwned,
{
    match fields.remove(kind) {
        None | Some(Value::Null) => Err(format!(
            "attachment of type `{kind}` has no `{kind}` payload"
        )),
        Some(value) => {
            serde_json::from_value(value).map_err(|e| format!("invalid `{kind}` attachment: {e}"))
        }
    }
}

impl<'de> Deserialize<'de> for Attachment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let TaggedAttachment { kind, mut fields } = TaggedAttachment::deserialize(deserializer)?;
        let attachment = match kind.as_str() {
            "audio" => payload(&mut fields, &kind).map(Self::Audio),
            "video" => payload(&mut fields, &kind).map(Self::Video),
            "photo" => payload(&mut fields, &kind).map(Self::Photo),
            "doc" => payload(&mut fields, &kind).map(Self::Document),
            "link" => payload(&mut fields, &kind).map(Self::Link),
            "wall" => payload(&mut fields, &kind).map(|post| Self::Wall(Box::new(post))),
            "sticker" => payload(&mut fields, &kind).map(Self::Sticker),
            "" => Err("attachment has an empty type tag".to_string()),
            _ => Ok(Self::Other { kind: kind.clone() }),
        };
        attachment.map_err(D::Error::custom)
    }
}

impl Serialize for Attachment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.is_other() { 1 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("type", self.kind())?;
        match self {
            Self::Audio(audio) => map.serialize_entry("audio", audio)?,
            Self::Video(video) => map.serialize_entry("video", video)?,
            Self::Photo(photo) => map.serialize_entry("photo", photo)?,
            Self::Document(doc) => map.serialize_entry("doc", doc)?,
            Self::Link(link) => map.serialize_entry("link", link)?,
            Self::Wall(post) => map.serialize_entry("wall", post)?,
            Self::Sticker(sticker) => map.serialize_entry("sticker", sticker)?,
            Self::Other { .. } => {}
        }
        map.end()
    }
}

/// An audio track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Audio {
    pub id: i64,
    pub owner_id: i64,
    pub artist: String,
    pub title: String,
    /// Duration in seconds.
    pub duration: i64,
    pub url: String,
    pub performer: String,
}

/// A video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    /// Duration in seconds.
    pub duration: i64,
    pub date: i64,
    pub views: i64,
    pub comments: i64,
    pub player: Option<String>,
    pub access_key: Option<String>,
}

/// A photo with its available renditions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Photo {
    pub id: i64,
    pub album_id: i64,
    pub owner_id: i64,
    pub user_id: Option<i64>,
    pub text: String,
    pub date: i64,
    pub sizes: Vec<PhotoSize>,
    pub access_key: Option<String>,
}

impl Photo {
    /// Returns the widest rendition.
    pub fn largest(&self) -> Option<&PhotoSize> {
        self.sizes.iter().max_by_key(|size| size.width)
    }
}

/// One rendition of a photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoSize {
    /// Size class letter (`s`, `m`, `x`, `y`, `z`, `w`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// A document (file).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    /// Size in bytes.
    pub size: u64,
    pub ext: String,
    pub url: String,
    pub date: i64,
    /// Numeric document kind (1 text, 2 archive, 3 gif, 4 image, ...).
    #[serde(rename = "type")]
    pub kind: i32,
}

/// A link preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub url: String,
    pub title: String,
    pub description: String,
    pub target: String,
}

/// A sticker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sticker {
    #[serde(alias = "sticker_id")]
    pub id: i64,
    pub product_id: i64,
    pub photo_64: String,
    pub photo_128: String,
    pub photo_256: String,
    pub photo_352: String,
    pub photo_512: String,
    pub width: u32,
    pub height: u32,
}
