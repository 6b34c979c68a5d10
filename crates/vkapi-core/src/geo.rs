//! Location payload attached to messages.

use serde::{Deserialize, Serialize};

/// A geo block on a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geo {
    /// Location kind, e.g. `"point"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Coordinates, when the payload carries them.
    pub coordinates: Option<Vec<Coordinate>>,
    /// Named place, when one was attached.
    pub place: Option<Place>,
    /// Whether the client should render a map (`0`/`1`).
    #[serde(with = "crate::flag")]
    pub showmap: bool,
}

/// A single latitude/longitude pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A named place referenced by a geo block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Place {
    pub id: i64,
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created: i64,
    pub icon: String,
    pub country: String,
    pub city: String,
}
