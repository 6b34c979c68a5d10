//! Serde helpers for flags the API transmits as the integers `0`/`1`.
//!
//! Use with `#[serde(default, with = "crate::flag")]`. Only integers are
//! accepted: a JSON boolean on one of these fields is a decode error, since
//! each field's representation is fixed by the remote method's contract.

use serde::de::{Error, Unexpected};
use serde::{Deserialize, Deserializer, Serializer};

/// Serializes a flag back to its integer form.
pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u8(u8::from(*value))
}

/// Deserializes a `0`/`1` integer into a `bool`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match u64::deserialize(deserializer)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(D::Error::invalid_value(
            Unexpected::Unsigned(other),
            &"0 or 1",
        )),
    }
}
