//! Response envelope decoding.
//!
//! Every response body is one of
//!
//! ```json
//! {"response": <payload>}
//! {"error": {"error_code": 15, "error_msg": "Access denied"}}
//! ```
//!
//! [`open`] classifies the body and hands back the payload undecoded, so an
//! error envelope is never force-decoded into a success shape. The payload is
//! then decoded by the operation with [`decode`] or one of the map-of-counters
//! extractors.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::value::RawValue;

use crate::error::{ApiError, DecodeError, Error, Result};

#[derive(Deserialize)]
struct RawEnvelope<'a> {
    #[serde(borrow, default)]
    response: Option<&'a RawValue>,
    #[serde(default)]
    error: Option<ApiError>,
}

/// Splits a response body into its payload or an [`ApiError`].
///
/// # Errors
///
/// - [`Error::Api`] for an error envelope
/// - [`Error::Decode`] if the body is not JSON or carries neither key
pub fn open(body: &[u8]) -> Result<&RawValue> {
    let envelope: RawEnvelope<'_> =
        serde_json::from_slice(body).map_err(|e| DecodeError::json("envelope", e))?;

    if let Some(error) = envelope.error {
        return Err(Error::Api(error));
    }

    envelope.response.ok_or_else(|| {
        DecodeError::new("envelope", "body has neither `response` nor `error`").into()
    })
}

/// Decodes a payload into `T`, naming `method` in any error.
///
/// Nesting depth is bounded by the input only: forward chains and repost
/// histories are decoded on a stack that grows as needed.
pub fn decode<T: DeserializeOwned>(method: &str, payload: &RawValue) -> Result<T> {
    let mut de = serde_json::Deserializer::from_str(payload.get());
    de.disable_recursion_limit();

    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))
        .map_err(|e| DecodeError::json(method, e))?;
    de.end().map_err(|e| DecodeError::json(method, e))?;
    Ok(value)
}

/// Counts the entries of a `{"<id>": 0|1, ...}` map whose value is `1`.
///
/// Used by `messages.delete`, which reports per-id success.
pub fn count_successes(method: &str, payload: &RawValue) -> Result<usize> {
    let outcome: BTreeMap<String, i64> = decode(method, payload)?;
    Ok(outcome.values().filter(|&&status| status == 1).count())
}

/// Extracts one integer field from a `{"<key>": <int>, ...}` object.
///
/// Used by creation methods that answer with the new object's id. Other
/// fields of the object are ignored whatever their type.
pub fn extract_id(method: &str, payload: &RawValue, key: &str) -> Result<i64> {
    let fields: serde_json::Map<String, Value> = decode(method, payload)?;
    match fields.get(key) {
        Some(value) => value.as_i64().ok_or_else(|| {
            DecodeError::new(method, format!("`{key}` is not an integer: {value}")).into()
        }),
        None => Err(DecodeError::new(method, format!("response has no `{key}`")).into()),
    }
}
