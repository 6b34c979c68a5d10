//! Unix timestamp conversion for entity dates.

use chrono::{DateTime, Utc};

/// Converts a unix timestamp (seconds) into a UTC datetime.
///
/// Returns `None` for `0`, which the API uses for "not set", and for values
/// outside chrono's range.
pub fn from_unix(seconds: i64) -> Option<DateTime<Utc>> {
    if seconds == 0 {
        return None;
    }
    DateTime::from_timestamp(seconds, 0)
}
