//! Client configuration.

/// How to treat a `geo` block that does not match the [`Geo`] shape.
///
/// `messages.getDialogs` has been observed to return geo payloads in more
/// than one shape. This is an explicit choice rather than a silent default.
///
/// [`Geo`]: vkapi_core::Geo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GeoPolicy {
    /// A malformed geo block fails the whole call with a decode error.
    Strict,
    /// A malformed geo block is dropped (decoded as absent) and logged.
    #[default]
    Tolerant,
}

/// Configuration for [`Client`](crate::Client).
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Geo handling for `messages.getDialogs`.
    pub geo_policy: GeoPolicy,
}

impl ClientConfig {
    /// Creates a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the geo policy.
    pub fn with_geo_policy(mut self, policy: GeoPolicy) -> Self {
        self.geo_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_tolerant_geo() {
        assert_eq!(ClientConfig::new().geo_policy, GeoPolicy::Tolerant);
    }

    #[test]
    fn builder() {
        let config = ClientConfig::new().with_geo_policy(GeoPolicy::Strict);
        assert_eq!(config.geo_policy, GeoPolicy::Strict);
    }
}
