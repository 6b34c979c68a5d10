//! The typed client.
//!
//! Operations are defined next to the entities they return, in
//! [`messages`](crate::messages) and [`wall`](crate::wall). Each one
//! encodes its parameters, makes exactly one transport call and decodes the
//! result; nothing is retried or cached.

use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::envelope;
use crate::error::Result;
use crate::params::Params;
use crate::transport::Transport;

/// Typed client over a [`Transport`].
///
/// `Client` holds no mutable state and can be shared across tasks.
pub struct Client {
    transport: Box<dyn Transport>,
    config: ClientConfig,
}

impl Client {
    /// Creates a client with the default configuration.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    /// Creates a client with the given configuration.
    pub fn with_config(transport: impl Transport + 'static, config: ClientConfig) -> Self {
        Self {
            transport: Box::new(transport),
            config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Invokes `method` and returns the raw response body.
    ///
    /// Escape hatch for methods without a typed operation; the body still
    /// has to be opened with [`envelope::open`].
    pub async fn invoke_raw(&self, method: &str, params: &Params) -> Result<Vec<u8>> {
        debug!(method, params = params.len(), "invoking remote method");
        let body = self.transport.invoke(method, params).await?;
        trace!(method, bytes = body.len(), "received response");
        Ok(body)
    }

    /// Invokes `method` and passes the opened payload to `decode`.
    pub(crate) async fn call_with<T, F>(&self, method: &str, params: &Params, decode: F) -> Result<T>
    where
        F: FnOnce(&RawValue) -> Result<T>,
    {
        let body = self.invoke_raw(method, params).await?;
        let payload = envelope::open(&body)?;
        decode(payload)
    }

    /// Invokes `method` and decodes the payload into `T`.
    pub(crate) async fn call<T: DeserializeOwned>(&self, method: &str, params: &Params) -> Result<T> {
        self.call_with(method, params, |payload| envelope::decode(method, payload))
            .await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
