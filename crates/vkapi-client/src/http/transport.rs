//! [`Transport`] over HTTPS with reqwest.

use tracing::{debug, warn};

use super::config::HttpConfig;
use crate::error::TransportError;
use crate::params::Params;
use crate::transport::{BoxFuture, Transport};

/// Calls remote methods over HTTP.
///
/// Each call is a form-encoded POST to `{base_url}method/{name}` carrying the
/// operation parameters plus `access_token`, `v` and, when configured,
/// `lang`. Any 2xx body is returned as is, including error envelopes.
#[derive(Debug)]
pub struct HttpTransport {
    http_client: reqwest::Client,
    config: HttpConfig,
}

impl HttpTransport {
    /// Creates a transport with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: HttpConfig) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                TransportError::other(format!("failed to create HTTP client: {}", e)).with_source(e)
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Builds the form: operation parameters, then the fixed fields.
    fn form(&self, params: &Params) -> Vec<(String, String)> {
        let mut form: Vec<(String, String)> = params
            .iter()
            .filter(|(key, _)| !matches!(*key, "access_token" | "v" | "lang"))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        form.push(("access_token".to_string(), self.config.access_token.clone()));
        form.push(("v".to_string(), self.config.api_version.clone()));
        if let Some(lang) = &self.config.lang {
            form.push(("lang".to_string(), lang.clone()));
        }
        form
    }

    async fn post(&self, method: &str, params: &Params) -> Result<Vec<u8>, TransportError> {
        let url = self.config.method_url(method).map_err(|e| {
            TransportError::other(format!("invalid method name {method:?}: {e}")).with_source(e)
        })?;

        debug!(%url, "posting");
        let response = self
            .http_client
            .post(url)
            .form(&self.form(params))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::timeout("request timeout").with_source(e)
                } else if e.is_connect() {
                    TransportError::connection(format!("connection failed: {}", e)).with_source(e)
                } else {
                    TransportError::other(format!("request failed: {}", e)).with_source(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(method, %status, "non-success HTTP status");
            return Err(TransportError::status(status.as_u16(), body));
        }

        let body = response.bytes().await.map_err(|e| {
            TransportError::body(format!("failed to read response: {}", e)).with_source(e)
        })?;
        Ok(body.to_vec())
    }
}

impl Transport for HttpTransport {
    fn invoke<'a>(
        &'a self,
        method: &'a str,
        params: &'a Params,
    ) -> BoxFuture<'a, Result<Vec<u8>, TransportError>> {
        Box::pin(self.post(method, params))
    }
}
