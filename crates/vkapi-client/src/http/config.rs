//! HTTP transport configuration.

use std::time::Duration;
use url::Url;

/// Configuration for [`HttpTransport`](super::HttpTransport).
#[derive(Clone)]
pub struct HttpConfig {
    /// Access token sent with every call.
    pub access_token: String,

    /// API root; methods are called at `{base_url}method/{name}`.
    pub base_url: Url,

    /// API version sent as `v`.
    pub api_version: String,

    /// Response language sent as `lang`, if set.
    pub lang: Option<String>,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl HttpConfig {
    /// Default API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.vk.com/";

    /// Default API version.
    pub const DEFAULT_API_VERSION: &'static str = "5.131";

    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a configuration for the public API with the given token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: default_base_url(),
            api_version: Self::DEFAULT_API_VERSION.to_string(),
            lang: None,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("vkapi/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the API root.
    ///
    /// A missing trailing slash is added so method paths join below it.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn with_base_url(mut self, url: impl AsRef<str>) -> Result<Self, url::ParseError> {
        let url = url.as_ref();
        self.base_url = if url.ends_with('/') {
            Url::parse(url)?
        } else {
            Url::parse(&format!("{url}/"))?
        };
        Ok(self)
    }

    /// Sets the API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sets the response language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the endpoint of `method`.
    ///
    /// # Errors
    ///
    /// Returns an error if `method` does not form a valid path segment.
    pub fn method_url(&self, method: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(&format!("method/{method}"))
    }
}

// The token stays out of logs.
impl std::fmt::Debug for HttpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConfig")
            .field("access_token", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("lang", &self.lang)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn default_base_url() -> Url {
    Url::parse(HttpConfig::DEFAULT_BASE_URL).expect("default base URL is valid")
}
