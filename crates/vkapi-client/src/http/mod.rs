//! HTTP transport for the public API.
//!
//! Enabled by the `http` feature (on by default).
//!
//! # Example
//!
//! ```ignore
//! use vkapi_client::http::{HttpConfig, HttpTransport};
//! use vkapi_client::{Client, Params};
//!
//! let transport = HttpTransport::new(HttpConfig::new(token).with_lang("en"))?;
//! let client = Client::new(transport);
//! let wall = client.wall_get("apiclub", 10, Params::new()).await?;
//! ```

mod config;
mod transport;

pub use config::HttpConfig;
pub use transport::HttpTransport;
