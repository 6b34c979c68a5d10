//! Typed client for the VK API.
//!
//! This crate turns typed calls into remote method invocations and decodes
//! the results into the [`vkapi_core`] entity model:
//!
//! - [`Params`] - Parameter encoding into a flat string map
//! - [`Transport`] - The collaborator that executes a remote method
//! - [`envelope`] - Splitting a response body into payload or [`ApiError`]
//! - [`Client`] - The typed operations, one per remote method
//! - [`Error`] - Transport, API, decode and argument failures
//!
//! # Architecture
//!
//! ```text
//!   client.wall_get("apiclub", 10, params)
//!                     │
//!                     ▼
//!              ┌─────────────┐
//!              │   Params    │  "owner_id"/"domain", "count", ...
//!              └──────┬──────┘
//!                     │
//!                     ▼ Transport::invoke()
//! ┌─────────────────┐    ┌─────────────────┐
//! │  HttpTransport  │    │ StaticTransport │
//! └────────┬────────┘    └────────┬────────┘
//!          │      raw body        │
//!          └──────────┬───────────┘
//!                     │
//!                     ▼ envelope::open()
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//!   {"response": ..}        {"error": ..}
//!         │                       │
//!         ▼ decode                ▼
//!  ┌─────────────────────┐  ┌──────────┐
//!  │ Extended<WallPost>  │  │ ApiError │
//!  └─────────────────────┘  └──────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use vkapi_client::http::{HttpConfig, HttpTransport};
//! use vkapi_client::{Client, Params};
//!
//! let client = Client::new(HttpTransport::new(HttpConfig::new(token))?);
//!
//! let (total, messages) = client.messages_get_history(20, 7, true, Params::new()).await?;
//! let id = client.messages_send(42_i64, "hello", Params::new()).await?;
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod messages;
pub mod params;
pub mod transport;
pub mod wall;

// Re-export main types at crate root
pub use client::Client;
pub use config::{ClientConfig, GeoPolicy};
pub use error::{ApiError, DecodeError, Error, RequestParam, Result, TransportError, TransportErrorKind};
#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpTransport};
pub use params::{Activity, MediaType, Params, Target, dialog_peer};
pub use transport::{BoxFuture, RecordedCall, StaticTransport, Transport};
