//! Transport trait definition.
//!
//! The [`Transport`] is the collaborator that actually executes a remote
//! method: it owns connections, authentication, timeouts and any retry
//! policy. The client hands it a method name and encoded parameters and gets
//! back the raw response body.
//!
//! A transport distinguishes two outcomes only:
//! - a body was received (even one encoding an API error): `Ok(bytes)`
//! - no body was received: `Err(TransportError)`

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use crate::error::TransportError;
use crate::params::Params;

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe, so a client can hold any
/// transport behind `Box<dyn Transport>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Executes remote methods.
///
/// # Implementation Notes
///
/// - Implementations must be `Send + Sync`; one transport serves concurrent calls
/// - Attach credentials and the API version here, not in `params`
/// - Surface timeouts and cancellation as [`TransportError`], never as a body
///
/// # Example Implementation
///
/// ```ignore
/// struct LoggingTransport<T>(T);
///
/// impl<T: Transport> Transport for LoggingTransport<T> {
///     fn invoke<'a>(
///         &'a self,
///         method: &'a str,
///         params: &'a Params,
///     ) -> BoxFuture<'a, Result<Vec<u8>, TransportError>> {
///         Box::pin(async move {
///             println!("{method}?{params}");
///             self.0.invoke(method, params).await
///         })
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Invokes `method` with `params` and returns the raw response body.
    fn invoke<'a>(
        &'a self,
        method: &'a str,
        params: &'a Params,
    ) -> BoxFuture<'a, Result<Vec<u8>, TransportError>>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn invoke<'a>(
        &'a self,
        method: &'a str,
        params: &'a Params,
    ) -> BoxFuture<'a, Result<Vec<u8>, TransportError>> {
        (**self).invoke(method, params)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn invoke<'a>(
        &'a self,
        method: &'a str,
        params: &'a Params,
    ) -> BoxFuture<'a, Result<Vec<u8>, TransportError>> {
        (**self).invoke(method, params)
    }
}

/// A recorded call made through a [`StaticTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Params,
}

/// A transport answering every call with the same canned outcome.
///
/// Records each call it receives. Useful for tests and for replaying
/// captured responses.
#[derive(Debug)]
pub struct StaticTransport {
    outcome: Outcome,
    calls: Mutex<Vec<RecordedCall>>,
}

#[derive(Debug)]
enum Outcome {
    Body(Vec<u8>),
    Failure(TransportError),
}

impl StaticTransport {
    /// Creates a transport that always returns `body`.
    pub fn with_body(body: impl Into<Vec<u8>>) -> Self {
        Self {
            outcome: Outcome::Body(body.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a transport that always fails with an error like `error`.
    pub fn failing(error: TransportError) -> Self {
        Self {
            outcome: Outcome::Failure(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the calls received so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Returns the most recent call.
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls().pop()
    }
}

impl Transport for StaticTransport {
    fn invoke<'a>(
        &'a self,
        method: &'a str,
        params: &'a Params,
    ) -> BoxFuture<'a, Result<Vec<u8>, TransportError>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                method: method.to_string(),
                params: params.clone(),
            });
        }

        // TransportError holds a boxed source and is not Clone; rebuild it
        let result = match &self.outcome {
            Outcome::Body(body) => Ok(body.clone()),
            Outcome::Failure(error) => {
                let mut rebuilt = TransportError::new(error.kind(), error.message());
                if let Some(status) = error.http_status() {
                    rebuilt = TransportError::status(status, error.message());
                }
                Err(rebuilt)
            }
        };
        Box::pin(async move { result })
    }
}
