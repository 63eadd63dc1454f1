use crate::errors::ClientError;
use reqwest::header::HeaderMap;
use reqwest::Method;
use std::future::Future;
use std::sync::Arc;

pub mod http;

/// An HTTP request issued by the [`crate::Client`] against the evaluation service.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method of the request.
    pub method: Method,
    /// Path relative to the base URL the transport is bound to, e.g. `/evaluate/v1/boolean`.
    pub path: String,
    /// Headers to send along with the request.
    pub headers: HeaderMap,
    /// JSON encoded request body.
    pub body: String,
}

/// The status and the full body of a response received by a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// An HTTP client bound to a base URL, used by the [`crate::Client`] to reach the evaluation service.
///
/// Connection pooling, TLS and retries are the concern of the implementation.
/// A response with any status code must be returned as [`TransportResponse`],
/// errors are only for requests that could not complete.
///
/// # Examples
///
/// ```rust
/// use flipt::{ClientError, Transport, TransportRequest, TransportResponse};
///
/// struct StaticTransport {}
///
/// impl Transport for StaticTransport {
///     async fn request(&self, _: TransportRequest) -> Result<TransportResponse, ClientError> {
///         Ok(TransportResponse {
///             status: 200,
///             body: r#"{"enabled": true}"#.to_owned(),
///         })
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Issues the given request and returns the received response.
    fn request(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, ClientError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn request(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, ClientError>> + Send {
        (**self).request(request)
    }
}
