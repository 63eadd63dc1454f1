use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error kind that represents failures reported by the [`crate::Client`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Initialization of the internal [`reqwest::Client`] failed.
    HttpClientInitFailure = 1001,
    /// Non-2xx HTTP response was received from the evaluation service.
    UnexpectedHttpResponse = 1101,
    /// The HTTP request timed out.
    HttpRequestTimeout = 1102,
    /// The HTTP request failed (most likely, due to a local network issue).
    HttpRequestFailure = 1103,
    /// The response body was not a valid JSON object.
    InvalidHttpResponseContent = 1105,
    /// A field required to build the evaluation result was missing or had an incompatible type.
    InvalidResponseField = 1106,
    /// The variant attachment could not be decoded as JSON.
    InvalidVariantAttachment = 1107,
}

impl ErrorKind {
    pub(crate) fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Returns `true` when the failure happened while the HTTP call was in flight,
    /// or when the service answered with a non-2xx status.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ErrorKind::UnexpectedHttpResponse
                | ErrorKind::HttpRequestTimeout
                | ErrorKind::HttpRequestFailure
        )
    }

    /// Returns `true` when the service answered, but its response could not be
    /// turned into an evaluation result.
    pub fn is_response_format(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidHttpResponseContent
                | ErrorKind::InvalidResponseField
                | ErrorKind::InvalidVariantAttachment
        )
    }
}

/// Error struct that holds the [`ErrorKind`] and message of the reported failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientError {
    /// Error kind that represents failures reported by the [`crate::Client`].
    pub kind: ErrorKind,
    /// The text representation of the failure.
    pub message: String,
}

impl ClientError {
    pub(crate) fn new(kind: ErrorKind, message: String) -> Self {
        Self { message, kind }
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl Error for ClientError {}
