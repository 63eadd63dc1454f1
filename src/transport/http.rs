use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::constants::USER_AGENT_VALUE;
use crate::errors::ClientError;
use crate::errors::ErrorKind::*;
use crate::transport::{Transport, TransportRequest, TransportResponse};

/// [`Transport`] implementation backed by a [`reqwest::Client`].
pub struct HttpTransport {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a new [`HttpTransport`] bound to `base_url`, with reqwest's default timeouts.
    ///
    /// # Errors
    ///
    /// This method fails if the underlying [`reqwest::Client`] can't be initialized.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, None)
    }

    pub(crate) fn with_timeout(
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        match builder.build() {
            Ok(http_client) => Ok(Self {
                base_url: base_url.trim_end_matches('/').to_owned(),
                http_client,
            }),
            Err(err) => Err(ClientError::new(
                HttpClientInitFailure,
                format!("Failed to initialize the HTTP client. {err}"),
            )),
        }
    }

    /// The base URL every request path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, ClientError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!("Sending {} request to {url}", request.method);

        let result = self
            .http_client
            .request(request.method, url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await;

        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                match response.text().await {
                    Ok(body) => Ok(TransportResponse { status, body }),
                    Err(body_error) if body_error.is_timeout() => Err(ClientError::new(
                        HttpRequestTimeout,
                        "Request timed out while reading the evaluation response.".to_owned(),
                    )),
                    Err(body_error) => Err(ClientError::new(
                        HttpRequestFailure,
                        format!("Failed to read the HTTP response body. Status code: {status}. {body_error}"),
                    )),
                }
            }
            Err(error) => {
                if error.is_timeout() {
                    Err(ClientError::new(
                        HttpRequestTimeout,
                        "Request timed out while trying to reach the evaluation service.".to_owned(),
                    ))
                } else {
                    Err(ClientError::new(HttpRequestFailure, format!("Unexpected error occurred while trying to reach the evaluation service. It is most likely due to a local network issue. Please make sure your application can reach the Flipt server over HTTP. {error}")))
                }
            }
        }
    }
}
