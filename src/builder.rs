use crate::constants::DEFAULT_BASE_URL;
use crate::errors::ClientError;
use crate::transport::http::HttpTransport;
use crate::transport::Transport;
use crate::{Client, Context};
use std::time::Duration;

/// Builder to create a Flipt [`Client`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use flipt::{Client, Context};
///
/// let builder = Client::builder("API_TOKEN", "default")
///     .base_url("https://flipt.example.com")
///     .default_context(Context::from([("country", "Hungary")]))
///     .http_timeout(Duration::from_secs(10));
///
/// let client = builder.build().unwrap();
/// ```
pub struct ClientBuilder {
    api_token: String,
    namespace: String,
    base_url: Option<String>,
    default_context: Option<Context>,
    default_entity_id: Option<String>,
    http_timeout: Option<Duration>,
}

impl ClientBuilder {
    pub(crate) fn new(api_token: &str, namespace: &str) -> Self {
        Self {
            api_token: api_token.to_owned(),
            namespace: namespace.to_owned(),
            base_url: None,
            default_context: None,
            default_entity_id: None,
            http_timeout: None,
        }
    }

    /// Sets the URL of the Flipt server.
    /// Default value is `http://localhost:8080`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flipt::Client;
    ///
    /// let builder = Client::builder("API_TOKEN", "default")
    ///     .base_url("https://flipt.example.com");
    /// ```
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_owned());
        self
    }

    /// Sets the context merged into every evaluation made by the [`Client`].
    /// Default value is an empty [`Context`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flipt::{Client, Context};
    ///
    /// let builder = Client::builder("API_TOKEN", "default")
    ///     .default_context(Context::new().with("region", "eu"));
    /// ```
    pub fn default_context(mut self, context: Context) -> Self {
        self.default_context = Some(context);
        self
    }

    /// Sets the entity ID used when an evaluation call doesn't specify one.
    /// Default value is an empty string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flipt::Client;
    ///
    /// let builder = Client::builder("API_TOKEN", "default")
    ///     .default_entity_id("user-id");
    /// ```
    pub fn default_entity_id(mut self, entity_id: &str) -> Self {
        self.default_entity_id = Some(entity_id.to_owned());
        self
    }

    /// Sets the HTTP request timeout of the built-in [`HttpTransport`].
    /// Not set by default, the defaults of [`reqwest`] apply.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use flipt::Client;
    ///
    /// let builder = Client::builder("API_TOKEN", "default")
    ///     .http_timeout(Duration::from_secs(60));
    /// ```
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }

    /// Creates a [`Client`] that reaches the configured base URL over HTTP.
    ///
    /// # Errors
    ///
    /// This method fails if the underlying HTTP client can't be initialized.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use flipt::Client;
    ///
    /// let client = Client::builder("API_TOKEN", "default")
    ///     .base_url("https://flipt.example.com")
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn build(mut self) -> Result<Client, ClientError> {
        let base_url = self
            .base_url
            .take()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let transport = HttpTransport::with_timeout(base_url.as_str(), self.http_timeout)?;
        Ok(self.build_with_transport(transport))
    }

    /// Creates a [`Client`] on top of an existing [`Transport`].
    ///
    /// The transport is used unchanged, the base URL and HTTP timeout set on the builder are ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flipt::{Client, HttpTransport};
    ///
    /// let transport = HttpTransport::new("https://flipt.example.com").unwrap();
    /// let client = Client::builder("API_TOKEN", "default")
    ///     .build_with_transport(transport);
    /// ```
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Client<T> {
        Client::with_parts(
            transport,
            self.api_token,
            self.namespace,
            self.default_context.unwrap_or_default(),
            self.default_entity_id.unwrap_or_default(),
        )
    }
}
