use crate::builder::ClientBuilder;
use crate::constants::{
    BEARER_PREFIX, BOOLEAN_EVALUATION_PATH, JSON_CONTENT_TYPE, VARIANT_EVALUATION_PATH,
};
use crate::errors::{ClientError, ErrorKind};
use crate::model::request::EvaluationRequest;
use crate::model::result::{result_from_json, BooleanEvaluationResult, VariantEvaluationResult};
use crate::transport::http::HttpTransport;
use crate::transport::{Transport, TransportRequest};
use crate::Context;
use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// The main component for evaluating feature flags against a Flipt server.
///
/// A [`Client`] is immutable. [`Client::with_namespace`] and [`Client::with_context`]
/// return new clients that share the transport of the original one.
///
/// # Examples
///
/// ```no_run
/// use flipt::{Client, Context};
///
/// #[tokio::main]
/// async fn main() {
///     let client = Client::builder("API_TOKEN", "default")
///         .base_url("https://flipt.example.com")
///         .default_entity_id("user-id")
///         .build()
///         .unwrap();
///
///     let context = Context::from([("plan", "premium")]);
///     let result = client.evaluate_boolean("flag-key", Some(context), None).await.unwrap();
///     let is_flag_enabled = result.enabled();
/// }
/// ```
pub struct Client<T: Transport = HttpTransport> {
    transport: Arc<T>,
    api_token: String,
    namespace: String,
    default_context: Context,
    default_entity_id: String,
}

impl Client<HttpTransport> {
    /// Creates a new [`ClientBuilder`] used to build a [`Client`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use flipt::Client;
    ///
    /// let client = Client::builder("API_TOKEN", "default")
    ///     .base_url("https://flipt.example.com")
    ///     .default_entity_id("user-id")
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn builder(api_token: &str, namespace: &str) -> ClientBuilder {
        ClientBuilder::new(api_token, namespace)
    }

    /// Creates a new [`Client`] bound to `host`, with an empty default context and entity ID.
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
    /// let client = Client::new("https://flipt.example.com", "API_TOKEN", "default").unwrap();
    /// ```
    pub fn new(host: &str, api_token: &str, namespace: &str) -> Result<Self, ClientError> {
        ClientBuilder::new(api_token, namespace)
            .base_url(host)
            .build()
    }
}

impl<T: Transport> Client<T> {
    pub(crate) fn with_parts(
        transport: T,
        api_token: String,
        namespace: String,
        default_context: Context,
        default_entity_id: String,
    ) -> Self {
        Self {
            transport: Arc::new(transport),
            api_token,
            namespace,
            default_context,
            default_entity_id,
        }
    }

    /// Creates a new [`Client`] on top of an existing [`Transport`], with an empty default context and entity ID.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flipt::{Client, HttpTransport};
    ///
    /// let transport = HttpTransport::new("https://flipt.example.com").unwrap();
    /// let client = Client::with_transport(transport, "API_TOKEN", "default");
    /// ```
    pub fn with_transport(transport: T, api_token: &str, namespace: &str) -> Self {
        ClientBuilder::new(api_token, namespace).build_with_transport(transport)
    }

    /// Evaluates a boolean flag identified by the given `flag_key`.
    ///
    /// The given `context` is merged over the default context of the client,
    /// a non-empty `entity_id` overrides the default entity ID.
    ///
    /// # Errors
    ///
    /// This method fails when the HTTP call doesn't complete with a successful status code,
    /// or when the response can't be turned into a [`BooleanEvaluationResult`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use flipt::{Client, Context};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = Client::new("https://flipt.example.com", "API_TOKEN", "default").unwrap();
    ///
    ///     let context = Context::from([("plan", "premium")]);
    ///     let result = client.evaluate_boolean("flag-key", Some(context), Some("user-id")).await.unwrap();
    /// }
    /// ```
    pub async fn evaluate_boolean(
        &self,
        flag_key: &str,
        context: Option<Context>,
        entity_id: Option<&str>,
    ) -> Result<BooleanEvaluationResult, ClientError> {
        self.evaluate(BOOLEAN_EVALUATION_PATH, flag_key, context.as_ref(), entity_id)
            .await
    }

    /// Evaluates a variant flag identified by the given `flag_key`.
    ///
    /// The attachment of the served variant is returned as the raw string sent by the server,
    /// use [`VariantEvaluationResult::attachment_json`] to decode it.
    ///
    /// # Errors
    ///
    /// This method fails when the HTTP call doesn't complete with a successful status code,
    /// or when the response can't be turned into a [`VariantEvaluationResult`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use flipt::Client;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = Client::new("https://flipt.example.com", "API_TOKEN", "default").unwrap();
    ///
    ///     let result = client.evaluate_variant("flag-key", None, Some("user-id")).await.unwrap();
    ///     if result.is_match() {
    ///         println!("{}", result.variant_key());
    ///     }
    /// }
    /// ```
    pub async fn evaluate_variant(
        &self,
        flag_key: &str,
        context: Option<Context>,
        entity_id: Option<&str>,
    ) -> Result<VariantEvaluationResult, ClientError> {
        self.evaluate(VARIANT_EVALUATION_PATH, flag_key, context.as_ref(), entity_id)
            .await
    }

    /// The same as [`Client::evaluate_boolean`] but returns only whether the flag is enabled.
    pub async fn is_enabled(
        &self,
        flag_key: &str,
        context: Option<Context>,
        entity_id: Option<&str>,
    ) -> Result<bool, ClientError> {
        Ok(self
            .evaluate_boolean(flag_key, context, entity_id)
            .await?
            .enabled())
    }

    /// The same as [`Client::evaluate_variant`] but returns only the key of the served variant.
    ///
    /// Returns [`None`] when no rule of the flag matched.
    pub async fn variant_key(
        &self,
        flag_key: &str,
        context: Option<Context>,
        entity_id: Option<&str>,
    ) -> Result<Option<String>, ClientError> {
        let result = self.evaluate_variant(flag_key, context, entity_id).await?;
        if result.is_match() {
            return Ok(Some(result.variant_key().to_owned()));
        }
        Ok(None)
    }

    /// Returns a new [`Client`] that evaluates flags in the given `namespace`.
    ///
    /// Everything else, including the transport, is shared with this client.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use flipt::Client;
    ///
    /// let client = Client::new("https://flipt.example.com", "API_TOKEN", "default").unwrap();
    /// let other = client.with_namespace("other");
    /// ```
    pub fn with_namespace(&self, namespace: &str) -> Self {
        Self {
            namespace: namespace.to_owned(),
            ..self.clone()
        }
    }

    /// Returns a new [`Client`] whose default context is replaced by `context`.
    ///
    /// The previous default context is discarded, not merged.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use flipt::{Client, Context};
    ///
    /// let client = Client::new("https://flipt.example.com", "API_TOKEN", "default").unwrap();
    /// let scoped = client.with_context(Context::from([("region", "eu")]));
    /// ```
    pub fn with_context(&self, context: Context) -> Self {
        Self {
            default_context: context,
            ..self.clone()
        }
    }

    /// The namespace flags are evaluated in.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The context merged into every evaluation.
    pub fn default_context(&self) -> &Context {
        &self.default_context
    }

    /// The entity ID used when an evaluation call doesn't specify one.
    pub fn default_entity_id(&self) -> &str {
        &self.default_entity_id
    }

    /// The transport requests are sent through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn evaluate<R: DeserializeOwned>(
        &self,
        path: &str,
        flag_key: &str,
        context: Option<&Context>,
        entity_id: Option<&str>,
    ) -> Result<R, ClientError> {
        let request = EvaluationRequest::new(
            flag_key,
            &self.namespace,
            &self.default_context,
            context,
            &self.default_entity_id,
            entity_id,
        );
        debug!(
            "Evaluating flag '{flag_key}' in namespace '{}' via {path}",
            self.namespace
        );
        let body = self.api_request(path, &request).await.map_err(log_err)?;
        result_from_json::<R>(body.as_str())
            .map_err(|err| log_err(ClientError::from(err)))
    }

    async fn api_request(
        &self,
        path: &str,
        request: &EvaluationRequest,
    ) -> Result<String, ClientError> {
        let body = request.to_json().map_err(|err| {
            ClientError::new(
                ErrorKind::HttpRequestFailure,
                format!("Failed to serialize the evaluation request. {err}"),
            )
        })?;

        let mut auth = HeaderValue::from_str(format!("{BEARER_PREFIX}{}", self.api_token).as_str())
            .map_err(|_| {
                ClientError::new(
                    ErrorKind::HttpRequestFailure,
                    "The API token contains characters that are not allowed in an HTTP header."
                        .to_owned(),
                )
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        let response = self
            .transport
            .request(TransportRequest {
                method: Method::POST,
                path: path.to_owned(),
                headers,
                body,
            })
            .await?;

        match response.status {
            200..=299 => Ok(response.body),
            code => Err(ClientError::new(
                ErrorKind::UnexpectedHttpResponse,
                format!("Unexpected HTTP response was received while evaluating flag '{}'. Status code: {code}", request.flag_key),
            )),
        }
    }
}

impl<T: Transport> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            api_token: self.api_token.clone(),
            namespace: self.namespace.clone(),
            default_context: self.default_context.clone(),
            default_entity_id: self.default_entity_id.clone(),
        }
    }
}

fn log_err(err: ClientError) -> ClientError {
    error!(event_id = err.kind.as_u16(); "{}", err);
    err
}
