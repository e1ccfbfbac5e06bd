//! HTTP client and request pipeline.
//!
//! The [`Client`] type is the entry point for talking to OCTo APIs. Use
//! [`ClientBuilder`] to configure and create clients. Typed operations live in
//! [`crate::api`]; this module routes, sends, classifies and logs requests.

use crate::{
    logging::{event_at, LogConfig},
    metadata::RequestMetadata,
    model::{self, Strict, Supplier},
    registry::{join_endpoint, SupplierRegistry},
    Error, Response, Result,
};
use http::header::{ACCEPT_LANGUAGE, AUTHORIZATION};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::Level;
use url::Url;

const OCTO_CAPABILITIES: &str = "octo-capabilities";

/// An HTTP client for OCTo (Open Connection for Tourism) supplier APIs.
///
/// The client resolves each supplier to its own endpoint through a
/// [`SupplierRegistry`] filled lazily from the supplier directory. Cloning is
/// cheap and clones share the connection pool and the registry.
///
/// # Examples
///
/// ```no_run
/// use octo_client::Client;
///
/// # async fn example() -> Result<(), octo_client::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com/octo")?
///     .token("secret-token")
///     .language("en-GB")
///     .build()?;
///
/// for supplier in client.list_suppliers().await? {
///     println!("{} -> {}", supplier.name, supplier.endpoint);
/// }
///
/// let products = client.get_products("0001").await?;
/// println!("Supplier 0001 sells {} products", products.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: Url,
    default_headers: HeaderMap,
    strict: bool,
    logging: LogConfig,
    registry: SupplierRegistry,
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Returns `true` if responses are decoded in strict mode.
    pub fn is_strict(&self) -> bool {
        self.inner.strict
    }

    /// Returns a copy of the supplier id to endpoint mapping.
    pub fn supplier_endpoints(&self) -> HashMap<String, String> {
        self.inner.registry.snapshot()
    }

    /// Sends one request through the pipeline and returns the parsed JSON.
    ///
    /// If `metadata.supplier_id` is set the request goes to that supplier's
    /// endpoint, refreshing the registry first when the id is unknown.
    /// Otherwise it goes to the base URL.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRequest`] if the supplier is still unknown after a refresh,
    ///   or the server answered 400
    /// - [`Error::Unauthorized`] on 403
    /// - [`Error::ApiError`] on 404, 500 or any other non-2xx status
    /// - [`Error::NonJsonResponse`] if a successful body is not JSON
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use octo_client::{metadata::RequestMetadata, Client};
    /// use http::Method;
    ///
    /// # async fn example() -> Result<(), octo_client::Error> {
    /// let client = Client::builder()
    ///     .base_url("https://api.example.com/octo")?
    ///     .token("secret-token")
    ///     .build()?;
    ///
    /// let metadata = RequestMetadata::new(Method::GET, "/bookings")
    ///     .for_supplier("0001")
    ///     .with_query_param("resellerReference", "R-1001");
    ///
    /// let response = client.call(metadata).await?;
    /// println!("{}", response.data);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call(&self, metadata: RequestMetadata) -> Result<Response<Value>> {
        let base = match &metadata.supplier_id {
            Some(supplier_id) => self.supplier_endpoint(supplier_id).await?,
            None => self.inner.base_url.to_string(),
        };
        let url = build_url(&base, &metadata)?;
        self.dispatch(&metadata, url).await
    }

    /// Returns the endpoint of a supplier, refreshing the registry once if the
    /// id is not known yet.
    pub(crate) async fn supplier_endpoint(&self, supplier_id: &str) -> Result<String> {
        if let Some(endpoint) = self.inner.registry.endpoint(supplier_id) {
            return Ok(endpoint);
        }

        tracing::debug!(
            supplier_id = supplier_id,
            "Supplier not in registry, refreshing directory"
        );
        self.refresh_suppliers().await?;

        self.inner.registry.endpoint(supplier_id).ok_or_else(|| {
            tracing::warn!(supplier_id = supplier_id, "Unknown supplier");
            Error::invalid_request(format!("Incorrect supplierId: {}", supplier_id))
        })
    }

    /// Fetches the supplier directory and rebuilds the registry from it.
    pub(crate) async fn refresh_suppliers(&self) -> Result<Vec<Supplier>> {
        let metadata = RequestMetadata::new(Method::GET, "/suppliers");
        let url = build_url(self.inner.base_url.as_str(), &metadata)?;
        let response = self.dispatch(&metadata, url).await?;
        let suppliers: Vec<Supplier> = self.decode(response)?;

        self.inner.registry.replace(&suppliers);
        tracing::info!(count = suppliers.len(), "Found suppliers");
        Ok(suppliers)
    }

    /// Decodes a response body with the client's strictness setting.
    pub(crate) fn decode<T>(&self, response: Response<Value>) -> Result<T>
    where
        T: DeserializeOwned + Strict,
    {
        let Response { data, raw_body, .. } = response;
        model::decode(data, self.inner.strict).map_err(|source| {
            tracing::error!(
                error = %source,
                strict = self.inner.strict,
                raw_response = self.inner.logging.render_raw(&raw_body).as_deref(),
                "Failed to decode response"
            );
            Error::Decode {
                source,
                raw_response: raw_body,
            }
        })
    }

    /// Sends a request to a fully resolved URL and classifies the outcome.
    async fn dispatch(&self, metadata: &RequestMetadata, url: Url) -> Result<Response<Value>> {
        let logging = &self.inner.logging;
        let payload = metadata
            .body
            .as_ref()
            .filter(|_| logging.log_responses)
            .map(|body| logging.render(body));

        event_at!(
            logging.level,
            method = %metadata.method,
            url = %url,
            payload = payload.as_deref(),
            "Sending request"
        );

        // Client headers go last so a request cannot drop or replace them.
        let mut headers = metadata.headers.clone();
        for (name, value) in &self.inner.default_headers {
            headers.insert(name.clone(), value.clone());
        }

        let mut request = self
            .inner
            .http_client
            .request(metadata.method.clone(), url.clone())
            .headers(headers);
        if let Some(body) = &metadata.body {
            request = request.json(body);
        }

        let start_time = Instant::now();
        let response = request.send().await.map_err(|e| {
            tracing::warn!(
                error = %e,
                method = %metadata.method,
                url = %url,
                "Request failed"
            );
            Error::Network(e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let raw_body = response.text().await?;
        let latency = start_time.elapsed();

        event_at!(
            logging.level,
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            method = %metadata.method,
            url = %url,
            "Received HTTP response"
        );

        if let Some(error) = Error::from_status(status, &raw_body) {
            let response = logging.render_raw(&raw_body);
            if status.is_client_error() {
                tracing::error!(
                    status = status.as_u16(),
                    url = %url,
                    response = response.as_deref(),
                    "Client error (4xx)"
                );
            } else {
                tracing::warn!(
                    status = status.as_u16(),
                    url = %url,
                    response = response.as_deref(),
                    "Server error"
                );
            }
            return Err(error);
        }

        let data = match serde_json::from_str::<Value>(&raw_body) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    status = status.as_u16(),
                    url = %url,
                    "Non-JSON response"
                );
                return Err(Error::NonJsonResponse {
                    status,
                    raw_response: raw_body,
                    serde_error: e.to_string(),
                });
            }
        };

        if logging.log_responses {
            event_at!(
                logging.level,
                url = %url,
                payload = %logging.render(&data),
                "Response payload"
            );
        }

        Ok(Response::new(data, raw_body, status, headers, latency, url))
    }
}

/// Joins a base endpoint with the request path and appends query parameters.
fn build_url(base: &str, metadata: &RequestMetadata) -> Result<Url> {
    let mut url = Url::parse(&join_endpoint(base, &metadata.path))?;
    if !metadata.query_params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &metadata.query_params {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use octo_client::ClientBuilder;
/// use tracing::Level;
///
/// # fn example() -> Result<(), octo_client::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.example.com/octo")?
///     .token("secret-token")
///     .language("de")
///     .strict(true)
///     .capabilities(["octo/content", "octo/pricing"])
///     .log_level(Level::INFO)
///     .log_responses(true)
///     .log_size_limit(2048)
///     .default_header("User-Agent", "my-reseller/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<Url>,
    token: Option<String>,
    language: String,
    capabilities: Vec<String>,
    default_headers: HeaderMap,
    strict: bool,
    logging: LogConfig,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            token: None,
            language: "en".to_string(),
            capabilities: Vec::new(),
            default_headers: HeaderMap::new(),
            strict: false,
            logging: LogConfig::default(),
        }
    }

    /// Sets the base URL of the global endpoints (`/suppliers`).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Sets the bearer token sent with every request.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the `Accept-Language` tag. Defaults to `en`.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Requests optional API capabilities via the `Octo-Capabilities` header.
    pub fn capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities = capabilities.into_iter().map(Into::into).collect();
        self
    }

    /// Rejects unknown fields and enum values in responses.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the level of per-request log events. Defaults to `DEBUG`.
    pub fn log_level(mut self, level: Level) -> Self {
        self.logging.level = level;
        self
    }

    /// Attaches redacted request and response payloads to log events.
    pub fn log_responses(mut self, enabled: bool) -> Self {
        self.logging.log_responses = enabled;
        self
    }

    /// Caps logged payloads at `chars` characters.
    pub fn log_size_limit(mut self, chars: usize) -> Self {
        self.logging.max_payload_chars = chars;
        self
    }

    /// Replaces the key fragments whose values are masked in logged payloads.
    pub fn sensitive_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.logging.sensitive_keys = keys
            .into_iter()
            .map(|key| key.into().to_lowercase())
            .collect();
        self
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or token is missing, or if a header
    /// value cannot be encoded.
    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::ConfigurationError("Base URL is required".to_string()))?;
        let token = self
            .token
            .ok_or_else(|| Error::ConfigurationError("Token is required".to_string()))?;

        let mut default_headers = self.default_headers;

        let mut authorization = HeaderValue::try_from(format!("Bearer {}", token))
            .map_err(|e| Error::ConfigurationError(format!("Invalid token: {}", e)))?;
        authorization.set_sensitive(true);
        default_headers.insert(AUTHORIZATION, authorization);

        let language = HeaderValue::try_from(self.language.as_str())
            .map_err(|e| Error::ConfigurationError(format!("Invalid language: {}", e)))?;
        default_headers.insert(ACCEPT_LANGUAGE, language);

        if !self.capabilities.is_empty() {
            let capabilities = HeaderValue::try_from(self.capabilities.join(", "))
                .map_err(|e| Error::ConfigurationError(format!("Invalid capabilities: {}", e)))?;
            default_headers.insert(HeaderName::from_static(OCTO_CAPABILITIES), capabilities);
        }

        let http_client = reqwest::Client::builder().build().map_err(|e| {
            Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                default_headers,
                strict: self.strict,
                logging: self.logging,
                registry: SupplierRegistry::new(),
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_build_requires_base_url_and_token() {
        let err = Client::builder().token("t").build().err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = Client::builder()
            .base_url("https://api.example.com")
            .unwrap()
            .build()
            .err()
            .unwrap();
        assert!(err.to_string().contains("Token is required"));
    }

    #[test]
    fn test_build_rejects_unencodable_token() {
        let result = Client::builder()
            .base_url("https://api.example.com")
            .unwrap()
            .token("line\nbreak")
            .build();
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn test_build_url_with_query() {
        let metadata = RequestMetadata::new(Method::GET, "/bookings")
            .with_query_param("localDateStart", "2022-06-25")
            .with_query_param("resellerReference", "A B");

        let url = build_url("https://api.example.com/v1/", &metadata).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v1/bookings?localDateStart=2022-06-25&resellerReference=A+B"
        );
    }
}
