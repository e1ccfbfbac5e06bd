//! Response wrapper that preserves both parsed data and raw response details.

use http::{HeaderMap, StatusCode};
use std::time::Duration;
use url::Url;

/// A successful HTTP response from an OCTo endpoint.
///
/// [`Client::call`](crate::Client::call) returns `Response<serde_json::Value>`;
/// the typed operations decode `data` further and keep only the model.
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
/// let metadata = RequestMetadata::new(Method::GET, "/products").for_supplier("0001");
/// let response = client.call(metadata).await?;
///
/// println!("{} answered in {:?}", response.url, response.latency);
/// println!("Raw body: {}", response.raw_body);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The parsed response data.
    pub data: T,

    /// The raw response body as a string.
    pub raw_body: String,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from sending the request to receiving the full body.
    pub latency: Duration,

    /// The URL the request was sent to.
    pub url: Url,
}

impl<T> Response<T> {
    /// Creates a new `Response`.
    pub fn new(
        data: T,
        raw_body: String,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
        url: Url,
    ) -> Self {
        Self {
            data,
            raw_body,
            status,
            headers,
            latency,
            url,
        }
    }
}
