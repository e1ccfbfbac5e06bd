//! Error types for OCTo API calls.
//!
//! Every failure is mapped onto a small taxonomy ([`ErrorKind`]): the supplier
//! refused the caller ([`Error::Unauthorized`]), the request itself was wrong
//! ([`Error::InvalidRequest`]), or the API misbehaved ([`Error::ApiError`],
//! [`Error::NonJsonResponse`] and [`Error::Decode`]). Transport and
//! configuration problems get their own variants. Raw response bodies are kept
//! on every variant that has one.

use http::StatusCode;

/// The main error type for OCTo API calls.
///
/// # Examples
///
/// ```no_run
/// use octo_client::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com/octo")?
///     .token("secret-token")
///     .build()?;
///
/// match client.get_products("0001").await {
///     Ok(products) => println!("{} products", products.len()),
///     Err(Error::Unauthorized { raw_response, .. }) => {
///         eprintln!("Token lacks permission: {}", raw_response);
///     }
///     Err(Error::InvalidRequest { message, .. }) => eprintln!("Bad request: {}", message),
///     Err(e) if e.is_api_error() => eprintln!("Supplier API failed: {}", e),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request was authenticated but the token lacks permission (HTTP 403).
    #[error("Unauthorized (status {status}): {raw_response}")]
    Unauthorized {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
    },

    /// The request was rejected as invalid.
    ///
    /// Raised for HTTP 400 responses, in which case `status` is set and `message`
    /// holds the supplier's response body, and for problems detected before any
    /// network call (unknown supplier id, malformed date filters), in which case
    /// `status` is `None`.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// The HTTP status code, if the error came from the server
        status: Option<StatusCode>,
        /// The supplier response body or local validation message
        message: String,
    },

    /// The API answered with an error status (404, 500 or any other non-2xx
    /// status that is not mapped to a more specific variant).
    #[error("API error {status}: {raw_response}")]
    ApiError {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
    },

    /// The API answered with a success status but the body is not JSON.
    #[error("Non-JSON response (status {status}): {serde_error}")]
    NonJsonResponse {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
        /// The JSON parser's error message
        serde_error: String,
    },

    /// The JSON body could not be decoded into the expected model.
    #[error("Failed to decode response: {source}")]
    Decode {
        /// What went wrong while decoding
        #[source]
        source: DecodeError,
        /// The raw response body
        raw_response: String,
    },

    /// A network-level error occurred (connection failed, DNS lookup failed, etc.).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid configuration was provided.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Failed to serialize the request body.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// An invalid URL was provided or produced.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Permission denied.
    Unauthorized,
    /// Caller or local validation error.
    InvalidRequest,
    /// Everything the API got wrong: error statuses, malformed or undecodable bodies.
    ApiError,
    /// The request never produced a response.
    Transport,
    /// The client or request was configured incorrectly.
    Configuration,
}

impl Error {
    /// Maps an HTTP status code onto the error taxonomy.
    ///
    /// Returns `None` for 2xx statuses; the body is then handed to the decoder.
    ///
    /// # Examples
    ///
    /// ```
    /// use octo_client::{Error, ErrorKind};
    /// use http::StatusCode;
    ///
    /// let err = Error::from_status(StatusCode::FORBIDDEN, "nope").unwrap();
    /// assert_eq!(err.kind(), ErrorKind::Unauthorized);
    ///
    /// assert!(Error::from_status(StatusCode::OK, "[]").is_none());
    /// ```
    pub fn from_status(status: StatusCode, raw_response: &str) -> Option<Self> {
        let raw_response = raw_response.to_string();
        match status.as_u16() {
            400 => Some(Error::InvalidRequest {
                status: Some(status),
                message: raw_response,
            }),
            403 => Some(Error::Unauthorized {
                status,
                raw_response,
            }),
            _ if status.is_success() => None,
            // 404, 500 and anything else unclassified
            _ => Some(Error::ApiError {
                status,
                raw_response,
            }),
        }
    }

    /// Builds a locally detected [`Error::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Error::InvalidRequest {
            status: None,
            message: message.into(),
        }
    }

    /// Returns the taxonomy bucket this error falls into.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Unauthorized { .. } => ErrorKind::Unauthorized,
            Error::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            Error::ApiError { .. } | Error::NonJsonResponse { .. } | Error::Decode { .. } => {
                ErrorKind::ApiError
            }
            Error::Network(_) => ErrorKind::Transport,
            Error::ConfigurationError(_)
            | Error::SerializationFailed(_)
            | Error::InvalidUrl(_) => ErrorKind::Configuration,
        }
    }

    /// Returns `true` if this error belongs to the `ApiError` family.
    pub fn is_api_error(&self) -> bool {
        self.kind() == ErrorKind::ApiError
    }

    /// Returns the HTTP status code if this error has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Unauthorized { status, .. }
            | Error::ApiError { status, .. }
            | Error::NonJsonResponse { status, .. } => Some(*status),
            Error::InvalidRequest { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::Unauthorized { raw_response, .. }
            | Error::ApiError { raw_response, .. }
            | Error::NonJsonResponse { raw_response, .. }
            | Error::Decode { raw_response, .. } => Some(raw_response),
            Error::InvalidRequest {
                status: Some(_),
                message,
            } => Some(message),
            _ => None,
        }
    }
}

/// Failure to turn a JSON value into a model.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// The value does not have the declared shape (missing field, wrong type,
    /// unknown value of a closed enum, unparseable date).
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Strict mode found a key that no model field declares.
    #[error("unrecognized field '{path}'")]
    UnrecognizedField {
        /// Location of the key, e.g. `$[0].options[1].foo`
        path: String,
    },

    /// Strict mode found an enum value outside the known set.
    #[error("unrecognized value '{value}' at '{path}'")]
    UnrecognizedValue {
        /// Location of the value
        path: String,
        /// The literal received
        value: String,
    },
}

/// A specialized `Result` type for OCTo API calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (400, ErrorKind::InvalidRequest),
            (403, ErrorKind::Unauthorized),
            (404, ErrorKind::ApiError),
            (500, ErrorKind::ApiError),
            (409, ErrorKind::ApiError),
            (503, ErrorKind::ApiError),
        ];
        for (code, kind) in cases {
            let status = StatusCode::from_u16(code).unwrap();
            let err = Error::from_status(status, "body").unwrap();
            assert_eq!(err.kind(), kind, "status {}", code);
            assert_eq!(err.status(), Some(status));
            assert_eq!(err.raw_response(), Some("body"));
        }
    }

    #[test]
    fn test_success_statuses_pass_through() {
        assert!(Error::from_status(StatusCode::OK, "{}").is_none());
        assert!(Error::from_status(StatusCode::CREATED, "{}").is_none());
    }

    #[test]
    fn test_local_invalid_request_has_no_status() {
        let err = Error::invalid_request("Incorrect supplierId");
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert_eq!(err.status(), None);
        assert_eq!(err.raw_response(), None);
        assert_eq!(err.to_string(), "Invalid request: Incorrect supplierId");
    }

    #[test]
    fn test_decode_error_is_api_error() {
        let err = Error::Decode {
            source: DecodeError::UnrecognizedField {
                path: "$.foo".to_string(),
            },
            raw_response: "{\"foo\":1}".to_string(),
        };
        assert!(err.is_api_error());
        assert_eq!(err.raw_response(), Some("{\"foo\":1}"));
    }
}
