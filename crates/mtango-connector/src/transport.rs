use bytes::Bytes;

use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode, Url};

use serde_json::Value;

use crate::error::{Error, ErrorKind, Result};

/// A single HTTP exchange to perform.
#[derive(Debug, Clone)]
pub struct HttpCall {
    /// HTTP method.
    pub method: Method,
    /// Request URL.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// JSON body.
    pub body: Option<Value>,
    /// Whether ambient credentials, such as cookies, must be included.
    pub include_credentials: bool,
}

/// The response of an HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    status: StatusCode,
    body: Bytes,
}

impl FetchResponse {
    /// Creates a [`FetchResponse`].
    #[must_use]
    #[inline]
    pub const fn new(status: StatusCode, body: Bytes) -> Self {
        Self { status, body }
    }

    /// Whether the status is a success status.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the reason phrase of the HTTP status.
    #[must_use]
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or_default()
    }

    /// Decodes the body as JSON.
    ///
    /// An empty body is decoded as [`Value::Null`].
    ///
    /// # Errors
    ///
    /// A [`ErrorKind::Network`] error is returned when the body is not a
    /// valid JSON document, because it denotes a malformed response.
    pub fn json(&self) -> Result<Value> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&self.body).map_err(|e| {
            Error::new(
                ErrorKind::Network,
                format!("Malformed response body: {e}"),
            )
        })
    }
}

/// The HTTP transport used by a [`crate::connector::Connector`].
pub trait Transport: Send + Sync {
    /// Performs an HTTP exchange.
    ///
    /// Any response received from the server, successful or not, is returned
    /// as a [`FetchResponse`].
    ///
    /// # Errors
    ///
    /// A [`ErrorKind::Network`] error is returned when the exchange cannot be
    /// completed.
    fn fetch(&self, call: HttpCall) -> impl Future<Output = Result<FetchResponse>> + Send;
}

/// A [`Transport`] built on top of a [`reqwest::Client`].
///
/// Ambient credentials are a browser concept: the
/// [`HttpCall::include_credentials`] flag has no effect on this transport,
/// which sends only the headers of the call.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a [`HttpTransport`] with a default [`reqwest::Client`].
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`HttpTransport`] from a configured [`reqwest::Client`].
    ///
    /// Timeouts and TLS settings must be configured on the client.
    #[must_use]
    #[inline]
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self, call: HttpCall) -> Result<FetchResponse> {
        let mut request = self
            .client
            .request(call.method, call.url)
            .headers(call.headers);

        if let Some(body) = call.body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(FetchResponse::new(status, body))
    }
}
