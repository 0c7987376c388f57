//! HTTP client for the ProPublica Congress v1 API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::Error;

/// Base URL of the production Congress API.
pub const DEFAULT_BASE_URL: &str = "https://api.propublica.org/congress/v1";

/// HTTP client for the ProPublica Congress v1 API.
///
/// Holds the API key and a reusable `reqwest::Client`, and performs
/// authenticated GET requests against `<base>/<path>.json`. The API's
/// resources are not modeled here: callers pass a resource path such as
/// `bills/search` and a `Deserialize` target shape of their own.
///
/// A `Client` is immutable after construction and safe to share across
/// tasks; `reqwest::Client` multiplexes concurrent requests over its own
/// connection pool.
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Shape of a non-2xx response body: `{"message": "..."}`.
///
/// `message` defaults to empty so a JSON error body without the field still
/// decodes, while a body that is not JSON at all does not.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl Client {
    /// Creates a new client pointing at the production Congress API.
    ///
    /// The key is not validated; an empty or revoked key fails at request
    /// time with the API's own auth error.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), api_key)
    }

    /// Creates a new client with a custom base URL. Used for testing with
    /// wiremock. Trailing slashes are trimmed so request URLs never contain
    /// `//`.
    pub fn with_base_url(base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a new client on a caller-supplied `reqwest::Client`, for
    /// callers that need their own pool, proxy, or TLS configuration.
    pub fn with_http_client(http: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Performs a GET against `<base>/<path>.json` and decodes the JSON
    /// response body into `T`.
    ///
    /// `params` is a sequence of key/value pairs appended as a
    /// form-encoded query string; a key may appear in several pairs and
    /// every occurrence is kept. An empty slice leaves the URL without a
    /// query string.
    ///
    /// Issues exactly one request per call; there are no retries.
    ///
    /// # Errors
    ///
    /// - [`Error::Request`] if the URL cannot be built or the request
    ///   cannot be sent.
    /// - [`Error::Api`] if the server answers with a non-2xx status and an
    ///   error body carrying a `message`.
    /// - [`Error::Decode`] if a body, on either path, is not JSON of the
    ///   expected shape.
    pub async fn get<T>(&self, path: &str, params: &[(&str, &str)]) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.request(path, params, None).await
    }

    /// Like [`Client::get`], with a deadline covering the whole exchange,
    /// response body included. Expiry surfaces as [`Error::Request`].
    pub async fn get_with_timeout<T>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.request(path, params, Some(timeout)).await
    }

    fn endpoint_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, Error> {
        let raw = format!("{}/{}.json", self.base_url, path);
        let mut url = Url::parse(&raw).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::Request {
                reason: format!("invalid request URL {raw:?}: {e}"),
            }
        })?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn request<T>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        timeout: Option<Duration>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(path, params)?;
        let mut request = self.http.get(url).header("X-API-Key", &self.api_key);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await.map_err(|e| {
            tracing::error!("Failed to send request: {}", e);
            Error::Request {
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Request {
                reason: e.to_string(),
            }
        })?;

        if !status.is_success() {
            // Decode failure on the error body wins over the status error.
            let error_body = serde_json::from_str::<ErrorBody>(&body).map_err(|e| {
                tracing::error!("Failed to parse error body for HTTP {}: {}", status, e);
                Error::Decode(e)
            })?;
            tracing::error!("Request failed with status {}: {}", status, error_body.message);
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_body.message,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::error!("Failed to parse response body: {}", e);
            Error::Decode(e)
        })
    }
}
