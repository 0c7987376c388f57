//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be built or sent: bad URL, DNS, connect, TLS,
    /// deadline expiry, or a failure reading the response body.
    #[error("request failed: {reason}")]
    Request { reason: String },
    /// The API answered with a non-2xx status and a decodable error body.
    #[error("HTTP {status}: {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Server-provided `message` field, empty if the body had none.
        message: String,
    },
    /// The response body, on either the success or the error path, was not
    /// JSON of the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}
