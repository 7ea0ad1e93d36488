/// All errors that can occur while fetching or decoding tournament data.
#[derive(thiserror::Error, Debug)]
pub enum TourneyError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A JSON payload did not match the expected shape.
    #[error("invalid json in {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// A session token is not a three-segment JWT.
    #[error("malformed token: {reason}")]
    MalformedToken { reason: &'static str },

    /// A token segment is not valid base64url.
    #[error("failed to decode base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, TourneyError>;
