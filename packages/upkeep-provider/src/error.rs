/// Convenient result alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors raised while talking to an upstream release host.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    /// The repository id was not of the form `owner/repo`.
    #[error("invalid repository id `{0}`, expected owner/repo")]
    InvalidRepo(String),
    /// The request URL could not be built.
    #[error("invalid request url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// The HTTP exchange itself failed.
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },
    /// The host answered with a client or server error status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    /// The response body was not a release document.
    #[error("could not decode release from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
