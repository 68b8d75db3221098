use std::path::PathBuf;

use upkeep_provider::ProviderError;

/// Convenient result alias for upkeep operations.
pub type Result<T> = std::result::Result<T, UpkeepError>;

/// Every way an upkeep command can fail. None of them are retried.
#[derive(thiserror::Error, Debug)]
pub enum UpkeepError {
    /// The upstream release could not be fetched or decoded.
    #[error("failed to fetch upstream release: {0}")]
    UpstreamFetch(#[source] ProviderError),
    /// The release payload lacks a tag or is not a release document.
    #[error("malformed release: {0}")]
    MalformedRelease(String),
    /// A file could not be read or written.
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An asset or architecture pattern is not a valid regular expression.
    #[error("invalid {which} pattern: {source}")]
    InvalidPattern {
        which: &'static str,
        #[source]
        source: regex::Error,
    },
    /// No asset satisfied any of the selection tiers.
    #[error("no asset matches pattern `{pattern}`")]
    NoMatchingAsset { pattern: String },
    /// The upstream repository id is not `owner/repo`.
    #[error("invalid repository id `{0}`, expected owner/repo")]
    InvalidRepo(String),
}

impl UpkeepError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        UpkeepError::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this error. Zero is reserved for success.
    pub fn exit_code(&self) -> u8 {
        match self {
            UpkeepError::UpstreamFetch(_) => 2,
            UpkeepError::MalformedRelease(_) => 3,
            UpkeepError::Io { .. } => 4,
            UpkeepError::InvalidPattern { .. } => 5,
            UpkeepError::NoMatchingAsset { .. } => 6,
            UpkeepError::InvalidRepo(_) => 7,
        }
    }
}

impl From<ProviderError> for UpkeepError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::InvalidRepo(id) => UpkeepError::InvalidRepo(id),
            other => UpkeepError::UpstreamFetch(other),
        }
    }
}
