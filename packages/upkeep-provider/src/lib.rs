//! Upstream release hosts and the release data they describe.

pub mod base_provider;
pub mod data;
pub mod error;
pub mod github;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod repo;

// Re-export common types
pub use base_provider::ReleaseSource;
pub use data::{AssetDescriptor, ReleaseAuthor, ReleaseDescriptor, NO_DESCRIPTION};
pub use error::{ProviderError, Result};
pub use github::{GitHubProvider, GITHUB_API_URL};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSource;
pub use repo::RepoId;
