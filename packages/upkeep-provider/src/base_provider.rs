use async_trait::async_trait;

use crate::data::ReleaseDescriptor;
use crate::error::Result;
use crate::repo::RepoId;

/// Something that can answer "what is the latest release of this repository".
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    fn get_friendly_name(&self) -> &'static str;

    async fn get_latest_release(&self, repo: &RepoId) -> Result<ReleaseDescriptor>;
}
