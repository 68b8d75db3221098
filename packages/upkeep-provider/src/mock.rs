use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::base_provider::ReleaseSource;
use crate::data::ReleaseDescriptor;
use crate::error::{ProviderError, Result};
use crate::repo::RepoId;

/// Release source answering every query with the same canned payload.
pub struct MockSource {
    answer: MockAnswer,
    calls: AtomicUsize,
}

enum MockAnswer {
    Release(ReleaseDescriptor),
    Status(u16),
}

impl MockSource {
    pub fn new(release: ReleaseDescriptor) -> Self {
        Self {
            answer: MockAnswer::Release(release),
            calls: AtomicUsize::new(0),
        }
    }

    /// Source that fails as if the host returned `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            answer: MockAnswer::Status(status),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReleaseSource for MockSource {
    fn get_friendly_name(&self) -> &'static str {
        "mock"
    }

    async fn get_latest_release(&self, repo: &RepoId) -> Result<ReleaseDescriptor> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            MockAnswer::Release(release) => Ok(release.clone()),
            MockAnswer::Status(status) => Err(ProviderError::Status {
                url: format!("mock://{}", repo),
                status: *status,
            }),
        }
    }
}
