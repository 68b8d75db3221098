use upkeep_provider::ReleaseDescriptor;

/// The fields of an upstream release that end up in generated documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseEntry<'a> {
    pub tag: &'a str,
    pub author: &'a str,
    pub url: &'a str,
    pub body: &'a str,
}

impl<'a> ReleaseEntry<'a> {
    /// `tag` is passed separately because callers normalize it first.
    pub fn new(release: &'a ReleaseDescriptor, tag: &'a str) -> Self {
        Self {
            tag,
            author: release.author(),
            url: release.url(),
            body: release.body(),
        }
    }
}
