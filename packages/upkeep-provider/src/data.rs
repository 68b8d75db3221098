use serde::{Deserialize, Serialize};

pub const NO_DESCRIPTION: &str = "(no description)";
const UNKNOWN_AUTHOR: &str = "unknown";

/// A release as returned by `GET /repos/{owner}/{repo}/releases/latest`.
///
/// Every field is optional on the wire; the accessors apply the defaults the
/// rest of the pipeline expects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDescriptor {
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub author: Option<ReleaseAuthor>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub assets: Option<Vec<AssetDescriptor>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseAuthor {
    #[serde(default)]
    pub login: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub browser_download_url: Option<String>,
}

impl ReleaseDescriptor {
    /// Raw tag, empty when absent.
    pub fn tag(&self) -> &str {
        self.tag_name.as_deref().unwrap_or_default()
    }

    pub fn author(&self) -> &str {
        self.author
            .as_ref()
            .and_then(|a| a.login.as_deref())
            .unwrap_or(UNKNOWN_AUTHOR)
    }

    pub fn url(&self) -> &str {
        self.html_url.as_deref().unwrap_or_default()
    }

    /// Release body, or [`NO_DESCRIPTION`] when it is null or empty.
    pub fn body(&self) -> &str {
        match self.body.as_deref() {
            Some(body) if !body.is_empty() => body,
            _ => NO_DESCRIPTION,
        }
    }

    pub fn assets(&self) -> &[AssetDescriptor] {
        self.assets.as_deref().unwrap_or_default()
    }
}

impl AssetDescriptor {
    pub fn new(name: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            browser_download_url: Some(download_url.into()),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn download_url(&self) -> &str {
        self.browser_download_url.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_sparse_release() {
        let release: ReleaseDescriptor =
            serde_json::from_str(r#"{"tag_name": "v1.0", "body": null}"#).unwrap();

        assert_eq!(release.tag(), "v1.0");
        assert_eq!(release.author(), "unknown");
        assert_eq!(release.url(), "");
        assert_eq!(release.body(), NO_DESCRIPTION);
        assert!(release.assets().is_empty());
    }

    #[test]
    fn test_empty_body_uses_placeholder() {
        let release: ReleaseDescriptor = serde_json::from_str(r#"{"body": ""}"#).unwrap();
        assert_eq!(release.body(), NO_DESCRIPTION);
        assert_eq!(release.tag(), "");
    }

    #[test]
    fn test_full_release() {
        let json = r#"{
            "tag_name": "v2.1",
            "author": {"login": "alice", "id": 7},
            "html_url": "https://x/2.1",
            "body": "fixes",
            "assets": [
                {"name": "shiru_arm64.deb", "browser_download_url": "https://x/a.deb", "size": 12}
            ]
        }"#;
        let release: ReleaseDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(release.author(), "alice");
        assert_eq!(release.url(), "https://x/2.1");
        assert_eq!(release.body(), "fixes");
        assert_eq!(
            release.assets(),
            &[AssetDescriptor::new("shiru_arm64.deb", "https://x/a.deb")]
        );
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(serde_json::from_str::<ReleaseDescriptor>("[1, 2]").is_err());
    }
}
