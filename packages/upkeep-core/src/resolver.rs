use regex::Regex;
use std::fmt;
use std::io::Read;

use upkeep_provider::{AssetDescriptor, ReleaseDescriptor};

use crate::error::{Result, UpkeepError};

/// How a downloadable asset is picked out of a release.
#[derive(Debug, Clone)]
pub struct MatchCriteria {
    asset_pattern: Regex,
    arch_pattern: Regex,
    fallback_keywords: Vec<String>,
}

impl MatchCriteria {
    /// `fallbacks` is a comma-separated keyword list; blank entries are ignored.
    pub fn new(asset_pattern: &str, arch_pattern: &str, fallbacks: &str) -> Result<Self> {
        let asset_pattern = Regex::new(asset_pattern).map_err(|source| {
            UpkeepError::InvalidPattern {
                which: "asset",
                source,
            }
        })?;
        let arch_pattern = Regex::new(arch_pattern).map_err(|source| {
            UpkeepError::InvalidPattern {
                which: "architecture",
                source,
            }
        })?;
        Ok(Self {
            asset_pattern,
            arch_pattern,
            fallback_keywords: parse_keywords(fallbacks),
        })
    }

    pub fn fallback_keywords(&self) -> &[String] {
        &self.fallback_keywords
    }

    fn matches_asset(&self, name: &str) -> bool {
        self.asset_pattern.is_match(name)
    }

    fn matches_arch(&self, name: &str) -> bool {
        self.arch_pattern.is_match(name)
    }

    fn matches_fallback(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.fallback_keywords
            .iter()
            .any(|keyword| lower.contains(&keyword.to_lowercase()))
    }
}

pub fn parse_keywords(fallbacks: &str) -> Vec<String> {
    fallbacks
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Which selection rule produced a match, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    /// Asset pattern and architecture pattern both match.
    ArchSpecific,
    /// Asset pattern matches, any architecture.
    AnyArch,
    /// Asset pattern matches and the name contains a fallback keyword.
    Fallback,
}

/// Pick the best asset. Tiers are tried in order; within a tier the first
/// asset in list order wins.
pub fn select_asset<'a>(
    assets: &'a [AssetDescriptor],
    criteria: &MatchCriteria,
) -> Option<(&'a AssetDescriptor, MatchTier)> {
    if let Some(asset) = first_match(assets, |name| {
        criteria.matches_asset(name) && criteria.matches_arch(name)
    }) {
        return Some((asset, MatchTier::ArchSpecific));
    }
    if let Some(asset) = first_match(assets, |name| criteria.matches_asset(name)) {
        return Some((asset, MatchTier::AnyArch));
    }
    // Fallback candidates are a subset of the previous tier.
    if criteria.fallback_keywords.is_empty() {
        return None;
    }
    first_match(assets, |name| {
        criteria.matches_asset(name) && criteria.matches_fallback(name)
    })
    .map(|asset| (asset, MatchTier::Fallback))
}

fn first_match(
    assets: &[AssetDescriptor],
    pred: impl Fn(&str) -> bool,
) -> Option<&AssetDescriptor> {
    assets.iter().find(|asset| pred(asset.name()))
}

/// The chosen asset, printed as `tag|name|url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub tag: String,
    pub name: String,
    pub url: String,
    pub tier: MatchTier,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.tag, self.name, self.url)
    }
}

pub fn resolve(release: &ReleaseDescriptor, criteria: &MatchCriteria) -> Result<Resolution> {
    let tag = release.tag();
    if tag.is_empty() {
        return Err(UpkeepError::MalformedRelease(
            "release has no tag_name".to_string(),
        ));
    }

    let (asset, tier) = select_asset(release.assets(), criteria).ok_or_else(|| {
        UpkeepError::NoMatchingAsset {
            pattern: criteria.asset_pattern.as_str().to_string(),
        }
    })?;
    tracing::info!(tag, asset = asset.name(), ?tier, "resolved asset");
    Ok(Resolution {
        tag: tag.to_string(),
        name: asset.name().to_string(),
        url: asset.download_url().to_string(),
        tier,
    })
}

/// Resolve from a JSON release document, as read from stdin.
pub fn resolve_reader(reader: impl Read, criteria: &MatchCriteria) -> Result<Resolution> {
    let release: ReleaseDescriptor = serde_json::from_reader(reader)
        .map_err(|e| UpkeepError::MalformedRelease(format!("release is not valid JSON: {}", e)))?;
    resolve(&release, criteria)
}
