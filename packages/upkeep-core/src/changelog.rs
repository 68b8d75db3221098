//! Maintenance of the "latest version" region of a markdown changelog.
//!
//! The region sits between [`MARKER_START`] and [`MARKER_END`] and holds a
//! sequence of `<details>` blocks, one per upstream release. Updating the
//! region for a tag puts a fresh, expanded block for that tag first, collapses
//! every other release block, and drops anything that does not look like a
//! release block at all. Text outside the markers is never touched.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

use crate::entry::ReleaseEntry;

pub const MARKER_START: &str = "<!-- LATEST-VERSION-START -->";
pub const MARKER_END: &str = "<!-- LATEST-VERSION-END -->";

const BLOCK_OPENER: &str = "<details";
const ENTRY_SIGNATURE: &str = "Upstream release v";

static REGION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "(?s){}(.*?){}",
        regex::escape(MARKER_START),
        regex::escape(MARKER_END)
    ))
    .expect("marker pattern is valid")
});

static OPEN_DETAILS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<details\s+open>").expect("details pattern is valid"));

/// One collapsible release entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogBlock {
    text: String,
}

impl ChangelogBlock {
    /// Expanded block describing `entry`.
    pub fn open_for(entry: &ReleaseEntry) -> Self {
        Self {
            text: format!(
                "<details open>\n\
                 <summary><strong>Upstream release {tag}</strong></summary>\n\
                 \n\
                 - **Author:** @{author}\n\
                 - **Source:** [{tag}]({url})\n\
                 \n\
                 ### Notes\n\
                 {body}\n\
                 </details>",
                tag = entry.tag,
                author = entry.author,
                url = entry.url,
                body = entry.body,
            ),
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_open(&self) -> bool {
        OPEN_DETAILS.is_match(&self.text)
    }

    /// Whether the block carries the wording of a generated release block.
    pub fn is_release_entry(&self) -> bool {
        self.text.contains(ENTRY_SIGNATURE)
    }

    /// Matches on the title text, so `v1.2` also claims a block titled `v1.20`.
    pub fn is_for_tag(&self, tag: &str) -> bool {
        self.text.contains(&format!("Upstream release {}", tag))
    }

    pub fn collapsed(self) -> Self {
        Self {
            text: OPEN_DETAILS.replace_all(&self.text, "<details>").into_owned(),
        }
    }
}

/// A changelog split around its marker region.
#[derive(Debug, Clone, Copy)]
pub struct ChangelogDocument<'a> {
    text: &'a str,
    /// Byte range of the content between the markers.
    inner: Option<(usize, usize)>,
}

impl<'a> ChangelogDocument<'a> {
    pub fn parse(text: &'a str) -> Self {
        let inner = REGION
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| (m.start(), m.end()));
        Self { text, inner }
    }

    pub fn has_region(&self) -> bool {
        self.inner.is_some()
    }

    fn inner_range(&self) -> Option<Range<usize>> {
        self.inner.map(|(start, end)| start..end)
    }

    /// Blocks currently inside the region, in document order. Blank
    /// fragments are skipped; nothing else is filtered.
    pub fn blocks(&self) -> Vec<ChangelogBlock> {
        match self.inner_range() {
            Some(range) => split_blocks(&self.text[range])
                .into_iter()
                .filter(|piece| !piece.trim().is_empty())
                .map(|piece| ChangelogBlock::from_text(piece.trim()))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Full document text after recording `entry` as the latest release.
    pub fn apply_release(&self, entry: &ReleaseEntry) -> String {
        let fresh = ChangelogBlock::open_for(entry);
        match self.inner_range() {
            Some(range) => {
                let blocks = reconcile(self.blocks(), fresh, entry.tag);
                tracing::debug!(kept = blocks.len() - 1, "rewrote marker region");
                format!(
                    "{}{}{}",
                    &self.text[..range.start],
                    render_region(&blocks),
                    &self.text[range.end..]
                )
            }
            None => {
                tracing::warn!("changelog markers not found, prepending a new region");
                format!(
                    "{}\n{}\n{}\n\n{}",
                    MARKER_START,
                    fresh.text(),
                    MARKER_END,
                    self.text
                )
            }
        }
    }
}

/// Fresh block first, then the surviving history, collapsed, in its
/// original order.
pub fn reconcile(
    history: Vec<ChangelogBlock>,
    fresh: ChangelogBlock,
    tag: &str,
) -> Vec<ChangelogBlock> {
    let mut blocks = vec![fresh];
    for block in history {
        if block.is_for_tag(tag) {
            tracing::debug!(tag, "dropping stale block for current tag");
            continue;
        }
        if !block.is_release_entry() {
            tracing::debug!("dropping block without release signature");
            continue;
        }
        blocks.push(block.collapsed());
    }
    blocks
}

fn render_region(blocks: &[ChangelogBlock]) -> String {
    let joined = blocks
        .iter()
        .map(ChangelogBlock::text)
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("\n{}\n", joined)
}

/// Cut `inner` in front of every block opener. The first piece is whatever
/// precedes the first opener and may be empty.
fn split_blocks(inner: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, _) in inner.match_indices(BLOCK_OPENER) {
        pieces.push(&inner[start..idx]);
        start = idx;
    }
    pieces.push(&inner[start..]);
    pieces
}
