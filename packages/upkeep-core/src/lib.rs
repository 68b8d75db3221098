//! Upstream release tracking for downstream packaging.
//!
//! Three independent operations share this crate:
//!
//! - [`watcher::check`] compares the latest upstream release with a local
//!   version marker and refreshes the marker, the changelog region and the
//!   release notes when a rebuild is due.
//! - [`manifest::augment`] re-declares the `metadata:` line of a build
//!   manifest right after its `command:` line.
//! - [`resolver::resolve`] picks the downloadable asset of a release that
//!   best matches a set of patterns.

pub mod changelog;
pub mod config;
pub mod entry;
pub mod error;
pub mod manifest;
pub mod notes;
pub mod output;
pub mod resolver;
mod utils;
pub mod watcher;

pub use changelog::{ChangelogBlock, ChangelogDocument, MARKER_END, MARKER_START};
pub use config::{NotesTemplate, WatcherConfig};
pub use entry::ReleaseEntry;
pub use error::{Result, UpkeepError};
pub use manifest::{augment, ManifestDocument};
pub use notes::render_release_notes;
pub use output::OutputSink;
pub use resolver::{resolve, resolve_reader, select_asset, MatchCriteria, MatchTier, Resolution};
pub use watcher::{check, check_and_record, CheckOutcome};
