use upkeep_provider::ReleaseSource;

use crate::changelog::ChangelogDocument;
use crate::config::WatcherConfig;
use crate::entry::ReleaseEntry;
use crate::error::{Result, UpkeepError};
use crate::notes::render_release_notes;
use crate::output::OutputSink;
use crate::utils;

/// Decision reported back to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub should_build: bool,
    pub tag: String,
}

impl CheckOutcome {
    /// `key=value` pairs for the output sink.
    pub fn outputs(&self) -> [(&'static str, String); 2] {
        [
            ("should_build", self.should_build.to_string()),
            ("tag", self.tag.clone()),
        ]
    }
}

/// Compare the latest upstream release with the local version marker and,
/// when they differ or `force` is set, refresh the marker, the changelog
/// region and the release notes.
pub async fn check(source: &dyn ReleaseSource, config: &WatcherConfig) -> Result<CheckOutcome> {
    tracing::info!(repo = %config.repo, source = source.get_friendly_name(), "fetching latest release");
    let release = source.get_latest_release(&config.repo).await?;

    let tag = release.tag().trim();
    if tag.is_empty() {
        return Err(UpkeepError::MalformedRelease(
            "no tag found in release data".to_string(),
        ));
    }
    tracing::info!(tag, "latest upstream version");

    let current = utils::read_or_empty(&config.version_file)?;
    let current = current.trim();
    tracing::info!(current, "current local version");

    let should_build = config.force || tag != current;
    if !should_build {
        tracing::info!("versions match, no update needed");
        return Ok(CheckOutcome {
            should_build: false,
            tag: tag.to_string(),
        });
    }
    tracing::info!(forced = config.force, "update detected or forced");

    utils::write(&config.version_file, &format!("{}\n", tag))?;
    tracing::info!(path = %config.version_file.display(), tag, "updated version marker");

    let entry = ReleaseEntry::new(&release, tag);
    let changelog = utils::read_or_empty(&config.changelog_file)?;
    let updated = ChangelogDocument::parse(&changelog).apply_release(&entry);
    if updated != changelog {
        utils::write_creating_parents(&config.changelog_file, &updated)?;
        tracing::info!(path = %config.changelog_file.display(), "updated changelog");
    }

    let notes = render_release_notes(&config.notes, &config.repo, &entry);
    utils::write(&config.release_notes_file, &notes)?;
    tracing::info!(path = %config.release_notes_file.display(), "generated release notes");

    Ok(CheckOutcome {
        should_build: true,
        tag: tag.to_string(),
    })
}

/// Run [`check`] and append its decision to `sink`, whichever way it went.
pub async fn check_and_record(
    source: &dyn ReleaseSource,
    config: &WatcherConfig,
    sink: &OutputSink,
) -> Result<CheckOutcome> {
    let outcome = check(source, config).await?;
    sink.write(&outcome.outputs())?;
    tracing::debug!(path = %sink.path().display(), "recorded outputs");
    Ok(outcome)
}
