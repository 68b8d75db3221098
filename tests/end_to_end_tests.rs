use std::fs;
use std::path::Path;

use upkeep::provider::{MockSource, ReleaseDescriptor, RepoId};
use upkeep::{
    augment, check, check_and_record, resolve_reader, ChangelogDocument, MatchCriteria,
    OutputSink, UpkeepError, WatcherConfig, MARKER_END, MARKER_START,
};

fn release(tag: &str, body: &str) -> ReleaseDescriptor {
    serde_json::from_value(serde_json::json!({
        "tag_name": tag,
        "author": {"login": "alice"},
        "html_url": format!("https://github.com/RockinChaos/Shiru/releases/tag/{}", tag),
        "body": body,
        "assets": [],
    }))
    .unwrap()
}

fn snapshot(root: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files = Vec::new();
    for path in [
        "UPSTREAM_VERSION",
        ".github/CHANGELOG.md",
        "RELEASE_NOTES.md",
        "github_output.txt",
    ] {
        files.push((path.to_string(), fs::read(root.join(path)).unwrap_or_default()));
    }
    files
}

#[tokio::test]
async fn test_watcher_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config = WatcherConfig::in_dir(RepoId::new("RockinChaos", "Shiru"), dir.path());
    let sink = OutputSink::new(dir.path().join("github_output.txt"));
    let source = MockSource::new(release("v2.1", "fixes"));

    assert!(check_and_record(&source, &config, &sink).await.unwrap().should_build);
    let after_first = snapshot(dir.path());

    assert!(!check_and_record(&source, &config, &sink).await.unwrap().should_build);
    let after_second = snapshot(dir.path());

    // Only the output sink grows on the second run.
    assert_eq!(after_first[..3], after_second[..3]);
    assert_eq!(
        fs::read_to_string(sink.path()).unwrap(),
        "should_build=true\ntag=v2.1\nshould_build=false\ntag=v2.1\n"
    );
}

#[tokio::test]
async fn test_successive_releases_build_history() {
    let dir = tempfile::tempdir().unwrap();
    let config = WatcherConfig::in_dir(RepoId::new("RockinChaos", "Shiru"), dir.path());
    fs::create_dir_all(dir.path().join(".github")).unwrap();
    fs::write(
        &config.changelog_file,
        format!(
            "# Changelog\n\n{}\n<details open><summary>scratch</summary></details>\n{}\n\n## Older\n",
            MARKER_START, MARKER_END
        ),
    )
    .unwrap();

    for tag in ["v1.0", "v1.1", "v1.2"] {
        let source = MockSource::new(release(tag, &format!("notes for {}", tag)));
        check(&source, &config).await.unwrap();
    }
    // A forced re-run with an edited body replaces the existing entry.
    let source = MockSource::new(release("v1.2", "edited notes"));
    check(&source, &config.clone().with_force(true)).await.unwrap();

    let changelog = fs::read_to_string(&config.changelog_file).unwrap();
    assert!(changelog.starts_with("# Changelog\n\n"));
    assert!(changelog.ends_with("\n\n## Older\n"));
    assert!(!changelog.contains("scratch"));
    assert!(!changelog.contains("notes for v1.2"));

    let blocks = ChangelogDocument::parse(&changelog).blocks();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].is_for_tag("v1.2") && blocks[0].is_open());
    assert!(blocks[0].text().contains("edited notes"));
    assert!(blocks[1].is_for_tag("v1.1") && !blocks[1].is_open());
    assert!(blocks[2].is_for_tag("v1.0") && !blocks[2].is_open());

    assert_eq!(fs::read_to_string(&config.version_file).unwrap(), "v1.2\n");
    let notes = fs::read_to_string(&config.release_notes_file).unwrap();
    assert!(notes.ends_with("## Upstream Changelog\nedited notes\n"));
}

#[tokio::test]
async fn test_missing_body_uses_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let config = WatcherConfig::in_dir(RepoId::new("RockinChaos", "Shiru"), dir.path());
    let source = MockSource::new(release("v0.1", ""));

    check(&source, &config).await.unwrap();

    let notes = fs::read_to_string(&config.release_notes_file).unwrap();
    assert!(notes.ends_with("## Upstream Changelog\n(no description)\n"));
    let changelog = fs::read_to_string(&config.changelog_file).unwrap();
    assert!(changelog.contains("### Notes\n(no description)\n</details>"));
}

#[test]
fn test_manifest_augment_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("io.github.shiru.yml");
    let target = dir.path().join("generated.yml");
    fs::write(
        &source,
        "app-id: io.github.shiru\nmetadata: stale.xml\ncommand: shiru\nmodules: []\n",
    )
    .unwrap();

    augment(&source, &target, "shiru.metainfo.xml").unwrap();
    let once = fs::read_to_string(&target).unwrap();
    augment(&target, &target, "shiru.metainfo.xml").unwrap();
    let twice = fs::read_to_string(&target).unwrap();

    assert_eq!(
        once,
        "app-id: io.github.shiru\ncommand: shiru\nmetadata: shiru.metainfo.xml\nmodules: []\n"
    );
    assert_eq!(once, twice);
}

#[test]
fn test_resolve_end_to_end() {
    let json = r#"{
        "tag_name": "v2.1",
        "author": {"login": "alice"},
        "html_url": "https://x/2.1",
        "body": "fixes",
        "assets": [{"name": "shiru_arm64.deb", "browser_download_url": "https://x/a.deb"}]
    }"#;
    let criteria = MatchCriteria::new(r"\.deb$", "arm64", "").unwrap();

    let resolution = resolve_reader(json.as_bytes(), &criteria).unwrap();

    assert_eq!(resolution.to_string(), "v2.1|shiru_arm64.deb|https://x/a.deb");
}

#[test]
fn test_resolve_without_match_fails() {
    let json = r#"{"tag_name": "v2.1", "assets": [{"name": "app.tar.gz", "browser_download_url": "u"}]}"#;
    let criteria = MatchCriteria::new(r"\.deb$", "arm64", "").unwrap();

    let err = resolve_reader(json.as_bytes(), &criteria).unwrap_err();

    assert!(matches!(err, UpkeepError::NoMatchingAsset { .. }));
    assert_eq!(err.exit_code(), 6);
}

#[test]
fn test_marker_constants() {
    assert_eq!(MARKER_START, "<!-- LATEST-VERSION-START -->");
    assert_eq!(MARKER_END, "<!-- LATEST-VERSION-END -->");
}
