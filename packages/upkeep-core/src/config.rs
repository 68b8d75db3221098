use std::path::{Path, PathBuf};

use upkeep_provider::RepoId;

pub const DEFAULT_UPSTREAM_REPO: &str = "RockinChaos/Shiru";
pub const DEFAULT_VERSION_FILE: &str = "UPSTREAM_VERSION";
pub const DEFAULT_CHANGELOG_FILE: &str = ".github/CHANGELOG.md";
pub const DEFAULT_RELEASE_NOTES_FILE: &str = "RELEASE_NOTES.md";
pub const DEFAULT_OUTPUT_FILE: &str = "github_output.txt";
pub const DEFAULT_PACKAGE_NAME: &str = "Shiru Flatpak";

/// Everything the release watcher needs to know about where it runs.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    pub repo: RepoId,
    pub version_file: PathBuf,
    pub changelog_file: PathBuf,
    pub release_notes_file: PathBuf,
    pub force: bool,
    pub notes: NotesTemplate,
}

impl WatcherConfig {
    /// Default file layout, relative to the working directory.
    pub fn new(repo: RepoId) -> Self {
        Self {
            repo,
            version_file: PathBuf::from(DEFAULT_VERSION_FILE),
            changelog_file: PathBuf::from(DEFAULT_CHANGELOG_FILE),
            release_notes_file: PathBuf::from(DEFAULT_RELEASE_NOTES_FILE),
            force: false,
            notes: NotesTemplate::default(),
        }
    }

    /// Default file layout rooted at `root`.
    pub fn in_dir(repo: RepoId, root: &Path) -> Self {
        Self {
            version_file: root.join(DEFAULT_VERSION_FILE),
            changelog_file: root.join(DEFAULT_CHANGELOG_FILE),
            release_notes_file: root.join(DEFAULT_RELEASE_NOTES_FILE),
            ..Self::new(repo)
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Wording of the generated release notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesTemplate {
    /// Title prefix, e.g. `Shiru Flatpak` in `# Shiru Flatpak v1.2.3`.
    pub package_name: String,
}

impl Default for NotesTemplate {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
        }
    }
}
