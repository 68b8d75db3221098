use upkeep_provider::RepoId;

use crate::config::NotesTemplate;
use crate::entry::ReleaseEntry;

/// Render the release notes published alongside the downstream build.
pub fn render_release_notes(template: &NotesTemplate, repo: &RepoId, entry: &ReleaseEntry) -> String {
    format!(
        "# {package} {tag}\n\
         \n\
         This release packages upstream **{repo} {tag}**.\n\
         \n\
         ## Upstream Details\n\
         - **Version:** {tag}\n\
         - **Author:** @{author}\n\
         - **Original Release:** {url}\n\
         \n\
         ## Upstream Changelog\n\
         {body}\n",
        package = template.package_name,
        tag = entry.tag,
        repo = repo,
        author = entry.author,
        url = entry.url,
        body = entry.body,
    )
}
