use std::path::Path;

use crate::error::Result;
use crate::utils;

pub const COMMAND_KEY: &str = "command:";
pub const METADATA_KEY: &str = "metadata:";

/// A line-oriented build manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDocument {
    lines: Vec<String>,
}

impl ManifestDocument {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: split_lines(text).map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Drop every `metadata:` declaration and declare `metadata_file` right
    /// after the first `command:` line. Without a command line nothing is
    /// inserted.
    pub fn with_metadata(&self, metadata_file: &str) -> Self {
        let mut lines = Vec::with_capacity(self.lines.len() + 1);
        let mut inserted = false;
        for line in &self.lines {
            let trimmed = line.trim();
            if trimmed.starts_with(METADATA_KEY) {
                continue;
            }
            lines.push(line.clone());
            if !inserted && trimmed.starts_with(COMMAND_KEY) {
                lines.push(format!("{} {}", METADATA_KEY, metadata_file));
                inserted = true;
            }
        }
        if !inserted {
            tracing::warn!("no `{}` line found, metadata not declared", COMMAND_KEY);
        }
        Self { lines }
    }

    /// Newline-joined, with exactly one trailing newline.
    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Line breaks recognised when splitting a manifest: `\n`, `\r\n`, a lone
/// `\r`, and the vertical-tab, form-feed, separator and Unicode line breaks.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split on every line break. A trailing break does not produce an empty
/// final line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.char_indices().find(|&(_, c)| is_line_break(c)) {
            Some((idx, c)) => {
                let line = &rest[..idx];
                let mut next = idx + c.len_utf8();
                if c == '\r' && rest[next..].starts_with('\n') {
                    next += 1;
                }
                rest = &rest[next..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

/// Rewrite the manifest at `source` into `target`, which may be the same file.
pub fn augment(source: &Path, target: &Path, metadata_file: &str) -> Result<()> {
    let document = ManifestDocument::parse(&utils::read(source)?);
    let augmented = document.with_metadata(metadata_file);
    utils::write(target, &augmented.render())?;
    tracing::info!(
        source = %source.display(),
        target = %target.display(),
        metadata_file,
        "wrote augmented manifest"
    );
    Ok(())
}
