use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, UpkeepError};

/// Line-oriented `key=value` sink read by the CI orchestrator. Appended to,
/// never truncated.
#[derive(Debug, Clone)]
pub struct OutputSink {
    path: PathBuf,
}

impl OutputSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write<K, V>(&self, pairs: &[(K, V)]) -> Result<()>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| UpkeepError::io(&self.path, e))?;
        let mut buf = String::new();
        for (key, value) in pairs {
            buf.push_str(key.as_ref());
            buf.push('=');
            buf.push_str(value.as_ref());
            buf.push('\n');
        }
        file.write_all(buf.as_bytes())
            .map_err(|e| UpkeepError::io(&self.path, e))
    }
}
