use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Result, UpkeepError};

/// Read a whole file, treating a missing file as empty.
pub fn read_or_empty(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(UpkeepError::io(path, e)),
    }
}

pub fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| UpkeepError::io(path, e))
}

/// Overwrite `path`. Its directory must already exist.
pub fn write(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| UpkeepError::io(path, e))
}

/// Like [`write`], creating missing parent directories first.
pub fn write_creating_parents(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| UpkeepError::io(parent, e))?;
    }
    write(path, content)
}
