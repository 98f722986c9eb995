//! File-backed persistence slot.
//!
//! ## Layout
//! ```text
//! <data dir>/
//! └── %40RocketShoes%3Acart.json     ◄── key "@RocketShoes:cart"
//! ```
//!
//! Keys are percent-encoded byte by byte (everything outside
//! `[A-Za-z0-9-_.]`), so distinct keys never share a file.
//!
//! Writes go to a sibling `.tmp` file first and are renamed over the target,
//! so a crash mid-write leaves the previous cart in place.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use super::PersistenceSlot;
use crate::error::PersistenceError;

/// Slot storing one file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    /// Creates a slot rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSlot { dir: dir.into() }
    }

    /// Creates a slot in the platform data directory.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.rocketshoes.storefront/`
    /// - **Windows**: `%APPDATA%\rocketshoes\storefront\data\`
    /// - **Linux**: `~/.local/share/storefront/`
    pub fn in_data_dir() -> Result<Self, PersistenceError> {
        Self::default_dir()
            .map(FileSlot::new)
            .ok_or_else(|| PersistenceError::Unavailable("no home directory".to_string()))
    }

    /// Returns the platform data directory, if one can be determined.
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "rocketshoes", "storefront").map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Directory holding the slot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len() + 5);
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.') {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("%{:02X}", byte));
            }
        }
        name.push_str(".json");
        self.dir.join(name)
    }
}

impl PersistenceSlot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        let path = self.path_for(key);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(?path, "Slot file absent");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &path)?;

        debug!(?path, bytes = bytes.len(), "Slot file written");
        Ok(())
    }
}
