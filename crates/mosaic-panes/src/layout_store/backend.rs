//! Where layout snapshots are stored.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use mosaic_common::LayoutError;

/// Key/value storage for serialized layouts.
pub trait PersistenceBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LayoutError>;

    /// Store `bytes` under `key`, replacing any previous value.
    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), LayoutError>;

    /// Returns whether the key existed.
    fn remove(&self, key: &str) -> Result<bool, LayoutError>;

    /// All keys, sorted.
    fn keys(&self) -> Result<Vec<String>, LayoutError>;
}

// =============================================================================
// FILE BACKEND
// =============================================================================

/// One `<key>.json` file per layout in a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data_dir>/mosaic/layouts` for the current platform.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("mosaic").join("layouts"))
    }

    pub fn open_default() -> Result<Self, LayoutError> {
        Self::default_dir().map(Self::new).ok_or_else(|| {
            LayoutError::Persistence("could not determine data directory".into())
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, LayoutError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

/// Layout names become file names, so keep them to a safe alphabet.
fn validate_key(key: &str) -> Result<(), LayoutError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(LayoutError::Persistence(format!(
            "invalid layout name '{key}': use letters, digits, '-', '_' or '.'"
        )))
    }
}

impl PersistenceBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LayoutError> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), LayoutError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            LayoutError::Persistence(format!(
                "failed to create layout directory {}: {e}",
                self.dir.display()
            ))
        })?;

        // Write to .tmp, then rename
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, bytes)?;
        if let Err(e) = std::fs::rename(&tmp_path, &path) {
            tracing::warn!("atomic rename failed ({e}), falling back to direct write");
            std::fs::write(&path, bytes)?;
            let _ = std::fs::remove_file(&tmp_path);
        }

        tracing::debug!(path = %path.display(), "layout written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, LayoutError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, LayoutError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

// =============================================================================
// MEMORY BACKEND
// =============================================================================

/// Process-local storage, for tests and ephemeral workspaces.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PersistenceBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LayoutError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), LayoutError> {
        self.entries().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, LayoutError> {
        Ok(self.entries().remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, LayoutError> {
        Ok(self.entries().keys().cloned().collect())
    }
}
