//! Client-side token storage.
//!
//! The portal hands back a session token on successful login; the only
//! operation the pipeline needs is a keyed put. The file-backed store keeps
//! a small YAML key/value map under the configuration directory.

use log::*;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Storage key for the session token returned on successful login.
///
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to write the store file
    #[error("Failed to save token store to {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create the store directory
    #[error("Failed to create token store directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize the store contents
    #[error("Failed to serialize token store: {0}")]
    SerializationFailed(String),
}

/// Key/value put operation against persistent client storage. No
/// expiration is managed on this side.
///
pub trait TokenStore: Send {
    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed store writing a YAML map to disk on every put.
///
pub struct FileTokenStore {
    file_path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileTokenStore {
    /// Return a store over the given file, loading any existing entries.
    /// An unreadable or malformed file starts the store empty.
    ///
    pub fn new(file_path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&file_path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Discarding malformed token store {:?}: {}", file_path, e);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        FileTokenStore { file_path, entries }
    }

    /// Return the stored value for a key, if any.
    ///
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Serialize the entries and write them to the disk, creating the
    /// parent directory if needed.
    ///
    fn write(&self) -> Result<(), StorageError> {
        let content = serde_yaml::to_string(&self.entries)
            .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(&self.file_path).map_err(|e| StorageError::SaveFailed {
            path: self.file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| StorageError::SaveFailed {
            path: self.file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| StorageError::SaveFailed {
            path: self.file_path.clone(),
            source: e,
        })?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.write()
    }
}
