//! JSON file persistence
//!
//! Small helpers shared by the settings and best-score stores:
//! - Atomic-ish writes (tmp file, then rename)
//! - Missing files are not errors for callers that want defaults

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and decode a JSON file; `Ok(None)` if it does not exist
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PersistError::Io {
                path: path.display().to_string(),
                source,
            });
        }
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| PersistError::Json {
            path: path.display().to_string(),
            source,
        })
}

/// Encode and write a JSON file, creating parent directories as needed
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    let io_err = |source| PersistError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|source| PersistError::Json {
        path: path.display().to_string(),
        source,
    })?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}
