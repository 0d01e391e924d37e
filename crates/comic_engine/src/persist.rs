use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error writing {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Ensure the directory that will hold `path` exists; create it if missing.
pub fn ensure_parent_dir(path: &Path) -> Result<(), PersistError> {
    let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) else {
        return Ok(());
    };
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Writes the index document in place: create or truncate, write, flush.
///
/// There is no temp-file-and-rename step, so a crash mid-write can leave a
/// truncated file behind.
#[derive(Debug, Clone)]
pub struct IndexFileSink {
    path: PathBuf,
}

impl IndexFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_parent_dir(&self.path)?;

        let io_err = |source| PersistError::Io {
            path: self.path.clone(),
            source,
        };
        let mut file = File::create(&self.path).map_err(io_err)?;
        file.write_all(content).map_err(io_err)?;
        file.flush().map_err(io_err)?;
        Ok(self.path.clone())
    }
}
