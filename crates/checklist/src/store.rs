use crate::Task;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors from the persistence boundary. A missing task file is not an error
/// (`load` returns an empty list); everything else is.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not a valid task list")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Flat-file JSON store for the task list.
///
/// Every save is a whole-file rewrite; a failed write leaves whatever
/// partial state the filesystem produced.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<Task>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no task file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: err,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|err| StoreError::Parse {
            path: self.path.clone(),
            source: err,
        })
    }

    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let body = serde_json::to_string(tasks).map_err(|err| StoreError::Parse {
            path: self.path.clone(),
            source: err,
        })?;
        fs::write(&self.path, body).map_err(|err| StoreError::Write {
            path: self.path.clone(),
            source: err,
        })?;
        debug!(path = %self.path.display(), count = tasks.len(), "task list saved");
        Ok(())
    }
}
