//! Append-only invocation log (`.cmakegen_log.jsonl`).
//!
//! Each proxy process appends exactly one line. Lines are written with a
//! single `write_all` on a file opened in append mode, so concurrent proxies
//! in a parallel build never interleave inside a record.

use crate::invocation::InvocationRecord;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default log location, relative to the build's working directory.
pub const DEFAULT_LOG_PATH: &str = ".cmakegen_log.jsonl";

/// Errors raised while reading or writing the log.
#[derive(Debug)]
pub enum StoreError {
    /// The underlying file could not be read or written
    Io(io::Error),
    /// A stored line is not a valid record (1-based line number)
    Malformed {
        line: usize,
        source: serde_json::Error,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Malformed { line, source } => {
                write!(f, "Malformed log entry on line {}: {}", line, source)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Malformed { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Handle on a log file. Cheap to create; the file is only touched by the
/// operations below.
#[derive(Debug, Clone)]
pub struct InvocationLog {
    path: PathBuf,
}

impl InvocationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single newline-terminated JSON line.
    pub fn append(&self, record: &InvocationRecord) -> Result<(), StoreError> {
        let mut line = serde_json::to_vec(record).map_err(io::Error::from)?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&line)?;
        Ok(())
    }

    /// Read every record in append order. A missing log is an empty log.
    pub fn read_all(&self) -> Result<Vec<InvocationRecord>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let record = serde_json::from_str(line).map_err(|source| StoreError::Malformed {
                line: idx + 1,
                source,
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Remove every record. Clearing a log that does not exist is a no-op.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
