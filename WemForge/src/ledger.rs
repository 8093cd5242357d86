//! Failure ledger persistence
//!
//! A plain-text file with one failed source path per line. The ledger is
//! cleared at the start of every run, appended to as decode failures
//! happen, and consumed destructively by the retry pass.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Persisted list of source files that failed to decode.
#[derive(Debug, Clone)]
pub struct FailureLedger {
    path: PathBuf,
}

impl FailureLedger {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Truncate the ledger, starting a fresh record for this run.
    pub fn clear(&self) -> Result<()> {
        fs::write(&self.path, "")?;
        Ok(())
    }

    /// Append one failed source path.
    pub fn append(&self, source: &Path) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", source.display())?;
        Ok(())
    }

    /// Read every recorded path and truncate the file as one unit.
    ///
    /// The retry pass consumes the ledger exactly once per run; a crash
    /// mid-pass loses the entries not yet retried. Still-failing sources
    /// get re-appended by the caller. A missing file yields an empty list.
    pub fn take(&self) -> Result<Vec<PathBuf>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        fs::write(&self.path, "")?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect())
    }
}
