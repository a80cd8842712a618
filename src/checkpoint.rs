//! Break log: a single-use marker file holding the id of the problem a
//! previous run failed on.
//!
//! The file holds one decimal integer and nothing else. It is written only
//! when a run fails, and consumed (read then deleted) at the start of the
//! next run, so its mere presence means the last run crashed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// How a run begins, resolved from the break log.
///
/// Kept as a proper enum rather than an integer sentinel so that "no break
/// log" and "resume from problem 1" stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Start {
    /// No break log found: start a brand-new document.
    Fresh,
    /// A previous run failed on this id: skip everything before it.
    ResumeFrom(u32),
}

#[derive(Debug, Clone)]
pub struct BreakLog {
    path: PathBuf,
}

impl BreakLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the break log. Reads and deletes the file in one step; a
    /// second call (or a first run) sees no file and gets `Start::Fresh`.
    pub fn take(&self) -> io::Result<Start> {
        if !self.path.exists() {
            return Ok(Start::Fresh);
        }

        let raw = fs::read_to_string(&self.path)?;
        let id = raw.trim().parse::<u32>().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("break log {:?} holds {:?}, not an id: {e}", self.path, raw),
            )
        })?;
        fs::remove_file(&self.path)?;

        debug!(id, path = ?self.path, "consumed break log");
        Ok(Start::ResumeFrom(id))
    }

    /// Record the id of the problem that just failed.
    pub fn record(&self, id: u32) -> io::Result<()> {
        fs::write(&self.path, id.to_string())?;
        debug!(id, path = ?self.path, "recorded break log");
        Ok(())
    }
}
