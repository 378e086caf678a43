//! Pipeline Data Types
//!
//! The queued job record and the error taxonomy that separates per-job
//! skips from the fatal delete-or-die invariant.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::index::IndexError;

/// One enqueued request to unpack and index a staged package. Created once
/// per descriptor upload and consumed by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackJob {
    /// Caller-supplied package id; names the staging directory and the shard.
    pub package: String,
    /// File name of the uploaded descriptor inside the staging directory.
    pub descriptor: String,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The external unpack tool failed or could not be invoked. The package
    /// is abandoned; no retry is scheduled.
    #[error("unpack failed for package {package}: {reason}")]
    Unpack { package: String, reason: String },

    /// Creating or finalizing the package's shard failed.
    #[error("index error for package {package}: {source}")]
    Index {
        package: String,
        source: IndexError,
    },

    /// A file or directory that had to be deleted could not be deleted,
    /// leaving the unpack tree neither indexed nor removed.
    #[error("could not remove {path}: {source}")]
    Cleanup { path: PathBuf, source: io::Error },

    /// The blocking walk task panicked or was cancelled.
    #[error("walk task failed for package {package}: {reason}")]
    Walk { package: String, reason: String },
}

impl PipelineError {
    /// Fatal errors mean the on-disk state is unrecoverably inconsistent;
    /// the worker loop maps them to process exit instead of a per-job skip.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PipelineError::Cleanup { .. })
    }
}
