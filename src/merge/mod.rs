//! Shard Merge Coordinator Module
//!
//! Operator-triggered step that combines all finished per-package index
//! shards in the output directory into one big shard. Merging never runs
//! automatically after indexing; `POST /merge` drives it, and outcomes are
//! visible only through logs.
//!
//! The coordinator takes no lock against pipeline workers writing new shards
//! while the scan and merge run; serializing the two is the operator's
//! responsibility.

pub mod coordinator;
pub mod handlers;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

/// Shared handle to the configured shard output directory, layered into the
/// router as an extension.
#[derive(Debug, Clone)]
pub struct IndexDir(pub PathBuf);
