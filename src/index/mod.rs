//! Index Builder Module
//!
//! The narrow surface the ingestion pipeline consumes to build search index
//! shards: create a per-package shard, add files to it, flush it, and merge
//! finished shards into a combined one.
//!
//! ## Submodules
//! - **`writer`**: `ShardWriter` — create / add_file / flush for one shard.
//! - **`merge`**: bulk-merges finished shard files into a new output file.
//! - **`tokenizer`**: splits source text into lowercased identifier terms.
//! - **`types`**: on-disk shard structures and the builder error type.
//!
//! The shard format (a JSON document list plus term → document-id postings)
//! is deliberately minimal and carries no compatibility promise; the rest of
//! the service only ever touches it through this module.

pub mod merge;
pub mod tokenizer;
pub mod types;
pub mod writer;

#[cfg(test)]
mod tests;

pub use merge::merge;
pub use types::{Document, IndexError, Shard};
pub use writer::ShardWriter;

/// File extension of finished shard files, without the dot.
pub const SHARD_EXTENSION: &str = "idx";
