//! Source Package Importer Library
//!
//! Ingestion front end of a source-code search service. Accepts uploaded
//! Debian source packages over HTTP, unpacks them, strips files that are
//! useless for code search, and indexes what remains into per-package shards
//! that can later be merged into one combined index.
//!
//! ## Architecture Modules
//! - **`ingest`**: the HTTP intake. Streams uploads into per-package staging
//!   directories and enqueues a package once its `.dsc` descriptor arrives.
//! - **`pipeline`**: the job queue and fixed worker pool running the
//!   unpack → filter → index sequence, with fail-fast containment for bad
//!   packages and a fatal delete-or-die invariant for the unpack tree.
//! - **`filter`**: the immutable ignore sets (directory names, file names,
//!   suffixes) applied while walking an unpacked package.
//! - **`index`**: the narrow index-builder surface (create / add_file /
//!   flush / merge) and a minimal shard format behind it.
//! - **`merge`**: the operator-triggered coordinator that merges all
//!   finished shards into a combined one.
//! - **`metrics`**: an injected counter sink shared by handlers and workers.

pub mod filter;
pub mod index;
pub mod ingest;
pub mod merge;
pub mod metrics;
pub mod pipeline;
