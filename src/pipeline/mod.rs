//! Pipeline Coordinator Module
//!
//! Runs the unpack → filter → index sequence for every staged package whose
//! descriptor has arrived.
//!
//! ## Architecture Overview
//! Ingestion handlers push package ids onto a single unbounded MPMC channel;
//! a fixed pool of worker tasks pops them, one job per worker at a time.
//! Each job is delivered to exactly one worker, with no ordering guarantee
//! across workers.
//!
//! ## Failure policy
//! - **Unpack failure**: the package is logged and abandoned; no shard is
//!   produced and the pipeline keeps running. One bad package must never
//!   block the rest.
//! - **Per-file index failure**: the file is deleted and the walk continues.
//! - **Failed deletion**: every file under the unpack root must end up
//!   either indexed or removed. A deletion that fails leaves the tree in
//!   neither state, so the worker loop terminates the whole process.
//!
//! ## Submodules
//! - **`queue`**: the shared job channel between handlers and workers.
//! - **`worker`**: the worker pool and the per-package processing sequence.
//! - **`types`**: the job record and the pipeline error taxonomy.

pub mod queue;
pub mod types;
pub mod worker;
