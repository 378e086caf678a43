//! Ingestion Module
//!
//! HTTP-facing intake for source package uploads.
//!
//! ## Workflow
//! 1. **Upload**: `PUT /import/<package-id>/<file-name>` streams the request
//!    body into the package's staging directory, overwriting any previous
//!    upload of the same name.
//! 2. **Staging**: the `StagingStore` maps each package id to one directory
//!    under a process-local temporary root; raw uploads and the unpacked
//!    tree both live there until external cleanup.
//! 3. **Coordination**: once the package descriptor (`.dsc`) arrives, the
//!    package id is enqueued for the pipeline workers to unpack and index.

pub mod handlers;
pub mod staging;
