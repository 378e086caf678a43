//! Worker Pool Implementation
//!
//! Spawns N long-lived worker tasks that consume the job queue and run the
//! full unpack → filter → index sequence per package. Disk-bound walking and
//! indexing runs on the blocking thread pool so the HTTP handlers stay
//! responsive.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;
use walkdir::WalkDir;

use super::queue::JobQueue;
use super::types::{PipelineError, UnpackJob};
use crate::filter::FilterPolicy;
use crate::index::{ShardWriter, SHARD_EXTENSION};
use crate::ingest::staging::StagingStore;
use crate::metrics::Metrics;

/// External tool that expands a source package descriptor and its archives
/// into a file tree.
const UNPACK_TOOL: &str = "dpkg-source";

/// Fixed-size pool of pipeline workers.
pub struct WorkerPool {
    queue: JobQueue,
    staging: Arc<StagingStore>,
    policy: Arc<FilterPolicy>,
    metrics: Arc<Metrics>,
    index_dir: PathBuf,
    worker_count: usize,
}

impl WorkerPool {
    pub fn new(
        queue: JobQueue,
        staging: Arc<StagingStore>,
        policy: Arc<FilterPolicy>,
        metrics: Arc<Metrics>,
        index_dir: PathBuf,
        worker_count: usize,
    ) -> Arc<Self> {
        Arc::new(Self {
            queue,
            staging,
            policy,
            metrics,
            index_dir,
            worker_count,
        })
    }

    /// Spawns the worker tasks and returns immediately. Each worker loops
    /// until the job queue is closed.
    pub fn start(self: &Arc<Self>) {
        tracing::info!("starting {} pipeline workers", self.worker_count);
        for worker_id in 0..self.worker_count {
            let pool = Arc::clone(self);
            tokio::spawn(async move {
                pool.worker_loop(worker_id).await;
            });
        }
    }

    async fn worker_loop(&self, worker_id: usize) {
        while let Some(job) = self.queue.pop().await {
            self.metrics.decrement("index-jobs-queued");
            tracing::info!("worker {} unpacking package {}", worker_id, job.package);

            match self.process(&job).await {
                Ok(indexed) => {
                    self.metrics.increment("packages-indexed");
                    tracing::info!(
                        "worker {} indexed package {} ({} files)",
                        worker_id,
                        job.package,
                        indexed
                    );
                }
                Err(err) if err.is_fatal() => {
                    // The unpack tree is neither fully indexed nor removed;
                    // crash loudly rather than mask inconsistent state.
                    tracing::error!("aborting pipeline: {}", err);
                    std::process::exit(1);
                }
                Err(err) => {
                    self.metrics.increment("packages-skipped");
                    tracing::warn!("worker {} skipping package {}: {}", worker_id, job.package, err);
                }
            }
        }
        tracing::info!("worker {} stopping, job queue closed", worker_id);
    }

    /// Runs the full sequence for one job: unpack the descriptor, create the
    /// package's shard, walk/filter/index the tree, flush. Returns the
    /// number of files indexed.
    pub async fn process(&self, job: &UnpackJob) -> Result<usize, PipelineError> {
        let descriptor = self.staging.upload_path(&job.package, &job.descriptor);
        let unpack_root = self.staging.unpack_dir(&job.package);
        unpack(&job.package, &descriptor, &unpack_root).await?;

        let shard_path = self
            .index_dir
            .join(format!("{}.{}", job.package, SHARD_EXTENSION));
        let writer = ShardWriter::create(&shard_path).map_err(|source| PipelineError::Index {
            package: job.package.clone(),
            source,
        })?;

        let package = job.package.clone();
        let policy = Arc::clone(&self.policy);
        let metrics = Arc::clone(&self.metrics);
        tokio::task::spawn_blocking(move || {
            walk_and_index(&package, &unpack_root, &policy, &metrics, writer)
        })
        .await
        .map_err(|err| PipelineError::Walk {
            package: job.package.clone(),
            reason: err.to_string(),
        })?
    }
}

/// Invokes the unpack tool against the package descriptor. The tool's stderr
/// goes straight to our stderr for operator visibility.
async fn unpack(package: &str, descriptor: &Path, dest: &Path) -> Result<(), PipelineError> {
    let status = Command::new(UNPACK_TOOL)
        .arg("--no-copy")
        .arg("--no-check")
        .arg("-x")
        .arg(descriptor)
        .arg(dest)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|err| PipelineError::Unpack {
            package: package.to_string(),
            reason: format!("could not run {}: {}", UNPACK_TOOL, err),
        })?;

    if !status.success() {
        return Err(PipelineError::Unpack {
            package: package.to_string(),
            reason: format!("{} exited with {}", UNPACK_TOOL, status),
        });
    }
    Ok(())
}

/// Walks the unpacked tree, deleting everything the filtering policy rejects
/// and feeding every surviving regular file to the shard writer. Every file
/// under the root ends up either indexed or removed; a failed removal is the
/// fatal [`PipelineError::Cleanup`].
pub fn walk_and_index(
    package: &str,
    root: &Path,
    policy: &FilterPolicy,
    metrics: &Metrics,
    mut writer: ShardWriter,
) -> Result<usize, PipelineError> {
    let mut it = WalkDir::new(root).into_iter();
    while let Some(entry) = it.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("walk error under {}: {}", root.display(), err);
                continue;
            }
        };
        // A name that is not valid UTF-8 cannot match the (UTF-8) policy
        // sets; such files are caught by the path check below.
        let name = entry.file_name().to_str();

        if entry.file_type().is_dir() {
            if name.is_some_and(|n| policy.ignores_dirname(n)) {
                remove_dir_all(entry.path())?;
                metrics.increment("dirs-deleted");
                it.skip_current_dir();
            }
            continue;
        }

        // Symlinks, devices and other non-regular entries are skipped
        // without error. WalkDir does not follow symlinks by default.
        if !entry.file_type().is_file() {
            continue;
        }

        if name.is_some_and(|n| policy.ignores_filename(n) || policy.ignores_suffix(n)) {
            remove_file(entry.path())?;
            metrics.increment("files-deleted");
            continue;
        }

        // Paths with invalid UTF-8 cannot be reported downstream; filter
        // them out early instead of breaking search results later.
        if entry.path().to_str().is_none() {
            tracing::warn!(
                "skipping file with non-UTF-8 path under {}",
                root.display()
            );
            continue;
        }
        let Some(indexed_path) = entry
            .path()
            .strip_prefix(root)
            .ok()
            .and_then(|rel| rel.to_str())
        else {
            continue;
        };

        if let Err(err) = writer.add_file(entry.path(), indexed_path) {
            tracing::warn!("could not index {}: {}", entry.path().display(), err);
            remove_file(entry.path())?;
            metrics.increment("files-deleted");
            continue;
        }
        metrics.increment("files-indexed");
    }

    let indexed = writer.doc_count();
    writer.flush().map_err(|source| PipelineError::Index {
        package: package.to_string(),
        source,
    })?;
    Ok(indexed)
}

fn remove_file(path: &Path) -> Result<(), PipelineError> {
    fs::remove_file(path).map_err(|source| PipelineError::Cleanup {
        path: path.to_path_buf(),
        source,
    })
}

fn remove_dir_all(path: &Path) -> Result<(), PipelineError> {
    fs::remove_dir_all(path).map_err(|source| PipelineError::Cleanup {
        path: path.to_path_buf(),
        source,
    })
}
