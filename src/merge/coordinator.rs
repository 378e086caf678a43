use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;

use crate::index::{self, SHARD_EXTENSION};
use crate::metrics::Metrics;

/// Scans `index_dir` for finished shard files and merges them into a fresh
/// combined shard in the same directory. With zero or one shard there is
/// nothing to merge and `None` is returned. Input shards are never deleted
/// or relocated.
pub fn merge_shards(index_dir: &Path, metrics: &Metrics) -> anyhow::Result<Option<PathBuf>> {
    let mut shard_files = Vec::new();
    for dirent in
        fs::read_dir(index_dir).with_context(|| format!("listing {}", index_dir.display()))?
    {
        let path = dirent?.path();
        if path.extension().is_some_and(|ext| ext == SHARD_EXTENSION) {
            shard_files.push(path);
        }
    }
    tracing::info!(
        "found {} shard files in {}",
        shard_files.len(),
        index_dir.display()
    );
    if shard_files.len() <= 1 {
        return Ok(None);
    }
    shard_files.sort();

    // The combined file gets a name the shard scan above will never pick up,
    // so a later merge cannot re-ingest it. Relocating it is an external
    // step.
    let (file, combined_path) = tempfile::Builder::new()
        .prefix("combined-")
        .tempfile_in(index_dir)
        .context("creating combined shard file")?
        .keep()
        .context("persisting combined shard file")?;
    drop(file);

    let started = Instant::now();
    index::merge(&combined_path, &shard_files)
        .with_context(|| format!("merging into {}", combined_path.display()))?;
    let elapsed = started.elapsed();
    metrics.set("last-merge-ms", elapsed.as_millis() as i64);
    tracing::info!(
        "merged {} shards into {} in {:?}",
        shard_files.len(),
        combined_path.display(),
        elapsed
    );
    Ok(Some(combined_path))
}
