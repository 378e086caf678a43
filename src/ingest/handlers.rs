use std::io;
use std::path::Path as FsPath;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use futures::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use super::staging::StagingStore;
use crate::metrics::Metrics;
use crate::pipeline::queue::JobQueue;
use crate::pipeline::types::UnpackJob;

/// Suffix of the upload whose arrival marks a package as complete and ready
/// to unpack.
pub const DESCRIPTOR_SUFFIX: &str = ".dsc";

/// Accepts arbitrary files for a given package and enqueues the package for
/// unpacking once its `.dsc` descriptor is uploaded. E.g.:
///
/// ```text
/// curl -X PUT --data-binary @i3-wm_4.7.2-1.debian.tar.xz \
///     http://localhost:21010/import/i3-wm_4.7.2-1/i3-wm_4.7.2-1.debian.tar.xz
/// curl -X PUT --data-binary @i3-wm_4.7.2-1.dsc \
///     http://localhost:21010/import/i3-wm_4.7.2-1/i3-wm_4.7.2-1.dsc
/// ```
///
/// All files land in the same staging directory; the last upload for a given
/// file name wins.
pub async fn handle_import(
    Path(path): Path<String>,
    Extension(staging): Extension<Arc<StagingStore>>,
    Extension(queue): Extension<JobQueue>,
    Extension(metrics): Extension<Arc<Metrics>>,
    body: Body,
) -> Result<String, (StatusCode, String)> {
    let Some((package, filename)) = split_import_path(&path) else {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("import path must be <package-id>/<file-name>, got {:?}", path),
        ));
    };

    if let Err(err) = staging.ensure_package_dir(package).await {
        tracing::error!("could not create staging directory for {}: {}", package, err);
        return Err((StatusCode::INTERNAL_SERVER_ERROR, err.to_string()));
    }

    let dest = staging.upload_path(package, filename);
    let written = match write_body(&dest, body).await {
        Ok(written) => written,
        Err(err) => {
            tracing::error!("could not write {}: {}", dest.display(), err);
            return Err((StatusCode::INTERNAL_SERVER_ERROR, err.to_string()));
        }
    };
    metrics.increment("package-uploads");
    tracing::info!("wrote {} bytes into {}", written, dest.display());

    if filename.ends_with(DESCRIPTOR_SUFFIX) {
        let job = UnpackJob {
            package: package.to_string(),
            descriptor: filename.to_string(),
        };
        if let Err(err) = queue.push(job).await {
            tracing::error!("could not enqueue package {}: {}", package, err);
            return Err((StatusCode::INTERNAL_SERVER_ERROR, err.to_string()));
        }
        metrics.increment("index-jobs-queued");
    }

    Ok(format!(
        "stored {} bytes of {} for package {}\n",
        written, filename, package
    ))
}

/// Splits the wildcard tail of an import URL into (package id, file name).
/// The package id is everything up to the final segment.
pub(crate) fn split_import_path(path: &str) -> Option<(&str, &str)> {
    let (package, filename) = path.rsplit_once('/')?;
    if package.is_empty() || filename.is_empty() {
        return None;
    }
    Some((package, filename))
}

/// Streams the request body into `dest`, replacing any existing file, and
/// returns the number of bytes written.
async fn write_body(dest: &FsPath, body: Body) -> io::Result<u64> {
    let mut file = File::create(dest).await?;
    let mut stream = body.into_data_stream();
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(io::Error::other)?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}
