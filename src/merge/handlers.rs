use std::sync::Arc;

use axum::extract::Extension;
use axum::http::StatusCode;

use super::coordinator::merge_shards;
use super::IndexDir;
use crate::metrics::Metrics;

/// `POST /merge` — merges all finished shards in the output directory. The
/// response carries no payload; results show up in the logs only.
pub async fn handle_merge(
    Extension(index_dir): Extension<Arc<IndexDir>>,
    Extension(metrics): Extension<Arc<Metrics>>,
) -> StatusCode {
    let dir = index_dir.0.clone();
    let outcome = tokio::task::spawn_blocking(move || merge_shards(&dir, &metrics)).await;

    match outcome {
        Ok(Ok(_)) => StatusCode::OK,
        Ok(Err(err)) => {
            tracing::error!("merge failed: {:#}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
        Err(err) => {
            tracing::error!("merge task failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
