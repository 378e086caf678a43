use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::Extension,
    routing::{post, put},
};

use codesearch_importer::filter::FilterPolicy;
use codesearch_importer::ingest;
use codesearch_importer::ingest::staging::StagingStore;
use codesearch_importer::merge::{self, IndexDir};
use codesearch_importer::metrics::Metrics;
use codesearch_importer::pipeline::queue::JobQueue;
use codesearch_importer::pipeline::worker::WorkerPool;

const DEFAULT_IGNORED_DIRNAMES: &str = ".pc,po,.git";
const DEFAULT_IGNORED_FILENAMES: &str = "NEWS,COPYING,LICENSE,CHANGES,Makefile.in,ltmain.sh,\
config.guess,config.sub,depcomp,aclocal.m4,libtool.m4,.gitignore";
const DEFAULT_IGNORED_SUFFIXES: &str =
    "conf,dic,cfg,man,xml,xsl,html,sgml,pod,po,txt,tex,rtf,docbook,symbols";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut listen: SocketAddr = "127.0.0.1:21010".parse()?;
    let mut index_dir = PathBuf::from("./index");
    let mut workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    let mut ignored_dirnames = DEFAULT_IGNORED_DIRNAMES.to_string();
    let mut ignored_filenames = DEFAULT_IGNORED_FILENAMES.to_string();
    let mut ignored_suffixes = DEFAULT_IGNORED_SUFFIXES.to_string();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--listen" => {
                listen = args[i + 1].parse()?;
                i += 2;
            }
            "--index-dir" => {
                index_dir = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            "--workers" => {
                workers = args[i + 1].parse()?;
                i += 2;
            }
            "--ignored-dirnames" => {
                ignored_dirnames = args[i + 1].clone();
                i += 2;
            }
            "--ignored-filenames" => {
                ignored_filenames = args[i + 1].clone();
                i += 2;
            }
            "--ignored-suffixes" => {
                ignored_suffixes = args[i + 1].clone();
                i += 2;
            }
            other => {
                eprintln!("Unknown flag: {}", other);
                eprintln!(
                    "Usage: {} [--listen <addr:port>] [--index-dir <path>] [--workers <n>] \
[--ignored-dirnames <a,b,...>] [--ignored-filenames <a,b,...>] [--ignored-suffixes <a,b,...>]",
                    args[0]
                );
                std::process::exit(1);
            }
        }
    }

    std::fs::create_dir_all(&index_dir)?;

    // Staging root for raw uploads and unpacked trees. Kept on disk for the
    // whole run; cleanup is an external concern.
    let staging_root = tempfile::Builder::new()
        .prefix("codesearch-importer-")
        .tempdir()?
        .keep();
    tracing::info!("staging uploads under {}", staging_root.display());
    tracing::info!("writing index shards to {}", index_dir.display());

    let staging = Arc::new(StagingStore::new(staging_root));
    let policy = Arc::new(FilterPolicy::from_lists(
        &ignored_dirnames,
        &ignored_filenames,
        &ignored_suffixes,
    ));
    let metrics = Arc::new(Metrics::new());
    let queue = JobQueue::new();

    // 1. Pipeline workers:
    let pool = WorkerPool::new(
        queue.clone(),
        staging.clone(),
        policy,
        metrics.clone(),
        index_dir.clone(),
        workers,
    );
    pool.start();

    // 2. HTTP router:
    let app = Router::new()
        .route("/import/*path", put(ingest::handlers::handle_import))
        .route("/merge", post(merge::handlers::handle_merge))
        .layer(Extension(staging))
        .layer(Extension(queue))
        .layer(Extension(metrics))
        .layer(Extension(Arc::new(IndexDir(index_dir))));

    // 3. Serve:
    tracing::info!("listening on {}", listen);
    let listener = tokio::net::TcpListener::bind(listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
