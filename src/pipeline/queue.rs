use async_channel::{Receiver, Sender};

use super::types::UnpackJob;

/// Unbounded multi-producer/multi-consumer queue between ingestion handlers
/// and pipeline workers. Jobs are delivered at least in FIFO order per
/// consumer and each job is received by exactly one worker; nothing is
/// deduplicated, so a re-uploaded descriptor enqueues a second job.
#[derive(Debug, Clone)]
pub struct JobQueue {
    tx: Sender<UnpackJob>,
    rx: Receiver<UnpackJob>,
}

impl JobQueue {
    pub fn new() -> Self {
        let (tx, rx) = async_channel::unbounded();
        Self { tx, rx }
    }

    /// Enqueues a job. The channel is unbounded, so this only fails once the
    /// queue has been closed during shutdown; jobs are never silently
    /// dropped.
    pub async fn push(&self, job: UnpackJob) -> anyhow::Result<()> {
        self.tx
            .send(job)
            .await
            .map_err(|_| anyhow::anyhow!("job queue is closed"))
    }

    /// Waits for the next job. Returns `None` once the queue is closed and
    /// drained, which ends the calling worker's loop.
    pub async fn pop(&self) -> Option<UnpackJob> {
        self.rx.recv().await.ok()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl Default for JobQueue {
    fn default() -> Self {
        Self::new()
    }
}
