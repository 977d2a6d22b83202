//! Tiered fetch of the launch listing.
//!
//! The `Orchestrator` resolves one dataset through memory, then disk, then
//! the remote source (behind the connectivity gate), and reports every call
//! to the consumer as `FetchOutcome` values on an mpsc channel: an optional
//! `Progress` followed by exactly one `Success` or `Failure`.
//!
//! Calls are not deduplicated. Two overlapping fetches for the same key both
//! run to completion and the consumer sees both terminal values, in whatever
//! order they finish.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info, warn};

use crate::api::LaunchSource;
use crate::cache::{CacheKey, DiskCache, MemoryCache};
use crate::connectivity::ConnectivityGate;
use crate::models::Dataset;
use crate::outcome::{FetchError, FetchOutcome};

/// Buffer size for the outcome channel.
/// Each call produces at most two values, so this covers many queued calls.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Number of upcoming launches requested from the remote source.
pub const DEFAULT_LAUNCH_COUNT: usize = 10;

/// Helper to send outcomes, logging any channel errors
async fn send_result(tx: &mpsc::Sender<FetchOutcome>, outcome: FetchOutcome) {
    if let Err(e) = tx.send(outcome).await {
        error!(error = %e, "Failed to send fetch outcome - channel closed");
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// The collaborators one orchestrator resolves through.
pub struct Tiers {
    pub memory: Arc<MemoryCache>,
    pub disk: Arc<DiskCache>,
    pub gate: ConnectivityGate,
    pub source: Arc<dyn LaunchSource>,
}

/// State shared with spawned fetch tasks.
struct Pipeline {
    key: CacheKey,
    count: usize,
    tiers: Tiers,
    /// In-flight disk writes. Never aborted, only awaited by `flush_writes`.
    writes: Mutex<Vec<JoinHandle<()>>>,
}

impl Pipeline {
    async fn resolve(&self, refresh: bool, tx: &mpsc::Sender<FetchOutcome>) -> Result<Dataset, FetchError> {
        if refresh {
            send_result(tx, FetchOutcome::Progress).await;
            return self.fetch_remote().await;
        }

        if let Some(data) = self.tiers.memory.get(&self.key) {
            debug!(key = %self.key, records = data.len(), "Memory cache hit");
            return Ok(data);
        }

        // A corrupt record fails the call instead of falling through to remote
        if let Some(data) = self.tiers.disk.load(&self.key).await? {
            debug!(key = %self.key, records = data.len(), "Disk cache hit");
            self.tiers.memory.put(&self.key, data.clone());
            return Ok(data);
        }

        debug!(key = %self.key, "Cache miss, fetching from remote");
        send_result(tx, FetchOutcome::Progress).await;
        self.fetch_remote().await
    }

    async fn fetch_remote(&self) -> Result<Dataset, FetchError> {
        let source = &self.tiers.source;
        let count = self.count;
        let data = self
            .tiers
            .gate
            .check_and_run(move || async move {
                source.fetch_top(count).await.map_err(FetchError::from)
            })
            .await?;

        info!(key = %self.key, records = data.len(), "Fetched launches from remote");
        self.write_through(&data);
        Ok(data)
    }

    fn write_through(&self, data: &Dataset) {
        self.tiers.memory.put(&self.key, data.clone());

        let disk = Arc::clone(&self.tiers.disk);
        let key = self.key.clone();
        let data = data.clone();
        let handle = tokio::spawn(async move {
            disk.save(&key, &data).await;
        });

        let mut writes = lock(&self.writes);
        writes.retain(|h| !h.is_finished());
        writes.push(handle);
    }

    fn search(&self, needle: &str) -> Result<Dataset, FetchError> {
        let data = self.tiers.memory.get(&self.key).ok_or(FetchError::NotCached)?;
        Ok(data.into_iter().filter(|l| l.name_contains(needle)).collect())
    }
}

/// Resolves one cached dataset and streams outcomes to a single consumer.
///
/// `fetch` and `search` spawn onto the current Tokio runtime and must be
/// called from within one. Dropping the orchestrator (or calling
/// `shutdown`) aborts every call still in flight, so nothing is delivered
/// afterwards. Disk writes started by a successful fetch are not aborted.
pub struct Orchestrator {
    pipeline: Arc<Pipeline>,
    tx: mpsc::Sender<FetchOutcome>,
    tasks: Mutex<JoinSet<()>>,
}

impl Orchestrator {
    /// Create an orchestrator for `key` and the receiving end of its
    /// outcome channel.
    pub fn new(key: CacheKey, count: usize, tiers: Tiers) -> (Self, mpsc::Receiver<FetchOutcome>) {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let pipeline = Pipeline {
            key,
            count,
            tiers,
            writes: Mutex::new(Vec::new()),
        };
        let orchestrator = Self {
            pipeline: Arc::new(pipeline),
            tx,
            tasks: Mutex::new(JoinSet::new()),
        };
        (orchestrator, rx)
    }

    pub fn key(&self) -> &CacheKey {
        &self.pipeline.key
    }

    pub fn memory(&self) -> &Arc<MemoryCache> {
        &self.pipeline.tiers.memory
    }

    pub fn disk(&self) -> &Arc<DiskCache> {
        &self.pipeline.tiers.disk
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = lock(&self.tasks);
        // Reap finished calls so the set doesn't grow without bound
        while tasks.try_join_next().is_some() {}
        tasks.spawn(task);
    }

    /// Resolve the dataset. With `refresh` set, both cache tiers are
    /// bypassed and the remote source is asked directly.
    pub fn fetch(&self, refresh: bool) {
        debug!(key = %self.pipeline.key, refresh, "Fetch requested");
        let pipeline = Arc::clone(&self.pipeline);
        let tx = self.tx.clone();
        self.spawn(async move {
            let result = pipeline.resolve(refresh, &tx).await;
            if let Err(ref e) = result {
                warn!(key = %pipeline.key, error = %e, "Fetch failed");
            }
            send_result(&tx, result.into()).await;
        });
    }

    /// Same as `fetch(true)`.
    pub fn force_refresh(&self) {
        self.fetch(true);
    }

    /// Filter the in-memory snapshot by display name, ignoring case.
    ///
    /// Never touches disk or the network. With nothing in memory the
    /// outcome is `Failure(FetchError::NotCached)`.
    pub fn search(&self, text: &str) {
        let pipeline = Arc::clone(&self.pipeline);
        let tx = self.tx.clone();
        let needle = text.to_string();
        self.spawn(async move {
            let result = pipeline.search(&needle);
            send_result(&tx, result.into()).await;
        });
    }

    /// Drop the dataset from both tiers.
    pub async fn invalidate(&self) {
        let key = &self.pipeline.key;
        info!(key = %key, "Invalidating cached launches");
        self.pipeline.tiers.memory.remove(key);
        self.pipeline.tiers.disk.delete(key).await;
    }

    /// Abort every fetch and search still in flight.
    pub fn shutdown(&self) {
        let mut tasks = lock(&self.tasks);
        if !tasks.is_empty() {
            debug!(tasks = tasks.len(), "Aborting outstanding fetch tasks");
        }
        tasks.abort_all();
    }

    /// Wait for disk writes started by earlier fetches to finish.
    pub async fn flush_writes(&self) {
        let pending = std::mem::take(&mut *lock(&self.pipeline.writes));
        for result in futures::future::join_all(pending).await {
            if let Err(e) = result {
                warn!(error = %e, "Cache write task did not complete");
            }
        }
    }
}
