//! The synchronization engine: canonical collection, startup resolution,
//! and write-through persistence.
//!
//! The engine owns the one in-memory sequence of tasks the rest of the
//! program treats as truth. Startup runs an ordered resolution pipeline —
//! remote, then cache, then seed, then compiled-in defaults — adopting the
//! first tier that yields a usable collection. Live data beats cached data
//! beats packaged seed beats defaults; each tier is tried once, and no
//! failure escapes the chain.
//!
//! Every accepted mutation replaces the collection wholesale, notifies
//! subscribers synchronously, and then hands the new collection to a
//! background writer: cache always, remote when configured, and an export
//! artifact when the remote rejects a user-initiated write. The mutation
//! never waits on that I/O and is never rolled back by its failure.

use crate::bus::{Bus, SubscriberId};
use crate::config::EngineConfig;
use crate::error::StoreError;
use crate::model::{Status, Task};
use crate::query;
use crate::store::{
    CacheStore, ExportSink, RemoteStore, SeedStore, TaskSource, defaults::default_tasks,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use tracing::{debug, error, info, warn};

enum Job {
    Persist {
        tasks: Vec<Task>,
        /// Whether this write may reach the remote tier (and therefore the
        /// export fallback). False for startup mirror writes, so a flaky
        /// network never produces a spurious artifact on load.
        push_remote: bool,
    },
    Flush(mpsc::Sender<()>),
}

/// Fire-and-forget persistence worker. One thread, jobs in order, last
/// writer wins; an in-flight write is never cancelled, its result just
/// goes stale when a newer job lands after it.
struct Writer {
    tx: Option<mpsc::Sender<Job>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Writer {
    fn spawn(cache: CacheStore, remote: Option<Arc<dyn TaskSource>>, export: ExportSink) -> Self {
        let (tx, rx) = mpsc::channel::<Job>();
        let handle = thread::Builder::new()
            .name("tasker-writer".to_string())
            .spawn(move || {
                for job in rx {
                    match job {
                        Job::Persist { tasks, push_remote } => {
                            if let Err(err) = cache.save(&tasks) {
                                warn!(%err, "cache write failed; keeping in-memory state");
                            }
                            if push_remote {
                                if let Some(remote) = &remote {
                                    if let Err(err) = remote.save(&tasks) {
                                        warn!(%err, "remote save failed; writing export artifact");
                                        if let Err(err) = export.write(&tasks) {
                                            error!(
                                                %err,
                                                "export fallback failed; latest state exists in memory only"
                                            );
                                        }
                                    }
                                }
                            }
                        }
                        Job::Flush(ack) => {
                            let _ = ack.send(());
                        }
                    }
                }
            })
            .expect("failed to spawn persistence writer thread");

        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    fn send(&self, job: Job) {
        if let Some(tx) = &self.tx {
            if tx.send(job).is_err() {
                warn!("persistence writer is gone; dropping write");
            }
        }
    }
}

impl Drop for Writer {
    fn drop(&mut self) {
        // Close the channel so the worker drains and exits.
        drop(self.tx.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

pub struct SyncEngine {
    tasks: Vec<Task>,
    initialized: bool,
    strict: bool,
    remote: Option<Arc<dyn TaskSource>>,
    cache: CacheStore,
    seed: Arc<dyn TaskSource>,
    export: ExportSink,
    bus: Bus,
    writer: Writer,
}

impl SyncEngine {
    /// Build an engine from resolved configuration. Does not resolve the
    /// startup source; call [`Self::resolve`] once before reading.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        let remote = config
            .remote_url
            .as_deref()
            .map(|url| Arc::new(RemoteStore::new(url)) as Arc<dyn TaskSource>);

        Self::with_sources(
            remote,
            CacheStore::new(&config.data_dir),
            Arc::new(SeedStore::new()),
            ExportSink::new(config.export_dir.clone()),
            config.strict,
        )
    }

    /// Build an engine over explicit tiers. Tests use this to substitute
    /// failing or canned sources.
    #[must_use]
    pub fn with_sources(
        remote: Option<Arc<dyn TaskSource>>,
        cache: CacheStore,
        seed: Arc<dyn TaskSource>,
        export: ExportSink,
        strict: bool,
    ) -> Self {
        let writer = Writer::spawn(cache.clone(), remote.clone(), export.clone());
        Self {
            tasks: Vec::new(),
            initialized: false,
            strict,
            remote,
            cache,
            seed,
            export,
            bus: Bus::new(),
            writer,
        }
    }

    // -----------------------------------------------------------------
    // Startup resolution
    // -----------------------------------------------------------------

    /// Run the ordered resolution pipeline once. Subsequent calls are
    /// no-ops until [`Self::reset_to_defaults`] clears the initialized
    /// mark.
    pub fn resolve(&mut self) {
        if self.initialized {
            return;
        }

        if let Some(remote) = self.remote.clone() {
            match remote.load() {
                Ok(tasks) => {
                    info!(count = tasks.len(), "adopted collection from remote");
                    self.adopt(tasks, true);
                    return;
                }
                Err(err) => warn!(%err, "remote tier unavailable; falling back to cache"),
            }
        }

        match self.cache.load() {
            Ok(tasks) => {
                info!(count = tasks.len(), "adopted collection from cache");
                self.adopt(tasks, false);
                return;
            }
            Err(err) => warn!(%err, "cache tier unavailable; falling back to seed"),
        }

        match self.seed.load() {
            Ok(tasks) => {
                info!(count = tasks.len(), "adopted collection from seed data");
                self.adopt(tasks, true);
                return;
            }
            Err(err) => warn!(%err, "seed tier unavailable; adopting hardcoded defaults"),
        }

        self.adopt(default_tasks(), true);
    }

    fn adopt(&mut self, tasks: Vec<Task>, mirror_to_cache: bool) {
        self.tasks = tasks;
        self.initialized = true;
        self.bus.broadcast(&self.tasks);
        if mirror_to_cache {
            self.writer.send(Job::Persist {
                tasks: self.tasks.clone(),
                push_remote: false,
            });
        }
    }

    // -----------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn active_tasks(&self) -> Vec<Task> {
        query::active(&self.tasks)
    }

    #[must_use]
    pub fn archived_tasks(&self) -> Vec<Task> {
        query::archived(&self.tasks)
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Next id for a created task: `max(existing ids, default 0) + 1`.
    /// Ids are never reused while their task remains in the collection.
    #[must_use]
    pub fn generate_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    // -----------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------

    /// Insert a new task at the front of the collection. The caller's `id`
    /// and `archived` values are overwritten: the store assigns the id and
    /// created tasks always start unarchived. Returns the assigned id.
    pub fn add_task(&mut self, draft: Task) -> u64 {
        let id = self.generate_id();
        let task = Task {
            id,
            archived: false,
            ..draft
        };
        self.tasks.insert(0, task);
        self.commit();
        id
    }

    /// Permanently remove a task. Missing id is a no-op (or `NotFound` in
    /// strict mode).
    ///
    /// # Errors
    ///
    /// `NotFound` in strict mode only.
    pub fn delete_task(&mut self, id: u64) -> Result<(), StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return self.missing(id);
        }
        self.commit();
        Ok(())
    }

    /// Replace the matching record entirely, keyed by `updated.id`.
    ///
    /// # Errors
    ///
    /// `NotFound` in strict mode only.
    pub fn update_task(&mut self, updated: Task) -> Result<(), StoreError> {
        let id = updated.id;
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(slot) => {
                *slot = updated;
                self.commit();
                Ok(())
            }
            None => self.missing(id),
        }
    }

    /// Update only the status field.
    ///
    /// # Errors
    ///
    /// `NotFound` in strict mode only.
    pub fn update_status(&mut self, id: u64, status: Status) -> Result<(), StoreError> {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                if task.status != status {
                    task.status = status;
                    self.commit();
                }
                Ok(())
            }
            None => self.missing(id),
        }
    }

    /// Hide a task from active views without removing it.
    ///
    /// # Errors
    ///
    /// `NotFound` in strict mode only.
    pub fn archive_task(&mut self, id: u64) -> Result<(), StoreError> {
        self.set_archived(id, true)
    }

    /// Bring an archived task back into active views.
    ///
    /// # Errors
    ///
    /// `NotFound` in strict mode only.
    pub fn unarchive_task(&mut self, id: u64) -> Result<(), StoreError> {
        self.set_archived(id, false)
    }

    fn set_archived(&mut self, id: u64, archived: bool) -> Result<(), StoreError> {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                if task.archived != archived {
                    task.archived = archived;
                    self.commit();
                }
                Ok(())
            }
            None => self.missing(id),
        }
    }

    /// Discard the current collection in favor of `tasks` (import/reset).
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.commit();
    }

    /// Empty the collection and purge the durable cache entry.
    pub fn clear_all(&mut self) {
        self.tasks.clear();
        self.bus.broadcast(&self.tasks);
        self.purge_cache();
    }

    /// Purge the cache entry and re-run the startup resolution pipeline.
    pub fn reset_to_defaults(&mut self) {
        self.purge_cache();
        self.initialized = false;
        self.resolve();
    }

    /// Drain queued writes, then remove the cache blob. The drain keeps an
    /// in-flight persist job from resurrecting the entry after the purge.
    fn purge_cache(&self) {
        self.flush();
        if let Err(err) = self.cache.purge() {
            warn!(%err, "cache purge failed");
        }
    }

    /// Write the current collection as an export artifact, returning its
    /// path.
    ///
    /// # Errors
    ///
    /// `WriteFailed` if the artifact cannot be written.
    pub fn export_now(&self) -> Result<PathBuf, StoreError> {
        self.export.write(&self.tasks)
    }

    // -----------------------------------------------------------------
    // Subscriptions
    // -----------------------------------------------------------------

    /// Register a change subscriber; it immediately receives the current
    /// collection, then every accepted change, before persistence I/O.
    pub fn subscribe(&mut self, callback: impl FnMut(&[Task]) + Send + 'static) -> SubscriberId {
        self.bus.subscribe(&self.tasks, Box::new(callback))
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.bus.unsubscribe(id)
    }

    // -----------------------------------------------------------------
    // Plumbing
    // -----------------------------------------------------------------

    /// Block until every queued persistence job has been processed. Used
    /// by the CLI before exit and by tests; mutations themselves never
    /// wait.
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = mpsc::channel();
        self.writer.send(Job::Flush(ack_tx));
        let _ = ack_rx.recv();
    }

    fn commit(&mut self) {
        // Subscribers first — consumers never block on storage.
        self.bus.broadcast(&self.tasks);
        self.writer.send(Job::Persist {
            tasks: self.tasks.clone(),
            push_remote: self.initialized && self.remote.is_some(),
        });
    }

    fn missing(&self, id: u64) -> Result<(), StoreError> {
        if self.strict {
            return Err(StoreError::NotFound(id));
        }
        debug!(id, "mutation targeted a missing id; no-op");
        Ok(())
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("tasks", &self.tasks.len())
            .field("initialized", &self.initialized)
            .field("strict", &self.strict)
            .field("remote", &self.remote.is_some())
            .finish_non_exhaustive()
    }
}
