// Chunk: docs/chunks/background_search - Off-thread search with staleness checks
//!
//! Full-document search on a worker thread.
//!
//! The owner snapshots the text into a [`SearchJob`] tagged with the buffer
//! generation and submits it. The worker only ever sees that owned snapshot.
//! Results come back through a channel and are polled by the owner, which
//! installs them with [`Document::apply_search_result`]; a result whose
//! generation no longer matches the document is discarded there.
//!
//! When jobs pile up faster than the worker runs them, only the newest queued
//! job is run. The others are superseded.
//!
//! [`Document::apply_search_result`]: crate::Document::apply_search_result

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use markpad_search::{search, SearchResult};
use tracing::{debug, trace};

/// A search over an owned text snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchJob {
    pub text: String,
    pub query: String,
    /// Generation of the buffer the text was taken from.
    pub generation: u64,
}

impl SearchJob {
    /// Runs the search on the calling thread.
    pub fn run(self) -> SearchResult {
        search(&self.text, &self.query, self.generation)
    }
}

/// A worker thread running [`SearchJob`]s.
///
/// Dropping it stops the worker and waits for it to exit.
pub struct BackgroundSearch {
    job_tx: Option<Sender<SearchJob>>,
    result_rx: Receiver<SearchResult>,
    handle: Option<JoinHandle<()>>,
}

impl BackgroundSearch {
    pub fn spawn() -> Self {
        let (job_tx, job_rx) = mpsc::channel::<SearchJob>();
        let (result_tx, result_rx) = mpsc::channel::<SearchResult>();
        let handle = spawn_worker_thread(job_rx, result_tx);
        Self {
            job_tx: Some(job_tx),
            result_rx,
            handle: Some(handle),
        }
    }

    /// Queues `job`. Returns false if the worker has exited.
    pub fn submit(&self, job: SearchJob) -> bool {
        self.job_tx.as_ref().is_some_and(|tx| tx.send(job).is_ok())
    }

    /// Takes every finished result without blocking.
    pub fn poll(&self) -> Vec<SearchResult> {
        self.result_rx.try_iter().collect()
    }

    /// Waits up to `timeout` for the next result.
    pub fn wait(&self, timeout: Duration) -> Option<SearchResult> {
        self.result_rx.recv_timeout(timeout).ok()
    }
}

impl Drop for BackgroundSearch {
    fn drop(&mut self) {
        // Closing the job channel ends the worker loop.
        self.job_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                debug!("search worker panicked");
            }
        }
    }
}

impl std::fmt::Debug for BackgroundSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundSearch")
            .field("running", &self.handle.is_some())
            .finish()
    }
}

/// Spawns the worker.
///
/// The thread:
/// 1. Blocks for the next job
/// 2. Drains any jobs queued behind it, keeping only the newest
/// 3. Runs the search and sends the result back
fn spawn_worker_thread(
    job_rx: Receiver<SearchJob>,
    result_tx: Sender<SearchResult>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(mut job) = job_rx.recv() {
            for newer in job_rx.try_iter() {
                trace!(generation = job.generation, "search job superseded");
                job = newer;
            }

            let generation = job.generation;
            let result = job.run();
            debug!(generation, matches = result.matches.len(), "background search finished");
            if result_tx.send(result).is_err() {
                break;
            }
        }
    })
}
