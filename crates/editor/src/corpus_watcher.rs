// Chunk: docs/chunks/corpus_watching - Reload the word corpus when its folder changes
//!
//! Watches the corpus folder and reloads the word corpus when it changes.
//!
//! # Architecture
//!
//! - One `notify` watcher covers the folder recursively.
//! - A watcher thread feeds every relevant event into a [`Debouncer`], so a
//!   burst of writes (a sync client dropping many files, an editor's
//!   write-rename dance) triggers a single reload once the folder goes quiet.
//! - Reloads are wholesale through [`CorpusLoader`]. The fresh corpus is sent
//!   back over a channel; the owner polls it and swaps it into its engine.
//!
//! The initial load runs on the watcher thread too, so the first corpus
//! arrives through the same channel as every later one.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use markpad_suggest::{CorpusError, CorpusLoader, Debouncer, WordCorpus};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, info, warn};

use crate::error::WatchError;

/// How often the watcher thread checks for a ready reload.
const FLUSH_INTERVAL: Duration = Duration::from_millis(50);

/// Default quiet period before a reload, in milliseconds.
pub const DEFAULT_RELOAD_DEBOUNCE_MS: u64 = 250;

/// A running watch over one corpus folder.
///
/// Dropping it stops the watcher thread.
pub struct CorpusWatcher {
    folder: PathBuf,
    corpus_rx: Receiver<WordCorpus>,
    _watcher: RecommendedWatcher,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl CorpusWatcher {
    /// Starts watching `folder`.
    ///
    /// Fails if `folder` is not an existing directory or cannot be watched.
    pub fn start(
        folder: &Path,
        loader: CorpusLoader,
        debounce_ms: u64,
    ) -> Result<Self, WatchError> {
        if !folder.exists() {
            return Err(CorpusError::Missing(folder.to_path_buf()).into());
        }
        if !folder.is_dir() {
            return Err(CorpusError::NotAFolder(folder.to_path_buf()).into());
        }

        let (event_tx, event_rx) = mpsc::channel::<Result<Event, notify::Error>>();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let (corpus_tx, corpus_rx) = mpsc::channel::<WordCorpus>();

        let notify_err = |source| WatchError::Notify {
            path: folder.to_path_buf(),
            source,
        };
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                let _ = event_tx.send(res);
            },
            Config::default(),
        )
        .map_err(notify_err)?;
        watcher.watch(folder, RecursiveMode::Recursive).map_err(notify_err)?;

        let handle = spawn_watcher_thread(
            folder.to_path_buf(),
            loader,
            Debouncer::new(debounce_ms),
            event_rx,
            stop_rx,
            corpus_tx,
        );
        info!(folder = %folder.display(), "watching corpus folder");

        Ok(Self {
            folder: folder.to_path_buf(),
            corpus_rx,
            _watcher: watcher,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// The newest reloaded corpus, if any arrived since the last poll.
    pub fn poll(&self) -> Option<WordCorpus> {
        self.corpus_rx.try_iter().last()
    }

    /// Waits up to `timeout` for the next reloaded corpus.
    pub fn wait(&self, timeout: Duration) -> Option<WordCorpus> {
        self.corpus_rx.recv_timeout(timeout).ok()
    }
}

impl Drop for CorpusWatcher {
    fn drop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                debug!("corpus watcher thread panicked");
            }
        }
    }
}

impl std::fmt::Debug for CorpusWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorpusWatcher").field("folder", &self.folder).finish()
    }
}

/// Whether `kind` can change the set of words in the folder.
fn changes_content(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_))
}

/// Spawns the watcher thread.
///
/// The thread:
/// 1. Loads the folder once and sends the corpus
/// 2. Feeds content-changing events into the debouncer
/// 3. Reloads and sends the corpus once the debounce window passes quietly
fn spawn_watcher_thread(
    folder: PathBuf,
    loader: CorpusLoader,
    mut debouncer: Debouncer<()>,
    event_rx: Receiver<Result<Event, notify::Error>>,
    stop_rx: Receiver<()>,
    corpus_tx: Sender<WordCorpus>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        if corpus_tx.send(loader.load_or_empty(&folder)).is_err() {
            return;
        }

        loop {
            if stop_rx.try_recv().is_ok() {
                break;
            }

            match event_rx.recv_timeout(FLUSH_INTERVAL) {
                Ok(Ok(event)) if changes_content(&event.kind) => {
                    debouncer.schedule((), Instant::now());
                }
                Ok(Ok(_)) => {}
                Ok(Err(err)) => warn!(error = %err, "corpus watcher error"),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if debouncer.take_ready(Instant::now()).is_some() {
                debug!(folder = %folder.display(), "reloading corpus");
                if corpus_tx.send(loader.load_or_empty(&folder)).is_err() {
                    break;
                }
            }
        }
    })
}
