// Chunk: docs/chunks/editor_config - Configuration and watcher errors

use std::io;
use std::path::PathBuf;

use markpad_suggest::CorpusError;
use thiserror::Error;

/// Errors raised while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the platform config directory")]
    NoConfigDir,

    #[error("failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write config {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode config")]
    Encode(#[source] serde_json::Error),
}

/// Errors raised while starting a corpus watcher.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error("failed to watch {}", path.display())]
    Notify {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}
