//! Error types for hdrdoc.

use std::path::PathBuf;

/// Errors that abort a whole file (or the settings load). Decomposition of
/// individual declarations never fails; it drops the entity instead.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", path.display())]
    Decode { path: PathBuf },

    #[error("invalid settings file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
