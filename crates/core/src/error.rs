use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VendorFixError>;

#[derive(Error, Debug)]
pub enum VendorFixError {
    #[error("{0}")]
    Config(String),

    #[error("Failed to read manifest {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to fetch '{import_path}@{branch}': {reason}")]
    Fetch {
        import_path: String,
        branch: String,
        reason: String,
    },

    #[error("Failed to remove {}: {reason}", .path.display())]
    Removal { path: PathBuf, reason: String },

    #[error("Failed to sync sources: {0}")]
    Sync(String),

    #[error("Failed to start '{program}': {error}")]
    Spawn {
        program: String,
        error: std::io::Error,
    },
}
