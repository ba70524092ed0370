// error.rs — Unified error type
//
// Everything recoverable is reported inline on stderr and folded into the
// exit code; only these variants actually unwind through `?`.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for rls.
#[derive(Debug, Error)]
pub enum AppError {
    /// Standard I/O error (usually a failed write to stdout)
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Invalid command-line argument (triggers usage display + exit 1)
    #[error("{0}")]
    InvalidArg(String),

    /// The traversal driver could not continue enumerating at all
    #[error("{path}: {source}")]
    Traversal {
        path: PathBuf,
        source: std::io::Error,
    },
}
