use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("failed to remove {}: {source}", path.display())]
    Remove { path: PathBuf, source: io::Error },

    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy { from: PathBuf, to: PathBuf, source: io::Error },

    #[error("walk: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("asset roots {main} and {test} do not diverge")]
    IndistinctRoots { main: String, test: String },

    #[error("task: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("io: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
