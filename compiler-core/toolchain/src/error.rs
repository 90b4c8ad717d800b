use std::io;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolchainError {
    #[error("failed to start toolchain '{program}': {source}")]
    Spawn { program: String, source: io::Error },

    #[error("toolchain '{program}' exited with {status}")]
    Exit { program: String, status: ExitStatus },

    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ToolchainError>;
