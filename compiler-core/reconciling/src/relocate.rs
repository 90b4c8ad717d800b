use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tokio::task;
use walkdir::WalkDir;

use crate::{ReconcileError, Result};

/// Longest common prefix of two strings, compared character by character.
///
/// The prefix is not snapped to path segments: `/src/main/assets` and
/// `/src/test/assets` share `/src/`, while `/a/main1` and `/a/main2` share
/// `/a/main`.
pub fn common_prefix<'a>(first: &'a str, second: &str) -> &'a str {
    let mut end = 0;
    for ((index, a), b) in first.char_indices().zip(second.chars()) {
        if a != b {
            break;
        }
        end = index + a.len_utf8();
    }
    &first[..end]
}

/// Moves the test outputs of a two-root compilation into place.
///
/// With two root directories the compiler roots its outputs at the common
/// prefix of both asset roots, so the target directory ends up holding a
/// `<main remainder>` and a `<test remainder>` subtree. The main subtree is
/// removed and the contents of the test subtree become the target's own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub target: PathBuf,
    pub main_root: String,
    pub test_root: String,
}

impl Relocation {
    pub fn new(target: impl Into<PathBuf>, main_root: &Path, test_root: &Path) -> Relocation {
        let target = target.into();
        let main_root = main_root.to_string_lossy().into_owned();
        let test_root = test_root.to_string_lossy().into_owned();
        Relocation { target, main_root, test_root }
    }

    /// The main and test roots with their common prefix stripped.
    pub fn remainders(&self) -> (&str, &str) {
        let prefix = common_prefix(&self.main_root, &self.test_root);
        (&self.main_root[prefix.len()..], &self.test_root[prefix.len()..])
    }

    /// Removes the main subtree and moves the test subtree concurrently,
    /// returning once both have finished.
    pub async fn run(&self) -> Result<()> {
        let (main, test) = self.remainders();
        if main.is_empty() || test.is_empty() {
            let main = self.main_root.clone();
            let test = self.test_root.clone();
            return Err(ReconcileError::IndistinctRoots { main, test });
        }

        let obsolete = self.target.join(main);
        let source = self.target.join(test);

        let (removed, moved) = tokio::join!(remove(&obsolete), move_tree(&source, &self.target));

        if removed.is_ok() {
            tracing::debug!(target: "reconciling", path = %obsolete.display(), "Removed");
        }
        if moved.is_ok() {
            tracing::debug!(
                target: "reconciling",
                from = %source.display(),
                to = %self.target.display(),
                "Moved"
            );
        }

        removed.and(moved)
    }
}

/// Removes a file or directory tree; a missing path is not an error.
pub(crate) async fn remove(path: &Path) -> Result<()> {
    let metadata = match tokio::fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(source) => return Err(ReconcileError::Remove { path: path.to_path_buf(), source }),
    };

    let removed = if metadata.is_dir() {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    };

    removed.map_err(|source| ReconcileError::Remove { path: path.to_path_buf(), source })
}

/// Copies `source` into `destination`, then removes `source`.
///
/// No rename is attempted since both sides may live on different volumes.
pub(crate) async fn move_tree(source: &Path, destination: &Path) -> Result<()> {
    let from = source.to_path_buf();
    let to = destination.to_path_buf();
    task::spawn_blocking(move || copy_tree(&from, &to)).await??;
    remove(source).await
}

fn copy_tree(source: &Path, destination: &Path) -> Result<()> {
    for entry in WalkDir::new(source) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let to = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&to)?;
            continue;
        }

        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &to).map_err(|source| ReconcileError::Copy {
            from: entry.path().to_path_buf(),
            to: to.clone(),
            source,
        })?;
    }
    Ok(())
}
