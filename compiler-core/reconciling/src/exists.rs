use std::io;
use std::path::{Path, PathBuf};

use futures::future;
use tokio::fs;

/// Returns the declared files that are not regular files on disk.
///
/// All files are checked concurrently; the order of `declared` is kept.
pub async fn missing_files(declared: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let checks = declared.iter().map(|path| async move {
        let exists = is_regular_file(path).await?;
        Ok::<_, io::Error>((path, exists))
    });

    let checked = future::try_join_all(checks).await?;
    let missing = checked.into_iter().filter(|(_, exists)| !exists);
    Ok(missing.map(|(path, _)| path.clone()).collect())
}

async fn is_regular_file(path: &Path) -> io::Result<bool> {
    match fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(error) => Err(error),
    }
}
