use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use path_absolutize::Absolutize;

/// Normalizes a path the way compiler-reported paths are compared.
///
/// `.` and `..` segments are resolved lexically and separators are converted
/// to the platform's own. Relative paths are anchored at the current
/// directory. The file system is never consulted.
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    match path.absolutize() {
        Ok(absolute) => absolute.into_owned(),
        Err(_) => clean(path),
    }
}

/// Lexically resolves `.` and `..` segments without anchoring the path.
///
/// Leading `..` segments of a relative path are kept; `..` directly under a
/// root is dropped.
pub fn clean(path: impl AsRef<Path>) -> PathBuf {
    let mut components: Vec<Component<'_>> = vec![];
    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir) | Some(Component::CurDir) | None => {
                    components.push(component);
                }
            },
            component => components.push(component),
        }
    }
    components.iter().collect()
}

/// Replaces only the final extension of `path` with `extension`.
///
/// `extension` may carry its leading dot and may itself contain dots, as in
/// `.d.ts`. A path without an extension has `extension` appended.
pub fn replace_extension(path: impl AsRef<Path>, extension: &str) -> PathBuf {
    let path = path.as_ref();
    let extension = extension.strip_prefix('.').unwrap_or(extension);
    let Some(stem) = path.file_stem() else {
        return path.to_path_buf();
    };

    let mut file_name = OsString::from(stem);
    if !extension.is_empty() {
        file_name.push(".");
        file_name.push(extension);
    }
    path.with_file_name(file_name)
}
