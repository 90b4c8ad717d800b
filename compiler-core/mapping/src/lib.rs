//! Mapping between the absolute source paths seen by the compiler and the
//! relative paths declared by the host build system.
//!
//! A [`SourceMappings`] is built once per compilation request and is never
//! mutated afterwards. Derived views over it, such as the list of normalized
//! absolute paths, are computed on first use and cached for the lifetime of
//! the request.

mod output;
mod path;
mod roots;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

pub use output::OutputLayout;
pub use path::{clean, normalize, replace_extension};
pub use roots::RootDirectories;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("nr of asset dirs should always be 1 or 2, found {0}")]
    AssetRootCount(usize),
    #[error("source file {} is declared more than once", .0.display())]
    DuplicateAbsolutePath(PathBuf),
}

pub type Result<T> = std::result::Result<T, MappingError>;

/// A declared correspondence between an absolute input file and the path
/// the build system uses for it, relative to its asset root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMapping {
    absolute_path: PathBuf,
    relative_path: PathBuf,
}

impl SourceMapping {
    pub fn new(absolute_path: impl Into<PathBuf>, relative_path: impl Into<PathBuf>) -> SourceMapping {
        let absolute_path = absolute_path.into();
        let relative_path = relative_path.into();
        SourceMapping { absolute_path, relative_path }
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    pub fn normalized_absolute_path(&self) -> PathBuf {
        normalize(&self.absolute_path)
    }

    /// Joins `out_dir` with the relative path, replacing its final extension
    /// with `extension`.
    ///
    /// ```
    /// # use std::path::Path;
    /// # use mapping::SourceMapping;
    /// let mapping = SourceMapping::new("/project/src/a/b.ts", "a/b.ts");
    /// let output = mapping.to_output_path(Path::new("/out"), ".js");
    /// assert_eq!(output, Path::new("/out/a/b.js"));
    /// ```
    pub fn to_output_path(&self, out_dir: &Path, extension: &str) -> PathBuf {
        let relative_path = clean(&self.relative_path);
        out_dir.join(replace_extension(&relative_path, extension))
    }
}

#[derive(Debug, Default)]
pub struct SourceMappings {
    mappings: Vec<SourceMapping>,
    absolute_paths: OnceLock<Vec<PathBuf>>,
    relative_paths: OnceLock<Vec<PathBuf>>,
    index: OnceLock<FxHashMap<PathBuf, usize>>,
}

impl SourceMappings {
    pub fn new(mappings: Vec<SourceMapping>) -> SourceMappings {
        SourceMappings { mappings, ..SourceMappings::default() }
    }

    pub fn mappings(&self) -> &[SourceMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Normalized absolute paths, in declaration order.
    pub fn absolute_paths(&self) -> &[PathBuf] {
        self.absolute_paths.get_or_init(|| {
            self.mappings.iter().map(SourceMapping::normalized_absolute_path).collect()
        })
    }

    /// Relative paths as declared, in declaration order.
    pub fn relative_paths(&self) -> &[PathBuf] {
        self.relative_paths.get_or_init(|| {
            self.mappings.iter().map(|mapping| mapping.relative_path.clone()).collect()
        })
    }

    /// Finds the mapping for a path reported by the compiler.
    ///
    /// The path is normalized the same way as the declared absolute paths.
    /// Files outside the declared set, such as library or ambient declaration
    /// files, yield `None`.
    pub fn find(&self, path: impl AsRef<Path>) -> Option<&SourceMapping> {
        let path = normalize(path);
        let index = self.index().get(&path)?;
        self.mappings.get(*index)
    }

    /// Checks that no two mappings share a normalized absolute path.
    pub fn validate(&self) -> Result<()> {
        if self.index().len() == self.mappings.len() {
            return Ok(());
        }
        let mut seen = FxHashSet::default();
        for path in self.absolute_paths() {
            if !seen.insert(path) {
                return Err(MappingError::DuplicateAbsolutePath(path.clone()));
            }
        }
        Ok(())
    }

    fn index(&self) -> &FxHashMap<PathBuf, usize> {
        self.index.get_or_init(|| {
            let mut index = FxHashMap::default();
            for (position, path) in self.absolute_paths().iter().enumerate() {
                index.entry(path.clone()).or_insert(position);
            }
            index
        })
    }
}

impl FromIterator<SourceMapping> for SourceMappings {
    fn from_iter<T: IntoIterator<Item = SourceMapping>>(iter: T) -> SourceMappings {
        SourceMappings::new(iter.into_iter().collect())
    }
}
