use std::ffi::OsString;
use std::iter;
use std::path::{Path, PathBuf};

use crate::SourceMapping;

/// Where the compiler is expected to write the outputs of each source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub out_dir: PathBuf,
    /// Single bundled output, when the compiler emits one file per program.
    pub bundle: Option<PathBuf>,
    pub declaration: bool,
    /// Separate `.map` files, i.e. source maps that are not inlined.
    pub source_map: bool,
}

impl OutputLayout {
    pub fn new(out_dir: impl Into<PathBuf>) -> OutputLayout {
        let out_dir = out_dir.into();
        OutputLayout { out_dir, bundle: None, declaration: false, source_map: false }
    }

    /// The primary `.js` output; the bundle path in one-file-per-program mode.
    pub fn primary(&self, mapping: &SourceMapping) -> PathBuf {
        match &self.bundle {
            Some(bundle) => bundle.clone(),
            None => mapping.to_output_path(&self.out_dir, ".js"),
        }
    }

    /// Every file the compiler should write for `mapping`: the primary
    /// output, then the declaration file and the source map when enabled.
    pub fn files_written(&self, mapping: &SourceMapping) -> Vec<PathBuf> {
        let primary = self.primary(mapping);
        let declaration = self.declaration.then(|| mapping.to_output_path(&self.out_dir, ".d.ts"));
        let source_map = self.source_map.then(|| append_extension(&primary, ".map"));
        iter::once(primary).chain(declaration).chain(source_map).collect()
    }
}

fn append_extension(path: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(path);
    path.push(suffix);
    PathBuf::from(path)
}
