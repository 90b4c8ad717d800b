//! The narrow interface through which the external compiler is driven.
//!
//! The compiler itself is a black box: given a list of files and a set of
//! compiler options it produces a [`Program`], which exposes diagnostics,
//! performs the emit and lists its resolved source files.

mod error;
mod model;
mod process;

use std::path::{Path, PathBuf};

pub use error::{Result, ToolchainError};
pub use model::{CompilerOptions, Configured, Diagnostic, DiagnosticFile, EmitOutput, SourceFile};
pub use process::ProcessToolchain;

pub trait Toolchain {
    /// Validates raw `compilerOptions`, resolving relative paths against
    /// `base_dir`. Validation problems are returned in [`Configured::errors`].
    fn configure(&self, compiler_options: &CompilerOptions, base_dir: &Path) -> Result<Configured>;

    fn create_program(
        &self,
        files: &[PathBuf],
        options: &CompilerOptions,
    ) -> Result<Box<dyn Program>>;
}

pub trait Program {
    /// Syntactic, semantic and global diagnostics.
    fn pre_emit_diagnostics(&self) -> Vec<Diagnostic>;

    fn emit(&mut self) -> EmitOutput;

    fn source_files(&self) -> &[SourceFile];
}
