//! One compilation pass on behalf of the host build system.
//!
//! [`compile`] configures the external compiler from the request's options,
//! runs it once, translates its diagnostics and works out which files each
//! declared source produced. The post-emission checks are returned as a
//! [`reconciling::Plan`] for the caller to run; they never feed back into the
//! [`CompilationResult`].

mod compile;
mod configure;
mod options;
mod result;

pub use compile::{Compilation, compile};
pub use configure::{raw_compiler_options, resolve_compiler_options};
pub use options::{LogLevel, Options, Tsconfig};
pub use result::{CompilationFileResult, CompilationResult, FileResult};

use std::path::PathBuf;

use mapping::SourceMappings;

/// A decoded compilation request.
#[derive(Debug)]
pub struct Request {
    pub mappings: SourceMappings,
    pub target: PathBuf,
    pub options: Options,
}
