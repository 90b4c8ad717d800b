//! The host's process-invocation protocol.
//!
//! Requests arrive as positional arguments; see [`decode`]. The response is
//! a single line on standard output: [`DATA_LINK_ESCAPE`] followed by the
//! JSON-encoded [`CompilationResult`]. Any other line on that stream is
//! treated by the host as log output.

mod error;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use compiling::{CompilationResult, Options, Request};
use mapping::{SourceMapping, SourceMappings};

pub use error::{ProtocolError, Result};

/// Marks the line that carries the result.
pub const DATA_LINK_ESCAPE: char = '\u{10}';

/// Decodes the request arguments that follow the reserved first argument.
///
/// `mappings` is a JSON array of `[absolutePath, relativePath]` pairs; when
/// it is not JSON at all it names a single file relative to `cwd`.
/// `target` is the output directory, unless it starts with `{`, in which
/// case it is the options object and the output directory is `<cwd>/lib`.
pub fn decode(
    mappings: &str,
    target: Option<&str>,
    options: Option<&str>,
    cwd: &Path,
) -> Result<Request> {
    let mappings = decode_mappings(mappings, cwd)?;
    mappings.validate()?;

    let (target, options) = match target {
        Some(target) if target.starts_with('{') => (cwd.join("lib"), Some(target)),
        Some(target) => (PathBuf::from(target), options),
        None => (cwd.join("lib"), options),
    };

    let mut options: Options = match options {
        Some(options) => serde_json::from_str(options).map_err(ProtocolError::Options)?,
        None => Options::default(),
    };
    options.tsconfig_dir.get_or_insert_with(|| cwd.to_path_buf());

    Ok(Request { mappings, target, options })
}

fn decode_mappings(mappings: &str, cwd: &Path) -> Result<SourceMappings> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(mappings) else {
        tracing::debug!(target: "protocol", file = mappings, "Single file argument");
        let mapping = SourceMapping::new(cwd.join(mappings), mappings);
        return Ok(SourceMappings::new(vec![mapping]));
    };

    let pairs: Vec<(PathBuf, PathBuf)> =
        serde_json::from_value(value).map_err(ProtocolError::Mappings)?;
    let mappings = pairs.into_iter().map(|(absolute, relative)| SourceMapping::new(absolute, relative));
    Ok(mappings.collect())
}

/// Writes the result line and flushes `writer`.
pub fn write_result(mut writer: impl Write, result: &CompilationResult) -> io::Result<()> {
    write!(writer, "{DATA_LINK_ESCAPE}")?;
    serde_json::to_writer(&mut writer, result)?;
    writeln!(writer)?;
    writer.flush()
}
