use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};
use toolchain::CompilerOptions;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tsconfig {
    #[serde(rename = "compilerOptions")]
    pub compiler_options: CompilerOptions,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Options sent by the host alongside the source mappings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    pub log_level: LogLevel,
    pub tsconfig: Tsconfig,
    /// Base directory for relative paths inside `tsconfig`.
    pub tsconfig_dir: Option<PathBuf>,
    /// One asset root, or two for a main/test split.
    pub assets_dirs: Vec<PathBuf>,
    pub ts_codes_to_ignore: Vec<u32>,
    /// Compiled along with the mapped sources but never tracked per file.
    pub extra_files: Vec<PathBuf>,
    pub node_modules_dirs: Vec<PathBuf>,
    pub resolve_from_node_modules_dir: bool,
    /// Enables the declared-versus-emitted check after emission.
    pub assert_compilation: bool,
}
