use clap::Parser;
use tracing::level_filters::LevelFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(about, version(VERSION))]
pub struct Config {
    #[arg(help("Reserved by the host build system"))]
    pub reserved: String,
    #[arg(help("JSON array of [absolutePath, relativePath] pairs, or a single file"))]
    pub mappings: String,
    #[arg(help("Target directory, or the options object"))]
    pub target: Option<String>,
    #[arg(help("Options object"))]
    pub options: Option<String>,
    #[arg(
        long,
        value_name("PROGRAM"),
        help("Compiler bridge executable"),
        default_value("tsc-bridge")
    )]
    pub toolchain: String,
    #[arg(
        long = "toolchain-arg",
        value_name("ARG"),
        help("Argument passed to the compiler bridge"),
        allow_hyphen_values(true)
    )]
    pub toolchain_args: Vec<String>,
    #[arg(long, value_name("LevelFilter"), help("Overrides the logLevel option"))]
    pub log_level: Option<LevelFilter>,
}
