pub mod cli;
pub mod logging;

use std::env;
use std::io;
use std::process::ExitCode;

use crate::cli::Config;
use compiling::{Compilation, CompilationResult, Request};
use diagnostics::{Problem, Severity};
use tokio::runtime;
use toolchain::ProcessToolchain;
use tracing::Instrument;
use tracing::instrument::WithSubscriber;
use tracing::level_filters::LevelFilter;

/// Serves one request: decodes it, compiles, writes the result line, then
/// waits for the post-emission checks so that their logs are not lost.
pub fn run(config: Config) -> ExitCode {
    let request = env::current_dir().map_err(|error| error.to_string()).and_then(|cwd| {
        let Config { mappings, target, options, .. } = &config;
        protocol::decode(mappings, target.as_deref(), options.as_deref(), &cwd)
            .map_err(|error| error.to_string())
    });

    let level = match (&config.log_level, &request) {
        (Some(level), _) => *level,
        (None, Ok(request)) => request.options.log_level.level_filter(),
        (None, Err(_)) => LevelFilter::INFO,
    };

    tracing::subscriber::with_default(logging::subscriber(level), || match request {
        Ok(request) => serve(&config, request),
        Err(error) => {
            tracing::error!(target: "tsc_adapter", %error, "Invalid request");
            let problem = Problem::project(Severity::Error, error);
            respond(&CompilationResult::failed(vec![problem]));
            ExitCode::FAILURE
        }
    })
}

fn serve(config: &Config, request: Request) -> ExitCode {
    let toolchain = ProcessToolchain::new(&config.toolchain, config.toolchain_args.clone());

    let runtime = match runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!(target: "tsc_adapter", %error, "Failed to start the runtime");
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(async {
        let Compilation { result, plan } = compiling::compile(&toolchain, &request);

        let reconciliation = if plan.is_empty() {
            None
        } else {
            let span = tracing::info_span!(target: "reconciling", "reconcile");
            let reconcile = reconciling::reconcile(plan).instrument(span).with_current_subscriber();
            Some(tokio::spawn(reconcile))
        };

        let status = respond(&result);

        if let Some(reconciliation) = reconciliation {
            if let Err(error) = reconciliation.await {
                tracing::error!(target: "tsc_adapter", %error, "Reconciliation did not complete");
            }
        }

        status
    })
}

fn respond(result: &CompilationResult) -> ExitCode {
    let stdout = io::stdout();
    match protocol::write_result(stdout.lock(), result) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(target: "tsc_adapter", %error, "Failed to write the result");
            ExitCode::FAILURE
        }
    }
}
