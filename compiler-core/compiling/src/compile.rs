use std::path::{Path, PathBuf};

use diagnostics::{Problem, Severity};
use mapping::{OutputLayout, RootDirectories, SourceMappings};
use reconciling::{Assertion, Plan, Relocation};
use toolchain::{CompilerOptions, EmitOutput, SourceFile, Toolchain, ToolchainError};

use crate::{
    CompilationFileResult, CompilationResult, FileResult, Request, raw_compiler_options,
    resolve_compiler_options,
};

/// The outcome of [`compile`]: the result for the host, and the
/// post-emission work that should run after the result has been written.
#[derive(Debug, Default)]
pub struct Compilation {
    pub result: CompilationResult,
    pub plan: Plan,
}

impl Compilation {
    fn failed(problems: Vec<Problem>) -> Compilation {
        Compilation { result: CompilationResult::failed(problems), plan: Plan::default() }
    }
}

pub fn compile(toolchain: &dyn Toolchain, request: &Request) -> Compilation {
    let _span = tracing::info_span!(target: "compiling", "compile").entered();

    let Request { mappings, target, options } = request;
    tracing::debug!(target: "compiling", files = ?mappings.relative_paths(), "Starting compilation");
    tracing::debug!(target: "compiling", assets = ?options.assets_dirs, "From");
    tracing::debug!(target: "compiling", target = %target.display(), "To");

    let roots = match RootDirectories::from_assets(&options.assets_dirs) {
        Ok(roots) => roots,
        Err(error) => {
            return Compilation::failed(vec![Problem::project(Severity::Error, error.to_string())]);
        }
    };

    let compiler_options = match configure(toolchain, request, &roots) {
        Ok(compiler_options) => compiler_options,
        Err(problems) => return Compilation::failed(problems),
    };

    let files: Vec<PathBuf> =
        mappings.absolute_paths().iter().chain(&options.extra_files).cloned().collect();
    tracing::debug!(target: "compiling", count = files.len(), "Files to compile");

    let mut program = match toolchain.create_program(&files, &compiler_options) {
        Ok(program) => program,
        Err(error) => return Compilation::failed(vec![toolchain_problem(error)]),
    };

    let ignore = &options.ts_codes_to_ignore;
    let mut problems = diagnostics::to_problems(&program.pre_emit_diagnostics(), ignore);

    let emit = {
        let _span = tracing::info_span!(target: "compiling", "emit").entered();
        program.emit()
    };
    problems.extend(diagnostics::to_problems(&emit.diagnostics, ignore));

    let source_files = program.source_files();
    log_source_files(source_files);

    let results = if emit.emit_skipped {
        tracing::debug!(target: "compiling", "Emission skipped");
        vec![]
    } else {
        let layout = output_layout(&compiler_options, target);
        file_results(source_files, mappings, &layout)
    };

    if !problems.is_empty() {
        tracing::debug!(target: "compiling", "Problems\n{}", diagnostics::format_text(&problems));
    }

    let result = CompilationResult { results, problems };
    let plan = reconciliation(request, &roots, &result, &emit);
    Compilation { result, plan }
}

/// Validates the user's compiler options and finalises them for the
/// compilation. Validation errors end the compilation before the compiler
/// sees any file.
fn configure(
    toolchain: &dyn Toolchain,
    request: &Request,
    roots: &RootDirectories,
) -> Result<CompilerOptions, Vec<Problem>> {
    let _span = tracing::info_span!(target: "compiling", "configure").entered();
    let Request { target, options, .. } = request;

    let raw = raw_compiler_options(options, target, roots);
    let base_dir = options.tsconfig_dir.as_deref().unwrap_or(Path::new("."));

    let configured =
        toolchain.configure(&raw, base_dir).map_err(|error| vec![toolchain_problem(error)])?;

    if !configured.errors.is_empty() {
        tracing::debug!(target: "compiling", count = configured.errors.len(), "Invalid compiler options");
        return Err(diagnostics::to_problems(&configured.errors, &options.ts_codes_to_ignore));
    }

    let mut compiler_options = configured.options;
    resolve_compiler_options(&mut compiler_options, options, target);
    tracing::debug!(target: "compiling", options = ?compiler_options.as_map(), "Using compiler options");

    Ok(compiler_options)
}

fn toolchain_problem(error: ToolchainError) -> Problem {
    tracing::error!(target: "compiling", %error, "Toolchain failure");
    Problem::project(Severity::Error, format!("failed to run the compiler: {error}"))
}

fn log_source_files(source_files: &[SourceFile]) {
    let (declarations, code): (Vec<_>, Vec<_>) =
        source_files.iter().partition(|source_file| source_file.is_declaration_file());
    tracing::debug!(
        target: "compiling",
        declarations = declarations.len(),
        code = code.len(),
        "Program source files"
    );
}

fn output_layout(compiler_options: &CompilerOptions, target: &Path) -> OutputLayout {
    OutputLayout {
        out_dir: target.to_path_buf(),
        bundle: compiler_options.out_file().map(PathBuf::from),
        declaration: compiler_options.declaration(),
        source_map: compiler_options.external_source_map(),
    }
}

/// One result per compiled source file that the host declared; declaration
/// files and files pulled in by resolution are not tracked.
fn file_results(
    source_files: &[SourceFile],
    mappings: &SourceMappings,
    layout: &OutputLayout,
) -> Vec<CompilationFileResult> {
    source_files
        .iter()
        .filter(|source_file| !source_file.is_declaration_file())
        .filter_map(|source_file| file_result(source_file, mappings, layout))
        .collect()
}

fn file_result(
    source_file: &SourceFile,
    mappings: &SourceMappings,
    layout: &OutputLayout,
) -> Option<CompilationFileResult> {
    let Some(mapping) = mappings.find(&source_file.file_name) else {
        tracing::trace!(target: "compiling", file = %source_file.file_name, "Unmapped source file");
        return None;
    };

    let referenced = source_file.referenced_files.iter().cloned();
    let files_read = std::iter::once(source_file.file_name.clone()).chain(referenced).collect();
    let files_written = layout.files_written(mapping);

    let source = source_file.file_name.clone();
    Some(CompilationFileResult { source, result: FileResult { files_read, files_written } })
}

fn reconciliation(
    request: &Request,
    roots: &RootDirectories,
    result: &CompilationResult,
    emit: &EmitOutput,
) -> Plan {
    let relocation = match roots {
        RootDirectories::Split { main, test } => Some(Relocation::new(request.target.clone(), main, test)),
        RootDirectories::Single(_) => None,
    };

    let assertion = request.options.assert_compilation.then(|| {
        let emitted = if emit.emit_skipped {
            vec![]
        } else {
            let emitted = emit.emitted_files.iter().flatten();
            emitted.map(PathBuf::from).collect()
        };
        Assertion { declared: result.files_written(), emitted, emit_skipped: emit.emit_skipped }
    });

    Plan { relocation, assertion }
}
