//! A scripted stand-in for the compiler bridge, plus request helpers.
//!
//! [`FakeToolchain`] echoes the options it is given, reports the diagnostics
//! it was set up with and emits one `.js` file per compiled source, rooted
//! the way the compiler roots them: under `rootDir`, or under the common
//! ancestor of `rootDirs`.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use compiling::Request;
use serde_json::Value;
use toolchain::{
    CompilerOptions, Configured, Diagnostic, DiagnosticFile, EmitOutput, Program, SourceFile,
    Toolchain, ToolchainError,
};

#[derive(Default)]
pub struct FakeToolchain {
    pub configure_errors: Vec<Diagnostic>,
    pub pre_emit: Vec<Diagnostic>,
    pub emit_diagnostics: Vec<Diagnostic>,
    pub emit_skipped: bool,
    /// Files the program pulls in on its own, e.g. `lib.d.ts`.
    pub library_files: Vec<SourceFile>,
    /// Triple-slash references, keyed by source file name.
    pub references: Vec<(String, Vec<String>)>,
    /// Writes every emitted file to disk.
    pub write_outputs: bool,
    /// Refuses to start, like a missing bridge executable.
    pub unavailable: bool,

    pub configured: RefCell<Option<CompilerOptions>>,
    pub compiled: RefCell<Vec<PathBuf>>,
}

impl FakeToolchain {
    fn check_available(&self) -> toolchain::Result<()> {
        if self.unavailable {
            let source = std::io::Error::from(std::io::ErrorKind::NotFound);
            return Err(ToolchainError::Spawn { program: "tsc-bridge".to_string(), source });
        }
        Ok(())
    }

    fn source_file(&self, path: &Path) -> SourceFile {
        let file_name = path.to_string_lossy().into_owned();
        let referenced_files = self
            .references
            .iter()
            .find(|(source, _)| *source == file_name)
            .map(|(_, referenced)| referenced.clone())
            .unwrap_or_default();
        SourceFile { file_name, referenced_files }
    }
}

impl Toolchain for FakeToolchain {
    fn configure(
        &self,
        compiler_options: &CompilerOptions,
        _: &Path,
    ) -> toolchain::Result<Configured> {
        self.check_available()?;
        let options = compiler_options.clone();
        Ok(Configured { options, errors: self.configure_errors.clone() })
    }

    fn create_program(
        &self,
        files: &[PathBuf],
        options: &CompilerOptions,
    ) -> toolchain::Result<Box<dyn Program>> {
        self.check_available()?;
        *self.configured.borrow_mut() = Some(options.clone());
        *self.compiled.borrow_mut() = files.to_vec();

        let mut source_files = self.library_files.clone();
        source_files.extend(files.iter().map(|file| self.source_file(file)));

        let emitted = if self.emit_skipped { vec![] } else { emitted_files(files, options) };
        let emit = EmitOutput {
            emit_skipped: self.emit_skipped,
            diagnostics: self.emit_diagnostics.clone(),
            emitted_files: Some(emitted.iter().map(|file| file.to_string_lossy().into_owned()).collect()),
        };

        Ok(Box::new(FakeProgram {
            pre_emit: self.pre_emit.clone(),
            emit: Some(emit),
            emitted,
            source_files,
            write_outputs: self.write_outputs,
        }))
    }
}

struct FakeProgram {
    pre_emit: Vec<Diagnostic>,
    emit: Option<EmitOutput>,
    emitted: Vec<PathBuf>,
    source_files: Vec<SourceFile>,
    write_outputs: bool,
}

impl Program for FakeProgram {
    fn pre_emit_diagnostics(&self) -> Vec<Diagnostic> {
        self.pre_emit.clone()
    }

    fn emit(&mut self) -> EmitOutput {
        if self.write_outputs {
            for file in &self.emitted {
                fs::create_dir_all(file.parent().unwrap()).unwrap();
                fs::write(file, "// emitted\n").unwrap();
            }
        }
        self.emit.take().unwrap_or_else(EmitOutput::skipped)
    }

    fn source_files(&self) -> &[SourceFile] {
        &self.source_files
    }
}

fn emitted_files(files: &[PathBuf], options: &CompilerOptions) -> Vec<PathBuf> {
    if let Some(out_file) = options.out_file() {
        return vec![PathBuf::from(out_file)];
    }

    let out_dir = PathBuf::from(options.out_dir().unwrap());
    let root = source_root(options);

    let mut emitted = vec![];
    for file in files.iter().filter(|file| !file.to_string_lossy().ends_with(".d.ts")) {
        let relative = file.strip_prefix(&root).unwrap();
        let primary = out_dir.join(relative).with_extension("js");
        if options.declaration() {
            emitted.push(out_dir.join(relative).with_extension("d.ts"));
        }
        if options.external_source_map() {
            emitted.push(PathBuf::from(format!("{}.map", primary.display())));
        }
        emitted.push(primary);
    }
    emitted
}

fn source_root(options: &CompilerOptions) -> PathBuf {
    if let Some(root) = options.string("rootDir") {
        return PathBuf::from(root);
    }
    let roots: Vec<PathBuf> = match options.get("rootDirs") {
        Some(Value::Array(roots)) => {
            roots.iter().filter_map(Value::as_str).map(PathBuf::from).collect()
        }
        _ => vec![],
    };
    common_ancestor(&roots)
}

fn common_ancestor(paths: &[PathBuf]) -> PathBuf {
    let Some((first, rest)) = paths.split_first() else {
        return PathBuf::new();
    };
    let mut ancestor = first.clone();
    while !rest.iter().all(|path| path.starts_with(&ancestor)) {
        ancestor.pop();
    }
    ancestor
}

pub fn diagnostic(code: u32, category: u32, message_text: &str) -> Diagnostic {
    let message_text = message_text.to_string();
    Diagnostic { code, category, message_text, start: None, file: None }
}

/// A diagnostic at `line` (1-based) and `column` (0-based) of `text`.
pub fn diagnostic_at(
    code: u32,
    message_text: &str,
    file_name: &str,
    text: &str,
    line: usize,
    column: usize,
) -> Diagnostic {
    let line_start: usize = text.split_inclusive('\n').take(line - 1).map(str::len).sum();
    let start = (line_start + column) as u32;
    let file = DiagnosticFile { file_name: file_name.to_string(), text: text.to_string() };
    Diagnostic { start: Some(start), file: Some(file), ..diagnostic(code, 1, message_text) }
}

/// Decodes a request the way the host sends it.
pub fn request(mappings: &[(&Path, &str)], target: &Path, options: Value) -> Request {
    let mappings: Vec<_> = mappings
        .iter()
        .map(|(absolute, relative)| [absolute.to_string_lossy().into_owned(), relative.to_string()])
        .collect();
    let mappings = serde_json::to_string(&mappings).unwrap();
    let target = target.to_string_lossy().into_owned();
    let options = options.to_string();
    let cwd = Path::new("/project");
    protocol::decode(&mappings, Some(target.as_str()), Some(options.as_str()), cwd).unwrap()
}
