//! A [`Toolchain`] backed by an external bridge executable.
//!
//! Each operation spawns the bridge once, writes a single JSON request to
//! its standard input and reads a single JSON response from its standard
//! output. The bridge's standard error is inherited.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{
    CompilerOptions, Configured, Diagnostic, EmitOutput, Program, Result, SourceFile, Toolchain,
    ToolchainError,
};

#[derive(Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
enum BridgeRequest<'a> {
    Configure {
        #[serde(rename = "compilerOptions")]
        compiler_options: &'a CompilerOptions,
        #[serde(rename = "baseDir")]
        base_dir: &'a Path,
    },
    Compile {
        files: &'a [PathBuf],
        options: &'a CompilerOptions,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompileResponse {
    #[serde(default)]
    pre_emit_diagnostics: Vec<Diagnostic>,
    emit: EmitOutput,
    #[serde(default)]
    source_files: Vec<SourceFile>,
}

#[derive(Debug, Clone)]
pub struct ProcessToolchain {
    program: String,
    args: Vec<String>,
}

impl ProcessToolchain {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> ProcessToolchain {
        let program = program.into();
        ProcessToolchain { program, args }
    }

    fn exchange<T: DeserializeOwned>(&self, request: &BridgeRequest<'_>) -> Result<T> {
        let input = serde_json::to_vec(request)?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ToolchainError::Spawn { program: self.program.clone(), source })?;

        // The child is always reaped, even if it stopped reading its input.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&input),
            None => Ok(()),
        };

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let program = self.program.clone();
            return Err(ToolchainError::Exit { program, status: output.status });
        }
        written?;

        tracing::trace!(target: "toolchain", bytes = output.stdout.len(), "Bridge response");
        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

impl Toolchain for ProcessToolchain {
    fn configure(&self, compiler_options: &CompilerOptions, base_dir: &Path) -> Result<Configured> {
        self.exchange(&BridgeRequest::Configure { compiler_options, base_dir })
    }

    fn create_program(
        &self,
        files: &[PathBuf],
        options: &CompilerOptions,
    ) -> Result<Box<dyn Program>> {
        let response: CompileResponse = self.exchange(&BridgeRequest::Compile { files, options })?;
        let CompileResponse { pre_emit_diagnostics, emit, source_files } = response;
        Ok(Box::new(ProcessProgram { pre_emit_diagnostics, emit: Some(emit), source_files }))
    }
}

/// A program compiled in one pass by the bridge; `emit` hands out the
/// recorded emit once.
struct ProcessProgram {
    pre_emit_diagnostics: Vec<Diagnostic>,
    emit: Option<EmitOutput>,
    source_files: Vec<SourceFile>,
}

impl Program for ProcessProgram {
    fn pre_emit_diagnostics(&self) -> Vec<Diagnostic> {
        self.pre_emit_diagnostics.clone()
    }

    fn emit(&mut self) -> EmitOutput {
        self.emit.take().unwrap_or_else(EmitOutput::skipped)
    }

    fn source_files(&self) -> &[SourceFile] {
        &self.source_files
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use serde_json::json;

    use super::{BridgeRequest, CompileResponse};
    use crate::CompilerOptions;

    #[test]
    fn configure_request_shape() {
        let options: CompilerOptions = serde_json::from_value(json!({ "target": "es5" })).unwrap();
        let request =
            BridgeRequest::Configure { compiler_options: &options, base_dir: Path::new("/project") };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "command": "configure",
                "compilerOptions": { "target": "es5" },
                "baseDir": "/project",
            })
        );
    }

    #[test]
    fn compile_request_shape() {
        let options = CompilerOptions::default();
        let files = [PathBuf::from("/project/a.ts")];
        let request = BridgeRequest::Compile { files: &files, options: &options };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({ "command": "compile", "files": ["/project/a.ts"], "options": {} }));
    }

    #[test]
    fn compile_response_defaults() {
        let response: CompileResponse =
            serde_json::from_value(json!({ "emit": { "emitSkipped": true } })).unwrap();
        assert!(response.pre_emit_diagnostics.is_empty());
        assert!(response.source_files.is_empty());
        assert!(response.emit.emit_skipped);
        assert_eq!(response.emit.emitted_files, None);
    }

    #[test]
    fn diagnostic_without_file() {
        let diagnostic: crate::Diagnostic = serde_json::from_value(json!({
            "code": 5023,
            "category": 1,
            "messageText": "Unknown compiler option 'foo'.",
        }))
        .unwrap();
        assert_eq!(diagnostic.start, None);
        assert_eq!(diagnostic.file, None);
    }
    #[cfg(unix)]
    fn shell(script: &str) -> super::ProcessToolchain {
        super::ProcessToolchain::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[cfg(unix)]
    #[test]
    fn configure_through_bridge() {
        use crate::Toolchain;

        let toolchain = shell(
            r#"cat >/dev/null; echo '{"options":{"target":"es5"},"errors":[{"code":5023,"category":1,"messageText":"Unknown compiler option."}]}'"#,
        );
        let configured =
            toolchain.configure(&CompilerOptions::default(), Path::new("/project")).unwrap();

        assert_eq!(configured.options.string("target"), Some("es5"));
        assert_eq!(configured.errors.len(), 1);
        assert_eq!(configured.errors[0].code, 5023);
    }

    #[cfg(unix)]
    #[test]
    fn compile_through_bridge() {
        use crate::{Program, Toolchain};

        let toolchain = shell(
            r#"cat >/dev/null; echo '{"emit":{"emitSkipped":false,"emittedFiles":["/out/a.js"]},"sourceFiles":[{"fileName":"/project/a.ts"}]}'"#,
        );
        let files = [PathBuf::from("/project/a.ts")];
        let mut program = toolchain.create_program(&files, &CompilerOptions::default()).unwrap();

        assert!(program.pre_emit_diagnostics().is_empty());
        assert_eq!(program.source_files()[0].file_name, "/project/a.ts");
        let emit = program.emit();
        assert_eq!(emit.emitted_files, Some(vec!["/out/a.js".to_string()]));
        assert!(program.emit().emit_skipped);
    }

    #[cfg(unix)]
    #[test]
    fn bridge_exit_status() {
        use crate::{Toolchain, ToolchainError};

        let toolchain = shell("cat >/dev/null; exit 3");
        let error = toolchain.configure(&CompilerOptions::default(), Path::new("/")).unwrap_err();
        let ToolchainError::Exit { status, .. } = error else { panic!("expected an exit error") };
        assert_eq!(status.code(), Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn bridge_exits_without_reading_input() {
        use crate::{Toolchain, ToolchainError};

        let toolchain = shell("exit 3");
        let error = toolchain.configure(&CompilerOptions::default(), Path::new("/")).unwrap_err();
        assert!(matches!(error, ToolchainError::Exit { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn bridge_garbage_output() {
        use crate::{Toolchain, ToolchainError};

        let toolchain = shell("cat >/dev/null; echo 'not json'");
        let error = toolchain.configure(&CompilerOptions::default(), Path::new("/")).unwrap_err();
        assert!(matches!(error, ToolchainError::Json(_)));
    }

    #[test]
    fn missing_bridge() {
        use crate::{Toolchain, ToolchainError};

        let toolchain = super::ProcessToolchain::new("tsc-bridge-not-installed", vec![]);
        let error = toolchain.configure(&CompilerOptions::default(), Path::new("/")).unwrap_err();
        let ToolchainError::Spawn { program, .. } = error else { panic!("expected a spawn error") };
        assert_eq!(program, "tsc-bridge-not-installed");
    }
}
