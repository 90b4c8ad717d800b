use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Compiler options in the compiler's own JSON vocabulary.
///
/// Only the handful of options the adapter reads or forces have typed
/// accessors; everything else is passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompilerOptions(Map<String, Value>);

impl CompilerOptions {
    pub fn new(values: Map<String, Value>) -> CompilerOptions {
        CompilerOptions(values)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn out_file(&self) -> Option<&str> {
        self.string("outFile").filter(|out_file| !out_file.is_empty())
    }

    pub fn out_dir(&self) -> Option<&str> {
        self.string("outDir")
    }

    pub fn declaration(&self) -> bool {
        self.flag("declaration")
    }

    /// Whether separate `.map` files are written.
    pub fn external_source_map(&self) -> bool {
        self.flag("sourceMap") && !self.flag("inlineSourceMap")
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticFile {
    pub file_name: String,
    pub text: String,
}

/// A diagnostic exactly as the compiler reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: u32,
    /// 0 warning, 1 error, 2 suggestion, 3 message.
    pub category: u32,
    /// Message text with any message chain already flattened.
    pub message_text: String,
    /// Byte offset into [`DiagnosticFile::text`].
    #[serde(default)]
    pub start: Option<u32>,
    #[serde(default)]
    pub file: Option<DiagnosticFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub file_name: String,
    /// Files referenced at the syntactic level, e.g. by triple-slash directives.
    #[serde(default)]
    pub referenced_files: Vec<String>,
}

impl SourceFile {
    pub fn is_declaration_file(&self) -> bool {
        self.file_name.ends_with(".d.ts")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmitOutput {
    pub emit_skipped: bool,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
    /// Present only when the compiler was asked to list emitted files.
    #[serde(default)]
    pub emitted_files: Option<Vec<String>>,
}

impl EmitOutput {
    pub fn skipped() -> EmitOutput {
        EmitOutput { emit_skipped: true, diagnostics: vec![], emitted_files: None }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configured {
    pub options: CompilerOptions,
    #[serde(default)]
    pub errors: Vec<Diagnostic>,
}
