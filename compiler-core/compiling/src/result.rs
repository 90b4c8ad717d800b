use std::path::PathBuf;

use diagnostics::Problem;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResult {
    /// The source itself, then every file it references.
    pub files_read: Vec<String>,
    pub files_written: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationFileResult {
    pub source: String,
    pub result: FileResult,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationResult {
    pub results: Vec<CompilationFileResult>,
    pub problems: Vec<Problem>,
}

impl CompilationResult {
    pub fn failed(problems: Vec<Problem>) -> CompilationResult {
        CompilationResult { results: vec![], problems }
    }

    pub fn files_written(&self) -> Vec<PathBuf> {
        let files = self.results.iter().flat_map(|file| &file.result.files_written);
        files.cloned().collect()
    }
}
