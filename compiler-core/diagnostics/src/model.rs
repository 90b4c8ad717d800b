use std::fmt;

use serde::{Deserialize, Serialize};

/// Source reported for problems that are not attached to any file.
pub const PROJECT_SOURCE: &str = "tsconfig.json";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Maps the compiler's numeric diagnostic category. Unknown categories
    /// are treated as errors.
    pub fn from_category(category: u32) -> Severity {
        match category {
            0 => Severity::Warn,
            1 => Severity::Error,
            2 => Severity::Info,
            _ => Severity::Error,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic in the shape the host build system understands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// 1-based.
    pub line_number: u32,
    /// 0-based, in characters.
    pub character_offset: u32,
    pub message: String,
    pub source: String,
    pub severity: Severity,
    /// The offending line including its terminator; empty when unavailable.
    pub line_content: String,
}

impl Problem {
    /// A problem that belongs to the project as a whole rather than a file.
    pub fn project(severity: Severity, message: impl Into<String>) -> Problem {
        let message = message.into();
        Problem {
            line_number: 1,
            character_offset: 0,
            message,
            source: PROJECT_SOURCE.to_string(),
            severity,
            line_content: String::new(),
        }
    }
}
