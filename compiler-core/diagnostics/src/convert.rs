use rustc_hash::FxHashMap;
use toolchain::Diagnostic;

use crate::{Problem, Severity, SourceContext};

pub fn is_ignored(diagnostic: &Diagnostic, ignore: &[u32]) -> bool {
    ignore.contains(&diagnostic.code)
}

/// Drops every diagnostic whose code is in `ignore`, keeping the order of
/// the rest.
pub fn filter_ignored(diagnostics: Vec<Diagnostic>, ignore: &[u32]) -> Vec<Diagnostic> {
    if ignore.is_empty() {
        return diagnostics;
    }
    diagnostics.into_iter().filter(|diagnostic| !is_ignored(diagnostic, ignore)).collect()
}

/// Translates a batch of diagnostics, skipping ignored codes.
///
/// Files are indexed once per batch, however many diagnostics point into
/// them.
pub fn to_problems(diagnostics: &[Diagnostic], ignore: &[u32]) -> Vec<Problem> {
    let mut contexts = FxHashMap::default();
    diagnostics
        .iter()
        .filter(|diagnostic| !is_ignored(diagnostic, ignore))
        .map(|diagnostic| translate(diagnostic, &mut contexts))
        .collect()
}

pub fn to_problem(diagnostic: &Diagnostic) -> Problem {
    translate(diagnostic, &mut FxHashMap::default())
}

fn translate<'a>(
    diagnostic: &'a Diagnostic,
    contexts: &mut FxHashMap<&'a str, SourceContext<'a>>,
) -> Problem {
    let message = format!("TS{} {}", diagnostic.code, diagnostic.message_text);
    let severity = Severity::from_category(diagnostic.category);

    let (Some(file), Some(start)) = (&diagnostic.file, diagnostic.start) else {
        return Problem::project(severity, message);
    };

    let context =
        contexts.entry(file.file_name.as_str()).or_insert_with(|| SourceContext::new(&file.text));

    let source = file.file_name.clone();
    let Some(position) = context.position(start) else {
        tracing::debug!(
            target: "diagnostics",
            file = %file.file_name,
            start,
            "Diagnostic offset could not be resolved"
        );
        let line_content = String::new();
        return Problem { line_number: 1, character_offset: 0, message, source, severity, line_content };
    };

    let line_content = context.line_text(start).unwrap_or_default().to_string();

    Problem {
        line_number: position.line + 1,
        character_offset: position.character,
        message,
        source,
        severity,
        line_content,
    }
}
