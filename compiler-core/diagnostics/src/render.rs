use itertools::Itertools;

use crate::Problem;

/// Renders problems one per line, for logging.
pub fn format_text(problems: &[Problem]) -> String {
    problems
        .iter()
        .map(|problem| {
            format!(
                "{}: {}:{}:{} {}",
                problem.severity,
                problem.source,
                problem.line_number,
                problem.character_offset,
                problem.message
            )
        })
        .join("\n")
}
