mod context;
mod convert;
mod model;
mod render;


pub use context::{Position, SourceContext};
pub use convert::{filter_ignored, is_ignored, to_problem, to_problems};
pub use model::{PROJECT_SOURCE, Problem, Severity};
pub use render::format_text;
