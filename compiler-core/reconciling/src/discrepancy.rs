use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use itertools::Itertools;

/// Set differences between declared and emitted output files.
///
/// Paths are normalized before comparison, so the two sides may spell the
/// same file differently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discrepancy {
    pub emitted_but_not_declared: BTreeSet<PathBuf>,
    pub declared_but_not_emitted: BTreeSet<PathBuf>,
}

impl Discrepancy {
    pub fn between(declared: &[PathBuf], emitted: &[PathBuf]) -> Discrepancy {
        let declared: BTreeSet<PathBuf> = declared.iter().map(mapping::normalize).collect();
        let emitted: BTreeSet<PathBuf> = emitted.iter().map(mapping::normalize).collect();

        let emitted_but_not_declared = emitted.difference(&declared).cloned().collect();
        let declared_but_not_emitted = declared.difference(&emitted).cloned().collect();

        Discrepancy { emitted_but_not_declared, declared_but_not_emitted }
    }

    pub fn is_empty(&self) -> bool {
        self.emitted_but_not_declared.is_empty() && self.declared_but_not_emitted.is_empty()
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "emitted and declared files are not equal")?;
        writeln!(f, "emitted but not declared {}", joined(&self.emitted_but_not_declared))?;
        write!(f, "declared but not emitted {}", joined(&self.declared_but_not_emitted))
    }
}

fn joined(paths: &BTreeSet<PathBuf>) -> String {
    paths.iter().map(|path| path.display()).join(",")
}
