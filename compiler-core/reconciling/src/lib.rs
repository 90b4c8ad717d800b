//! Post-emission checks: comparing what the compiler wrote against what the
//! build system was told to expect, and relocating the outputs of split
//! main/test compilations.
//!
//! Nothing in here can change a compilation result. Findings are logged and
//! returned in a [`Report`] for inspection.

mod discrepancy;
mod error;
mod exists;
mod relocate;

use std::path::PathBuf;

pub use discrepancy::Discrepancy;
pub use error::{ReconcileError, Result};
pub use exists::missing_files;
pub use relocate::{Relocation, common_prefix};

/// Inputs of the declared-versus-emitted comparison.
#[derive(Debug, Clone, Default)]
pub struct Assertion {
    /// Every `filesWritten` entry across all file results.
    pub declared: Vec<PathBuf>,
    /// Files the compiler reported writing; empty if emission was skipped.
    pub emitted: Vec<PathBuf>,
    pub emit_skipped: bool,
}

/// The post-emission work for one request.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub relocation: Option<Relocation>,
    pub assertion: Option<Assertion>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.relocation.is_none() && self.assertion.is_none()
    }
}

#[derive(Debug, Default)]
pub struct Report {
    /// Set when relocation failed; the assertion is then skipped.
    pub relocation_error: Option<ReconcileError>,
    pub discrepancy: Option<Discrepancy>,
    /// Declared files that do not exist as regular files.
    pub missing: Vec<PathBuf>,
    /// Set when the compiler skipped emission and nothing was produced.
    pub emit_skipped: bool,
}

pub async fn reconcile(plan: Plan) -> Report {
    let mut report = Report::default();

    if let Some(relocation) = &plan.relocation {
        if let Err(error) = relocation.run().await {
            tracing::error!(target: "reconciling", %error, "Failed to relocate test outputs");
            report.relocation_error = Some(error);
            return report;
        }
    }

    let Some(assertion) = &plan.assertion else {
        return report;
    };

    if assertion.emit_skipped {
        tracing::error!(
            target: "reconciling",
            "Emission was skipped by the compiler; no declared outputs were produced"
        );
        report.emit_skipped = true;
    }

    tracing::debug!(target: "reconciling", files = ?assertion.declared, "Files written");
    tracing::debug!(target: "reconciling", files = ?assertion.emitted, "Files emitted");

    let discrepancy = Discrepancy::between(&assertion.declared, &assertion.emitted);
    if !discrepancy.is_empty() {
        if assertion.emit_skipped {
            tracing::error!(target: "reconciling", "{discrepancy}");
        } else {
            tracing::warn!(target: "reconciling", "{discrepancy}");
        }
        report.discrepancy = Some(discrepancy);
    }

    match missing_files(&assertion.declared).await {
        Ok(missing) if missing.is_empty() => {
            tracing::debug!(target: "reconciling", "All declared files exist");
        }
        Ok(missing) => {
            tracing::error!(
                target: "reconciling",
                files = ?missing,
                "Files declared that have not been generated"
            );
            report.missing = missing;
        }
        Err(error) => {
            tracing::error!(target: "reconciling", %error, "Unexpected error while checking outputs");
        }
    }

    report
}
