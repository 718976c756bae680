//! Narrow interfaces to whatever hosts the linter.
//!
//! A host supplies a settings snapshot per request and receives the
//! diagnostic list for each linted document. The CLI backs these with the
//! config file and an in-memory `DiagnosticCollection`.

use crate::error::Result;
use crate::models::settings::LinterSettings;
use crate::models::{Diagnostic, DocumentReport, LintResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Source of the configuration snapshot for one lint request.
pub trait SettingsProvider {
    fn settings(&self) -> Result<LinterSettings>;
}

/// Receiver of per-document diagnostics.
pub trait DiagnosticSink {
    /// Replace the diagnostics held for `document`.
    fn publish(&mut self, document: &Path, diagnostics: Vec<Diagnostic>);
}

/// Per-document diagnostic slots, ordered by path.
#[derive(Debug, Default)]
pub struct DiagnosticCollection {
    slots: BTreeMap<PathBuf, Vec<Diagnostic>>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, document: &Path) -> Option<&[Diagnostic]> {
        self.slots.get(document).map(Vec::as_slice)
    }

    /// Snapshot as a `LintResult`, rendering paths with `display`.
    pub fn to_result(&self, display: impl Fn(&Path) -> String) -> LintResult {
        LintResult::from_reports(
            self.slots
                .iter()
                .map(|(doc, diags)| DocumentReport {
                    file: display(doc),
                    diagnostics: diags.clone(),
                })
                .collect(),
        )
    }
}

impl DiagnosticSink for DiagnosticCollection {
    fn publish(&mut self, document: &Path, diagnostics: Vec<Diagnostic>) {
        self.slots.insert(document.to_path_buf(), diagnostics);
    }
}
