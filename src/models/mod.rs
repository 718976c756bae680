//! Shared data models for diagnostics, lint results, and settings snapshots.

pub mod settings;

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Fixed tag stamped on every diagnostic as both `source` and `code`.
pub const DIAGNOSTIC_SOURCE: &str = "questasim";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Diagnostic severity as understood by editors.
pub enum Severity {
    Error,
    Warning,
    Information,
}

impl Severity {
    /// Map a matched compiler keyword onto a severity.
    ///
    /// Only `Error` and `Warning` keep their weight; every other keyword of
    /// the vocabulary is demoted to `Information`.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "Error" => Severity::Error,
            "Warning" => Severity::Warning,
            _ => Severity::Information,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Information => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single compiler message placed on a 0-based line range of a document.
pub struct Diagnostic {
    pub severity: Severity,
    pub file: PathBuf,
    pub start_line: u32,
    pub end_line: u32,
    pub message: String,
    pub source: &'static str,
    pub code: &'static str,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        file: impl Into<PathBuf>,
        start_line: u32,
        end_line: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            file: file.into(),
            start_line,
            end_line: end_line.max(start_line),
            message: message.into(),
            source: DIAGNOSTIC_SOURCE,
            code: DIAGNOSTIC_SOURCE,
        }
    }

    /// Informational diagnostic anchored at the first line of the document.
    pub fn fallback(file: impl Into<PathBuf>, line: &str) -> Self {
        Self::new(Severity::Information, file, 0, 0, line)
    }
}

#[derive(Debug, Clone, Serialize)]
/// Diagnostics published for one document.
pub struct DocumentReport {
    pub file: String,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Aggregated lint summary used by printers and exit codes.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub documents: usize,
}

#[derive(Debug, Clone, Serialize)]
/// Lint results container.
pub struct LintResult {
    pub documents: Vec<DocumentReport>,
    pub summary: Summary,
}

impl LintResult {
    /// Build a result from per-document diagnostic lists, counting severities.
    pub fn from_reports(documents: Vec<DocumentReport>) -> Self {
        let mut summary = Summary {
            documents: documents.len(),
            ..Summary::default()
        };
        for d in documents.iter().flat_map(|r| r.diagnostics.iter()) {
            match d.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Information => summary.infos += 1,
            }
        }
        LintResult { documents, summary }
    }
}
