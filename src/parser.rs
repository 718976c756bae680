//! Parser for `vlog` stdout.
//!
//! Each line is handled on its own. Lines starting with `**` are compiler
//! messages; four independent patterns are applied to them:
//! - the source-file name (`name.<ext>`),
//! - a severity keyword from a fixed vocabulary,
//! - the location token (`.<ext>(start[:end])`),
//! - the message, which is the whole line kept verbatim.
//!
//! A message about a file other than the linted document is dropped. When
//! any of the patterns finds nothing the raw line is reported as an
//! informational diagnostic on the first line of the document, so odd
//! compiler output is never lost and never aborts the batch.

use crate::error::Result;
use crate::models::{Diagnostic, Severity};
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Prefix of every compiler message line.
pub const MESSAGE_MARKER: &str = "**";

static SEVERITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Error|Warning|Undefined|Invalid|Illegal|Extra semicolon|is allowed|Identifier")
        .expect("severity vocabulary is a valid pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Miss {
    FileName,
    DocumentName,
    Severity,
    Location,
}

/// Compiled matchers for one set of source-file extensions.
#[derive(Debug, Clone)]
pub struct OutputParser {
    file_name: Regex,
    location: Regex,
}

impl OutputParser {
    /// Build the file-name and location patterns for `extensions`.
    ///
    /// Longer extensions are tried first so `top.svh` is never read as
    /// `top.sv`.
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Result<Self> {
        let mut exts: Vec<&str> = extensions
            .iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.'))
            .filter(|e| !e.is_empty())
            .collect();
        if exts.is_empty() {
            exts = crate::models::settings::DEFAULT_EXTENSIONS.to_vec();
        }
        exts.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        exts.dedup();
        let alt = exts
            .iter()
            .map(|e| regex::escape(e))
            .collect::<Vec<_>>()
            .join("|");
        Ok(Self {
            file_name: Regex::new(&format!(r"[\w-]+\.(?:{})\b", alt))?,
            location: Regex::new(&format!(r"\.(?:{})\((\d+)(?::(\d+))?\)", alt))?,
        })
    }

    /// Parse the full captured stdout for `document`, in line order.
    pub fn parse_output(&self, stdout: &str, document: &Path) -> Vec<Diagnostic> {
        stdout
            .lines()
            .filter_map(|line| self.parse_line(line, document))
            .collect()
    }

    /// Classify one stdout line.
    ///
    /// Returns `None` for non-message lines and for messages about other
    /// files.
    pub fn parse_line(&self, line: &str, document: &Path) -> Option<Diagnostic> {
        if !line.starts_with(MESSAGE_MARKER) {
            return None;
        }
        match self.extract(line, document) {
            Ok(found) => found,
            Err(miss) => {
                debug!("unparsed compiler line ({:?} not found): {}", miss, line);
                Some(Diagnostic::fallback(document, line))
            }
        }
    }

    /// File name as the compiler would print it, taken from a path or line.
    pub fn file_name<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.file_name.find(text).map(|m| m.as_str())
    }

    fn extract(
        &self,
        line: &str,
        document: &Path,
    ) -> std::result::Result<Option<Diagnostic>, Miss> {
        let reported = self.file_name(line).ok_or(Miss::FileName)?;
        let keyword = SEVERITY_RE.find(line).ok_or(Miss::Severity)?.as_str();
        let caps = self.location.captures(line).ok_or(Miss::Location)?;
        let start: u32 = caps[1].parse().map_err(|_| Miss::Location)?;
        let end: u32 = match caps.get(2) {
            Some(m) => m.as_str().parse().map_err(|_| Miss::Location)?,
            None => start,
        };

        let doc_path = document.to_string_lossy();
        let current = self.file_name(&doc_path).ok_or(Miss::DocumentName)?;
        if reported != current {
            trace!("skipping message for {} (linting {})", reported, current);
            return Ok(None);
        }

        Ok(Some(Diagnostic::new(
            Severity::from_keyword(keyword),
            document,
            start.saturating_sub(1),
            end.saturating_sub(1),
            line,
        )))
    }
}
