//! Settings snapshot consumed by a single lint request.

use serde::Deserialize;
use std::path::PathBuf;

/// Source-file extensions recognised in compiler output by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["svh", "sv", "vh", "v"];

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
/// A setting that may be written either as a list or as one
/// comma-separated string.
pub enum ListOrString {
    List(Vec<String>),
    Str(String),
}

impl ListOrString {
    /// Comma-join then re-split, so both spellings normalize the same way.
    /// Entries are trimmed and empty ones dropped.
    pub fn normalize(&self) -> Vec<String> {
        let joined = match self {
            ListOrString::List(v) => v.join(","),
            ListOrString::Str(s) => s.clone(),
        };
        joined
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable configuration for one `vlog` run.
pub struct LinterSettings {
    /// Prefix prepended to `vlog` (usually the Questasim `bin` directory).
    pub path: String,
    /// Extra arguments appended verbatim.
    pub arguments: String,
    /// Questasim work library passed as `-work`.
    pub work_dir: Option<String>,
    pub incdirs: Vec<String>,
    pub lst_files: Vec<String>,
    /// Compile log passed as `-l`.
    pub compile_file: Option<String>,
    pub build_dir: Option<PathBuf>,
    /// Workspace root; the run location when `build_dir` is unset.
    pub workspace_root: PathBuf,
    pub extensions: Vec<String>,
}

impl LinterSettings {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            path: String::new(),
            arguments: String::new(),
            work_dir: None,
            incdirs: Vec::new(),
            lst_files: Vec::new(),
            compile_file: None,
            build_dir: None,
            workspace_root: workspace_root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Directory the compiler runs in: `build_dir` (relative to the
    /// workspace root) or the workspace root itself.
    pub fn run_location(&self) -> PathBuf {
        match self.build_dir.as_ref() {
            Some(dir) => self.workspace_root.join(dir),
            None => self.workspace_root.clone(),
        }
    }
}
