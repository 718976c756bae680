//! Configuration discovery and effective settings resolution.
//!
//! vlint reads `vlint.toml|yaml|yml` from the workspace root (the closest
//! ancestor holding a config file or `.git`) and merges it with CLI flags
//! into an `Effective` config. Defaults:
//! - `path`: empty (`vlog` resolved through `PATH`)
//! - `output`: `human`
//! - `questasim.extensions`: `svh, sv, vh, v`
//! - run location: the workspace root
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Result, VlintError};
use crate::host::SettingsProvider;
use crate::models::settings::{LinterSettings, ListOrString};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_NAMES: [&str; 3] = ["vlint.toml", "vlint.yaml", "vlint.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Compiler section under `[questasim]`.
pub struct QuestasimCfg {
    pub arguments: Option<String>,
    pub work_dir: Option<String>,
    pub incdirs: Option<ListOrString>,
    pub lst_files: Option<ListOrString>,
    pub compile_file: Option<String>,
    pub build_dir: Option<String>,
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `vlint.toml|yaml`.
pub struct VlintConfig {
    /// Directory prefix for the `vlog` binary.
    pub path: Option<String>,
    pub output: Option<String>,
    /// Glob patterns (relative to the workspace root) linted when no files
    /// are given on the command line.
    #[serde(default)]
    pub documents: Option<Vec<String>>,
    #[serde(default)]
    pub questasim: Option<QuestasimCfg>,
}

#[derive(Debug, Default, Clone)]
/// Values given on the command line; `None`/empty means "not given".
pub struct Overrides {
    pub workspace_root: Option<String>,
    pub output: Option<String>,
    pub path: Option<String>,
    pub arguments: Option<String>,
    pub work_dir: Option<String>,
    pub incdirs: Vec<String>,
    pub lst_file: Option<String>,
    pub compile_file: Option<String>,
    pub build_dir: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub workspace_root: PathBuf,
    pub config_found: bool,
    pub output: String,
    pub documents: Vec<String>,
    pub settings: LinterSettings,
}

/// Walk upward from `start` to detect the workspace root.
///
/// Stops when a `vlint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_workspace_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `VlintConfig` from `vlint.toml` or `vlint.yaml|yml` if present.
pub fn load_config(root: &Path) -> Result<Option<VlintConfig>> {
    for name in CONFIG_NAMES {
        let p = root.join(name);
        if !p.exists() {
            continue;
        }
        let s = fs::read_to_string(&p).map_err(|source| VlintError::Io {
            path: p.clone(),
            source,
        })?;
        let cfg: VlintConfig = if name.ends_with(".toml") {
            toml::from_str(&s).map_err(|source| VlintError::Toml { path: p, source })?
        } else {
            serde_yaml::from_str(&s).map_err(|source| VlintError::Yaml { path: p, source })?
        };
        return Ok(Some(cfg));
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(ov: &Overrides) -> Result<Effective> {
    let start = PathBuf::from(ov.workspace_root.as_deref().unwrap_or("."));
    let start = fs::canonicalize(&start).unwrap_or(start);
    let workspace_root = detect_workspace_root(&start);
    let loaded = load_config(&workspace_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();
    let q = cfg.questasim.unwrap_or_default();

    let output = ov
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let mut settings = LinterSettings::new(&workspace_root);
    settings.path = ov.path.clone().or(cfg.path).unwrap_or_default();
    settings.arguments = ov.arguments.clone().or(q.arguments).unwrap_or_default();
    settings.work_dir = ov.work_dir.clone().or(q.work_dir);
    settings.incdirs = if ov.incdirs.is_empty() {
        q.incdirs.map(|v| v.normalize()).unwrap_or_default()
    } else {
        ListOrString::List(ov.incdirs.clone()).normalize()
    };
    settings.lst_files = match ov.lst_file.clone() {
        Some(f) => vec![f],
        None => q.lst_files.map(|v| v.normalize()).unwrap_or_default(),
    };
    settings.compile_file = ov.compile_file.clone().or(q.compile_file);
    settings.build_dir = ov.build_dir.clone().or(q.build_dir).map(PathBuf::from);
    if let Some(exts) = q.extensions {
        if !exts.is_empty() {
            settings.extensions = exts;
        }
    }

    debug!(
        "workspace root {} (config {})",
        workspace_root.display(),
        if config_found { "found" } else { "absent" }
    );

    Ok(Effective {
        workspace_root,
        config_found,
        output,
        documents: cfg.documents.unwrap_or_default(),
        settings,
    })
}

/// Settings read from the config file on every request, with CLI overrides
/// layered on top.
pub struct ConfigFileSettings {
    overrides: Overrides,
}

impl ConfigFileSettings {
    pub fn new(overrides: Overrides) -> Self {
        Self { overrides }
    }
}

impl SettingsProvider for ConfigFileSettings {
    fn settings(&self) -> Result<LinterSettings> {
        Ok(resolve_effective(&self.overrides)?.settings)
    }
}

/// Command-line files made absolute against the current directory, since
/// the compiler runs in the build directory rather than where vlint was
/// started.
pub fn resolve_cli_files(files: &[String]) -> Vec<PathBuf> {
    let cwd = std::env::current_dir().ok();
    files
        .iter()
        .map(PathBuf::from)
        .map(|p| match cwd.as_ref() {
            Some(base) if p.is_relative() => base.join(p),
            _ => p,
        })
        .collect()
}

/// Documents to lint: explicit `files`, else the config's glob patterns
/// expanded under the workspace root. The result is absolute, sorted, and
/// deduplicated.
pub fn collect_documents(eff: &Effective, files: &[String]) -> Result<Vec<PathBuf>> {
    let mut out: Vec<PathBuf> = Vec::new();
    if !files.is_empty() {
        out.extend(resolve_cli_files(files));
    } else {
        for pat in &eff.documents {
            let pattern = eff.workspace_root.join(pat).to_string_lossy().to_string();
            let paths = glob::glob(&pattern).map_err(|e| VlintError::Glob {
                pattern: pat.clone(),
                message: e.to_string(),
            })?;
            out.extend(paths.flatten().filter(|p| p.is_file()));
        }
    }
    out.sort();
    out.dedup();
    if out.is_empty() {
        return Err(VlintError::NoDocuments);
    }
    Ok(out)
}
