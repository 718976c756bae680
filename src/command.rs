//! Construction of the `vlog` command line.
//!
//! Shape: `<path>vlog [-f lst] [-l log] [-work lib] -sv [+incdir+dir ...] [args] [documents]`.
//! Documents are only appended when no list file is configured.

use crate::models::settings::LinterSettings;
use std::path::{Path, PathBuf};

const COMPILER: &str = "vlog";

#[derive(Debug, Clone, PartialEq, Eq)]
/// A shell command line and the directory it runs in.
pub struct Invocation {
    pub command_line: String,
    pub cwd: PathBuf,
}

/// Build the invocation for one lint request.
pub fn build_invocation(settings: &LinterSettings, documents: &[PathBuf]) -> Invocation {
    let mut parts: Vec<String> = vec![compiler_program(&settings.path)];
    if let Some(lst) = settings.lst_files.first() {
        parts.push("-f".into());
        parts.push(lst.clone());
    }
    if let Some(log) = settings.compile_file.as_deref().filter(|s| !s.is_empty()) {
        parts.push("-l".into());
        parts.push(log.to_string());
    }
    if let Some(work) = settings.work_dir.as_deref().filter(|s| !s.is_empty()) {
        parts.push("-work".into());
        parts.push(work.to_string());
    }
    parts.push("-sv".into());
    parts.extend(settings.incdirs.iter().map(|d| format!("+incdir+{}", d)));
    let args = settings.arguments.trim();
    if !args.is_empty() {
        parts.push(args.to_string());
    }
    if settings.lst_files.is_empty() {
        parts.extend(documents.iter().map(|d| shell_quote(d)));
    }
    Invocation {
        command_line: parts.join(" "),
        cwd: settings.run_location(),
    }
}

/// `path` is a prefix; a separator is added only when it is missing.
fn compiler_program(path: &str) -> String {
    let path = path.trim();
    if path.is_empty() || path.ends_with('/') || path.ends_with('\\') {
        format!("{}{}", path, COMPILER)
    } else {
        format!("{}/{}", path, COMPILER)
    }
}

fn shell_quote(p: &Path) -> String {
    let s = p.to_string_lossy();
    if cfg!(windows) {
        quote_cmd(&s)
    } else {
        quote_posix(&s)
    }
}

/// Single-quote for `sh`, closing and escaping any embedded `'`.
fn quote_posix(s: &str) -> String {
    let safe = |c: char| c.is_ascii_alphanumeric() || "_-./:+=,@%".contains(c);
    if !s.is_empty() && s.chars().all(safe) {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Double-quote for `cmd.exe` when the path holds whitespace or operators.
/// `"` cannot occur in Windows file names.
fn quote_cmd(s: &str) -> String {
    if !s.is_empty() && !s.chars().any(|c| c.is_whitespace() || "&|<>^()%!".contains(c)) {
        return s.to_string();
    }
    format!("\"{}\"", s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_command_with_list_file() {
        let mut s = LinterSettings::new("/ws");
        s.lst_files = vec!["./tb_files.lst".into(), "./ignored.lst".into()];
        s.compile_file = Some("./compile.log".into());
        s.incdirs = vec!["../tb/base_vc".into(), "../tb/number_vc".into(), "/tb".into()];
        s.build_dir = Some(PathBuf::from("sim"));
        let inv = build_invocation(&s, &[PathBuf::from("rtl/top.sv")]);
        assert_eq!(
            inv.command_line,
            "vlog -f ./tb_files.lst -l ./compile.log -sv +incdir+../tb/base_vc +incdir+../tb/number_vc +incdir+/tb"
        );
        assert_eq!(inv.cwd, PathBuf::from("/ws/sim"));
    }

    #[test]
    fn test_minimal_command_appends_documents() {
        let mut s = LinterSettings::new("/ws");
        s.path = "/opt/questa/bin".into();
        s.arguments = "  -lint -pedanticerrors ".into();
        let inv = build_invocation(
            &s,
            &[PathBuf::from("rtl/top.sv"), PathBuf::from("my dir/a.sv")],
        );
        let spaced = if cfg!(windows) {
            "\"my dir/a.sv\""
        } else {
            "'my dir/a.sv'"
        };
        assert_eq!(
            inv.command_line,
            format!("/opt/questa/bin/vlog -sv -lint -pedanticerrors rtl/top.sv {}", spaced)
        );
        assert_eq!(inv.cwd, PathBuf::from("/ws"));
    }

    #[test]
    fn test_path_prefix_and_work_library() {
        let mut s = LinterSettings::new("/ws");
        s.path = "C:\\questa\\win64\\".into();
        s.work_dir = Some("work".into());
        s.lst_files = vec!["files.f".into()];
        let inv = build_invocation(&s, &[]);
        assert_eq!(
            inv.command_line,
            "C:\\questa\\win64\\vlog -f files.f -work work -sv"
        );
    }

    #[test]
    fn test_no_work_flag_without_work_dir() {
        let mut s = LinterSettings::new("/ws");
        s.lst_files = vec!["files.f".into()];
        let inv = build_invocation(&s, &[]);
        assert!(!inv.command_line.contains("-work"));
        s.work_dir = Some(String::new());
        assert!(!build_invocation(&s, &[]).command_line.contains("-work"));
    }

    #[test]
    fn test_posix_quoting_of_metacharacters() {
        assert_eq!(quote_posix("/ws/rtl/top.sv"), "/ws/rtl/top.sv");
        assert_eq!(quote_posix("/ws/a b.sv"), "'/ws/a b.sv'");
        assert_eq!(quote_posix("/ws/$x;rm.sv"), "'/ws/$x;rm.sv'");
        assert_eq!(quote_posix("/ws/it's.sv"), r"'/ws/it'\''s.sv'");
        assert_eq!(quote_posix("a&b\"c.sv"), "'a&b\"c.sv'");
    }

    #[test]
    fn test_cmd_quoting() {
        assert_eq!(quote_cmd("C:\\ws\\top.sv"), "C:\\ws\\top.sv");
        assert_eq!(quote_cmd("C:\\my dir\\a.sv"), "\"C:\\my dir\\a.sv\"");
        assert_eq!(quote_cmd("C:\\a&b.sv"), "\"C:\\a&b.sv\"");
    }

    #[cfg(unix)]
    #[test]
    fn test_quoted_path_reaches_shell_intact() {
        let dir = tempfile::tempdir().unwrap();
        let weird = dir.path().join("it's $HOME; a.sv");
        std::fs::write(&weird, "module m; endmodule\n").unwrap();
        let out = std::process::Command::new("sh")
            .args(["-c", &format!("cat {}", shell_quote(&weird))])
            .output()
            .unwrap();
        assert!(out.status.success());
        assert_eq!(String::from_utf8_lossy(&out.stdout), "module m; endmodule\n");
    }
}
