//! Compiler subprocess execution.
//!
//! The command line goes through the platform shell because user arguments
//! arrive as one free-form string. Launch failures and non-zero exits are
//! only logged: `vlog` exits non-zero whenever it reports errors, and the
//! parser runs over whatever stdout was captured either way.

use crate::command::Invocation;
use log::{debug, info, warn};
use std::process::{Command, Stdio};

/// Captured result of one compiler run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; `None` when the process could not be launched or was
    /// killed by a signal.
    pub status: Option<i32>,
}

/// Runs an invocation to completion and returns its output.
pub trait CompilerRunner {
    fn run(&self, invocation: &Invocation) -> CompilerOutput;
}

/// Runs invocations through `sh -c` (or `cmd /C` on Windows).
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    /// `cmd.exe` does not understand MSVC argument escaping, so the line is
    /// handed over untouched.
    #[cfg(windows)]
    fn command(command_line: &str) -> Command {
        use std::os::windows::process::CommandExt;
        let mut c = Command::new("cmd");
        c.arg("/C").raw_arg(command_line);
        c
    }

    #[cfg(not(windows))]
    fn command(command_line: &str) -> Command {
        let mut c = Command::new("sh");
        c.args(["-c", command_line]);
        c
    }
}

impl CompilerRunner for ShellRunner {
    fn run(&self, invocation: &Invocation) -> CompilerOutput {
        info!("{}", invocation.command_line);
        debug!("running in {}", invocation.cwd.display());
        let result = Self::command(&invocation.command_line)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();
        let output = match result {
            Ok(o) => o,
            Err(e) => {
                warn!("failed to launch compiler: {}", e);
                return CompilerOutput::default();
            }
        };
        let out = CompilerOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        };
        if !output.status.success() {
            debug!("compiler exited with {:?}", out.status);
        }
        if !out.stderr.trim().is_empty() {
            debug!("compiler stderr: {}", out.stderr.trim_end());
        }
        out
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_captures_stdout_and_status_in_cwd() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "").unwrap();
        let inv = Invocation {
            command_line: "ls; echo '** Error: top.sv(1): x'; exit 2".into(),
            cwd: dir.path().to_path_buf(),
        };
        let out = ShellRunner.run(&inv);
        assert!(out.stdout.contains("marker.txt"));
        assert!(out.stdout.contains("** Error: top.sv(1): x"));
        assert_eq!(out.status, Some(2));
    }

    #[test]
    fn test_missing_directory_yields_empty_output() {
        let inv = Invocation {
            command_line: "echo hi".into(),
            cwd: "/definitely/not/a/dir".into(),
        };
        let out = ShellRunner.run(&inv);
        assert!(out.stdout.is_empty());
        assert_eq!(out.status, None);
    }

    #[test]
    fn test_embedded_quotes_reach_the_program() {
        let dir = tempdir().unwrap();
        let inv = Invocation {
            command_line: "printf '%s|' +define+X=\"a b\" 'c d'".into(),
            cwd: dir.path().to_path_buf(),
        };
        let out = ShellRunner.run(&inv);
        assert_eq!(out.stdout, "+define+X=a b|c d|");
    }
}

#[cfg(all(test, windows))]
mod windows_tests {
    use super::*;

    #[test]
    fn test_cmd_line_passed_verbatim() {
        let line = "vlog -sv +define+X=\"a b\" \"C:\\my dir\\a.sv\"";
        let c = ShellRunner::command(line);
        let args: Vec<_> = c.get_args().collect();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0], "/C");
        assert_eq!(args[1], line);
    }
}
