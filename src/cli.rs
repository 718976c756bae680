//! CLI argument parsing via `clap`.

use crate::config::Overrides;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vlint",
    version,
    about = "Questasim vlog diagnostics for Verilog/SystemVerilog",
    long_about = "vlint runs the Questasim/Modelsim `vlog` compiler and turns its messages into diagnostics for the files you are editing.\n\nConfiguration precedence: CLI > vlint.toml > defaults.",
    after_help = "Examples:\n  vlint lint rtl/top.sv\n  vlint lint --lst-file ./tb_files.lst --incdir ../tb/base_vc tb/testbench.sv\n  vlint parse --document tb/testbench.sv --input compile.out --output json\n  vlint command rtl/top.sv",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Args, Clone, Default)]
/// Settings shared by commands that build a compiler invocation.
pub struct CompilerArgs {
    #[arg(long, help = "Workspace root (default: current dir)")]
    pub workspace_root: Option<String>,
    #[arg(long, help = "Directory prefix of the vlog binary")]
    pub path: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Extra vlog arguments, passed verbatim")]
    pub args: Option<String>,
    #[arg(long, help = "Questasim work library (-work)")]
    pub work_dir: Option<String>,
    #[arg(long = "incdir", value_delimiter = ',', help = "Include directory (repeatable or comma-separated)")]
    pub incdirs: Vec<String>,
    #[arg(long, help = "File list passed as -f")]
    pub lst_file: Option<String>,
    #[arg(long, help = "Compile log passed as -l")]
    pub compile_file: Option<String>,
    #[arg(long, help = "Directory to run vlog in (default: workspace root)")]
    pub build_dir: Option<String>,
}

impl CompilerArgs {
    pub fn overrides(&self, output: Option<&str>) -> Overrides {
        Overrides {
            workspace_root: self.workspace_root.clone(),
            output: output.map(String::from),
            path: self.path.clone(),
            arguments: self.args.clone(),
            work_dir: self.work_dir.clone(),
            incdirs: self.incdirs.clone(),
            lst_file: self.lst_file.clone(),
            compile_file: self.compile_file.clone(),
            build_dir: self.build_dir.clone(),
        }
    }
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current vlint version.")]
    Version,
    /// Compile and report diagnostics
    #[command(
        about = "Run vlog and report diagnostics",
        long_about = "Run vlog once and report its messages for each given document. Messages about other files are dropped. Exits 1 when any error is reported.",
        after_help = "Examples:\n  vlint lint rtl/top.sv rtl/alu.sv\n  vlint lint --output json"
    )]
    Lint {
        #[command(flatten)]
        compiler: CompilerArgs,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(help = "Documents to lint (default: `documents` patterns from vlint.toml)")]
        files: Vec<String>,
    },
    /// Parse saved compiler output
    #[command(
        about = "Parse captured vlog output",
        long_about = "Read vlog stdout from a file (or stdin) and report the diagnostics for one document, without running the compiler."
    )]
    Parse {
        #[arg(long, help = "Workspace root (default: current dir)")]
        workspace_root: Option<String>,
        #[arg(long, help = "Document the diagnostics are for")]
        document: String,
        #[arg(long, help = "File holding vlog stdout (default: stdin)")]
        input: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Print the compiler command
    #[command(
        about = "Show the vlog command",
        long_about = "Print the command line and working directory `vlint lint` would use."
    )]
    Command {
        #[command(flatten)]
        compiler: CompilerArgs,
        #[arg(help = "Documents (appended only when no list file is configured)")]
        files: Vec<String>,
    },
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_flags_map_to_overrides() {
        let cli = Cli::try_parse_from([
            "vlint",
            "-vv",
            "lint",
            "--incdir",
            "a,b",
            "--incdir",
            "c",
            "--args",
            "-lint",
            "--lst-file",
            "files.f",
            "top.sv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.cmd {
            Commands::Lint {
                compiler,
                output,
                files,
            } => {
                let ov = compiler.overrides(output.as_deref());
                assert_eq!(ov.incdirs, vec!["a", "b", "c"]);
                assert_eq!(ov.arguments.as_deref(), Some("-lint"));
                assert_eq!(ov.lst_file.as_deref(), Some("files.f"));
                assert!(ov.output.is_none());
                assert_eq!(files, vec!["top.sv"]);
            }
            _ => panic!("expected lint"),
        }
    }

    #[test]
    fn test_parse_requires_document() {
        assert!(Cli::try_parse_from(["vlint", "parse"]).is_err());
    }
}
