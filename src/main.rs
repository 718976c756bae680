//! vlint CLI binary entry point.
//! Delegates to the library for linting and prints results.

use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use vlint::cli::{Cli, Commands};
use vlint::config::{self, ConfigFileSettings, Effective, Overrides};
use vlint::host::DiagnosticCollection;
use vlint::runner::ShellRunner;
use vlint::{command, lint, output, utils, OutputParser};

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", utils::error_prefix(), msg);
    std::process::exit(2);
}

fn resolve(ov: &Overrides) -> Effective {
    let eff = config::resolve_effective(ov).unwrap_or_else(|e| fail(e));
    if !eff.config_found {
        eprintln!(
            "{} No vlint.toml found; using defaults.",
            utils::note_prefix()
        );
    }
    eff
}

fn finish(sink: &DiagnosticCollection, eff: &Effective) {
    let cwd = std::env::current_dir().unwrap_or_else(|_| eff.workspace_root.clone());
    let res = sink.to_result(|p| display_path(&cwd, p));
    output::print_lint(&res, &eff.output);
    if res.summary.errors > 0 {
        std::process::exit(1);
    }
}

fn display_path(cwd: &Path, p: &Path) -> String {
    if p.is_absolute() {
        utils::rel_to(cwd, p)
    } else {
        p.to_string_lossy().to_string()
    }
}

fn main() {
    let cli = Cli::parse();
    cli.init_logging();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint {
            compiler,
            output,
            files,
        } => {
            let ov = compiler.overrides(output.as_deref());
            let eff = resolve(&ov);
            let docs = config::collect_documents(&eff, &files).unwrap_or_else(|e| fail(e));
            let provider = ConfigFileSettings::new(ov);
            let mut sink = DiagnosticCollection::new();
            if let Err(e) = lint::run_lint(&provider, &ShellRunner, &docs, &mut sink) {
                fail(e);
            }
            finish(&sink, &eff);
        }
        Commands::Parse {
            workspace_root,
            document,
            input,
            output,
        } => {
            let ov = Overrides {
                workspace_root,
                output,
                ..Overrides::default()
            };
            let eff = resolve(&ov);
            let stdout = match input.as_deref() {
                Some(path) => std::fs::read_to_string(path)
                    .unwrap_or_else(|e| fail(format!("failed to read {}: {}", path, e))),
                None => {
                    let mut s = String::new();
                    if let Err(e) = std::io::stdin().read_to_string(&mut s) {
                        fail(format!("failed to read stdin: {}", e));
                    }
                    s
                }
            };
            let parser =
                OutputParser::new(&eff.settings.extensions).unwrap_or_else(|e| fail(e));
            let mut sink = DiagnosticCollection::new();
            lint::publish_output(&parser, &stdout, &[PathBuf::from(document)], &mut sink);
            finish(&sink, &eff);
        }
        Commands::Command { compiler, files } => {
            let eff = resolve(&compiler.overrides(None));
            let docs = config::resolve_cli_files(&files);
            let inv = command::build_invocation(&eff.settings, &docs);
            println!("{}", inv.command_line);
            eprintln!(
                "{} runs in {}",
                utils::info_prefix(),
                inv.cwd.to_string_lossy()
            );
        }
    }
}
