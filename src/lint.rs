//! Lint request orchestration.
//!
//! One request takes a fresh settings snapshot, runs the compiler once, then
//! parses its stdout separately for every requested document and publishes
//! each list, replacing whatever the sink held for that document.

use crate::command::build_invocation;
use crate::error::Result;
use crate::host::{DiagnosticSink, SettingsProvider};
use crate::models::Diagnostic;
use crate::parser::OutputParser;
use crate::runner::CompilerRunner;
use log::info;
use rayon::prelude::*;
use std::path::PathBuf;

/// Run one lint request over `documents`.
///
/// Returns the number of diagnostics published across all documents.
pub fn run_lint<P, R, S>(
    provider: &P,
    runner: &R,
    documents: &[PathBuf],
    sink: &mut S,
) -> Result<usize>
where
    P: SettingsProvider + ?Sized,
    R: CompilerRunner + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    info!("questasim lint requested");
    let settings = provider.settings()?;
    let parser = OutputParser::new(&settings.extensions)?;
    let invocation = build_invocation(&settings, documents);
    let output = runner.run(&invocation);
    Ok(publish_output(&parser, &output.stdout, documents, sink))
}

/// Parse already captured compiler stdout for each document and publish it.
pub fn publish_output<S>(
    parser: &OutputParser,
    stdout: &str,
    documents: &[PathBuf],
    sink: &mut S,
) -> usize
where
    S: DiagnosticSink + ?Sized,
{
    let per_doc: Vec<(&PathBuf, Vec<Diagnostic>)> = documents
        .par_iter()
        .map(|doc| (doc, parser.parse_output(stdout, doc)))
        .collect();
    let mut total = 0usize;
    for (doc, diagnostics) in per_doc {
        total += diagnostics.len();
        sink.publish(doc, diagnostics);
    }
    info!("{} errors/warnings returned", total);
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Invocation;
    use crate::host::DiagnosticCollection;
    use crate::models::settings::LinterSettings;
    use crate::models::Severity;
    use crate::runner::CompilerOutput;
    use std::path::Path;
    use std::sync::Mutex;

    struct Fixed(LinterSettings);

    impl SettingsProvider for Fixed {
        fn settings(&self) -> Result<LinterSettings> {
            Ok(self.0.clone())
        }
    }

    struct FakeCompiler {
        stdout: &'static str,
        seen: Mutex<Vec<Invocation>>,
    }

    impl FakeCompiler {
        fn new(stdout: &'static str) -> Self {
            Self {
                stdout,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl CompilerRunner for FakeCompiler {
        fn run(&self, invocation: &Invocation) -> CompilerOutput {
            self.seen.lock().unwrap().push(invocation.clone());
            CompilerOutput {
                stdout: self.stdout.to_string(),
                stderr: String::new(),
                status: Some(2),
            }
        }
    }

    const STDOUT: &str = "\
QuestaSim-64 vlog 2021.1 Compiler 2021.01 Jan 19 2021
-- Compiling module alu
** Error: ../rtl/alu.sv(12): (vlog-2730) Undefined variable: 'carry'.
** Warning: ../rtl/top.sv(3:5): (vlog-2583) Extra checking for conflicts.
** Error: ../rtl/top.sv(40): near \"endmodule\": syntax error, unexpected endmodule.
** Fatal: Unexpected signal: 11.
End time: 10:00:00 on Jan 01,2024, Elapsed time: 0:00:01
Errors: 2, Warnings: 1
";

    #[test]
    fn test_single_run_publishes_per_document() {
        let mut settings = LinterSettings::new("/ws");
        settings.lst_files = vec!["files.f".into()];
        let compiler = FakeCompiler::new(STDOUT);
        let docs = vec![PathBuf::from("rtl/top.sv"), PathBuf::from("rtl/alu.sv")];
        let mut sink = DiagnosticCollection::new();

        let total = run_lint(&Fixed(settings), &compiler, &docs, &mut sink).unwrap();

        let seen = compiler.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].command_line, "vlog -f files.f -sv");

        let top = sink.get(Path::new("rtl/top.sv")).unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].severity, Severity::Warning);
        assert_eq!((top[0].start_line, top[0].end_line), (2, 4));
        assert_eq!(top[1].severity, Severity::Error);
        assert_eq!(top[1].start_line, 39);
        // the unparseable fatal line lands on both documents
        assert_eq!(top[2].severity, Severity::Information);

        let alu = sink.get(Path::new("rtl/alu.sv")).unwrap();
        assert_eq!(alu.len(), 2);
        assert_eq!(alu[0].start_line, 11);
        assert_eq!(total, 5);
    }

    #[test]
    fn test_empty_output_clears_previous_diagnostics() {
        let doc = PathBuf::from("top.sv");
        let mut sink = DiagnosticCollection::new();
        sink.publish(
            &doc,
            vec![Diagnostic::new(Severity::Error, &doc, 0, 0, "stale")],
        );
        let compiler = FakeCompiler::new("");
        let total = run_lint(
            &Fixed(LinterSettings::new("/ws")),
            &compiler,
            &[doc.clone()],
            &mut sink,
        )
        .unwrap();
        assert_eq!(total, 0);
        assert!(sink.get(&doc).unwrap().is_empty());
    }
}
