//! Command-line driver.
//!
//! Reads one source file, runs the parser and semantic analyzer, and prints
//! the accumulated diagnostics. The core never aborts; the driver's exit
//! code reflects whether any errors were reported.

mod args;

use anyhow::Context;
use args::Args;
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use swz_common::diagnostics::{Diagnostic, DiagnosticSeverity};
use swz_common::position::LineMap;
use swz_sema::{SemanticAnalyzer, SymbolRegistry};

fn main() -> ExitCode {
    match run() {
        Ok(had_errors) => {
            if had_errors {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<bool> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let file_name = args.file.display().to_string();
    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read {file_name}"))?;

    let mut parser = swz_parser::ParserState::new(&file_name, &source);
    let program = parser.parse_source_file();
    let mut diagnostics = parser.take_diagnostics();

    if args.dump {
        print!("{}", swz_parser::printer::print_program(&program));
        return Ok(diagnostics.iter().any(Diagnostic::is_error));
    }

    let mut registry = SymbolRegistry::bootstrap();
    let mut analyzer = SemanticAnalyzer::new(&mut registry, &file_name);
    analyzer.run(&program);
    diagnostics.extend(analyzer.into_result().diagnostics);
    diagnostics.sort_by_key(|d| d.span.start);

    if args.quiet {
        diagnostics.retain(Diagnostic::is_error);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&diagnostics)?);
    } else {
        let line_map = LineMap::build(&source);
        for diag in &diagnostics {
            print_diagnostic(diag, &line_map, &source);
        }
    }
    Ok(diagnostics.iter().any(Diagnostic::is_error))
}

fn print_diagnostic(diag: &Diagnostic, line_map: &LineMap, source: &str) {
    let pos = line_map.line_col(diag.span.start, source);
    let severity = match diag.severity {
        DiagnosticSeverity::Fatal => "fatal".red().bold(),
        DiagnosticSeverity::Error => "error".red().bold(),
        DiagnosticSeverity::Warning => "warning".yellow().bold(),
        DiagnosticSeverity::Note => "note".cyan(),
    };
    eprintln!(
        "{}:{}: {severity}[{}]: {}",
        diag.file,
        pos,
        diag.code,
        diag.message_text()
    );
}
