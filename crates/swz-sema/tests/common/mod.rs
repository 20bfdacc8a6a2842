#![allow(dead_code)]

use swz_common::diagnostics::Diagnostic;
use swz_parser::ast::Program;
use swz_sema::{AnalysisResult, SemanticAnalyzer, SymbolRegistry};

pub struct Analyzed {
    pub program: Program,
    pub registry: SymbolRegistry,
    pub result: AnalysisResult,
}

/// Parse and analyze; the source must be syntactically clean.
pub fn analyze_source(source: &str) -> Analyzed {
    let (program, parse_diags) = swz_parser::parse(source, "test.sw");
    assert!(
        parse_diags.is_empty(),
        "unexpected parse diagnostics for {source:?}: {parse_diags:?}"
    );
    let mut registry = SymbolRegistry::bootstrap();
    let result = {
        let mut analyzer = SemanticAnalyzer::new(&mut registry, "test.sw");
        analyzer.run(&program);
        analyzer.into_result()
    };
    Analyzed {
        program,
        registry,
        result,
    }
}

pub fn diagnostics(source: &str) -> Vec<Diagnostic> {
    analyze_source(source).result.diagnostics
}

pub fn codes_of(diags: &[Diagnostic]) -> Vec<u32> {
    diags.iter().map(|d| d.code).collect()
}

/// The declared type of a file-scope binding, by name.
pub fn binding_type(analyzed: &Analyzed, name: &str) -> swz_sema::TypeId {
    let (sym, _) = analyzed
        .registry
        .lookup_symbol(name)
        .unwrap_or_else(|| panic!("binding {name} not found"));
    analyzed
        .registry
        .symbols
        .value_type(sym)
        .unwrap_or_else(|| panic!("{name} has no value type"))
}

pub fn binding_type_name(analyzed: &Analyzed, name: &str) -> String {
    let ty = binding_type(analyzed, name);
    analyzed.registry.types.display(ty)
}
