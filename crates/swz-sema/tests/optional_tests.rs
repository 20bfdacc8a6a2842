mod common;

use common::{analyze_source, binding_type_name, codes_of, diagnostics};
use swz_common::diagnostics::diagnostic_codes as codes;
use swz_parser::ast::{Decl, Stmt};
use swz_sema::ImplicitConversion;

/// The implicit conversion recorded for the initializer of the n-th
/// top-level binding.
fn initializer_conversion(
    analyzed: &common::Analyzed,
    statement: usize,
) -> Option<ImplicitConversion> {
    let Stmt::Decl(decl) = &analyzed.program.statements[statement] else {
        panic!("expected declaration");
    };
    let Decl::Bindings(group) = decl.as_ref() else {
        panic!("expected bindings");
    };
    let init = group.bindings[0].initializer.as_ref().expect("initializer");
    analyzed
        .result
        .annotations
        .implicit_conversions
        .get(&init.id())
        .copied()
}

#[test]
fn expression_in_optional_context_wraps_once() {
    let analyzed = analyze_source("let x : Int? = 1");
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(binding_type_name(&analyzed, "x"), "Optional<Int>");
    assert_eq!(
        initializer_conversion(&analyzed, 0),
        Some(ImplicitConversion::OptionalWrap(1))
    );
}

#[test]
fn doubly_optional_context_wraps_twice() {
    let analyzed = analyze_source("let x : Int?? = 1");
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(
        binding_type_name(&analyzed, "x"),
        "Optional<Optional<Int>>"
    );
    assert_eq!(
        initializer_conversion(&analyzed, 0),
        Some(ImplicitConversion::OptionalWrap(2))
    );
}

#[test]
fn already_optional_expression_is_not_wrapped() {
    let analyzed = analyze_source("let x : Int? = 1\nlet y : Int? = x");
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(initializer_conversion(&analyzed, 1), None);
}

#[test]
fn optional_to_deeper_optional_wraps_the_difference() {
    let analyzed = analyze_source("let x : Int? = 1\nlet y : Int??? = x");
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(
        initializer_conversion(&analyzed, 1),
        Some(ImplicitConversion::OptionalWrap(2))
    );
}

#[test]
fn nil_takes_the_contextual_optional_type() {
    let analyzed = analyze_source("let x : Int? = nil");
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(binding_type_name(&analyzed, "x"), "Optional<Int>");
}

#[test]
fn nil_without_context_is_reported() {
    let diags = diagnostics("let x = nil");
    assert_eq!(codes_of(&diags), vec![codes::E_NIL_REQUIRES_CONTEXTUAL_TYPE]);
}

#[test]
fn optional_compares_against_nil() {
    let analyzed = analyze_source("let x : Int? = 1\nlet a = x == nil\nlet b = x != nil");
    assert!(
        analyzed.result.diagnostics.is_empty(),
        "{:?}",
        analyzed.result.diagnostics
    );
    assert_eq!(binding_type_name(&analyzed, "a"), "Bool");
    assert_eq!(binding_type_name(&analyzed, "b"), "Bool");
}

#[test]
fn forced_unwrap_yields_the_inner_type() {
    let analyzed = analyze_source("let x : Int? = 1\nlet y = x!");
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(binding_type_name(&analyzed, "y"), "Int");
}

#[test]
fn optional_wrapping_composes_with_function_arguments() {
    let source = "func take(x : Int?) -> Int {\n    return 1\n}\nlet r = take(5)";
    let analyzed = analyze_source(source);
    assert!(
        analyzed.result.diagnostics.is_empty(),
        "{:?}",
        analyzed.result.diagnostics
    );
    assert_eq!(binding_type_name(&analyzed, "r"), "Int");
}
