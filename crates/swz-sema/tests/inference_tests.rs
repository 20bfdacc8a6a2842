mod common;

use common::{analyze_source, binding_type_name, codes_of, diagnostics};
use swz_common::diagnostics::diagnostic_codes as codes;

#[test]
fn literals_default_to_canonical_types() {
    let analyzed = analyze_source(
        "let a = 1\nlet b = 2.5\nlet c = \"s\"\nlet d = true\nlet e = (1, true)",
    );
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(binding_type_name(&analyzed, "a"), "Int");
    assert_eq!(binding_type_name(&analyzed, "b"), "Double");
    assert_eq!(binding_type_name(&analyzed, "c"), "String");
    assert_eq!(binding_type_name(&analyzed, "d"), "Bool");
    assert_eq!(binding_type_name(&analyzed, "e"), "(Int, Bool)");
}

#[test]
fn integer_literal_adopts_contextual_numeric_type() {
    let analyzed = analyze_source("let a : Double = 1\nlet b : Int8 = 1");
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(binding_type_name(&analyzed, "a"), "Double");
    assert_eq!(binding_type_name(&analyzed, "b"), "Int8");
}

#[test]
fn collection_literals_infer_element_types() {
    let analyzed = analyze_source("let xs = [1, 2, 3]\nlet d = [\"k\" : 1]");
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(binding_type_name(&analyzed, "xs"), "Array<Int>");
    assert_eq!(binding_type_name(&analyzed, "d"), "Dictionary<String, Int>");
}

#[test]
fn empty_collections_take_the_contextual_type() {
    let analyzed = analyze_source("let xs : Array<Int> = []\nlet d : Dictionary<String, Int> = [:]");
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(binding_type_name(&analyzed, "xs"), "Array<Int>");
    assert_eq!(binding_type_name(&analyzed, "d"), "Dictionary<String, Int>");
}

#[test]
fn binary_operators_resolve_over_builtin_overloads() {
    let analyzed = analyze_source("let a = 1 + 2\nlet b = 1.5 + 2.5\nlet c = 1 < 2\nlet d = true && false");
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(binding_type_name(&analyzed, "a"), "Int");
    assert_eq!(binding_type_name(&analyzed, "b"), "Double");
    assert_eq!(binding_type_name(&analyzed, "c"), "Bool");
    assert_eq!(binding_type_name(&analyzed, "d"), "Bool");
}

#[test]
fn prefix_operators_resolve_by_fixity() {
    let analyzed = analyze_source("let a = -3\nlet b = !true");
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(binding_type_name(&analyzed, "a"), "Int");
    assert_eq!(binding_type_name(&analyzed, "b"), "Bool");
}

#[test]
fn overload_resolution_prefers_exact_matches() {
    let source = "func f(x : Int) -> Int {\n    return x\n}\n\
                  func f(x : Double) -> Double {\n    return x\n}\n\
                  let r = f(1)\nlet s = f(2.5)";
    let analyzed = analyze_source(source);
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(binding_type_name(&analyzed, "r"), "Int");
    assert_eq!(binding_type_name(&analyzed, "s"), "Double");
}

#[test]
fn overload_resolution_is_deterministic_across_runs() {
    let source = "func f(x : Int) -> Int {\n    return x\n}\n\
                  func f(x : Double) -> Double {\n    return x\n}\n\
                  let r = f(1)";
    for _ in 0..4 {
        let analyzed = analyze_source(source);
        assert!(analyzed.result.diagnostics.is_empty());
        assert_eq!(binding_type_name(&analyzed, "r"), "Int");
    }
}

#[test]
fn equal_fit_scores_are_ambiguous() {
    let source = "func g(x : Int) -> Int {\n    return x\n}\n\
                  func g(x : Int) -> Double {\n    return 2.5\n}\n\
                  let r = g(1)";
    let diags = diagnostics(source);
    assert!(codes_of(&diags).contains(&codes::E_AMBIGUOUS_USE_1));
}

#[test]
fn external_argument_labels_must_match() {
    let source = "func greet(name s : String) -> String {\n    return s\n}\n\
                  let a = greet(name: \"x\")";
    assert!(diagnostics(source).is_empty());

    let source = "func greet(name s : String) -> String {\n    return s\n}\n\
                  let a = greet(\"x\")";
    let diags = diagnostics(source);
    assert!(codes_of(&diags).contains(&codes::E_CANNOT_INVOKE_A_WITH_AN_ARGUMENT_LIST_OF_TYPE_B_2));
}

#[test]
fn member_access_resolves_through_builtin_members() {
    let analyzed = analyze_source(
        "let ok = \"abc\".hasPrefix(\"a\")\nlet n = [1, 2].count\nlet v = [1, 2][0]",
    );
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(binding_type_name(&analyzed, "ok"), "Bool");
    assert_eq!(binding_type_name(&analyzed, "n"), "Int");
    assert_eq!(binding_type_name(&analyzed, "v"), "Int");
}

#[test]
fn dictionary_subscript_yields_an_optional() {
    let analyzed = analyze_source("let d = [\"k\" : 1]\nlet v = d[\"k\"]");
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(binding_type_name(&analyzed, "v"), "Optional<Int>");
}

#[test]
fn unknown_member_is_reported_with_type_and_name() {
    let diags = diagnostics("let x = \"abc\".missing");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, codes::E_DOES_NOT_HAVE_A_MEMBER_2);
    assert_eq!(diags[0].args, vec!["String", "missing"]);
}

#[test]
fn tuple_positional_access_takes_element_types() {
    let analyzed = analyze_source("let t = (1, true)\nlet a = t.0\nlet b = t.1");
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(binding_type_name(&analyzed, "a"), "Int");
    assert_eq!(binding_type_name(&analyzed, "b"), "Bool");
}

#[test]
fn generic_struct_members_specialize_per_instance() {
    let source = "struct Box<T> {\n    var value : T\n    func get() -> T {\n        return value\n    }\n}\n\
                  let b = Box<Int>(value: 1)\nlet v = b.get()\nlet w = b.value";
    let analyzed = analyze_source(source);
    assert!(
        analyzed.result.diagnostics.is_empty(),
        "{:?}",
        analyzed.result.diagnostics
    );
    assert_eq!(binding_type_name(&analyzed, "b"), "Box<Int>");
    assert_eq!(binding_type_name(&analyzed, "v"), "Int");
    assert_eq!(binding_type_name(&analyzed, "w"), "Int");
}

#[test]
fn memberwise_initializer_uses_field_labels_in_order() {
    let source = "struct Size {\n    var width : Int\n    var height : Int\n}\n\
                  let s = Size(width: 1, height: 2)";
    let analyzed = analyze_source(source);
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(binding_type_name(&analyzed, "s"), "Size");

    // Unlabeled arguments do not match the memberwise initializer.
    let source = "struct Size {\n    var width : Int\n    var height : Int\n}\n\
                  let s = Size(1, 2)";
    let diags = diagnostics(source);
    assert!(codes_of(&diags).contains(&codes::E_CANNOT_INVOKE_A_WITH_AN_ARGUMENT_LIST_OF_TYPE_B_2));
}

#[test]
fn fully_defaulted_struct_gets_a_zero_argument_initializer() {
    let source = "struct Point {\n    var x : Int = 0\n    var y : Int = 0\n}\nlet p = Point()";
    let analyzed = analyze_source(source);
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(binding_type_name(&analyzed, "p"), "Point");
}

#[test]
fn implicit_self_is_recorded_for_bare_member_reads() {
    let source = "class Counter {\n    var count : Int = 0\n    func bump() {\n        count = count + 1\n    }\n}";
    let analyzed = analyze_source(source);
    assert!(
        analyzed.result.diagnostics.is_empty(),
        "{:?}",
        analyzed.result.diagnostics
    );
    let selfs = analyzed
        .result
        .annotations
        .implicit_conversions
        .values()
        .filter(|c| matches!(c, swz_sema::ImplicitConversion::ImplicitSelf))
        .count();
    assert!(selfs >= 1, "expected an implicit-self annotation");
}

#[test]
fn extension_members_are_found_at_lookup_time() {
    let source = "extension Int {\n    func doubled() -> Int {\n        return self * 2\n    }\n}\n\
                  let x = 4.doubled()";
    let analyzed = analyze_source(source);
    assert!(
        analyzed.result.diagnostics.is_empty(),
        "{:?}",
        analyzed.result.diagnostics
    );
    assert_eq!(binding_type_name(&analyzed, "x"), "Int");
}

#[test]
fn methods_resolve_through_the_class_parent_chain() {
    let source = "class Base {\n    func ping() -> Int {\n        return 1\n    }\n}\n\
                  class Derived : Base {\n}\n\
                  let d = Derived()\nlet p = d.ping()";
    let analyzed = analyze_source(source);
    assert!(
        analyzed.result.diagnostics.is_empty(),
        "{:?}",
        analyzed.result.diagnostics
    );
    assert_eq!(binding_type_name(&analyzed, "p"), "Int");
}

#[test]
fn is_and_as_produce_bool_and_target_types() {
    let analyzed = analyze_source("let x = 1\nlet a = x is Int\nlet b = x as? Double");
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(binding_type_name(&analyzed, "a"), "Bool");
    assert_eq!(binding_type_name(&analyzed, "b"), "Optional<Double>");
}

#[test]
fn string_interpolation_is_a_string() {
    let analyzed = analyze_source("let n = 3\nlet s = \"n=\\(n + 1)\"");
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(binding_type_name(&analyzed, "s"), "String");
}

#[test]
fn user_operator_function_resolves_after_declaration() {
    let source = "operator infix ** { associativity right precedence 160 }\n\
                  func **(base : Int, power : Int) -> Int {\n    return 1\n}\n\
                  let r = 2 ** 3";
    let analyzed = analyze_source(source);
    assert!(
        analyzed.result.diagnostics.is_empty(),
        "{:?}",
        analyzed.result.diagnostics
    );
    assert_eq!(binding_type_name(&analyzed, "r"), "Int");
}
