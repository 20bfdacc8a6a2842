mod common;

use common::{analyze_source, codes_of, diagnostics};
use swz_common::diagnostics::{DiagnosticSeverity, diagnostic_codes as codes};

#[test]
fn import_analyzes_cleanly() {
    assert!(diagnostics("import Foundation").is_empty());
}

#[test]
fn typed_array_binding_analyzes_cleanly() {
    assert!(diagnostics("let a : Int[] = [1, 2, 3]").is_empty());
    assert!(diagnostics("let a : Array<Int> = [1, 2, 3]").is_empty());
}

#[test]
fn protocol_stored_var_is_rejected() {
    let diags = diagnostics("protocol P {\n    var a : Int = 3\n}");
    assert_eq!(codes_of(&diags), vec![codes::E_PROTOCOL_VAR_MUST_BE_COMPUTED_PROPERTY]);
}

#[test]
fn protocol_let_constant_is_rejected() {
    let diags = diagnostics("protocol P {\n    let a : Int = 3\n}");
    assert_eq!(codes_of(&diags), vec![codes::E_PROTOCOL_CANNOT_DEFINE_LET_CONSTANT]);
}

#[test]
fn unimplemented_protocol_function_is_reported_with_names() {
    let diags = diagnostics("protocol P {\n    func f()\n}\nclass C : P {\n}");
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags[0].code,
        codes::E_TYPE_DOES_NOT_CONFORM_TO_PROTOCOL_UNIMPLEMENTED_FUNCTION_3
    );
    assert_eq!(diags[0].args, vec!["C", "P", "f"]);
}

#[test]
fn tuple_pattern_against_non_tuple_type_is_rejected() {
    let diags = diagnostics("let (a, b) : Int = (1, 2)");
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags[0].code,
        codes::E_TUPLE_PATTERN_CANNOT_MATCH_VALUES_OF_THE_NON_TUPLE_TYPE_A_1
    );
    assert_eq!(diags[0].args, vec!["Int"]);
}

#[test]
fn tuple_pattern_destructuring_produces_leaf_bindings() {
    let analyzed = analyze_source("let (a, (b, c)) = (1, (2, 3))");
    assert!(analyzed.result.diagnostics.is_empty());
    let expansions: Vec<_> = analyzed
        .result
        .annotations
        .tuple_expansions
        .values()
        .flatten()
        .collect();
    assert_eq!(expansions.len(), 3);
    let chains: Vec<(String, Vec<usize>)> = {
        let mut v: Vec<(String, Vec<usize>)> = expansions
            .iter()
            .map(|e| (e.name.clone(), e.indices.clone()))
            .collect();
        v.sort();
        v
    };
    assert_eq!(
        chains,
        vec![
            ("a".to_string(), vec![0]),
            ("b".to_string(), vec![1, 0]),
            ("c".to_string(), vec![1, 1]),
        ]
    );
    // Every leaf shares the same compiler temporary.
    let temps: Vec<&str> = expansions.iter().map(|e| e.temp.as_str()).collect();
    assert!(temps.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn nested_var_in_let_pattern_is_rejected() {
    let diags = diagnostics("let (a, var b) = (1, 2)");
    assert!(codes_of(&diags)
        .contains(&codes::E_VARLET_CANNOT_APPEAR_INSIDE_ANOTHER_VAR_OR_LET_PATTERN_1));
}

#[test]
fn unresolved_identifier_is_reported() {
    let diags = diagnostics("let x = y");
    assert_eq!(codes_of(&diags), vec![codes::E_USE_OF_UNRESOLVED_IDENTIFIER_1]);
    assert_eq!(diags[0].args, vec!["y"]);
}

#[test]
fn undeclared_type_is_reported() {
    let diags = diagnostics("let x : Foo = 1");
    assert!(codes_of(&diags).contains(&codes::E_USE_OF_UNDECLARED_TYPE_1));
}

#[test]
fn generic_arity_mismatches_are_reported() {
    let diags = diagnostics("let a : Array<Int, Int> = []");
    assert!(codes_of(&diags)
        .contains(&codes::E_GENERIC_TYPE_SPECIALIZED_WITH_TOO_MANY_TYPE_PARAMETERS_3));
    let with_args: Vec<&String> = diags[0].args.iter().collect();
    assert_eq!(with_args, vec!["Array", "2", "1"]);

    let diags = diagnostics("let a : Dictionary<Int> = [:]");
    assert!(codes_of(&diags)
        .contains(&codes::E_GENERIC_TYPE_SPECIALIZED_WITH_INSUFFICIENT_TYPE_PARAMETERS_3));

    let diags = diagnostics("let a : Array = []");
    assert!(codes_of(&diags).contains(&codes::E_GENERIC_TYPE_ARGUMENT_REQUIRED_1));

    let diags = diagnostics("let a : Bool<Int> = true");
    assert!(codes_of(&diags).contains(&codes::E_CANNOT_SPECIALIZE_NON_GENERIC_TYPE_1));
}

#[test]
fn duplicate_type_declaration_is_invalid_redeclaration() {
    let diags = diagnostics("struct S {\n}\nstruct S {\n}");
    assert!(codes_of(&diags).contains(&codes::E_INVALID_REDECLARATION_1));
}

#[test]
fn duplicate_binding_is_a_definition_conflict() {
    let diags = diagnostics("let a = 1\nlet a = 2");
    assert_eq!(codes_of(&diags), vec![codes::E_DEFINITION_CONFLICT_1]);
}

#[test]
fn superclass_must_come_first_in_inheritance_clause() {
    let source = "protocol P {\n}\nclass B {\n}\nclass C : P, B {\n}";
    let diags = diagnostics(source);
    assert!(codes_of(&diags)
        .contains(&codes::E_SUPERCLASS_MUST_APPEAR_FIRST_IN_INHERITANCE_CLAUSE_1));
}

#[test]
fn struct_cannot_inherit_from_struct() {
    let diags = diagnostics("struct A {\n}\nstruct B : A {\n}");
    assert!(codes_of(&diags)
        .contains(&codes::E_INHERITANCE_FROM_NON_PROTOCOL_NON_CLASS_TYPE_1));
}

#[test]
fn forward_references_resolve_through_lazy_declaration() {
    let source = "let p = Point()\nstruct Point {\n    var x : Int = 0\n}";
    let analyzed = analyze_source(source);
    assert!(analyzed.result.diagnostics.is_empty());
    assert_eq!(common::binding_type_name(&analyzed, "p"), "Point");
}

#[test]
fn class_without_initializer_and_undefaulted_fields_is_reported() {
    let diags = diagnostics("class C {\n    var x : Int\n}");
    assert!(codes_of(&diags).contains(&codes::E_CLASS_HAS_NO_INITIALIZERS_1));

    // Defaults or an explicit init silence it.
    assert!(diagnostics("class C {\n    var x : Int = 0\n}").is_empty());
    assert!(
        diagnostics("class C {\n    var x : Int\n    init(x : Int) {\n        self.x = x\n    }\n}")
            .is_empty()
    );
}

#[test]
fn redundant_external_parameter_name_warns() {
    let analyzed = analyze_source("func f(a a : Int) {\n}");
    assert_eq!(analyzed.result.diagnostics.len(), 1);
    let d = &analyzed.result.diagnostics[0];
    assert_eq!(d.code, codes::W_PARAM_CAN_BE_EXPRESSED_MORE_SUCCINCTLY_1);
    assert_eq!(d.severity, DiagnosticSeverity::Warning);
}

#[test]
fn inout_parameters_cannot_be_variadic() {
    let diags = diagnostics("func f(inout a : Int...) {\n}");
    assert!(codes_of(&diags).contains(&codes::E_INOUT_ARGUMENTS_CANNOT_BE_VARIADIC));
}
