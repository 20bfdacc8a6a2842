mod common;

use common::{codes_of, diagnostics};
use swz_common::diagnostics::diagnostic_codes as codes;

#[test]
fn let_cannot_be_reassigned_after_initialization() {
    let diags = diagnostics("let a = 1\na = 2");
    assert_eq!(codes_of(&diags), vec![codes::E_CANNOT_ASSIGN_TO_A_IN_B_2]);
    assert_eq!(diags[0].args[0], "a");
}

#[test]
fn var_can_be_reassigned() {
    assert!(diagnostics("var a = 1\na = 2\na = 3").is_empty());
}

#[test]
fn let_used_within_its_own_initial_value_is_reported() {
    let diags = diagnostics("let x = x + 1");
    assert!(codes_of(&diags).contains(&codes::E_USE_OF_INITIALIZING_VARIABLE_1));
    assert_eq!(diags[0].args, vec!["x"]);
}

#[test]
fn reading_an_uninitialized_binding_is_reported() {
    let diags = diagnostics("let a : Int\nlet b = a");
    assert_eq!(codes_of(&diags), vec![codes::E_USE_OF_UNINITIALIZED_VARIABLE_1]);
    assert_eq!(diags[0].args, vec!["a"]);
}

#[test]
fn deferred_initialization_of_a_let_is_allowed_once() {
    assert!(diagnostics("let a : Int\na = 1\nlet b = a").is_empty());
}

#[test]
fn second_assignment_to_a_deferred_let_is_rejected() {
    let diags = diagnostics("let a : Int\na = 1\na = 2");
    assert_eq!(codes_of(&diags), vec![codes::E_CANNOT_ASSIGN_TO_A_IN_B_2]);
}

#[test]
fn initialization_on_both_branches_counts() {
    let source = "let a : Int\n\
                  if true {\n    a = 1\n} else {\n    a = 2\n}\n\
                  let b = a";
    assert!(diagnostics(source).is_empty());
}

#[test]
fn initialization_on_one_branch_only_does_not_count() {
    let source = "let a : Int\n\
                  if true {\n    a = 1\n}\n\
                  let b = a";
    let diags = diagnostics(source);
    assert!(codes_of(&diags).contains(&codes::E_USE_OF_UNINITIALIZED_VARIABLE_1));
}

#[test]
fn branch_local_initialization_does_not_leak_into_the_sibling_branch() {
    // Both branches may initialize the same `let`; neither sees the other.
    let source = "let a : Int\n\
                  if true {\n    a = 1\n} else {\n    a = 2\n}";
    assert!(diagnostics(source).is_empty());
}

#[test]
fn assignment_after_branch_initialization_is_rejected_for_let() {
    let source = "let a : Int\n\
                  if true {\n    a = 1\n} else {\n    a = 2\n}\n\
                  a = 3";
    let diags = diagnostics(source);
    assert_eq!(codes_of(&diags), vec![codes::E_CANNOT_ASSIGN_TO_A_IN_B_2]);
}

#[test]
fn loop_body_initialization_does_not_count() {
    let source = "let a : Int\n\
                  while true {\n    a = 1\n}\n\
                  let b = a";
    let diags = diagnostics(source);
    assert!(codes_of(&diags).contains(&codes::E_USE_OF_UNINITIALIZED_VARIABLE_1));
}

#[test]
fn function_parameters_are_initialized() {
    assert!(diagnostics("func f(a : Int) -> Int {\n    return a + 1\n}").is_empty());
}
