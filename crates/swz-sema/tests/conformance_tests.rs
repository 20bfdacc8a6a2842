mod common;

use common::{codes_of, diagnostics};
use swz_common::diagnostics::diagnostic_codes as codes;

#[test]
fn protocol_inheritance_declares_both_types() {
    assert!(diagnostics("protocol Base {\n}\nprotocol Child : Base {\n}").is_empty());
}

#[test]
fn method_requirement_implemented_is_clean() {
    let source = "protocol MyProtocol {\n    func test()\n}\n\
                  class Test : MyProtocol {\n    func test() {\n    }\n}";
    assert!(diagnostics(source).is_empty());
}

#[test]
fn method_requirement_missing_is_reported() {
    let source = "protocol MyProtocol {\n    func test()\n}\nclass Test : MyProtocol {\n}";
    let diags = diagnostics(source);
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags[0].code,
        codes::E_TYPE_DOES_NOT_CONFORM_TO_PROTOCOL_UNIMPLEMENTED_FUNCTION_3
    );
    assert_eq!(diags[0].args, vec!["Test", "MyProtocol", "test"]);
}

#[test]
fn method_requirement_with_wrong_signature_is_reported() {
    let source = "protocol MyProtocol {\n    func test() -> Int\n}\n\
                  class Test : MyProtocol {\n    func test() -> Bool {\n        return true\n    }\n}";
    let diags = diagnostics(source);
    assert!(codes_of(&diags)
        .contains(&codes::E_TYPE_DOES_NOT_CONFORM_TO_PROTOCOL_UNIMPLEMENTED_FUNCTION_3));
}

#[test]
fn property_requirement_missing_is_reported() {
    let source = "protocol P {\n    var a : Int { get }\n}\nclass C : P {\n}";
    let diags = diagnostics(source);
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags[0].code,
        codes::E_TYPE_DOES_NOT_CONFORM_TO_PROTOCOL_UNIMPLEMENTED_PROPERTY_3
    );
    assert_eq!(diags[0].args, vec!["C", "P", "a"]);
}

#[test]
fn property_requirement_satisfied_by_stored_property() {
    let source = "protocol P {\n    var a : Int { get }\n}\n\
                  class C : P {\n    var a : Int = 0\n}";
    assert!(diagnostics(source).is_empty());
}

#[test]
fn associated_type_requirement_satisfied_by_nested_type() {
    let source = "protocol MyProtocol {\n    typealias Element\n}\n\
                  class Test : MyProtocol {\n    class Element {\n    }\n}";
    assert!(diagnostics(source).is_empty());
}

#[test]
fn associated_type_requirement_missing_is_reported() {
    let source = "protocol MyProtocol {\n    typealias Element\n}\nclass Test : MyProtocol {\n}";
    let diags = diagnostics(source);
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags[0].code,
        codes::E_TYPE_DOES_NOT_CONFORM_TO_PROTOCOL_UNIMPLEMENTED_TYPE_3
    );
    assert_eq!(diags[0].args, vec!["Test", "MyProtocol", "Element"]);
}

#[test]
fn associated_type_default_in_protocol_is_not_a_requirement() {
    let source = "protocol MyProtocol {\n    typealias Element = Int\n}\n\
                  class Test : MyProtocol {\n}";
    assert!(diagnostics(source).is_empty());
}

#[test]
fn default_argument_in_protocol_method_is_rejected() {
    let source = "protocol R {\n    func random(a : Int = 3) -> Double\n}";
    let diags = diagnostics(source);
    assert_eq!(
        codes_of(&diags),
        vec![codes::E_DEFAULT_ARGUMENT_NOT_PERMITTED_IN_A_PROTOCOL_METHOD]
    );
}

#[test]
fn inherited_protocol_requirements_apply_transitively() {
    let source = "protocol Base {\n    func f()\n}\nprotocol Child : Base {\n}\n\
                  class C : Child {\n}";
    let diags = diagnostics(source);
    assert!(codes_of(&diags)
        .contains(&codes::E_TYPE_DOES_NOT_CONFORM_TO_PROTOCOL_UNIMPLEMENTED_FUNCTION_3));
}

#[test]
fn conformance_can_be_satisfied_through_an_extension() {
    let source = "protocol P {\n    func f()\n}\n\
                  extension Int : P {\n    func f() {\n    }\n}";
    assert!(diagnostics(source).is_empty());
}

#[test]
fn extension_conformance_failure_is_reported() {
    let source = "protocol P {\n    func f()\n}\nextension Int : P {\n}";
    let diags = diagnostics(source);
    assert!(codes_of(&diags)
        .contains(&codes::E_TYPE_DOES_NOT_CONFORM_TO_PROTOCOL_UNIMPLEMENTED_FUNCTION_3));
}

#[test]
fn generic_type_conforms_to_protocol_with_associated_type() {
    let source = "protocol Container {\n    typealias Item\n    func count() -> Int\n}\n\
                  struct Box<T> : Container {\n    typealias Item = T\n    func count() -> Int {\n        return 1\n    }\n}";
    let diags = diagnostics(source);
    assert!(diags.is_empty(), "{diags:?}");
}

#[test]
fn specialized_generic_still_conforms_via_its_base() {
    let source = "protocol Container {\n    func count() -> Int\n}\n\
                  struct Box<T> : Container {\n    func count() -> Int {\n        return 1\n    }\n}\n\
                  func use(c : Container) -> Int {\n    return c.count()\n}\n\
                  let b = Box<Int>()\nlet n = use(b)";
    let diags = diagnostics(source);
    assert!(diags.is_empty(), "{diags:?}");
}
