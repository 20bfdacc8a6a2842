use swz_parser::ast::{
    BinaryOperator, Identifier, IntegerLiteral, Program, StringInterpolation, Visitor,
};
use swz_parser::parse;

#[derive(Default)]
struct Counter {
    identifiers: Vec<String>,
    integers: usize,
    binaries: usize,
}

impl Visitor for Counter {
    fn visit_identifier(&mut self, node: &Identifier) {
        self.identifiers.push(node.name.clone());
    }

    fn visit_integer_literal(&mut self, _node: &IntegerLiteral) {
        self.integers += 1;
    }

    fn visit_binary(&mut self, node: &BinaryOperator) {
        self.binaries += 1;
        // Keep the default traversal.
        self.visit_expr(&node.lhs);
        self.visit_expr(&node.rhs);
    }
}

fn count(source: &str) -> Counter {
    let (program, diags) = parse(source, "test.sw");
    assert!(diags.is_empty(), "{diags:?}");
    let mut counter = Counter::default();
    counter.visit_program(&program);
    counter
}

#[test]
fn visitor_reaches_every_expression_in_statements() {
    let counter = count("let a = x + y * 2\nif a {\n    f(b)\n}");
    assert_eq!(counter.identifiers, vec!["x", "y", "a", "f", "b"]);
    assert_eq!(counter.integers, 1);
    assert_eq!(counter.binaries, 2);
}

#[test]
fn visitor_descends_into_interpolations_and_closures() {
    let counter = count("let s = \"v=\\(n)\"\nlet f = { (a : Int) -> Int in\n    return a\n}");
    assert!(counter.identifiers.contains(&"n".to_string()));
    assert!(counter.identifiers.contains(&"a".to_string()));
}

#[derive(Default)]
struct SpanChecker {
    ok: bool,
}

impl Visitor for SpanChecker {
    fn visit_string_interpolation(&mut self, node: &StringInterpolation) {
        // Fragments and expressions alternate.
        self.ok = node.fragments.len() == node.exprs.len() + 1;
    }
}

#[test]
fn interpolation_invariant_holds() {
    let (program, _) = parse("\"a\\(1)b\\(2)c\"", "test.sw");
    let mut checker = SpanChecker::default();
    walk(&mut checker, &program);
    assert!(checker.ok);
}

fn walk(checker: &mut SpanChecker, program: &Program) {
    checker.visit_program(program);
}
