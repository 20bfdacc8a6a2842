//! Print/parse round-trips: for every accepted input, serializing the AST
//! and re-parsing yields a structurally identical tree, and printing is
//! idempotent under a second application.

use swz_parser::parse;
use swz_parser::printer::print_program;

fn assert_roundtrip(source: &str) {
    let (first, diagnostics) = parse(source, "test.sw");
    assert!(
        diagnostics.is_empty(),
        "seed input did not parse cleanly: {source:?}: {diagnostics:?}"
    );
    let printed = print_program(&first);
    let (second, diagnostics) = parse(&printed, "test.sw");
    assert!(
        diagnostics.is_empty(),
        "printed form did not parse cleanly:\n{printed}\n{diagnostics:?}"
    );
    let reprinted = print_program(&second);
    assert_eq!(
        printed, reprinted,
        "printing is not idempotent for {source:?}"
    );
}

#[test]
fn expressions_round_trip() {
    assert_roundtrip("a + b * c");
    assert_roundtrip("a ? b : c");
    assert_roundtrip("x?.y!.z");
    assert_roundtrip("-x + !y");
    assert_roundtrip("f(1, label: 2)[3].member");
    assert_roundtrip("(a, b).0");
    assert_roundtrip("[1, 2, 3]");
    assert_roundtrip("[\"k\" : 1]");
    assert_roundtrip("x is Int");
    assert_roundtrip("x as? String");
    assert_roundtrip("\"a\\(1 + 2)b\"");
}

#[test]
fn declarations_round_trip() {
    assert_roundtrip("import Foundation");
    assert_roundtrip("import class Foundation.NSFileManager");
    assert_roundtrip("let a : Int[] = [1, 2, 3]");
    assert_roundtrip("var x = 1, y : Double = 2.5");
    assert_roundtrip("typealias Pair = (Int, Int)");
    assert_roundtrip("func add(a : Int, b : Int) -> Int {\n    return a + b\n}");
    assert_roundtrip("func greet(name s : String) {\n    f(s)\n}");
    assert_roundtrip("struct Point {\n    var x : Int = 0\n    var y : Int = 0\n}");
    assert_roundtrip("class Shape : Drawable {\n    func draw() {\n    }\n}");
    assert_roundtrip("protocol P {\n    func f() -> Int\n}");
    assert_roundtrip("enum Direction {\n    case North\n    case South\n}");
    assert_roundtrip("extension Int : P {\n    func f() -> Int {\n        return self\n    }\n}");
    assert_roundtrip("operator infix ** { associativity right precedence 160 }");
}

#[test]
fn statements_round_trip() {
    assert_roundtrip("if a {\n    f()\n} else if b {\n    g()\n} else {\n    h()\n}");
    assert_roundtrip("while x < 10 {\n    x = x + 1\n}");
    assert_roundtrip("repeat {\n    f()\n} while x");
    assert_roundtrip("for x in items {\n    f(x)\n}");
    assert_roundtrip("outer: while a {\n    break outer\n}");
    assert_roundtrip("switch v {\ncase .Some(let x):\n    f(x)\ndefault:\n    g()\n}");
    assert_roundtrip("return");
}

#[test]
fn generic_types_round_trip() {
    assert_roundtrip("let a : Array<Array<Int>> = []");
    assert_roundtrip("let d : [String : Int] = [:]");
    assert_roundtrip("let f : (Int, Int) -> Int = add");
    assert_roundtrip("let o : Int?? = nil");
    assert_roundtrip("func first<T : Comparable>(items : Array<T>) -> T? {\n    return nil\n}");
    assert_roundtrip("let p : protocol<P, Q>");
}
