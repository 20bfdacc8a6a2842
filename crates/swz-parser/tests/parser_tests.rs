use swz_common::diagnostics::diagnostic_codes as codes;
use swz_parser::ast::*;
use swz_parser::{ParserState, parse};

fn parse_ok(source: &str) -> Program {
    let (program, diagnostics) = parse(source, "test.sw");
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics for {source:?}: {diagnostics:?}"
    );
    program
}

fn first_decl(program: &Program) -> &Decl {
    match &program.statements[0] {
        Stmt::Decl(d) => d,
        other => panic!("expected declaration, got {other:?}"),
    }
}

fn first_expr(program: &Program) -> &Expr {
    match &program.statements[0] {
        Stmt::Expr(e) => e,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn import_parses_to_default_kind() {
    let program = parse_ok("import Foundation");
    match first_decl(&program) {
        Decl::Import(i) => {
            assert_eq!(i.path, "Foundation");
            assert_eq!(i.kind, ImportKind::Default);
        }
        other => panic!("expected import, got {other:?}"),
    }
}

#[test]
fn import_with_submodule_and_kind() {
    let program = parse_ok("import class Foundation.NSFileManager");
    match first_decl(&program) {
        Decl::Import(i) => {
            assert_eq!(i.path, "Foundation.NSFileManager");
            assert_eq!(i.kind, ImportKind::Class);
        }
        other => panic!("expected import, got {other:?}"),
    }
}

#[test]
fn let_with_array_type_and_literal() {
    let program = parse_ok("let a : Int[] = [1, 2, 3]");
    let Decl::Bindings(group) = first_decl(&program) else {
        panic!("expected bindings group");
    };
    assert!(group.constant);
    assert_eq!(group.bindings.len(), 1);
    let binding = &group.bindings[0];

    let Pattern::Typed(typed) = &binding.pattern else {
        panic!("expected typed pattern");
    };
    let Pattern::Identifier(name) = typed.pattern.as_ref() else {
        panic!("expected identifier pattern");
    };
    assert_eq!(name.name, "a");
    let TypeRepr::Array(arr) = &typed.ty else {
        panic!("expected array type");
    };
    let TypeRepr::Named(inner) = arr.element.as_ref() else {
        panic!("expected named element type");
    };
    assert_eq!(inner.name, "Int");

    let Some(Expr::ArrayLiteral(lit)) = &binding.initializer else {
        panic!("expected array literal initializer");
    };
    let values: Vec<i64> = lit
        .elements
        .iter()
        .map(|e| match e {
            Expr::IntegerLiteral(n) => n.value,
            other => panic!("expected integer literal, got {other:?}"),
        })
        .collect();
    assert_eq!(values, vec![1, 2, 3]);
}

#[test]
fn multiple_bindings_share_one_group() {
    let program = parse_ok("let a = [k1 : 1, k2 : 2], b : Int = 2");
    let Decl::Bindings(group) = first_decl(&program) else {
        panic!("expected bindings group");
    };
    assert_eq!(group.bindings.len(), 2);
    assert!(matches!(
        group.bindings[0].initializer,
        Some(Expr::DictionaryLiteral(_))
    ));
}

#[test]
fn default_precedence_binds_multiplication_tighter() {
    let program = parse_ok("a + b * c");
    let Expr::Binary(top) = first_expr(&program) else {
        panic!("expected binary expression");
    };
    assert_eq!(top.operator, "+");
    let Expr::Binary(rhs) = top.rhs.as_ref() else {
        panic!("expected nested binary rhs");
    };
    assert_eq!(rhs.operator, "*");
}

#[test]
fn declared_operator_is_usable_afterwards() {
    let source = "operator infix +- { associativity left precedence 140 }\nlet x = 1 +- 2";
    let program = parse_ok(source);
    let Stmt::Decl(decl) = &program.statements[1] else {
        panic!("expected declaration");
    };
    let Decl::Bindings(group) = decl.as_ref() else {
        panic!("expected bindings");
    };
    let Some(Expr::Binary(bin)) = &group.bindings[0].initializer else {
        panic!("expected binary initializer");
    };
    assert_eq!(bin.operator, "+-");
}

#[test]
fn operator_used_before_declaration_is_unresolved() {
    let source = "let x = 1 +- 2\noperator infix +- { associativity left precedence 140 }";
    let (_, diagnostics) = parse(source, "test.sw");
    assert!(
        diagnostics
            .iter()
            .any(|d| d.code == codes::E_USE_OF_UNRESOLVED_OPERATOR_1),
        "expected unresolved operator diagnostic, got {diagnostics:?}"
    );
}

#[test]
fn operator_redeclaration_is_diagnosed() {
    let source = "operator infix ** { associativity right precedence 160 }\n\
                  operator infix ** { associativity right precedence 160 }";
    let (_, diagnostics) = parse(source, "test.sw");
    assert!(
        diagnostics
            .iter()
            .any(|d| d.code == codes::E_OPERATOR_REDECLARED_1)
    );
}

#[test]
fn user_operator_with_right_associativity_nests_rightward() {
    let source = "operator infix ** { associativity right precedence 160 }\na ** b ** c";
    let program = parse_ok(source);
    let Stmt::Expr(Expr::Binary(top)) = &program.statements[1] else {
        panic!("expected binary expression");
    };
    assert_eq!(top.operator, "**");
    assert!(matches!(top.lhs.as_ref(), Expr::Identifier(_)));
    let Expr::Binary(rhs) = top.rhs.as_ref() else {
        panic!("expected right-nested rhs");
    };
    assert_eq!(rhs.operator, "**");
}

#[test]
fn non_associative_operators_cannot_chain() {
    let (_, diagnostics) = parse("a == b == c", "test.sw");
    assert!(
        diagnostics
            .iter()
            .any(|d| d.code == codes::E_NON_ASSOCIATIVE_OPERATORS_1)
    );
}

#[test]
fn ternary_parses_at_assignment_precedence() {
    let program = parse_ok("a ? b + 1 : c");
    let Expr::Conditional(cond) = first_expr(&program) else {
        panic!("expected conditional, got {:?}", first_expr(&program));
    };
    assert!(matches!(cond.then_expr.as_ref(), Expr::Binary(_)));
}

#[test]
fn is_and_as_take_type_operands() {
    let program = parse_ok("x is Int");
    assert!(matches!(first_expr(&program), Expr::TypeCheck(_)));

    let program = parse_ok("x as? String");
    let Expr::TypeCast(cast) = first_expr(&program) else {
        panic!("expected cast");
    };
    assert!(cast.optional);
}

#[test]
fn optional_chaining_and_forced_unwrap_are_postfix() {
    let program = parse_ok("x?.y");
    let Expr::MemberAccess(ma) = first_expr(&program) else {
        panic!("expected member access, got {:?}", first_expr(&program));
    };
    assert!(matches!(
        ma.object.as_deref(),
        Some(Expr::OptionalChaining(_))
    ));

    let program = parse_ok("x!");
    assert!(matches!(first_expr(&program), Expr::ForcedUnwrap(_)));
}

#[test]
fn nested_generic_arguments_split_merged_angle_tokens() {
    let program = parse_ok("let a : Array<Array<Int>> = []");
    let Decl::Bindings(group) = first_decl(&program) else {
        panic!("expected bindings");
    };
    let Pattern::Typed(typed) = &group.bindings[0].pattern else {
        panic!("expected typed pattern");
    };
    let TypeRepr::Named(named) = &typed.ty else {
        panic!("expected named type");
    };
    assert_eq!(named.name, "Array");
    assert_eq!(named.generic_args.len(), 1);
    let TypeRepr::Named(inner) = &named.generic_args[0] else {
        panic!("expected nested named type");
    };
    assert_eq!(inner.name, "Array");
}

#[test]
fn string_interpolation_parses_expressions() {
    let program = parse_ok(r#"let s = "v=\(1 + 2) end""#);
    let Decl::Bindings(group) = first_decl(&program) else {
        panic!("expected bindings");
    };
    let Some(Expr::StringInterpolation(interp)) = &group.bindings[0].initializer else {
        panic!("expected interpolation");
    };
    assert_eq!(interp.fragments.len(), 2);
    assert_eq!(interp.exprs.len(), 1);
    assert!(matches!(interp.exprs[0], Expr::Binary(_)));
}

#[test]
fn switch_cases_support_patterns_and_guards() {
    let source = "switch x {\ncase .Some(let v) where v > 0:\n    f(v)\ndefault:\n    g()\n}";
    let program = parse_ok(source);
    let Stmt::Switch(sw) = &program.statements[0] else {
        panic!("expected switch");
    };
    assert_eq!(sw.cases.len(), 2);
    assert!(sw.cases[1].is_default);
    let item = &sw.cases[0].items[0];
    assert!(item.guard.is_some());
    assert!(matches!(item.pattern, Pattern::EnumCase(_)));
}

#[test]
fn tuple_pattern_with_declared_type_parses() {
    let program = parse_ok("let (a, b) : Int = (1, 2)");
    let Decl::Bindings(group) = first_decl(&program) else {
        panic!("expected bindings");
    };
    let Pattern::Typed(typed) = &group.bindings[0].pattern else {
        panic!("expected typed pattern");
    };
    assert!(matches!(typed.pattern.as_ref(), Pattern::Tuple(_)));
}

#[test]
fn protocol_and_class_declarations_parse() {
    let source = "protocol P { func f() }\nclass C : P { func f() {} }";
    let program = parse_ok(source);
    assert!(matches!(first_decl(&program), Decl::Protocol(_)));
    let Stmt::Decl(second) = &program.statements[1] else {
        panic!("expected class");
    };
    let Decl::Class(class) = second.as_ref() else {
        panic!("expected class decl");
    };
    assert_eq!(class.info.inherited.len(), 1);
    assert_eq!(class.info.body.len(), 1);
}

#[test]
fn syntax_error_recovers_at_statement_boundary() {
    let source = "let = 3\nlet ok = 1";
    let (program, diagnostics) = parse(source, "test.sw");
    assert!(!diagnostics.is_empty());
    // The second statement still parses.
    assert!(program.statements.iter().any(|s| match s {
        Stmt::Decl(d) => matches!(d.as_ref(), Decl::Bindings(g) if !g.bindings.is_empty()),
        _ => false,
    }));
}

#[test]
fn deep_nesting_hits_the_recursion_cap_gracefully() {
    let mut source = String::new();
    for _ in 0..400 {
        source.push('(');
    }
    source.push('1');
    for _ in 0..400 {
        source.push(')');
    }
    let (_, diagnostics) = parse(&source, "test.sw");
    assert!(
        diagnostics
            .iter()
            .any(|d| d.code == codes::E_NESTING_TOO_DEEP)
    );
}

#[test]
fn closures_with_signatures_and_implicit_parameters() {
    let program = parse_ok("let f = { (a : Int, b : Int) -> Int in\n    return a + b\n}");
    let Decl::Bindings(group) = first_decl(&program) else {
        panic!("expected bindings");
    };
    let Some(Expr::Closure(closure)) = &group.bindings[0].initializer else {
        panic!("expected closure");
    };
    assert_eq!(closure.parameters.len(), 2);
    assert!(closure.return_type.is_some());

    let program = parse_ok("map { $0 + 1 }");
    // Trailing closure attaches only to calls; a bare closure argument uses
    // parentheses.
    assert!(matches!(
        first_expr(&program),
        Expr::Identifier(_) | Expr::FunctionCall(_)
    ));
}

#[test]
fn operator_registry_is_exposed_after_parsing() {
    let mut parser = ParserState::new(
        "test.sw",
        "operator infix <*> { associativity left precedence 120 }",
    );
    let _ = parser.parse_source_file();
    let info = parser.operator_registry().lookup_infix("<*>").unwrap();
    assert_eq!(info.precedence, 120);
}
