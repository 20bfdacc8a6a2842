use swz_scanner::{FixityHint, Keyword, ScannerState, Token, TokenKind};

fn scan_all(source: &str) -> Vec<Token> {
    let mut scanner = ScannerState::new("test.sw", source);
    let mut tokens = Vec::new();
    loop {
        let tok = scanner.next();
        let done = tok.kind == TokenKind::Eof;
        tokens.push(tok);
        if done {
            break;
        }
    }
    tokens
}

fn kinds(source: &str) -> Vec<TokenKind> {
    scan_all(source).iter().map(|t| t.kind).collect()
}

#[test]
fn identifiers_and_keywords_are_classified() {
    let tokens = scan_all("let value = x");
    assert_eq!(tokens[0].keyword(), Some(Keyword::Let));
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].text, "value");
    assert!(tokens[1].keyword().is_none());
    assert!(tokens[2].is_operator("="));
}

#[test]
fn backtick_identifier_suppresses_keyword_meaning() {
    let tokens = scan_all("let `class` = 1");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].text, "class");
    assert!(tokens[1].keyword().is_none());
    assert!(tokens[1].is_name());
}

#[test]
fn implicit_parameter_names_are_identifiers() {
    let tokens = scan_all("$0 + $12");
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].text, "$0");
    assert_eq!(tokens[2].text, "$12");
}

#[test]
fn integer_bases_and_separators() {
    let tokens = scan_all("0b1010 0o17 0xff 1_000_000");
    let values: Vec<i64> = tokens[..4]
        .iter()
        .map(|t| match t.payload {
            swz_scanner::TokenPayload::Number(n) => n.value,
            _ => panic!("expected number"),
        })
        .collect();
    assert_eq!(values, vec![10, 15, 255, 1_000_000]);
    assert_eq!(tokens[0].kind, TokenKind::Integer);
}

#[test]
fn integer_value_saturates_to_64_bits() {
    let tokens = scan_all("99999999999999999999999999");
    match tokens[0].payload {
        swz_scanner::TokenPayload::Number(n) => assert_eq!(n.value, i64::MAX),
        _ => panic!("expected number"),
    }
}

#[test]
fn float_literals_carry_fraction_and_exponent_counts() {
    let tokens = scan_all("3.25e2");
    assert_eq!(tokens[0].kind, TokenKind::Float);
    match tokens[0].payload {
        swz_scanner::TokenPayload::Number(n) => {
            assert_eq!(n.fraction_digits, 2);
            assert_eq!(n.exponent_digits, 1);
            assert!((n.dvalue - 325.0).abs() < 1e-9);
        }
        _ => panic!("expected number"),
    }
}

#[test]
fn hex_float_uses_binary_exponent() {
    let tokens = scan_all("0x1.8p1");
    assert_eq!(tokens[0].kind, TokenKind::Float);
    match tokens[0].payload {
        swz_scanner::TokenPayload::Number(n) => {
            assert!((n.dvalue - 3.0).abs() < 1e-9);
        }
        _ => panic!("expected number"),
    }
}

#[test]
fn string_escapes_are_processed() {
    let tokens = scan_all(r#""a\tb\u{41}""#);
    assert_eq!(tokens[0].kind, TokenKind::StringLit);
    assert_eq!(tokens[0].text, "a\tbA");
}

#[test]
fn string_interpolation_hands_off_and_resumes() {
    let tokens = scan_all(r#""a\(x)b""#);
    assert_eq!(tokens[0].kind, TokenKind::StringLit);
    assert_eq!(tokens[0].text, "a");
    assert!(tokens[0].expression_follows());
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].text, "x");
    assert_eq!(tokens[2].kind, TokenKind::CloseParen);
    assert_eq!(tokens[3].kind, TokenKind::StringLit);
    assert_eq!(tokens[3].text, "b");
    assert!(!tokens[3].expression_follows());
}

#[test]
fn nested_parens_inside_interpolation_do_not_resume_early() {
    let tokens = scan_all(r#""v=\(f(x))""#);
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["v=", "f", "(", "x", ")", ")", "", ""]);
    assert_eq!(tokens[6].kind, TokenKind::StringLit);
}

#[test]
fn unterminated_string_produces_one_diagnostic() {
    let mut scanner = ScannerState::new("test.sw", "\"abc");
    let tok = scanner.next();
    assert_eq!(tok.kind, TokenKind::StringLit);
    assert_eq!(scanner.diagnostics().len(), 1);
}

#[test]
fn whitespace_sets_fixity_hints() {
    let tokens = scan_all("a - b");
    assert_eq!(tokens[1].fixity_hint(), FixityHint::Binary);

    let tokens = scan_all("a -b");
    assert_eq!(tokens[1].fixity_hint(), FixityHint::Prefix);

    let tokens = scan_all("a- b");
    assert_eq!(tokens[1].fixity_hint(), FixityHint::Postfix);

    let tokens = scan_all("a-b");
    assert_eq!(tokens[1].fixity_hint(), FixityHint::Binary);
}

#[test]
fn operator_at_start_of_input_is_prefix() {
    let tokens = scan_all("-a");
    assert_eq!(tokens[0].fixity_hint(), FixityHint::Prefix);
}

#[test]
fn forced_unwrap_does_not_merge_with_member_access() {
    let tokens = scan_all("x!.y");
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["x", "!", ".", "y", ""]);
}

#[test]
fn range_operators_lex_as_dot_runs() {
    let tokens = scan_all("1...5");
    assert!(tokens[1].is_operator("..."));
    let tokens = scan_all("1..5");
    assert!(tokens[1].is_operator(".."));
}

#[test]
fn comments_are_skipped_by_default() {
    assert_eq!(
        kinds("1 // trailing\n2"),
        vec![TokenKind::Integer, TokenKind::Integer, TokenKind::Eof]
    );
    assert_eq!(
        kinds("1 /* a /* nested */ b */ 2"),
        vec![TokenKind::Integer, TokenKind::Integer, TokenKind::Eof]
    );
}

#[test]
fn comments_can_be_surfaced() {
    let mut scanner = ScannerState::new("test.sw", "/* a /* b */ c */");
    scanner.keep_comments(true);
    let tok = scanner.next();
    assert_eq!(tok.kind, TokenKind::Comment);
    match tok.payload {
        swz_scanner::TokenPayload::Comment(c) => {
            assert!(c.block);
            assert_eq!(c.nested_levels, 2);
        }
        _ => panic!("expected comment payload"),
    }
}

#[test]
fn unterminated_block_comment_is_diagnosed() {
    let mut scanner = ScannerState::new("test.sw", "/* open");
    let tok = scanner.next();
    assert_eq!(tok.kind, TokenKind::Eof);
    assert_eq!(scanner.diagnostics().len(), 1);
}

#[test]
fn save_and_restore_rewind_the_stream() {
    let mut scanner = ScannerState::new("test.sw", "a + b");
    let a = scanner.next();
    assert_eq!(a.text, "a");
    let cp = scanner.save();
    let plus = scanner.next();
    assert!(plus.is_operator("+"));
    scanner.restore(&cp);
    let plus_again = scanner.next();
    assert!(plus_again.is_operator("+"));
    assert_eq!(scanner.next().text, "b");
}

#[test]
fn match_operator_consumes_only_on_exact_match() {
    let mut scanner = ScannerState::new("test.sw", "-> x");
    assert!(!scanner.match_operator("-"));
    assert!(scanner.match_operator("->"));
    assert_eq!(scanner.next().text, "x");
}

#[test]
fn spans_cover_exactly_the_consumed_tokens() {
    let tokens = scan_all("let abc = 12");
    assert_eq!((tokens[1].span.start, tokens[1].span.end), (4, 7));
    assert_eq!((tokens[3].span.start, tokens[3].span.end), (10, 12));
}
