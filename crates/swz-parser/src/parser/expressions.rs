//! Expression parsing.
//!
//! Pratt-style: a primary expression, then infix/postfix operators while
//! their precedence stays at or above the current minimum. Fixity is decided
//! from the scanner's whitespace hint combined with a registry lookup; when
//! both a prefix and an infix reading apply and the hint says binary, the
//! infix reading wins.

use super::ParserState;
use crate::ast::*;
use crate::operators::{ASSIGNMENT_PRECEDENCE, Associativity, CAST_PRECEDENCE};
use swz_common::diagnostics::diagnostic_codes as codes;
use swz_scanner::{FixityHint, Keyword, TokenKind, TokenPayload};

impl ParserState {
    pub(crate) fn parse_expression(&mut self) -> Expr {
        self.parse_expr_prec(0)
    }

    pub(crate) fn parse_expr_prec(&mut self, min_prec: u32) -> Expr {
        if !self.enter_nesting() {
            let span = self.current.span;
            self.leave_nesting();
            return self.error_expr(span);
        }
        let mut lhs = self.parse_prefix_expr();
        let mut last_nonassoc: Option<u32> = None;

        loop {
            // `is` / `as` take a type reference on the right.
            if self.at_keyword(Keyword::Is) {
                if CAST_PRECEDENCE < min_prec {
                    break;
                }
                self.advance();
                let ty = self.parse_type();
                let span = lhs.span().merge(ty.span());
                lhs = Expr::TypeCheck(TypeCheck {
                    id: self.node_id(),
                    span,
                    subject: Box::new(lhs),
                    ty,
                });
                continue;
            }
            if self.at_keyword(Keyword::As) {
                if CAST_PRECEDENCE < min_prec {
                    break;
                }
                self.advance();
                let optional = !self.space_before_current() && self.eat_operator("?");
                let ty = self.parse_type();
                let span = lhs.span().merge(ty.span());
                lhs = Expr::TypeCast(TypeCast {
                    id: self.node_id(),
                    span,
                    subject: Box::new(lhs),
                    optional,
                    ty,
                });
                continue;
            }

            if self.current.kind != TokenKind::Operator {
                break;
            }
            let text = self.current.text.clone();
            let hint = self.current.fixity_hint();

            // Ternary conditional; same precedence as assignment.
            if text == "?" && self.space_before_current() {
                if ASSIGNMENT_PRECEDENCE < min_prec {
                    break;
                }
                self.advance();
                let then_expr = self.parse_expr_prec(0);
                if !self.eat(TokenKind::Colon) {
                    self.error_expect(":");
                }
                let else_expr = self.parse_expr_prec(ASSIGNMENT_PRECEDENCE);
                let span = lhs.span().merge(else_expr.span());
                lhs = Expr::Conditional(ConditionalOperator {
                    id: self.node_id(),
                    span,
                    condition: Box::new(lhs),
                    then_expr: Box::new(then_expr),
                    else_expr: Box::new(else_expr),
                });
                continue;
            }

            // A prefix-looking operator starts the next expression, not an
            // infix chain.
            if hint == FixityHint::Prefix {
                break;
            }

            if text == "=" {
                if ASSIGNMENT_PRECEDENCE < min_prec {
                    break;
                }
                self.advance();
                let value = self.parse_expr_prec(ASSIGNMENT_PRECEDENCE);
                let span = lhs.span().merge(value.span());
                lhs = Expr::Assignment(Assignment {
                    id: self.node_id(),
                    span,
                    target: Box::new(lhs),
                    value: Box::new(value),
                });
                continue;
            }

            match self.registry.lookup_infix(&text) {
                Some(info) => {
                    if info.precedence < min_prec {
                        break;
                    }
                    if last_nonassoc == Some(info.precedence) {
                        self.error_current(
                            codes::E_NON_ASSOCIATIVE_OPERATORS_1,
                            vec![text.clone()],
                        );
                    }
                    self.advance();
                    let next_min = match info.associativity {
                        Associativity::Left | Associativity::None => info.precedence + 1,
                        Associativity::Right => info.precedence,
                    };
                    let rhs = self.parse_expr_prec(next_min);
                    let span = lhs.span().merge(rhs.span());
                    lhs = Expr::Binary(BinaryOperator {
                        id: self.node_id(),
                        span,
                        operator: text.clone(),
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                    });
                    last_nonassoc = (info.associativity == Associativity::None)
                        .then_some(info.precedence);
                    continue;
                }
                None => {
                    // An operator used infix without a registration.
                    if matches!(hint, FixityHint::Binary | FixityHint::Unknown) {
                        self.error_current(
                            codes::E_USE_OF_UNRESOLVED_OPERATOR_1,
                            vec![text.clone()],
                        );
                        self.advance();
                        let rhs = self.parse_expr_prec(141);
                        let span = lhs.span().merge(rhs.span());
                        lhs = Expr::Binary(BinaryOperator {
                            id: self.node_id(),
                            span,
                            operator: text,
                            lhs: Box::new(lhs),
                            rhs: Box::new(rhs),
                        });
                        continue;
                    }
                    break;
                }
            }
        }

        self.leave_nesting();
        lhs
    }

    fn parse_prefix_expr(&mut self) -> Expr {
        if self.current.kind == TokenKind::Operator {
            let text = self.current.text.clone();
            let hint = self.current.fixity_hint();

            // Leading-dot member access: `.Some(1)`.
            if text == "." {
                let start = self.advance().span;
                let name = self.expect_identifier();
                let span = start.merge(self.prev_span());
                let member = Expr::MemberAccess(MemberAccess {
                    id: self.node_id(),
                    span,
                    object: None,
                    member: MemberName::Named(name),
                });
                return self.parse_postfix_suffixes(member);
            }

            // `&x` marks an in-out argument.
            if text == "&" && !matches!(hint, FixityHint::Binary) {
                let start = self.advance().span;
                let name = self.expect_identifier();
                let span = start.merge(self.prev_span());
                return Expr::InOut(InOutExpr {
                    id: self.node_id(),
                    span,
                    name,
                });
            }

            if matches!(hint, FixityHint::Prefix | FixityHint::Unknown) {
                let op_tok = self.advance();
                let operand = self.parse_prefix_expr();
                let span = op_tok.span.merge(operand.span());
                return Expr::Unary(UnaryOperator {
                    id: self.node_id(),
                    span,
                    operator: op_tok.text,
                    fixity: UnaryFixity::Prefix,
                    operand: Box::new(operand),
                });
            }
        }
        self.parse_postfix_expr()
    }

    fn parse_postfix_expr(&mut self) -> Expr {
        let primary = self.parse_primary();
        self.parse_postfix_suffixes(primary)
    }

    pub(crate) fn parse_postfix_suffixes(&mut self, mut expr: Expr) -> Expr {
        loop {
            match self.current.kind {
                TokenKind::Operator => {
                    let text = self.current.text.clone();
                    if text == "." {
                        self.advance();
                        expr = self.parse_member_suffix(expr);
                        continue;
                    }
                    let space_before = self.space_before_current();
                    if text == "!" && !space_before {
                        let tok = self.advance();
                        let span = expr.span().merge(tok.span);
                        expr = Expr::ForcedUnwrap(ForcedUnwrap {
                            id: self.node_id(),
                            span,
                            operand: Box::new(expr),
                        });
                        continue;
                    }
                    if text == "?" && !space_before {
                        let tok = self.advance();
                        let span = expr.span().merge(tok.span);
                        expr = Expr::OptionalChaining(OptionalChaining {
                            id: self.node_id(),
                            span,
                            operand: Box::new(expr),
                        });
                        continue;
                    }
                    if !space_before && self.registry.is_postfix(&text) {
                        let tok = self.advance();
                        let span = expr.span().merge(tok.span);
                        expr = Expr::Unary(UnaryOperator {
                            id: self.node_id(),
                            span,
                            operator: tok.text,
                            fixity: UnaryFixity::Postfix,
                            operand: Box::new(expr),
                        });
                        continue;
                    }
                    break;
                }
                TokenKind::OpenParen => {
                    expr = self.parse_call(expr);
                    continue;
                }
                TokenKind::OpenBracket => {
                    self.advance();
                    let mut indices = Vec::new();
                    if !self.at(TokenKind::CloseBracket) {
                        loop {
                            indices.push(self.parse_expression());
                            if !self.eat(TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                    let end = self.current.span;
                    self.expect(TokenKind::CloseBracket, "]");
                    let span = expr.span().merge(end);
                    expr = Expr::Subscript(SubscriptAccess {
                        id: self.node_id(),
                        span,
                        object: Box::new(expr),
                        indices,
                    });
                    continue;
                }
                TokenKind::OpenBrace if !self.no_trailing_closure => {
                    // Trailing closure binds to a call.
                    if let Expr::FunctionCall(_) = &expr {
                        let closure = self.parse_closure();
                        if let Expr::FunctionCall(mut call) = expr {
                            call.span = call.span.merge(closure.span());
                            call.trailing_closure = Some(Box::new(closure));
                            expr = Expr::FunctionCall(call);
                        }
                        continue;
                    }
                    break;
                }
                _ => break,
            }
        }
        expr
    }

    fn parse_member_suffix(&mut self, object: Expr) -> Expr {
        // Positional access: `tuple.0`
        if self.at(TokenKind::Integer) {
            let tok = self.advance();
            let index = match tok.payload {
                TokenPayload::Number(n) => u32::try_from(n.value).unwrap_or(0),
                _ => 0,
            };
            let span = object.span().merge(tok.span);
            return Expr::MemberAccess(MemberAccess {
                id: self.node_id(),
                span,
                object: Some(Box::new(object)),
                member: MemberName::Index(index),
            });
        }
        if self.at_keyword(Keyword::DynamicType) {
            let tok = self.advance();
            let span = object.span().merge(tok.span);
            return Expr::DynamicType(DynamicTypeExpr {
                id: self.node_id(),
                span,
                object: Box::new(object),
            });
        }
        if self.at_keyword(Keyword::Init) {
            let tok = self.advance();
            let span = object.span().merge(tok.span);
            return Expr::MemberAccess(MemberAccess {
                id: self.node_id(),
                span,
                object: Some(Box::new(object)),
                member: MemberName::Named("init".to_string()),
            });
        }
        let name = self.expect_identifier();
        let span = object.span().merge(self.prev_span());
        Expr::MemberAccess(MemberAccess {
            id: self.node_id(),
            span,
            object: Some(Box::new(object)),
            member: MemberName::Named(name),
        })
    }

    fn parse_call(&mut self, callee: Expr) -> Expr {
        self.advance(); // '('
        let mut arguments = Vec::new();
        if !self.at(TokenKind::CloseParen) {
            loop {
                let label = self.call_argument_label();
                let value = self.parse_expression();
                arguments.push(CallArgument { label, value });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        let end = self.current.span;
        self.expect(TokenKind::CloseParen, ")");
        let span = callee.span().merge(end);
        Expr::FunctionCall(FunctionCall {
            id: self.node_id(),
            span,
            callee: Box::new(callee),
            arguments,
            trailing_closure: None,
        })
    }

    /// `label:` before a call argument, detected with one-token lookahead.
    fn call_argument_label(&mut self) -> Option<String> {
        if self.current.is_name() && self.scanner.peek().kind == TokenKind::Colon {
            let label = self.advance().text;
            self.advance(); // ':'
            return Some(label);
        }
        None
    }

    fn parse_primary(&mut self) -> Expr {
        match self.current.kind {
            TokenKind::Integer => {
                let tok = self.advance();
                let (base, value) = match tok.payload {
                    TokenPayload::Number(n) => (n.base, n.value),
                    _ => (10, 0),
                };
                Expr::IntegerLiteral(IntegerLiteral {
                    id: self.node_id(),
                    span: tok.span,
                    text: tok.text,
                    base,
                    value,
                })
            }
            TokenKind::Float => {
                let tok = self.advance();
                let value = match tok.payload {
                    TokenPayload::Number(n) => n.dvalue,
                    _ => 0.0,
                };
                Expr::FloatLiteral(FloatLiteral {
                    id: self.node_id(),
                    span: tok.span,
                    text: tok.text,
                    value,
                })
            }
            TokenKind::StringLit => self.parse_string_literal(),
            TokenKind::OpenParen => self.parse_paren_or_tuple(),
            TokenKind::OpenBracket => self.parse_collection_literal(),
            TokenKind::OpenBrace => self.parse_closure(),
            TokenKind::Identifier => {
                if self.at_keyword(Keyword::True) || self.at_keyword(Keyword::False) {
                    let value = self.at_keyword(Keyword::True);
                    let tok = self.advance();
                    return Expr::BooleanLiteral(BooleanLiteral {
                        id: self.node_id(),
                        span: tok.span,
                        value,
                    });
                }
                if self.at_keyword(Keyword::Nil) {
                    let tok = self.advance();
                    return Expr::NilLiteral(NilLiteral {
                        id: self.node_id(),
                        span: tok.span,
                    });
                }
                if self.at_keyword(Keyword::SelfKw) {
                    let tok = self.advance();
                    return Expr::SelfExpr(SelfExpr {
                        id: self.node_id(),
                        span: tok.span,
                    });
                }
                if self.current.is_name() {
                    return self.parse_identifier_expr();
                }
                let shown = self.token_text_for_diagnostic();
                self.error_current(codes::E_EXPECT_EXPRESSION_1, vec![shown]);
                let span = self.current.span;
                self.error_expr(span)
            }
            _ => {
                let shown = self.token_text_for_diagnostic();
                self.error_current(codes::E_EXPECT_EXPRESSION_1, vec![shown]);
                let span = self.current.span;
                self.error_expr(span)
            }
        }
    }

    fn parse_identifier_expr(&mut self) -> Expr {
        let tok = self.advance();
        let implicit = matches!(
            tok.payload,
            TokenPayload::Identifier(info)
                if info.kind == swz_scanner::IdentifierKind::Implicit
        );
        let mut generic_args = Vec::new();
        // `Name<Args>` is speculative, since `<` is usually a comparison.
        if self.at_operator("<") && !self.space_before_current() {
            let probe = self.current.clone();
            if let Some(args) = self.try_parse_generic_args() {
                generic_args = args;
            } else {
                self.rewind_to(&probe);
            }
        }
        let span = tok.span;
        Expr::Identifier(Identifier {
            id: self.node_id(),
            span,
            name: tok.text,
            implicit_parameter: implicit,
            generic_args,
        })
    }

    /// Parse `"fragment\(expr)fragment…"` into a `StringInterpolation`; a
    /// plain literal stays a `StringLiteral`.
    fn parse_string_literal(&mut self) -> Expr {
        let first = self.advance();
        if !first.expression_follows() {
            return Expr::StringLiteral(StringLiteral {
                id: self.node_id(),
                span: first.span,
                value: first.text,
            });
        }
        let start = first.span;
        let mut fragments = vec![first.text];
        let mut exprs = Vec::new();
        let mut end = first.span;
        loop {
            exprs.push(self.parse_expression());
            self.expect(TokenKind::CloseParen, ")");
            // The scanner resumes string lexing after the `)`.
            if self.at(TokenKind::StringLit) {
                let frag = self.advance();
                end = frag.span;
                let more = frag.expression_follows();
                fragments.push(frag.text);
                if more {
                    continue;
                }
            } else {
                self.error_expect("\"");
                fragments.push(String::new());
            }
            break;
        }
        Expr::StringInterpolation(StringInterpolation {
            id: self.node_id(),
            span: start.merge(end),
            fragments,
            exprs,
        })
    }

    fn parse_paren_or_tuple(&mut self) -> Expr {
        let start = self.advance().span; // '('
        let mut elements: Vec<(Option<String>, Expr)> = Vec::new();
        if !self.at(TokenKind::CloseParen) {
            loop {
                let label = self.call_argument_label();
                let value = self.parse_expression();
                elements.push((label, value));
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        let end = self.current.span;
        self.expect(TokenKind::CloseParen, ")");
        let span = start.merge(end);
        if elements.len() == 1 && elements[0].0.is_none() {
            let (_, expr) = elements.pop().unwrap();
            return Expr::Parenthesized(Parenthesized {
                id: self.node_id(),
                span,
                expr: Box::new(expr),
            });
        }
        Expr::TupleExpr(TupleExpr {
            id: self.node_id(),
            span,
            elements,
        })
    }

    fn parse_collection_literal(&mut self) -> Expr {
        let start = self.advance().span; // '['
        // `[:]` is the empty dictionary.
        if self.at(TokenKind::Colon) {
            self.advance();
            let end = self.current.span;
            self.expect(TokenKind::CloseBracket, "]");
            return Expr::DictionaryLiteral(DictionaryLiteral {
                id: self.node_id(),
                span: start.merge(end),
                entries: Vec::new(),
            });
        }
        if self.at(TokenKind::CloseBracket) {
            let end = self.advance().span;
            return Expr::ArrayLiteral(ArrayLiteral {
                id: self.node_id(),
                span: start.merge(end),
                elements: Vec::new(),
            });
        }
        let first = self.parse_expression();
        if self.eat(TokenKind::Colon) {
            let value = self.parse_expression();
            let mut entries = vec![(first, value)];
            while self.eat(TokenKind::Comma) {
                if self.at(TokenKind::CloseBracket) {
                    break;
                }
                let k = self.parse_expression();
                self.expect(TokenKind::Colon, ":");
                let v = self.parse_expression();
                entries.push((k, v));
            }
            let end = self.current.span;
            self.expect(TokenKind::CloseBracket, "]");
            return Expr::DictionaryLiteral(DictionaryLiteral {
                id: self.node_id(),
                span: start.merge(end),
                entries,
            });
        }
        let mut elements = vec![first];
        while self.eat(TokenKind::Comma) {
            if self.at(TokenKind::CloseBracket) {
                break;
            }
            elements.push(self.parse_expression());
        }
        let end = self.current.span;
        self.expect(TokenKind::CloseBracket, "]");
        Expr::ArrayLiteral(ArrayLiteral {
            id: self.node_id(),
            span: start.merge(end),
            elements,
        })
    }

    /// `{ (params) -> T in stmts }`, `{ a, b in stmts }`, or `{ stmts }`
    /// with `$n` implicit parameters.
    pub(crate) fn parse_closure(&mut self) -> Expr {
        let start = self.advance().span; // '{'
        let probe = self.current.clone();
        let mut parameters = Vec::new();
        let mut return_type = None;

        if self.at(TokenKind::OpenParen) || self.current.is_name() {
            if let Some((params, ret)) = self.try_parse_closure_signature() {
                parameters = params;
                return_type = ret;
            } else {
                self.rewind_to(&probe);
            }
        }

        let mut statements = Vec::new();
        while !self.at(TokenKind::CloseBrace) && !self.at(TokenKind::Eof) {
            while self.eat(TokenKind::Semicolon) {}
            if self.at(TokenKind::CloseBrace) || self.at(TokenKind::Eof) {
                break;
            }
            let before = self.current.span;
            statements.push(self.parse_statement());
            if self.current.span == before && !self.at(TokenKind::Eof) {
                self.advance();
            }
        }
        let end = self.current.span;
        self.expect(TokenKind::CloseBrace, "}");
        Expr::Closure(Closure {
            id: self.node_id(),
            span: start.merge(end),
            parameters,
            return_type,
            statements,
        })
    }

    /// Attempt `params [-> T] in`; `None` means there is no signature and
    /// the caller must rewind.
    fn try_parse_closure_signature(
        &mut self,
    ) -> Option<(Vec<ClosureParameter>, Option<TypeRepr>)> {
        let mut params = Vec::new();
        if self.eat(TokenKind::OpenParen) {
            if !self.at(TokenKind::CloseParen) {
                loop {
                    if !self.current.is_name() {
                        return None;
                    }
                    let tok = self.advance();
                    let ty = if self.eat(TokenKind::Colon) {
                        Some(self.parse_type())
                    } else {
                        None
                    };
                    params.push(ClosureParameter {
                        id: self.node_id(),
                        span: tok.span,
                        name: tok.text,
                        ty,
                    });
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }
            if !self.eat(TokenKind::CloseParen) {
                return None;
            }
        } else {
            loop {
                if !self.current.is_name() {
                    return None;
                }
                let tok = self.advance();
                params.push(ClosureParameter {
                    id: self.node_id(),
                    span: tok.span,
                    name: tok.text,
                    ty: None,
                });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        let ret = if self.eat_operator("->") {
            Some(self.parse_type())
        } else {
            None
        };
        if self.eat_keyword(Keyword::In) {
            Some((params, ret))
        } else {
            None
        }
    }

    /// Speculatively parse `<T, U>`; `None` restores nothing (caller rewinds).
    fn try_parse_generic_args(&mut self) -> Option<Vec<TypeRepr>> {
        self.advance(); // '<'
        let mut args = Vec::new();
        loop {
            if !self.looks_like_type() {
                return None;
            }
            args.push(self.parse_type());
            if self.eat(TokenKind::Comma) {
                continue;
            }
            break;
        }
        if self.eat_close_angle() { Some(args) } else { None }
    }

    pub(crate) fn looks_like_type(&self) -> bool {
        self.current.is_name()
            || self.at(TokenKind::OpenParen)
            || self.at(TokenKind::OpenBracket)
            || self.at_keyword(Keyword::Protocol)
    }

    /// Consume a single closing `>`, splitting merged operator tokens such
    /// as `>>` produced by nested generic argument lists.
    pub(crate) fn eat_close_angle(&mut self) -> bool {
        if self.current.kind != TokenKind::Operator || !self.current.text.starts_with('>') {
            return false;
        }
        if self.current.text == ">" {
            self.advance();
        } else {
            self.current.text.remove(0);
            self.current.span.start += 1;
        }
        true
    }
}
