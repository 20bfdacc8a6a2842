//! Type-reference grammar.

use super::ParserState;
use crate::ast::*;
use swz_common::diagnostics::diagnostic_codes as codes;
use swz_scanner::{Keyword, TokenKind};

impl ParserState {
    pub(crate) fn parse_type(&mut self) -> TypeRepr {
        if !self.enter_nesting() {
            let span = self.current.span;
            self.leave_nesting();
            return self.error_type(span);
        }
        let mut ty = self.parse_type_primary();

        // Postfix type suffixes bind tighter than `->`.
        loop {
            if self.at(TokenKind::OpenBracket)
                && !self.space_before_current()
                && self.scanner.peek().kind == TokenKind::CloseBracket
            {
                let start = ty.span();
                self.advance();
                let end = self.advance().span; // ']'
                ty = TypeRepr::Array(ArrayTypeRepr {
                    id: self.node_id(),
                    span: start.merge(end),
                    element: Box::new(ty),
                });
                continue;
            }
            if self.at_operator("?") && !self.space_before_current() {
                let tok = self.advance();
                let span = ty.span().merge(tok.span);
                ty = TypeRepr::Optional(OptionalTypeRepr {
                    id: self.node_id(),
                    span,
                    inner: Box::new(ty),
                });
                continue;
            }
            if self.at_operator("!") && !self.space_before_current() {
                let tok = self.advance();
                let span = ty.span().merge(tok.span);
                ty = TypeRepr::ImplicitlyUnwrappedOptional(OptionalTypeRepr {
                    id: self.node_id(),
                    span,
                    inner: Box::new(ty),
                });
                continue;
            }
            break;
        }

        // `(Params) -> Return`, right associative.
        if self.eat_operator("->") {
            let ret = self.parse_type();
            let span = ty.span().merge(ret.span());
            let parameters = match ty {
                TypeRepr::Tuple(tuple) => tuple
                    .elements
                    .into_iter()
                    .map(|(name, ty)| FunctionTypeParam {
                        name,
                        inout: false,
                        ty,
                    })
                    .collect(),
                other => vec![FunctionTypeParam {
                    name: None,
                    inout: false,
                    ty: other,
                }],
            };
            self.leave_nesting();
            return TypeRepr::Function(FunctionTypeRepr {
                id: self.node_id(),
                span,
                parameters,
                return_type: Box::new(ret),
            });
        }

        self.leave_nesting();
        ty
    }

    fn parse_type_primary(&mut self) -> TypeRepr {
        // `protocol<A, B>` composition.
        if self.at_keyword(Keyword::Protocol) {
            let start = self.advance().span;
            if !self.eat_operator("<") {
                self.error_expect("<");
                return self.error_type(start);
            }
            let mut protocols = Vec::new();
            if !self.current.is_operator(">") {
                loop {
                    protocols.push(self.parse_named_type());
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }
            if !self.eat_close_angle() {
                self.error_expect(">");
            }
            let span = start.merge(self.prev_span());
            return TypeRepr::ProtocolComposition(ProtocolCompositionRepr {
                id: self.node_id(),
                span,
                protocols,
            });
        }

        // Tuple type (also function parameter clause).
        if self.at(TokenKind::OpenParen) {
            let start = self.advance().span;
            let mut elements = Vec::new();
            if !self.at(TokenKind::CloseParen) {
                loop {
                    let name = if self.current.is_name()
                        && self.scanner.peek().kind == TokenKind::Colon
                    {
                        let n = self.advance().text;
                        self.advance(); // ':'
                        Some(n)
                    } else {
                        None
                    };
                    let ty = self.parse_type();
                    elements.push((name, ty));
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }
            let end = self.current.span;
            self.expect(TokenKind::CloseParen, ")");
            return TypeRepr::Tuple(TupleTypeRepr {
                id: self.node_id(),
                span: start.merge(end),
                elements,
            });
        }

        // `[T]` array or `[K : V]` dictionary.
        if self.at(TokenKind::OpenBracket) {
            let start = self.advance().span;
            let key = self.parse_type();
            if self.eat(TokenKind::Colon) {
                let value = self.parse_type();
                let end = self.current.span;
                self.expect(TokenKind::CloseBracket, "]");
                return TypeRepr::Dictionary(DictionaryTypeRepr {
                    id: self.node_id(),
                    span: start.merge(end),
                    key: Box::new(key),
                    value: Box::new(value),
                });
            }
            let end = self.current.span;
            self.expect(TokenKind::CloseBracket, "]");
            return TypeRepr::Array(ArrayTypeRepr {
                id: self.node_id(),
                span: start.merge(end),
                element: Box::new(key),
            });
        }

        if self.current.is_name() || self.at_keyword(Keyword::SelfType) {
            return TypeRepr::Named(self.parse_named_type());
        }

        let span = self.current.span;
        self.error_current(codes::E_EXPECT_TYPE, vec![]);
        self.error_type(span)
    }

    /// `Name`, `Name<Args>`, `Outer.Inner<Args>`. Generic arguments are
    /// preserved even when the list is empty.
    pub(crate) fn parse_named_type(&mut self) -> NamedTypeRepr {
        let tok = if self.current.is_name() || self.at_keyword(Keyword::SelfType) {
            self.advance()
        } else {
            let shown = self.token_text_for_diagnostic();
            self.error_current(codes::E_EXPECT_IDENTIFIER_1, vec![shown]);
            let id = self.node_id();
            return NamedTypeRepr {
                id,
                span: self.current.span,
                name: "<error>".to_string(),
                generic_args: Vec::new(),
                nested: None,
            };
        };
        let mut generic_args = Vec::new();
        if self.at_operator("<") && !self.space_before_current() {
            self.advance();
            loop {
                generic_args.push(self.parse_type());
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            if !self.eat_close_angle() {
                self.error_expect(">");
            }
        }
        let nested = if self.at_operator(".") && !self.space_before_current() {
            self.advance();
            Some(Box::new(self.parse_named_type()))
        } else {
            None
        };
        let span = tok.span.merge(self.prev_span());
        NamedTypeRepr {
            id: self.node_id(),
            span,
            name: tok.text,
            generic_args,
            nested,
        }
    }
}
