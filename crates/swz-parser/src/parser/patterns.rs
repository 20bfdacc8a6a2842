//! Pattern grammar for bindings, `for-in`, and `switch` cases.

use super::ParserState;
use crate::ast::*;
use swz_common::diagnostics::diagnostic_codes as codes;
use swz_scanner::{Keyword, TokenKind};

impl ParserState {
    /// Parse a pattern. `in_case` admits expression patterns (literals) and
    /// enum-case patterns with bindings, as used in `switch` cases.
    pub(crate) fn parse_pattern(&mut self, in_case: bool) -> Pattern {
        let pattern = self.parse_pattern_primary(in_case);
        // `p : T`
        if self.at(TokenKind::Colon) {
            self.advance();
            let ty = self.parse_type();
            let span = pattern.span().merge(ty.span());
            return Pattern::Typed(TypedPattern {
                id: self.node_id(),
                span,
                pattern: Box::new(pattern),
                ty,
            });
        }
        pattern
    }

    fn parse_pattern_primary(&mut self, in_case: bool) -> Pattern {
        // `let p` / `var p` inside a pattern.
        if self.at_keyword(Keyword::Let) || self.at_keyword(Keyword::Var) {
            let constant = self.at_keyword(Keyword::Let);
            let start = self.advance().span;
            let inner = self.parse_pattern_primary(in_case);
            let span = start.merge(inner.span());
            return Pattern::ValueBinding(ValueBindingPattern {
                id: self.node_id(),
                span,
                constant,
                pattern: Box::new(inner),
            });
        }

        // Tuple pattern.
        if self.at(TokenKind::OpenParen) {
            let start = self.advance().span;
            let mut elements = Vec::new();
            if !self.at(TokenKind::CloseParen) {
                loop {
                    elements.push(self.parse_pattern(in_case));
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }
            let end = self.current.span;
            self.expect(TokenKind::CloseParen, ")");
            return Pattern::Tuple(TuplePattern {
                id: self.node_id(),
                span: start.merge(end),
                elements,
            });
        }

        // Enum-case pattern: `.Name` with optional associated binding.
        if self.at_operator(".") {
            let start = self.advance().span;
            let name = self.expect_identifier();
            let associated = if self.at(TokenKind::OpenParen) {
                Some(Box::new(self.parse_pattern_primary(in_case)))
            } else {
                None
            };
            let span = start.merge(self.prev_span());
            return Pattern::EnumCase(EnumCasePattern {
                id: self.node_id(),
                span,
                name,
                associated,
            });
        }

        // Identifier or wildcard.
        if self.current.is_name() {
            let tok = self.advance();
            if tok.text == "_" {
                return Pattern::Wildcard(WildcardPattern {
                    id: self.node_id(),
                    span: tok.span,
                });
            }
            return Pattern::Identifier(IdentifierPattern {
                id: self.node_id(),
                span: tok.span,
                name: tok.text,
            });
        }

        // In case position, anything else is matched as an expression.
        if in_case {
            let expr = self.parse_expression();
            let span = expr.span();
            return Pattern::Expr(ExprPattern {
                id: self.node_id(),
                span,
                expr,
            });
        }

        let span = self.current.span;
        self.error_current(codes::E_EXPECT_TUPLE_OR_IDENTIFIER, vec![]);
        Pattern::Wildcard(WildcardPattern {
            id: self.node_id(),
            span,
        })
    }
}
