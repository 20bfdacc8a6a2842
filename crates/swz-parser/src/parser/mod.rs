//! The hand-written parser.
//!
//! `ParserState` pulls tokens from the scanner one at a time, keeping a
//! single current token plus the scanner's own save/restore checkpoints for
//! speculative parses. Implementation is split by grammar area:
//! expressions, statements, declarations, patterns, and type references.

mod declarations;
mod expressions;
mod patterns;
mod statements;
mod types;

use crate::ast::*;
use crate::operators::OperatorRegistry;
use swz_common::diagnostics::{Diagnostic, diagnostic_codes as codes};
use swz_common::limits::MAX_NESTING_DEPTH;
use swz_common::span::Span;
use swz_scanner::{Keyword, ScannerState, Token, TokenKind};

pub struct ParserState {
    scanner: ScannerState,
    current: Token,
    file_name: String,
    diagnostics: Vec<Diagnostic>,
    registry: OperatorRegistry,
    next_node_id: u32,
    depth: usize,
    depth_exceeded: bool,
    /// Span of the most recently consumed token.
    prev_span: Span,
    /// Suppress trailing closures while parsing a control-flow condition.
    no_trailing_closure: bool,
}

impl ParserState {
    #[must_use]
    pub fn new(file_name: &str, source: &str) -> Self {
        let mut scanner = ScannerState::new(file_name, source);
        let current = scanner.next();
        Self {
            scanner,
            current,
            file_name: file_name.to_string(),
            diagnostics: Vec::new(),
            registry: OperatorRegistry::with_builtins(),
            next_node_id: 0,
            depth: 0,
            depth_exceeded: false,
            prev_span: Span::at(0),
            no_trailing_closure: false,
        }
    }

    /// Parse a whole translation unit. The AST is returned even when
    /// diagnostics were produced.
    pub fn parse_source_file(&mut self) -> Program {
        let start = self.current.span.start;
        let mut statements = Vec::new();
        while !self.at(TokenKind::Eof) && !self.depth_exceeded {
            while self.eat(TokenKind::Semicolon) {}
            if self.at(TokenKind::Eof) {
                break;
            }
            let before = self.current.span;
            statements.push(self.parse_statement());
            // Recovery of last resort: a statement that consumed nothing.
            if self.current.span == before && !self.at(TokenKind::Eof) {
                self.advance();
            }
        }
        let end = self.current.span.end;
        Program {
            statements,
            span: Span::new(start, end),
        }
    }

    #[must_use]
    pub fn get_diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        let mut all = self.scanner.take_diagnostics();
        all.append(&mut self.diagnostics);
        all.sort_by_key(|d| d.span.start);
        all
    }

    /// The operator registry after parsing (built-ins plus user declarations).
    #[must_use]
    pub fn operator_registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    // -------------------------------------------------------------------------
    // Token plumbing
    // -------------------------------------------------------------------------

    pub(crate) fn node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    pub(crate) fn advance(&mut self) -> Token {
        self.prev_span = self.current.span;
        std::mem::replace(&mut self.current, self.scanner.next())
    }

    /// Span of the last consumed token, for node spans that end at it.
    pub(crate) fn prev_span(&self) -> Span {
        self.prev_span
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub(crate) fn at_operator(&self, text: &str) -> bool {
        self.current.is_operator(text)
    }

    pub(crate) fn at_keyword(&self, kw: Keyword) -> bool {
        self.current.is_keyword(kw)
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            return true;
        }
        false
    }

    pub(crate) fn eat_operator(&mut self, text: &str) -> bool {
        if self.at_operator(text) {
            self.advance();
            return true;
        }
        false
    }

    pub(crate) fn eat_keyword(&mut self, kw: Keyword) -> bool {
        if self.at_keyword(kw) {
            self.advance();
            return true;
        }
        false
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, text: &str) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error_expect(text);
        false
    }

    /// Consume an identifier (or contextual keyword) and return its name.
    pub(crate) fn expect_identifier(&mut self) -> String {
        if self.current.is_name() {
            return self.advance().text;
        }
        let shown = self.token_text_for_diagnostic();
        self.error_current(codes::E_EXPECT_IDENTIFIER_1, vec![shown]);
        String::from("<error>")
    }

    /// Whether whitespace precedes the current token.
    pub(crate) fn space_before_current(&self) -> bool {
        self.scanner.has_space_before(self.current.span.start)
    }

    /// Rewind the scanner to just before the given token.
    pub(crate) fn rewind_to(&mut self, tok: &Token) {
        self.scanner.restore(&tok.checkpoint);
        self.current = self.scanner.next();
    }

    pub(crate) fn enter_nesting(&mut self) -> bool {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            if !self.depth_exceeded {
                self.depth_exceeded = true;
                self.error_current(codes::E_NESTING_TOO_DEEP, vec![]);
            }
            return false;
        }
        true
    }

    pub(crate) fn leave_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // -------------------------------------------------------------------------
    // Diagnostics and recovery
    // -------------------------------------------------------------------------

    pub(crate) fn error_at(&mut self, span: Span, code: u32, args: Vec<String>) {
        self.diagnostics
            .push(Diagnostic::error(code, self.file_name.clone(), span, args));
    }

    pub(crate) fn error_current(&mut self, code: u32, args: Vec<String>) {
        self.error_at(self.current.span, code, args);
    }

    pub(crate) fn error_expect(&mut self, expected: &str) {
        self.error_current(codes::E_EXPECT_1, vec![expected.to_string()]);
    }

    pub(crate) fn token_text_for_diagnostic(&self) -> String {
        if self.current.kind == TokenKind::Eof {
            "<eof>".to_string()
        } else {
            self.current.text.clone()
        }
    }

    /// Skip to the next synchronizing token: a statement terminator, a
    /// closing brace, or a top-level declaration/statement keyword.
    pub(crate) fn synchronize(&mut self) {
        loop {
            match self.current.kind {
                TokenKind::Eof | TokenKind::CloseBrace => return,
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::Identifier => {
                    if let Some(kw) = self.current.keyword() {
                        if matches!(
                            kw.kind(),
                            swz_scanner::KeywordKind::Declaration
                                | swz_scanner::KeywordKind::Statement
                        ) {
                            return;
                        }
                    }
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    pub(crate) fn error_expr(&mut self, span: Span) -> Expr {
        Expr::Error(ErrorExpr {
            id: self.node_id(),
            span,
        })
    }

    pub(crate) fn error_type(&mut self, span: Span) -> TypeRepr {
        TypeRepr::Error(ErrorTypeRepr {
            id: self.node_id(),
            span,
        })
    }
}
