//! Statement-level grammar: control flow, labels, and the dispatch into
//! declarations and expression statements.

use super::ParserState;
use crate::ast::*;
use swz_scanner::{Keyword, KeywordKind, TokenKind};

impl ParserState {
    pub(crate) fn parse_statement(&mut self) -> Stmt {
        if !self.enter_nesting() {
            let span = self.current.span;
            self.leave_nesting();
            return Stmt::Expr(self.error_expr(span));
        }
        let stmt = self.parse_statement_inner();
        self.leave_nesting();
        self.eat(TokenKind::Semicolon);
        stmt
    }

    fn parse_statement_inner(&mut self) -> Stmt {
        // Attributes (`@name`) only precede declarations.
        if self.at(TokenKind::At) {
            self.skip_attributes();
            return Stmt::Decl(self.parse_declaration());
        }

        if let Some(kw) = self.current.keyword() {
            match kw {
                Keyword::If => return self.parse_if_stmt(),
                Keyword::While => return self.parse_while_stmt(),
                Keyword::Repeat | Keyword::Do => return self.parse_repeat_while_stmt(),
                Keyword::For => return self.parse_for_stmt(),
                Keyword::Switch => return self.parse_switch_stmt(),
                Keyword::Break => {
                    let tok = self.advance();
                    let label = self.optional_label();
                    return Stmt::Break(BreakStmt {
                        id: self.node_id(),
                        span: tok.span.merge(self.prev_span()),
                        label,
                    });
                }
                Keyword::Continue => {
                    let tok = self.advance();
                    let label = self.optional_label();
                    return Stmt::Continue(ContinueStmt {
                        id: self.node_id(),
                        span: tok.span.merge(self.prev_span()),
                        label,
                    });
                }
                Keyword::Fallthrough => {
                    let tok = self.advance();
                    return Stmt::Fallthrough(FallthroughStmt {
                        id: self.node_id(),
                        span: tok.span,
                    });
                }
                Keyword::Return => {
                    let tok = self.advance();
                    let value = if self.starts_expression() {
                        Some(self.parse_expression())
                    } else {
                        None
                    };
                    let span = value
                        .as_ref()
                        .map_or(tok.span, |v| tok.span.merge(v.span()));
                    return Stmt::Return(ReturnStmt {
                        id: self.node_id(),
                        span,
                        value,
                    });
                }
                _ => {
                    if kw.kind() == KeywordKind::Declaration {
                        return Stmt::Decl(self.parse_declaration());
                    }
                    if self.at_declaration_modifier() {
                        return Stmt::Decl(self.parse_declaration());
                    }
                }
            }
        }

        // `label: for/while/repeat/switch`
        if self.current.is_name() && self.scanner.peek().kind == TokenKind::Colon {
            let probe = self.current.clone();
            let label = self.advance().text;
            self.advance(); // ':'
            if matches!(
                self.current.keyword(),
                Some(Keyword::For | Keyword::While | Keyword::Repeat | Keyword::Switch)
            ) {
                let inner = self.parse_statement_inner();
                let span = probe.span.merge(inner.span());
                return Stmt::Labeled(LabeledStmt {
                    id: self.node_id(),
                    span,
                    label,
                    statement: Box::new(inner),
                });
            }
            self.rewind_to(&probe);
        }

        Stmt::Expr(self.parse_expression())
    }

    /// A modifier keyword counts as opening a declaration only when another
    /// modifier or a declaration keyword follows.
    fn at_declaration_modifier(&mut self) -> bool {
        let Some(kw) = self.current.keyword() else {
            return false;
        };
        if !matches!(
            kw,
            Keyword::Static
                | Keyword::Mutating
                | Keyword::Override
                | Keyword::Final
                | Keyword::Lazy
                | Keyword::Weak
                | Keyword::Unowned
                | Keyword::Convenience
                | Keyword::Required
                | Keyword::Prefix
                | Keyword::Postfix
                | Keyword::Infix
        ) {
            return false;
        }
        matches!(
            self.scanner.peek().keyword(),
            Some(k) if k.kind() == KeywordKind::Declaration
                || matches!(
                    k,
                    Keyword::Static
                        | Keyword::Mutating
                        | Keyword::Override
                        | Keyword::Final
                        | Keyword::Convenience
                        | Keyword::Required
                        | Keyword::Prefix
                        | Keyword::Postfix
                        | Keyword::Infix
                )
        )
    }

    fn optional_label(&mut self) -> Option<String> {
        if self.current.is_name() && !self.space_crosses_newline() {
            return Some(self.advance().text);
        }
        None
    }

    /// Heuristic statement boundary: a `return`/`break` argument must stay on
    /// the same line.
    fn space_crosses_newline(&self) -> bool {
        let start = self.prev_span().end as usize;
        let end = (self.current.span.start as usize).min(self.scanner.source().len());
        self.scanner
            .source()
            .get(start..end)
            .is_some_and(|gap| gap.contains('\n'))
    }

    fn starts_expression(&self) -> bool {
        if self.space_crosses_newline() {
            return false;
        }
        match self.current.kind {
            TokenKind::Integer
            | TokenKind::Float
            | TokenKind::StringLit
            | TokenKind::OpenParen
            | TokenKind::OpenBracket
            | TokenKind::Operator => true,
            TokenKind::Identifier => {
                self.current.is_name()
                    || matches!(
                        self.current.keyword(),
                        Some(
                            Keyword::True
                                | Keyword::False
                                | Keyword::Nil
                                | Keyword::SelfKw
                                | Keyword::Super
                        )
                    )
            }
            _ => false,
        }
    }

    pub(crate) fn parse_code_block(&mut self) -> CodeBlock {
        let start = self.current.span;
        self.expect(TokenKind::OpenBrace, "{");
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
        CodeBlock {
            id: self.node_id(),
            span: start.merge(end),
            statements,
        }
    }

    fn parse_condition(&mut self) -> Expr {
        let saved = self.no_trailing_closure;
        self.no_trailing_closure = true;
        let cond = self.parse_expression();
        self.no_trailing_closure = saved;
        cond
    }

    fn parse_if_stmt(&mut self) -> Stmt {
        Stmt::If(self.parse_if_inner())
    }

    fn parse_if_inner(&mut self) -> IfStmt {
        let start = self.advance().span; // 'if'
        let condition = self.parse_condition();
        let then_block = self.parse_code_block();
        let mut span = start.merge(then_block.span);
        let else_branch = if self.eat_keyword(Keyword::Else) {
            if self.at_keyword(Keyword::If) {
                let nested = self.parse_if_inner();
                span = span.merge(nested.span);
                Some(Box::new(ElseBranch::ElseIf(nested)))
            } else {
                let block = self.parse_code_block();
                span = span.merge(block.span);
                Some(Box::new(ElseBranch::Else(block)))
            }
        } else {
            None
        };
        IfStmt {
            id: self.node_id(),
            span,
            condition,
            then_block,
            else_branch,
        }
    }

    fn parse_while_stmt(&mut self) -> Stmt {
        let start = self.advance().span; // 'while'
        let condition = self.parse_condition();
        let body = self.parse_code_block();
        Stmt::While(WhileStmt {
            id: self.node_id(),
            span: start.merge(body.span),
            condition,
            body,
        })
    }

    fn parse_repeat_while_stmt(&mut self) -> Stmt {
        let start = self.advance().span; // 'repeat' / 'do'
        let body = self.parse_code_block();
        if !self.eat_keyword(Keyword::While) {
            self.error_expect("while");
        }
        let condition = self.parse_condition();
        Stmt::RepeatWhile(RepeatWhileStmt {
            id: self.node_id(),
            span: start.merge(condition.span()),
            body,
            condition,
        })
    }

    fn parse_for_stmt(&mut self) -> Stmt {
        let start = self.advance().span; // 'for'

        // Try `for pattern in sequence { … }` first.
        let probe = self.current.clone();
        if !self.at(TokenKind::Semicolon) {
            let pattern = self.parse_pattern(false);
            if self.eat_keyword(Keyword::In) {
                let sequence = self.parse_condition();
                let body = self.parse_code_block();
                return Stmt::ForIn(ForInStmt {
                    id: self.node_id(),
                    span: start.merge(body.span),
                    pattern,
                    sequence,
                    body,
                });
            }
            self.rewind_to(&probe);
        }

        // C-style `for init; cond; step { … }`.
        let init = if self.at(TokenKind::Semicolon) {
            None
        } else if self.at_keyword(Keyword::Var) || self.at_keyword(Keyword::Let) {
            Some(Box::new(Stmt::Decl(self.parse_declaration())))
        } else {
            Some(Box::new(Stmt::Expr(self.parse_expression())))
        };
        self.expect(TokenKind::Semicolon, ";");
        let condition = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression())
        };
        self.expect(TokenKind::Semicolon, ";");
        let step = if self.at(TokenKind::OpenBrace) {
            None
        } else {
            Some(self.parse_condition())
        };
        let body = self.parse_code_block();
        Stmt::For(ForStmt {
            id: self.node_id(),
            span: start.merge(body.span),
            init,
            condition,
            step,
            body,
        })
    }

    fn parse_switch_stmt(&mut self) -> Stmt {
        let start = self.advance().span; // 'switch'
        let subject = self.parse_condition();
        self.expect(TokenKind::OpenBrace, "{");
        let mut cases = Vec::new();
        while !self.at(TokenKind::CloseBrace) && !self.at(TokenKind::Eof) {
            if self.at_keyword(Keyword::Case) {
                let case_start = self.advance().span;
                let mut items = Vec::new();
                loop {
                    let pattern = self.parse_pattern(true);
                    let guard = if self.eat_keyword(Keyword::Where) {
                        Some(self.parse_expression())
                    } else {
                        None
                    };
                    items.push(SwitchCaseItem { pattern, guard });
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::Colon, ":");
                let statements = self.parse_case_body();
                cases.push(SwitchCase {
                    id: self.node_id(),
                    span: case_start.merge(self.prev_span()),
                    items,
                    is_default: false,
                    statements,
                });
            } else if self.at_keyword(Keyword::Default) {
                let case_start = self.advance().span;
                self.expect(TokenKind::Colon, ":");
                let statements = self.parse_case_body();
                cases.push(SwitchCase {
                    id: self.node_id(),
                    span: case_start.merge(self.prev_span()),
                    items: Vec::new(),
                    is_default: true,
                    statements,
                });
            } else {
                self.error_expect("case");
                self.synchronize();
                if self.at(TokenKind::CloseBrace) || self.at(TokenKind::Eof) {
                    break;
                }
            }
        }
        let end = self.current.span;
        self.expect(TokenKind::CloseBrace, "}");
        Stmt::Switch(SwitchStmt {
            id: self.node_id(),
            span: start.merge(end),
            subject,
            cases,
        })
    }

    fn parse_case_body(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.at(TokenKind::CloseBrace)
            && !self.at(TokenKind::Eof)
            && !self.at_keyword(Keyword::Case)
            && !self.at_keyword(Keyword::Default)
        {
            while self.eat(TokenKind::Semicolon) {}
            if self.at(TokenKind::CloseBrace)
                || self.at(TokenKind::Eof)
                || self.at_keyword(Keyword::Case)
                || self.at_keyword(Keyword::Default)
            {
                break;
            }
            let before = self.current.span;
            statements.push(self.parse_statement());
            if self.current.span == before && !self.at(TokenKind::Eof) {
                self.advance();
            }
        }
        statements
    }

    pub(crate) fn skip_attributes(&mut self) {
        while self.eat(TokenKind::At) {
            let _ = self.expect_identifier();
            // Attribute arguments are skipped wholesale.
            if self.at(TokenKind::OpenParen) {
                let mut depth = 0usize;
                loop {
                    match self.current.kind {
                        TokenKind::OpenParen => depth += 1,
                        TokenKind::CloseParen => {
                            depth -= 1;
                            if depth == 0 {
                                self.advance();
                                break;
                            }
                        }
                        TokenKind::Eof => break,
                        _ => {}
                    }
                    self.advance();
                }
            }
        }
    }
}
