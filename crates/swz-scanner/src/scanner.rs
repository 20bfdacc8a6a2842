//! The stateful lexer.
//!
//! Token classification depends on surrounding whitespace (operator fixity
//! hints) and the scanner re-enters string literals after interpolation
//! expressions. `save`/`restore` give the parser checkpoints to rewind to.

use crate::keyword::Keyword;
use crate::token::{
    CommentInfo, FixityHint, IdentifierInfo, IdentifierKind, NumberInfo, OperatorInfo, StringInfo,
    Token, TokenKind, TokenPayload,
};
use memchr::memchr;
use smallvec::SmallVec;
use swz_common::diagnostics::{Diagnostic, diagnostic_codes as codes};
use swz_common::span::Span;

/// Characters an operator lexeme may be built from.
const OPERATOR_CHARS: &str = "/=-+!*%<>&|^~.";

/// A snapshot of the scanner state, taken before each token.
#[derive(Clone, Debug)]
pub struct ScannerCheckpoint {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
    /// Whether the next token continues a string literal.
    pub in_string: bool,
    paren_depth: u32,
    interp_stack: SmallVec<[u32; 2]>,
}

pub struct ScannerState {
    file_name: String,
    source: String,
    offset: usize,
    line: u32,
    column: u32,
    /// Parenthesis depth, used to find the `)` that closes an interpolation.
    paren_depth: u32,
    /// Depths at which open interpolations began.
    interp_stack: SmallVec<[u32; 2]>,
    /// The next token resumes the enclosing string literal.
    resume_string: bool,
    keep_comments: bool,
    peeked: Option<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl ScannerState {
    #[must_use]
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
            offset: 0,
            line: 1,
            column: 1,
            paren_depth: 0,
            interp_stack: SmallVec::new(),
            resume_string: false,
            keep_comments: false,
            peeked: None,
            diagnostics: Vec::new(),
        }
    }

    /// Surface comment tokens instead of skipping them.
    pub fn keep_comments(&mut self, keep: bool) {
        self.keep_comments = keep;
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the character immediately before this offset is whitespace.
    /// The start of input counts as whitespace.
    #[must_use]
    pub fn has_space_before(&self, offset: u32) -> bool {
        let offset = offset as usize;
        if offset == 0 {
            return true;
        }
        self.source[..offset]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Consume and return the next token.
    pub fn next(&mut self) -> Token {
        if let Some(tok) = self.peeked.take() {
            return tok;
        }
        self.lex()
    }

    /// Look at the next token without consuming it.
    pub fn peek(&mut self) -> &Token {
        if self.peeked.is_none() {
            let tok = self.lex();
            self.peeked = Some(tok);
        }
        self.peeked.as_ref().unwrap()
    }

    /// Snapshot the scanner state before the next token.
    #[must_use]
    pub fn save(&self) -> ScannerCheckpoint {
        if let Some(tok) = &self.peeked {
            return tok.checkpoint.clone();
        }
        self.checkpoint()
    }

    /// Rewind to a previously saved checkpoint.
    pub fn restore(&mut self, cp: &ScannerCheckpoint) {
        self.peeked = None;
        self.offset = cp.offset as usize;
        self.line = cp.line;
        self.column = cp.column;
        self.resume_string = cp.in_string;
        self.paren_depth = cp.paren_depth;
        self.interp_stack = cp.interp_stack.clone();
    }

    /// Consume the next token if it is an operator with exactly this text.
    pub fn match_operator(&mut self, text: &str) -> bool {
        if self.peek().is_operator(text) {
            self.next();
            return true;
        }
        false
    }

    fn checkpoint(&self) -> ScannerCheckpoint {
        ScannerCheckpoint {
            offset: self.offset as u32,
            line: self.line,
            column: self.column,
            in_string: self.resume_string,
            paren_depth: self.paren_depth,
            interp_stack: self.interp_stack.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Character helpers
    // -------------------------------------------------------------------------

    fn rest(&self) -> &str {
        &self.source[self.offset..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_char_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    fn error(&mut self, code: u32, span: Span, args: Vec<String>) {
        self.diagnostics
            .push(Diagnostic::error(code, self.file_name.clone(), span, args));
    }

    // -------------------------------------------------------------------------
    // Main lexing loop
    // -------------------------------------------------------------------------

    fn lex(&mut self) -> Token {
        if self.resume_string {
            let cp = self.checkpoint();
            self.resume_string = false;
            return self.lex_string(cp, self.offset);
        }

        loop {
            self.skip_whitespace();
            if self.starts_with("//") {
                let tok = self.lex_line_comment();
                if self.keep_comments {
                    return tok;
                }
                continue;
            }
            if self.starts_with("/*") {
                let tok = self.lex_block_comment();
                if self.keep_comments {
                    return tok;
                }
                continue;
            }
            break;
        }

        let cp = self.checkpoint();
        let start = self.offset;
        let Some(ch) = self.peek_char() else {
            return self.make_token(TokenKind::Eof, String::new(), start, cp, TokenPayload::None);
        };

        if ch.is_alphabetic() || ch == '_' {
            return self.lex_identifier(cp, start);
        }
        if ch == '`' {
            return self.lex_backtick_identifier(cp, start);
        }
        if ch == '$' {
            return self.lex_implicit_parameter(cp, start);
        }
        if ch.is_ascii_digit() {
            return self.lex_number(cp, start);
        }
        if ch == '"' {
            self.bump();
            return self.lex_string(cp, start);
        }
        if OPERATOR_CHARS.contains(ch) {
            return self.lex_operator(cp, start);
        }

        let kind = match ch {
            '(' => Some(TokenKind::OpenParen),
            ')' => Some(TokenKind::CloseParen),
            '[' => Some(TokenKind::OpenBracket),
            ']' => Some(TokenKind::CloseBracket),
            '{' => Some(TokenKind::OpenBrace),
            '}' => Some(TokenKind::CloseBrace),
            ',' => Some(TokenKind::Comma),
            ':' => Some(TokenKind::Colon),
            ';' => Some(TokenKind::Semicolon),
            '@' => Some(TokenKind::At),
            '?' => Some(TokenKind::Operator),
            _ => None,
        };
        if let Some(kind) = kind {
            self.bump();
            if kind == TokenKind::OpenParen {
                self.paren_depth += 1;
            } else if kind == TokenKind::CloseParen {
                // The `)` matching a `\(` hands control back to string lexing.
                if self.interp_stack.last() == Some(&self.paren_depth) {
                    self.interp_stack.pop();
                    self.resume_string = true;
                } else {
                    self.paren_depth = self.paren_depth.saturating_sub(1);
                }
            }
            let payload = if kind == TokenKind::Operator {
                TokenPayload::Operator(OperatorInfo {
                    hint: self.fixity_hint(start),
                })
            } else {
                TokenPayload::None
            };
            return self.make_token(kind, ch.to_string(), start, cp, payload);
        }

        // Stray character: diagnose and continue with a best-effort token.
        self.bump();
        let span = Span::new(start as u32, self.offset as u32);
        self.error(codes::E_UNEXPECTED_CHARACTER_1, span, vec![ch.to_string()]);
        self.make_token(TokenKind::Operator, ch.to_string(), start, cp, TokenPayload::None)
    }

    fn make_token(
        &self,
        kind: TokenKind,
        text: String,
        start: usize,
        cp: ScannerCheckpoint,
        payload: TokenPayload,
    ) -> Token {
        Token {
            kind,
            text,
            span: Span::new(start as u32, self.offset as u32),
            checkpoint: cp,
            payload,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Comments
    // -------------------------------------------------------------------------

    fn lex_line_comment(&mut self) -> Token {
        let cp = self.checkpoint();
        let start = self.offset;
        // Leave the newline itself for whitespace skipping.
        let end = match memchr(b'\n', self.rest().as_bytes()) {
            Some(pos) => self.offset + pos,
            None => self.source.len(),
        };
        while self.offset < end {
            self.bump();
        }
        let text = self.source[start..self.offset].to_string();
        self.make_token(
            TokenKind::Comment,
            text,
            start,
            cp,
            TokenPayload::Comment(CommentInfo {
                block: false,
                nested_levels: 0,
            }),
        )
    }

    fn lex_block_comment(&mut self) -> Token {
        let cp = self.checkpoint();
        let start = self.offset;
        self.bump(); // '/'
        self.bump(); // '*'
        let mut depth: u32 = 1;
        let mut max_depth: u32 = 1;
        loop {
            if self.starts_with("/*") {
                self.bump();
                self.bump();
                depth += 1;
                max_depth = max_depth.max(depth);
            } else if self.starts_with("*/") {
                self.bump();
                self.bump();
                depth -= 1;
                if depth == 0 {
                    break;
                }
            } else if self.bump().is_none() {
                let span = Span::new(start as u32, self.offset as u32);
                self.error(codes::E_UNTERMINATED_BLOCK_COMMENT, span, vec![]);
                break;
            }
        }
        let text = self.source[start..self.offset].to_string();
        self.make_token(
            TokenKind::Comment,
            text,
            start,
            cp,
            TokenPayload::Comment(CommentInfo {
                block: true,
                nested_levels: max_depth,
            }),
        )
    }

    // -------------------------------------------------------------------------
    // Identifiers
    // -------------------------------------------------------------------------

    fn lex_identifier(&mut self, cp: ScannerCheckpoint, start: usize) -> Token {
        while let Some(ch) = self.peek_char() {
            if ch.is_alphanumeric() || ch == '_' {
                self.bump();
            } else {
                break;
            }
        }
        let text = self.source[start..self.offset].to_string();
        let keyword = Keyword::from_str(&text);
        self.make_token(
            TokenKind::Identifier,
            text,
            start,
            cp,
            TokenPayload::Identifier(IdentifierInfo {
                kind: IdentifierKind::Normal,
                keyword,
            }),
        )
    }

    fn lex_backtick_identifier(&mut self, cp: ScannerCheckpoint, start: usize) -> Token {
        self.bump(); // '`'
        let name_start = self.offset;
        while let Some(ch) = self.peek_char() {
            if ch.is_alphanumeric() || ch == '_' {
                self.bump();
            } else {
                break;
            }
        }
        let text = self.source[name_start..self.offset].to_string();
        if self.peek_char() == Some('`') {
            self.bump();
        } else {
            let span = Span::new(start as u32, self.offset as u32);
            self.error(codes::E_EXPECT_1, span, vec!["`".to_string()]);
        }
        let keyword = Keyword::from_str(&text);
        self.make_token(
            TokenKind::Identifier,
            text,
            start,
            cp,
            TokenPayload::Identifier(IdentifierInfo {
                kind: IdentifierKind::Backtick,
                keyword,
            }),
        )
    }

    fn lex_implicit_parameter(&mut self, cp: ScannerCheckpoint, start: usize) -> Token {
        self.bump(); // '$'
        let mut has_digits = false;
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                has_digits = true;
                self.bump();
            } else {
                break;
            }
        }
        let text = self.source[start..self.offset].to_string();
        if !has_digits {
            let span = Span::new(start as u32, self.offset as u32);
            self.error(codes::E_UNEXPECTED_CHARACTER_1, span, vec!["$".to_string()]);
        }
        self.make_token(
            TokenKind::Identifier,
            text,
            start,
            cp,
            TokenPayload::Identifier(IdentifierInfo {
                kind: IdentifierKind::Implicit,
                keyword: None,
            }),
        )
    }

    // -------------------------------------------------------------------------
    // Numbers
    // -------------------------------------------------------------------------

    fn lex_number(&mut self, cp: ScannerCheckpoint, start: usize) -> Token {
        let mut base: u32 = 10;
        if self.starts_with("0b") {
            base = 2;
            self.bump();
            self.bump();
        } else if self.starts_with("0o") {
            base = 8;
            self.bump();
            self.bump();
        } else if self.starts_with("0x") {
            base = 16;
            self.bump();
            self.bump();
        }

        let mut value: i64 = 0;
        let mut any_digits = false;
        let mut digits = String::new();
        while let Some(ch) = self.peek_char() {
            if ch == '_' {
                self.bump();
                continue;
            }
            let Some(d) = ch.to_digit(base) else { break };
            any_digits = true;
            digits.push(ch);
            value = value
                .checked_mul(i64::from(base))
                .and_then(|v| v.checked_add(i64::from(d)))
                .unwrap_or(i64::MAX);
            self.bump();
        }

        let mut fraction_digits: u32 = 0;
        let mut fraction = String::new();
        if (base == 10 || base == 16)
            && self.peek_char() == Some('.')
            && self.peek_char_at(1).is_some_and(|c| c.to_digit(base).is_some())
        {
            self.bump(); // '.'
            while let Some(ch) = self.peek_char() {
                if ch == '_' {
                    self.bump();
                    continue;
                }
                if ch.to_digit(base).is_some() {
                    fraction.push(ch);
                    fraction_digits += 1;
                    self.bump();
                } else {
                    break;
                }
            }
        }

        let mut exponent_digits: u32 = 0;
        let mut exponent = String::new();
        let mut exponent_negative = false;
        let mut saw_exp_marker = false;
        let exp_marker = if base == 16 { ['p', 'P'] } else { ['e', 'E'] };
        if base != 2
            && base != 8
            && self.peek_char().is_some_and(|c| exp_marker.contains(&c))
        {
            saw_exp_marker = true;
            self.bump();
            if let Some(sign) = self.peek_char() {
                if sign == '+' || sign == '-' {
                    exponent_negative = sign == '-';
                    self.bump();
                }
            }
            while let Some(ch) = self.peek_char() {
                if ch == '_' {
                    self.bump();
                    continue;
                }
                if ch.is_ascii_digit() {
                    exponent.push(ch);
                    exponent_digits += 1;
                    self.bump();
                } else {
                    break;
                }
            }
        }

        let text = self.source[start..self.offset].to_string();
        if !any_digits || (saw_exp_marker && exponent_digits == 0) {
            let span = Span::new(start as u32, self.offset as u32);
            self.error(codes::E_INVALID_NUMBER_LITERAL_1, span, vec![text.clone()]);
        }

        let dvalue = Self::parse_double(
            base,
            &digits,
            &fraction,
            &exponent,
            exponent_negative,
            value,
        );

        let is_float = fraction_digits > 0 || exponent_digits > 0;
        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Integer
        };
        self.make_token(
            kind,
            text,
            start,
            cp,
            TokenPayload::Number(NumberInfo {
                base,
                sign: false,
                fraction_digits,
                exponent_digits,
                value,
                dvalue,
            }),
        )
    }

    /// Compute the floating value of a literal independently of the saturated
    /// integer value.
    fn parse_double(
        base: u32,
        digits: &str,
        fraction: &str,
        exponent: &str,
        exponent_negative: bool,
        int_value: i64,
    ) -> f64 {
        match base {
            10 => {
                let mut s = String::from(digits);
                if !fraction.is_empty() {
                    s.push('.');
                    s.push_str(fraction);
                }
                if !exponent.is_empty() {
                    s.push('e');
                    if exponent_negative {
                        s.push('-');
                    }
                    s.push_str(exponent);
                }
                s.parse::<f64>().unwrap_or(int_value as f64)
            }
            16 => {
                let mut mantissa = 0f64;
                for ch in digits.chars() {
                    mantissa = mantissa * 16.0 + f64::from(ch.to_digit(16).unwrap_or(0));
                }
                let mut scale = 1.0 / 16.0;
                for ch in fraction.chars() {
                    mantissa += f64::from(ch.to_digit(16).unwrap_or(0)) * scale;
                    scale /= 16.0;
                }
                let mut exp: i32 = exponent.parse().unwrap_or(0);
                if exponent_negative {
                    exp = -exp;
                }
                mantissa * 2f64.powi(exp)
            }
            _ => int_value as f64,
        }
    }

    // -------------------------------------------------------------------------
    // Strings
    // -------------------------------------------------------------------------

    /// Lex a string fragment. Entered either just after an opening quote or
    /// when resuming after an interpolation's closing `)`.
    fn lex_string(&mut self, cp: ScannerCheckpoint, start: usize) -> Token {
        let mut value = String::new();
        let mut expression_follows = false;
        loop {
            match self.peek_char() {
                None | Some('\n') => {
                    let span = Span::new(start as u32, self.offset as u32);
                    self.error(codes::E_UNTERMINATED_STRING_LITERAL, span, vec![]);
                    break;
                }
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    self.bump();
                    match self.peek_char() {
                        Some('(') => {
                            self.bump();
                            self.interp_stack.push(self.paren_depth);
                            expression_follows = true;
                            break;
                        }
                        Some('n') => {
                            self.bump();
                            value.push('\n');
                        }
                        Some('r') => {
                            self.bump();
                            value.push('\r');
                        }
                        Some('t') => {
                            self.bump();
                            value.push('\t');
                        }
                        Some('0') => {
                            self.bump();
                            value.push('\0');
                        }
                        Some('\\') => {
                            self.bump();
                            value.push('\\');
                        }
                        Some('"') => {
                            self.bump();
                            value.push('"');
                        }
                        Some('\'') => {
                            self.bump();
                            value.push('\'');
                        }
                        Some('u') => {
                            self.bump();
                            self.lex_unicode_escape(start, &mut value);
                        }
                        other => {
                            let span = Span::new(start as u32, self.offset as u32);
                            let shown = other.map_or(String::new(), |c| c.to_string());
                            self.error(codes::E_INVALID_ESCAPE_SEQUENCE_1, span, vec![shown]);
                            if other.is_some() {
                                self.bump();
                            }
                        }
                    }
                }
                Some(c) => {
                    self.bump();
                    value.push(c);
                }
            }
        }
        self.make_token(
            TokenKind::StringLit,
            value,
            start,
            cp,
            TokenPayload::Str(StringInfo { expression_follows }),
        )
    }

    fn lex_unicode_escape(&mut self, start: usize, value: &mut String) {
        if self.peek_char() != Some('{') {
            let span = Span::new(start as u32, self.offset as u32);
            self.error(codes::E_INVALID_ESCAPE_SEQUENCE_1, span, vec!["u".into()]);
            return;
        }
        self.bump(); // '{'
        let mut code: u32 = 0;
        let mut any = false;
        while let Some(ch) = self.peek_char() {
            if let Some(d) = ch.to_digit(16) {
                code = code.saturating_mul(16).saturating_add(d);
                any = true;
                self.bump();
            } else {
                break;
            }
        }
        if self.peek_char() == Some('}') {
            self.bump();
        } else {
            any = false;
        }
        match char::from_u32(code) {
            Some(c) if any => value.push(c),
            _ => {
                let span = Span::new(start as u32, self.offset as u32);
                self.error(codes::E_INVALID_ESCAPE_SEQUENCE_1, span, vec!["u".into()]);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Operators
    // -------------------------------------------------------------------------

    fn lex_operator(&mut self, cp: ScannerCheckpoint, start: usize) -> Token {
        // Dot operators are runs of dots (`.`, `..`, `...`); any other run
        // stops at a dot so `x!.y` lexes as `!` then `.`.
        let dotted = self.peek_char() == Some('.');
        while let Some(ch) = self.peek_char() {
            let allowed = if dotted {
                ch == '.'
            } else {
                ch != '.' && OPERATOR_CHARS.contains(ch)
            };
            if !allowed {
                break;
            }
            // A comment start terminates the operator run.
            if self.starts_with("//") || self.starts_with("/*") {
                break;
            }
            self.bump();
        }
        let text = self.source[start..self.offset].to_string();
        let hint = self.fixity_hint(start);
        self.make_token(
            TokenKind::Operator,
            text,
            start,
            cp,
            TokenPayload::Operator(OperatorInfo { hint }),
        )
    }

    /// Classify operator fixity from surrounding whitespace.
    fn fixity_hint(&self, start: usize) -> FixityHint {
        let before = if start == 0 {
            None
        } else {
            self.source[..start]
                .chars()
                .next_back()
                .map(char::is_whitespace)
        };
        let after = self.peek_char().map(char::is_whitespace);
        match (before, after) {
            (Some(b), Some(a)) => {
                if b && !a {
                    FixityHint::Prefix
                } else if !b && a {
                    FixityHint::Postfix
                } else {
                    FixityHint::Binary
                }
            }
            (None, Some(a)) => {
                if a {
                    FixityHint::Unknown
                } else {
                    FixityHint::Prefix
                }
            }
            (Some(b), None) => {
                if b {
                    FixityHint::Unknown
                } else {
                    FixityHint::Postfix
                }
            }
            (None, None) => FixityHint::Unknown,
        }
    }
}
