//! Token model.
//!
//! A token is a tagged record: kind, lexeme text, source span, the scanner
//! checkpoint taken before the token was lexed (so the parser can rewind),
//! and a kind-specific payload.

use crate::keyword::Keyword;
use crate::scanner::ScannerCheckpoint;
use serde::Serialize;
use swz_common::span::{Span, Spanned};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    Identifier,
    Integer,
    Float,
    StringLit,
    Operator,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    Comma,
    Colon,
    Semicolon,
    At,
    Comment,
    Eof,
}

/// How an identifier was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum IdentifierKind {
    Normal,
    /// Backtick-quoted, allowing keywords as names.
    Backtick,
    /// Implicit closure parameter `$0`, `$1`, …
    Implicit,
}

/// Operator fixity hint derived from surrounding whitespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FixityHint {
    /// Whitespace before, none after: `a -b`
    Prefix,
    /// No whitespace before, whitespace after: `a- b`
    Postfix,
    /// Both sides look the same: `a - b` or `a-b`
    Binary,
    /// Not enough context to tell.
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct IdentifierInfo {
    pub kind: IdentifierKind,
    pub keyword: Option<Keyword>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NumberInfo {
    /// Numeric base: 2, 8, 10, or 16.
    pub base: u32,
    /// Whether the literal carried an explicit sign character.
    pub sign: bool,
    /// Number of fraction digits (0 for integer literals).
    pub fraction_digits: u32,
    /// Number of exponent digits (0 when no exponent part).
    pub exponent_digits: u32,
    /// Integer value, saturated to 64 bits.
    pub value: i64,
    /// Floating value, parsed independently of `value`.
    pub dvalue: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StringInfo {
    /// Set when a `\(` interpolation follows this fragment.
    pub expression_follows: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OperatorInfo {
    pub hint: FixityHint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CommentInfo {
    /// Block comment (`/* … */`) rather than line comment.
    pub block: bool,
    /// Nesting depth reached inside a block comment.
    pub nested_levels: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum TokenPayload {
    None,
    Identifier(IdentifierInfo),
    Number(NumberInfo),
    Str(StringInfo),
    Operator(OperatorInfo),
    Comment(CommentInfo),
}

#[derive(Clone, Debug)]
pub struct Token {
    pub kind: TokenKind,
    /// Lexeme text. For strings this is the processed (unescaped) value;
    /// for backtick identifiers the name without backticks.
    pub text: String,
    pub span: Span,
    /// Scanner state before this token was lexed.
    pub checkpoint: ScannerCheckpoint,
    pub payload: TokenPayload,
}

impl Token {
    /// The keyword id, if this token is an unquoted keyword identifier.
    #[must_use]
    pub fn keyword(&self) -> Option<Keyword> {
        match self.payload {
            TokenPayload::Identifier(info) if info.kind != IdentifierKind::Backtick => {
                info.keyword
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.keyword() == Some(kw)
    }

    /// True for an identifier token usable as a plain name (including
    /// contextual keywords and backtick-quoted keywords).
    #[must_use]
    pub fn is_name(&self) -> bool {
        match self.payload {
            TokenPayload::Identifier(info) => match info.keyword {
                Some(kw) => {
                    info.kind == IdentifierKind::Backtick
                        || kw.kind() == crate::keyword::KeywordKind::Contextual
                }
                None => true,
            },
            _ => false,
        }
    }

    #[must_use]
    pub fn is_operator(&self, text: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == text
    }

    /// The fixity hint for an operator token; `Unknown` otherwise.
    #[must_use]
    pub fn fixity_hint(&self) -> FixityHint {
        match self.payload {
            TokenPayload::Operator(info) => info.hint,
            _ => FixityHint::Unknown,
        }
    }

    /// Whether a string fragment is continued by an interpolation.
    #[must_use]
    pub fn expression_follows(&self) -> bool {
        matches!(
            self.payload,
            TokenPayload::Str(StringInfo {
                expression_follows: true
            })
        )
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}
