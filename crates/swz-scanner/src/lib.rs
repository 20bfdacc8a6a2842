//! Tokenizer for the swz compiler.
//!
//! This crate provides:
//! - `Token` and its kind-specific payloads
//! - `Keyword` classification
//! - `ScannerState` - the stateful lexer with save/restore checkpoints and
//!   string-interpolation re-entry

pub mod keyword;
pub mod scanner;
pub mod token;

pub use keyword::{Keyword, KeywordKind};
pub use scanner::{ScannerCheckpoint, ScannerState};
pub use token::{
    CommentInfo, FixityHint, IdentifierInfo, IdentifierKind, NumberInfo, OperatorInfo, StringInfo,
    Token, TokenKind, TokenPayload,
};
