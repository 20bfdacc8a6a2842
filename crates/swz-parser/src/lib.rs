//! Parser for the swz compiler.
//!
//! This crate provides:
//! - The AST: closed node enums per category with spans and `NodeId`s
//! - `Visitor` - uniform dispatch over the tree
//! - `OperatorRegistry` - fixity/precedence/associativity, updated by
//!   `operator` declarations while parsing
//! - `ParserState` - the hand-written Pratt parser
//! - `printer` - AST-to-source serialization used by round-trip tests

pub mod ast;
pub mod operators;
pub mod parser;
pub mod printer;

pub use ast::{Decl, Expr, NodeId, Pattern, Program, Stmt, TypeRepr};
pub use operators::{Associativity, OperatorFixity, OperatorRegistry};
pub use parser::ParserState;

use swz_common::diagnostics::Diagnostic;

/// Parse a translation unit.
///
/// Returns the AST root together with all syntactic diagnostics; the AST is
/// returned even when diagnostics are present.
#[must_use]
pub fn parse(source: &str, file_name: &str) -> (Program, Vec<Diagnostic>) {
    let mut parser = ParserState::new(file_name, source);
    let program = parser.parse_source_file();
    (program, parser.take_diagnostics())
}
