//! Semantic analysis for the swz compiler.
//!
//! This crate provides:
//! - `TypeArena` / `TypeId` - interned type representation
//! - `SymbolArena` / `Symbol` - the value namespace
//! - `ScopeArena` - nested scopes with value and type namespaces
//! - `SymbolRegistry::bootstrap()` - the built-in global scope
//! - `SemanticAnalyzer` - declaration resolution, type inference with
//!   contextual types, overload resolution, initialization tracking, and
//!   protocol conformance checking

pub mod analyzer;
pub mod registry;
pub mod scope;
pub mod symbol;
pub mod types;

pub use analyzer::{
    AnalysisResult, Annotations, ImplicitConversion, SemanticAnalyzer, TupleExtraction, analyze,
};
pub use registry::{BuiltinTypes, SymbolRegistry};
pub use scope::{ScopeArena, ScopeId};
pub use symbol::{MemberFilter, PlaceholderRole, Symbol, SymbolArena, SymbolFlags, SymbolId};
pub use types::{TypeArena, TypeCategory, TypeId};
