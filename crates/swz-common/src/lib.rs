//! Common types and utilities for the swz compiler.
//!
//! This crate provides foundational types used across all swz crates:
//! - Source spans (`Span`, `Spanned`)
//! - Line/column conversion (`LineMap`, `LineCol`)
//! - Diagnostics (`Diagnostic`, severity, stable codes, message templates)
//! - Compiler limits and thresholds

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::{Span, Spanned};

// Line/column types for source locations
pub mod position;
pub use position::{LineCol, LineMap};

// Diagnostics - severity, codes, message templates
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticSeverity, diagnostic_codes, format_message};

// Centralized limits and thresholds
pub mod limits;
