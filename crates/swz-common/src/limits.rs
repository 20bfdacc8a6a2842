//! Centralized compiler limits.
//!
//! These are not tuning knobs; they bound recursion so that pathological
//! inputs produce a diagnostic instead of a stack overflow.

/// Maximum nesting depth in the parser and semantic analyzer.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Iteration ceiling for scope-chain walks.
pub const MAX_SCOPE_WALK_ITERATIONS: usize = 10_000;
