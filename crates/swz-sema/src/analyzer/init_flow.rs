//! Initialization tracking.
//!
//! A stack of frames records which symbols become initialized in the current
//! region. Sequential frames (function bodies) simply accumulate; branching
//! frames (`if`/`switch`) record per-branch sets that are intersected at the
//! merge point, and symbols initialized on only some paths lose the flag.

use crate::symbol::{SymbolFlags, SymbolId};
use rustc_hash::FxHashSet;

use super::SemanticAnalyzer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracerKind {
    Sequence,
    Branch,
}

#[derive(Debug)]
pub(crate) struct InitFrame {
    pub kind: TracerKind,
    pub initialized: FxHashSet<SymbolId>,
}

impl InitFrame {
    pub fn new(kind: TracerKind) -> Self {
        Self {
            kind,
            initialized: FxHashSet::default(),
        }
    }
}

impl SemanticAnalyzer<'_> {
    /// Mark a symbol initialized, recording it in the active frame.
    pub(crate) fn mark_initialized(&mut self, sym: SymbolId) {
        if self.registry.symbols.has_flags(sym, SymbolFlags::INITIALIZED) {
            return;
        }
        self.registry
            .symbols
            .set_flags(sym, SymbolFlags::INITIALIZED, true);
        if let Some(frame) = self.init_frames.last_mut() {
            frame.initialized.insert(sym);
        }
    }

    /// Run one branch of a conditional region, returning the set of symbols
    /// it initialized. The flags are withdrawn again so sibling branches see
    /// the pre-branch state; `join_branches` restores what holds on every
    /// path.
    pub(crate) fn run_branch(
        &mut self,
        f: impl FnOnce(&mut Self),
    ) -> FxHashSet<SymbolId> {
        self.init_frames.push(InitFrame::new(TracerKind::Branch));
        f(self);
        let frame = self.init_frames.pop().expect("branch frame");
        for &sym in &frame.initialized {
            self.registry
                .symbols
                .set_flags(sym, SymbolFlags::INITIALIZED, false);
        }
        frame.initialized
    }

    /// Join control-flow branches: symbols initialized on *every* path become
    /// initialized in the enclosing frame; the rest stay uninitialized.
    /// `exhaustive` is false when some path skips the region entirely (an
    /// `if` without `else`), which makes the intersection empty.
    pub(crate) fn join_branches(
        &mut self,
        branches: Vec<FxHashSet<SymbolId>>,
        exhaustive: bool,
    ) {
        let merged: FxHashSet<SymbolId> = if exhaustive && !branches.is_empty() {
            branches
                .iter()
                .skip(1)
                .fold(branches[0].clone(), |acc, b| {
                    acc.intersection(b).copied().collect()
                })
        } else {
            FxHashSet::default()
        };
        for &sym in &merged {
            self.registry
                .symbols
                .set_flags(sym, SymbolFlags::INITIALIZED, true);
            if let Some(frame) = self.init_frames.last_mut() {
                frame.initialized.insert(sym);
            }
        }
    }
}
