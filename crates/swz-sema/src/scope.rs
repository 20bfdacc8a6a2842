//! Scopes: a forest of nested symbol tables with two namespaces.
//!
//! Each scope owns a value map and a type map; lookups walk the immutable
//! parent chain. The file scope additionally carries the extension table.

use crate::symbol::SymbolId;
use crate::types::TypeId;
use rustc_hash::FxHashMap;
use swz_common::limits::MAX_SCOPE_WALK_ITERATIONS;
use swz_parser::ast::NodeId;

/// Handle to a scope in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

#[derive(Debug, Default)]
pub struct ScopeData {
    pub parent: Option<ScopeId>,
    pub owner: Option<NodeId>,
    pub values: FxHashMap<String, SymbolId>,
    pub types: FxHashMap<String, TypeId>,
    /// Extensions keyed by extended type name; populated on the file scope.
    pub extensions: FxHashMap<String, Vec<TypeId>>,
}

#[derive(Default)]
pub struct ScopeArena {
    scopes: Vec<ScopeData>,
}

impl ScopeArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, parent: Option<ScopeId>, owner: Option<NodeId>) -> ScopeId {
        let id = ScopeId(u32::try_from(self.scopes.len()).unwrap_or(u32::MAX));
        self.scopes.push(ScopeData {
            parent,
            owner,
            ..ScopeData::default()
        });
        id
    }

    #[must_use]
    pub fn get(&self, id: ScopeId) -> &ScopeData {
        &self.scopes[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: ScopeId) -> &mut ScopeData {
        &mut self.scopes[id.0 as usize]
    }

    /// Look a name up in the value namespace, walking the parent chain.
    /// Returns the symbol together with its defining scope.
    #[must_use]
    pub fn lookup_symbol(&self, from: ScopeId, name: &str) -> Option<(SymbolId, ScopeId)> {
        let mut current = Some(from);
        let mut steps = 0;
        while let Some(id) = current {
            if steps >= MAX_SCOPE_WALK_ITERATIONS {
                break;
            }
            if let Some(&sym) = self.get(id).values.get(name) {
                return Some((sym, id));
            }
            current = self.get(id).parent;
            steps += 1;
        }
        None
    }

    /// Look a name up in the type namespace, walking the parent chain.
    #[must_use]
    pub fn lookup_type(&self, from: ScopeId, name: &str) -> Option<(TypeId, ScopeId)> {
        let mut current = Some(from);
        let mut steps = 0;
        while let Some(id) = current {
            if steps >= MAX_SCOPE_WALK_ITERATIONS {
                break;
            }
            if let Some(&ty) = self.get(id).types.get(name) {
                return Some((ty, id));
            }
            current = self.get(id).parent;
            steps += 1;
        }
        None
    }
}
