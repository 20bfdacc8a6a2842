//! Symbols: named entities in the value namespace.
//!
//! A name may map to a nominal type, a placeholder (variable, constant,
//! property, or parameter), a single function, or an overload set; the sum
//! lives at the symbol level rather than in separate namespaces.

use crate::types::TypeId;
use bitflags::bitflags;
use swz_parser::ast::NodeId;

/// Handle to a symbol in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SymbolFlags: u32 {
        const READABLE     = 1 << 0;
        const WRITABLE     = 1 << 1;
        const INITIALIZED  = 1 << 2;
        /// Being initialized right now; a read in this state is
        /// `let x = x + 1`.
        const INITIALIZING = 1 << 3;
        const MEMBER       = 1 << 4;
        const STATIC       = 1 << 5;
        const PREFIX       = 1 << 6;
        const POSTFIX      = 1 << 7;
        const INFIX        = 1 << 8;
        /// Declared in an extension.
        const EXTENSION    = 1 << 9;
        /// Compiler-introduced temporary.
        const TEMPORARY    = 1 << 10;
    }
}

bitflags! {
    /// Member lookup filter.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct MemberFilter: u32 {
        /// Static members instead of instance members.
        const STATIC        = 1 << 0;
        /// Walk the class parent chain.
        const RECURSIVE     = 1 << 1;
        /// Fall back to extensions registered in the file scope.
        const IN_EXTENSION  = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceholderRole {
    Variable,
    Constant,
    Property,
    Parameter,
}

#[derive(Clone, Debug)]
pub enum Symbol {
    /// A nominal type used as a value-namespace symbol.
    Type(TypeId),
    Placeholder {
        name: String,
        ty: TypeId,
        role: PlaceholderRole,
        flags: SymbolFlags,
    },
    Function {
        name: String,
        ty: TypeId,
        flags: SymbolFlags,
        decl: Option<NodeId>,
    },
    /// Functions sharing a name, distinguished by function type.
    Overloaded {
        name: String,
        functions: Vec<SymbolId>,
    },
}

#[derive(Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(u32::try_from(self.symbols.len()).unwrap_or(u32::MAX));
        self.symbols.push(symbol);
        id
    }

    #[must_use]
    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.0 as usize]
    }

    #[must_use]
    pub fn name(&self, id: SymbolId) -> &str {
        match self.get(id) {
            Symbol::Type(_) => "",
            Symbol::Placeholder { name, .. }
            | Symbol::Function { name, .. }
            | Symbol::Overloaded { name, .. } => name,
        }
    }

    #[must_use]
    pub fn flags(&self, id: SymbolId) -> SymbolFlags {
        match self.get(id) {
            Symbol::Placeholder { flags, .. } | Symbol::Function { flags, .. } => *flags,
            _ => SymbolFlags::empty(),
        }
    }

    pub fn set_flags(&mut self, id: SymbolId, set: SymbolFlags, on: bool) {
        if let Symbol::Placeholder { flags, .. } | Symbol::Function { flags, .. } =
            self.get_mut(id)
        {
            if on {
                flags.insert(set);
            } else {
                flags.remove(set);
            }
        }
    }

    #[must_use]
    pub fn has_flags(&self, id: SymbolId, mask: SymbolFlags) -> bool {
        self.flags(id).contains(mask)
    }

    /// The value type of a symbol: a placeholder's declared type, a
    /// function's function type, or `None` for overload sets and types.
    #[must_use]
    pub fn value_type(&self, id: SymbolId) -> Option<TypeId> {
        match self.get(id) {
            Symbol::Placeholder { ty, .. } | Symbol::Function { ty, .. } => Some(*ty),
            _ => None,
        }
    }
}
