//! Type representation.
//!
//! All types live in a `TypeArena` owned by the `SymbolRegistry`; everything
//! else holds `TypeId` handles. Tuples, functions, specializations, and
//! protocol compositions are deduplicated structurally; nominal types are
//! unique per declaration site.

use crate::symbol::SymbolId;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::rc::Rc;
use swz_parser::ast::NodeId;

/// Handle to a type in the arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const NONE: TypeId = TypeId(u32::MAX);

    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TypeCategory {
    Struct,
    Class,
    Enum,
    Protocol,
    Tuple,
    Function,
    Specialized,
    Alias,
    Placeholder,
    GenericParameter,
    ProtocolComposition,
    Extension,
}

/// One parameter of a function type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// External argument label; empty when unlabeled.
    pub name: String,
    pub inout: bool,
    pub ty: TypeId,
}

impl Parameter {
    #[must_use]
    pub fn new(ty: TypeId) -> Self {
        Self {
            name: String::new(),
            inout: false,
            ty,
        }
    }

    #[must_use]
    pub fn named(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            inout: false,
            ty,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionInfo {
    pub parameters: Vec<Parameter>,
    pub return_type: TypeId,
    pub variadic: bool,
}

/// Ordered generic parameter list of a generic type or function.
#[derive(Clone, Debug, Default)]
pub struct GenericDefinition {
    /// `(name, placeholder type, constraints)` in declaration order.
    pub params: Vec<(String, TypeId, Vec<TypeId>)>,
}

impl GenericDefinition {
    #[must_use]
    pub fn num_parameters(&self) -> usize {
        self.params.len()
    }
}

/// A concrete binding of a `GenericDefinition`.
#[derive(Clone, Debug)]
pub struct GenericArgument {
    pub definition: Rc<GenericDefinition>,
    pub types: Vec<TypeId>,
}

#[derive(Clone, Debug)]
pub struct TypeData {
    pub name: String,
    pub category: TypeCategory,
    /// Superclass for classes; extended type for extensions.
    pub parent: Option<TypeId>,
    pub protocols: Vec<TypeId>,
    pub members: IndexMap<String, SymbolId>,
    pub static_members: IndexMap<String, SymbolId>,
    /// Initializer overload set.
    pub initializer: Option<SymbolId>,
    /// Tuple element types.
    pub element_types: Vec<TypeId>,
    pub function: Option<FunctionInfo>,
    /// Specialization base, or alias target.
    pub inner: Option<TypeId>,
    /// Specialization arguments.
    pub generic_args: Vec<TypeId>,
    pub generic_def: Option<Rc<GenericDefinition>>,
    /// Associated types and member type aliases.
    pub associated_types: IndexMap<String, TypeId>,
    /// Enum cases: name to associated tuple type (`None` for plain cases).
    pub enum_cases: IndexMap<String, Option<TypeId>>,
    /// Protocol composition members.
    pub composition: Vec<TypeId>,
    pub decl: Option<NodeId>,
}

impl TypeData {
    fn new(name: impl Into<String>, category: TypeCategory) -> Self {
        Self {
            name: name.into(),
            category,
            parent: None,
            protocols: Vec::new(),
            members: IndexMap::new(),
            static_members: IndexMap::new(),
            initializer: None,
            element_types: Vec::new(),
            function: None,
            inner: None,
            generic_args: Vec::new(),
            generic_def: None,
            associated_types: IndexMap::new(),
            enum_cases: IndexMap::new(),
            composition: Vec::new(),
            decl: None,
        }
    }
}

/// Arena of all types in one compilation.
#[derive(Default)]
pub struct TypeArena {
    types: Vec<TypeData>,
    tuple_intern: FxHashMap<Vec<TypeId>, TypeId>,
    function_intern: FxHashMap<(Vec<Parameter>, TypeId, bool), TypeId>,
    specialized_intern: FxHashMap<(TypeId, Vec<TypeId>), TypeId>,
    composition_intern: FxHashMap<Vec<TypeId>, TypeId>,
    /// The shared error sentinel.
    placeholder: TypeId,
}

impl TypeArena {
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Self::default();
        arena.placeholder = arena.alloc(TypeData::new("<placeholder>", TypeCategory::Placeholder));
        arena
    }

    fn alloc(&mut self, data: TypeData) -> TypeId {
        let id = TypeId(u32::try_from(self.types.len()).unwrap_or(u32::MAX));
        self.types.push(data);
        id
    }

    #[must_use]
    pub fn get(&self, id: TypeId) -> &TypeData {
        &self.types[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: TypeId) -> &mut TypeData {
        &mut self.types[id.0 as usize]
    }

    /// The shared sentinel used after a semantic error, so one missing type
    /// does not cascade.
    #[must_use]
    pub fn placeholder(&self) -> TypeId {
        self.placeholder
    }

    // -------------------------------------------------------------------------
    // Constructors
    // -------------------------------------------------------------------------

    pub fn new_type(
        &mut self,
        name: impl Into<String>,
        category: TypeCategory,
        decl: Option<NodeId>,
        parent: Option<TypeId>,
        protocols: Vec<TypeId>,
        generic_def: Option<Rc<GenericDefinition>>,
    ) -> TypeId {
        let mut data = TypeData::new(name, category);
        data.decl = decl;
        data.parent = parent;
        data.protocols = protocols;
        data.generic_def = generic_def;
        self.alloc(data)
    }

    pub fn new_tuple(&mut self, elements: Vec<TypeId>) -> TypeId {
        if let Some(&id) = self.tuple_intern.get(&elements) {
            return id;
        }
        let mut data = TypeData::new(String::new(), TypeCategory::Tuple);
        data.element_types = elements.clone();
        let id = self.alloc(data);
        self.tuple_intern.insert(elements, id);
        id
    }

    pub fn new_function(
        &mut self,
        parameters: Vec<Parameter>,
        return_type: TypeId,
        variadic: bool,
    ) -> TypeId {
        let key = (parameters.clone(), return_type, variadic);
        if let Some(&id) = self.function_intern.get(&key) {
            return id;
        }
        let mut data = TypeData::new(String::new(), TypeCategory::Function);
        data.function = Some(FunctionInfo {
            parameters,
            return_type,
            variadic,
        });
        let id = self.alloc(data);
        self.function_intern.insert(key, id);
        id
    }

    pub fn new_specialized(&mut self, base: TypeId, args: Vec<TypeId>) -> TypeId {
        let key = (base, args.clone());
        if let Some(&id) = self.specialized_intern.get(&key) {
            return id;
        }
        let mut data = TypeData::new(self.get(base).name.clone(), TypeCategory::Specialized);
        data.inner = Some(base);
        data.generic_args = args;
        let id = self.alloc(data);
        self.specialized_intern.insert(key, id);
        id
    }

    pub fn new_protocol_composition(&mut self, protocols: Vec<TypeId>) -> TypeId {
        if let Some(&id) = self.composition_intern.get(&protocols) {
            return id;
        }
        let mut data = TypeData::new(String::new(), TypeCategory::ProtocolComposition);
        data.composition = protocols.clone();
        let id = self.alloc(data);
        self.composition_intern.insert(protocols, id);
        id
    }

    pub fn new_alias(&mut self, name: impl Into<String>, target: TypeId) -> TypeId {
        let mut data = TypeData::new(name, TypeCategory::Alias);
        data.inner = Some(target);
        self.alloc(data)
    }

    pub fn new_generic_parameter(&mut self, name: impl Into<String>) -> TypeId {
        self.alloc(TypeData::new(name, TypeCategory::GenericParameter))
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Resolve aliases down to the underlying type.
    #[must_use]
    pub fn resolve_alias(&self, id: TypeId) -> TypeId {
        let mut current = id;
        let mut hops = 0;
        while self.get(current).category == TypeCategory::Alias {
            match self.get(current).inner {
                Some(inner) if hops < 64 => {
                    current = inner;
                    hops += 1;
                }
                _ => break,
            }
        }
        current
    }

    /// The specialization base, if this is a specialized type.
    #[must_use]
    pub fn specialization_base(&self, id: TypeId) -> Option<TypeId> {
        let data = self.get(id);
        if data.category == TypeCategory::Specialized {
            data.inner
        } else {
            None
        }
    }

    /// Transitive protocol conformance. A specialization conforms to what
    /// its base declares; protocols conform to their inherited protocols.
    #[must_use]
    pub fn conforms_to(&self, id: TypeId, protocol: TypeId) -> bool {
        let id = self.resolve_alias(id);
        if id == protocol {
            return true;
        }
        let subject = match self.specialization_base(id) {
            Some(base) => base,
            None => id,
        };
        if subject == protocol {
            return true;
        }
        let data = self.get(subject);
        for &p in &data.protocols {
            if p == protocol || self.conforms_to(p, protocol) {
                return true;
            }
        }
        // Class conformance is inherited from the parent chain.
        if data.category == TypeCategory::Class {
            if let Some(parent) = data.parent {
                return self.conforms_to(parent, protocol);
            }
        }
        false
    }

    /// Reflexive, transitive subclass relation.
    #[must_use]
    pub fn is_kind_of(&self, id: TypeId, other: TypeId) -> bool {
        let mut current = Some(self.resolve_alias(id));
        while let Some(t) = current {
            if t == other {
                return true;
            }
            current = self.get(t).parent;
        }
        false
    }

    #[must_use]
    pub fn get_declared_member(&self, id: TypeId, name: &str) -> Option<SymbolId> {
        self.get(self.resolve_alias(id)).members.get(name).copied()
    }

    #[must_use]
    pub fn get_declared_static_member(&self, id: TypeId, name: &str) -> Option<SymbolId> {
        self.get(self.resolve_alias(id))
            .static_members
            .get(name)
            .copied()
    }

    /// Resolve an associated type or member alias by name, looking through
    /// the specialization base and declared protocols.
    #[must_use]
    pub fn get_associated_type(&self, id: TypeId, name: &str) -> Option<TypeId> {
        let id = self.resolve_alias(id);
        let subject = self.specialization_base(id).unwrap_or(id);
        let data = self.get(subject);
        if let Some(&t) = data.associated_types.get(name) {
            return Some(self.resolve_alias(t));
        }
        for &p in &data.protocols {
            if let Some(t) = self.get_associated_type(p, name) {
                return Some(t);
            }
        }
        None
    }

    /// Assignability: identity, protocol conformance, subclassing, tuples
    /// element-wise, functions contravariant in parameters and covariant in
    /// return, specializations argument-wise.
    #[must_use]
    pub fn can_assign_to(&self, from: TypeId, to: TypeId) -> bool {
        let from = self.resolve_alias(from);
        let to = self.resolve_alias(to);
        if from == to || from.is_none() || to.is_none() {
            return true;
        }
        if from == self.placeholder || to == self.placeholder {
            return true;
        }
        let to_data = self.get(to);
        match to_data.category {
            TypeCategory::Protocol => self.conforms_to(from, to),
            TypeCategory::ProtocolComposition => to_data
                .composition
                .iter()
                .all(|&p| self.conforms_to(from, p)),
            TypeCategory::Class => self.is_kind_of(from, to),
            TypeCategory::Tuple => {
                let from_data = self.get(from);
                from_data.category == TypeCategory::Tuple
                    && from_data.element_types.len() == to_data.element_types.len()
                    && from_data
                        .element_types
                        .iter()
                        .zip(&to_data.element_types)
                        .all(|(&f, &t)| self.can_assign_to(f, t))
            }
            TypeCategory::Function => {
                let (Some(from_fn), Some(to_fn)) =
                    (&self.get(from).function, &to_data.function)
                else {
                    return false;
                };
                from_fn.parameters.len() == to_fn.parameters.len()
                    && from_fn
                        .parameters
                        .iter()
                        .zip(&to_fn.parameters)
                        .all(|(f, t)| self.can_assign_to(t.ty, f.ty))
                    && self.can_assign_to(from_fn.return_type, to_fn.return_type)
            }
            TypeCategory::Specialized => {
                let from_data = self.get(from);
                if from_data.category != TypeCategory::Specialized {
                    return false;
                }
                from_data.inner == to_data.inner
                    && from_data.generic_args.len() == to_data.generic_args.len()
                    && from_data
                        .generic_args
                        .iter()
                        .zip(&to_data.generic_args)
                        .all(|(&f, &t)| self.can_assign_to(f, t))
            }
            // A generic parameter accepts anything satisfying its bounds;
            // bounds are checked at specialization sites.
            TypeCategory::GenericParameter => true,
            _ => false,
        }
    }

    /// Total order over types, used to reject duplicate overloads
    /// deterministically: category first, then structure.
    #[must_use]
    pub fn compare(&self, a: TypeId, b: TypeId) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        let da = self.get(a);
        let db = self.get(b);
        match da.category.cmp(&db.category) {
            Ordering::Equal => {}
            other => return other,
        }
        match da.category {
            TypeCategory::Tuple => {
                self.compare_vec(&da.element_types, &db.element_types)
            }
            TypeCategory::Function => {
                let fa = da.function.as_ref().unwrap();
                let fb = db.function.as_ref().unwrap();
                match fa.parameters.len().cmp(&fb.parameters.len()) {
                    Ordering::Equal => {}
                    other => return other,
                }
                for (pa, pb) in fa.parameters.iter().zip(&fb.parameters) {
                    match pa.name.cmp(&pb.name) {
                        Ordering::Equal => {}
                        other => return other,
                    }
                    match self.compare(pa.ty, pb.ty) {
                        Ordering::Equal => {}
                        other => return other,
                    }
                }
                match self.compare(fa.return_type, fb.return_type) {
                    Ordering::Equal => fa.variadic.cmp(&fb.variadic),
                    other => other,
                }
            }
            TypeCategory::Specialized => {
                match self.compare(
                    da.inner.unwrap_or(TypeId::NONE),
                    db.inner.unwrap_or(TypeId::NONE),
                ) {
                    Ordering::Equal => self.compare_vec(&da.generic_args, &db.generic_args),
                    other => other,
                }
            }
            TypeCategory::ProtocolComposition => {
                self.compare_vec(&da.composition, &db.composition)
            }
            // Nominal types order by name, then by identity.
            _ => match da.name.cmp(&db.name) {
                Ordering::Equal => a.0.cmp(&b.0),
                other => other,
            },
        }
    }

    fn compare_vec(&self, a: &[TypeId], b: &[TypeId]) -> Ordering {
        match a.len().cmp(&b.len()) {
            Ordering::Equal => {}
            other => return other,
        }
        for (&x, &y) in a.iter().zip(b) {
            match self.compare(x, y) {
                Ordering::Equal => {}
                other => return other,
            }
        }
        Ordering::Equal
    }

    /// Function type equality, used to reject duplicate overloads.
    #[must_use]
    pub fn same_function_type(&self, a: TypeId, b: TypeId) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    /// Human-readable type name for diagnostics.
    #[must_use]
    pub fn display(&self, id: TypeId) -> String {
        let data = self.get(id);
        match data.category {
            TypeCategory::Tuple => {
                let inner: Vec<String> =
                    data.element_types.iter().map(|&t| self.display(t)).collect();
                format!("({})", inner.join(", "))
            }
            TypeCategory::Function => {
                let f = data.function.as_ref().unwrap();
                let params: Vec<String> =
                    f.parameters.iter().map(|p| self.display(p.ty)).collect();
                format!("({}) -> {}", params.join(", "), self.display(f.return_type))
            }
            TypeCategory::Specialized => {
                let args: Vec<String> =
                    data.generic_args.iter().map(|&t| self.display(t)).collect();
                format!("{}<{}>", data.name, args.join(", "))
            }
            TypeCategory::ProtocolComposition => {
                let inner: Vec<String> =
                    data.composition.iter().map(|&t| self.display(t)).collect();
                format!("protocol<{}>", inner.join(", "))
            }
            _ => data.name.clone(),
        }
    }
}
