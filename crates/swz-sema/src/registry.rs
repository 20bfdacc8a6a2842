//! Symbol registry: owns the type, symbol, and scope arenas, and seeds the
//! global scope with the built-in types, the standard protocol hierarchy,
//! and the operator overload sets.

use crate::scope::{ScopeArena, ScopeId};
use crate::symbol::{PlaceholderRole, Symbol, SymbolArena, SymbolFlags, SymbolId};
use crate::types::{
    GenericDefinition, Parameter, TypeArena, TypeCategory, TypeId,
};
use std::rc::Rc;
use swz_parser::ast::NodeId;

/// Handles to the built-in types seeded by `bootstrap`.
#[derive(Clone, Debug)]
pub struct BuiltinTypes {
    pub int: TypeId,
    pub uint: TypeId,
    pub int8: TypeId,
    pub uint8: TypeId,
    pub int16: TypeId,
    pub uint16: TypeId,
    pub int32: TypeId,
    pub uint32: TypeId,
    pub int64: TypeId,
    pub uint64: TypeId,
    pub float: TypeId,
    pub double: TypeId,
    pub bool_type: TypeId,
    pub string: TypeId,
    pub character: TypeId,
    pub void: TypeId,
    pub optional: TypeId,
    pub array: TypeId,
    pub dictionary: TypeId,
    pub optional_nil_comparison: TypeId,
    pub integer_literal_convertible: TypeId,
    pub float_literal_convertible: TypeId,
    pub string_literal_convertible: TypeId,
    pub boolean_literal_convertible: TypeId,
    pub nil_literal_convertible: TypeId,
    pub array_literal_convertible: TypeId,
    pub dictionary_literal_convertible: TypeId,
    pub equatable: TypeId,
    pub comparable: TypeId,
    pub hashable: TypeId,
    pub sequence_type: TypeId,
    pub collection_type: TypeId,
    /// All numeric types, integers first.
    pub numbers: Vec<TypeId>,
    /// The integer types only.
    pub integers: Vec<TypeId>,
}

pub struct SymbolRegistry {
    pub types: TypeArena,
    pub symbols: SymbolArena,
    pub scopes: ScopeArena,
    global: ScopeId,
    file: ScopeId,
    current: ScopeId,
    pub builtins: BuiltinTypes,
}

impl SymbolRegistry {
    /// Build a registry whose global scope holds the full built-in surface.
    #[must_use]
    pub fn bootstrap() -> Self {
        Bootstrap::run()
    }

    #[must_use]
    pub fn global_scope(&self) -> ScopeId {
        self.global
    }

    /// The per-translation-unit scope; extensions land here.
    #[must_use]
    pub fn file_scope(&self) -> ScopeId {
        self.file
    }

    #[must_use]
    pub fn current_scope(&self) -> ScopeId {
        self.current
    }

    pub fn set_current_scope(&mut self, scope: ScopeId) {
        self.current = scope;
    }

    pub fn enter_scope(&mut self, owner: Option<NodeId>) -> ScopeId {
        let scope = self.scopes.alloc(Some(self.current), owner);
        self.current = scope;
        scope
    }

    pub fn leave_scope(&mut self) {
        if let Some(parent) = self.scopes.get(self.current).parent {
            self.current = parent;
        }
    }

    // -------------------------------------------------------------------------
    // Namespaces
    // -------------------------------------------------------------------------

    pub fn add_symbol(&mut self, name: impl Into<String>, symbol: Symbol) -> SymbolId {
        let id = self.symbols.alloc(symbol);
        self.scopes
            .get_mut(self.current)
            .values
            .insert(name.into(), id);
        id
    }

    pub fn add_symbol_id(&mut self, name: impl Into<String>, id: SymbolId) {
        self.scopes
            .get_mut(self.current)
            .values
            .insert(name.into(), id);
    }

    pub fn add_type(&mut self, name: impl Into<String>, ty: TypeId) {
        let name = name.into();
        self.scopes
            .get_mut(self.current)
            .types
            .insert(name.clone(), ty);
        // Nominal types are value-namespace symbols too (constructor calls,
        // enum case access).
        let sym = self.symbols.alloc(Symbol::Type(ty));
        self.scopes.get_mut(self.current).values.insert(name, sym);
    }

    #[must_use]
    pub fn lookup_symbol(&self, name: &str) -> Option<(SymbolId, ScopeId)> {
        self.scopes.lookup_symbol(self.current, name)
    }

    #[must_use]
    pub fn lookup_type(&self, name: &str) -> Option<TypeId> {
        self.scopes.lookup_type(self.current, name).map(|(t, _)| t)
    }

    /// Register an extension on the file scope.
    pub fn register_extension(&mut self, type_name: &str, extension: TypeId) {
        self.scopes
            .get_mut(self.file)
            .extensions
            .entry(type_name.to_string())
            .or_default()
            .push(extension);
    }

    #[must_use]
    pub fn get_extensions(&self, type_name: &str) -> &[TypeId] {
        self.scopes
            .get(self.file)
            .extensions
            .get(type_name)
            .map_or(&[], Vec::as_slice)
    }

    /// Insert a function into a scope's value namespace, building or growing
    /// an overload set as needed. Duplicate function types are rejected.
    /// Returns `false` on a duplicate.
    pub fn register_function(&mut self, scope: ScopeId, name: &str, func: SymbolId) -> bool {
        let existing = self.scopes.get(scope).values.get(name).copied();
        match existing {
            None => {
                self.scopes
                    .get_mut(scope)
                    .values
                    .insert(name.to_string(), func);
                true
            }
            Some(prev) => match self.symbols.get(prev).clone() {
                Symbol::Overloaded { mut functions, .. } => {
                    if self.is_duplicate_overload(&functions, func) {
                        return false;
                    }
                    functions.push(func);
                    *self.symbols.get_mut(prev) = Symbol::Overloaded {
                        name: name.to_string(),
                        functions,
                    };
                    true
                }
                Symbol::Function { .. } => {
                    if self.is_duplicate_overload(&[prev], func) {
                        return false;
                    }
                    let overloaded = self.symbols.alloc(Symbol::Overloaded {
                        name: name.to_string(),
                        functions: vec![prev, func],
                    });
                    self.scopes
                        .get_mut(scope)
                        .values
                        .insert(name.to_string(), overloaded);
                    true
                }
                _ => false,
            },
        }
    }

    fn is_duplicate_overload(&self, existing: &[SymbolId], func: SymbolId) -> bool {
        let Some(new_ty) = self.symbols.value_type(func) else {
            return false;
        };
        existing.iter().any(|&f| {
            self.symbols
                .value_type(f)
                .is_some_and(|t| self.types.same_function_type(t, new_ty))
        })
    }

    // -------------------------------------------------------------------------
    // Built-in type shorthands
    // -------------------------------------------------------------------------

    pub fn make_optional(&mut self, inner: TypeId) -> TypeId {
        let optional = self.builtins.optional;
        self.types.new_specialized(optional, vec![inner])
    }

    pub fn make_array(&mut self, element: TypeId) -> TypeId {
        let array = self.builtins.array;
        self.types.new_specialized(array, vec![element])
    }

    pub fn make_dictionary(&mut self, key: TypeId, value: TypeId) -> TypeId {
        let dictionary = self.builtins.dictionary;
        self.types.new_specialized(dictionary, vec![key, value])
    }

    #[must_use]
    pub fn is_optional(&self, ty: TypeId) -> bool {
        self.types.specialization_base(ty) == Some(self.builtins.optional)
    }

    /// The element type of `Optional<T>`, if `ty` is one.
    #[must_use]
    pub fn optional_inner(&self, ty: TypeId) -> Option<TypeId> {
        if self.is_optional(ty) {
            self.types.get(ty).generic_args.first().copied()
        } else {
            None
        }
    }

    /// The innermost type of an optional chain: `T????` yields `T`.
    #[must_use]
    pub fn final_type_of_optional(&self, ty: TypeId) -> TypeId {
        let mut current = ty;
        while let Some(inner) = self.optional_inner(current) {
            current = inner;
        }
        current
    }

    /// The enumeration a contextual type names, when it names one.
    #[must_use]
    pub fn final_enum_of(&self, ty: TypeId) -> Option<TypeId> {
        let resolved = self.types.resolve_alias(ty);
        let base = self.types.specialization_base(resolved).unwrap_or(resolved);
        (self.types.get(base).category == TypeCategory::Enum).then_some(resolved)
    }
}

// =============================================================================
// Bootstrap
// =============================================================================

/// Builds the global scope in native code. The surface matches what the
/// canned-source variant would produce.
struct Bootstrap {
    types: TypeArena,
    symbols: SymbolArena,
    scopes: ScopeArena,
    global: ScopeId,
}

impl Bootstrap {
    fn run() -> SymbolRegistry {
        let types = TypeArena::new();
        let symbols = SymbolArena::new();
        let mut scopes = ScopeArena::new();
        let global = scopes.alloc(None, None);
        let mut b = Bootstrap {
            types,
            symbols,
            scopes,
            global,
        };

        // ---- Protocols ----
        let boolean_type = b.protocol("BooleanType", &[]);
        let unicode_scalar = b.protocol("UnicodeScalarLiteralConvertible", &[]);
        let grapheme_cluster =
            b.protocol("ExtendedGraphemeClusterLiteralConvertible", &[unicode_scalar]);
        let integer_literal = b.protocol("IntegerLiteralConvertible", &[]);
        let boolean_literal = b.protocol("BooleanLiteralConvertible", &[]);
        let string_literal = b.protocol("StringLiteralConvertible", &[]);
        let float_literal = b.protocol("FloatLiteralConvertible", &[]);
        let nil_literal = b.protocol("NilLiteralConvertible", &[]);
        let array_literal = b.protocol("ArrayLiteralConvertible", &[]);
        let dictionary_literal = b.protocol("DictionaryLiteralConvertible", &[]);
        let equatable = b.protocol("Equatable", &[]);
        let hashable = b.protocol("Hashable", &[]);
        let comparable = b.protocol("Comparable", &[]);
        let string_interpolation = b.protocol("StringInterpolationConvertible", &[]);
        let sequence_type = b.protocol("SequenceType", &[]);
        let collection_type = b.protocol("CollectionType", &[sequence_type]);
        let integer_type = b.protocol("_IntegerType", &[integer_literal, hashable]);
        let signed_integer =
            b.protocol("SignedIntegerType", &[integer_type, comparable, equatable]);
        let unsigned_integer =
            b.protocol("UnsignedIntegerType", &[integer_type, comparable, equatable]);
        let floating_point =
            b.protocol("FloatingPointType", &[comparable, equatable, hashable]);

        // RawRepresentable carries an associated RawValue and a readable
        // rawValue property.
        let raw_representable = b.protocol("RawRepresentable", &[]);
        {
            let raw_value = b.types.new_alias("RawValue", b.types.placeholder());
            let data = b.types.get_mut(raw_representable);
            data.associated_types.insert("RawValue".to_string(), raw_value);
            let prop = b.symbols.alloc(Symbol::Placeholder {
                name: "rawValue".to_string(),
                ty: raw_value,
                role: PlaceholderRole::Property,
                flags: SymbolFlags::MEMBER | SymbolFlags::READABLE,
            });
            b.types
                .get_mut(raw_representable)
                .members
                .insert("rawValue".to_string(), prop);
        }

        // ---- Numeric structs ----
        let int8 = b.structure("Int8", &[signed_integer]);
        let uint8 = b.structure("UInt8", &[unsigned_integer]);
        let int16 = b.structure("Int16", &[signed_integer]);
        let uint16 = b.structure("UInt16", &[unsigned_integer]);
        let int32 = b.structure("Int32", &[signed_integer]);
        let uint32 = b.structure("UInt32", &[unsigned_integer]);
        let int64 = b.structure("Int64", &[signed_integer]);
        let uint64 = b.structure("UInt64", &[unsigned_integer]);
        let int = b.structure("Int", &[signed_integer]);
        let uint = b.structure("UInt", &[unsigned_integer]);
        let optional_nil_comparison =
            b.structure("_OptionalNilComparisonType", &[nil_literal]);
        let bool_type = b.structure(
            "Bool",
            &[boolean_type, boolean_literal, equatable, hashable],
        );
        let float = b.structure("Float", &[floating_point, integer_literal, float_literal]);
        let double = b.structure("Double", &[floating_point, integer_literal, float_literal]);
        let string = b.structure(
            "String",
            &[
                string_literal,
                unicode_scalar,
                grapheme_cluster,
                hashable,
                equatable,
                string_interpolation,
            ],
        );
        let character = b.structure(
            "Character",
            &[grapheme_cluster, equatable, hashable, comparable],
        );

        // `hasPrefix` is the representative String member the suite uses.
        {
            let fn_ty = b
                .types
                .new_function(vec![Parameter::new(string)], bool_type, false);
            let has_prefix = b.symbols.alloc(Symbol::Function {
                name: "hasPrefix".to_string(),
                ty: fn_ty,
                flags: SymbolFlags::MEMBER,
                decl: None,
            });
            b.types
                .get_mut(string)
                .members
                .insert("hasPrefix".to_string(), has_prefix);
        }

        // ---- Void ----
        let void = b.types.new_tuple(Vec::new());
        b.add_named_type("Void", void);

        // ---- Optional<T> ----
        let optional = {
            let t = b.types.new_generic_parameter("T");
            let mut generic = GenericDefinition::default();
            generic.params.push(("T".to_string(), t, Vec::new()));
            let optional = b.types.new_type(
                "Optional",
                TypeCategory::Enum,
                None,
                None,
                vec![nil_literal],
                Some(Rc::new(generic)),
            );
            let some_payload = b.types.new_tuple(vec![t]);
            let data = b.types.get_mut(optional);
            data.enum_cases.insert("None".to_string(), None);
            data.enum_cases.insert("Some".to_string(), Some(some_payload));
            b.add_named_type("Optional", optional);
            optional
        };

        // ---- Array<T> ----
        let array = {
            let t = b.types.new_generic_parameter("T");
            let mut generic = GenericDefinition::default();
            generic.params.push(("T".to_string(), t, Vec::new()));
            let array = b.types.new_type(
                "Array",
                TypeCategory::Struct,
                None,
                None,
                vec![collection_type, array_literal],
                Some(Rc::new(generic)),
            );
            let append_ty = b.types.new_function(vec![Parameter::new(t)], void, false);
            let append = b.symbols.alloc(Symbol::Function {
                name: "append".to_string(),
                ty: append_ty,
                flags: SymbolFlags::MEMBER,
                decl: None,
            });
            let remove_last_ty = b.types.new_function(Vec::new(), t, false);
            let remove_last = b.symbols.alloc(Symbol::Function {
                name: "removeLast".to_string(),
                ty: remove_last_ty,
                flags: SymbolFlags::MEMBER,
                decl: None,
            });
            let count = b.symbols.alloc(Symbol::Placeholder {
                name: "count".to_string(),
                ty: int,
                role: PlaceholderRole::Property,
                flags: SymbolFlags::MEMBER | SymbolFlags::READABLE | SymbolFlags::INITIALIZED,
            });
            let subscript = b.subscript_pair(
                vec![Parameter::new(int)],
                t,
                vec![Parameter::new(int), Parameter::new(t)],
                void,
            );
            let data = b.types.get_mut(array);
            data.members.insert("append".to_string(), append);
            data.members.insert("removeLast".to_string(), remove_last);
            data.members.insert("count".to_string(), count);
            data.members.insert("subscript".to_string(), subscript);
            b.add_named_type("Array", array);
            array
        };

        // ---- Dictionary<Key, Value> ----
        let dictionary = {
            let key = b.types.new_generic_parameter("Key");
            let value = b.types.new_generic_parameter("Value");
            let mut generic = GenericDefinition::default();
            generic.params.push(("Key".to_string(), key, Vec::new()));
            generic.params.push(("Value".to_string(), value, Vec::new()));
            let dictionary = b.types.new_type(
                "Dictionary",
                TypeCategory::Struct,
                None,
                None,
                vec![collection_type, dictionary_literal],
                Some(Rc::new(generic)),
            );
            let count = b.symbols.alloc(Symbol::Placeholder {
                name: "count".to_string(),
                ty: int,
                role: PlaceholderRole::Property,
                flags: SymbolFlags::MEMBER | SymbolFlags::READABLE | SymbolFlags::INITIALIZED,
            });
            let is_empty = b.symbols.alloc(Symbol::Placeholder {
                name: "isEmpty".to_string(),
                ty: bool_type,
                role: PlaceholderRole::Property,
                flags: SymbolFlags::MEMBER | SymbolFlags::READABLE | SymbolFlags::INITIALIZED,
            });
            let optional_value = b.types.new_specialized(optional, vec![value]);
            let subscript = b.subscript_pair(
                vec![Parameter::new(key)],
                optional_value,
                vec![Parameter::new(key), Parameter::new(optional_value)],
                void,
            );
            let data = b.types.get_mut(dictionary);
            data.members.insert("count".to_string(), count);
            data.members.insert("isEmpty".to_string(), is_empty);
            data.members.insert("subscript".to_string(), subscript);
            b.add_named_type("Dictionary", dictionary);
            dictionary
        };

        let integers = vec![
            int, uint, int8, uint8, int16, uint16, int32, uint32, int64, uint64,
        ];
        let mut numbers = integers.clone();
        numbers.push(float);
        numbers.push(double);

        // ---- Operator overload sets ----
        for op in ["+", "-", "*", "/", "%", "&+", "&-", "&*", "&/", "&%"] {
            for &ty in &numbers {
                b.infix_operator(op, ty, ty, ty);
            }
        }
        for op in ["==", "!=", "<", ">", ">=", "<="] {
            for &ty in &numbers {
                b.infix_operator(op, bool_type, ty, ty);
            }
        }
        for op in ["|", "&", "^", "<<", ">>"] {
            for &ty in &integers {
                b.infix_operator(op, ty, ty, ty);
            }
        }
        for op in ["&&", "||"] {
            b.infix_operator(op, bool_type, bool_type, bool_type);
        }
        b.unary_operator("!", bool_type, bool_type, SymbolFlags::PREFIX);
        for op in ["-", "+"] {
            for &ty in &numbers {
                b.unary_operator(op, ty, ty, SymbolFlags::PREFIX);
                b.unary_operator(op, ty, ty, SymbolFlags::POSTFIX);
            }
        }
        for op in ["++", "--"] {
            for &ty in &integers {
                b.unary_operator(op, ty, ty, SymbolFlags::PREFIX);
                b.unary_operator(op, ty, ty, SymbolFlags::POSTFIX);
            }
        }

        // `x == nil` / `x != nil` over any optional.
        for op in ["==", "!="] {
            let t = b.types.new_generic_parameter("T");
            let optional_t = b.types.new_specialized(optional, vec![t]);
            let fn_ty = b.types.new_function(
                vec![
                    Parameter::new(optional_t),
                    Parameter::new(optional_nil_comparison),
                ],
                bool_type,
                false,
            );
            let func = b.symbols.alloc(Symbol::Function {
                name: op.to_string(),
                ty: fn_ty,
                flags: SymbolFlags::INFIX,
                decl: None,
            });
            b.register_global_function(op, func);
        }

        let builtins = BuiltinTypes {
            int,
            uint,
            int8,
            uint8,
            int16,
            uint16,
            int32,
            uint32,
            int64,
            uint64,
            float,
            double,
            bool_type,
            string,
            character,
            void,
            optional,
            array,
            dictionary,
            optional_nil_comparison,
            integer_literal_convertible: integer_literal,
            float_literal_convertible: float_literal,
            string_literal_convertible: string_literal,
            boolean_literal_convertible: boolean_literal,
            nil_literal_convertible: nil_literal,
            array_literal_convertible: array_literal,
            dictionary_literal_convertible: dictionary_literal,
            equatable,
            comparable,
            hashable,
            sequence_type,
            collection_type,
            numbers,
            integers,
        };

        let global = b.global;
        let mut scopes = b.scopes;
        let file = scopes.alloc(Some(global), None);
        SymbolRegistry {
            types: b.types,
            symbols: b.symbols,
            scopes,
            global,
            file,
            current: file,
            builtins,
        }
    }

    fn add_named_type(&mut self, name: &str, ty: TypeId) {
        let scope = self.scopes.get_mut(self.global);
        scope.types.insert(name.to_string(), ty);
        let sym = self.symbols.alloc(Symbol::Type(ty));
        self.scopes
            .get_mut(self.global)
            .values
            .insert(name.to_string(), sym);
    }

    fn protocol(&mut self, name: &str, inherits: &[TypeId]) -> TypeId {
        let ty = self.types.new_type(
            name,
            TypeCategory::Protocol,
            None,
            None,
            inherits.to_vec(),
            None,
        );
        self.add_named_type(name, ty);
        ty
    }

    fn structure(&mut self, name: &str, protocols: &[TypeId]) -> TypeId {
        let ty = self.types.new_type(
            name,
            TypeCategory::Struct,
            None,
            None,
            protocols.to_vec(),
            None,
        );
        self.add_named_type(name, ty);
        ty
    }

    fn subscript_pair(
        &mut self,
        getter_params: Vec<Parameter>,
        getter_ret: TypeId,
        setter_params: Vec<Parameter>,
        setter_ret: TypeId,
    ) -> SymbolId {
        let getter_ty = self.types.new_function(getter_params, getter_ret, false);
        let setter_ty = self.types.new_function(setter_params, setter_ret, false);
        let getter = self.symbols.alloc(Symbol::Function {
            name: "subscript".to_string(),
            ty: getter_ty,
            flags: SymbolFlags::MEMBER,
            decl: None,
        });
        let setter = self.symbols.alloc(Symbol::Function {
            name: "subscript".to_string(),
            ty: setter_ty,
            flags: SymbolFlags::MEMBER,
            decl: None,
        });
        self.symbols.alloc(Symbol::Overloaded {
            name: "subscript".to_string(),
            functions: vec![getter, setter],
        })
    }

    fn infix_operator(&mut self, op: &str, ret: TypeId, lhs: TypeId, rhs: TypeId) {
        let fn_ty = self
            .types
            .new_function(vec![Parameter::new(lhs), Parameter::new(rhs)], ret, false);
        let func = self.symbols.alloc(Symbol::Function {
            name: op.to_string(),
            ty: fn_ty,
            flags: SymbolFlags::INFIX,
            decl: None,
        });
        self.register_global_function(op, func);
    }

    fn unary_operator(&mut self, op: &str, ret: TypeId, operand: TypeId, fixity: SymbolFlags) {
        let fn_ty = self
            .types
            .new_function(vec![Parameter::new(operand)], ret, false);
        let func = self.symbols.alloc(Symbol::Function {
            name: op.to_string(),
            ty: fn_ty,
            flags: fixity,
            decl: None,
        });
        self.register_global_function(op, func);
    }

    /// Insert into the global scope, growing an overload set on collision.
    fn register_global_function(&mut self, name: &str, func: SymbolId) {
        let existing = self.scopes.get(self.global).values.get(name).copied();
        match existing {
            None => {
                self.scopes
                    .get_mut(self.global)
                    .values
                    .insert(name.to_string(), func);
            }
            Some(prev) => match self.symbols.get(prev).clone() {
                Symbol::Overloaded { mut functions, .. } => {
                    functions.push(func);
                    *self.symbols.get_mut(prev) = Symbol::Overloaded {
                        name: name.to_string(),
                        functions,
                    };
                }
                Symbol::Function { .. } => {
                    let overloaded = self.symbols.alloc(Symbol::Overloaded {
                        name: name.to_string(),
                        functions: vec![prev, func],
                    });
                    self.scopes
                        .get_mut(self.global)
                        .values
                        .insert(name.to_string(), overloaded);
                }
                _ => {}
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_seeds_primitive_types() {
        let registry = SymbolRegistry::bootstrap();
        for name in [
            "Int", "UInt", "Int8", "UInt8", "Int16", "UInt16", "Int32", "UInt32", "Int64",
            "UInt64", "Float", "Double", "Bool", "String", "Character", "Void", "Optional",
            "Array", "Dictionary",
        ] {
            assert!(
                registry.lookup_type(name).is_some(),
                "{name} is not defined"
            );
        }
    }

    #[test]
    fn bootstrap_seeds_protocol_hierarchy() {
        let registry = SymbolRegistry::bootstrap();
        for name in [
            "BooleanType",
            "Equatable",
            "Comparable",
            "Hashable",
            "RawRepresentable",
            "IntegerLiteralConvertible",
            "BooleanLiteralConvertible",
            "StringLiteralConvertible",
            "FloatLiteralConvertible",
            "NilLiteralConvertible",
            "ArrayLiteralConvertible",
            "DictionaryLiteralConvertible",
            "UnicodeScalarLiteralConvertible",
            "ExtendedGraphemeClusterLiteralConvertible",
            "StringInterpolationConvertible",
            "SequenceType",
            "CollectionType",
            "_IntegerType",
            "SignedIntegerType",
            "UnsignedIntegerType",
            "FloatingPointType",
            "_OptionalNilComparisonType",
        ] {
            assert!(
                registry.lookup_type(name).is_some(),
                "{name} is not defined"
            );
        }
    }

    #[test]
    fn int_conforms_to_the_integer_protocol_chain() {
        let registry = SymbolRegistry::bootstrap();
        let int = registry.builtins.int;
        let signed = registry.lookup_type("SignedIntegerType").unwrap();
        let integer = registry.lookup_type("_IntegerType").unwrap();
        let literal = registry.builtins.integer_literal_convertible;
        assert!(registry.types.conforms_to(int, signed));
        assert!(registry.types.conforms_to(int, integer));
        assert!(registry.types.conforms_to(int, literal));
        assert!(registry.types.conforms_to(int, registry.builtins.equatable));
    }

    #[test]
    fn arithmetic_overload_sets_cover_all_numeric_types() {
        let registry = SymbolRegistry::bootstrap();
        let (sym, _) = registry.lookup_symbol("+").unwrap();
        let Symbol::Overloaded { functions, .. } = registry.symbols.get(sym) else {
            panic!("expected overload set for +");
        };
        // 12 infix over numbers plus 24 unary prefix/postfix.
        assert_eq!(functions.len(), 36);
    }

    #[test]
    fn optional_is_an_enum_with_none_and_some() {
        let registry = SymbolRegistry::bootstrap();
        let optional = registry.builtins.optional;
        let data = registry.types.get(optional);
        assert_eq!(data.category, TypeCategory::Enum);
        assert!(data.enum_cases.contains_key("None"));
        assert!(data.enum_cases.contains_key("Some"));
        assert!(
            registry
                .types
                .conforms_to(optional, registry.builtins.nil_literal_convertible)
        );
    }

    #[test]
    fn specializations_are_interned() {
        let mut registry = SymbolRegistry::bootstrap();
        let a = registry.make_array(registry.builtins.int);
        let b = registry.make_array(registry.builtins.int);
        assert_eq!(a, b);
        let c = registry.make_array(registry.builtins.double);
        assert_ne!(a, c);
    }

    #[test]
    fn optional_chains_unwrap_to_the_final_type() {
        let mut registry = SymbolRegistry::bootstrap();
        let int = registry.builtins.int;
        let one = registry.make_optional(int);
        let two = registry.make_optional(one);
        assert_eq!(registry.final_type_of_optional(two), int);
        assert_eq!(registry.optional_inner(two), Some(one));
    }
}
