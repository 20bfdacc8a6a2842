//! Declaration analysis: symbol registration, nominal type definition,
//! initializer synthesis, and tuple-pattern destructuring.

use super::{CurrentFunction, SemanticAnalyzer, TracerKind, TupleExtraction};
use crate::symbol::{PlaceholderRole, Symbol, SymbolFlags, SymbolId};
use crate::types::{GenericDefinition, Parameter, TypeCategory, TypeId};
use std::rc::Rc;
use swz_common::diagnostics::diagnostic_codes as codes;
use swz_common::span::Span;
use swz_parser::ast::*;
use tracing::debug;

/// Accessibility of a pattern leaf during tuple expansion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PatternAccessibility {
    Constant,
    Variable,
}

impl SemanticAnalyzer<'_> {
    pub(crate) fn visit_decl(&mut self, decl: &Rc<Decl>) {
        match decl.as_ref() {
            Decl::Import(_) => {
                // Module resolution is the driver's concern; nothing to bind.
            }
            Decl::Operator(_) => {
                // The parser installed the registry entry already.
            }
            Decl::Bindings(d) => self.visit_bindings(d),
            Decl::ComputedProperty(d) => self.visit_computed_property(d),
            Decl::TypeAlias(d) => self.visit_typealias(d),
            Decl::Function(d) => self.visit_function(d),
            Decl::Enum(d) => self.visit_enum(d),
            Decl::Struct(d) => self.visit_struct(d),
            Decl::Class(d) => self.visit_class(d),
            Decl::Protocol(d) => self.visit_protocol(d),
            Decl::Extension(d) => self.visit_extension(d),
            Decl::Init(d) => self.visit_init(d),
            Decl::Deinit(d) => self.visit_deinit(d),
            Decl::Subscript(d) => self.visit_subscript(d),
        }
    }

    fn in_protocol(&self) -> bool {
        self.ctx.current_extension.is_none()
            && self.ctx.current_type.is_some_and(|t| {
                self.registry.types.get(t).category == TypeCategory::Protocol
            })
    }

    /// Target for member registration: the current extension if any,
    /// otherwise the current type.
    fn member_target(&self) -> Option<TypeId> {
        self.ctx.current_extension.or(self.ctx.current_type)
    }

    /// A declaration at type-body level (not inside a function body).
    fn at_member_level(&self) -> bool {
        self.ctx.current_type.is_some() && self.ctx.current_function.is_none()
    }

    // -------------------------------------------------------------------------
    // let / var groups
    // -------------------------------------------------------------------------

    pub(crate) fn visit_bindings(&mut self, d: &BindingsDecl) {
        for binding in &d.bindings {
            let (core, declared_repr) = match &binding.pattern {
                Pattern::Typed(t) => (t.pattern.as_ref(), Some(&t.ty)),
                p => (p, None),
            };
            let declared_ty = declared_repr.map(|r| self.lookup_type_repr(r, false));
            match core {
                Pattern::Identifier(idp) => {
                    self.declare_single_binding(d, binding, idp, declared_ty);
                }
                Pattern::Tuple(tp) => {
                    self.declare_tuple_binding(d, binding, tp, declared_ty);
                }
                Pattern::Wildcard(_) => {
                    if let Some(init) = &binding.initializer {
                        self.transform_expression(declared_ty, init);
                    }
                }
                other => {
                    self.error(codes::E_EXPECT_TUPLE_OR_IDENTIFIER, other.span(), vec![]);
                }
            }
        }
    }

    fn declare_single_binding(
        &mut self,
        d: &BindingsDecl,
        binding: &Binding,
        idp: &IdentifierPattern,
        declared_ty: Option<TypeId>,
    ) {
        if self.in_protocol() {
            let code = if d.constant {
                codes::E_PROTOCOL_CANNOT_DEFINE_LET_CONSTANT
            } else {
                codes::E_PROTOCOL_VAR_MUST_BE_COMPUTED_PROPERTY
            };
            self.error(code, binding.span, vec![]);
            return;
        }

        let name = idp.name.clone();
        let scope = self.registry.current_scope();
        if self.registry.scopes.get(scope).values.contains_key(&name) {
            self.error(
                codes::E_DEFINITION_CONFLICT_1,
                idp.span,
                vec![name.clone()],
            );
            return;
        }

        let is_member = self.at_member_level();
        let role = if is_member {
            PlaceholderRole::Property
        } else if d.constant {
            PlaceholderRole::Constant
        } else {
            PlaceholderRole::Variable
        };
        let mut flags = SymbolFlags::READABLE;
        if !d.constant {
            flags |= SymbolFlags::WRITABLE;
        }
        if is_member {
            flags |= SymbolFlags::MEMBER;
        }
        if d.modifiers.is_static {
            flags |= SymbolFlags::STATIC;
        }
        let placeholder_ty = self.placeholder();
        let sym = self.registry.add_symbol(
            name.clone(),
            Symbol::Placeholder {
                name: name.clone(),
                ty: placeholder_ty,
                role,
                flags,
            },
        );
        self.annotations.resolved_symbols.insert(idp.id, sym);

        let final_ty = if let Some(init) = &binding.initializer {
            self.registry
                .symbols
                .set_flags(sym, SymbolFlags::INITIALIZING, true);
            let inferred = self.transform_expression(declared_ty, init);
            self.registry
                .symbols
                .set_flags(sym, SymbolFlags::INITIALIZING, false);
            self.mark_initialized(sym);
            if declared_ty.is_none()
                && inferred == self.registry.builtins.optional_nil_comparison
                && matches!(init, Expr::NilLiteral(_))
            {
                self.error(codes::E_NIL_REQUIRES_CONTEXTUAL_TYPE, init.span(), vec![]);
            }
            if let Some(dt) = declared_ty {
                if !self.registry.types.can_assign_to(inferred, dt) {
                    let shown_from = self.registry.types.display(inferred);
                    let shown_to = self.registry.types.display(dt);
                    self.error(
                        codes::E_CANNOT_CONVERT_EXPRESSION_TYPE_2,
                        init.span(),
                        vec![shown_from, shown_to],
                    );
                }
                dt
            } else {
                inferred
            }
        } else {
            declared_ty.unwrap_or_else(|| self.placeholder())
        };

        if let Symbol::Placeholder { ty, .. } = self.registry.symbols.get_mut(sym) {
            *ty = final_ty;
        }

        if is_member {
            let is_static = d.modifiers.is_static;
            if let Some(target) = self.member_target() {
                self.add_member(target, &name, sym, is_static);
            }
            // Stored fields on the type itself drive initializer synthesis.
            if !is_static && self.ctx.current_extension.is_none() {
                if let Some(ty) = self.ctx.current_type {
                    self.stored_fields.entry(ty).or_default().push((
                        name,
                        final_ty,
                        binding.initializer.is_some(),
                    ));
                }
            }
        }
    }

    fn declare_tuple_binding(
        &mut self,
        d: &BindingsDecl,
        binding: &Binding,
        tp: &TuplePattern,
        declared_ty: Option<TypeId>,
    ) {
        if let Some(dt) = declared_ty {
            let resolved = self.registry.types.resolve_alias(dt);
            if self.registry.types.get(resolved).category != TypeCategory::Tuple {
                let shown = self.registry.types.display(dt);
                self.error(
                    codes::E_TUPLE_PATTERN_CANNOT_MATCH_VALUES_OF_THE_NON_TUPLE_TYPE_A_1,
                    binding.pattern.span(),
                    vec![shown],
                );
                return;
            }
        }

        let init_ty = binding
            .initializer
            .as_ref()
            .map(|init| self.transform_expression(declared_ty, init));
        let tuple_ty = declared_ty
            .or(init_ty)
            .unwrap_or_else(|| self.placeholder());

        let temp = self.fresh_temp_name();
        let access = if d.constant {
            PatternAccessibility::Constant
        } else {
            PatternAccessibility::Variable
        };
        let mut results = Vec::new();
        let mut indices = Vec::new();
        self.expand_tuple_pattern(
            &mut results,
            &mut indices,
            &Pattern::Tuple(tp.clone()),
            &temp,
            tuple_ty,
            access,
        );

        let initialized = binding.initializer.is_some();
        for extraction in &results {
            let mut flags = SymbolFlags::READABLE;
            if !extraction.readonly {
                flags |= SymbolFlags::WRITABLE;
            }
            let sym = self.registry.add_symbol(
                extraction.name.clone(),
                Symbol::Placeholder {
                    name: extraction.name.clone(),
                    ty: extraction.ty,
                    role: if extraction.readonly {
                        PlaceholderRole::Constant
                    } else {
                        PlaceholderRole::Variable
                    },
                    flags,
                },
            );
            if initialized {
                self.mark_initialized(sym);
            }
        }
        self.annotations.tuple_expansions.insert(binding.id, results);
    }

    /// Recursively produce one extraction per leaf of the pattern, each
    /// reached through a chain of positional accesses on the temporary.
    fn expand_tuple_pattern(
        &mut self,
        results: &mut Vec<TupleExtraction>,
        indices: &mut Vec<usize>,
        pattern: &Pattern,
        temp: &str,
        ty: TypeId,
        access: PatternAccessibility,
    ) {
        match pattern {
            Pattern::Identifier(id) => {
                results.push(TupleExtraction {
                    name: id.name.clone(),
                    temp: temp.to_string(),
                    indices: indices.clone(),
                    ty,
                    readonly: access == PatternAccessibility::Constant,
                });
            }
            Pattern::Wildcard(_) => {}
            Pattern::Typed(typed) => {
                let declared = self.lookup_type_repr(&typed.ty, false);
                if self.registry.types.compare(declared, ty) != std::cmp::Ordering::Equal {
                    let shown = self.registry.types.display(ty);
                    self.error(
                        codes::E_TYPE_ANNOTATION_DOES_NOT_MATCH_CONTEXTUAL_TYPE_A_1,
                        typed.span,
                        vec![shown],
                    );
                    return;
                }
                self.expand_tuple_pattern(results, indices, &typed.pattern, temp, declared, access);
            }
            Pattern::Tuple(tuple) => {
                let resolved = self.registry.types.resolve_alias(ty);
                let data = self.registry.types.get(resolved);
                if data.category != TypeCategory::Tuple {
                    let shown = self.registry.types.display(ty);
                    self.error(
                        codes::E_TUPLE_PATTERN_CANNOT_MATCH_VALUES_OF_THE_NON_TUPLE_TYPE_A_1,
                        tuple.span,
                        vec![shown],
                    );
                    return;
                }
                if data.element_types.len() != tuple.elements.len() {
                    let shown = self.registry.types.display(ty);
                    self.error(
                        codes::E_TYPE_ANNOTATION_DOES_NOT_MATCH_CONTEXTUAL_TYPE_A_1,
                        tuple.span,
                        vec![shown],
                    );
                    return;
                }
                let element_types = data.element_types.clone();
                for (i, element) in tuple.elements.iter().enumerate() {
                    indices.push(i);
                    self.expand_tuple_pattern(
                        results,
                        indices,
                        element,
                        temp,
                        element_types[i],
                        access,
                    );
                    indices.pop();
                }
            }
            Pattern::ValueBinding(vb) => {
                // `let` / `var` may not nest inside a pattern that already
                // has an accessibility.
                let shown = if vb.constant { "let" } else { "var" };
                self.error(
                    codes::E_VARLET_CANNOT_APPEAR_INSIDE_ANOTHER_VAR_OR_LET_PATTERN_1,
                    vb.span,
                    vec![shown.to_string()],
                );
            }
            Pattern::EnumCase(ec) => {
                if let Some(associated) = &ec.associated {
                    self.expand_tuple_pattern(results, indices, associated, temp, ty, access);
                }
            }
            Pattern::Expr(p) => {
                self.error(codes::E_EXPECT_TUPLE_OR_IDENTIFIER, p.span, vec![]);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Computed properties
    // -------------------------------------------------------------------------

    fn visit_computed_property(&mut self, d: &ComputedPropertyDecl) {
        let ty = self.lookup_type_repr(&d.ty, false);
        let is_member = self.at_member_level();
        let mut flags = SymbolFlags::READABLE | SymbolFlags::INITIALIZED;
        if d.setter.is_some() || (d.requirement_only && !d.modifiers.is_static) {
            flags |= SymbolFlags::WRITABLE;
        }
        if is_member {
            flags |= SymbolFlags::MEMBER;
        }
        if d.modifiers.is_static {
            flags |= SymbolFlags::STATIC;
        }
        let sym = self.registry.add_symbol(
            d.name.clone(),
            Symbol::Placeholder {
                name: d.name.clone(),
                ty,
                role: PlaceholderRole::Property,
                flags,
            },
        );
        if is_member {
            if let Some(target) = self.member_target() {
                self.add_member(target, &d.name, sym, d.modifiers.is_static);
            }
        }

        let is_static = d.modifiers.is_static;
        if let Some(getter) = &d.getter {
            self.analyze_accessor_body(&d.name, ty, None, getter, is_static);
        }
        if let Some((param, setter)) = &d.setter {
            let void = self.registry.builtins.void;
            let new_value = (param.clone().unwrap_or_else(|| "newValue".to_string()), ty);
            self.analyze_accessor_body(&d.name, void, Some(new_value), setter, is_static);
        }
    }

    fn analyze_accessor_body(
        &mut self,
        name: &str,
        return_type: TypeId,
        extra_param: Option<(String, TypeId)>,
        body: &CodeBlock,
        is_static: bool,
    ) {
        let is_member = self.ctx.current_type.is_some();
        let saved_fn = self.ctx.current_function.take();
        self.ctx.current_function = Some(CurrentFunction {
            name: name.to_string(),
            return_type,
            is_static,
            is_member: is_member && !is_static,
        });
        self.with_scope(Some(body.id), |a| {
            if let Some((param_name, param_ty)) = extra_param {
                a.registry.add_symbol(
                    param_name.clone(),
                    Symbol::Placeholder {
                        name: param_name,
                        ty: param_ty,
                        role: PlaceholderRole::Parameter,
                        flags: SymbolFlags::READABLE | SymbolFlags::INITIALIZED,
                    },
                );
            }
            a.init_frames.push(super::init_flow::InitFrame::new(TracerKind::Sequence));
            for stmt in &body.statements {
                a.visit_stmt(stmt);
            }
            a.init_frames.pop();
        });
        self.ctx.current_function = saved_fn;
    }

    // -------------------------------------------------------------------------
    // Type aliases
    // -------------------------------------------------------------------------

    fn visit_typealias(&mut self, d: &TypeAliasDecl) {
        let scope = self.registry.current_scope();
        if self.registry.scopes.get(scope).types.contains_key(&d.name) {
            self.error(codes::E_INVALID_REDECLARATION_1, d.span, vec![d.name.clone()]);
            return;
        }
        match &d.target {
            Some(target) => {
                let resolved = self.lookup_type_repr(target, false);
                let alias = self.registry.types.new_alias(d.name.clone(), resolved);
                self.registry.add_type(d.name.clone(), alias);
                if let Some(target_ty) = self.member_target() {
                    self.registry
                        .types
                        .get_mut(target_ty)
                        .associated_types
                        .insert(d.name.clone(), alias);
                }
            }
            None => {
                // A bare `typealias Name` inside a protocol is an
                // associated-type requirement.
                let placeholder = self.placeholder();
                let alias = self.registry.types.new_alias(d.name.clone(), placeholder);
                self.registry.add_type(d.name.clone(), alias);
                if let Some(target_ty) = self.member_target() {
                    self.registry
                        .types
                        .get_mut(target_ty)
                        .associated_types
                        .insert(d.name.clone(), alias);
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Functions
    // -------------------------------------------------------------------------

    pub(crate) fn visit_function(&mut self, d: &FunctionDecl) {
        debug!(name = %d.name, "analyzing function");
        let in_protocol = self.in_protocol();

        // Generic parameters become placeholder types scoped to the body.
        let generic = d.generic.as_ref().map(|g| self.build_generic_definition(g));

        let saved_scope = self.registry.current_scope();
        self.registry.enter_scope(Some(d.id));
        if let Some(generic) = &generic {
            for (name, placeholder, _) in &generic.params {
                self.registry.add_type(name.clone(), *placeholder);
            }
        }

        let params = self.build_parameters(&d.parameters, in_protocol, false);
        let void = self.registry.builtins.void;
        let return_type = d
            .return_type
            .as_ref()
            .map_or(void, |r| self.lookup_type_repr(r, false));
        let variadic = d.parameters.iter().any(|p| p.variadic);
        let fn_ty = self
            .registry
            .types
            .new_function(params, return_type, variadic);

        let mut flags = SymbolFlags::empty();
        if d.modifiers.is_static {
            flags |= SymbolFlags::STATIC;
        }
        if self.at_member_level() {
            flags |= SymbolFlags::MEMBER;
        }
        let is_operator_name = !d.name.chars().next().is_some_and(|c| {
            c.is_alphanumeric() || c == '_'
        });
        if d.modifiers.prefix {
            flags |= SymbolFlags::PREFIX;
        } else if d.modifiers.postfix {
            flags |= SymbolFlags::POSTFIX;
        } else if d.modifiers.infix || (is_operator_name && d.parameters.len() == 2) {
            flags |= SymbolFlags::INFIX;
        } else if is_operator_name {
            flags |= SymbolFlags::PREFIX;
        }

        let func_sym = self.registry.symbols.alloc(Symbol::Function {
            name: d.name.clone(),
            ty: fn_ty,
            flags,
            decl: Some(d.id),
        });
        self.annotations.resolved_symbols.insert(d.id, func_sym);

        // Register in the enclosing scope before analyzing the body, so
        // recursion resolves; member functions additionally land in the
        // enclosing type so qualified lookup and conformance see them.
        let member_target = self.at_member_level().then(|| self.member_target()).flatten();
        let registered_ok = match member_target {
            Some(target) => {
                let ok =
                    self.add_member_function(target, &d.name, func_sym, d.modifiers.is_static);
                let _ = self.registry.register_function(saved_scope, &d.name, func_sym);
                ok
            }
            None => self.registry.register_function(saved_scope, &d.name, func_sym),
        };
        if !registered_ok {
            self.error(codes::E_INVALID_REDECLARATION_1, d.span, vec![d.name.clone()]);
        }

        if let Some(body) = &d.body {
            let saved_fn = self.ctx.current_function.take();
            self.ctx.current_function = Some(CurrentFunction {
                name: d.name.clone(),
                return_type,
                is_static: d.modifiers.is_static,
                is_member: self.ctx.current_type.is_some() && !d.modifiers.is_static,
            });
            self.bind_parameters(&d.parameters);
            self.init_frames
                .push(super::init_flow::InitFrame::new(TracerKind::Sequence));
            for stmt in &body.statements {
                self.visit_stmt(stmt);
            }
            self.init_frames.pop();
            self.ctx.current_function = saved_fn;
        }

        self.registry.set_current_scope(saved_scope);
    }

    fn build_generic_definition(&mut self, g: &GenericParams) -> Rc<GenericDefinition> {
        let mut def = GenericDefinition::default();
        for param in &g.params {
            let placeholder = self.registry.types.new_generic_parameter(param.name.clone());
            let constraints: Vec<TypeId> = param
                .constraints
                .iter()
                .map(|c| self.lookup_type_repr(c, false))
                .collect();
            def.params.push((param.name.clone(), placeholder, constraints));
        }
        Rc::new(def)
    }

    /// Resolve parameter types and apply the parameter checks. When
    /// `implicit_external` is set (initializers), the local name doubles as
    /// the argument label.
    fn build_parameters(
        &mut self,
        parameters: &[swz_parser::ast::Parameter],
        in_protocol: bool,
        implicit_external: bool,
    ) -> Vec<Parameter> {
        let mut seen: rustc_hash::FxHashSet<&str> = rustc_hash::FxHashSet::default();
        let mut result = Vec::new();
        for p in parameters {
            if !seen.insert(p.local_name.as_str()) && p.local_name != "_" {
                self.error(
                    codes::E_DEFINITION_CONFLICT_1,
                    p.span,
                    vec![p.local_name.clone()],
                );
            }
            if p.shorthand_external {
                self.warning(
                    codes::W_PARAM_CAN_BE_EXPRESSED_MORE_SUCCINCTLY_1,
                    p.span,
                    vec![p.local_name.clone()],
                );
            }
            if p.inout && p.variadic {
                self.error(codes::E_INOUT_ARGUMENTS_CANNOT_BE_VARIADIC, p.span, vec![]);
            }
            let ty = self.lookup_type_repr(&p.ty, false);
            if let Some(default) = &p.default_value {
                if in_protocol {
                    self.error(
                        codes::E_DEFAULT_ARGUMENT_NOT_PERMITTED_IN_A_PROTOCOL_METHOD,
                        default.span(),
                        vec![],
                    );
                } else {
                    self.transform_expression(Some(ty), default);
                }
            }
            let external = p
                .external_name
                .clone()
                .or_else(|| implicit_external.then(|| p.local_name.clone()))
                .unwrap_or_default();
            result.push(Parameter {
                name: external,
                inout: p.inout,
                ty,
            });
        }
        result
    }

    /// Introduce parameters into the current (body) scope.
    fn bind_parameters(&mut self, parameters: &[swz_parser::ast::Parameter]) {
        for p in parameters {
            if p.local_name == "_" {
                continue;
            }
            let ty = self.lookup_type_repr(&p.ty, true);
            let mut flags = SymbolFlags::READABLE | SymbolFlags::INITIALIZED;
            if p.inout {
                flags |= SymbolFlags::WRITABLE;
            }
            self.registry.add_symbol(
                p.local_name.clone(),
                Symbol::Placeholder {
                    name: p.local_name.clone(),
                    ty,
                    role: PlaceholderRole::Parameter,
                    flags,
                },
            );
        }
    }

    // -------------------------------------------------------------------------
    // Member registration
    // -------------------------------------------------------------------------

    fn add_member(&mut self, target: TypeId, name: &str, sym: SymbolId, is_static: bool) {
        let filter = crate::symbol::MemberFilter::RECURSIVE
            | crate::symbol::MemberFilter::IN_EXTENSION;
        if self.get_member_from_type(target, name, filter).is_some() {
            self.error(
                codes::E_INVALID_REDECLARATION_1,
                Span::dummy(),
                vec![name.to_string()],
            );
            return;
        }
        let data = self.registry.types.get_mut(target);
        if is_static {
            data.static_members.insert(name.to_string(), sym);
        } else {
            data.members.insert(name.to_string(), sym);
        }
    }

    /// Add a function member, growing an overload set; duplicates by
    /// function type are an invalid redeclaration.
    fn add_member_function(
        &mut self,
        target: TypeId,
        name: &str,
        func: SymbolId,
        is_static: bool,
    ) -> bool {
        let existing = if is_static {
            self.registry.types.get(target).static_members.get(name).copied()
        } else {
            self.registry.types.get(target).members.get(name).copied()
        };
        let merged = match existing {
            None => func,
            Some(prev) => match self.registry.symbols.get(prev).clone() {
                Symbol::Overloaded { mut functions, .. } => {
                    if self.duplicate_in(&functions, func) {
                        return false;
                    }
                    functions.push(func);
                    *self.registry.symbols.get_mut(prev) = Symbol::Overloaded {
                        name: name.to_string(),
                        functions,
                    };
                    prev
                }
                Symbol::Function { .. } => {
                    if self.duplicate_in(&[prev], func) {
                        return false;
                    }
                    self.registry.symbols.alloc(Symbol::Overloaded {
                        name: name.to_string(),
                        functions: vec![prev, func],
                    })
                }
                _ => return false,
            },
        };
        let data = self.registry.types.get_mut(target);
        if is_static {
            data.static_members.insert(name.to_string(), merged);
        } else {
            data.members.insert(name.to_string(), merged);
        }
        true
    }

    fn duplicate_in(&self, existing: &[SymbolId], func: SymbolId) -> bool {
        let Some(new_ty) = self.registry.symbols.value_type(func) else {
            return false;
        };
        existing.iter().any(|&f| {
            self.registry
                .symbols
                .value_type(f)
                .is_some_and(|t| self.registry.types.same_function_type(t, new_ty))
        })
    }

    // -------------------------------------------------------------------------
    // Nominal types
    // -------------------------------------------------------------------------

    fn visit_struct(&mut self, d: &StructDecl) {
        let ty = self.define_nominal(TypeCategory::Struct, &d.info, d.span, d.id);
        if let Some(ty) = ty {
            self.synthesize_struct_initializers(ty);
        }
    }

    fn visit_class(&mut self, d: &ClassDecl) {
        let ty = self.define_nominal(TypeCategory::Class, &d.info, d.span, d.id);
        if let Some(ty) = ty {
            let has_init = self.registry.types.get(ty).initializer.is_some();
            let needs_init = self
                .stored_fields
                .get(&ty)
                .is_some_and(|fields| fields.iter().any(|(_, _, has_default)| !has_default));
            if !has_init && needs_init {
                self.error(
                    codes::E_CLASS_HAS_NO_INITIALIZERS_1,
                    d.span,
                    vec![d.info.name.clone()],
                );
            }
        }
    }

    fn visit_enum(&mut self, d: &EnumDecl) {
        let Some(ty) = self.define_nominal(TypeCategory::Enum, &d.info, d.span, d.id) else {
            return;
        };
        // Case payloads may reference the enum's generic parameters, so they
        // resolve in a scope that has the placeholders in it.
        let generic = self.registry.types.get(ty).generic_def.clone();
        self.with_scope(Some(d.id), |a| {
            if let Some(generic) = &generic {
                for (name, placeholder, _) in &generic.params {
                    a.registry.add_type(name.clone(), *placeholder);
                }
            }
            for case in &d.cases {
                let payload = case.associated.as_ref().map(|tuple| {
                    let elements: Vec<TypeId> = tuple
                        .elements
                        .iter()
                        .map(|(_, t)| a.lookup_type_repr(t, false))
                        .collect();
                    a.registry.types.new_tuple(elements)
                });
                if let Some(raw) = &case.raw_value {
                    a.transform_expression(None, raw);
                }
                a.registry
                    .types
                    .get_mut(ty)
                    .enum_cases
                    .insert(case.name.clone(), payload);
            }
        });
    }

    fn visit_protocol(&mut self, d: &ProtocolDecl) {
        self.define_nominal(TypeCategory::Protocol, &d.info, d.span, d.id);
    }

    /// Define a nominal type and analyze its body. Returns `None` on an
    /// invalid redeclaration.
    fn define_nominal(
        &mut self,
        category: TypeCategory,
        info: &TypeDeclInfo,
        span: Span,
        decl_id: NodeId,
    ) -> Option<TypeId> {
        let scope = self.registry.current_scope();
        if self.registry.scopes.get(scope).types.contains_key(&info.name) {
            self.error(
                codes::E_INVALID_REDECLARATION_1,
                span,
                vec![info.name.clone()],
            );
            return None;
        }

        let generic = info.generic.as_ref().map(|g| self.build_generic_definition(g));

        // Resolve the inheritance clause: at most one superclass (classes
        // only, first position), plus adopted protocols.
        let mut parent: Option<TypeId> = None;
        let mut protocols: Vec<TypeId> = Vec::new();
        let mut conformances: Vec<(TypeId, Span)> = Vec::new();
        for (i, named) in info.inherited.iter().enumerate() {
            let Some(base) = self.lookup_type_lazily(&named.name) else {
                self.error(
                    codes::E_USE_OF_UNDECLARED_TYPE_1,
                    named.span,
                    vec![named.name.clone()],
                );
                continue;
            };
            let base = self.registry.types.resolve_alias(base);
            match self.registry.types.get(base).category {
                TypeCategory::Protocol => {
                    protocols.push(base);
                    conformances.push((base, named.span));
                }
                TypeCategory::Class if category == TypeCategory::Class => {
                    if i != 0 {
                        let shown = self.registry.types.display(base);
                        self.error(
                            codes::E_SUPERCLASS_MUST_APPEAR_FIRST_IN_INHERITANCE_CLAUSE_1,
                            named.span,
                            vec![shown],
                        );
                    } else {
                        parent = Some(base);
                    }
                }
                _ => {
                    let shown = self.registry.types.display(base);
                    self.error(
                        codes::E_INHERITANCE_FROM_NON_PROTOCOL_NON_CLASS_TYPE_1,
                        named.span,
                        vec![shown],
                    );
                }
            }
        }

        let ty = self.registry.types.new_type(
            info.name.clone(),
            category,
            Some(decl_id),
            parent,
            protocols,
            generic.clone(),
        );
        self.registry.add_type(info.name.clone(), ty);
        if !conformances.is_empty() && category != TypeCategory::Protocol {
            self.conformance_queue.push((ty, conformances));
        }
        // A nested nominal type is also a member type of its enclosure,
        // which is how associated-type requirements get witnessed.
        if self.at_member_level() {
            if let Some(target) = self.member_target() {
                self.registry
                    .types
                    .get_mut(target)
                    .associated_types
                    .insert(info.name.clone(), ty);
            }
        }

        let saved_type = self.ctx.current_type.replace(ty);
        let saved_fn = self.ctx.current_function.take();
        self.with_scope(Some(decl_id), |a| {
            if let Some(generic) = &generic {
                for (name, placeholder, _) in &generic.params {
                    a.registry.add_type(name.clone(), *placeholder);
                }
            }
            for member in &info.body {
                a.visit_decl(member);
            }
        });
        self.ctx.current_function = saved_fn;
        self.ctx.current_type = saved_type;
        Some(ty)
    }

    /// Default initializers for structures: zero-argument when every stored
    /// field has a default value, memberwise otherwise, and only when no
    /// custom initializer was declared.
    fn synthesize_struct_initializers(&mut self, ty: TypeId) {
        if self.registry.types.get(ty).initializer.is_some() {
            return;
        }
        let fields = self.stored_fields.get(&ty).cloned().unwrap_or_default();
        let all_defaulted = fields.iter().all(|(_, _, has_default)| *has_default);
        let params: Vec<Parameter> = if all_defaulted {
            Vec::new()
        } else {
            fields
                .iter()
                .map(|(name, field_ty, _)| Parameter::named(name.clone(), *field_ty))
                .collect()
        };
        let init_ty = self.registry.types.new_function(params, ty, false);
        let init = self.registry.symbols.alloc(Symbol::Function {
            name: "init".to_string(),
            ty: init_ty,
            flags: SymbolFlags::MEMBER,
            decl: None,
        });
        let set = self.registry.symbols.alloc(Symbol::Overloaded {
            name: "init".to_string(),
            functions: vec![init],
        });
        self.registry.types.get_mut(ty).initializer = Some(set);
    }

    // -------------------------------------------------------------------------
    // Extensions
    // -------------------------------------------------------------------------

    fn visit_extension(&mut self, d: &ExtensionDecl) {
        let Some(extended) = self.lookup_type_lazily(&d.name) else {
            self.error(
                codes::E_USE_OF_UNDECLARED_TYPE_1,
                d.span,
                vec![d.name.clone()],
            );
            return;
        };
        let extended = self.registry.types.resolve_alias(extended);

        let mut conformances = Vec::new();
        let mut protocols = Vec::new();
        for named in &d.protocols {
            let Some(base) = self.lookup_type_lazily(&named.name) else {
                self.error(
                    codes::E_USE_OF_UNDECLARED_TYPE_1,
                    named.span,
                    vec![named.name.clone()],
                );
                continue;
            };
            let base = self.registry.types.resolve_alias(base);
            if self.registry.types.get(base).category == TypeCategory::Protocol {
                protocols.push(base);
                conformances.push((base, named.span));
            } else {
                let shown = self.registry.types.display(base);
                self.error(
                    codes::E_INHERITANCE_FROM_NON_PROTOCOL_NON_CLASS_TYPE_1,
                    named.span,
                    vec![shown],
                );
            }
        }

        let ext = self.registry.types.new_type(
            d.name.clone(),
            TypeCategory::Extension,
            Some(d.id),
            Some(extended),
            protocols,
            None,
        );
        self.registry.register_extension(&d.name, ext);
        if !conformances.is_empty() {
            self.conformance_queue.push((extended, conformances));
        }

        let saved_type = self.ctx.current_type.replace(extended);
        let saved_ext = self.ctx.current_extension.replace(ext);
        let saved_fn = self.ctx.current_function.take();
        self.with_scope(Some(d.id), |a| {
            for member in &d.body {
                a.visit_decl(member);
            }
        });
        self.ctx.current_function = saved_fn;
        self.ctx.current_extension = saved_ext;
        self.ctx.current_type = saved_type;
    }

    // -------------------------------------------------------------------------
    // Initializers, deinitializers, subscripts
    // -------------------------------------------------------------------------

    fn visit_init(&mut self, d: &InitDecl) {
        let Some(target) = self.member_target() else {
            self.error(codes::E_UNEXPECTED_TOKEN_1, d.span, vec!["init".to_string()]);
            return;
        };
        let owner = self.ctx.current_type.unwrap_or(target);

        let saved_scope = self.registry.current_scope();
        self.registry.enter_scope(Some(d.id));
        // Initializer parameters carry implicit external names.
        let params = self.build_parameters(&d.parameters, false, true);
        let fn_ty = self.registry.types.new_function(params, owner, false);
        let func = self.registry.symbols.alloc(Symbol::Function {
            name: "init".to_string(),
            ty: fn_ty,
            flags: SymbolFlags::MEMBER,
            decl: Some(d.id),
        });

        let duplicate = match self.registry.types.get(target).initializer {
            Some(set) => match self.registry.symbols.get(set).clone() {
                Symbol::Overloaded { mut functions, .. } => {
                    if self.duplicate_in(&functions, func) {
                        true
                    } else {
                        functions.push(func);
                        *self.registry.symbols.get_mut(set) = Symbol::Overloaded {
                            name: "init".to_string(),
                            functions,
                        };
                        false
                    }
                }
                _ => true,
            },
            None => {
                let set = self.registry.symbols.alloc(Symbol::Overloaded {
                    name: "init".to_string(),
                    functions: vec![func],
                });
                self.registry.types.get_mut(target).initializer = Some(set);
                false
            }
        };
        if duplicate {
            self.error(
                codes::E_INVALID_REDECLARATION_1,
                d.span,
                vec!["init".to_string()],
            );
        }

        let saved_fn = self.ctx.current_function.take();
        self.ctx.current_function = Some(CurrentFunction {
            name: "init".to_string(),
            return_type: self.registry.builtins.void,
            is_static: false,
            is_member: true,
        });
        self.bind_parameters(&d.parameters);
        self.init_frames
            .push(super::init_flow::InitFrame::new(TracerKind::Sequence));
        for stmt in &d.body.statements {
            self.visit_stmt(stmt);
        }
        self.init_frames.pop();
        self.ctx.current_function = saved_fn;
        self.registry.set_current_scope(saved_scope);
    }

    fn visit_deinit(&mut self, d: &DeinitDecl) {
        let saved_fn = self.ctx.current_function.take();
        self.ctx.current_function = Some(CurrentFunction {
            name: "deinit".to_string(),
            return_type: self.registry.builtins.void,
            is_static: false,
            is_member: true,
        });
        self.with_scope(Some(d.id), |a| {
            a.init_frames
                .push(super::init_flow::InitFrame::new(TracerKind::Sequence));
            for stmt in &d.body.statements {
                a.visit_stmt(stmt);
            }
            a.init_frames.pop();
        });
        self.ctx.current_function = saved_fn;
    }

    fn visit_subscript(&mut self, d: &SubscriptDecl) {
        let Some(target) = self.member_target() else {
            return;
        };
        let saved_scope = self.registry.current_scope();
        self.registry.enter_scope(Some(d.id));
        let params = self.build_parameters(&d.parameters, false, false);
        let return_type = self.lookup_type_repr(&d.return_type, false);

        if d.getter.is_some() || d.setter.is_none() {
            let getter_ty = self
                .registry
                .types
                .new_function(params.clone(), return_type, false);
            let getter = self.registry.symbols.alloc(Symbol::Function {
                name: "subscript".to_string(),
                ty: getter_ty,
                flags: SymbolFlags::MEMBER,
                decl: Some(d.id),
            });
            self.add_member_function(target, "subscript", getter, false);
        }
        if d.setter.is_some() {
            let mut setter_params = params.clone();
            setter_params.push(Parameter::new(return_type));
            let void = self.registry.builtins.void;
            let setter_ty = self.registry.types.new_function(setter_params, void, false);
            let setter = self.registry.symbols.alloc(Symbol::Function {
                name: "subscript".to_string(),
                ty: setter_ty,
                flags: SymbolFlags::MEMBER,
                decl: Some(d.id),
            });
            self.add_member_function(target, "subscript", setter, false);
        }

        if let Some(getter) = &d.getter {
            self.bind_parameters(&d.parameters);
            self.analyze_accessor_body("subscript", return_type, None, getter, false);
        }
        if let Some((param, setter)) = &d.setter {
            self.bind_parameters(&d.parameters);
            let new_value = (param.clone().unwrap_or_else(|| "newValue".to_string()), return_type);
            let void = self.registry.builtins.void;
            self.analyze_accessor_body("subscript", void, Some(new_value), setter, false);
        }
        self.registry.set_current_scope(saved_scope);
    }
}
