//! Type inference: bottom-up over expressions with a contextual type
//! threaded top-down, overload resolution by argument fit scoring, operators
//! resolved as calls, and the implicit-conversion transforms (optional
//! wrapping, `self.` expansion).

use super::{CurrentFunction, ImplicitConversion, SemanticAnalyzer, TracerKind};
use crate::symbol::{MemberFilter, PlaceholderRole, Symbol, SymbolFlags, SymbolId};
use crate::types::{FunctionInfo, Parameter, TypeCategory, TypeId};
use rustc_hash::FxHashMap;
use swz_common::diagnostics::diagnostic_codes as codes;
use swz_common::span::Span;
use swz_parser::ast::*;
use tracing::trace;

/// What overload scoring needs to know about one actual argument.
pub(crate) struct ArgInfo {
    pub label: Option<String>,
    pub ty: TypeId,
    pub is_int_literal: bool,
    pub span: Span,
}

impl SemanticAnalyzer<'_> {
    /// Infer with a contextual type, applying implicit optional wrapping.
    /// This is the entry point statements and declarations use.
    pub(crate) fn transform_expression(
        &mut self,
        contextual: Option<TypeId>,
        expr: &Expr,
    ) -> TypeId {
        let saved = self.ctx.contextual_type;
        self.ctx.contextual_type = contextual;
        let ty = self.infer_expr(expr);
        let mut result = ty;
        if let Some(target) = contextual {
            if self.registry.is_optional(target) && !ty.is_none() {
                if let Some(wraps) = self.wrap_count(ty, target) {
                    if wraps > 0 {
                        self.annotations
                            .implicit_conversions
                            .insert(expr.id(), ImplicitConversion::OptionalWrap(wraps));
                        result = target;
                    }
                }
            }
        }
        self.ctx.contextual_type = saved;
        result
    }

    /// How many `Optional.Some` wraps turn `ty` into `target`; `None` when
    /// no number of wraps fits.
    pub(crate) fn wrap_count(&self, ty: TypeId, target: TypeId) -> Option<u32> {
        if self.registry.types.can_assign_to(ty, target) {
            return Some(0);
        }
        let inner = self.registry.optional_inner(target)?;
        self.wrap_count(ty, inner).map(|n| n + 1)
    }

    // -------------------------------------------------------------------------
    // Expression dispatch
    // -------------------------------------------------------------------------

    pub(crate) fn infer_expr(&mut self, expr: &Expr) -> TypeId {
        if !self.enter_nesting(expr.span()) {
            self.leave_nesting();
            return self.placeholder();
        }
        let ty = self.infer_expr_inner(expr);
        self.annotations.expr_types.insert(expr.id(), ty);
        self.leave_nesting();
        ty
    }

    fn infer_expr_inner(&mut self, expr: &Expr) -> TypeId {
        match expr {
            Expr::IntegerLiteral(_) => self.literal_type(
                self.registry.builtins.integer_literal_convertible,
                self.registry.builtins.int,
            ),
            Expr::FloatLiteral(_) => self.literal_type(
                self.registry.builtins.float_literal_convertible,
                self.registry.builtins.double,
            ),
            Expr::StringLiteral(_) => self.literal_type(
                self.registry.builtins.string_literal_convertible,
                self.registry.builtins.string,
            ),
            Expr::BooleanLiteral(_) => self.registry.builtins.bool_type,
            Expr::NilLiteral(n) => self.infer_nil(n),
            Expr::StringInterpolation(n) => {
                for e in &n.exprs {
                    self.infer_expr(e);
                }
                self.registry.builtins.string
            }
            Expr::ArrayLiteral(n) => self.infer_array_literal(n),
            Expr::DictionaryLiteral(n) => self.infer_dictionary_literal(n),
            Expr::TupleExpr(n) => {
                let elements: Vec<TypeId> = n
                    .elements
                    .iter()
                    .map(|(_, e)| self.infer_expr(e))
                    .collect();
                self.registry.types.new_tuple(elements)
            }
            Expr::Parenthesized(n) => self.infer_expr(&n.expr),
            Expr::Identifier(n) => self.infer_identifier(n, true),
            Expr::SelfExpr(n) => match self.ctx.current_type {
                Some(ty) => ty,
                None => {
                    self.error(
                        codes::E_USE_OF_UNRESOLVED_IDENTIFIER_1,
                        n.span,
                        vec!["self".to_string()],
                    );
                    self.placeholder()
                }
            },
            Expr::MemberAccess(n) => self.infer_member_access(n),
            Expr::Subscript(n) => self.infer_subscript(n),
            Expr::FunctionCall(n) => self.infer_call(n),
            Expr::Unary(n) => self.infer_unary(n),
            Expr::Binary(n) => self.infer_binary(n),
            Expr::Conditional(n) => {
                self.infer_expr(&n.condition);
                let then_ty = self.infer_expr(&n.then_expr);
                let else_ty = self.infer_expr(&n.else_expr);
                if !self.registry.types.can_assign_to(else_ty, then_ty)
                    && !self.registry.types.can_assign_to(then_ty, else_ty)
                {
                    let from = self.registry.types.display(else_ty);
                    let to = self.registry.types.display(then_ty);
                    self.error(
                        codes::E_CANNOT_CONVERT_EXPRESSION_TYPE_2,
                        n.else_expr.span(),
                        vec![from, to],
                    );
                }
                then_ty
            }
            Expr::Assignment(n) => self.infer_assignment(n),
            Expr::TypeCheck(n) => {
                self.infer_expr(&n.subject);
                self.lookup_type_repr(&n.ty, false);
                self.registry.builtins.bool_type
            }
            Expr::TypeCast(n) => {
                self.infer_expr(&n.subject);
                let target = self.lookup_type_repr(&n.ty, false);
                if n.optional {
                    self.registry.make_optional(target)
                } else {
                    target
                }
            }
            Expr::ForcedUnwrap(n) => {
                let ty = self.infer_expr(&n.operand);
                self.registry.optional_inner(ty).unwrap_or(ty)
            }
            Expr::OptionalChaining(n) => {
                let ty = self.infer_expr(&n.operand);
                self.registry.optional_inner(ty).unwrap_or(ty)
            }
            Expr::InOut(n) => match self.lookup_symbol_lazily(&n.name) {
                Some((sym, _)) => self
                    .registry
                    .symbols
                    .value_type(sym)
                    .unwrap_or_else(|| self.placeholder()),
                None => {
                    self.error(
                        codes::E_USE_OF_UNRESOLVED_IDENTIFIER_1,
                        n.span,
                        vec![n.name.clone()],
                    );
                    self.placeholder()
                }
            },
            Expr::DynamicType(n) => self.infer_expr(&n.object),
            Expr::Closure(n) => self.infer_closure(n),
            Expr::Error(_) => self.placeholder(),
        }
    }

    /// Literal typing: the contextual type wins when it conforms to the
    /// matching literal-convertible protocol; otherwise the canonical type.
    fn literal_type(&self, protocol: TypeId, fallback: TypeId) -> TypeId {
        if let Some(ctx_ty) = self.ctx.contextual_type {
            if self.registry.types.conforms_to(ctx_ty, protocol) {
                return ctx_ty;
            }
        }
        fallback
    }

    fn infer_nil(&mut self, _n: &NilLiteral) -> TypeId {
        if let Some(ctx_ty) = self.ctx.contextual_type {
            let nil_proto = self.registry.builtins.nil_literal_convertible;
            if self.registry.types.conforms_to(ctx_ty, nil_proto)
                || self.registry.is_optional(ctx_ty)
            {
                return ctx_ty;
            }
        }
        // Without a context, `nil` has the nil-comparison type; that makes
        // `x == nil` resolve, and a binding of it is diagnosed at the
        // binding site.
        self.registry.builtins.optional_nil_comparison
    }

    fn infer_array_literal(&mut self, n: &ArrayLiteral) -> TypeId {
        // Contextual Array<T> supplies the element type, also for `[]`.
        let contextual_element = self.ctx.contextual_type.and_then(|c| {
            (self.registry.types.specialization_base(c) == Some(self.registry.builtins.array))
                .then(|| self.registry.types.get(c).generic_args.first().copied())
                .flatten()
        });
        let saved = self.ctx.contextual_type;
        self.ctx.contextual_type = contextual_element;
        let mut element = contextual_element;
        for e in &n.elements {
            let ty = self.infer_expr(e);
            match element {
                None => element = Some(ty),
                Some(current) => {
                    if self.registry.types.can_assign_to(ty, current) {
                        // keep the current upper bound
                    } else if self.registry.types.can_assign_to(current, ty) {
                        element = Some(ty);
                    } else {
                        let from = self.registry.types.display(ty);
                        let to = self.registry.types.display(current);
                        self.error(
                            codes::E_CANNOT_CONVERT_EXPRESSION_TYPE_2,
                            e.span(),
                            vec![from, to],
                        );
                    }
                }
            }
        }
        self.ctx.contextual_type = saved;
        let element = element.unwrap_or_else(|| self.placeholder());
        self.registry.make_array(element)
    }

    fn infer_dictionary_literal(&mut self, n: &DictionaryLiteral) -> TypeId {
        let contextual_pair = self.ctx.contextual_type.and_then(|c| {
            if self.registry.types.specialization_base(c)
                == Some(self.registry.builtins.dictionary)
            {
                let args = &self.registry.types.get(c).generic_args;
                Some((args.first().copied()?, args.get(1).copied()?))
            } else {
                None
            }
        });
        let saved = self.ctx.contextual_type;
        self.ctx.contextual_type = None;
        let mut key_ty = contextual_pair.map(|(k, _)| k);
        let mut value_ty = contextual_pair.map(|(_, v)| v);
        for (k, v) in &n.entries {
            let kt = self.infer_expr(k);
            let vt = self.infer_expr(v);
            key_ty.get_or_insert(kt);
            value_ty.get_or_insert(vt);
        }
        self.ctx.contextual_type = saved;
        let key_ty = key_ty.unwrap_or_else(|| self.placeholder());
        let value_ty = value_ty.unwrap_or_else(|| self.placeholder());
        self.registry.make_dictionary(key_ty, value_ty)
    }

    // -------------------------------------------------------------------------
    // Identifiers and self expansion
    // -------------------------------------------------------------------------

    /// `check_reads` is false for assignment targets, which may legally name
    /// an uninitialized symbol.
    fn infer_identifier(&mut self, n: &Identifier, check_reads: bool) -> TypeId {
        match self.lookup_symbol_lazily(&n.name) {
            Some((sym, _)) => {
                self.annotations.resolved_symbols.insert(n.id, sym);
                match self.registry.symbols.get(sym).clone() {
                    Symbol::Placeholder { ty, role, flags, .. } => {
                        if check_reads {
                            if flags.contains(SymbolFlags::INITIALIZING) {
                                self.error(
                                    codes::E_USE_OF_INITIALIZING_VARIABLE_1,
                                    n.span,
                                    vec![n.name.clone()],
                                );
                            } else if !flags.contains(SymbolFlags::INITIALIZED)
                                && matches!(
                                    role,
                                    PlaceholderRole::Variable | PlaceholderRole::Constant
                                )
                            {
                                self.error(
                                    codes::E_USE_OF_UNINITIALIZED_VARIABLE_1,
                                    n.span,
                                    vec![n.name.clone()],
                                );
                            }
                        }
                        if flags.contains(SymbolFlags::MEMBER) {
                            self.note_implicit_self(n);
                        }
                        ty
                    }
                    Symbol::Function { ty, .. } => ty,
                    Symbol::Overloaded { functions, .. } => {
                        // A bare reference to an overload set is only
                        // unambiguous when there is one function in it.
                        if functions.len() == 1 {
                            self.registry
                                .symbols
                                .value_type(functions[0])
                                .unwrap_or_else(|| self.placeholder())
                        } else {
                            self.error(
                                codes::E_AMBIGUOUS_USE_1,
                                n.span,
                                vec![n.name.clone()],
                            );
                            self.placeholder()
                        }
                    }
                    Symbol::Type(ty) => {
                        // `Box<Int>` in expression position specializes the
                        // named generic type.
                        if n.generic_args.is_empty() {
                            ty
                        } else {
                            let args: Vec<TypeId> = n
                                .generic_args
                                .iter()
                                .map(|a| self.lookup_type_repr(a, false))
                                .collect();
                            let base = self.registry.types.resolve_alias(ty);
                            if self.registry.types.get(base).generic_def.is_some() {
                                self.registry.types.new_specialized(base, args)
                            } else {
                                let shown = self.registry.types.display(ty);
                                self.error(
                                    codes::E_CANNOT_SPECIALIZE_NON_GENERIC_TYPE_1,
                                    n.span,
                                    vec![shown],
                                );
                                self.placeholder()
                            }
                        }
                    }
                }
            }
            None => {
                // A bare member of the current type (or a superclass) reads
                // through an implicit `self.`.
                if let Some(current) = self.ctx.current_type {
                    let filter = MemberFilter::RECURSIVE | MemberFilter::IN_EXTENSION;
                    if let Some((sym, _)) = self.get_member_from_type(current, &n.name, filter) {
                        self.annotations.resolved_symbols.insert(n.id, sym);
                        self.note_implicit_self(n);
                        return self
                            .registry
                            .symbols
                            .value_type(sym)
                            .unwrap_or_else(|| self.placeholder());
                    }
                }
                self.error(
                    codes::E_USE_OF_UNRESOLVED_IDENTIFIER_1,
                    n.span,
                    vec![n.name.clone()],
                );
                self.placeholder()
            }
        }
    }

    /// Record that a bare identifier reads through `self`, but only inside
    /// an instance method.
    fn note_implicit_self(&mut self, n: &Identifier) {
        let instance = self
            .ctx
            .current_function
            .as_ref()
            .is_some_and(|f| f.is_member && !f.is_static);
        if instance {
            self.annotations
                .implicit_conversions
                .insert(n.id, ImplicitConversion::ImplicitSelf);
        }
    }

    /// Whether this expression names a type rather than a value.
    fn is_type_reference(&self, expr: &Expr) -> bool {
        match expr {
            Expr::Identifier(id) => self
                .annotations
                .resolved_symbols
                .get(&id.id)
                .is_some_and(|&sym| matches!(self.registry.symbols.get(sym), Symbol::Type(_))),
            _ => false,
        }
    }

    // -------------------------------------------------------------------------
    // Member access
    // -------------------------------------------------------------------------

    fn infer_member_access(&mut self, n: &MemberAccess) -> TypeId {
        let Some(object) = &n.object else {
            return self.infer_leading_dot(n);
        };
        let obj_ty = self.infer_expr(object);
        if obj_ty == self.placeholder() {
            return self.placeholder();
        }

        match &n.member {
            MemberName::Index(i) => {
                let resolved = self.registry.types.resolve_alias(obj_ty);
                let data = self.registry.types.get(resolved);
                if data.category == TypeCategory::Tuple {
                    if let Some(&element) = data.element_types.get(*i as usize) {
                        return element;
                    }
                }
                let shown = self.registry.types.display(obj_ty);
                self.error(
                    codes::E_DOES_NOT_HAVE_A_MEMBER_2,
                    n.span,
                    vec![shown, i.to_string()],
                );
                self.placeholder()
            }
            MemberName::Named(name) => {
                if self.is_type_reference(object) {
                    self.infer_static_member(n, obj_ty, name)
                } else {
                    self.infer_instance_member(n, obj_ty, name)
                }
            }
        }
    }

    fn infer_leading_dot(&mut self, n: &MemberAccess) -> TypeId {
        let MemberName::Named(name) = &n.member else {
            return self.placeholder();
        };
        if let Some(ctx_ty) = self.ctx.contextual_type {
            let target = self.registry.final_enum_of(ctx_ty);
            if let Some(enum_ty) = target {
                if self
                    .enum_case_payload_shape(enum_ty, name)
                    .is_some()
                {
                    return ctx_ty;
                }
            }
        }
        self.error(
            codes::E_USE_OF_UNRESOLVED_IDENTIFIER_1,
            n.span,
            vec![name.clone()],
        );
        self.placeholder()
    }

    /// Whether `enum_ty` (possibly specialized) has a case `name`; returns
    /// its payload when present.
    fn enum_case_payload_shape(&self, enum_ty: TypeId, name: &str) -> Option<Option<TypeId>> {
        let resolved = self.registry.types.resolve_alias(enum_ty);
        let base = self
            .registry
            .types
            .specialization_base(resolved)
            .unwrap_or(resolved);
        self.registry.types.get(base).enum_cases.get(name).copied()
    }

    fn infer_static_member(&mut self, n: &MemberAccess, ty: TypeId, name: &str) -> TypeId {
        // Enum cases come first: `Direction.North`.
        if let Some(payload) = self.enum_case_payload_shape(ty, name) {
            return match payload {
                None => ty,
                Some(payload_ty) => {
                    let elements = self
                        .registry
                        .types
                        .get(self.registry.types.resolve_alias(payload_ty))
                        .element_types
                        .clone();
                    let params = elements.into_iter().map(Parameter::new).collect();
                    self.registry.types.new_function(params, ty, false)
                }
            };
        }
        if name == "init" {
            if let Some(set) = self.registry.types.get(ty).initializer {
                self.annotations.resolved_symbols.insert(n.id, set);
                return ty;
            }
        }
        let filter =
            MemberFilter::STATIC | MemberFilter::RECURSIVE | MemberFilter::IN_EXTENSION;
        if let Some((sym, _)) = self.get_member_from_type(ty, name, filter) {
            self.annotations.resolved_symbols.insert(n.id, sym);
            return self
                .registry
                .symbols
                .value_type(sym)
                .unwrap_or_else(|| self.placeholder());
        }
        if let Some(assoc) = self.registry.types.get_associated_type(ty, name) {
            return assoc;
        }
        let shown = self.registry.types.display(ty);
        self.error(
            codes::E_DOES_NOT_HAVE_A_MEMBER_2,
            n.span,
            vec![shown, name.to_string()],
        );
        self.placeholder()
    }

    fn infer_instance_member(&mut self, n: &MemberAccess, obj_ty: TypeId, name: &str) -> TypeId {
        let filter = MemberFilter::RECURSIVE | MemberFilter::IN_EXTENSION;
        if let Some((sym, _)) = self.get_member_from_type(obj_ty, name, filter) {
            self.annotations.resolved_symbols.insert(n.id, sym);
            let raw = match self.registry.symbols.get(sym) {
                Symbol::Overloaded { functions, .. } if functions.len() == 1 => self
                    .registry
                    .symbols
                    .value_type(functions[0])
                    .unwrap_or_else(|| self.placeholder()),
                Symbol::Overloaded { functions, .. } => {
                    // Property of the call path; bare references pick the
                    // first declared overload.
                    functions
                        .first()
                        .and_then(|&f| self.registry.symbols.value_type(f))
                        .unwrap_or_else(|| self.placeholder())
                }
                _ => self
                    .registry
                    .symbols
                    .value_type(sym)
                    .unwrap_or_else(|| self.placeholder()),
            };
            let resolved = self.registry.types.resolve_alias(obj_ty);
            let base = self
                .registry
                .types
                .specialization_base(resolved)
                .unwrap_or(resolved);
            return self.substitute_generics_from(raw, base, resolved);
        }
        let shown = self.registry.types.display(obj_ty);
        self.error(
            codes::E_DOES_NOT_HAVE_A_MEMBER_2,
            n.span,
            vec![shown, name.to_string()],
        );
        self.placeholder()
    }

    // -------------------------------------------------------------------------
    // Generic substitution
    // -------------------------------------------------------------------------

    /// Substitute the generic parameters of `base` with the arguments of
    /// `specialized` throughout `ty`.
    pub(crate) fn substitute_generics(
        &mut self,
        ty: TypeId,
        base: TypeId,
        specialized: TypeId,
    ) -> TypeId {
        self.substitute_generics_from(ty, base, specialized)
    }

    fn substitute_generics_from(
        &mut self,
        ty: TypeId,
        base: TypeId,
        specialized: TypeId,
    ) -> TypeId {
        if base == specialized {
            return ty;
        }
        let Some(def) = self.registry.types.get(base).generic_def.clone() else {
            return ty;
        };
        let args = self.registry.types.get(specialized).generic_args.clone();
        if args.len() != def.params.len() {
            return ty;
        }
        let map: FxHashMap<TypeId, TypeId> = def
            .params
            .iter()
            .zip(&args)
            .map(|((_, placeholder, _), &arg)| (*placeholder, arg))
            .collect();
        self.subst(ty, &map)
    }

    fn subst(&mut self, ty: TypeId, map: &FxHashMap<TypeId, TypeId>) -> TypeId {
        if let Some(&to) = map.get(&ty) {
            return to;
        }
        let data = self.registry.types.get(ty).clone();
        match data.category {
            TypeCategory::Tuple => {
                let elements: Vec<TypeId> = data
                    .element_types
                    .iter()
                    .map(|&e| self.subst(e, map))
                    .collect();
                self.registry.types.new_tuple(elements)
            }
            TypeCategory::Function => {
                let f = data.function.as_ref().unwrap();
                let params: Vec<Parameter> = f
                    .parameters
                    .iter()
                    .map(|p| Parameter {
                        name: p.name.clone(),
                        inout: p.inout,
                        ty: self.subst(p.ty, map),
                    })
                    .collect();
                let ret = self.subst(f.return_type, map);
                self.registry.types.new_function(params, ret, f.variadic)
            }
            TypeCategory::Specialized => {
                let args: Vec<TypeId> = data
                    .generic_args
                    .iter()
                    .map(|&a| self.subst(a, map))
                    .collect();
                self.registry
                    .types
                    .new_specialized(data.inner.unwrap_or(ty), args)
            }
            _ => ty,
        }
    }

    // -------------------------------------------------------------------------
    // Calls and overload resolution
    // -------------------------------------------------------------------------

    fn argument_infos(&mut self, call: &FunctionCall) -> Vec<ArgInfo> {
        let mut args: Vec<ArgInfo> = call
            .arguments
            .iter()
            .map(|arg| {
                let ty = self.infer_expr(&arg.value);
                ArgInfo {
                    label: arg.label.clone(),
                    ty,
                    is_int_literal: matches!(arg.value, Expr::IntegerLiteral(_)),
                    span: arg.value.span(),
                }
            })
            .collect();
        if let Some(closure) = &call.trailing_closure {
            let ty = self.infer_expr(closure);
            args.push(ArgInfo {
                label: None,
                ty,
                is_int_literal: false,
                span: closure.span(),
            });
        }
        args
    }

    fn infer_call(&mut self, call: &FunctionCall) -> TypeId {
        let args = self.argument_infos(call);
        match call.callee.as_ref() {
            Expr::Identifier(id) => {
                self.declare_immediately(&id.name);
                let Some((sym, _)) = self.registry.lookup_symbol(&id.name) else {
                    self.error(
                        codes::E_USE_OF_UNRESOLVED_IDENTIFIER_1,
                        id.span,
                        vec![id.name.clone()],
                    );
                    return self.placeholder();
                };
                // `Box<Int>(…)` constructs the specialization directly.
                if !id.generic_args.is_empty()
                    && matches!(self.registry.symbols.get(sym), Symbol::Type(_))
                {
                    let specialized = self.infer_identifier(id, true);
                    return self.resolve_constructor(specialized, &args, call.span);
                }
                let candidates = self.all_functions(&id.name, SymbolFlags::empty(), true);
                self.resolve_call(&id.name, &candidates, &args, call.span)
            }
            Expr::MemberAccess(ma) => self.infer_member_call(ma, &args, call.span),
            other => {
                let callee_ty = self.infer_expr(other);
                let resolved = self.registry.types.resolve_alias(callee_ty);
                match self.registry.types.get(resolved).function.clone() {
                    Some(f) => {
                        if self.fit_score(&f, &args).is_none() {
                            let shown = self.argument_list_display(&args);
                            self.error(
                                codes::E_CANNOT_INVOKE_A_WITH_AN_ARGUMENT_LIST_OF_TYPE_B_2,
                                call.span,
                                vec!["<expression>".to_string(), shown],
                            );
                        }
                        f.return_type
                    }
                    None => {
                        if resolved != self.placeholder() {
                            let shown = self.argument_list_display(&args);
                            let name = self.registry.types.display(callee_ty);
                            self.error(
                                codes::E_CANNOT_INVOKE_A_WITH_AN_ARGUMENT_LIST_OF_TYPE_B_2,
                                call.span,
                                vec![name, shown],
                            );
                        }
                        self.placeholder()
                    }
                }
            }
        }
    }

    fn infer_member_call(
        &mut self,
        ma: &MemberAccess,
        args: &[ArgInfo],
        span: Span,
    ) -> TypeId {
        let MemberName::Named(name) = &ma.member else {
            let ty = self.infer_member_access(ma);
            return ty;
        };

        let Some(object) = &ma.object else {
            // `.Some(1)` with a contextual enum type.
            if let Some(ctx_ty) = self.ctx.contextual_type {
                if let Some(enum_ty) = self.registry.final_enum_of(ctx_ty) {
                    if self.enum_case_payload_shape(enum_ty, name).is_some() {
                        return ctx_ty;
                    }
                }
            }
            self.error(
                codes::E_USE_OF_UNRESOLVED_IDENTIFIER_1,
                ma.span,
                vec![name.clone()],
            );
            return self.placeholder();
        };

        let obj_ty = self.infer_expr(object);
        if obj_ty == self.placeholder() {
            return self.placeholder();
        }

        if self.is_type_reference(object) {
            // Enum case constructor: `Optional.Some(x)`.
            if let Some(payload) = self.enum_case_payload_shape(obj_ty, name) {
                return self.infer_enum_case_call(obj_ty, payload, args, span);
            }
            // `Type(…)` routed through `Type.init(…)`.
            if name == "init" {
                return self.resolve_constructor(obj_ty, args, span);
            }
            let filter =
                MemberFilter::STATIC | MemberFilter::RECURSIVE | MemberFilter::IN_EXTENSION;
            let candidates = self.member_candidates(obj_ty, name, filter);
            if candidates.is_empty() {
                let shown = self.registry.types.display(obj_ty);
                self.error(
                    codes::E_DOES_NOT_HAVE_A_MEMBER_2,
                    ma.span,
                    vec![shown, name.clone()],
                );
                return self.placeholder();
            }
            return self.resolve_call(name, &candidates, args, span);
        }

        let filter = MemberFilter::RECURSIVE | MemberFilter::IN_EXTENSION;
        let candidates = self.member_candidates(obj_ty, name, filter);
        if candidates.is_empty() {
            let shown = self.registry.types.display(obj_ty);
            self.error(
                codes::E_DOES_NOT_HAVE_A_MEMBER_2,
                ma.span,
                vec![shown, name.clone()],
            );
            return self.placeholder();
        }
        let resolved = self.registry.types.resolve_alias(obj_ty);
        let base = self
            .registry
            .types
            .specialization_base(resolved)
            .unwrap_or(resolved);
        self.resolve_call_with_subst(name, &candidates, args, span, base, resolved)
    }

    fn infer_enum_case_call(
        &mut self,
        enum_ty: TypeId,
        payload: Option<TypeId>,
        args: &[ArgInfo],
        span: Span,
    ) -> TypeId {
        let Some(payload_ty) = payload else {
            if !args.is_empty() {
                let shown = self.argument_list_display(args);
                self.error(
                    codes::E_CANNOT_INVOKE_A_WITH_AN_ARGUMENT_LIST_OF_TYPE_B_2,
                    span,
                    vec![self.registry.types.display(enum_ty), shown],
                );
            }
            return enum_ty;
        };
        let elements = self
            .registry
            .types
            .get(self.registry.types.resolve_alias(payload_ty))
            .element_types
            .clone();
        // A generic enum specializes from its payload argument; Optional is
        // the canonical case.
        if self.registry.types.get(enum_ty).generic_def.is_some()
            && elements.len() == 1
            && args.len() == 1
        {
            return self.registry.types.new_specialized(enum_ty, vec![args[0].ty]);
        }
        if elements.len() != args.len() {
            let shown = self.argument_list_display(args);
            self.error(
                codes::E_CANNOT_INVOKE_A_WITH_AN_ARGUMENT_LIST_OF_TYPE_B_2,
                span,
                vec![self.registry.types.display(enum_ty), shown],
            );
        }
        enum_ty
    }

    fn resolve_constructor(&mut self, ty: TypeId, args: &[ArgInfo], span: Span) -> TypeId {
        let resolved = self.registry.types.resolve_alias(ty);
        let base = self
            .registry
            .types
            .specialization_base(resolved)
            .unwrap_or(resolved);
        match self.registry.types.get(base).initializer {
            Some(set) => {
                let candidates = vec![set];
                self.resolve_call_with_subst("init", &candidates, args, span, base, resolved);
                ty
            }
            None => {
                // Built-in nominal types accept conversion-style calls.
                if args.len() > 1 {
                    let shown = self.argument_list_display(args);
                    self.error(
                        codes::E_CANNOT_INVOKE_A_WITH_AN_ARGUMENT_LIST_OF_TYPE_B_2,
                        span,
                        vec![self.registry.types.display(ty), shown],
                    );
                }
                ty
            }
        }
    }

    /// Collect the full overload surface for a member name, including
    /// parents and extensions, deduplicated by function type.
    fn member_candidates(
        &mut self,
        ty: TypeId,
        name: &str,
        filter: MemberFilter,
    ) -> Vec<SymbolId> {
        let mut result = Vec::new();
        let mut current = Some(self.registry.types.resolve_alias(ty));
        while let Some(t) = current {
            let subject = self.registry.types.specialization_base(t).unwrap_or(t);
            let found = if filter.contains(MemberFilter::STATIC) {
                self.registry.types.get_declared_static_member(subject, name)
            } else {
                self.registry.types.get_declared_member(subject, name)
            };
            if let Some(sym) = found {
                self.push_function_candidates(sym, &mut result);
            }
            if filter.contains(MemberFilter::IN_EXTENSION) {
                let type_name = self.registry.types.get(subject).name.clone();
                for ext in self.registry.get_extensions(&type_name).to_vec() {
                    let found = if filter.contains(MemberFilter::STATIC) {
                        self.registry.types.get_declared_static_member(ext, name)
                    } else {
                        self.registry.types.get_declared_member(ext, name)
                    };
                    if let Some(sym) = found {
                        self.push_function_candidates(sym, &mut result);
                    }
                }
            }
            current = if filter.contains(MemberFilter::RECURSIVE) {
                self.registry.types.get(subject).parent
            } else {
                None
            };
        }
        result
    }

    fn push_function_candidates(&self, sym: SymbolId, out: &mut Vec<SymbolId>) {
        match self.registry.symbols.get(sym) {
            Symbol::Overloaded { functions, .. } => {
                for &f in functions {
                    if !out.contains(&f) {
                        out.push(f);
                    }
                }
            }
            _ => {
                if !out.contains(&sym) {
                    out.push(sym);
                }
            }
        }
    }

    fn resolve_call(
        &mut self,
        name: &str,
        candidates: &[SymbolId],
        args: &[ArgInfo],
        span: Span,
    ) -> TypeId {
        let placeholder = self.placeholder();
        self.resolve_call_with_subst(name, candidates, args, span, placeholder, placeholder)
    }

    /// Score every candidate and pick the unique maximum. Candidate order is
    /// deterministic (scope order, then declaration order), so ties can only
    /// mean genuine ambiguity.
    fn resolve_call_with_subst(
        &mut self,
        name: &str,
        candidates: &[SymbolId],
        args: &[ArgInfo],
        span: Span,
        base: TypeId,
        specialized: TypeId,
    ) -> TypeId {
        let mut expanded: Vec<SymbolId> = Vec::new();
        for &sym in candidates {
            self.push_function_candidates(sym, &mut expanded);
        }

        let mut best_score = -1.0f32;
        let mut best_ret: Option<TypeId> = None;
        let mut tie = false;
        let mut constructor_fallback: Option<TypeId> = None;

        for &sym in &expanded {
            match self.registry.symbols.get(sym).clone() {
                Symbol::Type(t) => {
                    // A type in the candidate set is a constructor call.
                    constructor_fallback = Some(t);
                }
                _ => {
                    let Some(fn_ty) = self.registry.symbols.value_type(sym) else {
                        continue;
                    };
                    let substituted = self.substitute_generics_from(fn_ty, base, specialized);
                    let resolved = self.registry.types.resolve_alias(substituted);
                    let Some(info) = self.registry.types.get(resolved).function.clone() else {
                        continue;
                    };
                    let Some(score) = self.fit_score(&info, args) else {
                        continue;
                    };
                    trace!(name, score, "overload candidate fits");
                    if (score - best_score).abs() < f32::EPSILON {
                        tie = true;
                    } else if score > best_score {
                        best_score = score;
                        best_ret = Some(info.return_type);
                        tie = false;
                    }
                }
            }
        }

        match best_ret {
            Some(ret) => {
                if tie {
                    self.error(codes::E_AMBIGUOUS_USE_1, span, vec![name.to_string()]);
                }
                ret
            }
            None => {
                if let Some(t) = constructor_fallback {
                    return self.resolve_constructor(t, args, span);
                }
                let shown = self.argument_list_display(args);
                self.error(
                    codes::E_CANNOT_INVOKE_A_WITH_AN_ARGUMENT_LIST_OF_TYPE_B_2,
                    span,
                    vec![name.to_string(), shown],
                );
                self.placeholder()
            }
        }
    }

    /// The argument fit score: 1.0 per exact argument, 0.5 per implicit
    /// conversion, `None` when the candidate cannot take the call.
    pub(crate) fn fit_score(&mut self, f: &FunctionInfo, args: &[ArgInfo]) -> Option<f32> {
        let required = f.parameters.len();
        if f.variadic {
            if args.len() + 1 < required {
                return None;
            }
        } else if args.len() != required {
            return None;
        }

        let mut score = 0.0f32;
        for (i, arg) in args.iter().enumerate() {
            let param = if i < f.parameters.len() {
                &f.parameters[i]
            } else {
                f.parameters.last()?
            };
            // External labels must match when the parameter declares one.
            if param.name.is_empty() {
                if arg.label.is_some() {
                    return None;
                }
            } else if arg.label.as_deref() != Some(param.name.as_str()) {
                return None;
            }

            let param_ty = self.registry.types.resolve_alias(param.ty);
            let arg_ty = self.registry.types.resolve_alias(arg.ty);
            if param_ty == arg_ty {
                score += 1.0;
                continue;
            }
            // Integer literals narrow to any numeric type.
            if arg.is_int_literal
                && self.registry.builtins.numbers.contains(&param_ty)
            {
                score += 0.5;
                continue;
            }
            // Implicit optional wrapping counts as a conversion; `nil`
            // converts to any optional.
            if self.registry.is_optional(param_ty)
                && (arg_ty == self.registry.builtins.optional_nil_comparison
                    || self.wrap_count(arg_ty, param_ty).is_some_and(|n| n > 0))
            {
                score += 0.5;
                continue;
            }
            if self.registry.types.can_assign_to(arg_ty, param_ty) {
                score += 0.5;
                continue;
            }
            return None;
        }
        Some(score)
    }

    fn argument_list_display(&self, args: &[ArgInfo]) -> String {
        let shown: Vec<String> = args
            .iter()
            .map(|a| self.registry.types.display(a.ty))
            .collect();
        format!("({})", shown.join(", "))
    }

    // -------------------------------------------------------------------------
    // Operators
    // -------------------------------------------------------------------------

    fn infer_binary(&mut self, n: &BinaryOperator) -> TypeId {
        // Compound assignment lowers onto the base operator.
        if let Some(base_op) = n.operator.strip_suffix('=') {
            if !base_op.is_empty()
                && !matches!(n.operator.as_str(), "==" | "!=" | "<=" | ">=" | "===" | "!==" | "~=")
            {
                let lhs_ty = self.assignment_target_type(&n.lhs);
                let rhs_ty = self.infer_expr(&n.rhs);
                let args = [
                    ArgInfo {
                        label: None,
                        ty: lhs_ty,
                        is_int_literal: matches!(n.lhs.as_ref(), Expr::IntegerLiteral(_)),
                        span: n.lhs.span(),
                    },
                    ArgInfo {
                        label: None,
                        ty: rhs_ty,
                        is_int_literal: matches!(n.rhs.as_ref(), Expr::IntegerLiteral(_)),
                        span: n.rhs.span(),
                    },
                ];
                let candidates = self.all_functions(base_op, SymbolFlags::INFIX, true);
                if !candidates.is_empty() {
                    self.resolve_call(base_op, &candidates, &args, n.span);
                }
                self.mark_assignment_target(&n.lhs);
                return self.registry.builtins.void;
            }
        }

        let lhs_ty = self.infer_expr(&n.lhs);
        let rhs_ty = self.infer_expr(&n.rhs);
        let candidates = self.all_functions(&n.operator, SymbolFlags::INFIX, true);
        if candidates.is_empty() {
            self.error(
                codes::E_USE_OF_UNRESOLVED_OPERATOR_1,
                n.span,
                vec![n.operator.clone()],
            );
            return self.placeholder();
        }
        let args = [
            ArgInfo {
                label: None,
                ty: lhs_ty,
                is_int_literal: matches!(n.lhs.as_ref(), Expr::IntegerLiteral(_)),
                span: n.lhs.span(),
            },
            ArgInfo {
                label: None,
                ty: rhs_ty,
                is_int_literal: matches!(n.rhs.as_ref(), Expr::IntegerLiteral(_)),
                span: n.rhs.span(),
            },
        ];
        self.resolve_call(&n.operator, &candidates, &args, n.span)
    }

    fn infer_unary(&mut self, n: &UnaryOperator) -> TypeId {
        let operand_ty = self.infer_expr(&n.operand);
        let mask = match n.fixity {
            UnaryFixity::Prefix => SymbolFlags::PREFIX,
            UnaryFixity::Postfix => SymbolFlags::POSTFIX,
        };
        let candidates = self.all_functions(&n.operator, mask, true);
        if candidates.is_empty() {
            self.error(
                codes::E_USE_OF_UNRESOLVED_OPERATOR_1,
                n.span,
                vec![n.operator.clone()],
            );
            return self.placeholder();
        }
        let args = [ArgInfo {
            label: None,
            ty: operand_ty,
            is_int_literal: matches!(n.operand.as_ref(), Expr::IntegerLiteral(_)),
            span: n.operand.span(),
        }];
        self.resolve_call(&n.operator, &candidates, &args, n.span)
    }

    // -------------------------------------------------------------------------
    // Assignment
    // -------------------------------------------------------------------------

    fn infer_assignment(&mut self, n: &Assignment) -> TypeId {
        let target_ty = self.assignment_target_type(&n.target);
        let value_ty = self.transform_expression(
            (!target_ty.is_none()).then_some(target_ty),
            &n.value,
        );
        if !self.registry.types.can_assign_to(value_ty, target_ty) {
            let from = self.registry.types.display(value_ty);
            let to = self.registry.types.display(target_ty);
            self.error(
                codes::E_CANNOT_CONVERT_EXPRESSION_TYPE_2,
                n.value.span(),
                vec![from, to],
            );
        }
        self.mark_assignment_target(&n.target);
        self.registry.builtins.void
    }

    /// Type of an assignment target, without read checks.
    fn assignment_target_type(&mut self, target: &Expr) -> TypeId {
        match target {
            Expr::Identifier(id) => {
                let ty = self.infer_identifier(id, false);
                self.annotations.expr_types.insert(id.id, ty);
                ty
            }
            other => self.infer_expr(other),
        }
    }

    /// Enforce single assignment for constants and record initialization.
    fn mark_assignment_target(&mut self, target: &Expr) {
        let Expr::Identifier(id) = target else {
            return;
        };
        let Some(&sym) = self.annotations.resolved_symbols.get(&id.id) else {
            return;
        };
        let flags = self.registry.symbols.flags(sym);
        if !flags.contains(SymbolFlags::WRITABLE) && flags.contains(SymbolFlags::INITIALIZED) {
            let context = self
                .ctx
                .current_function
                .as_ref()
                .map_or_else(|| "this scope".to_string(), |f| f.name.clone());
            self.error(
                codes::E_CANNOT_ASSIGN_TO_A_IN_B_2,
                id.span,
                vec![id.name.clone(), context],
            );
            return;
        }
        self.mark_initialized(sym);
    }

    // -------------------------------------------------------------------------
    // Closures
    // -------------------------------------------------------------------------

    fn infer_closure(&mut self, n: &Closure) -> TypeId {
        // Parameter types come from annotations, falling back to the
        // contextual function type by position.
        let contextual_fn = self.ctx.contextual_type.and_then(|c| {
            let resolved = self.registry.types.resolve_alias(c);
            self.registry.types.get(resolved).function.clone()
        });
        let mut params = Vec::new();
        for (i, p) in n.parameters.iter().enumerate() {
            let ty = match &p.ty {
                Some(repr) => self.lookup_type_repr(repr, false),
                None => contextual_fn
                    .as_ref()
                    .and_then(|f| f.parameters.get(i).map(|cp| cp.ty))
                    .unwrap_or_else(|| self.placeholder()),
            };
            params.push((p.name.clone(), ty));
        }
        let return_type = n
            .return_type
            .as_ref()
            .map(|r| self.lookup_type_repr(r, false))
            .or_else(|| contextual_fn.as_ref().map(|f| f.return_type))
            .unwrap_or_else(|| self.placeholder());

        let saved_fn = self.ctx.current_function.take();
        self.ctx.current_function = Some(CurrentFunction {
            name: "<closure>".to_string(),
            return_type,
            is_static: false,
            is_member: false,
        });
        self.with_scope(Some(n.id), |a| {
            for (name, ty) in &params {
                a.registry.add_symbol(
                    name.clone(),
                    Symbol::Placeholder {
                        name: name.clone(),
                        ty: *ty,
                        role: PlaceholderRole::Parameter,
                        flags: SymbolFlags::READABLE | SymbolFlags::INITIALIZED,
                    },
                );
            }
            // Implicit `$n` parameters when no signature was written.
            if params.is_empty() {
                if let Some(f) = &contextual_fn {
                    for (i, cp) in f.parameters.iter().enumerate() {
                        let name = format!("${i}");
                        a.registry.add_symbol(
                            name.clone(),
                            Symbol::Placeholder {
                                name,
                                ty: cp.ty,
                                role: PlaceholderRole::Parameter,
                                flags: SymbolFlags::READABLE | SymbolFlags::INITIALIZED,
                            },
                        );
                    }
                }
            }
            a.init_frames
                .push(super::init_flow::InitFrame::new(TracerKind::Sequence));
            for stmt in &n.statements {
                a.visit_stmt(stmt);
            }
            a.init_frames.pop();
        });
        self.ctx.current_function = saved_fn;

        let fn_params: Vec<Parameter> = params
            .into_iter()
            .map(|(_, ty)| Parameter::new(ty))
            .collect();
        self.registry.types.new_function(fn_params, return_type, false)
    }

    // -------------------------------------------------------------------------
    // Subscripts
    // -------------------------------------------------------------------------

    fn infer_subscript(&mut self, n: &SubscriptAccess) -> TypeId {
        let obj_ty = self.infer_expr(&n.object);
        if obj_ty == self.placeholder() {
            return self.placeholder();
        }
        let args: Vec<ArgInfo> = n
            .indices
            .iter()
            .map(|e| {
                let ty = self.infer_expr(e);
                ArgInfo {
                    label: None,
                    ty,
                    is_int_literal: matches!(e, Expr::IntegerLiteral(_)),
                    span: e.span(),
                }
            })
            .collect();
        let filter = MemberFilter::RECURSIVE | MemberFilter::IN_EXTENSION;
        let candidates = self.member_candidates(obj_ty, "subscript", filter);
        if candidates.is_empty() {
            let shown = self.registry.types.display(obj_ty);
            self.error(
                codes::E_DOES_NOT_HAVE_A_MEMBER_2,
                n.span,
                vec![shown, "subscript".to_string()],
            );
            return self.placeholder();
        }
        let resolved = self.registry.types.resolve_alias(obj_ty);
        let base = self
            .registry
            .types
            .specialization_base(resolved)
            .unwrap_or(resolved);
        self.resolve_call_with_subst("subscript", &candidates, &args, n.span, base, resolved)
    }

    // -------------------------------------------------------------------------
    // Type references
    // -------------------------------------------------------------------------

    /// Materialize a syntactic type reference, reporting undeclared types
    /// and generic-arity mismatches.
    pub(crate) fn lookup_type_repr(&mut self, repr: &TypeRepr, suppress_errors: bool) -> TypeId {
        match repr {
            TypeRepr::Named(named) => self.lookup_named_type(named, suppress_errors),
            TypeRepr::Tuple(t) => {
                let elements: Vec<TypeId> = t
                    .elements
                    .iter()
                    .map(|(_, e)| self.lookup_type_repr(e, suppress_errors))
                    .collect();
                self.registry.types.new_tuple(elements)
            }
            TypeRepr::Array(t) => {
                let element = self.lookup_type_repr(&t.element, suppress_errors);
                self.registry.make_array(element)
            }
            TypeRepr::Dictionary(t) => {
                let key = self.lookup_type_repr(&t.key, suppress_errors);
                let value = self.lookup_type_repr(&t.value, suppress_errors);
                self.registry.make_dictionary(key, value)
            }
            TypeRepr::Optional(t) | TypeRepr::ImplicitlyUnwrappedOptional(t) => {
                let inner = self.lookup_type_repr(&t.inner, suppress_errors);
                self.registry.make_optional(inner)
            }
            TypeRepr::Function(t) => {
                let params: Vec<Parameter> = t
                    .parameters
                    .iter()
                    .map(|p| Parameter {
                        name: p.name.clone().unwrap_or_default(),
                        inout: p.inout,
                        ty: self.lookup_type_repr(&p.ty, suppress_errors),
                    })
                    .collect();
                let ret = self.lookup_type_repr(&t.return_type, suppress_errors);
                self.registry.types.new_function(params, ret, false)
            }
            TypeRepr::ProtocolComposition(t) => {
                let mut protocols = Vec::new();
                for named in &t.protocols {
                    let ty = self.lookup_named_type(named, suppress_errors);
                    let resolved = self.registry.types.resolve_alias(ty);
                    if self.registry.types.get(resolved).category != TypeCategory::Protocol {
                        if !suppress_errors && resolved != self.placeholder() {
                            self.error(
                                codes::E_NON_PROTOCOL_TYPE_A_CANNOT_BE_USED_WITHIN_PROTOCOL_COMPOSITION_1,
                                named.span,
                                vec![named.name.clone()],
                            );
                        }
                        continue;
                    }
                    protocols.push(resolved);
                }
                self.registry.types.new_protocol_composition(protocols)
            }
            TypeRepr::Error(_) => self.placeholder(),
        }
    }

    fn lookup_named_type(&mut self, named: &NamedTypeRepr, suppress_errors: bool) -> TypeId {
        let Some(found) = self.lookup_type_lazily(&named.name) else {
            if !suppress_errors {
                self.error(
                    codes::E_USE_OF_UNDECLARED_TYPE_1,
                    named.span,
                    vec![named.name.clone()],
                );
            }
            return self.placeholder();
        };

        let generic_def = self
            .registry
            .types
            .get(self.registry.types.resolve_alias(found))
            .generic_def
            .clone();
        let mut ret = match (&generic_def, named.generic_args.len()) {
            (None, 0) => found,
            (None, _) => {
                if !suppress_errors {
                    let shown = self.registry.types.display(found);
                    self.error(
                        codes::E_CANNOT_SPECIALIZE_NON_GENERIC_TYPE_1,
                        named.span,
                        vec![shown],
                    );
                }
                return self.placeholder();
            }
            (Some(_), 0) => {
                if !suppress_errors {
                    let shown = self.registry.types.display(found);
                    self.error(
                        codes::E_GENERIC_TYPE_ARGUMENT_REQUIRED_1,
                        named.span,
                        vec![shown],
                    );
                }
                return self.placeholder();
            }
            (Some(def), n) if n > def.num_parameters() => {
                if !suppress_errors {
                    let shown = self.registry.types.display(found);
                    self.error(
                        codes::E_GENERIC_TYPE_SPECIALIZED_WITH_TOO_MANY_TYPE_PARAMETERS_3,
                        named.span,
                        vec![shown, n.to_string(), def.num_parameters().to_string()],
                    );
                }
                return self.placeholder();
            }
            (Some(def), n) if n < def.num_parameters() => {
                if !suppress_errors {
                    let shown = self.registry.types.display(found);
                    self.error(
                        codes::E_GENERIC_TYPE_SPECIALIZED_WITH_INSUFFICIENT_TYPE_PARAMETERS_3,
                        named.span,
                        vec![shown, n.to_string(), def.num_parameters().to_string()],
                    );
                }
                return self.placeholder();
            }
            (Some(_), _) => {
                let args: Vec<TypeId> = named
                    .generic_args
                    .iter()
                    .map(|a| self.lookup_type_repr(a, suppress_errors))
                    .collect();
                let base = self.registry.types.resolve_alias(found);
                self.registry.types.new_specialized(base, args)
            }
        };

        // Nested member types: `Outer.Inner`.
        let mut nested = named.nested.as_deref();
        while let Some(inner) = nested {
            if !inner.generic_args.is_empty() {
                if !suppress_errors {
                    self.error(
                        codes::E_CANNOT_SPECIALIZE_NON_GENERIC_TYPE_1,
                        inner.span,
                        vec![inner.name.clone()],
                    );
                }
                return self.placeholder();
            }
            match self.registry.types.get_associated_type(ret, &inner.name) {
                Some(child) => ret = child,
                None => {
                    if !suppress_errors {
                        let shown = self.registry.types.display(ret);
                        self.error(
                            codes::E_A_IS_NOT_A_MEMBER_TYPE_OF_B_2,
                            inner.span,
                            vec![inner.name.clone(), shown],
                        );
                    }
                    return self.placeholder();
                }
            }
            nested = inner.nested.as_deref();
        }
        ret
    }
}
