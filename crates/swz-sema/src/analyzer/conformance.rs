//! Protocol conformance verification.
//!
//! After all declarations are analyzed, every nominal type that declared a
//! conformance is checked against each protocol's requirements: methods by
//! signature, properties by presence, associated types by a member type or
//! alias of the same name.

use super::SemanticAnalyzer;
use crate::symbol::{MemberFilter, Symbol, SymbolId};
use crate::types::{TypeCategory, TypeId};
use swz_common::diagnostics::diagnostic_codes as codes;
use swz_common::span::Span;
use tracing::debug;

impl SemanticAnalyzer<'_> {
    pub(crate) fn check_conformances(&mut self) {
        let queue = std::mem::take(&mut self.conformance_queue);
        for (ty, protocols) in queue {
            for (protocol, span) in protocols {
                self.check_conformance(ty, protocol, span);
            }
        }
    }

    fn check_conformance(&mut self, ty: TypeId, protocol: TypeId, span: Span) {
        debug!(
            ty = %self.registry.types.get(ty).name,
            protocol = %self.registry.types.get(protocol).name,
            "checking conformance"
        );

        // Method and property requirements.
        let members: Vec<(String, SymbolId)> = self
            .registry
            .types
            .get(protocol)
            .members
            .iter()
            .map(|(name, &sym)| (name.clone(), sym))
            .collect();
        for (name, requirement) in members {
            match self.registry.symbols.get(requirement).clone() {
                Symbol::Function { ty: req_ty, .. } => {
                    self.check_function_requirement(ty, protocol, &name, &[req_ty], span);
                }
                Symbol::Overloaded { functions, .. } => {
                    let req_tys: Vec<TypeId> = functions
                        .iter()
                        .filter_map(|&f| self.registry.symbols.value_type(f))
                        .collect();
                    self.check_function_requirement(ty, protocol, &name, &req_tys, span);
                }
                Symbol::Placeholder { .. } => {
                    let filter = MemberFilter::RECURSIVE | MemberFilter::IN_EXTENSION;
                    if self.get_member_from_type(ty, &name, filter).is_none() {
                        let shown_ty = self.registry.types.get(ty).name.clone();
                        let shown_proto = self.registry.types.get(protocol).name.clone();
                        self.error(
                            codes::E_TYPE_DOES_NOT_CONFORM_TO_PROTOCOL_UNIMPLEMENTED_PROPERTY_3,
                            span,
                            vec![shown_ty, shown_proto, name],
                        );
                    }
                }
                Symbol::Type(_) => {}
            }
        }

        // Associated-type requirements: satisfied by a member type or alias
        // with the requirement's name. An alias with a concrete target is a
        // default, not a requirement.
        let placeholder = self.placeholder();
        let required_types: Vec<String> = self
            .registry
            .types
            .get(protocol)
            .associated_types
            .iter()
            .filter(|&(_, &alias)| self.registry.types.resolve_alias(alias) == placeholder)
            .map(|(name, _)| name.clone())
            .collect();
        for name in required_types {
            if !self.has_member_type(ty, &name) {
                let shown_ty = self.registry.types.get(ty).name.clone();
                let shown_proto = self.registry.types.get(protocol).name.clone();
                self.error(
                    codes::E_TYPE_DOES_NOT_CONFORM_TO_PROTOCOL_UNIMPLEMENTED_TYPE_3,
                    span,
                    vec![shown_ty, shown_proto, name],
                );
            }
        }

        // Inherited protocols impose their requirements transitively.
        let inherited = self.registry.types.get(protocol).protocols.clone();
        for parent in inherited {
            self.check_conformance(ty, parent, span);
        }
    }

    fn check_function_requirement(
        &mut self,
        ty: TypeId,
        protocol: TypeId,
        name: &str,
        requirements: &[TypeId],
        span: Span,
    ) {
        for &req in requirements {
            let filter = MemberFilter::RECURSIVE | MemberFilter::IN_EXTENSION;
            let witnesses = self.member_witnesses(ty, name, filter);
            let satisfied = witnesses
                .iter()
                .any(|&w| self.signature_matches(req, w));
            if !satisfied {
                let shown_ty = self.registry.types.get(ty).name.clone();
                let shown_proto = self.registry.types.get(protocol).name.clone();
                self.error(
                    codes::E_TYPE_DOES_NOT_CONFORM_TO_PROTOCOL_UNIMPLEMENTED_FUNCTION_3,
                    span,
                    vec![shown_ty, shown_proto, name.to_string()],
                );
                return;
            }
        }
    }

    /// All function types available under `name` on the conforming type.
    fn member_witnesses(&self, ty: TypeId, name: &str, filter: MemberFilter) -> Vec<TypeId> {
        let Some((sym, _)) = self.get_member_from_type(ty, name, filter) else {
            return Vec::new();
        };
        match self.registry.symbols.get(sym) {
            Symbol::Overloaded { functions, .. } => functions
                .iter()
                .filter_map(|&f| self.registry.symbols.value_type(f))
                .collect(),
            _ => self
                .registry
                .symbols
                .value_type(sym)
                .into_iter()
                .collect(),
        }
    }

    /// A witness satisfies a requirement when parameter and return types
    /// line up; associated types and generic parameters in the requirement
    /// act as wildcards.
    fn signature_matches(&self, requirement: TypeId, witness: TypeId) -> bool {
        let req = self.registry.types.resolve_alias(requirement);
        let wit = self.registry.types.resolve_alias(witness);
        let (Some(req_fn), Some(wit_fn)) = (
            self.registry.types.get(req).function.clone(),
            self.registry.types.get(wit).function.clone(),
        ) else {
            return false;
        };
        if req_fn.parameters.len() != wit_fn.parameters.len() {
            return false;
        }
        for (rp, wp) in req_fn.parameters.iter().zip(&wit_fn.parameters) {
            if !self.requirement_type_matches(rp.ty, wp.ty) {
                return false;
            }
        }
        self.requirement_type_matches(req_fn.return_type, wit_fn.return_type)
    }

    fn requirement_type_matches(&self, required: TypeId, provided: TypeId) -> bool {
        let required = self.registry.types.resolve_alias(required);
        let provided = self.registry.types.resolve_alias(provided);
        if required == provided {
            return true;
        }
        let data = self.registry.types.get(required);
        // Associated types and generic parameters are wildcards here; the
        // witness fixes them.
        matches!(
            data.category,
            TypeCategory::GenericParameter | TypeCategory::Placeholder
        )
    }

    /// A member type, alias, or nested nominal with the given name.
    fn has_member_type(&self, ty: TypeId, name: &str) -> bool {
        if self.registry.types.get_associated_type(ty, name).is_some() {
            let resolved = self.registry.types.resolve_alias(ty);
            let base = self
                .registry
                .types
                .specialization_base(resolved)
                .unwrap_or(resolved);
            // The lookup must come from the type itself, not from the
            // protocol being checked.
            if self
                .registry
                .types
                .get(base)
                .associated_types
                .contains_key(name)
            {
                return true;
            }
        }
        false
    }
}
