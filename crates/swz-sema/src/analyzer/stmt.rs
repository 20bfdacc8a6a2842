//! Statement analysis: control flow, branch-sensitive initialization
//! tracking, and the dispatch into declarations and expressions.

use super::SemanticAnalyzer;
use swz_parser::ast::*;

impl SemanticAnalyzer<'_> {
    pub(crate) fn visit_stmt(&mut self, stmt: &Stmt) {
        if !self.enter_nesting(stmt.span()) {
            self.leave_nesting();
            return;
        }
        match stmt {
            Stmt::Decl(d) => self.visit_decl(d),
            Stmt::Expr(e) => {
                self.transform_expression(None, e);
            }
            Stmt::If(s) => self.visit_if(s),
            Stmt::While(s) => {
                self.transform_expression(None, &s.condition);
                // The body may never run; nothing it initializes survives.
                let initialized = self.run_branch(|a| {
                    a.with_scope(Some(s.id), |a| {
                        for st in &s.body.statements {
                            a.visit_stmt(st);
                        }
                    });
                });
                self.join_branches(vec![initialized], false);
            }
            Stmt::RepeatWhile(s) => {
                // The body runs at least once.
                self.with_scope(Some(s.id), |a| {
                    for st in &s.body.statements {
                        a.visit_stmt(st);
                    }
                });
                self.transform_expression(None, &s.condition);
            }
            Stmt::For(s) => {
                self.with_scope(Some(s.id), |a| {
                    if let Some(init) = &s.init {
                        a.visit_stmt(init);
                    }
                    if let Some(cond) = &s.condition {
                        a.transform_expression(None, cond);
                    }
                    if let Some(step) = &s.step {
                        a.transform_expression(None, step);
                    }
                    let initialized = a.run_branch(|a| {
                        for st in &s.body.statements {
                            a.visit_stmt(st);
                        }
                    });
                    a.join_branches(vec![initialized], false);
                });
            }
            Stmt::ForIn(s) => {
                let seq_ty = self.transform_expression(None, &s.sequence);
                // Element type of Array<T>; other sequences keep a
                // placeholder element.
                let element = if self.registry.types.specialization_base(seq_ty)
                    == Some(self.registry.builtins.array)
                {
                    self.registry
                        .types
                        .get(seq_ty)
                        .generic_args
                        .first()
                        .copied()
                        .unwrap_or_else(|| self.placeholder())
                } else {
                    self.placeholder()
                };
                self.with_scope(Some(s.id), |a| {
                    a.bind_pattern_symbols(&s.pattern, element, true);
                    for st in &s.body.statements {
                        a.visit_stmt(st);
                    }
                });
            }
            Stmt::Switch(s) => self.visit_switch(s),
            Stmt::Break(_) | Stmt::Continue(_) | Stmt::Fallthrough(_) => {}
            Stmt::Return(s) => {
                let expected = self.ctx.current_function.as_ref().map(|f| f.return_type);
                if let Some(value) = &s.value {
                    let ty = self.transform_expression(expected, value);
                    if let Some(expected) = expected {
                        if !self.registry.types.can_assign_to(ty, expected) {
                            let from = self.registry.types.display(ty);
                            let to = self.registry.types.display(expected);
                            self.error(
                                swz_common::diagnostics::diagnostic_codes::E_CANNOT_CONVERT_EXPRESSION_TYPE_2,
                                value.span(),
                                vec![from, to],
                            );
                        }
                    }
                }
            }
            Stmt::Labeled(s) => self.visit_stmt(&s.statement),
        }
        self.leave_nesting();
    }

    fn visit_if(&mut self, s: &IfStmt) {
        self.transform_expression(None, &s.condition);
        let mut branches = Vec::new();
        branches.push(self.run_branch(|a| {
            a.with_scope(Some(s.id), |a| {
                for st in &s.then_block.statements {
                    a.visit_stmt(st);
                }
            });
        }));
        let mut exhaustive = false;
        if let Some(else_branch) = &s.else_branch {
            exhaustive = true;
            match else_branch.as_ref() {
                ElseBranch::Else(block) => {
                    branches.push(self.run_branch(|a| {
                        a.with_scope(Some(block.id), |a| {
                            for st in &block.statements {
                                a.visit_stmt(st);
                            }
                        });
                    }));
                }
                ElseBranch::ElseIf(nested) => {
                    // A nested else-if is itself non-exhaustive unless it has
                    // an else; treat conservatively as one branch.
                    branches.push(self.run_branch(|a| a.visit_if(nested)));
                    exhaustive = false;
                }
            }
        }
        self.join_branches(branches, exhaustive);
    }

    fn visit_switch(&mut self, s: &SwitchStmt) {
        let subject_ty = self.transform_expression(None, &s.subject);
        let mut branches = Vec::new();
        let mut has_default = false;
        for case in &s.cases {
            has_default |= case.is_default;
            branches.push(self.run_branch(|a| {
                a.with_scope(Some(case.id), |a| {
                    for item in &case.items {
                        a.bind_pattern_symbols(&item.pattern, subject_ty, true);
                        if let Some(guard) = &item.guard {
                            a.transform_expression(None, guard);
                        }
                    }
                    for st in &case.statements {
                        a.visit_stmt(st);
                    }
                });
            }));
        }
        self.join_branches(branches, has_default);
    }

    /// Introduce symbols for the bindable names of a pattern, as `for-in`
    /// and `switch` cases do. Enum-case payload bindings take the payload
    /// element type when it is known.
    pub(crate) fn bind_pattern_symbols(&mut self, pattern: &Pattern, ty: crate::types::TypeId, initialized: bool) {
        use crate::symbol::{PlaceholderRole, Symbol, SymbolFlags};
        match pattern {
            Pattern::Identifier(p) => {
                let mut flags = SymbolFlags::READABLE;
                if initialized {
                    flags |= SymbolFlags::INITIALIZED;
                }
                self.registry.add_symbol(
                    p.name.clone(),
                    Symbol::Placeholder {
                        name: p.name.clone(),
                        ty,
                        role: PlaceholderRole::Constant,
                        flags,
                    },
                );
            }
            Pattern::Wildcard(_) => {}
            Pattern::Typed(p) => {
                let declared = self.lookup_type_repr(&p.ty, false);
                self.bind_pattern_symbols(&p.pattern, declared, initialized);
            }
            Pattern::Tuple(p) => {
                let resolved = self.registry.types.resolve_alias(ty);
                let elements = self.registry.types.get(resolved).element_types.clone();
                for (i, element) in p.elements.iter().enumerate() {
                    let element_ty = elements
                        .get(i)
                        .copied()
                        .unwrap_or_else(|| self.placeholder());
                    self.bind_pattern_symbols(element, element_ty, initialized);
                }
            }
            Pattern::ValueBinding(p) => {
                self.bind_pattern_symbols(&p.pattern, ty, initialized);
            }
            Pattern::EnumCase(p) => {
                if let Some(associated) = &p.associated {
                    let payload = self.enum_case_payload(ty, &p.name);
                    let payload_ty = payload.unwrap_or_else(|| self.placeholder());
                    // A single-element payload binds the element directly.
                    let resolved = self.registry.types.resolve_alias(payload_ty);
                    let data = self.registry.types.get(resolved);
                    let bind_ty = if data.element_types.len() == 1 {
                        data.element_types[0]
                    } else {
                        payload_ty
                    };
                    self.bind_pattern_symbols(associated, bind_ty, initialized);
                }
            }
            Pattern::Expr(p) => {
                self.transform_expression(Some(ty), &p.expr);
            }
        }
    }

    /// The payload tuple type of an enum case on `ty`, with specialization
    /// arguments substituted.
    pub(crate) fn enum_case_payload(
        &mut self,
        ty: crate::types::TypeId,
        case: &str,
    ) -> Option<crate::types::TypeId> {
        let resolved = self.registry.types.resolve_alias(ty);
        let base = self
            .registry
            .types
            .specialization_base(resolved)
            .unwrap_or(resolved);
        let payload = self.registry.types.get(base).enum_cases.get(case).copied()??;
        Some(self.substitute_generics(payload, base, resolved))
    }
}
