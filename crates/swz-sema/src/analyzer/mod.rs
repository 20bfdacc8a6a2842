//! The semantic analyzer.
//!
//! A multi-pass traversal of the AST: declaration/symbol resolution with a
//! lazy-declaration table for forward references, bottom-up type inference
//! with contextual types threaded top-down, and a final protocol-conformance
//! sweep. Annotations land in `NodeId`-keyed side tables; the tree itself is
//! never mutated.

mod conformance;
mod decl;
mod infer;
mod init_flow;
mod stmt;

pub use init_flow::TracerKind;

use crate::registry::SymbolRegistry;
use crate::scope::ScopeId;
use crate::symbol::{MemberFilter, Symbol, SymbolFlags, SymbolId};
use crate::types::{TypeCategory, TypeId};
use init_flow::InitFrame;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use std::rc::Rc;
use swz_common::diagnostics::{Diagnostic, diagnostic_codes as codes};
use swz_common::limits::MAX_NESTING_DEPTH;
use swz_common::span::Span;
use swz_parser::ast::{Decl, NodeId, Program};
use tracing::debug;

/// Implicit conversions recorded during inference instead of rewriting the
/// tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImplicitConversion {
    /// Wrap the expression `n` times as `Optional.Some(…)`.
    OptionalWrap(u32),
    /// A bare member reference reads through `self`.
    ImplicitSelf,
}

/// One leaf binding produced by destructuring a tuple pattern.
#[derive(Clone, Debug)]
pub struct TupleExtraction {
    pub name: String,
    /// Compiler-introduced temporary holding the whole tuple value.
    pub temp: String,
    /// Positional member-access chain from the temporary to the leaf.
    pub indices: Vec<usize>,
    pub ty: TypeId,
    pub readonly: bool,
}

/// Side tables written by the analyzer, keyed by `NodeId`.
#[derive(Default)]
pub struct Annotations {
    pub expr_types: FxHashMap<NodeId, TypeId>,
    pub implicit_conversions: FxHashMap<NodeId, ImplicitConversion>,
    pub resolved_symbols: FxHashMap<NodeId, SymbolId>,
    /// Keyed by the `Binding` node that contained the tuple pattern.
    pub tuple_expansions: FxHashMap<NodeId, Vec<TupleExtraction>>,
}

pub struct AnalysisResult {
    pub diagnostics: Vec<Diagnostic>,
    pub annotations: Annotations,
}

/// Information about the function body being analyzed.
#[derive(Clone, Debug)]
pub(crate) struct CurrentFunction {
    pub name: String,
    pub return_type: TypeId,
    pub is_static: bool,
    /// Instance method of the current type.
    pub is_member: bool,
}

#[derive(Default)]
pub(crate) struct Ctx {
    pub current_type: Option<TypeId>,
    pub current_extension: Option<TypeId>,
    pub current_function: Option<CurrentFunction>,
    pub contextual_type: Option<TypeId>,
    pub num_temporaries: u32,
}

pub struct SemanticAnalyzer<'a> {
    pub(crate) registry: &'a mut SymbolRegistry,
    pub(crate) file_name: String,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) annotations: Annotations,
    /// Declarations deferred by name until used or until the program walk
    /// completes.
    pub(crate) lazy_declarations: FxHashMap<String, VecDeque<Rc<Decl>>>,
    /// Names being lazily declared right now; a re-entry is a cycle.
    pub(crate) lazy_visiting: FxHashSet<String>,
    pub(crate) lazy_enabled: bool,
    pub(crate) ctx: Ctx,
    pub(crate) init_frames: Vec<InitFrame>,
    /// Nominal types whose declared conformances are verified after all
    /// declarations are analyzed.
    pub(crate) conformance_queue: Vec<(TypeId, Vec<(TypeId, Span)>)>,
    /// Stored properties per nominal type, with default-value presence, in
    /// declaration order; drives initializer synthesis.
    pub(crate) stored_fields: FxHashMap<TypeId, Vec<(String, TypeId, bool)>>,
    pub(crate) depth: usize,
    depth_exceeded: bool,
}

impl<'a> SemanticAnalyzer<'a> {
    #[must_use]
    pub fn new(registry: &'a mut SymbolRegistry, file_name: &str) -> Self {
        Self {
            registry,
            file_name: file_name.to_string(),
            diagnostics: Vec::new(),
            annotations: Annotations::default(),
            lazy_declarations: FxHashMap::default(),
            lazy_visiting: FxHashSet::default(),
            lazy_enabled: true,
            ctx: Ctx::default(),
            init_frames: Vec::new(),
            conformance_queue: Vec::new(),
            stored_fields: FxHashMap::default(),
            depth: 0,
            depth_exceeded: false,
        }
    }

    /// Analyze a whole translation unit.
    pub fn run(&mut self, program: &Program) {
        self.init_frames.push(InitFrame::new(TracerKind::Sequence));

        // Pass 1 entry: top-level types and functions defer; everything else
        // analyzes in order.
        for stmt in &program.statements {
            if let swz_parser::ast::Stmt::Decl(decl) = stmt {
                if self.should_delay(decl) {
                    self.delay_declare(decl.clone());
                    continue;
                }
            }
            self.visit_stmt(stmt);
        }

        // Drain the remaining lazy declarations in a deterministic order.
        self.lazy_enabled = false;
        loop {
            let mut names: Vec<String> = self.lazy_declarations.keys().cloned().collect();
            if names.is_empty() {
                break;
            }
            names.sort();
            for name in names {
                self.declare_immediately(&name);
            }
        }

        self.check_conformances();
        self.init_frames.pop();
        self.diagnostics.sort_by_key(|d| d.span.start);
    }

    #[must_use]
    pub fn into_result(self) -> AnalysisResult {
        AnalysisResult {
            diagnostics: self.diagnostics,
            annotations: self.annotations,
        }
    }

    // -------------------------------------------------------------------------
    // Lazy declaration table
    // -------------------------------------------------------------------------

    fn should_delay(&self, decl: &Decl) -> bool {
        matches!(
            decl,
            Decl::Function(_)
                | Decl::Struct(_)
                | Decl::Class(_)
                | Decl::Enum(_)
                | Decl::Protocol(_)
                | Decl::TypeAlias(_)
        ) && decl.name().is_some()
    }

    pub(crate) fn delay_declare(&mut self, decl: Rc<Decl>) {
        let Some(name) = decl.name().map(str::to_string) else {
            return;
        };
        debug!(name = %name, "deferring declaration");
        self.lazy_declarations.entry(name).or_default().push_back(decl);
    }

    /// Drain the lazy bucket for `name`, re-entering the file scope. Cycles
    /// are reported instead of recursing forever.
    pub(crate) fn declare_immediately(&mut self, name: &str) {
        if !self.lazy_declarations.contains_key(name) {
            return;
        }
        if self.lazy_visiting.contains(name) {
            self.error(
                codes::E_CIRCULAR_REFERENCE_1,
                Span::dummy(),
                vec![name.to_string()],
            );
            self.lazy_declarations.remove(name);
            return;
        }
        let Some(mut bucket) = self.lazy_declarations.remove(name) else {
            return;
        };
        debug!(name = %name, count = bucket.len(), "declaring immediately");
        self.lazy_visiting.insert(name.to_string());
        let saved_scope = self.registry.current_scope();
        let file = self.registry.file_scope();
        self.registry.set_current_scope(file);
        while let Some(decl) = bucket.pop_front() {
            self.visit_decl(&decl);
        }
        self.registry.set_current_scope(saved_scope);
        self.lazy_visiting.remove(name);
    }

    // -------------------------------------------------------------------------
    // Diagnostics and guards
    // -------------------------------------------------------------------------

    pub(crate) fn error(&mut self, code: u32, span: Span, args: Vec<String>) {
        self.diagnostics
            .push(Diagnostic::error(code, self.file_name.clone(), span, args));
    }

    pub(crate) fn warning(&mut self, code: u32, span: Span, args: Vec<String>) {
        self.diagnostics
            .push(Diagnostic::warning(code, self.file_name.clone(), span, args));
    }

    pub(crate) fn enter_nesting(&mut self, span: Span) -> bool {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            if !self.depth_exceeded {
                self.depth_exceeded = true;
                self.error(codes::E_NESTING_TOO_DEEP, span, vec![]);
            }
            return false;
        }
        true
    }

    pub(crate) fn leave_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Run `f` in a fresh child scope; the previous scope is restored on all
    /// paths.
    pub(crate) fn with_scope<T>(
        &mut self,
        owner: Option<NodeId>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.registry.current_scope();
        self.registry.enter_scope(owner);
        let result = f(self);
        self.registry.set_current_scope(saved);
        result
    }

    pub(crate) fn placeholder(&self) -> TypeId {
        self.registry.types.placeholder()
    }

    // -------------------------------------------------------------------------
    // Lookups that drive lazy declaration
    // -------------------------------------------------------------------------

    pub(crate) fn lookup_symbol_lazily(&mut self, name: &str) -> Option<(SymbolId, ScopeId)> {
        if let Some(found) = self.registry.lookup_symbol(name) {
            return Some(found);
        }
        self.declare_immediately(name);
        self.registry.lookup_symbol(name)
    }

    pub(crate) fn lookup_type_lazily(&mut self, name: &str) -> Option<TypeId> {
        if let Some(found) = self.registry.lookup_type(name) {
            return Some(found);
        }
        self.declare_immediately(name);
        self.registry.lookup_type(name)
    }

    // -------------------------------------------------------------------------
    // Member lookup
    // -------------------------------------------------------------------------

    /// Find a member on a type: declared members first, then extensions
    /// registered in the file scope, then the class parent chain.
    pub(crate) fn get_member_from_type(
        &self,
        ty: TypeId,
        name: &str,
        filter: MemberFilter,
    ) -> Option<(SymbolId, TypeId)> {
        let resolved = self.registry.types.resolve_alias(ty);
        let subject = self
            .registry
            .types
            .specialization_base(resolved)
            .unwrap_or(resolved);

        let direct = if filter.contains(MemberFilter::STATIC) {
            self.registry.types.get_declared_static_member(subject, name)
        } else {
            self.registry.types.get_declared_member(subject, name)
        };
        if let Some(sym) = direct {
            return Some((sym, ty));
        }

        if filter.contains(MemberFilter::IN_EXTENSION) {
            let type_name = self.registry.types.get(subject).name.clone();
            for &ext in self.registry.get_extensions(&type_name) {
                let found = if filter.contains(MemberFilter::STATIC) {
                    self.registry.types.get_declared_static_member(ext, name)
                } else {
                    self.registry.types.get_declared_member(ext, name)
                };
                if let Some(sym) = found {
                    return Some((sym, ty));
                }
            }
        }

        if filter.contains(MemberFilter::RECURSIVE) {
            if let Some(parent) = self.registry.types.get(subject).parent {
                return self.get_member_from_type(parent, name, filter);
            }
        }
        None
    }

    /// All function symbols reachable under `name`, walking every scope when
    /// `all_scopes` is set. The flag mask filters by fixity.
    pub(crate) fn all_functions(
        &mut self,
        name: &str,
        mask: SymbolFlags,
        all_scopes: bool,
    ) -> Vec<SymbolId> {
        self.declare_immediately(name);
        let mut result = Vec::new();
        let mut scope = Some(self.registry.current_scope());
        while let Some(id) = scope {
            if let Some(&sym) = self.registry.scopes.get(id).values.get(name) {
                match self.registry.symbols.get(sym) {
                    Symbol::Overloaded { functions, .. } => {
                        for &f in functions {
                            if self.registry.symbols.flags(f).contains(mask) {
                                result.push(f);
                            }
                        }
                    }
                    Symbol::Function { .. } => {
                        if self.registry.symbols.flags(sym).contains(mask) {
                            result.push(sym);
                        }
                    }
                    Symbol::Placeholder { ty, .. } => {
                        let ty = *ty;
                        if self.registry.types.get(ty).category == TypeCategory::Function {
                            result.push(sym);
                        }
                    }
                    Symbol::Type(_) => {
                        result.push(sym);
                    }
                }
                if !all_scopes {
                    break;
                }
            }
            scope = self.registry.scopes.get(id).parent;
        }
        result
    }

    pub(crate) fn fresh_temp_name(&mut self) -> String {
        let name = format!("#{}", self.ctx.num_temporaries);
        self.ctx.num_temporaries += 1;
        name
    }
}

/// Analyze a translation unit against a bootstrapped registry.
#[must_use]
pub fn analyze(program: &Program, registry: &mut SymbolRegistry) -> Vec<Diagnostic> {
    let mut analyzer = SemanticAnalyzer::new(registry, "<unit>");
    analyzer.run(program);
    analyzer.into_result().diagnostics
}
