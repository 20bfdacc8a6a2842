//! The abstract syntax tree.
//!
//! Nodes are immutable after construction. Every node carries a `Span` and a
//! `NodeId`; semantic annotations (inferred types, resolved symbols, implicit
//! conversions) live in side tables keyed by `NodeId`, never in the tree.
//!
//! Node variants group into five closed categories: expressions, statements,
//! patterns, type references, and declarations.

pub mod visitor;
pub use visitor::Visitor;

use std::rc::Rc;
use swz_common::span::Span;

/// Unique identifier for an AST node within one translation unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const DUMMY: NodeId = NodeId(u32::MAX);
}

/// The root of a translation unit.
#[derive(Clone, Debug)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Clone, Debug)]
pub enum Expr {
    IntegerLiteral(IntegerLiteral),
    FloatLiteral(FloatLiteral),
    StringLiteral(StringLiteral),
    StringInterpolation(StringInterpolation),
    BooleanLiteral(BooleanLiteral),
    NilLiteral(NilLiteral),
    ArrayLiteral(ArrayLiteral),
    DictionaryLiteral(DictionaryLiteral),
    TupleExpr(TupleExpr),
    Closure(Closure),
    Identifier(Identifier),
    MemberAccess(MemberAccess),
    Subscript(SubscriptAccess),
    FunctionCall(FunctionCall),
    Unary(UnaryOperator),
    Binary(BinaryOperator),
    Conditional(ConditionalOperator),
    Assignment(Assignment),
    TypeCheck(TypeCheck),
    TypeCast(TypeCast),
    Parenthesized(Parenthesized),
    SelfExpr(SelfExpr),
    DynamicType(DynamicTypeExpr),
    ForcedUnwrap(ForcedUnwrap),
    OptionalChaining(OptionalChaining),
    InOut(InOutExpr),
    /// Placeholder produced by error recovery.
    Error(ErrorExpr),
}

impl Expr {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Expr::IntegerLiteral(n) => n.span,
            Expr::FloatLiteral(n) => n.span,
            Expr::StringLiteral(n) => n.span,
            Expr::StringInterpolation(n) => n.span,
            Expr::BooleanLiteral(n) => n.span,
            Expr::NilLiteral(n) => n.span,
            Expr::ArrayLiteral(n) => n.span,
            Expr::DictionaryLiteral(n) => n.span,
            Expr::TupleExpr(n) => n.span,
            Expr::Closure(n) => n.span,
            Expr::Identifier(n) => n.span,
            Expr::MemberAccess(n) => n.span,
            Expr::Subscript(n) => n.span,
            Expr::FunctionCall(n) => n.span,
            Expr::Unary(n) => n.span,
            Expr::Binary(n) => n.span,
            Expr::Conditional(n) => n.span,
            Expr::Assignment(n) => n.span,
            Expr::TypeCheck(n) => n.span,
            Expr::TypeCast(n) => n.span,
            Expr::Parenthesized(n) => n.span,
            Expr::SelfExpr(n) => n.span,
            Expr::DynamicType(n) => n.span,
            Expr::ForcedUnwrap(n) => n.span,
            Expr::OptionalChaining(n) => n.span,
            Expr::InOut(n) => n.span,
            Expr::Error(n) => n.span,
        }
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Expr::IntegerLiteral(n) => n.id,
            Expr::FloatLiteral(n) => n.id,
            Expr::StringLiteral(n) => n.id,
            Expr::StringInterpolation(n) => n.id,
            Expr::BooleanLiteral(n) => n.id,
            Expr::NilLiteral(n) => n.id,
            Expr::ArrayLiteral(n) => n.id,
            Expr::DictionaryLiteral(n) => n.id,
            Expr::TupleExpr(n) => n.id,
            Expr::Closure(n) => n.id,
            Expr::Identifier(n) => n.id,
            Expr::MemberAccess(n) => n.id,
            Expr::Subscript(n) => n.id,
            Expr::FunctionCall(n) => n.id,
            Expr::Unary(n) => n.id,
            Expr::Binary(n) => n.id,
            Expr::Conditional(n) => n.id,
            Expr::Assignment(n) => n.id,
            Expr::TypeCheck(n) => n.id,
            Expr::TypeCast(n) => n.id,
            Expr::Parenthesized(n) => n.id,
            Expr::SelfExpr(n) => n.id,
            Expr::DynamicType(n) => n.id,
            Expr::ForcedUnwrap(n) => n.id,
            Expr::OptionalChaining(n) => n.id,
            Expr::InOut(n) => n.id,
            Expr::Error(n) => n.id,
        }
    }
}

#[derive(Clone, Debug)]
pub struct IntegerLiteral {
    pub id: NodeId,
    pub span: Span,
    /// Original spelling, kept for diagnostics and printing.
    pub text: String,
    pub base: u32,
    pub value: i64,
}

#[derive(Clone, Debug)]
pub struct FloatLiteral {
    pub id: NodeId,
    pub span: Span,
    pub text: String,
    pub value: f64,
}

#[derive(Clone, Debug)]
pub struct StringLiteral {
    pub id: NodeId,
    pub span: Span,
    /// Processed (unescaped) value.
    pub value: String,
}

/// A string literal with embedded `\(expr)` interpolations. The literal
/// fragments and expressions alternate; `fragments.len() == exprs.len() + 1`.
#[derive(Clone, Debug)]
pub struct StringInterpolation {
    pub id: NodeId,
    pub span: Span,
    pub fragments: Vec<String>,
    pub exprs: Vec<Expr>,
}

#[derive(Clone, Debug)]
pub struct BooleanLiteral {
    pub id: NodeId,
    pub span: Span,
    pub value: bool,
}

#[derive(Clone, Debug)]
pub struct NilLiteral {
    pub id: NodeId,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct ArrayLiteral {
    pub id: NodeId,
    pub span: Span,
    pub elements: Vec<Expr>,
}

#[derive(Clone, Debug)]
pub struct DictionaryLiteral {
    pub id: NodeId,
    pub span: Span,
    pub entries: Vec<(Expr, Expr)>,
}

/// `(a, b)` or `(label: a, b)`; a single unlabeled element parses as
/// `Parenthesized` instead.
#[derive(Clone, Debug)]
pub struct TupleExpr {
    pub id: NodeId,
    pub span: Span,
    pub elements: Vec<(Option<String>, Expr)>,
}

#[derive(Clone, Debug)]
pub struct ClosureParameter {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub ty: Option<TypeRepr>,
}

#[derive(Clone, Debug)]
pub struct Closure {
    pub id: NodeId,
    pub span: Span,
    pub parameters: Vec<ClosureParameter>,
    pub return_type: Option<TypeRepr>,
    pub statements: Vec<Stmt>,
}

#[derive(Clone, Debug)]
pub struct Identifier {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    /// `$n` implicit closure parameter.
    pub implicit_parameter: bool,
    pub generic_args: Vec<TypeRepr>,
}

/// `e.name` or positional `e.0`; `object` is `None` for the leading-dot form
/// (`.Some`) where the base is inferred from context.
#[derive(Clone, Debug)]
pub struct MemberAccess {
    pub id: NodeId,
    pub span: Span,
    pub object: Option<Box<Expr>>,
    pub member: MemberName,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberName {
    Named(String),
    Index(u32),
}

#[derive(Clone, Debug)]
pub struct SubscriptAccess {
    pub id: NodeId,
    pub span: Span,
    pub object: Box<Expr>,
    pub indices: Vec<Expr>,
}

#[derive(Clone, Debug)]
pub struct CallArgument {
    pub label: Option<String>,
    pub value: Expr,
}

#[derive(Clone, Debug)]
pub struct FunctionCall {
    pub id: NodeId,
    pub span: Span,
    pub callee: Box<Expr>,
    pub arguments: Vec<CallArgument>,
    /// Trailing closure, if any.
    pub trailing_closure: Option<Box<Expr>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryFixity {
    Prefix,
    Postfix,
}

#[derive(Clone, Debug)]
pub struct UnaryOperator {
    pub id: NodeId,
    pub span: Span,
    pub operator: String,
    pub fixity: UnaryFixity,
    pub operand: Box<Expr>,
}

#[derive(Clone, Debug)]
pub struct BinaryOperator {
    pub id: NodeId,
    pub span: Span,
    pub operator: String,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
}

/// Ternary `cond ? then : otherwise`.
#[derive(Clone, Debug)]
pub struct ConditionalOperator {
    pub id: NodeId,
    pub span: Span,
    pub condition: Box<Expr>,
    pub then_expr: Box<Expr>,
    pub else_expr: Box<Expr>,
}

#[derive(Clone, Debug)]
pub struct Assignment {
    pub id: NodeId,
    pub span: Span,
    pub target: Box<Expr>,
    pub value: Box<Expr>,
}

/// `e is T`
#[derive(Clone, Debug)]
pub struct TypeCheck {
    pub id: NodeId,
    pub span: Span,
    pub subject: Box<Expr>,
    pub ty: TypeRepr,
}

/// `e as T` / `e as? T`
#[derive(Clone, Debug)]
pub struct TypeCast {
    pub id: NodeId,
    pub span: Span,
    pub subject: Box<Expr>,
    pub optional: bool,
    pub ty: TypeRepr,
}

#[derive(Clone, Debug)]
pub struct Parenthesized {
    pub id: NodeId,
    pub span: Span,
    pub expr: Box<Expr>,
}

#[derive(Clone, Debug)]
pub struct SelfExpr {
    pub id: NodeId,
    pub span: Span,
}

/// `e.dynamicType`
#[derive(Clone, Debug)]
pub struct DynamicTypeExpr {
    pub id: NodeId,
    pub span: Span,
    pub object: Box<Expr>,
}

/// `e!`
#[derive(Clone, Debug)]
pub struct ForcedUnwrap {
    pub id: NodeId,
    pub span: Span,
    pub operand: Box<Expr>,
}

/// `e?`
#[derive(Clone, Debug)]
pub struct OptionalChaining {
    pub id: NodeId,
    pub span: Span,
    pub operand: Box<Expr>,
}

/// `&x` in an argument list.
#[derive(Clone, Debug)]
pub struct InOutExpr {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct ErrorExpr {
    pub id: NodeId,
    pub span: Span,
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Clone, Debug)]
pub enum Stmt {
    Decl(Rc<Decl>),
    Expr(Expr),
    If(IfStmt),
    While(WhileStmt),
    RepeatWhile(RepeatWhileStmt),
    For(ForStmt),
    ForIn(ForInStmt),
    Switch(SwitchStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Fallthrough(FallthroughStmt),
    Return(ReturnStmt),
    Labeled(LabeledStmt),
}

impl Stmt {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Stmt::Decl(d) => d.span(),
            Stmt::Expr(e) => e.span(),
            Stmt::If(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::RepeatWhile(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::ForIn(s) => s.span,
            Stmt::Switch(s) => s.span,
            Stmt::Break(s) => s.span,
            Stmt::Continue(s) => s.span,
            Stmt::Fallthrough(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::Labeled(s) => s.span,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CodeBlock {
    pub id: NodeId,
    pub span: Span,
    pub statements: Vec<Stmt>,
}

#[derive(Clone, Debug)]
pub struct IfStmt {
    pub id: NodeId,
    pub span: Span,
    pub condition: Expr,
    pub then_block: CodeBlock,
    pub else_branch: Option<Box<ElseBranch>>,
}

#[derive(Clone, Debug)]
pub enum ElseBranch {
    Else(CodeBlock),
    ElseIf(IfStmt),
}

#[derive(Clone, Debug)]
pub struct WhileStmt {
    pub id: NodeId,
    pub span: Span,
    pub condition: Expr,
    pub body: CodeBlock,
}

#[derive(Clone, Debug)]
pub struct RepeatWhileStmt {
    pub id: NodeId,
    pub span: Span,
    pub body: CodeBlock,
    pub condition: Expr,
}

/// C-style `for init; cond; step { … }`.
#[derive(Clone, Debug)]
pub struct ForStmt {
    pub id: NodeId,
    pub span: Span,
    pub init: Option<Box<Stmt>>,
    pub condition: Option<Expr>,
    pub step: Option<Expr>,
    pub body: CodeBlock,
}

#[derive(Clone, Debug)]
pub struct ForInStmt {
    pub id: NodeId,
    pub span: Span,
    pub pattern: Pattern,
    pub sequence: Expr,
    pub body: CodeBlock,
}

#[derive(Clone, Debug)]
pub struct SwitchCaseItem {
    pub pattern: Pattern,
    pub guard: Option<Expr>,
}

#[derive(Clone, Debug)]
pub struct SwitchCase {
    pub id: NodeId,
    pub span: Span,
    /// Empty for `default`.
    pub items: Vec<SwitchCaseItem>,
    pub is_default: bool,
    pub statements: Vec<Stmt>,
}

#[derive(Clone, Debug)]
pub struct SwitchStmt {
    pub id: NodeId,
    pub span: Span,
    pub subject: Expr,
    pub cases: Vec<SwitchCase>,
}

#[derive(Clone, Debug)]
pub struct BreakStmt {
    pub id: NodeId,
    pub span: Span,
    pub label: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ContinueStmt {
    pub id: NodeId,
    pub span: Span,
    pub label: Option<String>,
}

#[derive(Clone, Debug)]
pub struct FallthroughStmt {
    pub id: NodeId,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct ReturnStmt {
    pub id: NodeId,
    pub span: Span,
    pub value: Option<Expr>,
}

#[derive(Clone, Debug)]
pub struct LabeledStmt {
    pub id: NodeId,
    pub span: Span,
    pub label: String,
    pub statement: Box<Stmt>,
}

// =============================================================================
// Patterns
// =============================================================================

#[derive(Clone, Debug)]
pub enum Pattern {
    Identifier(IdentifierPattern),
    Wildcard(WildcardPattern),
    Typed(TypedPattern),
    Tuple(TuplePattern),
    ValueBinding(ValueBindingPattern),
    EnumCase(EnumCasePattern),
    Expr(ExprPattern),
}

impl Pattern {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Pattern::Identifier(p) => p.span,
            Pattern::Wildcard(p) => p.span,
            Pattern::Typed(p) => p.span,
            Pattern::Tuple(p) => p.span,
            Pattern::ValueBinding(p) => p.span,
            Pattern::EnumCase(p) => p.span,
            Pattern::Expr(p) => p.span,
        }
    }
}

#[derive(Clone, Debug)]
pub struct IdentifierPattern {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct WildcardPattern {
    pub id: NodeId,
    pub span: Span,
}

/// `p : T`
#[derive(Clone, Debug)]
pub struct TypedPattern {
    pub id: NodeId,
    pub span: Span,
    pub pattern: Box<Pattern>,
    pub ty: TypeRepr,
}

#[derive(Clone, Debug)]
pub struct TuplePattern {
    pub id: NodeId,
    pub span: Span,
    pub elements: Vec<Pattern>,
}

/// `let p` / `var p` inside a larger pattern.
#[derive(Clone, Debug)]
pub struct ValueBindingPattern {
    pub id: NodeId,
    pub span: Span,
    pub constant: bool,
    pub pattern: Box<Pattern>,
}

/// `.CaseName` or `.CaseName(binding)`
#[derive(Clone, Debug)]
pub struct EnumCasePattern {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub associated: Option<Box<Pattern>>,
}

#[derive(Clone, Debug)]
pub struct ExprPattern {
    pub id: NodeId,
    pub span: Span,
    pub expr: Expr,
}

// =============================================================================
// Type references
// =============================================================================

#[derive(Clone, Debug)]
pub enum TypeRepr {
    Named(NamedTypeRepr),
    Tuple(TupleTypeRepr),
    Array(ArrayTypeRepr),
    Dictionary(DictionaryTypeRepr),
    Function(FunctionTypeRepr),
    Optional(OptionalTypeRepr),
    ImplicitlyUnwrappedOptional(OptionalTypeRepr),
    ProtocolComposition(ProtocolCompositionRepr),
    Error(ErrorTypeRepr),
}

impl TypeRepr {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            TypeRepr::Named(t) => t.span,
            TypeRepr::Tuple(t) => t.span,
            TypeRepr::Array(t) => t.span,
            TypeRepr::Dictionary(t) => t.span,
            TypeRepr::Function(t) => t.span,
            TypeRepr::Optional(t) | TypeRepr::ImplicitlyUnwrappedOptional(t) => t.span,
            TypeRepr::ProtocolComposition(t) => t.span,
            TypeRepr::Error(t) => t.span,
        }
    }
}

/// `Name`, `Name<Args>`, or `Outer.Inner`. Generic arguments are preserved
/// even when empty.
#[derive(Clone, Debug)]
pub struct NamedTypeRepr {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub generic_args: Vec<TypeRepr>,
    pub nested: Option<Box<NamedTypeRepr>>,
}

#[derive(Clone, Debug)]
pub struct TupleTypeRepr {
    pub id: NodeId,
    pub span: Span,
    pub elements: Vec<(Option<String>, TypeRepr)>,
}

/// `T[]` or `[T]`
#[derive(Clone, Debug)]
pub struct ArrayTypeRepr {
    pub id: NodeId,
    pub span: Span,
    pub element: Box<TypeRepr>,
}

/// `[Key : Value]`
#[derive(Clone, Debug)]
pub struct DictionaryTypeRepr {
    pub id: NodeId,
    pub span: Span,
    pub key: Box<TypeRepr>,
    pub value: Box<TypeRepr>,
}

#[derive(Clone, Debug)]
pub struct FunctionTypeParam {
    pub name: Option<String>,
    pub inout: bool,
    pub ty: TypeRepr,
}

/// `(Params) -> Return`
#[derive(Clone, Debug)]
pub struct FunctionTypeRepr {
    pub id: NodeId,
    pub span: Span,
    pub parameters: Vec<FunctionTypeParam>,
    pub return_type: Box<TypeRepr>,
}

/// `T?` / `T!`
#[derive(Clone, Debug)]
pub struct OptionalTypeRepr {
    pub id: NodeId,
    pub span: Span,
    pub inner: Box<TypeRepr>,
}

/// `protocol<A, B>`
#[derive(Clone, Debug)]
pub struct ProtocolCompositionRepr {
    pub id: NodeId,
    pub span: Span,
    pub protocols: Vec<NamedTypeRepr>,
}

#[derive(Clone, Debug)]
pub struct ErrorTypeRepr {
    pub id: NodeId,
    pub span: Span,
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Clone, Debug)]
pub enum Decl {
    Import(ImportDecl),
    Bindings(BindingsDecl),
    ComputedProperty(ComputedPropertyDecl),
    TypeAlias(TypeAliasDecl),
    Function(FunctionDecl),
    Enum(EnumDecl),
    Struct(StructDecl),
    Class(ClassDecl),
    Protocol(ProtocolDecl),
    Extension(ExtensionDecl),
    Init(InitDecl),
    Deinit(DeinitDecl),
    Subscript(SubscriptDecl),
    Operator(OperatorDecl),
}

impl Decl {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Decl::Import(d) => d.span,
            Decl::Bindings(d) => d.span,
            Decl::ComputedProperty(d) => d.span,
            Decl::TypeAlias(d) => d.span,
            Decl::Function(d) => d.span,
            Decl::Enum(d) => d.span,
            Decl::Struct(d) => d.span,
            Decl::Class(d) => d.span,
            Decl::Protocol(d) => d.span,
            Decl::Extension(d) => d.span,
            Decl::Init(d) => d.span,
            Decl::Deinit(d) => d.span,
            Decl::Subscript(d) => d.span,
            Decl::Operator(d) => d.span,
        }
    }

    /// The name this declaration introduces, where it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Decl::TypeAlias(d) => Some(&d.name),
            Decl::Function(d) => Some(&d.name),
            Decl::Enum(d) => Some(&d.info.name),
            Decl::Struct(d) => Some(&d.info.name),
            Decl::Class(d) => Some(&d.info.name),
            Decl::Protocol(d) => Some(&d.info.name),
            Decl::ComputedProperty(d) => Some(&d.name),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportKind {
    Default,
    Typealias,
    Struct,
    Class,
    Enum,
    Protocol,
    Var,
    Func,
}

#[derive(Clone, Debug)]
pub struct ImportDecl {
    pub id: NodeId,
    pub span: Span,
    pub kind: ImportKind,
    pub path: String,
}

/// Declaration modifiers. Not all combinations are legal; the analyzer
/// rejects the invalid ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeclModifiers {
    pub is_static: bool,
    pub mutating: bool,
    pub is_override: bool,
    pub is_final: bool,
    pub lazy: bool,
    pub weak: bool,
    pub unowned: bool,
    pub convenience: bool,
    pub required: bool,
    pub prefix: bool,
    pub postfix: bool,
    pub infix: bool,
}

/// One `name [: type] [= initializer]` entry of a `let`/`var` group.
#[derive(Clone, Debug)]
pub struct Binding {
    pub id: NodeId,
    pub span: Span,
    pub pattern: Pattern,
    pub initializer: Option<Expr>,
}

/// A `let`/`var` declaration group.
#[derive(Clone, Debug)]
pub struct BindingsDecl {
    pub id: NodeId,
    pub span: Span,
    pub constant: bool,
    pub modifiers: DeclModifiers,
    pub bindings: Vec<Binding>,
}

/// `var x: T { get { … } set { … } }`
#[derive(Clone, Debug)]
pub struct ComputedPropertyDecl {
    pub id: NodeId,
    pub span: Span,
    pub modifiers: DeclModifiers,
    pub name: String,
    pub ty: TypeRepr,
    pub getter: Option<CodeBlock>,
    pub setter: Option<(Option<String>, CodeBlock)>,
    /// Bare `{ get }` / `{ get set }` requirement form (protocols).
    pub requirement_only: bool,
}

#[derive(Clone, Debug)]
pub struct TypeAliasDecl {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    /// `None` inside protocols: an associated-type requirement.
    pub target: Option<TypeRepr>,
}

#[derive(Clone, Debug)]
pub struct GenericParam {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub constraints: Vec<TypeRepr>,
}

#[derive(Clone, Debug)]
pub struct GenericParams {
    pub id: NodeId,
    pub span: Span,
    pub params: Vec<GenericParam>,
}

#[derive(Clone, Debug)]
pub struct Parameter {
    pub id: NodeId,
    pub span: Span,
    /// External (argument label) name; `None` when unlabeled.
    pub external_name: Option<String>,
    pub local_name: String,
    /// `#name` shorthand making the local name the label as well.
    pub shorthand_external: bool,
    pub inout: bool,
    pub variadic: bool,
    pub ty: TypeRepr,
    pub default_value: Option<Expr>,
}

#[derive(Clone, Debug)]
pub struct FunctionDecl {
    pub id: NodeId,
    pub span: Span,
    pub modifiers: DeclModifiers,
    pub name: String,
    pub generic: Option<GenericParams>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeRepr>,
    /// `None` for protocol requirements.
    pub body: Option<CodeBlock>,
}

/// Shared fields of nominal type declarations.
#[derive(Clone, Debug)]
pub struct TypeDeclInfo {
    pub name: String,
    pub generic: Option<GenericParams>,
    /// Inherited types: superclass and/or adopted protocols, in source order.
    pub inherited: Vec<NamedTypeRepr>,
    pub body: Vec<Rc<Decl>>,
}

#[derive(Clone, Debug)]
pub struct EnumCaseDecl {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub associated: Option<TupleTypeRepr>,
    pub raw_value: Option<Expr>,
}

#[derive(Clone, Debug)]
pub struct EnumDecl {
    pub id: NodeId,
    pub span: Span,
    pub info: TypeDeclInfo,
    pub cases: Vec<EnumCaseDecl>,
}

#[derive(Clone, Debug)]
pub struct StructDecl {
    pub id: NodeId,
    pub span: Span,
    pub info: TypeDeclInfo,
}

#[derive(Clone, Debug)]
pub struct ClassDecl {
    pub id: NodeId,
    pub span: Span,
    pub info: TypeDeclInfo,
}

#[derive(Clone, Debug)]
pub struct ProtocolDecl {
    pub id: NodeId,
    pub span: Span,
    pub info: TypeDeclInfo,
}

#[derive(Clone, Debug)]
pub struct ExtensionDecl {
    pub id: NodeId,
    pub span: Span,
    /// Name of the extended type.
    pub name: String,
    pub protocols: Vec<NamedTypeRepr>,
    pub body: Vec<Rc<Decl>>,
}

#[derive(Clone, Debug)]
pub struct InitDecl {
    pub id: NodeId,
    pub span: Span,
    pub modifiers: DeclModifiers,
    pub parameters: Vec<Parameter>,
    pub body: CodeBlock,
}

#[derive(Clone, Debug)]
pub struct DeinitDecl {
    pub id: NodeId,
    pub span: Span,
    pub body: CodeBlock,
}

#[derive(Clone, Debug)]
pub struct SubscriptDecl {
    pub id: NodeId,
    pub span: Span,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeRepr,
    pub getter: Option<CodeBlock>,
    pub setter: Option<(Option<String>, CodeBlock)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorFixitySpec {
    Infix,
    Prefix,
    Postfix,
}

#[derive(Clone, Debug)]
pub struct OperatorDecl {
    pub id: NodeId,
    pub span: Span,
    pub fixity: OperatorFixitySpec,
    pub name: String,
    pub associativity: crate::operators::Associativity,
    pub precedence: u32,
}
