//! AST-to-source serialization.
//!
//! Prints a canonical form whose re-parse is structurally identical to the
//! original tree; printing is idempotent over parse/print cycles. Used by the
//! round-trip tests and the CLI's `--dump` flag.

use crate::ast::*;
use std::fmt::Write;

#[must_use]
pub fn print_program(program: &Program) -> String {
    let mut p = Printer::default();
    for stmt in &program.statements {
        p.stmt(stmt);
    }
    p.out
}

#[must_use]
pub fn print_expr(expr: &Expr) -> String {
    let mut p = Printer::default();
    p.expr(expr);
    p.out
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn line_start(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
    }

    fn write(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn stmt(&mut self, stmt: &Stmt) {
        self.line_start();
        self.stmt_inline(stmt);
        self.out.push('\n');
    }

    fn stmt_inline(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Decl(d) => self.decl(d),
            Stmt::Expr(e) => self.expr(e),
            Stmt::If(s) => self.if_stmt(s),
            Stmt::While(s) => {
                self.write("while ");
                self.expr(&s.condition);
                self.write(" ");
                self.block(&s.body);
            }
            Stmt::RepeatWhile(s) => {
                self.write("repeat ");
                self.block(&s.body);
                self.write(" while ");
                self.expr(&s.condition);
            }
            Stmt::For(s) => {
                self.write("for ");
                if let Some(init) = &s.init {
                    self.stmt_inline(init);
                }
                self.write("; ");
                if let Some(c) = &s.condition {
                    self.expr(c);
                }
                self.write("; ");
                if let Some(st) = &s.step {
                    self.expr(st);
                }
                self.write(" ");
                self.block(&s.body);
            }
            Stmt::ForIn(s) => {
                self.write("for ");
                self.pattern(&s.pattern);
                self.write(" in ");
                self.expr(&s.sequence);
                self.write(" ");
                self.block(&s.body);
            }
            Stmt::Switch(s) => self.switch_stmt(s),
            Stmt::Break(s) => {
                self.write("break");
                if let Some(l) = &s.label {
                    self.write(" ");
                    self.write(l);
                }
            }
            Stmt::Continue(s) => {
                self.write("continue");
                if let Some(l) = &s.label {
                    self.write(" ");
                    self.write(l);
                }
            }
            Stmt::Fallthrough(_) => self.write("fallthrough"),
            Stmt::Return(s) => {
                self.write("return");
                if let Some(v) = &s.value {
                    self.write(" ");
                    self.expr(v);
                }
            }
            Stmt::Labeled(s) => {
                self.write(&s.label);
                self.write(": ");
                self.stmt_inline(&s.statement);
            }
        }
    }

    fn if_stmt(&mut self, s: &IfStmt) {
        self.write("if ");
        self.expr(&s.condition);
        self.write(" ");
        self.block(&s.then_block);
        if let Some(e) = &s.else_branch {
            self.write(" else ");
            match e.as_ref() {
                ElseBranch::Else(b) => self.block(b),
                ElseBranch::ElseIf(i) => self.if_stmt(i),
            }
        }
    }

    fn switch_stmt(&mut self, s: &SwitchStmt) {
        self.write("switch ");
        self.expr(&s.subject);
        self.write(" {\n");
        for case in &s.cases {
            self.line_start();
            if case.is_default {
                self.write("default:\n");
            } else {
                self.write("case ");
                for (i, item) in case.items.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.pattern(&item.pattern);
                    if let Some(g) = &item.guard {
                        self.write(" where ");
                        self.expr(g);
                    }
                }
                self.write(":\n");
            }
            self.indent += 1;
            for st in &case.statements {
                self.stmt(st);
            }
            self.indent -= 1;
        }
        self.line_start();
        self.write("}");
    }

    fn block(&mut self, block: &CodeBlock) {
        self.write("{\n");
        self.indent += 1;
        for stmt in &block.statements {
            self.stmt(stmt);
        }
        self.indent -= 1;
        self.line_start();
        self.write("}");
    }

    // -------------------------------------------------------------------------
    // Expressions
    // -------------------------------------------------------------------------

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::IntegerLiteral(n) => self.write(&n.text),
            Expr::FloatLiteral(n) => self.write(&n.text),
            Expr::StringLiteral(n) => {
                let escaped = escape_string(&n.value);
                self.write(&format!("\"{escaped}\""));
            }
            Expr::StringInterpolation(n) => {
                self.write("\"");
                for (i, frag) in n.fragments.iter().enumerate() {
                    self.write(&escape_string(frag));
                    if i < n.exprs.len() {
                        self.write("\\(");
                        self.expr(&n.exprs[i]);
                        self.write(")");
                    }
                }
                self.write("\"");
            }
            Expr::BooleanLiteral(n) => self.write(if n.value { "true" } else { "false" }),
            Expr::NilLiteral(_) => self.write("nil"),
            Expr::ArrayLiteral(n) => {
                self.write("[");
                for (i, e) in n.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.expr(e);
                }
                self.write("]");
            }
            Expr::DictionaryLiteral(n) => {
                if n.entries.is_empty() {
                    self.write("[:]");
                } else {
                    self.write("[");
                    for (i, (k, v)) in n.entries.iter().enumerate() {
                        if i > 0 {
                            self.write(", ");
                        }
                        self.expr(k);
                        self.write(" : ");
                        self.expr(v);
                    }
                    self.write("]");
                }
            }
            Expr::TupleExpr(n) => {
                self.write("(");
                for (i, (label, e)) in n.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(l) = label {
                        self.write(l);
                        self.write(": ");
                    }
                    self.expr(e);
                }
                self.write(")");
            }
            Expr::Closure(n) => {
                self.write("{ ");
                if !n.parameters.is_empty() {
                    self.write("(");
                    for (i, p) in n.parameters.iter().enumerate() {
                        if i > 0 {
                            self.write(", ");
                        }
                        self.write(&p.name);
                        if let Some(t) = &p.ty {
                            self.write(" : ");
                            self.type_repr(t);
                        }
                    }
                    self.write(")");
                    if let Some(r) = &n.return_type {
                        self.write(" -> ");
                        self.type_repr(r);
                    }
                    self.write(" in");
                }
                self.write("\n");
                self.indent += 1;
                for stmt in &n.statements {
                    self.stmt(stmt);
                }
                self.indent -= 1;
                self.line_start();
                self.write("}");
            }
            Expr::Identifier(n) => {
                self.write(&n.name);
                if !n.generic_args.is_empty() {
                    self.write("<");
                    for (i, t) in n.generic_args.iter().enumerate() {
                        if i > 0 {
                            self.write(", ");
                        }
                        self.type_repr(t);
                    }
                    self.write(">");
                }
            }
            Expr::MemberAccess(n) => {
                if let Some(obj) = &n.object {
                    self.expr(obj);
                }
                self.write(".");
                match &n.member {
                    MemberName::Named(name) => self.write(name),
                    MemberName::Index(i) => self.write(&i.to_string()),
                }
            }
            Expr::Subscript(n) => {
                self.expr(&n.object);
                self.write("[");
                for (i, e) in n.indices.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.expr(e);
                }
                self.write("]");
            }
            Expr::FunctionCall(n) => {
                self.expr(&n.callee);
                self.write("(");
                for (i, arg) in n.arguments.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(l) = &arg.label {
                        self.write(l);
                        self.write(": ");
                    }
                    self.expr(&arg.value);
                }
                self.write(")");
                if let Some(c) = &n.trailing_closure {
                    self.write(" ");
                    self.expr(c);
                }
            }
            Expr::Unary(n) => match n.fixity {
                UnaryFixity::Prefix => {
                    self.write(&n.operator);
                    self.expr(&n.operand);
                }
                UnaryFixity::Postfix => {
                    self.expr(&n.operand);
                    self.write(&n.operator);
                }
            },
            Expr::Binary(n) => {
                self.expr(&n.lhs);
                self.write(" ");
                self.write(&n.operator);
                self.write(" ");
                self.expr(&n.rhs);
            }
            Expr::Conditional(n) => {
                self.expr(&n.condition);
                self.write(" ? ");
                self.expr(&n.then_expr);
                self.write(" : ");
                self.expr(&n.else_expr);
            }
            Expr::Assignment(n) => {
                self.expr(&n.target);
                self.write(" = ");
                self.expr(&n.value);
            }
            Expr::TypeCheck(n) => {
                self.expr(&n.subject);
                self.write(" is ");
                self.type_repr(&n.ty);
            }
            Expr::TypeCast(n) => {
                self.expr(&n.subject);
                self.write(if n.optional { " as? " } else { " as " });
                self.type_repr(&n.ty);
            }
            Expr::Parenthesized(n) => {
                self.write("(");
                self.expr(&n.expr);
                self.write(")");
            }
            Expr::SelfExpr(_) => self.write("self"),
            Expr::DynamicType(n) => {
                self.expr(&n.object);
                self.write(".dynamicType");
            }
            Expr::ForcedUnwrap(n) => {
                self.expr(&n.operand);
                self.write("!");
            }
            Expr::OptionalChaining(n) => {
                self.expr(&n.operand);
                self.write("?");
            }
            Expr::InOut(n) => {
                self.write("&");
                self.write(&n.name);
            }
            Expr::Error(_) => self.write("<error>"),
        }
    }

    // -------------------------------------------------------------------------
    // Patterns and types
    // -------------------------------------------------------------------------

    fn pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Identifier(p) => self.write(&p.name),
            Pattern::Wildcard(_) => self.write("_"),
            Pattern::Typed(p) => {
                self.pattern(&p.pattern);
                self.write(" : ");
                self.type_repr(&p.ty);
            }
            Pattern::Tuple(p) => {
                self.write("(");
                for (i, e) in p.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.pattern(e);
                }
                self.write(")");
            }
            Pattern::ValueBinding(p) => {
                self.write(if p.constant { "let " } else { "var " });
                self.pattern(&p.pattern);
            }
            Pattern::EnumCase(p) => {
                self.write(".");
                self.write(&p.name);
                if let Some(a) = &p.associated {
                    self.pattern(a);
                }
            }
            Pattern::Expr(p) => self.expr(&p.expr),
        }
    }

    fn named_type(&mut self, t: &NamedTypeRepr) {
        self.write(&t.name.clone());
        if !t.generic_args.is_empty() {
            self.write("<");
            for (i, a) in t.generic_args.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                self.type_repr(a);
            }
            self.write(">");
        }
        if let Some(n) = &t.nested {
            self.write(".");
            self.named_type(n);
        }
    }

    fn type_repr(&mut self, ty: &TypeRepr) {
        match ty {
            TypeRepr::Named(t) => self.named_type(t),
            TypeRepr::Tuple(t) => {
                self.write("(");
                for (i, (name, e)) in t.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(n) = name {
                        self.write(n);
                        self.write(" : ");
                    }
                    self.type_repr(e);
                }
                self.write(")");
            }
            TypeRepr::Array(t) => {
                self.type_repr(&t.element);
                self.write("[]");
            }
            TypeRepr::Dictionary(t) => {
                self.write("[");
                self.type_repr(&t.key);
                self.write(" : ");
                self.type_repr(&t.value);
                self.write("]");
            }
            TypeRepr::Function(t) => {
                self.write("(");
                for (i, p) in t.parameters.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(n) = &p.name {
                        self.write(n);
                        self.write(" : ");
                    }
                    self.type_repr(&p.ty);
                }
                self.write(") -> ");
                self.type_repr(&t.return_type);
            }
            TypeRepr::Optional(t) => {
                self.type_repr(&t.inner);
                self.write("?");
            }
            TypeRepr::ImplicitlyUnwrappedOptional(t) => {
                self.type_repr(&t.inner);
                self.write("!");
            }
            TypeRepr::ProtocolComposition(t) => {
                self.write("protocol<");
                for (i, p) in t.protocols.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.named_type(p);
                }
                self.write(">");
            }
            TypeRepr::Error(_) => self.write("<error>"),
        }
    }

    // -------------------------------------------------------------------------
    // Declarations
    // -------------------------------------------------------------------------

    fn modifiers(&mut self, m: &DeclModifiers) {
        if m.is_static {
            self.write("static ");
        }
        if m.mutating {
            self.write("mutating ");
        }
        if m.is_override {
            self.write("override ");
        }
        if m.is_final {
            self.write("final ");
        }
        if m.lazy {
            self.write("lazy ");
        }
        if m.weak {
            self.write("weak ");
        }
        if m.unowned {
            self.write("unowned ");
        }
        if m.convenience {
            self.write("convenience ");
        }
        if m.required {
            self.write("required ");
        }
        if m.prefix {
            self.write("prefix ");
        }
        if m.postfix {
            self.write("postfix ");
        }
        if m.infix {
            self.write("infix ");
        }
    }

    fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Import(d) => {
                self.write("import ");
                let kind = match d.kind {
                    ImportKind::Default => "",
                    ImportKind::Typealias => "typealias ",
                    ImportKind::Struct => "struct ",
                    ImportKind::Class => "class ",
                    ImportKind::Enum => "enum ",
                    ImportKind::Protocol => "protocol ",
                    ImportKind::Var => "var ",
                    ImportKind::Func => "func ",
                };
                self.write(kind);
                self.write(&d.path);
            }
            Decl::Bindings(d) => {
                self.modifiers(&d.modifiers);
                self.write(if d.constant { "let " } else { "var " });
                for (i, b) in d.bindings.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.pattern(&b.pattern);
                    if let Some(init) = &b.initializer {
                        self.write(" = ");
                        self.expr(init);
                    }
                }
            }
            Decl::ComputedProperty(d) => {
                self.modifiers(&d.modifiers);
                self.write("var ");
                self.write(&d.name);
                self.write(" : ");
                self.type_repr(&d.ty);
                self.write(" {\n");
                self.indent += 1;
                if d.requirement_only {
                    self.line_start();
                    if d.getter.is_none() {
                        self.write("get");
                    } else {
                        self.write("get set");
                    }
                    self.write("\n");
                } else {
                    if let Some(g) = &d.getter {
                        self.line_start();
                        self.write("get ");
                        self.block(g);
                        self.write("\n");
                    }
                    if let Some((param, s)) = &d.setter {
                        self.line_start();
                        self.write("set");
                        if let Some(p) = param {
                            self.write("(");
                            self.write(p);
                            self.write(")");
                        }
                        self.write(" ");
                        self.block(s);
                        self.write("\n");
                    }
                }
                self.indent -= 1;
                self.line_start();
                self.write("}");
            }
            Decl::TypeAlias(d) => {
                self.write("typealias ");
                self.write(&d.name);
                if let Some(t) = &d.target {
                    self.write(" = ");
                    self.type_repr(t);
                }
            }
            Decl::Function(d) => {
                self.modifiers(&d.modifiers);
                self.write("func ");
                self.write(&d.name);
                self.generic_params(d.generic.as_ref());
                self.parameter_clause(&d.parameters);
                if let Some(r) = &d.return_type {
                    self.write(" -> ");
                    self.type_repr(r);
                }
                if let Some(b) = &d.body {
                    self.write(" ");
                    self.block(b);
                }
            }
            Decl::Enum(d) => {
                self.write("enum ");
                self.type_header(&d.info);
                self.write(" {\n");
                self.indent += 1;
                for case in &d.cases {
                    self.line_start();
                    self.write("case ");
                    self.write(&case.name);
                    if let Some(a) = &case.associated {
                        self.type_repr(&TypeRepr::Tuple(a.clone()));
                    }
                    if let Some(r) = &case.raw_value {
                        self.write(" = ");
                        self.expr(r);
                    }
                    self.write("\n");
                }
                for member in &d.info.body {
                    self.line_start();
                    self.decl(member);
                    self.write("\n");
                }
                self.indent -= 1;
                self.line_start();
                self.write("}");
            }
            Decl::Struct(d) => {
                self.write("struct ");
                self.type_decl_body(&d.info);
            }
            Decl::Class(d) => {
                self.write("class ");
                self.type_decl_body(&d.info);
            }
            Decl::Protocol(d) => {
                self.write("protocol ");
                self.type_decl_body(&d.info);
            }
            Decl::Extension(d) => {
                self.write("extension ");
                self.write(&d.name);
                if !d.protocols.is_empty() {
                    self.write(" : ");
                    for (i, p) in d.protocols.iter().enumerate() {
                        if i > 0 {
                            self.write(", ");
                        }
                        self.named_type(p);
                    }
                }
                self.write(" {\n");
                self.indent += 1;
                for member in &d.body {
                    self.line_start();
                    self.decl(member);
                    self.write("\n");
                }
                self.indent -= 1;
                self.line_start();
                self.write("}");
            }
            Decl::Init(d) => {
                self.modifiers(&d.modifiers);
                self.write("init");
                self.parameter_clause(&d.parameters);
                self.write(" ");
                self.block(&d.body);
            }
            Decl::Deinit(d) => {
                self.write("deinit ");
                self.block(&d.body);
            }
            Decl::Subscript(d) => {
                self.write("subscript");
                self.parameter_clause(&d.parameters);
                self.write(" -> ");
                self.type_repr(&d.return_type);
                self.write(" {\n");
                self.indent += 1;
                if let Some(g) = &d.getter {
                    self.line_start();
                    self.write("get ");
                    self.block(g);
                    self.write("\n");
                }
                if let Some((param, s)) = &d.setter {
                    self.line_start();
                    self.write("set");
                    if let Some(p) = param {
                        self.write("(");
                        self.write(p);
                        self.write(")");
                    }
                    self.write(" ");
                    self.block(s);
                    self.write("\n");
                }
                self.indent -= 1;
                self.line_start();
                self.write("}");
            }
            Decl::Operator(d) => {
                self.write("operator ");
                self.write(match d.fixity {
                    OperatorFixitySpec::Infix => "infix ",
                    OperatorFixitySpec::Prefix => "prefix ",
                    OperatorFixitySpec::Postfix => "postfix ",
                });
                self.write(&d.name);
                self.write(" { associativity ");
                self.write(match d.associativity {
                    crate::operators::Associativity::Left => "left",
                    crate::operators::Associativity::Right => "right",
                    crate::operators::Associativity::None => "none",
                });
                let mut buf = String::new();
                let _ = write!(buf, " precedence {} }}", d.precedence);
                self.write(&buf);
            }
        }
    }

    fn type_header(&mut self, info: &TypeDeclInfo) {
        self.write(&info.name);
        self.generic_params(info.generic.as_ref());
        if !info.inherited.is_empty() {
            self.write(" : ");
            for (i, p) in info.inherited.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                self.named_type(p);
            }
        }
    }

    fn type_decl_body(&mut self, info: &TypeDeclInfo) {
        self.type_header(info);
        self.write(" {\n");
        self.indent += 1;
        for member in &info.body {
            self.line_start();
            self.decl(member);
            self.write("\n");
        }
        self.indent -= 1;
        self.line_start();
        self.write("}");
    }

    fn generic_params(&mut self, generic: Option<&GenericParams>) {
        let Some(g) = generic else { return };
        self.write("<");
        for (i, p) in g.params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&p.name);
            if !p.constraints.is_empty() {
                self.write(" : ");
                self.type_repr(&p.constraints[0]);
            }
        }
        self.write(">");
    }

    fn parameter_clause(&mut self, parameters: &[Parameter]) {
        self.write("(");
        for (i, p) in parameters.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if p.inout {
                self.write("inout ");
            }
            if let Some(e) = &p.external_name {
                self.write(e);
                self.write(" ");
            }
            self.write(&p.local_name);
            self.write(" : ");
            self.type_repr(&p.ty);
            if p.variadic {
                self.write("...");
            }
            if let Some(d) = &p.default_value {
                self.write(" = ");
                self.expr(d);
            }
        }
        self.write(")");
    }
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}
