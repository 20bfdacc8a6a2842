//! Uniform visitor dispatch over the AST.
//!
//! One method per node variant; every method defaults to walking the node's
//! children, so implementations override only the variants they care about.

use super::*;

pub trait Visitor: Sized {
    fn visit_program(&mut self, node: &Program) {
        walk_program(self, node);
    }

    // ---- Expressions ----
    fn visit_integer_literal(&mut self, _node: &IntegerLiteral) {}
    fn visit_float_literal(&mut self, _node: &FloatLiteral) {}
    fn visit_string_literal(&mut self, _node: &StringLiteral) {}
    fn visit_string_interpolation(&mut self, node: &StringInterpolation) {
        for e in &node.exprs {
            self.visit_expr(e);
        }
    }
    fn visit_boolean_literal(&mut self, _node: &BooleanLiteral) {}
    fn visit_nil_literal(&mut self, _node: &NilLiteral) {}
    fn visit_array_literal(&mut self, node: &ArrayLiteral) {
        for e in &node.elements {
            self.visit_expr(e);
        }
    }
    fn visit_dictionary_literal(&mut self, node: &DictionaryLiteral) {
        for (k, v) in &node.entries {
            self.visit_expr(k);
            self.visit_expr(v);
        }
    }
    fn visit_tuple_expr(&mut self, node: &TupleExpr) {
        for (_, e) in &node.elements {
            self.visit_expr(e);
        }
    }
    fn visit_closure(&mut self, node: &Closure) {
        for s in &node.statements {
            self.visit_stmt(s);
        }
    }
    fn visit_identifier(&mut self, _node: &Identifier) {}
    fn visit_member_access(&mut self, node: &MemberAccess) {
        if let Some(obj) = &node.object {
            self.visit_expr(obj);
        }
    }
    fn visit_subscript(&mut self, node: &SubscriptAccess) {
        self.visit_expr(&node.object);
        for e in &node.indices {
            self.visit_expr(e);
        }
    }
    fn visit_function_call(&mut self, node: &FunctionCall) {
        self.visit_expr(&node.callee);
        for arg in &node.arguments {
            self.visit_expr(&arg.value);
        }
        if let Some(c) = &node.trailing_closure {
            self.visit_expr(c);
        }
    }
    fn visit_unary(&mut self, node: &UnaryOperator) {
        self.visit_expr(&node.operand);
    }
    fn visit_binary(&mut self, node: &BinaryOperator) {
        self.visit_expr(&node.lhs);
        self.visit_expr(&node.rhs);
    }
    fn visit_conditional(&mut self, node: &ConditionalOperator) {
        self.visit_expr(&node.condition);
        self.visit_expr(&node.then_expr);
        self.visit_expr(&node.else_expr);
    }
    fn visit_assignment(&mut self, node: &Assignment) {
        self.visit_expr(&node.target);
        self.visit_expr(&node.value);
    }
    fn visit_type_check(&mut self, node: &TypeCheck) {
        self.visit_expr(&node.subject);
        self.visit_type_repr(&node.ty);
    }
    fn visit_type_cast(&mut self, node: &TypeCast) {
        self.visit_expr(&node.subject);
        self.visit_type_repr(&node.ty);
    }
    fn visit_parenthesized(&mut self, node: &Parenthesized) {
        self.visit_expr(&node.expr);
    }
    fn visit_self_expr(&mut self, _node: &SelfExpr) {}
    fn visit_dynamic_type(&mut self, node: &DynamicTypeExpr) {
        self.visit_expr(&node.object);
    }
    fn visit_forced_unwrap(&mut self, node: &ForcedUnwrap) {
        self.visit_expr(&node.operand);
    }
    fn visit_optional_chaining(&mut self, node: &OptionalChaining) {
        self.visit_expr(&node.operand);
    }
    fn visit_inout(&mut self, _node: &InOutExpr) {}
    fn visit_error_expr(&mut self, _node: &ErrorExpr) {}

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    // ---- Statements ----
    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }
    fn visit_code_block(&mut self, block: &CodeBlock) {
        for s in &block.statements {
            self.visit_stmt(s);
        }
    }
    fn visit_if(&mut self, node: &IfStmt) {
        self.visit_expr(&node.condition);
        self.visit_code_block(&node.then_block);
        if let Some(e) = &node.else_branch {
            match e.as_ref() {
                ElseBranch::Else(b) => self.visit_code_block(b),
                ElseBranch::ElseIf(i) => self.visit_if(i),
            }
        }
    }
    fn visit_while(&mut self, node: &WhileStmt) {
        self.visit_expr(&node.condition);
        self.visit_code_block(&node.body);
    }
    fn visit_repeat_while(&mut self, node: &RepeatWhileStmt) {
        self.visit_code_block(&node.body);
        self.visit_expr(&node.condition);
    }
    fn visit_for(&mut self, node: &ForStmt) {
        if let Some(init) = &node.init {
            self.visit_stmt(init);
        }
        if let Some(c) = &node.condition {
            self.visit_expr(c);
        }
        if let Some(s) = &node.step {
            self.visit_expr(s);
        }
        self.visit_code_block(&node.body);
    }
    fn visit_for_in(&mut self, node: &ForInStmt) {
        self.visit_pattern(&node.pattern);
        self.visit_expr(&node.sequence);
        self.visit_code_block(&node.body);
    }
    fn visit_switch(&mut self, node: &SwitchStmt) {
        self.visit_expr(&node.subject);
        for case in &node.cases {
            for item in &case.items {
                self.visit_pattern(&item.pattern);
                if let Some(g) = &item.guard {
                    self.visit_expr(g);
                }
            }
            for s in &case.statements {
                self.visit_stmt(s);
            }
        }
    }
    fn visit_break(&mut self, _node: &BreakStmt) {}
    fn visit_continue(&mut self, _node: &ContinueStmt) {}
    fn visit_fallthrough(&mut self, _node: &FallthroughStmt) {}
    fn visit_return(&mut self, node: &ReturnStmt) {
        if let Some(v) = &node.value {
            self.visit_expr(v);
        }
    }
    fn visit_labeled(&mut self, node: &LabeledStmt) {
        self.visit_stmt(&node.statement);
    }

    // ---- Patterns ----
    fn visit_pattern(&mut self, pattern: &Pattern) {
        walk_pattern(self, pattern);
    }
    fn visit_identifier_pattern(&mut self, _node: &IdentifierPattern) {}
    fn visit_wildcard_pattern(&mut self, _node: &WildcardPattern) {}
    fn visit_typed_pattern(&mut self, node: &TypedPattern) {
        self.visit_pattern(&node.pattern);
        self.visit_type_repr(&node.ty);
    }
    fn visit_tuple_pattern(&mut self, node: &TuplePattern) {
        for p in &node.elements {
            self.visit_pattern(p);
        }
    }
    fn visit_value_binding_pattern(&mut self, node: &ValueBindingPattern) {
        self.visit_pattern(&node.pattern);
    }
    fn visit_enum_case_pattern(&mut self, node: &EnumCasePattern) {
        if let Some(p) = &node.associated {
            self.visit_pattern(p);
        }
    }
    fn visit_expr_pattern(&mut self, node: &ExprPattern) {
        self.visit_expr(&node.expr);
    }

    // ---- Type references ----
    fn visit_type_repr(&mut self, _ty: &TypeRepr) {}

    // ---- Declarations ----
    fn visit_decl(&mut self, decl: &Decl) {
        walk_decl(self, decl);
    }
    fn visit_import(&mut self, _node: &ImportDecl) {}
    fn visit_bindings(&mut self, node: &BindingsDecl) {
        for b in &node.bindings {
            self.visit_pattern(&b.pattern);
            if let Some(init) = &b.initializer {
                self.visit_expr(init);
            }
        }
    }
    fn visit_computed_property(&mut self, node: &ComputedPropertyDecl) {
        if let Some(g) = &node.getter {
            self.visit_code_block(g);
        }
        if let Some((_, s)) = &node.setter {
            self.visit_code_block(s);
        }
    }
    fn visit_type_alias(&mut self, _node: &TypeAliasDecl) {}
    fn visit_function(&mut self, node: &FunctionDecl) {
        if let Some(body) = &node.body {
            self.visit_code_block(body);
        }
    }
    fn visit_enum(&mut self, node: &EnumDecl) {
        for d in &node.info.body {
            self.visit_decl(d);
        }
    }
    fn visit_struct(&mut self, node: &StructDecl) {
        for d in &node.info.body {
            self.visit_decl(d);
        }
    }
    fn visit_class(&mut self, node: &ClassDecl) {
        for d in &node.info.body {
            self.visit_decl(d);
        }
    }
    fn visit_protocol(&mut self, node: &ProtocolDecl) {
        for d in &node.info.body {
            self.visit_decl(d);
        }
    }
    fn visit_extension(&mut self, node: &ExtensionDecl) {
        for d in &node.body {
            self.visit_decl(d);
        }
    }
    fn visit_init(&mut self, node: &InitDecl) {
        self.visit_code_block(&node.body);
    }
    fn visit_deinit(&mut self, node: &DeinitDecl) {
        self.visit_code_block(&node.body);
    }
    fn visit_subscript_decl(&mut self, node: &SubscriptDecl) {
        if let Some(g) = &node.getter {
            self.visit_code_block(g);
        }
        if let Some((_, s)) = &node.setter {
            self.visit_code_block(s);
        }
    }
    fn visit_operator_decl(&mut self, _node: &OperatorDecl) {}
}

pub fn walk_program<V: Visitor>(v: &mut V, node: &Program) {
    for s in &node.statements {
        v.visit_stmt(s);
    }
}

pub fn walk_expr<V: Visitor>(v: &mut V, expr: &Expr) {
    match expr {
        Expr::IntegerLiteral(n) => v.visit_integer_literal(n),
        Expr::FloatLiteral(n) => v.visit_float_literal(n),
        Expr::StringLiteral(n) => v.visit_string_literal(n),
        Expr::StringInterpolation(n) => v.visit_string_interpolation(n),
        Expr::BooleanLiteral(n) => v.visit_boolean_literal(n),
        Expr::NilLiteral(n) => v.visit_nil_literal(n),
        Expr::ArrayLiteral(n) => v.visit_array_literal(n),
        Expr::DictionaryLiteral(n) => v.visit_dictionary_literal(n),
        Expr::TupleExpr(n) => v.visit_tuple_expr(n),
        Expr::Closure(n) => v.visit_closure(n),
        Expr::Identifier(n) => v.visit_identifier(n),
        Expr::MemberAccess(n) => v.visit_member_access(n),
        Expr::Subscript(n) => v.visit_subscript(n),
        Expr::FunctionCall(n) => v.visit_function_call(n),
        Expr::Unary(n) => v.visit_unary(n),
        Expr::Binary(n) => v.visit_binary(n),
        Expr::Conditional(n) => v.visit_conditional(n),
        Expr::Assignment(n) => v.visit_assignment(n),
        Expr::TypeCheck(n) => v.visit_type_check(n),
        Expr::TypeCast(n) => v.visit_type_cast(n),
        Expr::Parenthesized(n) => v.visit_parenthesized(n),
        Expr::SelfExpr(n) => v.visit_self_expr(n),
        Expr::DynamicType(n) => v.visit_dynamic_type(n),
        Expr::ForcedUnwrap(n) => v.visit_forced_unwrap(n),
        Expr::OptionalChaining(n) => v.visit_optional_chaining(n),
        Expr::InOut(n) => v.visit_inout(n),
        Expr::Error(n) => v.visit_error_expr(n),
    }
}

pub fn walk_stmt<V: Visitor>(v: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Decl(d) => v.visit_decl(d),
        Stmt::Expr(e) => v.visit_expr(e),
        Stmt::If(s) => v.visit_if(s),
        Stmt::While(s) => v.visit_while(s),
        Stmt::RepeatWhile(s) => v.visit_repeat_while(s),
        Stmt::For(s) => v.visit_for(s),
        Stmt::ForIn(s) => v.visit_for_in(s),
        Stmt::Switch(s) => v.visit_switch(s),
        Stmt::Break(s) => v.visit_break(s),
        Stmt::Continue(s) => v.visit_continue(s),
        Stmt::Fallthrough(s) => v.visit_fallthrough(s),
        Stmt::Return(s) => v.visit_return(s),
        Stmt::Labeled(s) => v.visit_labeled(s),
    }
}

pub fn walk_pattern<V: Visitor>(v: &mut V, pattern: &Pattern) {
    match pattern {
        Pattern::Identifier(p) => v.visit_identifier_pattern(p),
        Pattern::Wildcard(p) => v.visit_wildcard_pattern(p),
        Pattern::Typed(p) => v.visit_typed_pattern(p),
        Pattern::Tuple(p) => v.visit_tuple_pattern(p),
        Pattern::ValueBinding(p) => v.visit_value_binding_pattern(p),
        Pattern::EnumCase(p) => v.visit_enum_case_pattern(p),
        Pattern::Expr(p) => v.visit_expr_pattern(p),
    }
}

pub fn walk_decl<V: Visitor>(v: &mut V, decl: &Decl) {
    match decl {
        Decl::Import(d) => v.visit_import(d),
        Decl::Bindings(d) => v.visit_bindings(d),
        Decl::ComputedProperty(d) => v.visit_computed_property(d),
        Decl::TypeAlias(d) => v.visit_type_alias(d),
        Decl::Function(d) => v.visit_function(d),
        Decl::Enum(d) => v.visit_enum(d),
        Decl::Struct(d) => v.visit_struct(d),
        Decl::Class(d) => v.visit_class(d),
        Decl::Protocol(d) => v.visit_protocol(d),
        Decl::Extension(d) => v.visit_extension(d),
        Decl::Init(d) => v.visit_init(d),
        Decl::Deinit(d) => v.visit_deinit(d),
        Decl::Subscript(d) => v.visit_subscript_decl(d),
        Decl::Operator(d) => v.visit_operator_decl(d),
    }
}
