//! Declaration grammar: imports, bindings, functions, nominal types,
//! extensions, initializers, subscripts, and operator declarations.

use super::ParserState;
use crate::ast::*;
use crate::operators::{Associativity, OperatorFixity};
use std::rc::Rc;
use swz_common::diagnostics::diagnostic_codes as codes;
use swz_scanner::{Keyword, TokenKind, TokenPayload};

impl ParserState {
    pub(crate) fn parse_declaration(&mut self) -> Rc<Decl> {
        self.skip_attributes();
        let modifiers = self.parse_modifiers();

        let Some(kw) = self.current.keyword() else {
            let shown = self.token_text_for_diagnostic();
            self.error_current(codes::E_UNEXPECTED_TOKEN_1, vec![shown]);
            self.synchronize();
            return self.placeholder_decl();
        };

        match kw {
            Keyword::Import => self.parse_import(),
            Keyword::Let => self.parse_bindings(true, modifiers),
            Keyword::Var => self.parse_bindings(false, modifiers),
            Keyword::Typealias => self.parse_typealias(),
            Keyword::Func => self.parse_func(modifiers),
            Keyword::Enum => self.parse_enum(),
            Keyword::Struct => self.parse_struct(),
            Keyword::Class => self.parse_class(),
            Keyword::Protocol => self.parse_protocol(),
            Keyword::Extension => self.parse_extension(),
            Keyword::Init => self.parse_init(modifiers),
            Keyword::Deinit => self.parse_deinit(),
            Keyword::Subscript => self.parse_subscript(),
            Keyword::Operator => self.parse_operator_decl(),
            _ => {
                let shown = self.token_text_for_diagnostic();
                self.error_current(codes::E_UNEXPECTED_TOKEN_1, vec![shown]);
                self.synchronize();
                self.placeholder_decl()
            }
        }
    }

    fn placeholder_decl(&mut self) -> Rc<Decl> {
        Rc::new(Decl::Bindings(BindingsDecl {
            id: self.node_id(),
            span: self.current.span,
            constant: true,
            modifiers: DeclModifiers::default(),
            bindings: Vec::new(),
        }))
    }

    fn parse_modifiers(&mut self) -> DeclModifiers {
        let mut m = DeclModifiers::default();
        loop {
            let Some(kw) = self.current.keyword() else {
                break;
            };
            match kw {
                Keyword::Static => m.is_static = true,
                Keyword::Mutating => m.mutating = true,
                Keyword::Override => m.is_override = true,
                Keyword::Final => m.is_final = true,
                Keyword::Lazy => m.lazy = true,
                Keyword::Weak => m.weak = true,
                Keyword::Unowned => m.unowned = true,
                Keyword::Convenience => m.convenience = true,
                Keyword::Required => m.required = true,
                Keyword::Prefix => m.prefix = true,
                Keyword::Postfix => m.postfix = true,
                Keyword::Infix => m.infix = true,
                _ => break,
            }
            // Contextual keywords stay identifiers unless a declaration
            // actually follows.
            if self
                .scanner
                .peek()
                .keyword()
                .is_none_or(|k| k.kind() != swz_scanner::KeywordKind::Declaration)
                && !matches!(
                    self.scanner.peek().keyword(),
                    Some(
                        Keyword::Static
                            | Keyword::Mutating
                            | Keyword::Override
                            | Keyword::Final
                            | Keyword::Lazy
                            | Keyword::Weak
                            | Keyword::Unowned
                            | Keyword::Convenience
                            | Keyword::Required
                            | Keyword::Prefix
                            | Keyword::Postfix
                            | Keyword::Infix
                    )
                )
            {
                break;
            }
            self.advance();
        }
        m
    }

    fn parse_import(&mut self) -> Rc<Decl> {
        let start = self.advance().span; // 'import'
        let kind = match self.current.keyword() {
            Some(Keyword::Typealias) => {
                self.advance();
                ImportKind::Typealias
            }
            Some(Keyword::Struct) => {
                self.advance();
                ImportKind::Struct
            }
            Some(Keyword::Class) => {
                self.advance();
                ImportKind::Class
            }
            Some(Keyword::Enum) => {
                self.advance();
                ImportKind::Enum
            }
            Some(Keyword::Protocol) => {
                self.advance();
                ImportKind::Protocol
            }
            Some(Keyword::Var) => {
                self.advance();
                ImportKind::Var
            }
            Some(Keyword::Func) => {
                self.advance();
                ImportKind::Func
            }
            _ => ImportKind::Default,
        };
        let mut path = self.expect_identifier();
        while self.at_operator(".") && !self.space_before_current() {
            self.advance();
            path.push('.');
            path.push_str(&self.expect_identifier());
        }
        Rc::new(Decl::Import(ImportDecl {
            id: self.node_id(),
            span: start.merge(self.prev_span()),
            kind,
            path,
        }))
    }

    fn parse_bindings(&mut self, constant: bool, modifiers: DeclModifiers) -> Rc<Decl> {
        let start = self.advance().span; // 'let' / 'var'
        let mut bindings = Vec::new();
        loop {
            let b_start = self.current.span;
            let pattern = self.parse_pattern(false);

            // `var name : T { … }` is a computed property.
            if !constant && bindings.is_empty() && self.at(TokenKind::OpenBrace) {
                if let Pattern::Typed(typed) = &pattern {
                    if let Pattern::Identifier(name) = typed.pattern.as_ref() {
                        let name = name.name.clone();
                        let ty = typed.ty.clone();
                        return self.parse_computed_property(start, modifiers, name, ty);
                    }
                }
            }

            let initializer = if self.eat_operator("=") {
                Some(self.parse_expression())
            } else {
                None
            };
            let span = b_start.merge(self.prev_span());
            bindings.push(Binding {
                id: self.node_id(),
                span,
                pattern,
                initializer,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Rc::new(Decl::Bindings(BindingsDecl {
            id: self.node_id(),
            span: start.merge(self.prev_span()),
            constant,
            modifiers,
            bindings,
        }))
    }

    fn parse_computed_property(
        &mut self,
        start: swz_common::span::Span,
        modifiers: DeclModifiers,
        name: String,
        ty: TypeRepr,
    ) -> Rc<Decl> {
        self.advance(); // '{'
        let mut getter = None;
        let mut setter = None;
        let mut requirement_only = false;

        if self.at_keyword(Keyword::Get) || self.at_keyword(Keyword::Set) {
            while self.at_keyword(Keyword::Get) || self.at_keyword(Keyword::Set) {
                let is_get = self.at_keyword(Keyword::Get);
                self.advance();
                if is_get {
                    if self.at(TokenKind::OpenBrace) {
                        getter = Some(self.parse_code_block());
                    } else {
                        requirement_only = true;
                    }
                } else {
                    let param = if self.eat(TokenKind::OpenParen) {
                        let n = self.expect_identifier();
                        self.expect(TokenKind::CloseParen, ")");
                        Some(n)
                    } else {
                        None
                    };
                    if self.at(TokenKind::OpenBrace) {
                        setter = Some((param, self.parse_code_block()));
                    } else {
                        requirement_only = true;
                    }
                }
            }
        } else {
            // Getter-only shorthand: the block body is the getter.
            let mut statements = Vec::new();
            while !self.at(TokenKind::CloseBrace) && !self.at(TokenKind::Eof) {
                while self.eat(TokenKind::Semicolon) {}
                if self.at(TokenKind::CloseBrace) || self.at(TokenKind::Eof) {
                    break;
                }
                let before = self.current.span;
                statements.push(self.parse_statement());
                if self.current.span == before && !self.at(TokenKind::Eof) {
                    self.advance();
                }
            }
            let span = start.merge(self.current.span);
            getter = Some(CodeBlock {
                id: self.node_id(),
                span,
                statements,
            });
        }
        self.expect(TokenKind::CloseBrace, "}");
        Rc::new(Decl::ComputedProperty(ComputedPropertyDecl {
            id: self.node_id(),
            span: start.merge(self.prev_span()),
            modifiers,
            name,
            ty,
            getter,
            setter,
            requirement_only,
        }))
    }

    fn parse_typealias(&mut self) -> Rc<Decl> {
        let start = self.advance().span; // 'typealias'
        let name = self.expect_identifier();
        let target = if self.eat_operator("=") {
            Some(self.parse_type())
        } else {
            None
        };
        Rc::new(Decl::TypeAlias(TypeAliasDecl {
            id: self.node_id(),
            span: start.merge(self.prev_span()),
            name,
            target,
        }))
    }

    fn parse_func(&mut self, modifiers: DeclModifiers) -> Rc<Decl> {
        let start = self.advance().span; // 'func'
        // Operator functions use the operator lexeme as their name.
        let name = if self.current.kind == TokenKind::Operator {
            self.advance().text
        } else {
            self.expect_identifier()
        };
        let generic = self.parse_generic_params_opt();
        let parameters = self.parse_parameter_clause();
        let return_type = if self.eat_operator("->") {
            Some(self.parse_type())
        } else {
            None
        };
        let body = if self.at(TokenKind::OpenBrace) {
            Some(self.parse_code_block())
        } else {
            None
        };
        Rc::new(Decl::Function(FunctionDecl {
            id: self.node_id(),
            span: start.merge(self.prev_span()),
            modifiers,
            name,
            generic,
            parameters,
            return_type,
            body,
        }))
    }

    pub(crate) fn parse_generic_params_opt(&mut self) -> Option<GenericParams> {
        if !self.at_operator("<") || self.space_before_current() {
            return None;
        }
        let start = self.advance().span;
        let mut params = Vec::new();
        loop {
            let p_start = self.current.span;
            let name = self.expect_identifier();
            let mut constraints = Vec::new();
            if self.eat(TokenKind::Colon) {
                constraints.push(self.parse_type());
            }
            params.push(GenericParam {
                id: self.node_id(),
                span: p_start.merge(self.prev_span()),
                name,
                constraints,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        if !self.eat_close_angle() {
            self.error_expect(">");
        }
        Some(GenericParams {
            id: self.node_id(),
            span: start.merge(self.prev_span()),
            params,
        })
    }

    pub(crate) fn parse_parameter_clause(&mut self) -> Vec<Parameter> {
        let mut parameters = Vec::new();
        if !self.expect(TokenKind::OpenParen, "(") {
            return parameters;
        }
        if !self.at(TokenKind::CloseParen) {
            loop {
                parameters.push(self.parse_parameter());
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::CloseParen, ")");
        parameters
    }

    fn parse_parameter(&mut self) -> Parameter {
        let start = self.current.span;
        let inout = self.eat_keyword(Keyword::Inout);
        let first = self.expect_identifier();
        let (external_name, local_name, shorthand) = if self.current.is_name() {
            let local = self.advance().text;
            let shorthand = first == local;
            (Some(first), local, shorthand)
        } else {
            (None, first, false)
        };
        self.expect(TokenKind::Colon, ":");
        let ty = self.parse_type();
        let variadic = self.eat_operator("...");
        let default_value = if self.eat_operator("=") {
            Some(self.parse_expression())
        } else {
            None
        };
        Parameter {
            id: self.node_id(),
            span: start.merge(self.prev_span()),
            external_name,
            local_name,
            shorthand_external: shorthand,
            inout,
            variadic,
            ty,
            default_value,
        }
    }

    fn parse_inheritance_clause(&mut self) -> Vec<NamedTypeRepr> {
        let mut inherited = Vec::new();
        if self.eat(TokenKind::Colon) {
            loop {
                inherited.push(self.parse_named_type());
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        inherited
    }

    /// Body of a nominal type: declarations until the closing brace.
    fn parse_decl_body(&mut self) -> Vec<Rc<Decl>> {
        let mut body = Vec::new();
        self.expect(TokenKind::OpenBrace, "{");
        while !self.at(TokenKind::CloseBrace) && !self.at(TokenKind::Eof) {
            while self.eat(TokenKind::Semicolon) {}
            if self.at(TokenKind::CloseBrace) || self.at(TokenKind::Eof) {
                break;
            }
            let before = self.current.span;
            body.push(self.parse_declaration());
            if self.current.span == before && !self.at(TokenKind::Eof) {
                self.advance();
            }
        }
        self.expect(TokenKind::CloseBrace, "}");
        body
    }

    fn parse_enum(&mut self) -> Rc<Decl> {
        let start = self.advance().span; // 'enum'
        let name = self.expect_identifier();
        let generic = self.parse_generic_params_opt();
        let inherited = self.parse_inheritance_clause();
        let mut body = Vec::new();
        let mut cases = Vec::new();
        self.expect(TokenKind::OpenBrace, "{");
        while !self.at(TokenKind::CloseBrace) && !self.at(TokenKind::Eof) {
            while self.eat(TokenKind::Semicolon) {}
            if self.at(TokenKind::CloseBrace) || self.at(TokenKind::Eof) {
                break;
            }
            if self.at_keyword(Keyword::Case) {
                self.advance();
                loop {
                    let c_start = self.current.span;
                    let case_name = self.expect_identifier();
                    let associated = if self.at(TokenKind::OpenParen) {
                        Some(self.parse_associated_tuple())
                    } else {
                        None
                    };
                    let raw_value = if self.eat_operator("=") {
                        Some(self.parse_expression())
                    } else {
                        None
                    };
                    cases.push(EnumCaseDecl {
                        id: self.node_id(),
                        span: c_start.merge(self.prev_span()),
                        name: case_name,
                        associated,
                        raw_value,
                    });
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
            } else {
                let before = self.current.span;
                body.push(self.parse_declaration());
                if self.current.span == before && !self.at(TokenKind::Eof) {
                    self.advance();
                }
            }
        }
        self.expect(TokenKind::CloseBrace, "}");
        Rc::new(Decl::Enum(EnumDecl {
            id: self.node_id(),
            span: start.merge(self.prev_span()),
            info: TypeDeclInfo {
                name,
                generic,
                inherited,
                body,
            },
            cases,
        }))
    }

    /// Parse the associated-value clause of an enum case as a tuple type.
    fn parse_associated_tuple(&mut self) -> TupleTypeRepr {
        let ty = self.parse_type();
        match ty {
            TypeRepr::Tuple(t) => t,
            other => TupleTypeRepr {
                id: self.node_id(),
                span: other.span(),
                elements: vec![(None, other)],
            },
        }
    }

    fn parse_struct(&mut self) -> Rc<Decl> {
        let start = self.advance().span;
        let info = self.parse_type_decl_info();
        Rc::new(Decl::Struct(StructDecl {
            id: self.node_id(),
            span: start.merge(self.prev_span()),
            info,
        }))
    }

    fn parse_class(&mut self) -> Rc<Decl> {
        let start = self.advance().span;
        let info = self.parse_type_decl_info();
        Rc::new(Decl::Class(ClassDecl {
            id: self.node_id(),
            span: start.merge(self.prev_span()),
            info,
        }))
    }

    fn parse_protocol(&mut self) -> Rc<Decl> {
        let start = self.advance().span;
        let info = self.parse_type_decl_info();
        Rc::new(Decl::Protocol(ProtocolDecl {
            id: self.node_id(),
            span: start.merge(self.prev_span()),
            info,
        }))
    }

    fn parse_type_decl_info(&mut self) -> TypeDeclInfo {
        let name = self.expect_identifier();
        let generic = self.parse_generic_params_opt();
        let inherited = self.parse_inheritance_clause();
        let body = self.parse_decl_body();
        TypeDeclInfo {
            name,
            generic,
            inherited,
            body,
        }
    }

    fn parse_extension(&mut self) -> Rc<Decl> {
        let start = self.advance().span; // 'extension'
        let name = self.expect_identifier();
        let protocols = self.parse_inheritance_clause();
        let body = self.parse_decl_body();
        Rc::new(Decl::Extension(ExtensionDecl {
            id: self.node_id(),
            span: start.merge(self.prev_span()),
            name,
            protocols,
            body,
        }))
    }

    fn parse_init(&mut self, modifiers: DeclModifiers) -> Rc<Decl> {
        let start = self.advance().span; // 'init'
        let parameters = self.parse_parameter_clause();
        let body = self.parse_code_block();
        Rc::new(Decl::Init(InitDecl {
            id: self.node_id(),
            span: start.merge(self.prev_span()),
            modifiers,
            parameters,
            body,
        }))
    }

    fn parse_deinit(&mut self) -> Rc<Decl> {
        let start = self.advance().span; // 'deinit'
        let body = self.parse_code_block();
        Rc::new(Decl::Deinit(DeinitDecl {
            id: self.node_id(),
            span: start.merge(self.prev_span()),
            body,
        }))
    }

    fn parse_subscript(&mut self) -> Rc<Decl> {
        let start = self.advance().span; // 'subscript'
        let parameters = self.parse_parameter_clause();
        if !self.eat_operator("->") {
            self.error_expect("->");
        }
        let return_type = self.parse_type();

        self.expect(TokenKind::OpenBrace, "{");
        let mut getter = None;
        let mut setter = None;
        if self.at_keyword(Keyword::Get) || self.at_keyword(Keyword::Set) {
            while self.at_keyword(Keyword::Get) || self.at_keyword(Keyword::Set) {
                let is_get = self.at_keyword(Keyword::Get);
                self.advance();
                if is_get {
                    getter = Some(self.parse_code_block());
                } else {
                    let param = if self.eat(TokenKind::OpenParen) {
                        let n = self.expect_identifier();
                        self.expect(TokenKind::CloseParen, ")");
                        Some(n)
                    } else {
                        None
                    };
                    setter = Some((param, self.parse_code_block()));
                }
            }
        } else {
            let mut statements = Vec::new();
            while !self.at(TokenKind::CloseBrace) && !self.at(TokenKind::Eof) {
                while self.eat(TokenKind::Semicolon) {}
                if self.at(TokenKind::CloseBrace) || self.at(TokenKind::Eof) {
                    break;
                }
                let before = self.current.span;
                statements.push(self.parse_statement());
                if self.current.span == before && !self.at(TokenKind::Eof) {
                    self.advance();
                }
            }
            getter = Some(CodeBlock {
                id: self.node_id(),
                span: start.merge(self.current.span),
                statements,
            });
        }
        self.expect(TokenKind::CloseBrace, "}");
        Rc::new(Decl::Subscript(SubscriptDecl {
            id: self.node_id(),
            span: start.merge(self.prev_span()),
            parameters,
            return_type,
            getter,
            setter,
        }))
    }

    /// `operator <fixity> <op> { associativity <x> precedence <n> }`
    ///
    /// The registry is updated before parsing continues so that subsequent
    /// expressions in the same unit can use the operator.
    fn parse_operator_decl(&mut self) -> Rc<Decl> {
        let start = self.advance().span; // 'operator'
        let fixity = match self.current.keyword() {
            Some(Keyword::Infix) => {
                self.advance();
                OperatorFixitySpec::Infix
            }
            Some(Keyword::Prefix) => {
                self.advance();
                OperatorFixitySpec::Prefix
            }
            Some(Keyword::Postfix) => {
                self.advance();
                OperatorFixitySpec::Postfix
            }
            _ => {
                self.error_expect("infix");
                OperatorFixitySpec::Infix
            }
        };
        let name_span = self.current.span;
        let name = if self.current.kind == TokenKind::Operator {
            self.advance().text
        } else {
            let shown = self.token_text_for_diagnostic();
            self.error_current(codes::E_EXPECT_IDENTIFIER_1, vec![shown]);
            String::from("<error>")
        };

        let mut associativity = Associativity::None;
        let mut precedence: u32 = 100;
        self.expect(TokenKind::OpenBrace, "{");
        while !self.at(TokenKind::CloseBrace) && !self.at(TokenKind::Eof) {
            if self.eat_keyword(Keyword::Associativity) {
                associativity = match self.current.keyword() {
                    Some(Keyword::Left) => {
                        self.advance();
                        Associativity::Left
                    }
                    Some(Keyword::Right) => {
                        self.advance();
                        Associativity::Right
                    }
                    Some(Keyword::None) => {
                        self.advance();
                        Associativity::None
                    }
                    _ => {
                        self.error_expect("left");
                        Associativity::None
                    }
                };
            } else if self.eat_keyword(Keyword::Precedence) {
                if self.at(TokenKind::Integer) {
                    let tok = self.advance();
                    if let TokenPayload::Number(n) = tok.payload {
                        precedence = u32::try_from(n.value).unwrap_or(100);
                    }
                } else {
                    self.error_expect("precedence level");
                }
            } else {
                let shown = self.token_text_for_diagnostic();
                self.error_current(codes::E_UNEXPECTED_TOKEN_1, vec![shown]);
                self.advance();
            }
        }
        self.expect(TokenKind::CloseBrace, "}");

        let registry_fixity = match fixity {
            OperatorFixitySpec::Infix => OperatorFixity::Infix,
            OperatorFixitySpec::Prefix => OperatorFixity::Prefix,
            OperatorFixitySpec::Postfix => OperatorFixity::Postfix,
        };
        if name != "<error>"
            && !self
                .registry
                .register(&name, registry_fixity, associativity, precedence)
        {
            self.error_at(name_span, codes::E_OPERATOR_REDECLARED_1, vec![name.clone()]);
        }

        Rc::new(Decl::Operator(OperatorDecl {
            id: self.node_id(),
            span: start.merge(self.prev_span()),
            fixity,
            name,
            associativity,
            precedence,
        }))
    }
}
