//! Diagnostic message data.
//!
//! Codes are stable: 1xxx for syntactic diagnostics, 2xxx for semantic
//! diagnostics, 7xxx for warnings, 9xxx for fatal records. Never renumber an
//! existing code.

use super::DiagnosticMessage;
use super::DiagnosticSeverity;

/// Symbolic names for stable diagnostic codes.
pub mod diagnostic_codes {
    // -------------------------------------------------------------------------
    // Syntactic (1xxx)
    // -------------------------------------------------------------------------
    pub const E_UNEXPECTED_TOKEN_1: u32 = 1001;
    pub const E_EXPECT_1: u32 = 1002;
    pub const E_EXPECT_IDENTIFIER_1: u32 = 1003;
    pub const E_EXPECT_EXPRESSION_1: u32 = 1004;
    pub const E_EXPECT_TYPE: u32 = 1005;
    pub const E_UNTERMINATED_STRING_LITERAL: u32 = 1006;
    pub const E_UNTERMINATED_BLOCK_COMMENT: u32 = 1007;
    pub const E_INVALID_ESCAPE_SEQUENCE_1: u32 = 1008;
    pub const E_INVALID_NUMBER_LITERAL_1: u32 = 1009;
    pub const E_UNEXPECTED_CHARACTER_1: u32 = 1010;
    pub const E_NESTING_TOO_DEEP: u32 = 1011;
    pub const E_OPERATOR_REDECLARED_1: u32 = 1012;
    pub const E_USE_OF_UNRESOLVED_OPERATOR_1: u32 = 1013;
    pub const E_EXPECT_TUPLE_OR_IDENTIFIER: u32 = 1014;
    pub const E_NON_ASSOCIATIVE_OPERATORS_1: u32 = 1015;

    // -------------------------------------------------------------------------
    // Semantic (2xxx)
    // -------------------------------------------------------------------------
    pub const E_USE_OF_UNRESOLVED_IDENTIFIER_1: u32 = 2001;
    pub const E_USE_OF_UNDECLARED_TYPE_1: u32 = 2002;
    pub const E_CANNOT_ASSIGN_TO_A_IN_B_2: u32 = 2003;
    pub const E_USE_OF_INITIALIZING_VARIABLE_1: u32 = 2004;
    pub const E_USE_OF_UNINITIALIZED_VARIABLE_1: u32 = 2005;
    pub const E_INVALID_REDECLARATION_1: u32 = 2006;
    pub const E_DEFINITION_CONFLICT_1: u32 = 2007;
    pub const E_SUPERCLASS_MUST_APPEAR_FIRST_IN_INHERITANCE_CLAUSE_1: u32 = 2008;
    pub const E_INHERITANCE_FROM_NON_PROTOCOL_NON_CLASS_TYPE_1: u32 = 2009;
    pub const E_CANNOT_SPECIALIZE_NON_GENERIC_TYPE_1: u32 = 2010;
    pub const E_GENERIC_TYPE_ARGUMENT_REQUIRED_1: u32 = 2011;
    pub const E_GENERIC_TYPE_SPECIALIZED_WITH_TOO_MANY_TYPE_PARAMETERS_3: u32 = 2012;
    pub const E_GENERIC_TYPE_SPECIALIZED_WITH_INSUFFICIENT_TYPE_PARAMETERS_3: u32 = 2013;
    pub const E_TUPLE_PATTERN_CANNOT_MATCH_VALUES_OF_THE_NON_TUPLE_TYPE_A_1: u32 = 2014;
    pub const E_TYPE_ANNOTATION_DOES_NOT_MATCH_CONTEXTUAL_TYPE_A_1: u32 = 2015;
    pub const E_VARLET_CANNOT_APPEAR_INSIDE_ANOTHER_VAR_OR_LET_PATTERN_1: u32 = 2016;
    pub const E_DEFAULT_ARGUMENT_NOT_PERMITTED_IN_A_PROTOCOL_METHOD: u32 = 2017;
    pub const E_PROTOCOL_VAR_MUST_BE_COMPUTED_PROPERTY: u32 = 2018;
    pub const E_PROTOCOL_CANNOT_DEFINE_LET_CONSTANT: u32 = 2019;
    pub const E_TYPE_DOES_NOT_CONFORM_TO_PROTOCOL_UNIMPLEMENTED_FUNCTION_3: u32 = 2020;
    pub const E_TYPE_DOES_NOT_CONFORM_TO_PROTOCOL_UNIMPLEMENTED_TYPE_3: u32 = 2021;
    pub const E_TYPE_DOES_NOT_CONFORM_TO_PROTOCOL_UNIMPLEMENTED_PROPERTY_3: u32 = 2022;
    pub const E_A_IS_NOT_A_MEMBER_TYPE_OF_B_2: u32 = 2023;
    pub const E_NON_PROTOCOL_TYPE_A_CANNOT_BE_USED_WITHIN_PROTOCOL_COMPOSITION_1: u32 = 2024;
    pub const E_AMBIGUOUS_USE_1: u32 = 2025;
    pub const E_CANNOT_INVOKE_A_WITH_AN_ARGUMENT_LIST_OF_TYPE_B_2: u32 = 2026;
    pub const E_INOUT_ARGUMENTS_CANNOT_BE_VARIADIC: u32 = 2027;
    pub const E_USE_OF_FUNCTION_LOCAL_INSIDE_TYPE_1: u32 = 2028;
    pub const E_CLASS_HAS_NO_INITIALIZERS_1: u32 = 2029;
    pub const E_CIRCULAR_REFERENCE_1: u32 = 2030;
    pub const E_DOES_NOT_HAVE_A_MEMBER_2: u32 = 2031;
    pub const E_CANNOT_CONVERT_EXPRESSION_TYPE_2: u32 = 2032;
    pub const E_NIL_REQUIRES_CONTEXTUAL_TYPE: u32 = 2033;

    // -------------------------------------------------------------------------
    // Warnings (7xxx)
    // -------------------------------------------------------------------------
    pub const W_PARAM_CAN_BE_EXPRESSED_MORE_SUCCINCTLY_1: u32 = 7001;

    // -------------------------------------------------------------------------
    // Fatal (9xxx)
    // -------------------------------------------------------------------------
    pub const F_TRANSLATION_UNIT_ABORTED: u32 = 9001;
    pub const F_INTERNAL_ERROR_1: u32 = 9002;
}

use diagnostic_codes as c;

/// All diagnostic message templates, ordered by code.
pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: c::E_UNEXPECTED_TOKEN_1,
        severity: DiagnosticSeverity::Error,
        message: "unexpected token '{0}'",
    },
    DiagnosticMessage {
        code: c::E_EXPECT_1,
        severity: DiagnosticSeverity::Error,
        message: "'{0}' expected",
    },
    DiagnosticMessage {
        code: c::E_EXPECT_IDENTIFIER_1,
        severity: DiagnosticSeverity::Error,
        message: "identifier expected, but '{0}' found",
    },
    DiagnosticMessage {
        code: c::E_EXPECT_EXPRESSION_1,
        severity: DiagnosticSeverity::Error,
        message: "expression expected, but '{0}' found",
    },
    DiagnosticMessage {
        code: c::E_EXPECT_TYPE,
        severity: DiagnosticSeverity::Error,
        message: "type expected",
    },
    DiagnosticMessage {
        code: c::E_UNTERMINATED_STRING_LITERAL,
        severity: DiagnosticSeverity::Error,
        message: "unterminated string literal",
    },
    DiagnosticMessage {
        code: c::E_UNTERMINATED_BLOCK_COMMENT,
        severity: DiagnosticSeverity::Error,
        message: "unterminated block comment",
    },
    DiagnosticMessage {
        code: c::E_INVALID_ESCAPE_SEQUENCE_1,
        severity: DiagnosticSeverity::Error,
        message: "invalid escape sequence '\\{0}' in literal",
    },
    DiagnosticMessage {
        code: c::E_INVALID_NUMBER_LITERAL_1,
        severity: DiagnosticSeverity::Error,
        message: "invalid numeric literal '{0}'",
    },
    DiagnosticMessage {
        code: c::E_UNEXPECTED_CHARACTER_1,
        severity: DiagnosticSeverity::Error,
        message: "unexpected character '{0}' in source file",
    },
    DiagnosticMessage {
        code: c::E_NESTING_TOO_DEEP,
        severity: DiagnosticSeverity::Error,
        message: "nesting level is too deep",
    },
    DiagnosticMessage {
        code: c::E_OPERATOR_REDECLARED_1,
        severity: DiagnosticSeverity::Error,
        message: "operator '{0}' is already declared",
    },
    DiagnosticMessage {
        code: c::E_USE_OF_UNRESOLVED_OPERATOR_1,
        severity: DiagnosticSeverity::Error,
        message: "use of unresolved operator '{0}'",
    },
    DiagnosticMessage {
        code: c::E_EXPECT_TUPLE_OR_IDENTIFIER,
        severity: DiagnosticSeverity::Error,
        message: "expected tuple or identifier pattern",
    },
    DiagnosticMessage {
        code: c::E_NON_ASSOCIATIVE_OPERATORS_1,
        severity: DiagnosticSeverity::Error,
        message: "non-associative operator '{0}' cannot be chained without parentheses",
    },
    DiagnosticMessage {
        code: c::E_USE_OF_UNRESOLVED_IDENTIFIER_1,
        severity: DiagnosticSeverity::Error,
        message: "use of unresolved identifier '{0}'",
    },
    DiagnosticMessage {
        code: c::E_USE_OF_UNDECLARED_TYPE_1,
        severity: DiagnosticSeverity::Error,
        message: "use of undeclared type '{0}'",
    },
    DiagnosticMessage {
        code: c::E_CANNOT_ASSIGN_TO_A_IN_B_2,
        severity: DiagnosticSeverity::Error,
        message: "cannot assign to '{0}' in '{1}'",
    },
    DiagnosticMessage {
        code: c::E_USE_OF_INITIALIZING_VARIABLE_1,
        severity: DiagnosticSeverity::Error,
        message: "variable '{0}' used within its own initial value",
    },
    DiagnosticMessage {
        code: c::E_USE_OF_UNINITIALIZED_VARIABLE_1,
        severity: DiagnosticSeverity::Error,
        message: "variable '{0}' used before being initialized",
    },
    DiagnosticMessage {
        code: c::E_INVALID_REDECLARATION_1,
        severity: DiagnosticSeverity::Error,
        message: "invalid redeclaration of '{0}'",
    },
    DiagnosticMessage {
        code: c::E_DEFINITION_CONFLICT_1,
        severity: DiagnosticSeverity::Error,
        message: "definition conflicts with previous value '{0}'",
    },
    DiagnosticMessage {
        code: c::E_SUPERCLASS_MUST_APPEAR_FIRST_IN_INHERITANCE_CLAUSE_1,
        severity: DiagnosticSeverity::Error,
        message: "superclass '{0}' must appear first in the inheritance clause",
    },
    DiagnosticMessage {
        code: c::E_INHERITANCE_FROM_NON_PROTOCOL_NON_CLASS_TYPE_1,
        severity: DiagnosticSeverity::Error,
        message: "inheritance from non-protocol, non-class type '{0}'",
    },
    DiagnosticMessage {
        code: c::E_CANNOT_SPECIALIZE_NON_GENERIC_TYPE_1,
        severity: DiagnosticSeverity::Error,
        message: "cannot specialize non-generic type '{0}'",
    },
    DiagnosticMessage {
        code: c::E_GENERIC_TYPE_ARGUMENT_REQUIRED_1,
        severity: DiagnosticSeverity::Error,
        message: "reference to generic type '{0}' requires type arguments",
    },
    DiagnosticMessage {
        code: c::E_GENERIC_TYPE_SPECIALIZED_WITH_TOO_MANY_TYPE_PARAMETERS_3,
        severity: DiagnosticSeverity::Error,
        message: "generic type '{0}' specialized with too many type parameters (got {1}, expected {2})",
    },
    DiagnosticMessage {
        code: c::E_GENERIC_TYPE_SPECIALIZED_WITH_INSUFFICIENT_TYPE_PARAMETERS_3,
        severity: DiagnosticSeverity::Error,
        message: "generic type '{0}' specialized with insufficient type parameters (got {1}, expected {2})",
    },
    DiagnosticMessage {
        code: c::E_TUPLE_PATTERN_CANNOT_MATCH_VALUES_OF_THE_NON_TUPLE_TYPE_A_1,
        severity: DiagnosticSeverity::Error,
        message: "tuple pattern cannot match values of the non-tuple type '{0}'",
    },
    DiagnosticMessage {
        code: c::E_TYPE_ANNOTATION_DOES_NOT_MATCH_CONTEXTUAL_TYPE_A_1,
        severity: DiagnosticSeverity::Error,
        message: "type annotation does not match contextual type '{0}'",
    },
    DiagnosticMessage {
        code: c::E_VARLET_CANNOT_APPEAR_INSIDE_ANOTHER_VAR_OR_LET_PATTERN_1,
        severity: DiagnosticSeverity::Error,
        message: "'{0}' cannot appear inside another 'var' or 'let' pattern",
    },
    DiagnosticMessage {
        code: c::E_DEFAULT_ARGUMENT_NOT_PERMITTED_IN_A_PROTOCOL_METHOD,
        severity: DiagnosticSeverity::Error,
        message: "default argument not permitted in a protocol method",
    },
    DiagnosticMessage {
        code: c::E_PROTOCOL_VAR_MUST_BE_COMPUTED_PROPERTY,
        severity: DiagnosticSeverity::Error,
        message: "'var' declared in a protocol must be a computed property",
    },
    DiagnosticMessage {
        code: c::E_PROTOCOL_CANNOT_DEFINE_LET_CONSTANT,
        severity: DiagnosticSeverity::Error,
        message: "a protocol cannot define a 'let' constant",
    },
    DiagnosticMessage {
        code: c::E_TYPE_DOES_NOT_CONFORM_TO_PROTOCOL_UNIMPLEMENTED_FUNCTION_3,
        severity: DiagnosticSeverity::Error,
        message: "type '{0}' does not conform to protocol '{1}', unimplemented function '{2}'",
    },
    DiagnosticMessage {
        code: c::E_TYPE_DOES_NOT_CONFORM_TO_PROTOCOL_UNIMPLEMENTED_TYPE_3,
        severity: DiagnosticSeverity::Error,
        message: "type '{0}' does not conform to protocol '{1}', unimplemented type '{2}'",
    },
    DiagnosticMessage {
        code: c::E_TYPE_DOES_NOT_CONFORM_TO_PROTOCOL_UNIMPLEMENTED_PROPERTY_3,
        severity: DiagnosticSeverity::Error,
        message: "type '{0}' does not conform to protocol '{1}', unimplemented property '{2}'",
    },
    DiagnosticMessage {
        code: c::E_A_IS_NOT_A_MEMBER_TYPE_OF_B_2,
        severity: DiagnosticSeverity::Error,
        message: "'{0}' is not a member type of '{1}'",
    },
    DiagnosticMessage {
        code: c::E_NON_PROTOCOL_TYPE_A_CANNOT_BE_USED_WITHIN_PROTOCOL_COMPOSITION_1,
        severity: DiagnosticSeverity::Error,
        message: "non-protocol type '{0}' cannot be used within a protocol composition",
    },
    DiagnosticMessage {
        code: c::E_AMBIGUOUS_USE_1,
        severity: DiagnosticSeverity::Error,
        message: "ambiguous use of '{0}'",
    },
    DiagnosticMessage {
        code: c::E_CANNOT_INVOKE_A_WITH_AN_ARGUMENT_LIST_OF_TYPE_B_2,
        severity: DiagnosticSeverity::Error,
        message: "cannot invoke '{0}' with an argument list of type '{1}'",
    },
    DiagnosticMessage {
        code: c::E_INOUT_ARGUMENTS_CANNOT_BE_VARIADIC,
        severity: DiagnosticSeverity::Error,
        message: "inout arguments cannot be variadic",
    },
    DiagnosticMessage {
        code: c::E_USE_OF_FUNCTION_LOCAL_INSIDE_TYPE_1,
        severity: DiagnosticSeverity::Error,
        message: "use of local variable '{0}' inside a type",
    },
    DiagnosticMessage {
        code: c::E_CLASS_HAS_NO_INITIALIZERS_1,
        severity: DiagnosticSeverity::Error,
        message: "class '{0}' has no initializers",
    },
    DiagnosticMessage {
        code: c::E_CIRCULAR_REFERENCE_1,
        severity: DiagnosticSeverity::Error,
        message: "circular reference while resolving declaration '{0}'",
    },
    DiagnosticMessage {
        code: c::E_DOES_NOT_HAVE_A_MEMBER_2,
        severity: DiagnosticSeverity::Error,
        message: "'{0}' does not have a member named '{1}'",
    },
    DiagnosticMessage {
        code: c::E_CANNOT_CONVERT_EXPRESSION_TYPE_2,
        severity: DiagnosticSeverity::Error,
        message: "cannot convert the expression's type '{0}' to type '{1}'",
    },
    DiagnosticMessage {
        code: c::E_NIL_REQUIRES_CONTEXTUAL_TYPE,
        severity: DiagnosticSeverity::Error,
        message: "'nil' requires a contextual type",
    },
    DiagnosticMessage {
        code: c::W_PARAM_CAN_BE_EXPRESSED_MORE_SUCCINCTLY_1,
        severity: DiagnosticSeverity::Warning,
        message: "parameter '{0}' can be expressed more succinctly",
    },
    DiagnosticMessage {
        code: c::F_TRANSLATION_UNIT_ABORTED,
        severity: DiagnosticSeverity::Fatal,
        message: "translation unit aborted",
    },
    DiagnosticMessage {
        code: c::F_INTERNAL_ERROR_1,
        severity: DiagnosticSeverity::Fatal,
        message: "internal error: {0}",
    },
];
