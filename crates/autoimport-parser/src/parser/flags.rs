//! Node kinds beyond scanner tokens, and per-node flags.

/// Node kinds for composite AST nodes.
///
/// Token kinds (identifiers, literals, keywords) reuse `SyntaxKind` values
/// directly; everything built by the parser lives above `SyntaxKind::LastToken`.
pub mod syntax_kind_ext {
    use autoimport_scanner::SyntaxKind;

    const BASE: u16 = SyntaxKind::LastToken as u16 + 60;

    // Names
    pub const COMPUTED_PROPERTY_NAME: u16 = BASE;

    // Expressions
    pub const ARRAY_LITERAL_EXPRESSION: u16 = BASE + 1;
    pub const OBJECT_LITERAL_EXPRESSION: u16 = BASE + 2;
    pub const PROPERTY_ACCESS_EXPRESSION: u16 = BASE + 3;
    pub const ELEMENT_ACCESS_EXPRESSION: u16 = BASE + 4;
    pub const CALL_EXPRESSION: u16 = BASE + 5;
    pub const NEW_EXPRESSION: u16 = BASE + 6;
    pub const TAGGED_TEMPLATE_EXPRESSION: u16 = BASE + 7;
    pub const PARENTHESIZED_EXPRESSION: u16 = BASE + 8;
    pub const FUNCTION_EXPRESSION: u16 = BASE + 9;
    pub const ARROW_FUNCTION: u16 = BASE + 10;
    pub const PREFIX_UNARY_EXPRESSION: u16 = BASE + 11;
    pub const POSTFIX_UNARY_EXPRESSION: u16 = BASE + 12;
    pub const AWAIT_EXPRESSION: u16 = BASE + 13;
    pub const YIELD_EXPRESSION: u16 = BASE + 14;
    pub const BINARY_EXPRESSION: u16 = BASE + 15;
    pub const CONDITIONAL_EXPRESSION: u16 = BASE + 16;
    pub const TEMPLATE_EXPRESSION: u16 = BASE + 17;
    pub const TEMPLATE_SPAN: u16 = BASE + 18;
    pub const SPREAD_ELEMENT: u16 = BASE + 19;
    pub const CLASS_EXPRESSION: u16 = BASE + 20;
    pub const OMITTED_EXPRESSION: u16 = BASE + 21;
    pub const META_PROPERTY: u16 = BASE + 22;

    // Object literal members
    pub const PROPERTY_ASSIGNMENT: u16 = BASE + 30;
    pub const SHORTHAND_PROPERTY_ASSIGNMENT: u16 = BASE + 31;
    pub const SPREAD_ASSIGNMENT: u16 = BASE + 32;

    // Class and object members
    pub const METHOD_DECLARATION: u16 = BASE + 33;
    pub const GET_ACCESSOR: u16 = BASE + 34;
    pub const SET_ACCESSOR: u16 = BASE + 35;
    pub const CONSTRUCTOR: u16 = BASE + 36;
    pub const PROPERTY_DECLARATION: u16 = BASE + 37;
    pub const CLASS_STATIC_BLOCK_DECLARATION: u16 = BASE + 38;
    pub const DECORATOR: u16 = BASE + 39;

    // Bindings
    pub const PARAMETER: u16 = BASE + 40;
    pub const OBJECT_BINDING_PATTERN: u16 = BASE + 41;
    pub const ARRAY_BINDING_PATTERN: u16 = BASE + 42;
    pub const BINDING_ELEMENT: u16 = BASE + 43;

    // Statements
    pub const BLOCK: u16 = BASE + 50;
    pub const VARIABLE_STATEMENT: u16 = BASE + 51;
    pub const VARIABLE_DECLARATION_LIST: u16 = BASE + 52;
    pub const VARIABLE_DECLARATION: u16 = BASE + 53;
    pub const EXPRESSION_STATEMENT: u16 = BASE + 54;
    pub const IF_STATEMENT: u16 = BASE + 55;
    pub const DO_STATEMENT: u16 = BASE + 56;
    pub const WHILE_STATEMENT: u16 = BASE + 57;
    pub const FOR_STATEMENT: u16 = BASE + 58;
    pub const FOR_IN_STATEMENT: u16 = BASE + 59;
    pub const FOR_OF_STATEMENT: u16 = BASE + 60;
    pub const CONTINUE_STATEMENT: u16 = BASE + 61;
    pub const BREAK_STATEMENT: u16 = BASE + 62;
    pub const RETURN_STATEMENT: u16 = BASE + 63;
    pub const SWITCH_STATEMENT: u16 = BASE + 64;
    pub const CASE_CLAUSE: u16 = BASE + 65;
    pub const DEFAULT_CLAUSE: u16 = BASE + 66;
    pub const LABELED_STATEMENT: u16 = BASE + 67;
    pub const THROW_STATEMENT: u16 = BASE + 68;
    pub const TRY_STATEMENT: u16 = BASE + 69;
    pub const CATCH_CLAUSE: u16 = BASE + 70;
    pub const DEBUGGER_STATEMENT: u16 = BASE + 71;
    pub const EMPTY_STATEMENT: u16 = BASE + 72;
    pub const FUNCTION_DECLARATION: u16 = BASE + 73;
    pub const CLASS_DECLARATION: u16 = BASE + 74;

    // Modules
    pub const IMPORT_DECLARATION: u16 = BASE + 80;
    pub const IMPORT_DEFAULT_SPECIFIER: u16 = BASE + 81;
    pub const NAMESPACE_IMPORT: u16 = BASE + 82;
    pub const IMPORT_SPECIFIER: u16 = BASE + 83;
    pub const IMPORT_ATTRIBUTES: u16 = BASE + 84;
    pub const EXPORT_DECLARATION: u16 = BASE + 85;
    pub const EXPORT_SPECIFIER: u16 = BASE + 86;
    pub const NAMESPACE_EXPORT: u16 = BASE + 87;
    pub const EXPORT_ASSIGNMENT: u16 = BASE + 88;

    pub const SOURCE_FILE: u16 = BASE + 100;

    #[inline]
    pub fn is_function_like(kind: u16) -> bool {
        matches!(
            kind,
            FUNCTION_DECLARATION
                | FUNCTION_EXPRESSION
                | ARROW_FUNCTION
                | METHOD_DECLARATION
                | GET_ACCESSOR
                | SET_ACCESSOR
                | CONSTRUCTOR
        )
    }

    #[inline]
    pub fn is_class_like(kind: u16) -> bool {
        kind == CLASS_DECLARATION || kind == CLASS_EXPRESSION
    }

    #[inline]
    pub fn is_binding_pattern(kind: u16) -> bool {
        kind == OBJECT_BINDING_PATTERN || kind == ARRAY_BINDING_PATTERN
    }

    #[inline]
    pub fn is_import_specifier_like(kind: u16) -> bool {
        matches!(kind, IMPORT_DEFAULT_SPECIFIER | NAMESPACE_IMPORT | IMPORT_SPECIFIER)
    }
}

/// Bit flags stored on each `Node`.
pub mod node_flags {
    pub const NONE: u16 = 0;
    /// Variable declaration list declared with `let`.
    pub const LET: u16 = 1 << 0;
    /// Variable declaration list declared with `const`.
    pub const CONST: u16 = 1 << 1;
    /// Declaration carries the `export` modifier.
    pub const EXPORT: u16 = 1 << 2;
    /// Declaration carries `export default`.
    pub const DEFAULT: u16 = 1 << 3;
    /// Class member carries the `static` modifier.
    pub const STATIC: u16 = 1 << 4;
    /// Function-like node is `async`.
    pub const ASYNC: u16 = 1 << 5;
    /// Function-like node is a generator, or `yield*` delegation.
    pub const GENERATOR: u16 = 1 << 6;
    /// Member access or call reached through `?.`.
    pub const OPTIONAL_CHAIN: u16 = 1 << 7;
    /// Object or array literal reinterpreted as a destructuring assignment target.
    pub const ASSIGNMENT_PATTERN: u16 = 1 << 8;
    /// Node was created after parsing and has no source text.
    pub const SYNTHESIZED: u16 = 1 << 9;
    /// Parsed node whose children were changed after parsing.
    pub const MODIFIED: u16 = 1 << 10;
    /// Parser recovered from an error inside this node.
    pub const HAS_ERROR: u16 = 1 << 11;

    pub const BLOCK_SCOPED: u16 = LET | CONST;
}
