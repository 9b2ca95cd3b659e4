//! Thin node headers plus typed data pools.
//!
//! Every node is a small `Node` header (kind, flags, span, data index). The
//! payload of composite nodes lives in a per-category `Vec` on `NodeArena`,
//! addressed by `data_index`. Parent links live in `extended_info`, indexed
//! by node index, and are filled in as parents are created bottom-up.

use super::base::{NodeIndex, NodeList};
use serde::Serialize;
use std::sync::Arc;

/// A node header.
#[repr(C)]
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Node {
    /// `SyntaxKind` value for tokens, `syntax_kind_ext` value otherwise.
    pub kind: u16,
    /// `node_flags` bits.
    pub flags: u16,
    /// Start offset in the source text (byte index).
    pub pos: u32,
    /// End offset in the source text (byte index, exclusive).
    pub end: u32,
    /// Index into the pool selected by `kind` (`u32::MAX` = no data).
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub fn new(kind: u16, pos: u32, end: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    pub fn with_data(kind: u16, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }

    #[inline]
    pub fn has_flag(&self, flag: u16) -> bool {
        self.flags & flag != 0
    }
}

/// Per-node information kept out of the header.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
}

impl Default for ExtendedNodeInfo {
    fn default() -> Self {
        ExtendedNodeInfo {
            parent: NodeIndex::NONE,
        }
    }
}

/// Enumerates the direct children stored in a data record, in source order.
pub trait ChildNodes {
    fn for_each_child(&self, f: &mut dyn FnMut(NodeIndex));
}

macro_rules! child_nodes {
    (@visit $value:expr, node, $f:ident) => {
        if $value.is_some() {
            $f($value);
        }
    };
    (@visit $value:expr, list, $f:ident) => {
        for child in $value.iter() {
            $f(child);
        }
    };
    (@visit $value:expr, opt_list, $f:ident) => {
        if let Some(list) = &$value {
            for child in list.iter() {
                $f(child);
            }
        }
    };
    ($data:ty { $($field:ident : $shape:tt),* $(,)? }) => {
        impl ChildNodes for $data {
            fn for_each_child(&self, f: &mut dyn FnMut(NodeIndex)) {
                $( child_nodes!(@visit self.$field, $shape, f); )*
            }
        }
    };
}

// =============================================================================
// Names and literals
// =============================================================================

/// Identifier or private identifier (`#name`). `escaped_text` has escapes resolved.
#[derive(Clone, Debug, Serialize)]
pub struct IdentifierData {
    pub escaped_text: String,
}

/// String, numeric, bigint, regex and template literal parts.
///
/// `text` is the cooked value for strings and template parts and the raw
/// token text for everything else.
#[derive(Clone, Debug, Serialize)]
pub struct LiteralData {
    pub text: String,
}

/// Single-expression wrappers: computed property names, parenthesized
/// expressions, spreads, decorators, expression/return/throw statements,
/// `export default <expr>` and import attribute clauses.
#[derive(Clone, Debug, Serialize)]
pub struct ExprWrapperData {
    pub expression: NodeIndex,
}
child_nodes!(ExprWrapperData { expression: node });

// =============================================================================
// Expressions
// =============================================================================

/// Binary expression, including assignments and the comma operator.
#[derive(Clone, Debug, Serialize)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: u16,
    pub right: NodeIndex,
}
child_nodes!(BinaryExprData { left: node, right: node });

/// Prefix/postfix unary, `await` and `yield` expressions.
#[derive(Clone, Debug, Serialize)]
pub struct UnaryExprData {
    pub operator: u16,
    /// May be NONE for a bare `yield`.
    pub operand: NodeIndex,
}
child_nodes!(UnaryExprData { operand: node });

/// Call or `new` expression.
#[derive(Clone, Debug, Serialize)]
pub struct CallExprData {
    pub expression: NodeIndex,
    /// `None` for `new X` without an argument list.
    pub arguments: Option<NodeList>,
}
child_nodes!(CallExprData { expression: node, arguments: opt_list });

/// Property access (`a.b`, `a?.b`, `a.#b`) or element access (`a[b]`).
#[derive(Clone, Debug, Serialize)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
    pub question_dot_token: bool,
}
child_nodes!(AccessExprData { expression: node, name_or_argument: node });

#[derive(Clone, Debug, Serialize)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}
child_nodes!(ConditionalExprData { condition: node, when_true: node, when_false: node });

/// Array or object literal.
#[derive(Clone, Debug, Serialize)]
pub struct LiteralExprData {
    pub elements: NodeList,
    pub multi_line: bool,
}
child_nodes!(LiteralExprData { elements: list });

#[derive(Clone, Debug, Serialize)]
pub struct TemplateExprData {
    pub head: NodeIndex,
    pub template_spans: NodeList,
}
child_nodes!(TemplateExprData { head: node, template_spans: list });

#[derive(Clone, Debug, Serialize)]
pub struct TemplateSpanData {
    pub expression: NodeIndex,
    pub literal: NodeIndex,
}
child_nodes!(TemplateSpanData { expression: node, literal: node });

#[derive(Clone, Debug, Serialize)]
pub struct TaggedTemplateData {
    pub tag: NodeIndex,
    pub template: NodeIndex,
}
child_nodes!(TaggedTemplateData { tag: node, template: node });

/// `new.target` / `import.meta`.
#[derive(Clone, Debug, Serialize)]
pub struct MetaPropertyData {
    pub keyword_token: u16,
    pub name: NodeIndex,
}
child_nodes!(MetaPropertyData { name: node });

// =============================================================================
// Functions and classes
// =============================================================================

/// Function declarations and expressions, arrows, methods, accessors and
/// constructors. For members `name` is the property name; async/generator
/// and `static` live in the node flags.
#[derive(Clone, Debug, Serialize)]
pub struct FunctionData {
    pub decorators: Option<NodeList>,
    pub name: NodeIndex,
    pub parameters: NodeList,
    /// A `Block`, or an expression for concise arrow bodies.
    pub body: NodeIndex,
}
child_nodes!(FunctionData { decorators: opt_list, name: node, parameters: list, body: node });

#[derive(Clone, Debug, Serialize)]
pub struct ClassData {
    pub decorators: Option<NodeList>,
    pub name: NodeIndex,
    /// The `extends` expression.
    pub heritage: NodeIndex,
    pub members: NodeList,
}
child_nodes!(ClassData { decorators: opt_list, name: node, heritage: node, members: list });

/// Class field.
#[derive(Clone, Debug, Serialize)]
pub struct PropertyDeclData {
    pub decorators: Option<NodeList>,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}
child_nodes!(PropertyDeclData { decorators: opt_list, name: node, initializer: node });

#[derive(Clone, Debug, Serialize)]
pub struct ParameterData {
    pub decorators: Option<NodeList>,
    pub dot_dot_dot_token: bool,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}
child_nodes!(ParameterData { decorators: opt_list, name: node, initializer: node });

// =============================================================================
// Bindings and object members
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct BindingPatternData {
    pub elements: NodeList,
}
child_nodes!(BindingPatternData { elements: list });

/// Element of a binding pattern. `property_name` is NONE for shorthand
/// (`{a}`) and array elements.
#[derive(Clone, Debug, Serialize)]
pub struct BindingElementData {
    pub dot_dot_dot_token: bool,
    pub property_name: NodeIndex,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}
child_nodes!(BindingElementData { property_name: node, name: node, initializer: node });

#[derive(Clone, Debug, Serialize)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}
child_nodes!(PropertyAssignmentData { name: node, initializer: node });

/// `{ a }`, or `{ a = 1 }` in an assignment pattern.
#[derive(Clone, Debug, Serialize)]
pub struct ShorthandPropertyData {
    pub name: NodeIndex,
    pub object_assignment_initializer: NodeIndex,
}
child_nodes!(ShorthandPropertyData { name: node, object_assignment_initializer: node });

// =============================================================================
// Statements
// =============================================================================

/// Block, class static block, case/default clause body.
#[derive(Clone, Debug, Serialize)]
pub struct BlockData {
    pub statements: NodeList,
}
child_nodes!(BlockData { statements: list });

/// Variable statement (one declaration list) or declaration list (declarations).
#[derive(Clone, Debug, Serialize)]
pub struct VariableData {
    pub declarations: NodeList,
}
child_nodes!(VariableData { declarations: list });

#[derive(Clone, Debug, Serialize)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}
child_nodes!(VariableDeclarationData { name: node, initializer: node });

#[derive(Clone, Debug, Serialize)]
pub struct IfStatementData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}
child_nodes!(IfStatementData { expression: node, then_statement: node, else_statement: node });

/// `for (;;)`, `while` and `do`. Source order differs for `do`, where the
/// statement precedes the condition.
#[derive(Clone, Debug, Serialize)]
pub struct LoopData {
    pub initializer: NodeIndex,
    pub condition: NodeIndex,
    pub incrementor: NodeIndex,
    pub statement: NodeIndex,
}
child_nodes!(LoopData { initializer: node, condition: node, incrementor: node, statement: node });

#[derive(Clone, Debug, Serialize)]
pub struct ForInOfData {
    pub await_modifier: bool,
    pub initializer: NodeIndex,
    pub expression: NodeIndex,
    pub statement: NodeIndex,
}
child_nodes!(ForInOfData { initializer: node, expression: node, statement: node });

/// `break` / `continue`.
#[derive(Clone, Debug, Serialize)]
pub struct JumpData {
    pub label: NodeIndex,
}
child_nodes!(JumpData { label: node });

#[derive(Clone, Debug, Serialize)]
pub struct LabeledData {
    pub label: NodeIndex,
    pub statement: NodeIndex,
}
child_nodes!(LabeledData { label: node, statement: node });

#[derive(Clone, Debug, Serialize)]
pub struct SwitchData {
    pub expression: NodeIndex,
    pub clauses: NodeList,
}
child_nodes!(SwitchData { expression: node, clauses: list });

/// `case x:` / `default:` clause. `expression` is NONE for `default`.
#[derive(Clone, Debug, Serialize)]
pub struct CaseClauseData {
    pub expression: NodeIndex,
    pub statements: NodeList,
}
child_nodes!(CaseClauseData { expression: node, statements: list });

#[derive(Clone, Debug, Serialize)]
pub struct TryData {
    pub try_block: NodeIndex,
    pub catch_clause: NodeIndex,
    pub finally_block: NodeIndex,
}
child_nodes!(TryData { try_block: node, catch_clause: node, finally_block: node });

#[derive(Clone, Debug, Serialize)]
pub struct CatchClauseData {
    /// Binding name, or NONE for `catch {`.
    pub variable_declaration: NodeIndex,
    pub block: NodeIndex,
}
child_nodes!(CatchClauseData { variable_declaration: node, block: node });

// =============================================================================
// Modules
// =============================================================================

/// `import ... from "m"` / `import "m"`. Specifiers are stored flat in
/// source order: default, then namespace or named.
#[derive(Clone, Debug, Serialize)]
pub struct ImportDeclData {
    pub specifiers: NodeList,
    pub module_specifier: NodeIndex,
    pub attributes: NodeIndex,
}
child_nodes!(ImportDeclData { specifiers: list, module_specifier: node, attributes: node });

/// Import/export specifier. `property_name` is the imported (import) or
/// local (export) name when it differs from `name`; NONE otherwise.
#[derive(Clone, Debug, Serialize)]
pub struct SpecifierData {
    pub property_name: NodeIndex,
    pub name: NodeIndex,
}
child_nodes!(SpecifierData { property_name: node, name: node });

/// `export { ... } [from "m"]`, `export * [as ns] from "m"`.
#[derive(Clone, Debug, Serialize)]
pub struct ExportDeclData {
    /// `None` for `export *`.
    pub export_clause: Option<NodeList>,
    /// `NamespaceExport` for `export * as ns`.
    pub namespace_export: NodeIndex,
    pub module_specifier: NodeIndex,
    pub attributes: NodeIndex,
}
child_nodes!(ExportDeclData {
    export_clause: opt_list,
    namespace_export: node,
    module_specifier: node,
    attributes: node,
});

#[derive(Clone, Debug, Serialize)]
pub struct SourceFileData {
    /// Directive prologue (`"use strict";` ...), kept apart from statements.
    pub directives: NodeList,
    pub statements: NodeList,
    pub end_of_file_token: NodeIndex,
    pub file_name: String,
    pub text: Arc<str>,
}
child_nodes!(SourceFileData { directives: list, statements: list, end_of_file_token: node });

// =============================================================================
// Arena
// =============================================================================

/// Storage for all nodes of one source file.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,

    // Names and literals
    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,
    pub wrapped_exprs: Vec<ExprWrapperData>,

    // Expressions
    pub binary_exprs: Vec<BinaryExprData>,
    pub unary_exprs: Vec<UnaryExprData>,
    pub call_exprs: Vec<CallExprData>,
    pub access_exprs: Vec<AccessExprData>,
    pub conditional_exprs: Vec<ConditionalExprData>,
    pub literal_exprs: Vec<LiteralExprData>,
    pub template_exprs: Vec<TemplateExprData>,
    pub template_spans: Vec<TemplateSpanData>,
    pub tagged_templates: Vec<TaggedTemplateData>,
    pub meta_properties: Vec<MetaPropertyData>,

    // Functions and classes
    pub functions: Vec<FunctionData>,
    pub classes: Vec<ClassData>,
    pub property_decls: Vec<PropertyDeclData>,
    pub parameters: Vec<ParameterData>,

    // Bindings and object members
    pub binding_patterns: Vec<BindingPatternData>,
    pub binding_elements: Vec<BindingElementData>,
    pub property_assignments: Vec<PropertyAssignmentData>,
    pub shorthand_properties: Vec<ShorthandPropertyData>,

    // Statements
    pub blocks: Vec<BlockData>,
    pub variables: Vec<VariableData>,
    pub variable_declarations: Vec<VariableDeclarationData>,
    pub if_statements: Vec<IfStatementData>,
    pub loops: Vec<LoopData>,
    pub for_in_of: Vec<ForInOfData>,
    pub jump_data: Vec<JumpData>,
    pub labeled_data: Vec<LabeledData>,
    pub switch_data: Vec<SwitchData>,
    pub case_clauses: Vec<CaseClauseData>,
    pub try_data: Vec<TryData>,
    pub catch_clauses: Vec<CatchClauseData>,

    // Modules
    pub import_decls: Vec<ImportDeclData>,
    pub specifiers: Vec<SpecifierData>,
    pub export_decls: Vec<ExportDeclData>,

    pub source_files: Vec<SourceFileData>,

    /// Parent links, indexed by node index.
    pub extended_info: Vec<ExtendedNodeInfo>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena sized for a source text of `text_len` bytes.
    pub fn with_capacity_for_text(text_len: usize) -> NodeArena {
        // Roughly one node per four bytes of source in typical modules.
        let capacity = (text_len / 4).min(autoimport_common::limits::MAX_NODE_PREALLOC);
        let mut arena = NodeArena::default();
        arena.nodes = Vec::with_capacity(capacity);
        arena.extended_info = Vec::with_capacity(capacity);
        arena.identifiers = Vec::with_capacity(capacity / 3);
        arena.access_exprs = Vec::with_capacity(capacity / 10);
        arena.call_exprs = Vec::with_capacity(capacity / 10);
        arena.source_files = Vec::with_capacity(1);
        arena
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
