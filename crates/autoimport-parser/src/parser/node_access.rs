//! Typed accessors and traversal helpers for `NodeArena`.

use super::base::NodeIndex;
use super::flags::syntax_kind_ext::*;
use super::node::*;
use autoimport_scanner::SyntaxKind;

macro_rules! define_get_methods {
    (
        leaves { $($leaf:ident => $leaf_pool:ident : $leaf_data:ty [$($leaf_kind:expr),+ $(,)?];)+ }
        composites { $($method:ident => $pool:ident : $data:ty [$($kind:expr),+ $(,)?];)+ }
    ) => {
        impl NodeArena {
            $(
                #[inline]
                pub fn $leaf(&self, node: &Node) -> Option<&$leaf_data> {
                    if node.has_data() && ($(node.kind == $leaf_kind)||+) {
                        self.$leaf_pool.get(node.data_index as usize)
                    } else {
                        None
                    }
                }
            )+
            $(
                #[inline]
                pub fn $method(&self, node: &Node) -> Option<&$data> {
                    if node.has_data() && ($(node.kind == $kind)||+) {
                        self.$pool.get(node.data_index as usize)
                    } else {
                        None
                    }
                }
            )+

            /// Visit the direct children of a composite node's data record.
            fn for_each_data_child(&self, node: &Node, f: &mut dyn FnMut(NodeIndex)) {
                $(
                    if let Some(data) = self.$method(node) {
                        data.for_each_child(f);
                        return;
                    }
                )+
            }
        }
    };
}

define_get_methods! {
    leaves {
        get_identifier => identifiers: IdentifierData [
            SyntaxKind::Identifier as u16,
            SyntaxKind::PrivateIdentifier as u16,
        ];
        get_literal => literals: LiteralData [
            SyntaxKind::StringLiteral as u16,
            SyntaxKind::NumericLiteral as u16,
            SyntaxKind::BigIntLiteral as u16,
            SyntaxKind::RegularExpressionLiteral as u16,
            SyntaxKind::NoSubstitutionTemplateLiteral as u16,
            SyntaxKind::TemplateHead as u16,
            SyntaxKind::TemplateMiddle as u16,
            SyntaxKind::TemplateTail as u16,
        ];
    }
    composites {
        get_wrapped_expr => wrapped_exprs: ExprWrapperData [
            COMPUTED_PROPERTY_NAME,
            PARENTHESIZED_EXPRESSION,
            SPREAD_ELEMENT,
            SPREAD_ASSIGNMENT,
            DECORATOR,
            EXPRESSION_STATEMENT,
            RETURN_STATEMENT,
            THROW_STATEMENT,
            EXPORT_ASSIGNMENT,
            IMPORT_ATTRIBUTES,
        ];
        get_binary_expr => binary_exprs: BinaryExprData [BINARY_EXPRESSION];
        get_unary_expr => unary_exprs: UnaryExprData [
            PREFIX_UNARY_EXPRESSION,
            POSTFIX_UNARY_EXPRESSION,
            AWAIT_EXPRESSION,
            YIELD_EXPRESSION,
        ];
        get_call_expr => call_exprs: CallExprData [CALL_EXPRESSION, NEW_EXPRESSION];
        get_access_expr => access_exprs: AccessExprData [
            PROPERTY_ACCESS_EXPRESSION,
            ELEMENT_ACCESS_EXPRESSION,
        ];
        get_conditional_expr => conditional_exprs: ConditionalExprData [CONDITIONAL_EXPRESSION];
        get_literal_expr => literal_exprs: LiteralExprData [
            ARRAY_LITERAL_EXPRESSION,
            OBJECT_LITERAL_EXPRESSION,
        ];
        get_template_expr => template_exprs: TemplateExprData [TEMPLATE_EXPRESSION];
        get_template_span => template_spans: TemplateSpanData [TEMPLATE_SPAN];
        get_tagged_template => tagged_templates: TaggedTemplateData [TAGGED_TEMPLATE_EXPRESSION];
        get_meta_property => meta_properties: MetaPropertyData [META_PROPERTY];
        get_function => functions: FunctionData [
            FUNCTION_DECLARATION,
            FUNCTION_EXPRESSION,
            ARROW_FUNCTION,
            METHOD_DECLARATION,
            GET_ACCESSOR,
            SET_ACCESSOR,
            CONSTRUCTOR,
        ];
        get_class => classes: ClassData [CLASS_DECLARATION, CLASS_EXPRESSION];
        get_property_decl => property_decls: PropertyDeclData [PROPERTY_DECLARATION];
        get_parameter => parameters: ParameterData [PARAMETER];
        get_binding_pattern => binding_patterns: BindingPatternData [
            OBJECT_BINDING_PATTERN,
            ARRAY_BINDING_PATTERN,
        ];
        get_binding_element => binding_elements: BindingElementData [BINDING_ELEMENT];
        get_property_assignment => property_assignments: PropertyAssignmentData [PROPERTY_ASSIGNMENT];
        get_shorthand_property => shorthand_properties: ShorthandPropertyData [
            SHORTHAND_PROPERTY_ASSIGNMENT,
        ];
        get_block => blocks: BlockData [BLOCK, CLASS_STATIC_BLOCK_DECLARATION];
        get_variable => variables: VariableData [VARIABLE_STATEMENT, VARIABLE_DECLARATION_LIST];
        get_variable_declaration => variable_declarations: VariableDeclarationData [
            VARIABLE_DECLARATION,
        ];
        get_if_statement => if_statements: IfStatementData [IF_STATEMENT];
        get_loop => loops: LoopData [FOR_STATEMENT, WHILE_STATEMENT, DO_STATEMENT];
        get_for_in_of => for_in_of: ForInOfData [FOR_IN_STATEMENT, FOR_OF_STATEMENT];
        get_jump => jump_data: JumpData [BREAK_STATEMENT, CONTINUE_STATEMENT];
        get_labeled => labeled_data: LabeledData [LABELED_STATEMENT];
        get_switch => switch_data: SwitchData [SWITCH_STATEMENT];
        get_case_clause => case_clauses: CaseClauseData [CASE_CLAUSE, DEFAULT_CLAUSE];
        get_try => try_data: TryData [TRY_STATEMENT];
        get_catch_clause => catch_clauses: CatchClauseData [CATCH_CLAUSE];
        get_import_decl => import_decls: ImportDeclData [IMPORT_DECLARATION];
        get_specifier => specifiers: SpecifierData [
            IMPORT_DEFAULT_SPECIFIER,
            NAMESPACE_IMPORT,
            IMPORT_SPECIFIER,
            EXPORT_SPECIFIER,
            NAMESPACE_EXPORT,
        ];
        get_export_decl => export_decls: ExportDeclData [EXPORT_DECLARATION];
        get_source_file => source_files: SourceFileData [SOURCE_FILE];
    }
}

impl NodeArena {
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            return None;
        }
        self.nodes.get(index.0 as usize)
    }

    #[inline]
    pub fn kind_of(&self, index: NodeIndex) -> Option<u16> {
        self.get(index).map(|node| node.kind)
    }

    #[inline]
    pub fn get_parent(&self, index: NodeIndex) -> NodeIndex {
        if index.is_none() {
            return NodeIndex::NONE;
        }
        self.extended_info
            .get(index.0 as usize)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    /// Visit the direct children of `index` in source order.
    pub fn for_each_child(&self, index: NodeIndex, f: &mut dyn FnMut(NodeIndex)) {
        let Some(node) = self.get(index) else {
            return;
        };
        if node.kind == DO_STATEMENT {
            if let Some(data) = self.get_loop(node) {
                for child in [data.statement, data.condition] {
                    if child.is_some() {
                        f(child);
                    }
                }
            }
            return;
        }
        self.for_each_data_child(node, f);
    }

    /// Collect the direct children of `index` in source order.
    pub fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut children = Vec::new();
        self.for_each_child(index, &mut |child| children.push(child));
        children
    }

    /// Text of an `Identifier` or `PrivateIdentifier` node.
    #[inline]
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node).map(|data| data.escaped_text.as_str())
    }

    /// Cooked value of a `StringLiteral` node.
    #[inline]
    pub fn string_literal_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        if node.kind != SyntaxKind::StringLiteral as u16 {
            return None;
        }
        self.get_literal(node).map(|data| data.text.as_str())
    }

    /// Identifier or string text of a module export name (`a` or `"a-b"`).
    pub fn module_export_name_text(&self, index: NodeIndex) -> Option<&str> {
        self.identifier_text(index)
            .or_else(|| self.string_literal_text(index))
    }

    /// Walk up through parenthesized expressions from `index`.
    pub fn skip_parenthesized_parents(&self, mut index: NodeIndex) -> NodeIndex {
        let mut iterations = 0usize;
        loop {
            let parent = self.get_parent(index);
            match self.kind_of(parent) {
                Some(PARENTHESIZED_EXPRESSION)
                    if iterations < autoimport_common::limits::MAX_PARENT_WALK_ITERATIONS =>
                {
                    index = parent;
                    iterations += 1;
                }
                _ => return index,
            }
        }
    }

    /// The root `SourceFile` node, which the parser creates last.
    pub fn source_file_index(&self) -> NodeIndex {
        self.nodes
            .iter()
            .rposition(|node| node.kind == SOURCE_FILE)
            .map_or(NodeIndex::NONE, |index| NodeIndex(index as u32))
    }
}
