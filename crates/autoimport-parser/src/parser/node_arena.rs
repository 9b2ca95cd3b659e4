//! Node creation and mutation for `NodeArena`.
//!
//! Nodes are created bottom-up: when a composite node is added, every child
//! it references already exists and gets its parent link set here.

use super::base::{NodeIndex, NodeList};
use super::flags::{node_flags, syntax_kind_ext};
use super::node::*;
use autoimport_scanner::SyntaxKind;

macro_rules! define_add_methods {
    ($($(#[$doc:meta])* $method:ident => $pool:ident : $data:ty;)+) => {
        impl NodeArena {
            $(
                $(#[$doc])*
                pub fn $method(&mut self, kind: u16, pos: u32, end: u32, data: $data) -> NodeIndex {
                    let data_index = self.$pool.len() as u32;
                    let index = self.push_node(Node::with_data(kind, pos, end, data_index));
                    data.for_each_child(&mut |child| self.set_parent(child, index));
                    self.$pool.push(data);
                    index
                }
            )+
        }
    };
}

define_add_methods! {
    /// Computed names, parenthesized/spread/decorator expressions and
    /// single-expression statements.
    add_wrapped_expr => wrapped_exprs: ExprWrapperData;
    add_binary_expr => binary_exprs: BinaryExprData;
    /// Prefix/postfix unary, `await` and `yield`.
    add_unary_expr => unary_exprs: UnaryExprData;
    add_call_expr => call_exprs: CallExprData;
    add_access_expr => access_exprs: AccessExprData;
    add_conditional_expr => conditional_exprs: ConditionalExprData;
    /// Array and object literals.
    add_literal_expr => literal_exprs: LiteralExprData;
    add_template_expr => template_exprs: TemplateExprData;
    add_template_span => template_spans: TemplateSpanData;
    add_tagged_template => tagged_templates: TaggedTemplateData;
    add_meta_property => meta_properties: MetaPropertyData;
    add_function => functions: FunctionData;
    add_class => classes: ClassData;
    add_property_decl => property_decls: PropertyDeclData;
    add_parameter => parameters: ParameterData;
    add_binding_pattern => binding_patterns: BindingPatternData;
    add_binding_element => binding_elements: BindingElementData;
    add_property_assignment => property_assignments: PropertyAssignmentData;
    add_shorthand_property => shorthand_properties: ShorthandPropertyData;
    add_block => blocks: BlockData;
    /// Variable statements and declaration lists.
    add_variable => variables: VariableData;
    add_variable_declaration => variable_declarations: VariableDeclarationData;
    add_if_statement => if_statements: IfStatementData;
    add_loop => loops: LoopData;
    add_for_in_of => for_in_of: ForInOfData;
    add_jump => jump_data: JumpData;
    add_labeled => labeled_data: LabeledData;
    add_switch => switch_data: SwitchData;
    add_case_clause => case_clauses: CaseClauseData;
    add_try => try_data: TryData;
    add_catch_clause => catch_clauses: CatchClauseData;
    add_import_decl => import_decls: ImportDeclData;
    /// Import and export specifiers, including default and namespace forms.
    add_specifier => specifiers: SpecifierData;
    add_export_decl => export_decls: ExportDeclData;
    add_source_file => source_files: SourceFileData;
}

impl NodeArena {
    #[inline]
    fn push_node(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        self.extended_info.push(ExtendedNodeInfo::default());
        NodeIndex(index)
    }

    /// Set the parent link of `child`. NONE children are ignored.
    #[inline]
    pub fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if child.is_none() {
            return;
        }
        if let Some(info) = self.extended_info.get_mut(child.0 as usize) {
            info.parent = parent;
        }
    }

    /// Add a token node (keywords such as `this`, omitted expressions, EOF).
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(Node::new(kind, pos, end))
    }

    pub fn add_identifier(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: IdentifierData,
    ) -> NodeIndex {
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_literal(&mut self, kind: u16, pos: u32, end: u32, data: LiteralData) -> NodeIndex {
        let data_index = self.literals.len() as u32;
        self.literals.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    #[inline]
    pub fn set_flags(&mut self, index: NodeIndex, flags: u16) {
        if let Some(node) = self.nodes.get_mut(index.0 as usize) {
            node.flags |= flags;
        }
    }

    // =========================================================================
    // Synthesized nodes
    // =========================================================================

    /// Create a synthesized identifier with no source position.
    pub fn create_identifier(&mut self, text: &str) -> NodeIndex {
        let index = self.add_identifier(
            SyntaxKind::Identifier as u16,
            0,
            0,
            IdentifierData {
                escaped_text: text.to_string(),
            },
        );
        self.set_flags(index, node_flags::SYNTHESIZED);
        index
    }

    pub fn create_string_literal(&mut self, text: &str) -> NodeIndex {
        let index = self.add_literal(
            SyntaxKind::StringLiteral as u16,
            0,
            0,
            LiteralData {
                text: text.to_string(),
            },
        );
        self.set_flags(index, node_flags::SYNTHESIZED);
        index
    }

    /// `local` as a default import specifier.
    pub fn create_import_default_specifier(&mut self, local: &str) -> NodeIndex {
        let name = self.create_identifier(local);
        self.create_specifier(syntax_kind_ext::IMPORT_DEFAULT_SPECIFIER, NodeIndex::NONE, name)
    }

    /// `* as local`.
    pub fn create_namespace_import(&mut self, local: &str) -> NodeIndex {
        let name = self.create_identifier(local);
        self.create_specifier(syntax_kind_ext::NAMESPACE_IMPORT, NodeIndex::NONE, name)
    }

    /// `imported as local`, or plain `local` when both names agree.
    pub fn create_import_specifier(&mut self, imported: &str, local: &str) -> NodeIndex {
        let property_name = if imported == local {
            NodeIndex::NONE
        } else {
            self.create_identifier(imported)
        };
        let name = self.create_identifier(local);
        self.create_specifier(syntax_kind_ext::IMPORT_SPECIFIER, property_name, name)
    }

    fn create_specifier(&mut self, kind: u16, property_name: NodeIndex, name: NodeIndex) -> NodeIndex {
        let index = self.add_specifier(kind, 0, 0, SpecifierData { property_name, name });
        self.set_flags(index, node_flags::SYNTHESIZED);
        index
    }

    /// Build `import <specifiers> from "<module_path>";`, or the side-effect
    /// form when `specifiers` is empty.
    pub fn create_import_declaration(
        &mut self,
        specifiers: Vec<NodeIndex>,
        module_path: &str,
    ) -> NodeIndex {
        let module_specifier = self.create_string_literal(module_path);
        let index = self.add_import_decl(
            syntax_kind_ext::IMPORT_DECLARATION,
            0,
            0,
            ImportDeclData {
                specifiers: NodeList::with_nodes(specifiers),
                module_specifier,
                attributes: NodeIndex::NONE,
            },
        );
        self.set_flags(index, node_flags::SYNTHESIZED);
        index
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Insert `specifier` into an existing import declaration, at the front
    /// (default specifiers) or at the back (everything else).
    pub fn add_specifier_to_import(
        &mut self,
        declaration: NodeIndex,
        specifier: NodeIndex,
        at_front: bool,
    ) -> bool {
        let Some(node) = self.nodes.get(declaration.0 as usize) else {
            return false;
        };
        if node.kind != syntax_kind_ext::IMPORT_DECLARATION || !node.has_data() {
            return false;
        }
        let data_index = node.data_index as usize;
        let Some(data) = self.import_decls.get_mut(data_index) else {
            return false;
        };
        if at_front {
            data.specifiers.nodes.insert(0, specifier);
        } else {
            data.specifiers.nodes.push(specifier);
        }
        self.set_parent(specifier, declaration);
        self.set_flags(declaration, node_flags::MODIFIED);
        true
    }

    /// Insert `statement` into the root statement list at `position`
    /// (clamped to the list length).
    pub fn insert_statement(
        &mut self,
        source_file: NodeIndex,
        position: usize,
        statement: NodeIndex,
    ) -> bool {
        let Some(node) = self.nodes.get(source_file.0 as usize) else {
            return false;
        };
        if node.kind != syntax_kind_ext::SOURCE_FILE || !node.has_data() {
            return false;
        }
        let data_index = node.data_index as usize;
        let Some(data) = self.source_files.get_mut(data_index) else {
            return false;
        };
        let position = position.min(data.statements.len());
        data.statements.nodes.insert(position, statement);
        self.set_parent(statement, source_file);
        true
    }
}
