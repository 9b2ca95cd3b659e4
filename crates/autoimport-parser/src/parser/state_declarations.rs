//! Parser state - functions, classes, binding patterns and module declarations.

use super::state::{
    CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR, CONTEXT_FLAG_IN_CLASS,
    ParserState,
};
use crate::parser::{
    NodeIndex, NodeList,
    flags::{node_flags, syntax_kind_ext},
    node::{
        BindingElementData, BindingPatternData, BlockData, ClassData, ExportDeclData,
        ExprWrapperData, FunctionData, ImportDeclData, ParameterData, PropertyDeclData,
        SpecifierData,
    },
};
use autoimport_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use autoimport_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Functions
    // =========================================================================

    /// `[async] function [*] name(...) { ... }`. The name may be omitted only
    /// under `export default`.
    pub(crate) fn parse_function_declaration(&mut self, start: u32, flags: u16) -> NodeIndex {
        let mut flags = flags;
        if self.parse_optional(SyntaxKind::AsyncKeyword) {
            flags |= node_flags::ASYNC;
        }
        self.parse_expected(SyntaxKind::FunctionKeyword);
        if self.parse_optional(SyntaxKind::AsteriskToken) {
            flags |= node_flags::GENERATOR;
        }
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else if flags & node_flags::DEFAULT != 0 {
            NodeIndex::NONE
        } else {
            self.error_identifier_expected();
            NodeIndex::NONE
        };
        self.parse_method_rest(start, syntax_kind_ext::FUNCTION_DECLARATION, flags, None, name)
    }

    pub(crate) fn parse_function_expression(&mut self, start: u32) -> NodeIndex {
        let mut flags = node_flags::NONE;
        if self.parse_optional(SyntaxKind::AsyncKeyword) {
            flags |= node_flags::ASYNC;
        }
        self.parse_expected(SyntaxKind::FunctionKeyword);
        if self.parse_optional(SyntaxKind::AsteriskToken) {
            flags |= node_flags::GENERATOR;
        }
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        self.parse_method_rest(start, syntax_kind_ext::FUNCTION_EXPRESSION, flags, None, name)
    }

    /// Parameters and body of any function-like node. The body is parsed in
    /// the async/generator context selected by `flags`.
    pub(crate) fn parse_method_rest(
        &mut self,
        start: u32,
        kind: u16,
        flags: u16,
        decorators: Option<NodeList>,
        name: NodeIndex,
    ) -> NodeIndex {
        let mut context = 0;
        if flags & node_flags::ASYNC != 0 {
            context |= CONTEXT_FLAG_ASYNC;
        }
        if flags & node_flags::GENERATOR != 0 {
            context |= CONTEXT_FLAG_GENERATOR;
        }
        let cleared =
            (CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR | CONTEXT_FLAG_DISALLOW_IN) & !context;

        let (parameters, body) = self.with_context(context, cleared, |p| {
            let parameters = p.parse_parameter_list();
            let body = if p.is_token(SyntaxKind::OpenBraceToken) {
                p.parse_block()
            } else {
                p.parse_expected(SyntaxKind::OpenBraceToken);
                NodeIndex::NONE
            };
            (parameters, body)
        });

        let end = self.node_end();
        let index = self.arena.add_function(
            kind,
            start,
            end,
            FunctionData {
                decorators,
                name,
                parameters,
                body,
            },
        );
        self.arena.set_flags(index, flags);
        index
    }

    pub(crate) fn parse_parameter_list(&mut self) -> NodeList {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let mut parameters = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let decorators = self.parse_decorators();
            let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            let initializer = self.parse_binding_initializer();
            let end = self.node_end();
            parameters.push(self.arena.add_parameter(
                syntax_kind_ext::PARAMETER,
                start,
                end,
                ParameterData {
                    decorators,
                    dot_dot_dot_token,
                    name,
                    initializer,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        NodeList::with_nodes(parameters)
    }

    // =========================================================================
    // Binding patterns
    // =========================================================================

    /// Identifier, `{...}` or `[...]` in a declaration position.
    pub(crate) fn parse_binding_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            _ => self.parse_identifier(),
        }
    }

    fn parse_binding_initializer(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::EqualsToken) {
            self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_assignment_expression())
        } else {
            NodeIndex::NONE
        }
    }

    fn parse_object_binding_pattern(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let element_start = self.token_pos();
            let data = if self.parse_optional(SyntaxKind::DotDotDotToken) {
                BindingElementData {
                    dot_dot_dot_token: true,
                    property_name: NodeIndex::NONE,
                    name: self.parse_identifier(),
                    initializer: NodeIndex::NONE,
                }
            } else {
                let is_shorthand_candidate = self.is_identifier();
                let key = self.parse_property_name();
                let (property_name, name) = if self.parse_optional(SyntaxKind::ColonToken) {
                    (key, self.parse_binding_name())
                } else {
                    if !is_shorthand_candidate {
                        self.parse_expected(SyntaxKind::ColonToken);
                    }
                    (NodeIndex::NONE, key)
                };
                BindingElementData {
                    dot_dot_dot_token: false,
                    property_name,
                    name,
                    initializer: self.parse_binding_initializer(),
                }
            };
            let element_end = self.node_end();
            elements.push(self.arena.add_binding_element(
                syntax_kind_ext::BINDING_ELEMENT,
                element_start,
                element_end,
                data,
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end = self.node_end();
        self.arena.add_binding_pattern(
            syntax_kind_ext::OBJECT_BINDING_PATTERN,
            start,
            end,
            BindingPatternData {
                elements: NodeList::with_nodes(elements),
            },
        )
    }

    fn parse_array_binding_pattern(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.is_token(SyntaxKind::CommaToken) {
                let pos = self.token_pos();
                elements.push(
                    self.arena
                        .add_token(syntax_kind_ext::OMITTED_EXPRESSION, pos, pos),
                );
                self.next_token();
                continue;
            }
            let element_start = self.token_pos();
            let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            let initializer = self.parse_binding_initializer();
            let element_end = self.node_end();
            elements.push(self.arena.add_binding_element(
                syntax_kind_ext::BINDING_ELEMENT,
                element_start,
                element_end,
                BindingElementData {
                    dot_dot_dot_token,
                    property_name: NodeIndex::NONE,
                    name,
                    initializer,
                },
            ));
            if !self.is_token(SyntaxKind::CloseBracketToken)
                && !self.parse_expected(SyntaxKind::CommaToken)
            {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let end = self.node_end();
        self.arena.add_binding_pattern(
            syntax_kind_ext::ARRAY_BINDING_PATTERN,
            start,
            end,
            BindingPatternData {
                elements: NodeList::with_nodes(elements),
            },
        )
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub(crate) fn parse_decorators(&mut self) -> Option<NodeList> {
        if !self.is_token(SyntaxKind::AtToken) {
            return None;
        }
        let mut decorators = Vec::new();
        while self.is_token(SyntaxKind::AtToken) {
            let start = self.token_pos();
            self.next_token();
            let expression = self.parse_left_hand_side_expression();
            let end = self.node_end();
            decorators.push(self.arena.add_wrapped_expr(
                syntax_kind_ext::DECORATOR,
                start,
                end,
                ExprWrapperData { expression },
            ));
        }
        Some(NodeList::with_nodes(decorators))
    }

    /// Class declaration, optionally preceded by decorators and, after
    /// decorators, by `export [default]`.
    pub(crate) fn parse_class_declaration(&mut self, start: u32, flags: u16) -> NodeIndex {
        let decorators = self.parse_decorators();
        let mut flags = flags;
        if decorators.is_some() && self.parse_optional(SyntaxKind::ExportKeyword) {
            flags |= node_flags::EXPORT;
            if self.parse_optional(SyntaxKind::DefaultKeyword) {
                flags |= node_flags::DEFAULT;
            }
        }
        let name_required = flags & node_flags::DEFAULT == 0;
        self.parse_class_rest(
            start,
            syntax_kind_ext::CLASS_DECLARATION,
            flags,
            decorators,
            name_required,
        )
    }

    pub(crate) fn parse_class_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let decorators = self.parse_decorators();
        self.parse_class_rest(
            start,
            syntax_kind_ext::CLASS_EXPRESSION,
            node_flags::NONE,
            decorators,
            false,
        )
    }

    fn parse_class_rest(
        &mut self,
        start: u32,
        kind: u16,
        flags: u16,
        decorators: Option<NodeList>,
        name_required: bool,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::ClassKeyword);
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            if name_required {
                self.error_identifier_expected();
            }
            NodeIndex::NONE
        };
        let heritage = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            self.parse_left_hand_side_expression()
        } else {
            NodeIndex::NONE
        };

        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut members = Vec::new();
        self.with_context(CONTEXT_FLAG_IN_CLASS, 0, |p| {
            while !p.is_token(SyntaxKind::CloseBraceToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                if p.parse_optional(SyntaxKind::SemicolonToken) {
                    continue;
                }
                let pos_before = p.token_pos();
                let member = p.parse_class_member();
                if member.is_some() {
                    members.push(member);
                }
                if p.token_pos() == pos_before {
                    p.parse_error_at_current_token(
                        diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                        diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                    );
                    p.next_token();
                }
            }
        });
        self.parse_expected(SyntaxKind::CloseBraceToken);

        let end = self.node_end();
        let index = self.arena.add_class(
            kind,
            start,
            end,
            ClassData {
                decorators,
                name,
                heritage,
                members: NodeList::with_nodes(members),
            },
        );
        self.arena.set_flags(index, flags);
        index
    }

    fn parse_class_member(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let decorators = self.parse_decorators();

        let mut flags = node_flags::NONE;
        if self.is_token(SyntaxKind::StaticKeyword) {
            if self.peek_token() == SyntaxKind::OpenBraceToken {
                return self.parse_class_static_block(start);
            }
            if self.look_ahead_is_member_modifier() {
                self.next_token();
                flags |= node_flags::STATIC;
            }
        }
        if self.is_token(SyntaxKind::AsyncKeyword) && self.look_ahead_is_member_modifier() {
            self.next_token();
            flags |= node_flags::ASYNC;
        }
        if self.parse_optional(SyntaxKind::AsteriskToken) {
            flags |= node_flags::GENERATOR;
        }
        let is_plain = flags & (node_flags::ASYNC | node_flags::GENERATOR) == 0;
        let accessor_kind = match self.token() {
            SyntaxKind::GetKeyword if is_plain && self.look_ahead_is_member_modifier() => {
                Some(syntax_kind_ext::GET_ACCESSOR)
            }
            SyntaxKind::SetKeyword if is_plain && self.look_ahead_is_member_modifier() => {
                Some(syntax_kind_ext::SET_ACCESSOR)
            }
            _ => None,
        };
        if accessor_kind.is_some() {
            self.next_token();
        }

        let is_constructor = flags & node_flags::STATIC == 0
            && accessor_kind.is_none()
            && self.is_token(SyntaxKind::Identifier)
            && self.scanner.token_value() == "constructor";
        let name = self.parse_property_name();

        if let Some(kind) = accessor_kind {
            return self.parse_method_rest(start, kind, flags, decorators, name);
        }
        if self.is_token(SyntaxKind::OpenParenToken) || !is_plain {
            let kind = if is_constructor {
                syntax_kind_ext::CONSTRUCTOR
            } else {
                syntax_kind_ext::METHOD_DECLARATION
            };
            return self.parse_method_rest(start, kind, flags, decorators, name);
        }

        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.with_context(
                0,
                CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR | CONTEXT_FLAG_DISALLOW_IN,
                |p| p.parse_assignment_expression(),
            )
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        let end = self.node_end();
        let index = self.arena.add_property_decl(
            syntax_kind_ext::PROPERTY_DECLARATION,
            start,
            end,
            PropertyDeclData {
                decorators,
                name,
                initializer,
            },
        );
        self.arena.set_flags(index, flags);
        index
    }

    fn parse_class_static_block(&mut self, start: u32) -> NodeIndex {
        self.next_token();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.with_context(
            0,
            CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR | CONTEXT_FLAG_DISALLOW_IN,
            |p| p.parse_statements_until_close_brace(),
        );
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end = self.node_end();
        let index = self.arena.add_block(
            syntax_kind_ext::CLASS_STATIC_BLOCK_DECLARATION,
            start,
            end,
            BlockData { statements },
        );
        self.arena.set_flags(index, node_flags::STATIC);
        index
    }

    // =========================================================================
    // Imports and exports
    // =========================================================================

    /// `import d, * as ns from "m"`, `import { a as b } from "m"`, `import "m"`.
    pub(crate) fn parse_import_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();

        let mut specifiers = Vec::new();
        if !self.is_token(SyntaxKind::StringLiteral) {
            let mut needs_bindings = true;
            if self.is_identifier() {
                let spec_start = self.token_pos();
                let name = self.parse_identifier();
                let spec_end = self.node_end();
                specifiers.push(self.arena.add_specifier(
                    syntax_kind_ext::IMPORT_DEFAULT_SPECIFIER,
                    spec_start,
                    spec_end,
                    SpecifierData {
                        property_name: NodeIndex::NONE,
                        name,
                    },
                ));
                needs_bindings = self.parse_optional(SyntaxKind::CommaToken);
            }
            if needs_bindings {
                if self.is_token(SyntaxKind::AsteriskToken) {
                    specifiers.push(self.parse_namespace_import());
                } else if self.is_token(SyntaxKind::OpenBraceToken) {
                    specifiers.extend(self.parse_named_imports());
                } else {
                    self.parse_expected(SyntaxKind::OpenBraceToken);
                }
            }
            self.parse_expected(SyntaxKind::FromKeyword);
        }

        let module_specifier = self.parse_string_literal();
        let attributes = self.parse_import_attributes();
        self.parse_semicolon();
        let end = self.node_end();
        self.arena.add_import_decl(
            syntax_kind_ext::IMPORT_DECLARATION,
            start,
            end,
            ImportDeclData {
                specifiers: NodeList::with_nodes(specifiers),
                module_specifier,
                attributes,
            },
        )
    }

    fn parse_namespace_import(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::AsKeyword);
        let name = self.parse_identifier();
        let end = self.node_end();
        self.arena.add_specifier(
            syntax_kind_ext::NAMESPACE_IMPORT,
            start,
            end,
            SpecifierData {
                property_name: NodeIndex::NONE,
                name,
            },
        )
    }

    fn parse_named_imports(&mut self) -> Vec<NodeIndex> {
        self.next_token();
        let mut specifiers = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let imported = self.parse_module_export_name();
            let (property_name, name) = if self.parse_optional(SyntaxKind::AsKeyword) {
                (imported, self.parse_identifier())
            } else {
                (NodeIndex::NONE, imported)
            };
            let end = self.node_end();
            specifiers.push(self.arena.add_specifier(
                syntax_kind_ext::IMPORT_SPECIFIER,
                start,
                end,
                SpecifierData {
                    property_name,
                    name,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        specifiers
    }

    /// `with { type: "json" }` (or the older `assert { ... }`).
    fn parse_import_attributes(&mut self) -> NodeIndex {
        let is_attributes = self.is_token(SyntaxKind::WithKeyword)
            || (self.is_token(SyntaxKind::AssertKeyword) && !self.has_preceding_line_break());
        if !is_attributes || !self.look_ahead(|p| p.next_token() == SyntaxKind::OpenBraceToken) {
            return NodeIndex::NONE;
        }
        let start = self.token_pos();
        self.next_token();
        let expression = self.parse_object_literal();
        let end = self.node_end();
        self.arena.add_wrapped_expr(
            syntax_kind_ext::IMPORT_ATTRIBUTES,
            start,
            end,
            ExprWrapperData { expression },
        )
    }

    pub(crate) fn parse_export_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();

        match self.token() {
            SyntaxKind::DefaultKeyword => {
                self.next_token();
                let flags = node_flags::EXPORT | node_flags::DEFAULT;
                if self.is_token(SyntaxKind::FunctionKeyword)
                    || (self.is_token(SyntaxKind::AsyncKeyword)
                        && self.look_ahead_is_async_function())
                {
                    return self.parse_function_declaration(start, flags);
                }
                if self.is_token(SyntaxKind::ClassKeyword) || self.is_token(SyntaxKind::AtToken) {
                    return self.parse_class_declaration(start, flags);
                }
                let expression = self.parse_assignment_expression();
                self.parse_semicolon();
                let end = self.node_end();
                self.arena.add_wrapped_expr(
                    syntax_kind_ext::EXPORT_ASSIGNMENT,
                    start,
                    end,
                    ExprWrapperData { expression },
                )
            }
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword | SyntaxKind::LetKeyword => {
                self.parse_variable_statement(start, node_flags::EXPORT)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(start, node_flags::EXPORT),
            SyntaxKind::AsyncKeyword if self.look_ahead_is_async_function() => {
                self.parse_function_declaration(start, node_flags::EXPORT)
            }
            SyntaxKind::ClassKeyword | SyntaxKind::AtToken => {
                self.parse_class_declaration(start, node_flags::EXPORT)
            }
            SyntaxKind::AsteriskToken => {
                let star_start = self.token_pos();
                self.next_token();
                let namespace_export = if self.parse_optional(SyntaxKind::AsKeyword) {
                    let name = self.parse_module_export_name();
                    let ns_end = self.node_end();
                    self.arena.add_specifier(
                        syntax_kind_ext::NAMESPACE_EXPORT,
                        star_start,
                        ns_end,
                        SpecifierData {
                            property_name: NodeIndex::NONE,
                            name,
                        },
                    )
                } else {
                    NodeIndex::NONE
                };
                self.parse_expected(SyntaxKind::FromKeyword);
                self.finish_export_declaration(start, None, namespace_export, true)
            }
            SyntaxKind::OpenBraceToken => {
                let clause = self.parse_named_exports();
                let has_from = self.parse_optional(SyntaxKind::FromKeyword);
                self.finish_export_declaration(start, Some(clause), NodeIndex::NONE, has_from)
            }
            _ => {
                self.parse_error_at_current_token(
                    diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                NodeIndex::NONE
            }
        }
    }

    fn parse_named_exports(&mut self) -> NodeList {
        self.next_token();
        let mut specifiers = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let local = self.parse_module_export_name();
            let (property_name, name) = if self.parse_optional(SyntaxKind::AsKeyword) {
                (local, self.parse_module_export_name())
            } else {
                (NodeIndex::NONE, local)
            };
            let end = self.node_end();
            specifiers.push(self.arena.add_specifier(
                syntax_kind_ext::EXPORT_SPECIFIER,
                start,
                end,
                SpecifierData {
                    property_name,
                    name,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        NodeList::with_nodes(specifiers)
    }

    fn finish_export_declaration(
        &mut self,
        start: u32,
        export_clause: Option<NodeList>,
        namespace_export: NodeIndex,
        has_from: bool,
    ) -> NodeIndex {
        let (module_specifier, attributes) = if has_from {
            let module_specifier = self.parse_string_literal();
            (module_specifier, self.parse_import_attributes())
        } else {
            (NodeIndex::NONE, NodeIndex::NONE)
        };
        self.parse_semicolon();
        let end = self.node_end();
        self.arena.add_export_decl(
            syntax_kind_ext::EXPORT_DECLARATION,
            start,
            end,
            ExportDeclData {
                export_clause,
                namespace_export,
                module_specifier,
                attributes,
            },
        )
    }
}
