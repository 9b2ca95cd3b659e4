//! Parser state - expression parsing methods.

use super::state::{
    CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR, ParserState,
};
use crate::parser::{
    NodeIndex, NodeList,
    flags::{node_flags, syntax_kind_ext},
    node::{
        AccessExprData, BinaryExprData, CallExprData, ConditionalExprData, ExprWrapperData,
        FunctionData, LiteralExprData, MetaPropertyData, ParameterData, PropertyAssignmentData,
        ShorthandPropertyData, TaggedTemplateData, TemplateExprData, TemplateSpanData,
        UnaryExprData,
    },
};
use autoimport_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use autoimport_scanner::{SyntaxKind, is_assignment_operator};

impl ParserState {
    // =========================================================================
    // Comma, assignment and conditional expressions
    // =========================================================================

    /// `Expression`: assignment expressions joined by the comma operator.
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut expression = self.parse_assignment_expression();
        while self.parse_optional(SyntaxKind::CommaToken) {
            let right = self.parse_assignment_expression();
            let end = self.node_end();
            expression = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start,
                end,
                BinaryExprData {
                    left: expression,
                    operator_token: SyntaxKind::CommaToken as u16,
                    right,
                },
            );
        }
        expression
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.create_missing_identifier();
        }
        let expression = self.parse_assignment_expression_worker();
        self.exit_recursion();
        expression
    }

    fn parse_assignment_expression_worker(&mut self) -> NodeIndex {
        let start = self.token_pos();

        if self.is_token(SyntaxKind::AsyncKeyword) && self.look_ahead_is_async_arrow_function() {
            return self.parse_arrow_function(start, true);
        }
        if self.is_token(SyntaxKind::OpenParenToken) && self.look_ahead_is_arrow_function() {
            return self.parse_arrow_function(start, false);
        }
        if self.is_identifier() && self.look_ahead_is_simple_arrow_function() {
            return self.parse_arrow_function(start, false);
        }
        if self.is_token(SyntaxKind::YieldKeyword) && self.in_context(CONTEXT_FLAG_GENERATOR) {
            return self.parse_yield_expression();
        }

        let left = self.parse_conditional_expression();
        let operator = self.token();
        if !is_assignment_operator(operator) {
            return left;
        }
        if operator == SyntaxKind::EqualsToken {
            self.mark_assignment_pattern(left);
        }
        self.next_token();
        let right = self.parse_assignment_expression();
        let end = self.node_end();
        self.arena.add_binary_expr(
            syntax_kind_ext::BINARY_EXPRESSION,
            start,
            end,
            BinaryExprData {
                left,
                operator_token: operator as u16,
                right,
            },
        )
    }

    fn parse_conditional_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let condition = self.parse_binary_expression(0);
        if !self.parse_optional(SyntaxKind::QuestionToken) {
            return condition;
        }
        let when_true = self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
            p.parse_assignment_expression()
        });
        self.parse_expected(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression();
        let end = self.node_end();
        self.arena.add_conditional_expr(
            syntax_kind_ext::CONDITIONAL_EXPRESSION,
            start,
            end,
            ConditionalExprData {
                condition,
                when_true,
                when_false,
            },
        )
    }

    /// Reinterpret an object/array literal on the left of `=` (or in a
    /// `for-in/of` head) as a destructuring target.
    pub(crate) fn mark_assignment_pattern(&mut self, index: NodeIndex) {
        let Some(node) = self.arena.get(index) else {
            return;
        };
        let kind = node.kind;
        if kind != syntax_kind_ext::ARRAY_LITERAL_EXPRESSION
            && kind != syntax_kind_ext::OBJECT_LITERAL_EXPRESSION
        {
            return;
        }
        let elements = match self.arena.get_literal_expr(node) {
            Some(data) => data.elements.nodes.clone(),
            None => return,
        };
        self.arena.set_flags(index, node_flags::ASSIGNMENT_PATTERN);

        for element in elements {
            let Some(element_node) = self.arena.get(element) else {
                continue;
            };
            let target = match element_node.kind {
                syntax_kind_ext::SPREAD_ELEMENT | syntax_kind_ext::SPREAD_ASSIGNMENT => self
                    .arena
                    .get_wrapped_expr(element_node)
                    .map_or(NodeIndex::NONE, |data| data.expression),
                syntax_kind_ext::PROPERTY_ASSIGNMENT => self
                    .arena
                    .get_property_assignment(element_node)
                    .map_or(NodeIndex::NONE, |data| data.initializer),
                _ => element,
            };
            let target = self.assignment_default_target(target);
            self.mark_assignment_pattern(target);
        }
    }

    /// `x = default` inside a pattern targets `x`.
    fn assignment_default_target(&self, index: NodeIndex) -> NodeIndex {
        self.arena
            .get(index)
            .and_then(|node| self.arena.get_binary_expr(node))
            .filter(|data| data.operator_token == SyntaxKind::EqualsToken as u16)
            .map_or(index, |data| data.left)
    }

    // =========================================================================
    // Binary and unary expressions
    // =========================================================================

    fn binary_operator_precedence(&self, kind: SyntaxKind) -> u8 {
        match kind {
            SyntaxKind::QuestionQuestionToken => 4,
            SyntaxKind::BarBarToken => 5,
            SyntaxKind::AmpersandAmpersandToken => 6,
            SyntaxKind::BarToken => 7,
            SyntaxKind::CaretToken => 8,
            SyntaxKind::AmpersandToken => 9,
            SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::EqualsEqualsEqualsToken
            | SyntaxKind::ExclamationEqualsEqualsToken => 10,
            SyntaxKind::InKeyword if self.in_context(CONTEXT_FLAG_DISALLOW_IN) => 0,
            SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanEqualsToken
            | SyntaxKind::InstanceOfKeyword
            | SyntaxKind::InKeyword => 11,
            SyntaxKind::LessThanLessThanToken
            | SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 12,
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => 13,
            SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 14,
            SyntaxKind::AsteriskAsteriskToken => 15,
            _ => 0,
        }
    }

    fn parse_binary_expression(&mut self, precedence: u8) -> NodeIndex {
        let start = self.token_pos();
        let left = self.parse_unary_expression();
        self.parse_binary_expression_rest(precedence, left, start)
    }

    fn parse_binary_expression_rest(
        &mut self,
        precedence: u8,
        mut left: NodeIndex,
        start: u32,
    ) -> NodeIndex {
        loop {
            let operator = self.token();
            let new_precedence = self.binary_operator_precedence(operator);
            // `**` is right-associative.
            let consume = if operator == SyntaxKind::AsteriskAsteriskToken {
                new_precedence >= precedence
            } else {
                new_precedence > precedence
            };
            if new_precedence == 0 || !consume {
                return left;
            }
            self.next_token();
            let right = self.parse_binary_expression(new_precedence);
            let end = self.node_end();
            left = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start,
                end,
                BinaryExprData {
                    left,
                    operator_token: operator as u16,
                    right,
                },
            );
        }
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let operator = self.token();
        let kind = match operator {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken => syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
            SyntaxKind::AwaitKeyword if self.in_context(CONTEXT_FLAG_ASYNC) => {
                syntax_kind_ext::AWAIT_EXPRESSION
            }
            _ => return self.parse_update_expression(),
        };

        if !self.enter_recursion() {
            return self.create_missing_identifier();
        }
        self.next_token();
        let operand = self.parse_unary_expression();
        self.exit_recursion();

        let end = self.node_end();
        self.arena.add_unary_expr(
            kind,
            start,
            end,
            UnaryExprData {
                operator: operator as u16,
                operand,
            },
        )
    }

    fn parse_update_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = self.parse_left_hand_side_expression();
        let operator = self.token();
        if (operator == SyntaxKind::PlusPlusToken || operator == SyntaxKind::MinusMinusToken)
            && !self.has_preceding_line_break()
        {
            self.next_token();
            let end = self.node_end();
            return self.arena.add_unary_expr(
                syntax_kind_ext::POSTFIX_UNARY_EXPRESSION,
                start,
                end,
                UnaryExprData {
                    operator: operator as u16,
                    operand: expression,
                },
            );
        }
        expression
    }

    fn parse_yield_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();

        let has_operand = !self.has_preceding_line_break()
            && !matches!(
                self.token(),
                SyntaxKind::CloseParenToken
                    | SyntaxKind::CloseBracketToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::ColonToken
                    | SyntaxKind::EndOfFileToken
            );
        let mut delegate = false;
        let operand = if has_operand {
            delegate = self.parse_optional(SyntaxKind::AsteriskToken);
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };

        let end = self.node_end();
        let index = self.arena.add_unary_expr(
            syntax_kind_ext::YIELD_EXPRESSION,
            start,
            end,
            UnaryExprData {
                operator: SyntaxKind::YieldKeyword as u16,
                operand,
            },
        );
        if delegate {
            self.arena.set_flags(index, node_flags::GENERATOR);
        }
        index
    }

    // =========================================================================
    // Left-hand-side expressions
    // =========================================================================

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = match self.token() {
            SyntaxKind::NewKeyword => self.parse_new_expression(),
            SyntaxKind::ImportKeyword => self.parse_import_expression_head(),
            SyntaxKind::SuperKeyword => {
                let end = self.token_end();
                self.next_token();
                self.arena
                    .add_token(SyntaxKind::SuperKeyword as u16, start, end)
            }
            _ => self.parse_primary_expression(),
        };
        self.parse_call_and_member_tail(start, expression, true)
    }

    /// `import.meta`, or the `import` callee of a dynamic `import(...)`.
    fn parse_import_expression_head(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let end = self.token_end();
        self.next_token();
        if self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name();
            let end = self.node_end();
            return self.arena.add_meta_property(
                syntax_kind_ext::META_PROPERTY,
                start,
                end,
                MetaPropertyData {
                    keyword_token: SyntaxKind::ImportKeyword as u16,
                    name,
                },
            );
        }
        self.arena
            .add_token(SyntaxKind::ImportKeyword as u16, start, end)
    }

    fn parse_new_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();

        if self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name();
            let end = self.node_end();
            return self.arena.add_meta_property(
                syntax_kind_ext::META_PROPERTY,
                start,
                end,
                MetaPropertyData {
                    keyword_token: SyntaxKind::NewKeyword as u16,
                    name,
                },
            );
        }

        if !self.enter_recursion() {
            return self.create_missing_identifier();
        }
        let callee_start = self.token_pos();
        let callee = match self.token() {
            SyntaxKind::NewKeyword => self.parse_new_expression(),
            SyntaxKind::ImportKeyword => self.parse_import_expression_head(),
            _ => self.parse_primary_expression(),
        };
        let callee = self.parse_call_and_member_tail(callee_start, callee, false);
        self.exit_recursion();

        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            Some(self.parse_arguments())
        } else {
            None
        };
        let end = self.node_end();
        self.arena.add_call_expr(
            syntax_kind_ext::NEW_EXPRESSION,
            start,
            end,
            CallExprData {
                expression: callee,
                arguments,
            },
        )
    }

    fn parse_call_and_member_tail(
        &mut self,
        start: u32,
        mut expression: NodeIndex,
        allow_call: bool,
    ) -> NodeIndex {
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_identifier_name();
                    expression = self.finish_access(
                        syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                        start,
                        expression,
                        name,
                        false,
                    );
                }
                SyntaxKind::QuestionDotToken => {
                    self.next_token();
                    expression = match self.token() {
                        SyntaxKind::OpenParenToken => {
                            let arguments = self.parse_arguments();
                            let end = self.node_end();
                            let call = self.arena.add_call_expr(
                                syntax_kind_ext::CALL_EXPRESSION,
                                start,
                                end,
                                CallExprData {
                                    expression,
                                    arguments: Some(arguments),
                                },
                            );
                            self.arena.set_flags(call, node_flags::OPTIONAL_CHAIN);
                            call
                        }
                        SyntaxKind::OpenBracketToken => {
                            let argument = self.parse_element_access_argument();
                            self.finish_access(
                                syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                                start,
                                expression,
                                argument,
                                true,
                            )
                        }
                        _ => {
                            let name = self.parse_identifier_name();
                            self.finish_access(
                                syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                                start,
                                expression,
                                name,
                                true,
                            )
                        }
                    };
                }
                SyntaxKind::OpenBracketToken => {
                    let argument = self.parse_element_access_argument();
                    expression = self.finish_access(
                        syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                        start,
                        expression,
                        argument,
                        false,
                    );
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    let template = self.parse_template_literal();
                    let end = self.node_end();
                    expression = self.arena.add_tagged_template(
                        syntax_kind_ext::TAGGED_TEMPLATE_EXPRESSION,
                        start,
                        end,
                        TaggedTemplateData {
                            tag: expression,
                            template,
                        },
                    );
                }
                SyntaxKind::OpenParenToken if allow_call => {
                    let arguments = self.parse_arguments();
                    let end = self.node_end();
                    expression = self.arena.add_call_expr(
                        syntax_kind_ext::CALL_EXPRESSION,
                        start,
                        end,
                        CallExprData {
                            expression,
                            arguments: Some(arguments),
                        },
                    );
                }
                _ => return expression,
            }
        }
    }

    fn parse_element_access_argument(&mut self) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let argument = self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_expression());
        self.parse_expected(SyntaxKind::CloseBracketToken);
        argument
    }

    fn finish_access(
        &mut self,
        kind: u16,
        start: u32,
        expression: NodeIndex,
        name_or_argument: NodeIndex,
        question_dot_token: bool,
    ) -> NodeIndex {
        let end = self.node_end();
        let index = self.arena.add_access_expr(
            kind,
            start,
            end,
            AccessExprData {
                expression,
                name_or_argument,
                question_dot_token,
            },
        );
        if question_dot_token {
            self.arena.set_flags(index, node_flags::OPTIONAL_CHAIN);
        }
        index
    }

    fn parse_arguments(&mut self) -> NodeList {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let mut arguments = Vec::new();
        self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
            while !p.is_token(SyntaxKind::CloseParenToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                arguments.push(p.parse_spread_or_assignment(syntax_kind_ext::SPREAD_ELEMENT));
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        });
        self.parse_expected(SyntaxKind::CloseParenToken);
        NodeList::with_nodes(arguments)
    }

    fn parse_spread_or_assignment(&mut self, spread_kind: u16) -> NodeIndex {
        if !self.is_token(SyntaxKind::DotDotDotToken) {
            return self.parse_assignment_expression();
        }
        let start = self.token_pos();
        self.next_token();
        let expression = self.parse_assignment_expression();
        let end = self.node_end();
        self.arena
            .add_wrapped_expr(spread_kind, start, end, ExprWrapperData { expression })
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::ThisKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => {
                let kind = self.token();
                let end = self.token_end();
                self.next_token();
                self.arena.add_token(kind as u16, start, end)
            }
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral | SyntaxKind::StringLiteral => {
                self.parse_literal_token()
            }
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                self.parse_template_literal()
            }
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                if self.re_scan_slash_token() == SyntaxKind::RegularExpressionLiteral {
                    self.parse_literal_token()
                } else {
                    self.error_expression_expected();
                    self.create_missing_identifier()
                }
            }
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(start),
            SyntaxKind::AsyncKeyword if self.look_ahead_is_async_function() => {
                self.parse_function_expression(start)
            }
            SyntaxKind::ClassKeyword | SyntaxKind::AtToken => self.parse_class_expression(),
            // `#field in object`
            SyntaxKind::PrivateIdentifier => self.parse_identifier_name(),
            _ if self.is_identifier() => self.parse_identifier(),
            _ => {
                self.error_expression_expected();
                let missing = self.create_missing_identifier();
                if !matches!(
                    self.token(),
                    SyntaxKind::CloseParenToken
                        | SyntaxKind::CloseBracketToken
                        | SyntaxKind::CloseBraceToken
                        | SyntaxKind::SemicolonToken
                        | SyntaxKind::CommaToken
                        | SyntaxKind::ColonToken
                        | SyntaxKind::EndOfFileToken
                ) {
                    self.next_token();
                }
                missing
            }
        }
    }

    fn parse_parenthesized_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_expression());
        self.parse_expected(SyntaxKind::CloseParenToken);
        let end = self.node_end();
        self.arena.add_wrapped_expr(
            syntax_kind_ext::PARENTHESIZED_EXPRESSION,
            start,
            end,
            ExprWrapperData { expression },
        )
    }

    /// Template literal with or without substitutions.
    pub(crate) fn parse_template_literal(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::NoSubstitutionTemplateLiteral) {
            return self.parse_literal_token();
        }
        let start = self.token_pos();
        let head = self.parse_literal_token();

        let mut spans = Vec::new();
        loop {
            let span_start = self.token_pos();
            let expression =
                self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_expression());
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.parse_error_at_current_token(
                    diagnostic_messages::UNTERMINATED_TEMPLATE_LITERAL,
                    diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL,
                );
                break;
            }
            let literal_kind = self.re_scan_template_token();
            let literal = self.parse_literal_token();
            let span_end = self.node_end();
            spans.push(self.arena.add_template_span(
                syntax_kind_ext::TEMPLATE_SPAN,
                span_start,
                span_end,
                TemplateSpanData {
                    expression,
                    literal,
                },
            ));
            if literal_kind != SyntaxKind::TemplateMiddle {
                break;
            }
        }

        let end = self.node_end();
        self.arena.add_template_expr(
            syntax_kind_ext::TEMPLATE_EXPRESSION,
            start,
            end,
            TemplateExprData {
                head,
                template_spans: NodeList::with_nodes(spans),
            },
        )
    }

    fn parse_array_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let mut elements = Vec::new();
        self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
            while !p.is_token(SyntaxKind::CloseBracketToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                if p.is_token(SyntaxKind::CommaToken) {
                    let pos = p.token_pos();
                    elements.push(p.arena.add_token(syntax_kind_ext::OMITTED_EXPRESSION, pos, pos));
                    p.next_token();
                    continue;
                }
                elements.push(p.parse_spread_or_assignment(syntax_kind_ext::SPREAD_ELEMENT));
                if !p.is_token(SyntaxKind::CloseBracketToken)
                    && !p.parse_expected(SyntaxKind::CommaToken)
                {
                    break;
                }
            }
        });
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let end = self.node_end();
        self.arena.add_literal_expr(
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION,
            start,
            end,
            LiteralExprData {
                elements: NodeList::with_nodes(elements),
                multi_line: false,
            },
        )
    }

    pub(crate) fn parse_object_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let multi_line = self.has_preceding_line_break();
        let mut properties = Vec::new();
        self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
            while !p.is_token(SyntaxKind::CloseBraceToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                properties.push(p.parse_object_literal_element());
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    if !p.is_token(SyntaxKind::CloseBraceToken) {
                        p.parse_expected(SyntaxKind::CommaToken);
                    }
                    break;
                }
            }
        });
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end = self.node_end();
        self.arena.add_literal_expr(
            syntax_kind_ext::OBJECT_LITERAL_EXPRESSION,
            start,
            end,
            LiteralExprData {
                elements: NodeList::with_nodes(properties),
                multi_line,
            },
        )
    }

    /// `get`/`set`/`async` acting as a modifier rather than a property name.
    pub(crate) fn look_ahead_is_member_modifier(&mut self) -> bool {
        let is_async = self.is_token(SyntaxKind::AsyncKeyword);
        self.look_ahead(|p| {
            p.next_token();
            if is_async && p.has_preceding_line_break() {
                return false;
            }
            p.is_property_name_start() || p.is_token(SyntaxKind::AsteriskToken)
        })
    }

    fn parse_object_literal_element(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if self.is_token(SyntaxKind::DotDotDotToken) {
            return self.parse_spread_or_assignment(syntax_kind_ext::SPREAD_ASSIGNMENT);
        }

        let mut flags = node_flags::NONE;
        if self.is_token(SyntaxKind::AsyncKeyword) && self.look_ahead_is_member_modifier() {
            self.next_token();
            flags |= node_flags::ASYNC;
        }
        if self.parse_optional(SyntaxKind::AsteriskToken) {
            flags |= node_flags::GENERATOR;
        }
        let accessor_kind = match self.token() {
            SyntaxKind::GetKeyword if flags == 0 && self.look_ahead_is_member_modifier() => {
                Some(syntax_kind_ext::GET_ACCESSOR)
            }
            SyntaxKind::SetKeyword if flags == 0 && self.look_ahead_is_member_modifier() => {
                Some(syntax_kind_ext::SET_ACCESSOR)
            }
            _ => None,
        };
        if accessor_kind.is_some() {
            self.next_token();
        }

        let name_is_identifier = self.is_identifier_name();
        let name = self.parse_property_name();

        if let Some(kind) = accessor_kind {
            return self.parse_method_rest(start, kind, flags, None, name);
        }
        if self.is_token(SyntaxKind::OpenParenToken) || flags != 0 {
            return self.parse_method_rest(
                start,
                syntax_kind_ext::METHOD_DECLARATION,
                flags,
                None,
                name,
            );
        }
        if self.parse_optional(SyntaxKind::ColonToken) {
            let initializer = self.parse_assignment_expression();
            let end = self.node_end();
            return self.arena.add_property_assignment(
                syntax_kind_ext::PROPERTY_ASSIGNMENT,
                start,
                end,
                PropertyAssignmentData { name, initializer },
            );
        }
        if name_is_identifier {
            let object_assignment_initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_assignment_expression()
            } else {
                NodeIndex::NONE
            };
            let end = self.node_end();
            return self.arena.add_shorthand_property(
                syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT,
                start,
                end,
                ShorthandPropertyData {
                    name,
                    object_assignment_initializer,
                },
            );
        }

        self.parse_expected(SyntaxKind::ColonToken);
        let end = self.node_end();
        self.arena.add_property_assignment(
            syntax_kind_ext::PROPERTY_ASSIGNMENT,
            start,
            end,
            PropertyAssignmentData {
                name,
                initializer: NodeIndex::NONE,
            },
        )
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    /// At `(`: skip to the matching `)` and check for `=>` on the same line.
    fn look_ahead_is_arrow_function(&mut self) -> bool {
        self.look_ahead(|p| {
            p.skip_balanced_parens() && p.is_arrow_token_on_same_line()
        })
    }

    /// `x =>`
    fn look_ahead_is_simple_arrow_function(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_arrow_token_on_same_line()
        })
    }

    /// `async x =>` or `async (...) =>`, with no line break after `async`.
    fn look_ahead_is_async_arrow_function(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.has_preceding_line_break() {
                return false;
            }
            if p.is_token(SyntaxKind::OpenParenToken) {
                return p.skip_balanced_parens() && p.is_arrow_token_on_same_line();
            }
            if p.is_identifier() {
                p.next_token();
                return p.is_arrow_token_on_same_line();
            }
            false
        })
    }

    fn is_arrow_token_on_same_line(&self) -> bool {
        self.is_token(SyntaxKind::EqualsGreaterThanToken) && !self.has_preceding_line_break()
    }

    /// From `(`, advance past the matching `)`. Template substitutions are
    /// re-scanned so that their text does not unbalance the count.
    fn skip_balanced_parens(&mut self) -> bool {
        let mut paren_depth = 0u32;
        let mut brace_depth = 0u32;
        let mut template_braces: Vec<u32> = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return false,
                SyntaxKind::OpenParenToken => paren_depth += 1,
                SyntaxKind::CloseParenToken => {
                    paren_depth = paren_depth.saturating_sub(1);
                    if paren_depth == 0 {
                        self.next_token();
                        return true;
                    }
                }
                SyntaxKind::OpenBraceToken => brace_depth += 1,
                SyntaxKind::TemplateHead => template_braces.push(brace_depth),
                SyntaxKind::CloseBraceToken => {
                    if template_braces.last() == Some(&brace_depth) {
                        if self.re_scan_template_token() == SyntaxKind::TemplateTail {
                            template_braces.pop();
                        }
                    } else {
                        brace_depth = brace_depth.saturating_sub(1);
                    }
                }
                _ => {}
            }
            self.next_token();
        }
    }

    fn parse_arrow_function(&mut self, start: u32, is_async: bool) -> NodeIndex {
        if is_async {
            self.next_token();
        }
        let function_context = if is_async { CONTEXT_FLAG_ASYNC } else { 0 };
        let cleared = (CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR) & !function_context;

        let parameters = if self.is_token(SyntaxKind::OpenParenToken) {
            self.with_context(function_context, cleared, |p| p.parse_parameter_list())
        } else {
            let param_start = self.token_pos();
            let name = self.parse_identifier();
            let param_end = self.node_end();
            let parameter = self.arena.add_parameter(
                syntax_kind_ext::PARAMETER,
                param_start,
                param_end,
                ParameterData {
                    decorators: None,
                    dot_dot_dot_token: false,
                    name,
                    initializer: NodeIndex::NONE,
                },
            );
            NodeList::with_nodes(vec![parameter])
        };

        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.with_context(function_context, cleared | CONTEXT_FLAG_DISALLOW_IN, |p| {
                p.parse_block()
            })
        } else {
            self.with_context(function_context, cleared, |p| p.parse_assignment_expression())
        };

        let end = self.node_end();
        let index = self.arena.add_function(
            syntax_kind_ext::ARROW_FUNCTION,
            start,
            end,
            FunctionData {
                decorators: None,
                name: NodeIndex::NONE,
                parameters,
                body,
            },
        );
        if is_async {
            self.arena.set_flags(index, node_flags::ASYNC);
        }
        index
    }
}
