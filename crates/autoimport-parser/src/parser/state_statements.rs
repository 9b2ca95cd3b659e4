//! Parser state - statement parsing methods.

use super::state::{CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, ParserState};
use crate::parser::{
    NodeIndex, NodeList,
    flags::{node_flags, syntax_kind_ext},
    node::{
        BlockData, CaseClauseData, CatchClauseData, ExprWrapperData, ForInOfData, IfStatementData,
        JumpData, LabeledData, LoopData, SourceFileData, SwitchData, TryData, VariableData,
        VariableDeclarationData,
    },
};
use autoimport_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use autoimport_scanner::SyntaxKind;
use tracing::debug;

impl ParserState {
    // =========================================================================
    // Source file
    // =========================================================================

    /// Parse the whole file and return the `SourceFile` node.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        self.scanner.scan_shebang_trivia();
        self.next_token();

        let (directives, statements) = self.parse_module_body();
        self.merge_scanner_diagnostics();

        let end_pos = self.scanner.source_text().len() as u32;
        let eof_pos = self.token_pos();
        let eof_token = self
            .arena
            .add_token(SyntaxKind::EndOfFileToken as u16, eof_pos, eof_pos);

        debug!(
            file = %self.file_name,
            nodes = self.arena.len(),
            diagnostics = self.parse_diagnostics.len(),
            "parsed source file"
        );

        self.arena.add_source_file(
            syntax_kind_ext::SOURCE_FILE,
            0,
            end_pos,
            SourceFileData {
                directives,
                statements,
                end_of_file_token: eof_token,
                file_name: self.file_name.clone(),
                text: self.scanner.source_text_arc(),
            },
        )
    }

    /// Top-level statements, with the leading directive prologue split off.
    fn parse_module_body(&mut self) -> (NodeList, NodeList) {
        let mut directives = Vec::new();
        let mut statements = Vec::new();
        let mut in_prologue = true;

        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let pos_before = self.token_pos();
            let statement = self.parse_statement();

            if in_prologue && self.is_directive(statement) {
                directives.push(statement);
            } else {
                in_prologue = false;
                if statement.is_some() {
                    statements.push(statement);
                }
            }

            if self.token_pos() == pos_before && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.parse_error_at_current_token(
                    diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                self.next_token();
            }
        }

        (NodeList::with_nodes(directives), NodeList::with_nodes(statements))
    }

    /// A directive is an expression statement consisting of a bare string literal.
    fn is_directive(&self, statement: NodeIndex) -> bool {
        let Some(node) = self.arena.get(statement) else {
            return false;
        };
        self.arena
            .get_wrapped_expr(node)
            .filter(|_| node.kind == syntax_kind_ext::EXPRESSION_STATEMENT)
            .and_then(|data| self.arena.kind_of(data.expression))
            .is_some_and(|kind| kind == SyntaxKind::StringLiteral as u16)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            self.next_token();
            return NodeIndex::NONE;
        }
        let statement = self.parse_statement_worker();
        self.exit_recursion();
        statement
    }

    fn parse_statement_worker(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => self.parse_empty_statement(),
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => {
                let start = self.token_pos();
                self.parse_variable_statement(start, node_flags::NONE)
            }
            SyntaxKind::LetKeyword if self.look_ahead_is_let_declaration() => {
                let start = self.token_pos();
                self.parse_variable_statement(start, node_flags::NONE)
            }
            SyntaxKind::FunctionKeyword => {
                let start = self.token_pos();
                self.parse_function_declaration(start, node_flags::NONE)
            }
            SyntaxKind::AsyncKeyword if self.look_ahead_is_async_function() => {
                let start = self.token_pos();
                self.parse_function_declaration(start, node_flags::NONE)
            }
            SyntaxKind::ClassKeyword | SyntaxKind::AtToken => {
                let start = self.token_pos();
                self.parse_class_declaration(start, node_flags::NONE)
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ContinueKeyword => self.parse_jump_statement(syntax_kind_ext::CONTINUE_STATEMENT),
            SyntaxKind::BreakKeyword => self.parse_jump_statement(syntax_kind_ext::BREAK_STATEMENT),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::DebuggerKeyword => {
                let start = self.token_pos();
                self.next_token();
                self.parse_semicolon();
                let end = self.node_end();
                self.arena
                    .add_token(syntax_kind_ext::DEBUGGER_STATEMENT, start, end)
            }
            SyntaxKind::ImportKeyword if !self.look_ahead_is_import_expression() => {
                self.parse_import_declaration()
            }
            SyntaxKind::ExportKeyword => self.parse_export_declaration(),
            _ if self.is_identifier() && self.peek_token() == SyntaxKind::ColonToken => {
                self.parse_labeled_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn look_ahead_is_let_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_identifier()
                || p.is_token(SyntaxKind::OpenBracketToken)
                || p.is_token(SyntaxKind::OpenBraceToken)
        })
    }

    /// `async function` with no line break in between.
    pub(crate) fn look_ahead_is_async_function(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_token(SyntaxKind::FunctionKeyword) && !p.has_preceding_line_break()
        })
    }

    /// `import(...)` and `import.meta` start expressions, not declarations.
    fn look_ahead_is_import_expression(&mut self) -> bool {
        matches!(
            self.peek_token(),
            SyntaxKind::OpenParenToken | SyntaxKind::DotToken
        )
    }

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statements_until_close_brace();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end = self.node_end();
        self.arena
            .add_block(syntax_kind_ext::BLOCK, start, end, BlockData { statements })
    }

    /// Statements up to (not including) `}` or end of file.
    pub(crate) fn parse_statements_until_close_brace(&mut self) -> NodeList {
        self.parse_statements_until(|p| p.is_token(SyntaxKind::CloseBraceToken))
    }

    fn parse_statements_until(&mut self, stop: impl Fn(&ParserState) -> bool) -> NodeList {
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) && !stop(self) {
            let pos_before = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.token_pos() == pos_before && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.parse_error_at_current_token(
                    diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                self.next_token();
            }
        }
        NodeList::with_nodes(statements)
    }

    fn parse_empty_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let end = self.node_end();
        self.arena.add_token(syntax_kind_ext::EMPTY_STATEMENT, start, end)
    }

    /// `var`/`let`/`const` statement. `flags` carries `export` modifiers.
    pub(crate) fn parse_variable_statement(&mut self, start: u32, flags: u16) -> NodeIndex {
        let list = self.parse_variable_declaration_list();
        self.parse_semicolon();
        let end = self.node_end();
        let statement = self.arena.add_variable(
            syntax_kind_ext::VARIABLE_STATEMENT,
            start,
            end,
            VariableData {
                declarations: NodeList::with_nodes(vec![list]),
            },
        );
        self.arena.set_flags(statement, flags);
        statement
    }

    pub(crate) fn parse_variable_declaration_list(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let flags = match self.token() {
            SyntaxKind::LetKeyword => node_flags::LET,
            SyntaxKind::ConstKeyword => node_flags::CONST,
            _ => node_flags::NONE,
        };
        self.next_token();

        let mut declarations = Vec::new();
        loop {
            let decl_start = self.token_pos();
            let name = self.parse_binding_name();
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_assignment_expression()
            } else {
                NodeIndex::NONE
            };
            let decl_end = self.node_end();
            declarations.push(self.arena.add_variable_declaration(
                syntax_kind_ext::VARIABLE_DECLARATION,
                decl_start,
                decl_end,
                VariableDeclarationData { name, initializer },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }

        let end = self.node_end();
        let list = self.arena.add_variable(
            syntax_kind_ext::VARIABLE_DECLARATION_LIST,
            start,
            end,
            VariableData {
                declarations: NodeList::with_nodes(declarations),
            },
        );
        self.arena.set_flags(list, flags);
        list
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = self.parse_expression();
        self.parse_semicolon();
        let end = self.node_end();
        self.arena.add_wrapped_expr(
            syntax_kind_ext::EXPRESSION_STATEMENT,
            start,
            end,
            ExprWrapperData { expression },
        )
    }

    fn parse_parenthesized_condition(&mut self) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_expression());
        self.parse_expected(SyntaxKind::CloseParenToken);
        expression
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        let then_statement = self.parse_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement()
        } else {
            NodeIndex::NONE
        };
        let end = self.node_end();
        self.arena.add_if_statement(
            syntax_kind_ext::IF_STATEMENT,
            start,
            end,
            IfStatementData {
                expression,
                then_statement,
                else_statement,
            },
        )
    }

    fn parse_do_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let statement = self.parse_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        let condition = self.parse_parenthesized_condition();
        // `do ... while (x)` never needs a semicolon.
        self.parse_optional(SyntaxKind::SemicolonToken);
        let end = self.node_end();
        self.arena.add_loop(
            syntax_kind_ext::DO_STATEMENT,
            start,
            end,
            LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            },
        )
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let condition = self.parse_parenthesized_condition();
        let statement = self.parse_statement();
        let end = self.node_end();
        self.arena.add_loop(
            syntax_kind_ext::WHILE_STATEMENT,
            start,
            end,
            LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            },
        )
    }

    fn parse_for_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let await_modifier =
            self.in_context(CONTEXT_FLAG_ASYNC) && self.parse_optional(SyntaxKind::AwaitKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);

        let initializer = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else if self.is_token(SyntaxKind::VarKeyword)
            || self.is_token(SyntaxKind::ConstKeyword)
            || (self.is_token(SyntaxKind::LetKeyword) && self.look_ahead_is_let_declaration())
        {
            self.with_context(CONTEXT_FLAG_DISALLOW_IN, 0, |p| {
                p.parse_variable_declaration_list()
            })
        } else {
            self.with_context(CONTEXT_FLAG_DISALLOW_IN, 0, |p| p.parse_expression())
        };

        if initializer.is_some()
            && (self.is_token(SyntaxKind::OfKeyword) || self.is_token(SyntaxKind::InKeyword))
        {
            let is_of = self.is_token(SyntaxKind::OfKeyword);
            self.next_token();
            self.mark_assignment_pattern(initializer);
            let expression = if is_of {
                self.parse_assignment_expression()
            } else {
                self.parse_expression()
            };
            self.parse_expected(SyntaxKind::CloseParenToken);
            let statement = self.parse_statement();
            let end = self.node_end();
            let kind = if is_of {
                syntax_kind_ext::FOR_OF_STATEMENT
            } else {
                syntax_kind_ext::FOR_IN_STATEMENT
            };
            return self.arena.add_for_in_of(
                kind,
                start,
                end,
                ForInOfData {
                    await_modifier,
                    initializer,
                    expression,
                    statement,
                },
            );
        }

        self.parse_expected(SyntaxKind::SemicolonToken);
        let condition = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let incrementor = if self.is_token(SyntaxKind::CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        let end = self.node_end();
        self.arena.add_loop(
            syntax_kind_ext::FOR_STATEMENT,
            start,
            end,
            LoopData {
                initializer,
                condition,
                incrementor,
                statement,
            },
        )
    }

    /// `break [label];` / `continue [label];`
    fn parse_jump_statement(&mut self, kind: u16) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let label = if !self.can_parse_semicolon() && self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        let end = self.node_end();
        self.arena.add_jump(kind, start, end, JumpData { label })
    }

    fn parse_return_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();
        let end = self.node_end();
        self.arena.add_wrapped_expr(
            syntax_kind_ext::RETURN_STATEMENT,
            start,
            end,
            ExprWrapperData { expression },
        )
    }

    fn parse_throw_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = if self.has_preceding_line_break() {
            self.error_expression_expected();
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();
        let end = self.node_end();
        self.arena.add_wrapped_expr(
            syntax_kind_ext::THROW_STATEMENT,
            start,
            end,
            ExprWrapperData { expression },
        )
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut clauses = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let clause_start = self.token_pos();
            let (kind, test) = if self.parse_optional(SyntaxKind::CaseKeyword) {
                (syntax_kind_ext::CASE_CLAUSE, self.parse_expression())
            } else if self.parse_optional(SyntaxKind::DefaultKeyword) {
                (syntax_kind_ext::DEFAULT_CLAUSE, NodeIndex::NONE)
            } else {
                self.parse_error_at_current_token(
                    &autoimport_common::diagnostics::format_message(
                        diagnostic_messages::TOKEN_EXPECTED,
                        &["case"],
                    ),
                    diagnostic_codes::TOKEN_EXPECTED,
                );
                self.next_token();
                continue;
            };
            self.parse_expected(SyntaxKind::ColonToken);
            let statements = self.parse_statements_until(|p| {
                p.is_token(SyntaxKind::CaseKeyword)
                    || p.is_token(SyntaxKind::DefaultKeyword)
                    || p.is_token(SyntaxKind::CloseBraceToken)
            });
            let clause_end = self.node_end();
            clauses.push(self.arena.add_case_clause(
                kind,
                clause_start,
                clause_end,
                CaseClauseData {
                    expression: test,
                    statements,
                },
            ));
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);

        let end = self.node_end();
        self.arena.add_switch(
            syntax_kind_ext::SWITCH_STATEMENT,
            start,
            end,
            SwitchData {
                expression,
                clauses: NodeList::with_nodes(clauses),
            },
        )
    }

    fn parse_try_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let try_block = self.parse_block();

        let catch_clause = if self.is_token(SyntaxKind::CatchKeyword) {
            let catch_start = self.token_pos();
            self.next_token();
            let variable_declaration = if self.parse_optional(SyntaxKind::OpenParenToken) {
                let name = self.parse_binding_name();
                self.parse_expected(SyntaxKind::CloseParenToken);
                name
            } else {
                NodeIndex::NONE
            };
            let block = self.parse_block();
            let catch_end = self.node_end();
            self.arena.add_catch_clause(
                syntax_kind_ext::CATCH_CLAUSE,
                catch_start,
                catch_end,
                CatchClauseData {
                    variable_declaration,
                    block,
                },
            )
        } else {
            NodeIndex::NONE
        };

        let finally_block = if self.parse_optional(SyntaxKind::FinallyKeyword) {
            self.parse_block()
        } else {
            NodeIndex::NONE
        };

        if catch_clause.is_none() && finally_block.is_none() {
            self.parse_error_at_current_token(
                &autoimport_common::diagnostics::format_message(
                    diagnostic_messages::TOKEN_EXPECTED,
                    &["catch"],
                ),
                diagnostic_codes::TOKEN_EXPECTED,
            );
        }

        let end = self.node_end();
        self.arena.add_try(
            syntax_kind_ext::TRY_STATEMENT,
            start,
            end,
            TryData {
                try_block,
                catch_clause,
                finally_block,
            },
        )
    }

    fn parse_labeled_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let label = self.parse_identifier();
        self.parse_expected(SyntaxKind::ColonToken);
        let statement = self.parse_statement();
        let end = self.node_end();
        self.arena.add_labeled(
            syntax_kind_ext::LABELED_STATEMENT,
            start,
            end,
            LabeledData { label, statement },
        )
    }
}
