//! Declaration collection and scope creation over the arena.

use crate::{BinderState, ContainerKind, ScopeId};
use autoimport_parser::{NodeArena, NodeIndex, node_flags, syntax_kind_ext};
use autoimport_scanner::SyntaxKind;
use tracing::{Level, debug, span};

/// Pending work for the binding walk. The walk keeps its own stack so
/// that left-deep expression chains cannot exhaust the thread stack.
enum Work {
    Bind(NodeIndex),
    ExitScope,
}

impl BinderState {
    /// Build the scope tree for the file rooted at `root`.
    pub fn bind_source_file(&mut self, arena: &NodeArena, root: NodeIndex) {
        let _span = span!(Level::DEBUG, "bind_source_file", root = root.0).entered();

        self.scopes.clear();
        self.node_scope_ids.clear();
        self.current_scope_id = ScopeId::NONE;
        self.enter_scope(ContainerKind::Module, root);

        let mut work = Vec::new();
        Self::push_children(arena, root, &mut work);
        while let Some(item) = work.pop() {
            match item {
                Work::Bind(idx) => self.bind_node(arena, idx, &mut work),
                Work::ExitScope => self.exit_scope(),
            }
        }

        debug!(scopes = self.scopes.len(), "bound source file");
    }

    fn push_children(arena: &NodeArena, idx: NodeIndex, work: &mut Vec<Work>) {
        let start = work.len();
        arena.for_each_child(idx, &mut |child| work.push(Work::Bind(child)));
        work[start..].reverse();
    }

    fn bind_node(&mut self, arena: &NodeArena, idx: NodeIndex, work: &mut Vec<Work>) {
        let Some(node) = arena.get(idx) else {
            return;
        };

        match node.kind {
            k if k == SyntaxKind::Identifier as u16 => return,

            k if k == syntax_kind_ext::IMPORT_DECLARATION => {
                if let Some(import) = arena.get_import_decl(node) {
                    for specifier in import.specifiers.iter() {
                        if let Some(local) = arena
                            .get(specifier)
                            .and_then(|spec| arena.get_specifier(spec))
                            .and_then(|spec| arena.identifier_text(spec.name))
                        {
                            self.declare_lexical(local, specifier);
                        }
                    }
                }
                // Nothing inside an import declaration binds or references.
                return;
            }

            k if k == syntax_kind_ext::VARIABLE_DECLARATION_LIST => {
                self.bind_variable_declaration_list(arena, idx);
            }

            k if syntax_kind_ext::is_function_like(k) => {
                self.bind_function_like(arena, idx, work);
                return;
            }

            k if syntax_kind_ext::is_class_like(k) => {
                if let Some(class) = arena.get_class(node) {
                    let own_name = arena.identifier_text(class.name);
                    if k == syntax_kind_ext::CLASS_DECLARATION
                        && let Some(name) = own_name
                    {
                        self.declare_lexical(name, idx);
                    }
                    self.enter_scope(ContainerKind::Class, idx);
                    if k == syntax_kind_ext::CLASS_EXPRESSION
                        && let Some(name) = own_name
                    {
                        self.declare_lexical(name, idx);
                    }
                    work.push(Work::ExitScope);
                }
            }

            k if k == syntax_kind_ext::CLASS_STATIC_BLOCK_DECLARATION => {
                self.enter_scope(ContainerKind::StaticBlock, idx);
                work.push(Work::ExitScope);
            }

            k if k == syntax_kind_ext::BLOCK => {
                if !Self::block_shares_parent_scope(arena, idx) {
                    self.enter_scope(ContainerKind::Block, idx);
                    work.push(Work::ExitScope);
                }
            }

            k if k == syntax_kind_ext::SWITCH_STATEMENT => {
                self.enter_scope(ContainerKind::Block, idx);
                work.push(Work::ExitScope);
            }

            k if k == syntax_kind_ext::FOR_STATEMENT
                || k == syntax_kind_ext::FOR_IN_STATEMENT
                || k == syntax_kind_ext::FOR_OF_STATEMENT =>
            {
                self.enter_scope(ContainerKind::For, idx);
                work.push(Work::ExitScope);
            }

            k if k == syntax_kind_ext::CATCH_CLAUSE => {
                self.enter_scope(ContainerKind::Catch, idx);
                if let Some(clause) = arena.get_catch_clause(node) {
                    let mut names = Vec::new();
                    Self::collect_binding_identifiers(arena, clause.variable_declaration, &mut names);
                    self.declare_all(arena, &names);
                }
                work.push(Work::ExitScope);
            }

            _ => {}
        }

        Self::push_children(arena, idx, work);
    }

    /// Function bodies and `catch` blocks live in the scope their parent opened.
    fn block_shares_parent_scope(arena: &NodeArena, block: NodeIndex) -> bool {
        arena.kind_of(arena.get_parent(block)).is_some_and(|kind| {
            syntax_kind_ext::is_function_like(kind) || kind == syntax_kind_ext::CATCH_CLAUSE
        })
    }

    fn bind_function_like(&mut self, arena: &NodeArena, idx: NodeIndex, work: &mut Vec<Work>) {
        let Some(node) = arena.get(idx) else {
            return;
        };
        let Some(func) = arena.get_function(node) else {
            return;
        };
        let name = arena.identifier_text(func.name);

        if node.kind == syntax_kind_ext::FUNCTION_DECLARATION
            && let Some(name) = name
        {
            self.declare_lexical(name, idx);
        }

        // Computed method names and decorators are evaluated outside the body.
        if let Some(decorators) = &func.decorators {
            for decorator in decorators.iter() {
                self.bind_subtree(arena, decorator, work);
            }
        }
        if arena.kind_of(func.name) == Some(syntax_kind_ext::COMPUTED_PROPERTY_NAME) {
            self.bind_subtree(arena, func.name, work);
        }

        self.enter_scope(ContainerKind::Function, idx);
        if node.kind == syntax_kind_ext::FUNCTION_EXPRESSION
            && let Some(name) = name
        {
            self.declare_lexical(name, idx);
        }
        if node.kind != syntax_kind_ext::ARROW_FUNCTION {
            self.declare_lexical("arguments", idx);
        }

        let mut names = Vec::new();
        for parameter in func.parameters.iter() {
            if let Some(param) = arena.get(parameter).and_then(|p| arena.get_parameter(p)) {
                Self::collect_binding_identifiers(arena, param.name, &mut names);
            }
        }
        self.declare_all(arena, &names);

        work.push(Work::ExitScope);
        let start = work.len();
        for parameter in func.parameters.iter() {
            work.push(Work::Bind(parameter));
        }
        if func.body.is_some() {
            work.push(Work::Bind(func.body));
        }
        work[start..].reverse();
    }

    /// Bind a subtree immediately, in the current scope.
    fn bind_subtree(&mut self, arena: &NodeArena, idx: NodeIndex, work: &mut Vec<Work>) {
        let base = work.len();
        work.push(Work::Bind(idx));
        while work.len() > base {
            match work.pop() {
                Some(Work::Bind(child)) => self.bind_node(arena, child, work),
                Some(Work::ExitScope) => self.exit_scope(),
                None => break,
            }
        }
    }

    fn bind_variable_declaration_list(&mut self, arena: &NodeArena, list_idx: NodeIndex) {
        let Some(list_node) = arena.get(list_idx) else {
            return;
        };
        let Some(list) = arena.get_variable(list_node) else {
            return;
        };
        let block_scoped = list_node.flags & node_flags::BLOCK_SCOPED != 0;

        let mut names = Vec::new();
        for declaration in list.declarations.iter() {
            if let Some(decl) = arena
                .get(declaration)
                .and_then(|d| arena.get_variable_declaration(d))
            {
                Self::collect_binding_identifiers(arena, decl.name, &mut names);
            }
        }

        for ident in names {
            if let Some(name) = arena.identifier_text(ident) {
                if block_scoped {
                    self.declare_lexical(name, ident);
                } else {
                    self.declare_hoisted(name, ident);
                }
            }
        }
    }

    fn declare_all(&mut self, arena: &NodeArena, names: &[NodeIndex]) {
        for &ident in names {
            if let Some(name) = arena.identifier_text(ident) {
                self.declare_lexical(name, ident);
            }
        }
    }

    /// Collect the identifiers a binding name introduces, descending into
    /// object and array patterns.
    pub(crate) fn collect_binding_identifiers(
        arena: &NodeArena,
        idx: NodeIndex,
        out: &mut Vec<NodeIndex>,
    ) {
        let Some(node) = arena.get(idx) else {
            return;
        };

        match node.kind {
            k if k == SyntaxKind::Identifier as u16 => out.push(idx),
            k if k == syntax_kind_ext::BINDING_ELEMENT => {
                if let Some(binding) = arena.get_binding_element(node) {
                    Self::collect_binding_identifiers(arena, binding.name, out);
                }
            }
            k if syntax_kind_ext::is_binding_pattern(k) => {
                if let Some(pattern) = arena.get_binding_pattern(node) {
                    for element in pattern.elements.iter() {
                        Self::collect_binding_identifiers(arena, element, out);
                    }
                }
            }
            _ => {}
        }
    }
}
