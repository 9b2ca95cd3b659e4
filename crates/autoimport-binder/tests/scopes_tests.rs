//! Scope tree tests: which names are visible from which identifiers.

use autoimport_binder::{BinderState, ContainerKind, ScopeId};
use autoimport_parser::{NodeArena, NodeIndex, ParserState};
use autoimport_scanner::SyntaxKind;

struct Bound {
    arena: NodeArena,
    binder: BinderState,
}

fn bind(source: &str) -> Bound {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "parse errors: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    Bound { arena, binder }
}

impl Bound {
    /// The `nth` identifier node spelled `name`, in source order.
    fn ident(&self, name: &str, nth: usize) -> NodeIndex {
        let mut matches: Vec<(u32, NodeIndex)> = self
            .arena
            .nodes
            .iter()
            .enumerate()
            .filter(|(i, node)| {
                node.kind == SyntaxKind::Identifier as u16
                    && self.arena.identifier_text(NodeIndex(*i as u32)) == Some(name)
            })
            .map(|(i, node)| (node.pos, NodeIndex(i as u32)))
            .collect();
        matches.sort_by_key(|(pos, _)| *pos);
        matches[nth].1
    }

    fn bound_at(&self, name: &str, nth: usize) -> bool {
        let ident = self.ident(name, nth);
        let scope = self
            .binder
            .find_enclosing_scope(&self.arena, ident)
            .expect("scope");
        self.binder.is_bound(name, scope)
    }
}

#[test]
fn test_module_scope_holds_top_level_declarations() {
    let b = bind("import d, { m as local } from 'x';\nimport * as ns from 'y';\nconst c = 1;\nfunction f() {}\nclass K {}\nuse(d, local, ns, c, f, K, free);");
    assert!(b.bound_at("d", 1));
    assert!(b.bound_at("local", 1));
    assert!(b.bound_at("ns", 1));
    assert!(b.bound_at("c", 1));
    assert!(b.bound_at("f", 1));
    assert!(b.bound_at("K", 1));
    assert!(!b.bound_at("free", 0));
    assert!(!b.bound_at("use", 0));

    let module = b.binder.module_scope().unwrap();
    assert!(!b.binder.is_bound("m", module));
}

#[test]
fn test_declarations_are_visible_before_their_position() {
    let b = bind("early(later);\nvar later = 1;\nfunction early() {}");
    assert!(b.bound_at("later", 0));
    assert!(b.bound_at("early", 0));
}

#[test]
fn test_var_hoists_out_of_blocks_but_let_does_not() {
    let b = bind("{ var v = 1; let l = 2; }\nv; l;");
    assert!(b.bound_at("v", 1));
    assert!(!b.bound_at("l", 1));
    assert!(b.bound_at("l", 0));
}

#[test]
fn test_function_scope_parameters_and_arguments() {
    let b = bind(
        "function f(a, { b, c: [d] }, ...rest) { return a + b + d + rest + arguments.length + inner; var inner; }\n\
         const g = (x) => x + arguments;\n\
         a; arguments;",
    );
    assert!(b.bound_at("a", 1));
    assert!(b.bound_at("b", 1));
    assert!(b.bound_at("d", 1));
    assert!(b.bound_at("rest", 1));
    assert!(b.bound_at("arguments", 0));
    assert!(b.bound_at("inner", 0));
    assert!(b.bound_at("x", 1));
    // Arrow functions do not declare `arguments`.
    assert!(!b.bound_at("arguments", 1));
    assert!(!b.bound_at("a", 2));
    assert!(!b.bound_at("arguments", 2));
}

#[test]
fn test_named_function_expression_binds_only_inside() {
    let b = bind("const h = function fact(n) { return fact(n - 1); };\nfact;");
    assert!(b.bound_at("fact", 1));
    assert!(!b.bound_at("fact", 2));
}

#[test]
fn test_named_class_expression_binds_only_inside() {
    let b = bind("const C = class Self { make() { return new Self(); } };\nSelf;");
    assert!(b.bound_at("Self", 1));
    assert!(!b.bound_at("Self", 2));
}

#[test]
fn test_block_level_function_stays_in_block() {
    let b = bind("if (ok) { function helper() {} helper(); }\nhelper();");
    assert!(b.bound_at("helper", 1));
    assert!(!b.bound_at("helper", 2));
}

#[test]
fn test_for_head_and_catch_scopes() {
    let b = bind(
        "for (let i = 0; i < n; i++) { i; }\ni;\n\
         for (const [k, v] of map) v;\nk;\n\
         try { risky(); } catch ({ message }) { message; }\nmessage;",
    );
    assert!(b.bound_at("i", 3));
    assert!(!b.bound_at("i", 4));
    assert!(b.bound_at("v", 1));
    assert!(!b.bound_at("k", 1));
    assert!(b.bound_at("message", 1));
    assert!(!b.bound_at("message", 2));
}

#[test]
fn test_for_var_hoists_to_function() {
    let b = bind("function f() { for (var j of list) {} return j; }");
    assert!(b.bound_at("j", 1));
}

#[test]
fn test_static_block_scope() {
    let b = bind("class A { static { var s = 1; s; } }\ns;");
    assert!(b.bound_at("s", 1));
    assert!(!b.bound_at("s", 2));
}

#[test]
fn test_scope_kinds_recorded() {
    let b = bind("function f() { { } }\nfor (;;) {}\nclass C {}");
    let kinds: Vec<ContainerKind> = b.binder.scopes.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ContainerKind::Module,
            ContainerKind::Function,
            ContainerKind::Block,
            ContainerKind::For,
            ContainerKind::Block,
            ContainerKind::Class,
        ]
    );
}

#[test]
fn test_declare_in_scope_after_binding() {
    let mut b = bind("use(x);");
    let module = b.binder.module_scope().unwrap();
    assert!(!b.binder.is_bound("x", module));
    assert!(b.binder.declare_in_scope(module, "x", NodeIndex::NONE));
    assert!(b.bound_at("x", 0));
    assert!(!b.binder.declare_in_scope(ScopeId::NONE, "y", NodeIndex::NONE));
}

#[test]
fn test_long_expression_chain_binds_without_recursion() {
    let source = format!("const total = {}1;", "a + ".repeat(50_000));
    let b = bind(&source);
    assert!(!b.bound_at("a", 0));
}

#[test]
fn test_default_binder_is_empty() {
    let binder = BinderState::default();
    assert!(binder.scopes.is_empty());
    assert!(binder.node_scope_ids.is_empty());
    assert_eq!(ScopeId::default(), ScopeId::NONE);
    assert!(ScopeId::default().is_none());
}
