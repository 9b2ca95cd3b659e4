//! Parser tests: module syntax, expression shapes, parent links and recovery.

use autoimport_parser::{NodeArena, NodeIndex, ParserState, node_flags, syntax_kind_ext};
use autoimport_scanner::SyntaxKind;

fn parse(source: &str) -> (NodeArena, NodeIndex, usize) {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let diagnostics = parser.get_diagnostics().len();
    (parser.into_arena(), root, diagnostics)
}

fn parse_ok(source: &str) -> (NodeArena, NodeIndex) {
    let (arena, root, diagnostics) = parse(source);
    assert_eq!(diagnostics, 0, "unexpected parse errors for {source:?}");
    (arena, root)
}

fn nodes_of_kind(arena: &NodeArena, kind: u16) -> Vec<NodeIndex> {
    arena
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.kind == kind)
        .map(|(i, _)| NodeIndex(i as u32))
        .collect()
}

fn identifier_named(arena: &NodeArena, name: &str) -> Vec<NodeIndex> {
    nodes_of_kind(arena, SyntaxKind::Identifier as u16)
        .into_iter()
        .filter(|&idx| arena.identifier_text(idx) == Some(name))
        .collect()
}

fn statements(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    let node = arena.get(root).expect("root");
    arena.get_source_file(node).expect("source file").statements.nodes.clone()
}

fn parent_kind(arena: &NodeArena, idx: NodeIndex) -> u16 {
    arena.kind_of(arena.get_parent(idx)).expect("parent")
}

#[test]
fn test_import_declaration_shapes() {
    let (arena, root) = parse_ok(
        "import d, * as ns from 'a';\nimport { x, y as z, default as w } from \"b\";\nimport 'side';",
    );
    let stmts = statements(&arena, root);
    assert_eq!(stmts.len(), 3);

    let first = arena.get_import_decl(arena.get(stmts[0]).unwrap()).unwrap();
    assert_eq!(arena.string_literal_text(first.module_specifier), Some("a"));
    let kinds: Vec<u16> = first
        .specifiers
        .iter()
        .map(|s| arena.kind_of(s).unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            syntax_kind_ext::IMPORT_DEFAULT_SPECIFIER,
            syntax_kind_ext::NAMESPACE_IMPORT
        ]
    );

    let second = arena.get_import_decl(arena.get(stmts[1]).unwrap()).unwrap();
    let pairs: Vec<(Option<String>, String)> = second
        .specifiers
        .iter()
        .map(|s| {
            let spec = arena.get_specifier(arena.get(s).unwrap()).unwrap();
            (
                arena
                    .module_export_name_text(spec.property_name)
                    .map(str::to_string),
                arena.identifier_text(spec.name).unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        pairs,
        vec![
            (None, "x".to_string()),
            (Some("y".to_string()), "z".to_string()),
            (Some("default".to_string()), "w".to_string()),
        ]
    );

    let third = arena.get_import_decl(arena.get(stmts[2]).unwrap()).unwrap();
    assert!(third.specifiers.is_empty());
    assert_eq!(arena.string_literal_text(third.module_specifier), Some("side"));
}

#[test]
fn test_import_attributes_are_kept_on_declaration() {
    let (arena, root) = parse_ok("import data from './d.json' with { type: 'json' };");
    let stmts = statements(&arena, root);
    let decl = arena.get_import_decl(arena.get(stmts[0]).unwrap()).unwrap();
    assert_eq!(
        arena.kind_of(decl.attributes),
        Some(syntax_kind_ext::IMPORT_ATTRIBUTES)
    );
}

#[test]
fn test_directive_prologue_is_split_from_statements() {
    let (arena, root) = parse_ok("'use strict';\n\"use client\";\nfoo();\n'not a directive';");
    let node = arena.get(root).unwrap();
    let file = arena.get_source_file(node).unwrap();
    assert_eq!(file.directives.len(), 2);
    assert_eq!(file.statements.len(), 2);
}

#[test]
fn test_parenthesized_string_is_not_a_directive() {
    let (arena, root) = parse_ok("('use strict');");
    let file = arena.get_source_file(arena.get(root).unwrap()).unwrap();
    assert!(file.directives.is_empty());
    assert_eq!(file.statements.len(), 1);
}

#[test]
fn test_parent_links_follow_structure() {
    let (arena, root) = parse_ok("foo.bar(baz);");
    let foo = identifier_named(&arena, "foo")[0];
    let baz = identifier_named(&arena, "baz")[0];
    assert_eq!(parent_kind(&arena, foo), syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION);
    assert_eq!(parent_kind(&arena, baz), syntax_kind_ext::CALL_EXPRESSION);

    let stmt = statements(&arena, root)[0];
    assert_eq!(arena.get_parent(stmt), root);
    assert_eq!(arena.source_file_index(), root);
}

#[test]
fn test_arrow_functions_and_parenthesized_expressions() {
    let (arena, _) = parse_ok("const f = (a, { b = `${c}` }) => a + b;\nconst g = (a, b);\nconst h = async x => x;");
    let arrows = nodes_of_kind(&arena, syntax_kind_ext::ARROW_FUNCTION);
    assert_eq!(arrows.len(), 2);
    let async_arrow = arena.get(arrows[1]).unwrap();
    assert!(async_arrow.has_flag(node_flags::ASYNC));
    assert_eq!(
        nodes_of_kind(&arena, syntax_kind_ext::PARENTHESIZED_EXPRESSION).len(),
        1
    );
}

#[test]
fn test_destructuring_assignment_target_is_flagged() {
    let (arena, _) = parse_ok("[a, [b], ...c] = list;\n({ x: y, z = 1 } = obj);\nconst plain = [d];");
    let arrays = nodes_of_kind(&arena, syntax_kind_ext::ARRAY_LITERAL_EXPRESSION);
    let flagged: Vec<bool> = arrays
        .iter()
        .map(|&idx| arena.get(idx).unwrap().has_flag(node_flags::ASSIGNMENT_PATTERN))
        .collect();
    // `[b]` is created before the outer literal.
    assert_eq!(flagged, vec![true, true, false]);

    let object = nodes_of_kind(&arena, syntax_kind_ext::OBJECT_LITERAL_EXPRESSION)[0];
    assert!(arena.get(object).unwrap().has_flag(node_flags::ASSIGNMENT_PATTERN));
    assert_eq!(
        nodes_of_kind(&arena, syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT).len(),
        1
    );
}

#[test]
fn test_regex_and_division_are_distinguished() {
    let (arena, _) = parse_ok("const q = a / b / c;\nconst r = /[/]x/g.test(s);");
    assert_eq!(
        nodes_of_kind(&arena, SyntaxKind::RegularExpressionLiteral as u16).len(),
        1
    );
    let divisions = nodes_of_kind(&arena, syntax_kind_ext::BINARY_EXPRESSION)
        .into_iter()
        .filter(|&idx| {
            arena
                .get_binary_expr(arena.get(idx).unwrap())
                .is_some_and(|b| b.operator_token == SyntaxKind::SlashToken as u16)
        })
        .count();
    assert_eq!(divisions, 2);
}

#[test]
fn test_template_literal_spans() {
    let (arena, _) = parse_ok("const t = `a${x}b${y + 1}c`;\nconst u = tag`plain`;");
    let template = nodes_of_kind(&arena, syntax_kind_ext::TEMPLATE_EXPRESSION)[0];
    let data = arena.get_template_expr(arena.get(template).unwrap()).unwrap();
    assert_eq!(data.template_spans.len(), 2);
    assert_eq!(
        nodes_of_kind(&arena, syntax_kind_ext::TAGGED_TEMPLATE_EXPRESSION).len(),
        1
    );
}

#[test]
fn test_statements_and_loops() {
    let (arena, root) = parse_ok(
        "for (const [k, v] of entries) { if (k) continue; else break; }\n\
         for (let i = 0; i < n; i++) {}\n\
         for (key in obj) ;\n\
         label: while (x) { do { y(); } while (z) }\n\
         switch (v) { case 1: a(); break; default: b(); }\n\
         try { t(); } catch ({ message }) { m(message); } finally { f(); }",
    );
    let kinds: Vec<u16> = statements(&arena, root)
        .into_iter()
        .map(|s| arena.kind_of(s).unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            syntax_kind_ext::FOR_OF_STATEMENT,
            syntax_kind_ext::FOR_STATEMENT,
            syntax_kind_ext::FOR_IN_STATEMENT,
            syntax_kind_ext::LABELED_STATEMENT,
            syntax_kind_ext::SWITCH_STATEMENT,
            syntax_kind_ext::TRY_STATEMENT,
        ]
    );
}

#[test]
fn test_do_while_children_in_source_order() {
    let (arena, root) = parse_ok("do { body(); } while (cond);");
    let stmt = statements(&arena, root)[0];
    let children = arena.get_children(stmt);
    assert_eq!(children.len(), 2);
    assert_eq!(arena.kind_of(children[0]), Some(syntax_kind_ext::BLOCK));
    assert_eq!(arena.identifier_text(children[1]), Some("cond"));
}

#[test]
fn test_class_members() {
    let (arena, _) = parse_ok(
        "class A extends Base {\n  static count = 0;\n  #secret = 1;\n  constructor(x) { super(x); }\n  get value() { return this.#secret; }\n  static { init(); }\n  async *gen() {}\n}",
    );
    let class = nodes_of_kind(&arena, syntax_kind_ext::CLASS_DECLARATION)[0];
    let data = arena.get_class(arena.get(class).unwrap()).unwrap();
    assert_eq!(arena.identifier_text(data.heritage), Some("Base"));
    let kinds: Vec<u16> = data
        .members
        .iter()
        .map(|m| arena.kind_of(m).unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            syntax_kind_ext::PROPERTY_DECLARATION,
            syntax_kind_ext::PROPERTY_DECLARATION,
            syntax_kind_ext::CONSTRUCTOR,
            syntax_kind_ext::GET_ACCESSOR,
            syntax_kind_ext::CLASS_STATIC_BLOCK_DECLARATION,
            syntax_kind_ext::METHOD_DECLARATION,
        ]
    );
    let first = arena.get(data.members.nodes[0]).unwrap();
    assert!(first.has_flag(node_flags::STATIC));
}

#[test]
fn test_export_forms() {
    let (arena, root) = parse_ok(
        "export const a = 1;\nexport default function () {}\nexport { a as b };\nexport * as ns from 'm';\nexport { c } from 'n';",
    );
    let stmts = statements(&arena, root);
    let first = arena.get(stmts[0]).unwrap();
    assert_eq!(first.kind, syntax_kind_ext::VARIABLE_STATEMENT);
    assert!(first.has_flag(node_flags::EXPORT));
    let second = arena.get(stmts[1]).unwrap();
    assert_eq!(second.kind, syntax_kind_ext::FUNCTION_DECLARATION);
    assert!(second.has_flag(node_flags::DEFAULT));
    assert_eq!(
        nodes_of_kind(&arena, syntax_kind_ext::EXPORT_DECLARATION).len(),
        3
    );
}

#[test]
fn test_await_is_contextual() {
    let (arena, _) = parse_ok("await ready;\nfunction f() { return await; }\nasync function g() { await h(); }");
    assert_eq!(
        nodes_of_kind(&arena, syntax_kind_ext::AWAIT_EXPRESSION).len(),
        2
    );
    assert_eq!(identifier_named(&arena, "await").len(), 1);
}

#[test]
fn test_optional_chain_flags() {
    let (arena, _) = parse_ok("a?.b?.[c]?.(d);");
    let optional = arena
        .nodes
        .iter()
        .filter(|node| node.has_flag(node_flags::OPTIONAL_CHAIN))
        .count();
    assert_eq!(optional, 3);
}

#[test]
fn test_automatic_semicolon_insertion() {
    let (arena, root) = parse_ok("let a = 1\nlet b = a\n++b\nreturnValue()");
    assert_eq!(statements(&arena, root).len(), 4);
}

#[test]
fn test_syntax_errors_are_reported() {
    let (_, _, diagnostics) = parse("import { from 'x';");
    assert!(diagnostics > 0);
    let (_, _, diagnostics) = parse("let x = (1 + ;");
    assert!(diagnostics > 0);
    let (_, _, diagnostics) = parse("const s = 'unterminated\n");
    assert!(diagnostics > 0);
}

#[test]
fn test_recovery_terminates_on_garbage() {
    let (arena, root, diagnostics) = parse(") ] } ) ;; @@ ###");
    assert!(diagnostics > 0);
    assert!(arena.get_source_file(arena.get(root).unwrap()).is_some());
}

#[test]
fn test_deep_nesting_reports_instead_of_overflowing() {
    let handle = std::thread::Builder::new()
        .stack_size(32 * 1024 * 1024)
        .spawn(|| {
            let source = format!("x = {}1{};", "(".repeat(2_000), ")".repeat(2_000));
            parse(&source).2
        })
        .unwrap();
    assert!(handle.join().unwrap() > 0);
}
