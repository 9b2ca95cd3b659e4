//! Emitter tests: inserted imports are printed, everything else is copied.

use autoimport_emitter::{NewLineKind, Printer, emit_source_file, quote_string};
use autoimport_parser::{NodeArena, NodeIndex, ParserState};

fn parse(source: &str) -> (NodeArena, NodeIndex) {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty());
    (parser.into_arena(), root)
}

fn statements(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    let file = arena.get_source_file(arena.get(root).unwrap()).unwrap();
    file.statements.nodes.clone()
}

#[test]
fn test_unchanged_file_round_trips() {
    let source = "// header\n'use strict';\nimport a from 'a' // trailing\n\nconst  x =  1;\n";
    let (arena, root) = parse(source);
    assert_eq!(emit_source_file(&arena, root), source);
}

#[test]
fn test_prepend_at_top_of_file() {
    let source = "// keep me\nfoo(x);\n";
    let (mut arena, root) = parse(source);
    let spec = arena.create_import_default_specifier("x");
    let decl = arena.create_import_declaration(vec![spec], "some-path");
    assert!(arena.insert_statement(root, 0, decl));
    assert_eq!(
        emit_source_file(&arena, root),
        "import x from \"some-path\";\n// keep me\nfoo(x);\n"
    );
}

#[test]
fn test_insert_after_directive_prologue() {
    let source = "\"use strict\";\nfoo(x, y);";
    let (mut arena, root) = parse(source);
    let first = arena.create_import_specifier("y", "y");
    let first = arena.create_import_declaration(vec![first], "m");
    let second = arena.create_import_declaration(Vec::new(), "side");
    arena.insert_statement(root, 0, first);
    arena.insert_statement(root, 0, second);
    assert_eq!(
        emit_source_file(&arena, root),
        "\"use strict\";\nimport \"side\";\nimport { y } from \"m\";\nfoo(x, y);"
    );
}

#[test]
fn test_insert_after_shebang() {
    let source = "#!/usr/bin/env node\nrun();\n";
    let (mut arena, root) = parse(source);
    let ns = arena.create_namespace_import("path");
    let decl = arena.create_import_declaration(vec![ns], "node:path");
    arena.insert_statement(root, 0, decl);
    assert_eq!(
        emit_source_file(&arena, root),
        "#!/usr/bin/env node\nimport * as path from \"node:path\";\nrun();\n"
    );
}

#[test]
fn test_append_after_last_import() {
    let source = "import a from 'a';\n\nuse(a, b);\n";
    let (mut arena, root) = parse(source);
    let spec = arena.create_import_default_specifier("b");
    let decl = arena.create_import_declaration(vec![spec], "b");
    arena.insert_statement(root, 1, decl);
    assert_eq!(
        emit_source_file(&arena, root),
        "import a from 'a';\nimport b from \"b\";\n\nuse(a, b);\n"
    );
}

#[test]
fn test_modified_import_is_reprinted_in_place() {
    let source = "/* lead */ import { y } from 'some-path' ; rest(x, z);\n";
    let (mut arena, root) = parse(source);
    let decl = statements(&arena, root)[0];
    let default = arena.create_import_default_specifier("x");
    let member = arena.create_import_specifier("z", "z");
    assert!(arena.add_specifier_to_import(decl, default, true));
    assert!(arena.add_specifier_to_import(decl, member, false));
    assert_eq!(
        emit_source_file(&arena, root),
        "/* lead */ import x, { y, z } from 'some-path'; rest(x, z);\n"
    );
}

#[test]
fn test_reprint_keeps_original_specifier_text_and_attributes() {
    let source = "import { \"a-b\" as ab } from \"./data.json\" with { type: \"json\" };\n";
    let (mut arena, root) = parse(source);
    let decl = statements(&arena, root)[0];
    let member = arena.create_import_specifier("c", "c");
    arena.add_specifier_to_import(decl, member, false);
    assert_eq!(
        emit_source_file(&arena, root),
        "import { \"a-b\" as ab, c } from \"./data.json\" with { type: \"json\" };\n"
    );
}

#[test]
fn test_crlf_is_preserved_for_inserted_lines() {
    let source = "'use strict';\r\nfoo();\r\n";
    let (mut arena, root) = parse(source);
    let decl = arena.create_import_declaration(Vec::new(), "polyfill");
    arena.insert_statement(root, 0, decl);
    assert_eq!(
        emit_source_file(&arena, root),
        "'use strict';\r\nimport \"polyfill\";\r\nfoo();\r\n"
    );
}

#[test]
fn test_empty_file() {
    let (mut arena, root) = parse("");
    let spec = arena.create_import_default_specifier("x");
    let decl = arena.create_import_declaration(vec![spec], "x");
    arena.insert_statement(root, 0, decl);
    assert_eq!(emit_source_file(&arena, root), "import x from \"x\";\n");
}

#[test]
fn test_print_single_declaration() {
    let (mut arena, _) = parse("");
    let default = arena.create_import_default_specifier("d");
    let renamed = arena.create_import_specifier("orig", "local");
    let decl = arena.create_import_declaration(vec![default, renamed], "m");
    let mut printer = Printer::new(&arena, "");
    printer.emit_import_declaration(decl);
    assert_eq!(
        printer.get_output(),
        "import d, { orig as local } from \"m\";"
    );
}

#[test]
fn test_quote_string_escapes() {
    assert_eq!(quote_string("plain"), "\"plain\"");
    assert_eq!(quote_string("a\"b\\c"), "\"a\\\"b\\\\c\"");
    assert_eq!(quote_string("line\nbreak"), "\"line\\nbreak\"");
}

#[test]
fn test_newline_detection() {
    assert_eq!(NewLineKind::detect("a\r\nb"), NewLineKind::CarriageReturnLineFeed);
    assert_eq!(NewLineKind::detect("a\nb\r\n"), NewLineKind::LineFeed);
    assert_eq!(NewLineKind::detect(""), NewLineKind::LineFeed);
}
