//! Tests for import insertion and merging.

use autoimport_emitter::emit_source_file;

use crate::resolver::ImportKind;
use crate::synthesizer::{ApplyOutcome, InsertionOrder, apply};
use crate::test_fixtures::TestContext;

fn run(source: &str, steps: &[(&str, &str, ImportKind)], order: InsertionOrder) -> String {
    let mut ctx = TestContext::new(source);
    for &(name, path, kind) in steps {
        apply(&mut ctx.arena, ctx.root, name, path, kind, order);
    }
    emit_source_file(&ctx.arena, ctx.root)
}

#[test]
fn test_insert_default() {
    let out = run("x;\n", &[("x", "m", ImportKind::Default)], InsertionOrder::Prepend);
    assert_eq!(out, "import x from \"m\";\nx;\n");
}

#[test]
fn test_member_merges_into_new_statement() {
    let out = run(
        "a;\n",
        &[
            ("x", "m", ImportKind::Member),
            ("y", "m", ImportKind::Member),
            ("z", "m", ImportKind::Member),
        ],
        InsertionOrder::Prepend,
    );
    assert_eq!(out, "import { x, y, z } from \"m\";\na;\n");
}

#[test]
fn test_default_merges_in_front_of_members() {
    let out = run(
        "import { q } from \"m\";\nx;\n",
        &[("x", "m", ImportKind::Default), ("y", "m", ImportKind::Member)],
        InsertionOrder::Prepend,
    );
    assert_eq!(out, "import x, { q, y } from \"m\";\nx;\n");
}

#[test]
fn test_namespace_gets_own_statement() {
    let out = run(
        "a;\n",
        &[
            ("ns", "@toolkit/core", ImportKind::Namespace),
            ("toolkit", "@toolkit/core", ImportKind::Default),
            ("debounce", "@toolkit/core", ImportKind::Member),
        ],
        InsertionOrder::Prepend,
    );
    assert_eq!(
        out,
        "import toolkit, { debounce } from \"@toolkit/core\";\n\
         import * as ns from \"@toolkit/core\";\na;\n"
    );
}

#[test]
fn test_second_default_gets_new_statement() {
    let out = run(
        "import a from \"m\";\nb;\n",
        &[("b", "m", ImportKind::Default)],
        InsertionOrder::Prepend,
    );
    assert_eq!(out, "import b from \"m\";\nimport a from \"m\";\nb;\n");
}

#[test]
fn test_already_imported_is_unchanged() {
    let mut ctx = TestContext::new("import { x as y } from \"m\";\ny;\n");
    let outcome = apply(&mut ctx.arena, ctx.root, "y", "m", ImportKind::Member, InsertionOrder::Prepend);
    assert_eq!(outcome, ApplyOutcome::Unchanged);
    assert!(!outcome.changed());
}

#[test]
fn test_local_name_from_other_path_is_not_a_match() {
    let mut ctx = TestContext::new("import { x } from \"other\";\n");
    let outcome = apply(&mut ctx.arena, ctx.root, "x", "m", ImportKind::Member, InsertionOrder::Prepend);
    assert!(matches!(outcome, ApplyOutcome::Inserted(_)));
}

#[test]
fn test_anonymous_once_per_path() {
    let mut ctx = TestContext::new("a + b;\n");
    let first = apply(&mut ctx.arena, ctx.root, "a", "p", ImportKind::Anonymous, InsertionOrder::Prepend);
    let second = apply(&mut ctx.arena, ctx.root, "b", "p", ImportKind::Anonymous, InsertionOrder::Prepend);
    assert!(matches!(first, ApplyOutcome::Inserted(_)));
    assert_eq!(second, ApplyOutcome::Unchanged);
    assert_eq!(emit_source_file(&ctx.arena, ctx.root), "import \"p\";\na + b;\n");
}

#[test]
fn test_member_merges_into_side_effect_import() {
    let out = run("import \"p\";\ny;\n", &[("y", "p", ImportKind::Member)], InsertionOrder::Prepend);
    assert_eq!(out, "import { y } from \"p\";\ny;\n");
}

#[test]
fn test_default_merges_into_side_effect_import() {
    let mut ctx = TestContext::new("import \"p\";\nd;\n");
    let outcome = apply(&mut ctx.arena, ctx.root, "d", "p", ImportKind::Default, InsertionOrder::Prepend);
    assert!(matches!(outcome, ApplyOutcome::Extended(_)));
    assert_eq!(emit_source_file(&ctx.arena, ctx.root), "import d from \"p\";\nd;\n");
}

#[test]
fn test_side_effect_import_takes_default_and_members() {
    let out = run(
        "import \"p\";\nd(y);\n",
        &[("y", "p", ImportKind::Member), ("d", "p", ImportKind::Default)],
        InsertionOrder::Append,
    );
    assert_eq!(out, "import d, { y } from \"p\";\nd(y);\n");
}

#[test]
fn test_anonymous_skipped_when_path_imported() {
    let out = run(
        "import { y } from \"p\";\na;\n",
        &[("a", "p", ImportKind::Anonymous)],
        InsertionOrder::Prepend,
    );
    assert_eq!(out, "import { y } from \"p\";\na;\n");
}

#[test]
fn test_prepend_puts_latest_first() {
    let out = run(
        "a;\n",
        &[("a", "first", ImportKind::Default), ("b", "second", ImportKind::Default)],
        InsertionOrder::Prepend,
    );
    assert_eq!(out, "import b from \"second\";\nimport a from \"first\";\na;\n");
}

#[test]
fn test_append_keeps_encounter_order() {
    let out = run(
        "import z from \"z\";\na;\n",
        &[("a", "first", ImportKind::Default), ("b", "second", ImportKind::Default)],
        InsertionOrder::Append,
    );
    assert_eq!(
        out,
        "import z from \"z\";\nimport a from \"first\";\nimport b from \"second\";\na;\n"
    );
}

#[test]
fn test_insertion_order_from_str() {
    assert_eq!("append".parse::<InsertionOrder>(), Ok(InsertionOrder::Append));
    assert_eq!("Prepend".parse::<InsertionOrder>(), Ok(InsertionOrder::Prepend));
    assert!("sideways".parse::<InsertionOrder>().is_err());
}
