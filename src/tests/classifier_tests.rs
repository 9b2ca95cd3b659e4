//! Tests for reference classification.

use crate::classifier::{
    ChildSlot, ParentKind, SyntacticContext, is_bound, is_inside_import_declaration,
    is_qualifying_use, is_read_position,
};
use crate::test_fixtures::TestContext;

fn reads(source: &str, name: &str, nth: usize) -> bool {
    let ctx = TestContext::new(source);
    is_qualifying_use(&ctx.arena, ctx.ident(name, nth))
}

// =============================================================================
// Pure contexts
// =============================================================================

#[test]
fn test_member_access_object_only() {
    let object = SyntacticContext::new(ParentKind::MemberAccess, ChildSlot::Object);
    let property = SyntacticContext::new(ParentKind::MemberAccess, ChildSlot::Property);
    assert!(is_read_position(object));
    assert!(!is_read_position(property));
}

#[test]
fn test_assignment_right_side_only() {
    let plain = ParentKind::Assignment {
        pattern_default: false,
    };
    assert!(is_read_position(SyntacticContext::new(plain, ChildSlot::Right)));
    assert!(!is_read_position(SyntacticContext::new(plain, ChildSlot::Left)));

    let default = ParentKind::Assignment {
        pattern_default: true,
    };
    assert!(!is_read_position(SyntacticContext::new(default, ChildSlot::Right)));
}

#[test]
fn test_update_operand_not_read() {
    let update = ParentKind::PrefixUnary { update: true };
    let negate = ParentKind::PrefixUnary { update: false };
    assert!(!is_read_position(SyntacticContext::new(update, ChildSlot::Operand)));
    assert!(is_read_position(SyntacticContext::new(negate, ChildSlot::Operand)));
    assert!(!is_read_position(SyntacticContext::new(
        ParentKind::PostfixUnary,
        ChildSlot::Operand
    )));
}

#[test]
fn test_pattern_elements_not_read() {
    let pattern = ParentKind::ArrayLiteral {
        assignment_pattern: true,
    };
    let literal = ParentKind::ArrayLiteral {
        assignment_pattern: false,
    };
    assert!(!is_read_position(SyntacticContext::new(pattern, ChildSlot::Element)));
    assert!(is_read_position(SyntacticContext::new(literal, ChildSlot::Element)));
}

#[test]
fn test_names_are_never_reads() {
    for parent in [
        ParentKind::Class,
        ParentKind::VariableDeclaration,
        ParentKind::PropertyAssignment {
            assignment_pattern: false,
        },
        ParentKind::ShorthandProperty,
    ] {
        assert!(
            !is_read_position(SyntacticContext::new(parent, ChildSlot::Name)),
            "{parent:?}"
        );
    }
    assert!(!is_read_position(SyntacticContext::new(ParentKind::Other, ChildSlot::Other)));
}

#[test]
fn test_sequence_operands_not_read() {
    assert!(!is_read_position(SyntacticContext::new(ParentKind::Sequence, ChildSlot::Left)));
    assert!(!is_read_position(SyntacticContext::new(ParentKind::Sequence, ChildSlot::Right)));
}

// =============================================================================
// Parsed contexts
// =============================================================================

#[test]
fn test_context_of_call_parts() {
    let ctx = TestContext::new("f(a, b);");
    assert_eq!(
        SyntacticContext::of(&ctx.arena, ctx.ident("f", 0)),
        SyntacticContext::new(ParentKind::Call, ChildSlot::Callee)
    );
    assert_eq!(
        SyntacticContext::of(&ctx.arena, ctx.ident("b", 0)),
        SyntacticContext::new(ParentKind::Call, ChildSlot::Argument)
    );
}

#[test]
fn test_context_looks_through_parentheses() {
    let ctx = TestContext::new("let a = ((x));");
    assert_eq!(
        SyntacticContext::of(&ctx.arena, ctx.ident("x", 0)),
        SyntacticContext::new(ParentKind::VariableDeclaration, ChildSlot::Initializer)
    );
}

#[test]
fn test_context_of_compound_assignment() {
    let ctx = TestContext::new("a += b;");
    assert_eq!(
        SyntacticContext::of(&ctx.arena, ctx.ident("b", 0)).parent,
        ParentKind::Assignment {
            pattern_default: false
        }
    );
}

#[test]
fn test_expression_positions_are_reads() {
    assert!(reads("x;", "x", 0));
    assert!(reads("let a = b + x;", "x", 0));
    assert!(reads("let a = x ? y : z;", "z", 0));
    assert!(reads("let a = b => x;", "x", 0));
    assert!(reads("if (x) {}", "x", 0));
    assert!(reads("while (x) {}", "x", 0));
    assert!(reads("do {} while (x);", "x", 0));
    assert!(reads("for (let a in x) {}", "x", 0));
    assert!(reads("for (const a of x) {}", "x", 0));
    assert!(reads("for (let i = 0; y; z) {}", "y", 0));
    assert!(reads("for (let i = 0; y; z) {}", "z", 0));
    assert!(reads("switch (x) {}", "x", 0));
    assert!(reads("function f() { return x; }", "x", 0));
    assert!(reads("throw x;", "x", 0));
    assert!(reads("+x;", "x", 0));
    assert!(reads("new x;", "x", 0));
    assert!(reads("x``;", "x", 0));
    assert!(reads("class A extends X {}", "X", 0));
    assert!(reads("export default x;", "x", 0));
    assert!(reads("let a = [x, ...y];", "y", 0));
    assert!(reads("let a = { b: x };", "x", 0));
    assert!(reads("a = x;", "x", 0));
    assert!(reads("async function f() { await x; }", "x", 0));
    assert!(reads("x.y.z;", "x", 0));
}

#[test]
fn test_non_reads() {
    assert!(!reads("x.y.z;", "y", 0));
    assert!(!reads("x.y.z;", "z", 0));
    assert!(!reads("new a.y();", "y", 0));
    assert!(!reads("let x;", "x", 0));
    assert!(!reads("x = 1;", "x", 0));
    assert!(!reads("x++;", "x", 0));
    assert!(!reads("--x;", "x", 0));
    assert!(!reads("({ x } = a);", "x", 0));
    assert!(!reads("[y] = b;", "y", 0));
    assert!(!reads("[...y] = b;", "y", 0));
    assert!(!reads("({ a: y } = b);", "y", 0));
    assert!(!reads("[a = y] = b;", "y", 0));
    assert!(!reads("let a = { b: x, y };", "y", 0));
    assert!(!reads("let a = { y: 1 };", "y", 0));
    assert!(!reads("x: for (;;) { break x; }", "x", 1));
    assert!(!reads("function x() {}", "x", 0));
    assert!(!reads("class x { y() {} }", "y", 0));
    assert!(!reads("try {} catch (q) {}", "q", 0));
    assert!(!reads("a, x;", "x", 0));
    assert!(!reads("`${x}`;", "x", 0));
}

#[test]
fn test_import_declaration_names_excluded() {
    let ctx = TestContext::new("import x, { y as z } from \"m\";\nx;");
    assert!(is_inside_import_declaration(&ctx.arena, ctx.ident("x", 0)));
    assert!(is_inside_import_declaration(&ctx.arena, ctx.ident("y", 0)));
    assert!(!is_inside_import_declaration(&ctx.arena, ctx.ident("x", 1)));
    assert!(!is_qualifying_use(&ctx.arena, ctx.ident("z", 0)));
}

#[test]
fn test_is_bound_respects_scopes() {
    let ctx = TestContext::new("let a;\n(function () { let b; a; b; c; })();");
    let inner = ctx
        .binder
        .find_enclosing_scope(&ctx.arena, ctx.ident("c", 0))
        .expect("scope");
    assert!(is_bound(&ctx.binder, "a", inner));
    assert!(is_bound(&ctx.binder, "b", inner));
    assert!(!is_bound(&ctx.binder, "c", inner));

    let module = ctx.binder.module_scope().expect("module scope");
    assert!(!is_bound(&ctx.binder, "b", module));
}
