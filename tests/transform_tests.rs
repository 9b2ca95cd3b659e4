//! End-to-end rewrite tests.
//!
//! Most cases compare with all whitespace removed, so the expected text can
//! be laid out for reading.

use autoimport::{AutoImport, InsertionOrder, parse_config};

fn rewriter(declarations: &str) -> AutoImport {
    let config = parse_config(&format!(r#"{{ "declarations": {declarations} }}"#))
        .expect("config parses");
    AutoImport::from_config(&config).expect("config compiles")
}

fn squash(text: &str) -> String {
    text.split_whitespace().collect()
}

#[track_caller]
fn check_with_file(input: &str, expected: &str, declarations: &str, file_name: &str) {
    let result = rewriter(declarations).transform(input, Some(file_name));
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    assert_eq!(squash(&result.code), squash(expected), "output:\n{}", result.code);
}

#[track_caller]
fn check(input: &str, expected: &str, declarations: &str) {
    check_with_file(input, expected, declarations, "default.js");
}

#[track_caller]
fn check_unchanged(input: &str, declarations: &str) {
    let result = rewriter(declarations).transform(input, Some("default.js"));
    assert!(!result.changed, "unexpected rewrite:\n{}", result.code);
    assert_eq!(result.code, input);
}

// =============================================================================
// Import kinds
// =============================================================================

#[test]
fn test_default_import() {
    check(
        "someVariable;",
        r#"import someVariable from "some-path/some-module.js"; someVariable;"#,
        r#"[{ "default": "someVariable", "path": "some-path/some-module.js" }]"#,
    );
}

#[test]
fn test_existing_import_kept() {
    check_unchanged(
        "import someVariable from \"some-path/some-module.js\";\n\nsomeVariable;\n",
        r#"[{ "default": "someVariable", "path": "some-path/some-module.js" }]"#,
    );
}

#[test]
fn test_member_import() {
    check(
        "someVariable;",
        r#"import { someVariable } from "some-path/some-module.js"; someVariable;"#,
        r#"[{ "members": ["someVariable"], "path": "some-path/some-module.js" }]"#,
    );
}

#[test]
fn test_default_member_and_namespace_from_one_module() {
    check(
        "toolkitNamespace.debounce;\ntoolkit.debounce;\ndebounce;\ntoolkit();\n",
        r#"
            import toolkit, { debounce } from "@toolkit/core";
            import * as toolkitNamespace from "@toolkit/core";

            toolkitNamespace.debounce;
            toolkit.debounce;
            debounce;
            toolkit();
        "#,
        r#"[{
            "members": ["debounce"],
            "namespace": "toolkitNamespace",
            "default": "toolkit",
            "path": "@toolkit/core"
        }]"#,
    );
}

#[test]
fn test_anonymous_import() {
    check(
        "someVariable;",
        r#"import "some-path/some-module.js"; someVariable;"#,
        r#"[{ "anonymous": ["someVariable"], "path": "some-path/some-module.js" }]"#,
    );
}

#[test]
fn test_anonymous_import_added_once() {
    check(
        "let x = a + b;",
        r#"import "some-path/some-module.js"; let x = a + b;"#,
        r#"[{ "anonymous": ["a", "b"], "path": "some-path/some-module.js" }]"#,
    );
}

// =============================================================================
// Scopes
// =============================================================================

const NESTED_SCOPES: &str = r#"
    let a;

    (function () {
        let b;

        (function () {
            let c = a;
            let d = x();
            let e = a;
            let f = y;
            let g = z;
        })();
    })();
"#;

#[test]
fn test_nested_scopes_with_existing_import() {
    let input = format!("import z from \"some-path/y.js\";\n{NESTED_SCOPES}");
    let expected = format!(
        "import x from \"some-path/x.js\";\nimport z, {{ y }} from \"some-path/y.js\";\n{NESTED_SCOPES}"
    );
    check(
        &input,
        &expected,
        r#"[
            { "default": "x", "path": "some-path/x.js" },
            { "members": ["y"], "path": "some-path/y.js" }
        ]"#,
    );
}

#[test]
fn test_nested_scopes_merge_into_member_import() {
    let input = format!("import {{ q }} from \"some-path\";\n{NESTED_SCOPES}");
    let expected = format!("import x, {{ q, y, z }} from \"some-path\";\n{NESTED_SCOPES}");
    check(
        &input,
        &expected,
        r#"[{ "path": "some-path", "default": "x", "members": ["y", "z"] }]"#,
    );
}

#[test]
fn test_declared_name_not_imported() {
    check_unchanged(
        "let someVariable;\n",
        r#"[{ "default": "someVariable", "path": "some-path/some-module.js" }]"#,
    );
}

#[test]
fn test_hoisted_declarations_bind_earlier_uses() {
    check_unchanged("x();\nfunction x() {}\ny;\nvar y;\n", r#"[{ "members": ["x", "y"], "path": "m" }]"#);
}

#[test]
fn test_parameters_shadow() {
    check_unchanged(
        "function f(x, { y }, [z] = []) { return x + y + z; }\n",
        r#"[{ "members": ["x", "y", "z"], "path": "m" }]"#,
    );
}

#[test]
fn test_block_scoped_name_only_shadows_inside_block() {
    check(
        "{ let x; x; }\nx;\n",
        r#"import { x } from "m"; { let x; x; } x;"#,
        r#"[{ "members": ["x"], "path": "m" }]"#,
    );
}

#[test]
fn test_repeated_uses_import_once() {
    check(
        "(function () {\n    let a = x;\n    let b = x;\n} ());\n",
        r#"import x from "some-path"; (function () { let a = x; let b = x; } ());"#,
        r#"[{ "default": "x", "path": "some-path" }]"#,
    );
}

// =============================================================================
// Reference positions
// =============================================================================

#[test]
fn test_member_chain_imports_object_only() {
    check(
        "x.y.z;",
        r#"import { x } from "some-path"; x.y.z;"#,
        r#"[{ "members": ["x", "y", "z"], "path": "some-path" }]"#,
    );
}

#[test]
fn test_call_on_member() {
    check(
        "let a = x.b();\nlet c = d.b();\n",
        r#"import x from "some-path"; let a = x.b(); let c = d.b();"#,
        r#"[{ "default": "x", "path": "some-path" }]"#,
    );
}

#[test]
fn test_labels_ignored() {
    check_unchanged(
        "x:\nfor (let i = 0; i < 10; i++) {\n    if (i) break x;\n\n    y:\n    for (let i = 0; i < 10; i++) {\n        if (i) continue y;\n    }\n}\n",
        r#"[{ "members": ["x", "y"], "path": "some-path" }]"#,
    );
}

#[test]
fn test_class_method_and_catch_names_ignored() {
    check_unchanged(
        "try {\n    class x {\n        y() {}\n    }\n\n    a = class z {};\n} catch (q) {}\n",
        r#"[{ "members": ["x", "y", "z", "q"], "path": "some-path" }]"#,
    );
}

#[test]
fn test_function_names_ignored() {
    check_unchanged(
        "function x() { }\n\nlet a = function y() {};\nlet b = {\n    c: function z() {}\n};\n",
        r#"[{ "members": ["x", "y", "z"], "path": "some-path" }]"#,
    );
}

#[test]
fn test_destructuring_targets_ignored() {
    check_unchanged(
        "({ x } = a);\n\n[y] = b;\n",
        r#"[{ "members": ["x", "y", "z"], "path": "some-path" }]"#,
    );
}

#[test]
fn test_export_default() {
    check(
        "export default x;",
        r#"import x from "some-path"; export default x;"#,
        r#"[{ "default": "x", "path": "some-path" }]"#,
    );
}

#[test]
fn test_object_literal_values_not_keys_or_shorthand() {
    check(
        "let a = {\n    b: x,\n    y,\n    z: c\n};\n",
        r#"import { x } from "some-path"; let a = { b: x, y, z: c };"#,
        r#"[{ "members": ["x", "y", "z"], "path": "some-path" }]"#,
    );
}

#[test]
fn test_binary_operand() {
    check(
        "let a = b + x;",
        r#"import x from "some-path"; let a = b + x;"#,
        r#"[{ "default": "x", "path": "some-path" }]"#,
    );
}

#[test]
fn test_conditional_branches() {
    check(
        "let a = x ? y : z;",
        r#"import { x, y, z } from "some-path"; let a = x ? y : z;"#,
        r#"[{ "members": ["x", "y", "z"], "path": "some-path" }]"#,
    );
}

#[test]
fn test_arrow_body_argument_and_if_condition() {
    check(
        "let a = b => x;\n\nlet c = d(y);\n\nif (z) {}\n",
        r#"import { x, y, z } from "some-path"; let a = b => x; let c = d(y); if (z) {}"#,
        r#"[{ "members": ["x", "y", "z"], "path": "some-path" }]"#,
    );
}

#[test]
fn test_loop_heads() {
    check(
        "for (let a in x) {}\n\nfor (let i = 0; y; z) {}\n",
        r#"import { x, y, z } from "some-path"; for (let a in x) {} for (let i = 0; y; z) {}"#,
        r#"[{ "members": ["x", "y", "z"], "path": "some-path" }]"#,
    );
}

#[test]
fn test_new_callee() {
    check(
        "new x;\nnew a.y();\nnew z();\n",
        r#"import { x, z } from "some-path"; new x; new a.y(); new z();"#,
        r#"[{ "members": ["x", "y", "z"], "path": "some-path" }]"#,
    );
}

#[test]
fn test_return_tag_and_switch() {
    check(
        "function a() {\n    return x;\n}\n\ny``;\n\nswitch(z) {}\n",
        r#"import { x, y, z } from "some-path"; function a() { return x; } y``; switch(z) {}"#,
        r#"[{ "members": ["x", "y", "z"], "path": "some-path" }]"#,
    );
}

#[test]
fn test_throw_and_unary() {
    check(
        "throw x;\n+y;\n",
        r#"import { x, y } from "some-path"; throw x; +y;"#,
        r#"[{ "members": ["x", "y", "z"], "path": "some-path" }]"#,
    );
}

#[test]
fn test_class_heritage() {
    check(
        "class A extends X { }\n\nlet B = class B extends Y { };\n",
        r#"import { X, Y } from "some-path"; class A extends X { } let B = class B extends Y { };"#,
        r#"[{ "members": ["X", "Y"], "path": "some-path" }]"#,
    );
}

#[test]
fn test_assignment_target_and_update_ignored() {
    check_unchanged("x = 1;\ny++;\n--z;\n", r#"[{ "members": ["x", "y", "z"], "path": "m" }]"#);
}

// =============================================================================
// Paths
// =============================================================================

#[test]
fn test_name_placeholder() {
    check_with_file(
        "styles.className;",
        r#"import styles from "./componentName.css"; styles.className;"#,
        r#"[{ "default": "styles", "path": "./[name].css" }]"#,
        "./componentName.js",
    );
}

#[test]
fn test_name_placeholder_with_custom_replacement() {
    check_with_file(
        "styles.className;",
        r#"import styles from "./name.styles.css"; styles.className;"#,
        r#"[{
            "default": "styles",
            "path": "./[name].css",
            "nameReplacePattern": ".component.js$",
            "nameReplaceString": ".styles"
        }]"#,
        "./name.component.js",
    );
}

#[test]
fn test_name_placeholder_unknown_file() {
    let result = rewriter(r#"[{ "default": "styles", "path": "./[name].css" }]"#)
        .transform("styles;\n", None);
    assert_eq!(result.code, "import styles from \"./.css\";\nstyles;\n");
}

// =============================================================================
// Whole-file behavior
// =============================================================================

#[test]
fn test_exact_output_after_directives() {
    let result = rewriter(r#"[{ "members": ["x"], "path": "m" }]"#)
        .transform("'use strict';\nx();\n", Some("a.js"));
    assert!(result.changed);
    assert_eq!(result.code, "'use strict';\nimport { x } from \"m\";\nx();\n");
}

#[test]
fn test_rewrite_is_idempotent() {
    let rewriter = rewriter(
        r#"[
            { "default": "React", "members": ["useState"], "path": "react" },
            { "namespace": "path", "path": "node:path" },
            { "anonymous": ["fetch"], "path": "whatwg-fetch" }
        ]"#,
    );
    let source = "const [s] = useState(0);\nReact.render(path.join(s));\nfetch(s);\n";
    let first = rewriter.transform(source, Some("app.js"));
    assert!(first.changed);
    let second = rewriter.transform(&first.code, Some("app.js"));
    assert!(!second.changed);
    assert_eq!(second.code, first.code);
}

#[test]
fn test_append_order() {
    let result = rewriter(
        r#"[
            { "default": "a", "path": "first" },
            { "default": "b", "path": "second" }
        ]"#,
    )
    .with_insertion_order(InsertionOrder::Append)
    .transform("import z from \"z\";\na(b, z);\n", Some("app.js"));
    assert_eq!(
        result.code,
        "import z from \"z\";\nimport a from \"first\";\nimport b from \"second\";\na(b, z);\n"
    );
}

#[test]
fn test_excluded_file_skipped() {
    let result = rewriter(r#"[{ "members": ["x"], "path": "m" }]"#)
        .transform("x;\n", Some("node_modules/pkg/index.js"));
    assert!(result.skipped);
    assert!(!result.changed);
    assert_eq!(result.code, "x;\n");
}

#[test]
fn test_custom_exclude() {
    let config = parse_config(r#"{ "declarations": [{ "members": ["x"], "path": "m" }], "exclude": ["vendor/**"] }"#)
        .unwrap();
    let rewriter = AutoImport::from_config(&config).unwrap();
    assert!(rewriter.transform("x;", Some("vendor/lib.js")).skipped);
    assert!(rewriter.transform("x;", Some("node_modules/lib.js")).changed);
}

#[test]
fn test_unconfigured_declarations_do_nothing() {
    for config in [r#"{}"#, r#"{ "declarations": null }"#, r#"{ "declarations": "x" }"#] {
        let rewriter = AutoImport::from_config(&parse_config(config).unwrap()).unwrap();
        let result = rewriter.transform("x;", Some("a.js"));
        assert!(!result.changed, "{config}");
        assert_eq!(result.code, "x;");
    }
}

#[test]
fn test_syntax_error_leaves_file_untouched() {
    let source = "x(;\n";
    let result = rewriter(r#"[{ "members": ["x"], "path": "m" }]"#).transform(source, Some("bad.js"));
    assert!(result.has_errors());
    assert!(!result.changed);
    assert_eq!(result.code, source);
    assert_eq!(result.diagnostics[0].file, "bad.js");
}

#[test]
fn test_globals_are_not_special() {
    check(
        "console.log(1);",
        r#"import console from "my-console"; console.log(1);"#,
        r#"[{ "default": "console", "path": "my-console" }]"#,
    );
}
