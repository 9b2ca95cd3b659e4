//! Tests for name matching and `[name]` path resolution.

use crate::resolver::{ImportKind, base_name, resolve};
use crate::test_fixtures::table;

#[test]
fn test_kinds_in_declaration_order() {
    let table = table(
        r#"[
            { "path": "a", "members": ["x"] },
            { "path": "b", "default": "x", "anonymous": ["x"], "namespace": "x" }
        ]"#,
    );
    let matches = resolve("x", Some("file.js"), &table);
    let got: Vec<_> = matches.iter().map(|m| (m.path.as_str(), m.kind)).collect();
    assert_eq!(
        got,
        vec![
            ("a", ImportKind::Member),
            ("b", ImportKind::Default),
            ("b", ImportKind::Anonymous),
            ("b", ImportKind::Namespace),
        ]
    );
}

#[test]
fn test_no_match() {
    let table = table(r#"[{ "path": "a", "members": ["x"] }]"#);
    assert!(resolve("y", None, &table).is_empty());
}

#[test]
fn test_name_placeholder_default_pattern() {
    let table = table(r#"[{ "path": "./[name].css", "default": "styles" }]"#);
    let matches = resolve("styles", Some("./componentName.js"), &table);
    assert_eq!(matches[0].path, "./componentName.css");
}

#[test]
fn test_name_placeholder_custom_pattern() {
    let table = table(
        r#"[{
            "path": "./[name].css",
            "default": "styles",
            "nameReplacePattern": ".component.js$",
            "nameReplaceString": ".styles"
        }]"#,
    );
    let matches = resolve("styles", Some("src/name.component.js"), &table);
    assert_eq!(matches[0].path, "./name.styles.css");
}

#[test]
fn test_name_placeholder_replaced_everywhere() {
    let table = table(r#"[{ "path": "./[name]/[name].css", "anonymous": ["css"] }]"#);
    let matches = resolve("css", Some("button.js"), &table);
    assert_eq!(matches[0].path, "./button/button.css");
}

#[test]
fn test_unknown_file_name_substitutes_empty() {
    let table = table(r#"[{ "path": "./[name].css", "default": "styles" }]"#);
    let matches = resolve("styles", None, &table);
    assert_eq!(matches[0].path, "./.css");
}

#[test]
fn test_non_js_extension_kept() {
    let table = table(r#"[{ "path": "./[name].css", "default": "styles" }]"#);
    let matches = resolve("styles", Some("widget.mjs"), &table);
    assert_eq!(matches[0].path, "./widget.mjs.css");
}

#[test]
fn test_base_name() {
    assert_eq!(base_name("a/b/c.js"), "c.js");
    assert_eq!(base_name("c.js"), "c.js");
    assert_eq!(base_name("a\\b.js"), "b.js");
}
