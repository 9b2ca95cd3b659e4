//! Tests for config parsing and declaration compilation.

use crate::config::{AutoImportConfig, DEFAULT_EXCLUDE, load_config, parse_config};
use crate::synthesizer::InsertionOrder;
use crate::transform::{ExcludeGlobs, FileFilter};

#[test]
fn test_missing_declarations_is_unconfigured() {
    let config = parse_config("{}").unwrap();
    let table = config.declaration_table().unwrap();
    assert!(!table.is_configured());
    assert!(table.is_empty());
}

#[test]
fn test_non_array_declarations_is_unconfigured() {
    for value in ["null", "42", "\"react\"", "{ \"path\": \"x\" }"] {
        let config = parse_config(&format!("{{ \"declarations\": {value} }}")).unwrap();
        assert!(
            !config.declaration_table().unwrap().is_configured(),
            "declarations: {value}"
        );
    }
}

#[test]
fn test_empty_array_is_configured() {
    let config = parse_config(r#"{ "declarations": [] }"#).unwrap();
    let table = config.declaration_table().unwrap();
    assert!(table.is_configured());
    assert_eq!(table.len(), 0);
}

#[test]
fn test_declaration_fields() {
    let config = parse_config(
        r#"{
            "declarations": [
                { "path": "@toolkit/core", "default": "toolkit", "members": ["debounce"], "namespace": "tk" },
                { "path": "polyfill", "anonymous": ["fetch"] }
            ]
        }"#,
    )
    .unwrap();
    let table = config.declaration_table().unwrap();
    let declarations: Vec<_> = table.iter().collect();
    assert_eq!(declarations.len(), 2);
    assert_eq!(declarations[0].default.as_deref(), Some("toolkit"));
    assert_eq!(declarations[0].members, vec!["debounce".to_string()]);
    assert_eq!(declarations[0].namespace.as_deref(), Some("tk"));
    assert!(declarations[0].name_replace.is_none());
    assert_eq!(declarations[1].anonymous, vec!["fetch".to_string()]);

    assert!(table.mentions("debounce"));
    assert!(table.mentions("fetch"));
    assert!(!table.mentions("lodash"));
}

#[test]
fn test_imports_alias_for_members() {
    let config = parse_config(r#"{ "declarations": [{ "path": "m", "imports": ["a"] }] }"#).unwrap();
    let table = config.declaration_table().unwrap();
    assert!(table.mentions("a"));
}

#[test]
fn test_placeholder_compiles_name_replace() {
    let config = parse_config(
        r#"{ "declarations": [{ "path": "./[name].css", "default": "styles" }] }"#,
    )
    .unwrap();
    let table = config.declaration_table().unwrap();
    let declaration = table.iter().next().unwrap();
    let name_replace = declaration.name_replace.as_ref().expect("placeholder path");
    assert!(name_replace.pattern.is_match("button.js"));
    assert_eq!(name_replace.replacement, "");
}

#[test]
fn test_invalid_pattern_is_error() {
    let config = parse_config(
        r#"{ "declarations": [{ "path": "./[name].css", "default": "s", "nameReplacePattern": "(" }] }"#,
    )
    .unwrap();
    let err = config.declaration_table().unwrap_err();
    assert!(format!("{err:#}").contains("nameReplacePattern"), "{err:#}");
}

#[test]
fn test_empty_path_is_error() {
    let config = parse_config(r#"{ "declarations": [{ "path": "", "default": "x" }] }"#).unwrap();
    assert!(config.declaration_table().is_err());
}

#[test]
fn test_defaults() {
    let config = AutoImportConfig::default();
    assert_eq!(config.exclude_patterns(), DEFAULT_EXCLUDE);
    assert_eq!(config.extensions(), vec!["js", "mjs", "cjs"]);
    assert_eq!(config.insertion_order(), InsertionOrder::Prepend);
}

#[test]
fn test_options_parse() {
    let config = parse_config(
        r#"{ "exclude": ["vendor/**"], "insertionOrder": "append", "extensions": [".jsx", "js"] }"#,
    )
    .unwrap();
    assert_eq!(config.exclude_patterns(), vec!["vendor/**".to_string()]);
    assert_eq!(config.insertion_order(), InsertionOrder::Append);
    assert_eq!(config.extensions(), vec!["jsx", "js"]);
}

#[test]
fn test_malformed_json_is_error() {
    assert!(parse_config("{ declarations: [").is_err());
}

#[test]
fn test_load_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("autoimport.json");
    std::fs::write(&path, r#"{ "declarations": [{ "path": "m", "default": "d" }] }"#).unwrap();
    let config = load_config(&path).unwrap();
    assert!(config.declaration_table().unwrap().mentions("d"));

    let missing = dir.path().join("missing.json");
    let err = load_config(&missing).unwrap_err();
    assert!(format!("{err}").contains("missing.json"));
}

#[test]
fn test_default_exclude_patterns_compile() {
    assert!(ExcludeGlobs::new(DEFAULT_EXCLUDE).is_ok());
    let filter = ExcludeGlobs::default();
    assert!(filter.is_excluded("node_modules/react/index.js"));
    assert!(filter.is_excluded("packages/app/node_modules/lib.js"));
    assert!(!filter.is_excluded("src/node_modules_helper.js"));
}
