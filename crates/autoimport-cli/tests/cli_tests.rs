//! Driver tests over a temporary project directory.

use autoimport_cli::args::CliArgs;
use autoimport_cli::driver;
use clap::Parser;
use std::path::Path;

const CONFIG: &str = r#"{
    "declarations": [
        { "default": "React", "path": "react" },
        { "default": "styles", "path": "./[name].css" }
    ]
}"#;

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("autoimport.json"), CONFIG).unwrap();
    dir
}

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, text).unwrap();
}

fn read(root: &Path, relative: &str) -> String {
    std::fs::read_to_string(root.join(relative)).unwrap()
}

struct Run {
    summary: driver::RunSummary,
    stdout: String,
    stderr: String,
}

fn run(cwd: &Path, argv: &[&str], stdin: &str) -> anyhow::Result<Run> {
    let args = CliArgs::try_parse_from(std::iter::once("autoimport").chain(argv.iter().copied()))?;
    let config = driver::resolve_config(&args, cwd)?;
    let rewriter = driver::build_rewriter(&args, &config)?;
    let mut out = Vec::new();
    let mut err = Vec::new();
    let summary = if args.paths.is_empty() {
        driver::run_stdin(&args, &rewriter, &mut stdin.as_bytes(), &mut out, &mut err)?
    } else {
        driver::run_files(&args, &config, &rewriter, cwd, &mut out, &mut err)?
    };
    Ok(Run {
        summary,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    })
}

#[test]
fn test_write_rewrites_in_place() {
    let dir = project();
    write(dir.path(), "src/Button.js", "export default () => React.createElement('b', { className: styles.b });\n");
    write(dir.path(), "src/plain.js", "const React = 1;\n");
    write(dir.path(), "node_modules/lib/index.js", "React;\n");

    let result = run(dir.path(), &["--write", "."], "").unwrap();
    assert_eq!(result.summary.files, 2);
    assert_eq!(result.summary.changed.len(), 1);
    assert_eq!(
        read(dir.path(), "src/Button.js"),
        "import styles from \"./Button.css\";\nimport React from \"react\";\n\
         export default () => React.createElement('b', { className: styles.b });\n"
    );
    assert_eq!(read(dir.path(), "src/plain.js"), "const React = 1;\n");
    assert_eq!(read(dir.path(), "node_modules/lib/index.js"), "React;\n");
}

#[test]
fn test_check_lists_files_without_writing() {
    let dir = project();
    write(dir.path(), "a.js", "React;\n");
    write(dir.path(), "b.js", "import React from \"react\";\nReact;\n");

    let result = run(dir.path(), &["--check", "."], "").unwrap();
    assert_eq!(result.summary.changed.len(), 1);
    assert!(result.stdout.trim_end().ends_with("a.js"), "{}", result.stdout);
    assert_eq!(read(dir.path(), "a.js"), "React;\n");
}

#[test]
fn test_single_file_prints_to_stdout() {
    let dir = project();
    write(dir.path(), "a.js", "React;\n");
    let result = run(dir.path(), &["a.js"], "").unwrap();
    assert_eq!(result.stdout, "import React from \"react\";\nReact;\n");
    assert_eq!(read(dir.path(), "a.js"), "React;\n");
}

#[test]
fn test_many_files_need_write_or_check() {
    let dir = project();
    write(dir.path(), "a.js", "React;\n");
    write(dir.path(), "b.js", "React;\n");
    assert!(run(dir.path(), &["."], "").is_err());
}

#[test]
fn test_stdin_uses_stdin_filename() {
    let dir = project();
    let result = run(dir.path(), &["--stdin-filename", "src/Card.js"], "styles.card;\n").unwrap();
    assert_eq!(result.stdout, "import styles from \"./Card.css\";\nstyles.card;\n");
}

#[test]
fn test_insertion_order_flag() {
    let dir = project();
    let result = run(
        dir.path(),
        &["--insertion-order", "append", "--stdin-filename", "x.js"],
        "import a from \"a\";\nReact(styles);\n",
    )
    .unwrap();
    assert_eq!(
        result.stdout,
        "import a from \"a\";\nimport React from \"react\";\nimport styles from \"./x.css\";\nReact(styles);\n"
    );
}

#[test]
fn test_parse_errors_reported_and_file_untouched() {
    let dir = project();
    write(dir.path(), "bad.js", "React(;\n");
    let result = run(dir.path(), &["--write", "--no-color", "bad.js"], "").unwrap();
    assert!(result.summary.has_errors());
    assert!(result.summary.changed.is_empty());
    assert!(result.stderr.contains("bad.js:1:7 - error"), "{}", result.stderr);
    assert_eq!(read(dir.path(), "bad.js"), "React(;\n");
}

#[test]
fn test_json_diagnostics() {
    let dir = project();
    let result = run(dir.path(), &["--format", "json"], "React(;\n").unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&result.stderr).unwrap();
    assert_eq!(parsed.as_array().map(|a| a.is_empty()), Some(false));
    assert_eq!(result.stdout, "React(;\n");
}

#[test]
fn test_missing_explicit_config_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(run(dir.path(), &["-c", "nope.json"], "").is_err());
}

#[test]
fn test_no_config_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let result = run(dir.path(), &[], "React;\n").unwrap();
    assert_eq!(result.stdout, "React;\n");
    assert!(result.summary.changed.is_empty());
}
