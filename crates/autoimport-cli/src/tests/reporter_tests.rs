use crate::reporter::Reporter;
use autoimport_common::Diagnostic;

#[test]
fn test_location_and_snippet() {
    let mut reporter = Reporter::new(false);
    reporter.add_source("bad.js", "ok();\nfoo(;\n");
    let diagnostic = Diagnostic::error("bad.js", 10, 1, "Expression expected.", 1109);
    assert_eq!(
        reporter.format_diagnostic(&diagnostic),
        "bad.js:2:5 - error 1109: Expression expected.\n    2   foo(;\n            ~"
    );
}

#[test]
fn test_unknown_source_prints_file_only() {
    let reporter = Reporter::new(false);
    let diagnostic = Diagnostic::error("gone.js", 3, 1, "Invalid character.", 1127);
    assert_eq!(
        reporter.format_diagnostic(&diagnostic),
        "gone.js - error 1127: Invalid character."
    );
}

#[test]
fn test_render_joins_with_newlines() {
    let reporter = Reporter::new(false);
    let diagnostics = vec![
        Diagnostic::error("a.js", 0, 0, "first", 1),
        Diagnostic::error("b.js", 0, 0, "second", 2),
    ];
    assert_eq!(
        reporter.render(&diagnostics),
        "a.js - error 1: first\nb.js - error 2: second"
    );
}
