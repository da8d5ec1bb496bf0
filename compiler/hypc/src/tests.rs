#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::error::Error as _;

use hyp_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

use super::*;

fn run(source: &str) -> (Result<Value, ExecError>, String) {
    run_with(source, &Config::default())
}

fn run_with(source: &str, config: &Config) -> (Result<Value, ExecError>, String) {
    let handler = buffer_handler();
    let result = execute_with(source, Some("test.hyp"), config, handler.clone());
    (result, handler.output())
}

#[test]
fn prints_and_returns_last_value() {
    let (result, output) = run("print(1 + 2, \"hi\");\nlet x = [1, 2];\nlen(x);");
    assert_eq!(result.unwrap(), Value::Number(2.0));
    assert_eq!(output, "3 hi\n");
}

#[test]
fn main_result_is_returned() {
    let (result, output) = run("fn main() { print(\"in main\"); return 42; }");
    assert_eq!(result.unwrap(), Value::Number(42.0));
    assert_eq!(output, "in main\n");
}

#[test]
fn top_level_return_is_the_result() {
    let (result, output) = run("print(1); return 2; print(3);");
    assert_eq!(result.unwrap(), Value::Number(2.0));
    assert_eq!(output, "1\n");
}

#[test]
fn runtime_error_is_located() {
    let (result, output) = run("print(1);\nlet a = 1;\nprint(a / 0);\nprint(2);");
    let err = result.unwrap_err();
    assert_eq!(err.message(), "Division by zero");
    assert_eq!(err.line(), 3);
    assert_eq!(err.column(), Some(7));
    assert_eq!(err.file(), "test.hyp");
    assert_eq!(err.to_string(), "test.hyp:3:7: Division by zero");
    assert!(err.source().is_some());
    // Output produced before the failure is kept; nothing after it runs.
    assert_eq!(output, "1\n");
}

#[test]
fn parse_errors_are_all_reported() {
    let (result, output) = run("let = 1;\nlet y = ;\nprint(\"never\");");
    let err = result.unwrap_err();
    let ExecError::Parse { diagnostics, .. } = &err else {
        panic!("expected a parse error, got {err:?}");
    };
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(err.message(), "Expected variable name");
    assert_eq!((err.line(), err.column()), (1, Some(5)));
    assert_eq!(
        err.to_string(),
        "test.hyp: [line 1:5] Error at '=': Expected variable name (and 1 more)"
    );
    assert_eq!(output, "");
}

#[test]
fn default_file_name() {
    let err = execute_with("1 / 0;", None, &Config::default(), silent_handler()).unwrap_err();
    assert_eq!(err.file(), DEFAULT_FILE_NAME);
    assert_eq!(err.to_string(), "<input>:1:1: Division by zero");
}

#[test]
fn execute_discards_value() {
    assert!(execute("let unused = 1;", None).is_ok());
    assert_eq!(execute("undefined_fn();", None).unwrap_err().line(), 1);
}

#[test]
fn call_depth_follows_config() {
    let source = "fn down(n) { return down(n + 1); }\ndown(0);";
    let config = Config { max_call_depth: 10 };
    let (result, _) = run_with(source, &config);
    assert_eq!(
        result.unwrap_err().message(),
        "Maximum call depth of 10 exceeded"
    );

    let source = "fn count(n) { if (n == 0) { return 0; } return 1 + count(n - 1); }\ncount(20);";
    let (result, _) = run_with(source, &config);
    assert!(result.is_err());
    let (result, _) = run_with(source, &Config { max_call_depth: 25 });
    assert_eq!(result.unwrap(), Value::Number(20.0));
}

#[test]
fn runtime_diagnostic_codes() {
    let cases = [
        ("1 / 0;", ErrorCode::E2001),
        ("-\"s\";", ErrorCode::E2002),
        ("let n = 1; n();", ErrorCode::E2003),
        ("typeof();", ErrorCode::E2004),
        ("len(3);", ErrorCode::E2005),
        ("for (x in 3) {}", ErrorCode::E2005),
        ("const k = 1; k = 2;", ErrorCode::E2006),
        ("let o = null; o.x;", ErrorCode::E2008),
        ("let xs = []; xs[5] = 1;", ErrorCode::E2008),
    ];
    for (source, code) in cases {
        let (result, _) = run(source);
        let diagnostics = result.unwrap_err().to_diagnostics();
        assert_eq!(diagnostics.len(), 1, "{source}");
        assert_eq!(diagnostics[0].code, code, "{source}");
        assert_eq!(diagnostics[0].labels.len(), 1, "{source}");
    }
}

#[test]
fn constant_assignment_suggests_let() {
    let (result, _) = run("const limit = 3;\nlimit = 4;");
    let diagnostics = result.unwrap_err().to_diagnostics();
    assert_eq!(
        diagnostics[0].suggestions,
        ["declare it with `let limit` to allow reassignment"]
    );
}

#[test]
fn render_runtime_error() {
    let source = "let a = 1;\nprint(a / 0);";
    let (result, _) = run(source);
    let err = result.unwrap_err();
    let rendered = render_diagnostics(source, err.file(), &err.to_diagnostics(), false);
    assert!(rendered.starts_with("error[E2001]: Division by zero\n"), "{rendered}");
    assert!(rendered.contains("--> test.hyp:2:7"), "{rendered}");
    assert!(rendered.contains("print(a / 0);"), "{rendered}");
    assert!(rendered.contains("error: aborting due to previous error"), "{rendered}");
    assert!(!rendered.contains('\x1b'));
}

#[test]
fn render_parse_errors() {
    let source = "let = 1;\nlet y = ;";
    let (result, _) = run(source);
    let err = result.unwrap_err();
    let diagnostics = err.to_diagnostics();
    assert_eq!(diagnostics.len(), 2);
    let rendered = render_diagnostics(source, err.file(), &diagnostics, false);
    assert!(rendered.contains("--> test.hyp:1:5"), "{rendered}");
    assert!(rendered.contains("--> test.hyp:2:9"), "{rendered}");
    assert!(rendered.contains("aborting due to 2 previous errors"), "{rendered}");
}

#[test]
fn init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}
