#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use hyp_ir::{AssignOp, BinaryOp, Mutability, StmtId, StmtKind};
use pretty_assertions::assert_eq;

// ===== Helpers =====

/// Render an expression as an s-expression for shape assertions.
fn sexpr(out: &ParseOutput, id: ExprId) -> String {
    let arena = &out.arena;
    let list = |ids: &[ExprId]| {
        ids.iter()
            .map(|&id| sexpr(out, id))
            .collect::<Vec<_>>()
            .join(" ")
    };
    match &arena.get_expr(id).kind {
        ExprKind::Null => "null".to_owned(),
        ExprKind::Bool(b) => b.to_string(),
        ExprKind::Number(n) => n.to_string(),
        ExprKind::String(s) => format!("{:?}", out.interner.lookup(*s)),
        ExprKind::Ident(name) => out.interner.lookup(*name).to_owned(),
        ExprKind::Binary { op, left, right } => format!(
            "({} {} {})",
            op.as_symbol(),
            sexpr(out, *left),
            sexpr(out, *right)
        ),
        ExprKind::Unary { op, operand } => format!("({} {})", op.as_symbol(), sexpr(out, *operand)),
        ExprKind::Assign { op, target, value } => format!(
            "({} {} {})",
            op.as_symbol(),
            sexpr(out, *target),
            sexpr(out, *value)
        ),
        ExprKind::Call { callee, args } => {
            let args = list(arena.get_expr_list(*args));
            if args.is_empty() {
                format!("(call {})", sexpr(out, *callee))
            } else {
                format!("(call {} {args})", sexpr(out, *callee))
            }
        }
        ExprKind::Member { object, name } => {
            format!("(. {} {})", sexpr(out, *object), out.interner.lookup(*name))
        }
        ExprKind::Index { object, index } => {
            format!("([] {} {})", sexpr(out, *object), sexpr(out, *index))
        }
        ExprKind::Conditional {
            cond,
            then_expr,
            else_expr,
        } => format!(
            "(? {} {} {})",
            sexpr(out, *cond),
            sexpr(out, *then_expr),
            sexpr(out, *else_expr)
        ),
        ExprKind::Array(items) => format!("[{}]", list(arena.get_expr_list(*items))),
        ExprKind::Object(props) => {
            let props: Vec<_> = arena
                .get_props(*props)
                .iter()
                .map(|p| format!("{}: {}", out.interner.lookup(p.key), sexpr(out, p.value)))
                .collect();
            format!("{{{}}}", props.join(", "))
        }
        ExprKind::Lambda(function) => {
            let function = arena.get_function(*function);
            let params: Vec<_> = arena
                .get_params(function.params)
                .iter()
                .map(|&p| out.interner.lookup(p))
                .collect();
            format!("(fn ({}))", params.join(" "))
        }
        ExprKind::Error => "<error>".to_owned(),
    }
}

fn parse_ok(source: &str) -> ParseOutput {
    let out = parse(source);
    assert!(
        out.errors.is_empty(),
        "unexpected errors for {source:?}: {:?}",
        out.errors.iter().map(ToString::to_string).collect::<Vec<_>>()
    );
    out
}

fn top_level(out: &ParseOutput) -> Vec<StmtId> {
    let program = out.program.expect("program");
    out.arena.get_stmt_list(program.stmts).to_vec()
}

/// Parse a single expression statement and render it.
fn expr(source: &str) -> String {
    let out = parse_ok(source);
    let stmts = top_level(&out);
    assert_eq!(stmts.len(), 1);
    match out.arena.get_stmt(stmts[0]).kind {
        StmtKind::Expr(id) => sexpr(&out, id),
        ref other => panic!("expected expression statement, got {other:?}"),
    }
}

fn error_messages(source: &str) -> Vec<String> {
    parse(source).errors.iter().map(ToString::to_string).collect()
}

// ===== Precedence and associativity =====

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(expr("1 + 2 * 3;"), "(+ 1 (* 2 3))");
    assert_eq!(expr("(1 + 2) * 3;"), "(* (+ 1 2) 3)");
}

#[test]
fn binary_levels_are_left_associative() {
    assert_eq!(expr("1 - 2 - 3;"), "(- (- 1 2) 3)");
    assert_eq!(expr("8 / 4 % 3;"), "(% (/ 8 4) 3)");
    assert_eq!(expr("a == b != c;"), "(!= (== a b) c)");
}

#[test]
fn full_ladder() {
    assert_eq!(
        expr("a or b and c == d < e + f * -g;"),
        "(or a (and b (== c (< d (+ e (* f (- g)))))))"
    );
}

#[test]
fn symbolic_logical_operators() {
    assert_eq!(expr("a || b && !c;"), "(or a (and b (! c)))");
    assert_eq!(expr("not not x;"), "(! (! x))");
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(expr("a = b = 1;"), "(= a (= b 1))");
    assert_eq!(expr("x += y -= 2;"), "(+= x (-= y 2))");
    assert_eq!(expr("a = b or c;"), "(= a (or b c))");
}

#[test]
fn compound_assignment_operators() {
    for (source, op) in [
        ("x = 1;", AssignOp::Assign),
        ("x += 1;", AssignOp::Add),
        ("x -= 1;", AssignOp::Sub),
        ("x *= 1;", AssignOp::Mul),
        ("x /= 1;", AssignOp::Div),
        ("x %= 1;", AssignOp::Mod),
    ] {
        assert_eq!(expr(source), format!("({} x 1)", op.as_symbol()));
    }
}

#[test]
fn conditional_nests_to_the_right() {
    assert_eq!(expr("a ? b : c ? d : e;"), "(? a b (? c d e))");
    assert_eq!(expr("x = a > 0 ? 1 : 2;"), "(= x (? (> a 0) 1 2))");
}

#[test]
fn postfix_chain() {
    assert_eq!(
        expr("obj.items[0](1, 2);"),
        "(call ([] (. obj items) 0) 1 2)"
    );
    assert_eq!(expr("f()();"), "(call (call f))");
    assert_eq!(expr("-a.b;"), "(- (. a b))");
}

#[test]
fn member_and_index_targets() {
    assert_eq!(expr("o.x = 1;"), "(= (. o x) 1)");
    assert_eq!(expr("xs[i] += 2;"), "(+= ([] xs i) 2)");
}

// ===== Literals =====

#[test]
fn literals() {
    assert_eq!(expr("null;"), "null");
    assert_eq!(expr("true;"), "true");
    assert_eq!(expr("2.5e1;"), "25");
    assert_eq!(expr(r#""a\tb";"#), r#""a\tb""#);
    assert_eq!(expr("'it\\'s';"), r#""it's""#);
}

#[test]
fn array_and_object_literals() {
    assert_eq!(expr("[1, [2, 3], []];"), "[1 [2 3] []]");
    assert_eq!(expr("[1, 2,];"), "[1 2]");
    assert_eq!(
        expr(r#"x = {name: "hyp", "two words": 2};"#),
        r#"(= x {name: "hyp", two words: 2})"#
    );
    assert_eq!(expr("x = {};"), "(= x {})");
}

#[test]
fn lambda_expression() {
    assert_eq!(expr("f = fn(a, b) { return a + b; };"), "(= f (fn (a b)))");
    assert_eq!(expr("fn() {}();"), "(call (fn ()))");
}

// ===== Statements =====

#[test]
fn variable_declarations() {
    let out = parse_ok("let x = 1; const y = 2; let z;");
    let stmts = top_level(&out);
    let decls: Vec<_> = stmts
        .iter()
        .map(|&id| match &out.arena.get_stmt(id).kind {
            StmtKind::VarDecl {
                name,
                mutability,
                init,
            } => (out.interner.lookup(*name).to_owned(), *mutability, init.is_some()),
            other => panic!("expected declaration, got {other:?}"),
        })
        .collect();
    assert_eq!(
        decls,
        [
            ("x".to_owned(), Mutability::Mutable, true),
            ("y".to_owned(), Mutability::Immutable, true),
            ("z".to_owned(), Mutability::Mutable, false),
        ]
    );
}

#[test]
fn function_declaration() {
    let out = parse_ok("fn add(a, b) { let c = a + b; return c; }");
    let stmts = top_level(&out);
    let StmtKind::Function(id) = out.arena.get_stmt(stmts[0]).kind else {
        panic!("expected function");
    };
    let function = out.arena.get_function(id);
    assert_eq!(function.name.map(|n| out.interner.lookup(n)), Some("add"));
    assert_eq!(out.arena.get_params(function.params).len(), 2);
    assert_eq!(out.arena.get_stmt_list(function.body).len(), 2);
    assert_eq!(function.span, Span::new(0, 41));
}

#[test]
fn control_flow_statements() {
    let source = "
        if (a) { b; } else if (c) d; else { e; }
        while (i < 3) { i += 1; if (i == 2) continue; }
        for (x in xs) { if (x) break; }
    ";
    let out = parse_ok(source);
    let kinds: Vec<_> = top_level(&out)
        .iter()
        .map(|&id| match out.arena.get_stmt(id).kind {
            StmtKind::If {
                else_branch: Some(_),
                ..
            } => "if-else",
            StmtKind::While { .. } => "while",
            StmtKind::For { .. } => "for",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["if-else", "while", "for"]);
}

#[test]
fn dangling_else_binds_to_nearest_if() {
    let out = parse_ok("if (a) if (b) x; else y;");
    let stmts = top_level(&out);
    let StmtKind::If {
        then_branch,
        else_branch,
        ..
    } = out.arena.get_stmt(stmts[0]).kind
    else {
        panic!("expected if");
    };
    assert_eq!(else_branch, None);
    assert!(matches!(
        out.arena.get_stmt(then_branch).kind,
        StmtKind::If {
            else_branch: Some(_),
            ..
        }
    ));
}

#[test]
fn return_forms_inside_functions() {
    let out = parse_ok("fn f() { return; } fn g() { return 1; }");
    let returns: Vec<_> = top_level(&out)
        .iter()
        .map(|&id| {
            let StmtKind::Function(f) = out.arena.get_stmt(id).kind else {
                panic!("expected function");
            };
            let body = out.arena.get_stmt_list(out.arena.get_function(f).body);
            matches!(out.arena.get_stmt(body[0]).kind, StmtKind::Return(Some(_)))
        })
        .collect();
    assert_eq!(returns, [false, true]);
}

#[test]
fn break_inside_nested_block_in_loop() {
    parse_ok("while (true) { { if (x) { break; } } }");
    parse_ok("fn f() { for (x in xs) { return x; } }");
}

#[test]
fn empty_program() {
    let out = parse_ok("  // nothing here\n");
    assert_eq!(top_level(&out).len(), 0);
}

#[test]
fn binary_op_spans_cover_operands() {
    let out = parse_ok("foo + bar;");
    let stmts = top_level(&out);
    let StmtKind::Expr(id) = out.arena.get_stmt(stmts[0]).kind else {
        panic!("expected expression");
    };
    let expr = out.arena.get_expr(id);
    assert!(matches!(
        expr.kind,
        ExprKind::Binary {
            op: BinaryOp::Add,
            ..
        }
    ));
    assert_eq!(expr.span, Span::new(0, 9));
    assert_eq!(out.arena.get_stmt(stmts[0]).span, Span::new(0, 10));
}

// ===== Errors =====

#[test]
fn expected_expression_reports_token() {
    let out = parse("let x = ;");
    assert!(out.program.is_none());
    assert_eq!(
        out.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
        ["[line 1:9] Error at ';': Expected expression"]
    );
    assert_eq!(out.errors[0].code, ErrorCode::E1002);
}

#[test]
fn error_at_end_of_input() {
    assert_eq!(
        error_messages("print(1"),
        ["[line 1:8] Error at end: Expected ')' after arguments"]
    );
}

#[test]
fn invalid_assignment_target() {
    let out = parse("1 = 2; x + 1 = 3;");
    let messages: Vec<_> = out.errors.iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        [
            "[line 1:3] Error at '=': Invalid assignment target",
            "[line 1:14] Error at '=': Invalid assignment target",
        ]
    );
    assert!(out.errors.iter().all(|e| e.code == ErrorCode::E1003));
    assert!(out.program.is_none());
}

#[test]
fn lexer_errors_are_reported_without_location_text() {
    let out = parse("let s = \"abc");
    assert_eq!(
        out.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
        ["[line 1:9] Error: Unterminated string"]
    );
    assert_eq!(out.errors[0].code, ErrorCode::E0001);
    assert_eq!(out.errors[0].location, ErrorLocation::Lexer);

    assert_eq!(
        error_messages("let a = 1 @ 2;"),
        ["[line 1:11] Error: Unexpected character"]
    );
}

#[test]
fn one_error_per_bad_statement() {
    let source = "let = 1;\nlet y = ;\nlet z = 3;\nz + ;\n";
    assert_eq!(
        error_messages(source),
        [
            "[line 1:5] Error at '=': Expected variable name",
            "[line 2:9] Error at ';': Expected expression",
            "[line 4:5] Error at ';': Expected expression",
        ]
    );
}

#[test]
fn recovery_stops_at_statement_keyword() {
    let out = parse("let a = 1\nlet b = 2;");
    assert_eq!(
        out.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
        ["[line 2:1] Error at 'let': Expected ';' after variable declaration"]
    );
    // `let b` was parsed after recovery.
    assert!(out.interner.get("b").is_some());
}

#[test]
fn recovery_inside_blocks() {
    let source = "fn f() {\n  let x = ;\n  let y = 2;\n  y = ;\n}\nlet ok = 1;";
    assert_eq!(
        error_messages(source),
        [
            "[line 2:11] Error at ';': Expected expression",
            "[line 4:7] Error at ';': Expected expression",
        ]
    );
}

#[test]
fn stray_tokens_always_make_progress() {
    assert_eq!(
        error_messages("} ) ]"),
        ["[line 1:1] Error at '}': Expected expression"]
    );
    // Each empty statement is its own bad statement.
    assert_eq!(error_messages(";;").len(), 2);
}

#[test]
fn statement_headers() {
    assert_eq!(
        error_messages("if x) {}"),
        ["[line 1:4] Error at 'x': Expected '(' after 'if'"]
    );
    assert_eq!(
        error_messages("while (x {}"),
        ["[line 1:10] Error at '{': Expected ')' after while condition"]
    );
    assert_eq!(
        error_messages("fn (a) {}"),
        ["[line 1:10] Error at end: Expected ';' after expression"]
    );
    assert_eq!(
        error_messages("fn f(a, 1) {}"),
        ["[line 1:9] Error at '1': Expected parameter name"]
    );
    assert_eq!(
        error_messages("fn f() x;"),
        ["[line 1:8] Error at 'x': Expected '{' before function body"]
    );
}

#[test]
fn object_literal_errors() {
    assert_eq!(
        error_messages("x = {a 1};"),
        ["[line 1:8] Error at '1': Expected ':' after property name"]
    );
    assert_eq!(
        error_messages("x = {1: 2};"),
        ["[line 1:6] Error at '1': Expected property name"]
    );
    assert_eq!(
        error_messages("x = {a: 1;"),
        ["[line 1:10] Error at ';': Expected '}' after object properties"]
    );
}

#[test]
fn misplaced_jumps() {
    let out = parse("break;\ncontinue; let after = 1;");
    let messages: Vec<_> = out.errors.iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        [
            "[line 1:1] Error at 'break': Cannot use 'break' outside of a loop",
            "[line 2:1] Error at 'continue': Cannot use 'continue' outside of a loop",
        ]
    );
    assert!(out.errors.iter().all(|e| e.code == ErrorCode::E1004));
    // The statements still parse, so nothing after them is skipped.
    assert!(out.interner.get("after").is_some());
}

#[test]
fn return_is_allowed_at_top_level() {
    let out = parse("print(1); return 2; return;");
    assert!(out.errors.is_empty());
    let program = out.program.unwrap();
    let returns: Vec<_> = out
        .arena
        .get_stmt_list(program.stmts)
        .iter()
        .map(|&id| matches!(out.arena.get_stmt(id).kind, StmtKind::Return(_)))
        .collect();
    assert_eq!(returns, [false, true, true]);
}

#[test]
fn function_body_does_not_see_enclosing_loop() {
    let messages = error_messages("while (true) { fn f() { break; } }");
    assert_eq!(messages.len(), 1);
    assert!(messages[0].ends_with("Cannot use 'break' outside of a loop"));
}

#[test]
fn markup_is_not_an_expression() {
    assert_eq!(
        error_messages("let x = <div/>; let y = 1;"),
        ["[line 1:9] Error at '<': Expected expression"]
    );
}

#[test]
fn errors_convert_to_diagnostics() {
    let out = parse("let x = ;");
    let diagnostic = out.errors[0].to_diagnostic();
    assert_eq!(diagnostic.code, ErrorCode::E1002);
    assert_eq!(diagnostic.message, "Expected expression");
    assert_eq!(diagnostic.labels[0].span, Span::new(8, 9));
    assert_eq!(diagnostic.labels[0].message, "found `;`");
}

// ===== Whole-parse properties =====

#[test]
fn parsing_is_idempotent() {
    let source = "
        fn counter() { let n = 0; return fn() { n += 1; return n; }; }
        const c = counter();
        let data = {xs: [1, 2, 3], label: 'n'};
        for (x in data.xs) { print(x * 2, data.label); }
    ";
    let first = parse_ok(source);
    let second = parse_ok(source);
    assert_eq!(first.arena, second.arena);
    assert_eq!(first.program, second.program);
}

#[test]
fn deep_nesting_does_not_overflow() {
    let depth = 5_000;
    let source = format!("{}1{};", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(expr(&source), "1");

    let source = format!("{}x;", "!".repeat(depth));
    parse_ok(&source);
}

#[test]
fn parse_with_reuses_interner() {
    let interner = StringInterner::new();
    let existing = interner.intern("shared");
    let out = parse_with("shared = 1;", interner);
    let stmts = top_level(&out);
    let StmtKind::Expr(id) = out.arena.get_stmt(stmts[0]).kind else {
        panic!("expected expression");
    };
    let ExprKind::Assign { target, .. } = out.arena.get_expr(id).kind else {
        panic!("expected assignment");
    };
    assert_eq!(out.arena.get_expr(target).kind, ExprKind::Ident(existing));
}

#[test]
fn into_result() {
    assert!(parse("let x = 1;").into_result().is_ok());
    let errors = parse("let x = ").into_result().err().unwrap_or_default();
    assert_eq!(errors.len(), 1);
}
