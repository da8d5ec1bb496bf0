use super::*;
use crate::ast::{BinaryOp, ExprKind, StmtKind};
use crate::Span;
use pretty_assertions::assert_eq;

#[test]
fn test_alloc_and_get_expr() {
    let mut arena = AstArena::new();
    let one = arena.alloc_expr(Expr::new(ExprKind::Number(1.0), Span::new(0, 1)));
    let two = arena.alloc_expr(Expr::new(ExprKind::Number(2.0), Span::new(4, 5)));
    let sum = arena.alloc_expr(Expr::new(
        ExprKind::Binary {
            op: BinaryOp::Add,
            left: one,
            right: two,
        },
        Span::new(0, 5),
    ));

    assert_eq!(arena.expr_count(), 3);
    assert_eq!(
        arena.get_expr(sum).kind,
        ExprKind::Binary {
            op: BinaryOp::Add,
            left: one,
            right: two,
        }
    );
    assert_eq!(arena.get_expr(two).span, Span::new(4, 5));
}

#[test]
fn test_expr_lists_do_not_overlap() {
    let mut arena = AstArena::new();
    let ids: Vec<ExprId> = (0..4u8)
        .map(|n| arena.alloc_expr(Expr::new(ExprKind::Number(f64::from(n)), Span::DUMMY)))
        .collect();

    let first = arena.alloc_expr_list([ids[0], ids[1]]);
    let empty = arena.alloc_expr_list([]);
    let second = arena.alloc_expr_list([ids[2], ids[3], ids[0]]);

    assert_eq!(arena.get_expr_list(first), &[ids[0], ids[1]]);
    assert!(empty.is_empty());
    assert_eq!(arena.get_expr_list(empty), &[] as &[ExprId]);
    assert_eq!(arena.get_expr_list(second), &[ids[2], ids[3], ids[0]]);
}

#[test]
fn test_nested_stmt_lists() {
    let mut arena = AstArena::new();
    let inner = arena.alloc_stmt(Stmt::new(StmtKind::Break, Span::DUMMY));
    let inner_list = arena.alloc_stmt_list([inner]);
    let block = arena.alloc_stmt(Stmt::new(StmtKind::Block(inner_list), Span::DUMMY));
    let outer_list = arena.alloc_stmt_list([block, inner]);

    assert_eq!(arena.stmt_count(), 2);
    assert_eq!(arena.get_stmt_list(outer_list), &[block, inner]);
    match arena.get_stmt(block).kind {
        StmtKind::Block(range) => assert_eq!(arena.get_stmt_list(range), &[inner]),
        ref other => panic!("expected block, got {other:?}"),
    }
}
