//! Operator matching for each precedence level.

use hyp_ir::{AssignOp, BinaryOp, TokenKind, UnaryOp};

pub(super) fn assign_op(kind: TokenKind) -> Option<AssignOp> {
    match kind {
        TokenKind::Equal => Some(AssignOp::Assign),
        TokenKind::PlusEqual => Some(AssignOp::Add),
        TokenKind::MinusEqual => Some(AssignOp::Sub),
        TokenKind::StarEqual => Some(AssignOp::Mul),
        TokenKind::SlashEqual => Some(AssignOp::Div),
        TokenKind::PercentEqual => Some(AssignOp::Mod),
        _ => None,
    }
}

/// `or` and `||`
pub(super) fn logic_or_op(kind: TokenKind) -> Option<BinaryOp> {
    matches!(kind, TokenKind::Or | TokenKind::OrOr).then_some(BinaryOp::Or)
}

/// `and` and `&&`
pub(super) fn logic_and_op(kind: TokenKind) -> Option<BinaryOp> {
    matches!(kind, TokenKind::And | TokenKind::AndAnd).then_some(BinaryOp::And)
}

pub(super) fn equality_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::EqualEqual => Some(BinaryOp::Eq),
        TokenKind::BangEqual => Some(BinaryOp::NotEq),
        _ => None,
    }
}

pub(super) fn relational_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Less => Some(BinaryOp::Lt),
        TokenKind::LessEqual => Some(BinaryOp::LtEq),
        TokenKind::Greater => Some(BinaryOp::Gt),
        TokenKind::GreaterEqual => Some(BinaryOp::GtEq),
        _ => None,
    }
}

pub(super) fn additive_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        _ => None,
    }
}

pub(super) fn multiplicative_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        _ => None,
    }
}

/// `!`, `not`, and prefix `-`
pub(super) fn unary_op(kind: TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Bang | TokenKind::Not => Some(UnaryOp::Not),
        TokenKind::Minus => Some(UnaryOp::Neg),
        _ => None,
    }
}
