//! Expression parsing.
//!
//! Lowest to highest binding: assignment, conditional, `or`, `and`,
//! equality, relational, additive, multiplicative, unary, postfix, primary.
//! Every binary level is left-associative; assignment and the conditional
//! are right-associative.

use super::literal::{parse_number, unescape_string};
use super::operators::{
    additive_op, assign_op, equality_op, logic_and_op, logic_or_op, multiplicative_op,
    relational_op, unary_op,
};
use crate::{ParseError, Parser};
use hyp_diagnostic::ErrorCode;
use hyp_ir::{BinaryOp, ExprId, ExprKind, ObjectProp, TokenKind};
use hyp_stack::ensure_sufficient_stack;

type ExprResult = Result<ExprId, ParseError>;

impl Parser<'_> {
    /// Parse an expression.
    pub(crate) fn expression(&mut self) -> ExprResult {
        ensure_sufficient_stack(|| self.assignment())
    }

    fn assignment(&mut self) -> ExprResult {
        let target = self.conditional()?;
        let Some(op) = assign_op(self.current_kind()) else {
            return Ok(target);
        };
        let op_token = self.advance();
        let value = self.expression()?;

        let span = self.expr_span(target).merge(self.expr_span(value));
        let assignable = matches!(
            self.arena.get_expr(target).kind,
            ExprKind::Ident(_) | ExprKind::Member { .. } | ExprKind::Index { .. }
        );
        if !assignable {
            let error = ParseError::at_token(
                op_token,
                self.source,
                ErrorCode::E1003,
                "Invalid assignment target",
            );
            self.report_in_place(error);
            return Ok(self.alloc_expr(ExprKind::Error, span));
        }

        Ok(self.alloc_expr(ExprKind::Assign { op, target, value }, span))
    }

    /// `cond ? then_expr : else_expr`
    fn conditional(&mut self) -> ExprResult {
        let cond = self.logic_or()?;
        if !self.eat(TokenKind::Question) {
            return Ok(cond);
        }
        let then_expr = self.expression()?;
        self.expect(TokenKind::Colon, "Expected ':' in conditional expression")?;
        let else_expr = ensure_sufficient_stack(|| self.conditional())?;

        let span = self.expr_span(cond).merge(self.expr_span(else_expr));
        Ok(self.alloc_expr(
            ExprKind::Conditional {
                cond,
                then_expr,
                else_expr,
            },
            span,
        ))
    }

    fn logic_or(&mut self) -> ExprResult {
        self.binary_level(Self::logic_and, logic_or_op)
    }

    fn logic_and(&mut self) -> ExprResult {
        self.binary_level(Self::equality, logic_and_op)
    }

    fn equality(&mut self) -> ExprResult {
        self.binary_level(Self::relational, equality_op)
    }

    fn relational(&mut self) -> ExprResult {
        self.binary_level(Self::additive, relational_op)
    }

    fn additive(&mut self) -> ExprResult {
        self.binary_level(Self::multiplicative, additive_op)
    }

    fn multiplicative(&mut self) -> ExprResult {
        self.binary_level(Self::unary, multiplicative_op)
    }

    /// One left-associative level: `next (op next)*`.
    fn binary_level(
        &mut self,
        next: fn(&mut Self) -> ExprResult,
        op_for: fn(TokenKind) -> Option<BinaryOp>,
    ) -> ExprResult {
        let mut left = next(self)?;
        while let Some(op) = op_for(self.current_kind()) {
            self.advance();
            let right = next(self)?;
            let span = self.expr_span(left).merge(self.expr_span(right));
            left = self.alloc_expr(ExprKind::Binary { op, left, right }, span);
        }
        Ok(left)
    }

    fn unary(&mut self) -> ExprResult {
        let Some(op) = unary_op(self.current_kind()) else {
            return self.postfix();
        };
        let start = self.advance().span;
        let operand = ensure_sufficient_stack(|| self.unary())?;
        let span = start.merge(self.expr_span(operand));
        Ok(self.alloc_expr(ExprKind::Unary { op, operand }, span))
    }

    /// Calls, `.name` and `[index]` chained onto a primary.
    fn postfix(&mut self) -> ExprResult {
        let mut expr = self.primary()?;
        loop {
            let start = self.expr_span(expr);
            match self.current_kind() {
                TokenKind::LeftParen => {
                    self.advance();
                    let args = self.arguments()?;
                    expr = self.alloc_expr(
                        ExprKind::Call { callee: expr, args },
                        self.span_from(start),
                    );
                }
                TokenKind::Dot => {
                    self.advance();
                    let name = self.expect_name("Expected property name after '.'")?;
                    expr = self.alloc_expr(
                        ExprKind::Member { object: expr, name },
                        self.span_from(start),
                    );
                }
                TokenKind::LeftBracket => {
                    self.advance();
                    let index = self.expression()?;
                    self.expect(TokenKind::RightBracket, "Expected ']' after index")?;
                    expr = self.alloc_expr(
                        ExprKind::Index {
                            object: expr,
                            index,
                        },
                        self.span_from(start),
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Call arguments after `(`, through the closing `)`.
    fn arguments(&mut self) -> Result<hyp_ir::ExprRange, ParseError> {
        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                args.push(self.expression()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen, "Expected ')' after arguments")?;
        Ok(self.arena.alloc_expr_list(args))
    }

    fn primary(&mut self) -> ExprResult {
        let token = self.current();
        let kind = match token.kind {
            TokenKind::Number => {
                let Some(value) = parse_number(token.lexeme(self.source)) else {
                    return Err(self.error_at_current(ErrorCode::E1005, "Invalid number literal"));
                };
                ExprKind::Number(value)
            }
            TokenKind::String => {
                let text = unescape_string(token.lexeme(self.source));
                ExprKind::String(self.interner.intern(&text))
            }
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Null => ExprKind::Null,
            TokenKind::Identifier => ExprKind::Ident(self.intern_lexeme(token)),
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.expression()?;
                self.expect(TokenKind::RightParen, "Expected ')' after expression")?;
                return Ok(inner);
            }
            TokenKind::LeftBracket => return self.array_literal(),
            TokenKind::LeftBrace => return self.object_literal(),
            TokenKind::Fn => return self.lambda(),
            _ => return Err(self.error_at_current(ErrorCode::E1002, "Expected expression")),
        };
        self.advance();
        Ok(self.alloc_expr(kind, token.span))
    }

    /// `[a, b, c]`, with an optional trailing comma.
    fn array_literal(&mut self) -> ExprResult {
        let start = self.advance().span;
        let mut elements = Vec::new();
        while !self.check(TokenKind::RightBracket) {
            elements.push(self.expression()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightBracket, "Expected ']' after array elements")?;
        let elements = self.arena.alloc_expr_list(elements);
        Ok(self.alloc_expr(ExprKind::Array(elements), self.span_from(start)))
    }

    /// `{ key: value, "quoted key": value }`
    fn object_literal(&mut self) -> ExprResult {
        let start = self.advance().span;
        let mut props = Vec::new();
        while !self.check(TokenKind::RightBrace) {
            let key_token = self.current();
            let key = match key_token.kind {
                TokenKind::Identifier => self.intern_lexeme(key_token),
                TokenKind::String => self
                    .interner
                    .intern(&unescape_string(key_token.lexeme(self.source))),
                _ => return Err(self.error_at_current(ErrorCode::E1001, "Expected property name")),
            };
            self.advance();
            self.expect(TokenKind::Colon, "Expected ':' after property name")?;
            let value = self.expression()?;
            props.push(ObjectProp {
                key,
                value,
                span: key_token.span.merge(self.expr_span(value)),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(
            TokenKind::RightBrace,
            "Expected '}' after object properties",
        )?;
        let props = self.arena.alloc_props(props);
        Ok(self.alloc_expr(ExprKind::Object(props), self.span_from(start)))
    }

    /// `fn (params) { body }` in expression position.
    fn lambda(&mut self) -> ExprResult {
        let start = self.advance().span;
        self.expect(TokenKind::LeftParen, "Expected '(' after 'fn'")?;
        let function = self.function_rest(None, start)?;
        Ok(self.alloc_expr(ExprKind::Lambda(function), self.span_from(start)))
    }
}
