//! Declarations and statements.

use crate::{ParseError, Parser};
use hyp_diagnostic::ErrorCode;
use hyp_ir::{FunctionDef, FunctionId, Mutability, Name, Span, Stmt, StmtId, StmtKind, StmtRange, TokenKind};
use hyp_stack::ensure_sufficient_stack;

impl Parser<'_> {
    /// Parse one declaration, recovering from any error inside it.
    ///
    /// Returns `None` if the declaration failed. Always consumes at least one
    /// token unless already at end of input.
    pub(crate) fn declaration(&mut self) -> Option<StmtId> {
        let start = self.pos;
        let stmt = match self.declaration_inner() {
            Ok(stmt) => Some(stmt),
            Err(error) => {
                self.report(error);
                None
            }
        };

        if self.panic_mode {
            self.synchronize();
        }
        // Recovery can stop on the very token that failed.
        if self.pos == start && !self.is_at_end() {
            self.advance();
        }
        stmt
    }

    fn declaration_inner(&mut self) -> Result<StmtId, ParseError> {
        match self.current_kind() {
            TokenKind::Let => self.var_decl(Mutability::Mutable),
            TokenKind::Const => self.var_decl(Mutability::Immutable),
            TokenKind::Fn if self.peek_kind() == TokenKind::Identifier => self.function_decl(),
            _ => self.statement(),
        }
    }

    /// `let name = init;` or `const name = init;`
    fn var_decl(&mut self, mutability: Mutability) -> Result<StmtId, ParseError> {
        let start = self.advance().span;
        let name = self.expect_name("Expected variable name")?;
        let init = if self.eat(TokenKind::Equal) {
            Some(self.expression()?)
        } else {
            None
        };
        self.expect(
            TokenKind::Semicolon,
            "Expected ';' after variable declaration",
        )?;

        Ok(self.alloc_stmt(
            StmtKind::VarDecl {
                name,
                mutability,
                init,
            },
            start,
        ))
    }

    /// `fn name(params) { body }`
    fn function_decl(&mut self) -> Result<StmtId, ParseError> {
        let start = self.advance().span;
        let name = self.expect_name("Expected function name")?;
        self.expect(TokenKind::LeftParen, "Expected '(' after function name")?;
        let function = self.function_rest(Some(name), start)?;
        Ok(self.alloc_stmt(StmtKind::Function(function), start))
    }

    /// Parameters and body, after the opening `(`. Shared with lambdas.
    pub(crate) fn function_rest(
        &mut self,
        name: Option<Name>,
        start: Span,
    ) -> Result<FunctionId, ParseError> {
        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                params.push(self.expect_name("Expected parameter name")?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen, "Expected ')' after parameters")?;
        self.expect(TokenKind::LeftBrace, "Expected '{' before function body")?;

        // `break` inside a function body never targets a loop outside it.
        let outer_loops = std::mem::replace(&mut self.loop_depth, 0);
        let body = self.block_body();
        self.loop_depth = outer_loops;
        let body = body?;

        let params = self.arena.alloc_params(params);
        let span = self.span_from(start);
        Ok(self.arena.alloc_function(FunctionDef {
            name,
            params,
            body,
            span,
        }))
    }

    fn statement(&mut self) -> Result<StmtId, ParseError> {
        ensure_sufficient_stack(|| match self.current_kind() {
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::For => self.for_statement(),
            TokenKind::Return => self.return_statement(),
            TokenKind::Break => self.jump_statement(StmtKind::Break, "break"),
            TokenKind::Continue => self.jump_statement(StmtKind::Continue, "continue"),
            TokenKind::LeftBrace => {
                let start = self.advance().span;
                let stmts = self.block_body()?;
                Ok(self.alloc_stmt(StmtKind::Block(stmts), start))
            }
            _ => self.expression_statement(),
        })
    }

    /// Declarations up to and including the closing `}`.
    fn block_body(&mut self) -> Result<StmtRange, ParseError> {
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                stmts.push(stmt);
            }
        }
        self.expect(TokenKind::RightBrace, "Expected '}' after block")?;
        Ok(self.arena.alloc_stmt_list(stmts))
    }

    fn if_statement(&mut self) -> Result<StmtId, ParseError> {
        let start = self.advance().span;
        self.expect(TokenKind::LeftParen, "Expected '(' after 'if'")?;
        let cond = self.expression()?;
        self.expect(TokenKind::RightParen, "Expected ')' after if condition")?;

        let then_branch = self.statement()?;
        let else_branch = if self.eat(TokenKind::Else) {
            Some(self.statement()?)
        } else {
            None
        };

        Ok(self.alloc_stmt(
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            },
            start,
        ))
    }

    fn while_statement(&mut self) -> Result<StmtId, ParseError> {
        let start = self.advance().span;
        self.expect(TokenKind::LeftParen, "Expected '(' after 'while'")?;
        let cond = self.expression()?;
        self.expect(TokenKind::RightParen, "Expected ')' after while condition")?;
        let body = self.loop_body()?;
        Ok(self.alloc_stmt(StmtKind::While { cond, body }, start))
    }

    /// `for (name in iterable) body`
    fn for_statement(&mut self) -> Result<StmtId, ParseError> {
        let start = self.advance().span;
        self.expect(TokenKind::LeftParen, "Expected '(' after 'for'")?;
        let binding = self.expect_name("Expected loop variable name")?;
        self.expect(TokenKind::In, "Expected 'in' after loop variable")?;
        let iterable = self.expression()?;
        self.expect(TokenKind::RightParen, "Expected ')' after for clause")?;
        let body = self.loop_body()?;
        Ok(self.alloc_stmt(
            StmtKind::For {
                binding,
                iterable,
                body,
            },
            start,
        ))
    }

    fn loop_body(&mut self) -> Result<StmtId, ParseError> {
        self.loop_depth += 1;
        let body = self.statement();
        self.loop_depth -= 1;
        body
    }

    /// `return expr?;` is allowed anywhere; at top level it ends the program.
    fn return_statement(&mut self) -> Result<StmtId, ParseError> {
        let keyword = self.advance();
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(TokenKind::Semicolon, "Expected ';' after return value")?;
        Ok(self.alloc_stmt(StmtKind::Return(value), keyword.span))
    }

    /// `break;` or `continue;`
    fn jump_statement(&mut self, kind: StmtKind, keyword: &str) -> Result<StmtId, ParseError> {
        let token = self.advance();
        if self.loop_depth == 0 {
            let error = ParseError::at_token(
                token,
                self.source,
                ErrorCode::E1004,
                format!("Cannot use '{keyword}' outside of a loop"),
            );
            self.report_in_place(error);
        }
        self.expect(
            TokenKind::Semicolon,
            &format!("Expected ';' after '{keyword}'"),
        )?;
        Ok(self.alloc_stmt(kind, token.span))
    }

    fn expression_statement(&mut self) -> Result<StmtId, ParseError> {
        let expr = self.expression()?;
        self.expect(TokenKind::Semicolon, "Expected ';' after expression")?;
        let start = self.expr_span(expr);
        Ok(self.alloc_stmt(StmtKind::Expr(expr), start))
    }

    /// Allocate a statement spanning from `start` to the last consumed token.
    fn alloc_stmt(&mut self, kind: StmtKind, start: Span) -> StmtId {
        let span = self.span_from(start);
        self.arena.alloc_stmt(Stmt::new(kind, span))
    }
}
