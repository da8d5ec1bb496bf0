//! Recursive descent parser for Hyper.
//!
//! Produces a flat AST in an [`AstArena`]. Errors use panic-mode recovery:
//! the first error in a statement is recorded, later ones are suppressed
//! until [`synchronize`](Parser::synchronize) reaches a statement boundary.
//! A parse with any error yields no [`Program`].

mod error;
mod grammar;
mod recovery;

pub use error::{ErrorLocation, ParseError};
pub use recovery::{TokenSet, STMT_BOUNDARY};

use hyp_diagnostic::ErrorCode;
use hyp_ir::{AstArena, Expr, ExprId, ExprKind, Name, Program, Span, StringInterner, Token, TokenKind};

/// Everything a parse produces.
///
/// The arena and interner are returned even on failure, so spans and names
/// in `errors` can still be resolved.
#[derive(Debug)]
pub struct ParseOutput {
    pub arena: AstArena,
    pub interner: StringInterner,
    /// `None` whenever `errors` is non-empty.
    pub program: Option<Program>,
    pub errors: Vec<ParseError>,
}

/// A successful parse.
#[derive(Debug)]
pub struct ParsedProgram {
    pub arena: AstArena,
    pub interner: StringInterner,
    pub program: Program,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The program, or every error the parse reported.
    pub fn into_result(self) -> Result<ParsedProgram, Vec<ParseError>> {
        match self.program {
            Some(program) if self.errors.is_empty() => Ok(ParsedProgram {
                arena: self.arena,
                interner: self.interner,
                program,
            }),
            _ => Err(self.errors),
        }
    }
}

/// Parse `source` with a fresh interner.
pub fn parse(source: &str) -> ParseOutput {
    parse_with(source, StringInterner::new())
}

/// Parse `source`, interning into an existing interner.
pub fn parse_with(source: &str, interner: StringInterner) -> ParseOutput {
    let tokens = hyp_lexer::tokenize(source);
    Parser::new(source, tokens, interner).parse_program()
}

/// Parser state.
pub struct Parser<'src> {
    source: &'src str,
    /// Every token, including lexer error tokens. Always ends with `Eof`.
    tokens: Vec<Token>,
    /// Index of the current token; never an error token.
    pos: usize,
    previous: Option<Token>,
    arena: AstArena,
    interner: StringInterner,
    errors: Vec<ParseError>,
    panic_mode: bool,
    /// Enclosing loops in the current function body.
    loop_depth: u32,
}

impl<'src> Parser<'src> {
    /// Create a parser over `tokens`, which must end with `Eof`.
    pub fn new(source: &'src str, mut tokens: Vec<Token>, interner: StringInterner) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let end = Span::point(u32::try_from(source.len()).unwrap_or(u32::MAX));
            let (line, column) = tokens.last().map_or((1, 1), |t| (t.line, t.column));
            tokens.push(Token::new(TokenKind::Eof, end, line, column));
        }
        let mut parser = Parser {
            source,
            tokens,
            pos: 0,
            previous: None,
            arena: AstArena::with_capacity(source.len()),
            interner,
            errors: Vec::new(),
            panic_mode: false,
            loop_depth: 0,
        };
        parser.skip_lex_errors();
        parser
    }

    /// Parse declarations until end of input.
    pub fn parse_program(mut self) -> ParseOutput {
        let mut stmts = Vec::new();
        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                stmts.push(stmt);
            }
        }

        let end = u32::try_from(self.source.len()).unwrap_or(u32::MAX);
        let program = Program {
            stmts: self.arena.alloc_stmt_list(stmts),
            span: Span::new(0, end),
        };
        tracing::debug!(
            exprs = self.arena.expr_count(),
            stmts = self.arena.stmt_count(),
            errors = self.errors.len(),
            "parsed program"
        );

        ParseOutput {
            program: self.errors.is_empty().then_some(program),
            arena: self.arena,
            interner: self.interner,
            errors: self.errors,
        }
    }

    // ===== Token navigation =====

    #[inline]
    fn current(&self) -> Token {
        // `pos` stays in bounds: the last token is `Eof` and is never passed.
        self.tokens[self.pos]
    }

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    fn previous_kind(&self) -> Option<TokenKind> {
        self.previous.map(|t| t.kind)
    }

    /// Span of the last consumed token.
    #[inline]
    fn previous_span(&self) -> Span {
        self.previous.map_or(Span::DUMMY, |t| t.span)
    }

    /// Kind of the token after the current one, skipping lexer errors.
    fn peek_kind(&self) -> TokenKind {
        self.tokens
            .iter()
            .skip(self.pos + 1)
            .find(|t| t.kind != TokenKind::Error)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current();
        if !self.is_at_end() {
            self.previous = Some(token);
            self.pos += 1;
            self.skip_lex_errors();
        }
        token
    }

    /// Report and step over lexer error tokens at the current position.
    fn skip_lex_errors(&mut self) {
        while self.current_kind() == TokenKind::Error {
            let error = ParseError::from_lex_error(self.current(), self.source);
            self.report(error);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or fail with `message` at the current token.
    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(ErrorCode::E1001, message))
        }
    }

    /// Consume an identifier and intern it.
    fn expect_name(&mut self, message: &str) -> Result<Name, ParseError> {
        let token = self.expect(TokenKind::Identifier, message)?;
        Ok(self.intern_lexeme(token))
    }

    fn intern_lexeme(&self, token: Token) -> Name {
        self.interner.intern(token.lexeme(self.source))
    }

    // ===== Errors =====

    fn error_at_current(&self, code: ErrorCode, message: &str) -> ParseError {
        ParseError::at_token(self.current(), self.source, code, message)
    }

    /// Record `error` unless already panicking, then start panicking.
    fn report(&mut self, error: ParseError) {
        if self.panic_mode {
            tracing::trace!(%error, "suppressed while recovering");
            return;
        }
        self.panic_mode = true;
        self.errors.push(error);
    }

    /// Record `error` without entering panic mode; parsing of the current
    /// statement continues normally.
    fn report_in_place(&mut self, error: ParseError) {
        if !self.panic_mode {
            self.errors.push(error);
        }
    }

    // ===== Arena helpers =====

    fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    #[inline]
    fn expr_span(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }

    /// From `start` through the last consumed token.
    #[inline]
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous_span())
    }
}

#[cfg(test)]
mod tests;
