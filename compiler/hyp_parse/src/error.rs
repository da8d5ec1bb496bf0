//! Parse error type.

use hyp_diagnostic::{Diagnostic, ErrorCode};
use hyp_ir::{LexError, Span, Token, TokenKind};
use std::fmt;

/// What the error points at, for the `Error at '...'` part of the message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorLocation {
    /// An ordinary token, with its source text.
    Token(String),
    /// The end of input.
    End,
    /// A malformed token; the message already describes it.
    Lexer,
}

/// A syntax or lexical error recorded by the parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    pub line: u32,
    pub column: u32,
    pub location: ErrorLocation,
}

impl ParseError {
    /// An error positioned at `token`.
    pub fn at_token(
        token: Token,
        source: &str,
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Self {
        let location = match token.kind {
            TokenKind::Eof => ErrorLocation::End,
            TokenKind::Error => ErrorLocation::Lexer,
            _ => ErrorLocation::Token(token.lexeme(source).to_owned()),
        };
        ParseError {
            code,
            message: message.into(),
            span: token.span,
            line: token.line,
            column: token.column,
            location,
        }
    }

    /// The error for a token the lexer could not make sense of.
    pub fn from_lex_error(token: Token, source: &str) -> Self {
        let error = token.error.unwrap_or(LexError::UnexpectedCharacter);
        let code = match error {
            LexError::UnterminatedString => ErrorCode::E0001,
            LexError::UnexpectedCharacter => ErrorCode::E0002,
            LexError::UnterminatedJsxExpression => ErrorCode::E0003,
        };
        Self::at_token(token, source, code, error.message())
    }

    /// Convert to a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match &self.location {
            ErrorLocation::Token(text) => format!("found `{text}`"),
            ErrorLocation::End => "unexpected end of input".to_owned(),
            ErrorLocation::Lexer => self.message.clone(),
        };
        let diagnostic = Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_label(self.span, label);

        match self.code {
            ErrorCode::E0001 => diagnostic.with_note("strings must close with the quote that opened them"),
            ErrorCode::E1003 => diagnostic
                .with_note("only variables, properties and indexed elements can be assigned to"),
            _ => diagnostic,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}:{}] Error", self.line, self.column)?;
        match &self.location {
            ErrorLocation::Token(text) => write!(f, " at '{text}'")?,
            ErrorLocation::End => f.write_str(" at end")?,
            ErrorLocation::Lexer => {}
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ParseError {}
