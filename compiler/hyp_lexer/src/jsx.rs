//! Embedded markup sub-mode.
//!
//! Inside a tag, names and attributes are `JsxAttribute` tokens (they may
//! contain `-`), `=` and strings lex as usual, and `{...}` is a single
//! brace-balanced `JsxExpression`. Between tags, raw text up to the next `<`
//! or `{` is `JsxText`. Leaving the outermost element returns to code.

use crate::cursor::Mark;
use crate::{is_ident_continue, Lexer};
use hyp_ir::{LexError, Token, TokenKind};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum JsxMode {
    /// Between `<` (or `</`) and the matching `>`.
    Tag { closing: bool },
    /// After an opening tag's `>`, until the next tag.
    Children,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct JsxState {
    /// Open elements, counting the one whose tag is being lexed.
    depth: u32,
    mode: JsxMode,
}

impl Lexer<'_> {
    /// `<` in code position, followed by a letter.
    pub(crate) fn enter_markup(&mut self, start: Mark) -> Token {
        self.cursor.advance();
        self.jsx = Some(JsxState {
            depth: 1,
            mode: JsxMode::Tag { closing: false },
        });
        tracing::trace!(line = start.line, column = start.column, "entering markup");
        self.finish(start, TokenKind::JsxOpenTag)
    }

    pub(crate) fn next_markup_token(&mut self, state: JsxState) -> Token {
        self.cursor.eat_while(|b| b.is_ascii_whitespace());
        let start = self.cursor.mark();
        if self.cursor.is_eof() {
            return self.finish(start, TokenKind::Eof);
        }

        match state.mode {
            JsxMode::Tag { closing } => self.tag_token(start, state, closing),
            JsxMode::Children => self.child_token(start, state),
        }
    }

    fn tag_token(&mut self, start: Mark, state: JsxState, closing: bool) -> Token {
        match self.cursor.current() {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                self.cursor
                    .eat_while(|b| is_ident_continue(b) || b == b'-');
                self.finish(start, TokenKind::JsxAttribute)
            }
            b'"' | b'\'' => self.string(start),
            b'{' => self.embedded_expression(start),
            b'>' => {
                self.cursor.advance();
                if closing {
                    self.leave_element(state);
                } else {
                    self.jsx = Some(JsxState {
                        mode: JsxMode::Children,
                        ..state
                    });
                }
                self.finish(start, TokenKind::JsxCloseTag)
            }
            b'/' if self.cursor.peek() == b'>' => {
                self.cursor.advance();
                self.cursor.advance();
                self.leave_element(state);
                self.finish(start, TokenKind::JsxSelfClose)
            }
            _ => self.punctuation(start),
        }
    }

    fn child_token(&mut self, start: Mark, state: JsxState) -> Token {
        match (self.cursor.current(), self.cursor.peek()) {
            (b'<', b'/') => {
                self.cursor.advance();
                self.cursor.advance();
                self.jsx = Some(JsxState {
                    mode: JsxMode::Tag { closing: true },
                    ..state
                });
                self.finish(start, TokenKind::JsxEndTag)
            }
            (b'<', next) if next.is_ascii_alphabetic() => {
                self.cursor.advance();
                self.jsx = Some(JsxState {
                    depth: state.depth.saturating_add(1),
                    mode: JsxMode::Tag { closing: false },
                });
                self.finish(start, TokenKind::JsxOpenTag)
            }
            (b'{', _) => self.embedded_expression(start),
            _ => {
                // The first character belongs to the text even if it is a
                // stray `<` that opens nothing.
                self.cursor.advance_char();
                self.cursor.eat_until2(b'<', b'{');
                self.finish(start, TokenKind::JsxText)
            }
        }
    }

    /// `{...}` with nested braces, as one token including the braces.
    ///
    /// Quoted strings inside are skipped whole, so `{"}"}` is one token.
    fn embedded_expression(&mut self, start: Mark) -> Token {
        self.cursor.advance();
        let mut depth = 1u32;
        while depth > 0 {
            self.cursor
                .eat_while(|b| !matches!(b, b'{' | b'}' | b'"' | b'\''));
            if self.cursor.is_eof() {
                return self.fail(start, LexError::UnterminatedJsxExpression);
            }
            match self.cursor.current() {
                b'"' | b'\'' => {
                    if !self.skip_quoted() {
                        return self.fail(start, LexError::UnterminatedJsxExpression);
                    }
                }
                b'{' => {
                    depth += 1;
                    self.cursor.advance();
                }
                _ => {
                    depth -= 1;
                    self.cursor.advance();
                }
            }
        }
        self.finish(start, TokenKind::JsxExpression)
    }

    fn leave_element(&mut self, state: JsxState) {
        let depth = state.depth.saturating_sub(1);
        if depth == 0 {
            self.jsx = None;
            tracing::trace!(offset = self.cursor.pos(), "leaving markup");
        } else {
            self.jsx = Some(JsxState {
                depth,
                mode: JsxMode::Children,
            });
        }
    }
}
