//! Lexer for Hyper.
//!
//! A hand-written scanner over a byte [`Cursor`](cursor::Cursor). Tokens copy
//! no text: each carries a [`Span`](hyp_ir::Span) into the source plus its
//! 1-based line and column.
//!
//! # Embedded markup
//!
//! `<` followed by a letter, where the previous token could not end an
//! operand, opens JSX-style markup. The lexer then switches to the markup
//! rules in [`jsx`] until the element nesting depth drops back to zero. The
//! mode is plain state on [`Lexer`]; there is no second lexer instance.
//!
//! # Errors
//!
//! Lexing never aborts. Unterminated strings, unterminated markup
//! expressions and unrecognised characters become [`TokenKind::Error`] tokens
//! carrying a [`LexError`], and scanning resumes right after them.

mod cursor;
mod jsx;

use cursor::{Cursor, Mark};
use hyp_ir::{LexError, Token, TokenKind};
use jsx::JsxState;

/// On-demand tokenizer. After the end of input, [`Lexer::next_token`]
/// returns `Eof` forever.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    /// `Some` while inside embedded markup.
    jsx: Option<JsxState>,
    /// Kind of the last token produced; separates `a<b` from `<div`.
    prev: Option<TokenKind>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            jsx: None,
            prev: None,
        }
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Token {
        let token = match self.jsx {
            Some(state) => self.next_markup_token(state),
            None => self.next_code_token(),
        };
        self.prev = Some(token.kind);
        token
    }

    /// Whether the lexer is currently inside embedded markup.
    pub fn in_markup(&self) -> bool {
        self.jsx.is_some()
    }

    fn next_code_token(&mut self) -> Token {
        self.skip_trivia();
        let start = self.cursor.mark();
        if self.cursor.is_eof() {
            return self.finish(start, TokenKind::Eof);
        }

        match self.cursor.current() {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(start),
            b'0'..=b'9' => self.number(start),
            b'"' | b'\'' => self.string(start),
            b'<' if self.cursor.peek().is_ascii_alphabetic() && !self.prev_ends_operand() => {
                self.enter_markup(start)
            }
            _ => self.punctuation(start),
        }
    }

    fn prev_ends_operand(&self) -> bool {
        self.prev.is_some_and(TokenKind::ends_operand)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.current() {
                b if b.is_ascii_whitespace() => self.cursor.advance(),
                b'/' if self.cursor.peek() == b'/' => self.cursor.eat_until_newline(),
                // An unterminated block comment runs to the end of input.
                b'/' if self.cursor.peek() == b'*' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    self.cursor.eat_past(b"*/");
                }
                _ => return,
            }
        }
    }

    fn identifier(&mut self, start: Mark) -> Token {
        self.cursor.eat_while(is_ident_continue);
        let kind = TokenKind::keyword(self.cursor.slice_from(start.pos))
            .unwrap_or(TokenKind::Identifier);
        self.finish(start, kind)
    }

    /// Digits, an optional fraction, an optional exponent.
    ///
    /// The `.` and the exponent are only taken when a digit follows them, so
    /// `7.` is `NUMBER DOT` and `1e` is `NUMBER IDENTIFIER`.
    fn number(&mut self, start: Mark) -> Token {
        self.cursor.eat_while(|b| b.is_ascii_digit());

        if self.cursor.current() == b'.' && self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_digit());
        }

        if matches!(self.cursor.current(), b'e' | b'E') {
            let signed = matches!(self.cursor.peek(), b'+' | b'-');
            let digit = if signed {
                self.cursor.peek2()
            } else {
                self.cursor.peek()
            };
            if digit.is_ascii_digit() {
                self.cursor.advance();
                if signed {
                    self.cursor.advance();
                }
                self.cursor.eat_while(|b| b.is_ascii_digit());
            }
        }

        self.finish(start, TokenKind::Number)
    }

    /// A `"` or `'` delimited string. Escapes are skipped, not decoded.
    fn string(&mut self, start: Mark) -> Token {
        if self.skip_quoted() {
            self.finish(start, TokenKind::String)
        } else {
            self.fail(start, LexError::UnterminatedString)
        }
    }

    /// Consume a quoted run starting at its opening quote, skipping escapes.
    ///
    /// Returns `false` when the input ends before the closing quote.
    fn skip_quoted(&mut self) -> bool {
        let quote = self.cursor.current();
        self.cursor.advance();
        loop {
            match self.cursor.eat_until2(quote, b'\\') {
                None => return false,
                Some(b'\\') => {
                    self.cursor.advance();
                    self.cursor.advance_char();
                }
                Some(_) => {
                    self.cursor.advance();
                    return true;
                }
            }
        }
    }

    fn punctuation(&mut self, start: Mark) -> Token {
        use TokenKind::{
            AndAnd, AndEqual, Ampersand, Arrow, Bang, BangEqual, Caret, Colon, Comma, Dot, Equal,
            EqualEqual, Greater, GreaterEqual, JsxEndTag, LeftBrace, LeftBracket, LeftParen,
            LeftShift, Less, LessEqual, Minus, MinusEqual, MinusMinus, OrEqual, OrOr, Percent,
            PercentEqual, Pipe, Plus, PlusEqual, PlusPlus, Question, RightBrace, RightBracket,
            RightParen, RightShift, Semicolon, Slash, SlashEqual, Star, StarEqual, StarStar, Tilde,
            XorEqual,
        };

        let c = self.cursor.current();
        self.cursor.advance();
        let kind = match c {
            b'(' => LeftParen,
            b')' => RightParen,
            b'{' => LeftBrace,
            b'}' => RightBrace,
            b'[' => LeftBracket,
            b']' => RightBracket,
            b',' => Comma,
            b'.' => Dot,
            b';' => Semicolon,
            b':' => Colon,
            b'?' => Question,
            b'~' => Tilde,
            b'!' => self.either(b'=', BangEqual, Bang),
            b'=' => self.one_of(&[(b'=', EqualEqual), (b'>', Arrow)], Equal),
            b'<' => self.one_of(&[(b'=', LessEqual), (b'<', LeftShift), (b'/', JsxEndTag)], Less),
            b'>' => self.one_of(&[(b'=', GreaterEqual), (b'>', RightShift)], Greater),
            b'+' => self.one_of(&[(b'=', PlusEqual), (b'+', PlusPlus)], Plus),
            b'-' => self.one_of(&[(b'=', MinusEqual), (b'-', MinusMinus)], Minus),
            b'*' => self.one_of(&[(b'=', StarEqual), (b'*', StarStar)], Star),
            b'/' => self.either(b'=', SlashEqual, Slash),
            b'%' => self.either(b'=', PercentEqual, Percent),
            b'&' => self.one_of(&[(b'&', AndAnd), (b'=', AndEqual)], Ampersand),
            b'|' => self.one_of(&[(b'|', OrOr), (b'=', OrEqual)], Pipe),
            b'^' => self.either(b'=', XorEqual, Caret),
            _ => {
                // Keep spans on character boundaries for multi-byte input.
                self.cursor.eat_while(|b| b & 0xC0 == 0x80);
                return self.fail(start, LexError::UnexpectedCharacter);
            }
        };
        self.finish(start, kind)
    }

    #[inline]
    fn either(&mut self, next: u8, matched: TokenKind, otherwise: TokenKind) -> TokenKind {
        if self.cursor.eat(next) {
            matched
        } else {
            otherwise
        }
    }

    /// Maximal munch over a short list of second characters.
    fn one_of(&mut self, options: &[(u8, TokenKind)], otherwise: TokenKind) -> TokenKind {
        options
            .iter()
            .find(|&&(next, _)| self.cursor.eat(next))
            .map_or(otherwise, |&(_, kind)| kind)
    }

    fn finish(&self, start: Mark, kind: TokenKind) -> Token {
        Token::new(
            kind,
            self.cursor.span_from(start.pos),
            start.line,
            start.column,
        )
    }

    #[cold]
    fn fail(&self, start: Mark, error: LexError) -> Token {
        Token::error(
            error,
            self.cursor.span_from(start.pos),
            start.line,
            start.column,
        )
    }
}

#[inline]
fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Lex `source` completely. The last token is always `Eof`.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::with_capacity(source.len() / 4 + 1);
    loop {
        let token = lexer.next_token();
        tokens.push(token);
        if token.is_eof() {
            break;
        }
    }
    tracing::trace!(count = tokens.len(), "tokenized");
    tokens
}
