//! Token types for the Hyper lexer.

use super::Span;
use std::fmt;

/// A token: its kind, where its text lives in the source, and its position.
///
/// The lexeme is never copied; use [`Token::lexeme`] with the source buffer.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 1-based line of the first character.
    pub line: u32,
    /// 1-based column of the first character, counted in characters.
    pub column: u32,
    /// Set only for [`TokenKind::Error`].
    pub error: Option<LexError>,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span, line: u32, column: u32) -> Self {
        Token {
            kind,
            span,
            line,
            column,
            error: None,
        }
    }

    /// Create an error token carrying the lexer's reason.
    #[cold]
    pub fn error(error: LexError, span: Span, line: u32, column: u32) -> Self {
        Token {
            kind: TokenKind::Error,
            span,
            line,
            column,
            error: Some(error),
        }
    }

    /// Source text of this token.
    #[inline]
    pub fn lexeme<'src>(&self, source: &'src str) -> &'src str {
        self.span.slice(source)
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} @ {} ({}:{})",
            self.kind, self.span, self.line, self.column
        )?;
        if let Some(error) = self.error {
            write!(f, " [{error}]")?;
        }
        Ok(())
    }
}

/// Why the lexer produced an error token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LexError {
    UnterminatedString,
    UnexpectedCharacter,
    UnterminatedJsxExpression,
}

impl LexError {
    pub const fn message(self) -> &'static str {
        match self {
            LexError::UnterminatedString => "Unterminated string",
            LexError::UnexpectedCharacter => "Unexpected character",
            LexError::UnterminatedJsxExpression => "Unterminated JSX expression",
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Token kinds for Hyper.
///
/// Fieldless so that a kind fits in a `u128` bitset; literal values are
/// recovered from the lexeme by the parser.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum TokenKind {
    // Literals
    Number,
    String,
    Identifier,

    // Keywords
    Let,
    Const,
    Fn,
    If,
    Else,
    While,
    For,
    In,
    Return,
    Break,
    Continue,
    Match,
    Case,
    Default,
    Struct,
    Enum,
    Import,
    Export,
    Module,
    True,
    False,
    Null,
    And,
    Or,
    Not,
    Async,
    Await,
    Try,
    Catch,
    Finally,
    Throw,
    State,

    // Punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Dot,
    Semicolon,
    Colon,
    Question,
    Tilde,

    // Operators
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Arrow,
    Less,
    LessEqual,
    LeftShift,
    Greater,
    GreaterEqual,
    RightShift,
    Plus,
    PlusEqual,
    PlusPlus,
    Minus,
    MinusEqual,
    MinusMinus,
    Star,
    StarEqual,
    StarStar,
    Slash,
    SlashEqual,
    Percent,
    PercentEqual,
    Ampersand,
    AndAnd,
    AndEqual,
    Pipe,
    OrOr,
    OrEqual,
    Caret,
    XorEqual,

    // Embedded markup
    JsxOpenTag,
    JsxCloseTag,
    JsxEndTag,
    JsxSelfClose,
    JsxAttribute,
    JsxText,
    JsxExpression,

    Error,
    Eof,
}

const _: () = assert!((TokenKind::Eof as u8) < 128);

/// Keyword table, searched linearly once an identifier's end is found.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("let", TokenKind::Let),
    ("const", TokenKind::Const),
    ("fn", TokenKind::Fn),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("for", TokenKind::For),
    ("in", TokenKind::In),
    ("return", TokenKind::Return),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("match", TokenKind::Match),
    ("case", TokenKind::Case),
    ("default", TokenKind::Default),
    ("struct", TokenKind::Struct),
    ("enum", TokenKind::Enum),
    ("import", TokenKind::Import),
    ("export", TokenKind::Export),
    ("module", TokenKind::Module),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("null", TokenKind::Null),
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("not", TokenKind::Not),
    ("async", TokenKind::Async),
    ("await", TokenKind::Await),
    ("try", TokenKind::Try),
    ("catch", TokenKind::Catch),
    ("finally", TokenKind::Finally),
    ("throw", TokenKind::Throw),
    ("state", TokenKind::State),
];

impl TokenKind {
    /// Reclassify an identifier's text as a keyword, if it is one.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(kw, _)| *kw == text)
            .map(|&(_, kind)| kind)
    }

    /// Bit index for `TokenSet` membership.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn is_keyword(self) -> bool {
        let index = self as u8;
        index >= TokenKind::Let as u8 && index <= TokenKind::State as u8
    }

    /// Whether a token of this kind can end an operand.
    ///
    /// A `<` right after such a token is a comparison, never a markup tag.
    pub const fn ends_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Number
                | TokenKind::String
                | TokenKind::Identifier
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::RightParen
                | TokenKind::RightBracket
        )
    }

    /// Upper-snake display name, e.g. `LEFT_PAREN`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "NUMBER",
            Self::String => "STRING",
            Self::Identifier => "IDENTIFIER",
            Self::Let => "LET",
            Self::Const => "CONST",
            Self::Fn => "FN",
            Self::If => "IF",
            Self::Else => "ELSE",
            Self::While => "WHILE",
            Self::For => "FOR",
            Self::In => "IN",
            Self::Return => "RETURN",
            Self::Break => "BREAK",
            Self::Continue => "CONTINUE",
            Self::Match => "MATCH",
            Self::Case => "CASE",
            Self::Default => "DEFAULT",
            Self::Struct => "STRUCT",
            Self::Enum => "ENUM",
            Self::Import => "IMPORT",
            Self::Export => "EXPORT",
            Self::Module => "MODULE",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Null => "NULL",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Async => "ASYNC",
            Self::Await => "AWAIT",
            Self::Try => "TRY",
            Self::Catch => "CATCH",
            Self::Finally => "FINALLY",
            Self::Throw => "THROW",
            Self::State => "STATE",
            Self::LeftParen => "LEFT_PAREN",
            Self::RightParen => "RIGHT_PAREN",
            Self::LeftBrace => "LEFT_BRACE",
            Self::RightBrace => "RIGHT_BRACE",
            Self::LeftBracket => "LEFT_BRACKET",
            Self::RightBracket => "RIGHT_BRACKET",
            Self::Comma => "COMMA",
            Self::Dot => "DOT",
            Self::Semicolon => "SEMICOLON",
            Self::Colon => "COLON",
            Self::Question => "QUESTION",
            Self::Tilde => "TILDE",
            Self::Bang => "BANG",
            Self::BangEqual => "BANG_EQUAL",
            Self::Equal => "EQUAL",
            Self::EqualEqual => "EQUAL_EQUAL",
            Self::Arrow => "ARROW",
            Self::Less => "LESS",
            Self::LessEqual => "LESS_EQUAL",
            Self::LeftShift => "LEFT_SHIFT",
            Self::Greater => "GREATER",
            Self::GreaterEqual => "GREATER_EQUAL",
            Self::RightShift => "RIGHT_SHIFT",
            Self::Plus => "PLUS",
            Self::PlusEqual => "PLUS_EQUAL",
            Self::PlusPlus => "PLUS_PLUS",
            Self::Minus => "MINUS",
            Self::MinusEqual => "MINUS_EQUAL",
            Self::MinusMinus => "MINUS_MINUS",
            Self::Star => "STAR",
            Self::StarEqual => "STAR_EQUAL",
            Self::StarStar => "STAR_STAR",
            Self::Slash => "SLASH",
            Self::SlashEqual => "SLASH_EQUAL",
            Self::Percent => "PERCENT",
            Self::PercentEqual => "PERCENT_EQUAL",
            Self::Ampersand => "AMPERSAND",
            Self::AndAnd => "AND_AND",
            Self::AndEqual => "AND_EQUAL",
            Self::Pipe => "PIPE",
            Self::OrOr => "OR_OR",
            Self::OrEqual => "OR_EQUAL",
            Self::Caret => "CARET",
            Self::XorEqual => "XOR_EQUAL",
            Self::JsxOpenTag => "JSX_OPEN_TAG",
            Self::JsxCloseTag => "JSX_CLOSE_TAG",
            Self::JsxEndTag => "JSX_END_TAG",
            Self::JsxSelfClose => "JSX_SELF_CLOSE",
            Self::JsxAttribute => "JSX_ATTRIBUTE",
            Self::JsxText => "JSX_TEXT",
            Self::JsxExpression => "JSX_EXPRESSION",
            Self::Error => "ERROR",
            Self::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
