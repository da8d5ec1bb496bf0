//! Panic-mode error recovery.
//!
//! After an error the parser keeps going, suppressing further reports until
//! [`Parser::synchronize`] finds a statement boundary.

use crate::Parser;
use hyp_ir::TokenKind;

/// A set of token kinds as a bitset over [`TokenKind::index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u128 << kind.index()))
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        (self.0 & (1u128 << kind.index())) != 0
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokens that begin a declaration or statement; recovery stops before them.
pub const STMT_BOUNDARY: TokenSet = TokenSet::new()
    .with(TokenKind::Fn)
    .with(TokenKind::Let)
    .with(TokenKind::Const)
    .with(TokenKind::If)
    .with(TokenKind::While)
    .with(TokenKind::For)
    .with(TokenKind::Return);

impl Parser<'_> {
    /// Leave panic mode and skip to the next statement boundary: just past a
    /// `;`, or right before a token in [`STMT_BOUNDARY`].
    pub(crate) fn synchronize(&mut self) {
        self.panic_mode = false;
        let start = self.pos;

        while !self.is_at_end() {
            if self.previous_kind() == Some(TokenKind::Semicolon) {
                break;
            }
            if STMT_BOUNDARY.contains(self.current_kind()) {
                break;
            }
            self.advance();
        }

        tracing::trace!(skipped = self.pos - start, "synchronized");
    }
}
