//! Byte cursor over source text.
//!
//! Tracks the 1-based line and column of the current position as it moves.
//! Columns count characters, so UTF-8 continuation bytes do not advance them.
//! Reading past the end yields `0`; callers that must tell a real NUL byte
//! from the end of input check [`Cursor::is_eof`].

use hyp_ir::Span;

/// Where a token started: byte offset plus its line and column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Mark {
    pub pos: usize,
    pub line: u32,
    pub column: u32,
}

#[derive(Clone, Debug)]
pub(crate) struct Cursor<'a> {
    source: &'a str,
    buf: &'a [u8],
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor {
            source,
            buf: source.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    #[inline]
    pub(crate) fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    #[inline]
    pub(crate) fn peek2(&self) -> u8 {
        self.byte_at(self.pos + 2)
    }

    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        self.buf.get(index).copied().unwrap_or(0)
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.buf.len()
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    /// Advance one byte. No-op at the end of input.
    #[inline]
    pub(crate) fn advance(&mut self) {
        if let Some(&byte) = self.buf.get(self.pos) {
            self.pos += 1;
            if byte == b'\n' {
                self.line += 1;
                self.column = 1;
            } else if !is_continuation(byte) {
                self.column += 1;
            }
        }
    }

    /// Advance over one whole character, however many bytes it takes.
    pub(crate) fn advance_char(&mut self) {
        self.advance();
        self.eat_while(is_continuation);
    }

    /// Consume `byte` if it is next.
    #[inline]
    pub(crate) fn eat(&mut self, byte: u8) -> bool {
        if !self.is_eof() && self.current() == byte {
            self.advance();
            true
        } else {
            false
        }
    }

    #[inline]
    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.advance();
        }
    }

    /// Move forward to `target`, clamped to the end of input.
    fn advance_to(&mut self, target: usize) {
        let target = target.min(self.buf.len());
        while self.pos < target {
            self.advance();
        }
    }

    fn remaining(&self) -> &'a [u8] {
        self.buf.get(self.pos..).unwrap_or(&[])
    }

    /// Stop at the next `\n` (not consumed) or at the end of input.
    pub(crate) fn eat_until_newline(&mut self) {
        match memchr::memchr(b'\n', self.remaining()) {
            Some(offset) => self.advance_to(self.pos + offset),
            None => self.advance_to(self.buf.len()),
        }
    }

    /// Stop at the next `a` or `b` and return which one was found.
    ///
    /// Returns `None` after running to the end of input.
    pub(crate) fn eat_until2(&mut self, a: u8, b: u8) -> Option<u8> {
        match memchr::memchr2(a, b, self.remaining()) {
            Some(offset) => {
                self.advance_to(self.pos + offset);
                Some(self.current())
            }
            None => {
                self.advance_to(self.buf.len());
                None
            }
        }
    }

    /// Consume everything up to and including `needle`, or to the end.
    pub(crate) fn eat_past(&mut self, needle: &[u8]) {
        match memchr::memmem::find(self.remaining(), needle) {
            Some(offset) => self.advance_to(self.pos + offset + needle.len()),
            None => self.advance_to(self.buf.len()),
        }
    }

    /// Source text from `start` to the current position.
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        self.source.get(start..self.pos).unwrap_or("")
    }

    pub(crate) fn span_from(&self, start: usize) -> Span {
        Span::new(offset(start), offset(self.pos))
    }
}

#[inline]
fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

fn offset(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_zero_past_end() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.current(), b'a');
        assert_eq!(cursor.peek(), b'b');
        assert_eq!(cursor.peek2(), 0);
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_eof());
        assert_eq!(cursor.current(), 0);
        cursor.advance();
        assert_eq!(cursor.pos(), 2);
    }

    #[test]
    fn tracks_lines_and_columns() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.eat_until_newline();
        assert_eq!(cursor.mark(), Mark { pos: 2, line: 1, column: 3 });
        cursor.advance();
        assert_eq!(cursor.mark(), Mark { pos: 3, line: 2, column: 1 });
    }

    #[test]
    fn columns_count_characters() {
        let mut cursor = Cursor::new("éx");
        cursor.advance_char();
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.mark().column, 2);
        assert_eq!(cursor.slice_from(0), "é");
    }

    #[test]
    fn eat_until2_reports_delimiter() {
        let mut cursor = Cursor::new("text{x}<");
        assert_eq!(cursor.eat_until2(b'<', b'{'), Some(b'{'));
        assert_eq!(cursor.pos(), 4);
        cursor.advance();
        assert_eq!(cursor.eat_until2(b'<', b'{'), Some(b'<'));
        assert_eq!(cursor.pos(), 7);

        let mut cursor = Cursor::new("plain");
        assert_eq!(cursor.eat_until2(b'<', b'{'), None);
        assert!(cursor.is_eof());
    }

    #[test]
    fn eat_past_stops_after_needle() {
        let mut cursor = Cursor::new("/* a\n b */x");
        cursor.eat_past(b"*/");
        assert_eq!(cursor.current(), b'x');
        assert_eq!(cursor.mark().line, 2);

        let mut cursor = Cursor::new("/* open");
        cursor.eat_past(b"*/");
        assert!(cursor.is_eof());
    }
}
