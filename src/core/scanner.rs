//! SIMD-accelerated NUL scanning using memchr
//!
//! Uses memchr crate for fast byte searching with SIMD acceleration:
//! - SSE2 (default x86_64)
//! - AVX2 (runtime detection)
//! - NEON (aarch64)
//!
//! Every read is bounds-checked against the input; nothing past the end of
//! the slice is ever touched.

use memchr::memchr;

/// Forward-only byte cursor over a document buffer
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Create a scanner that starts at `pos`
    #[inline]
    pub fn at(input: &'a [u8], pos: usize) -> Self {
        Scanner { input, pos }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get the input
    #[inline]
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get remaining bytes
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        self.input.get(self.pos..).unwrap_or(&[])
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Read one byte and advance past it
    #[inline]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Read a NUL-terminated string, returning it without the terminator
    /// and advancing past the NUL.
    ///
    /// Returns `None` and leaves the position untouched when no NUL occurs
    /// before the end of the input.
    #[inline]
    pub fn read_cstr(&mut self) -> Option<&'a [u8]> {
        let rest = self.remaining();
        let len = memchr(0, rest)?;
        self.pos += len + 1;
        Some(&rest[..len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cstr() {
        let mut scanner = Scanner::new(b"abc\0de\0");
        assert_eq!(scanner.read_cstr(), Some(b"abc" as &[u8]));
        assert_eq!(scanner.position(), 4);
        assert_eq!(scanner.read_cstr(), Some(b"de" as &[u8]));
        assert!(scanner.is_eof());
    }

    #[test]
    fn test_read_empty_cstr() {
        let mut scanner = Scanner::new(b"\0");
        assert_eq!(scanner.read_cstr(), Some(b"" as &[u8]));
        assert_eq!(scanner.position(), 1);
    }

    #[test]
    fn test_unterminated_cstr() {
        let mut scanner = Scanner::new(b"abc");
        assert_eq!(scanner.read_cstr(), None);
        assert_eq!(scanner.position(), 0);
    }

    #[test]
    fn test_next_byte_at_end() {
        let mut scanner = Scanner::new(b"\x03");
        assert_eq!(scanner.next_byte(), Some(0x03));
        assert_eq!(scanner.next_byte(), None);
        assert_eq!(scanner.position(), 1);
    }

    #[test]
    fn test_input_is_whole_buffer() {
        let mut scanner = Scanner::new(b"ab\0");
        scanner.read_cstr();
        assert_eq!(scanner.input(), b"ab\0");
        assert!(scanner.remaining().is_empty());
    }

    #[test]
    fn test_position_past_end() {
        let scanner = Scanner::at(b"ab", 5);
        assert!(scanner.is_eof());
        assert!(scanner.remaining().is_empty());
        assert_eq!(scanner.peek(), None);
    }
}
