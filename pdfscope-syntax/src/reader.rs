//! A cursor over the bytes of a PDF file.
//!
//! The structure of a PDF file is discovered by reading it from the back (`%%EOF`,
//! `startxref`) before anything is parsed forwards, so the reader supports scanning
//! lines in both directions.

use crate::error::{Error, Result};
use crate::trivia::{is_eol_character, is_regular_character, is_white_space_character};
use std::ops::Range;

/// A reader for reading bytes and PDF tokens.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Create a new reader.
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Create a new reader at the given offset.
    #[inline]
    pub fn new_with(data: &'a [u8], offset: usize) -> Self {
        Self { data, offset }
    }

    /// Returns the underlying data of the reader.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the current offset of the reader.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the total length of the underlying data.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the underlying data is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if the reader has reached the end of the data.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Moves the reader to the specified offset.
    #[inline]
    pub fn jump(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Moves the reader to the last byte of the data.
    #[inline]
    pub fn jump_to_last(&mut self) {
        self.offset = self.data.len().saturating_sub(1);
    }

    /// Moves the reader by `delta` bytes, forwards or backwards.
    #[inline]
    pub fn advance(&mut self, delta: isize) {
        self.offset = self.offset.saturating_add_signed(delta);
    }

    /// Returns a slice of the data for the specified range.
    #[inline]
    pub fn range(&self, range: Range<usize>) -> Option<&'a [u8]> {
        self.data.get(range)
    }

    /// Returns the remaining data from the current offset to the end.
    #[inline]
    pub fn tail(&self) -> &'a [u8] {
        self.data.get(self.offset..).unwrap_or_default()
    }

    /// Returns `true` if the byte at `delta` bytes from the cursor lies outside the data.
    #[inline]
    pub fn out_of_bounds(&self, delta: isize) -> bool {
        self.offset
            .checked_add_signed(delta)
            .is_none_or(|pos| pos >= self.data.len())
    }

    /// Peeks the byte at `delta` bytes from the cursor.
    #[inline]
    pub fn peek(&self, delta: isize) -> Result<u8> {
        self.offset
            .checked_add_signed(delta)
            .and_then(|pos| self.data.get(pos).copied())
            .ok_or(Error::OutOfBounds(self.offset))
    }

    /// Peeks the byte under the cursor.
    #[inline]
    pub fn peek_byte(&self) -> Option<u8> {
        self.data.get(self.offset).copied()
    }

    /// Reads a single byte and advances the offset.
    #[inline]
    pub fn read_one(&mut self) -> Result<u8> {
        let b = self.peek(0)?;
        self.offset += 1;

        Ok(b)
    }

    /// Reads the specified number of bytes and advances the offset.
    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let bytes = self
            .offset
            .checked_add(len)
            .and_then(|end| self.data.get(self.offset..end))
            .ok_or(Error::OutOfBounds(self.offset))?;
        self.offset += len;

        Ok(bytes)
    }

    /// Reads a big-endian unsigned integer that is `n` bytes wide.
    ///
    /// `n` must be at most 8. A width of 0 yields 0 without consuming anything.
    pub fn read_bytes_be(&mut self, n: usize) -> Result<u64> {
        debug_assert!(n <= 8, "integer is wider than 64 bits");

        let bytes = self.read_bytes(n)?;

        Ok(bytes
            .iter()
            .fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
    }

    /// Advances the offset by one byte.
    #[inline]
    pub fn forward(&mut self) {
        self.offset += 1;
    }

    /// Eat the next byte if it satisfies the condition.
    #[inline]
    pub fn eat(&mut self, f: impl Fn(u8) -> bool) -> Option<u8> {
        let val = self.peek_byte()?;

        if f(val) {
            self.forward();
            Some(val)
        } else {
            None
        }
    }

    /// Advances the offset while the byte under the cursor satisfies the predicate.
    #[inline]
    pub fn forward_while(&mut self, f: impl Fn(u8) -> bool) {
        while let Some(b) = self.peek_byte() {
            if f(b) {
                self.forward();
            } else {
                break;
            }
        }
    }

    /// Checks if the next bytes match the specified tag.
    #[inline]
    pub fn peek_tag(&self, tag: &[u8]) -> bool {
        self.tail().starts_with(tag)
    }

    /// Advances the offset if the next bytes match the specified tag.
    #[inline]
    pub fn forward_tag(&mut self, tag: &[u8]) -> Option<()> {
        if self.peek_tag(tag) {
            self.offset += tag.len();

            Some(())
        } else {
            None
        }
    }

    /// Skips white-space characters.
    #[inline]
    pub fn skip_white_spaces(&mut self) {
        self.forward_while(is_white_space_character);
    }

    /// Reads a run of regular characters (a keyword, number or bare token).
    ///
    /// The result is empty if the cursor is on a delimiter or white space.
    #[inline]
    pub fn read_token(&mut self) -> &'a [u8] {
        let start = self.offset.min(self.data.len());
        self.forward_while(is_regular_character);

        &self.data[start..self.offset.min(self.data.len())]
    }

    /// Reads the bytes up to the next end-of-line marker and steps over the marker.
    ///
    /// The marker itself is not part of the result. A line that is cut off by the end of the
    /// data is returned as-is.
    pub fn read_line(&mut self) -> &'a [u8] {
        let start = self.offset.min(self.data.len());
        self.forward_while(|b| !is_eol_character(b));
        let line = &self.data[start..self.offset.min(self.data.len())];
        self.skip_eol();

        line
    }

    /// Steps over a single end-of-line marker (CR, LF or CRLF) under the cursor.
    #[inline]
    pub fn skip_eol(&mut self) {
        if self.forward_tag(b"\r\n").is_none() {
            self.eat(is_eol_character);
        }
    }

    /// Steps backwards over a single end-of-line marker under the cursor.
    ///
    /// When the cursor is on the LF of a CRLF pair, both bytes are stepped over.
    #[inline]
    pub fn reverse_skip_eol(&mut self) {
        match self.peek_byte() {
            Some(b'\n') if self.peek(-1).ok() == Some(b'\r') => self.advance(-2),
            Some(b'\n' | b'\r') => self.advance(-1),
            _ => {}
        }
    }

    /// Steps backwards over white space under the cursor.
    pub fn reverse_skip_white_spaces(&mut self) {
        while self.offset > 0 && self.peek_byte().is_some_and(is_white_space_character) {
            self.offset -= 1;
        }
    }

    /// Reads the line ending at the cursor, scanning backwards.
    ///
    /// An end-of-line marker directly under the cursor is stepped over first, so that
    /// calling this repeatedly yields the preceding lines one after another. Afterwards, the
    /// cursor rests on the line terminator in front of the returned line.
    pub fn reverse_read_line(&mut self) -> Result<&'a [u8]> {
        self.reverse_skip_eol();
        // Fails if the cursor is past the end of the data.
        self.peek(0)?;
        let end = self.offset + 1;

        loop {
            if self.peek_byte().is_some_and(is_eol_character) {
                return Ok(&self.data[self.offset + 1..end]);
            }

            if self.offset == 0 {
                return Ok(&self.data[..end]);
            }

            self.offset -= 1;
        }
    }

    /// Reads a value, restoring the previous offset in case reading fails.
    #[inline]
    pub(crate) fn read<T: Readable>(&mut self) -> Result<T> {
        let old_offset = self.offset;

        T::read(self).inspect_err(|_| {
            self.offset = old_offset;
        })
    }
}

/// A value that can be read from a [`Reader`].
pub(crate) trait Readable: Sized {
    fn read(r: &mut Reader<'_>) -> Result<Self>;
}
