//! Turns a byte stream into logical lines with 1-based line numbers.
//!
//! `\n` is the line terminator; a trailing line without a newline is still
//! emitted once; empty input yields no lines. The reader borrows its input
//! for its entire lifetime and copies nothing, so there is no buffer to
//! acquire or release beyond the borrow itself.

/// A lazy iterator over the logical lines of one source file.
pub struct SourceReader<'a> {
    remaining: &'a [u8],
    next_line: u32,
    exhausted: bool,
}

impl<'a> SourceReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            remaining: bytes,
            next_line: 1,
            exhausted: bytes.is_empty(),
        }
    }
}

impl<'a> Iterator for SourceReader<'a> {
    /// `(1-based line number, line bytes without the newline)`.
    type Item = (u32, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let line_number = self.next_line;
        match self.remaining.iter().position(|&b| b == b'\n') {
            Some(newline_pos) => {
                let line = &self.remaining[..newline_pos];
                self.remaining = &self.remaining[newline_pos + 1..];
                self.next_line += 1;
                if self.remaining.is_empty() {
                    self.exhausted = true;
                }
                Some((line_number, line))
            }
            None => {
                self.exhausted = true;
                Some((line_number, self.remaining))
            }
        }
    }
}
