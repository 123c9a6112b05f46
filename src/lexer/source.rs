//! Codepoint decoding over a buffered byte stream

use std::io::{self, BufRead, ErrorKind};

/// Decodes UTF-8 codepoints from a [`BufRead`] one at a time
///
/// A full sequence is gathered before decoding, so a codepoint is never split
/// across the reader's buffer boundaries. Position bookkeeping is left to the
/// caller.
pub(crate) struct CharSource<R> {
    reader: R,
    peeked: Option<char>,
}

impl<R: BufRead> CharSource<R> {
    /// Wraps a buffered reader
    pub fn new(reader: R) -> Self {
        CharSource {
            reader,
            peeked: None,
        }
    }

    /// Returns the next codepoint without consuming it, `None` at end of input
    pub fn peek(&mut self) -> io::Result<Option<char>> {
        if self.peeked.is_none() {
            self.peeked = self.decode()?;
        }
        Ok(self.peeked)
    }

    /// Consumes and returns the next codepoint, `None` at end of input
    pub fn next_char(&mut self) -> io::Result<Option<char>> {
        match self.peeked.take() {
            Some(c) => Ok(Some(c)),
            None => self.decode(),
        }
    }

    fn decode(&mut self) -> io::Result<Option<char>> {
        let lead = match self.read_byte()? {
            Some(b) => b,
            None => return Ok(None),
        };

        let width = utf8_width(lead);
        if width == 0 {
            return Err(invalid_data(format!("invalid UTF-8 lead byte 0x{lead:02x}")));
        }

        let mut bytes = [lead, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            match self.read_byte()? {
                Some(b) => *slot = b,
                None => {
                    return Err(io::Error::new(
                        ErrorKind::UnexpectedEof,
                        "stream ends inside a UTF-8 sequence",
                    ))
                }
            }
        }

        match std::str::from_utf8(&bytes[..width]) {
            Ok(s) => Ok(s.chars().next()),
            Err(_) => Err(invalid_data(format!(
                "invalid UTF-8 sequence {:02x?}",
                &bytes[..width]
            ))),
        }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            let byte = buf.first().copied();
            if byte.is_some() {
                self.reader.consume(1);
            }
            return Ok(byte);
        }
    }
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(ErrorKind::InvalidData, message)
}

/// Length of the UTF-8 sequence started by `lead`, 0 if it cannot start one
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}
