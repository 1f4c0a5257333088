use crate::constants::MESSAGE_DELIMITER;
use crate::error::FramingError;
use crate::numeric::to_string;

/// Splits a byte stream into newline-terminated messages.
///
/// Bytes after the last delimiter are retained until a later chunk
/// completes them. Text decoding is done per complete message so that a
/// multi-byte character split across two reads decodes correctly.
#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> LineFramer {
        LineFramer::default()
    }

    /// Appends `chunk` and extracts every complete message, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<String>, FramingError> {
        let scan_from = self.buffer.len();
        self.buffer.extend_from_slice(chunk);

        let mut messages = Vec::new();
        let mut start = 0;
        let mut search_from = scan_from;
        while let Some(end) = find_delimiter(&self.buffer, search_from) {
            let line = &self.buffer[start..end];
            match std::str::from_utf8(line) {
                Ok(text) => messages.push(text.to_owned()),
                Err(source) => {
                    let bytes = to_string(line);
                    self.buffer.drain(..=end);
                    return Err(FramingError::InvalidUtf8 { bytes, source });
                }
            }
            start = end + 1;
            search_from = start;
        }
        self.buffer.drain(..start); // remove consumed messages and delimiters
        Ok(messages)
    }

    /// Number of bytes of the trailing partial message.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

fn find_delimiter(buffer: &[u8], from: usize) -> Option<usize> {
    buffer[from..]
        .iter()
        .position(|b| *b == MESSAGE_DELIMITER)
        .map(|i| from + i)
}
