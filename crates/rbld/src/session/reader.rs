//! Bounded newline framing over a byte stream.

use std::io::{self, BufRead, BufReader, Read};

use super::errors::SessionError;

/// Longest request line accepted, excluding its terminator.
pub(crate) const MAX_LINE_BYTES: usize = 64 * 1024;

/// Splits a stream into request lines.
///
/// Lines end at `\n`; one trailing `\r` is dropped. A final line without a
/// terminator is still delivered once the peer closes its side.
pub(crate) struct LineReader<S> {
    inner: BufReader<S>,
    limit: usize,
}

impl<S: Read> LineReader<S> {
    pub(crate) fn new(stream: S) -> Self {
        Self::with_limit(stream, MAX_LINE_BYTES)
    }

    pub(crate) fn with_limit(stream: S, limit: usize) -> Self {
        Self {
            inner: BufReader::new(stream),
            limit,
        }
    }

    /// Returns the next line, or `None` once the stream is exhausted.
    pub(crate) fn next_line(&mut self) -> Result<Option<Vec<u8>>, SessionError> {
        let mut line = Vec::new();
        loop {
            let available = fill_buf_with_retry(&mut self.inner)?;
            if available.is_empty() {
                return Ok(if line.is_empty() {
                    None
                } else {
                    Some(drop_carriage_return(line))
                });
            }

            if let Some(position) = available.iter().position(|byte| *byte == b'\n') {
                line.extend_from_slice(&available[..position]);
                self.inner.consume(position + 1);
                self.check_limit(&line)?;
                return Ok(Some(drop_carriage_return(line)));
            }

            let consumed = available.len();
            line.extend_from_slice(available);
            self.inner.consume(consumed);
            self.check_limit(&line)?;
        }
    }

    /// Returns a mutable reference to the underlying stream.
    pub(crate) fn get_mut(&mut self) -> &mut S {
        self.inner.get_mut()
    }

    fn check_limit(&self, line: &[u8]) -> Result<(), SessionError> {
        // A carriage return right before the newline does not count.
        let effective = match line.last() {
            Some(b'\r') => line.len() - 1,
            _ => line.len(),
        };
        if effective > self.limit {
            return Err(SessionError::LineTooLong { limit: self.limit });
        }
        Ok(())
    }
}

fn fill_buf_with_retry<R: BufRead>(reader: &mut R) -> Result<&[u8], SessionError> {
    loop {
        match reader.fill_buf() {
            Ok(_) => break,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(source) => return Err(SessionError::Read { source }),
        }
    }
    // Second call only returns the already buffered bytes.
    reader.fill_buf().map_err(|source| SessionError::Read { source })
}

fn drop_carriage_return(mut line: Vec<u8>) -> Vec<u8> {
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    line
}
