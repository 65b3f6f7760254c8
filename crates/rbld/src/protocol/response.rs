//! Response encoding for the line protocol.

use std::io::{self, Write};

/// One of the three fixed answers a client can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// The request could not be parsed or the backend failed.
    Error,
    /// Nothing actionable is known about the target.
    NotFound,
    /// The target's score exceeds the configured limit.
    Reject,
}

impl Response {
    /// Numeric status code sent at the start of the line.
    pub fn code(self) -> u16 {
        match self {
            Self::Error => 400,
            Self::NotFound => 500,
            Self::Reject => 200,
        }
    }

    /// Exact bytes written to the connection.
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Error => b"400 \n",
            Self::NotFound => b"500 \n",
            Self::Reject => b"200 REJECT\n",
        }
    }
}

/// Writes encoded responses and flushes after each one.
///
/// A client waits for its answer before sending the next line, so every
/// response is pushed out immediately.
pub struct ResponseWriter<W> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    /// Creates a new response writer wrapping the given output stream.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes one response line and flushes it.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or flushing fails.
    pub fn write_response(&mut self, response: Response) -> io::Result<()> {
        self.writer.write_all(response.as_bytes())?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Response::Error, "400 \n")]
    #[case(Response::NotFound, "500 \n")]
    #[case(Response::Reject, "200 REJECT\n")]
    fn encodes_exact_wire_lines(#[case] response: Response, #[case] expected: &str) {
        assert_eq!(response.as_bytes(), expected.as_bytes());
        assert!(expected.starts_with(&format!("{} ", response.code())));
    }

    #[test]
    fn writer_appends_responses_in_order() {
        let mut buffer = Vec::new();
        let mut writer = ResponseWriter::new(&mut buffer);
        writer
            .write_response(Response::NotFound)
            .expect("write miss");
        writer.write_response(Response::Reject).expect("write hit");
        writer.write_response(Response::Error).expect("write error");

        assert_eq!(buffer.as_slice(), b"500 \n200 REJECT\n400 \n");
    }
}
