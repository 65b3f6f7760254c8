//! In-memory duplex stream for driving sessions without sockets.

use std::io::{self, Cursor, Read, Write};

/// Serves scripted input and captures everything written back.
pub(crate) struct ScriptedStream {
    input: Cursor<Vec<u8>>,
    written: Vec<u8>,
    fail_writes: bool,
}

impl ScriptedStream {
    pub(crate) fn new(input: &[u8]) -> Self {
        Self {
            input: Cursor::new(input.to_vec()),
            written: Vec::new(),
            fail_writes: false,
        }
    }

    /// Makes every write fail as if the peer had reset the connection.
    pub(crate) fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub(crate) fn into_written(self) -> Vec<u8> {
        self.written
    }
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for ScriptedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_writes {
            return Err(io::Error::from(io::ErrorKind::ConnectionReset));
        }
        self.written.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
