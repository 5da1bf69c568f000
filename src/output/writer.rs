//! Newline-delimited message writer

use super::message::Message;
use crate::error::Result;
use std::io::Write;

/// Writes messages as one compact JSON object per line
#[derive(Debug)]
pub struct MessageWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> MessageWriter<W> {
    /// Wrap a sink
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Write one message followed by a newline
    pub fn write(&mut self, message: &Message) -> Result<()> {
        serde_json::to_writer(&mut self.out, message)?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Flush the underlying sink
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Messages written so far
    pub fn messages_written(&self) -> usize {
        self.written
    }

    /// Unwrap the sink
    pub fn into_inner(self) -> W {
        self.out
    }
}
