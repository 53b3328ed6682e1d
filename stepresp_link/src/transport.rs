//! Byte/line transports for the initiator.
//!
//! `SerialTransport` talks to the real board; `ScriptedTransport` serves a
//! canned line sequence and records every outbound byte, which is what the
//! protocol tests drive the automaton with.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Write};
use std::time::Duration;

use serialport::{ClearBuffer, SerialPort};

use crate::error::{LinkError, Result};

/// Exclusive, line-capable channel to the target.
pub trait Transport {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;

    /// Read one line, stripped of its `\r\n`/`\n` terminator.
    /// `None` means the channel reached EOF.
    fn read_line(&mut self) -> Result<Option<String>>;

    /// Drop any bytes buffered toward the target.
    fn discard_output(&mut self) -> Result<()>;

    /// Drop any bytes buffered from the target.
    fn discard_input(&mut self) -> Result<()>;
}

/// Serial link to the board. 115200 8N1 in the reference deployment; the
/// read timeout bounds how long a stalled target can block a fetch.
pub struct SerialTransport {
    reader: BufReader<Box<dyn SerialPort>>,
}

impl SerialTransport {
    pub fn open(port: &str, baud: u32, read_timeout: Duration) -> Result<Self> {
        let inner = serialport::new(port, baud)
            .timeout(read_timeout)
            .open()
            .map_err(|source| LinkError::Open {
                port: port.to_string(),
                source,
            })?;
        tracing::debug!(port, baud, "serial link open");
        Ok(Self {
            reader: BufReader::new(inner),
        })
    }

    fn port(&mut self) -> &mut Box<dyn SerialPort> {
        self.reader.get_mut()
    }
}

impl Transport for SerialTransport {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.port().write_all(bytes)?;
        self.port().flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        // read_until instead of read_line: the boot chatter of the target
        // is not guaranteed to be valid UTF-8, and a bad line must be
        // discarded, not kill the fetch.
        let mut raw = Vec::new();
        let n = self.reader.read_until(b'\n', &mut raw)?;
        if n == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&raw).into_owned();
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    fn discard_output(&mut self) -> Result<()> {
        self.port()
            .clear(ClearBuffer::Output)
            .map_err(|e| LinkError::Io(std::io::Error::other(e)))
    }

    fn discard_input(&mut self) -> Result<()> {
        self.port()
            .clear(ClearBuffer::Input)
            .map_err(|e| LinkError::Io(std::io::Error::other(e)))?;
        // also drop anything already pulled into the buffered reader
        let buffered = self.reader.buffer().len();
        self.reader.consume(buffered);
        Ok(())
    }
}

/// In-memory transport: serves scripted lines, records written bytes.
#[derive(Default)]
pub struct ScriptedTransport {
    lines: VecDeque<String>,
    pub written: Vec<u8>,
    pub input_discards: u32,
    pub output_discards: u32,
}

impl ScriptedTransport {
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Written bytes split back into lines, for asserting gain replies.
    pub fn written_text(&self) -> String {
        String::from_utf8_lossy(&self.written).into_owned()
    }
}

impl Transport for ScriptedTransport {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.written.extend_from_slice(bytes);
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }

    fn discard_output(&mut self) -> Result<()> {
        self.output_discards += 1;
        Ok(())
    }

    fn discard_input(&mut self) -> Result<()> {
        self.input_discards += 1;
        Ok(())
    }
}
