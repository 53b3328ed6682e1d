//! Fetch one run from the target: handshake, gain reply, data collection.

use stepresp_core::GainReply;
use stepresp_core::wire;

use crate::error::{LinkError, Result};
use crate::transport::Transport;

/// One run's collected samples, index-aligned: `x[i]` is the elapsed time
/// (ms) of the position in `y[i]`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunData {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl RunData {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// What the automaton wants done with a line it was fed.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// The prompt was seen; write this gain text plus `\r\n` to the target,
    /// then call [`FetchAutomaton::gain_sent`].
    SendGain(String),
    /// A well-formed data line was appended to the run.
    Recorded,
    /// Anything else; logged and dropped, never fatal.
    Discarded,
    /// The terminator line was seen; stop pulling lines.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    AwaitingPromptOrData,
    SendingGain,
    Done,
}

/// Line-driven protocol engine for one fetch.
///
/// Pull lines from anywhere (a serial link, a script) and feed them in;
/// the automaton never touches I/O itself.
#[derive(Debug)]
pub struct FetchAutomaton {
    reply: GainReply,
    state: FetchState,
    data: RunData,
}

impl FetchAutomaton {
    pub fn new(reply: GainReply) -> Self {
        Self {
            reply,
            state: FetchState::AwaitingPromptOrData,
            data: RunData::default(),
        }
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == FetchState::Done
    }

    /// Feed one line (already stripped of its terminator).
    pub fn on_line(&mut self, line: &str) -> LineOutcome {
        debug_assert_ne!(
            self.state,
            FetchState::SendingGain,
            "gain reply still pending"
        );
        if self.state == FetchState::Done {
            return LineOutcome::Discarded;
        }

        let trimmed = line.trim();
        if trimmed == wire::TERMINATOR {
            self.state = FetchState::Done;
            return LineOutcome::Finished;
        }
        if trimmed == wire::PROMPT {
            self.state = FetchState::SendingGain;
            return LineOutcome::SendGain(self.reply.text().to_owned());
        }
        match wire::parse_data_line(trimmed) {
            Some((x, y)) => {
                self.data.x.push(x);
                self.data.y.push(y);
                LineOutcome::Recorded
            }
            None => LineOutcome::Discarded,
        }
    }

    /// Acknowledge that the gain reply went out on the wire.
    pub fn gain_sent(&mut self) {
        if self.state == FetchState::SendingGain {
            self.state = FetchState::AwaitingPromptOrData;
        }
    }

    pub fn into_run_data(self) -> RunData {
        self.data
    }
}

/// Fetch one retuned run over the given transport.
///
/// Performs the full handshake: flush outbound, interrupt the running
/// program, flush inbound, force base mode plus a soft reboot, answer the
/// gain prompt, collect `time,position` lines until the terminator, then
/// halt the target again. The transport is held exclusively for the whole
/// call; a link fault anywhere is terminal and propagates.
pub fn fetch_run<T: Transport>(link: &mut T, reply: GainReply) -> Result<RunData> {
    link.discard_output()?;
    link.write_bytes(&[wire::INTERRUPT])?;
    link.discard_input()?;
    link.write_bytes(&[wire::RAW_MODE, wire::SOFT_REBOOT])?;

    let mut automaton = FetchAutomaton::new(reply);
    while !automaton.is_done() {
        let Some(line) = link.read_line()? else {
            return Err(LinkError::ChannelClosed);
        };
        match automaton.on_line(&line) {
            LineOutcome::SendGain(reply) => {
                tracing::debug!(%reply, "answering gain prompt");
                link.write_bytes(reply.as_bytes())?;
                link.write_bytes(b"\r\n")?;
                automaton.gain_sent();
            }
            LineOutcome::Recorded => {}
            LineOutcome::Discarded => {
                tracing::warn!(line = %line.trim(), "discarding malformed line");
            }
            LineOutcome::Finished => {}
        }
    }

    // halt the resident program until the next fetch
    link.write_bytes(&[wire::INTERRUPT])?;

    let data = automaton.into_run_data();
    tracing::info!(points = data.len(), "run fetched");
    Ok(data)
}
