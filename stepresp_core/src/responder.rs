//! Target-side protocol responder.
//!
//! Serves the retune-and-run loop over any line-oriented channel: prompt
//! for a gain, run one sample period, stream the recorded samples, print
//! the terminator, repeat. The channel is abstract (`BufRead`/`Write`) so
//! the same loop runs against the board's console and against in-memory
//! buffers in tests.

use std::io::{BufRead, Write};

use stepresp_traits::{Actuator, Clock, Encoder};

use crate::controller::ProportionalController;
use crate::cycle::{CycleCfg, run_cycle};
use crate::error::{Report, Result as CoreResult, StepError};
use crate::gain::Kp;
use crate::wire;

pub struct Responder<A, E, C> {
    controller: ProportionalController<A, E>,
    cfg: CycleCfg,
    clock: C,
}

impl<A, E, C> Responder<A, E, C>
where
    A: Actuator,
    E: Encoder,
    C: Clock,
{
    pub fn new(controller: ProportionalController<A, E>, cfg: CycleCfg, clock: C) -> Self {
        Self {
            controller,
            cfg,
            clock,
        }
    }

    /// Borrow the controller, e.g. to inspect spies in tests.
    pub fn controller_ref(&self) -> &ProportionalController<A, E> {
        &self.controller
    }

    /// Run the responder loop until EOF on `input` or a terminal fault.
    ///
    /// An unparsable or non-positive gain line is terminal: the loop exits
    /// with the offending literal in the error, with no default fallback.
    /// Hardware and channel faults are terminal as well. EOF at the prompt
    /// is a clean shutdown.
    pub fn serve<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> CoreResult<()> {
        loop {
            self.controller.stop().map_err(Report::new)?;

            writeln!(output, "{}", wire::PROMPT).map_err(StepError::from)?;
            output.flush().map_err(StepError::from)?;

            let mut line = String::new();
            let n = input.read_line(&mut line).map_err(StepError::from)?;
            if n == 0 {
                tracing::info!("input channel closed, leaving run loop");
                return Ok(());
            }

            let kp = Kp::parse(&line).map_err(StepError::from)?;
            tracing::info!(kp = kp.get(), "running test");
            self.controller.set_kp(kp);
            self.controller.reset_run().map_err(Report::new)?;

            let report = run_cycle(&mut self.controller, self.cfg, &self.clock)?;

            for sample in &report.samples {
                writeln!(output, "{}", wire::format_data_line(*sample)).map_err(StepError::from)?;
            }
            writeln!(output, "{}", wire::TERMINATOR).map_err(StepError::from)?;
            output.flush().map_err(StepError::from)?;
        }
    }
}
