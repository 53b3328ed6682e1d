//! Fixed-period run driver.
//!
//! Executes exactly `sample_period_ms / tick_ms` ticks against explicit
//! per-tick deadlines on a monotonic clock. A late tick is counted, never
//! "made up": the next sleep is floored at zero, so drift can accumulate
//! but the loop stays soft-real-time rather than compensating.

use std::time::Duration;

use stepresp_traits::{Actuator, Clock, Encoder};

use crate::controller::ProportionalController;
use crate::error::{Report, Result as CoreResult, StepError};
use crate::sample::Sample;

/// Timing configuration for one run.
#[derive(Debug, Clone, Copy)]
pub struct CycleCfg {
    /// Nominal control period in milliseconds.
    pub tick_ms: u64,
    /// Total run length in milliseconds.
    pub sample_period_ms: u64,
}

impl Default for CycleCfg {
    fn default() -> Self {
        Self {
            tick_ms: 10,
            sample_period_ms: 1000,
        }
    }
}

impl CycleCfg {
    pub fn validate(&self) -> Result<(), StepError> {
        if self.tick_ms == 0 {
            return Err(StepError::Config("tick_ms must be > 0"));
        }
        if self.sample_period_ms < self.tick_ms {
            return Err(StepError::Config("sample_period_ms must be >= tick_ms"));
        }
        Ok(())
    }

    /// Number of ticks (and recorded samples) in one run.
    /// Clamps the divisor so an unvalidated zero tick cannot panic.
    pub fn data_points(&self) -> usize {
        (self.sample_period_ms / self.tick_ms.max(1)) as usize
    }
}

/// Outcome of one completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Recorded samples, oldest first.
    pub samples: Vec<Sample>,
    /// Ticks whose deadline had already passed when the sleep was computed.
    pub missed_deadlines: u32,
}

/// Run the controller for one full sample period.
///
/// Each tick is timestamped relative to the run's start; after the last
/// tick the actuator is commanded to zero duty. Hardware faults mid-run
/// propagate as fatal (the whole run is considered compromised).
pub fn run_cycle<A, E, C>(
    controller: &mut ProportionalController<A, E>,
    cfg: CycleCfg,
    clock: &C,
) -> CoreResult<RunReport>
where
    A: Actuator,
    E: Encoder,
    C: Clock,
{
    cfg.validate().map_err(Report::new)?;
    let ticks = cfg.data_points();
    let mut missed_deadlines: u32 = 0;

    tracing::info!(
        kp = controller.kp().get(),
        setpoint = controller.setpoint(),
        ticks,
        tick_ms = cfg.tick_ms,
        "run start"
    );

    let start = clock.now();
    for i in 0..ticks {
        let elapsed_ms = clock.ms_since(start);
        controller.tick(elapsed_ms).map_err(Report::new)?;
        let deadline = start + Duration::from_millis(cfg.tick_ms * (i as u64 + 1));
        if !clock.sleep_until(deadline) {
            missed_deadlines += 1;
        }
    }
    controller.stop().map_err(Report::new)?;

    if missed_deadlines > 0 {
        tracing::warn!(missed_deadlines, "run finished with late ticks");
    }
    tracing::info!(samples = controller.samples().len(), "run complete");

    Ok(RunReport {
        samples: controller.samples().to_vec(),
        missed_deadlines,
    })
}
