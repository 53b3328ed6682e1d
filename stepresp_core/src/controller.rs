//! Proportional position controller.

use stepresp_traits::{Actuator, Encoder};

use crate::error::StepError;
use crate::gain::Kp;
use crate::sample::Sample;

/// Magnitude bound for the actuation command, in signed percent.
pub const DUTY_LIMIT: f32 = 100.0;

/// Clamp an actuation value to the actuator's accepted duty-cycle range.
#[inline]
fn clamp_duty(v: f32) -> f32 {
    v.clamp(-DUTY_LIMIT, DUTY_LIMIT)
}

/// Closed-loop proportional controller over one actuator/encoder pair.
///
/// Owns the gain, the setpoint and the run's sample buffer. Driven
/// synchronously, one `tick` per control period, by the cycle driver.
/// Assumes the gain in effect is always valid; validation happens at the
/// parse boundary (`Kp`), never here.
pub struct ProportionalController<A, E> {
    actuator: A,
    encoder: E,
    kp: Kp,
    setpoint: i32,
    samples: Vec<Sample>,
    capacity: usize,
}

impl<A: Actuator, E: Encoder> ProportionalController<A, E> {
    pub fn new(actuator: A, encoder: E, kp: Kp, setpoint: i32, capacity: usize) -> Self {
        Self {
            actuator,
            encoder,
            kp,
            setpoint,
            samples: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Replace the gain for the next run. Only called between runs.
    pub fn set_kp(&mut self, kp: Kp) {
        self.kp = kp;
    }

    pub fn kp(&self) -> Kp {
        self.kp
    }

    pub fn setpoint(&self) -> i32 {
        self.setpoint
    }

    /// One control-law execution: sense, compute, actuate, record.
    ///
    /// Returns the commanded duty cycle for introspection. The sample is
    /// only recorded while buffer capacity remains; actuation always runs.
    pub fn tick(&mut self, elapsed_ms: u64) -> Result<f32, StepError> {
        let position = self.encoder.read().map_err(StepError::hardware)?;
        let error = self.setpoint - position;
        let duty = clamp_duty(self.kp.get() * error as f32);
        self.actuator
            .set_duty_cycle(duty)
            .map_err(StepError::hardware)?;
        if self.samples.len() < self.capacity {
            self.samples.push(Sample::new(elapsed_ms, position));
        }
        Ok(duty)
    }

    /// Clear the sample buffer and re-reference the encoder so the next
    /// run starts from a zero position.
    pub fn reset_run(&mut self) -> Result<(), StepError> {
        self.samples.clear();
        self.encoder.zero().map_err(StepError::hardware)
    }

    /// Command the actuator to zero duty.
    pub fn stop(&mut self) -> Result<(), StepError> {
        self.actuator
            .set_duty_cycle(0.0)
            .map_err(StepError::hardware)
    }

    /// Recorded samples of the current run, oldest first. Non-destructive.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Borrow the actuator, e.g. to inspect a spy in tests.
    pub fn actuator_ref(&self) -> &A {
        &self.actuator
    }

    /// Borrow the encoder.
    pub fn encoder_ref(&self) -> &E {
        &self.encoder
    }
}
