//! Test and helper mocks for stepresp_core

use stepresp_traits::{Actuator, Encoder};

/// Actuator that records every commanded duty cycle.
#[derive(Default)]
pub struct SpyActuator {
    pub duties: Vec<f32>,
}

impl Actuator for SpyActuator {
    fn set_duty_cycle(
        &mut self,
        percent: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.duties.push(percent);
        Ok(())
    }
}

/// Encoder that returns a fixed sequence, then repeats the last value.
/// Counts zero() calls and re-references subsequent reads against the
/// position current at zero time.
pub struct ScriptEncoder {
    seq: Vec<i32>,
    idx: usize,
    offset: i32,
    pub zero_calls: u32,
}

impl ScriptEncoder {
    pub fn new(seq: impl Into<Vec<i32>>) -> Self {
        Self {
            seq: seq.into(),
            idx: 0,
            offset: 0,
            zero_calls: 0,
        }
    }

    fn raw(&mut self) -> i32 {
        let v = if self.idx < self.seq.len() {
            let x = self.seq[self.idx];
            self.idx += 1;
            x
        } else {
            self.seq.last().copied().unwrap_or(0)
        };
        v
    }

    fn peek_raw(&self) -> i32 {
        if self.idx < self.seq.len() {
            self.seq[self.idx]
        } else {
            self.seq.last().copied().unwrap_or(0)
        }
    }
}

impl Encoder for ScriptEncoder {
    fn read(&mut self) -> Result<i32, Box<dyn std::error::Error + Send + Sync>> {
        let v = self.raw();
        Ok(v - self.offset)
    }

    fn zero(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.zero_calls += 1;
        self.offset = self.peek_raw();
        Ok(())
    }
}

/// Actuator that always errors; for fault-propagation tests.
pub struct FaultyActuator;

impl Actuator for FaultyActuator {
    fn set_duty_cycle(
        &mut self,
        _percent: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other("pwm fault")))
    }
}
