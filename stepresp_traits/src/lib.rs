pub mod clock;

pub use clock::{Clock, MonotonicClock};

/// Motor drive seam: a signed duty-cycle percentage in [-100.0, 100.0].
/// Positive values drive toward increasing encoder counts.
pub trait Actuator {
    fn set_duty_cycle(
        &mut self,
        percent: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Position sensor seam: absolute counts relative to the last zero point.
pub trait Encoder {
    fn read(&mut self) -> Result<i32, Box<dyn std::error::Error + Send + Sync>>;

    /// Re-reference the encoder so subsequent reads are relative to the
    /// position at the time of the call.
    fn zero(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
