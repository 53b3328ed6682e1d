//! One recorded point of a step-response run.

/// A single (elapsed-time, position) record. Immutable once recorded;
/// owned by the run's buffer and discarded when the next run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// Milliseconds since the start of the run.
    pub elapsed_ms: u64,
    /// Encoder position in ticks, relative to the run's zero point.
    pub position: i32,
}

impl Sample {
    #[inline]
    pub fn new(elapsed_ms: u64, position: i32) -> Self {
        Self {
            elapsed_ms,
            position,
        }
    }
}
