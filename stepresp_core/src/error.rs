use thiserror::Error;

use crate::gain::InvalidGain;

#[derive(Debug, Error, Clone)]
pub enum StepError {
    #[error("hardware error: {0}")]
    Hardware(String),
    #[error(transparent)]
    InvalidGain(#[from] InvalidGain),
    #[error("invalid cycle config: {0}")]
    Config(&'static str),
    #[error("io error: {0}")]
    Io(String),
}

impl StepError {
    /// Wrap a boxed hardware-seam error into the typed variant.
    pub fn hardware(e: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::Hardware(e.to_string())
    }
}

impl From<std::io::Error> for StepError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
