#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the step-response rig.
//!
//! Deserialized from TOML and validated; every section has defaults that
//! match the reference deployment (Nucleo over USB serial at 115200, 10 ms
//! tick, 1 s sample period).

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Serial {
    /// Serial device path of the target board.
    pub port: String,
    pub baud: u32,
    /// Host-side read timeout; bounds how long a stalled target can block a fetch.
    pub read_timeout_ms: u64,
}

impl Default for Serial {
    fn default() -> Self {
        Self {
            port: "/dev/ttyACM0".to_string(),
            baud: 115_200,
            read_timeout_ms: 2_000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Control {
    /// Nominal control period in milliseconds.
    pub tick_ms: u64,
    /// Total run length in milliseconds.
    pub sample_period_ms: u64,
    /// Target position in encoder ticks (about one motor revolution).
    pub setpoint: i32,
    /// Gain the host substitutes for unusable input.
    pub default_kp: f32,
}

impl Default for Control {
    fn default() -> Self {
        Self {
            tick_ms: 10,
            sample_period_ms: 1_000,
            setpoint: 8_150,
            default_kp: 0.01,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub level: Option<String>, // "info","debug"
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub serial: Serial,
    pub control: Control,
    pub logging: Logging,
}

impl Config {
    /// Parse TOML text and validate.
    pub fn from_toml_str(text: &str) -> eyre::Result<Self> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Field-naming validation; an invalid config never reaches the loops.
    pub fn validate(&self) -> eyre::Result<()> {
        if self.serial.port.is_empty() {
            eyre::bail!("serial.port must not be empty");
        }
        if self.serial.baud == 0 {
            eyre::bail!("serial.baud must be > 0");
        }
        if self.serial.read_timeout_ms == 0 {
            eyre::bail!("serial.read_timeout_ms must be > 0");
        }
        if self.control.tick_ms == 0 {
            eyre::bail!("control.tick_ms must be > 0");
        }
        if self.control.sample_period_ms < self.control.tick_ms {
            eyre::bail!("control.sample_period_ms must be >= control.tick_ms");
        }
        if !(self.control.default_kp.is_finite() && self.control.default_kp > 0.0) {
            eyre::bail!("control.default_kp must be a positive number");
        }
        Ok(())
    }
}
