//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Single-axis proportional step-response rig: target responder and host fetcher.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML config (missing file falls back to defaults)
    #[arg(long, default_value = "stepresp.toml")]
    pub config: PathBuf,

    /// Log filter, e.g. "info" or "stepresp_core=debug" (overrides config)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the target-side responder loop over stdio
    Target(TargetArgs),
    /// Fetch one retuned run from the target over the serial link
    Fetch(FetchArgs),
}

#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Control period override in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Run length override in milliseconds
    #[arg(long)]
    pub sample_period_ms: Option<u64>,

    /// Setpoint override in encoder ticks
    #[arg(long)]
    pub setpoint: Option<i32>,

    /// Motor enable (PWM) pin
    #[cfg(feature = "hardware")]
    #[arg(long, default_value_t = 18)]
    pub enable_pin: u8,

    /// Motor input A pin
    #[cfg(feature = "hardware")]
    #[arg(long, default_value_t = 23)]
    pub in_a_pin: u8,

    /// Motor input B pin
    #[cfg(feature = "hardware")]
    #[arg(long, default_value_t = 24)]
    pub in_b_pin: u8,

    /// Encoder channel A pin
    #[cfg(feature = "hardware")]
    #[arg(long, default_value_t = 17)]
    pub enc_a_pin: u8,

    /// Encoder channel B pin
    #[cfg(feature = "hardware")]
    #[arg(long, default_value_t = 27)]
    pub enc_b_pin: u8,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Desired Kp for the run; anything that is not a positive real
    /// silently falls back to the configured default
    #[arg(long)]
    pub kp: String,

    /// Serial device override
    #[arg(long)]
    pub port: Option<String>,

    /// Baud rate override
    #[arg(long)]
    pub baud: Option<u32>,

    /// Read timeout override in milliseconds
    #[arg(long)]
    pub read_timeout_ms: Option<u64>,
}
