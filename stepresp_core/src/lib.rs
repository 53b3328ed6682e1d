#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core step-response logic (hardware-agnostic).
//!
//! This crate provides the target-side control engine. All hardware
//! interactions go through `stepresp_traits::Actuator` and
//! `stepresp_traits::Encoder` traits.
//!
//! ## Architecture
//!
//! - **Gain**: validated `Kp` newtype with the two parse policies (`gain` module)
//! - **Control**: proportional law with duty clamping (`controller` module)
//! - **Timing**: fixed-period tick loop with deadline tracking (`cycle` module)
//! - **Protocol**: line vocabulary shared with the host (`wire` module)
//! - **Responder**: prompt/run/print loop served over any line channel
//!   (`responder` module)

pub mod controller;
pub mod cycle;
pub mod error;
pub mod gain;
pub mod mocks;
pub mod responder;
pub mod sample;
pub mod wire;

pub use controller::{DUTY_LIMIT, ProportionalController};
pub use cycle::{CycleCfg, RunReport, run_cycle};
pub use error::StepError;
pub use gain::{DEFAULT_KP, GainReply, InvalidGain, Kp};
pub use responder::Responder;
pub use sample::Sample;
