#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Host side of the serial retune protocol.
//!
//! The initiator halts and reboots the target, answers its gain prompt and
//! collects one run's `time,position` stream into index-aligned arrays for
//! the plotting consumer. The protocol engine is a small line-driven state
//! machine ([`FetchAutomaton`]) kept separate from the transport so it can
//! be exercised against scripted lines without a real link.

pub mod error;
pub mod initiator;
pub mod transport;

pub use error::LinkError;
pub use initiator::{FetchAutomaton, FetchState, LineOutcome, RunData, fetch_run};
pub use transport::{ScriptedTransport, SerialTransport, Transport};

// Shared line vocabulary lives next to the target responder.
pub use stepresp_core::wire;
