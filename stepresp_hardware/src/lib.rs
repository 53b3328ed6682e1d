#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Motor/encoder implementations behind the `stepresp_traits` seams.
//!
//! The default build provides a simulated single-axis plant so the whole
//! stack runs without a board. The `hardware` feature adds an rppal-backed
//! rig for an L6206-style driver on Linux.

pub mod error;
#[cfg(feature = "hardware")]
pub mod rig;

use std::cell::Cell;
use std::rc::Rc;

use stepresp_traits::{Actuator, Encoder};

/// Encoder ticks moved per read at 100% duty in the simulated plant.
const TICKS_PER_READ_AT_FULL_DUTY: f64 = 120.0;

/// Shared state of the simulated plant: the commanded duty and the
/// integrated shaft position. Plant time advances one step per encoder
/// read, which matches the one-read-per-tick control cycle.
#[derive(Debug, Default)]
struct Plant {
    duty: Cell<f64>,
    position: Cell<f64>,
}

/// Build a motor/encoder pair over one shared simulated plant.
pub fn simulated_pair() -> (SimulatedMotor, SimulatedEncoder) {
    let plant = Rc::new(Plant::default());
    (
        SimulatedMotor {
            plant: plant.clone(),
        },
        SimulatedEncoder { plant, offset: 0 },
    )
}

/// Simulated motor: stores the commanded duty in the shared plant.
pub struct SimulatedMotor {
    plant: Rc<Plant>,
}

impl Actuator for SimulatedMotor {
    fn set_duty_cycle(
        &mut self,
        percent: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.plant.duty.set(f64::from(percent));
        tracing::trace!(percent, "simulated duty");
        Ok(())
    }
}

/// Simulated encoder: integrates duty into position on every read.
pub struct SimulatedEncoder {
    plant: Rc<Plant>,
    offset: i32,
}

impl Encoder for SimulatedEncoder {
    fn read(&mut self) -> Result<i32, Box<dyn std::error::Error + Send + Sync>> {
        let moved = self.plant.duty.get() / 100.0 * TICKS_PER_READ_AT_FULL_DUTY;
        let pos = self.plant.position.get() + moved;
        self.plant.position.set(pos);
        Ok(pos as i32 - self.offset)
    }

    fn zero(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.offset = self.plant.position.get() as i32;
        Ok(())
    }
}
