//! rppal-backed motor and encoder for an L6206-style driver board.
//!
//! The motor gets two direction inputs plus a software-PWM enable pin; the
//! encoder counts quadrature edges from an interrupt handler into an atomic
//! counter, so reads never block the control loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use rppal::gpio::{Gpio, InputPin, Level, OutputPin, Trigger};
use tracing::trace;

use crate::error::{HwError, Result};
use stepresp_traits::{Actuator, Encoder};

/// PWM carrier frequency for the enable pin.
const PWM_HZ: f64 = 20_000.0;

pub struct PwmMotor {
    enable: OutputPin,
    in_a: OutputPin,
    in_b: OutputPin,
}

impl PwmMotor {
    pub fn new(enable_pin: u8, in_a_pin: u8, in_b_pin: u8) -> Result<Self> {
        let gpio = Gpio::new().map_err(|e| HwError::Gpio(e.to_string()))?;
        let pin = |n: u8| -> Result<OutputPin> {
            Ok(gpio
                .get(n)
                .map_err(|e| HwError::Gpio(e.to_string()))?
                .into_output_low())
        };
        Ok(Self {
            enable: pin(enable_pin)?,
            in_a: pin(in_a_pin)?,
            in_b: pin(in_b_pin)?,
        })
    }

    fn apply(&mut self, percent: f32) -> Result<()> {
        if !(-100.0..=100.0).contains(&percent) {
            return Err(HwError::DutyRange(percent));
        }
        if percent >= 0.0 {
            self.in_a.set_high();
            self.in_b.set_low();
        } else {
            self.in_a.set_low();
            self.in_b.set_high();
        }
        let duty = f64::from(percent.abs()) / 100.0;
        self.enable
            .set_pwm_frequency(PWM_HZ, duty)
            .map_err(|e| HwError::Gpio(e.to_string()))?;
        trace!(percent, "pwm duty applied");
        Ok(())
    }
}

impl Actuator for PwmMotor {
    fn set_duty_cycle(
        &mut self,
        percent: f32,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.apply(percent).map_err(Into::into)
    }
}

pub struct QuadratureEncoder {
    // held for the lifetime of the interrupt registration
    _channel_a: InputPin,
    count: Arc<AtomicI32>,
    offset: i32,
}

impl QuadratureEncoder {
    /// Count x1 quadrature: every rising edge on A, direction from B.
    pub fn new(a_pin: u8, b_pin: u8) -> Result<Self> {
        let gpio = Gpio::new().map_err(|e| HwError::Gpio(e.to_string()))?;
        let mut channel_a = gpio
            .get(a_pin)
            .map_err(|e| HwError::Gpio(e.to_string()))?
            .into_input_pullup();
        // channel B is owned by the interrupt handler; direction only ever
        // matters at an A edge
        let channel_b = gpio
            .get(b_pin)
            .map_err(|e| HwError::Gpio(e.to_string()))?
            .into_input_pullup();

        let count = Arc::new(AtomicI32::new(0));
        let count_isr = count.clone();
        channel_a
            .set_async_interrupt(Trigger::RisingEdge, move |_| {
                let step = if channel_b.read() == Level::Low { 1 } else { -1 };
                count_isr.fetch_add(step, Ordering::Relaxed);
            })
            .map_err(|e| HwError::Gpio(e.to_string()))?;

        Ok(Self {
            _channel_a: channel_a,
            count,
            offset: 0,
        })
    }
}

impl Encoder for QuadratureEncoder {
    fn read(&mut self) -> std::result::Result<i32, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.count.load(Ordering::Relaxed) - self.offset)
    }

    fn zero(&mut self) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.offset = self.count.load(Ordering::Relaxed);
        Ok(())
    }
}
