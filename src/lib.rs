//! Backlight and display bias control for the TI LM36273.
//!
//! This crate drives the LM36273 over I2C: it sequences the display bias
//! rails, maps a logical brightness level (0-2047) onto the exponential
//! current-sink code, and overlays high brightness mode (HBM) on top of the
//! maximum level. All operations are serialized by one lock, so a single
//! [`Lm36273`] can be shared between threads.
//!
//! The transport is any [`embedded_hal::i2c::I2c`] and delays go through
//! [`embedded_hal::delay::DelayNs`], so the control logic runs the same on a
//! Linux `i2cdev`, a microcontroller HAL or the [`mock`] types.
//!
//! # Example
//!
//! ```
//! use lm36273_core::mock::{MockBus, MockDelay};
//! use lm36273_core::{BacklightController, BrightnessOutcome, HbmLevel, HbmOutcome, Lm36273};
//!
//! fn main() -> Result<(), lm36273_core::DriverError> {
//!     let bus = MockBus::new();
//!     let device = Lm36273::bind(bus.clone(), MockDelay::new());
//!
//!     // Program bias voltages, then bring the rails up
//!     device.apply_bring_up_config()?;
//!     device.set_bias_power(true, 20)?;
//!
//!     // HBM waits until brightness reaches the top of the table
//!     device.set_brightness(1024)?;
//!     assert_eq!(device.set_hbm(HbmLevel::L2)?, HbmOutcome::Deferred);
//!
//!     let outcome = device.set_brightness(2047)?;
//!     assert_eq!(outcome, BrightnessOutcome::Applied { physical: lm36273_core::HBM_L2_CODE });
//!
//!     // Repeating a level is free
//!     assert!(!device.set_brightness(2047)?.wrote_hardware());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! Diagnostics go through the [`log`] facade. Pick a backend such as
//! `env_logger` in the binary.

#![warn(missing_docs)]

mod bias;
mod brightness;
mod config;
mod controller;
mod delay;
mod error;
mod gateway;
mod hbm;
pub mod mock;
mod registers;
mod state;
mod table;

// Re-export public API
pub use bias::MAX_SEQUENCE_DELAY_MS;
pub use brightness::BrightnessOutcome;
pub use config::{BringUpPolicy, DEFAULT_BRING_UP, DEFAULT_I2C_ADDRESS, DriverConfig, RegisterWrite};
pub use controller::{BacklightController, Lm36273};
pub use delay::StdDelay;
pub use error::{DriverError, SequenceStatus};
pub use gateway::RegisterGateway;
pub use hbm::{HbmLevel, HbmOutcome};
pub use registers::Register;
pub use state::BacklightState;
pub use table::{
    CODE_CEILING, HBM_L1_CODE, HBM_L2_CODE, HBM_L3_CODE, LEVEL_COUNT, MAX_LEVEL, NOMINAL_MAX_CODE,
    brightness_table, physical_code, split_code,
};
