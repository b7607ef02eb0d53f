//! Driver configuration.

use crate::registers::Register;

/// Default 7-bit I2C address of the LM36273.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x11;

/// A single register write in a fixed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    /// Register address.
    pub register: u8,
    /// Value to write.
    pub value: u8,
}

impl RegisterWrite {
    /// Create a new register write.
    pub const fn new(register: u8, value: u8) -> Self {
        Self { register, value }
    }
}

/// Register values applied once after binding.
pub const DEFAULT_BRING_UP: [RegisterWrite; 5] = [
    // disable PWM input
    RegisterWrite::new(Register::BACKLIGHT_CONFIG1, 0x60),
    // disable dimming
    RegisterWrite::new(Register::BACKLIGHT_CONFIG2, 0x85),
    // LCM_OUT voltage
    RegisterWrite::new(Register::BIAS_BOOST, 0x24),
    // VPOS +5.5V
    RegisterWrite::new(Register::BIAS_VPOS, 0x1e),
    // VNEG -5.5V
    RegisterWrite::new(Register::BIAS_VNEG, 0x1e),
];

/// How failed bring-up writes are reported.
///
/// The list always runs to the end; the policy only decides what the caller
/// gets back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BringUpPolicy {
    /// Fail only if the last write failed.
    #[default]
    LastWrite,
    /// Never fail; failures show up as a degraded status.
    BestEffort,
    /// Fail if any write failed.
    Strict,
}

/// Driver configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// 7-bit I2C device address.
    pub i2c_address: u8,
    /// Ordered bring-up list.
    pub bring_up: Vec<RegisterWrite>,
    /// Reporting policy for bring-up failures.
    pub bring_up_policy: BringUpPolicy,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            i2c_address: DEFAULT_I2C_ADDRESS,
            bring_up: DEFAULT_BRING_UP.to_vec(),
            bring_up_policy: BringUpPolicy::default(),
        }
    }
}

impl DriverConfig {
    /// Use a different device address.
    pub fn with_address(mut self, i2c_address: u8) -> Self {
        self.i2c_address = i2c_address;
        self
    }

    /// Replace the bring-up list.
    pub fn with_bring_up(mut self, bring_up: impl IntoIterator<Item = RegisterWrite>) -> Self {
        self.bring_up = bring_up.into_iter().collect();
        self
    }

    /// Change how bring-up failures are reported.
    pub fn with_bring_up_policy(mut self, policy: BringUpPolicy) -> Self {
        self.bring_up_policy = policy;
        self
    }
}
