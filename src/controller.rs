//! LM36273 device handle.

use crate::bias;
use crate::brightness::{self, BrightnessOutcome};
use crate::config::{BringUpPolicy, DriverConfig};
use crate::error::{DriverError, SequenceStatus};
use crate::hbm::{self, HbmLevel, HbmOutcome};
use crate::registers::Register;
use crate::state::{BacklightState, DeviceState};

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{debug, info, warn};
use std::sync::{Mutex, MutexGuard, PoisonError};

// =============================================================================
// Backlight Controller Trait
// =============================================================================

/// Operations offered to the backlight/panel layer.
///
/// Every call runs start to finish under the device lock, so register
/// sequences from concurrent callers never interleave.
pub trait BacklightController: Send + Sync {
    /// Get a snapshot of the current device state.
    fn get_state(&self) -> BacklightState;

    /// Write one register.
    fn write_register(&self, register: u8, value: u8) -> Result<(), DriverError>;

    /// Read one register.
    fn read_register(&self, register: u8) -> Result<u8, DriverError>;

    /// Read the silicon revision register.
    fn read_revision(&self) -> Result<u8, DriverError> {
        self.read_register(Register::REVISION)
    }

    /// Apply the configured bring-up list.
    fn apply_bring_up_config(&self) -> Result<SequenceStatus, DriverError>;

    /// Sequence the bias rails up or down. `delay_ms` is capped at 100.
    fn set_bias_power(&self, enable: bool, delay_ms: u32) -> Result<SequenceStatus, DriverError>;

    /// Set the logical brightness (0-2047).
    ///
    /// Out-of-range levels and requests while bias is off are ignored, not
    /// rejected.
    fn set_brightness(&self, level: i32) -> Result<BrightnessOutcome, DriverError>;

    /// Select the HBM overlay.
    fn set_hbm(&self, level: HbmLevel) -> Result<HbmOutcome, DriverError>;

    /// Select the HBM overlay by external override code.
    fn set_hbm_code(&self, code: u32) -> Result<HbmOutcome, DriverError> {
        if !self.get_state().bound {
            return Err(DriverError::NotBound);
        }
        match HbmLevel::from_code(code) {
            Some(level) => self.set_hbm(level),
            None => {
                debug!("unknown hbm code {}, ignoring", code);
                Ok(HbmOutcome::NotApplicable)
            }
        }
    }
}

// =============================================================================
// Lm36273
// =============================================================================

struct Inner<I2C, D> {
    device: DeviceState<I2C>,
    delay: D,
}

/// The LM36273 backlight and bias controller.
///
/// Owns the transport, the sleep primitive and the device state behind one
/// lock. Share it between threads with an `Arc`.
///
/// # Example
///
/// ```
/// use lm36273_core::mock::{MockBus, MockDelay};
/// use lm36273_core::{BacklightController, HbmLevel, Lm36273};
///
/// let device = Lm36273::bind(MockBus::new(), MockDelay::new());
/// device.apply_bring_up_config()?;
/// device.set_bias_power(true, 5)?;
/// device.set_brightness(2047)?;
/// device.set_hbm(HbmLevel::L1)?;
/// assert_eq!(device.get_state().hbm, HbmLevel::L1);
/// # Ok::<(), lm36273_core::DriverError>(())
/// ```
pub struct Lm36273<I2C, D> {
    config: DriverConfig,
    inner: Mutex<Inner<I2C, D>>,
}

impl<I2C, D> Lm36273<I2C, D> {
    /// Create an unbound controller. Every operation fails with
    /// [`DriverError::NotBound`] until [`on_bind`](Self::on_bind) is called.
    pub fn new(config: DriverConfig, delay: D) -> Self {
        let device = DeviceState::unbound(config.i2c_address);
        Self {
            config,
            inner: Mutex::new(Inner { device, delay }),
        }
    }

    /// Create a controller with the default configuration, bound to `bus`.
    pub fn bind(bus: I2C, delay: D) -> Self {
        Self::with_config(DriverConfig::default(), bus, delay)
    }

    /// Create a controller with `config`, bound to `bus`.
    pub fn with_config(config: DriverConfig, bus: I2C, delay: D) -> Self {
        let controller = Self::new(config, delay);
        controller.on_bind(bus);
        controller
    }

    /// The configuration this controller was built with.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, Inner<I2C, D>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_bound(&self) -> Result<MutexGuard<'_, Inner<I2C, D>>, DriverError> {
        let inner = self.lock();
        if !inner.device.gateway.is_bound() {
            return Err(DriverError::NotBound);
        }
        Ok(inner)
    }

    /// Attach a transport and reset state: level 0, nothing written yet,
    /// HBM off, output enabled. Returns the transport this replaced, if any.
    pub fn on_bind(&self, bus: I2C) -> Option<I2C> {
        info!("binding lm36273 at {:#04x}", self.config.i2c_address);
        let previous = self.lock().device.bind(bus);
        if previous.is_some() {
            warn!("lm36273 was already bound, previous transport released");
        }
        previous
    }

    /// Release the transport.
    pub fn on_unbind(&self) -> Option<I2C> {
        info!("unbinding lm36273");
        self.lock().device.unbind()
    }

    /// Whether a transport is attached.
    pub fn is_bound(&self) -> bool {
        self.lock().device.gateway.is_bound()
    }
}

impl<I2C, D> BacklightController for Lm36273<I2C, D>
where
    I2C: I2c + Send,
    D: DelayNs + Send,
{
    fn get_state(&self) -> BacklightState {
        self.lock().device.snapshot()
    }

    fn write_register(&self, register: u8, value: u8) -> Result<(), DriverError> {
        self.lock().device.gateway.write(register, value)
    }

    fn read_register(&self, register: u8) -> Result<u8, DriverError> {
        self.lock().device.gateway.read(register)
    }

    fn apply_bring_up_config(&self) -> Result<SequenceStatus, DriverError> {
        let mut inner = self.lock_bound()?;
        let total = self.config.bring_up.len();
        info!("applying {} bring-up writes", total);

        let mut failed = 0;
        let mut last = Ok(());
        for write in &self.config.bring_up {
            last = inner.device.gateway.write(write.register, write.value);
            if let Err(e) = &last {
                warn!(
                    "bring-up write {:#04x} to {:#04x} skipped: {}",
                    write.value, write.register, e
                );
                failed += 1;
            }
        }

        let status = SequenceStatus::from_failures(failed);
        match self.config.bring_up_policy {
            BringUpPolicy::LastWrite => last.map(|()| status),
            BringUpPolicy::BestEffort => Ok(status),
            BringUpPolicy::Strict if failed > 0 => {
                Err(DriverError::BringUpIncomplete { failed, total })
            }
            BringUpPolicy::Strict => Ok(status),
        }
    }

    fn set_bias_power(&self, enable: bool, delay_ms: u32) -> Result<SequenceStatus, DriverError> {
        let mut inner = self.lock_bound()?;
        let Inner { device, delay } = &mut *inner;
        Ok(bias::set_power(device, delay, enable, delay_ms))
    }

    fn set_brightness(&self, level: i32) -> Result<BrightnessOutcome, DriverError> {
        let mut inner = self.lock_bound()?;
        brightness::set_level(&mut inner.device, level)
    }

    fn set_hbm(&self, level: HbmLevel) -> Result<HbmOutcome, DriverError> {
        let mut inner = self.lock_bound()?;
        hbm::set_hbm(&mut inner.device, level)
    }
}
