//! Device state.

use crate::gateway::RegisterGateway;
use crate::hbm::HbmLevel;

/// A snapshot of the device's current state.
///
/// Use [`BacklightController::get_state`](crate::BacklightController::get_state) to obtain a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BacklightState {
    /// Whether a transport is bound.
    pub bound: bool,
    /// Last requested logical level (0-2047).
    pub level: u16,
    /// Last physical code written to the brightness registers, if any.
    pub last_applied_physical: Option<u16>,
    /// Current HBM overlay.
    pub hbm: HbmLevel,
    /// Whether the bias rails are up and brightness output is allowed.
    pub enabled: bool,
}

/// The record every operation works on while holding the device lock.
pub(crate) struct DeviceState<I2C> {
    pub(crate) gateway: RegisterGateway<I2C>,
    pub(crate) level: u16,
    /// `None` until the brightness registers are first written.
    pub(crate) last_applied_physical: Option<u16>,
    pub(crate) hbm: HbmLevel,
    pub(crate) enabled: bool,
}

impl<I2C> DeviceState<I2C> {
    pub(crate) fn unbound(address: u8) -> Self {
        Self {
            gateway: RegisterGateway::unbound(address),
            level: 0,
            last_applied_physical: None,
            hbm: HbmLevel::Off,
            enabled: false,
        }
    }

    /// Fresh state for a newly attached transport. Returns the replaced one.
    pub(crate) fn bind(&mut self, bus: I2C) -> Option<I2C> {
        let previous = self.gateway.attach(bus);
        self.level = 0;
        self.last_applied_physical = None;
        self.hbm = HbmLevel::Off;
        self.enabled = true;
        previous
    }

    pub(crate) fn unbind(&mut self) -> Option<I2C> {
        self.enabled = false;
        self.gateway.detach()
    }

    pub(crate) fn snapshot(&self) -> BacklightState {
        BacklightState {
            bound: self.gateway.is_bound(),
            level: self.level,
            last_applied_physical: self.last_applied_physical,
            hbm: self.hbm,
            enabled: self.enabled,
        }
    }
}
