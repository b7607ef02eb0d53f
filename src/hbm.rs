//! High brightness mode overlay.

use crate::brightness::{self, BrightnessOutcome};
use crate::error::DriverError;
use crate::state::DeviceState;
use crate::table::{self, HBM_L1_CODE, HBM_L2_CODE, HBM_L3_CODE, MAX_LEVEL};

use embedded_hal::i2c::I2c;
use log::{debug, info};

/// HBM overlay levels.
///
/// Each level replaces the table's maximum code with a higher current, but
/// only while the logical level sits at the top of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HbmLevel {
    /// No overlay.
    #[default]
    Off,
    /// 21.000 mA.
    L1,
    /// 23.310 mA.
    L2,
    /// 25.620 mA.
    L3,
}

impl HbmLevel {
    /// Map an external override code (0 = off, 1-3 = levels).
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Off),
            1 => Some(Self::L1),
            2 => Some(Self::L2),
            3 => Some(Self::L3),
            _ => None,
        }
    }

    /// The external override code for this level.
    pub fn code(&self) -> u32 {
        match self {
            Self::Off => 0,
            Self::L1 => 1,
            Self::L2 => 2,
            Self::L3 => 3,
        }
    }

    /// Physical code that replaces the table maximum, if any.
    pub fn physical_code(&self) -> Option<u16> {
        match self {
            Self::Off => None,
            Self::L1 => Some(HBM_L1_CODE),
            Self::L2 => Some(HBM_L2_CODE),
            Self::L3 => Some(HBM_L3_CODE),
        }
    }

    /// Whether an overlay is selected.
    pub fn is_on(&self) -> bool {
        *self != Self::Off
    }
}

impl TryFrom<u32> for HbmLevel {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(code)
    }
}

/// What an HBM request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HbmOutcome {
    /// Brightness was at maximum, so the overlay was written right away.
    Applied(BrightnessOutcome),
    /// Recorded; takes effect once brightness reaches maximum.
    Deferred,
    /// HBM off recorded while below maximum; nothing to write.
    Stored,
    /// The external code did not name a level. State is unchanged.
    NotApplicable,
}

/// Record `requested` and push it to the hardware when the gate is open.
pub(crate) fn set_hbm<I2C: I2c>(
    state: &mut DeviceState<I2C>,
    requested: HbmLevel,
) -> Result<HbmOutcome, DriverError> {
    info!("hbm {:?} -> {:?}", state.hbm, requested);
    state.hbm = requested;

    if table::is_max_code(state.level) {
        let outcome = brightness::set_level(state, i32::from(MAX_LEVEL))?;
        return Ok(HbmOutcome::Applied(outcome));
    }

    if requested.is_on() {
        debug!(
            "hbm {:?} won't be applied until level {} reaches max",
            requested, state.level
        );
        Ok(HbmOutcome::Deferred)
    } else {
        Ok(HbmOutcome::Stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBus;
    use crate::registers::Register;
    use crate::table::split_code;

    fn device(bus: &MockBus, level: u16) -> DeviceState<MockBus> {
        let mut state = DeviceState::unbound(0x11);
        state.bind(bus.clone());
        brightness::set_level(&mut state, i32::from(level)).unwrap();
        bus.clear();
        state
    }

    #[test]
    fn code_mapping() {
        assert_eq!(HbmLevel::from_code(0), Some(HbmLevel::Off));
        assert_eq!(HbmLevel::from_code(3), Some(HbmLevel::L3));
        assert_eq!(HbmLevel::from_code(4), None);
        assert_eq!(HbmLevel::try_from(7), Err(7));
        for level in [HbmLevel::Off, HbmLevel::L1, HbmLevel::L2, HbmLevel::L3] {
            assert_eq!(HbmLevel::from_code(level.code()), Some(level));
        }
    }

    #[test]
    fn below_max_defers() {
        let bus = MockBus::new();
        let mut state = device(&bus, 1000);

        assert_eq!(set_hbm(&mut state, HbmLevel::L1), Ok(HbmOutcome::Deferred));
        assert_eq!(state.hbm, HbmLevel::L1);
        assert!(bus.events().is_empty());

        assert_eq!(set_hbm(&mut state, HbmLevel::Off), Ok(HbmOutcome::Stored));
        assert!(bus.events().is_empty());
    }

    #[test]
    fn at_max_applies_immediately() {
        let bus = MockBus::new();
        let mut state = device(&bus, MAX_LEVEL);

        let outcome = set_hbm(&mut state, HbmLevel::L2).unwrap();

        assert_eq!(
            outcome,
            HbmOutcome::Applied(BrightnessOutcome::Applied {
                physical: HBM_L2_CODE
            })
        );
        let (lsb, msb) = split_code(HBM_L2_CODE);
        assert_eq!(
            bus.writes(),
            vec![(Register::BRIGHTNESS_LSB, lsb), (Register::BRIGHTNESS_MSB, msb)]
        );
    }

    #[test]
    fn hbm_off_at_max_restores_table_max() {
        let bus = MockBus::new();
        let mut state = device(&bus, MAX_LEVEL);
        set_hbm(&mut state, HbmLevel::L3).unwrap();
        bus.clear();

        let outcome = set_hbm(&mut state, HbmLevel::Off).unwrap();

        assert_eq!(
            outcome,
            HbmOutcome::Applied(BrightnessOutcome::Applied {
                physical: table::NOMINAL_MAX_CODE
            })
        );
        assert_eq!(bus.writes().len(), 2);
    }
}
