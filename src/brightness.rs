//! Logical brightness to register writes.

use crate::error::DriverError;
use crate::hbm::HbmLevel;
use crate::registers::{BACKLIGHT_CONFIG2_ACTIVE_DIMMING, Register, backlight_enable};
use crate::state::DeviceState;
use crate::table::{self, MAX_LEVEL};

use embedded_hal::i2c::I2c;
use log::{debug, info, trace};

/// What a brightness request did to the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrightnessOutcome {
    /// The brightness registers were written with `physical`.
    Applied {
        /// Code written to the current sink.
        physical: u16,
    },
    /// `physical` was already applied; only the stored level changed.
    Unchanged {
        /// Code already in the current sink.
        physical: u16,
    },
    /// Level out of range or bias disabled. Nothing happened.
    Ignored,
}

impl BrightnessOutcome {
    /// Whether the brightness registers were written.
    pub fn wrote_hardware(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Map `level` through the table (and HBM overlay) and write it out.
///
/// Crossing zero toggles the current sink. Going dark always drops the HBM
/// overlay. A failed code write leaves the record alone. Once the code
/// registers are written, the new code and level are recorded even if the
/// sink enable write then fails.
pub(crate) fn set_level<I2C: I2c>(
    state: &mut DeviceState<I2C>,
    level: i32,
) -> Result<BrightnessOutcome, DriverError> {
    let level = match u16::try_from(level) {
        Ok(level) if level <= MAX_LEVEL && state.enabled => level,
        _ => {
            debug!(
                "level = {}, enabled = {}, nothing to do",
                level, state.enabled
            );
            return Ok(BrightnessOutcome::Ignored);
        }
    };

    let mut physical = table::physical_code(level);
    let at_max = physical == table::NOMINAL_MAX_CODE;
    if at_max {
        if let Some(code) = state.hbm.physical_code() {
            physical = code;
        }
    }

    if state.last_applied_physical == Some(physical) {
        trace!("level = {}, code {} unchanged", level, physical);
        state.level = level;
        return Ok(BrightnessOutcome::Unchanged { physical });
    }

    let (lsb, msb) = table::split_code(physical);
    state.gateway.write(Register::BRIGHTNESS_LSB, lsb)?;
    state.gateway.write(Register::BRIGHTNESS_MSB, msb)?;
    info!(
        "bl level = {}, code = {}, hbm = {:?}",
        level,
        physical,
        if at_max { state.hbm } else { HbmLevel::Off }
    );

    let previous = state.level;
    state.last_applied_physical = Some(physical);
    state.level = level;

    if level == 0 && previous != 0 {
        state.hbm = HbmLevel::Off;
        state
            .gateway
            .write(Register::BACKLIGHT_ENABLE, backlight_enable::OFF)?;
        info!("current sink off");
    } else if level > 0 && previous == 0 {
        state
            .gateway
            .write(Register::BACKLIGHT_ENABLE, backlight_enable::ON)?;
        state.gateway.write(
            Register::BACKLIGHT_CONFIG2,
            BACKLIGHT_CONFIG2_ACTIVE_DIMMING,
        )?;
        info!("current sink on at level {}", level);
    }

    Ok(BrightnessOutcome::Applied { physical })
}
