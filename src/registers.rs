//! LM36273 register map.
//!
//! Register table: <https://www.ti.com/lit/ds/symlink/lm36273.pdf>

/// Register addresses.
pub struct Register;

impl Register {
    /// Silicon revision.
    pub const REVISION: u8 = 0x01;
    /// Backlight configuration 1 (PWM input, mapping mode).
    pub const BACKLIGHT_CONFIG1: u8 = 0x02;
    /// Backlight configuration 2 (dimming, current sink mode).
    pub const BACKLIGHT_CONFIG2: u8 = 0x03;
    /// Brightness code, lowest 3 bits.
    pub const BRIGHTNESS_LSB: u8 = 0x04;
    /// Brightness code, upper 8 bits.
    pub const BRIGHTNESS_MSB: u8 = 0x05;
    /// Auto-frequency low threshold.
    pub const AUTO_FREQ_LOW: u8 = 0x06;
    /// Auto-frequency high threshold.
    pub const AUTO_FREQ_HIGH: u8 = 0x07;
    /// Backlight and current sink enable.
    pub const BACKLIGHT_ENABLE: u8 = 0x08;
    /// Display bias configuration 1 (rail enables).
    pub const BIAS_CONFIG1: u8 = 0x09;
    /// Display bias configuration 2.
    pub const BIAS_CONFIG2: u8 = 0x0a;
    /// Display bias configuration 3.
    pub const BIAS_CONFIG3: u8 = 0x0b;
    /// LCM boost output voltage.
    pub const BIAS_BOOST: u8 = 0x0c;
    /// Positive bias rail voltage.
    pub const BIAS_VPOS: u8 = 0x0d;
    /// Negative bias rail voltage.
    pub const BIAS_VNEG: u8 = 0x0e;
    /// Fault flags.
    pub const FLAGS: u8 = 0x0f;
    /// Option register 1.
    pub const OPTION1: u8 = 0x10;
    /// Option register 2.
    pub const OPTION2: u8 = 0x11;
    /// PWM-to-digital code, low byte.
    pub const PWM_DETECT_LSB: u8 = 0x12;
    /// PWM-to-digital code, high byte.
    pub const PWM_DETECT_MSB: u8 = 0x13;

    /// Lowest addressable register.
    pub const FIRST: u8 = Self::REVISION;
    /// Highest addressable register.
    pub const LAST: u8 = Self::PWM_DETECT_MSB;

    /// Whether `address` lies inside the documented register range.
    pub const fn is_valid(address: u8) -> bool {
        address >= Self::FIRST && address <= Self::LAST
    }
}

/// `BIAS_CONFIG1` rail codes, in the order the power sequences use them.
pub(crate) mod bias_config1 {
    /// VPOS enabled, VNEG off. Also the first step of power-down.
    pub(crate) const VPOS_ONLY: u8 = 0x9c;
    /// Both rails enabled.
    pub(crate) const VPOS_VNEG: u8 = 0x9e;
    /// Both rails off, bias supply still up.
    pub(crate) const RAILS_OFF: u8 = 0x98;
    /// Bias supply fully off.
    pub(crate) const SUPPLY_OFF: u8 = 0x18;
}

/// `BACKLIGHT_ENABLE` codes.
pub(crate) mod backlight_enable {
    pub(crate) const OFF: u8 = 0x00;
    /// Backlight plus all current sinks.
    pub(crate) const ON: u8 = 0x17;
}

/// `BACKLIGHT_CONFIG2` code written whenever the current sink is switched on.
pub(crate) const BACKLIGHT_CONFIG2_ACTIVE_DIMMING: u8 = 0xcd;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_range_is_inclusive() {
        assert!(!Register::is_valid(0x00));
        assert!(Register::is_valid(Register::REVISION));
        assert!(Register::is_valid(Register::PWM_DETECT_MSB));
        assert!(!Register::is_valid(0x14));
        assert!(!Register::is_valid(0xff));
    }

    #[test]
    fn bias_codes_are_distinct() {
        let codes = [
            bias_config1::VPOS_ONLY,
            bias_config1::VPOS_VNEG,
            bias_config1::RAILS_OFF,
            bias_config1::SUPPLY_OFF,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
