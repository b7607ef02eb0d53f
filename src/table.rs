//! Logical level to physical current-sink code mapping.

include!(concat!(env!("OUT_DIR"), "/brightness_table.rs"));

/// Highest logical brightness level.
pub const MAX_LEVEL: u16 = 2047;

/// Number of entries in the brightness table.
pub const LEVEL_COUNT: usize = MAX_LEVEL as usize + 1;

/// Largest value the 11-bit brightness DAC accepts.
pub const CODE_CEILING: u16 = 0x7ff;

/// HBM level 1 code (21.000 mA in exponential mapping).
pub const HBM_L1_CODE: u16 = 1930;
/// HBM level 2 code (23.310 mA in exponential mapping).
pub const HBM_L2_CODE: u16 = 1964;
/// HBM level 3 code (25.620 mA in exponential mapping).
pub const HBM_L3_CODE: u16 = 1995;

const _: () = {
    assert!(NOMINAL_MAX_CODE < HBM_L1_CODE);
    assert!(HBM_L1_CODE < HBM_L2_CODE);
    assert!(HBM_L2_CODE < HBM_L3_CODE);
    assert!(HBM_L3_CODE <= CODE_CEILING);
};

/// The full brightness table, indexed by logical level.
pub fn brightness_table() -> &'static [u16; LEVEL_COUNT] {
    &BRIGHTNESS_TABLE
}

/// Physical code for a logical level. Levels above [`MAX_LEVEL`] saturate.
pub fn physical_code(level: u16) -> u16 {
    BRIGHTNESS_TABLE[usize::from(level.min(MAX_LEVEL))]
}

/// Whether `level` maps onto the table's maximum code.
pub fn is_max_code(level: u16) -> bool {
    physical_code(level) == NOMINAL_MAX_CODE
}

/// Splits a code into its `BRIGHTNESS_LSB` and `BRIGHTNESS_MSB` register values.
pub fn split_code(code: u16) -> (u8, u8) {
    ((code & 0x7) as u8, (code >> 3) as u8)
}
