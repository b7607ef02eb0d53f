//! Generates the logical-to-physical brightness table.
//!
//! The LM36273 runs its current sink in exponential mapping mode, where each
//! code step raises the LED current by a fixed ratio. The table inverts that
//! curve so logical levels scale the current linearly.

use std::{env, fs, path::PathBuf};

const LEVEL_COUNT: usize = 2048;
const MAX_LEVEL: f64 = (LEVEL_COUNT - 1) as f64;

/// Physical code reached at the maximum logical level (about 20 mA).
const FULL_SCALE_CODE: u16 = 1914;

/// Current ratio between two consecutive codes in exponential mode.
const CODE_STEP_RATIO: f64 = 1.003055;

/// Lowest levels sit below the curve's cut-off and get a short linear ramp.
const TOE_STEP: u16 = 2;
const TOE_CEILING: u16 = 8;

fn curve_code(level: usize) -> u16 {
    if level == 0 {
        return 0;
    }

    let code = f64::from(FULL_SCALE_CODE) + (level as f64 / MAX_LEVEL).ln() / CODE_STEP_RATIO.ln();
    code.round().clamp(0.0, f64::from(FULL_SCALE_CODE)) as u16
}

fn toe_code(level: usize) -> u16 {
    let level = level.min(usize::from(TOE_CEILING)) as u16;
    (level * TOE_STEP).min(TOE_CEILING)
}

fn main() {
    let table: Vec<u16> = (0..LEVEL_COUNT)
        .map(|level| curve_code(level).max(toe_code(level)))
        .collect();

    let mut source = String::new();
    source.push_str(&format!(
        "/// Physical code of the highest logical level.\npub const NOMINAL_MAX_CODE: u16 = {};\n\n",
        table[LEVEL_COUNT - 1]
    ));
    source.push_str(&format!(
        "pub(crate) static BRIGHTNESS_TABLE: [u16; {LEVEL_COUNT}] = [\n"
    ));
    for row in table.chunks(16) {
        let row: Vec<String> = row.iter().map(u16::to_string).collect();
        source.push_str(&format!("    {},\n", row.join(", ")));
    }
    source.push_str("];\n");

    let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out.join("brightness_table.rs"), source).expect("write brightness table");

    println!("cargo:rerun-if-changed=build.rs");
}
