//! Example: power the panel, sweep brightness and engage HBM.
//!
//! Runs against the in-memory bus, so no hardware is needed.
//!
//! Run with: `RUST_LOG=debug cargo run --example brightness_sweep`

use lm36273_core::mock::{MockBus, MockDelay};
use lm36273_core::{BacklightController, DriverError, HbmLevel, Lm36273, MAX_LEVEL};

fn main() -> Result<(), DriverError> {
    // Initialize logging (optional)
    env_logger::init();

    let bus = MockBus::with_read_values(&[0x10]);
    let device = Lm36273::bind(bus.clone(), MockDelay::new());

    println!("Revision: {:#04x}", device.read_revision()?);

    device.apply_bring_up_config()?;
    device.set_bias_power(true, 10)?;

    for level in (0..=i32::from(MAX_LEVEL)).step_by(256).chain([i32::from(MAX_LEVEL)]) {
        let outcome = device.set_brightness(level)?;
        println!("level {:4} -> {:?}", level, outcome);
    }

    for hbm in [HbmLevel::L1, HbmLevel::L2, HbmLevel::L3, HbmLevel::Off] {
        println!("{:?} -> {:?}", hbm, device.set_hbm(hbm)?);
    }

    device.set_brightness(0)?;
    device.set_bias_power(false, 10)?;

    println!("Final state: {:?}", device.get_state());
    println!("{} register writes issued", bus.writes().len());

    Ok(())
}
