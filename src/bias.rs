//! Display bias rail sequencing.

use crate::error::SequenceStatus;
use crate::registers::{Register, bias_config1};
use crate::state::DeviceState;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{info, warn};

/// Longest delay a power sequence will block for between rail steps.
pub const MAX_SEQUENCE_DELAY_MS: u32 = 100;

/// Bring the bias rails up or down.
///
/// Power-up raises VPOS, waits, then adds VNEG. Power-down drops VNEG, waits,
/// drops VPOS and finally turns the bias supply off. A failed write is logged
/// and counted but the sequence always runs to the end.
pub(crate) fn set_power<I2C: I2c, D: DelayNs>(
    state: &mut DeviceState<I2C>,
    delay: &mut D,
    enable: bool,
    delay_ms: u32,
) -> SequenceStatus {
    let delay_ms = delay_ms.min(MAX_SEQUENCE_DELAY_MS);
    info!("bias enable = {}, delay = {}ms", enable, delay_ms);

    let mut failed = 0;
    let mut step = |state: &mut DeviceState<I2C>, code: u8| {
        if let Err(e) = state.gateway.write(Register::BIAS_CONFIG1, code) {
            warn!("bias step {:#04x} skipped: {}", code, e);
            failed += 1;
        }
    };

    if enable {
        step(state, bias_config1::VPOS_ONLY);
        delay.delay_ms(delay_ms);
        step(state, bias_config1::VPOS_VNEG);
        state.enabled = true;
    } else {
        step(state, bias_config1::VPOS_ONLY);
        delay.delay_ms(delay_ms);
        step(state, bias_config1::RAILS_OFF);
        step(state, bias_config1::SUPPLY_OFF);
        state.enabled = false;
    }

    SequenceStatus::from_failures(failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockBus, MockDelay};

    fn bound(bus: &MockBus) -> DeviceState<MockBus> {
        let mut state = DeviceState::unbound(0x11);
        state.bind(bus.clone());
        state
    }

    #[test]
    fn power_up_clamps_delay() {
        let bus = MockBus::new();
        let delay = MockDelay::new();
        let mut state = bound(&bus);
        state.enabled = false;

        let status = set_power(&mut state, &mut delay.clone(), true, 500);

        assert_eq!(status, SequenceStatus::Complete);
        assert_eq!(
            bus.writes_to(Register::BIAS_CONFIG1),
            vec![bias_config1::VPOS_ONLY, bias_config1::VPOS_VNEG]
        );
        assert_eq!(delay.delays_ms(), vec![MAX_SEQUENCE_DELAY_MS]);
        assert!(state.enabled);
    }

    #[test]
    fn power_down_sequence() {
        let bus = MockBus::new();
        let delay = MockDelay::new();
        let mut state = bound(&bus);

        let status = set_power(&mut state, &mut delay.clone(), false, 10);

        assert!(status.is_complete());
        assert_eq!(
            bus.writes_to(Register::BIAS_CONFIG1),
            vec![
                bias_config1::VPOS_ONLY,
                bias_config1::RAILS_OFF,
                bias_config1::SUPPLY_OFF
            ]
        );
        assert_eq!(delay.delays_ms(), vec![10]);
        assert!(!state.enabled);
    }

    #[test]
    fn failures_do_not_stop_sequence() {
        let bus = MockBus::new();
        bus.fail_register(Register::BIAS_CONFIG1);
        let mut state = bound(&bus);

        let status = set_power(&mut state, &mut MockDelay::new(), false, 0);

        assert_eq!(status, SequenceStatus::Degraded { failed_writes: 3 });
        assert_eq!(bus.failed_attempts(), 3);
        assert!(!state.enabled);
    }
}
