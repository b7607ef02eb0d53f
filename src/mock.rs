//! Mock transport and delay for testing.
//!
//! These let the driver run without hardware: [`MockBus`] records every
//! completed I2C transaction and [`MockDelay`] records requested delays
//! instead of sleeping. Both are cheap to clone and clones share their
//! recording, so a test can keep one handle while the driver owns another.
//!
//! # Example
//!
//! ```
//! use lm36273_core::mock::{MockBus, MockDelay};
//! use lm36273_core::{BacklightController, Lm36273, Register};
//!
//! let bus = MockBus::new();
//! let device = Lm36273::bind(bus.clone(), MockDelay::new());
//!
//! device.write_register(Register::BIAS_VPOS, 0x1e).unwrap();
//! assert_eq!(bus.writes(), vec![(Register::BIAS_VPOS, 0x1e)]);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

/// One completed transaction as seen on the mock bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    /// Two-byte register write.
    Write {
        /// Register address.
        register: u8,
        /// Value written.
        value: u8,
    },
    /// One-byte register select ahead of a read.
    Select {
        /// Register address.
        register: u8,
    },
    /// One byte received.
    Read {
        /// Value returned to the driver.
        value: u8,
    },
    /// Any other write payload.
    Raw(Vec<u8>),
}

/// Error returned by [`MockBus`] for injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

impl i2c::Error for MockBusError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
    }
}

#[derive(Debug, Default)]
struct BusLog {
    events: Vec<BusEvent>,
    addresses: Vec<u8>,
    read_values: VecDeque<u8>,
    failing_registers: Vec<u8>,
    fail_reads: bool,
    failed_attempts: usize,
}

/// A recording I2C bus.
#[derive(Debug, Clone, Default)]
pub struct MockBus {
    log: Arc<Mutex<BusLog>>,
}

impl MockBus {
    /// Create an empty bus. Reads return zero unless values are queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bus that answers reads with `values`, in order.
    pub fn with_read_values(values: &[u8]) -> Self {
        let bus = Self::new();
        bus.lock().read_values.extend(values);
        bus
    }

    fn lock(&self) -> MutexGuard<'_, BusLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a value for the next read.
    pub fn push_read_value(&self, value: u8) {
        self.lock().read_values.push_back(value);
    }

    /// Make every transaction addressing `register` fail.
    pub fn fail_register(&self, register: u8) {
        self.lock().failing_registers.push(register);
    }

    /// Make receive transactions fail (or succeed again).
    pub fn fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    /// Clear injected failures.
    pub fn heal(&self) {
        let mut log = self.lock();
        log.failing_registers.clear();
        log.fail_reads = false;
    }

    /// Forget recorded transactions.
    pub fn clear(&self) {
        let mut log = self.lock();
        log.events.clear();
        log.addresses.clear();
        log.failed_attempts = 0;
    }

    /// Every completed transaction, oldest first.
    pub fn events(&self) -> Vec<BusEvent> {
        self.lock().events.clone()
    }

    /// Device address of every completed transaction.
    pub fn addresses(&self) -> Vec<u8> {
        self.lock().addresses.clone()
    }

    /// Completed register writes as `(register, value)` pairs.
    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.lock()
            .events
            .iter()
            .filter_map(|event| match event {
                BusEvent::Write { register, value } => Some((*register, *value)),
                _ => None,
            })
            .collect()
    }

    /// Values written to one register, oldest first.
    pub fn writes_to(&self, register: u8) -> Vec<u8> {
        self.writes()
            .into_iter()
            .filter(|(r, _)| *r == register)
            .map(|(_, value)| value)
            .collect()
    }

    /// Number of transactions rejected by injected failures.
    pub fn failed_attempts(&self) -> usize {
        self.lock().failed_attempts
    }
}

impl ErrorType for MockBus {
    type Error = MockBusError;
}

impl i2c::I2c for MockBus {
    fn transaction(
        &mut self,
        address: i2c::SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut log = self.lock();

        for operation in operations {
            let event = match operation {
                Operation::Write(bytes) => {
                    if bytes
                        .first()
                        .is_some_and(|register| log.failing_registers.contains(register))
                    {
                        log.failed_attempts += 1;
                        return Err(MockBusError);
                    }
                    match **bytes {
                        [register, value] => BusEvent::Write { register, value },
                        [register] => BusEvent::Select { register },
                        _ => BusEvent::Raw(bytes.to_vec()),
                    }
                }
                Operation::Read(buffer) => {
                    if log.fail_reads {
                        log.failed_attempts += 1;
                        return Err(MockBusError);
                    }
                    let mut value = 0;
                    for byte in buffer.iter_mut() {
                        *byte = log.read_values.pop_front().unwrap_or(0);
                        value = *byte;
                    }
                    BusEvent::Read { value }
                }
            };
            log.events.push(event);
            log.addresses.push(address);
        }

        Ok(())
    }
}

/// A delay source that records instead of sleeping.
#[derive(Debug, Clone, Default)]
pub struct MockDelay {
    delays_ns: Arc<Mutex<Vec<u64>>>,
}

impl MockDelay {
    /// Create a new mock delay.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, ns: u64) {
        self.delays_ns
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ns);
    }

    /// Requested delays in whole milliseconds, oldest first.
    pub fn delays_ms(&self) -> Vec<u32> {
        self.delays_ns
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|ns| (ns / 1_000_000) as u32)
            .collect()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.record(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.record(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record(u64::from(ms) * 1_000_000);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::I2c;

    #[test]
    fn clones_share_recording() {
        let bus = MockBus::new();
        let mut driver_side = bus.clone();

        driver_side.write(0x11, &[0x04, 0x07]).unwrap();

        assert_eq!(bus.writes(), vec![(0x04, 0x07)]);
        assert_eq!(bus.addresses(), vec![0x11]);
    }

    #[test]
    fn injected_failure_is_not_recorded() {
        let mut bus = MockBus::new();
        bus.fail_register(0x08);

        assert!(bus.write(0x11, &[0x08, 0x17]).is_err());
        assert!(bus.events().is_empty());
        assert_eq!(bus.failed_attempts(), 1);

        bus.heal();
        bus.write(0x11, &[0x08, 0x17]).unwrap();
        assert_eq!(bus.writes_to(0x08), vec![0x17]);
    }

    #[test]
    fn reads_drain_queue_then_zero() {
        let mut bus = MockBus::with_read_values(&[0x5a]);
        let mut buffer = [0xff];

        bus.read(0x11, &mut buffer).unwrap();
        assert_eq!(buffer, [0x5a]);
        bus.read(0x11, &mut buffer).unwrap();
        assert_eq!(buffer, [0x00]);
    }

    #[test]
    fn delay_records_milliseconds() {
        let delay = MockDelay::new();
        let mut handle = delay.clone();

        handle.delay_ms(100);
        handle.delay_us(2_000);

        assert_eq!(delay.delays_ms(), vec![100, 2]);
    }
}
