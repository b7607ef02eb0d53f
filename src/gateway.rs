//! Single-register access over I2C.

use crate::error::DriverError;
use crate::registers::Register;

use embedded_hal::i2c::{Error, I2c};
use log::{trace, warn};

/// Moves single bytes between the driver and the device registers.
///
/// Writes are one `[register, value]` transaction. Reads send `[register]`
/// and then receive one byte in a separate transaction. Addresses outside
/// `0x01..=0x13` are rejected before the bus is touched. Nothing is retried.
pub struct RegisterGateway<I2C> {
    bus: Option<I2C>,
    address: u8,
}

impl<I2C> RegisterGateway<I2C> {
    /// Create a gateway with no transport attached.
    pub fn unbound(address: u8) -> Self {
        Self { bus: None, address }
    }

    /// Attach a transport, returning the previous one if any.
    pub fn attach(&mut self, bus: I2C) -> Option<I2C> {
        self.bus.replace(bus)
    }

    /// Release the transport.
    pub fn detach(&mut self) -> Option<I2C> {
        self.bus.take()
    }

    /// Whether a transport is attached.
    pub fn is_bound(&self) -> bool {
        self.bus.is_some()
    }

    fn checked_bus(&mut self, register: u8) -> Result<&mut I2C, DriverError> {
        if !Register::is_valid(register) {
            warn!("register address {:#04x} out of range", register);
            return Err(DriverError::InvalidAddress(register));
        }
        self.bus.as_mut().ok_or(DriverError::NotBound)
    }
}

impl<I2C: I2c> RegisterGateway<I2C> {
    /// Write one register.
    pub fn write(&mut self, register: u8, value: u8) -> Result<(), DriverError> {
        let address = self.address;
        let bus = self.checked_bus(register)?;

        bus.write(address, &[register, value]).map_err(|e| {
            warn!("write of {:#04x} to register {:#04x} failed", value, register);
            DriverError::Transport {
                register,
                kind: e.kind(),
            }
        })?;

        trace!("wrote {:#04x} to register {:#04x}", value, register);
        Ok(())
    }

    /// Read one register.
    pub fn read(&mut self, register: u8) -> Result<u8, DriverError> {
        let address = self.address;
        let bus = self.checked_bus(register)?;
        let transport = |e: I2C::Error| DriverError::Transport {
            register,
            kind: e.kind(),
        };

        bus.write(address, &[register]).map_err(|e| {
            warn!("register select {:#04x} failed", register);
            transport(e)
        })?;

        let mut buffer = [0; 1];
        bus.read(address, &mut buffer).map_err(|e| {
            warn!("read of register {:#04x} failed", register);
            transport(e)
        })?;

        trace!("read {:#04x} from register {:#04x}", buffer[0], register);
        Ok(buffer[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{BusEvent, MockBus};

    fn bound(bus: &MockBus) -> RegisterGateway<MockBus> {
        let mut gateway = RegisterGateway::unbound(0x11);
        gateway.attach(bus.clone());
        gateway
    }

    #[test]
    fn write_sends_register_and_value() {
        let bus = MockBus::new();
        let mut gateway = bound(&bus);

        gateway.write(Register::BIAS_VPOS, 0x1e).unwrap();

        assert_eq!(
            bus.events(),
            vec![BusEvent::Write {
                register: Register::BIAS_VPOS,
                value: 0x1e
            }]
        );
        assert_eq!(bus.addresses(), vec![0x11]);
    }

    #[test]
    fn read_selects_then_receives() {
        let bus = MockBus::with_read_values(&[0x42]);
        let mut gateway = bound(&bus);

        assert_eq!(gateway.read(Register::REVISION).unwrap(), 0x42);
        assert_eq!(
            bus.events(),
            vec![
                BusEvent::Select {
                    register: Register::REVISION
                },
                BusEvent::Read { value: 0x42 },
            ]
        );
    }

    #[test]
    fn out_of_range_never_reaches_bus() {
        let bus = MockBus::new();
        let mut gateway = bound(&bus);

        assert_eq!(gateway.write(0x00, 0xaa), Err(DriverError::InvalidAddress(0x00)));
        assert_eq!(gateway.write(0x14, 0xaa), Err(DriverError::InvalidAddress(0x14)));
        assert_eq!(gateway.read(0x14), Err(DriverError::InvalidAddress(0x14)));
        assert!(bus.events().is_empty());
    }

    #[test]
    fn unbound_gateway_rejects() {
        let mut gateway: RegisterGateway<MockBus> = RegisterGateway::unbound(0x11);

        assert_eq!(gateway.write(Register::FLAGS, 0), Err(DriverError::NotBound));
        assert_eq!(gateway.read(Register::FLAGS), Err(DriverError::NotBound));
    }

    #[test]
    fn transport_failure_is_reported() {
        let bus = MockBus::new();
        bus.fail_register(Register::FLAGS);
        let mut gateway = bound(&bus);

        let err = gateway.write(Register::FLAGS, 1).unwrap_err();
        assert!(matches!(
            err,
            DriverError::Transport {
                register: Register::FLAGS,
                ..
            }
        ));
        assert!(matches!(
            gateway.read(Register::FLAGS),
            Err(DriverError::Transport { .. })
        ));
        assert!(bus.events().is_empty());
    }

    #[test]
    fn failed_receive_is_reported() {
        let bus = MockBus::new();
        bus.fail_reads(true);
        let mut gateway = bound(&bus);

        assert!(matches!(
            gateway.read(Register::REVISION),
            Err(DriverError::Transport {
                register: Register::REVISION,
                ..
            })
        ));
        assert_eq!(
            bus.events(),
            vec![BusEvent::Select {
                register: Register::REVISION
            }]
        );
    }

    #[test]
    fn detach_returns_transport() {
        let bus = MockBus::new();
        let mut gateway = bound(&bus);

        assert!(gateway.is_bound());
        assert!(gateway.detach().is_some());
        assert!(!gateway.is_bound());
        assert_eq!(gateway.write(Register::FLAGS, 0), Err(DriverError::NotBound));
    }
}
