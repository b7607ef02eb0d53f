//! Error types for the LM36273 driver.

use embedded_hal::i2c::ErrorKind;

/// Errors that can occur when talking to the LM36273.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    /// The register address is outside the documented range.
    #[error("Register address {0:#04x} outside 0x01-0x13")]
    InvalidAddress(u8),

    /// No I2C transport is bound to the device.
    #[error("Device not bound to an I2C transport")]
    NotBound,

    /// The I2C transfer failed.
    #[error("I2C transfer for register {register:#04x} failed: {kind}")]
    Transport {
        /// The register being accessed.
        register: u8,
        /// What the bus reported.
        kind: ErrorKind,
    },

    /// Bring-up finished with failed writes under the strict policy.
    #[error("Bring-up configuration incomplete ({failed} of {total} writes failed)")]
    BringUpIncomplete {
        /// Number of failed writes.
        failed: usize,
        /// Number of writes attempted.
        total: usize,
    },
}

/// Result of a best-effort register sequence.
///
/// Sequences never stop half way, so a failed write is counted rather than
/// returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStatus {
    /// Every write in the sequence succeeded.
    Complete,
    /// The sequence ran to the end but some writes failed.
    Degraded {
        /// Number of writes that failed.
        failed_writes: usize,
    },
}

impl SequenceStatus {
    pub(crate) fn from_failures(failed_writes: usize) -> Self {
        if failed_writes == 0 {
            Self::Complete
        } else {
            Self::Degraded { failed_writes }
        }
    }

    /// Whether every write went through.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}
