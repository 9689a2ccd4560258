//! External collaborator traits
//!
//! The drivers in this crate never own the transport. The host environment
//! implements [`RegisterBus`] (byte and extended-register access over the
//! shared two-wire bus) and, when child interrupts are wired, an
//! [`InterruptRelay`] that maps channel indices to logical interrupt lines
//! and performs nested dispatch.
//!
//! All bus operations are blocking and serialized by the provider: one
//! transaction is in flight at a time per bus. Retry and backoff policy, if
//! any, belongs to the transport - the drivers propagate failures verbatim.

use crate::error::{BusError, BusResult};

// =============================================================================
// Device Identity
// =============================================================================

/// Identity reported by a device's identification register
///
/// Used to verify at attach time that the device on the bus actually is the
/// chip variant the driver was told to expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceIdentity {
    /// Manufacturer id (12-bit)
    pub manufacturer_id: u16,
    /// Part id (9-bit)
    pub part_id: u16,
    /// Die revision (3-bit)
    pub die_revision: u8,
}

impl DeviceIdentity {
    /// Create a new device identity
    pub const fn new(manufacturer_id: u16, part_id: u16, die_revision: u8) -> Self {
        Self {
            manufacturer_id,
            part_id,
            die_revision,
        }
    }

    /// Check whether this identity matches an expected one
    ///
    /// The die revision is ignored: it varies across production runs of the
    /// same part.
    pub const fn matches(&self, expected: &DeviceIdentity) -> bool {
        self.manufacturer_id == expected.manufacturer_id && self.part_id == expected.part_id
    }
}

// =============================================================================
// Register Bus Trait
// =============================================================================

/// Blocking register access over the shared addressed bus
///
/// This trait can be implemented by different backends (platform I2C/SMBus
/// controllers, MDIO controllers, mock buses in tests), allowing the drivers
/// to work with whatever transport the board uses.
///
/// Byte operations address devices with a single 8-bit control register (the
/// mux chips). Extended operations address a 16-bit register space (the PHY's
/// MII and MMD registers share one numeric space here).
pub trait RegisterBus {
    /// Read the device's single control/status byte
    fn read_byte(&mut self, addr: u8) -> BusResult<u8>;

    /// Write the device's single control byte
    fn write_byte(&mut self, addr: u8, value: u8) -> BusResult<()>;

    /// Read a 16-bit register
    fn read_extended(&mut self, addr: u8, reg: u16) -> BusResult<u16>;

    /// Write a 16-bit register
    fn write_extended(&mut self, addr: u8, reg: u16, value: u16) -> BusResult<()>;

    /// Query the device's identification register
    ///
    /// The default implementation reports [`BusError::Unsupported`], which
    /// attach treats as "cannot verify, proceed anyway". Buses that can issue
    /// the standard identity query should override this.
    fn read_identity(&mut self, addr: u8) -> BusResult<DeviceIdentity> {
        let _ = addr;
        Err(BusError::Unsupported)
    }
}

// =============================================================================
// Interrupt Relay Trait
// =============================================================================

/// Child-interrupt plumbing supplied by the host
///
/// The fanout controller demultiplexes its chip's interrupt status across
/// child channels; the relay owns the mapping from channel index to the
/// logical line number the host's interrupt dispatcher understands.
///
/// Dispatch is nested: the handler runs in a context that may block on bus
/// I/O, never in a raw interrupt context.
pub trait InterruptRelay {
    /// Allocate a logical interrupt line for a child channel
    ///
    /// Returns `None` when allocation fails; the caller tears down all
    /// previously allocated lines and fails the attach.
    fn register_line(&mut self, channel: u8) -> Option<u32>;

    /// Dispatch a nested interrupt on a previously registered line
    fn dispatch_nested(&mut self, line: u32);

    /// Release a previously registered line
    fn unregister_line(&mut self, line: u32);
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_matches_ignores_revision() {
        let expected = DeviceIdentity::new(0x000, 0x10b, 0);
        let found = DeviceIdentity::new(0x000, 0x10b, 5);
        assert!(found.matches(&expected));
    }

    #[test]
    fn identity_mismatch_on_part_id() {
        let expected = DeviceIdentity::new(0x000, 0x10b, 0);
        let found = DeviceIdentity::new(0x000, 0x108, 0);
        assert!(!found.matches(&expected));
    }

    #[test]
    fn identity_mismatch_on_manufacturer() {
        let expected = DeviceIdentity::new(0x000, 0x10b, 0);
        let found = DeviceIdentity::new(0x004, 0x10b, 0);
        assert!(!found.matches(&expected));
    }

    #[test]
    fn default_identity_query_unsupported() {
        struct ByteOnlyBus;
        impl RegisterBus for ByteOnlyBus {
            fn read_byte(&mut self, _addr: u8) -> BusResult<u8> {
                Ok(0)
            }
            fn write_byte(&mut self, _addr: u8, _value: u8) -> BusResult<()> {
                Ok(())
            }
            fn read_extended(&mut self, _addr: u8, _reg: u16) -> BusResult<u16> {
                Ok(0)
            }
            fn write_extended(&mut self, _addr: u8, _reg: u16, _value: u16) -> BusResult<()> {
                Ok(())
            }
        }

        let mut bus = ByteOnlyBus;
        assert_eq!(bus.read_identity(0x70), Err(BusError::Unsupported));
    }
}
