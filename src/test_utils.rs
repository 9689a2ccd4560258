//! Test Utilities
//!
//! Mock implementations of the collaborator traits for unit tests:
//! a register bus with a backing register map, write/read logs and failure
//! injection, an interrupt relay that records every line operation, and a
//! delay provider that only counts time.
//!
//! Only compiled for tests.

extern crate std;

use std::collections::HashMap;
use std::vec::Vec;

use crate::bus::{DeviceIdentity, InterruptRelay, RegisterBus};
use crate::error::{BusError, BusResult};

// =============================================================================
// Mock Register Bus
// =============================================================================

/// Mock register bus backed by in-memory register maps
///
/// Byte (control-register) and extended (16-bit) register spaces are kept
/// separately, matching the two access paths of [`RegisterBus`]. Reads of
/// unset registers return zero, like a freshly reset device.
#[derive(Debug, Default)]
pub struct MockRegisterBus {
    /// Control register per device address
    bytes: HashMap<u8, u8>,
    /// Extended register map, keyed by (address, register)
    regs: HashMap<(u8, u16), u16>,
    /// Log of control-register writes in order
    byte_writes: Vec<(u8, u8)>,
    /// Log of extended register writes in order
    reg_writes: Vec<(u8, u16, u16)>,
    /// Log of extended register reads in order
    reg_reads: Vec<(u8, u16)>,
    /// One-shot read overrides, consumed front to back
    read_overrides: Vec<((u8, u16), u16)>,
    /// Identity responses per device address
    identities: HashMap<u8, DeviceIdentity>,
    /// Error returned by every identity query, overriding the map
    identity_error: Option<BusError>,
    /// Fail all control-register writes
    fail_byte_writes: bool,
    /// Fail all control-register reads
    fail_byte_reads: bool,
}

impl MockRegisterBus {
    /// Create an empty mock bus
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Setup
    // -------------------------------------------------------------------------

    /// Set a device's control register
    pub fn set_control(&mut self, addr: u8, value: u8) {
        self.bytes.insert(addr, value);
    }

    /// Set an extended register
    pub fn set_register(&mut self, addr: u8, reg: u16, value: u16) {
        self.regs.insert((addr, reg), value);
    }

    /// Install the identity a device reports
    ///
    /// Devices without an installed identity report
    /// [`BusError::Unsupported`], like hardware predating the
    /// identification query.
    pub fn set_identity(&mut self, addr: u8, identity: DeviceIdentity) {
        self.identities.insert(addr, identity);
    }

    /// Make every identity query fail with the given error
    pub fn fail_identity(&mut self, error: BusError) {
        self.identity_error = Some(error);
    }

    /// Make all control-register writes fail with [`BusError::Nack`]
    pub fn fail_byte_writes(&mut self, fail: bool) {
        self.fail_byte_writes = fail;
    }

    /// Make all control-register reads fail with [`BusError::Nack`]
    pub fn fail_byte_reads(&mut self, fail: bool) {
        self.fail_byte_reads = fail;
    }

    /// Queue a one-shot override for the next read of an extended register
    ///
    /// Lets a test simulate hardware folding strap state into a readback
    /// instead of returning the last written value.
    pub fn inject_read(&mut self, addr: u8, reg: u16, value: u16) {
        self.read_overrides.push(((addr, reg), value));
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    /// Current control-register value of a device
    pub fn control(&self, addr: u8) -> Option<u8> {
        self.bytes.get(&addr).copied()
    }

    /// Current value of an extended register
    pub fn get_register(&self, addr: u8, reg: u16) -> Option<u16> {
        self.regs.get(&(addr, reg)).copied()
    }

    /// Control-register writes in issue order
    pub fn byte_writes(&self) -> &[(u8, u8)] {
        &self.byte_writes
    }

    /// Extended register writes in issue order
    pub fn reg_writes(&self) -> Vec<(u8, u16, u16)> {
        self.reg_writes.clone()
    }

    /// Extended register reads in issue order
    pub fn reg_reads(&self) -> Vec<(u8, u16)> {
        self.reg_reads.clone()
    }

    /// Forget all logged operations, keeping register contents
    pub fn clear_log(&mut self) {
        self.byte_writes.clear();
        self.reg_writes.clear();
        self.reg_reads.clear();
    }
}

impl RegisterBus for MockRegisterBus {
    fn read_byte(&mut self, addr: u8) -> BusResult<u8> {
        if self.fail_byte_reads {
            return Err(BusError::Nack);
        }
        Ok(self.bytes.get(&addr).copied().unwrap_or(0))
    }

    fn write_byte(&mut self, addr: u8, value: u8) -> BusResult<()> {
        if self.fail_byte_writes {
            return Err(BusError::Nack);
        }
        self.byte_writes.push((addr, value));
        self.bytes.insert(addr, value);
        Ok(())
    }

    fn read_extended(&mut self, addr: u8, reg: u16) -> BusResult<u16> {
        self.reg_reads.push((addr, reg));
        if let Some(pos) = self
            .read_overrides
            .iter()
            .position(|(key, _)| *key == (addr, reg))
        {
            return Ok(self.read_overrides.remove(pos).1);
        }
        Ok(self.regs.get(&(addr, reg)).copied().unwrap_or(0))
    }

    fn write_extended(&mut self, addr: u8, reg: u16, value: u16) -> BusResult<()> {
        self.reg_writes.push((addr, reg, value));
        self.regs.insert((addr, reg), value);
        Ok(())
    }

    fn read_identity(&mut self, addr: u8) -> BusResult<DeviceIdentity> {
        if let Some(error) = self.identity_error {
            return Err(error);
        }
        self.identities
            .get(&addr)
            .copied()
            .ok_or(BusError::Unsupported)
    }
}

// =============================================================================
// Mock Interrupt Relay
// =============================================================================

/// Mock interrupt relay that records every line operation
#[derive(Debug, Default)]
pub struct MockRelay {
    /// Registered (channel, line) pairs in order
    pub registered: Vec<(u8, u32)>,
    /// Dispatched lines in order
    pub dispatched: Vec<u32>,
    /// Released lines in order
    pub unregistered: Vec<u32>,
    next_line: u32,
    fail_after: Option<usize>,
}

/// First line number handed out, so line ids never equal channel indices
const LINE_BASE: u32 = 32;

impl MockRelay {
    /// Create a relay with unlimited line capacity
    pub fn new() -> Self {
        Self {
            registered: Vec::new(),
            dispatched: Vec::new(),
            unregistered: Vec::new(),
            next_line: LINE_BASE,
            fail_after: None,
        }
    }

    /// Fail every registration after the first `count` succeed
    pub fn fail_after(&mut self, count: usize) {
        self.fail_after = Some(count);
    }
}

impl InterruptRelay for MockRelay {
    fn register_line(&mut self, channel: u8) -> Option<u32> {
        if let Some(limit) = self.fail_after {
            if self.registered.len() >= limit {
                return None;
            }
        }
        let line = self.next_line;
        self.next_line += 1;
        self.registered.push((channel, line));
        Some(line)
    }

    fn dispatch_nested(&mut self, line: u32) {
        self.dispatched.push(line);
    }

    fn unregister_line(&mut self, line: u32) {
        self.unregistered.push(line);
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Delay provider that accumulates requested time instead of sleeping
#[derive(Debug, Default)]
pub struct MockDelay {
    total_ns: u64,
}

impl MockDelay {
    /// Create a delay provider with zero elapsed time
    pub fn new() -> Self {
        Self::default()
    }

    /// Total nanoseconds of delay requested so far
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_registers_read_zero() {
        let mut bus = MockRegisterBus::new();
        assert_eq!(bus.read_byte(0x70), Ok(0));
        assert_eq!(bus.read_extended(3, 0x10), Ok(0));
    }

    #[test]
    fn writes_update_map_and_log() {
        let mut bus = MockRegisterBus::new();
        bus.write_byte(0x70, 0x0C).unwrap();
        bus.write_extended(3, 0x10, 0x1234).unwrap();

        assert_eq!(bus.control(0x70), Some(0x0C));
        assert_eq!(bus.get_register(3, 0x10), Some(0x1234));
        assert_eq!(bus.byte_writes(), &[(0x70, 0x0C)]);
        assert_eq!(bus.reg_writes(), std::vec![(3, 0x10, 0x1234)]);
    }

    #[test]
    fn read_override_consumed_once() {
        let mut bus = MockRegisterBus::new();
        bus.set_register(3, 0x10, 0x0001);
        bus.inject_read(3, 0x10, 0xBEEF);

        assert_eq!(bus.read_extended(3, 0x10), Ok(0xBEEF));
        assert_eq!(bus.read_extended(3, 0x10), Ok(0x0001));
    }

    #[test]
    fn relay_fail_after_limit() {
        let mut relay = MockRelay::new();
        relay.fail_after(1);

        assert!(relay.register_line(0).is_some());
        assert!(relay.register_line(1).is_none());
        assert_eq!(relay.registered.len(), 1);
    }

    #[test]
    fn delay_accumulates() {
        use embedded_hal::delay::DelayNs;

        let mut delay = MockDelay::new();
        delay.delay_us(2);
        delay.delay_ns(500);
        assert_eq!(delay.total_ns(), 2_500);
    }
}
