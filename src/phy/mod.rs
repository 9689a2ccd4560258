//! Ethernet PHY configurators
//!
//! Drivers for gigabit PHYs reached through the extended (16-bit) register
//! space of a [`RegisterBus`](crate::bus::RegisterBus). The configurator owns
//! the wiring-derived state (interface mode, delay codes, strap workarounds)
//! and drives the chip through whatever register transport the board
//! provides; link management and packet I/O stay with the MAC.
//!
//! Currently supported:
//! - [`Dp83867`]: TI DP83867 10/100/1000 PHY (RGMII and SGMII)

pub mod dp83867;

pub use dp83867::{DP83867_PHY_ID, DP83867_PHY_ID_MASK, Dp83867};
