//! Register-bus peripheral drivers
//!
//! A `no_std`, `no_alloc` Rust implementation of two register-oriented bus
//! peripherals commonly found on embedded networking boards:
//!
//! 1. **Mux layer** ([`mux`]): NXP PCA954x I2C multiplexer/switch family.
//!    A single upstream bus fans out to two, four, or eight downstream
//!    channels; the driver selects/deselects channels and demultiplexes the
//!    shared interrupt line across them.
//! 2. **PHY layer** ([`phy`]): TI DP83867 gigabit Ethernet PHY. Electrical
//!    and timing behavior (RGMII clock delays, FIFO depth, IO impedance,
//!    SGMII mode) is programmed through an ordered sequence of
//!    read-modify-write register transactions derived from board wiring.
//!
//! Both drivers talk to hardware through the [`RegisterBus`] trait and never
//! own the transport: the host supplies it per call, which keeps the drivers
//! testable with a mock bus and keeps bus locking in the host's hands.
//!
//! # Example
//!
//! ```ignore
//! use ph_regbus_periph::{ChipVariant, Pca954x, Dp83867, InterfaceMode};
//! use ph_regbus_periph::{MuxBoardConfig, PhyBoardConfig};
//!
//! // Your RegisterBus implementation (wrapping the platform I2C/MDIO driver)
//! let mut bus = /* ... */;
//!
//! // Bring up an 8-channel mux at address 0x70
//! let mut mux = Pca954x::new(0x70, ChipVariant::Pca9548);
//! mux.attach_simple(&mut bus, &MuxBoardConfig::new().with_idle_disconnect(true))?;
//!
//! mux.select_channel(&mut bus, 3)?;
//! // ... traffic to devices behind channel 3 ...
//! mux.deselect_channel(&mut bus, 3)?;
//!
//! // Configure a DP83867 at PHY address 0, RGMII with both clock delays
//! let board = PhyBoardConfig::new()
//!     .with_rx_internal_delay(0x8)
//!     .with_tx_internal_delay(0xA)
//!     .with_fifo_depth(1);
//! let mut phy = Dp83867::new(0, InterfaceMode::RgmiiId, board)?;
//! phy.configure(&mut bus)?;
//! ```
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting and diagnostics for driver types
//! - `critical-section`: Enable the ISR-safe [`sync::SharedDevice`] wrapper

#![no_std]
#![deny(missing_docs)]
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::similar_names,
    clippy::struct_excessive_bools,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::wildcard_imports
)]

// =============================================================================
// Modules
// =============================================================================

pub mod bus;
pub mod config;
pub mod error;
pub mod mux;
pub mod phy;

#[cfg(feature = "critical-section")]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use bus::{DeviceIdentity, InterruptRelay, RegisterBus};
pub use config::{
    ChannelMode, InterfaceMode, IrqTrigger, MuxBoardConfig, PhyBoardConfig, PortMirroring,
};
pub use error::{
    AttachError, AttachResult, BusError, BusResult, ConfigError, ConfigResult, Error, Result,
};
pub use mux::{ChipDescriptor, ChipVariant, MuxKind, Pca954x, Pca954xWithReset};
pub use phy::{DP83867_PHY_ID, DP83867_PHY_ID_MASK, Dp83867};

#[cfg(feature = "critical-section")]
pub use sync::SharedDevice;
