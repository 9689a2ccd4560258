//! PCA954x chip descriptor table
//!
//! One immutable descriptor per supported variant, compiled in. The
//! descriptor fixes the channel count, the mux enable pattern, interrupt
//! capability, and - for the newer PCA984x parts - the identity the chip
//! reports through the standard identification query.

use crate::bus::DeviceIdentity;

/// Hardware limit on downstream channels (control register width)
pub const MAX_CHANNELS: usize = 8;

/// Bit position of the first channel-interrupt flag in the status byte
///
/// The low 4 bits of the status byte mirror the channel-select state;
/// channel interrupt flags start at bit 4.
pub const IRQ_STATUS_SHIFT: u8 = 4;

/// NXP Semiconductors manufacturer id
const MANUFACTURER_NXP: u16 = 0x000;

// =============================================================================
// Chip Kind
// =============================================================================

/// Connection topology of a fanout chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MuxKind {
    /// Exactly one downstream channel connected at a time
    Mux,
    /// Any combination of downstream channels can be connected
    Switch,
}

// =============================================================================
// Chip Descriptor
// =============================================================================

/// Immutable description of one chip variant
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipDescriptor {
    /// Number of downstream channels (2, 4, or 8)
    pub channel_count: u8,
    /// Enable pattern ORed into the channel number; mux kinds only
    pub enable: u8,
    /// Chip has an interrupt output pin
    pub has_irq: bool,
    /// Mux or switch topology
    pub kind: MuxKind,
    /// Expected identity, when the variant supports the identification query
    pub id: Option<DeviceIdentity>,
}

// =============================================================================
// Supported Variants
// =============================================================================

/// Supported PCA954x family variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipVariant {
    /// 2-channel mux
    Pca9540,
    /// 2-channel mux with interrupt output
    Pca9542,
    /// 2-channel switch with interrupt output
    Pca9543,
    /// 4-channel mux with interrupt output
    Pca9544,
    /// 4-channel switch with interrupt output
    Pca9545,
    /// 4-channel switch
    Pca9546,
    /// 8-channel mux
    Pca9547,
    /// 8-channel switch
    Pca9548,
    /// 4-channel switch, identity-capable
    Pca9846,
    /// 8-channel mux, identity-capable
    Pca9847,
    /// 8-channel switch, identity-capable
    Pca9848,
    /// 4-channel mux, identity-capable
    Pca9849,
}

impl ChipVariant {
    /// Descriptor for this variant
    pub const fn descriptor(self) -> &'static ChipDescriptor {
        match self {
            ChipVariant::Pca9540 => &ChipDescriptor {
                channel_count: 2,
                enable: 0x4,
                has_irq: false,
                kind: MuxKind::Mux,
                id: None,
            },
            ChipVariant::Pca9542 => &ChipDescriptor {
                channel_count: 2,
                enable: 0x4,
                has_irq: true,
                kind: MuxKind::Mux,
                id: None,
            },
            ChipVariant::Pca9543 => &ChipDescriptor {
                channel_count: 2,
                enable: 0,
                has_irq: true,
                kind: MuxKind::Switch,
                id: None,
            },
            ChipVariant::Pca9544 => &ChipDescriptor {
                channel_count: 4,
                enable: 0x4,
                has_irq: true,
                kind: MuxKind::Mux,
                id: None,
            },
            ChipVariant::Pca9545 => &ChipDescriptor {
                channel_count: 4,
                enable: 0,
                has_irq: true,
                kind: MuxKind::Switch,
                id: None,
            },
            ChipVariant::Pca9546 => &ChipDescriptor {
                channel_count: 4,
                enable: 0,
                has_irq: false,
                kind: MuxKind::Switch,
                id: None,
            },
            ChipVariant::Pca9547 => &ChipDescriptor {
                channel_count: 8,
                enable: 0x8,
                has_irq: false,
                kind: MuxKind::Mux,
                id: None,
            },
            ChipVariant::Pca9548 => &ChipDescriptor {
                channel_count: 8,
                enable: 0,
                has_irq: false,
                kind: MuxKind::Switch,
                id: None,
            },
            ChipVariant::Pca9846 => &const {
                ChipDescriptor {
                    channel_count: 4,
                    enable: 0,
                    has_irq: false,
                    kind: MuxKind::Switch,
                    id: Some(DeviceIdentity::new(MANUFACTURER_NXP, 0x10b, 0)),
                }
            },
            ChipVariant::Pca9847 => &const {
                ChipDescriptor {
                    channel_count: 8,
                    enable: 0x8,
                    has_irq: false,
                    kind: MuxKind::Mux,
                    id: Some(DeviceIdentity::new(MANUFACTURER_NXP, 0x108, 0)),
                }
            },
            ChipVariant::Pca9848 => &const {
                ChipDescriptor {
                    channel_count: 8,
                    enable: 0,
                    has_irq: false,
                    kind: MuxKind::Switch,
                    id: Some(DeviceIdentity::new(MANUFACTURER_NXP, 0x10a, 0)),
                }
            },
            ChipVariant::Pca9849 => &const {
                ChipDescriptor {
                    channel_count: 4,
                    enable: 0x4,
                    has_irq: false,
                    kind: MuxKind::Mux,
                    id: Some(DeviceIdentity::new(MANUFACTURER_NXP, 0x109, 0)),
                }
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
