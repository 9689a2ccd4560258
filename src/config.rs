//! Board-configuration types
//!
//! Static board properties (wiring mode, delay magnitudes, per-channel
//! adapter assignments) are abstracted as plain value types with builder
//! methods. How the host obtains them - device tree, build-time constants,
//! platform data tables - is out of scope for the drivers.
//!
//! Both drivers read their board configuration exactly once: the mux at
//! attach, the PHY on the first `configure` pass. Later reconfiguration
//! reuses the captured state.

use crate::mux::MAX_CHANNELS;

// =============================================================================
// PHY Interface Mode
// =============================================================================

/// Electrical/timing mode of the MAC-to-PHY interface
///
/// The `*Id` variants request PHY-internal clock delay insertion to
/// compensate for board trace length, per direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterfaceMode {
    /// RGMII, no internal delays (delays provided by board routing)
    Rgmii,
    /// RGMII with internal delay on both RX and TX clocks
    #[default]
    RgmiiId,
    /// RGMII with internal delay on the RX clock only
    RgmiiRxId,
    /// RGMII with internal delay on the TX clock only
    RgmiiTxId,
    /// SGMII (SerDes lane, no parallel data pins)
    Sgmii,
}

impl InterfaceMode {
    /// Any RGMII flavor, with or without internal delays
    pub const fn is_rgmii(self) -> bool {
        !matches!(self, InterfaceMode::Sgmii)
    }

    /// Internal delay insertion requested for at least one direction
    pub const fn wants_internal_delay(self) -> bool {
        matches!(
            self,
            InterfaceMode::RgmiiId | InterfaceMode::RgmiiRxId | InterfaceMode::RgmiiTxId
        )
    }

    /// Internal delay requested on the receive clock
    pub const fn wants_rx_delay(self) -> bool {
        matches!(self, InterfaceMode::RgmiiId | InterfaceMode::RgmiiRxId)
    }

    /// Internal delay requested on the transmit clock
    pub const fn wants_tx_delay(self) -> bool {
        matches!(self, InterfaceMode::RgmiiId | InterfaceMode::RgmiiTxId)
    }
}

// =============================================================================
// Port Mirroring
// =============================================================================

/// PHY port-mirroring (lane swap) policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortMirroring {
    /// Keep whatever the power-on strap selected
    #[default]
    Keep,
    /// Force mirroring on
    Enable,
    /// Force mirroring off
    Disable,
}

// =============================================================================
// Interrupt Trigger
// =============================================================================

/// Requested trigger type for a child interrupt line
///
/// The mux chips drive their interrupt output as a wired-AND level-low
/// signal; the fanout controller rejects every other trigger type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqTrigger {
    /// Active-low level trigger (the only supported type)
    #[default]
    LevelLow,
    /// Active-high level trigger
    LevelHigh,
    /// Rising-edge trigger
    EdgeRising,
    /// Falling-edge trigger
    EdgeFalling,
}

// =============================================================================
// Mux Board Configuration
// =============================================================================

/// Per-channel adapter assignment from board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelMode {
    /// Force a static adapter number instead of dynamic assignment
    pub forced_id: Option<u16>,
    /// Adapter class flags passed through to the registration framework
    pub class: u32,
    /// Disconnect this channel after every transaction
    pub deselect_on_exit: bool,
}

impl ChannelMode {
    /// Create a default (dynamic id, no class, no idle disconnect) mode
    pub const fn new() -> Self {
        Self {
            forced_id: None,
            class: 0,
            deselect_on_exit: false,
        }
    }

    /// Force a static adapter number
    pub const fn with_forced_id(mut self, id: u16) -> Self {
        self.forced_id = Some(id);
        self
    }

    /// Set adapter class flags
    pub const fn with_class(mut self, class: u32) -> Self {
        self.class = class;
        self
    }

    /// Disconnect this channel after every transaction
    pub const fn with_deselect_on_exit(mut self, deselect: bool) -> Self {
        self.deselect_on_exit = deselect;
        self
    }
}

/// Board configuration for a fanout (mux/switch) chip instance
///
/// When an explicit per-channel mode list is supplied, channels past the
/// configured prefix are discarded - no adapter is created for them. Without
/// a list every channel gets a dynamically numbered adapter.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MuxBoardConfig {
    idle_disconnect: bool,
    modes: [Option<ChannelMode>; MAX_CHANNELS],
    num_modes: usize,
}

impl MuxBoardConfig {
    /// Create an empty configuration (all channels dynamic, no idle disconnect)
    pub const fn new() -> Self {
        Self {
            idle_disconnect: false,
            modes: [None; MAX_CHANNELS],
            num_modes: 0,
        }
    }

    /// Disconnect every channel after each transaction
    ///
    /// Prevents address collisions with other traffic sharing the parent
    /// bus, at the cost of an extra control-register write per transaction.
    pub const fn with_idle_disconnect(mut self, enabled: bool) -> Self {
        self.idle_disconnect = enabled;
        self
    }

    /// Append a per-channel mode to the configured prefix
    ///
    /// Modes are positional: the first call configures channel 0, the next
    /// channel 1, and so on. Calls past [`MAX_CHANNELS`] are ignored.
    pub const fn with_channel_mode(mut self, mode: ChannelMode) -> Self {
        if self.num_modes < MAX_CHANNELS {
            self.modes[self.num_modes] = Some(mode);
            self.num_modes += 1;
        }
        self
    }

    /// Global idle-disconnect flag
    pub const fn idle_disconnect(&self) -> bool {
        self.idle_disconnect
    }

    /// Whether an explicit per-channel mode list was supplied
    pub const fn has_modes(&self) -> bool {
        self.num_modes > 0
    }

    /// Number of explicitly configured channels
    pub const fn num_modes(&self) -> usize {
        self.num_modes
    }

    /// Mode for a channel, if explicitly configured
    pub fn channel_mode(&self, channel: u8) -> Option<ChannelMode> {
        self.modes.get(channel as usize).copied().flatten()
    }
}

// =============================================================================
// PHY Board Configuration
// =============================================================================

/// Board configuration for a DP83867 PHY instance
///
/// Field values map one-to-one to board-description keys; absent optional
/// values leave the corresponding hardware default untouched.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyBoardConfig {
    /// RX internal clock delay code (required in RX-delay interface modes)
    pub rx_internal_delay: Option<u8>,
    /// TX internal clock delay code (required in TX-delay interface modes)
    pub tx_internal_delay: Option<u8>,
    /// TX FIFO depth code, 0-3
    pub fifo_depth: u8,
    /// Select maximum output impedance
    pub max_output_impedance: bool,
    /// Select minimum output impedance
    pub min_output_impedance: bool,
    /// Clock-output mux selection code (absent or out of range = passthrough)
    pub clk_output_sel: Option<u8>,
    /// Apply the RX_DV/RX_CTRL strap workaround sequence
    pub rxctrl_strap_quirk: bool,
    /// Enable the SGMII reference-clock output (6-wire mode)
    pub sgmii_ref_clock_output: bool,
    /// Force lane swap (port mirroring) on
    pub lane_swap: bool,
    /// Force lane swap (port mirroring) off
    pub lane_no_swap: bool,
}

impl PhyBoardConfig {
    /// Create an empty configuration (hardware defaults everywhere)
    pub const fn new() -> Self {
        Self {
            rx_internal_delay: None,
            tx_internal_delay: None,
            fifo_depth: 0,
            max_output_impedance: false,
            min_output_impedance: false,
            clk_output_sel: None,
            rxctrl_strap_quirk: false,
            sgmii_ref_clock_output: false,
            lane_swap: false,
            lane_no_swap: false,
        }
    }

    /// Set the RX internal clock delay code
    pub const fn with_rx_internal_delay(mut self, delay: u8) -> Self {
        self.rx_internal_delay = Some(delay);
        self
    }

    /// Set the TX internal clock delay code
    pub const fn with_tx_internal_delay(mut self, delay: u8) -> Self {
        self.tx_internal_delay = Some(delay);
        self
    }

    /// Set the FIFO depth code (0-3)
    pub const fn with_fifo_depth(mut self, depth: u8) -> Self {
        self.fifo_depth = depth;
        self
    }

    /// Select maximum output impedance
    pub const fn with_max_output_impedance(mut self) -> Self {
        self.max_output_impedance = true;
        self
    }

    /// Select minimum output impedance
    pub const fn with_min_output_impedance(mut self) -> Self {
        self.min_output_impedance = true;
        self
    }

    /// Set the clock-output mux selection code
    pub const fn with_clk_output_sel(mut self, sel: u8) -> Self {
        self.clk_output_sel = Some(sel);
        self
    }

    /// Apply the RX_DV/RX_CTRL strap workaround sequence
    pub const fn with_rxctrl_strap_quirk(mut self, enabled: bool) -> Self {
        self.rxctrl_strap_quirk = enabled;
        self
    }

    /// Enable the SGMII reference-clock output (6-wire mode)
    pub const fn with_sgmii_ref_clock_output(mut self, enabled: bool) -> Self {
        self.sgmii_ref_clock_output = enabled;
        self
    }

    /// Force lane swap (port mirroring) on
    pub const fn with_lane_swap(mut self) -> Self {
        self.lane_swap = true;
        self
    }

    /// Force lane swap (port mirroring) off
    pub const fn with_lane_no_swap(mut self) -> Self {
        self.lane_no_swap = true;
        self
    }

    /// Port-mirroring policy derived from the lane-swap flags
    pub const fn port_mirroring(&self) -> PortMirroring {
        if self.lane_swap {
            PortMirroring::Enable
        } else if self.lane_no_swap {
            PortMirroring::Disable
        } else {
            PortMirroring::Keep
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interface_mode_delay_requests() {
        assert!(InterfaceMode::RgmiiId.wants_rx_delay());
        assert!(InterfaceMode::RgmiiId.wants_tx_delay());
        assert!(InterfaceMode::RgmiiRxId.wants_rx_delay());
        assert!(!InterfaceMode::RgmiiRxId.wants_tx_delay());
        assert!(!InterfaceMode::RgmiiTxId.wants_rx_delay());
        assert!(InterfaceMode::RgmiiTxId.wants_tx_delay());
        assert!(!InterfaceMode::Rgmii.wants_internal_delay());
        assert!(!InterfaceMode::Sgmii.wants_internal_delay());
    }

    #[test]
    fn interface_mode_families() {
        assert!(InterfaceMode::Rgmii.is_rgmii());
        assert!(InterfaceMode::RgmiiTxId.is_rgmii());
        assert!(!InterfaceMode::Sgmii.is_rgmii());
    }

    #[test]
    fn mux_config_positional_modes() {
        let config = MuxBoardConfig::new()
            .with_channel_mode(ChannelMode::new().with_forced_id(10))
            .with_channel_mode(ChannelMode::new().with_class(0x2));

        assert!(config.has_modes());
        assert_eq!(config.num_modes(), 2);
        assert_eq!(config.channel_mode(0).unwrap().forced_id, Some(10));
        assert_eq!(config.channel_mode(1).unwrap().class, 0x2);
        assert!(config.channel_mode(2).is_none());
    }

    #[test]
    fn mux_config_defaults() {
        let config = MuxBoardConfig::new();
        assert!(!config.idle_disconnect());
        assert!(!config.has_modes());
        assert!(config.channel_mode(0).is_none());
    }

    #[test]
    fn mux_config_mode_list_capped() {
        let mut config = MuxBoardConfig::new();
        for _ in 0..10 {
            config = config.with_channel_mode(ChannelMode::new());
        }
        assert_eq!(config.num_modes(), MAX_CHANNELS);
    }

    #[test]
    fn phy_config_port_mirroring_from_flags() {
        assert_eq!(
            PhyBoardConfig::new().port_mirroring(),
            PortMirroring::Keep
        );
        assert_eq!(
            PhyBoardConfig::new().with_lane_swap().port_mirroring(),
            PortMirroring::Enable
        );
        assert_eq!(
            PhyBoardConfig::new().with_lane_no_swap().port_mirroring(),
            PortMirroring::Disable
        );
    }

    #[test]
    fn phy_config_builder_chains() {
        let config = PhyBoardConfig::new()
            .with_rx_internal_delay(0x8)
            .with_tx_internal_delay(0xA)
            .with_fifo_depth(3)
            .with_min_output_impedance()
            .with_clk_output_sel(0x1)
            .with_rxctrl_strap_quirk(true);

        assert_eq!(config.rx_internal_delay, Some(0x8));
        assert_eq!(config.tx_internal_delay, Some(0xA));
        assert_eq!(config.fifo_depth, 3);
        assert!(config.min_output_impedance);
        assert!(!config.max_output_impedance);
        assert_eq!(config.clk_output_sel, Some(0x1));
        assert!(config.rxctrl_strap_quirk);
    }
}
