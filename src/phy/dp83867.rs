//! DP83867 PHY Driver
//!
//! Configurator for the Texas Instruments DP83867 10/100/1000 Ethernet PHY.
//!
//! The DP83867 pairs a gigabit MAC with either a parallel RGMII interface or
//! a SerDes SGMII lane. Most of its behavior is fixed by power-on bootstrap
//! straps; this driver applies the board-specific corrections on top:
//! internal clock delay insertion, TX FIFO depth, pad impedance, clock
//! output routing, lane swap, and the RX_CTRL strap workarounds.
//!
//! # Interface Modes
//!
//! | Mode | RX delay | TX delay |
//! |-------------|----------|----------|
//! | `Rgmii` | board | board |
//! | `RgmiiId` | PHY | PHY |
//! | `RgmiiRxId` | PHY | board |
//! | `RgmiiTxId` | board | PHY |
//! | `Sgmii` | n/a | n/a |
//!
//! The `*Id` modes require the matching delay code in [`PhyBoardConfig`];
//! construction fails without it so a half-configured link never comes up.
//!
//! # Reconfiguration
//!
//! The configuration captured at construction is persistent: a
//! [`soft_reset`](Dp83867::soft_reset) reapplies the exact same register
//! sequence after the self-clearing reset, so a reset in the field restores
//! the link without re-reading board state.
//!
//! # Example
//!
//! ```ignore
//! use ph_regbus_periph::{Dp83867, InterfaceMode, PhyBoardConfig};
//!
//! let config = PhyBoardConfig::new()
//!     .with_rx_internal_delay(rgmiidctl::DELAY_2_00_NS)
//!     .with_tx_internal_delay(rgmiidctl::DELAY_2_00_NS)
//!     .with_fifo_depth(1);
//! let mut phy = Dp83867::new(0, InterfaceMode::RgmiiId, config)?;
//! phy.configure(&mut bus)?;
//! ```

use crate::bus::RegisterBus;
use crate::config::{InterfaceMode, PhyBoardConfig, PortMirroring};
use crate::error::{ConfigError, ConfigResult, Error, Result};

// =============================================================================
// DP83867 Constants
// =============================================================================

/// DP83867 PHY Identifier
///
/// The PHY ID register values:
/// - PHYIDR1 (reg 2): 0x2000
/// - PHYIDR2 (reg 3): 0xA23x (x = revision)
pub const DP83867_PHY_ID: u32 = 0x2000_A230;
/// PHY ID mask (ignores revision bits)
pub const DP83867_PHY_ID_MASK: u32 = 0xFFFF_FFF0;

// =============================================================================
// DP83867 Registers
// =============================================================================

/// DP83867 register addresses
///
/// MII registers occupy 0x00-0x1F; the extended (MMD) registers sit above
/// that in the same numeric space the bus trait exposes.
pub mod reg {
    /// Basic Mode Control Register
    pub const BMCR: u16 = 0x00;
    /// PHY Identifier Register 1
    pub const PHYIDR1: u16 = 0x02;
    /// PHY Identifier Register 2
    pub const PHYIDR2: u16 = 0x03;
    /// PHY Control Register
    pub const PHYCTRL: u16 = 0x10;
    /// MII Interrupt Control Register
    pub const MICR: u16 = 0x12;
    /// Interrupt Status Register (latched, clears on read)
    pub const ISR: u16 = 0x13;
    /// Configuration Register 2
    pub const CFG2: u16 = 0x14;
    /// BIST Control Register
    pub const BISCR: u16 = 0x16;
    /// Configuration Register 3
    pub const CFG3: u16 = 0x1E;
    /// Control Register
    pub const CTRL: u16 = 0x1F;

    /// Configuration Register 4 (extended)
    pub const CFG4: u16 = 0x0031;
    /// RGMII Control Register (extended)
    pub const RGMIICTL: u16 = 0x0032;
    /// Strap Configuration Status Register 1 (extended)
    pub const STRAP_STS1: u16 = 0x006E;
    /// RGMII Delay Control Register (extended)
    pub const RGMIIDCTL: u16 = 0x0086;
    /// SGMII Control Register 1 (extended)
    pub const SGMIICTL: u16 = 0x00D3;
    /// I/O Configuration Register (extended)
    pub const IO_MUX_CFG: u16 = 0x0170;
}

/// Basic Mode Control Register (0x00) bits
pub mod bmcr {
    /// Software reset (self-clearing)
    pub const RESET: u16 = 1 << 15;
    /// Enable auto-negotiation
    pub const AN_ENABLE: u16 = 1 << 12;
    /// Power-down mode
    pub const POWER_DOWN: u16 = 1 << 11;
    /// Full duplex
    pub const FULL_DUPLEX: u16 = 1 << 8;
    /// 1000 Mbps speed select
    pub const SPEED_1000: u16 = 1 << 6;
}

/// PHY Control Register (0x10) bits
pub mod phyctrl {
    /// TX FIFO depth field position (also the RGMII FIFO field)
    pub const TX_FIFO_DEPTH_SHIFT: u16 = 14;
    /// RX FIFO depth field position (SGMII only)
    pub const RX_FIFO_DEPTH_SHIFT: u16 = 12;
    /// TX FIFO depth field mask
    pub const FIFO_DEPTH_MASK: u16 = 3 << 14;
    /// MDI crossover field position
    pub const MDI_CROSSOVER_SHIFT: u16 = 5;
    /// MDI crossover: automatic
    pub const MDI_CROSSOVER_AUTO: u16 = 0b10;
    /// MDI crossover: forced MDI-X
    pub const MDI_CROSSOVER_MDIX: u16 = 0b01;
    /// Enable the SGMII core
    pub const SGMII_EN: u16 = 0x0800;
    /// Reserved bit 11; set by a mistaken MODE4 bootstrap
    pub const RESERVED_BIT11: u16 = 1 << 11;
}

/// MII Interrupt Control Register (0x12) bits
pub mod micr {
    /// Auto-negotiation error interrupt enable
    pub const AN_ERR_INT_EN: u16 = 1 << 15;
    /// Speed change interrupt enable
    pub const SPEED_CHNG_INT_EN: u16 = 1 << 14;
    /// Duplex mode change interrupt enable
    pub const DUP_MODE_CHNG_INT_EN: u16 = 1 << 13;
    /// Page received interrupt enable
    pub const PAGE_RXD_INT_EN: u16 = 1 << 12;
    /// Auto-negotiation complete interrupt enable
    pub const AUTONEG_COMP_INT_EN: u16 = 1 << 11;
    /// Link status change interrupt enable
    pub const LINK_STS_CHNG_INT_EN: u16 = 1 << 10;
    /// False carrier interrupt enable
    pub const FALSE_CARRIER_INT_EN: u16 = 1 << 8;
    /// Sleep mode change interrupt enable
    pub const SLEEP_MODE_CHNG_INT_EN: u16 = 1 << 4;
    /// Wake-on-LAN interrupt enable
    pub const WOL_INT_EN: u16 = 1 << 3;
    /// XGMII error interrupt enable
    pub const XGMII_ERR_INT_EN: u16 = 1 << 2;
    /// Polarity change interrupt enable
    pub const POL_CHNG_INT_EN: u16 = 1 << 1;
    /// Jabber interrupt enable
    pub const JABBER_INT_EN: u16 = 1 << 0;
}

/// Configuration Register 2 (0x14) bits
pub mod cfg2 {
    /// 10BASE-Te speed optimization enable
    pub const SPEEDOPT_10EN: u16 = 0x0040;
    /// SGMII auto-negotiation enable
    pub const SGMII_AUTONEG_EN: u16 = 0x0080;
    /// Enhanced speed optimization
    pub const SPEEDOPT_ENH: u16 = 0x0100;
    /// Speed optimization attempt count
    pub const SPEEDOPT_CNT: u16 = 0x0800;
    /// Speed optimization interrupt on low counter
    pub const SPEEDOPT_INTLOW: u16 = 0x2000;
    /// Bits preserved across speed-optimization setup
    pub const BASE_MASK: u16 = 0x003F;
}

/// Control Register (0x1F) bits
pub mod ctrl {
    /// Global software reset (self-clearing, restores register defaults)
    pub const SW_RESET: u16 = 1 << 15;
    /// Software restart (self-clearing, keeps register contents)
    pub const SW_RESTART: u16 = 1 << 14;
}

/// Configuration Register 3 (0x1E) bits
pub mod cfg3 {
    /// Interrupt output enable on the INT/PWDN pin
    pub const INT_OE: u16 = 1 << 7;
}

/// Configuration Register 4 (extended 0x0031) bits
pub mod cfg4 {
    /// SGMII auto-negotiation timer field mask
    pub const SGMII_AUTONEG_TIMER_MASK: u16 = 0x60;
    /// SGMII auto-negotiation timer: 1.6 ms
    pub const SGMII_AUTONEG_TIMER_16MS: u16 = 0x00;
    /// SGMII auto-negotiation timer: 2 us
    pub const SGMII_AUTONEG_TIMER_2US: u16 = 0x20;
    /// SGMII auto-negotiation timer: 800 us
    pub const SGMII_AUTONEG_TIMER_800US: u16 = 0x40;
    /// SGMII auto-negotiation timer: 11 ms
    pub const SGMII_AUTONEG_TIMER_11MS: u16 = 0x60;
    /// Reserved bit 7, cleared by the RX_CTRL strap workaround
    pub const RESERVED_BIT7: u16 = 1 << 7;
    /// Reserved bit 8, set by the RX_CTRL strap workaround
    pub const RESERVED_BIT8: u16 = 1 << 8;
    /// Port mirroring (lane swap) enable
    pub const PORT_MIRROR_EN: u16 = 1 << 0;
}

/// RGMII Control Register (extended 0x0032) bits
pub mod rgmiictl {
    /// Insert the internal delay on the TX clock
    pub const TX_CLK_DELAY_EN: u16 = 1 << 1;
    /// Insert the internal delay on the RX clock
    pub const RX_CLK_DELAY_EN: u16 = 1 << 0;
}

/// Strap Configuration Status Register 1 (extended 0x006E) bits
pub mod strap_sts1 {
    /// Reserved bit 11; set when the MODE4 strap latched at power-on
    pub const RESERVED: u16 = 1 << 11;
}

/// RGMII Delay Control Register (extended 0x0086) fields
///
/// Each direction takes a 4-bit delay code, 0.25 ns per step.
pub mod rgmiidctl {
    /// TX delay field position (RX delay occupies the low nibble)
    pub const TX_DELAY_SHIFT: u16 = 4;

    /// 0.25 ns delay code
    pub const DELAY_0_25_NS: u8 = 0x0;
    /// 0.50 ns delay code
    pub const DELAY_0_50_NS: u8 = 0x1;
    /// 0.75 ns delay code
    pub const DELAY_0_75_NS: u8 = 0x2;
    /// 1.00 ns delay code
    pub const DELAY_1_00_NS: u8 = 0x3;
    /// 1.25 ns delay code
    pub const DELAY_1_25_NS: u8 = 0x4;
    /// 1.50 ns delay code
    pub const DELAY_1_50_NS: u8 = 0x5;
    /// 1.75 ns delay code
    pub const DELAY_1_75_NS: u8 = 0x6;
    /// 2.00 ns delay code
    pub const DELAY_2_00_NS: u8 = 0x7;
    /// 2.25 ns delay code
    pub const DELAY_2_25_NS: u8 = 0x8;
    /// 2.50 ns delay code
    pub const DELAY_2_50_NS: u8 = 0x9;
    /// 2.75 ns delay code
    pub const DELAY_2_75_NS: u8 = 0xA;
    /// 3.00 ns delay code
    pub const DELAY_3_00_NS: u8 = 0xB;
    /// 3.25 ns delay code
    pub const DELAY_3_25_NS: u8 = 0xC;
    /// 3.50 ns delay code
    pub const DELAY_3_50_NS: u8 = 0xD;
    /// 3.75 ns delay code
    pub const DELAY_3_75_NS: u8 = 0xE;
    /// 4.00 ns delay code
    pub const DELAY_4_00_NS: u8 = 0xF;
}

/// SGMII Control Register 1 (extended 0x00D3) bits
pub mod sgmiictl {
    /// 6-wire mode: drive the SGMII reference clock output pair
    pub const SGMII_TYPE: u16 = 1 << 14;
}

/// I/O Configuration Register (extended 0x0170) fields
pub mod io_mux_cfg {
    /// Pad impedance control field mask (low 5 bits)
    pub const IO_IMPEDANCE_MASK: u16 = 0x1F;
    /// Impedance code: maximum output impedance
    pub const IO_IMPEDANCE_MAX: u8 = 0x00;
    /// Impedance code: minimum output impedance
    pub const IO_IMPEDANCE_MIN: u8 = 0x1F;
    /// Clock output mux selection field mask
    pub const CLK_O_SEL_MASK: u16 = 0x1F << 8;
    /// Clock output mux selection field position
    pub const CLK_O_SEL_SHIFT: u16 = 8;
    /// Clock output selection: reference clock (power-on default)
    pub const CLK_O_SEL_REF_CLK: u8 = 0x0C;
}

// =============================================================================
// DP83867 Driver
// =============================================================================

/// DP83867 PHY configurator
///
/// Construction validates the board configuration against the interface
/// mode and resolves the derived fields; [`configure`](Self::configure)
/// then drives the full register sequence. The captured state persists so
/// [`soft_reset`](Self::soft_reset) can replay it.
#[derive(Debug)]
pub struct Dp83867 {
    /// PHY address (0-31)
    addr: u8,
    /// MAC-to-PHY interface mode
    mode: InterfaceMode,
    /// Board configuration captured at construction
    config: PhyBoardConfig,
    /// Resolved pad impedance code, when the board overrides the strap
    io_impedance: Option<u8>,
    /// Resolved clock output selection
    clk_output_sel: u8,
    /// Current lane-swap policy
    port_mirroring: PortMirroring,
    /// INT/PWDN pin wired to the host interrupt controller
    interrupt_wired: bool,
}

impl Dp83867 {
    /// Create a new DP83867 configurator
    ///
    /// Fails with [`ConfigError::MissingRxDelay`] or
    /// [`ConfigError::MissingTxDelay`] when the interface mode requests
    /// PHY-internal delay insertion for a direction the board configuration
    /// gives no delay code for. Nothing is written to the device.
    ///
    /// A clock output selection that is absent or above
    /// [`io_mux_cfg::CLK_O_SEL_REF_CLK`] keeps the power-on default.
    pub fn new(addr: u8, mode: InterfaceMode, config: PhyBoardConfig) -> ConfigResult<Self> {
        if config.rx_internal_delay.is_none() && mode.wants_rx_delay() {
            return Err(ConfigError::MissingRxDelay);
        }
        if config.tx_internal_delay.is_none() && mode.wants_tx_delay() {
            return Err(ConfigError::MissingTxDelay);
        }

        let io_impedance = if config.max_output_impedance {
            Some(io_mux_cfg::IO_IMPEDANCE_MAX)
        } else if config.min_output_impedance {
            Some(io_mux_cfg::IO_IMPEDANCE_MIN)
        } else {
            None
        };

        let clk_output_sel = match config.clk_output_sel {
            Some(sel) if sel <= io_mux_cfg::CLK_O_SEL_REF_CLK => sel,
            _ => io_mux_cfg::CLK_O_SEL_REF_CLK,
        };

        Ok(Self {
            addr,
            mode,
            config,
            io_impedance,
            clk_output_sel,
            port_mirroring: config.port_mirroring(),
            interrupt_wired: false,
        })
    }

    /// Declare the INT/PWDN pin wired to the host interrupt controller
    ///
    /// [`configure`](Self::configure) then enables the interrupt output
    /// driver; the pin floats otherwise.
    pub const fn with_interrupt_line(mut self) -> Self {
        self.interrupt_wired = true;
        self
    }

    /// PHY address on the bus
    pub const fn address(&self) -> u8 {
        self.addr
    }

    /// MAC-to-PHY interface mode
    pub const fn interface_mode(&self) -> InterfaceMode {
        self.mode
    }

    /// Read the 32-bit PHY identifier
    pub fn phy_id<B: RegisterBus>(&self, bus: &mut B) -> Result<u32> {
        let high = bus.read_extended(self.addr, reg::PHYIDR1)?;
        let low = bus.read_extended(self.addr, reg::PHYIDR2)?;
        Ok(((high as u32) << 16) | (low as u32))
    }

    /// Verify this is a DP83867 by reading the PHY ID
    pub fn verify_id<B: RegisterBus>(&self, bus: &mut B) -> Result<bool> {
        let id = self.phy_id(bus)?;
        Ok((id & DP83867_PHY_ID_MASK) == DP83867_PHY_ID)
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Apply the full board configuration to the device
    ///
    /// Runs the strap workaround, the RGMII or SGMII branch, clock delay
    /// insertion, interrupt output routing, lane swap, and clock output
    /// selection, in that order. Configuration is not transactional:
    /// a failure leaves the registers written so far in effect.
    pub fn configure<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()> {
        // RX_DV/RX_CTRL strapped in mode 1 or mode 2 workaround
        if self.config.rxctrl_strap_quirk {
            let mut val = bus.read_extended(self.addr, reg::CFG4)?;
            val &= !cfg4::RESERVED_BIT7;
            bus.write_extended(self.addr, reg::CFG4, val)?;
        }

        if self.mode.is_rgmii() {
            self.configure_rgmii(bus)?;
        } else {
            self.configure_sgmii(bus)?;
        }

        if self.mode.wants_internal_delay() {
            self.configure_clock_delays(bus)?;
        }

        // Route the interrupt to the INT/PWDN pin
        if self.interrupt_wired {
            let mut val = bus.read_extended(self.addr, reg::CFG3)?;
            val |= cfg3::INT_OE;
            bus.write_extended(self.addr, reg::CFG3, val)?;
        }

        if self.port_mirroring != PortMirroring::Keep {
            self.apply_port_mirroring(bus)?;
        }

        // Clock output selection, when routed away from the default
        if self.clk_output_sel != io_mux_cfg::CLK_O_SEL_REF_CLK {
            let mut val = bus.read_extended(self.addr, reg::IO_MUX_CFG)?;
            val &= !io_mux_cfg::CLK_O_SEL_MASK;
            val |= (self.clk_output_sel as u16) << io_mux_cfg::CLK_O_SEL_SHIFT;
            bus.write_extended(self.addr, reg::IO_MUX_CFG, val)?;
        }

        Ok(())
    }

    fn configure_rgmii<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()> {
        let fifo = (self.config.fifo_depth as u16) << phyctrl::TX_FIFO_DEPTH_SHIFT;

        bus.write_extended(
            self.addr,
            reg::PHYCTRL,
            (phyctrl::MDI_CROSSOVER_AUTO << phyctrl::MDI_CROSSOVER_SHIFT) | fifo,
        )?;

        // Read back: the chip may fold strap state into the register. Restore
        // the FIFO depth field on top of whatever came back.
        let mut val = bus.read_extended(self.addr, reg::PHYCTRL)?;
        val &= !phyctrl::FIFO_DEPTH_MASK;
        val |= fifo;

        // A MODE4 "N/A" bootstrap latched by mistake puts the chip in an
        // internal test mode that disables RGMII transmission. STRAP_STS1
        // bit 11 reveals it; the cure is clearing PHYCTRL bit 11.
        let straps = bus.read_extended(self.addr, reg::STRAP_STS1)?;
        if straps & strap_sts1::RESERVED != 0 {
            val &= !phyctrl::RESERVED_BIT11;
        }

        bus.write_extended(self.addr, reg::PHYCTRL, val)
            .map_err(Error::from)
    }

    fn configure_sgmii<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()> {
        // 6-wire mode: also drive the reference clock output pair
        let mut val = bus.read_extended(self.addr, reg::SGMIICTL)?;
        if self.config.sgmii_ref_clock_output {
            val |= sgmiictl::SGMII_TYPE;
        } else {
            val &= !sgmiictl::SGMII_TYPE;
        }
        bus.write_extended(self.addr, reg::SGMIICTL, val)?;

        bus.write_extended(
            self.addr,
            reg::BMCR,
            bmcr::AN_ENABLE | bmcr::FULL_DUPLEX | bmcr::SPEED_1000,
        )?;

        let mut cfg2 = bus.read_extended(self.addr, reg::CFG2)?;
        cfg2 &= cfg2::BASE_MASK;
        cfg2 |= cfg2::SPEEDOPT_10EN
            | cfg2::SGMII_AUTONEG_EN
            | cfg2::SPEEDOPT_ENH
            | cfg2::SPEEDOPT_CNT
            | cfg2::SPEEDOPT_INTLOW;
        bus.write_extended(self.addr, reg::CFG2, cfg2)?;

        bus.write_extended(self.addr, reg::RGMIICTL, 0)?;

        let fifo = self.config.fifo_depth as u16;
        bus.write_extended(
            self.addr,
            reg::PHYCTRL,
            phyctrl::SGMII_EN
                | (phyctrl::MDI_CROSSOVER_AUTO << phyctrl::MDI_CROSSOVER_SHIFT)
                | (fifo << phyctrl::RX_FIFO_DEPTH_SHIFT)
                | (fifo << phyctrl::TX_FIFO_DEPTH_SHIFT),
        )?;
        bus.write_extended(self.addr, reg::BISCR, 0)?;

        // Link instability workaround when RX_CTRL is not strapped to
        // mode 3 or 4
        if self.config.rxctrl_strap_quirk {
            let mut val = bus.read_extended(self.addr, reg::CFG4)?;
            val &= !cfg4::RESERVED_BIT7;
            val |= cfg4::RESERVED_BIT8;
            val &= !cfg4::SGMII_AUTONEG_TIMER_MASK;
            val |= cfg4::SGMII_AUTONEG_TIMER_11MS;
            bus.write_extended(self.addr, reg::CFG4, val)?;
        }

        Ok(())
    }

    fn configure_clock_delays<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()> {
        let mut val = bus.read_extended(self.addr, reg::RGMIICTL)?;
        if self.mode.wants_rx_delay() {
            val |= rgmiictl::RX_CLK_DELAY_EN;
        }
        if self.mode.wants_tx_delay() {
            val |= rgmiictl::TX_CLK_DELAY_EN;
        }
        bus.write_extended(self.addr, reg::RGMIICTL, val)?;

        let rx = self.config.rx_internal_delay.unwrap_or(0) as u16;
        let tx = self.config.tx_internal_delay.unwrap_or(0) as u16;
        bus.write_extended(
            self.addr,
            reg::RGMIIDCTL,
            rx | (tx << rgmiidctl::TX_DELAY_SHIFT),
        )?;

        if let Some(impedance) = self.io_impedance {
            let mut val = bus.read_extended(self.addr, reg::IO_MUX_CFG)?;
            val &= !io_mux_cfg::IO_IMPEDANCE_MASK;
            val |= (impedance as u16) & io_mux_cfg::IO_IMPEDANCE_MASK;
            bus.write_extended(self.addr, reg::IO_MUX_CFG, val)?;
        }

        Ok(())
    }

    fn apply_port_mirroring<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()> {
        let mut val = bus.read_extended(self.addr, reg::CFG4)?;
        if self.port_mirroring == PortMirroring::Enable {
            val |= cfg4::PORT_MIRROR_EN;
        } else {
            val &= !cfg4::PORT_MIRROR_EN;
        }
        bus.write_extended(self.addr, reg::CFG4, val)
            .map_err(Error::from)
    }

    /// Change the lane-swap policy at runtime
    ///
    /// Updates the captured state, so a later
    /// [`soft_reset`](Self::soft_reset) keeps the new policy, and applies
    /// the mirror bit immediately unless the policy is
    /// [`PortMirroring::Keep`].
    pub fn set_port_mirroring<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        policy: PortMirroring,
    ) -> Result<()> {
        self.port_mirroring = policy;
        if policy == PortMirroring::Keep {
            return Ok(());
        }
        self.apply_port_mirroring(bus)
    }

    // =========================================================================
    // Reset
    // =========================================================================

    /// Software-reset the chip and reapply the captured configuration
    ///
    /// The reset clears every register this driver touches, so the full
    /// [`configure`](Self::configure) sequence runs again afterwards.
    pub fn soft_reset<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()> {
        bus.write_extended(self.addr, reg::CTRL, ctrl::SW_RESET)?;
        self.configure(bus)
    }

    // =========================================================================
    // Interrupt Handling
    // =========================================================================

    /// Acknowledge a pending interrupt
    ///
    /// The latched status clears on read; the value itself is not needed.
    pub fn ack_interrupt<B: RegisterBus>(&self, bus: &mut B) -> Result<()> {
        bus.read_extended(self.addr, reg::ISR)?;
        Ok(())
    }

    /// Enable or disable the link-management interrupt sources
    ///
    /// Enabling preserves any sources already set in MICR and adds the
    /// negotiation, speed, duplex, link and sleep events. Disabling clears
    /// every source.
    pub fn set_interrupts_enabled<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        enabled: bool,
    ) -> Result<()> {
        if !enabled {
            return bus
                .write_extended(self.addr, reg::MICR, 0)
                .map_err(Error::from);
        }

        let mut val = bus.read_extended(self.addr, reg::MICR)?;
        val |= micr::AN_ERR_INT_EN
            | micr::SPEED_CHNG_INT_EN
            | micr::AUTONEG_COMP_INT_EN
            | micr::LINK_STS_CHNG_INT_EN
            | micr::DUP_MODE_CHNG_INT_EN
            | micr::SLEEP_MODE_CHNG_INT_EN;
        bus.write_extended(self.addr, reg::MICR, val)
            .map_err(Error::from)
    }

    // =========================================================================
    // Power Management
    // =========================================================================

    /// Put the chip in power-down mode
    pub fn suspend<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()> {
        let val = bus.read_extended(self.addr, reg::BMCR)?;
        bus.write_extended(self.addr, reg::BMCR, val | bmcr::POWER_DOWN)
            .map_err(Error::from)
    }

    /// Bring the chip out of power-down mode
    pub fn resume<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()> {
        let val = bus.read_extended(self.addr, reg::BMCR)?;
        bus.write_extended(self.addr, reg::BMCR, val & !bmcr::POWER_DOWN)
            .map_err(Error::from)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
