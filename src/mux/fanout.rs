//! PCA954x fanout controller
//!
//! Channel selection/deselection, interrupt demultiplexing, and the
//! attach/detach lifecycle for one chip instance.
//!
//! # Concurrency contract
//!
//! Select/deselect calls are serialized by the host's bus-locking
//! discipline: from this controller's perspective exactly one channel is
//! ever active at a time per chip instance. The controller holds no lock of
//! its own; register I/O relies on the bus's one-transaction-at-a-time
//! guarantee. Hosts that share a controller between thread and interrupt
//! contexts can wrap it in [`SharedDevice`](crate::sync::SharedDevice).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::bus::{InterruptRelay, RegisterBus};
use crate::config::{IrqTrigger, MuxBoardConfig};
use crate::error::{AttachError, BusError, ConfigError, Error, Result};

use super::chip::{ChipDescriptor, ChipVariant, MuxKind, IRQ_STATUS_SHIFT, MAX_CHANNELS};

/// Reset pulse width in microseconds
const RESET_PULSE_US: u32 = 1;

/// Reset recovery time in microseconds
const RESET_RECOVERY_US: u32 = 1;

// =============================================================================
// Channel Adapter Record
// =============================================================================

/// Bookkeeping for one downstream channel adapter
///
/// Created at attach for every configured channel; the host's
/// adapter-registration framework reads these when materializing child
/// buses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelAdapter {
    /// Static adapter number forced by board configuration, if any
    pub forced_id: Option<u16>,
    /// Adapter class flags from board configuration
    pub class: u32,
}

// =============================================================================
// Fanout Controller
// =============================================================================

/// Driver for one PCA954x mux/switch instance
///
/// The controller owns the per-instance state (last written control value,
/// idle-disconnect bit set, child adapter records, interrupt line mappings)
/// but never the bus: the host passes its [`RegisterBus`] into every
/// operation.
#[derive(Debug)]
pub struct Pca954x {
    /// Device address on the parent bus
    addr: u8,
    /// Compiled-in descriptor for this variant
    chip: &'static ChipDescriptor,
    /// Last control-register value successfully written
    last_chan: u8,
    /// Per-channel bit set: disconnect after each transaction
    deselect: u8,
    /// Child adapter records, one per configured channel
    adapters: [Option<ChannelAdapter>; MAX_CHANNELS],
    /// Logical interrupt line per channel, when interrupts are set up
    irq_lines: [Option<u32>; MAX_CHANNELS],
}

impl Pca954x {
    /// Create a new controller for a chip at `addr`
    pub const fn new(addr: u8, variant: ChipVariant) -> Self {
        Self {
            addr,
            chip: variant.descriptor(),
            last_chan: 0,
            deselect: 0,
            adapters: [None; MAX_CHANNELS],
            irq_lines: [None; MAX_CHANNELS],
        }
    }

    /// Device address on the parent bus
    pub const fn address(&self) -> u8 {
        self.addr
    }

    /// Descriptor for this chip variant
    pub const fn chip(&self) -> &'static ChipDescriptor {
        self.chip
    }

    /// Adapter record for a channel, if one was created at attach
    pub fn adapter(&self, channel: u8) -> Option<ChannelAdapter> {
        self.adapters.get(channel as usize).copied().flatten()
    }

    /// Logical interrupt line mapped to a channel, if interrupts are set up
    pub fn irq_line(&self, channel: u8) -> Option<u32> {
        self.irq_lines.get(channel as usize).copied().flatten()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Probe and bring up the chip
    ///
    /// Verifies the chip identity when the variant supports the query (a
    /// mismatch is fatal; an unsupported query proceeds unverified), probes
    /// presence by writing the all-disconnected control value, allocates one
    /// logical interrupt line per channel when both the chip and the host
    /// provide interrupt plumbing, and records one child adapter per
    /// configured channel.
    ///
    /// Any failure tears down everything created so far before returning.
    pub fn attach<B: RegisterBus, R: InterruptRelay>(
        &mut self,
        bus: &mut B,
        mut relay: Option<&mut R>,
        board: &MuxBoardConfig,
    ) -> Result<()> {
        self.deselect = 0;
        self.adapters = [None; MAX_CHANNELS];
        self.irq_lines = [None; MAX_CHANNELS];

        if let Some(expected) = self.chip.id {
            match bus.read_identity(self.addr) {
                Ok(found) => {
                    if !found.matches(&expected) {
                        #[cfg(feature = "defmt")]
                        defmt::warn!(
                            "unexpected device id {:x}-{:x}-{:x}",
                            found.manufacturer_id,
                            found.part_id,
                            found.die_revision
                        );
                        return Err(AttachError::IdentityMismatch { expected, found }.into());
                    }
                }
                // Older variants cannot report an identity; proceed unverified
                Err(BusError::Unsupported) => {}
                Err(e) => return Err(e.into()),
            }
        }

        // Write the control register to verify the chip is in fact present.
        // This also initializes it to the disconnected state.
        if bus.write_byte(self.addr, 0).is_err() {
            return Err(AttachError::NotPresent.into());
        }
        self.last_chan = 0; // force the first selection

        // Interrupt lines are allocated before adapters and torn down in the
        // reverse order: a late interrupt must never find a released adapter.
        if self.chip.has_irq {
            if let Some(relay) = relay.as_deref_mut() {
                for channel in 0..self.chip.channel_count {
                    match relay.register_line(channel) {
                        Some(line) => self.irq_lines[channel as usize] = Some(line),
                        None => {
                            self.cleanup(Some(&mut *relay));
                            return Err(AttachError::IrqSetup.into());
                        }
                    }
                }
            }
        }

        // Now create an adapter record for each channel
        for channel in 0..self.chip.channel_count {
            let mut idle_disconnect_pd = false;
            let mut adapter = ChannelAdapter {
                forced_id: None,
                class: 0,
            };
            if board.has_modes() {
                // Discard channels past the configured prefix
                let Some(mode) = board.channel_mode(channel) else {
                    break;
                };
                adapter.forced_id = mode.forced_id;
                adapter.class = mode.class;
                idle_disconnect_pd = mode.deselect_on_exit;
            }
            if idle_disconnect_pd || board.idle_disconnect() {
                self.deselect |= 1 << channel;
            }
            self.adapters[channel as usize] = Some(adapter);
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "registered {} multiplexed channels at {:x}",
            self.chip.channel_count,
            self.addr
        );

        Ok(())
    }

    /// [`attach`](Self::attach) without interrupt plumbing
    ///
    /// Skips interrupt setup even on interrupt-capable chips, for hosts that
    /// leave the chip's interrupt pin unwired.
    pub fn attach_simple<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        board: &MuxBoardConfig,
    ) -> Result<()> {
        self.attach(bus, None::<&mut NoRelay>, board)
    }

    /// Tear the instance down
    ///
    /// Releases all interrupt line mappings first, then the child adapter
    /// records.
    pub fn detach<R: InterruptRelay>(&mut self, relay: Option<&mut R>) {
        self.cleanup(relay);
    }

    fn cleanup<R: InterruptRelay>(&mut self, relay: Option<&mut R>) {
        if let Some(relay) = relay {
            for line in &mut self.irq_lines {
                if let Some(line) = line.take() {
                    relay.unregister_line(line);
                }
            }
        }
        self.irq_lines = [None; MAX_CHANNELS];
        self.adapters = [None; MAX_CHANNELS];
        self.deselect = 0;
    }

    /// Re-synchronize after resume from a low-power state
    ///
    /// Re-issues the same disconnect write that attach uses, without
    /// assuming anything about hardware state retention across the
    /// transition.
    pub fn resume<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()> {
        self.last_chan = 0;
        bus.write_byte(self.addr, 0).map_err(Error::from)
    }

    // =========================================================================
    // Channel Selection
    // =========================================================================

    /// Connect a downstream channel
    ///
    /// Mux kinds encode `channel | enable`; switch kinds encode
    /// `1 << channel`. Switches could connect several channels at once, but
    /// this driver drives them one channel at a time, mux-style.
    ///
    /// On a failed write the recorded register value is reset to zero so the
    /// next attempt re-selects unconditionally.
    pub fn select_channel<B: RegisterBus>(&mut self, bus: &mut B, channel: u8) -> Result<()> {
        if channel >= self.chip.channel_count {
            return Err(ConfigError::InvalidChannel.into());
        }

        let regval = match self.chip.kind {
            MuxKind::Mux => channel | self.chip.enable,
            MuxKind::Switch => 1 << channel,
        };

        let ret = bus.write_byte(self.addr, regval);
        self.last_chan = if ret.is_err() { 0 } else { regval };
        ret.map_err(Error::from)
    }

    /// Disconnect a downstream channel after a transaction
    ///
    /// A no-op (zero bus writes) unless the idle-disconnect bit for this
    /// channel was set at attach; then writes the all-disconnected value.
    pub fn deselect_channel<B: RegisterBus>(&mut self, bus: &mut B, channel: u8) -> Result<()> {
        if channel >= self.chip.channel_count {
            return Err(ConfigError::InvalidChannel.into());
        }

        if self.deselect & (1 << channel) == 0 {
            return Ok(());
        }

        // Deselect active channel
        self.last_chan = 0;
        bus.write_byte(self.addr, self.last_chan).map_err(Error::from)
    }

    /// Last control-register value successfully written
    pub const fn last_written(&self) -> u8 {
        self.last_chan
    }

    // =========================================================================
    // Interrupt Handling
    // =========================================================================

    /// Demultiplex the chip's interrupt status across child channels
    ///
    /// Reads the status byte and dispatches a nested interrupt for every
    /// channel whose flag is set. Returns `true` when at least one channel
    /// flag fired, `false` for a spurious interrupt (including a failed
    /// status read) so other devices sharing the physical line keep getting
    /// polled.
    pub fn interrupt_demux<B: RegisterBus, R: InterruptRelay>(
        &self,
        bus: &mut B,
        relay: &mut R,
    ) -> bool {
        let Ok(status) = bus.read_byte(self.addr) else {
            return false;
        };

        let mut handled = false;
        for channel in 0..self.chip.channel_count {
            if u16::from(status) & (1 << (IRQ_STATUS_SHIFT + channel)) != 0 {
                if let Some(line) = self.irq_lines[channel as usize] {
                    relay.dispatch_nested(line);
                }
                handled = true;
            }
        }
        handled
    }

    /// Validate a requested child-interrupt trigger type
    ///
    /// The chips drive their interrupt output level-low; every other
    /// trigger type is rejected.
    pub fn set_irq_trigger(&self, trigger: IrqTrigger) -> Result<()> {
        if trigger != IrqTrigger::LevelLow {
            return Err(ConfigError::InvalidIrqTrigger.into());
        }
        Ok(())
    }
}

/// Relay stand-in for hosts without interrupt plumbing
struct NoRelay;

impl InterruptRelay for NoRelay {
    fn register_line(&mut self, _channel: u8) -> Option<u32> {
        None
    }

    fn dispatch_nested(&mut self, _line: u32) {}

    fn unregister_line(&mut self, _line: u32) {}
}

// =============================================================================
// Fanout Controller (with reset pin)
// =============================================================================

/// [`Pca954x`] with an active-high hardware reset line
///
/// Pulsing reset before attach brings a chip in an unknown state back to its
/// power-on defaults. Dereferences to the inner controller for all bus
/// operations.
///
/// # Example
///
/// ```ignore
/// let mut mux = Pca954xWithReset::new(0x70, ChipVariant::Pca9548, reset_pin);
/// mux.hardware_reset(&mut delay)?;
/// mux.attach_simple(&mut bus, &MuxBoardConfig::new())?;
/// ```
#[derive(Debug)]
pub struct Pca954xWithReset<RST: OutputPin> {
    inner: Pca954x,
    /// Reset pin (active high)
    reset_pin: RST,
}

impl<RST: OutputPin> Pca954xWithReset<RST> {
    /// Create a new controller with a reset pin
    ///
    /// The pin is driven low (inactive) initially.
    pub fn new(addr: u8, variant: ChipVariant, mut reset_pin: RST) -> Self {
        let _ = reset_pin.set_low();
        Self {
            inner: Pca954x::new(addr, variant),
            reset_pin,
        }
    }

    /// Pulse the reset line and wait for the chip to recover
    pub fn hardware_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        self.reset_pin
            .set_high()
            .map_err(|_| ConfigError::ResetLine)?;
        delay.delay_us(RESET_PULSE_US);

        self.reset_pin
            .set_low()
            .map_err(|_| ConfigError::ResetLine)?;
        // Give the chip some time to recover
        delay.delay_us(RESET_RECOVERY_US);

        Ok(())
    }

    /// Consume the driver and return the reset pin
    pub fn into_reset_pin(self) -> RST {
        self.reset_pin
    }
}

impl<RST: OutputPin> core::ops::Deref for Pca954xWithReset<RST> {
    type Target = Pca954x;

    fn deref(&self) -> &Pca954x {
        &self.inner
    }
}

impl<RST: OutputPin> core::ops::DerefMut for Pca954xWithReset<RST> {
    fn deref_mut(&mut self) -> &mut Pca954x {
        &mut self.inner
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
