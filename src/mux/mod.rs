//! PCA954x I2C multiplexer/switch drivers
//!
//! The PCA954x family chips are controlled through the shared bus itself and
//! expose a single 8-bit control register. The upstream "parent" bus fans out
//! to two, four, or eight downstream channels; which channels are connected
//! is determined by the chip kind and the register contents. A mux connects
//! exactly one channel at a time; a switch can connect any combination.
//!
//! # Architecture
//!
//! - [`chip`]: compiled-in descriptor table for the supported variants
//! - [`fanout`]: the [`Pca954x`] controller (channel selection, interrupt
//!   demux, attach/detach lifecycle)
//!
//! The controller never owns the bus. The host passes its
//! [`RegisterBus`](crate::bus::RegisterBus) into every operation and is
//! responsible for serializing select/transfer/deselect sequences under its
//! own bus-locking discipline.
//!
//! # Example
//!
//! ```ignore
//! use ph_regbus_periph::{ChipVariant, MuxBoardConfig, Pca954x};
//!
//! let mut mux = Pca954x::new(0x70, ChipVariant::Pca9547);
//! mux.attach_simple(&mut bus, &MuxBoardConfig::new())?;
//!
//! mux.select_channel(&mut bus, 5)?;
//! // ... transactions with devices behind channel 5 ...
//! mux.deselect_channel(&mut bus, 5)?;
//! ```

pub mod chip;
pub mod fanout;

pub use chip::{ChipDescriptor, ChipVariant, MuxKind, IRQ_STATUS_SHIFT, MAX_CHANNELS};
pub use fanout::{ChannelAdapter, Pca954x, Pca954xWithReset};
