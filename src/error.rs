//! Error types for the register-bus peripheral drivers
//!
//! Errors are organized by domain for better diagnostics:
//! - [`BusError`]: Transport failures on the shared register bus
//! - [`AttachError`]: Device probe and lifecycle failures
//! - [`ConfigError`]: Board-configuration and parameter failures
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods. Bus errors are propagated verbatim - the drivers
//! never retry or reinterpret a transport failure.

use crate::bus::DeviceIdentity;

// =============================================================================
// Bus Errors
// =============================================================================

/// Transport failures on the shared register bus
///
/// Reported by the host's [`RegisterBus`](crate::bus::RegisterBus)
/// implementation and passed through to the caller unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Bus transaction timed out
    Timeout,
    /// Device did not acknowledge the transaction
    Nack,
    /// Operation not supported by this bus or device
    ///
    /// For the identity query this is a tolerated response: older chip
    /// variants cannot report an identity, and attach proceeds unverified.
    Unsupported,
}

impl core::fmt::Display for BusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BusError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            BusError::Timeout => "bus transaction timed out",
            BusError::Nack => "device did not acknowledge",
            BusError::Unsupported => "operation not supported",
        }
    }
}

// =============================================================================
// Attach Errors
// =============================================================================

/// Device probe and lifecycle failures
///
/// These errors occur while attaching a driver to a physical device. Any
/// attach failure triggers full teardown of partially-created state before
/// the error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AttachError {
    /// Initial probe write failed - no device at this address
    NotPresent,
    /// Identity register disagrees with the expected chip variant
    IdentityMismatch {
        /// Identity the chip descriptor expects
        expected: DeviceIdentity,
        /// Identity the device actually reported
        found: DeviceIdentity,
    },
    /// Logical interrupt line allocation failed
    IrqSetup,
}

impl core::fmt::Display for AttachError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AttachError::IdentityMismatch { expected, found } => write!(
                f,
                "unexpected device id {:03x}-{:03x} (expected {:03x}-{:03x})",
                found.manufacturer_id, found.part_id, expected.manufacturer_id, expected.part_id
            ),
            _ => f.write_str(self.as_str()),
        }
    }
}

impl AttachError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            AttachError::NotPresent => "device not present",
            AttachError::IdentityMismatch { .. } => "unexpected device identity",
            AttachError::IrqSetup => "interrupt line setup failed",
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Board-configuration and parameter failures
///
/// Raised when a required board-configuration value is missing for the
/// selected interface mode, or when a caller-supplied parameter is out of
/// range. Configuration is not transactional: register writes issued before
/// the failing check remain in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// RX internal delay required by the interface mode but not configured
    MissingRxDelay,
    /// TX internal delay required by the interface mode but not configured
    MissingTxDelay,
    /// Channel index outside `[0, channel_count)`
    InvalidChannel,
    /// Child interrupt trigger type other than level-low requested
    InvalidIrqTrigger,
    /// Hardware reset line could not be driven
    ResetLine,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::MissingRxDelay => "rx internal delay not configured",
            ConfigError::MissingTxDelay => "tx internal delay not configured",
            ConfigError::InvalidChannel => "invalid channel index",
            ConfigError::InvalidIrqTrigger => "only level-low trigger supported",
            ConfigError::ResetLine => "reset line control failed",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Bus(BusError::Nack)) => { /* ... */ }
///     Err(Error::Attach(AttachError::NotPresent)) => { /* ... */ }
///     Err(Error::Config(ConfigError::MissingRxDelay)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Bus transport error
    Bus(BusError),
    /// Attach/probe error
    Attach(AttachError),
    /// Configuration error
    Config(ConfigError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus: {e}"),
            Error::Attach(e) => write!(f, "attach: {e}"),
            Error::Config(e) => write!(f, "config: {e}"),
        }
    }
}

// From impls for automatic conversion
impl From<BusError> for Error {
    fn from(e: BusError) -> Self {
        Error::Bus(e)
    }
}

impl From<AttachError> for Error {
    fn from(e: AttachError) -> Self {
        Error::Attach(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for bus transport operations
pub type BusResult<T> = core::result::Result<T, BusError>;

/// Result type alias for attach operations
pub type AttachResult<T> = core::result::Result<T, AttachError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================
