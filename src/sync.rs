//! ISR-safe driver sharing
//!
//! The fanout controller's interrupt demux typically runs from an interrupt
//! handler while channel selection runs from thread context. [`SharedDevice`]
//! wraps a driver in a critical-section protected cell so both contexts can
//! reach it through a `static`.
//!
//! Requires the `critical-section` feature; the host must install a
//! `critical_section` implementation for its platform.

use core::cell::RefCell;

use critical_section::Mutex;

// =============================================================================
// Critical Section Cell
// =============================================================================

/// Cell providing interior mutability with critical section protection
///
/// Combines `critical_section::Mutex` with `RefCell` for safe mutable access
/// from both normal code and interrupt handlers.
pub struct CriticalSectionCell<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> CriticalSectionCell<T> {
    /// Create a new cell (const, suitable for static initialization)
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Execute a closure with exclusive mutable access
    ///
    /// Interrupts are disabled for the duration of the closure.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            let mut value = self.inner.borrow_ref_mut(cs);
            f(&mut value)
        })
    }

    /// Try to execute a closure, returning `None` if already borrowed
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .try_borrow_mut()
                .ok()
                .map(|mut value| f(&mut value))
        })
    }
}

// SAFETY: CriticalSectionCell uses critical sections to protect all access.
unsafe impl<T> Sync for CriticalSectionCell<T> {}

// =============================================================================
// Shared Device
// =============================================================================

/// ISR-safe driver wrapper using critical sections
///
/// All access goes through `critical_section::with()`, disabling interrupts
/// for the duration of the closure. Reentrant access from the same context
/// would deadlock on some platforms, so handlers should prefer
/// [`try_with`](Self::try_with).
///
/// # Example
///
/// ```ignore
/// static MUX: SharedDevice<Pca954x> =
///     SharedDevice::new(Pca954x::new(0x70, ChipVariant::Pca9545));
///
/// // Thread context
/// MUX.with(|mux| mux.select_channel(&mut bus, 2))?;
///
/// // Interrupt handler
/// MUX.try_with(|mux| mux.interrupt_demux(&mut bus, &mut relay));
/// ```
pub struct SharedDevice<T> {
    inner: CriticalSectionCell<T>,
}

impl<T> SharedDevice<T> {
    /// Create a new shared device (const, suitable for static initialization)
    pub const fn new(device: T) -> Self {
        Self {
            inner: CriticalSectionCell::new(device),
        }
    }

    /// Execute a closure with exclusive access to the device
    ///
    /// Interrupts are disabled for the duration of the closure.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        self.inner.with(f)
    }

    /// Try to execute a closure, returning `None` if already borrowed
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        self.inner.try_with(f)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
