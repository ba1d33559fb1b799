//! Provides the cell that holds the state of the global kernel instance.

use core::cell::UnsafeCell;
use core::marker::PhantomData;
use core::sync::atomic::{AtomicBool, Ordering};
use crate::arch::Arch;
use crate::base::irq::IrqSaveGuard;


/// A cell whose content is only reachable with the interrupts of the (single) hart disabled.
///
/// The kernel runs on one hart, so masking the interrupts is enough to make the access
/// exclusive against the timer interrupt. A `busy` flag catches re-entrance from the closure
/// itself, which would otherwise alias the `&mut T`.
pub(crate) struct IrqCell<T, A: Arch> {
    busy: AtomicBool,
    value: UnsafeCell<T>,
    _arch: PhantomData<A>,
}

// SAFETY: the value is only reached through `with`, which masks interrupts and refuses
// re-entrance; there is a single hart.
unsafe impl<T, A: Arch> Sync for IrqCell<T, A> {}

impl<T, A: Arch> IrqCell<T, A> {
    pub const fn new(value: T) -> Self {
        Self {
            busy: AtomicBool::new(false),
            value: UnsafeCell::new(value),
            _arch: PhantomData,
        }
    }

    /// Run `f` with exclusive access to the value, interrupts disabled.
    pub fn with<R, F>(&self, f: F) -> R
        where F: FnOnce(&mut T) -> R {
        let _irq = IrqSaveGuard::<A>::new();
        kassert!(!self.busy.swap(true, Ordering::Acquire), "Re-entered the kernel state cell.");
        let _busy = BusyGuard(&self.busy);
        // SAFETY: interrupts are masked and `busy` guards against re-entrance.
        f(unsafe { &mut *self.value.get() })
    }
}

struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> Drop for BusyGuard<'a> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
