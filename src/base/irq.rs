//! CPU interrupt mask handling.

use core::marker::PhantomData;
use core::sync::atomic::{compiler_fence, Ordering};
use crate::arch::Arch;


/// Disable the IRQ of current CPU core until the guard is dropped, then restore the saved state.
pub(crate) struct IrqSaveGuard<A: Arch> {
    flags: usize,
    _arch: PhantomData<A>,
}

impl<A: Arch> IrqSaveGuard<A> {
    #[inline]
    pub fn new() -> Self {
        let flags = A::irq_save();
        compiler_fence(Ordering::SeqCst);
        Self {
            flags,
            _arch: PhantomData,
        }
    }
}

impl<A: Arch> Drop for IrqSaveGuard<A> {
    #[inline]
    fn drop(&mut self) {
        compiler_fence(Ordering::SeqCst);
        A::irq_restore(self.flags);
    }
}
