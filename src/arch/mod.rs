//! Platform boundary of the scheduler.
//!
//! The scheduler never touches registers itself. It asks the platform to build the initial
//! context of a thread, to arm the scheduling timer and to halt the hart, and after every switch
//! decision it publishes the address of the selected context in [`CURRENT_THREAD_CONTEXT`]. The
//! platform's interrupt trampoline reads that slot right after calling
//! [`kernel_switch_thread_context`] and restores the registers from it.
//!
//! [`kernel_switch_thread_context`]: crate::sched::kernel_switch_thread_context

#[cfg(target_arch = "riscv64")]
pub mod riscv;
#[cfg(not(target_arch = "riscv64"))]
pub mod hosted;
#[cfg(test)]
pub(crate) mod mock;

use core::sync::atomic::{AtomicUsize, Ordering};


/// The platform the global kernel instance is built for.
#[cfg(target_arch = "riscv64")]
pub type PlatformArch = riscv::Riscv;
/// The platform the global kernel instance is built for.
#[cfg(not(target_arch = "riscv64"))]
pub type PlatformArch = hosted::Hosted;


/// Operations the scheduler consumes from the architecture layer.
///
/// Implementors are zero-sized marker types, all operations act on the current hart.
pub trait Arch: 'static {
    /// Saved register block of a thread. The trampoline saves into and restores from this block
    /// in place, so the scheduler only ever hands out its address.
    type Context: Default;

    /// Build the first context of a thread: the first resume starts executing `entry` with
    /// `param` as its only argument on the stack whose top is `stack_top`, and returning from
    /// `entry` jumps to `exit`.
    fn init_thread_context(ctx: &mut Self::Context, stack_top: usize, entry: usize, exit: usize, param: usize);

    /// Arm the periodic timer interrupt that drives the context switches.
    fn setup_scheduler_timer();

    /// Halt the hart until the next interrupt.
    fn halt_processor();

    /// Disable the interrupts of the current hart and return the previous state.
    fn irq_save() -> usize;

    /// Restore the interrupt state saved by [`irq_save`].
    ///
    /// [`irq_save`]: Arch::irq_save
    fn irq_restore(flags: usize);

    /// Write to the kernel console.
    fn console_write(s: &str);
}


/// Address of the context selected by the last switch decision, `0` before the first one.
///
/// This is the only piece of state shared with code outside the scheduler: it is written by
/// [`publish_context`] from the context-switch entry point and read by the trampoline right
/// after, never concurrently.
#[no_mangle]
pub static CURRENT_THREAD_CONTEXT: AtomicUsize = AtomicUsize::new(0);

/// Publish the context the trampoline must restore. The trampoline writes through this address
/// on the next switch.
#[inline(always)]
pub fn publish_context<C>(ctx: *mut C) {
    CURRENT_THREAD_CONTEXT.store(ctx as usize, Ordering::Release);
}

/// Read the last published context address.
#[inline(always)]
pub fn current_context_addr() -> usize {
    CURRENT_THREAD_CONTEXT.load(Ordering::Acquire)
}
