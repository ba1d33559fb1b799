//! Software platform used by host builds. There is no trampoline: the context only records how
//! the thread would start, the timer and the interrupt mask are plain flags.
//!
//! Halting never blocks. A halt limit turns the halt loop of the scheduler start into a panic
//! after the given number of halts, so a host can leave it.

use core::hint::spin_loop;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use super::Arch;


/// Initial context of a thread on the hosted platform.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HostedContext {
    pub stack_top: usize,
    pub entry: usize,
    pub exit: usize,
    pub param: usize,
}

static TIMER_ARMED: AtomicBool = AtomicBool::new(false);
static TIMER_ARMED_MASKED: AtomicBool = AtomicBool::new(false);
static HALT_COUNT: AtomicUsize = AtomicUsize::new(0);
static MASKED_HALTS: AtomicUsize = AtomicUsize::new(0);
static HALT_LIMIT: AtomicUsize = AtomicUsize::new(usize::MAX);
static IRQ_ENABLED: AtomicBool = AtomicBool::new(true);


/// The hosted platform.
pub struct Hosted;

impl Hosted {
    /// Returns `true` once the scheduler timer has been armed.
    pub fn timer_armed() -> bool {
        TIMER_ARMED.load(Ordering::Acquire)
    }

    /// Returns `true` if the interrupts were disabled when the timer was last armed.
    pub fn timer_armed_masked() -> bool {
        TIMER_ARMED_MASKED.load(Ordering::Acquire)
    }

    /// Number of halts so far.
    pub fn halt_count() -> usize {
        HALT_COUNT.load(Ordering::Acquire)
    }

    /// Number of halts taken with the interrupts disabled. Such a halt never wakes up on real
    /// hardware.
    pub fn masked_halts() -> usize {
        MASKED_HALTS.load(Ordering::Acquire)
    }

    /// Panic in the halt that brings [`halt_count`] above `limit`.
    ///
    /// [`halt_count`]: Hosted::halt_count
    pub fn set_halt_limit(limit: usize) {
        HALT_LIMIT.store(limit, Ordering::Release);
    }

    /// Returns `true` if the interrupts are enabled.
    pub fn irq_enabled() -> bool {
        IRQ_ENABLED.load(Ordering::Acquire)
    }
}

impl Arch for Hosted {
    type Context = HostedContext;

    fn init_thread_context(ctx: &mut HostedContext, stack_top: usize, entry: usize, exit: usize, param: usize) {
        *ctx = HostedContext {
            stack_top,
            entry,
            exit,
            param,
        };
    }

    fn setup_scheduler_timer() {
        TIMER_ARMED_MASKED.store(!Self::irq_enabled(), Ordering::Release);
        TIMER_ARMED.store(true, Ordering::Release);
    }

    fn halt_processor() {
        if !Self::irq_enabled() {
            MASKED_HALTS.fetch_add(1, Ordering::AcqRel);
        }
        let halts = HALT_COUNT.fetch_add(1, Ordering::AcqRel) + 1;
        if halts > HALT_LIMIT.load(Ordering::Acquire) {
            panic!("Halt limit {} reached.", halts - 1);
        }
        spin_loop();
    }

    fn irq_save() -> usize {
        IRQ_ENABLED.swap(false, Ordering::AcqRel) as usize
    }

    fn irq_restore(flags: usize) {
        IRQ_ENABLED.store(flags != 0, Ordering::Release);
    }

    fn console_write(_s: &str) {
        // No console device.
    }
}
