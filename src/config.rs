//! Compile-time configuration of the scheduler.

use core::mem::size_of;
use core::sync::atomic::AtomicUsize;


/// Highest priority a thread can be created with. Priorities are `0..=MAX_THREAD_PRIORITY`,
/// a larger value is scheduled first.
pub const MAX_THREAD_PRIORITY: u32 = 31;

/// Number of ready queue slots, one per priority level.
pub const READY_QUEUE_COUNT: usize = MAX_THREAD_PRIORITY as usize + 1;

/// Stack size of every thread: 2^2 pages, 16KiB.
pub const DEFAULT_THREAD_STACK_SIZE: usize = 4096 << 2;

/// The stack top is aligned down to `2^STACK_ALIGN_ORDER` bytes (16 bytes for the RISC-V psABI).
pub const STACK_ALIGN_ORDER: usize = 4;

/// Name of the process created by [`start_scheduler`].
///
/// [`start_scheduler`]: crate::sched::ProcessManager::start_scheduler
pub const IDLE_PROCESS_NAME: &str = "System Idle";

/// Priority of the idle thread. Must be the lowest one so it only runs when nothing else can.
pub const IDLE_THREAD_PRIORITY: u32 = 0;

/// How many times the idle thread halts before it prints a heartbeat.
pub const IDLE_HALTS_PER_HEARTBEAT: usize = 100;

/// Time slice (in timer ticks) programmed when the scheduler timer is armed. QEMU `virt` runs
/// the timer at 10MHz, so this is 10ms.
pub const TIMER_INTERVAL_TICKS: usize = 100_000;

sa::const_assert!(IDLE_THREAD_PRIORITY <= MAX_THREAD_PRIORITY);
sa::const_assert_eq!(DEFAULT_THREAD_STACK_SIZE % (1usize << STACK_ALIGN_ORDER), 0);
// The trampoline reads the context slot as a plain machine word.
sa::const_assert_eq!(size_of::<AtomicUsize>(), size_of::<usize>());
