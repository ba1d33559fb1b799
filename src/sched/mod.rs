//! Scheduler service module.
//!
//! Every thread sits in the ready queue of its priority from creation on. On each timer
//! interrupt the platform trampoline saves the registers of the running thread into its context,
//! calls [`kernel_switch_thread_context`] and restores the registers from the context published
//! in [`CURRENT_THREAD_CONTEXT`].
//!
//! # Thread selection
//!
//! | Running thread | Selected thread |
//! | -------------- | --------------- |
//! | none yet | front of the highest non-empty queue |
//! | has a successor in its queue | that successor |
//! | last of its queue | front of the highest non-empty queue |
//!
//! The idle thread (priority 0) guarantees that some queue is non-empty once the scheduler is
//! started.
//!
//! # API Usage
//!
//! The global functions below operate on the kernel's single [`ProcessManager`] with the
//! interrupts of the hart disabled, so they are safe to call from normal kernel code while the
//! timer is armed. [`kernel_switch_thread_context`] must only be called by the trampoline.
//!
//! [`CURRENT_THREAD_CONTEXT`]: crate::arch::CURRENT_THREAD_CONTEXT

mod ready_queue;
mod scheduler;

// Re-export all.
pub use ready_queue::*;
pub use scheduler::*;

use crate::arch::{self, Arch, PlatformArch};
use crate::base::sync::IrqCell;
use crate::proc::{ProcessHandle, ThreadHandle, ThreadMain};


/// The kernel's process manager.
static PROCESS_MANAGER: IrqCell<ProcessManager<PlatformArch>, PlatformArch> = IrqCell::new(ProcessManager::new());


/// Create a process with a main thread and make that thread ready.
pub fn create_process(name: &str, main_thread_priority: u32, entry: ThreadMain) -> ProcessHandle {
    PROCESS_MANAGER.with(|pm| pm.create_process(name, main_thread_priority, entry))
}

/// Add a thread to an existing process and make it ready.
pub fn add_thread(process: ProcessHandle, entry: ThreadMain, priority: u32, parameter: usize) -> ThreadHandle {
    PROCESS_MANAGER.with(|pm| pm.add_thread(process, entry, priority, parameter))
}

/// Run `f` on the kernel's process manager, e.g. to look up a process by its handle.
pub fn with_process_manager<R, F>(f: F) -> R
    where F: FnOnce(&ProcessManager<PlatformArch>) -> R {
    PROCESS_MANAGER.with(|pm| f(&*pm))
}

/// Start scheduling: create the idle process, arm the timer, then halt. The boot flow never
/// resumes, the first timer interrupt switches to the selected thread.
pub fn start_scheduler() -> ! {
    PROCESS_MANAGER.with(|pm| pm.prepare_scheduler());
    loop {
        PlatformArch::halt_processor();
    }
}

/// Context-switch entry of the interrupt trampoline. Selects the next thread and publishes its
/// context in [`CURRENT_THREAD_CONTEXT`] for the trampoline to restore.
///
/// [`CURRENT_THREAD_CONTEXT`]: crate::arch::CURRENT_THREAD_CONTEXT
#[no_mangle]
pub extern "C" fn kernel_switch_thread_context() {
    PROCESS_MANAGER.with(|pm| arch::publish_context(pm.switch_thread_context()));
}
