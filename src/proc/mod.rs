//! Process and thread objects and the handles naming them.

mod handle;
mod idle;
mod process;
mod thread;

pub use handle::{Handle, ProcessHandle, ProcessKind, ThreadHandle, ThreadKind};
pub(crate) use handle::HandleArena;
pub use process::Process;
pub use thread::{exit_handler_addr, Thread, ThreadMain};
pub(crate) use idle::idle_thread_main;
