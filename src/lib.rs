//! Process and thread scheduling core of the kernel.
//!
//! The [`ProcessManager`] owns every process and thread, keeps one ready queue per priority
//! level and picks the thread whose saved context the interrupt trampoline resumes next.
//! Everything platform-specific (register layout, timer, halt, console) lives behind the
//! [`Arch`] trait.
//!
//! All invariant violations are fatal: they are reported through `log` and then panic, the
//! kernel's panic handler stops the hart.
//!
//! [`ProcessManager`]: sched::ProcessManager
//! [`Arch`]: arch::Arch

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;
extern crate static_assertions as sa;
extern crate alloc;

#[macro_use]
mod macros;
mod util;

pub mod config;
pub mod arch;
mod base;
pub mod logk;
pub mod proc;
pub mod sched;

// Re-export the public surface.
pub use proc::{Handle, ProcessHandle, ThreadHandle, ThreadMain};
pub use sched::ProcessManager;
