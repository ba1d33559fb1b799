//! Process object: a named owner of threads.

use alloc::string::String;
use super::handle::{Handle, HandleArena, ThreadKind};
use super::thread::Thread;
use crate::arch::Arch;


pub struct Process<A: Arch> {
    name: String,
    threads: HandleArena<Thread<A>, ThreadKind>,
}

impl<A: Arch> Process<A> {
    /// An empty process. The manager adds the main thread right after.
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
            threads: HandleArena::new(),
        }
    }

    pub(crate) fn push_thread(&mut self, thread: Thread<A>) -> Handle<ThreadKind> {
        self.threads.push(thread)
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    #[inline]
    pub fn thread(&self, handle: Handle<ThreadKind>) -> &Thread<A> {
        self.threads.get(handle)
    }

    /// Threads in creation order.
    pub fn threads(&self) -> impl Iterator<Item = (Handle<ThreadKind>, &Thread<A>)> + '_ {
        self.threads.iter()
    }
}
