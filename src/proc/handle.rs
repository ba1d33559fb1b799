//! Opaque handles naming processes and threads.
//!
//! A handle is an index into an append-only `HandleArena`. Entries are never removed, so every
//! handle issued by an arena stays valid for the lifetime of that arena. Each entity kind has its
//! own handle type, a thread handle can not be presented where a process handle is expected.

use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;


/// Handle kind of [`Process`](super::Process) entries.
pub enum ProcessKind {}

/// Handle kind of [`Thread`](super::Thread) entries.
pub enum ThreadKind {}

/// Strongly typed index into a `HandleArena`. Only the arena creates handles, and the arena is
/// private to the crate, so a handle always names an existing entry.
///
/// ```compile_fail
/// use ksched::proc::{HandleArena, ProcessKind};
///
/// let mut arena = HandleArena::<(), ProcessKind>::new();
/// let _forged = arena.push(());
/// ```
///
/// ```compile_fail
/// use ksched::proc::{Handle, ProcessKind};
///
/// let _forged = Handle::<ProcessKind>::new(1);
/// ```
pub struct Handle<K> {
    index: u32,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Handle<K> {
    #[inline(always)]
    const fn new(index: u32) -> Self {
        Self {
            index,
            _kind: PhantomData,
        }
    }

    /// Position of the entry in its arena (creation order).
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.index as usize
    }
}

impl<K> Clone for Handle<K> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Handle<K> {}

impl<K> PartialEq for Handle<K> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<K> Eq for Handle<K> {}

impl<K> Hash for Handle<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<K> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle#{}", self.index)
    }
}

/// Handle of a process.
pub type ProcessHandle = Handle<ProcessKind>;

/// Handle of a thread: the owning process plus the thread's handle inside that process.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ThreadHandle {
    pub(crate) process: ProcessHandle,
    pub(crate) thread: Handle<ThreadKind>,
}

impl ThreadHandle {
    /// The process owning the thread.
    #[inline(always)]
    pub const fn process(self) -> ProcessHandle {
        self.process
    }

    /// Position of the thread inside its process (creation order).
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.thread.index()
    }
}


/// Append-only storage addressed by [`Handle`]. Entries never move between handles and are never
/// removed.
pub(crate) struct HandleArena<T, K> {
    entries: Vec<T>,
    _kind: PhantomData<fn() -> K>,
}

impl<T, K> HandleArena<T, K> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            _kind: PhantomData,
        }
    }

    /// Append `value` and return its handle.
    pub(crate) fn push(&mut self, value: T) -> Handle<K> {
        let index = self.entries.len();
        kassert!(index < u32::MAX as usize, "Handle arena is full.");
        self.entries.push(value);
        Handle::new(index as u32)
    }

    /// Resolve a handle issued by this arena.
    #[inline]
    pub(crate) fn get(&self, handle: Handle<K>) -> &T {
        &self.entries[handle.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle<K>) -> &mut T {
        &mut self.entries[handle.index()]
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the entries in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (Handle<K>, &T)> + '_ {
        self.entries.iter().enumerate().map(|(i, v)| (Handle::new(i as u32), v))
    }
}


#[cfg(test)]
mod tests {
    use super::{HandleArena, ProcessKind, ThreadKind};

    #[test]
    fn handles_follow_insertion_order() {
        let mut arena: HandleArena<&str, ProcessKind> = HandleArena::new();
        assert!(arena.is_empty());
        let a = arena.push("a");
        let b = arena.push("b");
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);

        let names: std::vec::Vec<_> = arena.iter().map(|(h, v)| (h, *v)).collect();
        assert_eq!(names, [(a, "a"), (b, "b")]);
    }

    #[test]
    fn resolving_is_stable() {
        let mut arena: HandleArena<u32, ThreadKind> = HandleArena::new();
        let h = arena.push(7);
        for _ in 0..16 {
            arena.push(0);
        }
        assert_eq!(*arena.get(h), 7);
        assert_eq!(*arena.get(h), 7);
        *arena.get_mut(h) = 8;
        assert_eq!(*arena.get(h), 8);
    }
}
