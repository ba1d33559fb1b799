//! Ready queues, one per priority level.
//!
//! Threads are appended when they are created and never leave their queue: there is no blocking
//! or exit, so a ready queue is also the complete list of threads of its priority.

use alloc::vec::Vec;
use crate::config::READY_QUEUE_COUNT;
use crate::proc::ThreadHandle;


/// Position of one entry inside the ready queue set.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReadyCursor {
    pub priority: usize,
    pub position: usize,
}

pub struct ReadyQueueSet {
    slots: [Vec<ThreadHandle>; READY_QUEUE_COUNT],
}

impl ReadyQueueSet {
    pub const fn new() -> Self {
        const EMPTY: Vec<ThreadHandle> = Vec::new();
        Self {
            slots: [EMPTY; READY_QUEUE_COUNT],
        }
    }

    /// Append `handle` to the tail of the queue of `priority`.
    pub fn push(&mut self, priority: usize, handle: ThreadHandle) -> ReadyCursor {
        kassert!(priority < self.slots.len(), "Ready queue {} out of bounds.", priority);
        let slot = &mut self.slots[priority];
        slot.push(handle);
        kassert!(!slot.is_empty());

        ReadyCursor {
            priority,
            position: slot.len() - 1,
        }
    }

    /// Threads of `priority` in insertion order.
    #[inline]
    pub fn slot(&self, priority: usize) -> &[ThreadHandle] {
        &self.slots[priority]
    }

    #[inline]
    pub fn get(&self, cursor: ReadyCursor) -> ThreadHandle {
        self.slots[cursor.priority][cursor.position]
    }

    /// The entry after `cursor` in the same queue, `None` if `cursor` is the last one.
    pub fn successor(&self, cursor: ReadyCursor) -> Option<ReadyCursor> {
        let next = cursor.position + 1;
        if next < self.slots[cursor.priority].len() {
            Some(ReadyCursor {
                priority: cursor.priority,
                position: next,
            })
        } else {
            None
        }
    }

    /// Front entry of the highest priority queue that is not empty.
    pub fn first_non_empty(&self) -> Option<ReadyCursor> {
        self.slots.iter()
            .rposition(|slot| !slot.is_empty())
            .map(|priority| ReadyCursor {
                priority,
                position: 0,
            })
    }

    /// Total number of ready threads.
    pub fn len(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }
}


#[cfg(test)]
mod tests {
    use super::{ReadyCursor, ReadyQueueSet};
    use crate::arch::mock::MockArch;
    use crate::config::READY_QUEUE_COUNT;
    use crate::proc::ThreadHandle;
    use crate::sched::ProcessManager;

    extern "C" fn worker(_: usize) {}

    /// Real handles to put in a standalone queue set.
    fn handles(n: usize) -> std::vec::Vec<ThreadHandle> {
        let mut pm = ProcessManager::<MockArch>::new();
        let p = pm.create_process("p", 0, worker);
        let mut v = std::vec![pm.main_thread(p)];
        while v.len() < n {
            v.push(pm.add_thread(p, worker, 0, 0));
        }
        v
    }

    #[test]
    fn push_appends_to_tail() {
        let h = handles(2);
        let mut set = ReadyQueueSet::new();
        assert!(set.is_empty());
        assert_eq!(set.push(4, h[0]), ReadyCursor { priority: 4, position: 0 });
        assert_eq!(set.push(4, h[1]), ReadyCursor { priority: 4, position: 1 });
        assert_eq!(set.slot(4), &[h[0], h[1]]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn successor_stops_at_the_end() {
        let h = handles(2);
        let mut set = ReadyQueueSet::new();
        let a = set.push(2, h[0]);
        let b = set.push(2, h[1]);
        assert_eq!(set.successor(a), Some(b));
        assert_eq!(set.get(b), h[1]);
        assert_eq!(set.successor(b), None);
    }

    #[test]
    fn first_non_empty_prefers_high_priority() {
        let h = handles(3);
        let mut set = ReadyQueueSet::new();
        assert_eq!(set.first_non_empty(), None);
        set.push(0, h[0]);
        assert_eq!(set.first_non_empty(), Some(ReadyCursor { priority: 0, position: 0 }));
        set.push(5, h[1]);
        set.push(3, h[2]);
        assert_eq!(set.first_non_empty(), Some(ReadyCursor { priority: 5, position: 0 }));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn push_out_of_bounds_is_fatal() {
        let h = handles(1);
        let mut set = ReadyQueueSet::new();
        set.push(READY_QUEUE_COUNT, h[0]);
    }
}
