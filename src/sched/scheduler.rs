//! The process manager: owner of all processes and of the ready queues, and the thread
//! selection run on every context switch request.

use crate::arch::Arch;
use crate::config::{IDLE_PROCESS_NAME, IDLE_THREAD_PRIORITY};
use crate::proc::{idle_thread_main, HandleArena, Process, ProcessHandle, ProcessKind, Thread, ThreadHandle, ThreadMain};
use super::ready_queue::{ReadyCursor, ReadyQueueSet};


pub struct ProcessManager<A: Arch> {
    processes: HandleArena<Process<A>, ProcessKind>,
    ready: ReadyQueueSet,
    /// Entry of the running thread in `ready`, `None` before the first switch.
    running: Option<ReadyCursor>,
    idle_process: Option<ProcessHandle>,
}

impl<A: Arch> ProcessManager<A> {
    pub const fn new() -> Self {
        Self {
            processes: HandleArena::new(),
            ready: ReadyQueueSet::new(),
            running: None,
            idle_process: None,
        }
    }

    /// Create a process with one main thread (parameter `0`) and make that thread ready.
    pub fn create_process(&mut self, name: &str, main_thread_priority: u32, entry: ThreadMain) -> ProcessHandle {
        // Build the thread first: a process never exists without its main thread.
        let thread = Thread::new(entry, main_thread_priority, 0);
        let handle = self.processes.push(Process::new(name));
        info!("Create process '{}' ({:?}), main thread priority {}.", name, handle, main_thread_priority);
        self.attach_thread(handle, thread);
        handle
    }

    /// Add a thread to `process` and make it ready to run.
    pub fn add_thread(&mut self, process: ProcessHandle, entry: ThreadMain, priority: u32, parameter: usize) -> ThreadHandle {
        let thread = Thread::new(entry, priority, parameter);
        self.attach_thread(process, thread)
    }

    fn attach_thread(&mut self, process: ProcessHandle, thread: Thread<A>) -> ThreadHandle {
        let priority = thread.priority();
        let handle = ThreadHandle {
            process,
            thread: self.processes.get_mut(process).push_thread(thread),
        };
        debug!("Add thread {:?} of process {:?}, priority {}.", handle.thread, process, priority);
        self.add_ready_thread(handle);
        handle
    }

    /// Append the thread to the ready queue of its priority.
    pub(crate) fn add_ready_thread(&mut self, handle: ThreadHandle) {
        let priority = self.thread(handle).priority() as usize;
        let cursor = self.ready.push(priority, handle);
        debug!("Thread {:?} ready at {:?}.", handle, cursor);
    }

    /// Create the idle process and arm the scheduling timer. The first timer interrupt then
    /// switches to the first selected thread.
    pub(crate) fn prepare_scheduler(&mut self) {
        kassert!(self.idle_process.is_none(), "Scheduler already started.");
        self.idle_process = Some(self.create_process(IDLE_PROCESS_NAME, IDLE_THREAD_PRIORITY, idle_thread_main::<A>));
        A::setup_scheduler_timer();
        info!("Scheduler started, {} thread(s) ready.", self.ready.len());
    }

    /// Create the idle process, arm the scheduling timer and halt until the first interrupt.
    pub fn start_scheduler(&mut self) {
        self.prepare_scheduler();
        A::halt_processor();
    }

    /// Pick the thread to run next.
    ///
    /// Threads of the same priority take turns: the entry after the running one in its queue
    /// wins. When the running thread is the last of its queue (or nothing runs yet), the front of
    /// the highest non-empty queue wins, which is not necessarily the running thread's queue.
    pub fn select_next_thread(&self) -> ReadyCursor {
        let next = self.running
            .and_then(|running| self.ready.successor(running))
            .or_else(|| self.ready.first_non_empty());

        match next {
            Some(cursor) => cursor,
            None => kpanic!("No thread to switch to."),
        }
    }

    /// Select the next thread, record it as running and return the address of its context. The
    /// trampoline restores from that address and saves into it on the next switch.
    pub fn switch_thread_context(&mut self) -> *mut A::Context {
        let next = self.select_next_thread();
        self.running = Some(next);
        let context = self.thread(self.ready.get(next)).context_ptr();
        trace!("Switch to {:?}, context @{:p}.", next, context);
        context
    }

    /// Resolve a process handle.
    #[inline]
    pub fn process(&self, handle: ProcessHandle) -> &Process<A> {
        self.processes.get(handle)
    }

    /// Resolve a thread handle.
    #[inline]
    pub fn thread(&self, handle: ThreadHandle) -> &Thread<A> {
        self.processes.get(handle.process).thread(handle.thread)
    }

    /// The thread created together with `process`.
    pub fn main_thread(&self, process: ProcessHandle) -> ThreadHandle {
        let (thread, _) = self.process(process).threads().next()
            .unwrap_or_else(|| kpanic!("Process {:?} has no thread.", process));
        ThreadHandle {
            process,
            thread,
        }
    }

    /// The thread selected by the last switch.
    pub fn running_thread(&self) -> Option<ThreadHandle> {
        self.running.map(|cursor| self.ready.get(cursor))
    }

    /// Ready queue entry of the running thread.
    #[inline]
    pub fn running_cursor(&self) -> Option<ReadyCursor> {
        self.running
    }

    pub fn idle_process(&self) -> Option<ProcessHandle> {
        self.idle_process
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.idle_process.is_some()
    }

    #[inline]
    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    /// Processes in creation order.
    pub fn processes(&self) -> impl Iterator<Item = (ProcessHandle, &Process<A>)> + '_ {
        self.processes.iter()
    }

    /// Threads ready at `priority`, in insertion order.
    pub fn ready_threads(&self, priority: u32) -> &[ThreadHandle] {
        self.ready.slot(priority as usize)
    }
}
