//! Thread object: a saved context plus the stack it runs on.

use alloc::boxed::Box;
use alloc::vec;
use core::cell::UnsafeCell;
use crate::arch::Arch;
use crate::config::{DEFAULT_THREAD_STACK_SIZE, MAX_THREAD_PRIORITY, STACK_ALIGN_ORDER};
use crate::util::align::align_val_down;


/// Thread entry function signature. The function receives the parameter given at creation.
pub type ThreadMain = extern "C" fn(usize);


/// A schedulable thread.
///
/// The context is boxed so its address stays the same for the thread's whole life: the address
/// is what the scheduler publishes to the trampoline. The trampoline writes the saved registers
/// through that address, hence the `UnsafeCell`.
pub struct Thread<A: Arch> {
    priority: u32,
    context: Box<UnsafeCell<A::Context>>,
    stack: Box<[u8]>,
}

impl<A: Arch> Thread<A> {
    /// Allocate the stack and build the first context so that the thread starts in `entry` with
    /// `parameter`, and lands in the exit handler if `entry` ever returns.
    pub(crate) fn new(entry: ThreadMain, priority: u32, parameter: usize) -> Self {
        kassert!(priority <= MAX_THREAD_PRIORITY, "Invalid thread priority {}.", priority);

        let stack = vec![0u8; DEFAULT_THREAD_STACK_SIZE].into_boxed_slice();
        let mut context = Box::new(UnsafeCell::new(A::Context::default()));
        let stack_top = stack_top_of(&stack);
        A::init_thread_context(
            context.get_mut(),
            stack_top,
            entry as *const () as usize,
            exit_handler_addr(),
            parameter);

        Self {
            priority,
            context,
            stack,
        }
    }

    #[inline(always)]
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// The saved context.
    ///
    /// The trampoline only writes the context from interrupt context, and the kernel's manager is
    /// only reachable with interrupts masked, so no write can overlap the returned borrow.
    #[inline(always)]
    pub fn context(&self) -> &A::Context {
        // SAFETY: see above, writes through `context_ptr` never overlap a shared borrow.
        unsafe { &*self.context.get() }
    }

    /// Address of the saved context, as published to the trampoline. It never changes.
    #[inline(always)]
    pub fn context_ptr(&self) -> *mut A::Context {
        self.context.get()
    }

    /// Initial stack pointer of the thread.
    pub fn stack_top(&self) -> usize {
        stack_top_of(&self.stack)
    }

    #[inline(always)]
    pub fn stack_size(&self) -> usize {
        self.stack.len()
    }
}


/// Stack is growing from high to low address.
fn stack_top_of(stack: &[u8]) -> usize {
    align_val_down(stack.as_ptr() as usize + stack.len(), STACK_ALIGN_ORDER)
}

/// Return address of every thread. Threads are not allowed to finish.
extern "C" fn on_thread_exit() -> ! {
    thread_exited()
}

fn thread_exited() -> ! {
    kpanic!("Exit unexpected.")
}

/// Address of the exit handler, as written into a new context.
pub fn exit_handler_addr() -> usize {
    on_thread_exit as *const () as usize
}
