//! Recording platform for the unit tests. State is thread local so tests running in parallel do
//! not see each other.

use std::cell::{Cell, RefCell};
use super::Arch;
use super::hosted::HostedContext;


thread_local! {
    static TIMER_ARMED: Cell<usize> = Cell::new(0);
    static HALTS: Cell<usize> = Cell::new(0);
    static IRQ_ENABLED: Cell<bool> = Cell::new(true);
    static CONSOLE: RefCell<String> = RefCell::new(String::new());
}

pub(crate) struct MockArch;

impl MockArch {
    pub fn timer_armed() -> usize {
        TIMER_ARMED.with(|c| c.get())
    }

    pub fn halts() -> usize {
        HALTS.with(|c| c.get())
    }

    pub fn irq_enabled() -> bool {
        IRQ_ENABLED.with(|c| c.get())
    }

    pub fn console() -> String {
        CONSOLE.with(|c| c.borrow().clone())
    }
}

impl Arch for MockArch {
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
        TIMER_ARMED.with(|c| c.set(c.get() + 1));
    }

    fn halt_processor() {
        HALTS.with(|c| c.set(c.get() + 1));
    }

    fn irq_save() -> usize {
        IRQ_ENABLED.with(|c| c.replace(false)) as usize
    }

    fn irq_restore(flags: usize) {
        IRQ_ENABLED.with(|c| c.set(flags != 0));
    }

    fn console_write(s: &str) {
        CONSOLE.with(|c| c.borrow_mut().push_str(s));
    }
}
