//! RISC-V (S-mode) platform: CSR access, `wfi` halt, `stimecmp` timer and the thread context
//! layout restored by the interrupt trampoline.

use core::arch::asm;
use core::mem::size_of;
use super::Arch;
use crate::config::TIMER_INTERVAL_TICKS;


/// `x1`: return address, the thread exit handler.
pub const REG_RA: usize = 1;
/// `x2`: stack pointer.
pub const REG_SP: usize = 2;
/// `x10`: first argument, the thread parameter.
pub const REG_A0: usize = 10;


/// Saved context of a thread. The trampoline stores `x0`~`x31` followed by the resume `pc`.
#[repr(C)]
#[derive(Copy, Clone)]
pub struct ThreadContext {
    // 0 - 255
    pub regs: [usize; 32],
    // 256
    pub pc: usize,
}

// The trampoline hard-codes the offset of `pc`.
sa::const_assert_eq!(size_of::<ThreadContext>(), 33 * size_of::<usize>());
sa::const_assert!(REG_RA < 32 && REG_SP < 32 && REG_A0 < 32);

impl Default for ThreadContext {
    fn default() -> Self {
        Self {
            regs: [0; 32],
            pc: 0,
        }
    }
}


/// `sstatus.SIE`: supervisor interrupt enable.
pub const SSTATUS_SIE_BIT: usize = 1 << 1;
/// `sie.STIE`: supervisor timer interrupt enable.
pub const SIE_STIE_BIT: usize = 1 << 5;

////////////////// Supervisor CSRs R/W ////////////////////

/// Clear `sstatus.SIE` and return the old `sstatus` value.
pub fn sstatus_cli_save() -> usize {
    unsafe {
        let rval;
        asm!("csrrci {}, sstatus, 2", out(reg) rval);
        rval
    }
}

/// Set `sstatus.SIE` back if it is set in `flags`.
pub fn sstatus_restore_sie(flags: usize) {
    unsafe {
        asm!("csrs sstatus, {}", in(reg) flags & SSTATUS_SIE_BIT);
    }
}

pub fn sie_read() -> usize {
    unsafe {
        let rval;
        asm!("csrr {}, sie", out(reg) rval);
        rval
    }
}

pub fn sie_write(val: usize) {
    unsafe {
        asm!("csrw sie, {}", in(reg) val);
    }
}

pub fn read_time() -> usize {
    unsafe {
        let rval;
        asm!("csrr {}, time", out(reg) rval);
        rval
    }
}

/// Program the next timer interrupt `delta` ticks from now (Sstc extension).
pub fn stimecmp_write_delta(delta: usize) {
    let next = read_time() + delta;
    unsafe {
        asm!("csrw stimecmp, {}", in(reg) next);
    }
}


/// The RISC-V platform.
pub struct Riscv;

impl Arch for Riscv {
    type Context = ThreadContext;

    fn init_thread_context(ctx: &mut ThreadContext, stack_top: usize, entry: usize, exit: usize, param: usize) {
        *ctx = ThreadContext::default();
        ctx.pc = entry;
        ctx.regs[REG_SP] = stack_top;
        ctx.regs[REG_RA] = exit;
        ctx.regs[REG_A0] = param;
    }

    fn setup_scheduler_timer() {
        stimecmp_write_delta(TIMER_INTERVAL_TICKS);
        sie_write(sie_read() | SIE_STIE_BIT);
    }

    fn halt_processor() {
        unsafe {
            asm!("wfi");
        }
    }

    fn irq_save() -> usize {
        sstatus_cli_save()
    }

    fn irq_restore(flags: usize) {
        sstatus_restore_sie(flags);
    }

    fn console_write(s: &str) {
        for b in s.bytes() {
            sbi_console_putchar(b);
        }
    }
}

/// Legacy SBI `console_putchar` (EID 0x01).
fn sbi_console_putchar(c: u8) {
    unsafe {
        asm!("ecall", inlateout("a0") c as usize => _, in("a7") 0x01usize);
    }
}
