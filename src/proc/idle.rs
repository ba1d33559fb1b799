//! System idle thread. It has the lowest priority, so it runs only when no other thread is
//! ready, and keeps the hart halted.

use crate::arch::Arch;
use crate::config::IDLE_HALTS_PER_HEARTBEAT;


/// Entry of the idle thread.
pub(crate) extern "C" fn idle_thread_main<A: Arch>(_: usize) {
    loop {
        idle_round::<A>();
    }
}

/// Halt a fixed number of times, then print a heartbeat.
fn idle_round<A: Arch>() {
    for _ in 0..IDLE_HALTS_PER_HEARTBEAT {
        A::halt_processor();
    }
    A::console_write(".");
}


#[cfg(test)]
mod tests {
    use super::idle_round;
    use crate::arch::mock::MockArch;
    use crate::config::IDLE_HALTS_PER_HEARTBEAT;

    #[test]
    fn heartbeat_after_each_round() {
        idle_round::<MockArch>();
        assert_eq!(MockArch::halts(), IDLE_HALTS_PER_HEARTBEAT);
        assert_eq!(MockArch::console(), ".");

        idle_round::<MockArch>();
        assert_eq!(MockArch::halts(), 2 * IDLE_HALTS_PER_HEARTBEAT);
        assert_eq!(MockArch::console(), "..");
    }
}
