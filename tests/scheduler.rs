//! Scheduling scenarios driven through the public API on the hosted platform.

use ksched::arch::hosted::Hosted;
use ksched::config::{IDLE_PROCESS_NAME, MAX_THREAD_PRIORITY};
use ksched::{ProcessManager, ThreadHandle};

extern "C" fn entry_a(_: usize) {}
extern "C" fn entry_b(_: usize) {}

fn next(pm: &mut ProcessManager<Hosted>) -> ThreadHandle {
    pm.switch_thread_context();
    pm.running_thread().expect("running thread after a switch")
}

#[test]
fn two_processes_same_priority_alternate() {
    let mut pm = ProcessManager::<Hosted>::new();
    let a = pm.create_process("A", 3, entry_a);
    let b = pm.create_process("B", 3, entry_b);
    pm.start_scheduler();

    let (a, b) = (pm.main_thread(a), pm.main_thread(b));
    let idle = pm.main_thread(pm.idle_process().unwrap());
    assert_eq!(pm.thread(idle).priority(), 0);

    let picks: Vec<_> = (0..6).map(|_| next(&mut pm)).collect();
    assert_eq!(picks, [a, b, a, b, a, b]);
    assert!(!picks.contains(&idle), "idle must not run while slot 3 is ready");
}

#[test]
fn process_at_priority_zero_before_start() {
    let mut pm = ProcessManager::<Hosted>::new();
    let early = pm.create_process("early", 0, entry_a);
    pm.start_scheduler();

    let early = pm.main_thread(early);
    let idle = pm.main_thread(pm.idle_process().unwrap());
    assert_eq!(pm.ready_threads(0), &[early, idle]);

    // First selection picks the front of slot 0.
    assert_eq!(next(&mut pm), early);
    assert_eq!(next(&mut pm), idle);
    assert_eq!(next(&mut pm), early);
}

#[test]
fn three_threads_rotate_then_reset() {
    let mut pm = ProcessManager::<Hosted>::new();
    let p = pm.create_process("worker", 6, entry_a);
    let a = pm.main_thread(p);
    let b = pm.add_thread(p, entry_b, 6, 1);
    let c = pm.add_thread(p, entry_b, 6, 2);
    pm.start_scheduler();
    assert_eq!(pm.ready_threads(6), &[a, b, c]);

    assert_eq!(next(&mut pm), a);
    assert_eq!(next(&mut pm), b);
    assert_eq!(next(&mut pm), c);
    // Slot 6 is still the highest non-empty one.
    assert_eq!(next(&mut pm), a);
}

#[test]
fn higher_slot_takes_precedence() {
    let mut pm = ProcessManager::<Hosted>::new();
    let low = pm.create_process("low", 1, entry_a);
    pm.start_scheduler();
    let low = pm.main_thread(low);
    assert_eq!(next(&mut pm), low);

    let high = pm.create_process("high", 5, entry_b);
    let high = pm.main_thread(high);
    assert_eq!(next(&mut pm), high);
    assert_eq!(pm.running_cursor().unwrap().priority, 5);
}

#[test]
fn handles_resolve_to_the_same_entry() {
    let mut pm = ProcessManager::<Hosted>::new();
    let p = pm.create_process("svc", MAX_THREAD_PRIORITY, entry_a);
    let t = pm.add_thread(p, entry_b, 2, 0x1234);
    pm.start_scheduler();

    let first = pm.thread(t) as *const _;
    let second = pm.thread(t) as *const _;
    assert_eq!(first, second);
    assert_eq!(pm.thread(t).context().param, 0x1234);
    assert_eq!(pm.thread(t).context().entry, entry_b as *const () as usize);
    assert_eq!(pm.process(p).name(), "svc");
    assert_eq!(pm.process(p).thread_count(), 2);

    let names: Vec<_> = pm.processes().map(|(_, p)| p.name().to_owned()).collect();
    assert_eq!(names, ["svc", IDLE_PROCESS_NAME]);
    assert_eq!(pm.process_count(), 2);
}

#[test]
#[should_panic(expected = "Invalid thread priority")]
fn process_above_max_priority_is_fatal() {
    let mut pm = ProcessManager::<Hosted>::new();
    pm.create_process("bad", MAX_THREAD_PRIORITY + 1, entry_a);
}

#[test]
fn start_arms_the_timer_and_halts() {
    let mut pm = ProcessManager::<Hosted>::new();
    let halts = Hosted::halt_count();
    pm.start_scheduler();
    assert!(Hosted::timer_armed());
    // Other tests of this binary halt concurrently.
    assert!(Hosted::halt_count() > halts);
    assert_eq!(pm.process(pm.idle_process().unwrap()).name(), IDLE_PROCESS_NAME);
}

#[test]
#[should_panic(expected = "Scheduler already started")]
fn starting_twice_is_fatal() {
    let mut pm = ProcessManager::<Hosted>::new();
    pm.start_scheduler();
    pm.start_scheduler();
}
