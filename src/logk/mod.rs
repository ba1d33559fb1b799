//! Kernel log utility interfaces.

use core::fmt::{self, Write};
use core::marker::PhantomData;
use log::{Log, Metadata, Record};
use crate::arch::Arch;


/// Init kernel log impl. The records are written to the platform console.
///
/// Only the first call installs a logger, later calls report the failure on the console.
pub fn init<A: Arch>() {
    let logger: &'static ConsoleLogger<A> = const { &ConsoleLogger::new() };
    match log::set_logger(logger) {
        Ok(_) => { log::set_max_level(log::LevelFilter::Trace); }
        Err(_) => { A::console_write("Init set logger failed!\n"); }
    }
}


/// `core::fmt::Write` adapter over the platform console.
pub struct Console<A: Arch>(PhantomData<A>);

impl<A: Arch> Console<A> {
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<A: Arch> Write for Console<A> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        A::console_write(s);
        Ok(())
    }
}


pub struct ConsoleLogger<A: Arch> {
    _arch: PhantomData<A>,
}

impl<A: Arch> ConsoleLogger<A> {
    pub const fn new() -> Self {
        Self {
            _arch: PhantomData,
        }
    }
}

// The logger holds no data.
unsafe impl<A: Arch> Sync for ConsoleLogger<A> {}
unsafe impl<A: Arch> Send for ConsoleLogger<A> {}

impl<A: Arch> Log for ConsoleLogger<A> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::Level::Trace
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            write_record(&mut Console::<A>::new(), record);
        }
    }

    fn flush(&self) {}
}

/// Format one record: errors and warnings carry the source location.
fn write_record<W: Write>(out: &mut W, record: &Record) {
    let _ = if record.level() < log::Level::Info {
        writeln!(out, "[{}][{}:{}]: {}",
            record.level(),
            record.file().unwrap_or("<NONE>"),
            record.line().unwrap_or_default(),
            record.args())
    } else {
        writeln!(out, "[{}]: {}", record.level(), record.args())
    };
}
