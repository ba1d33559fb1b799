//! Low level primitives shared by the scheduler: interrupt masking and the cell holding the
//! global kernel state.

pub(crate) mod irq;
pub(crate) mod sync;
