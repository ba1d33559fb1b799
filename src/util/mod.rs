//! Small helpers shared by the scheduler modules.

pub(crate) mod align;
