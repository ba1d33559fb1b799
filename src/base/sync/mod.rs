mod irq_cell;

pub(crate) use irq_cell::IrqCell;
