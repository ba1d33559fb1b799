//! Provides some helper methods to do alignment.


/// Returns the **aligned** value of `val`. This function aligns value by rounding down, it will
/// simply set the least `order` bits to zero. So the returned value will always be **not greater
/// than** the `val`.
///
/// All alignments must be made as a power of two.
pub const fn align_val_down(val: usize, order: usize) -> usize {
    let o = (1usize << order) - 1;
    val & !o
}
