// Kernel assertion macros.

/// Report a fatal kernel error: the diagnostic is logged, then the kernel panics.
#[macro_export]
macro_rules! kpanic {
    ($($args:tt)+) => {{
        ::log::error!("Kernel assertion failed: {}", format_args!($($args)+));
        panic!("Kernel assertion failed: {}", format_args!($($args)+))
    }};
}

/// Check a scheduler invariant, [`kpanic!`] when it does not hold. There is no way to continue
/// scheduling with a broken invariant.
///
/// ```ignore
/// kassert!(priority <= MAX_THREAD_PRIORITY, "Invalid thread priority {}.", priority);
/// ```
#[macro_export]
macro_rules! kassert {
    ($cond:expr $(,)?) => {
        $crate::kassert!($cond, "{}", stringify!($cond))
    };
    ($cond:expr, $($args:tt)+) => {
        if !$cond {
            $crate::kpanic!($($args)+);
        }
    };
}
