//! Internal logging shim.
//!
//! With the `tracing` feature the macro forwards to `tracing::trace!`;
//! without it the invocation expands to nothing.

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {{}};
}
