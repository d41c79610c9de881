#![forbid(unsafe_code)]

//! Logging shim.
//!
//! With the `tracing` feature the usual macros are re-exported; without it
//! they expand to nothing. Call sites use `logging::debug!(...)` either way.

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace, warn};

// Defined under distinct names: a local `warn` macro clashes with the
// builtin `#[warn]` attribute when re-exported.
#[cfg(not(feature = "tracing"))]
mod noop_macros {
    macro_rules! noop_debug {
        ($($arg:tt)*) => {};
    }

    macro_rules! noop_trace {
        ($($arg:tt)*) => {};
    }

    macro_rules! noop_warn {
        ($($arg:tt)*) => {};
    }

    #[allow(unused_imports)]
    pub(crate) use noop_debug as debug;
    #[allow(unused_imports)]
    pub(crate) use noop_trace as trace;
    #[allow(unused_imports)]
    pub(crate) use noop_warn as warn;
}

#[cfg(not(feature = "tracing"))]
#[allow(unused_imports)]
pub(crate) use noop_macros::{debug, trace, warn};
