#![forbid(unsafe_code)]

//! Logging support.
//!
//! With the `tracing` feature the controller logs through `tracing`; this
//! module re-exports the macros it uses. Without the feature, no-op macros
//! with the same names keep every call site compiling at zero cost.

#[cfg(feature = "tracing")]
pub use tracing::{debug, info, trace, warn};

// When tracing is not enabled, provide no-op macros
#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op info macro when tracing is disabled.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op warn macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}

// Macros are exported at crate root via #[macro_export]; with the feature on,
// lib.rs re-exports the tracing macros at the same paths.
