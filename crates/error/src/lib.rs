//! # Faultline Error
//!
//! Two independent tools for failures:
//!
//! - **Fault isolation** ([`barrier`]): run an operation so that a panic
//!   inside it, at any depth, comes back as a [`Fault`] value instead of
//!   unwinding further.
//! - **Error context chains** ([`core`](crate::core)): wrap an error with a note and the
//!   call site each time it crosses a layer, keep the original failure
//!   reachable, and render the whole path at the top.
//!
//! ## Quick Start
//!
//! ```rust
//! use faultline_error::prelude::*;
//!
//! fn find_user(id: u32) -> Result<String> {
//!     Err(RECORD_NOT_FOUND.err()).wrap_err_with(|| format!("finding user {id}"))
//! }
//!
//! fn handler() -> Result<String> {
//!     find_user(42).wrap_err("GET /users/42")
//! }
//!
//! let err = handler().unwrap_err();
//! assert!(err.is(&RECORD_NOT_FOUND));
//! assert_eq!(err.render().lines().count(), 3);
//!
//! // A panic below a barrier is recovered, not propagated.
//! let fault = isolate(|| -> i64 { panic!("v2 bigger than v1") }).unwrap_err();
//! assert_eq!(fault.message(), "v2 bigger than v1");
//! ```
//!
//! ## Reporting
//!
//! Barriers report absorbed panics through `tracing` (default level `WARN`).
//! The crate never installs a subscriber.

pub mod barrier;
pub mod core;
pub mod macros;

/// Chain node type
pub use self::core::ChainError;

/// Result type alias for `Result<T, ChainError>`
pub use self::core::Result;

/// Extension trait adding `wrap_err` to any Result
pub use self::core::ResultExt;

/// Leaf errors and the built-in sentinels
pub use self::core::{LeafError, PANICKED, RECORD_NOT_FOUND, Sentinel, UNKNOWN};

/// Capability traits
pub use self::core::{HasCause, HasLocation, HasMessage};

/// Reporting snapshots
pub use self::core::{Frame, SourceLocation};

/// Fault isolation
pub use barrier::{Barrier, BarrierConfig, Fault, ReportLevel, isolate, try_isolate};

/// Everything needed at a typical call site
pub mod prelude {
    pub use super::{
        Barrier, BarrierConfig, ChainError, Fault, HasMessage, PANICKED, RECORD_NOT_FOUND,
        ReportLevel, Result, ResultExt, Sentinel, UNKNOWN, isolate, try_isolate,
    };

    pub use crate::{bail, ensure, leaf_error, sentinel};
}
