//! Fault isolation barriers
//!
//! A barrier runs an operation and stops any panic raised inside it, at any
//! depth, from unwinding past the barrier's call site. The panic becomes a
//! [`Fault`] value, is reported through `tracing`, and is handed back to the
//! caller as `Err`. Nothing is re-raised unless asked for.
//!
//! Barriers nest by scope only. A panic is always absorbed by the innermost
//! enclosing barrier; outer barriers never see it.
//!
//! ```rust
//! use faultline_error::barrier::{isolate, Barrier};
//!
//! let outer = isolate(|| {
//!     let inner = Barrier::new().label("parser").run(|| -> u32 { panic!("bad byte") });
//!     assert_eq!(inner.unwrap_err().message(), "bad byte");
//!     7
//! });
//! assert_eq!(outer.unwrap(), 7);
//! ```
//!
//! Barriers rely on unwinding. In a build with `panic = "abort"` the process
//! ends before any barrier runs.
//!
//! The operation is run under `AssertUnwindSafe`. State it borrowed mutably
//! may be left half-updated when it panics.

mod config;
mod fault;

use std::fmt;
use std::panic::{self, AssertUnwindSafe, Location};

pub use config::{ANONYMOUS, BarrierConfig, ParseReportLevelError, ReportLevel};
pub use fault::Fault;

use crate::core::error::ChainError;
use crate::core::result::Result;

type ExitHandler<'h> = Box<dyn FnOnce(Option<&Fault>) + 'h>;

/// A configurable fault isolation barrier
///
/// Built fluently, then consumed by [`run`](Self::run) or
/// [`try_run`](Self::try_run).
pub struct Barrier<'h> {
    config: BarrierConfig,
    on_exit: Option<ExitHandler<'h>>,
}

impl<'h> Barrier<'h> {
    /// Barrier with the default configuration: absorb, report at `WARN`
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(BarrierConfig::default())
    }

    /// Barrier built from an existing configuration
    #[must_use]
    pub fn from_config(config: BarrierConfig) -> Self {
        Self {
            config,
            on_exit: None,
        }
    }

    /// Name reported with, and attached to, every fault
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = Some(label.into());
        self
    }

    /// Level of the report for absorbed faults
    #[must_use]
    pub fn level(mut self, level: ReportLevel) -> Self {
        self.config.level = level;
        self
    }

    /// Report, then re-raise the original panic instead of returning it
    #[must_use]
    pub fn propagate(mut self) -> Self {
        self.config.propagate = true;
        self
    }

    /// Handler run exactly once when the barrier's scope is left, with the
    /// fault if there was one
    ///
    /// It runs after the fault is reported and before it is re-raised by a
    /// [`propagate`](Self::propagate) barrier.
    #[must_use]
    pub fn on_exit(mut self, handler: impl FnOnce(Option<&Fault>) + 'h) -> Self {
        self.on_exit = Some(Box::new(handler));
        self
    }

    /// Current configuration
    #[must_use]
    pub fn config(&self) -> &BarrierConfig {
        &self.config
    }

    /// Run `operation`, turning a panic inside it into `Err(Fault)`
    pub fn run<T, F>(self, operation: F) -> Result<T, Fault>
    where
        F: FnOnce() -> T,
    {
        let Self { config, on_exit } = self;
        let barrier = config.label.as_deref().unwrap_or(ANONYMOUS);
        let span = tracing::debug_span!("isolate", barrier);
        let _entered = span.enter();

        let result = panic::catch_unwind(AssertUnwindSafe(operation))
            .map_err(|payload| Fault::new(payload, config.label.clone()));

        match &result {
            Ok(_) => tracing::trace!("operation finished without a fault"),
            Err(fault) => config.level.report(fault),
        }

        if let Some(handler) = on_exit {
            handler(result.as_ref().err());
        }

        if config.propagate
            && let Err(fault) = result
        {
            tracing::debug!(barrier, "re-raising fault");
            fault.resume();
        }

        result
    }

    /// Run a fallible `operation`, folding its error and any panic into one
    /// [`ChainError`]
    ///
    /// A panic becomes [`Fault::into_error`] recorded at the caller's location.
    #[track_caller]
    pub fn try_run<T, E, F>(self, operation: F) -> Result<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<ChainError>,
    {
        let location = Location::caller();
        match self.run(operation) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => Err(error.into()),
            Err(fault) => Err(fault.into_error_at(location)),
        }
    }
}

impl Default for Barrier<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Barrier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Barrier")
            .field("config", &self.config)
            .field("on_exit", &self.on_exit.is_some())
            .finish()
    }
}

/// Run `operation` behind a default [`Barrier`]
pub fn isolate<T, F>(operation: F) -> Result<T, Fault>
where
    F: FnOnce() -> T,
{
    Barrier::new().run(operation)
}

/// Run a fallible `operation` behind a default [`Barrier`]; see
/// [`Barrier::try_run`]
#[track_caller]
pub fn try_isolate<T, E, F>(operation: F) -> Result<T>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<ChainError>,
{
    Barrier::new().try_run(operation)
}
