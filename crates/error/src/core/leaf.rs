//! Leaf errors and process-wide sentinels

use std::borrow::Cow;
use std::ops::Deref;
use std::panic::Location;
use std::sync::{Arc, LazyLock};

use thiserror::Error;

use crate::core::error::ChainError;

/// An error with a message and no cause
///
/// Leaves are the roots of every chain. Inside a [`ChainError`] they are held
/// behind an `Arc`, and that allocation is their identity: two leaves with the
/// same text are still different errors.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LeafError {
    message: Cow<'static, str>,
    location: &'static Location<'static>,
}

impl LeafError {
    /// Create a leaf, recording the caller's location
    #[track_caller]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            location: Location::caller(),
        }
    }

    /// The leaf's message
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the leaf was created
    #[inline]
    #[must_use]
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

/// A well-known leaf error that call sites compare against by identity
///
/// Sentinels are created once, shared by every chain built on them and never
/// mutated. Declare them as statics with [`sentinel!`](crate::sentinel):
///
/// ```rust
/// use faultline_error::sentinel;
///
/// sentinel! {
///     /// The quota for the current tenant ran out.
///     pub static QUOTA_EXHAUSTED = "quota exhausted";
/// }
///
/// let err = QUOTA_EXHAUSTED.err().wrap("charging invoice");
/// assert!(err.is(&QUOTA_EXHAUSTED));
/// ```
#[derive(Debug, Clone)]
pub struct Sentinel(Arc<LeafError>);

impl Sentinel {
    /// Create a sentinel. Prefer the [`sentinel!`](crate::sentinel) macro.
    #[track_caller]
    pub fn new(message: &'static str) -> Self {
        Self(Arc::new(LeafError::new(message)))
    }

    /// A fresh chain rooted at this sentinel
    #[must_use]
    pub fn err(&self) -> ChainError {
        ChainError::from_leaf(Arc::clone(&self.0))
    }
}

impl Deref for Sentinel {
    type Target = LeafError;

    fn deref(&self) -> &LeafError {
        &self.0
    }
}

impl From<&Sentinel> for ChainError {
    fn from(sentinel: &Sentinel) -> Self {
        sentinel.err()
    }
}

/// Lookup by key found nothing.
pub static RECORD_NOT_FOUND: LazyLock<Sentinel> =
    LazyLock::new(|| Sentinel::new("record not found"));

/// Failure with no more specific classification.
pub static UNKNOWN: LazyLock<Sentinel> = LazyLock::new(|| Sentinel::new("unknown error"));

/// Root of every error produced from a captured panic.
pub static PANICKED: LazyLock<Sentinel> = LazyLock::new(|| Sentinel::new("operation panicked"));
