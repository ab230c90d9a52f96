//! Free-function forms of the chain operations
//!
//! These mirror the methods on [`ChainError`] for call sites that read better
//! as `wrap(err, "note")` than as `err.wrap("note")`.

use std::borrow::Cow;
use std::panic::Location;

use crate::core::error::ChainError;
use crate::core::leaf::LeafError;

/// Wrap `cause` with a note and the caller's location
///
/// `None` stays `None`: there is nothing to annotate.
#[track_caller]
pub fn wrap<E>(cause: Option<E>, note: impl Into<Cow<'static, str>>) -> Option<ChainError>
where
    E: Into<ChainError>,
{
    let location = Location::caller();
    cause.map(|cause| {
        let cause: ChainError = cause.into();
        cause.wrap_at(note.into(), location)
    })
}

/// Record the caller's location on `cause` without a note
///
/// `None` stays `None`, as with [`wrap`].
#[track_caller]
pub fn with_location<E>(cause: Option<E>) -> Option<ChainError>
where
    E: Into<ChainError>,
{
    let location = Location::caller();
    cause.map(|cause| {
        let cause: ChainError = cause.into();
        cause.located_at(location)
    })
}

/// The immediate cause of `err`, `None` at the root
#[must_use]
pub fn unwrap(err: &ChainError) -> Option<&ChainError> {
    err.cause()
}

/// Whether `target` appears anywhere in the chain of `err`
#[must_use]
pub fn is(err: &ChainError, target: &LeafError) -> bool {
    err.is(target)
}

/// One line per node, outermost first
#[must_use]
pub fn render(err: &ChainError) -> String {
    err.render()
}
