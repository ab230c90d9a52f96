//! Result type and context extension traits

use std::borrow::Cow;
use std::panic::Location;

use crate::core::error::ChainError;

/// Result type whose error defaults to [`ChainError`]
pub type Result<T, E = ChainError> = std::result::Result<T, E>;

/// Extension trait for adding context to Results
///
/// `Ok` values pass through untouched: wrapping the absence of an error
/// never produces one.
pub trait ResultExt<T> {
    /// Wrap the error with a note, recording the caller's location
    fn wrap_err<N>(self, note: N) -> Result<T>
    where
        N: Into<Cow<'static, str>>;

    /// Like [`wrap_err`](Self::wrap_err), building the note only on error
    fn wrap_err_with<N, F>(self, f: F) -> Result<T>
    where
        N: Into<Cow<'static, str>>,
        F: FnOnce() -> N;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ChainError>,
{
    #[track_caller]
    fn wrap_err<N>(self, note: N) -> Result<T>
    where
        N: Into<Cow<'static, str>>,
    {
        match self {
            Ok(value) => Ok(value),
            Err(error) => {
                let location = Location::caller();
                let error: ChainError = error.into();
                Err(error.wrap_at(note.into(), location))
            }
        }
    }

    #[track_caller]
    fn wrap_err_with<N, F>(self, f: F) -> Result<T>
    where
        N: Into<Cow<'static, str>>,
        F: FnOnce() -> N,
    {
        match self {
            Ok(value) => Ok(value),
            Err(error) => {
                let location = Location::caller();
                let error: ChainError = error.into();
                Err(error.wrap_at(f().into(), location))
            }
        }
    }
}
