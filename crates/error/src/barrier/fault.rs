//! The captured form of a panic

use std::any::Any;
use std::borrow::Cow;
use std::panic::{self, Location};

use thiserror::Error;

use crate::core::error::ChainError;
use crate::core::leaf::PANICKED;
use crate::core::traits::HasMessage;

/// A panic stopped by a [`Barrier`](crate::Barrier)
///
/// Holds the original payload so the panic can be re-raised unchanged with
/// [`resume`](Self::resume). A fault carries no context chain; use
/// [`into_error`](Self::into_error) to start one.
#[derive(Debug, Error)]
#[error("panic recovered: {message}")]
pub struct Fault {
    message: Cow<'static, str>,
    label: Option<String>,
    payload: Box<dyn Any + Send + 'static>,
}

impl Fault {
    pub(crate) fn new(payload: Box<dyn Any + Send + 'static>, label: Option<String>) -> Self {
        Self {
            message: payload_message(&*payload),
            label,
            payload,
        }
    }

    /// Panic message, or a placeholder for payloads that are not text
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Label of the barrier that absorbed the panic
    #[inline]
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The raw panic payload
    #[must_use]
    pub fn payload(&self) -> &(dyn Any + Send) {
        &*self.payload
    }

    /// Give up the fault, keeping only its payload
    #[must_use]
    pub fn into_payload(self) -> Box<dyn Any + Send + 'static> {
        self.payload
    }

    /// Re-raise the original panic
    pub fn resume(self) -> ! {
        panic::resume_unwind(self.payload)
    }

    /// Turn the fault into a chain rooted at [`PANICKED`], with the panic
    /// message as the note recorded at the caller's location
    #[track_caller]
    #[must_use]
    pub fn into_error(self) -> ChainError {
        self.into_error_at(Location::caller())
    }

    pub(crate) fn into_error_at(self, location: &'static Location<'static>) -> ChainError {
        PANICKED.err().wrap_at(self.message, location)
    }
}

impl HasMessage for Fault {
    fn message(&self) -> Cow<'_, str> {
        Cow::Borrowed(Fault::message(self))
    }
}

fn payload_message(payload: &(dyn Any + Send)) -> Cow<'static, str> {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        Cow::Borrowed(message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        Cow::Owned(message.clone())
    } else if let Some(error) = payload.downcast_ref::<ChainError>() {
        Cow::Owned(error.to_string())
    } else {
        Cow::Borrowed("Box<dyn Any>")
    }
}
