//! Capability traits shared by chain nodes, leaves and faults

use std::borrow::Cow;
use std::panic::Location;

use crate::core::error::ChainError;
use crate::core::leaf::LeafError;

/// Anything that can describe itself in one message
pub trait HasMessage {
    /// Note for wrapped errors, message for everything else
    fn message(&self) -> Cow<'_, str>;
}

/// Errors that may point at an earlier error
pub trait HasCause {
    /// The immediate cause, `None` at the root
    fn cause(&self) -> Option<&ChainError>;
}

/// Errors that remember where they were produced
pub trait HasLocation {
    /// Creation or wrap site, when known
    fn location(&self) -> Option<&'static Location<'static>>;
}

impl HasMessage for LeafError {
    fn message(&self) -> Cow<'_, str> {
        Cow::Borrowed(LeafError::message(self))
    }
}

impl HasLocation for LeafError {
    fn location(&self) -> Option<&'static Location<'static>> {
        Some(LeafError::location(self))
    }
}
