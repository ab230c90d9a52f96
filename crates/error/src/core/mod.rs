//! Error context chain
//!
//! - [`error`](crate::core::error) - [`ChainError`](crate::ChainError), the chain node type
//! - [`leaf`](crate::core::leaf) - Leaf errors and process-wide sentinels
//! - [`frame`](crate::core::frame) - Owned per-node snapshots for reporting
//! - [`result`](crate::core::result) - Result alias and context extension traits
//! - [`traits`](crate::core::traits) - Message / cause / location capabilities
//! - [`ops`](crate::core::ops) - Free-function forms of wrap, unwrap, is and render

pub mod error;
pub mod frame;
pub mod leaf;
pub mod ops;
pub mod result;
pub mod traits;

pub use error::{Chain, ChainError};
pub use frame::{Frame, SourceLocation};
pub use leaf::{LeafError, PANICKED, RECORD_NOT_FOUND, Sentinel, UNKNOWN};
pub use ops::{is, render, unwrap, with_location, wrap};
pub use result::{Result, ResultExt};
pub use traits::{HasCause, HasLocation, HasMessage};
