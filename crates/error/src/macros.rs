//! Convenience macros for building and returning chain errors

/// Create an ad hoc leaf [`ChainError`](crate::ChainError) with a formatted message
///
/// # Examples
///
/// ```rust
/// use faultline_error::leaf_error;
///
/// let err = leaf_error!("queue {} is full", "ingest");
/// assert_eq!(err.to_string(), "queue ingest is full");
/// ```
#[macro_export]
macro_rules! leaf_error {
    ($msg:literal $(,)?) => {
        $crate::ChainError::msg(::std::format!($msg))
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::ChainError::msg(::std::format!($fmt, $($arg)*))
    };
}

/// Return early with an error
///
/// Accepts a format string (becomes a leaf) or any value convertible into a
/// [`ChainError`](crate::ChainError), including `&Sentinel` and foreign errors.
///
/// # Examples
///
/// ```rust
/// use faultline_error::{bail, RECORD_NOT_FOUND, Result};
///
/// fn find(id: u32) -> Result<&'static str> {
///     if id == 0 {
///         bail!("id must be non-zero");
///     }
///     bail!(&*RECORD_NOT_FOUND)
/// }
///
/// assert!(find(3).unwrap_err().is(&RECORD_NOT_FOUND));
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return ::core::result::Result::Err($crate::leaf_error!($msg))
    };
    ($err:expr $(,)?) => {
        return ::core::result::Result::Err(::core::convert::Into::into($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return ::core::result::Result::Err($crate::leaf_error!($fmt, $($arg)*))
    };
}

/// Return early with an error unless a condition holds
///
/// # Examples
///
/// ```rust
/// use faultline_error::{ensure, Result};
///
/// fn must_sub(v1: i64, v2: i64) -> Result<i64> {
///     ensure!(v1 >= v2, "v2 bigger than v1");
///     Ok(v1 - v2)
/// }
///
/// assert_eq!(must_sub(20, 10).unwrap(), 10);
/// assert_eq!(must_sub(10, 20).unwrap_err().to_string(), "v2 bigger than v1");
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($rest:tt)+) => {
        if !$cond {
            $crate::bail!($($rest)+);
        }
    };
}

/// Declare process-wide [`Sentinel`](crate::Sentinel) statics
///
/// # Examples
///
/// ```rust
/// use faultline_error::sentinel;
///
/// sentinel! {
///     /// The upstream refused the credentials.
///     pub static UNAUTHORIZED = "unauthorized";
///     static STALE = "stale read";
/// }
///
/// assert!(UNAUTHORIZED.err().wrap("calling upstream").is(&UNAUTHORIZED));
/// assert!(!STALE.err().is(&UNAUTHORIZED));
/// ```
#[macro_export]
macro_rules! sentinel {
    ($($(#[$meta:meta])* $vis:vis static $name:ident = $msg:expr;)+) => {
        $(
            $(#[$meta])*
            $vis static $name: ::std::sync::LazyLock<$crate::Sentinel> =
                ::std::sync::LazyLock::new(|| $crate::Sentinel::new($msg));
        )+
    };
}
