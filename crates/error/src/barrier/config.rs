//! Barrier configuration

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::barrier::fault::Fault;

/// Label used in reports from barriers that were not given one
pub const ANONYMOUS: &str = "anonymous";

/// `tracing` level at which a barrier reports the faults it absorbs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ReportLevel {
    /// Absorb silently
    Off,
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl ReportLevel {
    pub(crate) fn report(self, fault: &Fault) {
        let barrier = fault.label().unwrap_or(ANONYMOUS);
        let message = fault.message();
        match self {
            Self::Off => {}
            Self::Trace => tracing::trace!(barrier, fault = message, "recovered from panic"),
            Self::Debug => tracing::debug!(barrier, fault = message, "recovered from panic"),
            Self::Info => tracing::info!(barrier, fault = message, "recovered from panic"),
            Self::Warn => tracing::warn!(barrier, fault = message, "recovered from panic"),
            Self::Error => tracing::error!(barrier, fault = message, "recovered from panic"),
        }
    }

    /// Lowercase name, as accepted by [`FromStr`]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ReportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised [`ReportLevel`] name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown report level `{0}` (expected off, trace, debug, info, warn or error)")]
pub struct ParseReportLevelError(String);

impl FromStr for ReportLevel {
    type Err = ParseReportLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ParseReportLevelError(s.to_owned())),
        }
    }
}

/// How a [`Barrier`](crate::Barrier) labels, reports and disposes of faults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BarrierConfig {
    /// Name attached to reports and to every [`Fault`] this barrier produces
    pub label: Option<String>,
    /// Level of the report emitted for each absorbed fault
    pub level: ReportLevel,
    /// Re-raise the fault after reporting it instead of absorbing it
    pub propagate: bool,
}
