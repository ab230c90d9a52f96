//! Flat, owned snapshot of a chain for reporting

use std::fmt::{self, Write as _};
use std::panic::Location;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A source position captured with `#[track_caller]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SourceLocation {
    /// Source file, as reported by the compiler
    pub file: &'static str,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// One node of a chain: its note (or root message) and where it was made
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Frame {
    /// Note for wrapped nodes, message for roots
    pub message: String,
    /// Wrap site, leaf creation site, or foreign-error conversion site
    pub location: SourceLocation,
}

/// Renders as a single `message (at file:line:column)` line. Line breaks in
/// the message are written as `\n` and `\r`; [`Frame::message`] stays raw.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.message.chars() {
            match ch {
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                ch => f.write_char(ch)?,
            }
        }
        write!(f, " (at {})", self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(message: &str) -> Frame {
        Frame {
            message: message.to_owned(),
            location: SourceLocation {
                file: "src/lib.rs",
                line: 7,
                column: 3,
            },
        }
    }

    #[test]
    fn test_single_line_message() {
        assert_eq!(frame("saving").to_string(), "saving (at src/lib.rs:7:3)");
    }

    #[test]
    fn test_line_breaks_are_escaped() {
        let frame = frame("assertion failed\r\n  left: 1\n right: 2");

        assert_eq!(
            frame.to_string(),
            r"assertion failed\r\n  left: 1\n right: 2 (at src/lib.rs:7:3)"
        );
        assert_eq!(frame.message.lines().count(), 3);
    }
}
