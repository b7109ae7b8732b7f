//! Call-site capture for error provenance.

use std::fmt;
use std::panic::Location;

use serde::Serialize;

/// Source position recorded when an error value is built.
///
/// Error constructors are `#[track_caller]`, so the captured position names
/// the operation that failed, not the constructor that packaged the failure.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ErrorLocation {
    file: &'static str,
    line: u32,
    column: u32,
}

impl ErrorLocation {
    /// Capture the caller's position. Propagates through `#[track_caller]`
    /// chains, so the innermost annotated frame wins.
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }

    pub const fn file(&self) -> &'static str {
        self.file
    }

    pub const fn line(&self) -> u32 {
        self.line
    }

    pub const fn column(&self) -> u32 {
        self.column
    }
}

impl From<&'static Location<'static>> for ErrorLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for ErrorLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}:{}]", self.file, self.line, self.column)
    }
}
