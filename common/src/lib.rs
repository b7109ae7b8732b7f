//! Shared building blocks for the host bridge workspace.
//!
//! This crate contains the pieces every other crate leans on:
//!
//! - **error**: `ErrorLocation` for file/line/column capture via `#[track_caller]`
//! - **redacted_token**: the host-provided user token, never printed in logs
//!
//! ## Architecture
//!
//! - **common** (this crate): shared error plumbing and sensitive-value wrappers
//! - **models**: pure data structures crossing the boundary
//! - **bridge-core**: the bridge runtime operating on both
//!
//! Nothing here knows about the wire protocol or the transport.

pub mod error;
pub mod redacted_token;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use redacted_token::RedactedToken;

#[cfg(test)]
mod tests;
