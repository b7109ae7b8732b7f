//! Guest-side bridge to a host application across a frame/process boundary.
//!
//! The only primitive the boundary offers is asynchronous, untyped,
//! fire-and-forget message passing. This crate builds on top of it:
//!
//! - request/response correlation for invoking host operations
//! - callback references so guest closures can be invoked from the host
//! - readiness negotiation with bounded polling
//! - lifecycle handling (ready announcement, heartbeats, close interception)
//!
//! # Architecture
//!
//! A [`bridge::Bridge`] is an explicit context object constructed per
//! transport - there is no process-wide singleton, so tests and multi-channel
//! embedders can run several bridges side by side. The transport itself is an
//! external collaborator behind the [`transport::BoundaryTransport`] trait;
//! this crate only defines frame shapes ([`wire`]) and the send/receive
//! contract.
//!
//! # Protocol
//!
//! Every frame is a tagged union `{"type": <tag>, "message": <payload>}`.
//! Decoding is permissive: unknown tags and malformed payloads are dropped,
//! never surfaced as errors, so older guests keep working against newer hosts.

pub mod bridge;
pub mod config;
pub mod error;
pub mod ops;
pub mod snapshot;
pub mod transport;
pub mod value;
pub mod wire;

#[cfg(test)]
mod tests;
