//! Domain models for the host bridge.
//!
//! This crate contains pure data structures crossing the guest/host boundary.
//! Models have no business logic - they're just data that can be passed
//! between layers and serialized onto the wire.
//!
//! ## Architecture
//!
//! - **models** (this crate): Pure data structures
//! - **bridge-core**: Bridge runtime operating on models
//! - **common**: Shared error plumbing
//!
//! All wire-facing fields serialize with the exact key names the host expects
//! (camelCase for window params, snake_case for backend API payloads).

pub mod error;
pub mod host;
pub mod params;
pub mod request;

pub use error::model_error::ModelError;
pub use host::{SafeArea, SystemInfo, UserBasicInfo, UserInfo, WindowType};
pub use params::{
    DownloadTarget, ModalParams, OpenAppPageParams, OpenWindowParams, PopoutWindowParams,
    SelectUsersParams, WindowConfig,
};
pub use request::builder::ApiRequestBuilder;
pub use request::{ApiRequest, ApiSuccess, SendMessageRequest};

#[cfg(test)]
mod tests;
