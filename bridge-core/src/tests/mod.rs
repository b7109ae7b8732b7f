// Unit tests for private internals and leaf modules.
// End-to-end bridge behavior is covered in integration_tests/.

mod callbacks;
mod config;
mod lifecycle;
mod snapshot;
mod value;
mod wire;
