//! Dashboard service internals.
//!
//! Exposed as a library so integration tests can drive the client, the
//! poller, and the session directly.

pub mod client;
pub mod config;
pub mod controller;
pub mod input;
pub mod poller;
pub mod session;
pub mod term;
