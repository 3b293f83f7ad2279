//! Onion Common
//!
//! Utilities shared by the onion node crates.
//!
//! This crate provides:
//! - Component-based structured logging with node ID context

pub mod logging;

pub use logging::{Component, Logger};
