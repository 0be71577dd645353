//! Vaidya core crate - configuration, error taxonomy, and shared domain types.
//!
//! Every other crate in the workspace depends on this one. It owns the
//! [`VaidyaConfig`] loaded once at process start, the [`VaidyaError`] enum that
//! subsystem errors convert into, and the record/turn types that cross crate
//! boundaries.

pub mod config;
pub mod error;
pub mod types;

pub use config::VaidyaConfig;
pub use error::{Result, VaidyaError};
pub use types::*;
