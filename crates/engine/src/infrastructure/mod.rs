//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod app_settings;
pub mod clock;
pub mod file_source;
pub mod ports;
