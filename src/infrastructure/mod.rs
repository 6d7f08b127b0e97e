//! Infrastructure layer
//!
//! Adapters for the domain ports plus configuration and logging setup.

pub mod clock;
pub mod config;
pub mod persistence;
pub mod security;
pub mod telemetry;
