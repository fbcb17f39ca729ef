//! Glissade Core
//!
//! Shared plumbing for the Glissade crates: logging bootstrap, profiling
//! scopes, math re-exports and runtime configuration.

pub mod alloc;
pub mod config;
pub mod logging;
pub mod math;
pub mod profiling;

pub use config::Config;
