//! # Configuration
//!
//! Client configuration resolved from defaults, an optional file, environment
//! variables and command-line overrides. The browser build has no file system
//! or environment and uses a compile-time configuration instead.

#[cfg(not(target_arch = "wasm32"))]
pub mod client;

#[cfg(not(target_arch = "wasm32"))]
pub use client::{ClientConfig, ConfigError, ConfigFormat};
