//! # exthost-core
//!
//! Core crate for exthost. Contains the unified error system, typed
//! identifiers, and configuration schemas shared by the plugin engine,
//! the bundled plugins, and the demo host.
//!
//! This crate has **no** internal dependencies on other exthost crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
