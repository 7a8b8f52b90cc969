//! Configuration module for envcrypt
//!
//! This module provides configuration management including:
//! - Per-call operation options
//! - Config directory resolution
//! - User settings persistence

pub mod options;
pub mod paths;
pub mod settings;

pub use options::EnvcryptOptions;
pub use paths::EnvcryptPaths;
pub use settings::Settings;
