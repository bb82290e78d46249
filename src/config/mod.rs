//! Configuration module for the finanzas engine
//!
//! Provides XDG-compliant path resolution for the JSON store backend.

pub mod paths;

pub use paths::StorePaths;
