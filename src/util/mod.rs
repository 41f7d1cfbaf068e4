//! Shared utilities

pub mod config;
pub mod context;

pub use config::MatrixConfig;
pub use context::MatrixContext;
