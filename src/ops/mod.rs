//! High-level operations.
//!
//! Variant strategies, project generation and YAML emission.

pub mod emit;
pub mod generate;
pub mod ocsp;
pub mod server;

pub use emit::generate_yaml;
pub use generate::{generate, MatrixSelection};
pub use ocsp::create_ocsp_variants;
pub use server::create_server_variants;
