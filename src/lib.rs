//! evg-matrix - CI build-variant matrix generator
//!
//! This crate synthesizes pipeline build variants from independent testing
//! axes (server version, interpreter, host, auth/SSL, topology, sync mode),
//! sub-sampling the cross product with cyclic pairing to keep the matrix
//! tractable.

pub mod core;
pub mod matrix;
pub mod ops;
pub mod util;

pub use crate::core::{BuildVariant, Host, HostRegistry, Project};
pub use matrix::{MatrixError, VariantFactory, VariantOptions};
pub use ops::{generate, generate_yaml, MatrixSelection};
pub use util::{MatrixConfig, MatrixContext};
