//! Matrix primitives.
//!
//! - Naming and interpreter path resolution
//! - Cyclic zip enumeration
//! - Build variant construction

pub mod cycle;
pub mod errors;
pub mod factory;
pub mod naming;

pub use cycle::{zip_cycle, zip_cycle2, zip_cycle3, ZipCycle};
pub use errors::{MatrixError, Result};
pub use factory::{VariantFactory, VariantOptions};
pub use naming::{format_display_name, resolve_interpreter_binary};
