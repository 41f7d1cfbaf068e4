//! Core data structures.
//!
//! - Host profiles and the host registry
//! - Typed axes and axis values
//! - Build variants and the project document

pub mod axis;
pub mod host;
pub mod variant;

pub use axis::{Axis, AxisBinding, AuthSsl, RuntimeFlavor, RuntimeVersion, ServerVersion, SyncMode};
pub use host::{BinaryLayout, Host, HostProfile, HostRegistry};
pub use variant::{BuildVariant, Project, TaskRef};
