//! Project generation.

use std::fmt;
use std::str::FromStr;

use crate::core::variant::Project;
use crate::matrix::errors::Result;
use crate::ops::ocsp::create_ocsp_variants;
use crate::ops::server::create_server_variants;
use crate::util::context::MatrixContext;

/// Which variant strategies to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixSelection {
    /// OCSP variants followed by server variants
    #[default]
    All,
    Ocsp,
    Server,
}

impl MatrixSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatrixSelection::All => "all",
            MatrixSelection::Ocsp => "ocsp",
            MatrixSelection::Server => "server",
        }
    }
}

impl FromStr for MatrixSelection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "all" => Ok(MatrixSelection::All),
            "ocsp" => Ok(MatrixSelection::Ocsp),
            "server" => Ok(MatrixSelection::Server),
            _ => Err(format!(
                "unknown matrix '{}', valid values: all, ocsp, server",
                s
            )),
        }
    }
}

impl fmt::Display for MatrixSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run the selected strategies and assemble the project.
pub fn generate(ctx: &MatrixContext, selection: MatrixSelection) -> Result<Project> {
    let mut variants = Vec::new();

    if matches!(selection, MatrixSelection::All | MatrixSelection::Ocsp) {
        variants.extend(create_ocsp_variants(ctx)?);
    }
    if matches!(selection, MatrixSelection::All | MatrixSelection::Server) {
        variants.extend(create_server_variants(ctx)?);
    }

    tracing::info!("Generated {} build variants ({})", variants.len(), selection);

    Project::new(Vec::new(), variants)
}
