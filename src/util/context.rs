//! Generation context.
//!
//! Built once per run and handed to every strategy, so nothing reads the
//! axis tables or the host registry through globals.

use crate::core::host::HostRegistry;
use crate::matrix::errors::Result;
use crate::matrix::factory::VariantFactory;
use crate::util::config::MatrixConfig;

/// Validated configuration plus the host registry.
#[derive(Debug, Clone)]
pub struct MatrixContext {
    config: MatrixConfig,
    hosts: HostRegistry,
}

impl MatrixContext {
    /// Validate `config` and pair it with the built-in hosts.
    pub fn new(config: MatrixConfig) -> Result<Self> {
        config.validate()?;
        Ok(MatrixContext {
            config,
            hosts: HostRegistry::builtin(),
        })
    }

    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    pub fn hosts(&self) -> &HostRegistry {
        &self.hosts
    }

    pub fn factory(&self) -> VariantFactory<'_> {
        VariantFactory::new(&self.hosts)
    }
}

impl Default for MatrixContext {
    fn default() -> Self {
        MatrixContext {
            config: MatrixConfig::default(),
            hosts: HostRegistry::builtin(),
        }
    }
}
