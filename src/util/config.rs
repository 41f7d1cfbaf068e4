//! Matrix configuration.
//!
//! Every axis list the strategies draw from lives in [`MatrixConfig`]. The
//! compiled-in defaults are used unless a TOML file overrides them:
//!
//! ```toml
//! server_versions = ["4.4", "7.0", "latest"]
//! cpythons = ["3.9", "3.13"]
//! pypys = ["3.10"]
//! ```
//!
//! Fields missing from the file keep their default values.

use std::collections::HashSet;
use std::hash::Hash;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::axis::{AuthSsl, RuntimeVersion, ServerVersion, SyncMode};
use crate::matrix::cycle::zip_cycle3;
use crate::matrix::errors::MatrixError;

/// Minutes in one week.
pub const BATCHTIME_WEEK: u32 = 10080;

/// Axis value sets for matrix generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// Server versions, oldest first
    pub server_versions: Vec<ServerVersion>,

    /// Standard interpreter versions, oldest first
    pub cpythons: Vec<String>,

    /// Alternate-runtime interpreter versions, oldest first
    pub pypys: Vec<String>,

    /// Auth and SSL combinations
    pub auth_ssl: Vec<AuthSsl>,

    /// Server topologies; each is also a task tag
    pub topologies: Vec<String>,

    /// Test suite modes for non-Linux hosts
    pub sync_modes: Vec<SyncMode>,

    /// One week in minutes, the unit for throttled variants
    pub batchtime_week: u32,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        let versions = ["4.0", "4.4", "5.0", "6.0", "7.0", "8.0"];

        MatrixConfig {
            server_versions: versions
                .iter()
                .map(|v| ServerVersion::Release(v.to_string()))
                .chain([ServerVersion::Rapid, ServerVersion::Latest])
                .collect(),
            cpythons: ["3.9", "3.10", "3.11", "3.12", "3.13"]
                .iter()
                .map(|v| v.to_string())
                .collect(),
            pypys: vec!["3.9".to_string(), "3.10".to_string()],
            auth_ssl: vec![
                AuthSsl::new("auth", "ssl"),
                AuthSsl::new("noauth", "ssl"),
                AuthSsl::new("noauth", "nossl"),
            ],
            topologies: vec![
                "standalone".to_string(),
                "replica_set".to_string(),
                "sharded_cluster".to_string(),
            ],
            sync_modes: vec![SyncMode::Sync, SyncMode::Async],
            batchtime_week: BATCHTIME_WEEK,
        }
    }
}

impl MatrixConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read matrix config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse matrix config: {}", path.display()))
    }

    /// Load configuration from an optional path, falling back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!("Loading matrix config from {}", path.display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Check that the axes are non-empty and free of repeats, and that every
    /// generated variant gets a distinct name.
    pub fn validate(&self) -> Result<(), MatrixError> {
        let axes = [
            ("server_versions", self.server_versions.len(), has_repeats(&self.server_versions)),
            ("cpythons", self.cpythons.len(), has_repeats(&self.cpythons)),
            ("pypys", self.pypys.len(), has_repeats(&self.pypys)),
            ("auth_ssl", self.auth_ssl.len(), has_repeats(&self.auth_ssl)),
            ("topologies", self.topologies.len(), has_repeats(&self.topologies)),
            ("sync_modes", self.sync_modes.len(), has_repeats(&self.sync_modes)),
        ];
        for (name, len, repeats) in axes {
            if len == 0 {
                return Err(MatrixError::invalid_config(format!("`{}` is empty", name)));
            }
            if repeats {
                return Err(MatrixError::invalid_config(format!(
                    "`{}` lists a value twice",
                    name
                )));
            }
        }

        if !self.server_versions.iter().any(ServerVersion::is_release) {
            return Err(MatrixError::invalid_config(
                "`server_versions` has no numbered release",
            ));
        }

        for version in self.cpythons.iter().chain(&self.pypys) {
            if !version.starts_with(|c: char| c.is_ascii_digit()) {
                return Err(MatrixError::invalid_config(format!(
                    "python version `{}` must start with a digit",
                    version
                )));
            }
        }

        self.check_cycled_names()
    }

    /// Cycled variants are named by interpreter and auth/SSL only, so no
    /// (interpreter, auth/SSL) pair may come around twice.
    fn check_cycled_names(&self) -> Result<(), MatrixError> {
        let cycles = [
            ("Linux", self.cycled_runtimes()),
            ("secondary-host", self.min_max_runtimes()),
        ];

        for (label, pythons) in cycles {
            if pythons.is_empty() {
                continue;
            }

            let mut seen = HashSet::new();
            for (python, auth_ssl, topology) in
                zip_cycle3(&pythons, &self.auth_ssl, &self.topologies)
            {
                if !seen.insert((python.clone(), auth_ssl.clone())) {
                    return Err(MatrixError::invalid_config(format!(
                        "`auth_ssl` has too few entries: {} variants for {} {}/{} \
                         repeat with topology `{}`",
                        label, python, auth_ssl.auth, auth_ssl.ssl, topology
                    )));
                }
            }
        }

        Ok(())
    }

    /// Standard interpreter versions.
    pub fn standard_runtimes(&self) -> Vec<RuntimeVersion> {
        self.cpythons.iter().map(RuntimeVersion::cpython).collect()
    }

    /// Alternate-runtime interpreter versions.
    pub fn alternate_runtimes(&self) -> Vec<RuntimeVersion> {
        self.pypys.iter().map(RuntimeVersion::pypy).collect()
    }

    /// Standard then alternate interpreter versions.
    pub fn all_runtimes(&self) -> Vec<RuntimeVersion> {
        let mut runtimes = self.standard_runtimes();
        runtimes.extend(self.alternate_runtimes());
        runtimes
    }

    /// Interpreters cycled on Linux: the interior standard versions, then
    /// every alternate version but the newest.
    pub fn cycled_runtimes(&self) -> Vec<RuntimeVersion> {
        let standard = self.standard_runtimes();
        let alternate = self.alternate_runtimes();

        let interior = match standard.len() {
            0..=2 => &[][..],
            n => &standard[1..n - 1],
        };
        let older_alternates = alternate
            .split_last()
            .map(|(_, init)| init)
            .unwrap_or_default();

        interior.iter().chain(older_alternates).cloned().collect()
    }

    /// Oldest and newest standard interpreter.
    pub fn min_max_runtimes(&self) -> Vec<RuntimeVersion> {
        let standard = self.standard_runtimes();
        standard
            .first()
            .into_iter()
            .chain(standard.last().filter(|_| standard.len() > 1))
            .cloned()
            .collect()
    }
}

fn has_repeats<T: Hash + Eq>(values: &[T]) -> bool {
    let mut seen = HashSet::new();
    !values.iter().all(|v| seen.insert(v))
}
