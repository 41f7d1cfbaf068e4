//! Build variant construction.

use std::collections::BTreeMap;

use crate::core::axis::{Axis, RuntimeVersion, ServerVersion};
use crate::core::host::{Host, HostRegistry};
use crate::core::variant::{variant_name, BuildVariant, TaskRef};
use crate::matrix::errors::Result;
use crate::matrix::naming::resolve_interpreter_binary;

/// Optional axis bindings and pass-through fields for one variant.
#[derive(Debug, Clone, Default)]
pub struct VariantOptions {
    pub python: Option<RuntimeVersion>,
    pub version: Option<ServerVersion>,
    /// Defaults to [`Host::Rhel8`]
    pub host: Option<Host>,
    pub expansions: BTreeMap<String, String>,
    pub batchtime: Option<u32>,
    pub tags: Vec<String>,
}

impl VariantOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn python(mut self, python: RuntimeVersion) -> Self {
        self.python = Some(python);
        self
    }

    pub fn version(mut self, version: ServerVersion) -> Self {
        self.version = Some(version);
        self
    }

    pub fn host(mut self, host: Host) -> Self {
        self.host = Some(host);
        self
    }

    /// Add an expansion.
    pub fn expansion(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.expansions.insert(key.into(), value.into());
        self
    }

    /// Add multiple expansions.
    pub fn expansions<K, V>(mut self, expansions: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.expansions
            .extend(expansions.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn batchtime(mut self, minutes: u32) -> Self {
        self.batchtime = Some(minutes);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Builds [`BuildVariant`] records against a host registry.
#[derive(Debug, Clone, Copy)]
pub struct VariantFactory<'a> {
    hosts: &'a HostRegistry,
}

impl<'a> VariantFactory<'a> {
    pub fn new(hosts: &'a HostRegistry) -> Self {
        VariantFactory { hosts }
    }

    /// Create a build variant.
    ///
    /// The interpreter path and server version are injected into the
    /// caller's expansions, which then take precedence over the host
    /// defaults. An empty result omits `expansions` entirely.
    pub fn create(
        &self,
        tasks: &[&str],
        display_name: &str,
        opts: VariantOptions,
    ) -> Result<BuildVariant> {
        let host = self.hosts.get(opts.host.unwrap_or_default())?;

        let mut expansions = opts.expansions;
        if let Some(python) = &opts.python {
            expansions.insert(
                Axis::Python.expansion_key().to_string(),
                resolve_interpreter_binary(python, host)?,
            );
        }
        if let Some(version) = &opts.version {
            expansions.insert(
                Axis::Version.expansion_key().to_string(),
                version.to_string(),
            );
        }

        let mut merged = host.expansions.clone();
        merged.extend(expansions);

        tracing::debug!("Creating variant `{}` on {}", display_name, host.host);

        Ok(BuildVariant {
            name: variant_name(display_name),
            display_name: display_name.to_string(),
            tasks: tasks.iter().map(|t| TaskRef::new(*t)).collect(),
            run_on: Some(vec![host.run_on.clone()]),
            expansions: (!merged.is_empty()).then_some(merged),
            batchtime: opts.batchtime,
            tags: (!opts.tags.is_empty()).then_some(opts.tags),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::SKIP_CSOT_TESTS;

    #[test]
    fn test_defaults_to_linux_without_expansions() {
        let hosts = HostRegistry::builtin();
        let variant = VariantFactory::new(&hosts)
            .create(&[".standalone"], "Test RHEL8", VariantOptions::new())
            .unwrap();

        assert_eq!(variant.name, "test-rhel8");
        assert_eq!(variant.run_on, Some(vec!["rhel87-small".to_string()]));
        assert_eq!(variant.expansions, None);
        assert_eq!(variant.tags, None);
        assert_eq!(variant.batchtime, None);
    }

    #[test]
    fn test_injects_binary_and_version() {
        let hosts = HostRegistry::builtin();
        let variant = VariantFactory::new(&hosts)
            .create(
                &[".ocsp"],
                "OCSP test RHEL8 v4.4 py3.9",
                VariantOptions::new()
                    .python(RuntimeVersion::cpython("3.9"))
                    .version(ServerVersion::Release("4.4".to_string()))
                    .batchtime(20160),
            )
            .unwrap();

        assert_eq!(
            variant.expansion("PYTHON_BINARY"),
            Some("/opt/python/3.9/bin/python3")
        );
        assert_eq!(variant.expansion("VERSION"), Some("4.4"));
        assert_eq!(variant.batchtime, Some(20160));
    }

    #[test]
    fn test_merges_host_defaults() {
        let hosts = HostRegistry::builtin();
        let variant = VariantFactory::new(&hosts)
            .create(
                &[".replica_set"],
                "Test Win32 py3.13",
                VariantOptions::new()
                    .host(Host::Win32)
                    .python(RuntimeVersion::cpython("3.13"))
                    .expansion("AUTH", "noauth"),
            )
            .unwrap();

        assert_eq!(variant.expansion(SKIP_CSOT_TESTS), Some("true"));
        assert_eq!(variant.expansion("AUTH"), Some("noauth"));
        assert_eq!(
            variant.expansion("PYTHON_BINARY"),
            Some("C:/python/32/Python313/python.exe")
        );
    }

    #[test]
    fn test_caller_expansions_win() {
        let hosts = HostRegistry::builtin();
        let variant = VariantFactory::new(&hosts)
            .create(
                &[".standalone"],
                "Test macOS",
                VariantOptions::new()
                    .host(Host::Macos)
                    .expansion(SKIP_CSOT_TESTS, "false"),
            )
            .unwrap();

        assert_eq!(variant.expansion(SKIP_CSOT_TESTS), Some("false"));
    }

    #[test]
    fn test_tags_pass_through() {
        let hosts = HostRegistry::builtin();
        let variant = VariantFactory::new(&hosts)
            .create(
                &[".standalone", ".replica_set"],
                "Test RHEL8 cov",
                VariantOptions::new().tag("coverage_tag"),
            )
            .unwrap();

        assert_eq!(variant.tags, Some(vec!["coverage_tag".to_string()]));
        assert_eq!(variant.task_names(), vec![".standalone", ".replica_set"]);
    }
}
