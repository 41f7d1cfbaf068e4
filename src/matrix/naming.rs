//! Interpreter paths and display names.

use crate::core::axis::{AxisBinding, RuntimeVersion};
use crate::core::host::{BinaryLayout, HostProfile, HostRegistry};
use crate::matrix::errors::{MatrixError, Result};

/// Resolve the interpreter binary for a version on a host.
pub fn resolve_interpreter_binary(python: &RuntimeVersion, host: &HostProfile) -> Result<String> {
    let label = python.label();

    match host.binary_layout {
        Some(BinaryLayout::Windows { root }) => {
            Ok(format!("{}/Python{}/python.exe", root, label.replace('.', "")))
        }
        Some(BinaryLayout::Opt) => Ok(format!("/opt/python/{}/bin/python3", label)),
        Some(BinaryLayout::Framework) => Ok(format!(
            "/Library/Frameworks/Python.Framework/Versions/{}/bin/python3",
            label
        )),
        None => Err(MatrixError::UnsupportedHost {
            host: host.host.to_string(),
            python: label,
        }),
    }
}

/// Build `"<base> <host label>"` followed by one token per binding.
pub fn format_display_name(
    base: &str,
    host: &HostProfile,
    bindings: &[AxisBinding],
) -> Result<String> {
    let mut display_name = format!("{} {}", base, host.display_name);
    for binding in bindings {
        display_name.push(' ');
        display_name.push_str(&binding.axis.label(&binding.value)?);
    }
    Ok(display_name)
}

impl HostRegistry {
    /// Resolve an interpreter binary from string identifiers.
    pub fn interpreter_binary(&self, python: &str, host_id: &str) -> Result<String> {
        let profile = self.lookup(host_id)?;
        resolve_interpreter_binary(&python.parse::<RuntimeVersion>()?, profile)
    }

    /// Format a display name from string-keyed bindings.
    pub fn display_name(
        &self,
        base: &str,
        host_id: &str,
        bindings: &[(&str, &str)],
    ) -> Result<String> {
        let profile = self.lookup(host_id)?;
        let bindings = bindings
            .iter()
            .map(|(key, value)| AxisBinding::parse(key, *value))
            .collect::<Result<Vec<_>>>()?;
        format_display_name(base, profile, &bindings)
    }
}
