//! Host registry.
//!
//! Every build variant runs on one of a closed set of hosts. A host profile
//! carries the scheduling target, the label used in display names, the
//! expansions every variant on that host inherits, and the layout used to
//! locate interpreter binaries.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::matrix::errors::{MatrixError, Result};

/// Expansion that skips timing-sensitive CSOT tests on slow hosts.
pub const SKIP_CSOT_TESTS: &str = "SKIP_CSOT_TESTS";

/// A supported execution platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Host {
    /// Default Linux host
    #[default]
    Rhel8,
    /// 64-bit Windows
    Win64,
    /// 32-bit Windows
    Win32,
    /// Intel macOS
    Macos,
    /// ARM64 macOS
    MacosArm64,
}

impl Host {
    /// Every registered host, in registry order.
    pub const ALL: [Host; 5] = [
        Host::Rhel8,
        Host::Win64,
        Host::Win32,
        Host::Macos,
        Host::MacosArm64,
    ];

    /// Get the host identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Host::Rhel8 => "rhel8",
            Host::Win64 => "win64",
            Host::Win32 => "win32",
            Host::Macos => "macos",
            Host::MacosArm64 => "macos-arm64",
        }
    }
}

impl FromStr for Host {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        Host::ALL
            .into_iter()
            .find(|host| host.as_str() == s)
            .ok_or_else(|| MatrixError::UnknownHost {
                host: s.to_string(),
            })
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Where interpreter binaries live on a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BinaryLayout {
    /// `<root>/Python<version without dots>/python.exe`
    Windows { root: &'static str },
    /// `/opt/python/<version>/bin/python3`
    Opt,
    /// `/Library/Frameworks/Python.Framework/Versions/<version>/bin/python3`
    Framework,
}

/// Static description of one execution platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostProfile {
    pub host: Host,
    pub run_on: String,
    pub display_name: String,
    pub expansions: BTreeMap<String, String>,
    /// `None` if interpreter paths cannot be resolved on this host
    pub binary_layout: Option<BinaryLayout>,
}

impl HostProfile {
    fn new(
        host: Host,
        run_on: &str,
        display_name: &str,
        expansions: BTreeMap<String, String>,
        binary_layout: BinaryLayout,
    ) -> Self {
        HostProfile {
            host,
            run_on: run_on.to_string(),
            display_name: display_name.to_string(),
            expansions,
            binary_layout: Some(binary_layout),
        }
    }
}

/// The closed set of host profiles.
#[derive(Debug, Clone)]
pub struct HostRegistry {
    profiles: Vec<HostProfile>,
}

impl HostRegistry {
    /// Build the compiled-in registry.
    pub fn builtin() -> Self {
        // CSOT tests are unreliable on slow hosts.
        let slow_host = BTreeMap::from([(SKIP_CSOT_TESTS.to_string(), "true".to_string())]);

        let profiles = vec![
            HostProfile::new(
                Host::Rhel8,
                "rhel87-small",
                "RHEL8",
                BTreeMap::new(),
                BinaryLayout::Opt,
            ),
            HostProfile::new(
                Host::Win64,
                "windows-64-vsMulti-small",
                "Win64",
                slow_host.clone(),
                BinaryLayout::Windows { root: "C:/python" },
            ),
            HostProfile::new(
                Host::Win32,
                "windows-64-vsMulti-small",
                "Win32",
                slow_host.clone(),
                BinaryLayout::Windows {
                    root: "C:/python/32",
                },
            ),
            HostProfile::new(
                Host::Macos,
                "macos-14",
                "macOS",
                slow_host.clone(),
                BinaryLayout::Framework,
            ),
            HostProfile::new(
                Host::MacosArm64,
                "macos-14-arm64",
                "macOS Arm64",
                slow_host,
                BinaryLayout::Framework,
            ),
        ];

        HostRegistry { profiles }
    }

    /// Look up a host by identifier.
    pub fn lookup(&self, host_id: &str) -> Result<&HostProfile> {
        let host = Host::from_str(host_id)?;
        self.get(host)
    }

    /// Get the profile for a host.
    pub fn get(&self, host: Host) -> Result<&HostProfile> {
        self.profiles
            .iter()
            .find(|p| p.host == host)
            .ok_or_else(|| MatrixError::UnknownHost {
                host: host.to_string(),
            })
    }

    /// Iterate over all profiles in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &HostProfile> {
        self.profiles.iter()
    }
}

impl Default for HostRegistry {
    fn default() -> Self {
        HostRegistry::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_hosts() {
        let registry = HostRegistry::builtin();

        for host in Host::ALL {
            let profile = registry.lookup(host.as_str()).unwrap();
            assert_eq!(profile.host, host);
        }

        assert_eq!(registry.lookup("rhel8").unwrap().run_on, "rhel87-small");
        assert_eq!(
            registry.lookup("macos-arm64").unwrap().display_name,
            "macOS Arm64"
        );
    }

    #[test]
    fn test_lookup_unknown_host() {
        let registry = HostRegistry::builtin();
        let err = registry.lookup("freebsd").unwrap_err();
        assert!(matches!(err, MatrixError::UnknownHost { host } if host == "freebsd"));
    }

    #[test]
    fn test_default_expansions() {
        let registry = HostRegistry::builtin();

        assert!(registry.get(Host::Rhel8).unwrap().expansions.is_empty());
        for host in [Host::Win64, Host::Win32, Host::Macos, Host::MacosArm64] {
            let profile = registry.get(host).unwrap();
            assert_eq!(
                profile.expansions.get(SKIP_CSOT_TESTS).map(String::as_str),
                Some("true")
            );
        }
    }

    #[test]
    fn test_windows_hosts_share_run_on() {
        let registry = HostRegistry::builtin();
        assert_eq!(
            registry.get(Host::Win32).unwrap().run_on,
            registry.get(Host::Win64).unwrap().run_on
        );
    }
}
