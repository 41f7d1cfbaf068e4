//! Testing axes and their values.
//!
//! An axis is one independent dimension of test configuration. Axis values
//! are parsed into tagged types once, at the config boundary, so the rest of
//! the generator never inspects raw strings to decide formatting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::matrix::errors::{MatrixError, Result};

/// A display-name axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Server version
    Version,
    /// Interpreter version
    Python,
    Auth,
    Ssl,
    /// Sync or async test suite
    TestSuites,
    Coverage,
}

impl Axis {
    /// Get the axis key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Version => "version",
            Axis::Python => "python",
            Axis::Auth => "auth",
            Axis::Ssl => "ssl",
            Axis::TestSuites => "test_suites",
            Axis::Coverage => "coverage",
        }
    }

    /// Expansion variable that carries this axis' value.
    pub fn expansion_key(&self) -> &'static str {
        match self {
            Axis::Version => "VERSION",
            Axis::Python => "PYTHON_BINARY",
            Axis::Auth => "AUTH",
            Axis::Ssl => "SSL",
            Axis::TestSuites => "TEST_SUITES",
            Axis::Coverage => "COVERAGE",
        }
    }

    /// Format a value of this axis for a display name.
    pub fn label(&self, value: &str) -> Result<String> {
        let label = match self {
            Axis::Version => match value.parse::<ServerVersion>()? {
                ServerVersion::Release(v) => format!("v{}", v),
                special => special.to_string(),
            },
            Axis::Python => match value.parse::<RuntimeVersion>()? {
                v if v.flavor == RuntimeFlavor::CPython => format!("py{}", v.version),
                v => v.to_string(),
            },
            Axis::Auth | Axis::Ssl | Axis::TestSuites | Axis::Coverage => {
                self.lookup(value)?.to_string()
            }
        };
        Ok(label)
    }

    fn lookup(&self, value: &str) -> Result<&'static str> {
        let label = match (self, value) {
            (Axis::Ssl, "ssl") => "SSL",
            (Axis::Ssl, "nossl") => "NoSSL",
            (Axis::Auth, "auth") => "Auth",
            (Axis::Auth, "noauth") => "NoAuth",
            (Axis::TestSuites, "default") => "Sync",
            (Axis::TestSuites, "default_async") => "Async",
            (Axis::Coverage, "coverage") => "cov",
            _ => {
                return Err(MatrixError::UnrecognizedAxisValue {
                    axis: self.as_str().to_string(),
                    value: value.to_string(),
                })
            }
        };
        Ok(label)
    }
}

impl FromStr for Axis {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "version" => Ok(Axis::Version),
            "python" => Ok(Axis::Python),
            "auth" => Ok(Axis::Auth),
            "ssl" => Ok(Axis::Ssl),
            "test_suites" => Ok(Axis::TestSuites),
            "coverage" => Ok(Axis::Coverage),
            _ => Err(MatrixError::UnrecognizedAxis {
                axis: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One axis value attached to a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisBinding {
    pub axis: Axis,
    pub value: String,
}

impl AxisBinding {
    pub fn new(axis: Axis, value: impl Into<String>) -> Self {
        AxisBinding {
            axis,
            value: value.into(),
        }
    }

    /// Parse a string-keyed binding, failing on unknown axis keys.
    pub fn parse(key: &str, value: impl Into<String>) -> Result<Self> {
        Ok(AxisBinding::new(key.parse()?, value))
    }
}

/// A server version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum ServerVersion {
    /// A numbered release such as `7.0`
    Release(String),
    /// Most recent rapid release
    Rapid,
    /// Most recent unreleased build
    #[default]
    Latest,
}

impl ServerVersion {
    pub fn is_release(&self) -> bool {
        matches!(self, ServerVersion::Release(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ServerVersion::Release(v) => v,
            ServerVersion::Rapid => "rapid",
            ServerVersion::Latest => "latest",
        }
    }
}

impl FromStr for ServerVersion {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rapid" => Ok(ServerVersion::Rapid),
            "latest" => Ok(ServerVersion::Latest),
            v if v.starts_with(|c: char| c.is_ascii_digit()) => {
                Ok(ServerVersion::Release(v.to_string()))
            }
            v => Err(MatrixError::invalid_config(format!(
                "invalid server version `{}`",
                v
            ))),
        }
    }
}

impl TryFrom<String> for ServerVersion {
    type Error = MatrixError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ServerVersion> for String {
    fn from(v: ServerVersion) -> Self {
        v.as_str().to_string()
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interpreter implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RuntimeFlavor {
    /// Standard interpreter
    #[default]
    CPython,
    /// Alternate runtime
    PyPy,
}

/// An interpreter version tagged with its flavor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RuntimeVersion {
    pub flavor: RuntimeFlavor,
    /// Bare version number, e.g. `3.10`
    pub version: String,
}

impl RuntimeVersion {
    pub fn cpython(version: impl Into<String>) -> Self {
        RuntimeVersion {
            flavor: RuntimeFlavor::CPython,
            version: version.into(),
        }
    }

    pub fn pypy(version: impl Into<String>) -> Self {
        RuntimeVersion {
            flavor: RuntimeFlavor::PyPy,
            version: version.into(),
        }
    }

    /// Label used in binary paths and expansions, e.g. `3.10` or `pypy3.10`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl FromStr for RuntimeVersion {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        let (flavor, version) = match s.strip_prefix("pypy") {
            Some(rest) => (RuntimeFlavor::PyPy, rest),
            None => (RuntimeFlavor::CPython, s),
        };

        if !version.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(MatrixError::invalid_config(format!(
                "invalid python version `{}`",
                s
            )));
        }

        Ok(RuntimeVersion {
            flavor,
            version: version.to_string(),
        })
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.flavor {
            RuntimeFlavor::CPython => write!(f, "{}", self.version),
            RuntimeFlavor::PyPy => write!(f, "pypy{}", self.version),
        }
    }
}

/// An auth mode paired with an SSL mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct AuthSsl {
    pub auth: String,
    pub ssl: String,
}

impl AuthSsl {
    pub fn new(auth: &str, ssl: &str) -> Self {
        AuthSsl {
            auth: auth.to_string(),
            ssl: ssl.to_string(),
        }
    }
}

/// Which flavor of the test suite a variant runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    Sync,
    Async,
}

impl SyncMode {
    /// Value of the `TEST_SUITES` expansion.
    pub fn test_suite(&self) -> &'static str {
        match self {
            SyncMode::Sync => "default",
            SyncMode::Async => "default_async",
        }
    }
}
