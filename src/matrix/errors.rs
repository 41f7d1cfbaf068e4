//! Matrix generation error types.

use miette::Diagnostic;
use thiserror::Error;

/// Result alias used throughout the generator.
pub type Result<T, E = MatrixError> = std::result::Result<T, E>;

/// Error raised while generating a build matrix.
///
/// Every variant is fatal: a malformed constant table is a programming
/// defect, so generation stops before anything is emitted.
#[derive(Debug, Error, Diagnostic)]
pub enum MatrixError {
    #[error("unknown host `{host}`")]
    #[diagnostic(
        code(evg_matrix::host::unknown),
        help("registered hosts: rhel8, win64, win32, macos, macos-arm64")
    )]
    UnknownHost { host: String },

    #[error("no interpreter layout for host `{host}` (python {python})")]
    #[diagnostic(
        code(evg_matrix::host::unsupported),
        help("give the host profile a binary layout")
    )]
    UnsupportedHost { host: String, python: String },

    #[error("missing display handling for axis `{axis}`")]
    #[diagnostic(
        code(evg_matrix::axis::unrecognized),
        help("known axes: version, python, auth, ssl, test_suites, coverage")
    )]
    UnrecognizedAxis { axis: String },

    #[error("axis `{axis}` has no display label for `{value}`")]
    #[diagnostic(code(evg_matrix::axis::unrecognized_value))]
    UnrecognizedAxisValue { axis: String, value: String },

    #[error("duplicate build variant name `{name}`")]
    #[diagnostic(
        code(evg_matrix::variant::duplicate),
        help("two display names collapse to the same variant name; add an axis to one of them")
    )]
    DuplicateVariant { name: String },

    #[error("invalid matrix config: {message}")]
    #[diagnostic(code(evg_matrix::config::invalid))]
    InvalidConfig { message: String },

    #[error("failed to serialize project: {0}")]
    #[diagnostic(code(evg_matrix::emit::serialize))]
    Serialize(#[from] serde_yaml::Error),
}

impl MatrixError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        MatrixError::InvalidConfig {
            message: message.into(),
        }
    }
}
