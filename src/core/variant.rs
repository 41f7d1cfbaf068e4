//! Build variants and the project that holds them.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::matrix::errors::{MatrixError, Result};

/// A reference to an externally defined task or task group.
///
/// The name is a selector pattern: a plain task name, a `.tag` selector,
/// or a combination such as `.ocsp-rsa !.ocsp-staple`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRef {
    pub name: String,
}

impl TaskRef {
    pub fn new(name: impl Into<String>) -> Self {
        TaskRef { name: name.into() }
    }
}

/// One named execution configuration in the generated pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildVariant {
    pub name: String,
    pub display_name: String,
    pub tasks: Vec<TaskRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_on: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expansions: Option<BTreeMap<String, String>>,
    /// Minutes between scheduled runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batchtime: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl BuildVariant {
    /// Get an expansion value.
    pub fn expansion(&self, key: &str) -> Option<&str> {
        self.expansions
            .as_ref()
            .and_then(|e| e.get(key))
            .map(String::as_str)
    }

    /// Get the task selector names.
    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Derive a variant name from its display name.
pub fn variant_name(display_name: &str) -> String {
    display_name.replace(' ', "-").to_lowercase()
}

/// The root document: tasks plus build variants.
///
/// Tasks are defined elsewhere and passed through untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Project {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<serde_yaml::Value>,
    pub buildvariants: Vec<BuildVariant>,
}

impl Project {
    /// Assemble a project, rejecting duplicate variant names.
    pub fn new(tasks: Vec<serde_yaml::Value>, buildvariants: Vec<BuildVariant>) -> Result<Self> {
        let mut seen = HashSet::new();
        for variant in &buildvariants {
            if !seen.insert(variant.name.as_str()) {
                return Err(MatrixError::DuplicateVariant {
                    name: variant.name.clone(),
                });
            }
        }

        Ok(Project {
            tasks,
            buildvariants,
        })
    }

    /// Find a variant by name.
    pub fn variant(&self, name: &str) -> Option<&BuildVariant> {
        self.buildvariants.iter().find(|v| v.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(display_name: &str) -> BuildVariant {
        BuildVariant {
            name: variant_name(display_name),
            display_name: display_name.to_string(),
            tasks: vec![TaskRef::new(".standalone")],
            run_on: None,
            expansions: None,
            batchtime: None,
            tags: None,
        }
    }

    #[test]
    fn test_variant_name() {
        assert_eq!(
            variant_name("Test macOS Arm64 py3.9 Auth SSL"),
            "test-macos-arm64-py3.9-auth-ssl"
        );
    }

    #[test]
    fn test_project_rejects_duplicate_names() {
        let err = Project::new(
            Vec::new(),
            vec![variant("Test RHEL8 py3.9"), variant("test rhel8 PY3.9")],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            MatrixError::DuplicateVariant { name } if name == "test-rhel8-py3.9"
        ));
    }

    #[test]
    fn test_project_lookup() {
        let project = Project::new(
            Vec::new(),
            vec![variant("Test RHEL8 py3.9"), variant("Test RHEL8 py3.13")],
        )
        .unwrap();

        assert!(project.variant("test-rhel8-py3.13").is_some());
        assert!(project.variant("test-rhel8-py3.10").is_none());
    }
}
