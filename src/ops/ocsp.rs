//! OCSP certificate-validation matrix.

use crate::core::axis::{Axis, AxisBinding, RuntimeVersion, ServerVersion};
use crate::core::host::Host;
use crate::core::variant::BuildVariant;
use crate::matrix::cycle::zip_cycle2;
use crate::matrix::errors::Result;
use crate::matrix::factory::VariantOptions;
use crate::matrix::naming::format_display_name;
use crate::util::context::MatrixContext;

const BASE_DISPLAY: &str = "OCSP test";

/// Task selector for the full OCSP suite.
pub const OCSP_TASKS: &str = ".ocsp";

/// Servers on Windows and macOS do not staple OCSP responses and only
/// support RSA certificates.
pub const OCSP_RSA_UNSTAPLED_TASKS: &str = ".ocsp-rsa !.ocsp-staple";

/// Hosts that get the reduced OCSP selector.
pub const OCSP_SECONDARY_HOSTS: [Host; 2] = [Host::Win64, Host::Macos];

/// Create the OCSP variants.
///
/// On Linux every server newer than the oldest is cyclically paired with
/// every interpreter. Windows and macOS run the oldest and newest numbered
/// release only.
pub fn create_ocsp_variants(ctx: &MatrixContext) -> Result<Vec<BuildVariant>> {
    let config = ctx.config();
    let batchtime = config.batchtime_week * 2;
    let mut variants = Vec::new();

    let versions = config.server_versions.get(1..).unwrap_or_default();
    for (version, python) in zip_cycle2(versions, &config.all_runtimes()) {
        variants.push(ocsp_variant(ctx, Host::Rhel8, OCSP_TASKS, version, python, batchtime)?);
    }

    let standard = config.standard_runtimes();
    let oldest = versions.iter().find(|v| v.is_release());
    let newest = versions.iter().rev().find(|v| v.is_release());

    let mut pairs = Vec::new();
    if let (Some(oldest), Some(python)) = (oldest, standard.first()) {
        pairs.push((oldest, python));
    }
    if let (Some(newest), Some(python)) = (newest, standard.last()) {
        if Some(newest) != oldest {
            pairs.push((newest, python));
        }
    }

    for host in OCSP_SECONDARY_HOSTS {
        for (version, python) in &pairs {
            variants.push(ocsp_variant(
                ctx,
                host,
                OCSP_RSA_UNSTAPLED_TASKS,
                (*version).clone(),
                (*python).clone(),
                batchtime,
            )?);
        }
    }

    tracing::debug!("Generated {} OCSP variants", variants.len());
    Ok(variants)
}

fn ocsp_variant(
    ctx: &MatrixContext,
    host: Host,
    tasks: &str,
    version: ServerVersion,
    python: RuntimeVersion,
    batchtime: u32,
) -> Result<BuildVariant> {
    let display_name = format_display_name(
        BASE_DISPLAY,
        ctx.hosts().get(host)?,
        &[
            AxisBinding::new(Axis::Version, version.as_str()),
            AxisBinding::new(Axis::Python, python.label()),
        ],
    )?;

    ctx.factory().create(
        &[tasks],
        &display_name,
        VariantOptions::new()
            .python(python)
            .version(version)
            .host(host)
            .expansions([("AUTH", "noauth"), ("SSL", "ssl"), ("TOPOLOGY", "server")])
            .batchtime(batchtime),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::config::MatrixConfig;

    fn variants() -> Vec<BuildVariant> {
        create_ocsp_variants(&MatrixContext::default()).unwrap()
    }

    #[test]
    fn test_linux_variants_skip_oldest_server() {
        let linux: Vec<_> = variants()
            .into_iter()
            .filter(|v| v.task_names() == [OCSP_TASKS])
            .collect();

        assert_eq!(linux.len(), 7);
        assert!(linux.iter().all(|v| v.expansion("VERSION") != Some("4.0")));
        assert_eq!(linux[0].display_name, "OCSP test RHEL8 v4.4 py3.9");
        assert_eq!(linux[6].display_name, "OCSP test RHEL8 latest pypy3.10");
        assert_eq!(
            linux[6].expansion("PYTHON_BINARY"),
            Some("/opt/python/pypy3.10/bin/python3")
        );
    }

    #[test]
    fn test_secondary_hosts() {
        let secondary: Vec<_> = variants()
            .into_iter()
            .filter(|v| v.task_names() == [OCSP_RSA_UNSTAPLED_TASKS])
            .map(|v| v.display_name)
            .collect();

        assert_eq!(
            secondary,
            vec![
                "OCSP test Win64 v4.4 py3.9",
                "OCSP test Win64 v8.0 py3.13",
                "OCSP test macOS v4.4 py3.9",
                "OCSP test macOS v8.0 py3.13",
            ]
        );
    }

    #[test]
    fn test_shared_expansions_and_batchtime() {
        for variant in variants() {
            assert_eq!(variant.batchtime, Some(20160));
            assert_eq!(variant.expansion("AUTH"), Some("noauth"));
            assert_eq!(variant.expansion("SSL"), Some("ssl"));
            assert_eq!(variant.expansion("TOPOLOGY"), Some("server"));
        }
    }

    #[test]
    fn test_single_release_is_not_duplicated() {
        let config = MatrixConfig {
            server_versions: vec![
                ServerVersion::Release("4.0".to_string()),
                ServerVersion::Release("7.0".to_string()),
                ServerVersion::Latest,
            ],
            ..MatrixConfig::default()
        };
        let ctx = MatrixContext::new(config).unwrap();
        let variants = create_ocsp_variants(&ctx).unwrap();

        let secondary = variants
            .iter()
            .filter(|v| v.task_names() == [OCSP_RSA_UNSTAPLED_TASKS])
            .count();
        assert_eq!(secondary, 2);
    }
}
