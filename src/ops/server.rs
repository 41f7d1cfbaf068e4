//! Server compatibility matrix.

use crate::core::axis::{Axis, AxisBinding, AuthSsl, RuntimeVersion};
use crate::core::host::Host;
use crate::core::variant::BuildVariant;
use crate::matrix::cycle::zip_cycle3;
use crate::matrix::errors::Result;
use crate::matrix::factory::VariantOptions;
use crate::matrix::naming::format_display_name;
use crate::util::context::MatrixContext;

const BASE_DISPLAY: &str = "Test";

/// Tag applied to variants whose coverage reports are aggregated.
pub const COVERAGE_TAG: &str = "coverage_tag";

/// Hosts that run a sampled subset of the matrix.
pub const SECONDARY_HOSTS: [Host; 4] = [Host::Macos, Host::MacosArm64, Host::Win64, Host::Win32];

/// Create the server compatibility variants.
///
/// Linux runs the full auth/SSL matrix for the edge interpreters with every
/// topology, then cycles the remaining interpreters through auth/SSL modes
/// and single topologies. Every other host cycles the edge CPythons through
/// auth/SSL modes and topologies, once per sync mode.
pub fn create_server_variants(ctx: &MatrixContext) -> Result<Vec<BuildVariant>> {
    let config = ctx.config();
    let mut variants = Vec::new();

    let alternate = config.alternate_runtimes();
    let min_max = config.min_max_runtimes();

    let all_topologies: Vec<String> = config.topologies.iter().map(|t| tag(t)).collect();
    let all_topologies: Vec<&str> = all_topologies.iter().map(String::as_str).collect();

    let edge = min_max.iter().chain(alternate.last());
    for python in edge {
        for auth_ssl in &config.auth_ssl {
            let mut bindings = auth_ssl_bindings(python, auth_ssl);
            bindings.push(AxisBinding::new(Axis::Coverage, "coverage"));

            let opts = binding_options(&bindings).tag(COVERAGE_TAG);
            variants.push(server_variant(
                ctx,
                Host::Rhel8,
                &all_topologies,
                &bindings,
                python,
                opts,
            )?);
        }
    }

    let rest = config.cycled_runtimes();
    let cycled = if rest.is_empty() {
        Vec::new()
    } else {
        zip_cycle3(&rest, &config.auth_ssl, &config.topologies)
    };
    for (python, auth_ssl, topology) in cycled {
        let bindings = auth_ssl_bindings(&python, &auth_ssl);
        let opts = binding_options(&bindings);
        let task = tag(&topology);
        variants.push(server_variant(
            ctx,
            Host::Rhel8,
            &[task.as_str()],
            &bindings,
            &python,
            opts,
        )?);
    }

    for host in SECONDARY_HOSTS {
        let cycled = zip_cycle3(&min_max, &config.auth_ssl, &config.topologies);
        for (python, auth_ssl, topology) in cycled {
            for sync in &config.sync_modes {
                let mut bindings = auth_ssl_bindings(&python, &auth_ssl);
                bindings.push(AxisBinding::new(Axis::TestSuites, sync.test_suite()));

                let opts = binding_options(&bindings);
                let task = tag(&topology);
                variants.push(server_variant(
                    ctx,
                    host,
                    &[task.as_str()],
                    &bindings,
                    &python,
                    opts,
                )?);
            }
        }
    }

    tracing::debug!("Generated {} server variants", variants.len());
    Ok(variants)
}

fn server_variant(
    ctx: &MatrixContext,
    host: Host,
    tasks: &[&str],
    bindings: &[AxisBinding],
    python: &RuntimeVersion,
    opts: VariantOptions,
) -> Result<BuildVariant> {
    let display_name = format_display_name(BASE_DISPLAY, ctx.hosts().get(host)?, bindings)?;
    ctx.factory()
        .create(tasks, &display_name, opts.python(python.clone()).host(host))
}

fn auth_ssl_bindings(python: &RuntimeVersion, auth_ssl: &AuthSsl) -> Vec<AxisBinding> {
    vec![
        AxisBinding::new(Axis::Python, python.label()),
        AxisBinding::new(Axis::Auth, auth_ssl.auth.as_str()),
        AxisBinding::new(Axis::Ssl, auth_ssl.ssl.as_str()),
    ]
}

/// Every binding except the interpreter becomes an expansion.
fn binding_options(bindings: &[AxisBinding]) -> VariantOptions {
    bindings
        .iter()
        .filter(|b| b.axis != Axis::Python)
        .fold(VariantOptions::new(), |opts, b| {
            opts.expansion(b.axis.expansion_key(), b.value.as_str())
        })
}

fn tag(topology: &str) -> String {
    format!(".{}", topology)
}
