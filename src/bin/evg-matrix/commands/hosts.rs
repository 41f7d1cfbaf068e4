//! `evg-matrix hosts` command

use anyhow::Result;

use crate::cli::HostsArgs;
use evg_matrix::HostRegistry;

pub fn execute(args: HostsArgs) -> Result<()> {
    let registry = HostRegistry::builtin();

    if args.json {
        let profiles: Vec<_> = registry.iter().collect();
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    for profile in registry.iter() {
        let expansions: Vec<String> = profile
            .expansions
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();

        println!(
            "{:<12} {:<26} {:<12} {}",
            profile.host,
            profile.run_on,
            profile.display_name,
            expansions.join(" ")
        );
    }

    Ok(())
}
