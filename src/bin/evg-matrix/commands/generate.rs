//! `evg-matrix generate` command

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::GenerateArgs;
use evg_matrix::ops::{generate, generate_yaml};
use evg_matrix::{MatrixConfig, MatrixContext};

pub fn execute(args: GenerateArgs, config_path: Option<&Path>) -> Result<()> {
    let config = MatrixConfig::load_or_default(config_path)?;
    let ctx = MatrixContext::new(config)?;

    let project = generate(&ctx, args.matrix)?;
    let yaml = generate_yaml(&project)?;

    // Nothing is written until the whole document exists
    match args.output {
        Some(path) => {
            std::fs::write(&path, yaml)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(yaml.as_bytes())
                .context("failed to write to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(())
}
