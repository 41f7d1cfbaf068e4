//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use evg_matrix::MatrixSelection;

/// evg-matrix - Generate CI build-variant matrices
#[derive(Parser)]
#[command(name = "evg-matrix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file overriding the built-in axis values
    #[arg(long, global = true, env = "EVG_MATRIX_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate build variants as YAML
    Generate(GenerateArgs),

    /// List the registered hosts
    Hosts(HostsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Which matrix to generate (all, ocsp, server)
    #[arg(short, long, default_value = "all")]
    pub matrix: MatrixSelection,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct HostsArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: Shell,
}
