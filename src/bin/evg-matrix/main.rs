//! evg-matrix CLI - CI build-variant matrix generator

use anyhow::Result;
use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

use evg_matrix::MatrixError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        if let Some(help) = e.downcast_ref::<MatrixError>().and_then(|d| d.help()) {
            eprintln!("help: {}", help);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the generated document
    let filter = if cli.verbose {
        EnvFilter::new("evg_matrix=debug")
    } else {
        EnvFilter::new("evg_matrix=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, cli.config.as_deref()),
        Commands::Hosts(args) => commands::hosts::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
