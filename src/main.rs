use anyhow::Result;
use clap::Parser;
use pagemark::{cli, workflow};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so the TUI's stdout stays clean; enable with
    // RUST_LOG=pagemark=debug.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli_args = cli::Cli::parse();

    // Delegate the main application logic to the workflow module
    workflow::run_pagemark(cli_args)
}
