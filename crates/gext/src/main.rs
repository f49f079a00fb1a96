//! gext - GNOME Shell extension manager
//!
//! This is the main entry point for the gext command-line interface.

mod cli;
mod commands;
mod output;
mod utils;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use commands::list::Selection;

#[tokio::main]
async fn main() {
    // Initialize rustls crypto provider (required for rustls 0.23+)
    // This must be done before any TLS operations
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        output::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let global = cli.global;
    match cli.command {
        Commands::Ls(args) => commands::list::run(args, Selection::Installed, &global).await,
        Commands::Enabled(args) => commands::list::run(args, Selection::Enabled, &global).await,
        Commands::Disabled(args) => commands::list::run(args, Selection::Disabled, &global).await,
        Commands::Outdated => commands::outdated::run(&global).await,
        Commands::Info(args) => commands::info::run(args, &global).await,
        Commands::Search(args) => commands::search::run(args, &global).await,
        Commands::Install(args) => commands::install::run(args, &global).await,
        Commands::Uninstall(args) => commands::uninstall::run(args, &global).await,
        Commands::Reinstall(args) => commands::reinstall::run(args, &global).await,
        Commands::Update => commands::update::run(&global).await,
        Commands::Enable(args) => commands::toggle::enable(args, &global).await,
        Commands::Disable(args) => commands::toggle::disable(args, &global).await,
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Listings go to stdout; keep progress logs out of them unless asked
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
