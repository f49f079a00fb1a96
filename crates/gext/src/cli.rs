//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// gext - Manage GNOME Shell extensions from the command line
#[derive(Parser, Debug)]
#[command(name = "gext")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Directory holding installed extensions
    #[arg(long, global = true, value_name = "DIR")]
    pub extensions_dir: Option<Utf8PathBuf>,

    /// Shell version to query the registry for (detected when omitted)
    #[arg(long, global = true, value_name = "VERSION")]
    pub shell_version: Option<String>,

    /// Do not ask the running shell to reload after changes
    #[arg(long, global = true)]
    pub no_reload: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List installed extensions
    #[command(visible_alias = "list")]
    Ls(ListArgs),

    /// List enabled extensions
    Enabled(ListArgs),

    /// List installed extensions that are not enabled
    Disabled(ListArgs),

    /// Show installed extensions with a newer version in the registry
    Outdated,

    /// Show extension metadata
    Info(InfoArgs),

    /// Search the registry
    Search(SearchArgs),

    /// Install an extension from the registry
    Install(InstallArgs),

    /// Remove an installed extension
    #[command(visible_alias = "rm")]
    Uninstall(UninstallArgs),

    /// Uninstall and install again, keeping the enabled state
    Reinstall(UuidArgs),

    /// Reinstall every outdated extension
    Update,

    /// Enable an installed extension
    Enable(UuidArgs),

    /// Disable an installed extension
    Disable(UuidArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Extension identifier
    pub uuid: String,

    /// Show the registry record instead of the installed metadata
    #[arg(short, long)]
    pub remote: bool,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search term
    pub term: String,
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Extension identifier
    pub uuid: String,

    /// Enable the extension after installing it
    #[arg(long)]
    pub enable: bool,
}

#[derive(Args, Debug)]
pub struct UninstallArgs {
    /// Extension identifier
    pub uuid: String,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct UuidArgs {
    /// Extension identifier
    pub uuid: String,
}
