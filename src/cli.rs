use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// xs-dev - Moddable SDK toolchain setup
///
/// Clones the Moddable SDK, wires its environment into your shell profile,
/// builds the host tooling and links the xsbug debugger into Applications.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/xs-dev/config.toml)
    #[arg(long, global = true, value_name = "PATH", env = "XS_DEV_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install and build the Moddable SDK for macOS
    ///
    /// Safe to re-run: an existing clone is reused and shell profile lines
    /// are only added once.
    Setup,

    /// Print the SDK export statements (for `eval "$(xs-dev env)"`)
    Env,

    /// Show which setup steps have been completed
    Status,
}
