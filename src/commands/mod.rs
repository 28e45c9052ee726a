use crate::cli::{Cli, Commands};
use crate::{Config, Workspace};
use anyhow::Result;

mod env;
mod setup;
mod status;

pub fn execute(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    tracing::debug!(path = %config_path.display(), "loading config");
    let config = Config::load(&config_path)?;

    let workspace = Workspace::new(&config)?;

    match cli.command {
        Commands::Setup => setup::execute(&config, &workspace),

        Commands::Env => env::execute(&workspace),

        Commands::Status => status::execute(&workspace),
    }
}
