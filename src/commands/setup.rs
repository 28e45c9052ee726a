use crate::{Config, Setup, Workspace};
use anyhow::Result;

pub fn execute(config: &Config, workspace: &Workspace) -> Result<()> {
    Setup::new(config, workspace).run()?;
    Ok(())
}
