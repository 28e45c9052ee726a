use crate::{Environment, Workspace};
use anyhow::Result;

pub fn execute(workspace: &Workspace) -> Result<()> {
    let environment = Environment::from_process(workspace)?;
    for line in environment.export_lines() {
        println!("{line}");
    }

    Ok(())
}
