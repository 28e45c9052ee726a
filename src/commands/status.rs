use crate::environment::source_line;
use crate::upsert::file_contains_line;
use crate::workspace::WorkspacePath;
use crate::{ui, Environment, Workspace};
use anyhow::{Context, Result};
use std::path::Path;

pub fn execute(workspace: &Workspace) -> Result<()> {
    let install_path = workspace.path(WorkspacePath::InstallPath);
    report(
        workspace.is_installed(),
        "Installed",
        format!("Moddable repo at {}", install_path.display()),
        "Moddable repo is not cloned; run 'xs-dev setup'",
    );

    let exports = workspace.path(WorkspacePath::ExportsFile);
    report(
        exports.exists(),
        "Exports",
        exports.display(),
        format!("exports file {} is missing", exports.display()),
    );

    let profile = workspace.path(WorkspacePath::Profile);
    report(
        contains(&profile, &source_line(workspace))?,
        "Profile",
        format!("{} sources the exports file", profile.display()),
        format!("{} does not source the exports file", profile.display()),
    );

    let environment = Environment::from_process(workspace)?;
    let mut exported = true;
    for line in environment.export_lines() {
        exported &= contains(&exports, &line)?;
    }
    report(
        exported,
        "Environment",
        "MODDABLE and PATH are exported",
        "MODDABLE or PATH export is missing from the exports file",
    );

    let link = workspace.path(WorkspacePath::XsbugLink);
    report(
        link.symlink_metadata().is_ok(),
        "xsbug",
        format!("linked at {}", link.display()),
        format!("{} is missing", link.display()),
    );

    Ok(())
}

fn contains(path: &Path, line: &str) -> Result<bool> {
    file_contains_line(path, line).with_context(|| format!("Failed to read {:?}", path))
}

fn report(ok: bool, label: &str, present: impl std::fmt::Display, missing: impl std::fmt::Display) {
    if ok {
        ui::success(label, present);
    } else {
        ui::warn(missing);
    }
}
