use std::fs;
use std::io;
use std::os::unix::fs::symlink;
use std::path::Path;

use crate::config::Config;
use crate::environment::{source_line, Environment};
use crate::error::SetupError;
use crate::ui;
use crate::upsert::{upsert_line, UpsertOutcome};
use crate::workspace::{Workspace, WorkspacePath};

const EXPORTS_HEADER: &str = "# Generated by xs-dev CLI\n";

pub const SUCCESS_MESSAGE: &str = "Moddable SDK successfully set up! Start a new terminal session and run the \"helloworld example\": xs-dev run --example helloworld";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneOutcome {
    Cloned,
    AlreadyInstalled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Linked,
    AlreadyExists,
}

/// Installs the Moddable SDK mac tooling.
///
/// Steps run in order and the first failure stops the run; nothing already
/// done is rolled back.
pub struct Setup<'a> {
    config: &'a Config,
    workspace: &'a Workspace,
}

impl<'a> Setup<'a> {
    pub fn new(config: &'a Config, workspace: &'a Workspace) -> Self {
        Self { config, workspace }
    }

    pub fn run(&self) -> Result<(), SetupError> {
        ui::info("Setting up the mac tools!");

        self.check_toolchain()?;
        self.prepare_install_dir()?;
        self.clone_repository()?;
        let environment = Environment::from_process(self.workspace)?;
        self.update_shell_files(&environment)?;
        self.build(&environment)?;
        self.link_xsbug()?;

        ui::success("Done", SUCCESS_MESSAGE);
        Ok(())
    }

    /// Probe for the host toolchain; output is discarded, only the exit status counts
    pub fn check_toolchain(&self) -> Result<(), SetupError> {
        let probe = &self.config.toolchain_probe;
        tracing::debug!(command = %probe, "probing host toolchain");

        match probe.to_command().output() {
            Ok(output) if output.status.success() => Ok(()),
            Ok(output) => {
                tracing::debug!(status = %output.status, "toolchain probe failed");
                Err(SetupError::MissingToolchain)
            }
            Err(err) => {
                tracing::debug!(error = %err, "toolchain probe could not run");
                Err(SetupError::MissingToolchain)
            }
        }
    }

    pub fn prepare_install_dir(&self) -> Result<(), SetupError> {
        let install_dir = self.workspace.path(WorkspacePath::InstallDir);
        fs::create_dir_all(&install_dir).map_err(SetupError::InstallDir)?;

        let exports = self.workspace.path(WorkspacePath::ExportsFile);
        if !exports.exists() {
            tracing::debug!(path = %exports.display(), "creating exports file");
            fs::write(&exports, EXPORTS_HEADER).map_err(SetupError::InstallDir)?;
        }

        Ok(())
    }

    pub fn clone_repository(&self) -> Result<CloneOutcome, SetupError> {
        let install_path = self.workspace.path(WorkspacePath::InstallPath);
        if install_path.exists() {
            ui::info("Moddable repo already installed");
            return Ok(CloneOutcome::AlreadyInstalled);
        }

        let url = &self.config.repository;
        let progress = ui::Progress::start("Cloning", format!("{url} repo"));
        tracing::info!(url = %url, path = %install_path.display(), "cloning repository");

        git2::Repository::clone(url, &install_path).map_err(SetupError::Clone)?;

        progress.done("Cloned", None);
        Ok(CloneOutcome::Cloned)
    }

    /// Source the exports file from the profile and write both exports into it
    pub fn update_shell_files(&self, environment: &Environment) -> Result<(), SetupError> {
        let profile = self.workspace.path(WorkspacePath::Profile);
        let exports = self.workspace.path(WorkspacePath::ExportsFile);

        upsert(&profile, &source_line(self.workspace))?;

        for line in environment.export_lines() {
            upsert(&exports, &line)?;
        }

        Ok(())
    }

    pub fn build(&self, environment: &Environment) -> Result<(), SetupError> {
        let build_dir = self.workspace.path(WorkspacePath::Build);
        let command = &self.config.build_command;
        let progress = ui::Progress::start("Building", "platform tooling");
        tracing::info!(command = %command, cwd = %build_dir.display(), "running build");

        let output = command
            .to_command()
            .current_dir(&build_dir)
            .envs(environment.vars())
            .output()
            .map_err(|err| SetupError::Build(err.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                format!("`{command}` exited with {}", output.status)
            } else {
                stderr
            };
            return Err(SetupError::Build(detail));
        }

        progress.done("Built", None);
        Ok(())
    }

    pub fn link_xsbug(&self) -> Result<LinkOutcome, SetupError> {
        let source = self.workspace.path(WorkspacePath::XsbugApp);
        let target = self.workspace.path(WorkspacePath::XsbugLink);
        let progress = ui::Progress::start("Linking", "xsbug.app");

        let outcome = create_link(&source, &target)?;
        match outcome {
            LinkOutcome::Linked => {
                progress.done("Linked", Some(format!("to {}", target.display())))
            }
            LinkOutcome::AlreadyExists => progress.skip("xsbug.app symlink already exists"),
        }

        Ok(outcome)
    }
}

fn upsert(path: &Path, line: &str) -> Result<UpsertOutcome, SetupError> {
    upsert_line(path, line).map_err(|error| SetupError::Upsert {
        path: path.to_path_buf(),
        error,
    })
}

fn create_link(source: &Path, target: &Path) -> Result<LinkOutcome, SetupError> {
    match symlink(source, target) {
        Ok(()) => Ok(LinkOutcome::Linked),
        Err(err) if is_already_exists(&err) => Ok(LinkOutcome::AlreadyExists),
        Err(err) => Err(SetupError::Symlink(err)),
    }
}

/// "Already exists" by error kind, or by message where no kind is reported
fn is_already_exists(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::AlreadyExists || err.to_string().contains("exists")
}
