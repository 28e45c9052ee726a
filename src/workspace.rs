use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::config::Config;
use crate::environment::Shell;

const REPO_DIR: &str = "moddable";
const EXPORTS_FILE: &str = "xs-dev-export.sh";
const PLATFORM: &str = "mac";
const XSBUG_APP: &str = "xsbug.app";

/// Workspace path types
#[derive(Debug, Clone, Copy)]
pub enum WorkspacePath {
    /// Install root: $XDG_DATA_HOME (default ~/.local/share)
    InstallDir,
    /// Cloned SDK: install root/moddable
    InstallPath,
    /// Generated exports: install root/xs-dev-export.sh
    ExportsFile,
    /// Release binaries: moddable/build/bin/mac/release
    Bin,
    /// Platform makefiles: moddable/build/makefiles/mac
    Build,
    /// Shell startup file for the detected shell
    Profile,
    /// Built debugger bundle inside the release binaries
    XsbugApp,
    /// Symlink placed in the applications directory
    XsbugLink,
}

/// Resolved filesystem layout of an SDK install
#[derive(Debug, Clone)]
pub struct Workspace {
    home: PathBuf,
    install_dir: PathBuf,
    applications_dir: PathBuf,
    shell: Shell,
}

impl Workspace {
    /// Resolve the layout from the user's environment and config overrides
    pub fn new(config: &Config) -> Result<Self> {
        let home = directories::BaseDirs::new()
            .context("Failed to get home directory")?
            .home_dir()
            .to_path_buf();

        let install_dir = match &config.install_dir {
            Some(dir) => expand_path(dir)?,
            None => Self::data_dir(&home),
        };
        let applications_dir = expand_path(&config.applications_dir)?;
        let shell = Shell::detect();

        tracing::debug!(
            home = %home.display(),
            install_dir = %install_dir.display(),
            shell = shell.as_str(),
            "resolved workspace"
        );

        Ok(Self::from_parts(home, install_dir, applications_dir, shell))
    }

    pub(crate) fn from_parts(
        home: PathBuf,
        install_dir: PathBuf,
        applications_dir: PathBuf,
        shell: Shell,
    ) -> Self {
        Self {
            home,
            install_dir,
            applications_dir,
            shell,
        }
    }

    /// Get the data directory ($XDG_DATA_HOME)
    fn data_dir(home: &std::path::Path) -> PathBuf {
        match env::var_os("XDG_DATA_HOME") {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => home.join(".local/share"),
        }
    }

    /// Get path for a specific workspace location
    pub fn path(&self, path_type: WorkspacePath) -> PathBuf {
        let install_path = self.install_dir.join(REPO_DIR);
        match path_type {
            WorkspacePath::InstallDir => self.install_dir.clone(),
            WorkspacePath::InstallPath => install_path,
            WorkspacePath::ExportsFile => self.install_dir.join(EXPORTS_FILE),
            WorkspacePath::Bin => install_path
                .join("build/bin")
                .join(PLATFORM)
                .join("release"),
            WorkspacePath::Build => install_path.join("build/makefiles").join(PLATFORM),
            WorkspacePath::Profile => self.home.join(self.shell.profile_file()),
            WorkspacePath::XsbugApp => self.path(WorkspacePath::Bin).join(XSBUG_APP),
            WorkspacePath::XsbugLink => self.applications_dir.join(XSBUG_APP),
        }
    }

    pub fn shell(&self) -> Shell {
        self.shell
    }

    /// Check if the SDK has been cloned
    pub fn is_installed(&self) -> bool {
        self.path(WorkspacePath::InstallPath).exists()
    }
}

fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded =
        shellexpand::full(raw).with_context(|| format!("Failed to expand path {:?}", raw))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
