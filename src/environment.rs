use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::error::SetupError;
use crate::workspace::{Workspace, WorkspacePath};

/// Login shell, used to pick the startup file that sources the exports file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Zsh,
    Bash,
    Sh,
}

impl Shell {
    /// Detect from `$SHELL`, falling back to a POSIX profile
    pub fn detect() -> Self {
        env::var("SHELL")
            .map(|shell| Self::from_path(&shell))
            .unwrap_or(Shell::Sh)
    }

    pub fn from_path(shell: &str) -> Self {
        let name = Path::new(shell)
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or(shell);

        match name.to_lowercase().as_str() {
            "zsh" => Shell::Zsh,
            "bash" => Shell::Bash,
            _ => Shell::Sh,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Shell::Zsh => "zsh",
            Shell::Bash => "bash",
            Shell::Sh => "sh",
        }
    }

    /// Startup file relative to the home directory
    pub fn profile_file(self) -> &'static str {
        match self {
            Shell::Zsh => ".zshrc",
            Shell::Bash => ".bash_profile",
            Shell::Sh => ".profile",
        }
    }
}

/// Values the SDK build expects in its environment.
///
/// These are handed to child processes explicitly; the current process
/// environment is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// `MODDABLE`: the cloned SDK root
    pub moddable: PathBuf,
    /// SDK release binaries
    pub bin: PathBuf,
    /// `PATH` with `bin` appended
    pub path: OsString,
}

impl Environment {
    /// Build from the current process `PATH`
    pub fn from_process(workspace: &Workspace) -> Result<Self, SetupError> {
        Self::new(workspace, env::var_os("PATH"))
    }

    pub fn new(workspace: &Workspace, current_path: Option<OsString>) -> Result<Self, SetupError> {
        let bin = workspace.path(WorkspacePath::Bin);
        let mut entries: Vec<PathBuf> = current_path
            .as_deref()
            .map(|path| env::split_paths(path).collect())
            .unwrap_or_default();
        entries.push(bin.clone());

        let path = env::join_paths(entries).map_err(SetupError::Environment)?;

        Ok(Self {
            moddable: workspace.path(WorkspacePath::InstallPath),
            bin,
            path,
        })
    }

    /// Lines kept in the exports file, in the order they are written
    pub fn export_lines(&self) -> [String; 2] {
        [
            format!("export MODDABLE={}", self.moddable.display()),
            format!("export PATH=\"{}:$PATH\"", self.bin.display()),
        ]
    }

    pub fn vars(&self) -> [(&'static str, &OsStr); 2] {
        [
            ("MODDABLE", self.moddable.as_os_str()),
            ("PATH", self.path.as_os_str()),
        ]
    }
}

/// Line added to the shell profile
pub fn source_line(workspace: &Workspace) -> String {
    format!(
        "source {}",
        workspace.path(WorkspacePath::ExportsFile).display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn workspace() -> Workspace {
        Workspace::from_parts(
            PathBuf::from("/home/dev"),
            PathBuf::from("/home/dev/.local/share"),
            PathBuf::from("/Applications"),
            Shell::Zsh,
        )
    }

    #[rstest]
    #[case("/bin/zsh", Shell::Zsh)]
    #[case("/usr/local/bin/bash", Shell::Bash)]
    #[case("zsh", Shell::Zsh)]
    #[case("/opt/homebrew/bin/fish", Shell::Sh)]
    #[case("/bin/sh", Shell::Sh)]
    #[case("", Shell::Sh)]
    fn test_shell_from_path(#[case] input: &str, #[case] expected: Shell) {
        assert_eq!(Shell::from_path(input), expected);
    }

    #[test]
    fn test_profile_file() {
        assert_eq!(Shell::Zsh.profile_file(), ".zshrc");
        assert_eq!(Shell::Bash.profile_file(), ".bash_profile");
        assert_eq!(Shell::Sh.profile_file(), ".profile");
    }

    #[test]
    fn test_environment_appends_bin_dir() {
        let workspace = workspace();
        let env = Environment::new(&workspace, Some(OsString::from("/usr/bin:/bin"))).unwrap();

        assert_eq!(env.moddable, PathBuf::from("/home/dev/.local/share/moddable"));
        assert_eq!(
            env.path,
            OsString::from("/usr/bin:/bin:/home/dev/.local/share/moddable/build/bin/mac/release")
        );
    }

    #[test]
    fn test_environment_without_path() {
        let env = Environment::new(&workspace(), None).unwrap();

        assert_eq!(
            env.path,
            OsString::from("/home/dev/.local/share/moddable/build/bin/mac/release")
        );
        let names: Vec<_> = env.vars().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["MODDABLE", "PATH"]);
    }

    #[test]
    fn test_lines() {
        let workspace = workspace();

        assert_eq!(
            source_line(&workspace),
            "source /home/dev/.local/share/xs-dev-export.sh"
        );
        let env = Environment::new(&workspace, None).unwrap();
        assert_eq!(
            env.export_lines(),
            [
                "export MODDABLE=/home/dev/.local/share/moddable".to_string(),
                "export PATH=\"/home/dev/.local/share/moddable/build/bin/mac/release:$PATH\""
                    .to_string(),
            ]
        );
    }
}
