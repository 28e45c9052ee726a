use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const MODDABLE_REPO: &str = "https://github.com/Moddable-OpenSource/moddable";
const APPLICATIONS_DIR: &str = "/Applications";

/// User overrides read from `$XDG_CONFIG_HOME/xs-dev/config.toml`.
///
/// Every key is optional; a missing file is the same as an empty one.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Remote cloned into the install path
    #[serde(default = "default_repository")]
    pub repository: String,
    /// Install root; `~` and environment variables are expanded
    #[serde(default)]
    pub install_dir: Option<String>,
    /// Directory receiving the xsbug.app symlink
    #[serde(default = "default_applications_dir")]
    pub applications_dir: String,
    /// Command that succeeds only when the host toolchain is installed
    #[serde(default = "default_toolchain_probe")]
    pub toolchain_probe: CommandLine,
    /// Command run in the platform makefiles directory
    #[serde(default = "default_build_command")]
    pub build_command: CommandLine,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository: default_repository(),
            install_dir: None,
            applications_dir: default_applications_dir(),
            toolchain_probe: default_toolchain_probe(),
            build_command: default_build_command(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Default location: `$XDG_CONFIG_HOME/xs-dev/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let base = match env::var_os("XDG_CONFIG_HOME") {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => directories::BaseDirs::new()
                .context("Failed to get home directory")?
                .home_dir()
                .join(".config"),
        };

        Ok(base.join("xs-dev").join("config.toml"))
    }
}

/// A program and its arguments, written in TOML as a non-empty array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    pub fn to_command(&self) -> std::process::Command {
        let mut command = std::process::Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl TryFrom<Vec<String>> for CommandLine {
    type Error = String;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        let mut parts = value.into_iter();
        let program = parts
            .next()
            .filter(|program| !program.trim().is_empty())
            .ok_or_else(|| "command must name a program".to_string())?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

fn default_repository() -> String {
    MODDABLE_REPO.to_string()
}

fn default_applications_dir() -> String {
    APPLICATIONS_DIR.to_string()
}

fn default_toolchain_probe() -> CommandLine {
    CommandLine::new("xcode-select", &["-p"])
}

fn default_build_command() -> CommandLine {
    CommandLine::new("make", &[])
}
