use std::env::JoinPathsError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single setup step.
///
/// The message of each variant is what the user sees before the process
/// exits with status 1.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Xcode command line tools are required to build the SDK: https://developer.apple.com/xcode/")]
    MissingToolchain,

    #[error("Error setting up install directory: {0}")]
    InstallDir(io::Error),

    #[error("Error cloning moddable repo: {0}")]
    Clone(git2::Error),

    #[error("Error configuring environment: {0}")]
    Environment(JoinPathsError),

    #[error("Error updating {}: {error}", path.display())]
    Upsert { path: PathBuf, error: io::Error },

    #[error("Error building mac tooling: {0}")]
    Build(String),

    #[error("Issue creating symlink for xsbug.app: {0}")]
    Symlink(io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failed_step() {
        assert_eq!(
            SetupError::MissingToolchain.to_string(),
            "Xcode command line tools are required to build the SDK: https://developer.apple.com/xcode/"
        );
        assert_eq!(
            SetupError::Build("make: *** No targets.  Stop.".to_string()).to_string(),
            "Error building mac tooling: make: *** No targets.  Stop."
        );

        let err = SetupError::Upsert {
            path: PathBuf::from("/home/dev/.zshrc"),
            error: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Error updating /home/dev/.zshrc: denied");
    }
}
