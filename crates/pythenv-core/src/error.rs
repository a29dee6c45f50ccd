//! Error types shared by the runner crates.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PythenvError>;

/// Errors returned while preparing or provisioning a run.
///
/// The target script's own exit status is never represented here.
#[derive(Debug, Error)]
pub enum PythenvError {
    /// Malformed invocation or missing declaration. Reported with usage help, exit status 1.
    #[error("{0}")]
    Configuration(String),

    /// An external collaborator (environment tool, installer) failed.
    #[error("Error running command '{command}': {stderr}")]
    Execution { command: String, stderr: String },

    /// Ctrl-C arrived before the script started.
    #[error("Interrupted")]
    Interrupted,

    #[error("{context} ({}): {source}", path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PythenvError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn io(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            context,
            path: path.into(),
            source,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_error_mentions_command_and_stderr() {
        let err = PythenvError::Execution {
            command: "virtualenv /tmp/pythenv-env-x".into(),
            stderr: "no space left".into(),
        };
        assert_eq!(
            err.to_string(),
            "Error running command 'virtualenv /tmp/pythenv-env-x': no space left"
        );
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_configuration_error_is_plain_message() {
        let err = PythenvError::configuration("Requirements not found in Python source file");
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "Requirements not found in Python source file");
    }

    #[test]
    fn test_interrupted_is_neither_configuration_nor_execution() {
        let err = PythenvError::Interrupted;
        assert!(err.is_interrupted());
        assert!(!err.is_configuration());
        assert_eq!(err.to_string(), "Interrupted");
    }
}
