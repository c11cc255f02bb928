//! Error types for the package-manager layer
//!
//! Application glue (CLI, config) uses `anyhow`; everything below `rpm`
//! returns `YumError` so callers can match on the failure kind.

use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum YumError {
    /// A listing line did not have the `Name.Arch Version Repo` shape
    #[error("Malformed package line: {0:?}")]
    MalformedLine(String),

    #[error("Empty command")]
    EmptyCommand,

    /// The program could not be started at all (missing binary, permissions)
    #[error("Failed to execute `{command}`: {source}")]
    ProcessSpawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Output of `{command}` is not valid UTF-8: {source}")]
    Decode {
        command: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error("Package file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read package file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No supported package manager found (tried: {})", tried.join(", "))]
    ToolNotFound { tried: Vec<String> },
}

pub type Result<T> = std::result::Result<T, YumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_line_message_quotes_line() {
        let err = YumError::MalformedLine("badline".to_string());
        assert_eq!(err.to_string(), "Malformed package line: \"badline\"");
    }

    #[test]
    fn test_tool_not_found_lists_candidates() {
        let err = YumError::ToolNotFound {
            tried: vec!["dnf".into(), "yum".into()],
        };
        assert!(err.to_string().contains("dnf, yum"));
    }
}
