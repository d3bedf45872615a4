/// Errors surfaced by the command pipeline.
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::API_KEY_ENV;

/// Every way a command can end without success.
#[derive(Debug, Error)]
pub enum CliError {
    /// No API key from the flag, the environment or the config file.
    #[error(
        "API key not found.\n\n\
         To fix this problem, please use any of the following methods (in order of precedence):\n\
         - Pass it using the -k/--api-key option.\n\
         - Set it in the {env} environment variable.\n\
         - Run '{prog} setup' to save it to the configuration file.",
        env = API_KEY_ENV
    )]
    MissingApiKey {
        /// Program name shown in the `setup` hint.
        prog: String,
    },

    /// `analyze` was given neither `-D` nor `-d` and there is no `detections.pql`.
    #[error("You must specify either a .pql detections file (-D) or a raw detection (-d)")]
    MissingDetectionInput,

    /// A file named on the command line does not exist.
    #[error("Invalid value for '{flag}': File '{}' does not exist.", .path.display())]
    FileNotFound {
        /// Flag that named the file.
        flag: &'static str,
        /// Path as given.
        path: PathBuf,
    },

    /// The server rejected the availability check for a subcommand it does not support.
    #[error("'{name}' subcommand is not implemented yet.")]
    NotImplemented {
        /// Subcommand name.
        name: String,
    },

    /// A classified API failure.
    #[error("API error: {detail}")]
    Api {
        /// Detail extracted from the failure.
        detail: String,
    },

    /// The configuration file could not be read or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading an input or writing an output failed.
    #[error("{}: {source}", .path.display())]
    Io {
        /// File involved, or `-` for stdout.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// The API answered successfully with an unexpected shape.
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    /// No renderer registered for a format/command pair.
    #[error("No formatter registered for command '{command}'")]
    NoFormatter {
        /// Command name that was looked up.
        command: String,
    },
}

impl CliError {
    /// Wrap an I/O error on `path`.
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Wrap an I/O error on standard output.
    pub fn stdout(source: io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("-"),
            source,
        }
    }

    /// Return the process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingDetectionInput
            | Self::FileNotFound { .. }
            | Self::NotImplemented { .. } => 2,
            Self::MissingApiKey { .. }
            | Self::Api { .. }
            | Self::Config(_)
            | Self::Io { .. }
            | Self::MalformedResponse(_)
            | Self::NoFormatter { .. } => 1,
        }
    }
}
