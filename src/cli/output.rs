/// Output sinks: rendered results go to stdout or a file, errors to stderr.
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::pipeline::CliError;

/// Where the primary rendering of a command result is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Standard output (or whatever writer the pipeline was given).
    Stdout,
    /// A file, created (or truncated) at emit time.
    File(PathBuf),
}

impl OutputSink {
    /// Sink for an optional `-o/--output` argument. `-` means stdout.
    #[must_use]
    pub fn from_arg(path: Option<&Path>) -> Self {
        match path {
            Some(p) if p != Path::new("-") => Self::File(p.to_path_buf()),
            _ => Self::Stdout,
        }
    }

    /// Write `text` followed by exactly one newline.
    ///
    /// File sinks are opened here, only once there is something to write, and
    /// a confirmation naming the file goes to `stdout`.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Io` if the file cannot be created or either writer fails.
    pub fn write(&self, text: &str, stdout: &mut dyn Write) -> Result<(), CliError> {
        match self {
            Self::Stdout => writeln!(stdout, "{text}").map_err(CliError::stdout),
            Self::File(path) => {
                let mut file = File::create(path).map_err(|e| CliError::io(path, e))?;
                writeln!(file, "{text}").map_err(|e| CliError::io(path, e))?;
                tracing::debug!(path = %path.display(), "output written");
                writeln!(stdout, "Output saved to {}", path.display()).map_err(CliError::stdout)
            }
        }
    }
}

/// Write a usage-style error to stderr.
pub fn write_error(message: &str) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    let _ = writeln!(out, "Error: {message}");
}
