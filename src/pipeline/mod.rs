/// Command pipeline shared by every subcommand.
///
/// Stage order is fixed and each command runs it explicitly:
///
/// 1. read inputs (pre-flight validation, no network)
/// 2. resolve config and build the client ([`Pipeline::connect`])
/// 3. invoke the API operation
/// 4. classify failures ([`classify`])
/// 5. command-specific post-processing
/// 6. format ([`Pipeline::render`])
/// 7. emit ([`Pipeline::emit`], [`Pipeline::echo`])
///
/// Any error ends the run; [`Pipeline::execute`] reports it exactly once
/// through the injected [`Reporter`] and turns it into an exit code.
pub mod classify;
pub mod errors;
pub mod report;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::api::{Connect, SublimeApi};
use crate::cli::{Command, OutputFormat, OutputSink};
use crate::commands;
use crate::config::{ConfigSource, resolve_api_key};
use crate::format::FormatterRegistry;

pub use classify::{classify, classify_error};
pub use errors::CliError;
pub use report::{REPORT_TARGET, Reporter, TracingReporter};

/// Collaborators and settings for one invocation.
pub struct Pipeline<'a> {
    config: &'a dyn ConfigSource,
    connector: &'a dyn Connect,
    reporter: &'a dyn Reporter,
    stdout: &'a mut dyn Write,
    formatters: FormatterRegistry,
    workdir: PathBuf,
    prog: String,
    verbose: bool,
}

impl<'a> Pipeline<'a> {
    /// Pipeline writing to `stdout`, resolving relative default files against
    /// the process working directory.
    #[must_use]
    pub fn new(
        config: &'a dyn ConfigSource,
        connector: &'a dyn Connect,
        reporter: &'a dyn Reporter,
        stdout: &'a mut dyn Write,
        prog: impl Into<String>,
    ) -> Self {
        Self {
            config,
            connector,
            reporter,
            stdout,
            formatters: FormatterRegistry::standard(),
            workdir: PathBuf::new(),
            prog: prog.into(),
            verbose: false,
        }
    }

    /// Directory for default inputs (`detections.pql`) and synthesized outputs.
    #[must_use]
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    /// Pass `--verbose` to renderers.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run `command`, flush stdout, report any failure, and return the
    /// process exit code.
    pub fn execute(&mut self, command: &Command) -> i32 {
        tracing::debug!(command = command.name(), "executing");
        let result = commands::dispatch(command, self)
            .and_then(|()| self.stdout.flush().map_err(CliError::stdout));
        match result {
            Ok(()) => 0,
            Err(err) => {
                self.report(&err);
                err.exit_code()
            }
        }
    }

    fn report(&self, err: &CliError) {
        match err {
            CliError::Api { detail } => self.reporter.api_error(detail),
            other => self.reporter.usage_error(&other.to_string()),
        }
    }

    /// The config store, for commands that write it.
    #[must_use]
    pub fn config(&self) -> &dyn ConfigSource {
        self.config
    }

    /// `name` resolved against the working directory.
    #[must_use]
    pub fn workdir_path(&self, name: &str) -> PathBuf {
        self.workdir.join(name)
    }

    /// Resolve the API key and build a client bound to it.
    ///
    /// # Errors
    ///
    /// Returns `CliError::MissingApiKey`/`Config` from resolution, or a
    /// classified `CliError::Api` if the client cannot be built.
    pub fn connect(&self, explicit_key: Option<&str>) -> Result<Box<dyn SublimeApi>, CliError> {
        let api_key = resolve_api_key(explicit_key, self.config, &self.prog)?;
        classify(self.connector.connect(&api_key))
    }

    /// Render `result` for `command` in `format`.
    ///
    /// # Errors
    ///
    /// Returns `CliError::NoFormatter` if no renderer is registered.
    pub fn render(
        &self,
        format: OutputFormat,
        command: &str,
        result: &Value,
    ) -> Result<String, CliError> {
        self.formatters.format(format, command, result, self.verbose)
    }

    /// Write a line to stdout regardless of the output sink.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Io` if stdout cannot be written.
    pub fn echo(&mut self, text: &str) -> Result<(), CliError> {
        writeln!(self.stdout, "{text}").map_err(CliError::stdout)
    }

    /// Write rendered output to `sink`.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Io` if the sink cannot be written.
    pub fn emit(&mut self, text: &str, sink: &OutputSink) -> Result<(), CliError> {
        sink.write(text, &mut *self.stdout)
    }
}

/// Read a file named by `flag` as text.
///
/// # Errors
///
/// Returns `CliError::FileNotFound` if the file does not exist, and
/// `CliError::Io` naming the file on any other failure.
pub fn read_input(flag: &'static str, path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CliError::FileNotFound {
            flag,
            path: path.to_path_buf(),
        },
        _ => CliError::io(path, e),
    })
}

#[cfg(test)]
mod tests {
    use std::io;

    use clap::Parser;

    use super::*;
    use crate::cli::Cli;
    use crate::pipeline::testing::{Harness, MemoryConfig, RecordingReporter};

    /// Accepts writes, fails on flush like a closed pipe.
    struct BrokenPipe(Vec<u8>);

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_failed_flush_is_nonzero_exit() {
        let h = Harness::responding(Ok(Value::Null));
        let config = MemoryConfig::default();
        let reporter = RecordingReporter::default();
        let mut out = BrokenPipe(Vec::new());
        let cli = Cli::try_parse_from(["sublime", "setup", "-k", "secret"]).unwrap();

        let code = Pipeline::new(&config, &h.connector, &reporter, &mut out, "sublime")
            .execute(&cli.command);

        assert_eq!(code, 1);
        assert!(config.saved.borrow().is_some());
        let lines = reporter.lines.borrow();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Error: -: "), "{lines:?}");
    }

    #[test]
    fn test_flush_runs_after_success() {
        let mut h = Harness::responding(Ok(Value::Null));
        assert_eq!(h.run(&["setup", "-k", "secret"]), 0);
        assert!(h.reported().is_empty());
    }
}
