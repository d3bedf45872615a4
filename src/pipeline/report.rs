/// Error reporting capability injected into the pipeline.
use crate::cli::write_error;

/// Log target for API failures. Logging setup pins it at `error` whatever
/// `RUST_LOG` says.
pub const REPORT_TARGET: &str = "sublime::report";

/// Receives the single user-visible line for a failed command.
pub trait Reporter {
    /// A classified API failure. `detail` excludes the `API error:` prefix.
    fn api_error(&self, detail: &str);

    /// A usage, configuration or I/O failure.
    fn usage_error(&self, message: &str);
}

/// Production reporter: API failures through `tracing`, usage errors on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn api_error(&self, detail: &str) {
        tracing::error!(target: REPORT_TARGET, "API error: {detail}");
    }

    fn usage_error(&self, message: &str) {
        write_error(message);
    }
}
