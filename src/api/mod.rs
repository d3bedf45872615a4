/// API client facade: the operations the CLI needs from the remote service.
pub mod client;
pub mod errors;
pub mod types;

use serde_json::Value;

pub use client::HttpConnector;
pub use errors::ApiError;
pub use types::{Artifact, DetectionInput};

/// Operations exposed by the remote analysis API.
///
/// Results are returned as raw JSON; their shape belongs to the server.
pub trait SublimeApi {
    /// Enrich a raw message into a message data model plus details.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or server failure.
    fn enrich(&self, artifact: &Artifact) -> Result<Value, ApiError>;

    /// Run detections against a raw message or MDM.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or server failure.
    fn analyze(&self, artifact: &Artifact, detections: &DetectionInput) -> Result<Value, ApiError>;

    /// Run a raw query against an MDM.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or server failure.
    fn query(&self, artifact: &Artifact, query: &str) -> Result<Value, ApiError>;

    /// Ask the server about a subcommand the client does not implement.
    ///
    /// # Errors
    ///
    /// `ApiError::RequestFailed` means the server does not support it either.
    fn not_implemented(&self, command: &str) -> Result<Value, ApiError>;
}

/// Builds an API client bound to a resolved key.
pub trait Connect {
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the client cannot be constructed.
    fn connect(&self, api_key: &str) -> Result<Box<dyn SublimeApi>, ApiError>;
}
