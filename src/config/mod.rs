/// Configuration layer: persisted store, environment overlay, key resolution.
pub mod resolve;
pub mod store;

pub use resolve::resolve_api_key;
pub use store::{API_KEY_ENV, Config, ConfigSource, DEFAULT_API_URL, FileConfigStore};
