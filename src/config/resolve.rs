/// API key resolution: explicit flag > environment > config file.
use super::ConfigSource;
use crate::pipeline::CliError;

/// Resolve the API key for one invocation.
///
/// A non-empty `explicit` key wins without touching the store. Otherwise the
/// store's key (environment already overlaid on the file) is used.
///
/// # Errors
///
/// Returns `CliError::MissingApiKey` when no source yields a non-empty key, or
/// `CliError::Config` if the store cannot be read.
pub fn resolve_api_key(
    explicit: Option<&str>,
    source: &dyn ConfigSource,
    prog: &str,
) -> Result<String, CliError> {
    if let Some(key) = explicit.filter(|k| !k.is_empty()) {
        tracing::debug!("using API key from command line");
        return Ok(key.to_owned());
    }

    source
        .load()?
        .api_key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| CliError::MissingApiKey {
            prog: prog.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::path::PathBuf;

    use super::*;
    use crate::config::Config;

    struct CountingSource {
        config: Config,
        loads: Cell<usize>,
    }

    impl CountingSource {
        fn with_key(key: Option<&str>) -> Self {
            Self {
                config: Config {
                    api_key: key.map(str::to_owned),
                    api_url: None,
                },
                loads: Cell::new(0),
            }
        }
    }

    impl ConfigSource for CountingSource {
        fn load(&self) -> Result<Config, CliError> {
            self.loads.set(self.loads.get() + 1);
            Ok(self.config.clone())
        }

        fn save(&self, _config: &Config) -> Result<PathBuf, CliError> {
            unreachable!("resolver never saves")
        }
    }

    #[test]
    fn test_flag_beats_store() {
        let source = CountingSource::with_key(Some("stored"));
        let key = resolve_api_key(Some("flag"), &source, "sublime").unwrap();
        assert_eq!(key, "flag");
        assert_eq!(source.loads.get(), 0);
    }

    #[test]
    fn test_store_used_without_flag() {
        let source = CountingSource::with_key(Some("stored"));
        assert_eq!(resolve_api_key(None, &source, "sublime").unwrap(), "stored");
    }

    #[test]
    fn test_empty_flag_falls_back_to_store() {
        let source = CountingSource::with_key(Some("stored"));
        assert_eq!(resolve_api_key(Some(""), &source, "sublime").unwrap(), "stored");
    }

    #[test]
    fn test_no_key_anywhere() {
        let source = CountingSource::with_key(Some(""));
        let err = resolve_api_key(None, &source, "sublime").unwrap_err();
        assert!(matches!(err, CliError::MissingApiKey { ref prog } if prog == "sublime"));
    }
}
