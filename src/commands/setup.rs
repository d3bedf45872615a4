/// `setup` command: persist the API key.
use crate::cli::args::SetupArgs;
use crate::config::Config;
use crate::pipeline::{CliError, Pipeline};

/// Run `sublime setup`.
///
/// # Errors
///
/// Returns `CliError::Config` if the configuration file cannot be written.
pub fn run(args: &SetupArgs, pipeline: &mut Pipeline<'_>) -> Result<(), CliError> {
    let config = Config {
        api_key: Some(args.api_key.clone()),
        api_url: args.api_url.clone(),
    };
    let path = pipeline.config().save(&config)?;
    pipeline.echo(&format!("Configuration saved to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::pipeline::testing::Harness;

    #[test]
    fn test_setup_saves_key() {
        let mut h = Harness::responding(Ok(json!({})));

        let code = h.run(&["setup", "-k", "secret"]);

        assert_eq!(code, 0);
        let saved = h.config.saved.borrow().clone().unwrap();
        assert_eq!(saved.api_key.as_deref(), Some("secret"));
        assert_eq!(saved.api_url, None);
        assert_eq!(h.stdout(), "Configuration saved to memory://config.toml\n");
        assert!(h.calls.all().is_empty());
    }
}
