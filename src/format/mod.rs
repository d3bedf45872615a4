/// Result formatter registry: (format, command) → renderer.
///
/// Machine-readable formats render every command the same way and register a
/// single function. Text output is shaped per command, so its entry is a
/// second table keyed by command name.
pub mod json;
pub mod text;

use std::collections::HashMap;

use serde_json::Value;

use crate::cli::OutputFormat;
use crate::pipeline::CliError;

/// A pure renderer of a command result. The flag is `--verbose`.
pub type RenderFn = fn(&Value, bool) -> String;

/// What a format maps to.
#[derive(Clone)]
pub enum FormatterEntry {
    /// One renderer for every command.
    Uniform(RenderFn),
    /// One renderer per command name.
    PerCommand(HashMap<&'static str, RenderFn>),
}

/// Lookup table from output format to renderer(s).
pub struct FormatterRegistry {
    entries: HashMap<OutputFormat, FormatterEntry>,
}

impl FormatterRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registry with the built-in json and txt renderers.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(OutputFormat::Json, FormatterEntry::Uniform(json::render));
        registry.register(
            OutputFormat::Txt,
            FormatterEntry::PerCommand(HashMap::from([
                ("enrich", text::enrich as RenderFn),
                ("enrich_details", text::enrich_details as RenderFn),
                ("analyze", text::analyze as RenderFn),
                ("query", text::query as RenderFn),
            ])),
        );
        registry
    }

    /// Register (or replace) the entry for `format`.
    pub fn register(&mut self, format: OutputFormat, entry: FormatterEntry) {
        self.entries.insert(format, entry);
    }

    /// Render `result` for `command` in `format`, trailing newlines stripped.
    ///
    /// # Errors
    ///
    /// Returns `CliError::NoFormatter` if nothing is registered for the pair.
    pub fn format(
        &self,
        format: OutputFormat,
        command: &str,
        result: &Value,
        verbose: bool,
    ) -> Result<String, CliError> {
        let render = match self.entries.get(&format) {
            Some(FormatterEntry::Uniform(render)) => *render,
            Some(FormatterEntry::PerCommand(by_command)) => {
                *by_command
                    .get(command)
                    .ok_or_else(|| CliError::NoFormatter {
                        command: command.to_owned(),
                    })?
            }
            None => {
                return Err(CliError::NoFormatter {
                    command: command.to_owned(),
                });
            }
        };
        let mut output = render(result, verbose);
        output.truncate(output.trim_end_matches('\n').len());
        Ok(output)
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn trailing(_: &Value, _: bool) -> String {
        "line\n\n\n".to_owned()
    }

    #[test]
    fn test_uniform_entry_ignores_command() {
        let registry = FormatterRegistry::standard();
        let value = json!({"a": 1});
        let a = registry.format(OutputFormat::Json, "query", &value, false).unwrap();
        let b = registry.format(OutputFormat::Json, "analyze", &value, false).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_per_command_entry_requires_known_command() {
        let registry = FormatterRegistry::standard();
        let err = registry
            .format(OutputFormat::Txt, "hunt", &json!({}), false)
            .unwrap_err();
        assert!(matches!(err, CliError::NoFormatter { .. }));
    }

    #[test]
    fn test_trailing_newlines_stripped() {
        let mut registry = FormatterRegistry::new();
        registry.register(OutputFormat::Txt, FormatterEntry::Uniform(trailing));
        let out = registry.format(OutputFormat::Txt, "query", &json!(null), false).unwrap();
        assert_eq!(out, "line");
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let registry = FormatterRegistry::standard();
        let result = json!({
            "message_data_model": {
                "subject": {"subject": "Invoice"},
                "sender": {"email": {"email": "billing@example.com"}}
            },
            "message_id": "abc"
        });
        for (format, command) in [
            (OutputFormat::Json, "enrich"),
            (OutputFormat::Txt, "enrich_details"),
            (OutputFormat::Txt, "enrich"),
        ] {
            for verbose in [false, true] {
                let first = registry.format(format, command, &result, verbose).unwrap();
                let second = registry.format(format, command, &result, verbose).unwrap();
                assert_eq!(first, second);
            }
        }
    }
}
