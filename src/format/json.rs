/// JSON renderer shared by every command.
use serde_json::Value;

/// Pretty-printed JSON. `serde_json::Map` keeps keys sorted, so output is stable.
pub fn render(result: &Value, _verbose: bool) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| result.to_string())
}
