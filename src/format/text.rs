/// Human-readable renderers, one per command.
use std::fmt::Write;

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};
use serde_json::Value;

const INDENT: &str = "  ";

// --- enrich ---

/// Summary of an enrich result, always printed to the console.
///
/// Expects the full composite: `message_data_model` plus auxiliary fields.
pub fn enrich_details(result: &Value, verbose: bool) -> String {
    let mdm = result.get("message_data_model").unwrap_or(&Value::Null);
    let links = array_at(mdm, "/body/links");
    let attachments = array_at(mdm, "/attachments");

    let mut out = String::from("Enrichment details\n");
    field(&mut out, "Subject", text_at(mdm, "/subject/subject").unwrap_or("(none)"));
    field(&mut out, "Sender", &sender(mdm));
    field(&mut out, "Recipients", &recipients(mdm));
    field(&mut out, "Links", &links.len().to_string());
    field(&mut out, "Attachments", &attachments.len().to_string());

    if let Some(extra) = result.as_object() {
        for (key, value) in extra.iter().filter(|(k, _)| *k != "message_data_model") {
            if is_compound(value) {
                if verbose {
                    field(&mut out, key, &value.to_string());
                }
            } else {
                field(&mut out, key, &scalar(value));
            }
        }
    }

    if verbose {
        if !links.is_empty() {
            out.push_str("\nLinks:\n");
            for link in links {
                let url = text_at(link, "/href_url/url").unwrap_or("(no url)");
                let _ = writeln!(out, "{INDENT}{url}");
            }
        }
        if !attachments.is_empty() {
            out.push_str("\nAttachments:\n");
            for attachment in attachments {
                let name = text_at(attachment, "/file_name").unwrap_or("(unnamed)");
                match attachment.get("size").and_then(Value::as_u64) {
                    Some(size) => {
                        let _ = writeln!(out, "{INDENT}{name} ({size} bytes)");
                    }
                    None => {
                        let _ = writeln!(out, "{INDENT}{name}");
                    }
                }
            }
        }
    }

    out
}

/// Message data model as an indented tree.
///
/// Receives the narrowed MDM, not the enrich composite.
pub fn enrich(mdm: &Value, verbose: bool) -> String {
    tree(mdm, verbose)
}

fn sender(mdm: &Value) -> String {
    let email = text_at(mdm, "/sender/email/email");
    let name = text_at(mdm, "/sender/display_name").filter(|n| !n.is_empty());
    match (name, email) {
        (Some(name), Some(email)) => format!("{name} <{email}>"),
        (None, Some(email)) => email.to_owned(),
        (Some(name), None) => name.to_owned(),
        (None, None) => "(none)".to_owned(),
    }
}

fn recipients(mdm: &Value) -> String {
    let to = array_at(mdm, "/recipients/to").len();
    let cc = array_at(mdm, "/recipients/cc").len();
    let bcc = array_at(mdm, "/recipients/bcc").len();
    format!("{} (to: {to}, cc: {cc}, bcc: {bcc})", to + cc + bcc)
}

// --- analyze ---

/// Detection results. Non-verbose lists only flagged detections.
pub fn analyze(result: &Value, verbose: bool) -> String {
    let Some(results) = result.get("results").and_then(Value::as_array) else {
        return tree(result, verbose);
    };

    let flagged = results.iter().filter(|r| is_flagged(r)).count();
    let failed = results
        .iter()
        .filter(|r| r.get("success").and_then(Value::as_bool) == Some(false))
        .count();

    let mut out = String::new();
    let rows: Vec<&Value> = results.iter().filter(|r| verbose || is_flagged(r)).collect();
    if !rows.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        if verbose {
            table.set_header(["DETECTION", "FLAGGED", "ERROR"]);
            for r in rows {
                table.add_row([
                    detection_name(r),
                    if is_flagged(r) { "yes" } else { "no" },
                    r.get("error").and_then(Value::as_str).unwrap_or(""),
                ]);
            }
        } else {
            table.set_header(["FLAGGED DETECTION"]);
            for r in rows {
                table.add_row([detection_name(r)]);
            }
        }
        let _ = writeln!(out, "{table}");
    }

    let _ = write!(out, "{flagged} of {} detections flagged", results.len());
    if failed > 0 {
        let _ = write!(out, ", {failed} failed to run");
    }
    out
}

fn is_flagged(result: &Value) -> bool {
    result.get("result").and_then(Value::as_bool) == Some(true)
}

fn detection_name(result: &Value) -> &str {
    result
        .get("name")
        .and_then(Value::as_str)
        .or_else(|| result.get("source").and_then(Value::as_str))
        .unwrap_or("(unnamed)")
}

// --- query ---

/// Query result, or the server-side error if the query did not run.
pub fn query(result: &Value, verbose: bool) -> String {
    let mut out = String::new();
    if verbose {
        if let Some(q) = result.get("query").and_then(Value::as_str) {
            let _ = writeln!(out, "Query: {q}");
        }
    }

    if result.get("success").and_then(Value::as_bool) == Some(false) {
        let error = result
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        let _ = write!(out, "Query failed: {error}");
        return out;
    }

    let value = result.get("result").unwrap_or(result);
    if is_compound(value) && !is_empty(value) {
        out.push_str("Result:\n");
        write_tree(value, 1, verbose, &mut out);
    } else {
        let _ = write!(out, "Result: {}", scalar(value));
    }
    out
}

// --- Generic tree rendering ---

/// Render any JSON value as `key: value` lines indented by nesting depth.
/// Empty values are skipped unless `verbose`.
fn tree(value: &Value, verbose: bool) -> String {
    let mut out = String::new();
    if is_compound(value) {
        write_tree(value, 0, verbose, &mut out);
    } else {
        out.push_str(&scalar(value));
    }
    out
}

fn write_tree(value: &Value, depth: usize, verbose: bool, out: &mut String) {
    let pad = INDENT.repeat(depth);
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if !verbose && is_empty(child) {
                    continue;
                }
                if is_compound(child) && !is_empty(child) {
                    let _ = writeln!(out, "{pad}{key}:");
                    write_tree(child, depth + 1, verbose, out);
                } else {
                    let _ = writeln!(out, "{pad}{key}: {}", scalar(child));
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if is_compound(item) && !is_empty(item) {
                    let _ = writeln!(out, "{pad}-");
                    write_tree(item, depth + 1, verbose, out);
                } else {
                    let _ = writeln!(out, "{pad}- {}", scalar(item));
                }
            }
        }
        other => {
            let _ = writeln!(out, "{pad}{}", scalar(other));
        }
    }
}

// --- Helpers ---

fn field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{INDENT}{:<13}{value}", format!("{label}:"));
}

fn text_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}

fn array_at<'a>(value: &'a Value, pointer: &str) -> &'a [Value] {
    value
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn is_compound(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(a) if a.is_empty() => "[]".to_owned(),
        Value::Object(o) if o.is_empty() => "{}".to_owned(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn enrich_result() -> Value {
        json!({
            "message_data_model": {
                "subject": {"subject": "Your invoice"},
                "sender": {
                    "display_name": "Billing",
                    "email": {"email": "billing@example.com"}
                },
                "recipients": {
                    "to": [{"email": {"email": "a@example.com"}}],
                    "cc": [{"email": {"email": "b@example.com"}}, {"email": {"email": "c@example.com"}}]
                },
                "body": {
                    "links": [{"href_url": {"url": "https://example.com/pay"}}]
                },
                "attachments": [{"file_name": "invoice.pdf", "size": 1024}]
            },
            "message_id": "abc123"
        })
    }

    #[test]
    fn test_enrich_details_summary() {
        let out = enrich_details(&enrich_result(), false);
        assert_eq!(
            out,
            "Enrichment details\n\
             \x20 Subject:     Your invoice\n\
             \x20 Sender:      Billing <billing@example.com>\n\
             \x20 Recipients:  3 (to: 1, cc: 2, bcc: 0)\n\
             \x20 Links:       1\n\
             \x20 Attachments: 1\n\
             \x20 message_id:  abc123\n"
        );
    }

    #[test]
    fn test_enrich_details_verbose_lists_links_and_attachments() {
        let out = enrich_details(&enrich_result(), true);
        assert!(out.contains("Links:\n  https://example.com/pay\n"));
        assert!(out.contains("Attachments:\n  invoice.pdf (1024 bytes)\n"));
    }

    #[test]
    fn test_enrich_details_missing_fields() {
        let out = enrich_details(&json!({"message_data_model": {}}), false);
        assert!(out.contains("Subject:     (none)"));
        assert!(out.contains("Sender:      (none)"));
    }

    #[test]
    fn test_enrich_tree_skips_empty_unless_verbose() {
        let mdm = json!({"subject": {"subject": "hi"}, "attachments": []});
        assert_eq!(enrich(&mdm, false), "subject:\n  subject: hi\n");
        assert_eq!(
            enrich(&mdm, true),
            "attachments: []\nsubject:\n  subject: hi\n"
        );
    }

    #[test]
    fn test_analyze_flagged_only() {
        let result = json!({"results": [
            {"name": "suspicious_link", "result": true, "success": true},
            {"name": "benign", "result": false, "success": true},
            {"name": "broken", "result": false, "success": false, "error": "syntax error"}
        ]});
        let out = analyze(&result, false);
        assert!(out.contains("suspicious_link"));
        assert!(!out.contains("benign"));
        assert!(out.ends_with("1 of 3 detections flagged, 1 failed to run"));
    }

    #[test]
    fn test_analyze_verbose_shows_all_and_errors() {
        let result = json!({"results": [
            {"name": "benign", "result": false, "success": true},
            {"name": "broken", "result": false, "success": false, "error": "syntax error"}
        ]});
        let out = analyze(&result, true);
        assert!(out.contains("benign"));
        assert!(out.contains("syntax error"));
        assert!(out.ends_with("0 of 2 detections flagged, 1 failed to run"));
    }

    #[test]
    fn test_analyze_nothing_flagged_has_no_table() {
        let result = json!({"results": [{"name": "benign", "result": false}]});
        assert_eq!(analyze(&result, false), "0 of 1 detections flagged");
    }

    #[test]
    fn test_query_scalar_result() {
        let result = json!({"query": "length(attachments)", "result": 2, "success": true});
        assert_eq!(query(&result, false), "Result: 2");
        assert_eq!(
            query(&result, true),
            "Query: length(attachments)\nResult: 2"
        );
    }

    #[test]
    fn test_query_compound_result() {
        let result = json!({"result": ["a.pdf", "b.doc"], "success": true});
        assert_eq!(query(&result, false), "Result:\n  - a.pdf\n  - b.doc\n");
    }

    #[test]
    fn test_query_failure() {
        let result = json!({"result": null, "success": false, "error": "unknown field"});
        assert_eq!(query(&result, false), "Query failed: unknown field");
    }
}
