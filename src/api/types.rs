/// Request payload types shared by every `SublimeApi` implementation.
use serde_json::{Map, Value};

/// The email artifact a command operates on.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    /// Raw RFC 822 message text (an `.eml` file).
    RawMessage(String),
    /// A message data model produced by a previous `enrich`.
    MessageDataModel(Value),
}

impl Artifact {
    /// Classify file contents: a JSON object is an MDM, anything else is raw EML.
    #[must_use]
    pub fn from_contents(contents: String) -> Self {
        match serde_json::from_str::<Value>(&contents) {
            Ok(value @ Value::Object(_)) => Self::MessageDataModel(value),
            _ => Self::RawMessage(contents),
        }
    }

    /// Insert this artifact into a request body under its wire field name.
    pub fn insert_into(&self, body: &mut Map<String, Value>) {
        match self {
            Self::RawMessage(raw) => {
                body.insert("raw_message".to_owned(), Value::String(raw.clone()));
            }
            Self::MessageDataModel(mdm) => {
                body.insert("message_data_model".to_owned(), mdm.clone());
            }
        }
    }
}

/// Detection rules for `analyze`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionInput {
    /// Contents of a detections file.
    Source {
        /// File name, for logging.
        name: String,
        /// File contents, passed through untouched.
        source: String,
    },
    /// A single detection given on the command line.
    Raw(String),
}

impl DetectionInput {
    /// Insert the detections into a request body.
    pub fn insert_into(&self, body: &mut Map<String, Value>) {
        match self {
            Self::Source { source, .. } => {
                body.insert("detections_source".to_owned(), Value::String(source.clone()));
            }
            Self::Raw(raw) => {
                body.insert("detection".to_owned(), Value::String(raw.clone()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_json_object_is_mdm() {
        let artifact = Artifact::from_contents(r#"{"subject": {"subject": "hi"}}"#.to_owned());
        assert!(matches!(artifact, Artifact::MessageDataModel(_)));
    }

    #[test]
    fn test_eml_is_raw() {
        let eml = "From: a@example.com\nSubject: hi\n\nbody".to_owned();
        assert_eq!(Artifact::from_contents(eml.clone()), Artifact::RawMessage(eml));
    }

    #[test]
    fn test_json_scalar_is_raw() {
        assert!(matches!(
            Artifact::from_contents("42".to_owned()),
            Artifact::RawMessage(_)
        ));
    }

    #[test]
    fn test_insert_fields() {
        let mut body = Map::new();
        Artifact::MessageDataModel(json!({"a": 1})).insert_into(&mut body);
        DetectionInput::Raw("true".to_owned()).insert_into(&mut body);
        assert_eq!(
            Value::Object(body),
            json!({"message_data_model": {"a": 1}, "detection": "true"})
        );
    }
}
