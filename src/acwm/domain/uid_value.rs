use std::collections::HashMap;
use thiserror::Error;

/// An entry of `signals.uid`: either a plain label or a set of labels keyed by language.
#[derive(Debug, Clone, PartialEq)]
pub enum UidValue {
    Text(String),
    #[allow(dead_code)]
    Labels(HashMap<String, String>),
}

#[derive(Error, Debug, PartialEq)]
#[error("expected a string or a map of strings, found {found}")]
pub struct UidValueError {
    pub found: &'static str,
}

impl TryFrom<serde_json::Value> for UidValue {
    type Error = UidValueError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        // A string is never read as a one-entry map, try it first.
        match value {
            serde_json::Value::String(text) => Ok(UidValue::Text(text)),
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| match value {
                    serde_json::Value::String(label) => Ok((key, label)),
                    _ => Err(UidValueError {
                        found: "a map with non-string values",
                    }),
                })
                .collect::<Result<HashMap<_, _>, _>>()
                .map(UidValue::Labels),
            other => Err(UidValueError { found: json_type(&other) }),
        }
    }
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn try_from_text() {
        let value = UidValue::try_from(json!("Fan Speed")).unwrap();

        assert_eq!(value, UidValue::Text("Fan Speed".to_string()));
    }

    #[test]
    fn try_from_labels() {
        let value = UidValue::try_from(json!({ "en": "Fan Speed", "de": "Lüfterstufe" })).unwrap();

        let expected = HashMap::from([
            ("en".to_string(), "Fan Speed".to_string()),
            ("de".to_string(), "Lüfterstufe".to_string()),
        ]);
        assert_eq!(value, UidValue::Labels(expected));
    }

    #[test]
    fn try_from_an_empty_map_as_labels() {
        let value = UidValue::try_from(json!({})).unwrap();

        assert_eq!(value, UidValue::Labels(HashMap::new()));
    }

    #[rstest]
    #[case(json!(42), "a number")]
    #[case(json!(true), "a boolean")]
    #[case(json!(null), "null")]
    #[case(json!(["On/Off"]), "an array")]
    #[case(json!({ "en": 1 }), "a map with non-string values")]
    fn try_from_rejects_other_shapes(#[case] input: serde_json::Value, #[case] found: &'static str) {
        assert_eq!(UidValue::try_from(input), Err(UidValueError { found }));
    }

    #[test]
    fn error_reports_the_found_type() {
        let error = UidValue::try_from(json!(42)).unwrap_err();

        assert_eq!(error.to_string(), "expected a string or a map of strings, found a number");
    }
}
