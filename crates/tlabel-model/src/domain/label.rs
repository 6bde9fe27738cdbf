use serde::{Deserialize, Serialize};

use crate::{ModelError, ModelResult};

/// Single test label: a key and the value rendered under it.
///
/// Both parts are validated on construction and can never be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawLabel")]
pub struct Label {
    key: String,
    value: String,
}

#[derive(Deserialize)]
struct RawLabel {
    key: String,
    value: String,
}

impl Label {
    /// Create a new label.
    ///
    /// Fails with [`ModelError::InvalidLabel`] if the key or the value is empty.
    pub fn new<K, V>(key: K, value: V) -> ModelResult<Self>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let key = key.into();
        let value = value.into();

        if key.is_empty() {
            return Err(ModelError::InvalidLabel("key must not be empty".into()));
        }
        if value.is_empty() {
            return Err(ModelError::InvalidLabel(format!(
                "value for key '{key}' must not be empty"
            )));
        }
        Ok(Self { key, value })
    }

    /// Get the key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Split the label into its owned parts.
    pub fn into_parts(self) -> (String, String) {
        (self.key, self.value)
    }
}

impl TryFrom<RawLabel> for Label {
    type Error = ModelError;
    fn try_from(raw: RawLabel) -> Result<Self, Self::Error> {
        Label::new(raw.key, raw.value)
    }
}

impl TryFrom<(&str, &str)> for Label {
    type Error = ModelError;
    fn try_from((key, value): (&str, &str)) -> Result<Self, Self::Error> {
        Label::new(key, value)
    }
}

impl TryFrom<(String, String)> for Label {
    type Error = ModelError;
    fn try_from((key, value): (String, String)) -> Result<Self, Self::Error> {
        Label::new(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::Label;
    use crate::ModelError;

    #[test]
    fn new_sets_key_and_value() {
        let label = Label::new("type", "button").unwrap();
        assert_eq!(label.key(), "type");
        assert_eq!(label.value(), "button");
    }

    #[test]
    fn empty_key_is_rejected() {
        let err = Label::new("", "button").unwrap_err();
        assert!(matches!(err, ModelError::InvalidLabel(_)));
    }

    #[test]
    fn empty_value_is_rejected() {
        let err = Label::new("type", "").unwrap_err();
        match err {
            ModelError::InvalidLabel(msg) => assert!(msg.contains("type"), "got: {msg}"),
            other => panic!("expected InvalidLabel, got {other:?}"),
        }
    }

    #[test]
    fn try_from_tuples() {
        let a: Label = ("type", "button").try_into().unwrap();
        let b: Label = (String::from("type"), String::from("button")).try_into().unwrap();
        assert_eq!(a, b);

        let bad: Result<Label, _> = ("", "x").try_into();
        assert!(bad.is_err());
    }

    #[test]
    fn deserialize_validates() {
        let ok: Label = serde_json::from_str(r#"{"key":"a","value":"1"}"#).unwrap();
        assert_eq!(ok.key(), "a");

        let bad = serde_json::from_str::<Label>(r#"{"key":"","value":"1"}"#);
        assert!(bad.is_err(), "empty key must not deserialize");
    }

    #[test]
    fn into_parts_returns_owned_strings() {
        let (k, v) = Label::new("a", "1").unwrap().into_parts();
        assert_eq!(k, "a");
        assert_eq!(v, "1");
    }
}
