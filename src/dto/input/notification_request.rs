use serde::{Deserialize, Deserializer};
use serde_json::Value;

///
/// Body of the broadcast request.
///
/// Fields keep the raw JSON values. Presence and emptiness are
/// checked by the broadcast service, so a field of unexpected type
/// is not a deserialization error.
///
#[derive(Debug, Default, Deserialize)]
pub struct NotificationRequest {
    pub title: Option<Value>,
    pub body: Option<Value>,
    /// `Some(Value::Null)` when the key was sent as `null`
    #[serde(default, deserialize_with = "present")]
    pub key: Option<Value>,
}

impl NotificationRequest {
    pub fn title_text(&self) -> Option<String> {
        self.title.as_ref().and_then(text)
    }

    pub fn body_text(&self) -> Option<String> {
        self.body.as_ref().and_then(text)
    }
}

///
/// Text of a field value.
/// `None` for empty values: `null`, `false`, zero and empty string.
///
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
