use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// The cloud-event envelope the hosting layer delivers.
///
/// Carries the CloudEvents v1.0 context attributes plus an opaque `data`
/// payload. The runtime routes on the envelope (see [`crate::Trigger`]) and
/// never inspects or mutates `data`; its shape is entirely up to the
/// producer. Absent and `null` payloads are both accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudEvent {
    pub id: String,
    pub source: String,
    #[serde(rename = "specversion")]
    pub spec_version: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl CloudEvent {
    /// Create a new event of the given type from the given source,
    /// with a fresh UUID id and no payload.
    pub fn new<T, S>(ty: T, source: S) -> Self
    where
        T: Into<String>,
        S: Into<String>,
    {
        Self {
            id: Uuid::new_v4().to_string(),
            source: source.into(),
            spec_version: "1.0".to_string(),
            ty: ty.into(),
            subject: None,
            time: None,
            data: None,
        }
    }

    /// Attach a payload to the event.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the optional `subject` context attribute.
    pub fn with_subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Decode an event from its JSON wire form.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Textual representation of the payload. Absent data renders as `null`,
    /// same as an explicit `null` payload.
    pub fn data_json(&self) -> String {
        match &self.data {
            Some(value) => value.to_string(),
            None => Value::Null.to_string(),
        }
    }
}
