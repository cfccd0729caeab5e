use common::prelude::*;
use serde_derive::Serialize;
use serde_json::Value;

/// What a command prints. Fields that a command does not produce are left
/// out of the output.
#[derive(Debug, Default, PartialEq, Serialize)]
pub(crate) struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) cid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) commitment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) codec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) unpadded_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) height: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) padding: Option<u64>,
}

impl Report {
    /// A JSON object, or one `field: value` line per field. A single field
    /// is printed bare so that the output can be piped into other commands.
    pub(crate) fn render(&self, json: bool) -> Result<String> {
        let value = serde_json::to_value(self)?;
        if json {
            return Ok(value.to_string());
        }

        let fields = match value {
            Value::Object(fields) => fields,
            _ => bail!("report did not serialize to an object"),
        };
        let text = |value: &Value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        Ok(match fields.len() {
            1 => fields.values().map(text).collect(),
            _ => fields
                .iter()
                .map(|(name, value)| format!("{}: {}", name, text(value)))
                .collect::<Vec<_>>()
                .join("\n"),
        })
    }
}
