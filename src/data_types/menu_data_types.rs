use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::TransportError;

/// Request body of `POST /api/menu`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MenuQuery {
    pub url: String,
    pub date: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct MenuItem {
    pub category: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub weight: Option<String>,
    pub allergens: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct MenuPayload {
    pub restaurant_name: Option<String>,
    pub date: Option<String>,
    pub day_of_week: Option<String>,
    pub source_url: Option<String>,
    pub cached: Option<bool>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub menu_items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuError {
    pub error: String,
    pub raw_response: Option<Value>,
}

/// Server reply, either a populated menu or a structured error.
///
/// `raw` keeps the payload exactly as received so the diagnostic dump shows
/// fields this crate doesn't model (e.g. `daily_menu`).
#[derive(Debug, Clone, PartialEq)]
pub enum MenuResponse {
    Menu { menu: MenuPayload, raw: Value },
    Error(MenuError),
}

impl MenuResponse {
    /// Sorts a JSON payload into one of the two variants. A non-empty `error`
    /// field decides.
    pub fn from_value(value: Value) -> Result<Self, TransportError> {
        let Some(obj) = value.as_object() else {
            return Err(TransportError::InvalidPayload(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        };

        if let Some(error) = error_message_of(&value) {
            let raw_response = obj.get("raw_response").filter(|v| !v.is_null()).cloned();
            return Ok(MenuResponse::Error(MenuError {
                error,
                raw_response,
            }));
        }

        let menu = serde_json::from_value::<MenuPayload>(value.clone())
            .map_err(|e| TransportError::InvalidPayload(e.to_string()))?;

        Ok(MenuResponse::Menu { menu, raw: value })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, MenuResponse::Error(_))
    }
}

/// The `error` field of a payload as display text. Empty values (`null`,
/// `""`, `false`, `0`) count as no error.
pub fn error_message_of(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<MenuItem>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<MenuItem>>::deserialize(deserializer)?.unwrap_or_default())
}
