use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{ClientError, ClientResult};

pub(crate) const FORM_DOCUMENT_SHAPE: &str =
    "{\"startDate\": \"DD/MM/YYYY\", \"billingModel\": \"RECURRING\", \"chargeDay\": \"5\", ...}";

/// Snapshot of the enrollment form as the user typed it.
///
/// Every field is free text; numbers in the source JSON are accepted and kept
/// as their decimal text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEnrollmentForm {
    #[serde(deserialize_with = "optional_text")]
    pub service_id: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub client_id: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub price: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub billing_model: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub charge_day: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub recurrence_interval: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub due_date: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub frequency: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub start_time: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub end_time: Option<String>,
    #[serde(deserialize_with = "text_list")]
    pub days_of_week: Vec<String>,
    #[serde(deserialize_with = "optional_text")]
    pub day_of_month: Option<String>,
}

pub fn parse_form(content: &str) -> ClientResult<RawEnrollmentForm> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ClientError::invalid_form_document(
            "Enrollment form source is empty.",
            FORM_DOCUMENT_SHAPE,
        ));
    }

    let parsed = serde_json::from_str::<Value>(trimmed).map_err(|_| {
        ClientError::invalid_form_document(
            "Invalid JSON input. Provide one enrollment form object.",
            FORM_DOCUMENT_SHAPE,
        )
    })?;
    if !parsed.is_object() {
        return Err(ClientError::invalid_form_document(
            "Enrollment form must be a top-level JSON object.",
            FORM_DOCUMENT_SHAPE,
        ));
    }

    serde_json::from_value::<RawEnrollmentForm>(parsed).map_err(|error| {
        ClientError::invalid_form_document(
            &format!("Enrollment form fields are malformed: {error}"),
            FORM_DOCUMENT_SHAPE,
        )
    })
}

/// Trimmed text, or `None` when blank.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_text))
}

fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(other) => vec![other],
        None => Vec::new(),
    };
    Ok(items.iter().filter_map(scalar_text).collect())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
