use serde::{Deserialize, Deserializer, Serialize};

use crate::normalize::form::RawEnrollmentForm;

/// A JSON scalar that may arrive as a number or as numeric text.
///
/// Stored payloads sometimes carry integral floats such as `5.0`; those read
/// back as the integer, any fractional value reads back as nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(i64),
    Decimal(f64),
    Text(String),
}

impl NumberOrText {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Decimal(value) => integral(*value),
            Self::Text(value) => {
                let trimmed = value.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(integral))
            }
        }
    }

    pub fn as_u8(&self) -> Option<u8> {
        self.as_i64().and_then(|value| u8::try_from(value).ok())
    }
}

fn integral(value: f64) -> Option<i64> {
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// Request body accepted by the enrollments backend, and the shape read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_schedule: Option<ChargeSchedulePayload>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "one_or_first"
    )]
    pub service_schedules: Option<ServiceSchedulePayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeSchedulePayload {
    #[serde(default)]
    pub billing_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_day: Option<NumberOrText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_interval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSchedulePayload {
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<NumberOrText>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<NumberOrText>,
}

fn one_or_first<'de, D>(deserializer: D) -> Result<Option<ServiceSchedulePayload>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(ServiceSchedulePayload),
        Many(Vec<ServiceSchedulePayload>),
    }

    let value = Option::<OneOrMany>::deserialize(deserializer)?;
    Ok(match value {
        Some(OneOrMany::One(schedule)) => Some(schedule),
        Some(OneOrMany::Many(schedules)) => schedules.into_iter().next(),
        None => None,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct OccurrenceRow {
    pub date: String,
    pub local_date: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewData {
    pub policy_version: String,
    pub month_overflow: String,
    pub anchor: String,
    pub occurrence: OccurrenceRow,
    pub service_summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewIssue {
    pub code: String,
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizeData {
    pub source: String,
    pub policy_version: String,
    pub month_overflow: String,
    pub payload: EnrollmentPayload,
    pub charge_summary: String,
    pub service_summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_occurrence: Option<OccurrenceRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_issue: Option<PreviewIssue>,
    pub dropped_fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummarizeData {
    pub source: String,
    pub locale: String,
    pub charge_summary: String,
    pub service_summary: String,
    pub form: RawEnrollmentForm,
}
