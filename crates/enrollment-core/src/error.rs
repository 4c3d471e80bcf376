use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const NORMALIZE_HELP_COMMAND: &str = "enrollment normalize --help";

/// Failures raised while computing occurrences from a service schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("weekly schedules need at least one weekday between 0 (Sunday) and 6 (Saturday)")]
    InvalidDaySelection,
    #[error("monthly schedules need a day of month between 1 and 31")]
    InvalidDayOfMonth,
    #[error("no matching occurrence was found within the scan limit")]
    ComputationExhausted,
    #[error("this schedule frequency has no occurrence rule")]
    Unsupported,
}

impl ScheduleError {
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidDaySelection => "invalid_day_selection",
            Self::InvalidDayOfMonth => "invalid_day_of_month",
            Self::ComputationExhausted => "internal_computation_exhausted",
            Self::Unsupported => "unsupported_frequency",
        }
    }

    pub const fn field(self) -> &'static str {
        match self {
            Self::InvalidDaySelection => "daysOfWeek",
            Self::InvalidDayOfMonth => "dayOfMonth",
            Self::ComputationExhausted | Self::Unsupported => "frequency",
        }
    }
}

/// Failures raised while normalizing a raw enrollment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("start date must be a real calendar date in DD/MM/YYYY format")]
    InvalidStartDate,
    #[error("charge day must be a whole number in the allowed range")]
    InvalidChargeDay,
    #[error("a charge schedule needs a billing model, a charge day and, when recurring, an interval")]
    IncompleteChargeSchedule,
    #[error("price must be a non-negative amount with at most two decimal places")]
    InvalidPrice,
    #[error("a client must be selected")]
    MissingClient,
}

impl ValidationError {
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidStartDate => "invalid_start_date",
            Self::InvalidChargeDay => "invalid_charge_day",
            Self::IncompleteChargeSchedule => "incomplete_charge_schedule",
            Self::InvalidPrice => "invalid_price",
            Self::MissingClient => "missing_client",
        }
    }

    pub const fn field(self) -> &'static str {
        match self {
            Self::InvalidStartDate => "startDate",
            Self::InvalidChargeDay => "chargeDay",
            Self::IncompleteChargeSchedule => "chargeSchedule",
            Self::InvalidPrice => "price",
            Self::MissingClient => "clientId",
        }
    }

    fn recovery_step(self) -> &'static str {
        match self {
            Self::InvalidStartDate => "Provide `startDate` as DD/MM/YYYY, for example 04/03/2024.",
            Self::InvalidChargeDay => {
                "Use 0-6 (Sunday-Saturday) for weekly charges and 1-31 otherwise."
            }
            Self::IncompleteChargeSchedule => {
                "Set `billingModel`, `chargeDay` and, for recurring charges, `recurrenceInterval`."
            }
            Self::InvalidPrice => "Provide `price` like `R$ 1.234,56` or `150,00`.",
            Self::MissingClient => "Provide a non-empty `clientId`.",
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `enrollment {cmd} --help` for usage."),
            None => "Run `enrollment --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_form_document(message: &str, expected: &str) -> Self {
        Self::invalid_argument_with_recovery(
            message,
            vec![
                format!("Provide a single JSON object shaped like {expected}."),
                format!("Run `{NORMALIZE_HELP_COMMAND}` to review the accepted fields."),
            ],
        )
        .with_data(json!({
            "expected_document": expected,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

impl From<ValidationError> for ClientError {
    fn from(error: ValidationError) -> Self {
        Self::new(
            error.code(),
            &error.to_string(),
            vec![
                error.recovery_step().to_string(),
                format!("Run `{NORMALIZE_HELP_COMMAND}` to review field formats."),
            ],
        )
        .with_data(json!({
            "field": error.field(),
        }))
    }
}

impl From<ScheduleError> for ClientError {
    fn from(error: ScheduleError) -> Self {
        let recovery_steps = match error {
            ScheduleError::InvalidDaySelection => {
                vec!["Select at least one weekday with `--days`, e.g. `--days 1,3,5`.".to_string()]
            }
            ScheduleError::InvalidDayOfMonth => {
                vec!["Provide `--day-of-month` between 1 and 31.".to_string()]
            }
            ScheduleError::Unsupported => vec![
                "Custom-day schedules have no preview; pick daily, weekly or monthly.".to_string(),
            ],
            ScheduleError::ComputationExhausted => Vec::new(),
        };
        Self::new(error.code(), &error.to_string(), recovery_steps).with_data(json!({
            "field": error.field(),
        }))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::{ClientError, ScheduleError, ValidationError};

    #[test]
    fn validation_errors_keep_code_and_field_when_lifted() {
        let error = ClientError::from(ValidationError::InvalidStartDate);
        assert_eq!(error.code, "invalid_start_date");
        assert!(!error.recovery_steps.is_empty());
        let field = error
            .data
            .as_ref()
            .and_then(|data| data.get("field"))
            .and_then(serde_json::Value::as_str);
        assert_eq!(field, Some("startDate"));
    }

    #[test]
    fn exhausted_scan_is_reported_as_internal() {
        let error = ClientError::from(ScheduleError::ComputationExhausted);
        assert!(error.code.starts_with("internal_"));
        assert!(error.recovery_steps.is_empty());
    }
}
