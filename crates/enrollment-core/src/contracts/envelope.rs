use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::API_VERSION;
use crate::error::{ClientError, ClientResult};

/// The commands that produce an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandName {
    Preview,
    Normalize,
    Summarize,
}

impl CommandName {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Normalize => "normalize",
            Self::Summarize => "summarize",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful command output; `data` is the command's row serialized once.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub ok: bool,
    pub command: CommandName,
    pub version: &'static str,
    pub data: Value,
}

/// Failed command output, printed as `{ "error": { ... } }`.
#[derive(Debug, Clone, Serialize)]
pub struct FailureEnvelope {
    pub error: ErrorContract,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorContract {
    pub code: String,
    pub message: String,
    /// Form or payload field the failure is scoped to, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub recovery_steps: Vec<String>,
}

pub fn success<T>(command: CommandName, data: T) -> ClientResult<SuccessEnvelope>
where
    T: Serialize,
{
    let data = serde_json::to_value(data)
        .map_err(|err| ClientError::internal_serialization(&err.to_string()))?;
    Ok(SuccessEnvelope {
        ok: true,
        command,
        version: API_VERSION,
        data,
    })
}

impl From<&ClientError> for FailureEnvelope {
    fn from(error: &ClientError) -> Self {
        let field = error
            .data
            .as_ref()
            .and_then(|data| data.get("field"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            error: ErrorContract {
                code: error.code.clone(),
                message: error.message.clone(),
                field,
                recovery_steps: error.recovery_steps.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{CommandName, FailureEnvelope, success};
    use crate::error::{ClientError, ValidationError};

    #[test]
    fn success_wraps_data_with_command_and_version() {
        let envelope = success(CommandName::Preview, json!({ "date": "2024-03-04" }));
        assert!(envelope.is_ok());
        if let Ok(value) = envelope {
            assert!(value.ok);
            assert_eq!(value.command, CommandName::Preview);
            assert_eq!(value.data["date"], "2024-03-04");
            let serialized = serde_json::to_value(&value);
            assert!(serialized.is_ok());
            if let Ok(body) = serialized {
                assert_eq!(body["command"], "preview");
            }
        }
    }

    #[test]
    fn failure_carries_field_scope_in_the_contract() {
        let error = ClientError::from(ValidationError::InvalidChargeDay);
        let envelope = FailureEnvelope::from(&error);
        assert_eq!(envelope.error.code, "invalid_charge_day");
        assert_eq!(envelope.error.field.as_deref(), Some("chargeDay"));
    }

    #[test]
    fn unscoped_failures_omit_the_field() {
        let envelope = FailureEnvelope::from(&ClientError::internal_serialization("boom"));
        let serialized = serde_json::to_value(&envelope);
        assert!(serialized.is_ok());
        if let Ok(body) = serialized {
            assert_eq!(body["error"]["code"], "internal_serialization_error");
            assert!(body["error"].get("field").is_none());
            assert!(body.get("ok").is_none());
        }
    }
}
