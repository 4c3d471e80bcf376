use tracing::debug;

use crate::ClientResult;
use crate::commands::input::resolve_source;
use crate::commands::occurrence_row;
use crate::contracts::envelope::{CommandName, SuccessEnvelope, success};
use crate::contracts::types::{NormalizeData, PreviewIssue};
use crate::normalize::form::parse_form;
use crate::normalize::payload::to_payload;
use crate::normalize::{normalize_with_notes, prepare_submission};
use crate::schedule::policy::{MonthOverflow, SCHEDULE_POLICY_V1, SCHEDULE_POLICY_VERSION};
use crate::schedule::summary::{summarize_charge, summarize_service};

#[derive(Debug, Default)]
pub struct NormalizeRunOptions {
    pub path: Option<String>,
    pub month_overflow: MonthOverflow,
    /// Also require a client and a parseable price.
    pub strict: bool,
    pub stdin_override: Option<String>,
}

pub fn run(
    path: Option<String>,
    month_overflow: MonthOverflow,
    strict: bool,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(NormalizeRunOptions {
        path,
        month_overflow,
        strict,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: NormalizeRunOptions) -> ClientResult<SuccessEnvelope> {
    let source = resolve_source("normalize", options.path.as_deref(), options.stdin_override)?;
    let form = parse_form(&source.content)?;
    if options.strict {
        prepare_submission(&form)?;
    }
    let normalized = normalize_with_notes(&form)?;
    let request = &normalized.request;
    let policy = SCHEDULE_POLICY_V1.with_month_overflow(options.month_overflow);

    let (first_occurrence, preview_issue) = match request.preview(policy) {
        Ok(occurrence) => (Some(occurrence_row(&occurrence)), None),
        Err(error) => {
            debug!(code = error.code(), "preview unavailable for normalized form");
            (
                None,
                Some(PreviewIssue {
                    code: error.code().to_string(),
                    field: error.field().to_string(),
                    message: error.to_string(),
                }),
            )
        }
    };

    let data = NormalizeData {
        source: source.kind.as_str().to_string(),
        policy_version: SCHEDULE_POLICY_VERSION.to_string(),
        month_overflow: policy.month_overflow.as_str().to_string(),
        payload: to_payload(request),
        charge_summary: summarize_charge(Some(&request.charge_schedule)),
        service_summary: summarize_service(request.service_schedule.as_ref()),
        first_occurrence,
        preview_issue,
        dropped_fields: normalized
            .dropped_fields
            .iter()
            .map(|field| field.to_string())
            .collect(),
    };

    success(CommandName::Normalize, data)
}

#[cfg(test)]
mod tests {
    use super::{NormalizeRunOptions, run_with_options};

    fn from_stdin(body: &str, strict: bool) -> NormalizeRunOptions {
        NormalizeRunOptions {
            path: Some("-".to_string()),
            strict,
            stdin_override: Some(body.to_string()),
            ..NormalizeRunOptions::default()
        }
    }

    #[test]
    fn custom_days_schedule_normalizes_with_a_preview_issue() {
        let result = run_with_options(from_stdin(
            r#"{"startDate": "04/03/2024", "billingModel": "RECURRING",
                "recurrenceInterval": "MONTHLY", "chargeDay": 5,
                "frequency": "CUSTOM_DAYS"}"#,
            false,
        ));
        assert!(result.is_ok());
        if let Ok(envelope) = result {
            assert_eq!(envelope.data["source"], "stdin");
            assert_eq!(envelope.data["service_summary"], "Dias Específicos");
            assert_eq!(envelope.data["preview_issue"]["code"], "unsupported_frequency");
            assert!(envelope.data.get("first_occurrence").is_none());
        }
    }

    #[test]
    fn strict_mode_applies_submission_gates() {
        let body = r#"{"startDate": "04/03/2024", "billingModel": "ONE_TIME", "chargeDay": 5}"#;
        assert!(run_with_options(from_stdin(body, false)).is_ok());

        let strict = run_with_options(from_stdin(body, true));
        assert_eq!(
            strict.err().map(|error| error.code),
            Some("missing_client".to_string())
        );
    }
}
