use crate::commands::input::resolve_source;
use crate::contracts::envelope::{CommandName, SuccessEnvelope, success};
use crate::contracts::types::{EnrollmentPayload, SummarizeData};
use crate::normalize::readback::{
    charge_schedule_from_payload, form_from_payload, service_schedule_from_payload,
};
use crate::schedule::summary::{SummaryLocale, summarize_charge_in, summarize_service_in};
use crate::{ClientError, ClientResult};

const PAYLOAD_DOCUMENT_SHAPE: &str =
    "{\"startDate\": \"YYYY-MM-DD\", \"chargeSchedule\": {...}, \"serviceSchedules\": {...}}";

#[derive(Debug, Default)]
pub struct SummarizeRunOptions {
    pub path: Option<String>,
    pub locale: SummaryLocale,
    pub stdin_override: Option<String>,
}

pub fn run(path: Option<String>, locale: SummaryLocale) -> ClientResult<SuccessEnvelope> {
    run_with_options(SummarizeRunOptions {
        path,
        locale,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: SummarizeRunOptions) -> ClientResult<SuccessEnvelope> {
    let source = resolve_source("summarize", options.path.as_deref(), options.stdin_override)?;
    let payload = serde_json::from_str::<EnrollmentPayload>(source.content.trim()).map_err(
        |error| {
            ClientError::invalid_form_document(
                &format!("Stored enrollment is not a valid payload: {error}"),
                PAYLOAD_DOCUMENT_SHAPE,
            )
        },
    )?;

    let charge = payload
        .charge_schedule
        .as_ref()
        .and_then(charge_schedule_from_payload);
    let service = payload
        .service_schedules
        .as_ref()
        .and_then(service_schedule_from_payload);

    let data = SummarizeData {
        source: source.kind.as_str().to_string(),
        locale: options.locale.as_str().to_string(),
        charge_summary: summarize_charge_in(options.locale, charge.as_ref()),
        service_summary: summarize_service_in(options.locale, service.as_ref()),
        form: form_from_payload(&payload),
    };

    success(CommandName::Summarize, data)
}

#[cfg(test)]
mod tests {
    use super::{SummarizeRunOptions, run_with_options};
    use crate::schedule::summary::SummaryLocale;

    fn piped(body: &str, locale: SummaryLocale) -> SummarizeRunOptions {
        SummarizeRunOptions {
            path: None,
            locale,
            stdin_override: Some(body.to_string()),
        }
    }

    #[test]
    fn stored_payload_is_summarized_in_portuguese() {
        let result = run_with_options(piped(
            r#"{"startDate": "2024-03-04", "price": 150,
                "chargeSchedule": {"billingModel": "ONE_TIME", "chargeDay": 10, "dueDate": "2024-03-10"},
                "serviceSchedules": [{"frequency": "MONTHLY", "dayOfMonth": 15}]}"#,
            SummaryLocale::PtBr,
        ));
        assert!(result.is_ok());
        if let Ok(envelope) = result {
            assert_eq!(envelope.data["charge_summary"], "Única (10/03/2024)");
            assert_eq!(envelope.data["service_summary"], "Mensal (dia 15)");
            assert_eq!(envelope.data["form"]["startDate"], "04/03/2024");
            assert_eq!(envelope.data["form"]["price"], "R$ 150,00");
        }
    }

    #[test]
    fn timestamped_payload_keeps_due_date_and_form_dates() {
        let result = run_with_options(piped(
            r#"{"startDate": "2024-03-04T00:00:00.000Z",
                "chargeSchedule": {"billingModel": "ONE_TIME", "chargeDay": 10.0,
                                   "dueDate": "2024-03-10T00:00:00.000Z"}}"#,
            SummaryLocale::PtBr,
        ));
        assert!(result.is_ok());
        if let Ok(envelope) = result {
            assert_eq!(envelope.data["charge_summary"], "Única (10/03/2024)");
            assert_eq!(envelope.data["form"]["startDate"], "04/03/2024");
            assert_eq!(envelope.data["form"]["dueDate"], "10/03/2024");
            assert_eq!(envelope.data["form"]["chargeDay"], "10");
        }
    }

    #[test]
    fn missing_schedules_fall_back_in_the_requested_locale() {
        let result = run_with_options(piped(r#"{"startDate": "2024-03-04"}"#, SummaryLocale::En));
        assert!(result.is_ok());
        if let Ok(envelope) = result {
            assert_eq!(envelope.data["locale"], "en");
            assert_eq!(envelope.data["charge_summary"], "Not set");
            assert_eq!(envelope.data["service_summary"], "Not set");
        }
    }

    #[test]
    fn payload_without_start_date_is_rejected() {
        let result = run_with_options(piped(r#"{"price": 10}"#, SummaryLocale::PtBr));
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.data.is_some());
        }
    }
}
