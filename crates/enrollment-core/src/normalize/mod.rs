pub mod form;
pub mod payload;
pub mod price;
pub mod readback;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{ScheduleError, ValidationError};
use crate::normalize::form::{RawEnrollmentForm, non_empty};
use crate::normalize::price::{Price, parse_price};
use crate::schedule::date::parse_local_date;
use crate::schedule::occurrence::{OccurrenceResult, first_occurrence_with_policy};
use crate::schedule::policy::SchedulePolicy;
use crate::schedule::types::{
    BillingModel, ChargeSchedule, ClockTime, RecurrenceInterval, ServiceFrequency,
    ServiceSchedule, WeekdaySet,
};

/// Backend-ready enrollment built from one form snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentRequest {
    pub service_id: Option<String>,
    pub client_id: Option<String>,
    pub price: Option<Price>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub charge_schedule: ChargeSchedule,
    pub service_schedule: Option<ServiceSchedule>,
}

impl EnrollmentRequest {
    /// First service occurrence, anchored on the start date.
    pub fn preview(&self, policy: SchedulePolicy) -> Result<OccurrenceResult, ScheduleError> {
        first_occurrence_with_policy(self.start_date, self.service_schedule.as_ref(), policy)
    }
}

/// Normalized request plus the optional form fields that were discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub request: EnrollmentRequest,
    pub dropped_fields: Vec<&'static str>,
}

pub fn normalize(form: &RawEnrollmentForm) -> Result<EnrollmentRequest, ValidationError> {
    normalize_with_notes(form).map(|normalized| normalized.request)
}

/// Normalizes a form and also reports which optional fields were dropped.
///
/// Only the start date and the charge schedule can fail; everything else is
/// omitted when it does not parse.
pub fn normalize_with_notes(form: &RawEnrollmentForm) -> Result<Normalized, ValidationError> {
    let mut dropped = Vec::new();

    let start_date = non_empty(form.start_date.as_deref())
        .and_then(parse_local_date)
        .ok_or(ValidationError::InvalidStartDate)?;
    let end_date = optional_date(form.end_date.as_deref(), "endDate", &mut dropped);
    let charge_schedule = build_charge_schedule(form, &mut dropped)?;
    let service_schedule = build_service_schedule(form, &mut dropped);
    let price = match non_empty(form.price.as_deref()) {
        Some(raw) => match parse_price(raw) {
            Ok(price) => Some(price),
            Err(_) => {
                dropped.push("price");
                None
            }
        },
        None => None,
    };

    debug!(
        start_date = %start_date,
        billing_model = charge_schedule.billing_model.as_str(),
        has_service_schedule = service_schedule.is_some(),
        dropped = dropped.len(),
        "normalized enrollment form"
    );

    Ok(Normalized {
        request: EnrollmentRequest {
            service_id: non_empty(form.service_id.as_deref()).map(str::to_string),
            client_id: non_empty(form.client_id.as_deref()).map(str::to_string),
            price,
            start_date,
            end_date,
            charge_schedule,
            service_schedule,
        },
        dropped_fields: dropped,
    })
}

/// Normalizes and then applies the submission gates: a client and a price.
pub fn prepare_submission(form: &RawEnrollmentForm) -> Result<EnrollmentRequest, ValidationError> {
    let mut request = normalize(form)?;
    if request.client_id.is_none() {
        return Err(ValidationError::MissingClient);
    }
    let raw_price = non_empty(form.price.as_deref()).ok_or(ValidationError::InvalidPrice)?;
    request.price = Some(parse_price(raw_price)?);
    Ok(request)
}

fn build_charge_schedule(
    form: &RawEnrollmentForm,
    dropped: &mut Vec<&'static str>,
) -> Result<ChargeSchedule, ValidationError> {
    let billing_model = non_empty(form.billing_model.as_deref())
        .and_then(BillingModel::parse)
        .ok_or(ValidationError::IncompleteChargeSchedule)?;
    let charge_day = parse_charge_day(form.charge_day.as_deref())?;

    match billing_model {
        BillingModel::Recurring => {
            let interval = non_empty(form.recurrence_interval.as_deref())
                .and_then(RecurrenceInterval::parse)
                .ok_or(ValidationError::IncompleteChargeSchedule)?;
            if non_empty(form.due_date.as_deref()).is_some() {
                dropped.push("dueDate");
            }
            let day = charge_day.ok_or(ValidationError::IncompleteChargeSchedule)?;
            ChargeSchedule::recurring(interval, day)
        }
        BillingModel::OneTime => {
            if non_empty(form.recurrence_interval.as_deref()).is_some() {
                dropped.push("recurrenceInterval");
            }
            let due_date = optional_date(form.due_date.as_deref(), "dueDate", dropped);
            let day = charge_day.ok_or(ValidationError::IncompleteChargeSchedule)?;
            ChargeSchedule::one_time(due_date, Some(day))
        }
    }
}

fn parse_charge_day(value: Option<&str>) -> Result<Option<u8>, ValidationError> {
    let Some(raw) = non_empty(value) else {
        return Ok(None);
    };
    let parsed = raw
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidChargeDay)?;
    u8::try_from(parsed)
        .map(Some)
        .map_err(|_| ValidationError::InvalidChargeDay)
}

fn build_service_schedule(
    form: &RawEnrollmentForm,
    dropped: &mut Vec<&'static str>,
) -> Option<ServiceSchedule> {
    let raw_frequency = non_empty(form.frequency.as_deref())?;
    let Some(frequency) = ServiceFrequency::parse(raw_frequency) else {
        warn!(
            frequency = raw_frequency,
            "unknown service frequency, omitting service schedule"
        );
        dropped.push("frequency");
        return None;
    };

    let start_time = optional_time(form.start_time.as_deref(), "startTime", dropped);
    let end_time = optional_time(form.end_time.as_deref(), "endTime", dropped);

    let days_of_week = match frequency {
        ServiceFrequency::Weekly => WeekdaySet::from_indices(
            form.days_of_week
                .iter()
                .filter_map(|day| day.trim().parse::<i64>().ok()),
        ),
        _ => WeekdaySet::EMPTY,
    };
    let day_of_month = match frequency {
        ServiceFrequency::Monthly => {
            let parsed = non_empty(form.day_of_month.as_deref())
                .and_then(|raw| raw.parse::<u8>().ok())
                .filter(|day| (1..=31).contains(day));
            if parsed.is_none() && non_empty(form.day_of_month.as_deref()).is_some() {
                dropped.push("dayOfMonth");
            }
            parsed
        }
        _ => None,
    };

    Some(ServiceSchedule {
        frequency,
        days_of_week,
        day_of_month,
        start_time,
        end_time,
    })
}

fn optional_date(
    value: Option<&str>,
    field: &'static str,
    dropped: &mut Vec<&'static str>,
) -> Option<NaiveDate> {
    let raw = non_empty(value)?;
    let parsed = parse_local_date(raw);
    if parsed.is_none() {
        debug!(field, "dropping unparsable date");
        dropped.push(field);
    }
    parsed
}

fn optional_time(
    value: Option<&str>,
    field: &'static str,
    dropped: &mut Vec<&'static str>,
) -> Option<ClockTime> {
    let raw = non_empty(value)?;
    let parsed = ClockTime::parse(raw);
    if parsed.is_none() {
        debug!(field, "dropping time outside HH:MM");
        dropped.push(field);
    }
    parsed
}
