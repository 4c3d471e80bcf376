use crate::contracts::types::{ChargeSchedulePayload, EnrollmentPayload, ServiceSchedulePayload};
use crate::normalize::form::{RawEnrollmentForm, non_empty};
use crate::normalize::price::Price;
use crate::schedule::date::{format_local_date, parse_stored_date};
use crate::schedule::types::{
    BillingModel, ChargeSchedule, ClockTime, RecurrenceInterval, ServiceFrequency,
    ServiceSchedule, WeekdaySet,
};

/// Charge schedule as the backend reported it.
///
/// Read-back is for display, so field combinations are not re-validated; an
/// unknown billing model yields `None`.
pub fn charge_schedule_from_payload(payload: &ChargeSchedulePayload) -> Option<ChargeSchedule> {
    let billing_model = non_empty(payload.billing_model.as_deref()).and_then(BillingModel::parse)?;
    Some(ChargeSchedule {
        billing_model,
        recurrence_interval: non_empty(payload.recurrence_interval.as_deref())
            .and_then(RecurrenceInterval::parse),
        charge_day: payload.charge_day.as_ref().and_then(|day| day.as_u8()),
        due_date: non_empty(payload.due_date.as_deref()).and_then(parse_stored_date),
    })
}

/// Service schedule as the backend reported it; `None` without a known frequency.
pub fn service_schedule_from_payload(payload: &ServiceSchedulePayload) -> Option<ServiceSchedule> {
    let frequency = non_empty(payload.frequency.as_deref()).and_then(ServiceFrequency::parse)?;
    let days_of_week = payload
        .days_of_week
        .as_ref()
        .map(|days| WeekdaySet::from_indices(days.iter().filter_map(|day| day.as_i64())))
        .unwrap_or_default();

    Some(ServiceSchedule {
        frequency,
        days_of_week,
        day_of_month: payload
            .day_of_month
            .as_ref()
            .and_then(|day| day.as_u8())
            .filter(|day| (1..=31).contains(day)),
        start_time: payload.start_time.as_deref().and_then(ClockTime::parse),
        end_time: payload.end_time.as_deref().and_then(ClockTime::parse),
    })
}

/// Rebuilds the form an editor would show for a stored enrollment.
pub fn form_from_payload(payload: &EnrollmentPayload) -> RawEnrollmentForm {
    let charge = payload.charge_schedule.as_ref();
    let service = payload.service_schedules.as_ref();

    RawEnrollmentForm {
        service_id: payload.service_id.clone(),
        client_id: payload.client_id.clone(),
        price: payload
            .price
            .and_then(Price::from_decimal)
            .map(Price::format_brl),
        start_date: iso_to_local(Some(payload.start_date.as_str())),
        end_date: iso_to_local(payload.end_date.as_deref()),
        billing_model: charge.and_then(|value| value.billing_model.clone()),
        charge_day: charge
            .and_then(|value| value.charge_day.as_ref())
            .and_then(|day| day.as_i64())
            .map(|day| day.to_string()),
        recurrence_interval: charge.and_then(|value| value.recurrence_interval.clone()),
        due_date: iso_to_local(charge.and_then(|value| value.due_date.as_deref())),
        frequency: service.and_then(|value| value.frequency.clone()),
        start_time: service.and_then(|value| value.start_time.clone()),
        end_time: service.and_then(|value| value.end_time.clone()),
        days_of_week: service
            .and_then(|value| value.days_of_week.as_ref())
            .map(|days| {
                days.iter()
                    .filter_map(|day| day.as_i64())
                    .map(|day| day.to_string())
                    .collect()
            })
            .unwrap_or_default(),
        day_of_month: service
            .and_then(|value| value.day_of_month.as_ref())
            .and_then(|day| day.as_i64())
            .map(|day| day.to_string()),
    }
}

fn iso_to_local(value: Option<&str>) -> Option<String> {
    non_empty(value)
        .and_then(parse_stored_date)
        .map(|date| format_local_date(&date))
}
