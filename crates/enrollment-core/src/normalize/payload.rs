use crate::contracts::types::{
    ChargeSchedulePayload, EnrollmentPayload, NumberOrText, ServiceSchedulePayload,
};
use crate::normalize::EnrollmentRequest;
use crate::schedule::date::format_iso_date;
use crate::schedule::types::{ChargeSchedule, ServiceFrequency, ServiceSchedule};

/// Request body for the enrollments backend.
pub fn to_payload(request: &EnrollmentRequest) -> EnrollmentPayload {
    EnrollmentPayload {
        service_id: request.service_id.clone(),
        client_id: request.client_id.clone(),
        price: request.price.map(|price| price.as_decimal()),
        start_date: format_iso_date(&request.start_date),
        end_date: request.end_date.as_ref().map(format_iso_date),
        charge_schedule: Some(charge_payload(&request.charge_schedule)),
        service_schedules: request.service_schedule.as_ref().map(service_payload),
    }
}

fn charge_payload(schedule: &ChargeSchedule) -> ChargeSchedulePayload {
    ChargeSchedulePayload {
        billing_model: Some(schedule.billing_model.as_str().to_string()),
        charge_day: schedule
            .charge_day
            .map(|day| NumberOrText::Number(i64::from(day))),
        recurrence_interval: schedule
            .recurrence_interval
            .map(|interval| interval.as_str().to_string()),
        due_date: schedule.due_date.as_ref().map(format_iso_date),
    }
}

fn service_payload(schedule: &ServiceSchedule) -> ServiceSchedulePayload {
    let days_of_week = match schedule.frequency {
        ServiceFrequency::Weekly => Some(
            schedule
                .days_of_week
                .iter()
                .map(|day| NumberOrText::Number(i64::from(day)))
                .collect(),
        ),
        _ => None,
    };
    let day_of_month = match schedule.frequency {
        ServiceFrequency::Monthly => schedule
            .day_of_month
            .map(|day| NumberOrText::Number(i64::from(day))),
        _ => None,
    };

    ServiceSchedulePayload {
        frequency: Some(schedule.frequency.as_str().to_string()),
        start_time: schedule.start_time.map(|time| time.to_string()),
        end_time: schedule.end_time.map(|time| time.to_string()),
        days_of_week,
        day_of_month,
    }
}
