use tracing::debug;

use crate::commands::occurrence_row;
use crate::contracts::envelope::{CommandName, SuccessEnvelope, success};
use crate::contracts::types::PreviewData;
use crate::error::ValidationError;
use crate::normalize::form::non_empty;
use crate::schedule::date::{format_iso_date, parse_local_date};
use crate::schedule::occurrence::first_occurrence_with_policy;
use crate::schedule::policy::{MonthOverflow, SCHEDULE_POLICY_V1, SCHEDULE_POLICY_VERSION};
use crate::schedule::summary::summarize_service;
use crate::schedule::types::{ClockTime, ServiceFrequency, ServiceSchedule, WeekdaySet};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct PreviewOptions {
    pub start: String,
    pub frequency: Option<String>,
    pub days: Vec<i64>,
    pub day_of_month: Option<u8>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub month_overflow: MonthOverflow,
}

pub fn run(options: PreviewOptions) -> ClientResult<SuccessEnvelope> {
    let anchor = non_empty(Some(options.start.as_str()))
        .and_then(parse_local_date)
        .ok_or(ValidationError::InvalidStartDate)?;
    let schedule = build_schedule(&options)?;
    let policy = SCHEDULE_POLICY_V1.with_month_overflow(options.month_overflow);

    let occurrence = first_occurrence_with_policy(anchor, schedule.as_ref(), policy)?;
    debug!(
        anchor = %anchor,
        date = %occurrence.date,
        kind = occurrence.kind.as_str(),
        "previewed first occurrence"
    );

    let data = PreviewData {
        policy_version: SCHEDULE_POLICY_VERSION.to_string(),
        month_overflow: policy.month_overflow.as_str().to_string(),
        anchor: format_iso_date(&anchor),
        occurrence: occurrence_row(&occurrence),
        service_summary: summarize_service(schedule.as_ref()),
    };

    success(CommandName::Preview, data)
}

fn build_schedule(options: &PreviewOptions) -> ClientResult<Option<ServiceSchedule>> {
    let Some(raw_frequency) = non_empty(options.frequency.as_deref()) else {
        return Ok(None);
    };
    let frequency = ServiceFrequency::parse(raw_frequency).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!(
                "Unknown frequency `{raw_frequency}`. Use daily, weekly, monthly or custom-days."
            ),
            Some("preview"),
        )
    })?;

    let schedule = ServiceSchedule {
        frequency,
        days_of_week: WeekdaySet::from_indices(options.days.iter().copied()),
        day_of_month: options.day_of_month,
        start_time: parse_time(options.start_time.as_deref(), "--start-time")?,
        end_time: parse_time(options.end_time.as_deref(), "--end-time")?,
    };
    Ok(Some(schedule))
}

fn parse_time(value: Option<&str>, flag: &str) -> ClientResult<Option<ClockTime>> {
    let Some(raw) = non_empty(value) else {
        return Ok(None);
    };
    ClockTime::parse(raw).map(Some).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!("`{flag}` must be a 24-hour HH:MM time, got `{raw}`."),
            Some("preview"),
        )
    })
}
