use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::error::ScheduleError;
use crate::schedule::date::{day_in_month, weekday_index};
use crate::schedule::policy::{SCHEDULE_POLICY_V1, SchedulePolicy};
use crate::schedule::types::{ClockTime, ServiceFrequency, ServiceSchedule, WeekdaySet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccurrenceKind {
    OneTime,
    Daily,
    Weekly,
    Monthly,
}

impl OccurrenceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneTime => "one-time",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccurrenceResult {
    pub date: NaiveDate,
    pub kind: OccurrenceKind,
    pub start_time: Option<ClockTime>,
    pub end_time: Option<ClockTime>,
}

pub fn first_occurrence(
    anchor: NaiveDate,
    schedule: Option<&ServiceSchedule>,
) -> Result<OccurrenceResult, ScheduleError> {
    first_occurrence_with_policy(anchor, schedule, SCHEDULE_POLICY_V1)
}

/// First date on or after `anchor` on which the service takes place.
///
/// Without a schedule the service happens once, on the anchor itself.
pub fn first_occurrence_with_policy(
    anchor: NaiveDate,
    schedule: Option<&ServiceSchedule>,
    policy: SchedulePolicy,
) -> Result<OccurrenceResult, ScheduleError> {
    let Some(schedule) = schedule else {
        return Ok(OccurrenceResult {
            date: anchor,
            kind: OccurrenceKind::OneTime,
            start_time: None,
            end_time: None,
        });
    };

    let (date, kind) = match schedule.frequency {
        ServiceFrequency::Daily => (anchor, OccurrenceKind::Daily),
        ServiceFrequency::Weekly => (
            next_selected_weekday(anchor, schedule.days_of_week, policy.weekly_scan_limit)?,
            OccurrenceKind::Weekly,
        ),
        ServiceFrequency::Monthly => (
            next_day_of_month(anchor, schedule.day_of_month, policy)?,
            OccurrenceKind::Monthly,
        ),
        ServiceFrequency::CustomDays => return Err(ScheduleError::Unsupported),
    };

    debug!(
        anchor = %anchor,
        occurrence = %date,
        kind = kind.as_str(),
        "computed first occurrence"
    );

    Ok(OccurrenceResult {
        date,
        kind,
        start_time: schedule.start_time,
        end_time: schedule.end_time,
    })
}

fn next_selected_weekday(
    anchor: NaiveDate,
    days: WeekdaySet,
    scan_limit: u32,
) -> Result<NaiveDate, ScheduleError> {
    if days.is_empty() {
        return Err(ScheduleError::InvalidDaySelection);
    }

    let mut candidate = anchor;
    for _ in 0..scan_limit {
        if days.contains(weekday_index(candidate)) {
            return Ok(candidate);
        }
        candidate = candidate
            .checked_add_days(Days::new(1))
            .ok_or(ScheduleError::ComputationExhausted)?;
    }
    Err(ScheduleError::ComputationExhausted)
}

fn next_day_of_month(
    anchor: NaiveDate,
    day_of_month: Option<u8>,
    policy: SchedulePolicy,
) -> Result<NaiveDate, ScheduleError> {
    let day = match day_of_month {
        Some(value) if (1..=31).contains(&value) => u32::from(value),
        _ => return Err(ScheduleError::InvalidDayOfMonth),
    };

    let same_month = day_in_month(anchor, 0, day, policy.month_overflow)
        .ok_or(ScheduleError::ComputationExhausted)?;
    if same_month >= anchor {
        return Ok(same_month);
    }
    day_in_month(anchor, 1, day, policy.month_overflow).ok_or(ScheduleError::ComputationExhausted)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{OccurrenceKind, first_occurrence, first_occurrence_with_policy};
    use crate::error::ScheduleError;
    use crate::schedule::date::parse_iso_date;
    use crate::schedule::policy::{MonthOverflow, SCHEDULE_POLICY_V1};
    use crate::schedule::types::{ClockTime, ServiceFrequency, ServiceSchedule, WeekdaySet};

    fn date(value: &str) -> NaiveDate {
        let parsed = parse_iso_date(value);
        assert!(parsed.is_some());
        parsed.unwrap_or(NaiveDate::MIN)
    }

    fn weekly(days: &[i64]) -> ServiceSchedule {
        ServiceSchedule::weekly(WeekdaySet::from_indices(days.iter().copied()))
    }

    #[test]
    fn missing_schedule_is_a_single_occurrence_on_the_anchor() {
        let result = first_occurrence(date("2024-03-05"), None);
        assert!(result.is_ok());
        if let Ok(occurrence) = result {
            assert_eq!(occurrence.date, date("2024-03-05"));
            assert_eq!(occurrence.kind, OccurrenceKind::OneTime);
            assert_eq!(occurrence.kind.as_str(), "one-time");
        }
    }

    #[test]
    fn daily_schedule_starts_on_the_anchor_and_keeps_the_window() {
        let schedule = ServiceSchedule::new(ServiceFrequency::Daily)
            .with_window(ClockTime::parse("08:00"), ClockTime::parse("12:00"));
        let result = first_occurrence(date("2024-03-05"), Some(&schedule));
        assert!(result.is_ok());
        if let Ok(occurrence) = result {
            assert_eq!(occurrence.date, date("2024-03-05"));
            assert_eq!(occurrence.kind, OccurrenceKind::Daily);
            assert_eq!(occurrence.start_time, ClockTime::new(8, 0));
            assert_eq!(occurrence.end_time, ClockTime::new(12, 0));
        }
    }

    #[test]
    fn weekly_includes_the_anchor_when_its_weekday_is_selected() {
        let result = first_occurrence(date("2024-03-04"), Some(&weekly(&[1, 3, 5])));
        assert_eq!(result.map(|value| value.date), Ok(date("2024-03-04")));
    }

    #[test]
    fn weekly_scans_forward_only() {
        let result = first_occurrence(date("2024-03-05"), Some(&weekly(&[1])));
        assert_eq!(result.map(|value| value.date), Ok(date("2024-03-11")));
    }

    #[test]
    fn weekly_picks_the_earliest_selected_day() {
        let result = first_occurrence(date("2024-03-07"), Some(&weekly(&[0, 6])));
        assert_eq!(result.map(|value| value.date), Ok(date("2024-03-09")));
    }

    #[test]
    fn weekly_without_valid_days_is_rejected() {
        assert_eq!(
            first_occurrence(date("2024-03-05"), Some(&weekly(&[]))),
            Err(ScheduleError::InvalidDaySelection)
        );
        assert_eq!(
            first_occurrence(date("2024-03-05"), Some(&weekly(&[7, 12, -3]))),
            Err(ScheduleError::InvalidDaySelection)
        );
    }

    #[test]
    fn weekly_scan_limit_bounds_the_search() {
        let policy = super::SchedulePolicy {
            weekly_scan_limit: 3,
            ..SCHEDULE_POLICY_V1
        };
        let result = first_occurrence_with_policy(date("2024-03-05"), Some(&weekly(&[1])), policy);
        assert_eq!(result, Err(ScheduleError::ComputationExhausted));
    }

    #[test]
    fn monthly_rolls_forward_when_the_day_already_passed() {
        let result = first_occurrence(date("2024-03-20"), Some(&ServiceSchedule::monthly(5)));
        assert_eq!(result.map(|value| value.date), Ok(date("2024-04-05")));
    }

    #[test]
    fn monthly_accepts_a_later_day_in_the_same_month() {
        let result = first_occurrence(date("2024-03-01"), Some(&ServiceSchedule::monthly(15)));
        assert!(result.is_ok());
        if let Ok(occurrence) = result {
            assert_eq!(occurrence.date, date("2024-03-15"));
            assert_eq!(occurrence.kind.as_str(), "monthly");
        }
    }

    #[test]
    fn monthly_on_the_anchor_day_is_not_rolled() {
        let result = first_occurrence(date("2024-03-15"), Some(&ServiceSchedule::monthly(15)));
        assert_eq!(result.map(|value| value.date), Ok(date("2024-03-15")));
    }

    #[test]
    fn monthly_overflow_follows_policy() {
        let schedule = ServiceSchedule::monthly(31);
        let clamped = first_occurrence(date("2024-02-10"), Some(&schedule));
        assert_eq!(clamped.map(|value| value.date), Ok(date("2024-02-29")));

        let rolled = first_occurrence_with_policy(
            date("2024-02-10"),
            Some(&schedule),
            SCHEDULE_POLICY_V1.with_month_overflow(MonthOverflow::RollOver),
        );
        assert_eq!(rolled.map(|value| value.date), Ok(date("2024-03-02")));
    }

    #[test]
    fn monthly_roll_forward_across_year_end() {
        let result = first_occurrence(date("2024-12-20"), Some(&ServiceSchedule::monthly(5)));
        assert_eq!(result.map(|value| value.date), Ok(date("2025-01-05")));
    }

    #[test]
    fn monthly_requires_a_valid_day() {
        let missing = ServiceSchedule::new(ServiceFrequency::Monthly);
        assert_eq!(
            first_occurrence(date("2024-03-01"), Some(&missing)),
            Err(ScheduleError::InvalidDayOfMonth)
        );
        assert_eq!(
            first_occurrence(date("2024-03-01"), Some(&ServiceSchedule::monthly(32))),
            Err(ScheduleError::InvalidDayOfMonth)
        );
        assert_eq!(
            first_occurrence(date("2024-03-01"), Some(&ServiceSchedule::monthly(0))),
            Err(ScheduleError::InvalidDayOfMonth)
        );
    }

    #[test]
    fn custom_days_have_no_rule() {
        let schedule = ServiceSchedule::new(ServiceFrequency::CustomDays);
        assert_eq!(
            first_occurrence(date("2024-03-01"), Some(&schedule)),
            Err(ScheduleError::Unsupported)
        );
    }

    #[test]
    fn repeated_calls_agree() {
        let schedule = weekly(&[2, 4]);
        let anchor = date("2024-06-30");
        assert_eq!(
            first_occurrence(anchor, Some(&schedule)),
            first_occurrence(anchor, Some(&schedule))
        );
    }
}
