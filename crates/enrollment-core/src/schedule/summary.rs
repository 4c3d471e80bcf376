use crate::schedule::date::format_local_date;
use crate::schedule::types::{
    BillingModel, ChargeSchedule, ClockTime, RecurrenceInterval, ServiceFrequency,
    ServiceSchedule,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryLocale {
    #[default]
    PtBr,
    En,
}

impl SummaryLocale {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PtBr => "pt-br",
            Self::En => "en",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Some(Self::PtBr),
            "en" | "en-us" => Some(Self::En),
            _ => None,
        }
    }

    const fn not_set(self) -> &'static str {
        match self {
            Self::PtBr => "Não definido",
            Self::En => "Not set",
        }
    }

    const fn one_time(self) -> &'static str {
        match self {
            Self::PtBr => "Única",
            Self::En => "One-time",
        }
    }

    const fn recurring(self) -> &'static str {
        match self {
            Self::PtBr => "Recorrente",
            Self::En => "Recurring",
        }
    }

    const fn day(self) -> &'static str {
        match self {
            Self::PtBr => "dia",
            Self::En => "day",
        }
    }

    const fn interval(self, interval: RecurrenceInterval) -> &'static str {
        match (self, interval) {
            (Self::PtBr, RecurrenceInterval::Weekly) => "Semanal",
            (Self::PtBr, RecurrenceInterval::Monthly) => "Mensal",
            (Self::PtBr, RecurrenceInterval::Bimonthly) => "Bimestral",
            (Self::PtBr, RecurrenceInterval::Trimesterly) => "Trimestral",
            (Self::PtBr, RecurrenceInterval::Semiannually) => "Semestral",
            (Self::PtBr, RecurrenceInterval::Yearly) => "Anual",
            (Self::En, RecurrenceInterval::Weekly) => "Weekly",
            (Self::En, RecurrenceInterval::Monthly) => "Monthly",
            (Self::En, RecurrenceInterval::Bimonthly) => "Every 2 months",
            (Self::En, RecurrenceInterval::Trimesterly) => "Quarterly",
            (Self::En, RecurrenceInterval::Semiannually) => "Every 6 months",
            (Self::En, RecurrenceInterval::Yearly) => "Yearly",
        }
    }

    const fn frequency(self, frequency: ServiceFrequency) -> &'static str {
        match (self, frequency) {
            (Self::PtBr, ServiceFrequency::Daily) => "Diariamente",
            (Self::PtBr, ServiceFrequency::Weekly) => "Semanal",
            (Self::PtBr, ServiceFrequency::Monthly) => "Mensal",
            (Self::PtBr, ServiceFrequency::CustomDays) => "Dias Específicos",
            (Self::En, ServiceFrequency::Daily) => "Daily",
            (Self::En, ServiceFrequency::Weekly) => "Weekly",
            (Self::En, ServiceFrequency::Monthly) => "Monthly",
            (Self::En, ServiceFrequency::CustomDays) => "Specific days",
        }
    }

    const fn weekday(self, day: u8) -> &'static str {
        match (self, day) {
            (Self::PtBr, 0) => "Dom",
            (Self::PtBr, 1) => "Seg",
            (Self::PtBr, 2) => "Ter",
            (Self::PtBr, 3) => "Qua",
            (Self::PtBr, 4) => "Qui",
            (Self::PtBr, 5) => "Sex",
            (Self::PtBr, _) => "Sáb",
            (Self::En, 0) => "Sun",
            (Self::En, 1) => "Mon",
            (Self::En, 2) => "Tue",
            (Self::En, 3) => "Wed",
            (Self::En, 4) => "Thu",
            (Self::En, 5) => "Fri",
            (Self::En, _) => "Sat",
        }
    }
}

pub fn summarize_charge(schedule: Option<&ChargeSchedule>) -> String {
    summarize_charge_in(SummaryLocale::PtBr, schedule)
}

pub fn summarize_service(schedule: Option<&ServiceSchedule>) -> String {
    summarize_service_in(SummaryLocale::PtBr, schedule)
}

/// Display label for a charge schedule.
///
/// Weekly charges never show their day: only day-of-month cadences get the
/// `(dia N)` suffix.
pub fn summarize_charge_in(locale: SummaryLocale, schedule: Option<&ChargeSchedule>) -> String {
    let Some(schedule) = schedule else {
        return locale.not_set().to_string();
    };

    match schedule.billing_model {
        BillingModel::OneTime => {
            let due = schedule
                .due_date
                .as_ref()
                .map(format_local_date)
                .unwrap_or_else(|| "?".to_string());
            format!("{} ({due})", locale.one_time())
        }
        BillingModel::Recurring => {
            let Some(interval) = schedule.recurrence_interval else {
                return locale.recurring().to_string();
            };
            let label = locale.interval(interval);
            match schedule.charge_day {
                Some(day) if interval != RecurrenceInterval::Weekly => {
                    format!("{label} ({} {day})", locale.day())
                }
                _ => label.to_string(),
            }
        }
    }
}

pub fn summarize_service_in(locale: SummaryLocale, schedule: Option<&ServiceSchedule>) -> String {
    let Some(schedule) = schedule else {
        return locale.not_set().to_string();
    };

    let label = locale.frequency(schedule.frequency);
    let base = match schedule.frequency {
        ServiceFrequency::Weekly if !schedule.days_of_week.is_empty() => {
            let days = schedule
                .days_of_week
                .iter()
                .map(|day| locale.weekday(day))
                .collect::<Vec<&str>>()
                .join(", ");
            format!("{label} ({days})")
        }
        ServiceFrequency::Monthly => match schedule.day_of_month {
            Some(day) => format!("{label} ({} {day})", locale.day()),
            None => label.to_string(),
        },
        _ => label.to_string(),
    };

    match time_window(schedule.start_time, schedule.end_time) {
        Some(window) => format!("{base}, {window}"),
        None => base,
    }
}

fn time_window(start: Option<ClockTime>, end: Option<ClockTime>) -> Option<String> {
    match (start, end) {
        (Some(from), Some(to)) => Some(format!("{from} - {to}")),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}
