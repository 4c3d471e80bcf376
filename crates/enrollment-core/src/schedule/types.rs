use std::fmt;

use chrono::NaiveDate;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecurrenceInterval {
    Weekly,
    Monthly,
    Bimonthly,
    Trimesterly,
    Semiannually,
    Yearly,
}

impl RecurrenceInterval {
    pub const ALL: [Self; 6] = [
        Self::Weekly,
        Self::Monthly,
        Self::Bimonthly,
        Self::Trimesterly,
        Self::Semiannually,
        Self::Yearly,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Bimonthly => "BIMONTHLY",
            Self::Trimesterly => "TRIMESTERLY",
            Self::Semiannually => "SEMIANNUALLY",
            Self::Yearly => "YEARLY",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let key = enum_key(value);
        Self::ALL
            .into_iter()
            .find(|interval| interval.as_str() == key)
    }

    /// Range a charge day must fall in for this cadence.
    pub const fn charge_day_range(self) -> (u8, u8) {
        match self {
            Self::Weekly => (0, 6),
            Self::Monthly
            | Self::Bimonthly
            | Self::Trimesterly
            | Self::Semiannually
            | Self::Yearly => (1, 31),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BillingModel {
    OneTime,
    Recurring,
}

impl BillingModel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneTime => "ONE_TIME",
            Self::Recurring => "RECURRING",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match enum_key(value).as_str() {
            "ONE_TIME" | "ONETIME" | "SINGLE" => Some(Self::OneTime),
            "RECURRING" => Some(Self::Recurring),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargeSchedule {
    pub billing_model: BillingModel,
    pub recurrence_interval: Option<RecurrenceInterval>,
    pub charge_day: Option<u8>,
    pub due_date: Option<NaiveDate>,
}

impl ChargeSchedule {
    pub fn recurring(
        interval: RecurrenceInterval,
        charge_day: u8,
    ) -> Result<Self, ValidationError> {
        let schedule = Self {
            billing_model: BillingModel::Recurring,
            recurrence_interval: Some(interval),
            charge_day: Some(charge_day),
            due_date: None,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn one_time(
        due_date: Option<NaiveDate>,
        charge_day: Option<u8>,
    ) -> Result<Self, ValidationError> {
        let schedule = Self {
            billing_model: BillingModel::OneTime,
            recurrence_interval: None,
            charge_day,
            due_date,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Checks the field combination a backend accepts.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.billing_model {
            BillingModel::Recurring => {
                let Some(interval) = self.recurrence_interval else {
                    return Err(ValidationError::IncompleteChargeSchedule);
                };
                if self.due_date.is_some() {
                    return Err(ValidationError::IncompleteChargeSchedule);
                }
                let Some(day) = self.charge_day else {
                    return Err(ValidationError::IncompleteChargeSchedule);
                };
                let (min, max) = interval.charge_day_range();
                if day < min || day > max {
                    return Err(ValidationError::InvalidChargeDay);
                }
            }
            BillingModel::OneTime => {
                if self.recurrence_interval.is_some() {
                    return Err(ValidationError::IncompleteChargeSchedule);
                }
                if let Some(day) = self.charge_day
                    && !(1..=31).contains(&day)
                {
                    return Err(ValidationError::InvalidChargeDay);
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceFrequency {
    Daily,
    Weekly,
    Monthly,
    CustomDays,
}

impl ServiceFrequency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::CustomDays => "CUSTOM_DAYS",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match enum_key(value).as_str() {
            "DAILY" => Some(Self::Daily),
            "WEEKLY" => Some(Self::Weekly),
            "MONTHLY" => Some(Self::Monthly),
            "CUSTOM_DAYS" | "CUSTOM" => Some(Self::CustomDays),
            _ => None,
        }
    }
}

/// Set of weekdays, 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: Self = Self(0);

    /// Keeps the values in `0..=6` and drops the rest.
    pub fn from_indices<I>(indices: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut set = Self::EMPTY;
        for index in indices {
            if let Ok(day) = u8::try_from(index) {
                set.insert(day);
            }
        }
        set
    }

    pub fn insert(&mut self, day: u8) -> bool {
        if day > 6 {
            return false;
        }
        self.0 |= 1 << day;
        true
    }

    pub const fn contains(self, day: u8) -> bool {
        day <= 6 && self.0 & (1 << day) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0u8..=6).filter(move |day| self.contains(*day))
    }
}

/// Wall-clock time in strict 24-hour `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    /// Accepts exactly `([01]\d|2[0-3]):([0-5]\d)`.
    pub fn parse(value: &str) -> Option<Self> {
        let bytes = value.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return None;
        }
        for index in [0usize, 1, 3, 4] {
            if !bytes[index].is_ascii_digit() {
                return None;
            }
        }
        let hour = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        let minute = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
        Self::new(hour, minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSchedule {
    pub frequency: ServiceFrequency,
    pub days_of_week: WeekdaySet,
    pub day_of_month: Option<u8>,
    pub start_time: Option<ClockTime>,
    pub end_time: Option<ClockTime>,
}

impl ServiceSchedule {
    pub fn new(frequency: ServiceFrequency) -> Self {
        Self {
            frequency,
            days_of_week: WeekdaySet::EMPTY,
            day_of_month: None,
            start_time: None,
            end_time: None,
        }
    }

    pub fn weekly(days_of_week: WeekdaySet) -> Self {
        Self {
            days_of_week,
            ..Self::new(ServiceFrequency::Weekly)
        }
    }

    pub fn monthly(day_of_month: u8) -> Self {
        Self {
            day_of_month: Some(day_of_month),
            ..Self::new(ServiceFrequency::Monthly)
        }
    }

    pub fn with_window(mut self, start: Option<ClockTime>, end: Option<ClockTime>) -> Self {
        self.start_time = start;
        self.end_time = end;
        self
    }
}

fn enum_key(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|character| match character {
            '-' | ' ' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}
