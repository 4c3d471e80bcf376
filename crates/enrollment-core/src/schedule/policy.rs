/// Occurrence policy identifier echoed in command output.
///
/// Bumped whenever a default below changes so previews stay comparable.
pub const SCHEDULE_POLICY_VERSION: &str = "schedule/v1";

/// How a day of month past the end of the target month is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthOverflow {
    /// Day 31 in February becomes the last day of February.
    #[default]
    Clamp,
    /// Day 31 in February spills into March, like a lenient calendar.
    RollOver,
}

impl MonthOverflow {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::RollOver => "roll-over",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "clamp" => Some(Self::Clamp),
            "roll-over" | "rollover" | "roll_over" => Some(Self::RollOver),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulePolicy {
    /// Upper bound on days scanned when looking for a weekly match.
    pub weekly_scan_limit: u32,
    pub month_overflow: MonthOverflow,
}

impl SchedulePolicy {
    pub const fn with_month_overflow(self, month_overflow: MonthOverflow) -> Self {
        Self {
            weekly_scan_limit: self.weekly_scan_limit,
            month_overflow,
        }
    }
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        SCHEDULE_POLICY_V1
    }
}

pub const SCHEDULE_POLICY_V1: SchedulePolicy = SchedulePolicy {
    weekly_scan_limit: 370,
    month_overflow: MonthOverflow::Clamp,
};

#[cfg(test)]
mod tests {
    use super::{MonthOverflow, SCHEDULE_POLICY_V1, SchedulePolicy};

    #[test]
    fn weekly_scan_limit_covers_a_full_year() {
        assert!(SCHEDULE_POLICY_V1.weekly_scan_limit >= 366);
        assert_eq!(SchedulePolicy::default(), SCHEDULE_POLICY_V1);
    }

    #[test]
    fn overflow_names_parse_back() {
        for overflow in [MonthOverflow::Clamp, MonthOverflow::RollOver] {
            assert_eq!(MonthOverflow::parse(overflow.as_str()), Some(overflow));
        }
        assert_eq!(MonthOverflow::parse("wrap"), None);
    }
}
