pub mod date;
pub mod occurrence;
pub mod policy;
pub mod summary;
pub mod types;

pub use occurrence::{
    OccurrenceKind, OccurrenceResult, first_occurrence, first_occurrence_with_policy,
};
pub use policy::{MonthOverflow, SCHEDULE_POLICY_V1, SCHEDULE_POLICY_VERSION, SchedulePolicy};
pub use summary::{
    SummaryLocale, summarize_charge, summarize_charge_in, summarize_service, summarize_service_in,
};
pub use types::{
    BillingModel, ChargeSchedule, ClockTime, RecurrenceInterval, ServiceFrequency,
    ServiceSchedule, WeekdaySet,
};
