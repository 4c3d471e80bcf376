use clap::{Parser, Subcommand};
use enrollment_core::schedule::date::{LocalDateError, parse_local_date_checked};
use enrollment_core::schedule::{ClockTime, MonthOverflow, SummaryLocale};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDate(pub String);

impl LocalDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_local_date(value: &str) -> Result<LocalDate, String> {
    match parse_local_date_checked(value) {
        Ok(_) => Ok(LocalDate(value.trim().to_string())),
        Err(LocalDateError::Shape) => Err("date must use DD/MM/YYYY format".to_string()),
        Err(LocalDateError::Calendar) => Err("date must use valid calendar values".to_string()),
    }
}

pub fn parse_weekday(value: &str) -> Result<i64, String> {
    match value.trim().parse::<i64>() {
        Ok(day) if (0..=6).contains(&day) => Ok(day),
        _ => Err("weekdays must be numbers from 0 (Sunday) to 6 (Saturday)".to_string()),
    }
}

pub fn parse_day_of_month(value: &str) -> Result<u8, String> {
    match value.trim().parse::<u8>() {
        Ok(day) if (1..=31).contains(&day) => Ok(day),
        _ => Err("day of month must be a number from 1 to 31".to_string()),
    }
}

pub fn parse_clock_time(value: &str) -> Result<String, String> {
    ClockTime::parse(value)
        .map(|time| time.to_string())
        .ok_or_else(|| "time must use 24-hour HH:MM format".to_string())
}

pub fn parse_month_overflow(value: &str) -> Result<MonthOverflow, String> {
    MonthOverflow::parse(value)
        .ok_or_else(|| "month overflow must be one of: clamp, roll-over".to_string())
}

pub fn parse_locale(value: &str) -> Result<SummaryLocale, String> {
    SummaryLocale::parse(value).ok_or_else(|| "locale must be one of: pt-br, en".to_string())
}

/// Extended help shown after `enrollment preview --help`.
pub const PREVIEW_AFTER_HELP: &str = "\
How the first occurrence is chosen:
  no --frequency   the start date itself (one-time)
  daily            the start date
  weekly           the first selected weekday on or after the start date
  monthly          --day-of-month in the start month, or the next month
                   when that day has already passed
  custom-days      not previewable

Weekdays:
  0 = Sunday, 1 = Monday, ... 6 = Saturday. Example: --days 1,3,5

Short months:
  --month-overflow clamp      day 31 in February lands on the 28th/29th
  --month-overflow roll-over  day 31 in February spills into March

Example:
  enrollment preview --start 04/03/2024 --frequency weekly --days 1,3,5 --start-time 08:00
";

/// Extended help shown after `enrollment normalize --help`.
pub const NORMALIZE_AFTER_HELP: &str = "\
Input:
  One JSON object with the enrollment form fields, read from <path>,
  or from stdin when <path> is `-` or omitted.
  Example: cat form.json | enrollment normalize -

Form fields (all text; numbers are accepted too):
  startDate (required)        DD/MM/YYYY
  endDate                     DD/MM/YYYY, dropped when unparsable
  billingModel (required)     RECURRING or ONE_TIME
  chargeDay (required)        0-6 for weekly charges, 1-31 otherwise
  recurrenceInterval          WEEKLY, MONTHLY, BIMONTHLY, TRIMESTERLY,
                              SEMIANNUALLY, YEARLY (recurring only)
  dueDate                     DD/MM/YYYY (one-time only)
  frequency                   DAILY, WEEKLY, MONTHLY, CUSTOM_DAYS
  daysOfWeek                  list of 0-6 (weekly only)
  dayOfMonth                  1-31 (monthly only)
  startTime, endTime          HH:MM
  price                       like R$ 1.234,56
  serviceId, clientId         free text

Example:
  {
    \"clientId\": \"cli_1\",
    \"price\": \"R$ 150,00\",
    \"startDate\": \"04/03/2024\",
    \"billingModel\": \"RECURRING\",
    \"recurrenceInterval\": \"MONTHLY\",
    \"chargeDay\": \"5\",
    \"frequency\": \"WEEKLY\",
    \"daysOfWeek\": [\"1\", \"3\"],
    \"startTime\": \"08:00\",
    \"endTime\": \"09:00\"
  }
";

#[derive(Debug, Parser)]
#[command(
    name = "enrollment",
    version,
    about = "enrollment schedules, first occurrences and backend payloads",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute the first service occurrence for a start date and schedule
    #[command(after_help = PREVIEW_AFTER_HELP)]
    Preview {
        /// Enrollment start date (DD/MM/YYYY)
        #[arg(long, value_parser = parse_local_date)]
        start: LocalDate,
        /// Service frequency: daily, weekly, monthly or custom-days
        #[arg(long)]
        frequency: Option<String>,
        /// Weekdays for weekly schedules, comma separated (0 = Sunday)
        #[arg(long, value_delimiter = ',', value_parser = parse_weekday)]
        days: Vec<i64>,
        /// Day of month for monthly schedules
        #[arg(long, value_parser = parse_day_of_month)]
        day_of_month: Option<u8>,
        /// Session start time (HH:MM)
        #[arg(long, value_parser = parse_clock_time)]
        start_time: Option<String>,
        /// Session end time (HH:MM)
        #[arg(long, value_parser = parse_clock_time)]
        end_time: Option<String>,
        /// How a day past the end of a short month is resolved
        #[arg(long, value_parser = parse_month_overflow, default_value = "clamp")]
        month_overflow: MonthOverflow,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
    /// Turn an enrollment form into the backend payload with a preview
    #[command(after_help = NORMALIZE_AFTER_HELP)]
    Normalize {
        /// Form JSON file path, or `-` for stdin
        path: Option<String>,
        /// How a day past the end of a short month is resolved
        #[arg(long, value_parser = parse_month_overflow, default_value = "clamp")]
        month_overflow: MonthOverflow,
        /// Also require a client and a valid price, as on submission
        #[arg(long)]
        strict: bool,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
    /// Summarize a stored backend payload and rebuild its form
    Summarize {
        /// Payload JSON file path, or `-` for stdin
        path: Option<String>,
        /// Label language: pt-br or en
        #[arg(long, value_parser = parse_locale, default_value = "pt-br")]
        locale: SummaryLocale,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
