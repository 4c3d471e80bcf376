mod input;
pub mod normalize;
pub mod preview;
pub mod summarize;

use crate::contracts::types::OccurrenceRow;
use crate::schedule::date::{format_iso_date, format_local_date};
use crate::schedule::occurrence::OccurrenceResult;

pub(crate) fn occurrence_row(occurrence: &OccurrenceResult) -> OccurrenceRow {
    OccurrenceRow {
        date: format_iso_date(&occurrence.date),
        local_date: format_local_date(&occurrence.date),
        kind: occurrence.kind.as_str().to_string(),
        start_time: occurrence.start_time.map(|time| time.to_string()),
        end_time: occurrence.end_time.map(|time| time.to_string()),
    }
}
