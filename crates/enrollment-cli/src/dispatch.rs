use enrollment_core::commands;
use enrollment_core::commands::preview::PreviewOptions;
use enrollment_core::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Preview {
            start,
            frequency,
            days,
            day_of_month,
            start_time,
            end_time,
            month_overflow,
            json: _,
        } => commands::preview::run(PreviewOptions {
            start: start.as_str().to_string(),
            frequency: frequency.clone(),
            days: days.clone(),
            day_of_month: *day_of_month,
            start_time: start_time.clone(),
            end_time: end_time.clone(),
            month_overflow: *month_overflow,
        }),
        Commands::Normalize {
            path,
            month_overflow,
            strict,
            ..
        } => commands::normalize::run(path.clone(), *month_overflow, *strict),
        Commands::Summarize { path, locale, .. } => {
            commands::summarize::run(path.clone(), *locale)
        }
    }
}
