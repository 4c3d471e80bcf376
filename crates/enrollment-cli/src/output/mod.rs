mod error_text;
mod format;
mod json;
mod mode;
mod schedule_text;

use std::io;

use enrollment_core::{ClientError, CommandName, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command {
        CommandName::Preview => schedule_text::render_preview(&success.data),
        CommandName::Normalize => schedule_text::render_normalize(&success.data),
        CommandName::Summarize => schedule_text::render_summarize(&success.data),
    }
}
