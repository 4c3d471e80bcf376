use std::io::{self, Write};

/// Writes command output to stdout. A reader that closed the pipe early
/// (`enrollment ... | head`) is not an error.
pub fn write_stdout_text(text: &str) -> io::Result<()> {
    write_to(&mut io::stdout().lock(), text, false)
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    write_to(&mut io::stdout().lock(), text, true)
}

fn write_to(writer: &mut dyn Write, text: &str, newline: bool) -> io::Result<()> {
    ignore_broken_pipe(writer.write_all(text.as_bytes()))?;
    if newline {
        ignore_broken_pipe(writer.write_all(b"\n"))?;
    }
    ignore_broken_pipe(writer.flush())
}

fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
