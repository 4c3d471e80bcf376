use std::fs;
use std::io::{IsTerminal, Read};

use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum SourceKind {
    File,
    Stdin,
}

impl SourceKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stdin => "stdin",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSource {
    pub(crate) kind: SourceKind,
    pub(crate) content: String,
}

/// Reads a JSON document from a file path, `-` for stdin, or piped stdin.
pub(crate) fn resolve_source(
    command: &str,
    path: Option<&str>,
    stdin_override: Option<String>,
) -> ClientResult<ResolvedSource> {
    let stdin_body = read_stdin(command, stdin_override)?;

    if let Some(path_value) = path {
        if path_value == "-" {
            return stdin_body
                .map(|content| ResolvedSource {
                    kind: SourceKind::Stdin,
                    content,
                })
                .ok_or_else(|| {
                    ClientError::invalid_argument_for_command(
                        "Path `-` means stdin input, but stdin was empty. Pipe a JSON document or pass a file path.",
                        Some(command),
                    )
                });
        }

        if stdin_body.is_some() {
            return Err(ClientError::invalid_argument_for_command(
                "Both stdin and file input were provided. Pass exactly one source: either a file path or piped stdin.",
                Some(command),
            ));
        }

        let content = fs::read_to_string(path_value).map_err(|error| {
            ClientError::invalid_argument_with_recovery(
                &format!("Could not read input file `{path_value}`: {error}"),
                vec![
                    "Verify the path exists and is readable.".to_string(),
                    format!("Rerun enrollment {command} <path>."),
                ],
            )
        })?;
        return Ok(ResolvedSource {
            kind: SourceKind::File,
            content,
        });
    }

    stdin_body
        .map(|content| ResolvedSource {
            kind: SourceKind::Stdin,
            content,
        })
        .ok_or_else(|| {
            ClientError::invalid_argument_for_command(
                "No input provided. Pass a file path or pipe a JSON document via stdin.",
                Some(command),
            )
        })
}

fn read_stdin(command: &str, stdin_override: Option<String>) -> ClientResult<Option<String>> {
    let body = match stdin_override {
        Some(value) => value,
        None => {
            if std::io::stdin().is_terminal() {
                return Ok(None);
            }
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|error| {
                    ClientError::invalid_argument_with_recovery(
                        &format!("Could not read stdin: {error}"),
                        vec![
                            "Retry with an explicit file path argument.".to_string(),
                            format!("Or rerun enrollment {command} with valid stdin content."),
                        ],
                    )
                })?;
            buffer
        }
    };

    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(body))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{SourceKind, resolve_source};

    #[test]
    fn dash_reads_the_stdin_override() {
        let resolved = resolve_source("normalize", Some("-"), Some("{}".to_string()));
        assert!(resolved.is_ok());
        if let Ok(source) = resolved {
            assert_eq!(source.kind, SourceKind::Stdin);
            assert_eq!(source.content, "{}");
        }
    }

    #[test]
    fn dash_with_blank_stdin_is_rejected() {
        let resolved = resolve_source("normalize", Some("-"), Some("  \n".to_string()));
        assert!(resolved.is_err());
        if let Err(error) = resolved {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("stdin was empty"));
        }
    }

    #[test]
    fn file_and_stdin_together_conflict() {
        let file = tempfile::NamedTempFile::new();
        assert!(file.is_ok());
        if let Ok(mut handle) = file {
            assert!(handle.write_all(b"{}").is_ok());
            let path = handle.path().to_string_lossy().to_string();

            let conflict = resolve_source("summarize", Some(&path), Some("{}".to_string()));
            assert!(conflict.is_err());

            let from_file = resolve_source("summarize", Some(&path), Some(String::new()));
            assert_eq!(
                from_file.map(|source| source.kind.as_str()).ok(),
                Some("file")
            );
        }
    }

    #[test]
    fn missing_file_names_the_path() {
        let resolved = resolve_source(
            "normalize",
            Some("/definitely/not/here.json"),
            Some(String::new()),
        );
        assert!(resolved.is_err());
        if let Err(error) = resolved {
            assert!(error.message.contains("/definitely/not/here.json"));
        }
    }
}
