use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::{Builder, TempDir};

pub fn temp_dir_in_tmp(prefix: &str) -> std::io::Result<TempDir> {
    Builder::new().prefix(prefix).tempdir_in("/tmp")
}

pub fn write_fixture_json(dir: &Path, name: &str, value: &Value) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    let body = serde_json::to_string_pretty(value)
        .map_err(|error| std::io::Error::other(error.to_string()))?;
    fs::write(&path, body)?;
    Ok(path)
}

pub fn envelope_json<T: serde::Serialize>(envelope: T) -> Value {
    let payload = serde_json::to_value(envelope);
    assert!(payload.is_ok());
    payload.unwrap_or(Value::Null)
}
