use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Reads the entire file, with the path in any error message.
pub fn slurp_file<I: AsRef<str>>(path: I) -> Result<String> {
    let path = path.as_ref();
    fs_err::read_to_string(path).with_context(|| format!("Couldn't read {}", path))
}

pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let raw = slurp_file(path)?;
    serde_json::from_str(&raw).with_context(|| format!("Couldn't parse {}", path))
}
