//! Docker Swarm secrets file handling.
//!
//! The secrets mount holds one `KEY=VALUE` pair per line. Only the raw file
//! text is wrapped in a [`SecretString`]; parsed values are plain strings
//! and end up in [`Config`](super::Config), which is printable.

use crate::error::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::path::Path;

/// Read the whole secrets file.
pub fn read_secrets(path: &Path) -> Result<SecretString> {
    std::fs::read_to_string(path)
        .map(SecretString::from)
        .map_err(|source| Error::SecretsUnreadable {
            path: path.to_path_buf(),
            source,
        })
}

/// Parse the exposed secrets into a key/value map.
pub fn parse_secrets(secrets: &SecretString) -> Result<HashMap<String, String>> {
    parse_key_values(secrets.expose_secret())
}

/// Parse newline-delimited `KEY=VALUE` text.
///
/// Empty lines are skipped. Each line splits on its first `=`, and both
/// halves are trimmed. A later duplicate key replaces an earlier one.
///
/// # Errors
///
/// Returns [`Error::MalformedLine`] with the 1-based line number for the
/// first non-empty line that has no `=`. The line itself is not reported.
pub fn parse_key_values(text: &str) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();

    for (idx, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let (key, value) = line
            .split_once('=')
            .ok_or(Error::MalformedLine { line: idx + 1 })?;
        map.insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(map)
}
