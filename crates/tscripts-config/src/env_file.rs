//! `.env` file parsing and first-writer-wins merging.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Result};

/// Conventional environment file name at the project root.
pub const ENV_FILE_NAME: &str = ".env";

/// Parse `.env` text into ordered key/value pairs.
///
/// Accepts `KEY=VALUE`, an optional `export ` prefix, `#` comment lines,
/// blank lines and single- or double-quoted values. When a key repeats, the
/// first occurrence wins.
pub fn parse(content: &str) -> Result<BTreeMap<String, String>> {
    let mut vars = BTreeMap::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);

        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigError::InvalidValue {
                field: ENV_FILE_NAME.to_string(),
                hint: format!("line {} is not KEY=VALUE: '{}'", index + 1, raw),
            });
        };

        let key = key.trim();
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                field: ENV_FILE_NAME.to_string(),
                hint: format!("line {} has an invalid key: '{}'", index + 1, raw),
            });
        }

        vars.entry(key.to_string())
            .or_insert_with(|| unquote(value.trim()).to_string());
    }

    Ok(vars)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        let Some(rest) = value.strip_prefix(quote) else {
            continue;
        };
        if let Some(end) = rest.find(quote) {
            // Only a comment may follow the closing quote.
            let tail = rest[end + 1..].trim_start();
            if tail.is_empty() || tail.starts_with('#') {
                return &rest[..end];
            }
        }
    }
    // Unquoted values may carry a trailing comment.
    match value.find(" #") {
        Some(pos) => value[..pos].trim_end(),
        None => value,
    }
}

/// Load the environment file under `root`, if present.
pub fn load(root: impl AsRef<Path>) -> Result<BTreeMap<String, String>> {
    let path = root.as_ref().join(ENV_FILE_NAME);
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let vars = parse(&content)?;
    tracing::debug!(path = %path.display(), count = vars.len(), "loaded environment file");
    Ok(vars)
}

/// Merge file variables under the process environment.
///
/// Every key from the file appears in the result; a key that is already set
/// in `process` keeps the process value.
pub fn merge_under(
    file: BTreeMap<String, String>,
    process: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    file.into_iter()
        .map(|(key, value)| match process.get(&key) {
            Some(existing) => {
                tracing::debug!(key = %key, "process environment overrides .env value");
                (key, existing.clone())
            }
            None => (key, value),
        })
        .collect()
}
