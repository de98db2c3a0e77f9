//! `@import` reference rewriting for flattened LESS trees.
//!
//! Flattening removes one directory level and turns `dir/index.less` into
//! `dir.less`, so references written against the source tree are adjusted
//! to match: one leading `../` is dropped and a trailing `/index` is removed.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Prefix, then a single- or double-quoted `.less` reference.
const IMPORT_PATTERN: &str = r#"(@import\s+)(?:'([^'\n]+)\.less'|"([^"\n]+)\.less")"#;

static IMPORT_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(IMPORT_PATTERN).ok());

/// Rewrite every `.less` import reference in `content`.
///
/// Text outside `@import` statements is never touched; content without a
/// matching import is returned borrowed.
pub fn rewrite_imports(content: &str) -> Cow<'_, str> {
    let Some(re) = IMPORT_RE.as_ref() else {
        return Cow::Borrowed(content);
    };

    re.replace_all(content, |caps: &Captures<'_>| {
        let (quote, reference) = match (caps.get(2), caps.get(3)) {
            (Some(single), _) => ('\'', single.as_str()),
            (None, Some(double)) => ('"', double.as_str()),
            (None, None) => return caps[0].to_string(),
        };
        format!(
            "{}{quote}{}.less{quote}",
            &caps[1],
            rewrite_reference(reference)
        )
    })
}

/// Adjust one import reference (without its `.less` suffix).
///
/// A trailing `/index` is dropped only when it follows a named directory;
/// `./index` and `../index` stay as they are.
pub fn rewrite_reference(reference: &str) -> String {
    let path = reference.strip_prefix("../").unwrap_or(reference);
    match path.strip_suffix("/index") {
        Some(parent) if is_named_directory(parent) => parent.to_string(),
        _ => path.to_string(),
    }
}

fn is_named_directory(path: &str) -> bool {
    let last = path.rsplit('/').next().unwrap_or(path);
    !last.is_empty() && last != "." && last != ".."
}

/// The `.less` references imported by `content`, in order of appearance.
pub fn import_references(content: &str) -> Vec<String> {
    let Some(re) = IMPORT_RE.as_ref() else {
        return Vec::new();
    };
    re.captures_iter(content)
        .filter_map(|caps| caps.get(2).or_else(|| caps.get(3)))
        .map(|m| m.as_str().to_string())
        .collect()
}
