//! UMD global name derivation from a scoped package name.

use crate::error::{ConfigError, Result};

/// Namespace marker prefixed to every derived library name.
pub const LIBRARY_NAMESPACE: char = 'T';

/// Derive the UMD global identifier from a scoped package name.
///
/// `@acme/my-widget` becomes `TMyWidget`: the part after the scope is split
/// on `-`, each segment gets an upper-cased first character, and the result
/// is prefixed with [`LIBRARY_NAMESPACE`].
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPackageName`] unless the name has the shape
/// `@scope/name` with a non-empty scope and name.
pub fn derive_library_name(package_name: &str) -> Result<String> {
    let invalid = || ConfigError::InvalidPackageName {
        name: package_name.to_string(),
    };

    let scoped = package_name.strip_prefix('@').ok_or_else(invalid)?;
    let (scope, name) = scoped.split_once('/').ok_or_else(invalid)?;
    if scope.is_empty() || name.is_empty() || name.contains('/') {
        return Err(invalid());
    }

    let mut derived = String::with_capacity(name.len() + 1);
    derived.push(LIBRARY_NAMESPACE);
    for segment in name.split('-').filter(|s| !s.is_empty()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            derived.extend(first.to_uppercase());
            derived.push_str(chars.as_str());
        }
    }

    if derived.len() == LIBRARY_NAMESPACE.len_utf8() {
        return Err(invalid());
    }

    tracing::debug!(package = package_name, library = %derived, "derived library name");
    Ok(derived)
}
