/// Parse and validate a UMD global name passed with `--lib-name`.
///
/// The name becomes a property on the global object, so it must be a valid
/// JavaScript identifier: a letter, `_` or `$` first, then letters, digits,
/// `_` or `$`.
///
/// Valid: `TMyWidget`, `_internal`, `$jq`, `lib123`
/// Invalid: `123abc`, `my-lib`, `my.lib`, `""`
pub fn parse_global(s: &str) -> Result<String, String> {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return Err("Library name cannot be empty".to_string());
    };

    if !first.is_alphabetic() && first != '_' && first != '$' {
        return Err(format!(
            "Library name must start with a letter, underscore, or dollar sign: '{}'",
            s
        ));
    }

    if chars.any(|c| !c.is_alphanumeric() && c != '_' && c != '$') {
        return Err(format!(
            "Library name can only contain letters, numbers, underscores, or dollar signs: '{}'",
            s
        ));
    }

    Ok(s.to_string())
}
