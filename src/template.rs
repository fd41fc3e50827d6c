use std::collections::BTreeMap;

use crate::error::ProviderError;

/// Replace every `{name}` placeholder in the template with its value.
///
/// Values are inserted verbatim. An unclosed `{` is kept as is.
pub fn replace_named_placeholders(
    template: &str,
    values: &BTreeMap<&str, String>,
) -> Result<String, ProviderError> {
    let mut resolved = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(opening) = rest.find('{') {
        resolved.push_str(&rest[..opening]);
        let after_opening = &rest[opening + 1..];
        let Some(closing) = after_opening.find('}') else {
            resolved.push_str(&rest[opening..]);
            return Ok(resolved);
        };
        let name = &after_opening[..closing];
        let value = values
            .get(name)
            .ok_or_else(|| ProviderError::Configuration { placeholder: name.to_owned() })?;
        resolved.push_str(value);
        rest = &after_opening[closing + 1..];
    }
    resolved.push_str(rest);
    Ok(resolved)
}
