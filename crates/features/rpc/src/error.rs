use dbx_kernel::domain::config::Section;
use std::borrow::Cow;

/// Component construction error type.
#[dbx_derive::dbx_error]
pub enum ComponentError {
    #[error("Required field '{section}.{field}' must not be empty{}", format_context(.context))]
    MissingField { section: &'static str, field: &'static str, context: Option<Cow<'static, str>> },
}

/// Returns the value of a required string field of section `S`.
///
/// Unset and empty both count as missing.
pub(crate) fn require<'a, S: Section>(
    value: Option<&'a str>,
    field: &'static str,
) -> Result<&'a str, ComponentError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ComponentError::MissingField { section: S::NAME, field, context: None }),
    }
}
