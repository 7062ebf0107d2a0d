use dbx_derive::dbx_error;
use std::borrow::Cow;

#[dbx_error]
pub enum FieldError {
    #[error("Field '{field}' is missing{}", format_context(.context))]
    Missing { field: &'static str, context: Option<Cow<'static, str>> },

    #[error("Parse error{}: {source}", format_context(.context))]
    Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<i32, FieldError> {
    raw.parse::<i32>().context("reading port")
}

fn missing() -> Result<(), FieldError> {
    Err(FieldError::Missing { field: "name", context: None }).context("application")
}

fn main() {
    let err = parse("abc").unwrap_err();
    assert_eq!(err.to_string(), "Parse error (reading port): invalid digit found in string");

    let err = missing().unwrap_err();
    assert_eq!(err.to_string(), "Field 'name' is missing (application)");

    let lifted: FieldError = "x".parse::<i32>().unwrap_err().into();
    assert!(matches!(lifted, FieldError::Parse { context: None, .. }));
}
