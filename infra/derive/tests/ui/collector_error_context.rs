use collector_derive::collector_error;
use std::borrow::Cow;

#[collector_error]
pub enum DemoError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<i64, DemoError> {
    raw.parse::<i64>().context("Parsing reader interval")
}

fn fail() -> Result<(), DemoError> {
    Err("unreachable state".into())
}

fn main() {
    let err = parse("abc").unwrap_err();
    assert!(matches!(err, DemoError::Parse { context: Some(_), .. }));
    assert!(err.to_string().starts_with("Parse error (Parsing reader interval): "));

    let err = fail().context("Outer").unwrap_err();
    assert_eq!(err.to_string(), "Internal error (Outer): unreachable state");

    let converted: DemoError = "17x".parse::<i64>().unwrap_err().into();
    assert!(matches!(converted, DemoError::Parse { context: None, .. }));
}
