use crate::configuration::Configuration;
use crate::error::ConfigurationError;
use std::fmt::Debug;
use tracing::trace;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Checks configuration objects before their services are created.
///
/// The registry asks [`is_valid`](ConfigurationValidator::is_valid) once per
/// materialized entry and drains [`take_errors`](ConfigurationValidator::take_errors)
/// after both phases. A validator that rejects without reporting anything makes
/// the entry disappear silently.
pub trait ConfigurationValidator: Debug {
    fn is_valid(&mut self, configuration: &dyn Configuration) -> bool;

    /// Drains the messages accumulated so far.
    fn take_errors(&mut self) -> Vec<ConfigurationError>;
}

/// Default validator backed by the `validator` derive constraints.
///
/// Each violated constraint becomes `Invalid <field> for <id>: <message>`,
/// falling back to the constraint code when no message is attached. Violations
/// of one object are reported sorted by field path.
#[derive(Debug, Default)]
pub struct ConstraintValidator {
    errors: Vec<ConfigurationError>,
}

impl ConstraintValidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigurationValidator for ConstraintValidator {
    fn is_valid(&mut self, configuration: &dyn Configuration) -> bool {
        match configuration.validate() {
            Ok(()) => true,
            Err(violations) => {
                let id = configuration.id();
                for (field, detail) in describe(&violations) {
                    trace!(id, %field, %detail, "Constraint violated");
                    self.errors.push(ConfigurationError::validation(id, &field, &detail));
                }
                false
            },
        }
    }

    fn take_errors(&mut self) -> Vec<ConfigurationError> {
        std::mem::take(&mut self.errors)
    }
}

/// Accepts everything. Useful when constraints are enforced elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl ConfigurationValidator for AcceptAll {
    fn is_valid(&mut self, _: &dyn Configuration) -> bool {
        true
    }

    fn take_errors(&mut self) -> Vec<ConfigurationError> {
        Vec::new()
    }
}

/// Flattens violations into sorted `(field, detail)` pairs.
///
/// Nested objects contribute dotted paths (`tls.cert`) and list items an index
/// (`routes[1].cert`). Struct-level checks are reported under the path of the
/// object they belong to, or `configuration` at the top level.
fn describe(violations: &ValidationErrors) -> Vec<(String, String)> {
    let mut described = Vec::new();
    walk(None, violations, &mut described);
    described.sort();
    described
}

fn walk(parent: Option<&str>, violations: &ValidationErrors, described: &mut Vec<(String, String)>) {
    for (field, kind) in violations.errors() {
        let path = match (parent, *field == "__all__") {
            (None, true) => "configuration".to_owned(),
            (Some(parent), true) => parent.to_owned(),
            (None, false) => field.to_string(),
            (Some(parent), false) => format!("{parent}.{field}"),
        };

        match kind {
            ValidationErrorsKind::Field(errors) => {
                described.extend(errors.iter().map(|error| (path.clone(), detail(error))));
            },
            ValidationErrorsKind::Struct(inner) => walk(Some(&path), inner, described),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    walk(Some(&format!("{path}[{index}]")), inner, described);
                }
            },
        }
    }
}

fn detail(error: &ValidationError) -> String {
    error.message.as_ref().map_or_else(|| error.code.to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "must not be empty"))]
        path: String,
        #[validate(range(min = 1))]
        interval: u64,
    }

    impl Configuration for Sample {
        fn id(&self) -> &str {
            "sample"
        }

        fn type_name(&self) -> &str {
            "sample"
        }
    }

    #[test]
    fn valid_objects_leave_no_errors() {
        let mut validator = ConstraintValidator::new();
        assert!(validator.is_valid(&Sample { path: "/x".into(), interval: 5 }));
        assert!(validator.take_errors().is_empty());
    }

    #[test]
    fn violations_are_sorted_by_field() {
        let mut validator = ConstraintValidator::new();
        assert!(!validator.is_valid(&Sample { path: String::new(), interval: 0 }));

        let messages: Vec<String> = validator.take_errors().iter().map(ToString::to_string).collect();
        assert_eq!(messages, vec!["Invalid interval for sample: range", "Invalid path for sample: must not be empty"]);
    }

    #[test]
    fn take_errors_drains() {
        let mut validator = ConstraintValidator::new();
        validator.is_valid(&Sample { path: String::new(), interval: 1 });
        assert_eq!(validator.take_errors().len(), 1);
        assert!(validator.take_errors().is_empty());
    }

    #[test]
    fn accept_all_never_reports() {
        let mut validator = AcceptAll;
        assert!(validator.is_valid(&Sample { path: String::new(), interval: 0 }));
        assert!(validator.take_errors().is_empty());
    }

    #[derive(Debug, Validate)]
    struct Tls {
        #[validate(length(min = 1, message = "must not be empty"))]
        cert: String,
    }

    #[derive(Debug, Validate)]
    struct Listener {
        #[validate(range(min = 1))]
        port: u16,
        #[validate(nested)]
        tls: Tls,
    }

    impl Configuration for Listener {
        fn id(&self) -> &str {
            "listener"
        }

        fn type_name(&self) -> &str {
            "listener"
        }
    }

    #[test]
    fn nested_violations_use_dotted_paths() {
        let mut validator = ConstraintValidator::new();
        assert!(!validator.is_valid(&Listener { port: 0, tls: Tls { cert: String::new() } }));

        let messages: Vec<String> = validator.take_errors().iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec!["Invalid port for listener: range", "Invalid tls.cert for listener: must not be empty"]
        );
    }

    #[test]
    fn nested_violations_alone_are_reported() {
        let mut validator = ConstraintValidator::new();
        assert!(!validator.is_valid(&Listener { port: 443, tls: Tls { cert: String::new() } }));
        assert_eq!(validator.take_errors().len(), 1);
    }
}
