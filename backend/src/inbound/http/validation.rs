//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_uuid",
    }))
}

pub(crate) fn parse_uuid(value: String, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(&value).map_err(|_| invalid_uuid_error(field, &value))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use serde_json::Value;

    use super::*;

    #[test]
    fn parse_uuid_accepts_canonical_form() {
        let id = Uuid::new_v4();
        let parsed = parse_uuid(id.to_string(), FieldName::new("id")).expect("valid uuid");
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_uuid_reports_the_field_and_value() {
        let error =
            parse_uuid("nope".to_owned(), FieldName::new("questionId")).expect_err("invalid uuid");
        let details = error.details().expect("details present");
        assert_eq!(
            details.get("field").and_then(Value::as_str),
            Some("questionId")
        );
        assert_eq!(details.get("value").and_then(Value::as_str), Some("nope"));
    }
}
