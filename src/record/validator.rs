//! Construction-time key checks
//!
//! Validation semantics:
//! - Every raw data key must be declared by the schema
//! - Values are not inspected (no type checks, no coercion)
//! - The first undeclared key, in raw data order, is reported
//!
//! Filtering (untrusted input) keeps the declared keys whose value is present
//! and not `null`, and silently drops everything else. `0`, `""` and `false`
//! count as present.

use serde_json::Value;
use tracing::debug;

use super::errors::{RecordError, RecordResult};
use crate::schema::Schema;
use crate::update::{value_type_name, RawData};

/// Enforces the raw-data/schema key-subset invariant.
pub struct ConstructionValidator<'a> {
    schema: &'a Schema,
}

impl<'a> ConstructionValidator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Checks that every key of `raw` is declared.
    ///
    /// # Errors
    ///
    /// Returns `SchemaViolation` naming the first undeclared key and listing
    /// every declared key in declaration order.
    pub fn validate(&self, raw: &RawData) -> RecordResult<()> {
        match raw.keys().find(|key| !self.schema.contains(key)) {
            Some(key) => {
                debug!(
                    record = self.record_name(),
                    key = %key,
                    "rejected undeclared key"
                );
                Err(RecordError::SchemaViolation {
                    key: key.clone(),
                    valid: self.schema.key_list(),
                })
            }
            None => Ok(()),
        }
    }

    /// Intersects untrusted input with the schema. Never fails.
    ///
    /// The result is in declaration order. Non-object input yields an empty
    /// mapping.
    pub fn filter(&self, external: &Value) -> RawData {
        let Some(obj) = external.as_object() else {
            if !external.is_null() {
                debug!(
                    record = self.record_name(),
                    found = value_type_name(external),
                    "ignoring non-object input"
                );
            }
            return RawData::new();
        };

        for key in obj.keys().filter(|key| !self.schema.contains(key)) {
            debug!(record = self.record_name(), key = %key, "dropping undeclared key");
        }

        self.schema
            .keys()
            .filter_map(|key| match obj.get(key) {
                Some(value) if !value.is_null() => Some((key.to_owned(), value.clone())),
                _ => None,
            })
            .collect()
    }

    /// Drops undeclared keys from already-trusted raw data, keeping its order.
    pub fn retain_declared(&self, raw: &RawData) -> RawData {
        raw.iter()
            .filter(|(key, _)| self.schema.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    fn record_name(&self) -> &str {
        self.schema.name().unwrap_or("<anonymous>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaResolver;
    use serde_json::json;

    fn foo_schema() -> Schema {
        SchemaResolver::named("FooRecord")
            .field("foo", "bar")
            .field("baz", "qux")
            .resolve()
    }

    fn raw(value: Value) -> RawData {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_subset_passes() {
        let schema = foo_schema();
        let validator = ConstructionValidator::new(&schema);
        assert!(validator.validate(&raw(json!({}))).is_ok());
        assert!(validator.validate(&raw(json!({"baz": 1}))).is_ok());
        assert!(validator.validate(&raw(json!({"foo": 1, "baz": 2}))).is_ok());
    }

    #[test]
    fn test_undeclared_key_fails_with_full_key_list() {
        let schema = foo_schema();
        let validator = ConstructionValidator::new(&schema);
        let err = validator
            .validate(&raw(json!({"foo": 1, "wrong": 2})))
            .unwrap_err();
        assert_eq!(
            err,
            RecordError::SchemaViolation {
                key: "wrong".into(),
                valid: "foo, baz".into()
            }
        );
    }

    #[test]
    fn test_filter_drops_unknown_and_null() {
        let schema = foo_schema();
        let validator = ConstructionValidator::new(&schema);
        let filtered = validator.filter(&json!({"not": "cool", "baz": "!!!", "foo": null}));
        assert_eq!(Value::Object(filtered), json!({"baz": "!!!"}));
    }

    #[test]
    fn test_filter_keeps_falsy_values() {
        let schema = foo_schema();
        let validator = ConstructionValidator::new(&schema);
        let filtered = validator.filter(&json!({"foo": 0, "baz": ""}));
        assert_eq!(Value::Object(filtered), json!({"foo": 0, "baz": ""}));
        let filtered = validator.filter(&json!({"foo": false}));
        assert_eq!(filtered["foo"], json!(false));
    }

    #[test]
    fn test_filter_uses_declaration_order() {
        let schema = foo_schema();
        let validator = ConstructionValidator::new(&schema);
        let filtered = validator.filter(&json!({"baz": 1, "foo": 2}));
        assert_eq!(filtered.keys().collect::<Vec<_>>(), vec!["foo", "baz"]);
    }

    #[test]
    fn test_filter_non_object() {
        let schema = foo_schema();
        let validator = ConstructionValidator::new(&schema);
        assert!(validator.filter(&json!([1, 2])).is_empty());
        assert!(validator.filter(&json!("foo")).is_empty());
        assert!(validator.filter(&Value::Null).is_empty());
    }

    #[test]
    fn test_retain_declared() {
        let schema = foo_schema();
        let validator = ConstructionValidator::new(&schema);
        let kept = validator.retain_declared(&raw(json!({"baz": 1, "extra": 2})));
        assert_eq!(Value::Object(kept), json!({"baz": 1}));
    }
}
