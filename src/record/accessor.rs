//! Read-only field accessors
//!
//! Typed records get one generated method per field. The dynamic [`Record`]
//! hands out [`FieldAccessor`] handles instead; reading goes through the field's
//! get transform and assigning always fails.

use serde_json::Value;

use super::errors::{RecordError, RecordResult};
use super::instance::Record;
use super::ops::RecordType;

/// Read-only handle on one declared field of a record.
#[derive(Debug, Clone, Copy)]
pub struct FieldAccessor<'a> {
    record: &'a Record,
    name: &'a str,
}

impl<'a> FieldAccessor<'a> {
    pub(crate) fn new(record: &'a Record, name: &'a str) -> Self {
        Self { record, name }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Current exposed (post-transform) value.
    pub fn get(&self) -> Value {
        self.record.get(self.name).unwrap_or(Value::Null)
    }

    /// Records never accept assignment, whatever the field's set transform.
    ///
    /// # Errors
    ///
    /// Always returns `ImmutabilityViolation`.
    pub fn assign(&self, _value: impl Into<Value>) -> RecordResult<()> {
        Err(RecordError::ImmutabilityViolation {
            field: self.name.to_owned(),
        })
    }
}
