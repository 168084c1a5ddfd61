//! The dynamic record instance
//!
//! A [`Record`] pairs a shared schema with shared raw data. Both sit behind an
//! `Arc`, so cloning a record is cheap and never copies field values.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::errors::RecordResult;
use super::ops::RecordType;
use super::validator::ConstructionValidator;
use crate::schema::Schema;
use crate::update::{AsRawData, RawData};

/// An immutable value conforming to a schema.
///
/// Invariants:
/// - Raw data built through [`Record::construct`] only holds declared keys
/// - Raw data is stored exactly as given (no set transform at construction)
/// - Nothing mutates a record once built; every mutator returns a new one
#[derive(Clone)]
pub struct Record {
    schema: Arc<Schema>,
    raw: Arc<RawData>,
}

impl Record {
    /// Validating constructor.
    ///
    /// # Errors
    ///
    /// Returns `SchemaViolation` if `raw` carries a key the schema does not
    /// declare.
    pub fn construct(schema: Arc<Schema>, raw: impl Into<Arc<RawData>>) -> RecordResult<Self> {
        let raw = raw.into();
        ConstructionValidator::new(&schema).validate(&raw)?;
        Ok(Self { schema, raw })
    }

    /// Record with no stored data; every field observes its default.
    pub fn empty(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            raw: Arc::new(RawData::new()),
        }
    }

    /// Non-failing constructor for untrusted input.
    ///
    /// Keys the schema does not declare and `null` values are dropped.
    pub fn from_unknown(schema: Arc<Schema>, external: &Value) -> Self {
        let raw = ConstructionValidator::new(&schema).filter(external);
        Self {
            schema,
            raw: Arc::new(raw),
        }
    }

    /// Wraps raw data that went through a pre-processing step after
    /// filtering. Keys the step introduced without declaring are dropped.
    #[doc(hidden)]
    pub fn from_prepared(schema: Arc<Schema>, raw: Arc<RawData>) -> Self {
        if raw.keys().all(|key| schema.contains(key)) {
            return Self { schema, raw };
        }
        let kept = ConstructionValidator::new(&schema).retain_declared(&raw);
        Self {
            schema,
            raw: Arc::new(kept),
        }
    }

    /// The shared schema
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Stored (untransformed) data, sparse
    pub fn raw_data(&self) -> &RawData {
        &self.raw
    }

    pub(crate) fn raw_arc(&self) -> &Arc<RawData> {
        &self.raw
    }

    /// True when both records wrap the very same raw data allocation.
    pub fn shares_raw_data(&self, other: &Record) -> bool {
        Arc::ptr_eq(&self.raw, &other.raw)
    }
}

impl RecordType for Record {
    fn record(&self) -> &Record {
        self
    }

    fn unit(&self, raw: Arc<RawData>) -> RecordResult<Self> {
        Record::construct(Arc::clone(&self.schema), raw)
    }
}

impl AsRawData for Record {
    fn as_raw_data(&self) -> &RawData {
        &self.raw
    }
}

/// Data equality: same schema and the same materialized fields.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.schema, &other.schema) && self.to_object() == other.to_object()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inspect())
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("type", &self.schema.name())
            .field("raw", &self.raw)
            .finish()
    }
}

/// Serializes the stored view (`to_object`).
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_object().serialize(serializer)
    }
}
