//! Record operations
//!
//! Every record type implements [`RecordType`] by naming its core [`Record`]
//! and its `unit` constructor. All read, write and enumeration operations are
//! provided on top of those two.
//!
//! Read path:
//! - `get` applies the field's get transform, to the stored value or the default
//! - `get_or` never transforms the caller's fallback
//! - `get_in` is raw descent, no transform even for a single segment
//!
//! Write path:
//! - `set` and `merge` apply the target field's set transform
//! - `set_in` is raw, no transform
//! - every mutator ends in `unit`, which re-enters the validating constructor

use serde_json::Value;
use std::sync::Arc;

use super::accessor::FieldAccessor;
use super::errors::{RecordError, RecordResult};
use super::instance::Record;
use crate::schema::Schema;
use crate::update::{self, AsRawData, Collection, Path, RawData};

/// Behaviour shared by the dynamic [`Record`] and every typed record.
pub trait RecordType: Sized {
    /// The core instance behind this value.
    fn record(&self) -> &Record;

    /// Builds a new value of this type around `raw`.
    ///
    /// Every mutator goes through here, so a typed record rebuilds as itself,
    /// pre-processing included.
    fn unit(&self, raw: Arc<RawData>) -> RecordResult<Self>;

    fn schema(&self) -> &Arc<Schema> {
        self.record().schema()
    }

    /// Stored (untransformed) data, sparse
    fn raw_data(&self) -> &RawData {
        self.record().raw_data()
    }

    // ----------------------------------------------------------------------
    // Read path
    // ----------------------------------------------------------------------

    /// Exposed value of `key`.
    ///
    /// Declared fields always yield a value: the transformed stored value, or
    /// the transformed default when nothing is stored. Undeclared keys yield
    /// `None`.
    fn get(&self, key: &str) -> Option<Value> {
        let raw = self.raw_data();
        match (self.schema().field(key), raw.get(key)) {
            (Some(spec), Some(stored)) => Some(spec.read(stored, raw)),
            (Some(spec), None) => Some(spec.read(spec.default_value(), raw)),
            (None, stored) => stored.cloned(),
        }
    }

    /// Exposed value of `key`, or `not_found` untouched when nothing is stored.
    fn get_or(&self, key: &str, not_found: Value) -> Value {
        let raw = self.raw_data();
        match (raw.get(key), self.schema().field(key)) {
            (Some(stored), Some(spec)) => spec.read(stored, raw),
            (Some(stored), None) => stored.clone(),
            (None, _) => not_found,
        }
    }

    /// Raw value at `path`, falling back to the same path in the defaults.
    fn get_in(&self, path: impl Into<Path>) -> Option<Value> {
        let path = path.into();
        update::get_in(self.raw_data(), &path)
            .or_else(|| update::get_in(self.schema().defaults(), &path))
    }

    /// Raw value at `path`, or `not_found` untouched when nothing is stored there.
    fn get_in_or(&self, path: impl Into<Path>, not_found: Value) -> Value {
        update::get_in(self.raw_data(), &path.into()).unwrap_or(not_found)
    }

    /// True iff `key` is declared, whether or not a value is stored.
    fn has(&self, key: &str) -> bool {
        self.schema().contains(key)
    }

    /// Read-only handle on a declared field
    fn accessor(&self, key: &str) -> Option<FieldAccessor<'_>> {
        let name = self.schema().keys().find(|name| *name == key)?;
        Some(FieldAccessor::new(self.record(), name))
    }

    /// One read-only handle per declared field, in declaration order
    fn accessors(&self) -> impl Iterator<Item = FieldAccessor<'_>> {
        let record = self.record();
        record
            .schema()
            .keys()
            .map(move |name| FieldAccessor::new(record, name))
    }

    // ----------------------------------------------------------------------
    // Write path
    // ----------------------------------------------------------------------

    /// New record with `key` set to the field's `set(value)`.
    ///
    /// # Errors
    ///
    /// `SchemaViolation` when `key` is not declared.
    fn set(&self, key: &str, value: impl Into<Value>) -> RecordResult<Self> {
        let value = value.into();
        let stored = match self.schema().field(key) {
            Some(spec) => spec.write(value),
            None => value,
        };
        self.unit(Arc::new(update::set(self.raw_data(), key, stored)?))
    }

    /// New record with the raw value at `path` replaced. No transform applies.
    ///
    /// # Errors
    ///
    /// `Update` when the update library rejects the path, `SchemaViolation`
    /// when the first segment is not declared.
    fn set_in(&self, path: impl Into<Path>, value: impl Into<Value>) -> RecordResult<Self> {
        let raw = update::set_in(self.raw_data(), &path.into(), value.into())?;
        self.unit(Arc::new(raw))
    }

    /// New record without a stored value for `key`. Absent keys are a no-op.
    fn delete(&self, key: &str) -> RecordResult<Self> {
        self.unit(Arc::new(update::delete(self.raw_data(), key)?))
    }

    /// New record overlaid with `next`'s stored data.
    ///
    /// Only what `next` actually stores participates, never its defaults.
    /// Each incoming value goes through this schema's set transform for its key.
    fn merge(&self, next: &impl AsRawData) -> RecordResult<Self> {
        let schema = self.schema();
        let incoming: RawData = next
            .as_raw_data()
            .iter()
            .map(|(key, value)| {
                let stored = match schema.field(key) {
                    Some(spec) => spec.write(value.clone()),
                    None => value.clone(),
                };
                (key.clone(), stored)
            })
            .collect();
        self.unit(Arc::new(update::merge(self.raw_data(), &incoming)?))
    }

    /// New record with no stored data
    fn clear(&self) -> RecordResult<Self> {
        self.unit(Arc::new(RawData::new()))
    }

    /// New record around the very same raw data.
    fn clone_record(&self) -> RecordResult<Self> {
        self.unit(Arc::clone(self.record().raw_arc()))
    }

    // ----------------------------------------------------------------------
    // Enumeration & materialization
    // ----------------------------------------------------------------------

    /// Defaults overlaid by stored data, in declaration order, untransformed.
    ///
    /// The result can be fed back to the validating constructor.
    fn to_object(&self) -> RawData {
        let raw = self.raw_data();
        self.schema()
            .fields()
            .map(|(key, spec)| {
                let value = raw
                    .get(key)
                    .unwrap_or_else(|| spec.default_value())
                    .clone();
                (key.to_owned(), value)
            })
            .collect()
    }

    /// Lazy `(key, value)` pairs over the `to_object` view.
    fn entries(&self) -> Entries {
        Entries::new(self.record())
    }

    /// Number of declared fields
    fn count(&self) -> usize {
        self.schema().len()
    }

    fn to_json(&self) -> Value {
        Value::Object(self.to_object())
    }

    /// Diagnostic rendering: `TypeName {"field":value,...}`
    fn inspect(&self) -> String {
        format!(
            "{} {}",
            self.schema().name().unwrap_or("Record"),
            self.to_json()
        )
    }
}

/// Iterator over a record's materialized fields.
///
/// Restartable: clone it, or call `entries()` again.
#[derive(Debug, Clone)]
pub struct Entries {
    record: Record,
    position: usize,
}

impl Entries {
    fn new(record: &Record) -> Self {
        Self {
            record: record.clone(),
            position: 0,
        }
    }
}

impl Iterator for Entries {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        let schema = self.record.schema();
        let key = schema.key_at(self.position)?;
        self.position += 1;
        let value = match self.record.raw_data().get(key) {
            Some(stored) => stored.clone(),
            None => schema.default_value(key)?.clone(),
        };
        Some((key.to_owned(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.record.schema().len().saturating_sub(self.position);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Entries {}

/// Records are collections: the free update functions dispatch to the
/// record's own operations, so defaults, transforms and schema checks apply.
impl<T: RecordType> Collection for T {
    type Error = RecordError;
    type Entries = Entries;

    fn lookup(&self, key: &str) -> Option<Value> {
        RecordType::get(self, key)
    }

    fn lookup_or(&self, key: &str, not_found: Value) -> Value {
        RecordType::get_or(self, key, not_found)
    }

    fn lookup_in(&self, path: &Path) -> Option<Value> {
        RecordType::get_in(self, path.clone())
    }

    fn lookup_in_or(&self, path: &Path, not_found: Value) -> Value {
        RecordType::get_in_or(self, path.clone(), not_found)
    }

    fn holds(&self, key: &str) -> bool {
        RecordType::has(self, key)
    }

    fn with_entry(&self, key: &str, value: Value) -> RecordResult<Self> {
        RecordType::set(self, key, value)
    }

    fn with_entry_in(&self, path: &Path, value: Value) -> RecordResult<Self> {
        RecordType::set_in(self, path.clone(), value)
    }

    fn without_entry(&self, key: &str) -> RecordResult<Self> {
        RecordType::delete(self, key)
    }

    fn merged_with(&self, other: &RawData) -> RecordResult<Self> {
        RecordType::merge(self, other)
    }

    fn emptied(&self) -> RecordResult<Self> {
        RecordType::clear(self)
    }

    fn duplicate(&self) -> RecordResult<Self> {
        RecordType::clone_record(self)
    }

    fn entry_iter(&self) -> Entries {
        RecordType::entries(self)
    }

    fn size(&self) -> usize {
        RecordType::count(self)
    }

    fn materialize(&self) -> RawData {
        RecordType::to_object(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordError;
    use crate::schema::{FieldConfig, SchemaResolver};
    use crate::{path, UpdateError};
    use serde_json::json;

    fn foo_record(raw: Value) -> Record {
        let schema = SchemaResolver::named("FooRecord")
            .field("foo", "bar")
            .field("baz", "qux")
            .resolve_shared();
        Record::construct(schema, raw.as_object().cloned().unwrap_or_default()).unwrap()
    }

    #[test]
    fn test_get_defaults_and_fallback() {
        let foo = foo_record(json!({}));
        assert_eq!(foo.get("foo"), Some(json!("bar")));
        assert_eq!(foo.get("baz"), Some(json!("qux")));
        assert_eq!(foo.get("missing"), None);
        assert_eq!(foo.get_or("baz", json!("custom")), json!("custom"));
    }

    #[test]
    fn test_get_or_prefers_stored_value() {
        let foo = foo_record(json!({"baz": 0}));
        assert_eq!(foo.get_or("baz", json!("custom")), json!(0));
    }

    #[test]
    fn test_get_in() {
        let foo = foo_record(json!({}));
        assert_eq!(foo.get_in(path!("foo")), Some(json!("bar")));
        assert_eq!(foo.get_in(path!("bar")), None);
        assert_eq!(foo.get_in_or(path!("bar"), json!("baz")), json!("baz"));
        assert_eq!(foo.get_in_or(path!("foo"), json!("x")), json!("x"));
    }

    #[test]
    fn test_has_is_schema_presence() {
        let foo = foo_record(json!({"foo": 2}));
        assert!(foo.has("foo"));
        assert!(foo.has("baz"));
        assert!(!foo.has("nope"));
    }

    #[test]
    fn test_set_leaves_receiver_untouched() {
        let foo = foo_record(json!({}));
        let before = foo.inspect();
        let next = foo.set("foo", "qux").unwrap();
        assert_eq!(next.raw_data()["foo"], json!("qux"));
        assert_eq!(foo.inspect(), before);
    }

    #[test]
    fn test_set_undeclared_key_fails() {
        let foo = foo_record(json!({"foo": 1}));
        let err = foo.set("wrong", 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot create record with property \"wrong\". Must be one of foo, baz"
        );
    }

    #[test]
    fn test_set_in_and_errors() {
        let foo = foo_record(json!({}));
        let next = foo.set_in(path!("foo", "bar"), "qux").unwrap();
        assert_eq!(next.raw_data()["foo"]["bar"], json!("qux"));
        assert!(foo.raw_data().is_empty());

        let scalar = foo_record(json!({"foo": "bar"}));
        let err = scalar.set_in(path!("foo", "x"), 1).unwrap_err();
        assert!(matches!(
            err,
            RecordError::Update(UpdateError::NotACollection { .. })
        ));

        let err = foo.set_in(path!("wrong", "x"), 1).unwrap_err();
        assert!(err.is_schema_violation());
    }

    #[test]
    fn test_delete_and_clear() {
        let foo = foo_record(json!({"foo": "radical"}));
        let deleted = foo.delete("foo").unwrap();
        assert!(deleted.raw_data().get("foo").is_none());
        assert_eq!(deleted.get("foo"), Some(json!("bar")));
        assert_eq!(foo.delete("baz").unwrap(), foo);

        let cleared = foo.clear().unwrap();
        assert_eq!(cleared.get("foo"), Some(json!("bar")));
        assert_eq!(foo.get("foo"), Some(json!("radical")));
    }

    #[test]
    fn test_merge_only_uses_stored_data() {
        let previous = foo_record(json!({"foo": 1, "baz": "set"}));
        let next = foo_record(json!({"foo": 2}));
        let merged = previous.merge(&next).unwrap();
        assert_eq!(merged.to_json(), json!({"foo": 2, "baz": "set"}));
    }

    #[test]
    fn test_merge_applies_target_set_transform() {
        let schema = SchemaResolver::new()
            .field("n", FieldConfig::spec(0).with_set(|v| json!(v.as_i64().unwrap_or(0) * 2)))
            .resolve_shared();
        let record = Record::empty(schema);
        let mut plain = RawData::new();
        plain.insert("n".into(), json!(5));
        assert_eq!(record.merge(&plain).unwrap().raw_data()["n"], json!(10));
        assert_eq!(record.set("n", 5).unwrap().raw_data()["n"], json!(10));
    }

    #[test]
    fn test_clone_record_shares_raw_data() {
        let foo = foo_record(json!({"foo": "radical"}));
        let copy = foo.clone_record().unwrap();
        assert!(copy.shares_raw_data(&foo));
        assert_eq!(copy.to_object(), foo.to_object());
    }

    #[test]
    fn test_entries_count_to_object() {
        let foo = foo_record(json!({"baz": "set"}));
        let entries = foo.entries();
        assert_eq!(entries.len(), 2);
        let collected: Vec<_> = entries.clone().collect();
        assert_eq!(
            collected,
            vec![
                ("foo".to_string(), json!("bar")),
                ("baz".to_string(), json!("set"))
            ]
        );
        assert_eq!(entries.collect::<Vec<_>>(), collected);
        assert_eq!(foo.count(), 2);
        assert_eq!(
            foo.to_object().keys().collect::<Vec<_>>(),
            vec!["foo", "baz"]
        );
    }

    #[test]
    fn test_to_object_is_untransformed() {
        let schema = SchemaResolver::new()
            .field("n", FieldConfig::spec(1).with_get(|v, _| json!(v.as_i64().unwrap_or(0) + 100)))
            .resolve_shared();
        let record = Record::empty(schema);
        assert_eq!(record.get("n"), Some(json!(101)));
        assert_eq!(record.to_json(), json!({"n": 1}));
        assert_eq!(record.entries().next(), Some(("n".to_string(), json!(1))));
    }
}
