//! Free update functions.
//!
//! Each function takes its collection by reference and returns a new value;
//! none of them mutates its argument. They accept plain raw data and records
//! alike through [`Collection`].

use serde_json::Value;

use super::collection::{AsRawData, Collection, RawData};
use super::path::Path;

/// Value stored under `key`.
pub fn get<C: Collection>(coll: &C, key: &str) -> Option<Value> {
    coll.lookup(key)
}

/// Value under `key`, or `not_found` untouched when nothing is stored.
pub fn get_or<C: Collection>(coll: &C, key: &str, not_found: Value) -> Value {
    coll.lookup_or(key, not_found)
}

/// Value at `path`, descending through objects and arrays.
///
/// The root path yields the whole mapping.
pub fn get_in<C: Collection>(coll: &C, path: &Path) -> Option<Value> {
    coll.lookup_in(path)
}

pub fn get_in_or<C: Collection>(coll: &C, path: &Path, not_found: Value) -> Value {
    coll.lookup_in_or(path, not_found)
}

pub fn has<C: Collection>(coll: &C, key: &str) -> bool {
    coll.holds(key)
}

/// Copy of `coll` with `key` set to `value`. An existing key keeps its position.
pub fn set<C: Collection>(coll: &C, key: &str, value: Value) -> Result<C, C::Error> {
    coll.with_entry(key, value)
}

/// Copy of `coll` with the value at `path` replaced.
pub fn set_in<C: Collection>(coll: &C, path: &Path, value: Value) -> Result<C, C::Error> {
    coll.with_entry_in(path, value)
}

/// Copy of `coll` without `key`.
pub fn delete<C: Collection>(coll: &C, key: &str) -> Result<C, C::Error> {
    coll.without_entry(key)
}

/// Copy of `coll` overlaid with what `other` stores; `other` wins on shared keys.
pub fn merge<C, O>(coll: &C, other: &O) -> Result<C, C::Error>
where
    C: Collection,
    O: AsRawData + ?Sized,
{
    coll.merged_with(other.as_raw_data())
}

pub fn clear<C: Collection>(coll: &C) -> Result<C, C::Error> {
    coll.emptied()
}

pub fn clone<C: Collection>(coll: &C) -> Result<C, C::Error> {
    coll.duplicate()
}

/// Owned key/value pairs, in order.
pub fn entries<C: Collection>(coll: &C) -> C::Entries {
    coll.entry_iter()
}

pub fn count<C: Collection>(coll: &C) -> usize {
    coll.size()
}

/// Plain copy of the (materialized) mapping.
pub fn to_object<C: Collection>(coll: &C) -> RawData {
    coll.materialize()
}
