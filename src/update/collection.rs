//! The collection seam behind the free update functions.
//!
//! Plain raw data implements [`Collection`] directly. Records implement it by
//! dispatching to their own read path, write path and enumeration, so a record
//! handed to `update::get` observes defaults and transforms, and
//! `update::count` reports the declared fields.

use serde_json::{Map, Value};

use super::errors::{value_type_name, UpdateError, UpdateResult};
use super::path::{Path, Seg};

/// A plain ordered mapping of field name to stored value.
pub type RawData = Map<String, Value>;

/// Anything that can expose its stored mapping.
///
/// Implemented by plain [`RawData`] and by every record, so that
/// operations such as merge accept either.
pub trait AsRawData {
    fn as_raw_data(&self) -> &RawData;
}

impl AsRawData for RawData {
    fn as_raw_data(&self) -> &RawData {
        self
    }
}

impl<T: AsRawData + ?Sized> AsRawData for &T {
    fn as_raw_data(&self) -> &RawData {
        (**self).as_raw_data()
    }
}

/// Immutable keyed collection.
///
/// Updates return a new collection. `Error` is what rebuilding can fail with:
/// path errors for plain mappings, schema errors as well for records.
pub trait Collection: Sized {
    type Error;
    type Entries: Iterator<Item = (String, Value)>;

    fn lookup(&self, key: &str) -> Option<Value>;

    /// `not_found` is returned untouched when nothing is stored under `key`
    fn lookup_or(&self, key: &str, not_found: Value) -> Value;

    fn lookup_in(&self, path: &Path) -> Option<Value>;

    fn lookup_in_or(&self, path: &Path, not_found: Value) -> Value;

    fn holds(&self, key: &str) -> bool;

    fn with_entry(&self, key: &str, value: Value) -> Result<Self, Self::Error>;

    fn with_entry_in(&self, path: &Path, value: Value) -> Result<Self, Self::Error>;

    fn without_entry(&self, key: &str) -> Result<Self, Self::Error>;

    /// `other` wins on shared keys
    fn merged_with(&self, other: &RawData) -> Result<Self, Self::Error>;

    fn emptied(&self) -> Result<Self, Self::Error>;

    fn duplicate(&self) -> Result<Self, Self::Error>;

    fn entry_iter(&self) -> Self::Entries;

    fn size(&self) -> usize;

    fn materialize(&self) -> RawData;
}

impl Collection for RawData {
    type Error = UpdateError;
    type Entries = serde_json::map::IntoIter;

    fn lookup(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }

    fn lookup_or(&self, key: &str, not_found: Value) -> Value {
        self.lookup(key).unwrap_or(not_found)
    }

    /// The root path yields the whole mapping.
    fn lookup_in(&self, path: &Path) -> Option<Value> {
        let Some((first, rest)) = path.segments().split_first() else {
            return Some(Value::Object(self.clone()));
        };
        let mut current = self.get(&first.object_key())?;
        for seg in rest {
            current = match (current, seg) {
                (Value::Object(obj), seg) => obj.get(&seg.object_key())?,
                (Value::Array(items), Seg::Index(i)) => items.get(*i)?,
                _ => return None,
            };
        }
        Some(current.clone())
    }

    fn lookup_in_or(&self, path: &Path, not_found: Value) -> Value {
        self.lookup_in(path).unwrap_or(not_found)
    }

    fn holds(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    /// An existing key keeps its position.
    fn with_entry(&self, key: &str, value: Value) -> UpdateResult<Self> {
        let mut next = self.clone();
        next.insert(key.to_owned(), value);
        Ok(next)
    }

    /// Missing intermediate values are created as objects. Arrays accept an
    /// index inside the bounds or exactly at the end (append).
    ///
    /// # Errors
    ///
    /// - `EmptyPath` when `path` has no segment
    /// - `NotACollection` when a scalar sits on the path
    /// - `IndexOutOfBounds` when an index is past the end of an array
    fn with_entry_in(&self, path: &Path, value: Value) -> UpdateResult<Self> {
        let (first, rest) = path
            .segments()
            .split_first()
            .ok_or(UpdateError::EmptyPath)?;
        let mut next = self.clone();
        let slot = next.entry(first.object_key()).or_insert(Value::Null);
        write_at(slot, rest, value, path, 1)?;
        Ok(next)
    }

    /// Removing an absent key returns an equal copy.
    fn without_entry(&self, key: &str) -> UpdateResult<Self> {
        let mut next = self.clone();
        next.shift_remove(key);
        Ok(next)
    }

    fn merged_with(&self, other: &RawData) -> UpdateResult<Self> {
        let mut next = self.clone();
        for (key, value) in other {
            next.insert(key.clone(), value.clone());
        }
        Ok(next)
    }

    fn emptied(&self) -> UpdateResult<Self> {
        Ok(RawData::new())
    }

    fn duplicate(&self) -> UpdateResult<Self> {
        Ok(self.clone())
    }

    /// Owned pairs in insertion order.
    fn entry_iter(&self) -> Self::Entries {
        self.clone().into_iter()
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn materialize(&self) -> RawData {
        self.clone()
    }
}

fn write_at(
    slot: &mut Value,
    rest: &[Seg],
    value: Value,
    path: &Path,
    depth: usize,
) -> UpdateResult<()> {
    let Some((seg, tail)) = rest.split_first() else {
        *slot = value;
        return Ok(());
    };

    if slot.is_null() {
        *slot = Value::Object(Map::new());
    }

    match (slot, seg) {
        (Value::Object(obj), seg) => {
            let child = obj.entry(seg.object_key()).or_insert(Value::Null);
            write_at(child, tail, value, path, depth + 1)
        }
        (Value::Array(items), Seg::Index(i)) => {
            let len = items.len();
            if *i < len {
                write_at(&mut items[*i], tail, value, path, depth + 1)
            } else if *i == len {
                let mut child = Value::Null;
                write_at(&mut child, tail, value, path, depth + 1)?;
                items.push(child);
                Ok(())
            } else {
                Err(UpdateError::IndexOutOfBounds {
                    path: path.prefix(depth),
                    index: *i,
                    len,
                })
            }
        }
        (other, _) => Err(UpdateError::NotACollection {
            path: path.prefix(depth),
            found: value_type_name(other),
        }),
    }
}
