//! Named field transforms
//!
//! Definition files refer to transforms by name. Builtins:
//! - get `date`: date string or year number to `YYYY-MM-DD`
//! - set `year`: date string to its year number
//! - get/set `trim`, `lowercase`: string normalization
//!
//! Transforms never fail. Input they cannot interpret passes through unchanged.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate};
use serde_json::Value;

use super::errors::{RegistryError, RegistryResult, TransformKind};
use crate::schema::{GetFn, SetFn};
use crate::update::RawData;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Named get and set transforms available to definition files.
#[derive(Clone)]
pub struct TransformRegistry {
    get: HashMap<String, GetFn>,
    set: HashMap<String, SetFn>,
}

impl TransformRegistry {
    /// Registry without any transform
    pub fn empty() -> Self {
        Self {
            get: HashMap::new(),
            set: HashMap::new(),
        }
    }

    /// Registry holding the builtin transforms
    pub fn with_builtins() -> Self {
        Self::empty()
            .with_get("date", |v, _| to_date(v))
            .with_get("trim", |v, _| trim(v.clone()))
            .with_get("lowercase", |v, _| lowercase(v.clone()))
            .with_set("year", to_year)
            .with_set("trim", trim)
            .with_set("lowercase", lowercase)
    }

    /// Registers a get transform, replacing any previous one of that name.
    pub fn with_get<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &RawData) -> Value + Send + Sync + 'static,
    {
        self.get.insert(name.into(), Arc::new(f));
        self
    }

    /// Registers a set transform, replacing any previous one of that name.
    pub fn with_set<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.set.insert(name.into(), Arc::new(f));
        self
    }

    pub fn get_transform(&self, name: &str) -> Option<GetFn> {
        self.get.get(name).cloned()
    }

    pub fn set_transform(&self, name: &str) -> Option<SetFn> {
        self.set.get(name).cloned()
    }

    /// Looks up a get transform for `field`.
    pub fn resolve_get(&self, name: &str, field: &str) -> RegistryResult<GetFn> {
        self.get_transform(name)
            .ok_or_else(|| unknown(TransformKind::Get, name, field))
    }

    /// Looks up a set transform for `field`.
    pub fn resolve_set(&self, name: &str, field: &str) -> RegistryResult<SetFn> {
        self.set_transform(name)
            .ok_or_else(|| unknown(TransformKind::Set, name, field))
    }

    /// Sorted names of the registered transforms of one kind
    pub fn names(&self, kind: TransformKind) -> Vec<&str> {
        let mut names: Vec<&str> = match kind {
            TransformKind::Get => self.get.keys().map(String::as_str).collect(),
            TransformKind::Set => self.set.keys().map(String::as_str).collect(),
        };
        names.sort_unstable();
        names
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformRegistry")
            .field("get", &self.names(TransformKind::Get))
            .field("set", &self.names(TransformKind::Set))
            .finish()
    }
}

fn unknown(kind: TransformKind, name: &str, field: &str) -> RegistryError {
    RegistryError::UnknownTransform {
        kind,
        name: name.to_owned(),
        field: field.to_owned(),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// `"2001-01-01T10:00:00Z"` -> `"2001-01-01"`, `2222` -> `"2222-01-01"`
pub fn to_date(value: &Value) -> Value {
    let date = match value {
        Value::String(s) => parse_date(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(|y| i32::try_from(y).ok())
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)),
        _ => None,
    };
    match date {
        Some(date) => Value::String(date.format(DATE_FORMAT).to_string()),
        None => value.clone(),
    }
}

/// `"2222-01-01"` -> `2222`
pub fn to_year(value: Value) -> Value {
    match value.as_str().and_then(parse_date) {
        Some(date) => Value::from(date.year()),
        None => value,
    }
}

pub fn trim(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().to_owned()),
        other => other,
    }
}

pub fn lowercase(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.to_lowercase()),
        other => other,
    }
}
