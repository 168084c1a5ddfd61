//! Field configuration and resolved schema types
//!
//! A field configuration entry is either a literal default value or a spec
//! carrying a `not_set_value` plus optional get/set transforms. Resolution
//! turns every entry into a [`FieldSpec`] with both transforms filled in.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::update::RawData;

/// Read transform: `(stored value, full raw data) -> exposed value`
pub type GetFn = Arc<dyn Fn(&Value, &RawData) -> Value + Send + Sync>;

/// Write transform: `exposed value -> stored value`
pub type SetFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// One entry of a field configuration.
#[derive(Clone)]
pub enum FieldConfig {
    /// Literal default, identity transforms
    Value(Value),
    /// Default plus optional transforms
    Spec {
        not_set_value: Value,
        get: Option<GetFn>,
        set: Option<SetFn>,
    },
}

impl FieldConfig {
    /// Literal default with identity transforms
    pub fn value(default: impl Into<Value>) -> Self {
        FieldConfig::Value(default.into())
    }

    /// Spec with the given not-set value and no transforms yet
    pub fn spec(not_set_value: impl Into<Value>) -> Self {
        FieldConfig::Spec {
            not_set_value: not_set_value.into(),
            get: None,
            set: None,
        }
    }

    /// Attach a read transform.
    pub fn with_get<F>(self, f: F) -> Self
    where
        F: Fn(&Value, &RawData) -> Value + Send + Sync + 'static,
    {
        let (not_set_value, _, set) = self.into_parts();
        FieldConfig::Spec {
            not_set_value,
            get: Some(Arc::new(f)),
            set,
        }
    }

    /// Attach a write transform.
    pub fn with_set<F>(self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        let (not_set_value, get, _) = self.into_parts();
        FieldConfig::Spec {
            not_set_value,
            get,
            set: Some(Arc::new(f)),
        }
    }

    pub(crate) fn into_parts(self) -> (Value, Option<GetFn>, Option<SetFn>) {
        match self {
            FieldConfig::Value(v) => (v, None, None),
            FieldConfig::Spec {
                not_set_value,
                get,
                set,
            } => (not_set_value, get, set),
        }
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldConfig::Value(v) => f.debug_tuple("Value").field(v).finish(),
            FieldConfig::Spec {
                not_set_value,
                get,
                set,
            } => f
                .debug_struct("Spec")
                .field("not_set_value", not_set_value)
                .field("get", &get.is_some())
                .field("set", &set.is_some())
                .finish(),
        }
    }
}

impl From<Value> for FieldConfig {
    fn from(v: Value) -> Self {
        FieldConfig::Value(v)
    }
}

macro_rules! literal_field_config {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FieldConfig {
                fn from(v: $ty) -> Self {
                    FieldConfig::Value(Value::from(v))
                }
            }
        )*
    };
}

literal_field_config!(&str, String, bool, i32, i64, u32, u64, f64);

fn identity_get(stored: &Value, _raw: &RawData) -> Value {
    stored.clone()
}

fn identity_set(input: Value) -> Value {
    input
}

/// A resolved field: default value plus both transforms.
#[derive(Clone)]
pub struct FieldSpec {
    default_value: Value,
    get: GetFn,
    set: SetFn,
    transformed: bool,
}

impl FieldSpec {
    pub(crate) fn resolve(config: FieldConfig) -> Self {
        let (default_value, get, set) = config.into_parts();
        let transformed = get.is_some() || set.is_some();
        Self {
            default_value,
            get: get.unwrap_or_else(|| Arc::new(identity_get)),
            set: set.unwrap_or_else(|| Arc::new(identity_set)),
            transformed,
        }
    }

    /// Untransformed default (the storage baseline)
    pub fn default_value(&self) -> &Value {
        &self.default_value
    }

    /// Applies the read transform to a stored value.
    pub fn read(&self, stored: &Value, raw: &RawData) -> Value {
        (self.get)(stored, raw)
    }

    /// Applies the write transform to an incoming value.
    pub fn write(&self, input: Value) -> Value {
        (self.set)(input)
    }

    /// True when the configuration supplied a get or set transform
    pub fn is_transformed(&self) -> bool {
        self.transformed
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("default_value", &self.default_value)
            .field("transformed", &self.transformed)
            .finish()
    }
}

/// Resolved, immutable schema for one record type.
///
/// Field order is declaration order. The schema is shared by `Arc` between
/// every instance of its record type and never changes after resolution.
pub struct Schema {
    name: Option<String>,
    fields: Vec<(String, FieldSpec)>,
    index: HashMap<String, usize>,
    defaults: RawData,
}

impl Schema {
    pub(crate) fn from_fields(name: Option<String>, fields: Vec<(String, FieldSpec)>) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(i, (key, _))| (key.clone(), i))
            .collect();
        let defaults = fields
            .iter()
            .map(|(key, spec)| (key.clone(), spec.default_value.clone()))
            .collect();
        Self {
            name,
            fields,
            index,
            defaults,
        }
    }

    /// Record type name, if the schema was resolved with one
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when `key` is a declared field
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Full spec of a declared field
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.index.get(key).map(|&i| &self.fields[i].1)
    }

    /// Declared fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(key, spec)| (key.as_str(), spec))
    }

    /// Field names in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Field name at a declaration position
    pub fn key_at(&self, position: usize) -> Option<&str> {
        self.fields.get(position).map(|(key, _)| key.as_str())
    }

    /// Untransformed defaults in declaration order.
    ///
    /// This is the baseline that stored data is overlaid on.
    pub fn defaults(&self) -> &RawData {
        &self.defaults
    }

    /// Untransformed default of a declared field
    pub fn default_value(&self, key: &str) -> Option<&Value> {
        self.field(key).map(FieldSpec::default_value)
    }

    /// Default as exposed by the field accessor: `get(default, {})`
    pub fn transformed_default(&self, key: &str) -> Option<Value> {
        self.field(key)
            .map(|spec| spec.read(&spec.default_value, &RawData::new()))
    }

    /// Comma separated field names, used by violation messages
    pub fn key_list(&self) -> String {
        self.keys().collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}
