//! Record definition files
//!
//! A definition is a JSON document:
//!
//! ```json
//! {
//!   "name": "Event",
//!   "description": "Calendar entry",
//!   "fields": {
//!     "title": "untitled",
//!     "start": { "notSetValue": "2000-01-01", "get": "date", "set": "year" }
//!   }
//! }
//! ```
//!
//! Field order in the file is declaration order. An object carrying a
//! `notSetValue` key is a field spec; any other value, objects included, is a
//! literal default.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::{RegistryError, RegistryResult};
use super::transforms::TransformRegistry;
use crate::schema::{FieldConfig, SchemaResolver};

const NOT_SET_VALUE: &str = "notSetValue";
const GET: &str = "get";
const SET: &str = "set";

/// On-disk form of a record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub fields: Map<String, Value>,
}

/// One parsed field entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefinition {
    Literal(Value),
    Spec {
        not_set_value: Value,
        get: Option<String>,
        set: Option<String>,
    },
}

impl FieldDefinition {
    /// Parses one entry of the `fields` object.
    pub fn parse(field: &str, entry: &Value) -> Result<Self, String> {
        let Some(obj) = entry.as_object().filter(|o| o.contains_key(NOT_SET_VALUE)) else {
            return Ok(FieldDefinition::Literal(entry.clone()));
        };

        if let Some(extra) = obj.keys().find(|k| ![NOT_SET_VALUE, GET, SET].contains(&k.as_str())) {
            return Err(format!(
                "field \"{}\": unexpected key \"{}\" in field spec",
                field, extra
            ));
        }

        let name_of = |key: &str| -> Result<Option<String>, String> {
            match obj.get(key) {
                None | Some(Value::Null) => Ok(None),
                Some(Value::String(s)) => Ok(Some(s.clone())),
                Some(_) => Err(format!(
                    "field \"{}\": \"{}\" must name a transform",
                    field, key
                )),
            }
        };

        Ok(FieldDefinition::Spec {
            not_set_value: obj.get(NOT_SET_VALUE).cloned().unwrap_or(Value::Null),
            get: name_of(GET)?,
            set: name_of(SET)?,
        })
    }

    /// Builds the field configuration, looking transforms up by name.
    pub fn to_config(
        &self,
        field: &str,
        transforms: &TransformRegistry,
    ) -> RegistryResult<FieldConfig> {
        match self {
            FieldDefinition::Literal(value) => Ok(FieldConfig::Value(value.clone())),
            FieldDefinition::Spec {
                not_set_value,
                get,
                set,
            } => Ok(FieldConfig::Spec {
                not_set_value: not_set_value.clone(),
                get: get
                    .as_deref()
                    .map(|name| transforms.resolve_get(name, field))
                    .transpose()?,
                set: set
                    .as_deref()
                    .map(|name| transforms.resolve_set(name, field))
                    .transpose()?,
            }),
        }
    }
}

impl RecordDefinition {
    pub fn from_json(content: &str) -> Result<Self, String> {
        let definition: RecordDefinition =
            serde_json::from_str(content).map_err(|e| format!("Invalid JSON: {}", e))?;
        definition.validate_structure()?;
        Ok(definition)
    }

    /// Checks the name and every field entry.
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".into());
        }
        if let Some(field) = self.fields.keys().find(|k| k.is_empty()) {
            return Err(format!("invalid field name \"{}\"", field));
        }
        self.parsed_fields().map(|_| ())
    }

    /// Field entries in declaration order.
    pub fn parsed_fields(&self) -> Result<Vec<(&str, FieldDefinition)>, String> {
        self.fields
            .iter()
            .map(|(name, entry)| Ok((name.as_str(), FieldDefinition::parse(name, entry)?)))
            .collect()
    }

    /// Resolver for this definition.
    ///
    /// Structural problems must have been ruled out with
    /// [`validate_structure`](Self::validate_structure); only transform
    /// lookups can fail here.
    pub fn to_resolver(&self, transforms: &TransformRegistry) -> RegistryResult<SchemaResolver> {
        let mut resolver = SchemaResolver::named(self.name.clone());
        for (name, entry) in self.fields.iter() {
            let field = FieldDefinition::parse(name, entry)
                .map_err(|reason| RegistryError::malformed(&self.name, reason))?;
            resolver = resolver.field(name.clone(), field.to_config(name, transforms)?);
        }
        Ok(resolver)
    }
}
