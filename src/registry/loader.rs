//! Record registry
//!
//! Holds resolved schemas by record type name and loads definition files from
//! disk. Once registered, a type name can never be rebound.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use super::definition::RecordDefinition;
use super::errors::{RegistryError, RegistryResult};
use super::transforms::TransformRegistry;
use crate::record::Record;
use crate::schema::Schema;
use crate::update::{value_type_name, RawData};

const IN_MEMORY: &str = "<in-memory>";

#[derive(Debug, Clone)]
struct RegisteredType {
    schema: Arc<Schema>,
    description: Option<String>,
}

/// Resolved record types, indexed by name.
#[derive(Debug, Default)]
pub struct RecordRegistry {
    transforms: TransformRegistry,
    types: BTreeMap<String, RegisteredType>,
}

impl RecordRegistry {
    /// Empty registry with the builtin transforms
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transforms(transforms: TransformRegistry) -> Self {
        Self {
            transforms,
            types: BTreeMap::new(),
        }
    }

    pub fn transforms(&self) -> &TransformRegistry {
        &self.transforms
    }

    /// Loads every `*.json` definition in `dir`, in file name order.
    ///
    /// Returns the number of types registered. The first failing file aborts
    /// the load; types registered before it stay registered.
    pub fn load_dir(&mut self, dir: &Path) -> RegistryResult<usize> {
        let entries = fs::read_dir(dir).map_err(|e| RegistryError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| RegistryError::Io {
                path: dir.display().to_string(),
                source: e,
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in &paths {
            self.load_file(path)?;
        }

        info!(
            dir = %dir.display(),
            types = paths.len(),
            "loaded record definitions"
        );
        Ok(paths.len())
    }

    /// Loads and registers a single definition file.
    pub fn load_file(&mut self, path: &Path) -> RegistryResult<Arc<Schema>> {
        let location = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| {
            RegistryError::malformed(&location, format!("Failed to read file: {}", e))
        })?;
        let definition = RecordDefinition::from_json(&content)
            .map_err(|reason| RegistryError::malformed(&location, reason))?;

        debug!(file = %location, record = %definition.name, "read record definition");
        self.register_at(definition, &location)
    }

    /// Registers an in-memory definition.
    pub fn register(&mut self, definition: RecordDefinition) -> RegistryResult<Arc<Schema>> {
        definition
            .validate_structure()
            .map_err(|reason| RegistryError::malformed(IN_MEMORY, reason))?;
        self.register_at(definition, IN_MEMORY)
    }

    /// Registers a schema built in code, under its own name.
    pub fn register_schema(&mut self, schema: Arc<Schema>) -> RegistryResult<()> {
        let name = schema
            .name()
            .map(str::to_owned)
            .ok_or_else(|| RegistryError::malformed(IN_MEMORY, "schema has no name"))?;
        self.insert(
            name,
            RegisteredType {
                schema,
                description: None,
            },
        )
    }

    fn register_at(
        &mut self,
        definition: RecordDefinition,
        location: &str,
    ) -> RegistryResult<Arc<Schema>> {
        if self.types.contains_key(&definition.name) {
            return Err(RegistryError::DuplicateType {
                name: definition.name,
            });
        }
        let schema = definition
            .to_resolver(&self.transforms)
            .map_err(|e| match e {
                RegistryError::Malformed { reason, .. } => {
                    RegistryError::malformed(location, reason)
                }
                other => other,
            })?
            .resolve_shared();

        self.insert(
            definition.name,
            RegisteredType {
                schema: Arc::clone(&schema),
                description: definition.description,
            },
        )?;
        Ok(schema)
    }

    fn insert(&mut self, name: String, entry: RegisteredType) -> RegistryResult<()> {
        if self.types.contains_key(&name) {
            return Err(RegistryError::DuplicateType { name });
        }
        debug!(record = %name, fields = entry.schema.len(), "registered record type");
        self.types.insert(name, entry);
        Ok(())
    }

    pub fn schema(&self, name: &str) -> Option<&Arc<Schema>> {
        self.types.get(name).map(|t| &t.schema)
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.types.get(name).and_then(|t| t.description.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered type names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Looks up a schema, failing for unknown names.
    pub fn require(&self, name: &str) -> RegistryResult<&Arc<Schema>> {
        self.schema(name).ok_or_else(|| RegistryError::UnknownType {
            name: name.to_owned(),
        })
    }

    /// Validating construction of a `name` record from a JSON object.
    ///
    /// `null` stands for "no data". Any other non-object input is rejected.
    pub fn construct(&self, name: &str, value: &Value) -> RegistryResult<Record> {
        let schema = self.require(name)?;
        let raw = match value {
            Value::Object(obj) => obj.clone(),
            Value::Null => RawData::new(),
            other => {
                return Err(RegistryError::malformed(
                    "<input>",
                    format!("expected a JSON object, found {}", value_type_name(other)),
                ))
            }
        };
        Ok(Record::construct(Arc::clone(schema), raw)?)
    }

    /// Non-failing construction of a `name` record; only the type lookup can fail.
    pub fn from_unknown(&self, name: &str, value: &Value) -> RegistryResult<Record> {
        let schema = self.require(name)?;
        Ok(Record::from_unknown(Arc::clone(schema), value))
    }
}
