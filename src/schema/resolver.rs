//! Schema resolution
//!
//! Normalizes an ordered field configuration into a [`Schema`]. Resolution is
//! deterministic and has no side effects: the same configuration always yields
//! an equivalent schema.

use std::sync::Arc;

use tracing::trace;

use super::types::{FieldConfig, FieldSpec, Schema};

/// Builds a [`Schema`] from an ordered field configuration.
///
/// A field name given twice keeps its first position and takes the last
/// configuration, the way an ordered mapping literal behaves.
///
/// ```
/// use recordkit::SchemaResolver;
///
/// let schema = SchemaResolver::named("FooRecord")
///     .field("foo", "bar")
///     .field("baz", "qux")
///     .resolve();
/// assert_eq!(schema.key_list(), "foo, baz");
/// ```
#[derive(Debug, Default, Clone)]
pub struct SchemaResolver {
    name: Option<String>,
    config: Vec<(String, FieldConfig)>,
}

impl SchemaResolver {
    /// Resolver for an anonymous record type
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver for a named record type. The name shows up in `inspect`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            config: Vec::new(),
        }
    }

    /// Resolver seeded with a whole configuration
    pub fn from_config<I, K>(name: Option<String>, config: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldConfig)>,
        K: Into<String>,
    {
        Self {
            name,
            config: config.into_iter().map(|(k, c)| (k.into(), c)).collect(),
        }
    }

    /// Appends one configuration entry.
    pub fn field(mut self, name: impl Into<String>, config: impl Into<FieldConfig>) -> Self {
        self.config.push((name.into(), config.into()));
        self
    }

    /// Resolves the configuration into a schema.
    pub fn resolve(self) -> Schema {
        let mut fields: Vec<(String, FieldSpec)> = Vec::with_capacity(self.config.len());
        for (key, config) in self.config {
            let spec = FieldSpec::resolve(config);
            match fields.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = spec,
                None => fields.push((key, spec)),
            }
        }

        trace!(
            record = self.name.as_deref().unwrap_or("<anonymous>"),
            fields = fields.len(),
            "resolved record schema"
        );

        Schema::from_fields(self.name, fields)
    }

    /// Resolves into a shareable schema.
    pub fn resolve_shared(self) -> Arc<Schema> {
        Arc::new(self.resolve())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::RawData;
    use serde_json::{json, Value};

    fn foo_schema() -> Schema {
        SchemaResolver::named("FooRecord")
            .field("foo", "bar")
            .field("baz", "qux")
            .resolve()
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let schema = foo_schema();
        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["foo", "baz"]);
        assert_eq!(schema.key_at(1), Some("baz"));
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.name(), Some("FooRecord"));
    }

    #[test]
    fn test_defaults_table() {
        let schema = foo_schema();
        assert_eq!(
            Value::Object(schema.defaults().clone()),
            json!({"foo": "bar", "baz": "qux"})
        );
        assert_eq!(schema.default_value("baz"), Some(&json!("qux")));
        assert_eq!(schema.default_value("nope"), None);
    }

    #[test]
    fn test_transformed_default_differs_from_stored_default() {
        let schema = SchemaResolver::new()
            .field(
                "size",
                FieldConfig::spec(2).with_get(|v, _| json!(v.as_i64().unwrap_or(0) * 100)),
            )
            .resolve();
        assert_eq!(schema.default_value("size"), Some(&json!(2)));
        assert_eq!(schema.transformed_default("size"), Some(json!(200)));
    }

    #[test]
    fn test_repeated_field_keeps_first_position() {
        let schema = SchemaResolver::new()
            .field("a", 1)
            .field("b", 2)
            .field("a", 3)
            .resolve();
        assert_eq!(schema.key_list(), "a, b");
        assert_eq!(schema.default_value("a"), Some(&json!(3)));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let a = foo_schema();
        let b = foo_schema();
        assert_eq!(a.defaults(), b.defaults());
        assert_eq!(a.key_list(), b.key_list());
    }

    #[test]
    fn test_from_config() {
        let schema = SchemaResolver::from_config(
            None,
            vec![("x", FieldConfig::value(true)), ("y", FieldConfig::value(0))],
        )
        .resolve();
        assert!(schema.contains("x"));
        assert!(!schema.contains("z"));
        assert!(schema.field("y").is_some());
        assert_eq!(schema.transformed_default("x"), Some(json!(true)));
        assert!(schema.field("x").is_some_and(|f| !f.is_transformed()));
        let _: &RawData = schema.defaults();
    }
}
