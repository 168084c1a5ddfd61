//! Compile-time record types
//!
//! `record_type!` declares a named record type with one read-only accessor
//! method per field. The schema is resolved once, on first use, and shared by
//! every instance of the type.

/// Declares a record type.
///
/// Each field takes anything convertible into a
/// [`FieldConfig`](crate::FieldConfig): a literal default, or a spec with
/// transforms. An optional `prepare = path;` names a
/// `fn(RawData) -> RawData` run on raw input before validation, on every
/// construction path (mutators included). Input the hook leaves unchanged
/// keeps its allocation.
///
/// ```
/// use recordkit::{record_type, RecordType};
///
/// record_type! {
///     /// A two-field record
///     pub struct FooRecord {
///         foo: "bar",
///         baz: "qux",
///     }
/// }
///
/// let foo = FooRecord::default();
/// assert_eq!(foo.baz(), "qux");
/// let next = foo.set("foo", 1).unwrap();
/// assert_eq!(next.foo(), 1);
/// assert!(next.set("wrong", 2).is_err());
/// ```
#[macro_export]
macro_rules! record_type {
    (@prepare $raw:ident) => {
        $raw
    };
    (@prepare $raw:ident, $prepare:path) => {{
        let prepared = $prepare((*$raw).clone());
        if prepared == *$raw {
            $raw
        } else {
            ::std::sync::Arc::new(prepared)
        }
    }};
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $field:ident : $config:expr ),* $(,)?
        }
        $( prepare = $prepare:path ; )?
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        $vis struct $name($crate::Record);

        #[allow(dead_code)]
        impl $name {
            /// Schema shared by every instance of this type
            pub fn type_schema() -> ::std::sync::Arc<$crate::Schema> {
                static SCHEMA: ::std::sync::OnceLock<::std::sync::Arc<$crate::Schema>> =
                    ::std::sync::OnceLock::new();
                ::std::sync::Arc::clone(SCHEMA.get_or_init(|| {
                    $crate::SchemaResolver::named(stringify!($name))
                        $( .field(stringify!($field), $config) )*
                        .resolve_shared()
                }))
            }

            /// Validating constructor
            pub fn new(
                raw: impl Into<::std::sync::Arc<$crate::RawData>>,
            ) -> $crate::RecordResult<Self> {
                let raw = Self::prepare(raw.into());
                $crate::Record::construct(Self::type_schema(), raw).map(Self)
            }

            /// Non-failing constructor for untrusted input
            pub fn from_unknown(external: &$crate::Value) -> Self {
                let schema = Self::type_schema();
                let filtered = $crate::ConstructionValidator::new(&schema).filter(external);
                let prepared = Self::prepare(::std::sync::Arc::new(filtered));
                Self($crate::Record::from_prepared(schema, prepared))
            }

            /// The dynamic record behind this value
            pub fn into_record(self) -> $crate::Record {
                self.0
            }

            fn prepare(
                raw: ::std::sync::Arc<$crate::RawData>,
            ) -> ::std::sync::Arc<$crate::RawData> {
                $crate::record_type!(@prepare raw $(, $prepare)?)
            }

            $(
                #[doc = concat!("Exposed value of `", stringify!($field), "`")]
                pub fn $field(&self) -> $crate::Value {
                    $crate::RecordType::get(self, stringify!($field))
                        .unwrap_or($crate::Value::Null)
                }
            )*
        }

        impl $crate::RecordType for $name {
            fn record(&self) -> &$crate::Record {
                &self.0
            }

            fn unit(
                &self,
                raw: ::std::sync::Arc<$crate::RawData>,
            ) -> $crate::RecordResult<Self> {
                Self::new(raw)
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::from_unknown(&$crate::Value::Null)
            }
        }

        impl $crate::AsRawData for $name {
            fn as_raw_data(&self) -> &$crate::RawData {
                self.0.raw_data()
            }
        }

        impl ::std::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_tuple(stringify!($name))
                    .field(self.0.raw_data())
                    .finish()
            }
        }

        impl $crate::__private::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::Serializer,
            {
                $crate::__private::Serialize::serialize(&self.0, serializer)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{path, FieldConfig, RawData, RecordType, Value};
    use serde_json::json;

    record_type! {
        /// Test record
        struct FooRecord {
            foo: "bar",
            baz: "qux",
        }
    }

    fn derive_label(mut raw: RawData) -> RawData {
        if !raw.contains_key("label") {
            if let Some(Value::String(name)) = raw.get("name") {
                let label = json!(format!("#{}", name));
                raw.insert("label".into(), label);
            }
        }
        raw
    }

    record_type! {
        struct Tagged {
            name: "",
            label: FieldConfig::spec("")
                .with_get(|v, _| json!(v.as_str().unwrap_or("").to_uppercase())),
        }
        prepare = derive_label;
    }

    #[test]
    fn test_generated_accessors() {
        let foo = FooRecord::default();
        assert_eq!(foo.foo(), json!("bar"));
        assert_eq!(foo.baz(), json!("qux"));
        assert_eq!(FooRecord::type_schema().name(), Some("FooRecord"));
    }

    #[test]
    fn test_mutators_rebuild_same_type() {
        let foo = FooRecord::default();
        let next: FooRecord = foo.set("foo", "qux").unwrap();
        assert_eq!(next.foo(), json!("qux"));
        assert_eq!(foo.foo(), json!("bar"));
        let nested: FooRecord = foo.set_in(path!("foo", "bar"), "qux").unwrap();
        assert_eq!(nested.raw_data()["foo"]["bar"], json!("qux"));
    }

    #[test]
    fn test_schema_is_resolved_once() {
        let a = FooRecord::default();
        let b = FooRecord::from_unknown(&json!({"foo": 1}));
        assert!(std::sync::Arc::ptr_eq(a.schema(), b.schema()));
    }

    #[test]
    fn test_prepare_runs_on_every_construction() {
        let mut raw = RawData::new();
        raw.insert("name".into(), json!("ada"));
        let tagged = Tagged::new(raw).unwrap();
        assert_eq!(tagged.raw_data()["label"], json!("#ada"));
        assert_eq!(tagged.label(), json!("#ADA"));

        let cleared = tagged.clear().unwrap();
        assert!(cleared.raw_data().get("label").is_none());

        let renamed = cleared.set("name", "bob").unwrap();
        assert_eq!(renamed.label(), json!("#BOB"));

        let unknown = Tagged::from_unknown(&json!({"name": "eve", "junk": 1}));
        assert_eq!(unknown.raw_data()["label"], json!("#eve"));
        assert!(unknown.raw_data().get("junk").is_none());
    }

    #[test]
    fn test_clone_keeps_prepared_data_shared() {
        let tagged = Tagged::from_unknown(&json!({"name": "ada"}));
        let copy = tagged.clone_record().unwrap();
        assert!(copy.record().shares_raw_data(tagged.record()));
        assert_eq!(copy, tagged);
    }

    #[test]
    fn test_display_debug_serialize() {
        let foo = FooRecord::from_unknown(&json!({"foo": "radical"}));
        assert_eq!(foo.to_string(), r#"FooRecord {"foo":"radical","baz":"qux"}"#);
        assert!(format!("{:?}", foo).starts_with("FooRecord("));
        assert_eq!(
            serde_json::to_value(&foo).unwrap(),
            json!({"foo": "radical", "baz": "qux"})
        );
    }
}
