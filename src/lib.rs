//! recordkit - immutable, schema-constrained records
//!
//! A record type is declared once as an ordered set of fields with defaults
//! and optional read/write transforms. Instances are immutable: every update
//! returns a new record that re-enters the validating constructor.
//!
//! ```
//! use recordkit::{RecordType, SchemaResolver, Record};
//! use serde_json::json;
//!
//! let schema = SchemaResolver::named("Point")
//!     .field("x", 0)
//!     .field("y", 0)
//!     .resolve_shared();
//! let origin = Record::empty(schema);
//! let moved = origin.set("x", 3).unwrap();
//! assert_eq!(origin.get("x"), Some(json!(0)));
//! assert_eq!(moved.get("x"), Some(json!(3)));
//! assert!(origin.set("z", 1).is_err());
//! ```
//!
//! Definitions can also be loaded from JSON files at runtime through the
//! [`registry`], which the `recordkit` binary builds on.

pub mod cli;
pub mod record;
pub mod registry;
pub mod schema;
pub mod update;

pub use record::{
    ConstructionValidator, Entries, FieldAccessor, Record, RecordError, RecordResult, RecordType,
};
pub use schema::{FieldConfig, FieldSpec, Schema, SchemaResolver};
pub use update::{AsRawData, Collection, Path, RawData, Seg, UpdateError, UpdateResult};

pub use serde_json::{Map, Value};

#[doc(hidden)]
pub mod __private {
    pub use serde::{Serialize, Serializer};
}
