//! Record schemas
//!
//! A schema is the ordered set of fields a record type may hold, each with a
//! default value and a pair of read/write transforms.
//!
//! # Design Principles
//!
//! - Resolved once per record type, shared by every instance
//! - Immutable after resolution
//! - Declaration order is significant (messages, materialization, entries)
//! - Stored defaults and exposed (transformed) defaults are kept apart

mod resolver;
mod types;

pub use resolver::SchemaResolver;
pub use types::{FieldConfig, FieldSpec, GetFn, Schema, SetFn};
