//! Runtime record definitions
//!
//! Record types can be declared in JSON files instead of code. Transforms are
//! referred to by name and looked up in a [`TransformRegistry`]; resolved
//! schemas live in a [`RecordRegistry`].

mod definition;
mod errors;
mod loader;
mod transforms;

pub use definition::{FieldDefinition, RecordDefinition};
pub use errors::{RegistryError, RegistryResult, TransformKind};
pub use loader::RecordRegistry;
pub use transforms::{lowercase, to_date, to_year, trim, TransformRegistry};
