//! Immutable update operations
//!
//! Pure, path-based operations over ordered key/value collections. Records
//! compose these and never modify raw data in place; records are collections
//! too, so the same functions apply to them.

mod collection;
mod errors;
mod ops;
mod path;

pub use collection::{AsRawData, Collection, RawData};
pub use errors::{value_type_name, UpdateError, UpdateResult};
pub use ops::{
    clear, clone, count, delete, entries, get, get_in, get_in_or, get_or, has, merge, set,
    set_in, to_object,
};
pub use path::{Path, Seg};
