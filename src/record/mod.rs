//! Immutable records
//!
//! A record is an immutable value whose keys are fixed by a [`Schema`]. Every
//! "mutation" returns a new record; the original is left untouched.
//!
//! # Design Principles
//!
//! - Construction validates keys, never values
//! - Stored data is sparse; absent fields observe their schema default
//! - Read transforms run on access, write transforms run on `set`/`merge`
//! - Property assignment always fails
//!
//! [`Schema`]: crate::schema::Schema

mod accessor;
mod errors;
mod instance;
mod macros;
mod ops;
mod validator;

pub use accessor::FieldAccessor;
pub use errors::{RecordError, RecordResult};
pub use instance::Record;
pub use ops::{Entries, RecordType};
pub use validator::ConstructionValidator;
