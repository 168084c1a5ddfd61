//! CLI command implementations
//!
//! Every command loads the record registry from the configured definitions
//! directory first. Commands write JSON lines to the given writer; only fatal
//! problems are returned as errors.

use std::io::{self, BufRead, Write};

use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::record::RecordType;
use crate::registry::RecordRegistry;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{open_input, read_values, write_error, write_response};

/// Runs one command against stdout.
pub fn run_command(cmd: Command, config: &Config) -> CliResult<()> {
    let registry = load_registry(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cmd {
        Command::Check { record_type, input } => {
            let reader = open_input(input.as_deref())?;
            check(&registry, &record_type, reader, &mut out)
        }
        Command::Normalize { record_type, input } => {
            let reader = open_input(input.as_deref())?;
            normalize(&registry, &record_type, reader, &mut out)
        }
        Command::Describe { record_type } => describe(&registry, record_type.as_deref(), &mut out),
    }
}

/// Loads every definition under the configured directory.
pub fn load_registry(config: &Config) -> CliResult<RecordRegistry> {
    let mut registry = RecordRegistry::new();
    let loaded = registry.load_dir(config.definitions_path())?;
    info!(types = loaded, "record registry ready");
    Ok(registry)
}

/// Strict construction of each input object.
///
/// Prints `to_object` for accepted objects and the error for rejected ones.
/// Fails with `Rejected` at the end if any object was rejected.
pub fn check<R: BufRead, W: Write>(
    registry: &RecordRegistry,
    record_type: &str,
    reader: R,
    out: &mut W,
) -> CliResult<()> {
    registry.require(record_type)?;

    let mut total = 0;
    let mut failed = 0;
    for value in read_values(reader) {
        total += 1;
        let value = match value {
            Ok(value) => value,
            Err(e) => {
                failed += 1;
                write_error(out, e.code_str(), e.message())?;
                continue;
            }
        };
        match registry.construct(record_type, &value) {
            Ok(record) => write_response(out, record.to_json())?,
            Err(e) => {
                failed += 1;
                debug!(record = record_type, line = total, error = %e, "rejected input object");
                write_error(out, e.code(), &e.to_string())?;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::rejected(failed, total));
    }
    Ok(())
}

/// Lenient construction of each input object; prints the kept fields.
///
/// Only unparseable lines count as failures.
pub fn normalize<R: BufRead, W: Write>(
    registry: &RecordRegistry,
    record_type: &str,
    reader: R,
    out: &mut W,
) -> CliResult<()> {
    registry.require(record_type)?;

    let mut total = 0;
    let mut failed = 0;
    for value in read_values(reader) {
        total += 1;
        match value {
            Ok(value) => {
                let record = registry.from_unknown(record_type, &value)?;
                write_response(out, Value::Object(record.raw_data().clone()))?;
            }
            Err(e) => {
                failed += 1;
                write_error(out, e.code_str(), e.message())?;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::rejected(failed, total));
    }
    Ok(())
}

/// Describes one record type, or lists the registered type names.
pub fn describe<W: Write>(
    registry: &RecordRegistry,
    record_type: Option<&str>,
    out: &mut W,
) -> CliResult<()> {
    let Some(name) = record_type else {
        let names: Vec<&str> = registry.names().collect();
        return write_response(out, json!({ "types": names }));
    };

    let schema = registry.require(name)?;
    let fields: Vec<Value> = schema
        .fields()
        .map(|(key, spec)| {
            json!({
                "name": key,
                "default": spec.default_value(),
                "transformed": spec.is_transformed(),
            })
        })
        .collect();

    let mut data = Map::new();
    data.insert("name".into(), json!(name));
    if let Some(description) = registry.description(name) {
        data.insert("description".into(), json!(description));
    }
    data.insert("fields".into(), Value::Array(fields));
    write_response(out, Value::Object(data))
}
