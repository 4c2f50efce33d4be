//! Reading and writing registry JSON.

use std::fs;
use std::io::{BufReader, Write};
use std::path::Path;

use crate::core::errors::FilterError;
use crate::core::Registry;

/// Read a description registry from a JSON file produced by an external
/// description builder.
pub fn read_registry(path: &Path) -> Result<Registry, FilterError> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Write a registry as pretty-printed JSON, for a downstream generator (or
/// a human) to pick up.
pub fn write_registry<W: Write>(mut writer: W, registry: &Registry) -> Result<(), FilterError> {
    serde_json::to_writer_pretty(&mut writer, registry)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_file(path: &Path, contents: &str) -> Result<(), FilterError> {
    fs::write(path, contents)?;
    Ok(())
}
