//! Serialization of the generated outputs to YAML or JSON.
//!
//! Both output representations, the raw IR and the synthesized document,
//! go through the same functions, generic over `Serialize`.

use crate::error::Result;
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Serializes a value to YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml<T: Serialize>(value: &T) -> Result<String> {
    debug!("Serializing output to YAML");
    Ok(serde_yaml::to_string(value)?)
}

/// Serializes a value to JSON with pretty printing.
///
/// The output is indented for human review and version control.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    debug!("Serializing output to JSON");
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes string content to a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directories or the file cannot be written.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, content)?;

    debug!(
        "Successfully wrote {} bytes to {}",
        content.len(),
        path.display()
    );
    Ok(())
}
