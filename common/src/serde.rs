use std::path::Path;

use serde::de::DeserializeOwned;

use crate::file_format::FileFormat;

pub type Result<T> = anyhow::Result<T>;

pub fn deserialize<T: DeserializeOwned>(serialized: &[u8], format: FileFormat) -> Result<T> {
    let text = std::str::from_utf8(serialized)?;
    match format {
        FileFormat::Yaml => Ok(serde_yml::from_str(text)?),
        FileFormat::Json => Ok(serde_json::from_str(text)?),
    }
}

/// Reads `path` and deserializes it in the format implied by its extension.
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = FileFormat::from_path(path)?;
    let serialized = std::fs::read(path)?;
    deserialize(&serialized, format)
}
