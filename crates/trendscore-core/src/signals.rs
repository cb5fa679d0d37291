use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::trends::RawSignal;
use crate::ConfigError;

/// On-disk shape of an ingestion batch: a YAML document with a top-level
/// `signals` list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalsFile {
    #[serde(default)]
    pub signals: Vec<RawSignal>,
}

/// Load a batch of raw signals from a YAML file.
///
/// Only the shape is checked here. Semantic checks (negative costs, empty or
/// duplicate names) belong to the scoring pass so a bad record is skipped and
/// reported instead of failing the whole file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_signals(path: &Path) -> Result<SignalsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SignalsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_signals(&content)
}

/// Parse a signals document from a YAML string.
///
/// # Errors
///
/// Returns [`ConfigError::SignalsFileParse`] on malformed YAML or unknown platforms.
pub fn parse_signals(content: &str) -> Result<SignalsFile, ConfigError> {
    let file: SignalsFile = serde_yaml::from_str(content)?;
    Ok(file)
}
