use crate::core::calendar::WeekStart;
use crate::error::ConfigError;
use crate::picker::state::QuickJump;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OUTPUT_FORMAT: &str = "YYYY-MM-DD HH:mm";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub week_start: WeekStart,
    /// Pattern used when printing the committed instant.
    pub output_format: String,
    /// Shortcuts offered below the grid, in display order.
    pub quick_jumps: Vec<QuickJump>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            week_start: WeekStart::Sunday,
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            quick_jumps: QuickJump::ALL.to_vec(),
        }
    }
}

impl PickerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let config = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml(&text)?,
            Some("json") => Self::from_json(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        tracing::debug!(path = %path.display(), ?config, "loaded picker config");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}
