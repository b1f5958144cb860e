//! Encoder configuration
//!
//! The small configuration surface the encoder glue owns: the template
//! text, the default field value substituted for absent string-typed
//! lookups, and the flush-after-write flag. Loaded from a TOML file:
//!
//! ```toml
//! layout = '{ "level": "#{EVENT:level}", "msg": "#{EVENT:message}" }'
//! default_field_value = ""
//! immediate_flush = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LogplateError, LogplateResult};

/// Settings for a `JsonEncoder`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// JSON template text. Absent means the encoder emits nothing.
    #[serde(default)]
    pub layout: Option<String>,

    /// Substitute for absent string-typed field values
    #[serde(default)]
    pub default_field_value: String,

    /// Flush the output stream after every record
    #[serde(default = "default_true")]
    pub immediate_flush: bool,
}

fn default_true() -> bool {
    true
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            layout: None,
            default_field_value: String::new(),
            immediate_flush: true,
        }
    }
}

impl EncoderConfig {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> LogplateResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LogplateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| LogplateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
