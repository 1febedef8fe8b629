use serde::Deserialize;

use crate::error::{Error, Result};

/// Knobs for one guess run. Loadable from a JSON options file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct GuessOptions {
    /// Name of the root definition.
    pub root_name: String,
    /// Name for definitions no field name can be borrowed for.
    pub placeholder_name: String,
    /// Container nesting accepted before giving up.
    pub max_depth: usize,
}

pub const DEFAULT_MAX_DEPTH: usize = 256;

impl Default for GuessOptions {
    fn default() -> Self {
        Self {
            root_name: "Root".to_owned(),
            placeholder_name: "Guessed".to_owned(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl GuessOptions {
    /// Deserialize with JSON-path context in error messages.
    pub fn from_json_str(src: &str) -> Result<Self> {
        let de = &mut serde_json::Deserializer::from_str(src);
        serde_path_to_error::deserialize(de).map_err(|err| {
            let path = err.path().to_string();
            Error::Config(format!("at JSON path {path} → {}", err.into_inner()))
        })
    }
}
