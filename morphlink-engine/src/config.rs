//! Configuration types for the engine

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use morphlink_core::Pos;
use serde::Deserialize;

use crate::error::{EngineError, Result};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Dictionary defaults
    pub dictionary: DictionaryConfig,
}

/// Dictionary defaults
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DictionaryConfig {
    /// Tags a plain `contains` query matches against
    pub contains_tags: Vec<Pos>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            contains_tags: vec![Pos::NNP, Pos::NNG],
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document
    ///
    /// ```toml
    /// [dictionary]
    /// contains_tags = ["NNP", "NNG", "NNB"]
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(source).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Replace the default `contains` tag set
    pub fn with_contains_tags(mut self, tags: impl IntoIterator<Item = Pos>) -> Self {
        self.dictionary.contains_tags = tags.into_iter().collect();
        self
    }

    /// Default `contains` tags as a set
    pub fn contains_tags(&self) -> BTreeSet<Pos> {
        self.dictionary.contains_tags.iter().copied().collect()
    }

    fn validate(&self) -> Result<()> {
        if self.dictionary.contains_tags.is_empty() {
            return Err(EngineError::Config(
                "dictionary.contains_tags must name at least one tag".to_string(),
            ));
        }
        Ok(())
    }
}
