use crate::filter::FormatOptions;
use crate::filter::display::DEFAULT_INDENT;
use crate::pattern::{MatchOptions, OrderingPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings read from a TOML file
///
/// ```toml
/// [format]
/// pretty = true
/// indent_width = 2
/// indent_char = " "
///
/// [matching]
/// ordering = "lexical"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub format: FormatRules,
    pub matching: MatchRules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatRules {
    /// Print filters one per line
    pub pretty: bool,
    pub indent_width: usize,
    pub indent_char: char,
}

impl Default for FormatRules {
    fn default() -> Self {
        Self {
            pretty: false,
            indent_width: DEFAULT_INDENT,
            indent_char: ' ',
        }
    }
}

impl FormatRules {
    pub fn to_options(&self) -> FormatOptions {
        if self.pretty {
            FormatOptions::compact()
                .indent(self.indent_width)
                .indent_char(self.indent_char)
        } else {
            FormatOptions::compact()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    pub ordering: OrderingPolicy,
}

impl MatchRules {
    pub fn to_options(&self) -> MatchOptions {
        MatchOptions::new().ordering(self.ordering)
    }
}

pub fn load_config(path: Option<&Path>) -> Result<FilterConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<FilterConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<FilterConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static FilterConfig {
    static DEFAULT_CONFIG: LazyLock<FilterConfig> = LazyLock::new(FilterConfig::default);
    &DEFAULT_CONFIG
}
