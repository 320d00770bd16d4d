//! Project configuration (imgmap.yaml).
//!
//! The config file sets defaults for `imgmap run` and declares user presets.
//! Command-line flags always win over values read here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::EncoderOptions;
use crate::error::{MapError, Result};
use crate::parser::Program;
use crate::types::BuiltinPresets;

/// Config file name looked up in the working directory.
pub const CONFIG_FILENAME: &str = "imgmap.yaml";

/// Configuration loaded from imgmap.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output format name.
    #[serde(default = "default_format")]
    pub format: String,

    /// Default encoder options, as `key:value;key:value`.
    #[serde(default)]
    pub options: String,

    /// Evaluate rows in parallel.
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// User presets: name to expression lines.
    #[serde(default)]
    pub presets: BTreeMap<String, Vec<String>>,
}

fn default_format() -> String {
    "png".to_string()
}

fn default_parallel() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: default_format(),
            options: String::new(),
            parallel: default_parallel(),
            presets: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MapError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| MapError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load `explicit` if given, else `imgmap.yaml` in `dir` if it exists,
    /// else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Path of the config file in `dir`.
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILENAME)
    }

    pub fn encoder_options(&self) -> EncoderOptions {
        EncoderOptions::parse(&self.options)
    }

    /// User presets whose names are taken by a builtin.
    pub fn shadowed_presets(&self) -> Vec<&str> {
        self.presets
            .keys()
            .filter(|name| BuiltinPresets::get(name).is_some())
            .map(String::as_str)
            .collect()
    }

    /// Resolve a preset by name. Builtins take precedence.
    pub fn preset(&self, name: &str) -> Option<Program> {
        if let Some(builtin) = BuiltinPresets::get(name) {
            return Some(builtin.program());
        }

        self.presets
            .get(name)
            .map(|lines| Program::parse(&format!("preset:{}", name), &lines.join("\n")))
    }
}
