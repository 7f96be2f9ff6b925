//! Configuration for the vexc-drv CLI.
//!
//! Settings layer over the compiler pipeline: which character escapes into
//! an expression, what terminator a bare expression gets when nothing else
//! pins one down, where to load a user symbol table from, and the
//! diagnostic-dump toggles. Uses the same three-tier search path the rest
//! of this pack's CLIs use for their own config files.

use dirs::{config_dir, home_dir};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DriverError, Result};

pub const CONFIG_FILE_NAME: &str = "vexc.toml";

fn default_escape() -> char {
    '$'
}

fn default_eol() -> char {
    ';'
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Character that escapes into an embedded expression.
    #[serde(default = "default_escape")]
    pub escape: char,

    /// Terminator emitted for an expression with no trailing punctuation.
    #[serde(default = "default_eol")]
    pub eol_default: char,

    /// Path to a user-supplied symbol table; falls back to the built-in
    /// table when unset.
    #[serde(default)]
    pub symbol_table: Option<PathBuf>,

    #[serde(default)]
    pub dump_tokens: bool,

    #[serde(default)]
    pub dump_symbols: bool,

    #[serde(default)]
    pub parse_only: bool,

    #[serde(default)]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            escape: default_escape(),
            eol_default: default_eol(),
            symbol_table: None,
            dump_tokens: false,
            dump_symbols: false,
            parse_only: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Loads configuration from the first of current dir, home, or system
    /// config dir that has a `vexc.toml`, or the defaults if none do.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DriverError::Config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| DriverError::Config(format!("failed to parse configuration: {e}")))?;

        if config.escape == config.eol_default {
            return Err(DriverError::Config(
                "escape character and default terminator must differ".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| DriverError::Config(format!("failed to serialize configuration: {e}")))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    fn check_home_config() -> Option<PathBuf> {
        home_dir()
            .map(|dir| dir.join(".config").join("vexc").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn check_system_config() -> Option<PathBuf> {
        config_dir()
            .map(|dir| dir.join("vexc").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config)
    }
}
