use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILE: &str = "sver.toml";

/// The sver configuration file structure (sver.toml)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SverConfig {
    /// How version arguments are read
    pub input: InputConfig,

    /// How results and errors are printed
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Strip a leading `v`/`V` (as in git tags) before parsing
    pub strip_v_prefix: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Colorize error messages
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl SverConfig {
    /// Load configuration from sver.toml, searching upward from the given directory
    pub fn load(start_dir: &Path) -> Result<Option<Self>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE);

            if config_path.is_file() {
                let content = std::fs::read_to_string(&config_path)
                    .with_context(|| format!("Failed to read {}", config_path.display()))?;
                let config: SverConfig = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", config_path.display()))?;
                log::debug!("Loaded configuration from {}", config_path.display());
                return Ok(Some(config));
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Load configuration by searching upward from the current working directory
    pub fn load_from_cwd() -> Result<Option<Self>> {
        let cwd = std::env::current_dir()?;
        Self::load(&cwd)
    }
}
