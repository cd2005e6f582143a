use anyhow::{anyhow, Context};
use inkmark_highlighter::{ColorKey, Palette};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "inkmark.config.json";

/// Inkmark configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Color used when neither the command line nor the preferences pick one
    #[serde(default)]
    pub default_color: ColorKey,

    /// Replaces the built-in palette when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<Palette>,

    /// Preferences file, relative to the config directory
    #[serde(default = "default_store_path")]
    pub store_path: String,
}

fn default_store_path() -> String {
    ".inkmark/preferences.json".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("reading {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", config_path.display()))?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !self.palette().contains(&self.default_color) {
            return Err(anyhow!(
                "defaultColor '{}' is not in the palette",
                self.default_color
            ));
        }
        Ok(())
    }

    pub fn palette(&self) -> Palette {
        self.palette.clone().unwrap_or_default()
    }

    /// Absolute path of the preferences file
    pub fn store_path(&self, cwd: &str) -> PathBuf {
        let path = Path::new(&self.store_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            PathBuf::from(cwd).join(path)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_color: ColorKey::default(),
            palette: None,
            store_path: default_store_path(),
        }
    }
}
