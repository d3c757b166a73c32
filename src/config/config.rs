use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::load_error::LoadError;
use crate::config::save_error::SaveError;
use crate::primitives::is_default::IsDefault;

#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(skip)]
    pub config_dir: PathBuf,

    #[serde(default, skip_serializing_if = "ServerConfig::is_default")]
    pub server: ServerConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub struct ServerConfig {
    // new layouts start in strip mode
    pub strip_dimensions: bool,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub struct ClientConfig {
    pub viewport_width: i32,
    pub viewport_height: i32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            viewport_width: 1024,
            viewport_height: 768,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self, LoadError> {
        let b = std::fs::read(path)?;
        let s = std::str::from_utf8(&b)?;
        let mut item: Config = ron::from_str(s)?;
        if let Some(dir) = path.parent() {
            item.config_dir = dir.to_path_buf();
        }
        Ok(item)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), SaveError> {
        let item_s = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())?;
        std::fs::write(path, item_s)?;
        Ok(())
    }
}
