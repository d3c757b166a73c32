use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::config::config::Config;

pub const CONFIG_DIR_NAME: &str = "simplelayout";
pub const CONFIG_FILE_NAME: &str = "config.ron";

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/*
Loads the config from `explicit` or the default location. A missing file (or `reconfigure`)
writes the default config there first. Any failure falls back to the default config, the demo
runs either way.
 */
pub fn load_config(explicit: Option<&Path>, reconfigure: bool) -> Config {
    let path = match explicit.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => path,
        None => {
            error!("no config directory, using default config");
            return Config::default();
        }
    };

    if reconfigure || !path.exists() {
        info!("writing default config to {:?}", path);
        if let Some(dir) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                error!("failed to create config dir {:?}: {}", dir, e);
            }
        }
        if let Err(e) = Config::default().save_to_file(&path) {
            error!("failed to write default config: {}", e);
        }
    }

    match Config::load_from_file(&path) {
        Ok(config) => {
            debug!("loaded config from {:?}: {:?}", path, config);
            config
        }
        Err(e) => {
            error!("failed to load config from {:?}: {}, using default", path, e);
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = std::env::temp_dir().join(format!("simplelayout-load-{}", uuid::Uuid::new_v4()));
        let path = dir.join(CONFIG_FILE_NAME);

        let config = load_config(Some(&path), false);
        assert!(path.exists());
        assert_eq!(config.server, Default::default());
        assert_eq!(config.config_dir, dir);

        std::fs::write(&path, "(this is not ron").unwrap();
        let config = load_config(Some(&path), false);
        assert_eq!(config, Config::default());

        let config = load_config(Some(&path), true);
        assert_eq!(config.config_dir, dir);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
