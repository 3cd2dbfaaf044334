//! Configuration loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `CONCIERGE_*` (nested keys split on `__`), plus
    ///    the legacy `OPENWEATHER_API_KEY` / `GEODB_API_KEY` variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./concierge.toml` or `./.concierge.toml`
    /// 4. Global: `<config dir>/city-concierge/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        for filename in &["concierge.toml", ".concierge.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("CONCIERGE_").split("__"));

        let mut config: FileConfig = figment.extract().map_err(Box::new)?;

        // Legacy single-purpose variables used by earlier deployments
        if let Ok(key) = std::env::var("OPENWEATHER_API_KEY")
            && !key.is_empty()
        {
            config.weather.api_key = Some(key);
        }
        if let Ok(key) = std::env::var("GEODB_API_KEY")
            && !key.is_empty()
        {
            config.geodb.api_key = Some(key);
        }

        Ok(config)
    }

    /// Load only default configuration (for `--no-config`)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("city-concierge").join("config.toml"))
    }
}
