//! CLI Configuration

use rickdex_core::FinderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_url: Option<String>,
    pub default_format: Option<String>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> Result<Self, String> {
        Self::load_from(&Self::config_path(profile)?)
    }

    pub fn save(&self, profile: Option<&str>) -> Result<PathBuf, String> {
        let path = Self::config_path(profile)?;
        self.save_to(&path)?;
        Ok(path)
    }

    fn load_from(path: &PathBuf) -> Result<Self, String> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
            toml::from_str(&content).map_err(|e| e.to_string())
        } else {
            Ok(Self::default())
        }
    }

    fn save_to(&self, path: &PathBuf) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, content).map_err(|e| e.to_string())
    }

    /// Flag beats file beats built-in default.
    pub fn finder_config(&self, api_url: Option<String>) -> FinderConfig {
        match api_url.or_else(|| self.api_url.clone()) {
            Some(url) => FinderConfig::with_api_url(url),
            None => FinderConfig::default(),
        }
    }

    pub fn format(&self) -> Option<OutputFormat> {
        self.default_format
            .as_deref()
            .and_then(|f| <OutputFormat as clap::ValueEnum>::from_str(f, true).ok())
    }

    fn config_path(profile: Option<&str>) -> Result<PathBuf, String> {
        let home = dirs::home_dir().ok_or("Cannot find home directory")?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".rickdex").join(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides_file() {
        let config = Config {
            api_url: Some("http://file.local/api/character".into()),
            default_format: None,
        };
        assert_eq!(config.finder_config(None).api_url, "http://file.local/api/character");
        assert_eq!(
            config.finder_config(Some("http://flag.local".into())).api_url,
            "http://flag.local"
        );
        assert_eq!(Config::default().finder_config(None), FinderConfig::default());
    }

    #[test]
    fn test_format_parsing() {
        let config = Config { api_url: None, default_format: Some("YAML".into()) };
        assert!(matches!(config.format(), Some(OutputFormat::Yaml)));
        let config = Config { api_url: None, default_format: Some("xml".into()) };
        assert!(config.format().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("rickdex-test-{}", std::process::id()))
            .join("config.toml");
        let config = Config {
            api_url: Some("http://localhost:9000/api/character".into()),
            default_format: Some("json".into()),
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
