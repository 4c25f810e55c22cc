use crate::error::ConfigError;
use config::{Config, Environment, File};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct UploaderConfig {
    /// Base URL of the formatter server; `/upload` and `/shutdown` are resolved against it.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

fn default_window_width() -> f32 {
    600.0
}

fn default_window_height() -> f32 {
    600.0
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

impl UploaderConfig {
    /// Defaults, then `uploader.toml` if present, then `UPLOADER_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("uploader").required(false))
            .add_source(Environment::with_prefix("UPLOADER"))
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.base_url()?;
        Ok(loaded)
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.server_url).map_err(|source| ConfigError::ServerUrl {
            url: self.server_url.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_formatter() {
        let config = UploaderConfig::default();
        let url = config.base_url().unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5001/");
        assert_eq!(config.window_width, 600.0);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = Config::builder()
            .set_override("server_url", "http://formatter.local:8080")
            .unwrap()
            .build()
            .unwrap();
        let loaded: UploaderConfig = config.try_deserialize().unwrap();
        assert_eq!(loaded.server_url, "http://formatter.local:8080");
        assert_eq!(loaded.window_height, 600.0);
    }

    #[test]
    fn rejects_unparseable_server_url() {
        let config = UploaderConfig {
            server_url: "not a url".to_string(),
            ..UploaderConfig::default()
        };
        assert!(matches!(
            config.base_url(),
            Err(ConfigError::ServerUrl { .. })
        ));
    }
}
