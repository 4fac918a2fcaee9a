use crate::error::Result;
use error_chain::bail;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_PATH: &str = "data/config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub server: ServerConfig,
  #[serde(default)]
  pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub bind_addr: String,
  pub database_url: Option<String>,
  pub upload_dir: String,
  pub pool_size: u32,
  /// Largest accepted `image` part, in bytes
  pub max_image_bytes: usize,
  /// Largest accepted text field, in bytes
  pub max_field_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
  /// External address prepended to `/uploads/<file>` in `imageUrl`
  pub public_url: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    ServerConfig {
      bind_addr: "0.0.0.0:5000".to_string(),
      database_url: None,
      upload_dir: "uploads".to_string(),
      pool_size: 10,
      max_image_bytes: 10 * 1024 * 1024,
      max_field_bytes: 64 * 1024,
    }
  }
}

impl Default for WebConfig {
  fn default() -> Self {
    WebConfig {
      public_url: "http://localhost:5000".to_string(),
    }
  }
}

impl Config {
  pub fn database_url(&self) -> Result<&str> {
    match self.server.database_url.as_deref() {
      Some(url) if !url.is_empty() => Ok(url),
      _ => bail!("DATABASE_URL is not set"),
    }
  }

  /// Environment wins over the file.
  fn apply_env<F>(mut self, var: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(url) = var("DATABASE_URL") {
      self.server.database_url = Some(url);
    }
    if let Some(url) = var("PUBLIC_URL") {
      self.web.public_url = url;
    }
    self.web.public_url = self.web.public_url.trim_end_matches('/').to_string();
    self
  }
}

/// Reads `path` if it exists (defaults otherwise), then `.env` and the process environment.
pub fn load(path: &str) -> Result<Config> {
  let config: Config = if Path::new(path).exists() {
    toml::from_str(&std::fs::read_to_string(path)?)?
  } else {
    log::warn!("{} not found, using defaults", path);
    Config::default()
  };

  dotenvy::dotenv().ok();
  Ok(config.apply_env(|key| std::env::var(key).ok()))
}
