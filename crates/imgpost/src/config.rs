use std::path::{Path, PathBuf};

use imgpost_client::TransportConfig;
use imgpost_core::UPLOAD_PATH;

pub const SERVER_ENV: &str = "IMGPOST_SERVER";
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct Settings {
    #[serde(default = "default_server")]
    pub server: String,
    #[serde(default = "default_upload_path")]
    pub upload_path: String,
}

fn default_server() -> String {
    DEFAULT_SERVER.to_string()
}

fn default_upload_path() -> String {
    UPLOAD_PATH.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: default_server(),
            upload_path: default_upload_path(),
        }
    }
}

fn home_dir() -> anyhow::Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("could not find home directory"))
}

pub fn settings_path() -> anyhow::Result<PathBuf> {
    Ok(home_dir()?.join(".imgpost").join("config.toml"))
}

/// Missing or unreadable config falls back to defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|content| toml::from_str(&content).ok())
        .unwrap_or_default()
}

pub fn load_settings() -> Settings {
    match settings_path() {
        Ok(path) => load_settings_from(&path),
        Err(_) => Settings::default(),
    }
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn save_settings(settings: &Settings) -> anyhow::Result<()> {
    save_settings_to(&settings_path()?, settings)
}

/// Pick the server base URL: command-line flag, then environment, then file.
pub fn resolve_server(flag: Option<&str>, env: Option<&str>, settings: &Settings) -> String {
    flag.or(env)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| settings.server.clone())
}

pub fn transport_config(flag: Option<&str>) -> TransportConfig {
    let settings = load_settings();
    let env = std::env::var(SERVER_ENV).ok();
    let server = resolve_server(flag, env.as_deref(), &settings);
    TransportConfig::new(server).with_upload_path(settings.upload_path)
}
