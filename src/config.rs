use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const GENIUS_ENV: &str = "GENIUS_API_KEY";
pub const YOUTUBE_ENV: &str = "YOUTUBE_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub genius: GeniusConfig,
    #[serde(default)]
    pub youtube: YoutubeConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeniusConfig {
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct YoutubeConfig {
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    pub db_path: Option<PathBuf>,
}

impl GeniusConfig {
    pub fn is_configured(&self) -> bool {
        self.access_token.as_ref().is_some_and(|s| !s.is_empty())
    }
}

impl YoutubeConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.as_ref().is_some_and(|s| !s.is_empty())
    }
}

impl Config {
    /// 환경 변수 값이 있으면 설정 파일 값보다 우선한다.
    pub fn with_env_overrides(mut self, genius: Option<String>, youtube: Option<String>) -> Self {
        if let Some(token) = genius.filter(|s| !s.is_empty()) {
            self.genius.access_token = Some(token);
        }
        if let Some(key) = youtube.filter(|s| !s.is_empty()) {
            self.youtube.api_key = Some(key);
        }
        self
    }

    /// 즐겨찾기 DB 경로. 지정된 값이 없으면 설정 디렉토리의 favorites.db.
    pub fn db_path(&self) -> PathBuf {
        self.storage
            .db_path
            .clone()
            .unwrap_or_else(|| config_dir().join("favorites.db"))
    }
}

fn config_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config").join("modumubul")
}

fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// 설정 파일만 읽는다. 파일이 없거나 잘못되었으면 기본값.
pub fn load_file_config() -> Config {
    let path = config_path();
    if !path.exists() {
        return Config::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            warn!("설정 파일을 해석할 수 없어 기본값을 사용합니다: {}: {}", path.display(), e);
            Config::default()
        }),
        Err(_) => Config::default(),
    }
}

/// 설정 파일을 읽고 환경 변수(.env 포함)로 덮어쓴다.
pub fn load_config() -> Config {
    let cfg = load_file_config().with_env_overrides(
        std::env::var(GENIUS_ENV).ok(),
        std::env::var(YOUTUBE_ENV).ok(),
    );
    debug!(
        genius = cfg.genius.is_configured(),
        youtube = cfg.youtube.is_configured(),
        "설정 로드"
    );
    cfg
}

pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(&path, content)
        .with_context(|| format!("설정 파일을 쓸 수 없습니다: {}", path.display()))?;
    Ok(())
}
