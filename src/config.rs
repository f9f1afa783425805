use crate::error::{FaceClientError, Result};
use face_client_common::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 環境変数でバックエンドURLを上書きする
pub const BASE_URL_ENV: &str = "FACE_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FaceClientError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("face-client").join("config.json"))
    }

    /// バックエンドURLを決定する（引数 > 環境変数 > 設定ファイル）
    pub fn resolve_base_url(&self, cli_override: Option<&str>) -> String {
        let env_value = std::env::var(BASE_URL_ENV).ok();
        pick_base_url(cli_override, env_value.as_deref(), &self.base_url)
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        let url = url.trim().to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FaceClientError::Config(format!(
                "URLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.base_url = url;
        self.save()
    }
}

fn pick_base_url(cli_override: Option<&str>, env_value: Option<&str>, configured: &str) -> String {
    [cli_override, env_value, Some(configured)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string()
}
