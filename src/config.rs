use crate::error::{FaceReportError, Result};
use face_report_common::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use face_report_common::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// ベースURLを上書きする環境変数
pub const BASE_URL_ENV: &str = "FACE_REPORT_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
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
            .ok_or_else(|| FaceReportError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("face-report").join("config.json"))
    }

    /// ベースURLの決定: 引数 > 環境変数 > 設定ファイル > 既定値
    pub fn resolve_base_url(&self, flag: Option<&str>, env: Option<String>) -> String {
        flag.map(str::to_string)
            .or_else(|| env.filter(|v| !v.trim().is_empty()))
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// コントローラへ渡す接続設定を組み立てる
    pub fn client_config(&self, base_url: Option<&str>, timeout_seconds: Option<u64>) -> Result<ClientConfig> {
        let base_url = self.resolve_base_url(base_url, std::env::var(BASE_URL_ENV).ok());
        let timeout = timeout_seconds.unwrap_or(self.timeout_seconds);
        if timeout == 0 {
            return Err(FaceReportError::Config("timeout must be at least 1 second".into()));
        }
        Ok(ClientConfig::new(&base_url)?.with_timeout(Duration::from_secs(timeout)))
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        // 保存前に形式だけ確認
        let normalized = ClientConfig::new(&url)?;
        self.base_url = Some(normalized.base_url().to_string());
        self.save()
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(FaceReportError::Config("timeout must be at least 1 second".into()));
        }
        self.timeout_seconds = seconds;
        self.save()
    }
}
