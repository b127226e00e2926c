use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 保存ファイルを指定する環境変数
pub const DATA_FILE_ENV: &str = "JOB_TRACKER_DATA_FILE";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 保存ファイル（省略時はデータディレクトリ）
    pub data_file: Option<PathBuf>,
    /// 応募経路の既定値
    pub default_platform: Option<String>,
    /// 直近一覧の表示件数
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            default_platform: None,
            recent_limit: 5,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TrackerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("job-tracker").join("config.json"))
    }

    /// 既定の保存ファイル
    pub fn default_data_file() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| TrackerError::Config("データディレクトリが見つかりません".into()))?;
        Ok(data_dir.join("job-tracker").join("storage.json"))
    }

    /// 保存ファイルを決定
    ///
    /// 優先順位: コマンドライン引数 → 環境変数 → 設定ファイル → 既定値
    pub fn resolve_data_file(&self, flag: Option<&Path>) -> Result<PathBuf> {
        let env = std::env::var(DATA_FILE_ENV).ok();
        self.resolve_data_file_with(flag, env.as_deref())
    }

    fn resolve_data_file_with(&self, flag: Option<&Path>, env: Option<&str>) -> Result<PathBuf> {
        if let Some(path) = flag {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = env.map(str::trim).filter(|s| !s.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => Self::default_data_file(),
        }
    }

    pub fn set_data_file(&mut self, path: PathBuf) -> Result<()> {
        self.data_file = Some(path);
        self.save()
    }

    pub fn set_default_platform(&mut self, platform: String) -> Result<()> {
        let platform = platform.trim().to_string();
        self.default_platform = if platform.is_empty() { None } else { Some(platform) };
        self.save()
    }
}
