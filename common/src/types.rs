//! 保存データの型定義
//!
//! - ApplicationRecord: 応募1件
//! - Settings: 目標件数などの設定
//! - AppState: 永続化される唯一のドキュメント（設定 + 応募一覧）

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 目標件数の既定値
pub const DEFAULT_GOAL: u32 = 1000;

/// テーマの既定値
pub const DEFAULT_THEME: &str = "dark";

/// ステータスの既定値
pub const DEFAULT_STATUS: &str = "Applied";

/// ステータス一覧
pub const STATUSES: &[&str] = &["Applied", "Interview", "Rejected", "Offer", "Ghosted"];

/// 応募経路一覧
pub const PLATFORMS: &[&str] = &["LinkedIn", "Indeed", "Company Site", "Referral", "Other"];

/// マイルストーン（昇順）
pub const MILESTONES: &[u32] = &[10, 25, 50, 100, 250, 500, 1000];

/// 応募レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: String,

    pub company: String,          // 会社名

    pub role: String,             // 職種

    pub applied_date: NaiveDate,  // 応募日

    #[serde(default)]
    pub url: String,              // 求人URL

    #[serde(default)]
    pub location: String,         // 勤務地

    #[serde(default)]
    pub platform: String,         // 応募経路

    pub status: String,           // 選考状況

    #[serde(default)]
    pub notes: String,            // メモ

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// 設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// 目標応募件数
    pub goal_number: u32,
    /// 開始日（表示用）
    pub start_date: NaiveDate,
    /// 表示テーマ
    pub theme: String,
}

impl Settings {
    /// 既定の設定
    pub fn defaults(today: NaiveDate) -> Self {
        Self {
            goal_number: DEFAULT_GOAL,
            start_date: today,
            theme: DEFAULT_THEME.to_string(),
        }
    }

    /// 部分更新を適用（指定された項目のみ上書き）
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(goal_number) = patch.goal_number {
            self.goal_number = goal_number;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
    }
}

/// 設定の部分更新
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub goal_number: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub theme: Option<String>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.goal_number.is_none() && self.start_date.is_none() && self.theme.is_none()
    }
}

/// 永続化ドキュメント
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub settings: Settings,
    pub applications: Vec<ApplicationRecord>,
}

impl AppState {
    /// 初回起動時の状態
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            settings: Settings::defaults(today),
            applications: Vec::new(),
        }
    }

    /// IDで応募を検索
    pub fn find(&self, id: &str) -> Option<&ApplicationRecord> {
        self.applications.iter().find(|a| a.id == id)
    }
}
